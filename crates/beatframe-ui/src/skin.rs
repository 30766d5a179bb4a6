use beatframe_core::ReactiveError;
use beatframe_render_common::DrawingSurface;
use beatframe_ui_graphics::{Point, Rect};

use crate::element::UiElement;

/// Render strategy attached to an element.
///
/// `origin` is the absolute position of the parent's content zone; an
/// element's zones translated by it give root-space rectangles. A skin that
/// changes the surface color or clip must restore it before returning.
pub trait Skin {
    /// Draws the element before its children.
    fn render_self(
        &self,
        element: &UiElement,
        origin: Point,
        surface: &mut dyn DrawingSurface,
    ) -> Result<(), ReactiveError>;

    /// Draws over the children once they have been rendered.
    fn render_after_children(
        &self,
        _element: &UiElement,
        _origin: Point,
        _surface: &mut dyn DrawingSurface,
    ) -> Result<(), ReactiveError> {
        Ok(())
    }
}

/// Adapts a closure into a [`Skin`] that only renders before children.
pub struct FnSkin<F>(pub F);

impl<F> Skin for FnSkin<F>
where
    F: Fn(&UiElement, Point, &mut dyn DrawingSurface) -> Result<(), ReactiveError>,
{
    fn render_self(
        &self,
        element: &UiElement,
        origin: Point,
        surface: &mut dyn DrawingSurface,
    ) -> Result<(), ReactiveError> {
        (self.0)(element, origin, surface)
    }
}

/// Translates a zone of an element into root space.
pub fn absolute(zone: Rect, origin: Point) -> Rect {
    zone.translate(origin.x, origin.y)
}

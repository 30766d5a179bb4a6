//! Layout is expressed as bindings on the four bounds cells of an element.
//!
//! The helpers here only install bindings; nothing is computed until a
//! bound value is read, and any later change to the parent's content zone
//! invalidates the child's bounds automatically.

use beatframe_core::{Observable, ReactiveError, Runtime, Scope};
use beatframe_ui_graphics::{Anchor, Insets, Point, Rect, Size};

use crate::element::{Bounds, UiElement, WeakElement, Zones};

pub(crate) fn bind_zones(
    runtime: &Runtime,
    bounds: &Bounds,
    margin: &Observable<Insets>,
    border: &Observable<Insets>,
    padding: &Observable<Insets>,
) -> Zones {
    let margin_zone = {
        let (bounds, margin) = (bounds.clone(), margin.clone());
        runtime.derived(move |scope| {
            let rect = Rect::new(
                scope.read(&bounds.x)?,
                scope.read(&bounds.y)?,
                scope.read(&bounds.width)?,
                scope.read(&bounds.height)?,
            );
            Ok(rect.inset(scope.read(&margin)?))
        })
    };
    let border_zone = inset_zone(runtime, &margin_zone, border);
    let padding_zone = inset_zone(runtime, &border_zone, padding);
    let content_zone = {
        let padding_zone = padding_zone.clone();
        runtime.derived(move |scope| scope.read(&padding_zone))
    };
    Zones {
        margin: margin_zone,
        border: border_zone,
        padding: padding_zone,
        content: content_zone,
    }
}

fn inset_zone(runtime: &Runtime, outer: &Observable<Rect>, insets: &Observable<Insets>) -> Observable<Rect> {
    let (outer, insets) = (outer.clone(), insets.clone());
    runtime.derived(move |scope| Ok(scope.read(&outer)?.inset(scope.read(&insets)?)))
}

/// Content zone of the current parent, or `None` when detached.
pub fn read_parent_content(
    scope: &Scope<'_>,
    parent: &Observable<Option<WeakElement>>,
) -> Result<Option<Rect>, ReactiveError> {
    match scope.read(parent)?.and_then(|link| link.upgrade()) {
        Some(parent) => Ok(Some(scope.read(parent.content_zone())?)),
        None => Ok(None),
    }
}

fn parent_content_size(
    scope: &Scope<'_>,
    parent: &Observable<Option<WeakElement>>,
) -> Result<Size, ReactiveError> {
    Ok(read_parent_content(scope, parent)?
        .map(|zone| zone.size())
        .unwrap_or(Size::ZERO))
}

impl UiElement {
    /// Width follows the parent's content width: `parent * multiplier + adjust`.
    pub fn bind_width_to_parent(&self, adjust: f32, multiplier: f32) {
        let parent = self.parent_cell().clone();
        self.bounds().width.bind(move |scope| {
            Ok(parent_content_size(scope, &parent)?.width * multiplier + adjust)
        });
    }

    /// Height follows the parent's content height: `parent * multiplier + adjust`.
    pub fn bind_height_to_parent(&self, adjust: f32, multiplier: f32) {
        let parent = self.parent_cell().clone();
        self.bounds().height.bind(move |scope| {
            Ok(parent_content_size(scope, &parent)?.height * multiplier + adjust)
        });
    }

    /// Places this element right of `sibling`, `gap` units after its far edge.
    pub fn bind_x_to(&self, sibling: &UiElement, gap: f32) {
        let (x, width) = (sibling.bounds().x.clone(), sibling.bounds().width.clone());
        self.bounds()
            .x
            .bind(move |scope| Ok(scope.read(&x)? + scope.read(&width)? + gap));
    }

    /// Places this element below `sibling`, `gap` units after its far edge.
    pub fn bind_y_to(&self, sibling: &UiElement, gap: f32) {
        let (y, height) = (sibling.bounds().y.clone(), sibling.bounds().height.clone());
        self.bounds()
            .y
            .bind(move |scope| Ok(scope.read(&y)? + scope.read(&height)? + gap));
    }

    /// Binds x and y so that `anchor` of this element sits on `anchor` of the
    /// parent's content zone, shifted by the offset. Width and height are left
    /// as they are and may themselves be bound.
    pub fn anchor(&self, anchor: Anchor, offset_x: f32, offset_y: f32) {
        let offset = Point::new(offset_x, offset_y);
        let place = {
            let parent = self.parent_cell().clone();
            let (width, height) = (self.bounds().width.clone(), self.bounds().height.clone());
            move |scope: &Scope<'_>| -> Result<Point, ReactiveError> {
                let container = parent_content_size(scope, &parent)?;
                let size = Size::new(scope.read(&width)?, scope.read(&height)?);
                Ok(anchor.place(container, size, offset))
            }
        };
        let place_y = place.clone();
        self.bounds().x.bind(move |scope| Ok(place(scope)?.x));
        self.bounds().y.bind(move |scope| Ok(place_y(scope)?.y));
    }

    /// Covers the parent's whole content zone.
    pub fn fill_parent(&self) {
        self.bounds().x.set(0.0);
        self.bounds().y.set(0.0);
        self.bind_width_to_parent(0.0, 1.0);
        self.bind_height_to_parent(0.0, 1.0);
    }
}

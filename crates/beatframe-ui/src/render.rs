//! Depth-first render traversal.

use beatframe_core::ReactiveError;
use beatframe_render_common::DrawingSurface;
use beatframe_ui_graphics::{Color, Point};

use crate::element::UiElement;

/// Renders `root` and its visible subtree.
///
/// The surface color and clip stack are the same after the call as before
/// it, also when a binding read fails halfway through.
pub fn render_tree(root: &UiElement, surface: &mut dyn DrawingSurface) -> Result<(), ReactiveError> {
    let origin = root.parent_origin()?;
    render_element(root, origin, surface)
}

pub(crate) fn render_element(
    element: &UiElement,
    origin: Point,
    surface: &mut dyn DrawingSurface,
) -> Result<(), ReactiveError> {
    if !element.apparent_visibility().get()? {
        return Ok(());
    }
    let saved_color = surface.color();
    let result = render_contents(element, origin, surface);
    surface.set_color(saved_color);
    result
}

fn render_contents(
    element: &UiElement,
    origin: Point,
    surface: &mut dyn DrawingSurface,
) -> Result<(), ReactiveError> {
    let skin = element.skin();
    if let Some(skin) = &skin {
        skin.render_self(element, origin, surface)?;
    }

    let clip = if element.do_clip().get()? {
        let bounds = element.bounds().rect()?;
        surface.push_clip(bounds.translate(origin.x, origin.y));
        true
    } else {
        false
    };
    let children = render_children(element, origin, surface);
    if clip {
        surface.pop_clip();
    }
    children?;

    if let Some(skin) = &skin {
        skin.render_after_children(element, origin, surface)?;
    }
    Ok(())
}

fn render_children(
    element: &UiElement,
    origin: Point,
    surface: &mut dyn DrawingSurface,
) -> Result<(), ReactiveError> {
    let content = element.content_zone().get()?;
    let child_origin = Point::new(origin.x + content.x, origin.y + content.y);
    for child in element.children() {
        render_element(&child, child_origin, surface)?;
    }
    Ok(())
}

const OUTLINE_COLORS: [Color; 4] = [
    Color(1.0, 0.0, 0.0, 1.0),
    Color(0.0, 1.0, 0.0, 1.0),
    Color(0.0, 0.5, 1.0, 1.0),
    Color(1.0, 1.0, 0.0, 1.0),
];

/// Strokes the bounds of every element below `root`, colored by depth.
pub fn render_outlines(
    root: &UiElement,
    surface: &mut dyn DrawingSurface,
    only_visible: bool,
) -> Result<(), ReactiveError> {
    let origin = root.parent_origin()?;
    let mut pending = vec![(root.clone(), origin, 0usize)];
    while let Some((element, origin, depth)) = pending.pop() {
        if only_visible && !element.apparent_visibility().get()? {
            continue;
        }
        let bounds = element.bounds().rect()?.translate(origin.x, origin.y);
        surface.push_color(OUTLINE_COLORS[depth % OUTLINE_COLORS.len()]);
        surface.stroke_rect(bounds, 1.0);
        surface.pop_color();

        let content = element.content_zone().get()?;
        let child_origin = Point::new(origin.x + content.x, origin.y + content.y);
        for child in element.children().into_iter().rev() {
            pending.push((child, child_origin, depth + 1));
        }
    }
    Ok(())
}

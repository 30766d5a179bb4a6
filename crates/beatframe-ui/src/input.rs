//! Hit testing and event delivery along element paths.
//!
//! A path runs from a layer root down to the deepest element under the
//! pointer. Consumable events travel it deepest first; hover transitions
//! are derived by comparing the previous path against a fresh one.

use beatframe_core::ReactiveError;
use beatframe_foundation::InputEvent;
use beatframe_ui_graphics::Point;

use crate::element::UiElement;
use crate::UiError;

/// Elements under `point` from `root` down, root first.
///
/// Children are tested topmost (last added) first and only elements whose
/// bounds contain the point are descended into. Hidden elements are skipped.
pub fn hit_path(root: &UiElement, point: Point) -> Result<Vec<UiElement>, ReactiveError> {
    let mut path = Vec::new();
    let origin = root.parent_origin()?;
    if !root.apparent_visibility().get()?
        || !root
            .bounds()
            .rect()?
            .translate(origin.x, origin.y)
            .contains(point.x, point.y)
    {
        return Ok(path);
    }

    let mut current = root.clone();
    let mut current_origin = origin;
    loop {
        let content = current.content_zone().get()?;
        let child_origin = Point::new(current_origin.x + content.x, current_origin.y + content.y);
        path.push(current.clone());

        let mut next = None;
        for child in current.children().into_iter().rev() {
            if !child.apparent_visibility().get()? {
                continue;
            }
            let bounds = child
                .bounds()
                .rect()?
                .translate(child_origin.x, child_origin.y);
            if bounds.contains(point.x, point.y) {
                next = Some(child);
                break;
            }
        }
        match next {
            Some(child) => {
                current = child;
                current_origin = child_origin;
            }
            None => return Ok(path),
        }
    }
}

/// The deepest element of a hit test, if anything was hit.
pub fn hit_test(root: &UiElement, point: Point) -> Result<Option<UiElement>, ReactiveError> {
    Ok(hit_path(root, point)?.pop())
}

/// Elements that left and entered the hover path.
#[derive(Debug, Default)]
pub(crate) struct HoverChange {
    /// Deepest first.
    pub(crate) exited: Vec<UiElement>,
    /// Shallowest first.
    pub(crate) entered: Vec<UiElement>,
}

pub(crate) fn diff_paths(previous: &[UiElement], current: &[UiElement]) -> HoverChange {
    let shared = previous
        .iter()
        .zip(current)
        .take_while(|(old, new)| old.ptr_eq(new))
        .count();
    HoverChange {
        exited: previous[shared..].iter().rev().cloned().collect(),
        entered: current[shared..].to_vec(),
    }
}

/// Offers `event` to `path` deepest first until a listener consumes it.
///
/// Elements detached from `root` since the path was computed are skipped.
pub(crate) fn dispatch_along(
    path: &[UiElement],
    root: &UiElement,
    event: &InputEvent,
) -> Result<bool, UiError> {
    for element in path.iter().rev() {
        if !element.is_in_subtree_of(root) {
            log::trace!("skipping detached {} for {event:?}", element.label());
            continue;
        }
        if element.fire_input(event)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Sends exit events then enter events for a hover change.
pub(crate) fn deliver_hover_change(change: &HoverChange, position: Point) -> Result<(), UiError> {
    let exit = InputEvent::MouseExited { position };
    for element in &change.exited {
        element.notify_input(&exit)?;
    }
    let enter = InputEvent::MouseEntered { position };
    for element in &change.entered {
        element.notify_input(&enter)?;
    }
    Ok(())
}

//! Debug dumps of the element tree.

use std::fmt::Write;

use beatframe_core::ReactiveError;

use crate::element::UiElement;
use crate::scene_root::SceneRoot;

/// Formats `root` and its subtree, one element per line, indented by depth.
///
/// Each line shows the element label, its bounds in parent content
/// coordinates and, when hidden, a `hidden` marker.
pub fn format_element_tree(root: &UiElement) -> Result<String, ReactiveError> {
    let mut out = String::new();
    let mut pending = vec![(root.clone(), 0usize)];
    while let Some((element, depth)) = pending.pop() {
        let bounds = element.bounds().rect()?;
        let _ = write!(
            out,
            "{:indent$}{} [{:.1}, {:.1}, {:.1} x {:.1}]",
            "",
            element.label(),
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            indent = depth * 2
        );
        if !element.visible().get()? {
            out.push_str(" hidden");
        }
        if element.skin().is_some() {
            out.push_str(" skinned");
        }
        out.push('\n');
        for child in element.children().into_iter().rev() {
            pending.push((child, depth + 1));
        }
    }
    Ok(out)
}

pub fn log_element_tree(root: &UiElement) {
    match format_element_tree(root) {
        Ok(tree) => log::debug!("element tree:\n{tree}"),
        Err(err) => log::warn!("failed to format element tree: {err}"),
    }
}

/// Formats every layer of `scene`, bottom first.
pub fn format_scene(scene: &SceneRoot) -> Result<String, ReactiveError> {
    let mut out = String::new();
    for layer in scene.layers() {
        let _ = writeln!(
            out,
            "== {} (blocking: {}, hovered: {})",
            layer.name(),
            layer.is_blocking(),
            layer.hover_path().len()
        );
        out.push_str(&format_element_tree(layer.root())?);
    }
    Ok(out)
}

pub fn log_scene(scene: &SceneRoot) {
    match format_scene(scene) {
        Ok(dump) => log::debug!("scene:\n{dump}"),
        Err(err) => log::warn!("failed to format scene: {err}"),
    }
}

//! Scene graph for Beatframe built on top of the reactive core.
//!
//! Elements carry their geometry and visual state as observables, so layout
//! is a web of lazily evaluated bindings. The [`SceneRoot`] stacks several
//! element trees into layers and routes pointer and key input through them.

mod camera;
mod debug;
mod element;
mod error;
mod input;
mod layout;
mod render;
mod scene_root;
mod skin;
pub mod widgets;

pub use camera::Camera;
pub use element::{Bounds, ElementId, InputListener, InputListenerId, UiElement, WeakElement};
pub use error::{TreeError, UiError};
pub use input::{hit_path, hit_test};
pub use layout::read_parent_content;
pub use render::{render_outlines, render_tree};
pub use scene_root::{Layer, LayerKind, OutlineMode, SceneConfig, SceneRoot, WeakSceneRoot};
pub use skin::{absolute, FnSkin, Skin};
pub use widgets::{
    image_dest, Button, ButtonStyle, ImageNode, ImageRenderingMode, RadioButton, RectElement,
    ToggleGroup,
};

// Debug utilities
pub use debug::{format_element_tree, format_scene, log_element_tree, log_scene};

pub use beatframe_core::{Observable, ReactiveError, ReadOnly, Runtime, Scope};
pub use beatframe_foundation::{InputEvent, KeyCode, Modifiers, PointerButton};
pub use beatframe_ui_graphics::{Anchor, Color, Insets, Point, Rect, Size};

#[cfg(test)]
#[path = "tests/element_tests.rs"]
mod element_tests;

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod layout_tests;

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod render_tests;

#[cfg(test)]
#[path = "tests/input_tests.rs"]
mod input_tests;

#[cfg(test)]
#[path = "tests/scene_root_tests.rs"]
mod scene_root_tests;

#[cfg(test)]
#[path = "tests/widget_tests.rs"]
mod widget_tests;

#[cfg(test)]
#[path = "tests/debug_tests.rs"]
mod debug_tests;

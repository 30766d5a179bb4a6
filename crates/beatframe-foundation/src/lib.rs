//! Foundation types for Beatframe: the input event vocabulary shared by
//! platform adapters and the scene graph.

pub mod input;

// Re-export commonly used items
pub use input::*;

pub mod prelude {
    pub use crate::input::{InputEvent, KeyCode, Modifiers, PointerButton, PointerButtons};
}

#[cfg(test)]
#[path = "tests/input_tests.rs"]
mod input_tests;

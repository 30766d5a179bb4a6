//! Pure math/data for drawing & layout in Beatframe
//!
//! This crate contains geometry primitives, insets, anchors and color
//! definitions that are used throughout the Beatframe scene graph.

mod anchor;
mod color;
mod geometry;

pub use anchor::*;
pub use color::*;
pub use geometry::*;

pub mod prelude {
    pub use crate::anchor::Anchor;
    pub use crate::color::Color;
    pub use crate::geometry::{Insets, Point, Rect, Size};
}

#[cfg(test)]
#[path = "tests/geometry_tests.rs"]
mod geometry_tests;

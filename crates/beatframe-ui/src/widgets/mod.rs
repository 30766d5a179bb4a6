//! Stock widgets.
//!
//! Each widget is a plain [`UiElement`](crate::UiElement) with a skin and
//! input listeners attached; the widget struct only keeps handles to the
//! element and the observables that drive it.

pub mod button;
pub mod image;
pub mod radio;
pub mod rect;

pub use button::*;
pub use image::*;
pub use radio::*;
pub use rect::*;

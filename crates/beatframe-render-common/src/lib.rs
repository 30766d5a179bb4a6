//! Common rendering contracts shared between renderer backends.
//!
//! Elements never talk to a graphics API. They draw through a
//! [`DrawingSurface`] handed down the render traversal; backends implement
//! the trait over their own frame buffers, and [`RecordingSurface`] keeps
//! the calls for headless inspection.

mod recording;
mod state;

pub use recording::{DrawCommand, RecordingSurface};
pub use state::SurfaceState;

use beatframe_ui_graphics::{Color, Point, Rect, Size};

/// Identifies a texture registered with a renderer backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// A rectangular region of a texture, in texels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextureRegion {
    pub texture: TextureId,
    pub region: Rect,
}

impl TextureRegion {
    pub fn new(texture: TextureId, region: Rect) -> Self {
        Self { texture, region }
    }

    /// Region covering a whole texture of the given size.
    pub fn whole(texture: TextureId, size: Size) -> Self {
        Self::new(texture, Rect::from_size(size))
    }

    pub fn width(&self) -> f32 {
        self.region.width
    }

    pub fn height(&self) -> f32 {
        self.region.height
    }
}

/// Abstraction implemented by concrete renderer backends.
///
/// The surface carries a current color, combined multiplicatively with every
/// draw call, and a clip stack. Callers that change either must restore it
/// with the matching pop before returning.
pub trait DrawingSurface {
    /// Current draw color.
    fn color(&self) -> Color;

    /// Replaces the current draw color without saving the previous one.
    fn set_color(&mut self, color: Color);

    /// Saves the current color and replaces it.
    fn push_color(&mut self, color: Color);

    /// Restores the color saved by the matching [`DrawingSurface::push_color`].
    fn pop_color(&mut self);

    /// Fills `rect` with the current color.
    fn fill_rect(&mut self, rect: Rect);

    /// Draws `texture` stretched over `dest`, tinted by the current color and
    /// rotated by `rotation` degrees counter-clockwise around `pivot`, which is
    /// relative to the origin of `dest`.
    fn draw_texture(&mut self, texture: &TextureRegion, dest: Rect, pivot: Point, rotation: f32);

    /// Restricts drawing to the intersection of `rect` and the current clip.
    fn push_clip(&mut self, rect: Rect);

    fn pop_clip(&mut self);

    /// The active clip rectangle, `None` when unclipped. A clip that
    /// excludes everything has zero size.
    fn clip(&self) -> Option<Rect>;

    /// Outlines `rect` with lines of `thickness` drawn inside its edges.
    fn stroke_rect(&mut self, rect: Rect, thickness: f32) {
        let t = thickness.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
        if t <= 0.0 {
            return;
        }
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, t));
        self.fill_rect(Rect::new(rect.x, rect.bottom() - t, rect.width, t));
        self.fill_rect(Rect::new(rect.x, rect.y + t, t, rect.height - 2.0 * t));
        self.fill_rect(Rect::new(
            rect.right() - t,
            rect.y + t,
            t,
            rect.height - 2.0 * t,
        ));
    }
}

#[cfg(test)]
#[path = "tests/surface_tests.rs"]
mod surface_tests;

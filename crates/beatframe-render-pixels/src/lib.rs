//! Software renderer writing into an RGBA8 frame buffer, as provided by the
//! `pixels` crate.

mod raster;
mod textures;

pub use raster::FrameSurface;
pub use textures::{Texture, TextureError, TextureStore};

use beatframe_render_common::TextureId;
use beatframe_ui_graphics::Color;

/// Owns the registered textures and produces a [`FrameSurface`] per frame.
#[derive(Debug)]
pub struct PixelsRenderer {
    textures: TextureStore,
    clear_color: Color,
}

impl PixelsRenderer {
    pub fn new() -> Self {
        Self {
            textures: TextureStore::default(),
            clear_color: Color::BLACK,
        }
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Registers an RGBA8 texture of `width` x `height` texels.
    pub fn register_texture(
        &mut self,
        width: u32,
        height: u32,
        rgba: Vec<u8>,
    ) -> Result<TextureId, TextureError> {
        self.textures.insert(width, height, rgba)
    }

    pub fn textures(&self) -> &TextureStore {
        &self.textures
    }

    /// Clears `frame` and wraps it in a surface. `scale` converts logical
    /// UI units to buffer pixels.
    pub fn begin_frame<'a>(
        &'a self,
        frame: &'a mut [u8],
        width: u32,
        height: u32,
        scale: f32,
    ) -> FrameSurface<'a> {
        let mut surface = FrameSurface::new(frame, width, height, scale, &self.textures);
        surface.clear(self.clear_color);
        surface
    }
}

impl Default for PixelsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/raster_tests.rs"]
mod raster_tests;

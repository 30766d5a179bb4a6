use std::fmt;

use beatframe_render_common::TextureId;

/// RGBA8 texel data.
#[derive(Clone, Debug)]
pub struct Texture {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Texture {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Texel at `(x, y)`, clamped to the texture edges.
    pub fn texel(&self, x: i64, y: i64) -> [u8; 4] {
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        let offset = (y * self.width as usize + x) * 4;
        [
            self.rgba[offset],
            self.rgba[offset + 1],
            self.rgba[offset + 2],
            self.rgba[offset + 3],
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureError {
    Empty,
    SizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Empty => write!(f, "texture has zero width or height"),
            TextureError::SizeMismatch { expected, actual } => write!(
                f,
                "texture data has {actual} bytes, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for TextureError {}

/// Textures indexed by [`TextureId`] in registration order.
#[derive(Debug, Default)]
pub struct TextureStore {
    textures: Vec<Texture>,
}

impl TextureStore {
    pub fn insert(&mut self, width: u32, height: u32, rgba: Vec<u8>) -> Result<TextureId, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty);
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(TextureError::SizeMismatch {
                expected,
                actual: rgba.len(),
            });
        }
        let id = TextureId(self.textures.len() as u32);
        self.textures.push(Texture {
            width,
            height,
            rgba,
        });
        Ok(id)
    }

    pub fn get(&self, id: TextureId) -> Option<&Texture> {
        self.textures.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

use beatframe_render_common::{DrawingSurface, SurfaceState, TextureRegion};
use beatframe_ui_graphics::{Color, Point, Rect};

use crate::textures::TextureStore;

/// A drawing surface over one RGBA8 frame buffer.
pub struct FrameSurface<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
    scale: f32,
    textures: &'a TextureStore,
    state: SurfaceState,
}

impl<'a> FrameSurface<'a> {
    pub fn new(
        frame: &'a mut [u8],
        width: u32,
        height: u32,
        scale: f32,
        textures: &'a TextureStore,
    ) -> Self {
        let expected = width as usize * height as usize * 4;
        if frame.len() < expected {
            log::warn!(
                "frame buffer holds {} bytes, {width}x{height} needs {expected}",
                frame.len()
            );
        }
        Self {
            frame,
            width,
            height,
            scale,
            textures,
            state: SurfaceState::new(),
        }
    }

    pub fn clear(&mut self, color: Color) {
        let rgba = color.to_rgba8();
        for pixel in self.frame.chunks_exact_mut(4) {
            pixel.copy_from_slice(&rgba);
        }
    }

    pub fn state(&self) -> &SurfaceState {
        &self.state
    }

    /// Pixel bounds `[x0, x1) x [y0, y1)` covered by a logical rectangle.
    fn pixel_bounds(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let to_px = |value: f32, limit: u32| (value * self.scale).round().clamp(0.0, limit as f32) as u32;
        let x0 = to_px(rect.x, self.width);
        let y0 = to_px(rect.y, self.height);
        let x1 = to_px(rect.right(), self.width);
        let y1 = to_px(rect.bottom(), self.height);
        if x0 >= x1 || y0 >= y1 {
            None
        } else {
            Some((x0, y0, x1, y1))
        }
    }

    fn blend(&mut self, x: u32, y: u32, src: [f32; 4]) {
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let Some(pixel) = self.frame.get_mut(offset..offset + 4) else {
            return;
        };
        let alpha = src[3].clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        for channel in 0..3 {
            let dst = pixel[channel] as f32 / 255.0;
            let out = src[channel].clamp(0.0, 1.0) * alpha + dst * (1.0 - alpha);
            pixel[channel] = (out * 255.0).round() as u8;
        }
        let dst_alpha = pixel[3] as f32 / 255.0;
        pixel[3] = ((alpha + dst_alpha * (1.0 - alpha)) * 255.0).round() as u8;
    }
}

impl DrawingSurface for FrameSurface<'_> {
    fn color(&self) -> Color {
        self.state.color()
    }

    fn set_color(&mut self, color: Color) {
        self.state.set_color(color);
    }

    fn push_color(&mut self, color: Color) {
        self.state.push_color(color);
    }

    fn pop_color(&mut self) {
        self.state.pop_color();
    }

    fn fill_rect(&mut self, rect: Rect) {
        let Some(visible) = self.state.visible_part(rect) else {
            return;
        };
        let Some((x0, y0, x1, y1)) = self.pixel_bounds(visible) else {
            return;
        };
        let Color(r, g, b, a) = self.state.color();
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, [r, g, b, a]);
            }
        }
    }

    fn draw_texture(&mut self, texture: &TextureRegion, dest: Rect, pivot: Point, rotation: f32) {
        let Some(source) = self.textures.get(texture.texture) else {
            log::warn!("draw_texture with unknown texture {:?}", texture.texture);
            return;
        };
        if dest.width <= 0.0 || dest.height <= 0.0 {
            return;
        }
        let (sin, cos) = rotation.to_radians().sin_cos();
        let origin = Point::new(dest.x + pivot.x, dest.y + pivot.y);

        // Screen-space bounding box of the rotated destination.
        let corners = [
            Point::new(-pivot.x, -pivot.y),
            Point::new(dest.width - pivot.x, -pivot.y),
            Point::new(-pivot.x, dest.height - pivot.y),
            Point::new(dest.width - pivot.x, dest.height - pivot.y),
        ]
        .map(|p| Point::new(origin.x + p.x * cos + p.y * sin, origin.y - p.x * sin + p.y * cos));
        let min_x = corners.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
        let min_y = corners.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_x = corners.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
        let max_y = corners.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
        let bounds = Rect::new(min_x, min_y, max_x - min_x, max_y - min_y);

        let Some(visible) = self.state.visible_part(bounds) else {
            return;
        };
        let Some((x0, y0, x1, y1)) = self.pixel_bounds(visible) else {
            return;
        };
        let tint = self.state.color();
        let region = texture.region;

        for y in y0..y1 {
            for x in x0..x1 {
                let sx = (x as f32 + 0.5) / self.scale - origin.x;
                let sy = (y as f32 + 0.5) / self.scale - origin.y;
                let lx = sx * cos - sy * sin + pivot.x;
                let ly = sx * sin + sy * cos + pivot.y;
                if lx < 0.0 || ly < 0.0 || lx >= dest.width || ly >= dest.height {
                    continue;
                }
                let u = region.x + lx / dest.width * region.width;
                let v = region.y + ly / dest.height * region.height;
                let texel = source.texel(u.floor() as i64, v.floor() as i64);
                let src = [
                    texel[0] as f32 / 255.0 * tint.0,
                    texel[1] as f32 / 255.0 * tint.1,
                    texel[2] as f32 / 255.0 * tint.2,
                    texel[3] as f32 / 255.0 * tint.3,
                ];
                self.blend(x, y, src);
            }
        }
    }

    fn push_clip(&mut self, rect: Rect) {
        self.state.push_clip(rect);
    }

    fn pop_clip(&mut self) {
        self.state.pop_clip();
    }

    fn clip(&self) -> Option<Rect> {
        self.state.clip()
    }
}

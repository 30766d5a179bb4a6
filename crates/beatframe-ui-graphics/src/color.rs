/// Linear RGBA color with components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32, pub f32);

impl Color {
    pub const WHITE: Color = Color(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color(0.0, 0.0, 0.0, 0.0);
    pub const RED: Color = Color(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color(0.0, 0.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color(r, g, b, 1.0)
    }

    /// Builds a color from `0xRRGGBB` with full opacity.
    pub fn from_rgb_u32(rgb: u32) -> Self {
        let channel = |shift: u32| ((rgb >> shift) & 0xFF) as f32 / 255.0;
        Color(channel(16), channel(8), channel(0), 1.0)
    }

    pub fn r(&self) -> f32 {
        self.0
    }

    pub fn g(&self) -> f32 {
        self.1
    }

    pub fn b(&self) -> f32 {
        self.2
    }

    pub fn a(&self) -> f32 {
        self.3
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Color(self.0, self.1, self.2, alpha)
    }

    /// Scales the alpha channel, as used for apparent opacity.
    pub fn fade(self, opacity: f32) -> Self {
        Color(self.0, self.1, self.2, self.3 * opacity)
    }

    /// Component-wise product, used to combine a tint with the current surface color.
    pub fn multiply(self, other: Color) -> Self {
        Color(
            self.0 * other.0,
            self.1 * other.1,
            self.2 * other.2,
            self.3 * other.3,
        )
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let to_byte = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        [to_byte(self.0), to_byte(self.1), to_byte(self.2), to_byte(self.3)]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

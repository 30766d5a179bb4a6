use beatframe_core::{Observable, ReactiveError, Runtime};
use beatframe_render_common::{DrawingSurface, TextureRegion};
use beatframe_ui_graphics::{Anchor, Color, Point, Rect, Size};

use crate::element::UiElement;
use crate::skin::{absolute, Skin};

/// How an image is fitted into the content zone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageRenderingMode {
    /// Stretched over the whole content zone.
    Full,
    /// Scaled uniformly to fit inside the content zone.
    #[default]
    MaintainAspectRatio,
    /// Scaled uniformly to cover the content zone, overflowing one axis.
    Oversize,
}

/// Destination rectangle of `texture` drawn into `content`.
///
/// For the aspect-preserving modes the scaled image is placed inside
/// `content` according to `align`.
pub fn image_dest(content: Rect, texture: &TextureRegion, mode: ImageRenderingMode, align: Anchor) -> Rect {
    let (tw, th) = (texture.width(), texture.height());
    if mode == ImageRenderingMode::Full || tw <= 0.0 || th <= 0.0 {
        return content;
    }
    let scale_x = content.width / tw;
    let scale_y = content.height / th;
    let scale = match mode {
        ImageRenderingMode::Oversize => scale_x.max(scale_y),
        _ => scale_x.min(scale_y),
    };
    let size = Size::new(tw * scale, th * scale);
    let offset = align.place(content.size(), size, Point::ZERO);
    Rect::new(content.x + offset.x, content.y + offset.y, size.width, size.height)
}

/// Draws a texture region in its content zone.
#[derive(Clone)]
pub struct ImageNode {
    element: UiElement,
    texture: Observable<Option<TextureRegion>>,
    tint: Observable<Color>,
    mode: Observable<ImageRenderingMode>,
    rotation: Observable<f32>,
    rotation_point: Observable<Point>,
    align: Observable<Anchor>,
}

impl ImageNode {
    pub fn new(runtime: &Runtime, texture: Option<TextureRegion>, mode: ImageRenderingMode) -> Self {
        let node = Self {
            element: UiElement::named(runtime, "image"),
            texture: runtime.observable(texture),
            tint: runtime.observable(Color::WHITE),
            mode: runtime.observable(mode),
            rotation: runtime.observable(0.0),
            rotation_point: runtime.observable(Point::new(0.5, 0.5)),
            align: runtime.observable(Anchor::Center),
        };
        node.element.set_skin(ImageSkin {
            texture: node.texture.clone(),
            tint: node.tint.clone(),
            mode: node.mode.clone(),
            rotation: node.rotation.clone(),
            rotation_point: node.rotation_point.clone(),
            align: node.align.clone(),
        });
        node
    }

    pub fn element(&self) -> &UiElement {
        &self.element
    }

    pub fn texture(&self) -> &Observable<Option<TextureRegion>> {
        &self.texture
    }

    pub fn tint(&self) -> &Observable<Color> {
        &self.tint
    }

    pub fn rendering_mode(&self) -> &Observable<ImageRenderingMode> {
        &self.mode
    }

    /// Degrees counter-clockwise.
    pub fn rotation(&self) -> &Observable<f32> {
        &self.rotation
    }

    /// Rotation pivot as fractions of the drawn image size.
    pub fn rotation_point(&self) -> &Observable<Point> {
        &self.rotation_point
    }

    pub fn align(&self) -> &Observable<Anchor> {
        &self.align
    }
}

struct ImageSkin {
    texture: Observable<Option<TextureRegion>>,
    tint: Observable<Color>,
    mode: Observable<ImageRenderingMode>,
    rotation: Observable<f32>,
    rotation_point: Observable<Point>,
    align: Observable<Anchor>,
}

impl Skin for ImageSkin {
    fn render_self(
        &self,
        element: &UiElement,
        origin: Point,
        surface: &mut dyn DrawingSurface,
    ) -> Result<(), ReactiveError> {
        let Some(texture) = self.texture.get()? else {
            return Ok(());
        };
        let content = absolute(element.content_zone().get()?, origin);
        let dest = image_dest(content, &texture, self.mode.get()?, self.align.get()?);
        let fraction = self.rotation_point.get()?;
        let pivot = Point::new(fraction.x * dest.width, fraction.y * dest.height);
        let rotation = self.rotation.get()?;
        let color = self
            .tint
            .get()?
            .fade(element.apparent_opacity().get()?)
            .multiply(surface.color());

        surface.push_color(color);
        surface.draw_texture(&texture, dest, pivot, rotation);
        surface.pop_color();
        Ok(())
    }
}

use beatframe_core::{Observable, ReactiveError, Runtime};
use beatframe_render_common::DrawingSurface;
use beatframe_ui_graphics::{Color, Point};

use crate::element::UiElement;
use crate::skin::{absolute, Skin};

/// A solid rectangle covering the border zone of its element.
#[derive(Clone)]
pub struct RectElement {
    element: UiElement,
    color: Observable<Color>,
}

impl RectElement {
    pub fn new(runtime: &Runtime, color: Color) -> Self {
        let element = UiElement::named(runtime, "rect");
        let color = runtime.observable(color);
        element.set_skin(RectSkin {
            color: color.clone(),
        });
        Self { element, color }
    }

    pub fn element(&self) -> &UiElement {
        &self.element
    }

    pub fn color(&self) -> &Observable<Color> {
        &self.color
    }
}

struct RectSkin {
    color: Observable<Color>,
}

impl Skin for RectSkin {
    fn render_self(
        &self,
        element: &UiElement,
        origin: Point,
        surface: &mut dyn DrawingSurface,
    ) -> Result<(), ReactiveError> {
        let zone = absolute(element.border_zone().get()?, origin);
        let color = self
            .color
            .get()?
            .fade(element.apparent_opacity().get()?)
            .multiply(surface.color());
        surface.push_color(color);
        surface.fill_rect(zone);
        surface.pop_color();
        Ok(())
    }
}

//! Clickable button control.

use std::cell::RefCell;
use std::rc::Rc;

use beatframe_core::{Observable, ReactiveError, Runtime};
use beatframe_foundation::{InputEvent, PointerButton};
use beatframe_render_common::DrawingSurface;
use beatframe_ui_graphics::{Color, Point};

use crate::element::UiElement;
use crate::skin::{absolute, Skin};
use crate::UiError;

type Action = Rc<dyn Fn() -> Result<(), UiError>>;

/// Fill colors of the default button skin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonStyle {
    pub background: Color,
    pub hovered: Color,
    pub pressed: Color,
    pub disabled: Color,
    pub border_color: Color,
    pub border_thickness: f32,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            background: Color::from_rgb_u32(0xE0E0E0),
            hovered: Color::from_rgb_u32(0xF0F0F0),
            pressed: Color::from_rgb_u32(0xB8B8B8),
            disabled: Color::from_rgb_u32(0x8C8C8C),
            border_color: Color::from_rgb_u32(0x404040),
            border_thickness: 1.0,
        }
    }
}

/// A control that runs its action when the primary button is pressed and
/// released over it.
///
/// Pressing captures the pointer, so releasing elsewhere only clears the
/// pressed state.
#[derive(Clone)]
pub struct Button {
    element: UiElement,
    hovered: Observable<bool>,
    pressed: Observable<bool>,
    disabled: Observable<bool>,
    action: Rc<RefCell<Option<Action>>>,
}

impl Button {
    /// A button drawn with the default skin.
    pub fn new(runtime: &Runtime, style: ButtonStyle) -> Self {
        let button = Self::plain(runtime);
        button.element.set_skin(ButtonSkin {
            style,
            hovered: button.hovered.clone(),
            pressed: button.pressed.clone(),
            disabled: button.disabled.clone(),
        });
        button
    }

    /// A button without a skin, for controls that draw through children.
    pub fn plain(runtime: &Runtime) -> Self {
        let button = Self {
            element: UiElement::named(runtime, "button"),
            hovered: runtime.observable(false),
            pressed: runtime.observable(false),
            disabled: runtime.observable(false),
            action: Rc::new(RefCell::new(None)),
        };
        let (hovered, pressed, disabled) = (
            button.hovered.clone(),
            button.pressed.clone(),
            button.disabled.clone(),
        );
        let action = Rc::clone(&button.action);
        button.element.add_input_listener(move |element, event| match *event {
            InputEvent::MouseEntered { .. } => {
                hovered.set(true);
                Ok(false)
            }
            InputEvent::MouseExited { .. } => {
                hovered.set(false);
                Ok(false)
            }
            InputEvent::TouchDown {
                button: PointerButton::Primary,
                ..
            } => {
                if disabled.get()? {
                    return Ok(false);
                }
                pressed.set(true);
                Ok(true)
            }
            InputEvent::TouchUp {
                position,
                button: PointerButton::Primary,
            } => {
                if !pressed.get()? {
                    return Ok(false);
                }
                pressed.set(false);
                if !disabled.get()? && element.contains_absolute(position.x, position.y)? {
                    let current = action.borrow().clone();
                    if let Some(current) = current {
                        log::debug!("{} action", element.label());
                        current()?;
                    }
                }
                Ok(true)
            }
            InputEvent::TouchCancelled {
                button: PointerButton::Primary,
                ..
            } => {
                let was_pressed = pressed.get()?;
                pressed.set(false);
                Ok(was_pressed)
            }
            _ => Ok(false),
        });
        button
    }

    pub fn element(&self) -> &UiElement {
        &self.element
    }

    pub fn hovered(&self) -> &Observable<bool> {
        &self.hovered
    }

    pub fn pressed(&self) -> &Observable<bool> {
        &self.pressed
    }

    pub fn disabled(&self) -> &Observable<bool> {
        &self.disabled
    }

    /// Replaces the action run on click.
    pub fn set_on_action(&self, action: impl Fn() -> Result<(), UiError> + 'static) {
        *self.action.borrow_mut() = Some(Rc::new(action));
    }

    pub fn clear_on_action(&self) {
        self.action.borrow_mut().take();
    }

    /// Runs the action as if the button had been clicked.
    pub fn fire_action(&self) -> Result<(), UiError> {
        let current = self.action.borrow().clone();
        match current {
            Some(current) => current(),
            None => Ok(()),
        }
    }
}

struct ButtonSkin {
    style: ButtonStyle,
    hovered: Observable<bool>,
    pressed: Observable<bool>,
    disabled: Observable<bool>,
}

impl Skin for ButtonSkin {
    fn render_self(
        &self,
        element: &UiElement,
        origin: Point,
        surface: &mut dyn DrawingSurface,
    ) -> Result<(), ReactiveError> {
        let fill = if self.disabled.get()? {
            self.style.disabled
        } else if self.pressed.get()? {
            self.style.pressed
        } else if self.hovered.get()? {
            self.style.hovered
        } else {
            self.style.background
        };
        let zone = absolute(element.border_zone().get()?, origin);
        let opacity = element.apparent_opacity().get()?;
        let base = surface.color();

        surface.push_color(fill.fade(opacity).multiply(base));
        surface.fill_rect(zone);
        surface.pop_color();
        if self.style.border_thickness > 0.0 {
            surface.push_color(self.style.border_color.fade(opacity).multiply(base));
            surface.stroke_rect(zone, self.style.border_thickness);
            surface.pop_color();
        }
        Ok(())
    }
}

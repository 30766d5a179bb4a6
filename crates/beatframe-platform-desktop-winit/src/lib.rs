//! Translates winit window input into Beatframe input vocabulary.

use beatframe_foundation::{KeyCode, Modifiers, PointerButton};
use beatframe_ui_graphics::Point;
use winit::dpi::PhysicalPosition;
use winit::event::{ModifiersState, MouseButton, MouseScrollDelta, VirtualKeyCode};

/// Logical pixels scrolled per wheel line when the platform reports pixels.
const PIXELS_PER_LINE: f64 = 20.0;

pub struct DesktopWinitPlatform {
    scale_factor: f64,
}

impl DesktopWinitPlatform {
    pub fn new(scale_factor: f64) -> Self {
        Self { scale_factor }
    }

    pub fn set_scale_factor(&mut self, factor: f64) {
        self.scale_factor = factor;
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Converts a physical cursor position into logical screen coordinates.
    pub fn pointer_position(&self, position: PhysicalPosition<f64>) -> Point {
        Point {
            x: (position.x / self.scale_factor) as f32,
            y: (position.y / self.scale_factor) as f32,
        }
    }

    pub fn pointer_button(&self, button: MouseButton) -> Option<PointerButton> {
        match button {
            MouseButton::Left => Some(PointerButton::Primary),
            MouseButton::Right => Some(PointerButton::Secondary),
            MouseButton::Middle => Some(PointerButton::Middle),
            MouseButton::Other(8) => Some(PointerButton::Back),
            MouseButton::Other(9) => Some(PointerButton::Forward),
            MouseButton::Other(_) => None,
        }
    }

    /// Scroll amount in lines, positive `y` scrolling down.
    pub fn scroll_amount(&self, delta: MouseScrollDelta) -> (f32, f32) {
        match delta {
            MouseScrollDelta::LineDelta(x, y) => (-x, -y),
            MouseScrollDelta::PixelDelta(position) => {
                let lines = PIXELS_PER_LINE * self.scale_factor;
                ((-position.x / lines) as f32, (-position.y / lines) as f32)
            }
        }
    }

    pub fn modifiers(&self, state: ModifiersState) -> Modifiers {
        let mut modifiers = Modifiers::NONE;
        if state.shift() {
            modifiers = modifiers.union(Modifiers::SHIFT);
        }
        if state.ctrl() {
            modifiers = modifiers.union(Modifiers::CONTROL);
        }
        if state.alt() {
            modifiers = modifiers.union(Modifiers::ALT);
        }
        if state.logo() {
            modifiers = modifiers.union(Modifiers::SUPER);
        }
        modifiers
    }

    pub fn key_code(&self, key: VirtualKeyCode) -> KeyCode {
        use VirtualKeyCode as V;
        match key {
            V::Escape => KeyCode::Escape,
            V::Return | V::NumpadEnter => KeyCode::Enter,
            V::Tab => KeyCode::Tab,
            V::Back => KeyCode::Backspace,
            V::Delete => KeyCode::Delete,
            V::Space => KeyCode::Space,
            V::Left => KeyCode::Left,
            V::Right => KeyCode::Right,
            V::Up => KeyCode::Up,
            V::Down => KeyCode::Down,
            V::Home => KeyCode::Home,
            V::End => KeyCode::End,
            V::PageUp => KeyCode::PageUp,
            V::PageDown => KeyCode::PageDown,
            V::LShift | V::RShift => KeyCode::Shift,
            V::LControl | V::RControl => KeyCode::Control,
            V::LAlt | V::RAlt => KeyCode::Alt,
            V::LWin | V::RWin => KeyCode::Super,
            other => match function_number(other).or_else(|| character(other)) {
                Some(mapped) => mapped,
                None => KeyCode::Other(other as u32),
            },
        }
    }
}

impl Default for DesktopWinitPlatform {
    fn default() -> Self {
        Self::new(1.0)
    }
}

fn function_number(key: VirtualKeyCode) -> Option<KeyCode> {
    use VirtualKeyCode as V;
    const KEYS: [VirtualKeyCode; 12] = [
        V::F1,
        V::F2,
        V::F3,
        V::F4,
        V::F5,
        V::F6,
        V::F7,
        V::F8,
        V::F9,
        V::F10,
        V::F11,
        V::F12,
    ];
    KEYS.iter()
        .position(|candidate| *candidate == key)
        .map(|index| KeyCode::Function(index as u8 + 1))
}

fn character(key: VirtualKeyCode) -> Option<KeyCode> {
    use VirtualKeyCode as V;
    const LETTERS: [VirtualKeyCode; 26] = [
        V::A,
        V::B,
        V::C,
        V::D,
        V::E,
        V::F,
        V::G,
        V::H,
        V::I,
        V::J,
        V::K,
        V::L,
        V::M,
        V::N,
        V::O,
        V::P,
        V::Q,
        V::R,
        V::S,
        V::T,
        V::U,
        V::V,
        V::W,
        V::X,
        V::Y,
        V::Z,
    ];
    const DIGITS: [VirtualKeyCode; 10] = [
        V::Key0,
        V::Key1,
        V::Key2,
        V::Key3,
        V::Key4,
        V::Key5,
        V::Key6,
        V::Key7,
        V::Key8,
        V::Key9,
    ];
    if let Some(index) = LETTERS.iter().position(|candidate| *candidate == key) {
        return Some(KeyCode::Character((b'A' + index as u8) as char));
    }
    DIGITS
        .iter()
        .position(|candidate| *candidate == key)
        .map(|index| KeyCode::Character((b'0' + index as u8) as char))
}

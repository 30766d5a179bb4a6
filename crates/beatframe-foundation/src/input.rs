use beatframe_ui_graphics::Point;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary = 0,
    Secondary = 1,
    Middle = 2,
    Back = 3,
    Forward = 4,
}

impl PointerButton {
    pub const ALL: [PointerButton; 5] = [
        PointerButton::Primary,
        PointerButton::Secondary,
        PointerButton::Middle,
        PointerButton::Back,
        PointerButton::Forward,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerButtons(u8);

impl PointerButtons {
    pub const NONE: Self = Self(0);

    pub fn new() -> Self {
        Self::NONE
    }

    pub fn with(mut self, button: PointerButton) -> Self {
        self.insert(button);
        self
    }

    pub fn insert(&mut self, button: PointerButton) {
        self.0 |= 1 << (button as u8);
    }

    pub fn remove(&mut self, button: PointerButton) {
        self.0 &= !(1 << (button as u8));
    }

    pub fn contains(&self, button: PointerButton) -> bool {
        (self.0 & (1 << (button as u8))) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = PointerButton> + '_ {
        PointerButton::ALL
            .into_iter()
            .filter(move |button| self.contains(*button))
    }
}

impl Default for PointerButtons {
    fn default() -> Self {
        Self::NONE
    }
}

/// Keyboard modifier state at the time of a key event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1);
    pub const CONTROL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);
    pub const SUPER: Self = Self(1 << 3);

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn shift(self) -> bool {
        self.contains(Self::SHIFT)
    }

    pub fn control(self) -> bool {
        self.contains(Self::CONTROL)
    }

    pub fn alt(self) -> bool {
        self.contains(Self::ALT)
    }
}

/// Physical keys the scene graph distinguishes. Printable characters arrive
/// separately as [`InputEvent::KeyTyped`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Escape,
    Enter,
    Tab,
    Backspace,
    Delete,
    Space,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Shift,
    Control,
    Alt,
    Super,
    /// Function key `F1..=F12`.
    Function(u8),
    /// Letter or digit key, upper-case.
    Character(char),
    Other(u32),
}

/// An input event delivered to element listeners.
///
/// Pointer positions are in UI coordinates of the scene root.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    KeyDown {
        key: KeyCode,
        modifiers: Modifiers,
    },
    KeyUp {
        key: KeyCode,
        modifiers: Modifiers,
    },
    KeyTyped {
        character: char,
    },
    TouchDown {
        position: Point,
        button: PointerButton,
    },
    TouchUp {
        position: Point,
        button: PointerButton,
    },
    TouchDragged {
        position: Point,
        button: PointerButton,
    },
    /// A drag was aborted; the receiver must unwind any speculative state.
    TouchCancelled {
        position: Point,
        button: PointerButton,
    },
    MouseMoved {
        position: Point,
    },
    Scrolled {
        amount_x: f32,
        amount_y: f32,
    },
    MouseEntered {
        position: Point,
    },
    MouseExited {
        position: Point,
    },
}

impl InputEvent {
    /// UI-space pointer position, for pointer events.
    pub fn position(&self) -> Option<Point> {
        match *self {
            InputEvent::TouchDown { position, .. }
            | InputEvent::TouchUp { position, .. }
            | InputEvent::TouchDragged { position, .. }
            | InputEvent::TouchCancelled { position, .. }
            | InputEvent::MouseMoved { position }
            | InputEvent::MouseEntered { position }
            | InputEvent::MouseExited { position } => Some(position),
            InputEvent::KeyDown { .. }
            | InputEvent::KeyUp { .. }
            | InputEvent::KeyTyped { .. }
            | InputEvent::Scrolled { .. } => None,
        }
    }

    pub fn button(&self) -> Option<PointerButton> {
        match *self {
            InputEvent::TouchDown { button, .. }
            | InputEvent::TouchUp { button, .. }
            | InputEvent::TouchDragged { button, .. }
            | InputEvent::TouchCancelled { button, .. } => Some(button),
            _ => None,
        }
    }

    pub fn is_key_event(&self) -> bool {
        matches!(
            self,
            InputEvent::KeyDown { .. } | InputEvent::KeyUp { .. } | InputEvent::KeyTyped { .. }
        )
    }

    /// Enter and exit notifications are informational and cannot be consumed.
    pub fn is_hover_transition(&self) -> bool {
        matches!(
            self,
            InputEvent::MouseEntered { .. } | InputEvent::MouseExited { .. }
        )
    }
}

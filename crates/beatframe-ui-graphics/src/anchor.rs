use crate::geometry::{Point, Rect, Size};

/// Named reference points of a rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::CenterLeft,
        Anchor::Center,
        Anchor::CenterRight,
        Anchor::BottomLeft,
        Anchor::BottomCenter,
        Anchor::BottomRight,
    ];

    /// Horizontal and vertical position of the anchor as fractions of a
    /// rectangle's size, `(0, 0)` being the top-left corner.
    pub fn fractions(self) -> (f32, f32) {
        match self {
            Anchor::TopLeft => (0.0, 0.0),
            Anchor::TopCenter => (0.5, 0.0),
            Anchor::TopRight => (1.0, 0.0),
            Anchor::CenterLeft => (0.0, 0.5),
            Anchor::Center => (0.5, 0.5),
            Anchor::CenterRight => (1.0, 0.5),
            Anchor::BottomLeft => (0.0, 1.0),
            Anchor::BottomCenter => (0.5, 1.0),
            Anchor::BottomRight => (1.0, 1.0),
        }
    }

    /// Origin for a child of `size` whose matching anchor point sits on this
    /// anchor point of `container`, shifted by `offset`.
    ///
    /// The result is relative to the container's own origin, which is the
    /// coordinate space children are laid out in.
    pub fn place(self, container: Size, size: Size, offset: Point) -> Point {
        let (fx, fy) = self.fractions();
        Point::new(
            (container.width - size.width) * fx + offset.x,
            (container.height - size.height) * fy + offset.y,
        )
    }

    /// The anchor point itself, in the coordinate space of `rect`.
    pub fn point_in(self, rect: &Rect) -> Point {
        let (fx, fy) = self.fractions();
        Point::new(rect.x + rect.width * fx, rect.y + rect.height * fy)
    }
}

use beatframe_ui_graphics::{Point, Rect, Size};

/// Orthographic camera mapping screen coordinates (logical pixels, y down)
/// onto UI coordinates.
///
/// `position` is the UI-space point shown at the center of the viewport;
/// a `zoom` above one shows more of the UI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub viewport: Size,
    pub position: Point,
    pub zoom: f32,
}

impl Camera {
    /// A camera showing UI space `(0, 0)..viewport` one to one.
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            position: Point::new(viewport.width / 2.0, viewport.height / 2.0),
            zoom: 1.0,
        }
    }

    /// Resizes the viewport and recenters so that the top-left corner stays at
    /// the UI origin.
    pub fn fit_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.position = Point::new(
            viewport.width * self.zoom / 2.0,
            viewport.height * self.zoom / 2.0,
        );
    }

    /// The UI-space rectangle visible through the viewport.
    pub fn visible_area(&self) -> Rect {
        let width = self.viewport.width * self.zoom;
        let height = self.viewport.height * self.zoom;
        Rect::new(
            self.position.x - width / 2.0,
            self.position.y - height / 2.0,
            width,
            height,
        )
    }

    pub fn screen_to_ui(&self, screen: Point) -> Point {
        let area = self.visible_area();
        Point::new(area.x + screen.x * self.zoom, area.y + screen.y * self.zoom)
    }

    pub fn ui_to_screen(&self, ui: Point) -> Point {
        let area = self.visible_area();
        if self.zoom == 0.0 {
            return Point::ZERO;
        }
        Point::new((ui.x - area.x) / self.zoom, (ui.y - area.y) / self.zoom)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera::new(Size::new(800.0, 600.0))
    }
}

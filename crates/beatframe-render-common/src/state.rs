use beatframe_ui_graphics::{Color, Rect};

/// Color and clip stacks shared by surface implementations.
#[derive(Clone, Debug)]
pub struct SurfaceState {
    color: Color,
    colors: Vec<Color>,
    clips: Vec<Rect>,
}

impl SurfaceState {
    pub fn new() -> Self {
        Self {
            color: Color::WHITE,
            colors: Vec::new(),
            clips: Vec::new(),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn push_color(&mut self, color: Color) {
        self.colors.push(self.color);
        self.color = color;
    }

    pub fn pop_color(&mut self) {
        match self.colors.pop() {
            Some(previous) => self.color = previous,
            None => log::warn!("pop_color without matching push_color"),
        }
    }

    pub fn push_clip(&mut self, rect: Rect) {
        let clip = match self.clips.last() {
            Some(current) => current
                .intersect(&rect)
                .unwrap_or(Rect::new(rect.x, rect.y, 0.0, 0.0)),
            None => rect,
        };
        self.clips.push(clip);
    }

    pub fn pop_clip(&mut self) {
        if self.clips.pop().is_none() {
            log::warn!("pop_clip without matching push_clip");
        }
    }

    pub fn clip(&self) -> Option<Rect> {
        self.clips.last().copied()
    }

    /// Clips `rect` against the active clip. `None` if nothing is visible.
    pub fn visible_part(&self, rect: Rect) -> Option<Rect> {
        match self.clip() {
            Some(clip) => clip.intersect(&rect),
            None if rect.width > 0.0 && rect.height > 0.0 => Some(rect),
            None => None,
        }
    }

    pub fn color_depth(&self) -> usize {
        self.colors.len()
    }

    pub fn clip_depth(&self) -> usize {
        self.clips.len()
    }

    /// Drops all saved state, for reuse at the start of a frame.
    pub fn reset(&mut self) {
        self.color = Color::WHITE;
        self.colors.clear();
        self.clips.clear();
    }
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self::new()
    }
}

use beatframe_ui_graphics::{Color, Point, Rect};

use crate::{DrawingSurface, SurfaceState, TextureRegion};

/// A draw call captured by [`RecordingSurface`], with the color and clip
/// that were active when it was issued.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
        clip: Option<Rect>,
    },
    Texture {
        texture: TextureRegion,
        dest: Rect,
        pivot: Point,
        rotation: f32,
        color: Color,
        clip: Option<Rect>,
    },
}

impl DrawCommand {
    pub fn color(&self) -> Color {
        match self {
            DrawCommand::FillRect { color, .. } | DrawCommand::Texture { color, .. } => *color,
        }
    }

    pub fn rect(&self) -> Rect {
        match self {
            DrawCommand::FillRect { rect, .. } => *rect,
            DrawCommand::Texture { dest, .. } => *dest,
        }
    }
}

/// Headless surface that records every draw call.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    state: SurfaceState,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn state(&self) -> &SurfaceState {
        &self.state
    }

    /// Clears recorded commands and saved state.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.state.reset();
    }
}

impl DrawingSurface for RecordingSurface {
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
        self.commands.push(DrawCommand::FillRect {
            rect,
            color: self.state.color(),
            clip: self.state.clip(),
        });
    }

    fn draw_texture(&mut self, texture: &TextureRegion, dest: Rect, pivot: Point, rotation: f32) {
        self.commands.push(DrawCommand::Texture {
            texture: *texture,
            dest,
            pivot,
            rotation,
            color: self.state.color(),
            clip: self.state.clip(),
        });
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

use std::time::Duration;

use beatframe_core::{Clock, Runtime};
use beatframe_foundation::{KeyCode, Modifiers, PointerButton};
use beatframe_render_common::DrawingSurface;
use beatframe_runtime_std::{StdClock, StdRuntime};
use beatframe_ui::{log_scene, SceneConfig, SceneRoot, UiError};
use beatframe_ui_graphics::Size;

/// Drives one [`SceneRoot`] on behalf of a windowing host.
///
/// Every entry point logs and swallows scene errors so a single failing
/// listener or binding never tears down the event loop.
pub struct AppShell<C: Clock = StdClock> {
    runtime: Runtime,
    clock: C,
    started: C::Instant,
    scene: SceneRoot,
    cursor: (f32, f32),
    pressed: Vec<PointerButton>,
    modifiers: Modifiers,
    viewport: (f32, f32),
    buffer_size: (u32, u32),
    dirty: bool,
}

impl AppShell<StdClock> {
    pub fn new(width: f32, height: f32, config: SceneConfig) -> Self {
        let std_runtime = StdRuntime::new();
        Self::with_clock(
            std_runtime.runtime(),
            std_runtime.clock().clone(),
            width,
            height,
            config,
        )
    }
}

impl<C: Clock> AppShell<C> {
    pub fn with_clock(
        runtime: Runtime,
        clock: C,
        width: f32,
        height: f32,
        config: SceneConfig,
    ) -> Self {
        let scene = SceneRoot::with_config(&runtime, width, height, config);
        let started = clock.now();
        Self {
            runtime,
            clock,
            started,
            scene,
            cursor: (0.0, 0.0),
            pressed: Vec::new(),
            modifiers: Modifiers::NONE,
            viewport: (width, height),
            buffer_size: (width.max(0.0) as u32, height.max(0.0) as u32),
            dirty: true,
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn scene(&self) -> &SceneRoot {
        &self.scene
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Resizes the logical viewport. The camera is refit so the UI origin
    /// stays in the top-left corner and the scene covers the visible area.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
        let mut camera = self.scene.camera();
        camera.fit_viewport(Size::new(width, height));
        self.scene.set_camera(camera);
        let result = self.scene.resize_to_camera();
        self.report("resize", result);
        self.dirty = true;
    }

    pub fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    pub fn set_buffer_size(&mut self, width: u32, height: u32) {
        self.buffer_size = (width, height);
        self.dirty = true;
    }

    pub fn buffer_size(&self) -> (u32, u32) {
        self.buffer_size
    }

    /// Time since the shell was created, sampled once per frame.
    pub fn frame_time(&self) -> Duration {
        Duration::from_millis(self.clock.elapsed_millis(self.started))
    }

    /// Marks the next frame as needing a redraw, for state changed outside
    /// of the shell's input methods.
    pub fn request_render(&mut self) {
        self.dirty = true;
    }

    pub fn should_render(&self) -> bool {
        self.dirty || self.scene.has_pending_tooltip()
    }

    pub fn update(&mut self) {
        let had_tooltip = self.scene.active_tooltip().is_some();
        let now = self.frame_time();
        let result = self.scene.update(now);
        self.report("frame update", result);
        if had_tooltip != self.scene.active_tooltip().is_some() {
            self.dirty = true;
        }
    }

    pub fn render(&mut self, surface: &mut dyn DrawingSurface) {
        let result = self.scene.render(surface);
        self.report("render", result);
        self.dirty = false;
    }

    pub fn cursor(&self) -> (f32, f32) {
        self.cursor
    }

    /// Moves the pointer. While a button is held the move is routed as a
    /// drag to the elements that accepted the press.
    ///
    /// Like every input method, returns whether the scene consumed the event;
    /// failures are logged and count as not consumed.
    pub fn pointer_moved(&mut self, x: f32, y: f32) -> bool {
        self.cursor = (x, y);
        let result = if self.pressed.is_empty() {
            self.scene.mouse_moved(x, y)
        } else {
            self.scene.touch_dragged(x, y)
        };
        self.dirty = true;
        self.report("pointer move", result).unwrap_or(false)
    }

    pub fn pointer_pressed(&mut self, button: PointerButton) -> bool {
        if !self.pressed.contains(&button) {
            self.pressed.push(button);
        }
        let (x, y) = self.cursor;
        let result = self.scene.touch_down(x, y, button);
        self.dirty = true;
        self.report("pointer press", result).unwrap_or(false)
    }

    pub fn pointer_released(&mut self, button: PointerButton) -> bool {
        self.pressed.retain(|held| *held != button);
        let (x, y) = self.cursor;
        let result = self.scene.touch_up(x, y, button);
        self.dirty = true;
        self.report("pointer release", result).unwrap_or(false)
    }

    /// The pointer left the window: every held button's drag is cancelled.
    pub fn pointer_left(&mut self) {
        for button in std::mem::take(&mut self.pressed) {
            let result = self.scene.cancel_drag(button);
            self.report("drag cancel", result);
        }
        self.scene.cancel_tooltip();
        self.dirty = true;
    }

    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn key_pressed(&mut self, key: KeyCode) -> bool {
        let result = self.scene.key_down(key, self.modifiers);
        self.dirty = true;
        self.report("key press", result).unwrap_or(false)
    }

    pub fn key_released(&mut self, key: KeyCode) -> bool {
        let result = self.scene.key_up(key, self.modifiers);
        self.dirty = true;
        self.report("key release", result).unwrap_or(false)
    }

    pub fn character_typed(&mut self, character: char) -> bool {
        let result = self.scene.key_typed(character);
        self.dirty = true;
        self.report("key typed", result).unwrap_or(false)
    }

    pub fn scrolled(&mut self, amount_x: f32, amount_y: f32) -> bool {
        let result = self.scene.scrolled(amount_x, amount_y);
        self.dirty = true;
        self.report("scroll", result).unwrap_or(false)
    }

    pub fn log_debug_info(&self) {
        log::info!(
            "viewport {:.0}x{:.0}, buffer {}x{}, frame time {:?}",
            self.viewport.0,
            self.viewport.1,
            self.buffer_size.0,
            self.buffer_size.1,
            self.frame_time()
        );
        log_scene(&self.scene);
    }

    fn report<T>(&self, what: &str, result: Result<T, UiError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                log::error!("{what} failed: {err}");
                None
            }
        }
    }
}

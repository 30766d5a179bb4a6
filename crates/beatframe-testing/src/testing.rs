use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use beatframe_core::{Clock, Runtime};
use beatframe_foundation::{KeyCode, Modifiers, PointerButton};
use beatframe_render_common::{DrawCommand, RecordingSurface};
use beatframe_ui::{hit_test, LayerKind, SceneConfig, SceneRoot, UiElement, UiError};
use beatframe_ui_graphics::Point;

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle while the code
/// under test owns another.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_millis(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }

    pub fn current(&self) -> Duration {
        self.now.get()
    }
}

impl Clock for ManualClock {
    type Instant = Duration;

    fn now(&self) -> Self::Instant {
        self.now.get()
    }

    fn elapsed_millis(&self, since: Self::Instant) -> u64 {
        self.now.get().saturating_sub(since).as_millis() as u64
    }
}

/// A scene with a manual clock and a recording surface, driven through the
/// same entry points a host uses.
pub struct SceneHarness {
    runtime: Runtime,
    scene: SceneRoot,
    clock: ManualClock,
    surface: RecordingSurface,
}

impl SceneHarness {
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_config(width, height, SceneConfig::default())
    }

    pub fn with_config(width: f32, height: f32, config: SceneConfig) -> Self {
        let runtime = Runtime::new();
        let scene = SceneRoot::with_config(&runtime, width, height, config);
        Self {
            runtime,
            scene,
            clock: ManualClock::new(),
            surface: RecordingSurface::new(),
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn scene(&self) -> &SceneRoot {
        &self.scene
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    pub fn root(&self) -> &UiElement {
        self.scene.main_root()
    }

    /// Creates an element at `(x, y)` of the given size under the main root.
    pub fn add_element(
        &self,
        name: &str,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<UiElement, UiError> {
        let element = UiElement::named(&self.runtime, name);
        let bounds = element.bounds();
        bounds.x.set(x);
        bounds.y.set(y);
        bounds.width.set(width);
        bounds.height.set(height);
        self.root().add_child(&element)?;
        Ok(element)
    }

    /// Runs a frame update at the clock's current time.
    pub fn update(&self) -> Result<(), UiError> {
        self.scene.update(self.clock.current())
    }

    /// Advances the clock and runs a frame update.
    pub fn advance_frame(&self, millis: u64) -> Result<(), UiError> {
        self.clock.advance_millis(millis);
        self.update()
    }

    pub fn move_to(&self, x: f32, y: f32) -> Result<bool, UiError> {
        self.scene.mouse_moved(x, y)
    }

    pub fn press(&self, x: f32, y: f32) -> Result<bool, UiError> {
        self.scene.touch_down(x, y, PointerButton::Primary)
    }

    pub fn release(&self, x: f32, y: f32) -> Result<bool, UiError> {
        self.scene.touch_up(x, y, PointerButton::Primary)
    }

    /// Moves to, presses and releases the primary button at one point.
    pub fn click(&self, x: f32, y: f32) -> Result<bool, UiError> {
        self.move_to(x, y)?;
        let pressed = self.press(x, y)?;
        let released = self.release(x, y)?;
        Ok(pressed || released)
    }

    pub fn right_click(&self, x: f32, y: f32) -> Result<bool, UiError> {
        self.move_to(x, y)?;
        let pressed = self.scene.touch_down(x, y, PointerButton::Secondary)?;
        let released = self.scene.touch_up(x, y, PointerButton::Secondary)?;
        Ok(pressed || released)
    }

    pub fn drag(&self, from: Point, to: Point) -> Result<(), UiError> {
        self.move_to(from.x, from.y)?;
        self.press(from.x, from.y)?;
        self.scene.touch_dragged(to.x, to.y)?;
        self.release(to.x, to.y)?;
        Ok(())
    }

    pub fn press_key(&self, key: KeyCode) -> Result<bool, UiError> {
        let down = self.scene.key_down(key, Modifiers::NONE)?;
        let up = self.scene.key_up(key, Modifiers::NONE)?;
        Ok(down || up)
    }

    /// Deepest element of the main layer under `(x, y)`.
    pub fn element_at(&self, x: f32, y: f32) -> Result<Option<UiElement>, UiError> {
        Ok(hit_test(self.scene.layer(LayerKind::Main).root(), Point::new(x, y))?)
    }

    /// Renders a fresh frame and returns its draw calls.
    pub fn render(&mut self) -> Result<&[DrawCommand], UiError> {
        self.surface.clear();
        self.scene.render(&mut self.surface)?;
        Ok(self.surface.commands())
    }

    pub fn surface(&self) -> &RecordingSurface {
        &self.surface
    }
}

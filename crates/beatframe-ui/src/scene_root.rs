//! The scene root: a fixed stack of layers sharing one coordinate space.
//!
//! Layers render bottom to top and receive input top to bottom. The dialog
//! layer is exclusive: while it holds content, nothing below it sees pointer
//! or key input. A touch on the context-menu layer that no menu content
//! consumes dismisses the menu. The tooltip layer never takes input.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use beatframe_core::{ListenerId, Observable, ReadOnly, Runtime};
use beatframe_foundation::{InputEvent, KeyCode, Modifiers, PointerButton};
use beatframe_render_common::DrawingSurface;
use beatframe_ui_graphics::{Point, Rect, Size};
use indexmap::IndexMap;

use crate::camera::Camera;
use crate::element::{Bounds, UiElement};
use crate::input::{deliver_hover_change, diff_paths, dispatch_along, hit_path};
use crate::render::{render_outlines, render_tree};
use crate::UiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Main,
    Dialog,
    ContextMenu,
    Tooltip,
}

impl LayerKind {
    /// Render order, bottom first.
    pub const ALL: [LayerKind; 4] = [
        LayerKind::Main,
        LayerKind::Dialog,
        LayerKind::ContextMenu,
        LayerKind::Tooltip,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LayerKind::Main => "main",
            LayerKind::Dialog => "dialog",
            LayerKind::ContextMenu => "context-menu",
            LayerKind::Tooltip => "tooltip",
        }
    }
}

/// Debug outline drawing after each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutlineMode {
    #[default]
    None,
    All,
    OnlyVisible,
}

/// Scene behavior options.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    /// How long the pointer must rest on an element before its tooltip shows.
    pub tooltip_delay: Duration,
    pub outline_mode: OutlineMode,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            tooltip_delay: Duration::from_millis(1000),
            outline_mode: OutlineMode::None,
        }
    }
}

impl SceneConfig {
    pub fn with_tooltip_delay(mut self, delay: Duration) -> Self {
        self.tooltip_delay = delay;
        self
    }

    pub fn with_outline_mode(mut self, mode: OutlineMode) -> Self {
        self.outline_mode = mode;
        self
    }
}

/// One independently rooted element tree of the scene.
pub struct Layer {
    kind: LayerKind,
    root: UiElement,
    tooltips_enabled: bool,
    exclusive: bool,
    accepts_input: bool,
    hover_path: RefCell<Vec<UiElement>>,
}

impl Layer {
    fn new(kind: LayerKind, runtime: &Runtime, area: &Bounds) -> Self {
        let root = UiElement::named(runtime, format!("layer:{}", kind.name()));
        let bounds = root.bounds();
        for (target, source) in [
            (&bounds.x, &area.x),
            (&bounds.y, &area.y),
            (&bounds.width, &area.width),
            (&bounds.height, &area.height),
        ] {
            let source = source.clone();
            target.bind(move |scope| scope.read(&source));
        }
        let (tooltips_enabled, exclusive, accepts_input) = match kind {
            LayerKind::Main | LayerKind::ContextMenu => (true, false, true),
            LayerKind::Dialog => (true, true, true),
            LayerKind::Tooltip => (false, false, false),
        };
        Self {
            kind,
            root,
            tooltips_enabled,
            exclusive,
            accepts_input,
            hover_path: RefCell::new(Vec::new()),
        }
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn root(&self) -> &UiElement {
        &self.root
    }

    pub fn tooltips_enabled(&self) -> bool {
        self.tooltips_enabled
    }

    pub fn is_exclusive(&self) -> bool {
        self.exclusive
    }

    /// Exclusive and holding content: lower layers get no input.
    pub fn is_blocking(&self) -> bool {
        self.exclusive && self.root.child_count() > 0
    }

    /// The path hit by the last hover update, root first.
    pub fn hover_path(&self) -> Vec<UiElement> {
        self.hover_path.borrow().clone()
    }

    fn reset_hover_path(&self) {
        self.hover_path.borrow_mut().clear();
    }
}

struct PendingTooltip {
    owner: UiElement,
    deadline: Duration,
}

struct ActiveTooltip {
    owner: UiElement,
    tooltip: Option<UiElement>,
    listener: ListenerId,
}

struct DragCapture {
    button: PointerButton,
    layer: LayerKind,
    path: Vec<UiElement>,
}

struct SceneInner {
    runtime: Runtime,
    config: RefCell<SceneConfig>,
    area: Bounds,
    camera: Cell<Camera>,
    layers: IndexMap<LayerKind, Layer>,
    mouse_position: Observable<Point>,
    frame_update_trigger: Observable<bool>,
    now: Cell<Duration>,
    pending_tooltip: RefCell<Option<PendingTooltip>>,
    active_tooltip: RefCell<Option<ActiveTooltip>>,
    current_element_with_tooltip: Observable<Option<UiElement>>,
    root_dialog: RefCell<Option<UiElement>>,
    root_context_menu: RefCell<Option<UiElement>>,
    drags: RefCell<Vec<DragCapture>>,
}

/// Owner of the layers, the pointer state and the active dialog, context
/// menu and tooltip. Cloning yields another handle to the same scene.
#[derive(Clone)]
pub struct SceneRoot {
    inner: Rc<SceneInner>,
}

/// Non-owning scene handle for listeners that need to call back into the scene.
#[derive(Clone)]
pub struct WeakSceneRoot(Weak<SceneInner>);

impl WeakSceneRoot {
    pub fn upgrade(&self) -> Option<SceneRoot> {
        self.0.upgrade().map(|inner| SceneRoot { inner })
    }
}

impl SceneRoot {
    pub fn new(runtime: &Runtime, width: f32, height: f32) -> Self {
        Self::with_config(runtime, width, height, SceneConfig::default())
    }

    pub fn with_config(runtime: &Runtime, width: f32, height: f32, config: SceneConfig) -> Self {
        let area = Bounds::new(runtime);
        area.width.set(width);
        area.height.set(height);
        let layers = LayerKind::ALL
            .into_iter()
            .map(|kind| (kind, Layer::new(kind, runtime, &area)))
            .collect();
        Self {
            inner: Rc::new(SceneInner {
                runtime: runtime.clone(),
                config: RefCell::new(config),
                area,
                camera: Cell::new(Camera::new(Size::new(width, height))),
                layers,
                mouse_position: runtime.observable(Point::ZERO),
                frame_update_trigger: runtime.observable(false),
                now: Cell::new(Duration::ZERO),
                pending_tooltip: RefCell::new(None),
                active_tooltip: RefCell::new(None),
                current_element_with_tooltip: runtime.observable(None),
                root_dialog: RefCell::new(None),
                root_context_menu: RefCell::new(None),
                drags: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn downgrade(&self) -> WeakSceneRoot {
        WeakSceneRoot(Rc::downgrade(&self.inner))
    }

    pub fn runtime(&self) -> &Runtime {
        &self.inner.runtime
    }

    pub fn config(&self) -> SceneConfig {
        self.inner.config.borrow().clone()
    }

    pub fn set_config(&self, config: SceneConfig) {
        *self.inner.config.borrow_mut() = config;
    }

    pub fn layer(&self, kind: LayerKind) -> &Layer {
        &self.inner.layers[&kind]
    }

    /// Layers in render order, bottom first.
    pub fn layers(&self) -> impl DoubleEndedIterator<Item = &Layer> {
        self.inner.layers.values()
    }

    /// Root of the main layer, where application content goes.
    pub fn main_root(&self) -> &UiElement {
        self.layer(LayerKind::Main).root()
    }

    /// Position and size of the scene in UI coordinates.
    pub fn bounds(&self) -> &Bounds {
        &self.inner.area
    }

    pub fn width(&self) -> &Observable<f32> {
        &self.inner.area.width
    }

    pub fn height(&self) -> &Observable<f32> {
        &self.inner.area.height
    }

    pub fn camera(&self) -> Camera {
        self.inner.camera.get()
    }

    pub fn set_camera(&self, camera: Camera) {
        self.inner.camera.set(camera);
    }

    /// Last pointer position, in UI coordinates.
    pub fn mouse_position(&self) -> ReadOnly<Point> {
        self.inner.mouse_position.read_only()
    }

    /// Flips at the start of every [`SceneRoot::update`]; bindings that read it
    /// recompute once per frame.
    pub fn frame_update_trigger(&self) -> ReadOnly<bool> {
        self.inner.frame_update_trigger.read_only()
    }

    /// Owner of the tooltip currently on screen.
    pub fn current_element_with_tooltip(&self) -> ReadOnly<Option<UiElement>> {
        self.inner.current_element_with_tooltip.read_only()
    }

    /// The tooltip element currently on screen.
    pub fn active_tooltip(&self) -> Option<UiElement> {
        self.inner
            .active_tooltip
            .borrow()
            .as_ref()
            .and_then(|active| active.tooltip.clone())
    }

    pub fn has_pending_tooltip(&self) -> bool {
        self.inner.pending_tooltip.borrow().is_some()
    }

    pub fn root_dialog(&self) -> Option<UiElement> {
        self.inner.root_dialog.borrow().clone()
    }

    pub fn root_context_menu(&self) -> Option<UiElement> {
        self.inner.root_context_menu.borrow().clone()
    }

    pub fn is_dragging(&self, button: PointerButton) -> bool {
        self.inner
            .drags
            .borrow()
            .iter()
            .any(|capture| capture.button == button)
    }

    /// Converts a screen position through the camera.
    pub fn screen_to_ui(&self, x: f32, y: f32) -> Point {
        self.camera().screen_to_ui(Point::new(x, y))
    }

    /// Sets the logical size of every layer and hides the context menu.
    pub fn resize(&self, width: f32, height: f32) -> Result<(), UiError> {
        self.inner.area.width.set(width);
        self.inner.area.height.set(height);
        self.hide_root_context_menu();
        log::debug!("scene resized to {width}x{height}");
        Ok(())
    }

    /// Sizes and positions the scene to the camera's visible area.
    pub fn resize_to_camera(&self) -> Result<(), UiError> {
        let area = self.camera().visible_area();
        self.inner.area.x.set(area.x);
        self.inner.area.y.set(area.y);
        self.resize(area.width, area.height)
    }

    /// Advances frame state to `now`, the time since the host started.
    ///
    /// Shows a pending tooltip whose delay has elapsed and keeps the visible
    /// tooltip next to the pointer.
    pub fn update(&self, now: Duration) -> Result<(), UiError> {
        self.inner.frame_update_trigger.invert()?;
        self.inner.now.set(now);

        let due = matches!(
            self.inner.pending_tooltip.borrow().as_ref(),
            Some(pending) if now >= pending.deadline
        );
        if due {
            if let Some(pending) = self.inner.pending_tooltip.borrow_mut().take() {
                self.show_tooltip(pending.owner)?;
            }
        }
        self.position_tooltip()
    }

    /// Renders every layer bottom to top, then debug outlines if enabled.
    pub fn render(&self, surface: &mut dyn DrawingSurface) -> Result<(), UiError> {
        for layer in self.layers() {
            render_tree(layer.root(), surface)?;
        }
        let mode = self.inner.config.borrow().outline_mode;
        if mode != OutlineMode::None {
            let dialog_shown = self.inner.root_dialog.borrow().is_some();
            for layer in self.layers() {
                if layer.kind() == LayerKind::Main && dialog_shown {
                    continue;
                }
                render_outlines(layer.root(), surface, mode == OutlineMode::OnlyVisible)?;
            }
        }
        Ok(())
    }

    fn set_mouse(&self, x: f32, y: f32) -> Point {
        let point = self.screen_to_ui(x, y);
        self.inner.mouse_position.set(point);
        point
    }

    pub fn mouse_moved(&self, x: f32, y: f32) -> Result<bool, UiError> {
        let position = self.set_mouse(x, y);
        self.refresh_hover(position)?;
        self.dispatch_hovered(&InputEvent::MouseMoved { position })
    }

    pub fn touch_down(&self, x: f32, y: f32, button: PointerButton) -> Result<bool, UiError> {
        let position = self.set_mouse(x, y);
        if button == PointerButton::Secondary && self.is_dragging(PointerButton::Primary) {
            self.cancel_drag(PointerButton::Primary)?;
        }
        self.refresh_hover(position)?;

        // The topmost layer that hits content, or blocks, takes the press and
        // captures the drag whether or not a listener consumed it.
        let event = InputEvent::TouchDown { position, button };
        for layer in self.input_layers() {
            let path = hit_path(layer.root(), position)?;
            let consumed = dispatch_along(&path, layer.root(), &event)?;
            if !consumed
                && layer.kind() == LayerKind::ContextMenu
                && self.hide_root_context_menu().is_some()
            {
                return Ok(true);
            }
            if consumed || path.len() > 1 || layer.is_blocking() {
                self.capture_drag(button, layer.kind(), path);
                return Ok(consumed || layer.is_blocking());
            }
        }
        Ok(false)
    }

    pub fn touch_dragged(&self, x: f32, y: f32) -> Result<bool, UiError> {
        let position = self.set_mouse(x, y);
        self.refresh_hover(position)?;

        let captures: Vec<(PointerButton, LayerKind, Vec<UiElement>)> = self
            .inner
            .drags
            .borrow()
            .iter()
            .map(|capture| (capture.button, capture.layer, capture.path.clone()))
            .collect();
        let mut consumed = false;
        for (button, layer, path) in captures {
            let event = InputEvent::TouchDragged { position, button };
            consumed |= dispatch_along(&path, self.layer(layer).root(), &event)?;
        }
        Ok(consumed)
    }

    pub fn touch_up(&self, x: f32, y: f32, button: PointerButton) -> Result<bool, UiError> {
        let position = self.set_mouse(x, y);
        self.refresh_hover(position)?;

        let event = InputEvent::TouchUp { position, button };
        if let Some(capture) = self.take_drag(button) {
            return dispatch_along(&capture.path, self.layer(capture.layer).root(), &event);
        }
        for layer in self.input_layers() {
            let path = hit_path(layer.root(), position)?;
            if dispatch_along(&path, layer.root(), &event)? || layer.is_blocking() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Aborts the drag held by `button`, sending `TouchCancelled` to the
    /// captured path. Returns whether a drag was active.
    pub fn cancel_drag(&self, button: PointerButton) -> Result<bool, UiError> {
        let Some(capture) = self.take_drag(button) else {
            return Ok(false);
        };
        let position = self.inner.mouse_position.get()?;
        log::debug!("cancelling {button:?} drag");
        let event = InputEvent::TouchCancelled { position, button };
        dispatch_along(&capture.path, self.layer(capture.layer).root(), &event)?;
        Ok(true)
    }

    pub fn key_down(&self, key: KeyCode, modifiers: Modifiers) -> Result<bool, UiError> {
        self.dispatch_hovered(&InputEvent::KeyDown { key, modifiers })
    }

    pub fn key_up(&self, key: KeyCode, modifiers: Modifiers) -> Result<bool, UiError> {
        self.dispatch_hovered(&InputEvent::KeyUp { key, modifiers })
    }

    pub fn key_typed(&self, character: char) -> Result<bool, UiError> {
        self.dispatch_hovered(&InputEvent::KeyTyped { character })
    }

    pub fn scrolled(&self, amount_x: f32, amount_y: f32) -> Result<bool, UiError> {
        self.dispatch_hovered(&InputEvent::Scrolled { amount_x, amount_y })
    }

    /// Layers that take input, top first.
    fn input_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers().rev().filter(|layer| layer.accepts_input)
    }

    /// Routes `event` along each layer's last hover path, top layer first.
    fn dispatch_hovered(&self, event: &InputEvent) -> Result<bool, UiError> {
        for layer in self.input_layers() {
            let path = layer.hover_path();
            if dispatch_along(&path, layer.root(), event)? || layer.is_blocking() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Recomputes every layer's hover path and fires enter/exit events.
    ///
    /// The topmost layer that hits content, or blocks, claims the pointer;
    /// lower layers get an empty path.
    fn refresh_hover(&self, position: Point) -> Result<(), UiError> {
        let mut claimed = false;
        let mut tooltip_candidate: Option<Option<UiElement>> = None;
        for layer in self.input_layers() {
            let path = if claimed {
                Vec::new()
            } else {
                hit_path(layer.root(), position)?
            };
            let claims = !claimed && (path.len() > 1 || layer.is_blocking());
            if claims && tooltip_candidate.is_none() {
                let candidate = if layer.tooltips_enabled() {
                    deepest_with_tooltip(&path)?
                } else {
                    None
                };
                tooltip_candidate = Some(candidate);
            }

            let previous = layer.hover_path.replace(path.clone());
            let change = diff_paths(&previous, &path);
            deliver_hover_change(&change, position)?;
            claimed |= claims;
        }
        self.retarget_tooltip(tooltip_candidate.flatten());
        Ok(())
    }

    fn retarget_tooltip(&self, candidate: Option<UiElement>) {
        if let Some(candidate) = &candidate {
            let active = self
                .inner
                .active_tooltip
                .borrow()
                .as_ref()
                .is_some_and(|active| active.owner.ptr_eq(candidate));
            let pending = self
                .inner
                .pending_tooltip
                .borrow()
                .as_ref()
                .is_some_and(|pending| pending.owner.ptr_eq(candidate));
            if active || pending {
                return;
            }
        }
        self.cancel_tooltip();
        if let Some(owner) = candidate {
            let deadline = self.inner.now.get() + self.inner.config.borrow().tooltip_delay;
            log::debug!("tooltip pending for {} until {deadline:?}", owner.label());
            *self.inner.pending_tooltip.borrow_mut() = Some(PendingTooltip { owner, deadline });
        }
    }

    /// Hides the visible tooltip and drops any pending one.
    pub fn cancel_tooltip(&self) {
        if self.inner.pending_tooltip.borrow_mut().take().is_some() {
            log::debug!("pending tooltip cancelled");
        }
        let active = self.inner.active_tooltip.borrow_mut().take();
        if let Some(active) = active {
            active.owner.tooltip_element().remove_listener(active.listener);
            if let Some(tooltip) = &active.tooltip {
                self.layer(LayerKind::Tooltip).root().remove_child(tooltip);
            }
            self.inner.current_element_with_tooltip.set(None);
            log::debug!("tooltip of {} hidden", active.owner.label());
        }
    }

    fn show_tooltip(&self, owner: UiElement) -> Result<(), UiError> {
        let attached = self
            .layers()
            .any(|layer| owner.is_in_subtree_of(layer.root()));
        if !attached {
            return Ok(());
        }
        let Some(tooltip) = owner.tooltip_element().get()? else {
            return Ok(());
        };

        // The owner may swap its tooltip while it is visible.
        let weak = self.downgrade();
        let listener = owner.tooltip_element().add_listener(move |tooltip_element| {
            let Some(scene) = weak.upgrade() else {
                return;
            };
            let result = tooltip_element
                .get()
                .map_err(UiError::from)
                .and_then(|tooltip| scene.replace_tooltip(tooltip));
            if let Err(err) = result {
                log::error!("tooltip replacement failed: {err}");
            }
        });
        log::debug!("showing tooltip of {}", owner.label());
        *self.inner.active_tooltip.borrow_mut() = Some(ActiveTooltip {
            owner: owner.clone(),
            tooltip: None,
            listener,
        });
        self.inner.current_element_with_tooltip.set(Some(owner));
        self.replace_tooltip(Some(tooltip))
    }

    /// Swaps the element shown for the active tooltip owner.
    fn replace_tooltip(&self, tooltip: Option<UiElement>) -> Result<(), UiError> {
        let (owner, previous) = {
            let mut active = self.inner.active_tooltip.borrow_mut();
            let Some(active) = active.as_mut() else {
                return Ok(());
            };
            let unchanged = match (&active.tooltip, &tooltip) {
                (Some(current), Some(next)) => current.ptr_eq(next),
                (None, None) => true,
                _ => false,
            };
            if unchanged {
                return Ok(());
            }
            (active.owner.clone(), active.tooltip.take())
        };

        let layer_root = self.layer(LayerKind::Tooltip).root();
        if let Some(previous) = previous {
            layer_root.remove_child(&previous);
        }
        let Some(tooltip) = tooltip else {
            return Ok(());
        };
        if tooltip.has_parent() {
            log::warn!(
                "tooltip {} of {} already has a parent, not shown",
                tooltip.label(),
                owner.label()
            );
            return Ok(());
        }
        layer_root.add_child(&tooltip)?;
        if let Some(active) = self.inner.active_tooltip.borrow_mut().as_mut() {
            active.tooltip = Some(tooltip);
        }
        self.position_tooltip()
    }

    /// Places the visible tooltip above the pointer, flipping to the left of
    /// it when there is no room above, and clamps it inside the scene.
    fn position_tooltip(&self) -> Result<(), UiError> {
        let Some(tooltip) = self.active_tooltip() else {
            return Ok(());
        };
        let area = self.inner.area.rect()?;
        let mouse = self.inner.mouse_position.get()?;
        let width = tooltip.bounds().width.get()?;
        let height = tooltip.bounds().height.get()?;

        let local = Point::new(mouse.x - area.x, mouse.y - area.y);
        let left_of_pointer = local.y <= height;
        let y = (local.y - height).min(area.height - height).max(0.0);
        let x = if left_of_pointer { local.x - width } else { local.x };
        let x = x.min(area.width - width).max(0.0);
        tooltip.bounds().x.set(x);
        tooltip.bounds().y.set(y);
        Ok(())
    }

    /// Shows `dialog` in the dialog layer, replacing the current one.
    pub fn show_root_dialog(&self, dialog: &UiElement) -> Result<(), UiError> {
        self.hide_root_dialog();
        self.layer(LayerKind::Dialog).root().add_child(dialog)?;
        *self.inner.root_dialog.borrow_mut() = Some(dialog.clone());
        self.cancel_tooltip();
        self.layer(LayerKind::Dialog).reset_hover_path();
        log::debug!("root dialog {} shown", dialog.label());
        Ok(())
    }

    /// Hides the current dialog and returns it.
    pub fn hide_root_dialog(&self) -> Option<UiElement> {
        let dialog = self.inner.root_dialog.borrow_mut().take()?;
        self.layer(LayerKind::Dialog).root().remove_child(&dialog);
        self.cancel_tooltip();
        self.layer(LayerKind::Dialog).reset_hover_path();
        log::debug!("root dialog {} hidden", dialog.label());
        Some(dialog)
    }

    /// Shows `menu` at the pointer, clamped inside the scene, replacing the
    /// current context menu.
    pub fn show_root_context_menu(&self, menu: &UiElement) -> Result<(), UiError> {
        self.hide_root_context_menu();
        let area = self.inner.area.rect()?;
        let mouse = self.inner.mouse_position.get()?;
        let size = menu.bounds().rect()?.size();
        let placed = Rect::from_origin_size(mouse, size).clamp_inside(&area);
        menu.bounds().x.set(placed.x - area.x);
        menu.bounds().y.set(placed.y - area.y);

        self.layer(LayerKind::ContextMenu).root().add_child(menu)?;
        *self.inner.root_context_menu.borrow_mut() = Some(menu.clone());
        self.cancel_tooltip();
        self.layer(LayerKind::ContextMenu).reset_hover_path();
        log::debug!("root context menu {} shown", menu.label());
        Ok(())
    }

    /// Hides the current context menu and returns it.
    pub fn hide_root_context_menu(&self) -> Option<UiElement> {
        let menu = self.inner.root_context_menu.borrow_mut().take()?;
        self.layer(LayerKind::ContextMenu).root().remove_child(&menu);
        self.cancel_tooltip();
        self.layer(LayerKind::ContextMenu).reset_hover_path();
        log::debug!("root context menu {} hidden", menu.label());
        Some(menu)
    }

    fn capture_drag(&self, button: PointerButton, layer: LayerKind, path: Vec<UiElement>) {
        let mut drags = self.inner.drags.borrow_mut();
        drags.retain(|capture| capture.button != button);
        drags.push(DragCapture {
            button,
            layer,
            path,
        });
    }

    fn take_drag(&self, button: PointerButton) -> Option<DragCapture> {
        let mut drags = self.inner.drags.borrow_mut();
        let index = drags.iter().position(|capture| capture.button == button)?;
        Some(drags.remove(index))
    }
}

fn deepest_with_tooltip(path: &[UiElement]) -> Result<Option<UiElement>, UiError> {
    for element in path.iter().rev() {
        if element.tooltip_element().with(Option::is_some)? {
            return Ok(Some(element.clone()));
        }
    }
    Ok(None)
}

impl fmt::Debug for SceneRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneRoot")
            .field("camera", &self.camera())
            .field("dialog", &self.root_dialog().map(|dialog| dialog.id()))
            .field("context_menu", &self.root_context_menu().map(|menu| menu.id()))
            .finish()
    }
}

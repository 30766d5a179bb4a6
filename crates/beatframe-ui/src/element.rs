//! The scene element tree.
//!
//! A [`UiElement`] is a cheap handle to shared element state. Parents own
//! their children; a child only keeps a weak link back to its parent, so
//! dropping the last handle to a subtree root frees the whole subtree.
//!
//! Every geometric and visual property is an [`Observable`], so layout is a
//! set of bindings evaluated lazily on read.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use beatframe_core::{Observable, ReactiveError, Runtime};
use beatframe_foundation::InputEvent;
use beatframe_ui_graphics::{Insets, Point, Rect};

use crate::skin::Skin;
use crate::{TreeError, UiError};

/// Process-unique element identifier, assigned at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        ElementId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Input listener. Returns `Ok(true)` when it consumed the event.
pub type InputListener = Rc<dyn Fn(&UiElement, &InputEvent) -> Result<bool, UiError>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InputListenerId(u64);

/// Position and size of an element in the content coordinates of its parent.
#[derive(Clone)]
pub struct Bounds {
    pub x: Observable<f32>,
    pub y: Observable<f32>,
    pub width: Observable<f32>,
    pub height: Observable<f32>,
}

impl Bounds {
    pub(crate) fn new(runtime: &Runtime) -> Self {
        Self {
            x: runtime.observable(0.0),
            y: runtime.observable(0.0),
            width: runtime.observable(0.0),
            height: runtime.observable(0.0),
        }
    }

    pub fn rect(&self) -> Result<Rect, ReactiveError> {
        Ok(Rect::new(
            self.x.get()?,
            self.y.get()?,
            self.width.get()?,
            self.height.get()?,
        ))
    }

    /// Assigns all four fields directly, dropping any bindings.
    pub fn set_rect(&self, rect: Rect) {
        self.x.set(rect.x);
        self.y.set(rect.y);
        self.width.set(rect.width);
        self.height.set(rect.height);
    }
}

/// Successively inset areas of an element:
/// bounds, margin zone, border zone, padding zone, content zone.
#[derive(Clone)]
pub(crate) struct Zones {
    pub(crate) margin: Observable<Rect>,
    pub(crate) border: Observable<Rect>,
    pub(crate) padding: Observable<Rect>,
    pub(crate) content: Observable<Rect>,
}

pub(crate) struct ElementInner {
    id: ElementId,
    runtime: Runtime,
    name: RefCell<Option<String>>,
    parent_link: RefCell<Option<WeakElement>>,
    pub(crate) parent: Observable<Option<WeakElement>>,
    children: RefCell<Vec<UiElement>>,
    pub(crate) bounds: Bounds,
    pub(crate) margin: Observable<Insets>,
    pub(crate) border: Observable<Insets>,
    pub(crate) padding: Observable<Insets>,
    pub(crate) zones: Zones,
    visible: Observable<bool>,
    opacity: Observable<f32>,
    pub(crate) apparent_visibility: Observable<bool>,
    pub(crate) apparent_opacity: Observable<f32>,
    do_clip: Observable<bool>,
    tooltip_element: Observable<Option<UiElement>>,
    skin: RefCell<Option<Rc<dyn Skin>>>,
    listeners: RefCell<Vec<(InputListenerId, InputListener)>>,
    next_listener: Cell<u64>,
}

/// Handle to an element of the scene tree. Cloning shares the element.
#[derive(Clone)]
pub struct UiElement {
    pub(crate) inner: Rc<ElementInner>,
}

/// Non-owning handle, used for child-to-parent links.
#[derive(Clone)]
pub struct WeakElement(Weak<ElementInner>);

impl WeakElement {
    pub fn upgrade(&self) -> Option<UiElement> {
        self.0.upgrade().map(|inner| UiElement { inner })
    }
}

impl PartialEq for WeakElement {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for WeakElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(element) => write!(f, "WeakElement({})", element.id()),
            None => f.write_str("WeakElement(<dropped>)"),
        }
    }
}

impl UiElement {
    pub fn new(runtime: &Runtime) -> Self {
        let bounds = Bounds::new(runtime);
        let margin = runtime.observable(Insets::ZERO);
        let border = runtime.observable(Insets::ZERO);
        let padding = runtime.observable(Insets::ZERO);
        let zones = crate::layout::bind_zones(runtime, &bounds, &margin, &border, &padding);

        let parent: Observable<Option<WeakElement>> = runtime.observable(None);
        let visible = runtime.observable(true);
        let opacity = runtime.observable(1.0f32);

        let apparent_visibility = {
            let (parent, visible) = (parent.clone(), visible.clone());
            runtime.derived(move |scope| {
                if !scope.read(&visible)? {
                    return Ok(false);
                }
                match scope.read(&parent)?.and_then(|link| link.upgrade()) {
                    Some(parent) => scope.read(&parent.inner.apparent_visibility),
                    None => Ok(true),
                }
            })
        };
        let apparent_opacity = {
            let (parent, opacity) = (parent.clone(), opacity.clone());
            runtime.derived(move |scope| {
                let own = scope.read(&opacity)?.clamp(0.0, 1.0);
                match scope.read(&parent)?.and_then(|link| link.upgrade()) {
                    Some(parent) => Ok(own * scope.read(&parent.inner.apparent_opacity)?),
                    None => Ok(own),
                }
            })
        };

        Self {
            inner: Rc::new(ElementInner {
                id: ElementId::next(),
                runtime: runtime.clone(),
                name: RefCell::new(None),
                parent_link: RefCell::new(None),
                parent,
                children: RefCell::new(Vec::new()),
                bounds,
                margin,
                border,
                padding,
                zones,
                visible,
                opacity,
                apparent_visibility,
                apparent_opacity,
                do_clip: runtime.observable(false),
                tooltip_element: runtime.observable(None),
                skin: RefCell::new(None),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
            }),
        }
    }

    /// Creates an element with a debug name.
    pub fn named(runtime: &Runtime, name: impl Into<String>) -> Self {
        let element = Self::new(runtime);
        element.set_name(name);
        element
    }

    pub fn id(&self) -> ElementId {
        self.inner.id
    }

    pub fn runtime(&self) -> &Runtime {
        &self.inner.runtime
    }

    pub fn name(&self) -> Option<String> {
        self.inner.name.borrow().clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        *self.inner.name.borrow_mut() = Some(name.into());
    }

    pub fn downgrade(&self) -> WeakElement {
        WeakElement(Rc::downgrade(&self.inner))
    }

    pub fn ptr_eq(&self, other: &UiElement) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn bounds(&self) -> &Bounds {
        &self.inner.bounds
    }

    pub fn margin(&self) -> &Observable<Insets> {
        &self.inner.margin
    }

    pub fn border(&self) -> &Observable<Insets> {
        &self.inner.border
    }

    pub fn padding(&self) -> &Observable<Insets> {
        &self.inner.padding
    }

    /// Bounds inset by the margin.
    pub fn margin_zone(&self) -> &Observable<Rect> {
        &self.inner.zones.margin
    }

    /// Margin zone inset by the border.
    pub fn border_zone(&self) -> &Observable<Rect> {
        &self.inner.zones.border
    }

    /// Border zone inset by the padding.
    pub fn padding_zone(&self) -> &Observable<Rect> {
        &self.inner.zones.padding
    }

    /// The area children are laid out in. Child coordinates are relative to
    /// its origin.
    pub fn content_zone(&self) -> &Observable<Rect> {
        &self.inner.zones.content
    }

    pub fn visible(&self) -> &Observable<bool> {
        &self.inner.visible
    }

    pub fn opacity(&self) -> &Observable<f32> {
        &self.inner.opacity
    }

    /// `visible` of this element and of every ancestor.
    pub fn apparent_visibility(&self) -> &Observable<bool> {
        &self.inner.apparent_visibility
    }

    /// Product of `opacity` over this element and every ancestor.
    pub fn apparent_opacity(&self) -> &Observable<f32> {
        &self.inner.apparent_opacity
    }

    /// Clip child rendering to this element's bounds.
    pub fn do_clip(&self) -> &Observable<bool> {
        &self.inner.do_clip
    }

    /// Element shown in the tooltip layer while this element is hovered.
    pub fn tooltip_element(&self) -> &Observable<Option<UiElement>> {
        &self.inner.tooltip_element
    }

    pub fn set_tooltip(&self, tooltip: Option<UiElement>) {
        self.inner.tooltip_element.set(tooltip);
    }

    /// Reactive view of the parent link, for bindings that follow reparenting.
    pub fn parent_cell(&self) -> &Observable<Option<WeakElement>> {
        &self.inner.parent
    }

    pub fn parent(&self) -> Option<UiElement> {
        self.inner
            .parent_link
            .borrow()
            .as_ref()
            .and_then(WeakElement::upgrade)
    }

    pub fn has_parent(&self) -> bool {
        self.parent().is_some()
    }

    /// Snapshot of the children in render order.
    pub fn children(&self) -> Vec<UiElement> {
        self.inner.children.borrow().clone()
    }

    pub fn child_count(&self) -> usize {
        self.inner.children.borrow().len()
    }

    pub fn child_at(&self, index: usize) -> Option<UiElement> {
        self.inner.children.borrow().get(index).cloned()
    }

    pub fn index_of(&self, child: &UiElement) -> Option<usize> {
        self.inner
            .children
            .borrow()
            .iter()
            .position(|existing| existing.ptr_eq(child))
    }

    /// Appends `child`, making it the topmost sibling.
    pub fn add_child(&self, child: &UiElement) -> Result<(), TreeError> {
        self.insert_child(self.child_count(), child)
    }

    /// Inserts `child` at `index`, clamped to the child count.
    pub fn insert_child(&self, index: usize, child: &UiElement) -> Result<(), TreeError> {
        self.check_attachable(child)?;
        {
            let mut children = self.inner.children.borrow_mut();
            let index = index.min(children.len());
            children.insert(index, child.clone());
        }
        *child.inner.parent_link.borrow_mut() = Some(self.downgrade());
        child.inner.parent.set(Some(self.downgrade()));
        log::debug!("attached {} to {}", child.label(), self.label());
        Ok(())
    }

    /// Detaches `child`. Returns whether it was a child of this element.
    ///
    /// Bindings of the child that read its parent become inert, they do not
    /// need to be cleared.
    pub fn remove_child(&self, child: &UiElement) -> bool {
        let removed = {
            let mut children = self.inner.children.borrow_mut();
            match children.iter().position(|existing| existing.ptr_eq(child)) {
                Some(index) => Some(children.remove(index)),
                None => None,
            }
        };
        let Some(removed) = removed else {
            return false;
        };
        *removed.inner.parent_link.borrow_mut() = None;
        removed.inner.parent.set(None);
        log::debug!("detached {} from {}", removed.label(), self.label());
        true
    }

    /// Detaches this element from its parent, if any.
    pub fn remove_from_parent(&self) -> bool {
        match self.parent() {
            Some(parent) => parent.remove_child(self),
            None => false,
        }
    }

    pub fn remove_all_children(&self) {
        for child in self.children() {
            self.remove_child(&child);
        }
    }

    /// Topmost ancestor, or this element if it has no parent.
    pub fn root(&self) -> UiElement {
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// Returns `true` if `ancestor` is this element or one of its ancestors.
    pub fn is_in_subtree_of(&self, ancestor: &UiElement) -> bool {
        let mut cursor = Some(self.clone());
        while let Some(element) = cursor {
            if element.ptr_eq(ancestor) {
                return true;
            }
            cursor = element.parent();
        }
        false
    }

    fn check_attachable(&self, child: &UiElement) -> Result<(), TreeError> {
        if self.ptr_eq(child) {
            return Err(TreeError::SelfParent {
                element: child.id(),
            });
        }
        if let Some(current) = child.parent() {
            return Err(TreeError::InvalidParent {
                child: child.id(),
                current_parent: current.id(),
            });
        }
        if self.is_in_subtree_of(child) {
            return Err(TreeError::AncestorCycle {
                element: child.id(),
            });
        }
        Ok(())
    }

    /// Absolute position of the parent's content zone origin, which is the
    /// origin this element's bounds are relative to.
    pub fn parent_origin(&self) -> Result<Point, ReactiveError> {
        let mut origin = Point::ZERO;
        let mut cursor = self.parent();
        while let Some(ancestor) = cursor {
            let content = ancestor.content_zone().get()?;
            origin.x += content.x;
            origin.y += content.y;
            cursor = ancestor.parent();
        }
        Ok(origin)
    }

    /// Position of this element's bounds in root coordinates.
    pub fn absolute_position(&self) -> Result<Point, ReactiveError> {
        let origin = self.parent_origin()?;
        Ok(Point::new(
            origin.x + self.bounds().x.get()?,
            origin.y + self.bounds().y.get()?,
        ))
    }

    pub fn absolute_bounds(&self) -> Result<Rect, ReactiveError> {
        let origin = self.parent_origin()?;
        Ok(self.bounds().rect()?.translate(origin.x, origin.y))
    }

    /// Whether the root-space point lies within this element's bounds.
    pub fn contains_absolute(&self, x: f32, y: f32) -> Result<bool, ReactiveError> {
        Ok(self.absolute_bounds()?.contains(x, y))
    }

    pub fn set_skin(&self, skin: impl Skin + 'static) {
        self.set_skin_rc(Rc::new(skin));
    }

    pub fn set_skin_rc(&self, skin: Rc<dyn Skin>) {
        *self.inner.skin.borrow_mut() = Some(skin);
    }

    pub fn clear_skin(&self) {
        self.inner.skin.borrow_mut().take();
    }

    pub fn skin(&self) -> Option<Rc<dyn Skin>> {
        self.inner.skin.borrow().clone()
    }

    pub fn add_input_listener(
        &self,
        listener: impl Fn(&UiElement, &InputEvent) -> Result<bool, UiError> + 'static,
    ) -> InputListenerId {
        let id = InputListenerId(self.inner.next_listener.get());
        self.inner.next_listener.set(id.0 + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    pub fn remove_input_listener(&self, id: InputListenerId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn input_listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    fn listener_snapshot(&self) -> Vec<InputListener> {
        self.inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect()
    }

    /// Offers `event` to the listeners in registration order, stopping at the
    /// first one that consumes it.
    pub fn fire_input(&self, event: &InputEvent) -> Result<bool, UiError> {
        for listener in self.listener_snapshot() {
            if listener(self, event)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Delivers `event` to every listener regardless of consumption.
    pub(crate) fn notify_input(&self, event: &InputEvent) -> Result<(), UiError> {
        for listener in self.listener_snapshot() {
            listener(self, event)?;
        }
        Ok(())
    }

    /// Short description used in logs and tree dumps.
    pub fn label(&self) -> String {
        match self.inner.name.borrow().as_deref() {
            Some(name) => format!("{name}{}", self.inner.id),
            None => format!("element{}", self.inner.id),
        }
    }
}

impl PartialEq for UiElement {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for UiElement {}

impl fmt::Debug for UiElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiElement")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name.borrow())
            .field("children", &self.child_count())
            .finish()
    }
}

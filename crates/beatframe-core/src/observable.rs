use std::cell::{Cell, RefCell};
use std::fmt;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

use crate::graph::Invalidate;
use crate::policy::{MutationPolicy, NeverEqual, StructuralEquality};
use crate::runtime::Runtime;
use crate::{CellId, ReactiveError};

/// A binding closure. It receives the evaluation scope of the cell it computes.
pub type Binding<T> = Rc<dyn Fn(&Scope<'_>) -> Result<T, ReactiveError>>;

type Listener<T> = Rc<dyn Fn(&Observable<T>)>;

/// Identifies a listener registered with [`Observable::add_listener`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Handle to the evaluation of one binding.
///
/// Every cell read through the scope, or through a plain [`Observable::get`]
/// while the scope is active, becomes a dependency of the cell being computed.
pub struct Scope<'a> {
    cell: CellId,
    _marker: PhantomData<&'a ()>,
}

impl<'a> Scope<'a> {
    fn new(cell: CellId) -> Self {
        Self {
            cell,
            _marker: PhantomData,
        }
    }

    /// The cell whose binding is being evaluated.
    pub fn cell(&self) -> CellId {
        self.cell
    }

    /// Reads `source` and records it as a dependency.
    pub fn read<T: Clone + 'static>(&self, source: &Observable<T>) -> Result<T, ReactiveError> {
        source.get()
    }

    /// Reads `source` by reference and records it as a dependency.
    pub fn read_with<T: Clone + 'static, R>(
        &self,
        source: &Observable<T>,
        f: impl FnOnce(&T) -> R,
    ) -> Result<R, ReactiveError> {
        source.with(f)
    }
}

/// Sets a flag for the duration of an evaluation, clearing it on every exit path.
struct EvaluationGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> EvaluationGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for EvaluationGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

pub(crate) struct ObservableInner<T: Clone + 'static> {
    id: CellId,
    runtime: Runtime,
    value: RefCell<Option<T>>,
    binding: RefCell<Option<Binding<T>>>,
    dirty: Cell<bool>,
    evaluating: Cell<bool>,
    policy: Rc<dyn MutationPolicy<T>>,
    listeners: RefCell<Vec<(ListenerId, Listener<T>)>>,
    next_listener: Cell<u64>,
    weak_self: Weak<ObservableInner<T>>,
}

impl<T: Clone + 'static> Invalidate for ObservableInner<T> {
    fn mark_dirty(&self) -> bool {
        if self.dirty.get() || self.binding.borrow().is_none() {
            return false;
        }
        self.dirty.set(true);
        true
    }

    fn notify_listeners(&self) {
        if let Some(inner) = self.weak_self.upgrade() {
            Observable { inner }.fire_listeners();
        }
    }
}

impl<T: Clone + 'static> Drop for ObservableInner<T> {
    fn drop(&mut self) {
        self.runtime.inner().release(self.id);
    }
}

/// A mutable cell that is either directly assigned or bound to a lazily
/// recomputed expression over other cells.
///
/// Cloning an `Observable` yields another handle to the same cell.
pub struct Observable<T: Clone + 'static> {
    inner: Rc<ObservableInner<T>>,
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Creates a directly-assigned cell that only reports writes of unequal values.
    pub fn new(runtime: &Runtime, value: T) -> Self {
        Self::with_policy(runtime, value, StructuralEquality)
    }

    /// Creates a bound cell. The binding runs on the first read.
    pub fn bound(
        runtime: &Runtime,
        compute: impl Fn(&Scope<'_>) -> Result<T, ReactiveError> + 'static,
    ) -> Self {
        let observable = Self::create(runtime, None, Rc::new(StructuralEquality));
        observable.install_binding(Rc::new(compute));
        observable
    }
}

impl<T: Clone + 'static> Observable<T> {
    /// Creates a directly-assigned cell whose writes are filtered by `policy`.
    pub fn with_policy(
        runtime: &Runtime,
        value: T,
        policy: impl MutationPolicy<T> + 'static,
    ) -> Self {
        Self::create(runtime, Some(value), Rc::new(policy))
    }

    /// Creates a directly-assigned cell that treats every write as a change.
    pub fn never_equal(runtime: &Runtime, value: T) -> Self {
        Self::with_policy(runtime, value, NeverEqual)
    }

    fn create(runtime: &Runtime, value: Option<T>, policy: Rc<dyn MutationPolicy<T>>) -> Self {
        let inner = Rc::new_cyclic(|weak: &Weak<ObservableInner<T>>| {
            let target: Weak<dyn Invalidate> = weak.clone();
            let id = runtime.inner().register(target);
            ObservableInner {
                id,
                runtime: runtime.clone(),
                value: RefCell::new(value),
                binding: RefCell::new(None),
                dirty: Cell::new(false),
                evaluating: Cell::new(false),
                policy,
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
                weak_self: weak.clone(),
            }
        });
        Self { inner }
    }

    pub fn id(&self) -> CellId {
        self.inner.id
    }

    pub fn runtime(&self) -> &Runtime {
        &self.inner.runtime
    }

    /// Returns `true` if a binding is installed.
    pub fn is_bound(&self) -> bool {
        self.inner.binding.borrow().is_some()
    }

    /// Returns `true` if the next read will recompute the binding.
    pub fn is_dirty(&self) -> bool {
        self.inner.dirty.get()
    }

    /// Returns the current value, recomputing the binding first if it is dirty.
    ///
    /// Inside a binding evaluation the read is captured as a dependency.
    pub fn get(&self) -> Result<T, ReactiveError> {
        self.with(T::clone)
    }

    /// Like [`Observable::get`], but lends the value instead of cloning it.
    ///
    /// `f` must not write to this cell.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Result<R, ReactiveError> {
        let inner = &self.inner;
        if inner.evaluating.get() {
            log::debug!("cell {} read during its own evaluation", inner.id);
            return Err(ReactiveError::CyclicDependency { cell: inner.id });
        }
        inner.runtime.inner().record_read(inner.id);
        if inner.dirty.get() {
            self.recompute()?;
        }
        let value = inner.value.borrow();
        let result = match value.as_ref() {
            Some(value) => Ok(f(value)),
            None => Err(ReactiveError::Unresolved { cell: inner.id }),
        };
        drop(value);
        result
    }

    /// Stores `value`, dropping any binding.
    ///
    /// Dependents are invalidated and listeners fired unless the cell was
    /// unbound and the mutation policy deems the value unchanged.
    pub fn set(&self, value: T) {
        let inner = &self.inner;
        let previous_binding = inner.binding.borrow_mut().take();
        let was_bound = previous_binding.is_some();
        if was_bound {
            inner.runtime.inner().clear_dependencies(inner.id);
        }

        let changed = was_bound
            || match inner.value.borrow().as_ref() {
                Some(current) => !inner.policy.equivalent(current, &value),
                None => true,
            };
        inner.dirty.set(false);
        if !changed {
            return;
        }

        let previous_value = inner.value.borrow_mut().replace(value);
        drop(previous_value);
        drop(previous_binding);
        self.propagate_change();
    }

    /// Reads the current value, lets `f` modify a copy, and writes it back.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R, ReactiveError> {
        let mut value = self.get()?;
        let result = f(&mut value);
        self.set(value);
        Ok(result)
    }

    /// Installs `compute` as the binding, replacing any direct value or previous
    /// binding. The cell becomes dirty; nothing is evaluated until the next read.
    pub fn bind(&self, compute: impl Fn(&Scope<'_>) -> Result<T, ReactiveError> + 'static) {
        self.install_binding(Rc::new(compute));
    }

    fn install_binding(&self, binding: Binding<T>) {
        let inner = &self.inner;
        let previous = inner.binding.borrow_mut().replace(binding);
        inner.runtime.inner().clear_dependencies(inner.id);
        inner.dirty.set(true);
        drop(previous);
        self.propagate_change();
    }

    /// Marks this cell dirty (if bound) and invalidates every transitive
    /// dependent without recomputing anything.
    pub fn invalidate(&self) {
        if self.is_bound() {
            self.inner.dirty.set(true);
        }
        self.propagate_change();
    }

    /// Registers a listener fired after every change, and for bound cells
    /// whenever they are invalidated.
    pub fn add_listener(&self, listener: impl Fn(&Observable<T>) + 'static) -> ListenerId {
        let inner = &self.inner;
        let id = ListenerId(inner.next_listener.get());
        inner.next_listener.set(id.0 + 1);
        inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    /// Removes a listener. Returns whether it was registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Read-only view of this cell.
    pub fn read_only(&self) -> ReadOnly<T> {
        ReadOnly {
            source: self.clone(),
        }
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn recompute(&self) -> Result<(), ReactiveError> {
        let inner = &self.inner;
        let Some(binding) = inner.binding.borrow().clone() else {
            inner.dirty.set(false);
            return Ok(());
        };

        let runtime = inner.runtime.inner();
        let _evaluating = EvaluationGuard::enter(&inner.evaluating);
        let frame = runtime.push_frame(inner.id);
        let result = binding(&Scope::new(inner.id));
        let reads = frame.finish();

        // On failure the previous edges and value stay, and the cell stays
        // dirty so the next read retries.
        let value = result?;
        runtime.replace_dependencies(inner.id, reads);
        let previous = inner.value.borrow_mut().replace(value);
        inner.dirty.set(false);
        drop(previous);
        log::trace!("cell {} recomputed", inner.id);
        Ok(())
    }

    fn propagate_change(&self) {
        let invalidated = self.inner.runtime.inner().invalidate_dependents(self.inner.id);
        self.fire_listeners();
        for dependent in invalidated {
            dependent.notify_listeners();
        }
    }

    fn fire_listeners(&self) {
        let listeners: Vec<Listener<T>> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(self);
        }
    }
}

impl Observable<bool> {
    /// Flips a boolean cell, dropping any binding. Returns the new value.
    pub fn invert(&self) -> Result<bool, ReactiveError> {
        let next = !self.get()?;
        self.set(next);
        Ok(next)
    }
}

impl<T: Clone + 'static> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> PartialEq for Observable<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Clone + 'static> Eq for Observable<T> {}

impl<T: fmt::Debug + Clone + 'static> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("id", &self.inner.id)
            .field("value", &self.inner.value.borrow())
            .field("bound", &self.is_bound())
            .field("dirty", &self.is_dirty())
            .finish()
    }
}

/// Read-only handle over an [`Observable`].
pub struct ReadOnly<T: Clone + 'static> {
    source: Observable<T>,
}

impl<T: Clone + 'static> ReadOnly<T> {
    pub fn id(&self) -> CellId {
        self.source.id()
    }

    pub fn get(&self) -> Result<T, ReactiveError> {
        self.source.get()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Result<R, ReactiveError> {
        self.source.with(f)
    }

    pub fn is_dirty(&self) -> bool {
        self.source.is_dirty()
    }

    pub fn add_listener(&self, listener: impl Fn(&Observable<T>) + 'static) -> ListenerId {
        self.source.add_listener(listener)
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.source.remove_listener(id)
    }

    /// The underlying cell, for use as a binding input.
    pub fn as_observable(&self) -> &Observable<T> {
        &self.source
    }
}

impl<T: Clone + 'static> Clone for ReadOnly<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
        }
    }
}

impl<T: fmt::Debug + Clone + 'static> fmt::Debug for ReadOnly<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReadOnly").field(&self.source).finish()
    }
}

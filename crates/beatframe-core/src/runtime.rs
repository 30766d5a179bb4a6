use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::collections::map::OrderedSet;
use crate::graph::{DependencyGraph, Invalidate};
use crate::observable::{Observable, Scope};
use crate::{CellId, ReactiveError};

/// One in-progress binding evaluation and the cells it has read so far.
struct EvalFrame {
    cell: CellId,
    reads: OrderedSet<CellId>,
}

pub(crate) struct RuntimeInner {
    graph: RefCell<DependencyGraph>,
    eval_stack: RefCell<Vec<EvalFrame>>,
    pending_release: RefCell<Vec<CellId>>,
}

impl RuntimeInner {
    fn new() -> Self {
        Self {
            graph: RefCell::new(DependencyGraph::default()),
            eval_stack: RefCell::new(Vec::new()),
            pending_release: RefCell::new(Vec::new()),
        }
    }

    fn with_graph<R>(&self, f: impl FnOnce(&mut DependencyGraph) -> R) -> R {
        let mut graph = self.graph.borrow_mut();
        let released: Vec<CellId> = self.pending_release.borrow_mut().drain(..).collect();
        for id in released {
            graph.remove(id);
        }
        f(&mut graph)
    }

    pub(crate) fn register(&self, target: Weak<dyn Invalidate>) -> CellId {
        self.with_graph(|graph| {
            let id = graph.allocate_id();
            graph.register(id, target);
            id
        })
    }

    pub(crate) fn release(&self, id: CellId) {
        // Cells can be dropped while the graph is borrowed (for example a
        // binding result owning other cells); defer those removals.
        match self.graph.try_borrow_mut() {
            Ok(mut graph) => graph.remove(id),
            Err(_) => self.pending_release.borrow_mut().push(id),
        }
    }

    /// Registers `id` as a dependency of the innermost running evaluation.
    pub(crate) fn record_read(&self, id: CellId) {
        if let Some(frame) = self.eval_stack.borrow_mut().last_mut() {
            if frame.cell != id {
                frame.reads.insert(id);
            }
        }
    }

    pub(crate) fn push_frame(&self, cell: CellId) -> FrameGuard<'_> {
        self.eval_stack.borrow_mut().push(EvalFrame {
            cell,
            reads: OrderedSet::default(),
        });
        FrameGuard {
            runtime: self,
            finished: false,
        }
    }

    pub(crate) fn replace_dependencies(&self, id: CellId, reads: OrderedSet<CellId>) {
        self.with_graph(|graph| graph.replace_dependencies(id, reads));
    }

    pub(crate) fn clear_dependencies(&self, id: CellId) {
        self.with_graph(|graph| graph.clear_dependencies(id));
    }

    /// Marks the transitive dependents of `id` dirty and returns them for
    /// notification after the graph borrow has been released.
    pub(crate) fn invalidate_dependents(&self, id: CellId) -> Vec<Rc<dyn Invalidate>> {
        let invalidated = self.with_graph(|graph| graph.invalidate_dependents(id));
        if !invalidated.is_empty() {
            log::trace!("cell {id} invalidated {} dependents", invalidated.len());
        }
        invalidated
    }
}

/// Pops its evaluation frame when dropped, so a panicking binding cannot
/// leave a stale frame that would capture unrelated reads.
pub(crate) struct FrameGuard<'a> {
    runtime: &'a RuntimeInner,
    finished: bool,
}

impl FrameGuard<'_> {
    pub(crate) fn finish(mut self) -> OrderedSet<CellId> {
        self.finished = true;
        self.runtime
            .eval_stack
            .borrow_mut()
            .pop()
            .map(|frame| frame.reads)
            .unwrap_or_default()
    }
}

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        self.runtime.eval_stack.borrow_mut().pop();
    }
}

/// Owner of the dependency graph and of the evaluation stack used for
/// dependency capture.
///
/// A runtime is single-threaded. Cloning yields another handle to the same
/// graph. Cells keep their runtime alive; the graph only holds weak
/// references back to cells.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new()),
        }
    }

    pub(crate) fn inner(&self) -> &RuntimeInner {
        &self.inner
    }

    /// Creates a directly-assigned cell.
    pub fn observable<T: Clone + PartialEq + 'static>(&self, value: T) -> Observable<T> {
        Observable::new(self, value)
    }

    /// Creates a cell bound to `compute`. Nothing is evaluated until the first read.
    pub fn derived<T: Clone + PartialEq + 'static>(
        &self,
        compute: impl Fn(&Scope<'_>) -> Result<T, ReactiveError> + 'static,
    ) -> Observable<T> {
        Observable::bound(self, compute)
    }

    /// Number of live cells registered with this runtime.
    pub fn cell_count(&self) -> usize {
        self.inner.with_graph(|graph| graph.len())
    }

    /// Returns `true` while any binding of this runtime is being evaluated.
    pub fn is_evaluating(&self) -> bool {
        !self.inner.eval_stack.borrow().is_empty()
    }

    /// Cells read by the last successful evaluation of `cell`.
    pub fn dependencies_of(&self, cell: CellId) -> Vec<CellId> {
        self.inner.with_graph(|graph| graph.dependencies_of(cell))
    }

    /// Cells whose last successful evaluation read `cell`.
    pub fn dependents_of(&self, cell: CellId) -> Vec<CellId> {
        self.inner.with_graph(|graph| graph.dependents_of(cell))
    }

    pub fn ptr_eq(&self, other: &Runtime) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("cells", &self.cell_count())
            .field("evaluating", &self.is_evaluating())
            .finish()
    }
}

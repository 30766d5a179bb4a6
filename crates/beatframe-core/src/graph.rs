//! Dependency edges between cells.
//!
//! Each registered cell owns a node holding the cells it read during its
//! last evaluation (`dependencies`) and the cells whose last evaluation read
//! it (`dependents`). Both directions are kept in sync so that releasing a
//! cell or replacing its read set never leaves dangling edges behind.

use std::rc::{Rc, Weak};

use crate::collections::map::{HashMap, HashSet, OrderedSet};
use crate::CellId;

/// Type-erased view of a cell used by the invalidation walk.
pub(crate) trait Invalidate {
    /// Marks the cell dirty. Returns `true` if it was clean before, the only
    /// case where its listeners fire.
    fn mark_dirty(&self) -> bool;

    /// Fires the cell's change listeners.
    fn notify_listeners(&self);
}

struct GraphNode {
    target: Weak<dyn Invalidate>,
    dependencies: HashSet<CellId>,
    dependents: HashSet<CellId>,
}

#[derive(Default)]
pub(crate) struct DependencyGraph {
    nodes: HashMap<CellId, GraphNode>,
    next_id: CellId,
}

impl DependencyGraph {
    pub(crate) fn allocate_id(&mut self) -> CellId {
        self.next_id += 1;
        self.next_id
    }

    pub(crate) fn register(&mut self, id: CellId, target: Weak<dyn Invalidate>) {
        self.nodes.insert(
            id,
            GraphNode {
                target,
                dependencies: HashSet::default(),
                dependents: HashSet::default(),
            },
        );
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Drops a cell and every edge touching it.
    pub(crate) fn remove(&mut self, id: CellId) {
        let Some(node) = self.nodes.remove(&id) else {
            return;
        };
        for dependency in node.dependencies {
            if let Some(upstream) = self.nodes.get_mut(&dependency) {
                upstream.dependents.remove(&id);
            }
        }
        for dependent in node.dependents {
            if let Some(downstream) = self.nodes.get_mut(&dependent) {
                downstream.dependencies.remove(&id);
            }
        }
    }

    /// Replaces the full read set of `id` with `reads`, subscribing to new
    /// dependencies and unsubscribing from the ones no longer read.
    pub(crate) fn replace_dependencies(&mut self, id: CellId, reads: OrderedSet<CellId>) {
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        let previous = std::mem::take(&mut node.dependencies);
        let mut current = HashSet::default();

        for read in reads {
            // Cells released mid-evaluation may still show up in the read set.
            if read == id || !self.nodes.contains_key(&read) {
                continue;
            }
            current.insert(read);
        }

        for stale in previous.difference(&current) {
            if let Some(upstream) = self.nodes.get_mut(stale) {
                upstream.dependents.remove(&id);
            }
        }
        for added in current.difference(&previous) {
            if let Some(upstream) = self.nodes.get_mut(added) {
                upstream.dependents.insert(id);
            }
        }

        if let Some(node) = self.nodes.get_mut(&id) {
            node.dependencies = current;
        }
    }

    pub(crate) fn clear_dependencies(&mut self, id: CellId) {
        self.replace_dependencies(id, OrderedSet::default());
    }

    pub(crate) fn dependencies_of(&self, id: CellId) -> Vec<CellId> {
        let mut ids: Vec<CellId> = self
            .nodes
            .get(&id)
            .map(|node| node.dependencies.iter().copied().collect())
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }

    pub(crate) fn dependents_of(&self, id: CellId) -> Vec<CellId> {
        let mut ids: Vec<CellId> = self
            .nodes
            .get(&id)
            .map(|node| node.dependents.iter().copied().collect())
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }

    /// Marks every transitive dependent of `id` dirty without recomputing
    /// anything. Returns the cells that transitioned to dirty so the caller
    /// can notify them once the graph is no longer borrowed.
    ///
    /// Already-dirty cells are walked through as well: a clean reader may
    /// still hang off a dirty cell whose last recompute failed.
    pub(crate) fn invalidate_dependents(&self, id: CellId) -> Vec<Rc<dyn Invalidate>> {
        let mut pending: Vec<CellId> = match self.nodes.get(&id) {
            Some(node) => node.dependents.iter().copied().collect(),
            None => return Vec::new(),
        };
        let mut visited: HashSet<CellId> = HashSet::default();
        visited.insert(id);
        let mut invalidated = Vec::new();

        while let Some(next) = pending.pop() {
            if !visited.insert(next) {
                continue;
            }
            let Some(node) = self.nodes.get(&next) else {
                continue;
            };
            let Some(target) = node.target.upgrade() else {
                continue;
            };
            pending.extend(node.dependents.iter().copied());
            if target.mark_dirty() {
                invalidated.push(target);
            }
        }

        invalidated
    }
}

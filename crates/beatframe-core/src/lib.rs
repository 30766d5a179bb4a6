#![doc = r"Reactive core for Beatframe: observable cells, lazily recomputed bindings, and the dependency graph that connects them."]

mod collections;
mod graph;
mod observable;
pub mod platform;
mod policy;
mod runtime;

pub use observable::{Binding, ListenerId, Observable, ReadOnly, Scope};
pub use platform::Clock;
pub use policy::{MutationPolicy, NeverEqual, StructuralEquality};
pub use runtime::Runtime;

use std::error::Error;
use std::fmt;

/// Identifier of a cell within its [`Runtime`].
pub type CellId = usize;

/// Errors surfaced by reading a cell.
#[derive(Debug)]
pub enum ReactiveError {
    /// A binding read the cell that is currently being evaluated, directly or
    /// through other bindings.
    CyclicDependency { cell: CellId },
    /// A binding closure failed. The cell stays dirty and the next read retries.
    Binding(Box<dyn Error + 'static>),
    /// A cell was read before it ever held a value.
    Unresolved { cell: CellId },
}

impl ReactiveError {
    /// Wraps a failure raised by user code inside a binding.
    pub fn binding(err: impl Into<Box<dyn Error + 'static>>) -> Self {
        ReactiveError::Binding(err.into())
    }

    pub fn is_cycle(&self) -> bool {
        matches!(self, ReactiveError::CyclicDependency { .. })
    }
}

impl fmt::Display for ReactiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReactiveError::CyclicDependency { cell } => {
                write!(f, "cyclic dependency detected while evaluating cell {cell}")
            }
            ReactiveError::Binding(err) => write!(f, "binding evaluation failed: {err}"),
            ReactiveError::Unresolved { cell } => write!(f, "cell {cell} has no value"),
        }
    }
}

impl Error for ReactiveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ReactiveError::Binding(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "tests/observable_tests.rs"]
mod observable_tests;

#[cfg(test)]
#[path = "tests/graph_tests.rs"]
mod graph_tests;

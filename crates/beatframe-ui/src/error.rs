use std::error::Error;
use std::fmt;

use beatframe_core::ReactiveError;

use crate::element::ElementId;

/// Rejected tree mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The child is already attached; it must be detached first.
    InvalidParent {
        child: ElementId,
        current_parent: ElementId,
    },
    /// An element cannot be its own child.
    SelfParent { element: ElementId },
    /// The child is an ancestor of the element it was attached to.
    AncestorCycle { element: ElementId },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::InvalidParent {
                child,
                current_parent,
            } => write!(
                f,
                "element {child} already has parent {current_parent}; detach it first"
            ),
            TreeError::SelfParent { element } => {
                write!(f, "element {element} cannot be added to itself")
            }
            TreeError::AncestorCycle { element } => write!(
                f,
                "element {element} cannot be added below one of its own descendants"
            ),
        }
    }
}

impl Error for TreeError {}

/// Errors surfaced by scene-level operations and input listeners.
#[derive(Debug)]
pub enum UiError {
    Reactive(ReactiveError),
    Tree(TreeError),
    /// An input listener or action failed.
    Listener(Box<dyn Error + 'static>),
}

impl UiError {
    pub fn listener(err: impl Into<Box<dyn Error + 'static>>) -> Self {
        UiError::Listener(err.into())
    }
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiError::Reactive(err) => write!(f, "{err}"),
            UiError::Tree(err) => write!(f, "{err}"),
            UiError::Listener(err) => write!(f, "input listener failed: {err}"),
        }
    }
}

impl Error for UiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            UiError::Reactive(err) => Some(err),
            UiError::Tree(err) => Some(err),
            UiError::Listener(err) => Some(err.as_ref()),
        }
    }
}

impl From<ReactiveError> for UiError {
    fn from(err: ReactiveError) -> Self {
        UiError::Reactive(err)
    }
}

impl From<TreeError> for UiError {
    fn from(err: TreeError) -> Self {
        UiError::Tree(err)
    }
}

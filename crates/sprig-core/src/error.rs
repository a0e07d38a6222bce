use thiserror::Error;

/// A context was read with no provider above it and no default registered.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("`{consumer}` must be used within `{root}`")]
pub struct ContextError {
    /// Widget that attempted the read.
    pub consumer: String,
    /// Widget expected to provide the value.
    pub root: String,
}

/// More than one node was presented where at most one was allowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum StructuralViolation {
    #[error("Slot expects at most one child, got {count}")]
    MultipleChildren { count: usize },
    #[error("Slottable expects at most one child, got {count}")]
    MultipleForwarded { count: usize },
}

/// Assembly mistakes raised by widgets and caught by an error boundary.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UiError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Structure(#[from] StructuralViolation),
}

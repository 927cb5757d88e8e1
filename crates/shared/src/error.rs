use thiserror::Error;

/// Store-level failure taxonomy. No variant is retried or recovered by the
/// store itself; callers decide how to surface it.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store connection could not be established or verified.
    #[error("inventory store unavailable: {message}")]
    Unavailable { message: String },
    /// A single create/read/update/delete call was rejected by the backend.
    #[error("inventory store operation '{op}' failed: {message}")]
    OperationFailed { op: &'static str, message: String },
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn operation(op: &'static str, message: impl Into<String>) -> Self {
        Self::OperationFailed {
            op,
            message: message.into(),
        }
    }

    pub fn op(&self) -> Option<&'static str> {
        match self {
            Self::Unavailable { .. } => None,
            Self::OperationFailed { op, .. } => Some(op),
        }
    }
}

use thiserror::Error;

/// Failures surfaced by resource store operations.
///
/// Both variants are expected, caller-recoverable conditions. The HTTP layer maps
/// [`StoreError::NotFound`] to `404` and [`StoreError::Conflict`] to `400`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The operation addressed an identifier with no stored record.
    #[error("{kind} with ID {id} not found")]
    NotFound {
        /// Human-readable resource kind (`User`, `Item`).
        kind: &'static str,
        /// Identifier that was looked up.
        id: u64,
    },
    /// A uniqueness constraint rejected the write.
    #[error("{0}")]
    Conflict(String),
}

impl StoreError {
    /// Build a [`StoreError::Conflict`] from any message.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }
}

//! Error types for the dropdown menu runtime.

use thiserror::Error;

/// The main error type for runtime operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The UI context has been dropped; nothing will drain posted work.
    #[error("the UI context has shut down")]
    ContextClosed,
    /// Worker-related error.
    #[error("worker error: {0}")]
    Worker(#[from] WorkerError),
}

/// Worker-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkerError {
    /// The worker has been stopped and no longer accepts jobs.
    #[error("worker has been stopped")]
    Stopped,
    /// The worker thread could not be spawned.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(String),
}

/// A specialized Result type for runtime operations.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_error_converts() {
        let err: CoreError = WorkerError::Stopped.into();
        assert_eq!(err, CoreError::Worker(WorkerError::Stopped));
        assert_eq!(err.to_string(), "worker error: worker has been stopped");
    }

    #[test]
    fn test_context_closed_message() {
        assert_eq!(
            CoreError::ContextClosed.to_string(),
            "the UI context has shut down"
        );
    }
}

//! Error types for host function binding

/// Error type for host binding operations
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    /// The host did not supply a function a registered class is wired to
    #[error("Host function not found: {function} (from {factory})")]
    NotFound {
        function: String,
        factory: &'static str,
    },

    /// The host passed a null API table
    #[error("Host API table is null")]
    NullApi,

    /// Host already bound
    #[error("Host already bound")]
    AlreadyInitialized,
}

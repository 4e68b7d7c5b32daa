use crate::types::DbId;

/// Domain-level error type shared across the workspace.
///
/// The API layer maps each variant to an HTTP status and a stable
/// machine-readable code; see `vitrine-api`'s error module.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist (or is not visible to the caller).
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Entity kind, e.g. `"Campaign"`.
        entity: &'static str,
        /// The id that failed to resolve.
        id: DbId,
    },

    /// The request is structurally valid but semantically unacceptable.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation conflicts with current state (duplicate, lost race).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// No identity, or the presented credentials are invalid.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Identity present but not allowed to touch the target resource.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An external service (generation, storage) failed in a way that is
    /// surfaced to the caller rather than recovered locally.
    #[error("Upstream failure: {0}")]
    Upstream(String),

    /// Anything else. The message is logged, never sent to clients verbatim.
    #[error("Internal error: {0}")]
    Internal(String),
}

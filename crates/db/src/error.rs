/// Errors returned by the item store and repositories.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The addressed record is absent or tombstoned.
    #[error("labor line not found")]
    NotFound,

    /// A conditional write was rejected by the store.
    #[error("conditional check failed")]
    ConditionFailed,

    /// A stored item could not be decoded into a record.
    #[error("malformed item: {0}")]
    Codec(String),

    /// Any other store failure (network, throttling, permissions).
    #[error("store error: {0}")]
    Store(String),
}

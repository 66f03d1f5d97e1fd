/// Domain-level errors raised by the model and validator.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{0}")]
    Validation(String),
}

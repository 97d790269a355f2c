use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Entity not found: {entity} named '{name}'")]
    NotFoundNamed { entity: &'static str, name: String },

    /// A random draw or day-of generation found zero eligible rows.
    #[error("No eligible {entity} found for the given filter")]
    NoCandidates { entity: &'static str },

    #[error("Validation failed: {0}")]
    Validation(String),
}

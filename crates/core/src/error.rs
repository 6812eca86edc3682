use crate::types::EntityId;

/// Domain-level failure raised by the catalog services.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// One or more referenced ids do not resolve to stored rows. Nothing was
    /// written when this is returned.
    #[error("Invalid reference: unknown {entity} ids [{}]", .ids.join(", "))]
    InvalidReference {
        entity: &'static str,
        ids: Vec<String>,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error(transparent)]
    Store(StoreError),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid_reference<I, T>(entity: &'static str, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        Self::InvalidReference {
            entity,
            ids: ids.into_iter().map(|id| id.to_string()).collect(),
        }
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MissingReference { entity, ids } => Self::invalid_reference(entity, ids),
            other => Self::Store(other),
        }
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// Convenience alias for service return values.
pub type CoreResult<T> = Result<T, CoreError>;

/// Failure reported by a storage backend.
///
/// Backends translate their native errors into one of these variants so the
/// services stay independent of the driver in use.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write. Carries the constraint name.
    #[error("Duplicate value violates unique constraint: {0}")]
    Conflict(String),

    /// A write named rows that no longer exist. Nothing was stored.
    #[error("Missing {entity} rows: {ids:?}")]
    MissingReference {
        entity: &'static str,
        ids: Vec<EntityId>,
    },

    /// Any other backend failure, tagged with the store operation that failed.
    #[error("Storage error in {operation}: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },
}

impl StoreError {
    pub fn backend(operation: &'static str, message: impl ToString) -> Self {
        Self::Backend {
            operation,
            message: message.to_string(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

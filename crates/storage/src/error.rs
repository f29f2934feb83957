use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Turn a unique-constraint violation into a `ConstraintViolation` carrying
/// the message registered for the violated constraint. Errors that are not
/// unique violations, and violations of constraints not listed in `mapping`,
/// convert as plain database errors.
pub(crate) fn map_unique_violation(e: sqlx::Error, mapping: &[(&str, &str)]) -> StorageError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint();
            for (name, message) in mapping {
                if constraint == Some(name) {
                    return StorageError::ConstraintViolation((*message).to_string());
                }
            }
        }
    }
    StorageError::from(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_not_found() {
        assert_eq!(StorageError::NotFound.to_string(), "Not found");
    }

    #[test]
    fn test_display_constraint_violation() {
        let err = StorageError::ConstraintViolation("Slug already exists".to_string());
        assert_eq!(err.to_string(), "Constraint violation: Slug already exists");
    }
}

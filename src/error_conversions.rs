//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service/repository error types, so the
//! conversions live here. Service conversions are only compiled with the
//! `server` feature.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
mod service {
    use crate::domain::types::TypeConstraintError;
    use crate::forms::FormError;
    use crate::repository::errors::RepositoryError;
    use crate::services::ServiceError;

    impl From<TypeConstraintError> for ServiceError {
        fn from(val: TypeConstraintError) -> Self {
            ServiceError::Validation(val.to_string())
        }
    }

    impl From<FormError> for ServiceError {
        fn from(val: FormError) -> Self {
            match val {
                FormError::Validation(errors) => ServiceError::InvalidFields(errors),
                other => ServiceError::Validation(other.to_string()),
            }
        }
    }

    impl From<RepositoryError> for ServiceError {
        fn from(val: RepositoryError) -> Self {
            match val {
                RepositoryError::NotFound => ServiceError::NotFound,
                RepositoryError::UniqueViolation(_) => {
                    ServiceError::Validation("email is already registered".to_string())
                }
                RepositoryError::ConstraintViolation(message)
                | RepositoryError::ValidationError(message) => ServiceError::Validation(message),
                other => ServiceError::Persistence(other.to_string()),
            }
        }
    }

}

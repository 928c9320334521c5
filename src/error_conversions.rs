//! Error conversion glue between layers.
//!
//! The domain and form layers must not depend on service/repository error
//! types, so the conversions live here.

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;

impl From<TypeConstraintError> for FormError {
    fn from(_: TypeConstraintError) -> Self {
        FormError::InvalidName
    }
}

#[cfg(feature = "client")]
mod client {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::services::ServiceError;

    impl From<TypeConstraintError> for ServiceError {
        fn from(val: TypeConstraintError) -> Self {
            ServiceError::TypeConstraint(val.to_string())
        }
    }

    impl From<TypeConstraintError> for RepositoryError {
        fn from(val: TypeConstraintError) -> Self {
            RepositoryError::Validation(val.to_string())
        }
    }

    impl From<FormError> for ServiceError {
        fn from(val: FormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }
}

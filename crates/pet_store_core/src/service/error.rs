//! Service-level error type and its client-facing classification.

use crate::model::entity::{CustomerId, EmployeeId, PetStoreId};
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, PetStoreServiceError>;

/// Errors from pet store use-cases.
#[derive(Debug)]
pub enum PetStoreServiceError {
    /// No pet store with this id.
    PetStoreNotFound(PetStoreId),
    /// No employee with this id.
    EmployeeNotFound(EmployeeId),
    /// No customer with this id.
    CustomerNotFound(CustomerId),
    /// The entity exists but is attached to other stores than the one named
    /// in the request.
    PetStoreMismatch {
        requested: PetStoreId,
        linked: Vec<PetStoreId>,
    },
    /// Persistence-layer failure.
    Repo(RepoError),
}

/// Client-facing classification of a service error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStatus {
    NotFound,
    BadRequest,
    Internal,
}

impl ErrorStatus {
    /// HTTP-equivalent status code.
    pub fn code(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::BadRequest => 400,
            Self::Internal => 500,
        }
    }
}

impl PetStoreServiceError {
    pub fn status(&self) -> ErrorStatus {
        match self {
            Self::PetStoreNotFound(_) | Self::EmployeeNotFound(_) | Self::CustomerNotFound(_) => {
                ErrorStatus::NotFound
            }
            Self::PetStoreMismatch { .. } => ErrorStatus::BadRequest,
            Self::Repo(_) => ErrorStatus::Internal,
        }
    }
}

impl Display for PetStoreServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PetStoreNotFound(id) => write!(f, "no pet store where ID={id}"),
            Self::EmployeeNotFound(id) => write!(f, "no employee where ID={id}"),
            Self::CustomerNotFound(id) => write!(f, "no customer where ID={id}"),
            Self::PetStoreMismatch { requested, linked } => {
                let linked = linked
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                write!(
                    f,
                    "pet store ID={requested} does not match linked pet store ID(s) [{linked}]"
                )
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PetStoreServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for PetStoreServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                table: "pet_store",
                id,
            } => Self::PetStoreNotFound(id),
            RepoError::NotFound {
                table: "employee",
                id,
            } => Self::EmployeeNotFound(id),
            RepoError::NotFound {
                table: "customer",
                id,
            } => Self::CustomerNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<rusqlite::Error> for PetStoreServiceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorStatus, PetStoreServiceError};
    use crate::repo::RepoError;

    #[test]
    fn repo_not_found_maps_to_entity_specific_variant() {
        let err = PetStoreServiceError::from(RepoError::NotFound {
            table: "employee",
            id: 4,
        });
        assert!(matches!(err, PetStoreServiceError::EmployeeNotFound(4)));
        assert_eq!(err.status(), ErrorStatus::NotFound);
    }

    #[test]
    fn status_codes_follow_error_kind() {
        let not_found = PetStoreServiceError::PetStoreNotFound(9);
        let mismatch = PetStoreServiceError::PetStoreMismatch {
            requested: 1,
            linked: vec![2, 3],
        };
        let internal = PetStoreServiceError::Repo(RepoError::InvalidData("x".to_string()));

        assert_eq!(not_found.status().code(), 404);
        assert_eq!(mismatch.status().code(), 400);
        assert_eq!(internal.status().code(), 500);
    }

    #[test]
    fn messages_carry_failing_identity() {
        assert!(PetStoreServiceError::CustomerNotFound(42)
            .to_string()
            .contains("ID=42"));
        let mismatch = PetStoreServiceError::PetStoreMismatch {
            requested: 1,
            linked: vec![2, 3],
        };
        assert_eq!(
            mismatch.to_string(),
            "pet store ID=1 does not match linked pet store ID(s) [2,3]"
        );
    }
}

//! Error types for billing submissions

use common::error::RequestError;
use thiserror::Error;

/// Why a submission did not go through
#[derive(Error, Debug)]
pub enum SubmitError {
    /// Rejected before contacting the backend
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Request(#[from] RequestError),
}

impl SubmitError {
    /// The backend rejected the session; the redirect has already happened
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, SubmitError::Request(e) if e.is_unauthorized())
    }
}

pub type SubmitResult<T> = Result<T, SubmitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            SubmitError::Validation("Domain is required".to_string()).to_string(),
            "Domain is required"
        );

        let rejected = SubmitError::from(RequestError::Rejected {
            status: 404,
            message: "Bill not found".to_string(),
        });
        assert_eq!(rejected.to_string(), "Bill not found");
        assert!(!rejected.is_unauthorized());
        assert!(SubmitError::from(RequestError::Unauthorized).is_unauthorized());
    }
}

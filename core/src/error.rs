//! Error types for ballot validation.

use thiserror::Error;

/// All possible errors from validating ballot input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Candidate name required")]
    MissingCandidate,

    #[error("candidate must be a string")]
    CandidateNotText,

    #[error("candidate name must not be blank")]
    BlankCandidate,

    #[error("candidate name is {len} characters long, maximum is {max}")]
    CandidateTooLong { len: usize, max: usize },

    #[error("candidate name must not contain NUL characters")]
    CandidateHasNul,
}

/// Result type for ballot operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::MissingCandidate;
        assert_eq!(err.to_string(), "Candidate name required");

        let err = Error::CandidateTooLong { len: 300, max: 255 };
        assert_eq!(
            err.to_string(),
            "candidate name is 300 characters long, maximum is 255"
        );

        let err = Error::CandidateHasNul;
        assert_eq!(
            err.to_string(),
            "candidate name must not contain NUL characters"
        );
    }
}

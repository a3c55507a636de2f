//! Error types for tree construction and insertion.

use std::collections::TryReserveError;
use std::fmt;

/// The error type for [`BTree`](super::BTree) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The minimum degree is below [`MIN_DEGREE`](super::MIN_DEGREE), or so
    /// large that the node bounds overflow `usize`.
    InvalidConfiguration {
        /// The rejected minimum degree.
        minimum_degree: usize,
    },
    /// Node storage could not be allocated. The tree is left unchanged.
    ResourceExhaustion(TryReserveError),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration { minimum_degree } => write!(
                f,
                "invalid minimum degree {minimum_degree}: must be at least {}",
                super::MIN_DEGREE
            ),
            Self::ResourceExhaustion(_) => f.write_str("failed to allocate tree node"),
        }
    }
}

impl std::error::Error for TreeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidConfiguration { .. } => None,
            Self::ResourceExhaustion(err) => Some(err),
        }
    }
}

impl From<TryReserveError> for TreeError {
    fn from(err: TryReserveError) -> Self {
        Self::ResourceExhaustion(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_invalid_configuration() {
        let err = TreeError::InvalidConfiguration { minimum_degree: 1 };
        assert_eq!(
            err.to_string(),
            "invalid minimum degree 1: must be at least 2"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn test_resource_exhaustion_exposes_source() {
        let reserve_err = Vec::<u64>::new()
            .try_reserve_exact(usize::MAX)
            .unwrap_err();
        let err = TreeError::from(reserve_err);

        assert!(matches!(err, TreeError::ResourceExhaustion(_)));
        assert_eq!(err.to_string(), "failed to allocate tree node");
        assert!(err.source().is_some());
    }
}

use thiserror::Error;

/// Errors raised by the trigram index and its configuration layer
#[derive(Error, Debug)]
pub enum IndexError {
    /// The query yields no trigram, so no posting list can seed the candidates
    #[error("Query too short: {len} bytes given, at least 3 required")]
    QueryTooShort { len: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for index operations
pub type Result<T> = std::result::Result<T, IndexError>;

impl IndexError {
    /// Whether the error comes from caller input rather than a system fault
    pub fn is_caller_error(&self) -> bool {
        matches!(self, IndexError::QueryTooShort { .. } | IndexError::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IndexError::QueryTooShort { len: 2 };
        assert_eq!(
            err.to_string(),
            "Query too short: 2 bytes given, at least 3 required"
        );

        let err = IndexError::Config("bitset_threshold must be positive".to_string());
        assert!(err.to_string().contains("bitset_threshold"));
    }

    #[test]
    fn test_is_caller_error() {
        assert!(IndexError::QueryTooShort { len: 0 }.is_caller_error());
        assert!(IndexError::Config("bad".to_string()).is_caller_error());

        let io = IndexError::from(std::io::Error::other("disk"));
        assert!(!io.is_caller_error());
    }
}

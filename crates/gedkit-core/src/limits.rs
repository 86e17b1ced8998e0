//! Resource limits for id allocation and relationship search

/// Maximum candidate ids tried when allocating a fresh pointer (1,000,000)
pub const MAX_ID_ATTEMPTS: u32 = 1_000_000;

/// Default recursion depth for relationship search (256)
pub const DEFAULT_SEARCH_DEPTH: u32 = 256;

/// Maximum recursion depth accepted for relationship search (4096)
pub const MAX_SEARCH_DEPTH: u32 = 4096;

/// Validation error type
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    SearchDepthTooLarge { depth: u32, max: u32 },
    ZeroSearchDepth,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SearchDepthTooLarge { depth, max } => {
                write!(f, "Search depth too large: {} (max {})", depth, max)
            }
            Self::ZeroSearchDepth => write!(f, "Search depth must be at least 1"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate relationship search depth
pub fn validate_search_depth(depth: u32) -> Result<(), ValidationError> {
    if depth == 0 {
        return Err(ValidationError::ZeroSearchDepth);
    }
    if depth > MAX_SEARCH_DEPTH {
        return Err(ValidationError::SearchDepthTooLarge {
            depth,
            max: MAX_SEARCH_DEPTH,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_search_depth() {
        assert!(validate_search_depth(DEFAULT_SEARCH_DEPTH).is_ok());
        assert!(validate_search_depth(MAX_SEARCH_DEPTH).is_ok());
        assert_eq!(
            validate_search_depth(0),
            Err(ValidationError::ZeroSearchDepth)
        );
        assert!(validate_search_depth(MAX_SEARCH_DEPTH + 1).is_err());
    }
}

use std::fmt;

use gridwalk_core::ConfigError;

/// Errors returned by [`SearchEngine::start`](crate::SearchEngine::start).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The start/goal pair is out of bounds or coincident.
    InvalidConfiguration(ConfigError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration(e) => write!(f, "cannot start search: {e}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidConfiguration(e) => Some(e),
        }
    }
}

impl From<ConfigError> for SearchError {
    fn from(e: ConfigError) -> Self {
        Self::InvalidConfiguration(e)
    }
}

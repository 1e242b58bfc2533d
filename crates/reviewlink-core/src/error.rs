// crates/reviewlink-core/src/error.rs

use thiserror::Error;

/// Every failure the loader, the resolver or a provider can report.
///
/// Each variant carries a message meant for the end user: a UI can show
/// `to_string()` directly and pick its guidance text from [`Error::kind`].
/// The type is `Clone` because one load outcome is shared by every caller
/// waiting on the same attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("the maps library did not signal readiness within 10 seconds")]
    Timeout,

    #[error("failed to load the maps library: {0}")]
    LoadFailure(String),

    #[error("the maps library reported ready but the places API is missing")]
    IncompleteLoad,

    #[error("no place matched that search")]
    NoResults,

    #[error("several different businesses match that search; paste the place link instead")]
    AmbiguousDifferentNames,

    #[error("\"{name}\" has {count} locations; add the city or street address to narrow it down")]
    AmbiguousSameNameMultipleLocations { name: String, count: usize },

    /// Reported by the provider itself (bad key, quota, ...), passed on as is.
    #[error("{0}")]
    Provider(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("malformed provider response: {0}")]
    Decode(String),

    #[error("store error: {0}")]
    Store(String),
}

impl Error {
    /// Stable short name of the variant, for UIs that branch on the kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Timeout => "timeout",
            Error::LoadFailure(_) => "load_failure",
            Error::IncompleteLoad => "incomplete_load",
            Error::NoResults => "no_results",
            Error::AmbiguousDifferentNames => "ambiguous_different_names",
            Error::AmbiguousSameNameMultipleLocations { .. } => "ambiguous_same_name",
            Error::Provider(_) => "provider",
            Error::InvalidInput(_) => "invalid_input",
            Error::Http(_) => "http",
            Error::Decode(_) => "decode",
            Error::Store(_) => "store",
        }
    }

    /// `true` for the errors that ask the user to refine the query.
    pub fn is_ambiguity(&self) -> bool {
        matches!(
            self,
            Error::NoResults
                | Error::AmbiguousDifferentNames
                | Error::AmbiguousSameNameMultipleLocations { .. }
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Decode(e.to_string())
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Http(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

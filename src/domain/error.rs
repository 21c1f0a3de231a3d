//! Error types for cinelist.
//!
//! Two layers of errors live here. [`CatalogError`] is the classification a
//! [`CatalogClient`](crate::catalog::CatalogClient) reports for a failed remote
//! call. [`CinelistError`] is the crate-level error that wraps it together with
//! failures raised by the aggregator itself (out-of-range lookups, bad
//! configuration, I/O). Both are implemented with `thiserror`.

use thiserror::Error;

/// Classified failure of a remote catalog operation.
///
/// Transports map whatever went wrong onto one of these variants. Only
/// [`CatalogError::NoConnection`] changes aggregator behavior (it triggers the
/// offline search fallback); every other variant is surfaced and otherwise
/// ignored. Nothing is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No network path to the catalog.
    #[error("no network connection")]
    NoConnection,

    /// The request URL could not be built.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// The response carried no body.
    #[error("response contained no data")]
    NoData,

    /// The response body could not be decoded into the expected payload.
    #[error("response could not be decoded: {0}")]
    InvalidData(String),

    /// The credential was rejected (HTTP 401).
    #[error("request was not authorized")]
    Unauthorized,

    /// Generic transport failure. Carries a description of the underlying cause.
    #[error("request failed: {0}")]
    RequestFailed(String),
}

impl CatalogError {
    /// Returns `true` for the variant that signals lost connectivity.
    #[must_use]
    pub const fn is_no_connection(&self) -> bool {
        matches!(self, Self::NoConnection)
    }
}

/// The main error type for cinelist operations.
#[derive(Debug, Error)]
pub enum CinelistError {
    /// A remote catalog operation failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A positional lookup fell outside the visible list.
    ///
    /// Raised by detail lookups; never a panic.
    #[error("no item at index {index} (visible items: {len})")]
    NotFound {
        /// Requested index.
        index: usize,
        /// Length of the visible list at the time of the lookup.
        len: usize,
    },

    /// Configuration is invalid or could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CinelistError {
    /// Returns the wrapped catalog classification, if this is a catalog failure.
    #[must_use]
    pub const fn as_catalog(&self) -> Option<&CatalogError> {
        match self {
            Self::Catalog(err) => Some(err),
            _ => None,
        }
    }
}

/// A specialized `Result` type for cinelist operations.
pub type Result<T> = std::result::Result<T, CinelistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_errors_convert_into_crate_errors() {
        let err: CinelistError = CatalogError::Unauthorized.into();
        assert_eq!(err.as_catalog(), Some(&CatalogError::Unauthorized));
        assert_eq!(err.to_string(), "catalog error: request was not authorized");
    }

    #[test]
    fn not_found_describes_the_lookup() {
        let err = CinelistError::NotFound { index: 99, len: 5 };
        assert!(err.as_catalog().is_none());
        assert_eq!(err.to_string(), "no item at index 99 (visible items: 5)");
    }

    #[test]
    fn only_no_connection_is_flagged() {
        assert!(CatalogError::NoConnection.is_no_connection());
        assert!(!CatalogError::NoData.is_no_connection());
        assert!(!CatalogError::RequestFailed("timeout".into()).is_no_connection());
    }
}

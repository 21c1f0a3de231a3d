//! Catalog endpoint descriptions and response helpers for transports.
//!
//! A transport implementing [`CatalogClient`](super::CatalogClient) over HTTP
//! builds its URLs from [`CatalogRequest`], maps the HTTP status with
//! [`classify_status`] and decodes the body with [`decode_body`]. None of this
//! performs I/O.

use crate::domain::error::CatalogError;
use serde::de::DeserializeOwned;

/// One catalog endpoint call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogRequest {
    Popular { page: u32 },
    Search { query: String, page: u32 },
    Details { id: u64 },
    Media { id: u64 },
    Genres,
}

impl CatalogRequest {
    /// Endpoint path relative to the API base.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Popular { .. } => "movie/popular".to_string(),
            Self::Search { .. } => "search/movie".to_string(),
            Self::Details { id } => format!("movie/{id}"),
            Self::Media { id } => format!("movie/{id}/videos"),
            Self::Genres => "genre/movie/list".to_string(),
        }
    }

    /// Query parameters, always including `language`.
    #[must_use]
    pub fn parameters(&self, language: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![("language", language.to_string())];
        match self {
            Self::Popular { page } => params.push(("page", page.to_string())),
            Self::Search { query, page } => {
                params.push(("query", query.clone()));
                params.push(("page", page.to_string()));
            }
            Self::Details { .. } | Self::Media { .. } | Self::Genres => {}
        }
        params
    }

    /// Joins the API base with this endpoint's path.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidUrl`] when the base is not an absolute
    /// `http`/`https` URL.
    pub fn url(&self, api_base: &str) -> Result<String, CatalogError> {
        let base = api_base.trim();
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            return Err(CatalogError::InvalidUrl(base.to_string()));
        }
        Ok(format!("{}/{}", base.trim_end_matches('/'), self.path()))
    }
}

/// Maps an HTTP status code onto the error taxonomy.
///
/// Returns `None` for success codes.
#[must_use]
pub fn classify_status(status: u16) -> Option<CatalogError> {
    match status {
        200..=299 => None,
        401 => Some(CatalogError::Unauthorized),
        other => Some(CatalogError::RequestFailed(format!("unexpected HTTP status {other}"))),
    }
}

/// Decodes a JSON response body into a payload type.
///
/// # Errors
///
/// - [`CatalogError::NoData`] when the body is empty
/// - [`CatalogError::InvalidData`] when it does not match `T`
pub fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, CatalogError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(CatalogError::NoData);
    }
    serde_json::from_slice(body).map_err(|e| CatalogError::InvalidData(e.to_string()))
}

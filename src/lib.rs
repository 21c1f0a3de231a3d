//! cinelist: list aggregation for a movie catalog browser.
//!
//! cinelist is the engine behind a catalog browsing screen. It provides:
//! - Incremental paging through the popular listing and through search results
//! - Client-side sorting by name, year, rating or votes over fetched items
//! - Offline search over already loaded items when connectivity drops
//! - On-demand item details with latest-trailer lookup
//! - Genre name resolution for list rows

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Browser (worker/)                                  │  ← Async entry point
//! │  - Executes fetch plans against the catalog         │
//! │  - Routes failures to the notice sink               │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - ListAggregator, browsing modes                   │  ← No I/O
//! │  - Streams, pagination, sort engine                 │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────────────┐   ┌───────────────────────┐
//! │ Catalog (catalog/)    │   │ Details (details/)    │
//! │ - CatalogClient trait │   │ - DetailResolver      │
//! │ - Raw payloads        │   │ - Trailer selection   │
//! │ - MemoryCatalog       │   │                       │
//! └───────────────────────┘   └───────────────────────┘
//!         │                                     │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Data directory paths (infrastructure/)           │
//! │  - Error types (domain/error)                       │
//! │  - Item models, image URLs (domain/)                │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based JSON span export                      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Browsing state, modes, pagination and sorting
//! - [`catalog`]: Catalog client trait, payloads and in-memory backend
//! - [`details`]: Detail and trailer resolution
//! - [`domain`]: Core domain types (Item, errors)
//! - [`infrastructure`]: Platform paths
//! - [`worker`]: Async [`Browser`] driving the aggregator
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Configuration
//!
//! ```toml
//! api_base_url = "https://api.themoviedb.org/3/"
//! image_base_url = "https://image.tmdb.org/t/p"
//! language = "en"
//! page_size = 20
//! popular_page_cap = 500
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```rust
//! use cinelist::catalog::MemoryCatalog;
//! use cinelist::{initialize, Config, LogSink, PageOutcome};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(MemoryCatalog::new());
//! let mut browser = initialize(&Config::default(), catalog, Box::new(LogSink));
//!
//! let outcome = futures::executor::block_on(browser.get_items(false));
//! assert_eq!(outcome, PageOutcome::Appended { returned: 0, added: 0 });
//! assert!(!browser.can_load_more());
//! ```

pub mod app;
pub mod catalog;
pub mod details;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod worker;

pub use app::{
    BrowsingMode, ListAggregator, LogSink, Notice, NoticeSink, SortOption, StreamKind,
};
pub use catalog::{CatalogClient, GenreCatalog, MemoryCatalog};
pub use details::{DetailResolver, ResolvedDetails, Trailer};
pub use domain::{CatalogError, CinelistError, Item, ItemDetails, Result};
pub use worker::{Browser, FetchPlan, PageOutcome, PageRequest};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Engine configuration.
///
/// Loaded from a TOML file, a string map, or left at its defaults. Missing
/// keys keep their default value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog API base URL. Default: `https://api.themoviedb.org/3/`
    pub api_base_url: String,

    /// Image host base URL. Default: `https://image.tmdb.org/t/p`
    pub image_base_url: String,

    /// Trailer embed base URL. Default: `https://www.youtube.com/embed/`
    pub video_base_url: String,

    /// Language sent with every catalog request. Default: `"en"`
    pub language: String,

    /// Items per server page. Default: 20
    pub page_size: usize,

    /// Highest popular page ever requested. Default: 500
    pub popular_page_cap: u32,

    /// Initial search page cap, narrowed by the server's total. Default: 500
    pub search_page_cap: u32,

    /// Tracing filter directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error` or a full
    /// `EnvFilter` directive. Tracing stays off when unset.
    pub trace_level: Option<String>,

    /// Trace export path; `~` is expanded. Defaults to the data directory.
    pub trace_file: Option<String>,
}

const DEFAULT_PAGE_SIZE: usize = 20;
const DEFAULT_PAGE_CAP: u32 = 500;

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.themoviedb.org/3/".to_string(),
            image_base_url: "https://image.tmdb.org/t/p".to_string(),
            video_base_url: "https://www.youtube.com/embed/".to_string(),
            language: "en".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            popular_page_cap: DEFAULT_PAGE_CAP,
            search_page_cap: DEFAULT_PAGE_CAP,
            trace_level: None,
            trace_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from a string key/value map.
    ///
    /// # Parsing Rules
    ///
    /// - URL and language keys: taken as is when non-empty
    /// - `page_size`, `popular_page_cap`, `search_page_cap`: positive integers,
    ///   falling back to the default on parse errors or zero
    /// - `trace_level`, `trace_file`: copied when present
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use cinelist::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("language".to_string(), "de".to_string());
    /// map.insert("page_size".to_string(), "oops".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.language, "de");
    /// assert_eq!(config.page_size, 20);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let text = |key: &str, default: String| {
            map.get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map_or(default, str::to_string)
        };
        let positive = |key: &str| {
            map.get(key)
                .and_then(|value| value.trim().parse::<u32>().ok())
                .filter(|value| *value > 0)
        };

        Self {
            api_base_url: text("api_base_url", defaults.api_base_url),
            image_base_url: text("image_base_url", defaults.image_base_url),
            video_base_url: text("video_base_url", defaults.video_base_url),
            language: text("language", defaults.language),
            page_size: positive("page_size")
                .and_then(|value| usize::try_from(value).ok())
                .unwrap_or(defaults.page_size),
            popular_page_cap: positive("popular_page_cap").unwrap_or(defaults.popular_page_cap),
            search_page_cap: positive("search_page_cap").unwrap_or(defaults.search_page_cap),
            trace_level: map.get("trace_level").cloned(),
            trace_file: map.get("trace_file").cloned(),
        }
    }

    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`CinelistError::Config`] for malformed TOML, wrongly typed
    /// values or a zero `page_size`.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| CinelistError::Config(e.to_string()))?;
        if config.page_size == 0 {
            return Err(CinelistError::Config("page_size must be positive".to_string()));
        }
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`CinelistError::Io`] when the file cannot be read, otherwise
    /// the errors of [`Config::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = ?path, "loading configuration");
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

/// Wires a [`Browser`] for `client`.
///
/// Initializes tracing when `config.trace_level` is set.
///
/// # Parameters
///
/// * `config` - Engine configuration
/// * `client` - Catalog backend
/// * `sink` - Receiver of connectivity and failure notices
///
/// # Example
///
/// ```rust
/// use cinelist::{initialize, Config, MemoryCatalog, Notice};
/// use std::sync::{mpsc, Arc};
///
/// let (tx, _rx) = mpsc::channel::<Notice>();
/// let browser = initialize(&Config::default(), Arc::new(MemoryCatalog::new()), Box::new(tx));
/// assert!(browser.visible_items().is_empty());
/// ```
pub fn initialize(
    config: &Config,
    client: Arc<dyn CatalogClient>,
    sink: Box<dyn NoticeSink>,
) -> Browser {
    if config.trace_level.is_some() {
        observability::init_tracing(config);
    }
    tracing::debug!(
        page_size = config.page_size,
        popular_page_cap = config.popular_page_cap,
        "initializing cinelist"
    );

    Browser::new(
        client,
        ListAggregator::new(config, sink),
        DetailResolver::from_config(config),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn map_values_fall_back_to_defaults() {
        let map: BTreeMap<String, String> = [
            ("popular_page_cap", "0"),
            ("search_page_cap", "12"),
            ("api_base_url", "  "),
            ("trace_level", "debug"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = Config::from_map(&map);
        assert_eq!(config.popular_page_cap, 500);
        assert_eq!(config.search_page_cap, 12);
        assert_eq!(config.api_base_url, Config::default().api_base_url);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn toml_missing_keys_use_defaults() {
        let config = Config::from_toml_str("language = \"fr\"\npopular_page_cap = 3\n").unwrap();
        assert_eq!(config.language, "fr");
        assert_eq!(config.popular_page_cap, 3);
        assert_eq!(config.page_size, 20);
        assert_eq!(config.trace_file, None);
    }

    #[test]
    fn toml_rejects_bad_values() {
        assert!(matches!(
            Config::from_toml_str("page_size = 0"),
            Err(CinelistError::Config(_))
        ));
        assert!(matches!(
            Config::from_toml_str("page_size = \"twenty\""),
            Err(CinelistError::Config(_))
        ));
    }

    #[test]
    fn reads_config_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "video_base_url = \"https://videos.example/embed\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.video_base_url, "https://videos.example/embed");

        assert!(matches!(
            Config::from_file("/nonexistent/cinelist.toml"),
            Err(CinelistError::Io(_))
        ));
    }
}

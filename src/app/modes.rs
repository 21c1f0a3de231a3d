//! Browsing mode state machine.
//!
//! The aggregator is always in exactly one [`BrowsingMode`]. Transitions are
//! explicit methods returning the next mode, so every path through the state
//! machine is visible in one place:
//!
//! | from \ event     | `on_search(true)` | `on_search(false)` | `on_cancel` | `on_connection_lost` |
//! |------------------|-------------------|--------------------|-------------|----------------------|
//! | `Popular`        | `Search`          | `OfflineSearch`    | `Popular`   | `Popular`            |
//! | `Search`         | `Search`          | `OfflineSearch`    | `Popular`   | `OfflineSearch`      |
//! | `OfflineSearch`  | `Search`          | `OfflineSearch`    | `Popular`   | `OfflineSearch`      |
//!
//! # Example
//!
//! ```rust
//! use cinelist::app::BrowsingMode;
//!
//! let mode = BrowsingMode::Popular.on_search(true);
//! assert_eq!(mode, BrowsingMode::Search);
//! assert_eq!(mode.on_connection_lost(), BrowsingMode::OfflineSearch);
//! ```

/// Which stream feeds the visible list and how it is fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BrowsingMode {
    /// Paging through the popular listing.
    #[default]
    Popular,

    /// Paging through remote search results for the current query.
    Search,

    /// Searching without connectivity: the query filters the popular items
    /// already loaded.
    OfflineSearch,
}

/// The two item streams an aggregator keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Popular,
    Search,
}

impl BrowsingMode {
    /// Mode after a non-empty query is submitted.
    #[must_use]
    pub const fn on_search(self, connected: bool) -> Self {
        if connected {
            Self::Search
        } else {
            Self::OfflineSearch
        }
    }

    #[must_use]
    pub const fn on_cancel(self) -> Self {
        Self::Popular
    }

    /// Mode after a remote request failed for lack of connectivity.
    ///
    /// Only a remote search degrades; the popular listing simply reports the
    /// failure.
    #[must_use]
    pub const fn on_connection_lost(self) -> Self {
        match self {
            Self::Popular => Self::Popular,
            Self::Search | Self::OfflineSearch => Self::OfflineSearch,
        }
    }

    /// Stream backing this mode.
    #[must_use]
    pub const fn stream(self) -> StreamKind {
        match self {
            Self::Popular => StreamKind::Popular,
            Self::Search | Self::OfflineSearch => StreamKind::Search,
        }
    }

    #[must_use]
    pub const fn is_searching(self) -> bool {
        !matches!(self, Self::Popular)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_depends_on_connectivity() {
        for mode in [BrowsingMode::Popular, BrowsingMode::Search, BrowsingMode::OfflineSearch] {
            assert_eq!(mode.on_search(true), BrowsingMode::Search);
            assert_eq!(mode.on_search(false), BrowsingMode::OfflineSearch);
            assert_eq!(mode.on_cancel(), BrowsingMode::Popular);
        }
    }

    #[test]
    fn only_searches_degrade_on_connection_loss() {
        assert_eq!(BrowsingMode::Popular.on_connection_lost(), BrowsingMode::Popular);
        assert_eq!(BrowsingMode::Search.on_connection_lost(), BrowsingMode::OfflineSearch);
        assert_eq!(
            BrowsingMode::OfflineSearch.on_connection_lost(),
            BrowsingMode::OfflineSearch
        );
    }

    #[test]
    fn searches_share_the_search_stream() {
        assert_eq!(BrowsingMode::Popular.stream(), StreamKind::Popular);
        assert_eq!(BrowsingMode::Search.stream(), StreamKind::Search);
        assert_eq!(BrowsingMode::OfflineSearch.stream(), StreamKind::Search);
        assert!(!BrowsingMode::default().is_searching());
    }
}

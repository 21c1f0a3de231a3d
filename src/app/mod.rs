//! Application layer: browsing state and the rules that change it.
//!
//! This layer sits between the async [`Browser`](crate::worker::Browser) and
//! the domain types. It owns all list state and is free of I/O, which keeps
//! every transition testable without a catalog.
//!
//! # Architecture
//!
//! ```text
//! set_search / cancel_search / select_sort_option
//!            │
//!            ▼
//!     ListAggregator ──► begin_fetch ──► FetchPlan ──► (catalog) ──► complete_fetch
//!            │                                                           │
//!            └──────────── Notice (failures, connectivity) ◄────────────┘
//! ```
//!
//! # Modules
//!
//! - [`modes`]: Browsing mode state machine
//! - [`notices`]: Notices and the sink they are delivered to
//! - [`pagination`]: Per-stream page arithmetic
//! - [`sort`]: Sort options and the stable sort engine
//! - [`state`]: The [`ListAggregator`]
//! - [`stream`]: One listing's items in arrival and sorted order

pub mod modes;
pub mod notices;
pub mod pagination;
pub mod sort;
pub mod state;
pub mod stream;

pub use modes::{BrowsingMode, StreamKind};
pub use notices::{LogSink, Notice, NoticeSink};
pub use pagination::PaginationState;
pub use sort::{sort_items, SortOption};
pub use state::ListAggregator;
pub use stream::Stream;

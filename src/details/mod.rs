//! Detail view support: item details plus latest-trailer lookup.
//!
//! - [`resolver`]: [`DetailResolver`] fetching and converting details
//! - [`trailer`]: Trailer selection over media entries

pub mod resolver;
pub mod trailer;

pub use resolver::{DetailResolver, ResolvedDetails, Trailer};
pub use trailer::{parse_published_at, select_latest_trailer};

//! Item and item-details domain models.
//!
//! [`Item`] is the row type the list streams hold; [`ItemDetails`] is produced
//! on demand for the detail view. Both are immutable values created from raw
//! catalog payloads and never mutated afterwards.

use crate::catalog::models::{RawGenre, RawItem, RawItemDetails};
use crate::domain::image::{ImageBase, ImageSize};
use chrono::{Datelike, NaiveDate};

/// Date format used by the catalog for release dates.
const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Extracts the four-digit year from a release date string.
///
/// Returns an empty string when the date is missing or unparsable, which keeps
/// such items at the start of an ascending year sort.
///
/// # Examples
///
/// ```
/// use cinelist::domain::extract_year;
///
/// assert_eq!(extract_year("1989-06-23"), "1989");
/// assert_eq!(extract_year(""), "");
/// assert_eq!(extract_year("June 1989"), "");
/// ```
#[must_use]
pub fn extract_year(release_date: &str) -> String {
    NaiveDate::parse_from_str(release_date.trim(), RELEASE_DATE_FORMAT)
        .map(|date| format!("{:04}", date.year()))
        .unwrap_or_default()
}

/// A genre with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

impl From<RawGenre> for Genre {
    fn from(raw: RawGenre) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
        }
    }
}

/// One catalog entry as shown in a result list.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: u64,
    pub title: String,
    /// Four-digit year, or empty when the release date was unusable.
    pub year: String,
    pub rating: f64,
    pub votes: u32,
    /// Small-tier poster URL.
    pub poster_url: Option<String>,
    /// Medium-tier backdrop URL.
    pub backdrop_url: Option<String>,
    /// Genre identifiers, resolvable through a
    /// [`GenreCatalog`](crate::catalog::GenreCatalog).
    pub genre_ids: Vec<u32>,
    pub video: bool,
}

impl Item {
    /// Converts a raw list entry, building list-sized image URLs.
    #[must_use]
    pub fn from_raw(raw: RawItem, images: &ImageBase) -> Self {
        Self {
            id: raw.id,
            year: extract_year(&raw.release_date),
            poster_url: images.url(ImageSize::Small, raw.poster_path.as_deref()),
            backdrop_url: images.url(ImageSize::Medium, raw.backdrop_path.as_deref()),
            title: raw.title,
            rating: raw.rating,
            votes: raw.votes,
            genre_ids: raw.genre_ids,
            video: raw.video,
        }
    }

    /// Case-insensitive substring match of `query` against the title.
    ///
    /// `query` is expected to be lowercased already; the offline filter
    /// lowercases it once for the whole pass.
    #[must_use]
    pub fn title_contains(&self, lowered_query: &str) -> bool {
        self.title.to_lowercase().contains(lowered_query)
    }
}

/// Full details of one item for the detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDetails {
    pub id: u64,
    pub genres: Vec<Genre>,
    pub title: String,
    /// Production country names.
    pub countries: Vec<String>,
    pub year: String,
    pub rating: f64,
    pub votes: u32,
    pub overview: String,
    pub video: bool,
    /// Original-size poster URL.
    pub poster_url: Option<String>,
    /// Original-size backdrop URL.
    pub backdrop_url: Option<String>,
}

impl ItemDetails {
    /// Converts a raw details payload, building original-size image URLs.
    #[must_use]
    pub fn from_raw(raw: RawItemDetails, images: &ImageBase) -> Self {
        Self {
            id: raw.id,
            year: extract_year(&raw.release_date),
            poster_url: images.url(ImageSize::Original, raw.poster_path.as_deref()),
            backdrop_url: images.url(ImageSize::Original, raw.backdrop_path.as_deref()),
            genres: raw.genres.into_iter().map(Genre::from).collect(),
            countries: raw
                .production_countries
                .into_iter()
                .map(|country| country.name)
                .collect(),
            title: raw.title,
            rating: raw.rating,
            votes: raw.votes,
            overview: raw.overview,
            video: raw.video,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::RawCountry;

    fn images() -> ImageBase {
        ImageBase::new("https://img.example/t/p")
    }

    #[test]
    fn converts_raw_list_entries() {
        let raw = RawItem {
            id: 268,
            title: "Batman".into(),
            release_date: "1989-06-23".into(),
            rating: 7.2,
            votes: 7600,
            poster_path: Some("/p.jpg".into()),
            backdrop_path: Some("/b.jpg".into()),
            genre_ids: vec![14, 28],
            video: false,
        };

        let item = Item::from_raw(raw, &images());
        assert_eq!(item.year, "1989");
        assert_eq!(item.poster_url.as_deref(), Some("https://img.example/t/p/w780/p.jpg"));
        assert_eq!(item.backdrop_url.as_deref(), Some("https://img.example/t/p/w1280/b.jpg"));
        assert_eq!(item.genre_ids, vec![14, 28]);
    }

    #[test]
    fn converts_raw_details_with_original_images() {
        let raw = RawItemDetails {
            id: 7,
            title: "Heat".into(),
            release_date: "1995-12-15".into(),
            production_countries: vec![RawCountry {
                code: "US".into(),
                name: "United States of America".into(),
            }],
            genres: vec![RawGenre { id: 80, name: "Crime".into() }],
            overview: "A group of robbers...".into(),
            rating: 7.9,
            votes: 6000,
            video: false,
            poster_path: Some("/heat.jpg".into()),
            backdrop_path: None,
        };

        let details = ItemDetails::from_raw(raw, &images());
        assert_eq!(details.year, "1995");
        assert_eq!(details.countries, vec!["United States of America"]);
        assert_eq!(details.genres, vec![Genre { id: 80, name: "Crime".into() }]);
        assert_eq!(
            details.poster_url.as_deref(),
            Some("https://img.example/t/p/original/heat.jpg")
        );
        assert!(details.backdrop_url.is_none());
    }

    #[test]
    fn title_match_ignores_case() {
        let item = Item::from_raw(
            RawItem {
                id: 1,
                title: "The LEGO Batman Movie".into(),
                release_date: String::new(),
                rating: 0.0,
                votes: 0,
                poster_path: None,
                backdrop_path: None,
                genre_ids: vec![],
                video: false,
            },
            &images(),
        );
        assert!(item.title_contains("batman"));
        assert!(!item.title_contains("superman"));
        assert_eq!(item.year, "");
    }
}

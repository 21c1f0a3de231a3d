//! Raw catalog payload models.
//!
//! These are the wire-level shapes returned by a [`CatalogClient`](super::CatalogClient),
//! decoded with `serde` using the catalog's JSON field names. They are kept
//! separate from the domain types in [`crate::domain`] so that conversion (year
//! extraction, image URL building) happens in exactly one place.

use serde::{Deserialize, Serialize};

/// One item as it appears in a list or search page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    /// Catalog identifier.
    pub id: u64,

    /// Display title.
    #[serde(default)]
    pub title: String,

    /// Release date as sent by the server (`YYYY-MM-DD`, sometimes empty).
    #[serde(default)]
    pub release_date: String,

    /// Average rating.
    #[serde(default, rename = "vote_average")]
    pub rating: f64,

    /// Number of votes behind the rating.
    #[serde(default, rename = "vote_count")]
    pub votes: u32,

    /// Poster image path, relative to the image host.
    #[serde(default)]
    pub poster_path: Option<String>,

    /// Backdrop image path, relative to the image host.
    #[serde(default)]
    pub backdrop_path: Option<String>,

    /// Genre identifiers; names come from the genre list endpoint.
    #[serde(default)]
    pub genre_ids: Vec<u32>,

    /// Catalog flag marking video-only entries.
    #[serde(default)]
    pub video: bool,
}

/// One server page of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawItemPage {
    /// Items in server (popularity) order.
    #[serde(rename = "results", default)]
    pub items: Vec<RawItem>,

    /// Total pages the server reports for this listing.
    #[serde(default)]
    pub total_pages: Option<u32>,
}

/// A genre as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawGenre {
    /// Genre identifier referenced by [`RawItem::genre_ids`].
    pub id: u32,
    /// Human-readable name.
    pub name: String,
}

/// Response of the genre list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RawGenreList {
    /// All known genres.
    #[serde(default)]
    pub genres: Vec<RawGenre>,
}

/// A production country attached to item details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCountry {
    /// ISO 3166-1 code.
    #[serde(default, rename = "iso_3166_1")]
    pub code: String,
    /// Country name.
    pub name: String,
}

/// Full details of one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawItemDetails {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub production_countries: Vec<RawCountry>,
    #[serde(default)]
    pub genres: Vec<RawGenre>,
    #[serde(default)]
    pub overview: String,
    #[serde(default, rename = "vote_average")]
    pub rating: f64,
    #[serde(default, rename = "vote_count")]
    pub votes: u32,
    #[serde(default)]
    pub video: bool,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

/// One extended media entry (trailer, teaser, clip, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMediaEntry {
    /// Publish timestamp, e.g. `2020-01-01T17:00:00.000Z`.
    #[serde(default)]
    pub published_at: String,
    /// Hosting site tag, e.g. `YouTube`.
    #[serde(default)]
    pub site: String,
    /// Entry type tag, e.g. `Trailer` or `Teaser`.
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Site-specific reference key.
    #[serde(default)]
    pub key: String,
}

/// Response of the extended media endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RawMediaList {
    #[serde(rename = "results", default)]
    pub entries: Vec<RawMediaEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_results_page() {
        let json = r#"{
            "page": 1,
            "results": [{
                "id": 268,
                "title": "Batman",
                "release_date": "1989-06-23",
                "vote_average": 7.2,
                "vote_count": 7600,
                "poster_path": "/cij4dd21v2Rk2YtUQbV5kW69WB2.jpg",
                "backdrop_path": null,
                "genre_ids": [14, 28],
                "video": false
            }],
            "total_pages": 5,
            "total_results": 91
        }"#;

        let page: RawItemPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_pages, Some(5));
        assert_eq!(page.items.len(), 1);
        let item = &page.items[0];
        assert_eq!(item.id, 268);
        assert_eq!(item.votes, 7600);
        assert!(item.backdrop_path.is_none());
        assert_eq!(item.genre_ids, vec![14, 28]);
    }

    #[test]
    fn tolerates_missing_optional_fields() {
        let page: RawItemPage = serde_json::from_str(r#"{"results":[{"id":1}]}"#).unwrap();
        assert_eq!(page.total_pages, None);
        assert_eq!(page.items[0].title, "");
        assert_eq!(page.items[0].release_date, "");
    }

    #[test]
    fn media_entries_map_the_type_field() {
        let list: RawMediaList = serde_json::from_str(
            r#"{"id": 1, "results":[{"type":"Trailer","site":"YouTube","key":"abc","published_at":"2020-01-01T00:00:00.000Z"}]}"#,
        )
        .unwrap();
        assert_eq!(list.entries[0].kind, "Trailer");
        assert_eq!(list.entries[0].key, "abc");
    }
}

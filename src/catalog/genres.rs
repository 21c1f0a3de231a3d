//! Genre id → name lookup.

use crate::catalog::models::RawGenreList;
use crate::domain::Item;
use std::collections::HashMap;

/// Genre names keyed by id, built from the genre list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreCatalog {
    names: HashMap<u32, String>,
}

impl GenreCatalog {
    /// Creates an empty catalog; every lookup misses until a list is loaded.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cinelist::GenreCatalog;
    ///
    /// let genres = GenreCatalog::new();
    /// assert!(genres.is_empty());
    /// assert_eq!(genres.name(28), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of known genres.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// `true` before a genre list has been loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Looks up one genre name.
    ///
    /// # Parameters
    ///
    /// * `id` - Catalog genre id, as found in [`Item::genre_ids`]
    ///
    /// # Returns
    ///
    /// - `Some(name)` if the id is in the loaded list
    /// - `None` otherwise
    #[must_use]
    pub fn name(&self, id: u32) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Names for an item's genre ids, in the item's order.
    ///
    /// Unknown ids are skipped.
    ///
    /// # Parameters
    ///
    /// * `item` - List row whose `genre_ids` are resolved
    #[must_use]
    pub fn names_for<'a>(&'a self, item: &Item) -> Vec<&'a str> {
        item.genre_ids.iter().filter_map(|id| self.name(*id)).collect()
    }
}

impl From<RawGenreList> for GenreCatalog {
    fn from(list: RawGenreList) -> Self {
        Self {
            names: list.genres.into_iter().map(|g| (g.id, g.name)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::{RawGenre, RawItem};
    use crate::domain::ImageBase;

    #[test]
    fn names_known_genres_in_item_order() {
        let catalog = GenreCatalog::from(RawGenreList {
            genres: vec![
                RawGenre { id: 28, name: "Action".into() },
                RawGenre { id: 14, name: "Fantasy".into() },
            ],
        });
        let item = Item::from_raw(
            RawItem {
                id: 1,
                title: "Batman".into(),
                release_date: "1989-06-23".into(),
                rating: 7.2,
                votes: 10,
                poster_path: None,
                backdrop_path: None,
                genre_ids: vec![14, 99, 28],
                video: false,
            },
            &ImageBase::new("https://img.example"),
        );

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.names_for(&item), vec!["Fantasy", "Action"]);
        assert!(GenreCatalog::new().names_for(&item).is_empty());
    }
}

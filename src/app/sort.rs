//! Sort options and the sort engine.
//!
//! [`sort_items`] is a pure function: it never mutates its input and always
//! uses a stable sort, so items that compare equal keep their arrival order.
//! There is no secondary key.

use crate::domain::Item;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Ordering applied to the visible list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOption {
    /// Server order. Identity sort.
    #[default]
    Popularity,
    NameAscending,
    NameDescending,
    YearAscending,
    YearDescending,
    RatingAscending,
    RatingDescending,
    VotesAscending,
    VotesDescending,
}

impl SortOption {
    /// Every option, in menu order.
    pub const ALL: [Self; 9] = [
        Self::Popularity,
        Self::NameAscending,
        Self::NameDescending,
        Self::YearAscending,
        Self::YearDescending,
        Self::RatingAscending,
        Self::RatingDescending,
        Self::VotesAscending,
        Self::VotesDescending,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Popularity => "popularity",
            Self::NameAscending => "name-asc",
            Self::NameDescending => "name-desc",
            Self::YearAscending => "year-asc",
            Self::YearDescending => "year-desc",
            Self::RatingAscending => "rating-asc",
            Self::RatingDescending => "rating-desc",
            Self::VotesAscending => "votes-asc",
            Self::VotesDescending => "votes-desc",
        }
    }

    /// `true` for [`SortOption::Popularity`], where the raw stream is shown as is.
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Popularity)
    }

    fn compare(self, a: &Item, b: &Item) -> Ordering {
        match self {
            Self::Popularity => Ordering::Equal,
            Self::NameAscending => a.title.cmp(&b.title),
            Self::NameDescending => b.title.cmp(&a.title),
            Self::YearAscending => a.year.cmp(&b.year),
            Self::YearDescending => b.year.cmp(&a.year),
            Self::RatingAscending => a.rating.total_cmp(&b.rating),
            Self::RatingDescending => b.rating.total_cmp(&a.rating),
            Self::VotesAscending => a.votes.cmp(&b.votes),
            Self::VotesDescending => b.votes.cmp(&a.votes),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|option| option.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown sort option: {s}"))
    }
}

/// Returns `items` reordered by `option`.
///
/// # Example
///
/// ```
/// use cinelist::app::{sort_items, SortOption};
///
/// let sorted = sort_items(&[], SortOption::RatingDescending);
/// assert!(sorted.is_empty());
/// ```
#[must_use]
pub fn sort_items(items: &[Item], option: SortOption) -> Vec<Item> {
    let mut sorted = items.to_vec();
    if !option.is_default() {
        sorted.sort_by(|a, b| option.compare(a, b));
    }
    sorted
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn item(id: u64, title: &str, year: &str, rating: f64, votes: u32) -> Item {
        Item {
            id,
            title: title.to_string(),
            year: year.to_string(),
            rating,
            votes,
            poster_url: None,
            backdrop_url: None,
            genre_ids: Vec::new(),
            video: false,
        }
    }

    fn sample() -> Vec<Item> {
        vec![
            item(1, "Heat", "1995", 7.9, 900),
            item(2, "Alien", "1979", 8.1, 1200),
            item(3, "Zodiac", "2007", 7.5, 300),
            item(4, "Brazil", "", 7.8, 450),
        ]
    }

    fn ids(items: &[Item]) -> Vec<u64> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn popularity_is_identity() {
        let items = sample();
        assert_eq!(sort_items(&items, SortOption::Popularity), items);
    }

    #[test]
    fn sorting_is_idempotent() {
        let items = sample();
        for option in SortOption::ALL {
            let once = sort_items(&items, option);
            assert_eq!(sort_items(&once, option), once, "{option}");
        }
    }

    #[test]
    fn ascending_reversed_equals_descending() {
        let items = sample();
        let pairs = [
            (SortOption::NameAscending, SortOption::NameDescending),
            (SortOption::YearAscending, SortOption::YearDescending),
            (SortOption::RatingAscending, SortOption::RatingDescending),
            (SortOption::VotesAscending, SortOption::VotesDescending),
        ];
        for (asc, desc) in pairs {
            let mut reversed = sort_items(&items, asc);
            reversed.reverse();
            assert_eq!(reversed, sort_items(&items, desc), "{asc}");
        }
    }

    #[test]
    fn comparators_use_their_fields() {
        let items = sample();
        assert_eq!(ids(&sort_items(&items, SortOption::NameAscending)), vec![2, 4, 1, 3]);
        assert_eq!(ids(&sort_items(&items, SortOption::YearAscending)), vec![4, 2, 1, 3]);
        assert_eq!(ids(&sort_items(&items, SortOption::RatingDescending)), vec![2, 1, 4, 3]);
        assert_eq!(ids(&sort_items(&items, SortOption::VotesAscending)), vec![3, 4, 1, 2]);
    }

    #[test]
    fn ties_keep_input_order() {
        let items = vec![
            item(1, "A", "2000", 7.0, 10),
            item(2, "B", "2000", 7.0, 10),
            item(3, "C", "1999", 7.0, 10),
        ];
        assert_eq!(ids(&sort_items(&items, SortOption::YearDescending)), vec![1, 2, 3]);
        assert_eq!(ids(&sort_items(&items, SortOption::RatingAscending)), vec![1, 2, 3]);
    }

    #[test]
    fn parses_option_names() {
        for option in SortOption::ALL {
            assert_eq!(option.as_str().parse::<SortOption>(), Ok(option));
        }
        assert_eq!("Rating-Desc".parse(), Ok(SortOption::RatingDescending));
        assert!("shuffle".parse::<SortOption>().is_err());
    }
}

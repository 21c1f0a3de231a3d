//! Image URL construction.
//!
//! The catalog returns image references as bare paths (`/kqjL17yufvn9OVLyXYpvtyrFfak.jpg`).
//! Displayable URLs are produced by joining a fixed base, a size tier and the
//! path. This is a pure string operation; nothing here touches the network.

/// Size tier requested from the image host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSize {
    /// List thumbnails (posters in result rows).
    Small,
    /// List backdrops.
    Medium,
    /// Full resolution, used by the detail view.
    Original,
}

impl ImageSize {
    /// Path segment the image host expects for this tier.
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Small => "w780",
            Self::Medium => "w1280",
            Self::Original => "original",
        }
    }
}

/// Base location of the image host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBase {
    base_url: String,
}

impl ImageBase {
    /// Creates an image base from a URL such as `https://image.tmdb.org/t/p`.
    ///
    /// Trailing slashes are ignored.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Joins base, size tier and path.
    ///
    /// Returns `None` when the catalog did not provide a path (or provided an
    /// empty one), so callers can fall back to a placeholder.
    ///
    /// # Example
    ///
    /// ```
    /// use cinelist::domain::{ImageBase, ImageSize};
    ///
    /// let base = ImageBase::new("https://image.tmdb.org/t/p/");
    /// assert_eq!(
    ///     base.url(ImageSize::Small, Some("/poster.jpg")).as_deref(),
    ///     Some("https://image.tmdb.org/t/p/w780/poster.jpg")
    /// );
    /// assert_eq!(base.url(ImageSize::Original, None), None);
    /// ```
    #[must_use]
    pub fn url(&self, size: ImageSize, path: Option<&str>) -> Option<String> {
        let path = path.map(|p| p.trim_start_matches('/')).filter(|p| !p.is_empty())?;
        Some(format!("{}/{}/{path}", self.base_url, size.segment()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_each_size_tier() {
        let base = ImageBase::new("https://img.example/t/p");
        assert_eq!(
            base.url(ImageSize::Medium, Some("/b.jpg")).as_deref(),
            Some("https://img.example/t/p/w1280/b.jpg")
        );
        assert_eq!(
            base.url(ImageSize::Original, Some("b.jpg")).as_deref(),
            Some("https://img.example/t/p/original/b.jpg")
        );
    }

    #[test]
    fn empty_paths_produce_no_url() {
        let base = ImageBase::new("https://img.example/t/p");
        assert_eq!(base.url(ImageSize::Small, Some("")), None);
        assert_eq!(base.url(ImageSize::Small, Some("/")), None);
    }
}

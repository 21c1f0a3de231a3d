//! On-demand detail resolution.

use crate::catalog::client::{CatalogClient, CatalogResult};
use crate::details::trailer::select_latest_trailer;
use crate::domain::{ImageBase, ItemDetails};
use crate::Config;
use chrono::{DateTime, Utc};
use futures_util::future::try_join;

/// A playable trailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trailer {
    /// Site-specific video key.
    pub key: String,
    pub published_at: DateTime<Utc>,
    /// Embed URL built from the configured video base.
    pub url: String,
}

/// Everything the detail view needs for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDetails {
    pub details: ItemDetails,
    /// `None` when the item has no usable trailer.
    pub trailer: Option<Trailer>,
}

/// Fetches and converts item details and trailers.
///
/// Holds no list state and caches nothing; every call goes to the catalog.
#[derive(Debug, Clone)]
pub struct DetailResolver {
    images: ImageBase,
    video_base_url: String,
}

impl DetailResolver {
    #[must_use]
    pub fn new(images: ImageBase, video_base_url: impl Into<String>) -> Self {
        Self {
            images,
            video_base_url: video_base_url.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(ImageBase::new(&config.image_base_url), &config.video_base_url)
    }

    /// Embed URL for a video key.
    #[must_use]
    pub fn trailer_url(&self, key: &str) -> String {
        format!(
            "{}/{}",
            self.video_base_url.trim_end_matches('/'),
            key.trim_start_matches('/')
        )
    }

    /// Fetches one item's details.
    ///
    /// # Errors
    ///
    /// Returns the catalog failure unchanged.
    pub async fn details(&self, client: &dyn CatalogClient, id: u64) -> CatalogResult<ItemDetails> {
        let raw = client.details(id).await?;
        Ok(ItemDetails::from_raw(raw, &self.images))
    }

    /// Looks up the item's latest trailer.
    ///
    /// # Errors
    ///
    /// Returns the catalog failure unchanged. Having no trailer is not an error.
    pub async fn latest_trailer(
        &self,
        client: &dyn CatalogClient,
        id: u64,
    ) -> CatalogResult<Option<Trailer>> {
        let media = client.media(id).await?;
        let trailer = select_latest_trailer(&media.entries).map(|(entry, published_at)| Trailer {
            url: self.trailer_url(&entry.key),
            key: entry.key.clone(),
            published_at,
        });

        tracing::debug!(
            id = id,
            entries = media.entries.len(),
            found = trailer.is_some(),
            "trailer lookup finished"
        );
        Ok(trailer)
    }

    /// Fetches details and trailer together.
    ///
    /// # Errors
    ///
    /// Fails if either request fails; no partial result is produced.
    pub async fn resolve(
        &self,
        client: &dyn CatalogClient,
        id: u64,
    ) -> CatalogResult<ResolvedDetails> {
        let (details, trailer) =
            try_join(self.details(client, id), self.latest_trailer(client, id)).await?;
        Ok(ResolvedDetails { details, trailer })
    }
}

//! Client core for the portfolio: store access, collection fetchers and the
//! blog detail overlay.

use std::sync::Arc;

use tracing::warn;

pub mod config;
pub mod fetcher;
pub mod overlay;
pub mod store;

pub use config::{load_settings, Settings};
pub use fetcher::{fetch_collection, FetchSnapshot, FetchState, ListFetcher};
pub use overlay::{BlogPostOverlay, DetailOverlayController};
pub use store::{RemoteStore, RestStore, StoreConfigError, UnconfiguredStore};

/// Builds the store described by `settings`. Incomplete or invalid settings
/// produce an [`UnconfiguredStore`] so callers still render empty sections.
pub fn store_from_settings(settings: &Settings) -> Arc<dyn RemoteStore> {
    match RestStore::from_settings(settings) {
        Ok(store) => Arc::new(store),
        Err(error) => {
            warn!(%error, "remote store unavailable; collections will be empty");
            Arc::new(UnconfiguredStore::new(error.to_string()))
        }
    }
}

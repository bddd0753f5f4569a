//! Scryfall call sites
//!
//! [`ScryfallClient`] binds the paged collector to the card-data endpoints:
//! set-code searches, single-card lookups, and rulings. It is generic over the
//! fetch capability so the same client runs against a stub in tests.

mod types;

pub use types::{Card, CardPrices, Ruling};

use crate::config::ApiConfig;
use crate::fetch::{Fetch, HttpFetcher};
use crate::paging::{collect_all_until, fetch_json};
use crate::query::{card_locator, rulings_locator, search_locator};
use crate::Result;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Client for the Scryfall card-data API
#[derive(Debug, Clone)]
pub struct ScryfallClient<F = HttpFetcher> {
    fetcher: F,
    base_url: Url,
    cancel: CancellationToken,
}

impl ScryfallClient<HttpFetcher> {
    /// Creates a client talking HTTP to the configured API root
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        let fetcher = HttpFetcher::new(config)?;
        Ok(Self::with_fetcher(fetcher, base_url))
    }
}

impl<F> ScryfallClient<F>
where
    F: Fetch + Sync,
{
    /// Creates a client around an arbitrary fetch capability
    pub fn with_fetcher(fetcher: F, base_url: Url) -> Self {
        Self {
            fetcher,
            base_url,
            cancel: CancellationToken::new(),
        }
    }

    /// Replaces the token that aborts in-flight collections
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Collects every item of a paginated list endpoint
    pub async fn fetch_all<T: DeserializeOwned>(&self, locator: &str) -> Result<Vec<T>> {
        let items: Vec<T> = collect_all_until(locator, &self.fetcher, &self.cancel).await?;
        tracing::info!(locator, count = items.len(), "collected list");
        Ok(items)
    }

    /// Fetches every card printed in any of the given sets
    ///
    /// # Arguments
    ///
    /// * `codes` - Set codes, e.g. `["BLB", "SPG"]`
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Card>)` - All matching cards in search order
    /// * `Err(CrackError)` - Invalid set code, or any page failed
    pub async fn cards_for_codes<S: AsRef<str>>(&self, codes: &[S]) -> Result<Vec<Card>> {
        let locator = search_locator(&self.base_url, codes)?;
        self.fetch_all(&locator).await
    }

    /// Fetches a single card by set code and collector number
    pub async fn card(&self, set_code: &str, number: &str) -> Result<Card> {
        let locator = card_locator(&self.base_url, set_code, number)?;
        let card: Card = fetch_json(&locator, &self.fetcher, &self.cancel).await?;
        tracing::info!(locator = %locator, name = %card.name, "fetched card");
        Ok(card)
    }

    /// Fetches all rulings for a card id
    pub async fn rulings(&self, card_id: &str) -> Result<Vec<Ruling>> {
        let locator = rulings_locator(&self.base_url, card_id)?;
        self.fetch_all(&locator).await
    }
}

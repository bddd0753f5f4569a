//! Paged collection
//!
//! Walks a cursor-linked chain of pages one retrieval at a time and
//! concatenates their items in visitation order. Any failure aborts the whole
//! collection; partial results are dropped with the vector.

use crate::fetch::{Fetch, RawResponse};
use crate::paging::Page;
use crate::{CrackError, Result};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

/// Collects every item reachable from `start`
///
/// # Arguments
///
/// * `start` - Locator of the first page
/// * `fetcher` - Capability performing one retrieval per page
///
/// # Returns
///
/// * `Ok(Vec<T>)` - All items, page by page, in server order
/// * `Err(CrackError)` - Transport, status, or page-shape failure on any page
pub async fn collect_all<T, F>(start: &str, fetcher: &F) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    F: Fetch + Sync,
{
    collect_all_until(start, fetcher, &CancellationToken::new()).await
}

/// Like [`collect_all`], but gives up as soon as `cancel` fires
///
/// The token is raced against every retrieval. A cancelled collection
/// returns [`CrackError::Cancelled`] naming the page that was in flight.
pub async fn collect_all_until<T, F>(
    start: &str,
    fetcher: &F,
    cancel: &CancellationToken,
) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    F: Fetch + Sync,
{
    if start.is_empty() {
        return Err(CrackError::EmptyLocator);
    }

    let mut items = Vec::new();
    let mut current = Some(start.to_string());

    while let Some(locator) = current.take() {
        let page: Page<T> = fetch_json(&locator, fetcher, cancel).await?;

        current = page.continuation(&locator)?.map(str::to_string);

        items.extend(page.data);
    }

    Ok(items)
}

/// Performs one retrieval and parses the body as `T`
///
/// A non-success status becomes [`CrackError::UpstreamStatus`] carrying the
/// failing locator and whatever JSON the body held (`{}` if none). A body
/// that does not parse as `T` becomes [`CrackError::MalformedPage`].
pub async fn fetch_json<T, F>(locator: &str, fetcher: &F, cancel: &CancellationToken) -> Result<T>
where
    T: DeserializeOwned,
    F: Fetch + Sync,
{
    if locator.is_empty() {
        return Err(CrackError::EmptyLocator);
    }

    let response = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            return Err(CrackError::Cancelled {
                locator: locator.to_string(),
            });
        }
        response = fetcher.fetch(locator) => response?,
    };

    check_status(locator, &response)?;

    response.json().map_err(|e| CrackError::MalformedPage {
        locator: locator.to_string(),
        message: e.to_string(),
    })
}

fn check_status(locator: &str, response: &RawResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }

    let details = response
        .json::<serde_json::Value>()
        .unwrap_or_else(|_| serde_json::Value::Object(serde_json::Map::new()));

    Err(CrackError::UpstreamStatus {
        status: response.status,
        status_text: response.status_text.clone(),
        locator: locator.to_string(),
        details,
    })
}

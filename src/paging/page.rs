use crate::{CrackError, Result};
use serde::Deserialize;

/// One page of a cursor-paginated list
///
/// `has_more` decides whether collection continues; `next_page` only says
/// where. `total_cards` is advisory and never used to size or check results.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub has_more: bool,
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub total_cards: Option<u64>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl<T> Page<T> {
    /// Locator of the following page, if collection should continue
    ///
    /// `locator` names this page in the error raised when it claims more
    /// results but gives no usable `next_page`.
    pub(crate) fn continuation(&self, locator: &str) -> Result<Option<&str>> {
        if !self.has_more {
            return Ok(None);
        }
        match self.next_page.as_deref() {
            Some(next) if !next.trim().is_empty() => Ok(Some(next)),
            _ => Err(CrackError::MalformedPage {
                locator: locator.to_string(),
                message: "has_more is true but next_page is missing".to_string(),
            }),
        }
    }
}

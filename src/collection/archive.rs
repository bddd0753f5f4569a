//! In-memory card collection
//!
//! An [`Archive`] maps a lowercase set code to the printings owned from that
//! set. Each printing is kept once per finish, with a count; adding the same
//! printing again bumps the count and removing the last copy drops the entry.

use crate::scryfall::Card;
use crate::{CollectionError, CollectionResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A card together with how many copies are owned and in which finish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectedCard {
    #[serde(flatten)]
    pub card: Card,
    #[serde(default = "one")]
    pub count: u32,
    #[serde(default)]
    pub foil: bool,
}

fn one() -> u32 {
    1
}

impl From<Card> for CollectedCard {
    fn from(card: Card) -> Self {
        Self {
            card,
            count: 1,
            foil: false,
        }
    }
}

/// Owned cards, grouped by set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Archive(BTreeMap<String, Vec<CollectedCard>>);

impl Archive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one copy of `card`; returns the resulting count of that printing
    pub fn add(&mut self, card: Card, foil: bool) -> u32 {
        let list = self.0.entry(set_key(&card)).or_default();

        let count = match list
            .iter_mut()
            .find(|owned| owned.foil == foil && same_printing(&owned.card, &card))
        {
            Some(owned) => {
                owned.count += 1;
                owned.count
            }
            None => {
                list.push(CollectedCard {
                    card,
                    count: 1,
                    foil,
                });
                1
            }
        };
        list.sort_by(|a, b| collector_order(&a.card, &b.card));

        count
    }

    /// Removes one copy of `card`; returns how many copies remain
    ///
    /// The printing is dropped when its last copy goes, and the set is
    /// dropped when its last printing goes.
    pub fn remove(&mut self, card: &Card, foil: bool) -> CollectionResult<u32> {
        let set = set_key(card);
        let not_owned = || CollectionError::NotInCollection(card.name.clone());

        let list = self.0.get_mut(&set).ok_or_else(not_owned)?;
        let position = list
            .iter()
            .position(|owned| owned.foil == foil && same_printing(&owned.card, card))
            .ok_or_else(not_owned)?;

        let remaining = if list[position].count <= 1 {
            list.remove(position);
            0
        } else {
            list[position].count -= 1;
            list[position].count
        };

        if list.is_empty() {
            self.0.remove(&set);
        }

        Ok(remaining)
    }

    /// All owned printings, by set code and then collector number
    pub fn cards(&self) -> impl Iterator<Item = &CollectedCard> {
        self.0.values().flatten()
    }

    /// Printings owned from one set
    pub fn set(&self, code: &str) -> &[CollectedCard] {
        self.0
            .get(&code.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of owned copies across all printings
    pub fn total_count(&self) -> u32 {
        self.cards().map(|owned| owned.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serializes the archive with one card object per line
    pub fn to_json(&self) -> serde_json::Result<String> {
        if self.0.is_empty() {
            return Ok("{}\n".to_string());
        }

        let mut output = String::from("{\n");
        for (i, (set, cards)) in self.0.iter().enumerate() {
            if i > 0 {
                output.push_str(",\n");
            }
            output.push_str(&format!("  {}: [\n", serde_json::to_string(set)?));
            for (j, owned) in cards.iter().enumerate() {
                if j > 0 {
                    output.push_str(",\n");
                }
                output.push_str("    ");
                output.push_str(&serde_json::to_string(owned)?);
            }
            output.push_str("\n  ]");
        }
        output.push_str("\n}\n");

        Ok(output)
    }
}

fn set_key(card: &Card) -> String {
    card.set.as_deref().unwrap_or("").to_ascii_lowercase()
}

/// Same Scryfall id when both sides have one, otherwise same name and number
fn same_printing(a: &Card, b: &Card) -> bool {
    if !a.id.is_empty() && !b.id.is_empty() {
        return a.id == b.id;
    }
    a.name == b.name && a.collector_number == b.collector_number
}

/// Orders collector numbers numerically first (`2` before `10`), then textually
fn collector_order(a: &Card, b: &Card) -> Ordering {
    let a = a.collector_number.as_deref().unwrap_or("");
    let b = b.collector_number.as_deref().unwrap_or("");
    leading_number(a)
        .cmp(&leading_number(b))
        .then_with(|| a.cmp(b))
}

fn leading_number(number: &str) -> Option<u64> {
    let digits: String = number.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

//! Parser for the compact card-entry syntax
//!
//! A line is `[-]<collector number>[f] [set code]`: `12 dsk` adds a copy,
//! `12f dsk` adds a foil copy and `-12 dsk` removes one. The set code may be
//! left out when a default was given on start-up; a set code on the line
//! always wins over the default.

use crate::query::validate_set_code;
use crate::{CollectionError, CollectionResult};

/// One parsed entry line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdditionInput {
    pub card_number: String,
    pub set_code: String,
    pub foil: bool,
    pub removal: bool,
}

/// Parses a single entry line
pub fn parse_addition_input(
    input: &str,
    default_set: Option<&str>,
) -> CollectionResult<AdditionInput> {
    let mut words = input.split_ascii_whitespace();

    let mut number = words
        .next()
        .ok_or_else(|| CollectionError::InvalidInput("empty input".to_string()))?;
    let set_code = words.next();

    if words.next().is_some() {
        return Err(CollectionError::InvalidInput(format!(
            "expected '<number> [set code]', got '{}'",
            input.trim()
        )));
    }

    let mut result = AdditionInput::default();

    if let Some(rest) = number.strip_prefix('-') {
        result.removal = true;
        number = rest;
    }
    if let Some(rest) = number.strip_suffix('f') {
        result.foil = true;
        number = rest;
    }

    if number.is_empty() || !number.chars().all(is_collector_char) {
        return Err(CollectionError::InvalidInput(format!(
            "collector number (first word) is not valid: '{}'",
            number
        )));
    }
    result.card_number = number.to_string();

    let set_code = set_code.or(default_set).ok_or_else(|| {
        CollectionError::InvalidInput(
            "no set code was given on start-up or in the input".to_string(),
        )
    })?;
    validate_set_code(set_code).map_err(|_| {
        CollectionError::InvalidInput(format!(
            "set code (second word) is not alphanumeric: '{}'",
            set_code
        ))
    })?;
    result.set_code = set_code.to_string();

    Ok(result)
}

/// Collector numbers are alphanumeric, with `★` marking some promo printings
fn is_collector_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '★'
}

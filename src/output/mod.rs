//! Output module for rendering collected cards and rulings
//!
//! This module handles:
//! - Deck-list export, as accepted by Arena, Moxfield et al.
//! - Collection export with per-printing counts and foil markers
//! - Moxfield collection CSV export
//! - Plain JSON dumps
//! - Writing the rendered text to a file or stdout

mod formats;

pub use formats::{format_as_deck_list, format_as_moxfield_csv, format_rulings};

use crate::collection::{Archive, CollectedCard};
use crate::scryfall::{Card, Ruling};
use crate::Result;
use serde::Deserialize;
use std::io::Write;
use std::path::Path;

/// Supported export formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `1 Name (SET) 123` per printing
    #[default]
    Deck,
    /// Moxfield collection CSV
    Csv,
    /// Pretty-printed JSON array
    Json,
}

/// Renders fetched cards, one non-foil copy each
pub fn render_cards(cards: &[Card], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(cards)?);
    }

    let owned: Vec<CollectedCard> = cards.iter().cloned().map(CollectedCard::from).collect();
    Ok(render_collected(&owned, format))
}

/// Renders a collection; JSON keeps the per-set layout of the collection file
pub fn render_collection(archive: &Archive, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(archive.to_json()?);
    }

    let owned: Vec<CollectedCard> = archive.cards().cloned().collect();
    Ok(render_collected(&owned, format))
}

fn render_collected(cards: &[CollectedCard], format: OutputFormat) -> String {
    match format {
        OutputFormat::Csv => format_as_moxfield_csv(cards),
        OutputFormat::Deck | OutputFormat::Json => format_as_deck_list(cards),
    }
}

/// Renders rulings; deck and CSV formats share the plain text layout
pub fn render_rulings(rulings: &[Ruling], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Deck | OutputFormat::Csv => Ok(format_rulings(rulings)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rulings)?),
    }
}

/// Writes rendered output to `path`, or to stdout when no path is given
pub fn write_output(content: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)?;
            tracing::info!("Wrote output to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
        }
    }
    Ok(())
}

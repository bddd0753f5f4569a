//! Text export formats
//!
//! Each line is one printing in one finish, with the number of copies owned.
//! Cards straight from a set listing count as a single non-foil copy.

use crate::collection::CollectedCard;
use crate::scryfall::Ruling;

/// Formats cards as a deck list: `2 Name (SET) 123`, with ` *F*` for foils
///
/// Fields Scryfall did not return are left out of the line.
pub fn format_as_deck_list(cards: &[CollectedCard]) -> String {
    let mut output = String::new();

    for owned in cards {
        let card = &owned.card;
        let mut line = format!("{} {}", owned.count, card.name);
        if let Some(set) = &card.set {
            line.push_str(&format!(" ({})", set.to_ascii_uppercase()));
        }
        if let Some(number) = &card.collector_number {
            line.push_str(&format!(" {}", number));
        }
        if owned.foil {
            line.push_str(" *F*");
        }
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Exports cards as a Moxfield-compatible CSV. Documentation can be found
/// here: https://moxfield.com/help/importing-collection
pub fn format_as_moxfield_csv(cards: &[CollectedCard]) -> String {
    let mut output = String::new();
    output.push_str("\"Count\",\"Name\",\"Collector Number\",\"Edition\",\"Foil\"\n");

    for owned in cards {
        let card = &owned.card;
        output.push_str(&format!(
            "\"{}\",\"{}\",\"{}\",\"{}\",\"{}\"\n",
            owned.count,
            csv_escape(&card.name),
            csv_escape(card.collector_number.as_deref().unwrap_or("")),
            csv_escape(card.set.as_deref().unwrap_or("")),
            if owned.foil { "foil" } else { "" },
        ));
    }

    output
}

/// Formats rulings as `<date> [<source>] <comment>` lines
pub fn format_rulings(rulings: &[Ruling]) -> String {
    let mut output = String::new();

    for ruling in rulings {
        output.push_str(&format!(
            "{} [{}] {}\n",
            ruling.published_at, ruling.source, ruling.comment
        ));
    }

    output
}

fn csv_escape(field: &str) -> String {
    field.replace('"', "\"\"")
}

//! Booster-Crack main entry point
//!
//! This is the command-line interface for browsing Scryfall card sets and
//! keeping a local card collection.

use anyhow::Context;
use booster_crack::collection::{parse_addition_input, read_archive, CollectionStore};
use booster_crack::config::{load_config, Config};
use booster_crack::output::{
    render_cards, render_collection, render_rulings, write_output, OutputFormat,
};
use booster_crack::query::search_locator;
use booster_crack::{Card, CollectionError, CrackError, ScryfallClient};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Booster-Crack: browse and export Scryfall card sets
///
/// Fetches every card of one or more sets through Scryfall's paginated
/// search, looks up single cards and their rulings, keeps a local collection
/// with per-printing counts, and exports the result as a deck list, Moxfield
/// CSV, or JSON.
#[derive(Parser, Debug)]
#[command(name = "booster-crack")]
#[command(version)]
#[command(about = "Browse and export Scryfall card sets", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch every card printed in the given sets
    Search {
        /// Set codes, e.g. BLB SPG
        #[arg(value_name = "SET_CODE", required = true)]
        codes: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,

        /// Print the search URL without fetching anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Look up a single card by set code and collector number
    Card {
        #[arg(value_name = "SET_CODE")]
        set_code: String,

        #[arg(value_name = "NUMBER")]
        number: String,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Fetch the rulings for a card id
    Rulings {
        #[arg(value_name = "CARD_ID")]
        card_id: String,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Add cards to the collection, one `[-]<number>[f] [set]` per line
    Add {
        /// Set code to assume when a line gives none
        #[arg(value_name = "SET_CODE")]
        set_code: Option<String>,

        /// Collection file to edit instead of the list in use
        #[arg(short, long, value_name = "OUTPUT_FILE")]
        output: Option<PathBuf>,
    },
    /// Export a collection for other tools
    Export {
        /// Collection file to read instead of the list in use
        #[arg(short, long, value_name = "INPUT_FILE")]
        input: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the path of the main collection file
    CollectionPath,
    /// Manage named card lists
    List {
        #[command(subcommand)]
        command: ListCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ListCommands {
    /// Create an empty list
    Create {
        #[arg(value_name = "NAME")]
        name: String,

        /// Also make it the list in use
        #[arg(long = "use")]
        make_current: bool,
    },
    /// Send additions to a list; without a name, back to the main collection
    Use {
        #[arg(value_name = "NAME")]
        name: Option<String>,
    },
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// Output format; defaults to the configured one
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    output: Option<PathBuf>,
}

impl OutputArgs {
    fn format_or(&self, config: &Config) -> OutputFormat {
        self.format.unwrap_or(config.output.format)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match start(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn start(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    run(cli.command, &config, cancel).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("booster_crack=info,warn"),
            1 => EnvFilter::new("booster_crack=debug,info"),
            2 => EnvFilter::new("booster_crack=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Cancels in-flight collections on Ctrl-C
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling");
            cancel.cancel();
        }
    });
}

async fn run(command: Commands, config: &Config, cancel: CancellationToken) -> anyhow::Result<()> {
    match command {
        Commands::Search {
            codes,
            output,
            dry_run,
        } => {
            if dry_run {
                print!("{}", dry_run_report(config, &codes)?);
                return Ok(());
            }

            let client = ScryfallClient::new(&config.api)?.with_cancellation(cancel);
            tracing::info!("Fetching cards for sets: {}", codes.join(", "));
            let cards = client.cards_for_codes(codes.as_slice()).await?;

            let rendered = render_cards(&cards, output.format_or(config))?;
            write_output(&rendered, output.output.as_deref())?;
        }
        Commands::Card {
            set_code,
            number,
            output,
        } => {
            let client = ScryfallClient::new(&config.api)?.with_cancellation(cancel);
            let card = client.card(&set_code, &number).await?;

            let rendered = render_cards(std::slice::from_ref(&card), output.format_or(config))?;
            write_output(&rendered, output.output.as_deref())?;
        }
        Commands::Rulings { card_id, output } => {
            let client = ScryfallClient::new(&config.api)?.with_cancellation(cancel);
            let rulings = client.rulings(&card_id).await?;

            let rendered = render_rulings(&rulings, output.format_or(config))?;
            write_output(&rendered, output.output.as_deref())?;
        }
        Commands::Add { set_code, output } => {
            let client = ScryfallClient::new(&config.api)?.with_cancellation(cancel.clone());
            let store = CollectionStore::from_config(&config.collection)?;
            handle_add(
                &client,
                &store,
                set_code.as_deref(),
                output.as_deref(),
                &cancel,
            )
            .await?;
        }
        Commands::Export { input, output } => {
            let store = CollectionStore::from_config(&config.collection)?;
            let path = store.active_path(input.as_deref())?;
            tracing::info!("Exporting {}", path.display());
            let archive = read_archive(&path)?;

            let rendered = render_collection(&archive, output.format_or(config))?;
            write_output(&rendered, output.output.as_deref())?;
        }
        Commands::CollectionPath => {
            let store = CollectionStore::from_config(&config.collection)?;
            println!("{}", store.collection_path().display());
        }
        Commands::List { command } => {
            let store = CollectionStore::from_config(&config.collection)?;
            handle_list(&store, command)?;
        }
    }

    Ok(())
}

/// Reads entry lines from stdin until an empty line, end of input or Ctrl-C
async fn handle_add(
    client: &ScryfallClient,
    store: &CollectionStore,
    set_code: Option<&str>,
    output: Option<&Path>,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("Enter card number: ");
        std::io::stdout().flush()?;

        let line = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            line = lines.next_line() => line?,
        };
        let line = match line {
            Some(line) => line,
            None => break,
        };
        let line = line.trim();
        if line.is_empty() {
            println!("Empty input received, exiting...");
            break;
        }

        let input = match parse_addition_input(line, set_code) {
            Ok(input) => input,
            Err(e) => {
                tracing::warn!("{}", e);
                continue;
            }
        };

        let card = match client.card(&input.set_code, &input.card_number).await {
            Ok(card) => card,
            Err(CrackError::Cancelled { .. }) => break,
            Err(e) => {
                tracing::warn!("Error from Scryfall: {}", e);
                continue;
            }
        };

        let count = match store.edit(output, card.clone(), input.foil, input.removal) {
            Ok(count) => count,
            Err(e @ CollectionError::NotInCollection(_)) => {
                tracing::warn!("{}", e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        println!("{}", change_message(&card, input.foil, input.removal, count));
    }

    Ok(())
}

fn handle_list(store: &CollectionStore, command: ListCommands) -> anyhow::Result<()> {
    match command {
        ListCommands::Create { name, make_current } => {
            let path = store.create_list(&name, make_current)?;
            println!("Created new list at {}", path.display());
            if make_current {
                println!("Now using {}", name);
            }
        }
        ListCommands::Use { name } => {
            let previous = store.use_list(name.as_deref())?;
            let from = previous.as_deref().unwrap_or("the collection");
            match name {
                Some(name) => println!("Changed list in use from {} to {}", from, name),
                None => println!("Unset {}, defaulting back to the collection", from),
            }
        }
    }
    Ok(())
}

/// Confirmation printed after each collection edit
fn change_message(card: &Card, foil: bool, removal: bool, count: u32) -> String {
    if removal {
        return match count {
            0 => format!("Removed {} from collection!", card.name),
            n => format!(
                "Removed {} from collection! ({} remaining in this collection)",
                card.name, n
            ),
        };
    }

    let mut message = format!("Added {} to collection!", card.name);
    if count > 1 {
        message.push_str(&format!(" ({} in this collection)", count));
    }
    if let Some(prices) = &card.prices {
        let (eur, usd) = if foil {
            (&prices.eur_foil, &prices.usd_foil)
        } else {
            (&prices.eur, &prices.usd)
        };
        message.push_str(&format!(
            " ({}€ / ${})",
            eur.as_deref().unwrap_or("-"),
            usd.as_deref().unwrap_or("-")
        ));
    }
    message
}

/// Describes what `search` would collect without fetching anything
fn dry_run_report(config: &Config, codes: &[String]) -> anyhow::Result<String> {
    let base = Url::parse(&config.api.base_url)?;
    let locator = search_locator(&base, codes)?;

    let mut report = String::from("=== Booster-Crack Dry Run ===\n\n");
    report.push_str("API:\n");
    report.push_str(&format!("  Base URL: {}\n", config.api.base_url));
    report.push_str(&format!("  User agent: {}\n", config.api.user_agent));
    report.push_str(&format!(
        "  Timeout: {}s (connect {}s)\n",
        config.api.timeout_secs, config.api.connect_timeout_secs
    ));
    report.push_str(&format!("\nSets ({}):\n", codes.len()));
    for code in codes {
        report.push_str(&format!("  - {}\n", code));
    }
    report.push_str(&format!("\nWould collect: {}\n", locator));

    Ok(report)
}

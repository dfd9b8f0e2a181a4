//! Card exporter CLI application.

use anyhow::{Context, Result};
use card_exporter::deck::missing_basics;
use card_exporter::{combine_csv_files, parse_decklist, CardDatabase, Exporter, TcgdexClient};
use clap::{Parser, Subcommand};
use shared::{Config, ConfigSource, ExportPaths};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export every configured set to its own CSV file (default)
    Export {
        /// Combine all exported files afterwards
        #[arg(long)]
        combine: bool,
    },
    /// Combine the CSV files in the data directory into one file
    Combine,
    /// Check a decklist against the combined CSV
    Deck {
        /// Decklist file, one `<count> <name> <set> <number>` per line
        #[arg(short, long)]
        list: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logged once the subscriber is up
    let (config, config_source) = Config::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        config.log_level()
    };

    shared::logging::init(shared::LogConfig {
        log_dir: config.log_dir().to_string_lossy().to_string(),
        component: "card-exporter".to_string(),
        default_level: log_level,
        console: config.logging.console,
        file: config.logging.file,
        json_format: config.logging.json_format,
    })?;

    info!("Card exporter starting");
    if config_source == ConfigSource::File {
        info!(config_file = %args.config.display(), "Loaded configuration");
    } else {
        warn!(
            config_file = %args.config.display(),
            "Config file not found, using defaults"
        );
    }

    if let Err(e) = run(&args, &config).await {
        error!(error = %format!("{:#}", e), "Run failed");
        std::process::exit(1);
    }

    info!("Card exporter finished successfully");
    Ok(())
}

async fn run(args: &Args, config: &Config) -> Result<()> {
    let paths = ExportPaths::new(config.data_dir());

    let combine = match &args.command {
        None => false,
        Some(Command::Export { combine }) => *combine,
        Some(Command::Combine) => return combine_files(&paths, config),
        Some(Command::Deck { list }) => return check_deck(list, config),
    };

    paths
        .create_dirs()
        .context("Failed to create output directory")?;

    let client = TcgdexClient::new(
        &config.catalog.base_url,
        &config.catalog.language,
        &config.catalog.user_agent,
    )
    .context("Failed to create TCGdex client")?;

    info!(
        base_url = client.base_url(),
        sets = config.export.sets.len(),
        "Starting export"
    );

    let exporter = Exporter::new(client, paths.clone());
    let stats = exporter
        .run(&config.export.sets)
        .await
        .context("Export aborted")?;

    info!("=== Export Complete ===");
    info!("Sets exported: {}", stats.sets_exported);
    info!("Rows written: {}", stats.rows_written);
    for file in &stats.files {
        info!("Wrote {}", file.display());
    }

    if combine {
        combine_files(&paths, config)?;
    }

    Ok(())
}

fn combine_files(paths: &ExportPaths, config: &Config) -> Result<()> {
    let inputs = paths
        .list_csv_files()
        .context("Failed to list exported CSV files")?;
    let output = config.combined_file();

    let stats = combine_csv_files(&inputs, &output)
        .with_context(|| format!("Failed to combine into {}", output.display()))?;

    info!(
        "Combined {} files into {} ({} rows)",
        stats.files_read,
        output.display(),
        stats.rows_written
    );
    Ok(())
}

fn check_deck(list: &Path, config: &Config) -> Result<()> {
    let card_data = config.combined_file();
    let database = CardDatabase::from_path(&card_data)
        .with_context(|| format!("Failed to load card data from {}", card_data.display()))?;

    let text = std::fs::read_to_string(list)
        .with_context(|| format!("Failed to read decklist {}", list.display()))?;
    let deck = parse_decklist(&text, &database).context("Invalid decklist")?;

    let basics = deck.iter().filter(|card| card.is_basic()).count();
    let ex = deck.iter().filter(|card| card.ex).count();
    let missing = missing_basics(&deck, &database).len();

    info!("=== Deck ===");
    info!("Cards: {}", deck.len());
    info!("Basic Pokémon: {}", basics);
    info!("EX cards: {}", ex);
    info!("Stage 2 lines missing their basic: {}", missing);
    Ok(())
}

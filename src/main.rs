//! pokedex-catalog CLI
//!
//! Load a seed file and inspect or compare its records offline.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use pokedex_catalog::mcp_interface::{
    compare_records_json, get_record_json, list_records_json, list_summary,
};
use pokedex_catalog::{
    config, import_file, Catalog, CatalogConfig, CatalogError, CatalogResult, ImportOptions,
    MemoryStore,
};

#[derive(Parser)]
#[command(name = "pokedex-catalog")]
#[command(about = "Normalize and compare Pokemon records", long_about = None)]
struct Cli {
    /// Config file (defaults to <config dir>/pokedex-catalog/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Seed file to load instead of the configured one
    #[arg(short, long, global = true)]
    seed: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every record
    List {
        /// Print canonical JSON instead of a summary table
        #[arg(long)]
        json: bool,
    },

    /// Show one record in canonical form
    Get {
        id: i64,
    },

    /// Compare two records head to head
    Compare {
        id1: i64,
        id2: i64,
    },
}

fn open_catalog(cli: &Cli) -> CatalogResult<Catalog<MemoryStore>> {
    let settings = CatalogConfig::load(cli.config.as_deref())?;
    config::init_logging(&settings);

    let chart = Arc::new(settings.load_type_chart()?);
    let catalog = Catalog::new(MemoryStore::new(), chart);

    let seed = cli
        .seed
        .clone()
        .or_else(|| settings.seed_file.clone())
        .ok_or_else(|| {
            CatalogError::Config("no seed file: pass --seed or set seed_file".to_string())
        })?;
    import_file(
        catalog.store(),
        &seed,
        &ImportOptions::new(settings.asset_base_url.as_str()),
    )?;
    Ok(catalog)
}

fn run(cli: &Cli) -> CatalogResult<String> {
    let catalog = open_catalog(cli)?;
    match &cli.command {
        Commands::List { json: true } => list_records_json(&catalog),
        Commands::List { json: false } => list_summary(&catalog),
        Commands::Get { id } => get_record_json(&catalog, *id),
        Commands::Compare { id1, id2 } => compare_records_json(&catalog, *id1, *id2),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            println!("{}", output.trim_end());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

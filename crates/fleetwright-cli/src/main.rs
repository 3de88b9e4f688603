use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use fleetwright_cli::commands::catalog::{handle_catalog, CatalogKind};
use fleetwright_cli::commands::import::{handle_check, handle_import, ImportOptions};
use fleetwright_cli::commands::normalize::handle_normalize;
use fleetwright_cli::commands::load_content;
use fleetwright_cli::output::OutputFormat;
use fleetwright_lib::{Faction, FleetFormat};

#[derive(Parser, Debug)]
#[command(author, version, about = "Fleet list import, export and validation")]
struct Cli {
    /// Path to the content catalog JSON (overrides FLEETWRIGHT_CATALOG).
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Path to the alias table JSON (overrides FLEETWRIGHT_ALIASES).
    #[arg(long, global = true)]
    aliases: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct ImportArgs {
    /// Fleet list file; reads stdin when omitted or `-`.
    input: Option<PathBuf>,

    /// Faction of the fleet being built.
    #[arg(long)]
    faction: Faction,

    /// Dialect of the input list.
    #[arg(long, default_value_t = FleetFormat::Canonical)]
    format: FleetFormat,

    /// Keep every objective listed instead of one per category.
    #[arg(long)]
    sandbox: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

impl ImportArgs {
    fn options(&self) -> ImportOptions {
        ImportOptions {
            input: self.input.clone(),
            format: self.format,
            faction: self.faction,
            sandbox: self.sandbox,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rewrite a community list dialect into canonical text.
    Normalize {
        /// Fleet list file; reads stdin when omitted or `-`.
        input: Option<PathBuf>,
        /// Dialect of the input list.
        #[arg(long)]
        format: FleetFormat,
    },
    /// Import a fleet list and print its canonical re-export.
    Import {
        #[command(flatten)]
        args: ImportArgs,
        /// Fail when any line could not be imported.
        #[arg(long)]
        strict: bool,
    },
    /// Import a fleet list and report points, skipped lines and total mismatches.
    Check {
        #[command(flatten)]
        args: ImportArgs,
    },
    /// List the cards fleet lists may name.
    Catalog {
        /// Only list one kind of card.
        #[arg(long, value_enum)]
        kind: Option<CatalogKind>,
        /// Only list cards usable by this faction.
        #[arg(long)]
        faction: Option<Faction>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let catalog = cli.catalog.as_deref();
    let aliases = cli.aliases.as_deref();

    match cli.command {
        Command::Normalize { input, format } => handle_normalize(input.as_deref(), format),
        Command::Import { args, strict } => {
            let content = load_content(catalog, aliases)?;
            handle_import(&content, &args.options(), args.output, strict)
        }
        Command::Check { args } => {
            let content = load_content(catalog, aliases)?;
            handle_check(&content, &args.options(), args.output)
        }
        Command::Catalog {
            kind,
            faction,
            output,
        } => {
            let content = load_content(catalog, aliases)?;
            handle_catalog(&content, kind, faction, output)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

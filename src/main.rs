use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mark_tally::config::Config;
use mark_tally::output::{format_table, should_use_colors, ExportDocument};
use mark_tally::report::{build_report, ReportKind, Selection};
use mark_tally::source::{save_snapshot, HttpSource, Source, SourceError};

const EXIT_SUCCESS: i32 = 0;
const EXIT_AUTH: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_INPUT: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Aligned columns for the terminal
    Table,
    /// Delimited export for spreadsheets
    Csv,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute rankings and print a report
    Report {
        /// Which report to produce
        #[arg(value_enum)]
        kind: ReportKind,

        /// Only this event (id or name)
        #[arg(long)]
        event: Option<String>,

        /// Only events (and, for totals, students) of this gender
        #[arg(long)]
        gender: Option<String>,

        /// Only mark records of this performance category
        #[arg(long)]
        category: Option<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Fetch a snapshot and save it for offline reports
    Snapshot {
        /// Destination JSON file
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Parser, Debug)]
#[command(name = "mark-tally")]
#[command(about = "Score, rank and aggregate competition marks", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/mark-tally/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Read a saved JSON snapshot instead of fetching from the API
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// API token (defaults to the MARK_TALLY_TOKEN environment variable)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    // RUST_LOG wins; otherwise --verbose selects debug
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn exit_code_for(err: &SourceError) -> i32 {
    match err {
        SourceError::Unauthorized => EXIT_AUTH,
        e if e.is_input() => EXIT_INPUT,
        _ => EXIT_NETWORK,
    }
}

fn load_valid_config(path: Option<PathBuf>) -> Result<Config, Vec<String>> {
    let config = mark_tally::config::load_config(path).map_err(|e| vec![format!("{:#}", e)])?;
    mark_tally::config::validate_config(&config)?;
    Ok(config)
}

fn build_source(cli: &Cli, config: &Config) -> Result<Source, i32> {
    if let Some(ref path) = cli.input {
        return Ok(Source::File(path.clone()));
    }

    let token = mark_tally::credentials::resolve_token(cli.token.as_deref()).map_err(|e| {
        eprintln!("Credential error: {}", e);
        EXIT_AUTH
    })?;

    let timeout = config.source.timeout().map_err(|e| {
        eprintln!("Config error: source.timeout: {}", e);
        EXIT_CONFIG
    })?;

    let client = HttpSource::new(config.source.clone(), token, timeout).map_err(|e| {
        eprintln!("Failed to create HTTP client: {}", e);
        EXIT_NETWORK
    })?;
    Ok(Source::Http(client))
}

/// Write `contents` to `path` atomically, or to stdout when no path is given
fn write_output(path: Option<&Path>, contents: &str) -> Result<()> {
    match path {
        Some(path) => {
            let mut file = AtomicWriteFile::open(path).with_context(|| {
                format!("Failed to open atomic write file at {}", path.display())
            })?;
            file.write_all(contents.as_bytes())
                .context("Failed to write report")?;
            file.commit()
                .with_context(|| format!("Failed to save report to {}", path.display()))?;
            info!(path = %path.display(), "Wrote report");
            Ok(())
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(contents.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+); an already
    // installed provider is fine
    let _ = rustls::crypto::ring::default_provider().install_default();

    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match load_valid_config(cli.config.clone()) {
        Ok(c) => c,
        Err(errors) => {
            eprintln!("Config errors:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            std::process::exit(EXIT_CONFIG);
        }
    };
    debug!(?config, "Effective config");

    let source = match build_source(&cli, &config) {
        Ok(s) => s,
        Err(code) => std::process::exit(code),
    };

    let snapshot = match source.load_snapshot().await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to load snapshot: {}", e);
            std::process::exit(exit_code_for(&e));
        }
    };

    match cli.command {
        Commands::Report {
            kind,
            event,
            gender,
            category,
            format,
            output,
        } => {
            let selection = Selection {
                event,
                gender,
                category,
            };
            let report = build_report(
                kind,
                &snapshot,
                &config.ranking,
                &selection,
                &config.export.title,
            );

            let rendered = match format {
                OutputFormat::Csv => ExportDocument::from_report(&report, &config.export).render(),
                OutputFormat::Table => {
                    let use_colors = output.is_none() && should_use_colors();
                    format!("{}\n", format_table(&report, use_colors))
                }
            };

            if let Err(e) = write_output(output.as_deref(), &rendered) {
                eprintln!("Output error: {:#}", e);
                std::process::exit(EXIT_INPUT);
            }
        }
        Commands::Snapshot { output } => {
            if let Err(e) = save_snapshot(&output, &snapshot) {
                eprintln!("Failed to save snapshot: {:#}", e);
                std::process::exit(EXIT_INPUT);
            }
            eprintln!(
                "Saved {} students, {} events, {} mark records to {}",
                snapshot.students.len(),
                snapshot.events.len(),
                snapshot.marks.len(),
                output.display()
            );
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

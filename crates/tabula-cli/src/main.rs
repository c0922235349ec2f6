//! Tabula Command-Line Interface
//!
//! Loads every CSV file of a directory as a table and answers queries
//! against them.
//!
//! # Usage
//!
//! ```bash
//! # Start interactive REPL over the tables in the current directory
//! tabula
//!
//! # Use another directory
//! tabula -d ./data
//!
//! # Execute a single query
//! tabula -c "select * from movies,oscars where m.title=o.title"
//!
//! # Execute queries from a file, one per line
//! tabula -f queries.txt
//!
//! # Output as JSON
//! tabula -o json -c "select * from movies"
//! ```

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tabula_sql::{load_database, QueryEngine};

mod commands;
mod config;
mod formatter;
mod repl;
mod session;

use config::CliConfig;
use formatter::OutputFormat;
use repl::Repl;
use session::Session;

/// Tabula command-line interface
#[derive(Parser, Debug)]
#[command(
    name = "tabula",
    author = "Tabula Team",
    version,
    about = "Query a directory of CSV files",
    long_about = "Loads every CSV file of a directory as a table and answers queries of the form\n\n\
                  \x20   select <cols|*> from <tables> [where <col>=<col|value>]\n\n\
                  interactively, from a single command, or from a file."
)]
struct Args {
    /// Directory holding the table files
    #[arg(short = 'd', long = "dir", value_name = "DIR", env = "TABULA_DIR")]
    data_dir: Option<PathBuf>,

    /// Execute a single query and exit
    #[arg(short = 'c', long)]
    command: Option<String>,

    /// Execute queries from file, one per line, and exit
    #[arg(short = 'f', long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long, value_enum, env = "TABULA_OUTPUT")]
    output: Option<OutputFormatArg>,

    /// Enable verbose output
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Suppress banner (for scripting)
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Configuration file path
    #[arg(long, value_name = "FILE", env = "TABULA_CONFIG")]
    config: Option<PathBuf>,

    /// Write the effective configuration to FILE and exit
    #[arg(long, value_name = "FILE")]
    save_config: Option<PathBuf>,
}

/// Output format argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormatArg {
    /// Display results as CSV
    Csv,
    /// Display results in a formatted table
    Table,
    /// Display results as JSON
    Json,
    /// Display raw values
    Raw,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Csv => OutputFormat::Csv,
            OutputFormatArg::Table => OutputFormat::Table,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Raw => OutputFormat::Raw,
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose);

    // Load configuration
    let config = load_config(&args)?;

    if let Some(path) = &args.save_config {
        config
            .save(path)
            .with_context(|| format!("Failed to save config to {}", path.display()))?;
        println!("Configuration saved to {}", path.display());
        return Ok(());
    }

    let format: OutputFormat = config.output_format.parse()?;

    let session = open_session(&config, format)?;

    // Determine execution mode
    if let Some(command) = &args.command {
        execute_command(&session, command)
    } else if let Some(file) = &args.file {
        execute_file(session, file)
    } else {
        run_repl(session, &config, args.quiet)
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("tabula_cli=debug,tabula_sql=debug")
    } else {
        EnvFilter::new("tabula_cli=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<CliConfig> {
    // Try to load from config file
    let mut config = if let Some(path) = &args.config {
        CliConfig::from_file(path)?
    } else {
        CliConfig::load_default()?
    };

    // Override with command line arguments
    if let Some(dir) = &args.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if let Some(output) = args.output {
        config.output_format = OutputFormat::from(output).to_string();
    }

    Ok(config)
}

fn open_session(config: &CliConfig, format: OutputFormat) -> Result<Session> {
    let dir = config.data_dir();
    let database = load_database(&dir, &config.extension)
        .with_context(|| format!("Failed to load tables from {}", dir.display()))?;
    info!("Loaded {} tables from {}", database.len(), dir.display());

    Ok(Session::new(QueryEngine::new(database), format).with_timing(config.timing))
}

fn execute_command(session: &Session, sql: &str) -> Result<()> {
    info!("Executing command: {}", sql);

    let output = session.run_query(sql)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn execute_file(mut session: Session, path: &Path) -> Result<()> {
    info!("Executing file: {}", path.display());

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut stdout = io::stdout().lock();
    session.run_script(&content, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

fn run_repl(session: Session, config: &CliConfig, quiet: bool) -> Result<()> {
    let mut repl = Repl::new(session, config)?;

    if !quiet {
        repl.print_banner();
    }

    repl.run()
}

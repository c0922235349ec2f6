//! Special backslash commands for the REPL.
//!
//! Provides commands like `\dt`, `\d`, `\q`, etc.

use std::path::PathBuf;

use anyhow::Result;

use tabula_sql::Table;

use crate::formatter::{format_result, OutputFormat};
use crate::session::Session;

/// Result of executing a command.
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// Exit the REPL.
    Exit,
    /// Output a message.
    Output(String),
    /// Turn timing on or off.
    SetTiming(bool),
    /// Set output format.
    SetFormat(OutputFormat),
    /// Run the queries in a file.
    Include(PathBuf),
}

/// A parsed command.
#[derive(Debug, PartialEq)]
pub enum Command {
    /// Quit the REPL.
    Quit,
    /// Show help.
    Help,
    /// Describe a table, or list tables without a name.
    Describe(Option<String>),
    /// List tables.
    ListTables,
    /// Toggle timing.
    Timing,
    /// Show or set the output format.
    Format(Option<String>),
    /// Show version.
    Version,
    /// Execute a file.
    Include(String),
    /// Unknown command.
    Unknown(String),
}

impl Command {
    /// Parses a command string.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let cmd = input.strip_prefix('\\').unwrap_or(input);

        let mut parts = cmd.splitn(2, char::is_whitespace);
        let cmd_name = parts.next().unwrap_or_default().to_lowercase();
        let args = parts
            .next()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        match cmd_name.as_str() {
            "q" | "quit" | "exit" => Command::Quit,
            "?" | "h" | "help" => Command::Help,
            "d" => Command::Describe(args),
            "dt" | "tables" => Command::ListTables,
            "timing" | "t" => Command::Timing,
            "format" | "f" => Command::Format(args),
            "version" | "v" => Command::Version,
            "i" | "include" => Command::Include(args.unwrap_or_default()),
            _ => Command::Unknown(cmd_name),
        }
    }

    /// Executes the command.
    pub fn execute(&self, session: &Session) -> Result<CommandResult> {
        match self {
            Command::Quit => Ok(CommandResult::Exit),

            Command::Help => Ok(CommandResult::Output(Self::help_text())),

            Command::Describe(Some(name)) => self.describe_table(session, name),

            Command::Describe(None) | Command::ListTables => self.list_tables(session),

            Command::Timing => Ok(CommandResult::SetTiming(!session.timing())),

            Command::Format(None) => Ok(CommandResult::Output(format!(
                "Output format is {}.",
                session.format()
            ))),

            Command::Format(Some(format)) => match format.parse() {
                Ok(format) => Ok(CommandResult::SetFormat(format)),
                Err(e) => Ok(CommandResult::Output(e.to_string())),
            },

            Command::Version => Ok(CommandResult::Output(format!(
                "Tabula CLI v{}",
                env!("CARGO_PKG_VERSION")
            ))),

            Command::Include(path) if path.is_empty() => {
                Ok(CommandResult::Output("Usage: \\i <filename>".to_string()))
            }

            Command::Include(path) => Ok(CommandResult::Include(PathBuf::from(path))),

            Command::Unknown(cmd) => Ok(CommandResult::Output(format!(
                "Unknown command '\\{}'. Type \\? for help.",
                cmd
            ))),
        }
    }

    /// Returns help text.
    fn help_text() -> String {
        r#"Tabula CLI Commands
===================

General:
  \q, \quit       Exit the CLI
  \?, \help       Show this help
  \v, \version    Show version information

Schema:
  \dt, \tables    List all tables
  \d [NAME]       Describe a table

Display:
  \t, \timing     Toggle timing display
  \f [FORMAT]     Show or set output format (csv, table, json, raw)

Files:
  \i FILE         Execute queries from file

Queries take the form
  select <cols|*> from <table>[,<table>...] [where <col>=<col|value>]
and run when you press return. An empty line exits.
"#
        .to_string()
    }

    fn list_tables(&self, session: &Session) -> Result<CommandResult> {
        let db = session.engine().database();
        if db.is_empty() {
            return Ok(CommandResult::Output("Did not find any tables.".to_string()));
        }

        let listing = Table::from_columns([
            ("table", db.names().map(str::to_string).collect::<Vec<_>>()),
            (
                "columns",
                db.iter().map(|(_, t)| t.num_columns().to_string()).collect(),
            ),
            (
                "rows",
                db.iter()
                    .map(|(_, t)| t.row_count().unwrap_or(0).to_string())
                    .collect(),
            ),
        ])?;
        Ok(CommandResult::Output(format_output(&listing, session.format())?))
    }

    fn describe_table(&self, session: &Session, name: &str) -> Result<CommandResult> {
        let Some(table) = session.engine().database().get(name) else {
            return Ok(CommandResult::Output(format!(
                "Did not find any table named '{}'.",
                name
            )));
        };

        let description = Table::from_columns([(
            "column",
            table.column_names().map(str::to_string).collect::<Vec<_>>(),
        )])?;
        Ok(CommandResult::Output(format_output(&description, session.format())?))
    }
}

/// Formats a listing without the trailing newline the message printer adds.
fn format_output(table: &Table, format: OutputFormat) -> Result<String> {
    let text = format_result(table, format)?;
    Ok(text.trim_end_matches('\n').to_string())
}

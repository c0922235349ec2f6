//! Query session: runs input lines against the engine and writes results.
//!
//! The session knows nothing about terminals; the REPL and the batch modes
//! feed it lines and hand it the writers to print to.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use tracing::debug;

use tabula_sql::QueryEngine;

use crate::commands::{Command, CommandResult};
use crate::formatter::{format_result, OutputFormat};

/// What the caller should do after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,
    /// Stop reading input.
    Exit,
}

/// State shared by all queries of one invocation.
pub struct Session {
    engine: QueryEngine,
    format: OutputFormat,
    timing: bool,
    /// Canonical paths of the scripts currently being included.
    includes: Vec<PathBuf>,
}

impl Session {
    /// Creates a session over an engine.
    pub fn new(engine: QueryEngine, format: OutputFormat) -> Self {
        Self {
            engine,
            format,
            timing: false,
            includes: Vec::new(),
        }
    }

    /// Enables or disables per-query timing.
    pub fn with_timing(mut self, enabled: bool) -> Self {
        self.timing = enabled;
        self
    }

    /// Returns the query engine.
    pub fn engine(&self) -> &QueryEngine {
        &self.engine
    }

    /// Returns the current output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Returns true if timing is displayed.
    pub fn timing(&self) -> bool {
        self.timing
    }

    /// Runs one query and returns its formatted result.
    ///
    /// Nothing is returned for a failed query, so a failure never produces
    /// partial output.
    pub fn run_query(&self, sql: &str) -> Result<String> {
        let start = Instant::now();
        let table = self.engine.execute(sql)?;
        let elapsed = start.elapsed();
        debug!("Query returned {} rows", table.row_count().unwrap_or(0));

        let mut output = format_result(&table, self.format)?;
        if self.timing {
            output.push_str(&format!("Time: {:.3}ms\n", elapsed.as_secs_f64() * 1000.0));
        }
        Ok(output)
    }

    /// Handles one line of interactive input.
    ///
    /// An empty line ends the session. Errors are reported on `err` and the
    /// session continues.
    pub fn handle_line<W: Write, E: Write>(
        &mut self,
        line: &str,
        out: &mut W,
        err: &mut E,
    ) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Exit);
        }

        match self.dispatch(line, out) {
            Ok(flow) => Ok(flow),
            Err(e) => {
                writeln!(err, "ERROR: {:#}", e)?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Runs every line of a script. Blank lines and `--` comments are
    /// skipped; the first failing line stops the script.
    pub fn run_script<W: Write>(&mut self, content: &str, out: &mut W) -> Result<()> {
        for (number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with("--") {
                continue;
            }

            let flow = self
                .dispatch(line, out)
                .with_context(|| format!("line {}: {}", number + 1, line))?;

            if flow == Flow::Exit {
                break;
            }
        }
        Ok(())
    }

    fn dispatch<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        if line.starts_with('\\') {
            return self.handle_command(line, out);
        }
        let text = self.run_query(line)?;
        out.write_all(text.as_bytes())?;
        Ok(Flow::Continue)
    }

    fn handle_command<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        match Command::parse(line).execute(self)? {
            CommandResult::Exit => return Ok(Flow::Exit),
            CommandResult::Output(msg) => writeln!(out, "{}", msg)?,
            CommandResult::SetTiming(enabled) => {
                self.timing = enabled;
                writeln!(out, "Timing is {}.", if enabled { "on" } else { "off" })?;
            }
            CommandResult::SetFormat(format) => {
                self.format = format;
                writeln!(out, "Output format set to {}.", format)?;
            }
            CommandResult::Include(path) => self.include(&path, out)?,
        }
        Ok(Flow::Continue)
    }

    /// Runs a script file. A file that is already being included fails
    /// instead of recursing.
    fn include<W: Write>(&mut self, path: &Path, out: &mut W) -> Result<()> {
        let path = path
            .canonicalize()
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if self.includes.contains(&path) {
            bail!("recursive include of {}", path.display());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        debug!("Including {} at depth {}", path.display(), self.includes.len() + 1);

        self.includes.push(path);
        let result = self.run_script(&content, out);
        self.includes.pop();
        result
    }
}

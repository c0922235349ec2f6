//! Interactive REPL (Read-Eval-Print-Loop) for Tabula.
//!
//! Reads one query per line with history and tab completion. An empty line
//! or end of input ends the loop.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, EditMode, Editor, Helper};
use tracing::{debug, error};

use tabula_sql::Database;

use crate::config::CliConfig;
use crate::session::{Flow, Session};

/// Query language keywords offered for completion.
const KEYWORDS: [&str; 3] = ["select", "from", "where"];

/// REPL helper for rustyline.
struct ReplHelper {
    /// Table and column names for completion.
    names: Vec<String>,
}

impl ReplHelper {
    fn new(database: &Database) -> Self {
        let mut names: Vec<String> = database.names().map(str::to_string).collect();
        for (_, table) in database.iter() {
            names.extend(table.column_names().map(str::to_string));
        }
        names.sort();
        names.dedup();
        Self { names }
    }

    fn candidates(&self, word: &str) -> Vec<Pair> {
        let word_lower = word.to_lowercase();
        KEYWORDS
            .iter()
            .filter(|kw| kw.starts_with(&word_lower))
            .map(|kw| kw.to_string())
            .chain(self.names.iter().filter(|n| n.starts_with(word)).cloned())
            .map(|name| Pair {
                display: name.clone(),
                replacement: name,
            })
            .collect()
    }
}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // Find the word being typed
        let start = line[..pos]
            .rfind(|c: char| c.is_whitespace() || matches!(c, ',' | '=' | '>' | '\''))
            .map(|i| i + 1)
            .unwrap_or(0);

        Ok((start, self.candidates(&line[start..pos])))
    }
}

impl Hinter for ReplHelper {
    type Hint = String;
}

impl Highlighter for ReplHelper {}

impl Validator for ReplHelper {}

impl Helper for ReplHelper {}

/// Interactive REPL for Tabula.
pub struct Repl {
    /// Session the input lines are handed to.
    session: Session,
    /// The rustyline editor.
    editor: Editor<ReplHelper, DefaultHistory>,
    /// Prompt shown before each line.
    prompt: String,
    /// History file path.
    history_file: Option<PathBuf>,
}

impl Repl {
    /// Creates a new REPL instance.
    pub fn new(session: Session, config: &CliConfig) -> Result<Self> {
        let rl_config = Config::builder()
            .history_ignore_space(true)
            .completion_type(CompletionType::List)
            .edit_mode(EditMode::Emacs)
            .max_history_size(config.history_size)?
            .build();

        let mut editor = Editor::with_config(rl_config)?;
        editor.set_helper(Some(ReplHelper::new(session.engine().database())));

        let history_file = config.history_path();
        if let Some(ref path) = history_file {
            if path.exists() {
                let _ = editor.load_history(path);
            }
        }

        Ok(Self {
            session,
            editor,
            prompt: config.prompt.clone(),
            history_file,
        })
    }

    /// Prints the welcome banner.
    pub fn print_banner(&self) {
        let db = self.session.engine().database();
        println!("Tabula CLI v{}", env!("CARGO_PKG_VERSION"));
        println!(
            "Loaded {} table{}. Type \\? for help, an empty line to quit.\n",
            db.len(),
            if db.len() == 1 { "" } else { "s" }
        );
    }

    /// Runs the main REPL loop.
    pub fn run(&mut self) -> Result<()> {
        let stdout = io::stdout();
        let stderr = io::stderr();

        loop {
            match self.editor.readline(&self.prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = self.editor.add_history_entry(line.trim());
                    }

                    let flow =
                        self.session
                            .handle_line(&line, &mut stdout.lock(), &mut stderr.lock())?;
                    if flow == Flow::Exit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    // Cancel current input but don't exit
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(e) => {
                    error!("Readline error: {}", e);
                    break;
                }
            }
        }

        self.save_history();
        Ok(())
    }

    /// Saves command history.
    fn save_history(&mut self) {
        if let Some(ref path) = self.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Err(e) = self.editor.save_history(path) {
                debug!("Failed to save history: {}", e);
            }
        }
    }
}

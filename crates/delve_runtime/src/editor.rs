//! Line editor abstraction for the REPL.
//!
//! The REPL talks to a [`LineEditor`], so tests can feed it scripted input
//! while the binary uses rustyline.

use std::borrow::Cow;

use delve_foundation::{CommandKind, Direction, Error, ErrorKind, Result};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::{Completer, Config, Context, Editor, Helper, Hinter, Validator};

use crate::session::MetaCommand;

/// Result of reading a line from the editor.
#[derive(Debug)]
pub enum ReadResult {
    /// A line was successfully read.
    Line(String),
    /// User pressed Ctrl+C.
    Interrupted,
    /// User pressed Ctrl+D (EOF).
    Eof,
}

/// Abstraction over line editing functionality.
pub trait LineEditor {
    /// Read a line with the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Add a line to history.
    fn add_history(&mut self, line: &str);
}

#[derive(Helper, Completer, Hinter, Validator)]
struct DelveHelper {
    #[rustyline(Completer)]
    completer: WordCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
}

impl Highlighter for DelveHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Owned(format!("\x1b[1;32m{prompt}\x1b[0m"))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[2m{hint}\x1b[0m"))
    }
}

/// Completes command keywords and meta commands in first position, and
/// directions after that.
struct WordCompleter;

impl WordCompleter {
    fn candidates(first_word: bool, word: &str) -> Vec<&'static str> {
        let words: Vec<&'static str> = if first_word && word.starts_with(':') {
            MetaCommand::NAMES.to_vec()
        } else if first_word {
            CommandKind::PRIORITY.iter().map(|c| c.keyword()).collect()
        } else {
            Direction::ALL.iter().map(|d| d.name()).collect()
        };
        words.into_iter().filter(|w| w.starts_with(word)).collect()
    }
}

impl Completer for WordCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let start = line[..pos]
            .rfind(char::is_whitespace)
            .map_or(0, |i| i + 1);
        let word = &line[start..pos];
        let first_word = line[..start].trim().is_empty();

        let candidates = Self::candidates(first_word, &word.to_lowercase())
            .into_iter()
            .map(|w| Pair {
                display: w.to_string(),
                replacement: w.to_string(),
            })
            .collect();
        Ok((start, candidates))
    }
}

fn editor_error(e: &ReadlineError) -> Error {
    Error::new(ErrorKind::IoError(format!("line editor: {e}")))
}

/// Line editor implementation using rustyline.
pub struct RustylineEditor {
    editor: Editor<DelveHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Creates a new rustyline-based editor.
    ///
    /// # Errors
    ///
    /// Returns an error if rustyline initialization fails.
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(false)
            .max_history_size(1000)
            .map_err(|e| editor_error(&e))?
            .build();

        let mut editor = Editor::with_config(config).map_err(|e| editor_error(&e))?;
        editor.set_helper(Some(DelveHelper {
            completer: WordCompleter,
            hinter: HistoryHinter::new(),
        }));

        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(e) => Err(editor_error(&e)),
        }
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }
}

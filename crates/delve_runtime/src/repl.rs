//! The main REPL implementation.

use std::io::{self, BufRead, Write};

use delve_foundation::{Error, ErrorKind, Result};
use delve_storage::{Command, LookTarget};

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::render;
use crate::session::{Outcome, Session};

/// Executes one line and renders what it produced.
///
/// Returns `Ok(None)` when the line asks to quit.
///
/// # Errors
///
/// Returns the error the line failed with.
pub fn respond(session: &mut Session, line: &str) -> Result<Option<String>> {
    let text = match session.execute(line)? {
        Outcome::Quit => return Ok(None),
        Outcome::Nothing => String::new(),
        Outcome::Help => render::HELP.to_string(),
        Outcome::Action(records) => {
            let mut text = render::render_action(&records);
            let arrived = matches!(
                records.action.command,
                Command::Move { .. } | Command::Look(LookTarget::Location { direction: None, .. })
            );
            if arrived {
                text.push('\n');
                text.push_str(&surroundings(session)?);
            }
            text
        }
        Outcome::History(records) => render::render_history(&records),
        Outcome::Location(context) => {
            render::render_location(&context, session.character_instance_id())
        }
        Outcome::Actions(actions) => render::render_actions(&actions),
        Outcome::Saved(path) => format!("Saved to {}.", path.display()),
        Outcome::Loaded(path) => {
            format!("Loaded {}.\n{}", path.display(), surroundings(session)?)
        }
    };
    Ok(Some(text))
}

fn surroundings(session: &Session) -> Result<String> {
    Ok(render::render_location(
        &session.location()?,
        session.character_instance_id(),
    ))
}

/// Runs lines from `input` without prompting, writing responses and errors
/// to `output`. Stops at end of input or `:quit`.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails.
pub fn run_batch<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    mut output: W,
) -> Result<()> {
    let io_error = |e: io::Error| Error::new(ErrorKind::IoError(e.to_string()));

    for line in input.lines() {
        let line = line.map_err(io_error)?;
        let text = match respond(session, &line) {
            Ok(Some(text)) => text,
            Ok(None) => break,
            Err(e) => render::render_error(&e),
        };
        if !text.is_empty() {
            writeln!(output, "{text}").map_err(io_error)?;
        }
    }
    output.flush().map_err(io_error)
}

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Session state (store, engine, player).
    session: Session,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(session: Session) -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, session))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    pub fn with_editor(editor: E, session: Session) -> Self {
        Self {
            editor,
            session,
            show_banner: true,
            prompt: "> ".to_string(),
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Runs the REPL loop until EOF or `:quit`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        while self.read_eval_print()? {}

        println!("\nFarewell.");
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let line = match self.editor.read_line(&self.prompt)? {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted => return Ok(true),
            ReadResult::Eof => return Ok(false),
        };
        if line.trim().is_empty() {
            return Ok(true);
        }
        self.editor.add_history(&line);

        match respond(&mut self.session, &line) {
            Ok(Some(text)) => {
                if !text.is_empty() {
                    println!("{text}");
                }
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(e) => {
                eprintln!("\x1b[31m{}\x1b[0m", render::render_error(&e));
                Ok(true)
            }
        }
    }

    fn print_banner(&self) {
        println!("\x1b[1;36mDelve\x1b[0m v{}", env!("CARGO_PKG_VERSION"));
        println!("Type sentences like \"look\" or \"move north\". :help lists commands.\n");
        if let Ok(text) = surroundings(&self.session) {
            println!("{text}");
        }
        let _ = io::stdout().flush();
    }
}

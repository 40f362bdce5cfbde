//! Error types for the Delve system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::command::{ActorKind, CommandKind};

/// The main error type for Delve operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Pushes a frame onto this error's context, creating it if needed.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_frame(frame));
        self
    }

    /// Creates an unknown command error for an unparseable sentence.
    #[must_use]
    pub fn unknown_command(sentence: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownCommand(sentence.into()))
    }

    /// Creates an unresolved target error.
    #[must_use]
    pub fn unresolved_target(command: CommandKind, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnresolvedTarget {
            command,
            reason: reason.into(),
        })
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation(message.into()))
    }

    /// Creates an unsupported operation error.
    #[must_use]
    pub fn unsupported(command: CommandKind, actor: ActorKind) -> Self {
        Self::new(ErrorKind::Unsupported { command, actor })
    }

    /// Creates a record not found error.
    #[must_use]
    pub fn not_found(record: &'static str, id: impl fmt::Display) -> Self {
        Self::new(ErrorKind::NotFound {
            record,
            id: id.to_string(),
        })
    }

    /// Creates a stored-data corruption error.
    #[must_use]
    pub fn corruption(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Corruption(message.into()))
    }

    /// Creates a generic storage error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage(message.into()))
    }

    /// Returns true if the sentence or its targets could not be resolved.
    #[must_use]
    pub fn is_resolution(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::UnknownCommand(_)
                | ErrorKind::UnresolvedTarget { .. }
                | ErrorKind::SentenceTooLong { .. }
        )
    }

    /// Returns true if this is a record not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound { .. })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The sentence does not start any known command.
    #[error("unknown command: {0:?}")]
    UnknownCommand(String),

    /// A command was recognised but its target could not be resolved.
    #[error("cannot {command}: {reason}")]
    UnresolvedTarget {
        /// The command being resolved.
        command: CommandKind,
        /// Why resolution failed.
        reason: String,
    },

    /// The sentence exceeds the configured maximum length.
    #[error("sentence too long: {length} characters (limit {limit})")]
    SentenceTooLong {
        /// Length of the rejected sentence.
        length: usize,
        /// Configured limit.
        limit: usize,
    },

    /// A precondition or cross-reference check failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The command is not supported for this kind of actor.
    #[error("{actor} actors cannot {command}")]
    Unsupported {
        /// The rejected command.
        command: CommandKind,
        /// The kind of actor that issued it.
        actor: ActorKind,
    },

    /// A record was not found in storage.
    #[error("{record} not found: {id}")]
    NotFound {
        /// Kind of record that was looked up.
        record: &'static str,
        /// The identifier that was looked up.
        id: String,
    },

    /// An update was attempted on an append-only record.
    #[error("{record} records are append-only")]
    AppendOnly {
        /// Kind of record.
        record: &'static str,
    },

    /// A locked row was changed by another transaction.
    #[error("{record} {id} was modified by a concurrent transaction")]
    Conflict {
        /// Kind of record.
        record: &'static str,
        /// Identifier of the contested row.
        id: String,
    },

    /// Stored history rows are inconsistent.
    #[error("stored data corrupted: {0}")]
    Corruption(String),

    /// The backing store failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The sentence being processed, if any.
    pub sentence: Option<String>,
    /// Stack of operations that were running.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sentence being processed.
    #[must_use]
    pub fn with_sentence(mut self, sentence: impl Into<String>) -> Self {
        self.sentence = Some(sentence.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sentence) = &self.sentence {
            write!(f, "while processing {sentence:?}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}

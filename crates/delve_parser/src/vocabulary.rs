//! Keyword extraction.
//!
//! The vocabulary is fixed: `move`, `look`, `stash`, `equip`, `drop`,
//! `attack`, checked in that order. The first keyword found wins.

use delve_foundation::{CommandKind, Error, Result};

/// A sentence split into its command keyword and the text after it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sentence {
    /// The recognised command.
    pub command: CommandKind,
    /// Lower-cased, trimmed text following the keyword. May be empty.
    pub remainder: String,
}

/// Extracts the command keyword from a raw sentence.
///
/// The sentence is lower-cased and trimmed. A keyword matches if the
/// sentence contains the keyword followed by a space, or is exactly the
/// keyword.
///
/// # Errors
///
/// Returns `UnknownCommand` if no keyword matches, including for an empty
/// sentence.
pub fn extract_command(sentence: &str) -> Result<Sentence> {
    let normalized = sentence.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(Error::unknown_command(sentence));
    }

    for command in CommandKind::PRIORITY {
        let keyword = command.keyword();
        if normalized == keyword {
            return Ok(Sentence {
                command,
                remainder: String::new(),
            });
        }
        let prefix = format!("{keyword} ");
        if let Some(start) = normalized.find(&prefix) {
            return Ok(Sentence {
                command,
                remainder: normalized[start + prefix.len()..].trim().to_string(),
            });
        }
    }

    Err(Error::unknown_command(sentence))
}

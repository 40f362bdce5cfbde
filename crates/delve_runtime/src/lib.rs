//! REPL, CLI, sample dungeon, and save files for Delve.
//!
//! This crate provides:
//! - [`Session`] - One player's playthrough, a transaction per line
//! - [`Repl`] - Interactive read-eval-print loop, plus [`run_batch`] for scripts
//! - [`sample`] - A small built-in dungeon
//! - [`serialize`] - Save files in `MessagePack`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod editor;
pub mod render;
pub mod repl;
pub mod sample;
pub mod serialize;
pub mod session;

pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use repl::{Repl, respond, run_batch};
pub use sample::Sample;
pub use session::{MetaCommand, Outcome, Session};

//! Delve - Action-resolution and world-state engine for a text-command dungeon
//!
//! This crate re-exports all layers of the Delve system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: delve_runtime    — REPL, CLI, sample dungeon, save files
//! Layer 3: delve_engine     — Action performer, history composer, instantiation
//! Layer 2: delve_parser     — Command extraction and target resolution
//! Layer 1: delve_storage    — Records, views, repositories, transactional store
//! Layer 0: delve_foundation — Core types (typed IDs, Direction, CommandKind, Error)
//! ```

pub use delve_engine as engine;
pub use delve_foundation as foundation;
pub use delve_parser as parser;
pub use delve_runtime as runtime;
pub use delve_storage as storage;

//! Integration tests for Layer 3: Engine
//!
//! Tests action processing, history records, instantiation, and monster
//! actors against a dungeon built from templates.

mod fixture;
mod history;
mod instantiation;
mod perform;

//! Integration tests for Layer 2: Parser
//!
//! Tests keyword extraction and target resolution against stored scenes.

mod extraction;
mod resolution;
mod scene;

//! Integration tests for Layer 1: Storage
//!
//! Tests for transactions, location contexts, and actor loading.

mod fixture;

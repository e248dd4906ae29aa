//! Unit tests for turngraph-cli, organized by module.
//!
//! Tests are BDD-style with Given/When/Then comments and descriptive names.
//! Each submodule documents the behaviour under test.

mod config;
mod logging;

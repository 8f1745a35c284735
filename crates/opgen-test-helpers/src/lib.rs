//! Test utilities and fixtures for opgen
//!
//! Shared by the integration tests of `opgen-core` and `opgen-cli`.

pub mod fixtures;
pub mod mocks;
pub mod rewrite;

//! Common test utilities for API integration tests
//!
//! This module provides shared test infrastructure: an in-memory application,
//! GraphQL execution helpers and generated test data.

#![allow(unused_imports)]

pub mod helpers;

pub use helpers::*;

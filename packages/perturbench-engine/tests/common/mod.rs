//! Common test utilities for perturbench-engine
//!
//! Shared source fixtures for the integration tests.

#![allow(dead_code)]

mod fixtures;

pub use fixtures::*;

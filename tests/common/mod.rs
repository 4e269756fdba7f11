//! Shared test utilities for miru integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top
//! of each harness file. All helpers are deterministic: fixed timestamps,
//! fixed corpora, no randomness outside the proptest blocks.
#![allow(dead_code)]

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use builders::*;
pub use fixtures::*;

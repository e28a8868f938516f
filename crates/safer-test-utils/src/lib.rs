//! Shared test utilities for the safer-claude workspace.
//!
//! This crate provides standardised directory fixtures for snapshot and
//! reconciliation tests. It is a dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`tree`]: [`tree::TestTree`] for building and asserting on directory trees

pub mod tree;

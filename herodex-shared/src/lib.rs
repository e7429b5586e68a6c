//! # Herodex Shared Library
//!
//! This crate contains the record store layer shared between the Herodex API
//! server and its tests: the SQLite connection pool, schema bootstrap, and
//! the `Hero` model with its CRUD operations.
//!
//! ## Module Organization
//!
//! - `db`: Connection pool management and schema migrations
//! - `models`: Database models and data structures

pub mod db;
pub mod models;

/// Current version of the Herodex shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

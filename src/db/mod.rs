//! Database layer
//!
//! SQLite persistence for the Memoria backend: pool bootstrap, code-based
//! migrations, and trait-based repositories for the four record kinds
//! (tributes, gallery images, timeline events, contact messages).

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_test_pool, ping};

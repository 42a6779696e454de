//! Generic sqlite connection management.
//!
//! This module owns connection lifecycle only (opening the file, directory
//! creation, thread-safe access). Table schemas belong to whichever module
//! opens a connection — see `scc::persistence::SqliteSwapStore` for the
//! swap-classification persistence collaborator built on top of it.

pub mod connection;
pub mod models;

pub use connection::Database;
pub use models::{DatabaseConfig, DatabaseResult};

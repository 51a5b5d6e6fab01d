//! SQLite backend for the Casebook investigation store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs off the async
//! runtime. Every operation opens its own connection and transaction; the
//! [`SqliteStore`] handle itself holds nothing but the database path.

mod encode;
mod schema;
mod store;

pub mod error;

pub use encode::Table;
pub use error::{Error, Result};
pub use store::{Repo, SqliteStore};

#[cfg(test)]
mod tests;

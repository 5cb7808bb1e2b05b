// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for obtrack import sessions.
//!
//! The import wizard writes a snapshot of its session on every change
//! while it is open and removes it when it closes, so that a restarted
//! driver can resume an interrupted import. This crate provides the
//! storage port for that snapshot and two adapters:
//!
//! - [`InMemorySessionStore`] keeps snapshots for the life of the process
//! - [`SqliteSessionStore`] keeps them in a `SQLite` table, built on Diesel
//!   with embedded migrations
//!
//! ## Testing Philosophy
//!
//! - Tests run against in-memory `SQLite` databases
//! - Each in-memory database is isolated by a unique name

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod store;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use store::{InMemorySessionStore, SessionStore, SqliteSessionStore};

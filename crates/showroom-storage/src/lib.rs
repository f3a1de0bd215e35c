// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for the Showroom visit-analysis service.
//!
//! Holds the latest analysis per visit and the append-only analysis log.
//! All access goes through one `tokio-rusqlite` connection, whose background
//! thread serializes every statement.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::Database;

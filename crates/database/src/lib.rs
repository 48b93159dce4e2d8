//! # Data Sources
//!
//! This crate is the boundary between the outside world and the analytics core. It
//! knows how to fetch one reporting window of daily rows from the warehouse (or from
//! a JSON export, or from memory) and turns them into validated `DailyRecord`s.
//!
//! ## Architectural Principles
//!
//! - **Layer 2 Adapter:** All SQL and file handling lives here. Callers see only the
//!   `DailyRecordSource` trait.
//! - **Explicit settings:** Connection and table settings are passed in by the caller,
//!   never read from process-wide state.
//! - **Validate once:** Rows are checked against the `DailyRecord` invariants as they
//!   are converted, so downstream code can trust every record it receives.
//!
//! ## Public API
//!
//! - `connect`: The async function to establish the warehouse connection pool.
//! - `DailyRecordSource`: The trait every source implements.
//! - `WarehouseRepository`, `JsonFileSource`, `FixtureSource`: The sources.
//! - `build_source`: Picks and builds a source from configuration.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;
pub mod source;

// Re-export the key components to create a clean, public-facing API.
pub use connection::connect;
pub use error::DbError;
pub use repository::{DbWeatherRow, TableRef, WarehouseRepository};
pub use source::{DailyRecordSource, FixtureSource, JsonFileSource, build_source};

//! # Weather & Sales Analytics
//!
//! This crate turns one reporting window of daily sales and weather observations
//! into the handful of numbers a dashboard shows: totals, averages, the best day,
//! the windiest day, how sales move with the weather, and how cold days compare
//! with warm ones.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of external systems.
//!   It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `MetricsEngine` takes a slice of `DailyRecord`s and
//!   produces a `MetricsResult`. Nothing is cached between calls.
//! - **No silent NaN:** Metrics that are undefined for the input (empty cohort, zero
//!   variance) are either a typed error or an explicit `None`, depending on the
//!   `DegeneratePolicy` the engine was built with.
//!
//! ## Public API
//!
//! - `MetricsEngine`: The calculator.
//! - `MetricsResult`: The flat record of every metric.
//! - `Insights`: Qualitative reading of a `MetricsResult` (directions and trends).
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod insight;
pub mod report;
pub mod stats;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{COLD_DAY_THRESHOLD_C, MetricsEngine};
pub use error::AnalyticsError;
pub use insight::{Direction, Insights, Trend};
pub use report::{Cohort, CorrelationPair, MetricsResult};

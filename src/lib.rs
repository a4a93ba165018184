//! # Sales Statistics Library
//!
//! `salestats` is the computation core of a sales-analytics dashboard. It turns
//! a filtered snapshot of sales transactions into the numbers and labels that
//! the dashboard's charts and KPI cards display.
//!
//! ## Features
//!
//! - Bucket sales by day, week, month, quarter or year with axis labels
//! - Optionally fill periods without sales with zero-valued buckets
//! - Rank subgroups, products and customers by revenue (Pareto analysis)
//! - Count the entities needed to reach a share of total revenue
//! - Quantile-based top customer selection
//! - KPI summaries and customer purchase profiles
//! - Memoization of reports by filter selection
//!
//! ## Example
//!
//! ```
//! use salestats::analysis::{count_for_threshold, rank};
//!
//! let ranked = rank(vec![("A", 50.0), ("B", 30.0), ("C", 15.0), ("D", 5.0)]).unwrap();
//! assert_eq!(count_for_threshold(&ranked, 80.0), 2);
//! ```

pub mod analysis;
pub mod app;
pub mod config;
pub mod error;
pub mod filter;
pub mod plotting;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use app::{build_report, DashboardReport, DashboardState};
pub use config::DashboardConfig;
pub use error::{Error, Result};
pub use filter::FilterSelection;
pub use types::{BucketedPeriod, CacheKey, Granularity, RankedEntity, TimeSeries, Transaction};

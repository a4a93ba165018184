//! # Common Types
//!
//! This module contains the common types used throughout the library for
//! representing sales transactions, time buckets, ranked entities and caching.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A single sales transaction.
///
/// Records are never mutated; every aggregation produces new derived values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Date of the sale
    pub date: NaiveDate,
    /// Amount in local currency
    pub value: f64,
    /// Amount converted to US dollars
    pub value_usd: f64,
    /// Customer identifier
    pub customer_id: String,
    /// Customer display name
    pub customer_name: String,
    /// Product identifier
    pub product_id: String,
    /// Product description
    pub product_description: String,
    /// Product subgroup name
    pub subgroup: String,
    /// Geographic department
    pub department: String,
    /// City
    pub city: String,
    /// Invoice/document identifier, one per purchase event
    pub document_id: String,
}

/// A key used for caching derived reports.
///
/// Combines the fingerprint of the filter selection with the fingerprint of
/// the dashboard configuration the report was computed under.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct CacheKey {
    /// Fingerprint of the filter selection
    pub selection: u64,
    /// Fingerprint of the dashboard configuration
    pub config: u64,
}

/// Calendar granularity used to bucket transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl Granularity {
    /// All granularities, finest first.
    pub const ALL: [Granularity; 5] = [
        Granularity::Day,
        Granularity::Week,
        Granularity::Month,
        Granularity::Quarter,
        Granularity::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
            Granularity::Year => "year",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = Error;

    /// Accepts the English names and the dashboard's radio labels
    /// (`Dia`, `Semanal`, `Mensual`, `Trimestral`, `Anual`).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "day" | "dia" | "día" => Ok(Granularity::Day),
            "week" | "semanal" => Ok(Granularity::Week),
            "month" | "mensual" => Ok(Granularity::Month),
            "quarter" | "trimestral" => Ok(Granularity::Quarter),
            "year" | "anual" => Ok(Granularity::Year),
            other => Err(Error::InvalidArgument(format!(
                "unknown granularity '{}'",
                other
            ))),
        }
    }
}

/// One calendar bucket of a time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketedPeriod {
    /// First day of the bucket
    pub period_start: NaiveDate,
    /// Last day of the bucket (inclusive)
    pub period_end: NaiveDate,
    /// Sum of transaction values dated inside the bucket
    pub total_value: f64,
    /// Axis label for the bucket
    pub label: String,
}

/// A year marker drawn below the axis at a year boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearAnnotation {
    pub bucket_start: NaiveDate,
    pub year: String,
}

/// The result of bucketing a set of transactions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeSeries {
    pub granularity: Granularity,
    /// Buckets in ascending order of `period_start`
    pub periods: Vec<BucketedPeriod>,
    /// Side output of year markers, in bucket order
    pub year_annotations: Vec<YearAnnotation>,
}

impl TimeSeries {
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Sum of every bucket total.
    pub fn total(&self) -> f64 {
        self.periods.iter().map(|p| p.total_value).sum()
    }
}

/// An entity placed in descending value order with its share of the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntity {
    pub key: String,
    pub value: f64,
    /// 1-based rank
    pub rank: usize,
    /// Percentage of the grand total; negative for a net-negative entity
    pub share_pct: f64,
    /// Running share up to and including this entity, capped at 100
    pub cumulative_share_pct: f64,
}

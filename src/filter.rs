//! # Filter Selection
//!
//! The already-resolved filter values chosen in the dashboard sidebar:
//! departments, cities, product subgroups and an inclusive date range.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};
use crate::types::Transaction;

/// A conjunction of membership tests and a date range.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterSelection {
    pub departments: BTreeSet<String>,
    pub cities: BTreeSet<String>,
    pub subgroups: BTreeSet<String>,
    /// First included date
    pub start: NaiveDate,
    /// Last included date
    pub end: NaiveDate,
}

impl FilterSelection {
    /// Select every department, city and subgroup present in `records` over
    /// their full date span. Returns `None` when there are no records.
    pub fn all_from(records: &[Transaction]) -> Option<Self> {
        let start = records.iter().map(|r| r.date).min()?;
        let end = records.iter().map(|r| r.date).max()?;

        Some(Self {
            departments: records.iter().map(|r| r.department.clone()).collect(),
            cities: records.iter().map(|r| r.city.clone()).collect(),
            subgroups: records.iter().map(|r| r.subgroup.clone()).collect(),
            start,
            end,
        })
    }

    /// Check the selection can produce a meaningful view.
    pub fn validate(&self) -> Result<()> {
        if self.start > self.end {
            return Err(Error::InvalidArgument(format!(
                "start date {} is after end date {}",
                self.start, self.end
            )));
        }
        if self.departments.is_empty() {
            return Err(Error::EmptySelection { field: "department" });
        }
        if self.cities.is_empty() {
            return Err(Error::EmptySelection { field: "city" });
        }
        if self.subgroups.is_empty() {
            return Err(Error::EmptySelection { field: "subgroup" });
        }
        Ok(())
    }

    pub fn matches(&self, record: &Transaction) -> bool {
        self.departments.contains(&record.department)
            && self.cities.contains(&record.city)
            && self.subgroups.contains(&record.subgroup)
            && record.date >= self.start
            && record.date <= self.end
    }

    /// Validate the selection and return the matching records.
    ///
    /// A selection matching nothing yields an empty vector, not an error.
    pub fn apply(&self, records: &[Transaction]) -> Result<Vec<Transaction>> {
        self.validate()?;
        Ok(records.iter().filter(|r| self.matches(r)).cloned().collect())
    }

    /// Stable hash of the selection, used to memoize derived reports.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

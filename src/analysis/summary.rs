use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::types::Transaction;

/// Headline KPIs for a filtered snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SalesSummary {
    pub transaction_count: usize,
    /// Total sales in local currency
    pub total_value: f64,
    /// Total sales in US dollars
    pub total_value_usd: f64,
    pub unique_customers: usize,
    pub unique_products: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl SalesSummary {
    pub fn from_records(records: &[Transaction]) -> Self {
        let customers: HashSet<&str> = records.iter().map(|r| r.customer_id.as_str()).collect();
        let products: HashSet<&str> = records.iter().map(|r| r.product_id.as_str()).collect();

        Self {
            transaction_count: records.len(),
            total_value: records.iter().map(|r| r.value).sum(),
            total_value_usd: records.iter().map(|r| r.value_usd).sum(),
            unique_customers: customers.len(),
            unique_products: products.len(),
            first_date: records.iter().map(|r| r.date).min(),
            last_date: records.iter().map(|r| r.date).max(),
        }
    }
}

/// Purchasing profile of one customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub customer_name: String,
    pub total_value: f64,
    /// Distinct documents, i.e. purchase events
    pub purchase_count: usize,
    pub last_purchase: NaiveDate,
}

/// Per-customer totals, purchase frequency and recency, largest total first.
///
/// Customers with equal totals keep the order in which they first appear.
pub fn customer_profiles(records: &[Transaction]) -> Vec<CustomerProfile> {
    struct Acc<'a> {
        total: f64,
        documents: HashSet<&'a str>,
        last: NaiveDate,
    }

    let mut order: Vec<&str> = Vec::new();
    let mut accs: HashMap<&str, Acc> = HashMap::new();

    for record in records {
        let name = record.customer_name.as_str();
        let acc = accs.entry(name).or_insert_with(|| {
            order.push(name);
            Acc {
                total: 0.0,
                documents: HashSet::new(),
                last: record.date,
            }
        });
        acc.total += record.value;
        acc.documents.insert(record.document_id.as_str());
        acc.last = acc.last.max(record.date);
    }

    let mut profiles: Vec<CustomerProfile> = order
        .into_iter()
        .filter_map(|name| {
            accs.remove(name).map(|acc| CustomerProfile {
                customer_name: name.to_string(),
                total_value: acc.total,
                purchase_count: acc.documents.len(),
                last_purchase: acc.last,
            })
        })
        .collect();

    profiles.sort_by(|a, b| b.total_value.total_cmp(&a.total_value));
    profiles
}

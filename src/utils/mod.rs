mod aggregation;
pub mod format;

pub use aggregation::{by_customer, by_product, by_subgroup, sum_by};

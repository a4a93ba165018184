mod cache;
pub mod pareto;
pub mod summary;
pub mod temporal;


pub use cache::CacheManager;
pub use pareto::{
    count_for_threshold, count_within_threshold, quantile_cutoff, rank, top_by_quantile, top_n,
    try_count_for_threshold, ParetoSummary,
};
pub use summary::{customer_profiles, CustomerProfile, SalesSummary};
pub use temporal::{aggregate, aggregate_dense, aggregate_range};

use futures::try_join;
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::{spawn_blocking, JoinHandle};

use crate::analysis::{
    aggregate, aggregate_dense, count_within_threshold, customer_profiles, rank, top_by_quantile,
    top_n, CustomerProfile, ParetoSummary, SalesSummary,
};
use crate::config::DashboardConfig;
use crate::error::{Error, Result};
use crate::plotting::{BarChart, ParetoChart, TrendChart};
use crate::types::{RankedEntity, TimeSeries, Transaction};
use crate::utils::{by_customer, by_product, by_subgroup};

/// Every view of the dashboard, computed from one filtered snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub summary: SalesSummary,
    pub trend: TimeSeries,
    pub trend_chart: TrendChart,
    pub subgroups: Vec<RankedEntity>,
    pub products: Vec<RankedEntity>,
    pub customers: Vec<RankedEntity>,
    /// Subgroups needed to reach the Pareto threshold
    pub subgroup_pareto: ParetoSummary,
    /// Products needed to reach the Pareto threshold
    pub product_pareto: ParetoSummary,
    /// Customers needed to reach the customer threshold
    pub customer_pareto: ParetoSummary,
    /// Customers whose cumulative share stays within the customer threshold
    pub customers_within_threshold: usize,
    /// Customers at or above the configured value quantile
    pub customers_above_quantile: usize,
    pub customer_profiles: Vec<CustomerProfile>,
    pub top_subgroups_chart: BarChart,
    pub top_products_chart: BarChart,
    pub customer_chart: ParetoChart,
}

impl DashboardReport {
    /// Products inside the Pareto prefix, for the "80% of sales" table.
    pub fn pareto_products(&self) -> &[RankedEntity] {
        top_n(&self.products, self.product_pareto.count)
    }

    /// Profiles of the customers inside the customer threshold.
    pub fn top_customer_profiles(&self) -> Vec<&CustomerProfile> {
        self.customers
            .iter()
            .take(self.customers_within_threshold)
            .filter_map(|c| self.customer_profiles.iter().find(|p| p.customer_name == c.key))
            .collect()
    }
}

fn trend_view(records: &[Transaction], config: &DashboardConfig) -> Result<TimeSeries> {
    if config.dense_trend {
        aggregate_dense(records, config.granularity)
    } else {
        aggregate(records, config.granularity)
    }
}

fn assemble(
    config: &DashboardConfig,
    summary: SalesSummary,
    trend: TimeSeries,
    subgroups: Vec<RankedEntity>,
    products: Vec<RankedEntity>,
    customers: Vec<RankedEntity>,
    customer_profiles: Vec<CustomerProfile>,
) -> Result<DashboardReport> {
    let customers_within_threshold = count_within_threshold(&customers, config.customer_threshold_pct);
    let customers_above_quantile = top_by_quantile(&customers, config.customer_quantile)?.len();
    let customer_pareto = ParetoSummary::from_ranked(&customers, config.customer_threshold_pct);

    Ok(DashboardReport {
        trend_chart: TrendChart::from_series(&trend),
        subgroup_pareto: ParetoSummary::from_ranked(&subgroups, config.pareto_threshold_pct),
        product_pareto: ParetoSummary::from_ranked(&products, config.pareto_threshold_pct),
        top_subgroups_chart: BarChart::top(
            &subgroups,
            config.top_n,
            format!("Top {} Subgrupos por Ventas Totales", config.top_n),
        ),
        top_products_chart: BarChart::top(
            &products,
            config.top_n,
            format!("Top {} Productos por Ventas Totales", config.top_n),
        ),
        customer_chart: ParetoChart::from_ranked(&customers, customers_within_threshold),
        customer_pareto,
        customers_within_threshold,
        customers_above_quantile,
        summary,
        trend,
        subgroups,
        products,
        customers,
        customer_profiles,
    })
}

/// Compute every dashboard view from an already filtered snapshot.
///
/// An empty snapshot yields a report of empty series and zero totals.
pub fn build_report(records: &[Transaction], config: &DashboardConfig) -> Result<DashboardReport> {
    config.validate()?;
    let start_time = Instant::now();

    let report = assemble(
        config,
        SalesSummary::from_records(records),
        trend_view(records, config)?,
        rank(by_subgroup(records))?,
        rank(by_product(records))?,
        rank(by_customer(records))?,
        customer_profiles(records),
    )?;

    debug!(
        "Built report for {} records in {:.2}ms",
        records.len(),
        start_time.elapsed().as_secs_f64() * 1000.0
    );
    Ok(report)
}

fn spawn_view<T, F>(records: &Arc<[Transaction]>, view: F) -> JoinHandle<Result<T>>
where
    T: Send + 'static,
    F: FnOnce(&[Transaction]) -> Result<T> + Send + 'static,
{
    let records = Arc::clone(records);
    spawn_blocking(move || view(&records))
}

async fn join_view<T>(handle: JoinHandle<Result<T>>) -> Result<T> {
    handle.await.map_err(|e| Error::Task(e.to_string()))?
}

/// Same report as [`build_report`], computing the independent views on
/// blocking tasks that share the immutable snapshot.
pub async fn build_report_async(
    records: Arc<[Transaction]>,
    config: DashboardConfig,
) -> Result<DashboardReport> {
    config.validate()?;
    let start_time = Instant::now();

    let trend_config = config.clone();
    let (summary, trend, subgroups, products, customers, profiles) = try_join!(
        join_view(spawn_view(&records, |r| Ok(SalesSummary::from_records(r)))),
        join_view(spawn_view(&records, move |r| trend_view(r, &trend_config))),
        join_view(spawn_view(&records, |r| rank(by_subgroup(r)))),
        join_view(spawn_view(&records, |r| rank(by_product(r)))),
        join_view(spawn_view(&records, |r| rank(by_customer(r)))),
        join_view(spawn_view(&records, |r| Ok(customer_profiles(r)))),
    )?;

    let report = assemble(&config, summary, trend, subgroups, products, customers, profiles)?;
    debug!(
        "Built report for {} records concurrently in {:.2}ms",
        records.len(),
        start_time.elapsed().as_secs_f64() * 1000.0
    );
    Ok(report)
}

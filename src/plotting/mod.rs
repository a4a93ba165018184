//! Chart-ready series for the presentation layer. Drawing is left to the caller.

mod chart;

#[cfg(test)]
mod tests;

pub use chart::{
    calculate_adaptive_range, trend_title, BarChart, ParetoChart, ParetoRow, TrendChart,
    TrendPoint,
};

use serde::{Deserialize, Serialize};

use crate::types::{Granularity, RankedEntity, TimeSeries, YearAnnotation};

const VALUE_AXIS_TITLE: &str = "Ventas Totales (Pesos)";

/// A labelled point on the sales trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub label: String,
    pub value: f64,
}

/// Line chart of sales over time, ready to hand to a charting library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendChart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub points: Vec<TrendPoint>,
    /// Year markers drawn below the axis
    pub annotations: Vec<YearAnnotation>,
    pub y_range: (f64, f64),
}

impl TrendChart {
    pub fn from_series(series: &TimeSeries) -> Self {
        let points: Vec<TrendPoint> = series
            .periods
            .iter()
            .map(|p| TrendPoint {
                label: p.label.clone(),
                value: p.total_value,
            })
            .collect();
        let values: Vec<f64> = points.iter().map(|p| p.value).collect();

        Self {
            title: trend_title(series.granularity).to_string(),
            x_title: match series.granularity {
                Granularity::Week => "Semana",
                _ => "Fecha",
            }
            .to_string(),
            y_title: VALUE_AXIS_TITLE.to_string(),
            points,
            annotations: series.year_annotations.clone(),
            y_range: calculate_adaptive_range(&values),
        }
    }
}

/// Chart title for a trend at the given granularity.
pub fn trend_title(granularity: Granularity) -> &'static str {
    match granularity {
        Granularity::Day => "Evolución de Ventas Diarias",
        Granularity::Week => "Evolución de Ventas Semanales",
        Granularity::Month => "Evolución de Ventas Mensuales",
        Granularity::Quarter => "Evolución de Ventas Trimestrales",
        Granularity::Year => "Evolución de Ventas Anuales",
    }
}

/// One bar of a Pareto chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParetoRow {
    pub rank: usize,
    pub key: String,
    pub value: f64,
    pub cumulative_share_pct: f64,
    /// Whether the entity belongs to the highlighted top group
    pub highlighted: bool,
}

/// Bars by rank with a cumulative share line on a secondary axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParetoChart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub y2_title: String,
    pub rows: Vec<ParetoRow>,
}

impl ParetoChart {
    /// Build the chart, highlighting the first `highlight_count` entities.
    pub fn from_ranked(ranked: &[RankedEntity], highlight_count: usize) -> Self {
        Self {
            title: "Distribución de Valor de Clientes - Principio de Pareto".to_string(),
            x_title: "Ranking de Clientes".to_string(),
            y_title: "Ventas Totales".to_string(),
            y2_title: "Porcentaje Acumulado (%)".to_string(),
            rows: ranked
                .iter()
                .map(|e| ParetoRow {
                    rank: e.rank,
                    key: e.key.clone(),
                    value: e.value,
                    cumulative_share_pct: e.cumulative_share_pct,
                    highlighted: e.rank <= highlight_count,
                })
                .collect(),
        }
    }
}

/// Horizontal bar chart of the top entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub title: String,
    /// Bars from smallest to largest so the largest is drawn on top
    pub bars: Vec<(String, f64)>,
}

impl BarChart {
    pub fn top(ranked: &[RankedEntity], n: usize, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            bars: ranked
                .iter()
                .take(n)
                .rev()
                .map(|e| (e.key.clone(), e.value))
                .collect(),
        }
    }
}

/// Value axis range that keeps extreme outliers from flattening the chart.
pub fn calculate_adaptive_range(values: &[f64]) -> (f64, f64) {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    if sorted.is_empty() {
        return (0.0, 1.0);
    }

    // Values beyond the 95th percentile are treated as outliers
    let p95_idx = ((sorted.len() as f64 * 0.95) as usize)
        .max(1)
        .min(sorted.len() - 1);
    let normal_max = sorted[p95_idx];
    let absolute_max = sorted[sorted.len() - 1];

    let display_max = if absolute_max > normal_max * 2.0 {
        normal_max * 1.2
    } else {
        absolute_max * 1.1
    };

    let display_min = sorted[0].min(0.0);
    if display_max <= display_min {
        return (display_min, display_min + 1.0);
    }
    (display_min, display_max)
}

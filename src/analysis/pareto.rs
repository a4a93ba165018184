use log::debug;
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, OrderStatistics};
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::types::RankedEntity;

/// Slack allowed when comparing a cumulative share against a threshold, so
/// that e.g. 50% + 30% reaching 80% is not lost to rounding.
const THRESHOLD_EPSILON: f64 = 1e-9;

/// Rank entities by descending value and compute each one's share of the total.
///
/// Duplicate keys are summed into the position of their first occurrence.
/// Ties keep insertion order. Net-negative keys (refunds exceeding purchases)
/// rank last with a negative share; the cumulative share is capped at 100.
/// When the total is not positive every share is zero.
pub fn rank<I, K>(entities: I) -> Result<Vec<RankedEntity>>
where
    I: IntoIterator<Item = (K, f64)>,
    K: Into<String>,
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut summed: Vec<(String, f64)> = Vec::new();

    for (key, value) in entities {
        let key = key.into();
        if !value.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "non-finite value {} for '{}'",
                value, key
            )));
        }
        match positions.get(&key) {
            Some(&idx) => summed[idx].1 += value,
            None => {
                positions.insert(key.clone(), summed.len());
                summed.push((key, value));
            }
        }
    }

    // sort_by is stable, so equal values keep insertion order
    summed.sort_by(|a, b| b.1.total_cmp(&a.1));

    let total: f64 = summed.iter().map(|(_, v)| *v).sum();
    let mut running = 0.0;
    let ranked: Vec<RankedEntity> = summed
        .into_iter()
        .enumerate()
        .map(|(idx, (key, value))| {
            running += value;
            let (share_pct, cumulative_share_pct) = if total > 0.0 {
                (value / total * 100.0, (running / total * 100.0).min(100.0))
            } else {
                (0.0, 0.0)
            };
            RankedEntity {
                key,
                value,
                rank: idx + 1,
                share_pct,
                cumulative_share_pct,
            }
        })
        .collect();

    debug!("Ranked {} entities, total value {:.2}", ranked.len(), total);
    Ok(ranked)
}

/// Number of top entities needed to reach `threshold_pct` of the total value,
/// counting the entity that crosses the threshold.
///
/// A threshold at or below 0 yields 0; at or above 100 yields every entity.
/// When the total is not positive no entity holds any share, so thresholds
/// in between yield 0.
pub fn count_for_threshold(ranked: &[RankedEntity], threshold_pct: f64) -> usize {
    if ranked.is_empty() || threshold_pct.is_nan() || threshold_pct <= 0.0 {
        return 0;
    }
    if threshold_pct >= 100.0 {
        return ranked.len();
    }
    if ranked.last().map_or(true, |e| e.cumulative_share_pct <= 0.0) {
        return 0;
    }
    ranked
        .iter()
        .position(|e| e.cumulative_share_pct + THRESHOLD_EPSILON >= threshold_pct)
        .map(|idx| idx + 1)
        .unwrap_or(ranked.len())
}

/// Strict variant of [`count_for_threshold`]: rejects thresholds outside [0, 100].
pub fn try_count_for_threshold(ranked: &[RankedEntity], threshold_pct: f64) -> Result<usize> {
    if !(0.0..=100.0).contains(&threshold_pct) {
        return Err(Error::InvalidArgument(format!(
            "threshold {} outside [0, 100]",
            threshold_pct
        )));
    }
    Ok(count_for_threshold(ranked, threshold_pct))
}

/// Number of leading entities whose cumulative share stays at or below
/// `threshold_pct`. Unlike [`count_for_threshold`] the crossing entity is
/// excluded.
pub fn count_within_threshold(ranked: &[RankedEntity], threshold_pct: f64) -> usize {
    ranked
        .iter()
        .take_while(|e| e.cumulative_share_pct <= threshold_pct + THRESHOLD_EPSILON)
        .count()
}

/// The entity value at quantile `q` of all ranked values.
///
/// Linear interpolation between the order statistics around position
/// `(n - 1) * q` of the ascending values (R type 7). Returns `None` for an
/// empty input.
pub fn quantile_cutoff(ranked: &[RankedEntity], q: f64) -> Result<Option<f64>> {
    if !(0.0..=1.0).contains(&q) {
        return Err(Error::InvalidArgument(format!("quantile {} outside [0, 1]", q)));
    }
    if ranked.is_empty() {
        return Ok(None);
    }
    let mut data = Data::new(ranked.iter().map(|e| e.value).collect::<Vec<_>>());
    let h = (ranked.len() - 1) as f64 * q;
    let lower_idx = h.floor() as usize;
    let upper_idx = h.ceil() as usize;
    // order_statistic is 1-based
    let lower = data.order_statistic(lower_idx + 1);
    let upper = data.order_statistic(upper_idx + 1);
    Ok(Some(lower + (h - lower_idx as f64) * (upper - lower)))
}

/// Entities whose value is at or above the `q` quantile.
///
/// Since `ranked` is in descending value order the result is always a prefix.
pub fn top_by_quantile(ranked: &[RankedEntity], q: f64) -> Result<&[RankedEntity]> {
    let count = match quantile_cutoff(ranked, q)? {
        Some(cutoff) => ranked.iter().take_while(|e| e.value >= cutoff).count(),
        None => 0,
    };
    Ok(&ranked[..count])
}

/// The first `n` ranked entities.
pub fn top_n(ranked: &[RankedEntity], n: usize) -> &[RankedEntity] {
    &ranked[..n.min(ranked.len())]
}

/// Headline numbers for an 80/20 style narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParetoSummary {
    pub threshold_pct: f64,
    /// Entities needed to reach the threshold
    pub count: usize,
    pub total_entities: usize,
    /// `count` as a percentage of `total_entities`
    pub entity_pct: f64,
    /// Cumulative share of value held by the counted entities
    pub value_share_pct: f64,
}

impl ParetoSummary {
    pub fn from_ranked(ranked: &[RankedEntity], threshold_pct: f64) -> Self {
        let count = count_for_threshold(ranked, threshold_pct);
        Self::with_count(ranked, threshold_pct, count)
    }

    /// Summary of an explicit prefix length, e.g. from [`count_within_threshold`].
    pub fn with_count(ranked: &[RankedEntity], threshold_pct: f64, count: usize) -> Self {
        let count = count.min(ranked.len());
        let total_entities = ranked.len();
        let entity_pct = if total_entities > 0 {
            count as f64 / total_entities as f64 * 100.0
        } else {
            0.0
        };
        let value_share_pct = count
            .checked_sub(1)
            .map(|idx| ranked[idx].cumulative_share_pct)
            .unwrap_or(0.0);

        Self {
            threshold_pct,
            count,
            total_entities,
            entity_pct,
            value_share_pct,
        }
    }

    /// Entities outside the counted prefix.
    pub fn remaining(&self) -> usize {
        self.total_entities - self.count
    }
}

use chrono::{Datelike, Days, Months, NaiveDate};
use log::debug;
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::types::{BucketedPeriod, Granularity, TimeSeries, Transaction, YearAnnotation};

/// Month abbreviations used for month-granularity axis labels.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

/// Map a date to the first day of its containing bucket.
pub fn period_start(date: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Day => date,
        Granularity::Week => date - Days::new(u64::from(date.weekday().num_days_from_monday())),
        Granularity::Month => month_start(date),
        Granularity::Quarter => month_start(date) - Months::new(date.month0() % 3),
        Granularity::Year => date - Days::new(u64::from(date.ordinal0())),
    }
}

/// Start of the bucket following the one starting at `start`.
///
/// Returns `None` past the end of the representable calendar.
pub fn next_period_start(start: NaiveDate, granularity: Granularity) -> Option<NaiveDate> {
    match granularity {
        Granularity::Day => start.succ_opt(),
        Granularity::Week => start.checked_add_days(Days::new(7)),
        Granularity::Month => start.checked_add_months(Months::new(1)),
        Granularity::Quarter => start.checked_add_months(Months::new(3)),
        Granularity::Year => start.checked_add_months(Months::new(12)),
    }
}

/// Last day (inclusive) of the bucket starting at `start`.
pub fn period_end(start: NaiveDate, granularity: Granularity) -> NaiveDate {
    next_period_start(start, granularity)
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Axis label for the bucket starting at `start`.
pub fn period_label(start: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Day => start.format("%Y-%m-%d").to_string(),
        Granularity::Week => {
            // A week crossing a month boundary only shows the days inside
            // the month the bucket starts in.
            let week_end = period_end(start, Granularity::Week);
            let month_end = period_end(month_start(start), Granularity::Month);
            let end = week_end.min(month_end);
            format!(
                "{}/{} - {}/{}",
                start.month(),
                start.day(),
                end.month(),
                end.day()
            )
        }
        Granularity::Month => MONTH_ABBREVIATIONS[start.month0() as usize].to_string(),
        Granularity::Quarter => format!("Tri {}", start.month0() / 3 + 1),
        Granularity::Year => start.year().to_string(),
    }
}

/// Year marker for the bucket starting at `start`, if it sits on a year boundary.
pub fn year_annotation(start: NaiveDate, granularity: Granularity) -> Option<YearAnnotation> {
    let boundary = match granularity {
        Granularity::Day | Granularity::Week => false,
        Granularity::Month | Granularity::Quarter => start.month() == 1,
        Granularity::Year => true,
    };
    boundary.then(|| YearAnnotation {
        bucket_start: start,
        year: start.year().to_string(),
    })
}

/// Bucket transactions by calendar period and sum their values.
///
/// Only buckets containing at least one transaction are emitted. An empty
/// input yields an empty series.
pub fn aggregate(records: &[Transaction], granularity: Granularity) -> Result<TimeSeries> {
    let totals = bucket_totals(records, granularity, |_| true)?;
    let series = build_series(totals, granularity);
    debug!(
        "Aggregated {} records into {} {} buckets",
        records.len(),
        series.len(),
        granularity
    );
    Ok(series)
}

/// Like [`aggregate`], but every bucket between the first and the last
/// observed bucket is emitted, with a zero total when no transaction falls in it.
pub fn aggregate_dense(records: &[Transaction], granularity: Granularity) -> Result<TimeSeries> {
    let totals = bucket_totals(records, granularity, |_| true)?;
    let (first, last) = match (totals.keys().next(), totals.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Ok(TimeSeries { granularity, ..Default::default() }),
    };
    let series = build_series(fill_gaps(totals, first, last, granularity), granularity);
    debug!(
        "Aggregated {} records into {} dense {} buckets",
        records.len(),
        series.len(),
        granularity
    );
    Ok(series)
}

/// Dense aggregation over an explicit inclusive date range.
///
/// Every bucket touching `[start, end]` is emitted; transactions dated
/// outside the range are ignored.
pub fn aggregate_range(
    records: &[Transaction],
    granularity: Granularity,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<TimeSeries> {
    if start > end {
        return Err(Error::InvalidArgument(format!(
            "range start {} is after range end {}",
            start, end
        )));
    }
    let totals = bucket_totals(records, granularity, |date| date >= start && date <= end)?;
    let first = period_start(start, granularity);
    let last = period_start(end, granularity);
    Ok(build_series(fill_gaps(totals, first, last, granularity), granularity))
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

fn bucket_totals<F>(
    records: &[Transaction],
    granularity: Granularity,
    include: F,
) -> Result<BTreeMap<NaiveDate, f64>>
where
    F: Fn(NaiveDate) -> bool,
{
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in records.iter().filter(|r| include(r.date)) {
        if !record.value.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "non-finite value {} in transaction dated {}",
                record.value, record.date
            )));
        }
        *totals.entry(period_start(record.date, granularity)).or_insert(0.0) += record.value;
    }
    Ok(totals)
}

fn fill_gaps(
    mut totals: BTreeMap<NaiveDate, f64>,
    first: NaiveDate,
    last: NaiveDate,
    granularity: Granularity,
) -> BTreeMap<NaiveDate, f64> {
    let mut cursor = Some(first);
    while let Some(start) = cursor.filter(|s| *s <= last) {
        totals.entry(start).or_insert(0.0);
        cursor = next_period_start(start, granularity);
    }
    totals
}

fn build_series(totals: BTreeMap<NaiveDate, f64>, granularity: Granularity) -> TimeSeries {
    let mut periods = Vec::with_capacity(totals.len());
    let mut year_annotations = Vec::new();

    for (start, total_value) in totals {
        periods.push(BucketedPeriod {
            period_start: start,
            period_end: period_end(start, granularity),
            total_value,
            label: period_label(start, granularity),
        });
        year_annotations.extend(year_annotation(start, granularity));
    }

    TimeSeries {
        granularity,
        periods,
        year_annotations,
    }
}

//! Event-count line graph: monthly buckets across the year, daily buckets
//! inside a selected month.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::data::model::{month_name, month_span, Catalog, EventRecord, MonthSelection};

/// Days between 0001-01-01 and the Unix epoch; lets dates travel through
/// the plot as plain f64 day numbers without overflow checks.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Bucket granularity; follows the month selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketMode {
    Monthly,
    Daily,
}

/// One time bucket, positioned on the x axis by its day number.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketPoint {
    pub x: f64,
    pub date: NaiveDate,
    pub count: usize,
}

/// Chart state, rebuilt on every selection change. The x domain is the
/// full catalog span in `Monthly` mode and the whole calendar month in
/// `Daily` mode, even when the month has no events.
#[derive(Debug, Clone, PartialEq)]
pub struct LineGraph {
    pub title: String,
    pub mode: BucketMode,
    pub points: Vec<BucketPoint>,
    pub x_domain: (f64, f64),
    pub y_max: f64,
}

/// Continuous x coordinate for a date: days since 1970-01-01.
pub fn day_number(date: NaiveDate) -> f64 {
    (date.num_days_from_ce() - EPOCH_DAYS_FROM_CE) as f64
}

/// Inverse of [`day_number`], for axis ticks and hover labels. Returns
/// `None` for values far outside the representable calendar.
pub fn date_from_day(day: f64) -> Option<NaiveDate> {
    if !day.is_finite() || day.abs() > 3.0e6 {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(day.floor() as i32 + EPOCH_DAYS_FROM_CE)
}

impl LineGraph {
    /// Buckets the visible records according to the selection.
    pub fn build(catalog: &Catalog, visible: &[usize], selection: MonthSelection) -> Self {
        let records = visible.iter().filter_map(|&idx| catalog.records.get(idx));
        match selection {
            MonthSelection::All => Self::monthly(catalog, records),
            MonthSelection::Month(month) => Self::daily(catalog, records, month),
        }
    }

    fn monthly<'a>(catalog: &Catalog, records: impl Iterator<Item = &'a EventRecord>) -> Self {
        let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for record in records {
            if let Some(time) = record.time {
                let date = time.date_naive();
                let bucket = date.with_day(1).unwrap_or(date);
                *counts.entry(bucket).or_insert(0) += 1;
            }
        }
        let points = bucket_points(counts);
        let x_domain = (
            day_number(catalog.time_span.0.date_naive()),
            day_number(catalog.time_span.1.date_naive()),
        );
        LineGraph {
            title: format!("Earthquake Counts - {}", catalog.year),
            mode: BucketMode::Monthly,
            y_max: peak_count(&points),
            points,
            x_domain,
        }
    }

    fn daily<'a>(
        catalog: &Catalog,
        records: impl Iterator<Item = &'a EventRecord>,
        month: u8,
    ) -> Self {
        let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for record in records {
            if let Some(time) = record.time {
                *counts.entry(time.date_naive()).or_insert(0) += 1;
            }
        }
        let points = bucket_points(counts);
        let x_domain = match month_span(catalog.year, month) {
            Some((first, last)) => (day_number(first), day_number(last)),
            None => (
                points.first().map_or(0.0, |p| p.x),
                points.last().map_or(1.0, |p| p.x),
            ),
        };
        LineGraph {
            title: format!("Earthquake Counts - {}", month_name(month)),
            mode: BucketMode::Daily,
            y_max: peak_count(&points),
            points,
            x_domain,
        }
    }
}

fn bucket_points(counts: BTreeMap<NaiveDate, usize>) -> Vec<BucketPoint> {
    counts
        .into_iter()
        .map(|(date, count)| BucketPoint {
            x: day_number(date),
            date,
            count,
        })
        .collect()
}

/// Upper y bound: the tallest bucket, or 1 so an empty chart keeps a frame.
fn peak_count(points: &[BucketPoint]) -> f64 {
    points.iter().map(|p| p.count).max().unwrap_or(0).max(1) as f64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

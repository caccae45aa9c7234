use chrono::{DateTime, Datelike, NaiveDate, Utc};

use super::stats;

// ---------------------------------------------------------------------------
// EventRecord – one row of the catalog CSV
// ---------------------------------------------------------------------------

/// A single earthquake event.
///
/// Numeric fields hold NaN when the source column failed to parse; the
/// record itself is always kept so the map can still track its id.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub id: String,
    /// `None` when the timestamp column was empty or unparseable. Such
    /// records only show up under the `All` selection.
    pub time: Option<DateTime<Utc>>,
    pub latitude: f64,
    pub longitude: f64,
    pub magnitude: f64,
    /// Hypocenter depth in km. Negative values are real (events above the
    /// reference ellipsoid) but the depth histogram excludes them.
    pub depth: f64,
    pub place: String,
}

// ---------------------------------------------------------------------------
// Catalog – the complete loaded dataset
// ---------------------------------------------------------------------------

/// An in-memory catalog plus the derived values that stay fixed for the
/// lifetime of the dataset. The scatter plot and the month selector read
/// these instead of recomputing them per frame.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub records: Vec<EventRecord>,
    /// Year of the earliest timestamp; chart titles and month spans use it.
    pub year: i32,
    pub time_span: (DateTime<Utc>, DateTime<Utc>),
    /// Extent of the finite depths, in km.
    pub depth_extent: (f64, f64),
    /// Extent of the finite magnitudes.
    pub magnitude_extent: (f64, f64),
}

impl Catalog {
    /// Build a catalog from parsed records. Returns `None` when the records
    /// carry no usable timestamp, magnitude, or depth, since every chart
    /// would be empty.
    pub fn from_records(records: Vec<EventRecord>) -> Option<Self> {
        let time_span = {
            let mut times = records.iter().filter_map(|record| record.time);
            let first = times.next()?;
            times.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)))
        };
        let depth_extent = stats::finite_extent(records.iter().map(|r| r.depth))?;
        let magnitude_extent = stats::finite_extent(records.iter().map(|r| r.magnitude))?;
        Some(Catalog {
            year: time_span.0.year(),
            records,
            time_span,
            depth_extent,
            magnitude_extent,
        })
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// MonthSelection – the single filter control
// ---------------------------------------------------------------------------

/// Month names used by the selector and the chart titles.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The current filter: the whole catalog or one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthSelection {
    #[default]
    All,
    /// 1-based month number.
    Month(u8),
}

impl MonthSelection {
    /// True when `time` falls inside the selection. Records without a
    /// parseable timestamp only match `All`.
    pub fn matches(&self, time: Option<DateTime<Utc>>) -> bool {
        match (self, time) {
            (MonthSelection::All, _) => true,
            (MonthSelection::Month(month), Some(t)) => t.month() == u32::from(*month),
            (MonthSelection::Month(_), None) => false,
        }
    }

    /// Chart title suffix: the catalog year for `All`, the month name
    /// otherwise.
    pub fn title_suffix(&self, year: i32) -> String {
        match self {
            MonthSelection::All => year.to_string(),
            MonthSelection::Month(month) => month_name(*month).to_string(),
        }
    }
}

/// Full English name for a 1-based month number.
pub fn month_name(month: u8) -> &'static str {
    MONTH_NAMES[usize::from(month.clamp(1, 12)) - 1]
}

/// First and last day of `month` in `year`, or `None` for an invalid month.
pub fn month_span(year: i32, month: u8) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, u32::from(month), 1)?;
    let next = if month >= 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, u32::from(month) + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}

// ---------------------------------------------------------------------------
// WorldBoundaries – landmass outlines for the basemap
// ---------------------------------------------------------------------------

/// Landmass outlines as closed lon/lat rings, ready for projection.
#[derive(Debug, Clone, Default)]
pub struct WorldBoundaries {
    pub rings: Vec<Vec<[f64; 2]>>,
}

impl WorldBoundaries {
    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, time: Option<&str>, magnitude: f64, depth: f64) -> EventRecord {
        EventRecord {
            id: id.to_string(),
            time: time.map(|t| {
                DateTime::parse_from_rfc3339(t)
                    .expect("test timestamp")
                    .with_timezone(&Utc)
            }),
            latitude: 10.0,
            longitude: 20.0,
            magnitude,
            depth,
            place: String::new(),
        }
    }

    #[test]
    fn catalog_derives_year_and_extents() {
        let catalog = Catalog::from_records(vec![
            record("a", Some("2023-03-14T10:00:00Z"), 5.5, 40.0),
            record("b", Some("2023-01-02T00:00:00Z"), 4.1, 12.5),
            record("c", Some("2023-11-30T23:59:59Z"), 7.2, 610.0),
        ])
        .expect("catalog");
        assert_eq!(catalog.year, 2023);
        assert_eq!(
            catalog.time_span.0,
            DateTime::parse_from_rfc3339("2023-01-02T00:00:00Z").unwrap()
        );
        assert_eq!(
            catalog.time_span.1,
            DateTime::parse_from_rfc3339("2023-11-30T23:59:59Z").unwrap()
        );
        assert_eq!(catalog.depth_extent, (12.5, 610.0));
        assert_eq!(catalog.magnitude_extent, (4.1, 7.2));
    }

    #[test]
    fn catalog_extents_skip_nan() {
        let catalog = Catalog::from_records(vec![
            record("a", Some("2024-06-01T00:00:00Z"), f64::NAN, 40.0),
            record("b", Some("2024-06-02T00:00:00Z"), 5.0, f64::NAN),
        ])
        .expect("catalog");
        assert_eq!(catalog.year, 2024);
        assert_eq!(catalog.magnitude_extent, (5.0, 5.0));
        assert_eq!(catalog.depth_extent, (40.0, 40.0));
    }

    #[test]
    fn catalog_rejects_unusable_records() {
        // No timestamps at all.
        assert!(Catalog::from_records(vec![record("a", None, 5.0, 10.0)]).is_none());
        // No finite magnitude.
        assert!(Catalog::from_records(vec![record(
            "a",
            Some("2023-01-01T00:00:00Z"),
            f64::NAN,
            10.0
        )])
        .is_none());
        // Empty input.
        assert!(Catalog::from_records(Vec::new()).is_none());
    }

    #[test]
    fn month_selection_matches() {
        let march = record("a", Some("2023-03-14T10:00:00Z"), 5.0, 10.0).time;
        assert!(MonthSelection::All.matches(march));
        assert!(MonthSelection::All.matches(None));
        assert!(MonthSelection::Month(3).matches(march));
        assert!(!MonthSelection::Month(4).matches(march));
        assert!(!MonthSelection::Month(3).matches(None));
    }

    #[test]
    fn month_names_and_spans() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");

        let (first, last) = month_span(2023, 2).expect("february");
        assert_eq!(first, NaiveDate::from_ymd_opt(2023, 2, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());

        let (_, last) = month_span(2024, 2).expect("leap february");
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let (_, last) = month_span(2023, 12).expect("december");
        assert_eq!(last, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());

        assert!(month_span(2023, 0).is_none());
        assert!(month_span(2023, 13).is_none());
    }

    #[test]
    fn title_suffix_follows_selection() {
        assert_eq!(MonthSelection::All.title_suffix(2023), "2023");
        assert_eq!(MonthSelection::Month(4).title_suffix(2023), "April");
    }
}

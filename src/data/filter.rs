use super::model::{Catalog, MonthSelection};

// ---------------------------------------------------------------------------
// Month filter: the one predicate every chart shares
// ---------------------------------------------------------------------------

/// Return indices of records that match the current month selection, in
/// catalog order.
///
/// A record passes when:
/// * The selection is `All` → passes (including records without a timestamp)
/// * The selection is `Month(m)` and the record's timestamp falls in calendar
///   month `m` → passes
/// * The selection is `Month(m)` and the timestamp is missing → fails
pub fn filtered_indices(catalog: &Catalog, selection: MonthSelection) -> Vec<usize> {
    catalog
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| selection.matches(record.time))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::EventRecord;
    use chrono::{DateTime, Utc};

    fn record(id: &str, time: Option<&str>) -> EventRecord {
        EventRecord {
            id: id.to_string(),
            time: time.map(|t| {
                DateTime::parse_from_rfc3339(t)
                    .expect("test timestamp")
                    .with_timezone(&Utc)
            }),
            latitude: 0.0,
            longitude: 0.0,
            magnitude: 5.0,
            depth: 10.0,
            place: String::new(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_records(vec![
            record("a", Some("2023-01-15T00:00:00Z")),
            record("b", Some("2023-04-02T12:00:00Z")),
            record("c", Some("2023-04-28T23:00:00Z")),
            record("d", Some("2023-12-31T06:00:00Z")),
            record("e", None),
        ])
        .expect("catalog")
    }

    #[test]
    fn all_selects_every_record() {
        let catalog = catalog();
        assert_eq!(
            filtered_indices(&catalog, MonthSelection::All),
            vec![0, 1, 2, 3, 4]
        );
    }

    #[test]
    fn month_selects_an_ordered_subset() {
        let catalog = catalog();
        let april = filtered_indices(&catalog, MonthSelection::Month(4));
        assert_eq!(april, vec![1, 2]);

        let all = filtered_indices(&catalog, MonthSelection::All);
        assert!(april.iter().all(|i| all.contains(i)));
        assert!(april.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn untimed_records_only_appear_under_all() {
        let catalog = catalog();
        for month in 1..=12u8 {
            let indices = filtered_indices(&catalog, MonthSelection::Month(month));
            assert!(!indices.contains(&4), "month {month} leaked an untimed record");
        }
    }

    #[test]
    fn months_partition_the_timed_records() {
        let catalog = catalog();
        let mut seen: Vec<usize> = Vec::new();
        for month in 1..=12u8 {
            seen.extend(filtered_indices(&catalog, MonthSelection::Month(month)));
        }
        seen.sort_unstable();
        // Every record except the untimed one lands in exactly one month.
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    #[test]
    fn empty_month_yields_no_indices() {
        let catalog = catalog();
        assert!(filtered_indices(&catalog, MonthSelection::Month(7)).is_empty());
    }
}

use crate::charts::histogram::Histogram;
use crate::charts::line_graph::LineGraph;
use crate::charts::map_view::MapView;
use crate::charts::scatter::ScatterPlot;
use crate::data::filter::filtered_indices;
use crate::data::model::{Catalog, EventRecord, MonthSelection, WorldBoundaries};

// ---------------------------------------------------------------------------
// Dashboard – one selection, five charts
// ---------------------------------------------------------------------------

/// The chart models plus the selection that produced them.
///
/// The month selector is the only filter, and [`Dashboard::set_selection`]
/// is the only update path: it recomputes the visible index set once and
/// pushes it into every chart in the same pass, so the panels can never
/// disagree about what is selected.
pub struct Dashboard {
    pub catalog: Catalog,
    pub selection: MonthSelection,
    /// Indices of records matching the current selection (cached).
    pub visible: Vec<usize>,
    pub map: MapView,
    pub line: LineGraph,
    pub scatter: ScatterPlot,
    pub magnitude_histogram: Histogram,
    pub depth_histogram: Histogram,
}

impl Dashboard {
    /// Build every chart for the full catalog (`All` selection).
    pub fn new(catalog: Catalog, world: &WorldBoundaries) -> Self {
        let mut dashboard = Dashboard {
            selection: MonthSelection::All,
            visible: Vec::new(),
            map: MapView::new(world),
            line: LineGraph::build(&catalog, &[], MonthSelection::All),
            scatter: ScatterPlot::new(&catalog),
            magnitude_histogram: Histogram::magnitudes(std::iter::empty(), String::new()),
            depth_histogram: Histogram::depths(std::iter::empty(), String::new()),
            catalog,
        };
        dashboard.set_selection(MonthSelection::All);
        dashboard
    }

    /// Refilter and fan out to all five charts.
    pub fn set_selection(&mut self, selection: MonthSelection) {
        self.selection = selection;
        self.visible = filtered_indices(&self.catalog, selection);

        // Map and scatter reconcile in place; the rest rebuild.
        self.map.update(&self.catalog, &self.visible);
        self.scatter.update(&self.catalog, &self.visible, selection);
        self.line = LineGraph::build(&self.catalog, &self.visible, selection);

        let suffix = selection.title_suffix(self.catalog.year);
        let magnitudes = Histogram::magnitudes(
            self.visible_values(|record| record.magnitude),
            format!("Histogram of Magnitudes - {suffix}"),
        );
        let depths = Histogram::depths(
            self.visible_values(|record| record.depth),
            format!("Histogram of Depths - {suffix}"),
        );
        self.magnitude_histogram = magnitudes;
        self.depth_histogram = depths;
    }

    fn visible_values<'a>(
        &'a self,
        value: impl Fn(&EventRecord) -> f64 + 'a,
    ) -> impl Iterator<Item = f64> + 'a {
        self.visible
            .iter()
            .filter_map(move |&idx| self.catalog.records.get(idx).map(&value))
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dashboard (None until a catalog loads).
    pub dashboard: Option<Dashboard>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded catalog; the selection resets to `All`.
    pub fn set_catalog(&mut self, catalog: Catalog, world: &WorldBoundaries) {
        self.dashboard = Some(Dashboard::new(catalog, world));
        self.status_message = None;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn record(id: &str, time: &str, magnitude: f64, depth: f64) -> EventRecord {
        EventRecord {
            id: id.to_string(),
            time: Some(
                DateTime::parse_from_rfc3339(time)
                    .expect("test timestamp")
                    .with_timezone(&Utc),
            ),
            latitude: 10.0,
            longitude: 20.0,
            magnitude,
            depth,
            place: format!("near {id}"),
        }
    }

    fn dashboard() -> Dashboard {
        let catalog = Catalog::from_records(vec![
            record("a", "2023-01-05T00:00:00Z", 4.1, 10.0),
            record("b", "2023-04-02T00:00:00Z", 5.4, 80.0),
            record("c", "2023-04-17T00:00:00Z", 6.0, 120.0),
            record("d", "2023-09-30T00:00:00Z", 7.3, 600.0),
        ])
        .expect("catalog");
        Dashboard::new(catalog, &WorldBoundaries::default())
    }

    fn total(histogram: &Histogram) -> usize {
        histogram.bins.iter().map(|bin| bin.count).sum()
    }

    #[test]
    fn new_dashboard_shows_everything() {
        let dashboard = dashboard();
        assert_eq!(dashboard.selection, MonthSelection::All);
        assert_eq!(dashboard.visible, vec![0, 1, 2, 3]);
        assert_eq!(dashboard.map.markers.len(), 4);
        assert_eq!(dashboard.scatter.points.len(), 4);
        assert_eq!(total(&dashboard.magnitude_histogram), 4);
        assert_eq!(total(&dashboard.depth_histogram), 4);
        assert_eq!(
            dashboard.magnitude_histogram.title,
            "Histogram of Magnitudes - 2023"
        );
    }

    #[test]
    fn one_selection_change_updates_all_five_charts() {
        let mut dashboard = dashboard();
        dashboard.set_selection(MonthSelection::Month(4));

        assert_eq!(dashboard.visible, vec![1, 2]);
        assert_eq!(dashboard.map.markers.len(), 2);
        assert_eq!(dashboard.line.points.len(), 2);
        assert_eq!(dashboard.scatter.points.len(), 2);
        assert_eq!(total(&dashboard.magnitude_histogram), 2);
        assert_eq!(total(&dashboard.depth_histogram), 2);

        assert_eq!(dashboard.line.title, "Earthquake Counts - April");
        assert_eq!(
            dashboard.scatter.title,
            "Earthquake Magnitude vs Depth - April"
        );
        assert_eq!(
            dashboard.magnitude_histogram.title,
            "Histogram of Magnitudes - April"
        );
        assert_eq!(
            dashboard.depth_histogram.title,
            "Histogram of Depths - April"
        );
    }

    #[test]
    fn returning_to_all_restores_the_full_view() {
        let mut dashboard = dashboard();
        let markers = dashboard.map.markers.clone();
        let line = dashboard.line.clone();
        let scatter = dashboard.scatter.clone();
        let magnitudes = dashboard.magnitude_histogram.clone();
        let depths = dashboard.depth_histogram.clone();

        dashboard.set_selection(MonthSelection::Month(4));
        dashboard.set_selection(MonthSelection::All);

        assert_eq!(dashboard.visible, vec![0, 1, 2, 3]);
        assert_eq!(dashboard.map.markers, markers);
        assert_eq!(dashboard.line, line);
        assert_eq!(dashboard.scatter, scatter);
        assert_eq!(dashboard.magnitude_histogram, magnitudes);
        assert_eq!(dashboard.depth_histogram, depths);
    }

    #[test]
    fn empty_months_leave_empty_charts() {
        let mut dashboard = dashboard();
        dashboard.set_selection(MonthSelection::Month(7));

        assert!(dashboard.visible.is_empty());
        assert!(dashboard.map.markers.is_empty());
        assert!(dashboard.line.points.is_empty());
        assert!(dashboard.scatter.points.is_empty());
        assert_eq!(total(&dashboard.magnitude_histogram), 0);
        assert_eq!(dashboard.magnitude_histogram.mean, None);
    }

    #[test]
    fn set_catalog_resets_the_selection() {
        let mut state = AppState::default();
        assert!(state.dashboard.is_none());

        let world = WorldBoundaries::default();
        let catalog = Catalog::from_records(vec![record("a", "2023-01-05T00:00:00Z", 4.1, 10.0)])
            .expect("catalog");
        state.status_message = Some("previous failure".to_string());
        state.set_catalog(catalog, &world);

        let dashboard = state.dashboard.as_ref().expect("dashboard");
        assert_eq!(dashboard.selection, MonthSelection::All);
        assert_eq!(state.status_message, None);
    }
}

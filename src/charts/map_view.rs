//! World map: projected landmass, graticule, and one marker per event id.
//!
//! Markers are reconciled incrementally instead of rebuilt. On every
//! selection change, ids that left the selection are removed, ids that
//! stayed are refreshed in place, and new ids are inserted. Running the
//! same update twice changes nothing, which also keeps the density
//! texture cache stable.

use std::collections::BTreeMap;

use crate::color::MagnitudeBand;
use crate::data::geo;
use crate::data::model::{Catalog, WorldBoundaries};

/// Marker radius in screen pixels.
pub const MARKER_RADIUS: f32 = 2.5;

/// One map marker. Events whose coordinates fail to project keep a marker
/// with no position, so reconciliation still tracks their ids.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub record_idx: usize,
    /// Projected Equal Earth coordinate.
    pub position: Option<[f64; 2]>,
    /// `None` when the magnitude failed to parse; drawn gray.
    pub band: Option<MagnitudeBand>,
}

/// Map state for the current selection.
#[derive(Debug, Clone)]
pub struct MapView {
    /// Landmass outlines, already projected.
    pub land_rings: Vec<Vec<[f64; 2]>>,
    pub graticule: Vec<Vec<[f64; 2]>>,
    pub sphere: Vec<[f64; 2]>,
    /// Visible markers keyed by event id.
    pub markers: BTreeMap<String, Marker>,
    pub show_density: bool,
    /// Bumped whenever the marker set actually changes; the density
    /// texture cache keys on it.
    pub density_rev: u64,
}

impl MapView {
    /// Projects the landmass outlines once; markers start empty.
    pub fn new(world: &WorldBoundaries) -> Self {
        let land_rings = world
            .rings
            .iter()
            .map(|ring| {
                ring.iter()
                    .filter_map(|&[lon, lat]| geo::equal_earth(lon, lat))
                    .collect()
            })
            .collect();
        MapView {
            land_rings,
            graticule: geo::graticule(),
            sphere: geo::sphere_outline(),
            markers: BTreeMap::new(),
            show_density: false,
            density_rev: 0,
        }
    }

    /// Reconciles the marker set against the current selection. When two
    /// visible records share an id, the first occurrence wins and the map
    /// shows a single marker for it.
    pub fn update(&mut self, catalog: &Catalog, visible: &[usize]) {
        let mut desired: BTreeMap<&str, usize> = BTreeMap::new();
        for &idx in visible {
            if let Some(record) = catalog.records.get(idx) {
                desired.entry(record.id.as_str()).or_insert(idx);
            }
        }

        let before = self.markers.len();
        self.markers
            .retain(|id, _| desired.contains_key(id.as_str()));
        let mut changed = self.markers.len() != before;

        for (id, idx) in desired {
            let record = &catalog.records[idx];
            let marker = Marker {
                record_idx: idx,
                position: geo::equal_earth(record.longitude, record.latitude),
                band: MagnitudeBand::classify(record.magnitude),
            };
            match self.markers.get_mut(id) {
                Some(existing) => {
                    if *existing != marker {
                        *existing = marker;
                        changed = true;
                    }
                }
                None => {
                    self.markers.insert(id.to_string(), marker);
                    changed = true;
                }
            }
        }

        if changed {
            self.density_rev += 1;
        }
    }

    /// Projected positions feeding the density layer.
    pub fn marker_positions(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.markers.values().filter_map(|marker| marker.position)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

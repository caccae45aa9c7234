use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use geojson::{GeoJson, Value as GeoValue};
use serde::Deserialize;
use thiserror::Error;

use super::model::{Catalog, EventRecord, WorldBoundaries};

/// Columns the catalog CSV must provide. Anything else is ignored, so a
/// raw USGS export (22 columns) loads unchanged.
pub const REQUIRED_COLUMNS: [&str; 7] =
    ["time", "latitude", "longitude", "mag", "depth", "place", "id"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Load failures. The CSV reader is forgiving about values (a field that
/// fails to parse degrades to NaN or `None` and the record is kept) but
/// strict about shape: missing columns and empty catalogs are fatal.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog CSV is missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("failed to parse GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),
    #[error("{path} contains no polygon features")]
    NoPolygons { path: PathBuf },
    #[error("catalog contains no usable events")]
    EmptyCatalog,
}

// ---------------------------------------------------------------------------
// Catalog (CSV)
// ---------------------------------------------------------------------------

/// One CSV row as raw text. Numeric coercion happens afterwards so that a
/// malformed field degrades to NaN instead of rejecting the whole record.
#[derive(Debug, Deserialize)]
struct RawEventRow {
    #[serde(default)]
    time: String,
    #[serde(default)]
    latitude: String,
    #[serde(default)]
    longitude: String,
    #[serde(default)]
    mag: String,
    #[serde(default)]
    depth: String,
    #[serde(default)]
    place: String,
    #[serde(default)]
    id: String,
}

/// Load the earthquake catalog CSV at `path`.
pub fn load_catalog(path: &Path) -> Result<Catalog, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = read_catalog(BufReader::new(file))?;
    log::info!(
        "loaded {} events from {} (year {}, magnitudes {:.1}..{:.1})",
        catalog.len(),
        path.display(),
        catalog.year,
        catalog.magnitude_extent.0,
        catalog.magnitude_extent.1
    );
    Ok(catalog)
}

/// Read an earthquake catalog from any CSV source.
pub fn read_catalog<R: Read>(reader: R) -> Result<Catalog, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(LoadError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut bad_times = 0usize;
    let mut bad_numbers = 0usize;
    let mut duplicate_ids = 0usize;

    for row in csv_reader.deserialize::<RawEventRow>() {
        let row = row?;
        let time = parse_time(&row.time);
        if time.is_none() && !row.time.trim().is_empty() {
            bad_times += 1;
        }
        if [&row.latitude, &row.longitude, &row.mag, &row.depth]
            .into_iter()
            .any(|raw| malformed_number(raw))
        {
            bad_numbers += 1;
        }
        if !row.id.is_empty() && !seen_ids.insert(row.id.clone()) {
            duplicate_ids += 1;
        }
        records.push(EventRecord {
            id: row.id,
            time,
            latitude: coerce_f64(&row.latitude),
            longitude: coerce_f64(&row.longitude),
            magnitude: coerce_f64(&row.mag),
            depth: coerce_f64(&row.depth),
            place: row.place,
        });
    }

    if bad_times > 0 {
        log::warn!("{bad_times} events have unparseable timestamps; they only match 'All months'");
    }
    if bad_numbers > 0 {
        log::warn!("{bad_numbers} events have malformed numeric cells coerced to NaN");
    }
    if duplicate_ids > 0 {
        log::warn!("{duplicate_ids} events reuse an earlier id; the map keeps one marker per id");
    }

    Catalog::from_records(records).ok_or(LoadError::EmptyCatalog)
}

/// Numeric coercion used for every measured column: NaN on empty or
/// malformed input, never an error.
fn coerce_f64(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(f64::NAN)
}

/// True for a numeric cell that holds text rather than a number or blank.
fn malformed_number(raw: &str) -> bool {
    let raw = raw.trim();
    !raw.is_empty() && raw.parse::<f64>().is_err()
}

/// Parse a catalog timestamp. Accepts RFC 3339 (the USGS export format)
/// plus the common space- and fraction-separated naive variants, which are
/// taken as UTC.
fn parse_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(t) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(t.and_utc());
        }
    }
    None
}

// ---------------------------------------------------------------------------
// World boundaries (GeoJSON)
// ---------------------------------------------------------------------------

/// Load landmass outlines from the GeoJSON file at `path`.
pub fn load_world(path: &Path) -> Result<WorldBoundaries, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let boundaries = read_world(BufReader::new(file))?;
    if boundaries.is_empty() {
        return Err(LoadError::NoPolygons {
            path: path.to_path_buf(),
        });
    }
    log::info!(
        "loaded {} boundary rings from {}",
        boundaries.rings.len(),
        path.display()
    );
    Ok(boundaries)
}

/// Read landmass outlines from any GeoJSON source. Polygons and
/// multi-polygons are flattened into rings; other geometry is ignored.
pub fn read_world<R: Read>(reader: R) -> Result<WorldBoundaries, LoadError> {
    let geojson = GeoJson::from_reader(reader).map_err(geojson::Error::from)?;
    let mut boundaries = WorldBoundaries::default();
    collect_geojson(&geojson, &mut boundaries.rings);
    Ok(boundaries)
}

fn collect_geojson(geojson: &GeoJson, rings: &mut Vec<Vec<[f64; 2]>>) {
    match geojson {
        GeoJson::FeatureCollection(collection) => {
            for feature in &collection.features {
                if let Some(geometry) = &feature.geometry {
                    collect_geometry(geometry, rings);
                }
            }
        }
        GeoJson::Feature(feature) => {
            if let Some(geometry) = &feature.geometry {
                collect_geometry(geometry, rings);
            }
        }
        GeoJson::Geometry(geometry) => collect_geometry(geometry, rings),
    }
}

fn collect_geometry(geometry: &geojson::Geometry, rings: &mut Vec<Vec<[f64; 2]>>) {
    match &geometry.value {
        GeoValue::Polygon(polygon) => push_polygon(polygon, rings),
        GeoValue::MultiPolygon(polygons) => {
            for polygon in polygons {
                push_polygon(polygon, rings);
            }
        }
        GeoValue::GeometryCollection(collection) => {
            for geometry in collection {
                collect_geometry(geometry, rings);
            }
        }
        _ => {}
    }
}

fn push_polygon(polygon: &[Vec<Vec<f64>>], rings: &mut Vec<Vec<[f64; 2]>>) {
    for ring in polygon {
        let ring: Vec<[f64; 2]> = ring
            .iter()
            .filter(|position| position.len() >= 2)
            .map(|position| [position[0], position[1]])
            .collect();
        if ring.len() >= 2 {
            rings.push(ring);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

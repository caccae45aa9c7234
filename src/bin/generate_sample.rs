use chrono::DateTime;
use serde_json::json;

/// Unix timestamp of 2023-01-01T00:00:00Z.
const YEAR_START: i64 = 1_672_531_200;
const YEAR_SECONDS: f64 = 365.0 * 86_400.0;
const EVENT_COUNT: usize = 4_000;

const COMPASS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// One seismically active region the synthetic catalog draws from.
struct Region {
    locality: &'static str,
    lat: f64,
    lon: f64,
    lat_spread: f64,
    lon_spread: f64,
    max_depth: f64,
    weight: f64,
    /// Offshore regions get their plain name as the place string instead
    /// of a distance-and-bearing phrase.
    offshore: bool,
}

static REGIONS: [Region; 8] = [
    Region {
        locality: "Namie, Japan",
        lat: 38.0,
        lon: 142.0,
        lat_spread: 4.0,
        lon_spread: 3.0,
        max_depth: 550.0,
        weight: 1.6,
        offshore: false,
    },
    Region {
        locality: "Valparaiso, Chile",
        lat: -32.0,
        lon: -71.5,
        lat_spread: 6.0,
        lon_spread: 1.5,
        max_depth: 180.0,
        weight: 1.3,
        offshore: false,
    },
    Region {
        locality: "Sand Point, Alaska",
        lat: 54.5,
        lon: -160.0,
        lat_spread: 2.0,
        lon_spread: 6.0,
        max_depth: 250.0,
        weight: 1.2,
        offshore: false,
    },
    Region {
        locality: "Banda Sea",
        lat: -6.5,
        lon: 129.5,
        lat_spread: 3.0,
        lon_spread: 4.0,
        max_depth: 650.0,
        weight: 1.4,
        offshore: true,
    },
    Region {
        locality: "central Mid-Atlantic Ridge",
        lat: 0.5,
        lon: -25.0,
        lat_spread: 12.0,
        lon_spread: 4.0,
        max_depth: 12.0,
        weight: 0.8,
        offshore: true,
    },
    Region {
        locality: "Ridgecrest, CA",
        lat: 35.7,
        lon: -117.5,
        lat_spread: 1.2,
        lon_spread: 1.0,
        max_depth: 12.0,
        weight: 0.9,
        offshore: false,
    },
    Region {
        locality: "Neiafu, Tonga",
        lat: -20.0,
        lon: -174.5,
        lat_spread: 5.0,
        lon_spread: 3.0,
        max_depth: 680.0,
        weight: 1.2,
        offshore: false,
    },
    Region {
        locality: "Gavdos, Greece",
        lat: 35.0,
        lon: 25.0,
        lat_spread: 2.0,
        lon_spread: 3.0,
        max_depth: 60.0,
        weight: 0.7,
        offshore: false,
    },
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn pick_region(rng: &mut SimpleRng) -> &'static Region {
    let total: f64 = REGIONS.iter().map(|r| r.weight).sum();
    let mut remaining = rng.next_f64() * total;
    for region in &REGIONS {
        if remaining < region.weight {
            return region;
        }
        remaining -= region.weight;
    }
    &REGIONS[REGIONS.len() - 1]
}

/// Gutenberg-Richter-like magnitudes: exponential above 2.5, capped.
fn magnitude(rng: &mut SimpleRng) -> f64 {
    let value = 2.5 - rng.next_f64().max(1e-15).ln() / 2.3;
    (value.min(9.1) * 10.0).round() / 10.0
}

fn place(rng: &mut SimpleRng, region: &Region) -> String {
    if region.offshore {
        return region.locality.to_string();
    }
    let distance = (5.0 + rng.next_f64() * 115.0).round();
    let direction = COMPASS[(rng.next_u64() % COMPASS.len() as u64) as usize];
    format!("{distance} km {direction} of {}", region.locality)
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // One catalog row per event, sorted by time before ids are assigned.
    let mut rows: Vec<[String; 6]> = Vec::with_capacity(EVENT_COUNT);
    for _ in 0..EVENT_COUNT {
        let region = pick_region(&mut rng);

        let lat = (region.lat + rng.gauss(0.0, region.lat_spread)).clamp(-89.0, 89.0);
        let lon = {
            let raw = region.lon + rng.gauss(0.0, region.lon_spread);
            (raw + 180.0).rem_euclid(360.0) - 180.0
        };

        let shallow_bias = rng.next_f64().powi(2);
        let depth = (region.max_depth * shallow_bias + rng.gauss(0.0, 2.0)).max(0.0);

        let seconds = (rng.next_f64() * YEAR_SECONDS) as i64;
        let millis = (rng.next_f64() * 1_000.0) as u32;
        let time = DateTime::from_timestamp(YEAR_START + seconds, millis * 1_000_000)
            .expect("timestamp within 2023");

        rows.push([
            time.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            format!("{lat:.4}"),
            format!("{lon:.4}"),
            format!("{depth:.2}"),
            format!("{:.1}", magnitude(&mut rng)),
            place(&mut rng, region),
        ]);
    }
    rows.sort_by(|a, b| a[0].cmp(&b[0]));

    let catalog_path = "earthquakes.csv";
    let mut writer = csv::Writer::from_path(catalog_path).expect("Failed to create catalog file");
    writer
        .write_record(["time", "latitude", "longitude", "depth", "mag", "place", "id"])
        .expect("Failed to write header");
    for (index, row) in rows.iter().enumerate() {
        let [time, lat, lon, depth, mag, place] = row;
        writer
            .write_record([
                time,
                lat,
                lon,
                depth,
                mag,
                place,
                &format!("rr{:06}", index + 1),
            ])
            .expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush catalog");

    let world = world_boundaries();
    let world_path = "world-geojson.json";
    let file = std::fs::File::create(world_path).expect("Failed to create world file");
    serde_json::to_writer_pretty(file, &world).expect("Failed to write world boundaries");

    println!(
        "Wrote {} events to {catalog_path} and {} boundary features to {world_path}",
        rows.len(),
        world["features"].as_array().map_or(0, Vec::len)
    );
}

/// Very coarse continent outlines, enough for a recognizable basemap.
fn world_boundaries() -> serde_json::Value {
    let features: Vec<serde_json::Value> = [
        (
            "North America",
            vec![
                [-168.0, 65.0],
                [-150.0, 70.0],
                [-125.0, 72.0],
                [-90.0, 74.0],
                [-70.0, 62.0],
                [-55.0, 50.0],
                [-67.0, 44.0],
                [-75.0, 35.0],
                [-80.0, 26.0],
                [-90.0, 29.0],
                [-97.0, 26.0],
                [-105.0, 20.0],
                [-90.0, 14.0],
                [-83.0, 9.0],
                [-95.0, 16.0],
                [-110.0, 23.0],
                [-117.0, 33.0],
                [-125.0, 40.0],
                [-130.0, 55.0],
                [-155.0, 58.0],
                [-168.0, 65.0],
            ],
        ),
        (
            "South America",
            vec![
                [-79.0, 9.0],
                [-70.0, 12.0],
                [-60.0, 10.0],
                [-50.0, 0.0],
                [-35.0, -8.0],
                [-40.0, -22.0],
                [-48.0, -28.0],
                [-58.0, -38.0],
                [-65.0, -47.0],
                [-68.0, -55.0],
                [-72.0, -52.0],
                [-75.0, -40.0],
                [-71.0, -30.0],
                [-70.0, -18.0],
                [-77.0, -12.0],
                [-81.0, -3.0],
                [-79.0, 9.0],
            ],
        ),
        (
            "Africa",
            vec![
                [-17.0, 15.0],
                [-10.0, 30.0],
                [0.0, 36.0],
                [10.0, 37.0],
                [20.0, 32.0],
                [32.0, 31.0],
                [43.0, 11.0],
                [51.0, 12.0],
                [40.0, -5.0],
                [35.0, -20.0],
                [30.0, -30.0],
                [20.0, -35.0],
                [15.0, -25.0],
                [12.0, -15.0],
                [8.0, 0.0],
                [-5.0, 5.0],
                [-12.0, 8.0],
                [-17.0, 15.0],
            ],
        ),
        (
            "Eurasia",
            vec![
                [-10.0, 36.0],
                [-8.0, 44.0],
                [-2.0, 48.0],
                [-5.0, 58.0],
                [5.0, 62.0],
                [15.0, 68.0],
                [30.0, 70.0],
                [60.0, 73.0],
                [90.0, 75.0],
                [110.0, 75.0],
                [140.0, 72.0],
                [160.0, 70.0],
                [179.0, 66.0],
                [160.0, 60.0],
                [142.0, 54.0],
                [135.0, 43.0],
                [122.0, 39.0],
                [121.0, 30.0],
                [108.0, 16.0],
                [104.0, 2.0],
                [98.0, 8.0],
                [92.0, 20.0],
                [80.0, 8.0],
                [72.0, 20.0],
                [66.0, 25.0],
                [57.0, 26.0],
                [52.0, 15.0],
                [43.0, 12.0],
                [35.0, 28.0],
                [35.0, 36.0],
                [27.0, 37.0],
                [22.0, 40.0],
                [15.0, 40.0],
                [5.0, 43.0],
                [-10.0, 36.0],
            ],
        ),
        (
            "Australia",
            vec![
                [114.0, -22.0],
                [122.0, -18.0],
                [130.0, -12.0],
                [137.0, -12.0],
                [142.0, -11.0],
                [147.0, -19.0],
                [153.0, -26.0],
                [150.0, -37.0],
                [140.0, -38.0],
                [131.0, -32.0],
                [124.0, -33.0],
                [115.0, -34.0],
                [114.0, -22.0],
            ],
        ),
        (
            "Greenland",
            vec![
                [-45.0, 60.0],
                [-53.0, 66.0],
                [-55.0, 70.0],
                [-50.0, 78.0],
                [-35.0, 83.0],
                [-20.0, 82.0],
                [-18.0, 75.0],
                [-22.0, 70.0],
                [-32.0, 65.0],
                [-45.0, 60.0],
            ],
        ),
        (
            "Antarctica",
            vec![
                [-179.0, -64.0],
                [-120.0, -66.0],
                [-60.0, -63.0],
                [0.0, -68.0],
                [60.0, -66.0],
                [120.0, -65.0],
                [179.0, -64.0],
                [179.0, -85.0],
                [-179.0, -85.0],
                [-179.0, -64.0],
            ],
        ),
    ]
    .into_iter()
    .map(|(name, ring)| {
        json!({
            "type": "Feature",
            "properties": { "name": name },
            "geometry": {
                "type": "Polygon",
                "coordinates": [ring],
            },
        })
    })
    .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

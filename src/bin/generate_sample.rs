use std::path::Path;

use serde::Serialize;

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

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

#[derive(Serialize)]
struct Row {
    #[serde(rename = "type")]
    kind: &'static str,
    beds: Option<f64>,
    baths: Option<f64>,
    sqft: f64,
    #[serde(rename = "listPrice")]
    list_price: f64,
    lat: f64,
    long: f64,
}

/// (name, lat, long, price multiplier)
const CITIES: [(&str, f64, f64, f64); 6] = [
    ("Houston", 29.76, -95.37, 1.0),
    ("Dallas", 32.78, -96.80, 1.1),
    ("Austin", 30.27, -97.74, 1.5),
    ("San Antonio", 29.42, -98.49, 0.85),
    ("Fort Worth", 32.76, -97.33, 0.95),
    ("El Paso", 31.76, -106.49, 0.7),
];

/// (type, weight, price per sqft)
const TYPES: [(&str, u32, f64); 7] = [
    ("single_family", 55, 185.0),
    ("condos", 12, 240.0),
    ("townhomes", 10, 205.0),
    ("mobile", 6, 70.0),
    ("multi_family", 7, 160.0),
    ("land", 7, 0.0),
    ("farm", 3, 95.0),
];

fn pick_type(rng: &mut SimpleRng) -> (&'static str, f64) {
    let total: u32 = TYPES.iter().map(|t| t.1).sum();
    let mut roll = (rng.next_u64() % total as u64) as u32;
    for &(kind, weight, ppsf) in &TYPES {
        if roll < weight {
            return (kind, ppsf);
        }
        roll -= weight;
    }
    ("single_family", 185.0)
}

fn generate_row(rng: &mut SimpleRng) -> Row {
    let (kind, ppsf) = pick_type(rng);
    let (_, lat, long, multiplier) = CITIES[rng.below(CITIES.len())];
    let lat = lat + rng.gauss(0.0, 0.15);
    let long = long + rng.gauss(0.0, 0.15);

    if kind == "land" {
        let acres = 0.2 + rng.next_f64() * 20.0;
        let price = (acres * 40_000.0 * multiplier / 1000.0).round() * 1000.0;
        return Row {
            kind,
            beds: None,
            baths: None,
            sqft: 0.0,
            list_price: price,
            lat,
            long,
        };
    }

    let beds = (1 + rng.below(5)) as f64;
    let baths = (beds / 2.0 + rng.below(3) as f64 * 0.5).max(1.0);
    let sqft = (beds * 550.0 + rng.gauss(400.0, 250.0)).max(350.0).round();
    let price = (sqft * ppsf * multiplier * rng.gauss(1.0, 0.12).max(0.5) / 500.0).round() * 500.0;

    Row {
        kind,
        // A few listings are missing room counts or floor area.
        beds: (!rng.chance(0.03)).then_some(beds),
        baths: (!rng.chance(0.05)).then_some(baths),
        sqft: if rng.chance(0.01) { 0.0 } else { sqft },
        list_price: price,
        lat,
        long,
    }
}

fn main() {
    let mut rng = SimpleRng::new(2024);
    let n_rows = 500;

    let output_path = Path::new("data/real_estate_texas_500_2024.csv");
    if let Some(dir) = output_path.parent() {
        std::fs::create_dir_all(dir).expect("Failed to create data directory");
    }

    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    for _ in 0..n_rows {
        writer
            .serialize(generate_row(&mut rng))
            .expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush writer");

    println!("Wrote {n_rows} listings to {}", output_path.display());
}

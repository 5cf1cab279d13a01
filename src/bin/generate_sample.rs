//! Writes a deterministic synthetic register for demos and manual testing.
//!
//! Usage: `generate_sample [ROWS] [OUTPUT]` (defaults: 500 rows, `sample_wtr.csv`).

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use wtr::data::product_codes::{describe, POINT_TO_POINT_CODES, PRODUCT_CODES};
use wtr::data::{write_csv_file, LicenceCollection, LicenceRow};

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

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }
}

const COMPANIES: &[&str] = &[
    "MBNL",
    "Vodafone Ltd",
    "Telefonica UK Ltd",
    "Arqiva Ltd",
    "Network Rail Infrastructure Ltd",
    "British Telecommunications Plc",
    // exercises CSV quoting on write
    "Smith, Jones & Co",
];

/// Frequency bands (GHz) typical for fixed links.
const LINK_BANDS_GHZ: &[f64] = &[1.4, 6.0, 7.5, 13.0, 18.0, 23.0, 38.0];

fn licence(rng: &mut SimpleRng, n: usize, code: &str, description: &str) -> LicenceRow {
    let north = rng.next_f64() * 8.0 + 50.0;
    let west = rng.next_f64() * 6.0;
    let band = *rng.pick(LINK_BANDS_GHZ);
    let frequency = band + rng.next_f64() * 0.5;

    LicenceRow {
        licence_number: format!("{:07}/{}", 1_000_000 + n, 1 + rng.below(3)),
        licence_issue_date: format!(
            "{:02}/{:02}/{}",
            1 + rng.below(28),
            1 + rng.below(12),
            2005 + rng.below(20)
        ),
        sid_lat_n_s: "N".to_string(),
        sid_lat_deg: format!("{}", north.trunc()),
        sid_lat_min: format!("{}", (north.fract() * 60.0).trunc()),
        sid_lat_sec: format!("{:.1}", (north.fract() * 3600.0) % 60.0),
        sid_long_e_w: "W".to_string(),
        sid_long_deg: format!("{}", west.trunc()),
        sid_long_min: format!("{}", (west.fract() * 60.0).trunc()),
        sid_long_sec: format!("{:.1}", (west.fract() * 3600.0) % 60.0),
        frequency: format!("{frequency:.4}"),
        frequency_type: "GHz".to_string(),
        station_type: (if rng.below(2) == 0 { "T" } else { "R" }).to_string(),
        channel_width: format!("{}", [7, 14, 28, 56][rng.below(4)]),
        channel_width_type: "MHz".to_string(),
        height_above_sea_level: format!("{}", 10 + rng.below(300)),
        antenna_height: format!("{}", 5 + rng.below(60)),
        antenna_polarisation: (if rng.below(2) == 0 { "V" } else { "H" }).to_string(),
        licencee_company: rng.pick(COMPANIES).to_string(),
        status: "Registered".to_string(),
        tradeable: "Y".to_string(),
        publishable: "Y".to_string(),
        product_code: code.to_string(),
        product_description: description.to_string(),
        ..Default::default()
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let rows: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid row count '{n}'"))?,
        None => 500,
    };
    let output = PathBuf::from(args.next().unwrap_or_else(|| "sample_wtr.csv".to_string()));

    if rows < PRODUCT_CODES.len() {
        bail!(
            "need at least {} rows so every product code appears",
            PRODUCT_CODES.len()
        );
    }

    let mut rng = SimpleRng::new(42);
    let p2p = POINT_TO_POINT_CODES[0];
    let p2p_description = describe(p2p).unwrap_or_default();

    // Every known code once, then a point-to-point-heavy mix like the real register.
    let mut licences: Vec<LicenceRow> = PRODUCT_CODES
        .iter()
        .enumerate()
        .map(|(n, (code, description))| licence(&mut rng, n, code, description))
        .collect();

    for n in licences.len()..rows {
        let (code, description) = if rng.below(3) == 0 {
            *rng.pick(PRODUCT_CODES)
        } else {
            (p2p, p2p_description)
        };
        licences.push(licence(&mut rng, n, code, description));
    }

    let register = LicenceCollection::with_wtr_header(licences);
    write_csv_file(&register, &output)
        .with_context(|| format!("writing {}", output.display()))?;

    println!("Wrote {} licences to {}", register.len(), output.display());
    Ok(())
}

//! Writes a deterministic, synthetic `nasa.csv` with the same columns as the
//! NASA close-approach dataset, for demos and manual testing.
//!
//! Usage: `cargo run --bin generate_sample -- [OUTPUT] [ROWS]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
#[command(about = "Write a synthetic NASA close-approach CSV", long_about = None)]
struct Args {
    /// Destination file
    #[arg(default_value = "nasa.csv")]
    output: PathBuf,

    /// Number of approaches to generate
    #[arg(default_value_t = 4000, value_parser = clap::value_parser!(u32).range(1..))]
    rows: u32,
}

const HEADER: [&str; 13] = [
    "Neo Reference ID",
    "Name",
    "Absolute Magnitude",
    "Est Dia in KM(min)",
    "Est Dia in KM(max)",
    "Close Approach Date",
    "Miles per hour",
    "Miss Dist.(kilometers)",
    "Orbiting Body",
    "Orbit ID",
    "Minimum Orbit Intersection",
    "Equinox",
    "Hazardous",
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

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }
}

/// Diameter bounds (km) from absolute magnitude for albedos 0.25 and 0.05.
fn diameter_range(magnitude: f64) -> (f64, f64) {
    let d = |albedo: f64| 1329.0 / albedo.sqrt() * 10f64.powf(-0.2 * magnitude);
    (d(0.25), d(0.05))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let rows = args.rows;

    let mut rng = SimpleRng::new(42);
    let first_day = NaiveDate::from_ymd_opt(1995, 1, 1).context("invalid start date")?;
    let span_days = 365 * 21;

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    writer.write_record(HEADER).context("writing header")?;

    for i in 0..rows {
        let id = 2_000_000 + rng.below(2_000_000);
        let magnitude = (rng.uniform(14.0, 32.0) * 10.0).round() / 10.0;
        let (dia_min, dia_max) = diameter_range(magnitude);
        let date = first_day + Duration::days(rng.below(span_days) as i64);
        let mph = rng.uniform(1_000.0, 100_000.0);
        let miss_km = rng.uniform(20_000.0, 75_000_000.0);
        // Skewed towards low orbit IDs so a few groups dominate.
        let orbit_spread = rng.below(60) + 1;
        let orbit_id = 1 + rng.below(orbit_spread);
        let moid = rng.uniform(0.0, 0.5);
        let hazardous = magnitude <= 22.0 && moid <= 0.05;

        // A handful of rows with missing measurements, as in the real data.
        let mph_cell = if i % 97 == 0 { String::new() } else { format!("{mph:.4}") };

        writer
            .write_record([
                id.to_string(),
                id.to_string(),
                format!("{magnitude:.1}"),
                format!("{dia_min:.6}"),
                format!("{dia_max:.6}"),
                date.format("%Y-%m-%d").to_string(),
                mph_cell,
                format!("{miss_km:.3}"),
                "Earth".to_string(),
                orbit_id.to_string(),
                format!("{moid:.6}"),
                "J2000".to_string(),
                if hazardous { "True" } else { "False" }.to_string(),
            ])
            .with_context(|| format!("writing row {i}"))?;
    }
    writer.flush().context("flushing CSV writer")?;

    println!(
        "Wrote {rows} asteroid approaches to {}",
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn defaults_to_nasa_csv() {
        let args = Args::try_parse_from(["generate_sample"]).unwrap();
        assert_eq!(args.output, PathBuf::from("nasa.csv"));
        assert_eq!(args.rows, 4000);
    }

    #[test]
    fn help_flag_is_not_an_output_path() {
        let err = Args::try_parse_from(["generate_sample", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn rejects_non_positive_row_counts() {
        assert!(Args::try_parse_from(["generate_sample", "out.csv", "-5"]).is_err());
        assert!(Args::try_parse_from(["generate_sample", "out.csv", "0"]).is_err());
        let args = Args::try_parse_from(["generate_sample", "out.csv", "12"]).unwrap();
        assert_eq!(args.rows, 12);
    }
}

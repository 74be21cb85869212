//! Write demo inputs for both tools into the current directory:
//! `sample_data.csv` for the viewer and `fangraph_{N}days.db` for the exporter.

use anyhow::{Context, Result};
use rusqlite::{Connection, params};
use spinehead::export::ExportConfig;

const INTERVALS: [u32; 3] = [7, 14, 30];
const PLAYERS: [&str; 8] = [
    "Abreu", "Betts", "Correa", "Devers", "Escobar", "Freeman", "Gallo", "Harper",
];

/// Minimal deterministic PRNG (splitmix64)
struct SimpleRng(u64);

impl SimpleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

fn write_csv(rng: &mut SimpleRng) -> Result<()> {
    let path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(path).context("creating sample CSV")?;
    writer.write_record(["Sample", "Treatment", "Group_1", "Group_2"])?;

    for i in 0..40 {
        let treatment = if i % 2 == 0 { "control" } else { "dosed" };
        let shift = if i % 2 == 0 { 0.0 } else { 2.5 };
        writer.write_record([
            format!("S{i:03}"),
            treatment.to_string(),
            format!("{:.3}", rng.range(8.0, 12.0) + shift),
            format!("{:.3}", rng.range(18.0, 26.0) + shift),
        ])?;
    }
    writer.flush()?;
    println!("Wrote 40 rows to {path}");
    Ok(())
}

fn write_database(config: &ExportConfig, days: u32, rng: &mut SimpleRng) -> Result<()> {
    let path = config.database_path(days);
    if path.exists() {
        std::fs::remove_file(&path).with_context(|| format!("replacing {}", path.display()))?;
    }
    let conn = Connection::open(&path).with_context(|| format!("creating {}", path.display()))?;

    conn.execute_batch(
        "CREATE TABLE batting (Name TEXT, G INTEGER, PA INTEGER, AVG REAL, OBP REAL);
         CREATE TABLE pitching (Name TEXT, G INTEGER, IP REAL, ERA REAL, WHIP REAL);",
    )?;

    for name in PLAYERS {
        let games = (days as f64 * rng.range(0.6, 1.0)).round() as i64;
        conn.execute(
            "INSERT INTO batting VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                name,
                games,
                games * 4,
                rng.range(0.200, 0.330),
                rng.range(0.280, 0.420)
            ],
        )?;
        conn.execute(
            "INSERT INTO pitching VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                name,
                games / 5,
                rng.range(1.0, 6.5) * (games / 5) as f64,
                rng.range(2.0, 6.0),
                rng.range(0.9, 1.6)
            ],
        )?;
    }

    println!("Wrote {} players to {}", PLAYERS.len(), path.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng(42);

    write_csv(&mut rng)?;

    let config = ExportConfig::new(".", INTERVALS.to_vec());
    for days in INTERVALS {
        write_database(&config, days, &mut rng)?;
    }
    Ok(())
}

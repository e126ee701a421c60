use anyhow::{Context, Result};
use serde::Serialize;

/// SplitMix64: enough spread for jittering scores, and reproducible.
struct Jitter(u64);

impl Jitter {
    fn next_unit(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Triangular noise in `[-spread, spread]`, peaked at zero.
    fn noise(&mut self, spread: f64) -> f64 {
        (self.next_unit() + self.next_unit() - 1.0) * spread
    }
}

#[derive(Serialize)]
struct Row {
    step: usize,
    value: f64,
}

/// Scores drift upward from ~45 to ~95 with noise, so a replay crosses both
/// default thresholds and dithers around them for a while.
fn main() -> Result<()> {
    let mut jitter = Jitter(42);
    let n = 60;

    let output_path = "sample_scores.csv";
    let mut writer = csv::Writer::from_path(output_path).context("creating output file")?;
    for step in 0..n {
        let trend = 45.0 + 50.0 * step as f64 / (n - 1) as f64;
        let value = ((trend + jitter.noise(8.0)) * 10.0).round() / 10.0;
        writer
            .serialize(Row {
                step,
                value: value.clamp(0.0, 100.0),
            })
            .context("writing row")?;
    }
    writer.flush().context("flushing output")?;

    println!("Wrote {n} scores to {output_path}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_is_bounded_and_reproducible() {
        let mut a = Jitter(42);
        let mut b = Jitter(42);
        for _ in 0..1000 {
            let x = a.noise(8.0);
            assert!((-8.0..=8.0).contains(&x));
            assert_eq!(x, b.noise(8.0));
        }
    }
}

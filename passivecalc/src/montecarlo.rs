//! Monte Carlo tolerance analysis of a two-resistor divider
//!
//! Every trial draws both resistors uniformly inside their tolerance band:
//!
//! ```text
//! r1 = r1_nominal · U(1 − tol1, 1 + tol1)
//! r2 = r2_nominal · U(1 − tol2, 1 + tol2)
//! v_out = v_in · r2 / (r1 + r2)
//! ```
//!
//! Samples keep generation order. Summary statistics, the preview and the
//! histogram are reductions callers apply to the returned samples.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::core::CalcError;

/// Largest trial count a single run accepts.
pub const MAX_TRIALS: usize = 10_000_000;

/// Largest bin count [`histogram`] accepts.
pub const MAX_BINS: usize = 10_000;

/// Inputs of one simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    pub trials: usize,
    pub v_in: f64,
    pub r1_nominal: f64,
    /// Tolerance as a fraction, 0.05 for 5 %
    pub r1_tolerance: f64,
    pub r2_nominal: f64,
    pub r2_tolerance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub samples: Vec<f64>,
    pub theoretical: f64,
}

impl SimulationRun {
    pub fn validate(&self) -> Result<(), CalcError> {
        if self.trials == 0 || self.trials > MAX_TRIALS {
            return Err(CalcError::InvalidParameter(format!(
                "trial count must be in 1..={}, got {}",
                MAX_TRIALS, self.trials
            )));
        }
        if !self.v_in.is_finite() {
            return Err(CalcError::InvalidParameter(format!(
                "input voltage must be finite, got {}",
                self.v_in
            )));
        }
        for (label, nominal) in [("R1", self.r1_nominal), ("R2", self.r2_nominal)] {
            if !(nominal.is_finite() && nominal > 0.0) {
                return Err(CalcError::InvalidParameter(format!(
                    "{} nominal must be positive, got {}",
                    label, nominal
                )));
            }
        }
        for (label, tol) in [("R1", self.r1_tolerance), ("R2", self.r2_tolerance)] {
            if !(tol.is_finite() && (0.0..1.0).contains(&tol)) {
                return Err(CalcError::InvalidParameter(format!(
                    "{} tolerance must be a fraction in [0, 1), got {}",
                    label, tol
                )));
            }
        }
        Ok(())
    }

    pub fn theoretical(&self) -> f64 {
        divider_output(self.v_in, self.r1_nominal, self.r2_nominal)
    }

    /// Run the simulation with the given random source.
    pub fn simulate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SimulationResult, CalcError> {
        self.validate()?;

        let mut samples = Vec::with_capacity(self.trials);
        for _ in 0..self.trials {
            let r1 = draw(rng, self.r1_nominal, self.r1_tolerance);
            let r2 = draw(rng, self.r2_nominal, self.r2_tolerance);
            samples.push(divider_output(self.v_in, r1, r2));
        }

        tracing::debug!("monte carlo: {} trials", self.trials);
        Ok(SimulationResult {
            samples,
            theoretical: self.theoretical(),
        })
    }
}

fn divider_output(v_in: f64, r1: f64, r2: f64) -> f64 {
    v_in * r2 / (r1 + r2)
}

fn draw<R: Rng + ?Sized>(rng: &mut R, nominal: f64, tolerance: f64) -> f64 {
    nominal * rng.random_range((1.0 - tolerance)..=(1.0 + tolerance))
}

/// Simulate with an injected random source.
pub fn simulate<R: Rng + ?Sized>(
    rng: &mut R,
    trials: usize,
    v_in: f64,
    r1_nominal: f64,
    r1_tolerance: f64,
    r2_nominal: f64,
    r2_tolerance: f64,
) -> Result<SimulationResult, CalcError> {
    SimulationRun {
        trials,
        v_in,
        r1_nominal,
        r1_tolerance,
        r2_nominal,
        r2_tolerance,
    }
    .simulate(rng)
}

/// Reproducible run from a fixed seed.
pub fn simulate_seeded(run: &SimulationRun, seed: u64) -> Result<SimulationResult, CalcError> {
    let mut rng = StdRng::seed_from_u64(seed);
    run.simulate(&mut rng)
}

/// Run seeded from the thread-local generator.
pub fn simulate_entropy(run: &SimulationRun) -> Result<SimulationResult, CalcError> {
    let mut rng = rand::rng();
    run.simulate(&mut rng)
}

/// Descriptive statistics over a sample set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleStats {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl SampleStats {
    /// One pass, Welford's update. `None` for an empty slice.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let mut mean = 0.0;
        let mut m2 = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for (i, &x) in samples.iter().enumerate() {
            let n = (i + 1) as f64;
            let delta = x - mean;
            mean += delta / n;
            m2 += delta * (x - mean);
            min = min.min(x);
            max = max.max(x);
        }

        Some(Self {
            count: samples.len(),
            mean,
            std_dev: (m2 / samples.len() as f64).sqrt(),
            min,
            max,
        })
    }
}

/// First `n` samples in generation order.
pub fn preview(samples: &[f64], n: usize) -> &[f64] {
    &samples[..n.min(samples.len())]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub min: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Lower edge of every bin.
    pub fn edges(&self) -> Vec<f64> {
        (0..self.counts.len())
            .map(|i| self.min + i as f64 * self.bin_width)
            .collect()
    }
}

/// Equal-width bins over `[min, max]`. The maximum falls in the last bin.
/// `None` for no samples or a bin count outside `1..=MAX_BINS`.
pub fn histogram(samples: &[f64], bins: usize) -> Option<Histogram> {
    if bins == 0 || bins > MAX_BINS {
        return None;
    }
    let stats = SampleStats::from_samples(samples)?;

    let span = stats.max - stats.min;
    let mut counts = vec![0usize; bins];
    if span == 0.0 {
        counts[0] = samples.len();
        return Some(Histogram {
            min: stats.min,
            bin_width: 0.0,
            counts,
        });
    }

    let bin_width = span / bins as f64;
    for &x in samples {
        let index = (((x - stats.min) / bin_width) as usize).min(bins - 1);
        counts[index] += 1;
    }

    Some(Histogram {
        min: stats.min,
        bin_width,
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(trials: usize) -> SimulationRun {
        SimulationRun {
            trials,
            v_in: 12.0,
            r1_nominal: 10_000.0,
            r1_tolerance: 0.05,
            r2_nominal: 3_300.0,
            r2_tolerance: 0.05,
        }
    }

    #[test]
    fn test_mean_converges() {
        let result = simulate_seeded(&run(5_000), 42).unwrap();
        assert_eq!(result.samples.len(), 5_000);
        let stats = SampleStats::from_samples(&result.samples).unwrap();
        assert!((stats.mean - result.theoretical).abs() < 0.05 * result.theoretical);
    }

    #[test]
    fn test_samples_inside_worst_case() {
        let r = run(2_000);
        let result = simulate_seeded(&r, 7).unwrap();
        let low = 12.0 * 3_300.0 * 0.95 / (10_000.0 * 1.05 + 3_300.0 * 0.95);
        let high = 12.0 * 3_300.0 * 1.05 / (10_000.0 * 0.95 + 3_300.0 * 1.05);
        assert!(result.samples.iter().all(|&v| v >= low - 1e-12 && v <= high + 1e-12));
    }

    #[test]
    fn test_same_seed_same_samples() {
        let a = simulate_seeded(&run(100), 1).unwrap();
        let b = simulate_seeded(&run(100), 1).unwrap();
        assert_eq!(a.samples, b.samples);
    }

    #[test]
    fn test_zero_tolerance_is_exact() {
        let mut r = run(10);
        r.r1_tolerance = 0.0;
        r.r2_tolerance = 0.0;
        let result = simulate_entropy(&r).unwrap();
        assert!(result
            .samples
            .iter()
            .all(|&v| (v - result.theoretical).abs() < 1e-12));
    }

    #[test]
    fn test_invalid_parameters() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            simulate(&mut rng, 0, 12.0, 1e3, 0.05, 1e3, 0.05),
            Err(CalcError::InvalidParameter(_))
        ));
        assert!(simulate(&mut rng, 10, 12.0, 0.0, 0.05, 1e3, 0.05).is_err());
        assert!(simulate(&mut rng, 10, 12.0, 1e3, 1.0, 1e3, 0.05).is_err());
        assert!(simulate(&mut rng, 10, 12.0, 1e3, -0.1, 1e3, 0.05).is_err());
    }

    #[test]
    fn test_huge_trial_count_is_rejected_before_allocating() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            simulate(&mut rng, usize::MAX, 12.0, 1e3, 0.05, 1e3, 0.05),
            Err(CalcError::InvalidParameter(_))
        ));
        assert!(simulate(&mut rng, MAX_TRIALS + 1, 12.0, 1e3, 0.05, 1e3, 0.05).is_err());
    }

    #[test]
    fn test_stats_one_pass() {
        let stats = SampleStats::from_samples(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(stats.count, 8);
        assert!((stats.mean - 5.0).abs() < 1e-12);
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
        assert!(SampleStats::from_samples(&[]).is_none());
    }

    #[test]
    fn test_preview_keeps_order() {
        let samples = [3.0, 1.0, 2.0];
        assert_eq!(preview(&samples, 2), &[3.0, 1.0]);
        assert_eq!(preview(&samples, 100).len(), 3);
    }

    #[test]
    fn test_histogram() {
        let samples: Vec<f64> = (0..100).map(f64::from).collect();
        let hist = histogram(&samples, 10).unwrap();
        assert_eq!(hist.counts.len(), 10);
        assert_eq!(hist.counts.iter().sum::<usize>(), 100);
        assert!(hist.counts.iter().all(|&c| c == 10));
        assert_eq!(hist.edges()[1], hist.min + hist.bin_width);

        let flat = histogram(&[1.0, 1.0], 5).unwrap();
        assert_eq!(flat.counts[0], 2);
        assert!(histogram(&[], 5).is_none());
        assert!(histogram(&[1.0, 2.0], usize::MAX).is_none());
        assert!(histogram(&[1.0, 2.0], MAX_BINS + 1).is_none());
        assert_eq!(histogram(&[1.0, 2.0], MAX_BINS).unwrap().counts.len(), MAX_BINS);
    }
}

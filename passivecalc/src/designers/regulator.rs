//! Feedback network of an adjustable linear regulator
//!
//! ```text
//! Vout = Vref · (1 + R2/R1) + sign(Vref) · Iadj · R2
//! ```
//!
//! Solved for R2 with each R1 of a short candidate list.

use serde::Serialize;

use super::TopK;
use crate::catalog::custom::Catalog;
use crate::catalog::regulators::RegulatorSpec;
use crate::core::CalcError;
use crate::search::{find_nearest_with, SearchOptions};

/// R1 values tried after the recommended one, in Ω
pub const R1_CANDIDATES: [f64; 12] = [
    100.0, 120.0, 150.0, 180.0, 200.0, 220.0, 240.0, 270.0, 330.0, 390.0, 470.0, 1_000.0,
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegulatorCandidate {
    pub r1: f64,
    pub r2_ideal: f64,
    pub r2: f64,
    pub vout: f64,
    pub error_percent: f64,
}

/// Recommended R1 first, then the fixed list without repeats.
pub fn r1_candidates(spec: &RegulatorSpec) -> Vec<f64> {
    let mut values = vec![spec.r1_recommended];
    for r in R1_CANDIDATES {
        if !values.iter().any(|v| (v - r).abs() < 1e-9) {
            values.push(r);
        }
    }
    values
}

pub fn output_voltage(spec: &RegulatorSpec, r1: f64, r2: f64) -> f64 {
    spec.vref * (1.0 + r2 / r1) + spec.vref.signum() * spec.iadj_a() * r2
}

/// Ideal R2 for one R1.
pub fn solve_r2(spec: &RegulatorSpec, r1: f64, vout: f64) -> Result<f64, CalcError> {
    if vout.abs() < spec.vref.abs() {
        return Err(CalcError::InvalidTarget(format!(
            "|Vout| = {} is below |Vref| = {} of {}",
            vout.abs(),
            spec.vref.abs(),
            spec.name
        )));
    }
    let denominator = spec.vref / r1 + spec.vref.signum() * spec.iadj_a();
    if denominator == 0.0 {
        return Err(CalcError::DivisionByZero(format!(
            "feedback equation of {} with R1 = {}",
            spec.name, r1
        )));
    }
    let r2 = (vout - spec.vref) / denominator;
    if !(r2.is_finite() && r2 > 0.0) {
        return Err(CalcError::InvalidTarget(format!(
            "{} V is not reachable with {} (R2 = {})",
            vout, spec.name, r2
        )));
    }
    Ok(r2)
}

pub fn design_regulator(
    spec: &RegulatorSpec,
    vout: f64,
    catalog: &Catalog<'_>,
    results: usize,
    options: SearchOptions,
) -> Result<Vec<RegulatorCandidate>, CalcError> {
    if !vout.is_finite() {
        return Err(CalcError::InvalidTarget(format!(
            "output voltage must be finite, got {}",
            vout
        )));
    }

    let values = catalog.values();
    let mut top = TopK::new(results);
    for r1 in r1_candidates(spec) {
        let r2_ideal = solve_r2(spec, r1, vout)?;
        let r2 = find_nearest_with(r2_ideal, values.iter().copied(), options)?.value;
        let actual = output_voltage(spec, r1, r2);
        let error_percent = (actual - vout).abs() / vout.abs() * 100.0;
        top.push(
            error_percent,
            RegulatorCandidate {
                r1,
                r2_ideal,
                r2,
                vout: actual,
                error_percent,
            },
        );
    }

    let candidates = top.into_vec();
    tracing::debug!(
        "{} at {} V: best {:?}",
        spec.name,
        vout,
        candidates.first().map(|c| c.error_percent)
    );
    Ok(candidates)
}

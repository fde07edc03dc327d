//! First-order RC low-pass filter: `fc = 1 / (2π R C)`

use serde::Serialize;
use std::f64::consts::PI;

use super::TopK;
use crate::catalog::custom::Catalog;
use crate::core::CalcError;
use crate::search::find_nearest_absolute;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RcCandidate {
    pub r: f64,
    pub c: f64,
    /// Capacitance that would hit the cutoff exactly with this R
    pub c_ideal: f64,
    pub fc: f64,
    pub error_percent: f64,
}

pub fn cutoff_frequency(r: f64, c: f64) -> f64 {
    1.0 / (2.0 * PI * r * c)
}

/// For each resistor, pick the capacitor closest (by absolute difference) to
/// the ideal value and rank the pairs by cutoff error.
pub fn design_rc_filter(
    fc: f64,
    resistors: &Catalog<'_>,
    capacitors: &Catalog<'_>,
    results: usize,
) -> Result<Vec<RcCandidate>, CalcError> {
    if !(fc.is_finite() && fc > 0.0) {
        return Err(CalcError::InvalidTarget(format!(
            "cutoff frequency must be positive, got {}",
            fc
        )));
    }

    let r_values = resistors.values();
    let c_values = capacitors.values();
    if r_values.is_empty() || c_values.is_empty() {
        return Err(CalcError::NoCandidates);
    }

    let mut top = TopK::new(results);
    for &r in &r_values {
        let c_ideal = 1.0 / (2.0 * PI * r * fc);
        let Some(c) = find_nearest_absolute(c_ideal, &c_values) else {
            continue;
        };
        let actual = cutoff_frequency(r, c);
        let error_percent = (actual - fc).abs() / fc * 100.0;
        top.push(
            error_percent,
            RcCandidate {
                r,
                c,
                c_ideal,
                fc: actual,
                error_percent,
            },
        );
    }

    let candidates = top.into_vec();
    tracing::debug!(
        "rc filter {} Hz: {} resistors x {} capacitors, best {:?}",
        fc,
        r_values.len(),
        c_values.len(),
        candidates.first().map(|c| c.error_percent)
    );
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::custom::CustomValueList;
    use crate::catalog::series::{DecadeRange, E12, E6};

    #[test]
    fn test_exact_pair_found() {
        // 1 kΩ with 100 nF is 1591.55 Hz.
        let fc = cutoff_frequency(1_000.0, 100e-9);
        let r = CustomValueList::new(vec![470.0, 1_000.0, 2_200.0]).unwrap();
        let c = CustomValueList::new(vec![10e-9, 100e-9, 1e-6]).unwrap();
        let results = design_rc_filter(fc, &Catalog::custom(&r), &Catalog::custom(&c), 15).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].r, 1_000.0);
        assert_eq!(results[0].c, 100e-9);
        assert!(results[0].error_percent < 1e-9);
    }

    #[test]
    fn test_ranked_and_limited() {
        let results = design_rc_filter(
            1_000.0,
            &Catalog::series(&E12, DecadeRange::RESISTORS),
            &Catalog::series(&E6, DecadeRange::CAPACITORS),
            15,
        )
        .unwrap();
        assert_eq!(results.len(), 15);
        for pair in results.windows(2) {
            assert!(pair[0].error_percent <= pair[1].error_percent);
        }
    }

    #[test]
    fn test_capacitor_nearest_to_ideal() {
        // Ideal C is 1.45 nF, 0.45 nF away from 1 nF and 0.55 nF from 2 nF.
        let fc = cutoff_frequency(1_000.0, 1.45e-9);
        let r = CustomValueList::new(vec![1_000.0]).unwrap();
        let c = CustomValueList::new(vec![2e-9, 1e-9]).unwrap();
        let results = design_rc_filter(fc, &Catalog::custom(&r), &Catalog::custom(&c), 15).unwrap();
        assert_eq!(results[0].c, 1e-9);
        assert!((results[0].c_ideal - 1.45e-9).abs() < 1e-18);
    }

    #[test]
    fn test_invalid_cutoff() {
        let r = CustomValueList::new(vec![1_000.0]).unwrap();
        assert!(matches!(
            design_rc_filter(0.0, &Catalog::custom(&r), &Catalog::custom(&r), 15),
            Err(CalcError::InvalidTarget(_))
        ));
    }
}

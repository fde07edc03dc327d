//! Two-resistor voltage divider
//!
//! ```text
//!  Vin ──[R1]──┬── Vout = Vin · R2 / (R1 + R2)
//!              [R2]
//!              │
//!             GND
//! ```

use serde::Serialize;

use super::TopK;
use crate::catalog::custom::Catalog;
use crate::core::CalcError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DividerCandidate {
    pub r1: f64,
    pub r2: f64,
    pub ratio: f64,
    /// Output voltage this pair produces at the requested input
    pub vout: f64,
    /// Current through the divider at the requested input, in amps
    pub current_a: f64,
    pub error_percent: f64,
}

/// Score every ordered (R1, R2) pair of the catalog and keep the best
/// `results`.
pub fn design_divider(
    vin: f64,
    vout: f64,
    catalog: &Catalog<'_>,
    results: usize,
) -> Result<Vec<DividerCandidate>, CalcError> {
    if !(vin.is_finite() && vin > 0.0) {
        return Err(CalcError::InvalidTarget(format!(
            "input voltage must be positive, got {}",
            vin
        )));
    }
    if !(vout.is_finite() && vout > 0.0) {
        return Err(CalcError::InvalidTarget(format!(
            "output voltage must be positive, got {}",
            vout
        )));
    }
    if vout >= vin {
        return Err(CalcError::InvalidTarget(format!(
            "output voltage {} must be below input voltage {}",
            vout, vin
        )));
    }

    let values = catalog.values();
    if values.is_empty() {
        return Err(CalcError::NoCandidates);
    }

    let target_ratio = vout / vin;
    let mut top = TopK::new(results);
    for &r1 in &values {
        for &r2 in &values {
            let ratio = r2 / (r1 + r2);
            let error = (ratio - target_ratio).abs() / target_ratio * 100.0;
            top.push(error, (r1, r2, ratio, error));
        }
    }

    let candidates: Vec<DividerCandidate> = top
        .into_vec()
        .into_iter()
        .map(|(r1, r2, ratio, error_percent)| DividerCandidate {
            r1,
            r2,
            ratio,
            vout: vin * ratio,
            current_a: vin / (r1 + r2),
            error_percent,
        })
        .collect();

    tracing::debug!(
        "divider {} V -> {} V over {} ({} values): best {:?}",
        vin,
        vout,
        catalog.label(),
        values.len(),
        candidates.first().map(|c| c.error_percent)
    );

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::custom::CustomValueList;
    use crate::catalog::series::{DecadeRange, E24};

    #[test]
    fn test_best_pair_is_exhaustive_minimum() {
        let catalog = Catalog::series(&E24, DecadeRange::new(2, 5));
        let results = design_divider(12.0, 3.3, &catalog, 10).unwrap();
        assert_eq!(results.len(), 10);

        let target = 3.3 / 12.0;
        let values = catalog.values();
        for &r1 in &values {
            for &r2 in &values {
                let e = (r2 / (r1 + r2) - target).abs() / target * 100.0;
                assert!(e >= results[0].error_percent);
            }
        }
        for pair in results.windows(2) {
            assert!(pair[0].error_percent <= pair[1].error_percent);
        }
    }

    #[test]
    fn test_reports_vout_and_current() {
        let bom = CustomValueList::new(vec![10_000.0, 10_000.0]).unwrap();
        let results = design_divider(10.0, 5.0, &Catalog::custom(&bom), 10).unwrap();
        assert_eq!(results.len(), 4);
        let best = &results[0];
        assert_eq!(best.error_percent, 0.0);
        assert!((best.vout - 5.0).abs() < 1e-12);
        assert!((best.current_a - 0.0005).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_targets() {
        let catalog = Catalog::series(&E24, DecadeRange::new(2, 3));
        for (vin, vout) in [(0.0, 1.0), (5.0, 0.0), (5.0, 5.0), (5.0, 6.0)] {
            assert!(matches!(
                design_divider(vin, vout, &catalog, 10),
                Err(CalcError::InvalidTarget(_))
            ));
        }
    }
}

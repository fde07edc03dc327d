//! Series and parallel resistor networks

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalog::custom::Catalog;
use crate::core::CalcError;
use crate::search::{find_nearest_with, relative_error_percent, MatchResult, SearchOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    Series,
    Parallel,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::Series => write!(f, "series"),
            Topology::Parallel => write!(f, "parallel"),
        }
    }
}

impl FromStr for Topology {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "series" | "serie" => Ok(Topology::Series),
            "parallel" | "parallelo" => Ok(Topology::Parallel),
            other => Err(CalcError::InvalidParameter(format!(
                "unknown topology '{}', expected series or parallel",
                other
            ))),
        }
    }
}

/// Equivalent resistance of `magnitudes` connected in `topology`.
pub fn equivalent(magnitudes: &[f64], topology: Topology) -> Result<f64, CalcError> {
    if magnitudes.is_empty() {
        return Err(CalcError::EmptyNetwork);
    }
    if let Some(bad) = magnitudes.iter().find(|m| !(m.is_finite() && **m >= 0.0)) {
        return Err(CalcError::InvalidParameter(format!(
            "component values must be >= 0, got {}",
            bad
        )));
    }

    match topology {
        Topology::Series => Ok(magnitudes.iter().sum()),
        Topology::Parallel => {
            if magnitudes.iter().any(|m| *m == 0.0) {
                return Err(CalcError::DivisionByZero(
                    "zero resistance in a parallel network".to_string(),
                ));
            }
            let conductance: f64 = magnitudes.iter().map(|m| 1.0 / m).sum();
            if conductance == 0.0 {
                return Err(CalcError::DivisionByZero(
                    "total conductance is zero".to_string(),
                ));
            }
            Ok(1.0 / conductance)
        }
    }
}

/// Symmetric window around `equivalent` using the mean of the element
/// tolerances. This is an approximation, not worst-case propagation.
pub fn tolerance_range(equivalent: f64, tolerances: &[f64]) -> (f64, f64) {
    let mean = mean_tolerance(tolerances);
    let delta = equivalent * mean / 100.0;
    (equivalent - delta, equivalent + delta)
}

fn mean_tolerance(tolerances: &[f64]) -> f64 {
    if tolerances.is_empty() {
        0.0
    } else {
        tolerances.iter().sum::<f64>() / tolerances.len() as f64
    }
}

/// One resistor of a network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetworkElement {
    pub value: f64,
    pub tolerance_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub elements: Vec<NetworkElement>,
    pub topology: Topology,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkAnalysis {
    pub topology: Topology,
    pub equivalent: f64,
    pub mean_tolerance_percent: f64,
    pub min: f64,
    pub max: f64,
    /// Share of each element in the result, in percent. Series networks use
    /// R/Req, parallel networks use the conductance share.
    pub contributions: Vec<f64>,
}

impl NetworkSpec {
    pub fn new(elements: Vec<NetworkElement>, topology: Topology) -> Self {
        Self { elements, topology }
    }

    pub fn magnitudes(&self) -> Vec<f64> {
        self.elements.iter().map(|e| e.value).collect()
    }

    pub fn tolerances(&self) -> Vec<f64> {
        self.elements.iter().map(|e| e.tolerance_percent).collect()
    }

    pub fn analyze(&self) -> Result<NetworkAnalysis, CalcError> {
        let magnitudes = self.magnitudes();
        let tolerances = self.tolerances();
        let equivalent = equivalent(&magnitudes, self.topology)?;
        let (min, max) = tolerance_range(equivalent, &tolerances);

        let contributions = match self.topology {
            Topology::Series if equivalent > 0.0 => magnitudes
                .iter()
                .map(|m| m / equivalent * 100.0)
                .collect(),
            Topology::Series => vec![0.0; magnitudes.len()],
            // Every element is non-zero here, or `equivalent` would have failed.
            Topology::Parallel => magnitudes
                .iter()
                .map(|m| equivalent / m * 100.0)
                .collect(),
        };

        Ok(NetworkAnalysis {
            topology: self.topology,
            equivalent,
            mean_tolerance_percent: mean_tolerance(&tolerances),
            min,
            max,
            contributions,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkOptimization {
    pub topology: Topology,
    /// One nearest-value match per element, in input order
    pub matches: Vec<MatchResult>,
    pub original_equivalent: f64,
    pub optimized_equivalent: f64,
    /// Relative error of the optimized equivalent; 0 when the original is 0
    pub error_percent: f64,
}

/// Replace every element by its nearest catalog value and compare the two
/// equivalents.
pub fn optimize_network(
    magnitudes: &[f64],
    topology: Topology,
    catalog: &Catalog<'_>,
    options: SearchOptions,
) -> Result<NetworkOptimization, CalcError> {
    let original_equivalent = equivalent(magnitudes, topology)?;

    let candidates = catalog.values();
    let matches = magnitudes
        .iter()
        .map(|&m| find_nearest_with(m, candidates.iter().copied(), options))
        .collect::<Result<Vec<_>, _>>()?;

    let optimized: Vec<f64> = matches.iter().map(|m| m.value).collect();
    let optimized_equivalent = equivalent(&optimized, topology)?;
    let error_percent = if original_equivalent == 0.0 {
        0.0
    } else {
        relative_error_percent(optimized_equivalent, original_equivalent)?
    };

    tracing::debug!(
        "optimized {} network of {} elements over {}: {:.3}%",
        topology,
        magnitudes.len(),
        catalog.label(),
        error_percent
    );

    Ok(NetworkOptimization {
        topology,
        matches,
        original_equivalent,
        optimized_equivalent,
        error_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::custom::CustomValueList;
    use crate::catalog::series::{DecadeRange, E12};

    #[test]
    fn test_single_element() {
        for r in [0.5, 47.0, 1e6] {
            assert_eq!(equivalent(&[r], Topology::Series).unwrap(), r);
            assert!((equivalent(&[r], Topology::Parallel).unwrap() - r).abs() < 1e-9 * r);
        }
    }

    #[test]
    fn test_two_parallel() {
        let (r1, r2) = (1_000.0, 2_200.0);
        let eq = equivalent(&[r1, r2], Topology::Parallel).unwrap();
        assert!((eq - r1 * r2 / (r1 + r2)).abs() < 1e-9);
    }

    #[test]
    fn test_series_sum() {
        assert_eq!(equivalent(&[100.0, 220.0, 330.0], Topology::Series).unwrap(), 650.0);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(equivalent(&[], Topology::Series), Err(CalcError::EmptyNetwork)));
        assert!(matches!(
            equivalent(&[100.0, 0.0], Topology::Parallel),
            Err(CalcError::DivisionByZero(_))
        ));
        assert_eq!(equivalent(&[100.0, 0.0], Topology::Series).unwrap(), 100.0);
        assert!(matches!(
            equivalent(&[100.0, -5.0], Topology::Series),
            Err(CalcError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_tolerance_range_uses_mean() {
        let (min, max) = tolerance_range(1_000.0, &[1.0, 5.0]);
        assert!((min - 970.0).abs() < 1e-9);
        assert!((max - 1_030.0).abs() < 1e-9);
        assert_eq!(tolerance_range(1_000.0, &[]), (1_000.0, 1_000.0));
    }

    #[test]
    fn test_topology_parse() {
        assert_eq!("Parallelo".parse::<Topology>().unwrap(), Topology::Parallel);
        assert_eq!("serie".parse::<Topology>().unwrap(), Topology::Series);
        assert!("star".parse::<Topology>().is_err());
    }

    #[test]
    fn test_analyze_contributions() {
        let spec = NetworkSpec::new(
            vec![
                NetworkElement { value: 100.0, tolerance_percent: 5.0 },
                NetworkElement { value: 300.0, tolerance_percent: 1.0 },
            ],
            Topology::Series,
        );
        let analysis = spec.analyze().unwrap();
        assert_eq!(analysis.equivalent, 400.0);
        assert_eq!(analysis.contributions, vec![25.0, 75.0]);
        assert_eq!(analysis.mean_tolerance_percent, 3.0);

        let spec = NetworkSpec::new(spec.elements.clone(), Topology::Parallel);
        let analysis = spec.analyze().unwrap();
        let total: f64 = analysis.contributions.iter().sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert!(analysis.contributions[0] > analysis.contributions[1]);
    }

    #[test]
    fn test_optimize_network() {
        let catalog = Catalog::series(&E12, DecadeRange::RESISTORS);
        let result = optimize_network(
            &[1_000.0, 4_600.0],
            Topology::Series,
            &catalog,
            SearchOptions::default(),
        )
        .unwrap();
        assert_eq!(result.matches.len(), 2);
        assert!((result.matches[1].value - 4_700.0).abs() < 1e-6);
        assert!((result.optimized_equivalent - 5_700.0).abs() < 1e-6);
        assert!((result.error_percent - 100.0 / 5_600.0 * 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_optimize_with_custom_list() {
        let bom = CustomValueList::new(vec![330.0, 1_000.0]).unwrap();
        let result = optimize_network(
            &[300.0, 900.0],
            Topology::Parallel,
            &Catalog::custom(&bom),
            SearchOptions::default(),
        )
        .unwrap();
        assert_eq!(result.matches[0].value, 330.0);
        assert_eq!(result.matches[1].value, 1_000.0);
    }

    #[test]
    fn test_optimize_zero_original_in_series() {
        let catalog = Catalog::series(&E12, DecadeRange::RESISTORS);
        assert!(matches!(
            optimize_network(&[0.0], Topology::Series, &catalog, SearchOptions::default()),
            Err(CalcError::InvalidTarget(_))
        ));
    }
}

//! Nearest commercial value search
//!
//! A linear scan over a catalog keeping the candidate with the smallest
//! relative error. Ties keep the first candidate in scan order.

use serde::Serialize;

use crate::catalog::colors::BandColor;
use crate::catalog::custom::Catalog;
use crate::catalog::series::{DecadeRange, ValueSeries, RESISTOR_SERIES};
use crate::core::CalcError;
use crate::markings::color_code::ColorCode;

/// Outcome of a nearest-value search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// Value that was asked for
    pub target: f64,
    /// Catalog value that was picked
    pub value: f64,
    pub error_percent: f64,
    /// Color bands for the picked value, when requested
    pub bands: Option<ColorCode>,
}

/// Scan options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// Stop as soon as a candidate is within this relative error (percent).
    pub early_exit_percent: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            early_exit_percent: 0.0,
        }
    }
}

/// `|actual - target| / target * 100`
pub fn relative_error_percent(actual: f64, target: f64) -> Result<f64, CalcError> {
    if target == 0.0 || !target.is_finite() {
        return Err(CalcError::InvalidTarget(format!(
            "relative error is undefined for target {}",
            target
        )));
    }
    Ok(((actual - target) / target).abs() * 100.0)
}

fn check_target(target: f64) -> Result<(), CalcError> {
    if !(target.is_finite() && target > 0.0) {
        return Err(CalcError::InvalidTarget(format!(
            "target must be a positive number, got {}",
            target
        )));
    }
    Ok(())
}

/// Nearest candidate by relative error.
pub fn find_nearest<I>(target: f64, candidates: I) -> Result<MatchResult, CalcError>
where
    I: IntoIterator<Item = f64>,
{
    find_nearest_with(target, candidates, SearchOptions::default())
}

pub fn find_nearest_with<I>(
    target: f64,
    candidates: I,
    options: SearchOptions,
) -> Result<MatchResult, CalcError>
where
    I: IntoIterator<Item = f64>,
{
    check_target(target)?;

    let mut best: Option<(f64, f64)> = None;
    for candidate in candidates {
        let error = ((candidate - target) / target).abs() * 100.0;
        if best.map_or(true, |(_, best_error)| error < best_error) {
            best = Some((candidate, error));
            if error <= options.early_exit_percent {
                break;
            }
        }
    }

    let (value, error_percent) = best.ok_or(CalcError::NoCandidates)?;
    Ok(MatchResult {
        target,
        value,
        error_percent,
        bands: None,
    })
}

/// Nearest value of a catalog, expanded if it is a series.
pub fn find_nearest_in(
    target: f64,
    catalog: &Catalog<'_>,
    options: SearchOptions,
) -> Result<MatchResult, CalcError> {
    find_nearest_with(target, catalog.values(), options)
}

/// Nearest candidate by absolute difference. Returns `None` for an empty
/// candidate list.
pub fn find_nearest_absolute(target: f64, candidates: &[f64]) -> Option<f64> {
    let mut best: Option<(f64, f64)> = None;
    for &candidate in candidates {
        let distance = (candidate - target).abs();
        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((candidate, distance));
        }
    }
    best.map(|(value, _)| value)
}

/// Nearest value of `series` together with the bands that mark it.
pub fn find_color_match(
    target: f64,
    series: &ValueSeries,
    decades: DecadeRange,
) -> Result<MatchResult, CalcError> {
    let mut result = find_nearest(target, series.expand(decades))?;
    let tolerance = series.tolerance_band;
    let code = ColorCode::encode(result.value, series.significant_digits(), tolerance)?;
    result.bands = Some(code);
    Ok(result)
}

/// A color match over every resistor series, reporting which series won.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesMatch {
    pub series: &'static str,
    pub tolerance: BandColor,
    pub result: MatchResult,
}

/// Scan every series from E3 to E192. A denser series only wins when it is
/// strictly closer.
pub fn find_color_match_any(target: f64, decades: DecadeRange) -> Result<SeriesMatch, CalcError> {
    check_target(target)?;
    let mut best: Option<SeriesMatch> = None;
    let mut unencodable: Option<CalcError> = None;
    for series in RESISTOR_SERIES {
        let candidate = match find_color_match(target, series, decades) {
            Ok(found) => found,
            Err(CalcError::NoCandidates) => continue,
            // Values the bands cannot express are skipped, not fatal.
            Err(e @ CalcError::InvalidTarget(_)) => {
                unencodable = Some(e);
                continue;
            }
            Err(e) => return Err(e),
        };
        let better = best
            .as_ref()
            .map_or(true, |b| candidate.error_percent < b.result.error_percent);
        if better {
            best = Some(SeriesMatch {
                series: series.name,
                tolerance: series.tolerance_band,
                result: candidate,
            });
        }
    }
    match best {
        Some(found) => Ok(found),
        None => Err(unencodable.unwrap_or(CalcError::NoCandidates)),
    }
}

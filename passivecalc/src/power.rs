//! Resistor Power Derating
//!
//! Estimates dissipated power from any two of V, I and R, derates a package
//! rating linearly above a knee temperature and classifies the margin left:
//!
//! ```text
//! rating
//!   │━━━━━━━━━━━━━┓
//!   │             ┃╲   slope = percent_per_c
//!   │             ┃  ╲
//!   │             ┃    ╲
//!   └─────────────┸──────╲──── ambient °C
//!               start_c
//! ```
//!
//! Safety factor = derated rating / dissipated power.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::packages::Package;
use crate::core::CalcError;

/// Default knee of the derating curve in °C
pub const DEFAULT_DERATING_START_C: f64 = 70.0;

/// Default slope above the knee in percent of rating per °C
pub const DEFAULT_DERATING_PERCENT_PER_C: f64 = 0.8;

/// Linear derating curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeratingCurve {
    pub start_c: f64,
    pub percent_per_c: f64,
}

impl Default for DeratingCurve {
    fn default() -> Self {
        Self {
            start_c: DEFAULT_DERATING_START_C,
            percent_per_c: DEFAULT_DERATING_PERCENT_PER_C,
        }
    }
}

impl DeratingCurve {
    pub fn derate(&self, rated_w: f64, ambient_c: f64) -> f64 {
        derate(rated_w, ambient_c, self.start_c, self.percent_per_c)
    }
}

/// `max(0, rated · (1 − max(0, ambient − start) · pct / 100))`
pub fn derate(rated_w: f64, ambient_c: f64, start_c: f64, percent_per_c: f64) -> f64 {
    let excess = (ambient_c - start_c).max(0.0);
    (rated_w * (1.0 - excess * percent_per_c / 100.0)).max(0.0)
}

/// Boundaries between safety classes, expressed as derated/dissipated ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyThresholds {
    /// Below this ratio the margin needs attention
    pub attention_below: f64,
    /// Below this ratio (and at or above `attention_below`) the margin is good
    pub good_below: f64,
}

impl Default for SafetyThresholds {
    fn default() -> Self {
        Self {
            attention_below: 1.5,
            good_below: 2.0,
        }
    }
}

impl SafetyThresholds {
    /// Build thresholds, rejecting non-monotonic values.
    pub fn new(attention_below: f64, good_below: f64) -> Result<Self, CalcError> {
        let thresholds = Self {
            attention_below,
            good_below,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<(), CalcError> {
        let ordered = self.attention_below.is_finite()
            && self.good_below.is_finite()
            && self.attention_below >= 1.0
            && self.good_below > self.attention_below;
        if !ordered {
            return Err(CalcError::InvalidParameter(format!(
                "safety thresholds must satisfy 1 <= attention ({}) < good ({})",
                self.attention_below, self.good_below
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SafetyClass {
    Critical,
    Attention,
    Good,
    Excellent,
}

impl SafetyClass {
    pub fn label(&self) -> &'static str {
        match self {
            SafetyClass::Critical => "CRITICAL",
            SafetyClass::Attention => "ATTENTION",
            SafetyClass::Good => "GOOD",
            SafetyClass::Excellent => "EXCELLENT",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            SafetyClass::Critical => "dissipation exceeds the derated rating, use a larger package",
            SafetyClass::Attention => "little margin left, consider a larger package",
            SafetyClass::Good => "adequate margin",
            SafetyClass::Excellent => "ample margin",
        }
    }
}

impl fmt::Display for SafetyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn classify_safety(dissipated_w: f64, derated_w: f64) -> SafetyClass {
    classify_safety_with(dissipated_w, derated_w, &SafetyThresholds::default())
}

pub fn classify_safety_with(
    dissipated_w: f64,
    derated_w: f64,
    thresholds: &SafetyThresholds,
) -> SafetyClass {
    if dissipated_w > derated_w {
        return SafetyClass::Critical;
    }
    if dissipated_w <= 0.0 {
        // Nothing dissipated: any rating is enough.
        return SafetyClass::Excellent;
    }
    let ratio = derated_w / dissipated_w;
    if ratio < thresholds.attention_below {
        SafetyClass::Attention
    } else if ratio < thresholds.good_below {
        SafetyClass::Good
    } else {
        SafetyClass::Excellent
    }
}

/// Which Ohm's-law form produced a power figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PowerFormula {
    #[serde(rename = "V*I")]
    VoltageCurrent,
    #[serde(rename = "V^2/R")]
    VoltageResistance,
    #[serde(rename = "I^2*R")]
    CurrentResistance,
}

impl PowerFormula {
    pub fn label(&self) -> &'static str {
        match self {
            PowerFormula::VoltageCurrent => "V*I",
            PowerFormula::VoltageResistance => "V^2/R",
            PowerFormula::CurrentResistance => "I^2*R",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerEstimate {
    pub formulas: Vec<(PowerFormula, f64)>,
    pub average_w: f64,
}

/// Average of every power formula whose inputs are both positive. Pass 0 for
/// an unknown quantity.
pub fn power_estimate(
    voltage: f64,
    current: f64,
    resistance: f64,
) -> Result<PowerEstimate, CalcError> {
    let known = |x: f64| x.is_finite() && x > 0.0;
    let (v, i, r) = (known(voltage), known(current), known(resistance));

    let mut formulas = Vec::with_capacity(3);
    if v && i {
        formulas.push((PowerFormula::VoltageCurrent, voltage * current));
    }
    if v && r {
        formulas.push((PowerFormula::VoltageResistance, voltage * voltage / resistance));
    }
    if i && r {
        formulas.push((PowerFormula::CurrentResistance, current * current * resistance));
    }

    if formulas.is_empty() {
        return Err(CalcError::InsufficientInput(
            "at least two of voltage, current and resistance must be positive".to_string(),
        ));
    }

    let average_w = formulas.iter().map(|(_, p)| p).sum::<f64>() / formulas.len() as f64;
    Ok(PowerEstimate {
        formulas,
        average_w,
    })
}

/// Full thermal check of one package at one ambient temperature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageAssessment {
    pub package: &'static str,
    pub dissipated_w: f64,
    pub rated_w: f64,
    pub derated_w: f64,
    /// Derated rating over dissipated power; infinite when nothing dissipates
    pub safety_factor: f64,
    pub class: SafetyClass,
    pub temperature_rise_c: Option<f64>,
    pub body_temperature_c: Option<f64>,
}

pub fn assess_package(
    dissipated_w: f64,
    package: &'static Package,
    ambient_c: f64,
    curve: &DeratingCurve,
    thresholds: &SafetyThresholds,
) -> PackageAssessment {
    let derated_w = curve.derate(package.power_w, ambient_c);
    let safety_factor = if dissipated_w > 0.0 {
        derated_w / dissipated_w
    } else {
        f64::INFINITY
    };
    let temperature_rise_c = package.rth_ja.map(|rth| dissipated_w * rth);

    PackageAssessment {
        package: package.name,
        dissipated_w,
        rated_w: package.power_w,
        derated_w,
        safety_factor,
        class: classify_safety_with(dissipated_w, derated_w, thresholds),
        temperature_rise_c,
        body_temperature_c: temperature_rise_c.map(|rise| ambient_c + rise),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::packages;

    #[test]
    fn test_derate_below_knee() {
        assert_eq!(derate(0.25, 25.0, 70.0, 0.8), 0.25);
        assert_eq!(derate(0.25, 70.0, 70.0, 0.8), 0.25);
    }

    #[test]
    fn test_derate_above_knee() {
        // 30 °C over the knee at 0.8 %/°C removes 24 %.
        let derated = derate(0.25, 100.0, 70.0, 0.8);
        assert!((derated - 0.19).abs() < 1e-12);
    }

    #[test]
    fn test_derate_clamps_at_zero() {
        assert_eq!(derate(1.0, 250.0, 70.0, 0.8), 0.0);
    }

    #[test]
    fn test_classify_safety() {
        assert_eq!(classify_safety(0.2, 0.1), SafetyClass::Critical);
        assert_eq!(classify_safety(0.1, 0.12), SafetyClass::Attention);
        assert_eq!(classify_safety(0.1, 0.16), SafetyClass::Good);
        assert_eq!(classify_safety(0.1, 0.2), SafetyClass::Excellent);
        assert_eq!(classify_safety(0.1, 0.1), SafetyClass::Attention);
    }

    #[test]
    fn test_thresholds_must_be_monotonic() {
        assert!(SafetyThresholds::new(1.5, 2.0).is_ok());
        assert!(matches!(
            SafetyThresholds::new(2.0, 1.5),
            Err(CalcError::InvalidParameter(_))
        ));
        assert!(SafetyThresholds::new(1.5, 1.5).is_err());
    }

    #[test]
    fn test_custom_thresholds() {
        let strict = SafetyThresholds::new(2.0, 3.0).unwrap();
        assert_eq!(
            classify_safety_with(0.1, 0.25, &strict),
            SafetyClass::Good
        );
    }

    #[test]
    fn test_power_estimate_all_three() {
        // Consistent inputs: 5 V, 0.05 A, 100 Ω → 0.25 W three ways.
        let estimate = power_estimate(5.0, 0.05, 100.0).unwrap();
        assert_eq!(estimate.formulas.len(), 3);
        assert!((estimate.average_w - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_power_estimate_two_inputs() {
        let estimate = power_estimate(10.0, 0.0, 100.0).unwrap();
        assert_eq!(estimate.formulas.len(), 1);
        assert_eq!(estimate.formulas[0].0, PowerFormula::VoltageResistance);
        assert!((estimate.average_w - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_power_estimate_insufficient() {
        assert!(matches!(
            power_estimate(5.0, 0.0, 0.0),
            Err(CalcError::InsufficientInput(_))
        ));
        assert!(matches!(
            power_estimate(-5.0, 0.0, 100.0),
            Err(CalcError::InsufficientInput(_))
        ));
    }

    #[test]
    fn test_assess_package() {
        let package = packages::by_name("0805").unwrap();
        let assessment = assess_package(
            0.05,
            package,
            25.0,
            &DeratingCurve::default(),
            &SafetyThresholds::default(),
        );
        assert_eq!(assessment.derated_w, 0.125);
        assert!((assessment.safety_factor - 2.5).abs() < 1e-12);
        assert_eq!(assessment.class, SafetyClass::Excellent);
        assert!((assessment.temperature_rise_c.unwrap() - 20.0).abs() < 1e-9);
        assert!((assessment.body_temperature_c.unwrap() - 45.0).abs() < 1e-9);
    }
}

//! IEC 60063 preferred number series
//!
//! Each series stores its mantissas in [1, 10). A full catalog is obtained by
//! multiplying every mantissa by each power of ten in a [`DecadeRange`].

use serde::{Deserialize, Serialize};

use crate::catalog::colors::BandColor;
use crate::core::CalcError;

/// Half-open range of decade exponents: `low..high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecadeRange {
    pub low: i32,
    pub high: i32,
}

impl DecadeRange {
    pub const fn new(low: i32, high: i32) -> Self {
        Self { low, high }
    }

    /// 10 mΩ up to 99 MΩ
    pub const RESISTORS: DecadeRange = DecadeRange::new(-2, 8);

    /// 1 pF up to 99 µF
    pub const CAPACITORS: DecadeRange = DecadeRange::new(-12, -4);

    pub const MIN_EXPONENT: i32 = -15;
    pub const MAX_EXPONENT: i32 = 15;

    pub fn is_empty(&self) -> bool {
        self.high <= self.low
    }

    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (i64::from(self.high) - i64::from(self.low)) as usize
        }
    }

    /// Both ends must lie in `MIN_EXPONENT..=MAX_EXPONENT`.
    pub fn validate(&self, what: &str) -> Result<(), CalcError> {
        let allowed = Self::MIN_EXPONENT..=Self::MAX_EXPONENT;
        if !allowed.contains(&self.low) || !allowed.contains(&self.high) {
            return Err(CalcError::InvalidParameter(format!(
                "{} {}..{} outside 10^{}..10^{}",
                what,
                self.low,
                self.high,
                Self::MIN_EXPONENT,
                Self::MAX_EXPONENT
            )));
        }
        if self.is_empty() {
            return Err(CalcError::InvalidParameter(format!("{} is empty", what)));
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> {
        self.low..self.high
    }
}

/// A named E-series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueSeries {
    pub name: &'static str,
    pub values: &'static [f64],
    /// Tolerance band customarily printed on parts of this series
    pub tolerance_band: BandColor,
}

impl ValueSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of significant digits needed to mark a value of this series.
    pub fn significant_digits(&self) -> usize {
        if self.values.len() > 24 {
            3
        } else {
            2
        }
    }

    pub fn tolerance_percent(&self) -> f64 {
        self.tolerance_band.tolerance_percent().unwrap_or(20.0)
    }

    /// Expand the series over a decade range. Decades form the outer loop, so
    /// the output is ascending.
    pub fn expand(&self, decades: DecadeRange) -> Vec<f64> {
        let mut values = Vec::with_capacity(self.values.len() * decades.len());
        for decade in decades.iter() {
            let scale = 10f64.powi(decade);
            values.extend(self.values.iter().map(|v| v * scale));
        }
        values
    }
}

pub const E3: ValueSeries = ValueSeries {
    name: "E3",
    values: &[1.0, 2.2, 4.7],
    tolerance_band: BandColor::None,
};

pub const E6: ValueSeries = ValueSeries {
    name: "E6",
    values: &[1.0, 1.5, 2.2, 3.3, 4.7, 6.8],
    tolerance_band: BandColor::None,
};

pub const E12: ValueSeries = ValueSeries {
    name: "E12",
    values: &[1.0, 1.2, 1.5, 1.8, 2.2, 2.7, 3.3, 3.9, 4.7, 5.6, 6.8, 8.2],
    tolerance_band: BandColor::Silver,
};

pub const E24: ValueSeries = ValueSeries {
    name: "E24",
    values: &[
        1.0, 1.1, 1.2, 1.3, 1.5, 1.6, 1.8, 2.0, 2.2, 2.4, 2.7, 3.0, 3.3, 3.6, 3.9, 4.3, 4.7, 5.1,
        5.6, 6.2, 6.8, 7.5, 8.2, 9.1,
    ],
    tolerance_band: BandColor::Gold,
};

pub const E48: ValueSeries = ValueSeries {
    name: "E48",
    values: &[
        1.00, 1.05, 1.10, 1.15, 1.21, 1.27, 1.33, 1.40, 1.47, 1.54, 1.62, 1.69, 1.78, 1.87, 1.96,
        2.05, 2.15, 2.26, 2.37, 2.49, 2.61, 2.74, 2.87, 3.01, 3.16, 3.32, 3.48, 3.65, 3.83, 4.02,
        4.22, 4.42, 4.64, 4.87, 5.11, 5.36, 5.62, 5.90, 6.19, 6.49, 6.81, 7.15, 7.50, 7.87, 8.25,
        8.66, 9.09, 9.53,
    ],
    tolerance_band: BandColor::Red,
};

pub const E96: ValueSeries = ValueSeries {
    name: "E96",
    values: &[
        1.00, 1.02, 1.05, 1.07, 1.10, 1.13, 1.15, 1.18, 1.21, 1.24, 1.27, 1.30, 1.33, 1.37, 1.40,
        1.43, 1.47, 1.50, 1.54, 1.58, 1.62, 1.65, 1.69, 1.74, 1.78, 1.82, 1.87, 1.91, 1.96, 2.00,
        2.05, 2.10, 2.15, 2.21, 2.26, 2.32, 2.37, 2.43, 2.49, 2.55, 2.61, 2.67, 2.74, 2.80, 2.87,
        2.94, 3.01, 3.09, 3.16, 3.24, 3.32, 3.40, 3.48, 3.57, 3.65, 3.74, 3.83, 3.92, 4.02, 4.12,
        4.22, 4.32, 4.42, 4.53, 4.64, 4.75, 4.87, 4.99, 5.11, 5.23, 5.36, 5.49, 5.62, 5.76, 5.90,
        6.04, 6.19, 6.34, 6.49, 6.65, 6.81, 6.98, 7.15, 7.32, 7.50, 7.68, 7.87, 8.06, 8.25, 8.45,
        8.66, 8.87, 9.09, 9.31, 9.53, 9.76,
    ],
    tolerance_band: BandColor::Brown,
};

pub const E192: ValueSeries = ValueSeries {
    name: "E192",
    values: &[
        1.00, 1.01, 1.02, 1.04, 1.05, 1.06, 1.07, 1.09, 1.10, 1.11, 1.13, 1.14, 1.15, 1.17, 1.18,
        1.20, 1.21, 1.23, 1.24, 1.26, 1.27, 1.29, 1.30, 1.32, 1.33, 1.35, 1.37, 1.38, 1.40, 1.42,
        1.43, 1.45, 1.47, 1.49, 1.50, 1.52, 1.54, 1.56, 1.58, 1.60, 1.62, 1.64, 1.65, 1.67, 1.69,
        1.72, 1.74, 1.76, 1.78, 1.80, 1.82, 1.84, 1.87, 1.89, 1.91, 1.93, 1.96, 1.98, 2.00, 2.03,
        2.05, 2.08, 2.10, 2.13, 2.15, 2.18, 2.21, 2.23, 2.26, 2.29, 2.32, 2.34, 2.37, 2.40, 2.43,
        2.46, 2.49, 2.52, 2.55, 2.58, 2.61, 2.64, 2.67, 2.71, 2.74, 2.77, 2.80, 2.84, 2.87, 2.91,
        2.94, 2.98, 3.01, 3.05, 3.09, 3.12, 3.16, 3.20, 3.24, 3.28, 3.32, 3.36, 3.40, 3.44, 3.48,
        3.52, 3.57, 3.61, 3.65, 3.70, 3.74, 3.79, 3.83, 3.88, 3.92, 3.97, 4.02, 4.07, 4.12, 4.17,
        4.22, 4.27, 4.32, 4.37, 4.42, 4.48, 4.53, 4.59, 4.64, 4.70, 4.75, 4.81, 4.87, 4.93, 4.99,
        5.05, 5.11, 5.17, 5.23, 5.30, 5.36, 5.42, 5.49, 5.56, 5.62, 5.69, 5.76, 5.83, 5.90, 5.97,
        6.04, 6.12, 6.19, 6.26, 6.34, 6.42, 6.49, 6.57, 6.65, 6.73, 6.81, 6.90, 6.98, 7.06, 7.15,
        7.23, 7.32, 7.41, 7.50, 7.59, 7.68, 7.77, 7.87, 7.96, 8.06, 8.16, 8.25, 8.35, 8.45, 8.56,
        8.66, 8.76, 8.87, 8.98, 9.09, 9.20, 9.31, 9.42, 9.53, 9.65, 9.76, 9.88,
    ],
    tolerance_band: BandColor::Green,
};

/// Resistor series, least dense first.
pub const RESISTOR_SERIES: [&ValueSeries; 7] = [&E3, &E6, &E12, &E24, &E48, &E96, &E192];

/// Series stocked for capacitors.
pub const CAPACITOR_SERIES: [&ValueSeries; 3] = [&E6, &E12, &E24];

fn lookup(
    table: &[&'static ValueSeries],
    name: &str,
) -> Result<&'static ValueSeries, CalcError> {
    let wanted = name.trim();
    table
        .iter()
        .copied()
        .find(|s| s.name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| CalcError::UnknownSeries(wanted.to_string()))
}

/// Look up a resistor series by name (case-insensitive).
pub fn series(name: &str) -> Result<&'static ValueSeries, CalcError> {
    lookup(&RESISTOR_SERIES, name)
}

/// Look up a capacitor series by name (case-insensitive).
pub fn capacitor_series(name: &str) -> Result<&'static ValueSeries, CalcError> {
    lookup(&CAPACITOR_SERIES, name)
}

/// Expand a named resistor series over `[decade_low, decade_high)`.
pub fn expand(series_name: &str, decade_low: i32, decade_high: i32) -> Result<Vec<f64>, CalcError> {
    Ok(series(series_name)?.expand(DecadeRange::new(decade_low, decade_high)))
}

//! 4- and 5-band resistor color codes
//!
//! ```text
//!  4 bands:  digit digit       multiplier  tolerance
//!  5 bands:  digit digit digit multiplier  tolerance
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::colors::BandColor;
use crate::core::CalcError;

/// A complete set of bands read left to right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorCode {
    /// Two or three significant digit bands
    pub digits: Vec<BandColor>,
    pub multiplier: BandColor,
    pub tolerance: BandColor,
}

/// Nominal value and tolerance window of a decoded color code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecodedValue {
    pub value: f64,
    pub tolerance_percent: f64,
    pub min: f64,
    pub max: f64,
}

impl ColorCode {
    pub fn new(
        digits: Vec<BandColor>,
        multiplier: BandColor,
        tolerance: BandColor,
    ) -> Result<Self, CalcError> {
        let code = Self {
            digits,
            multiplier,
            tolerance,
        };
        code.validate()?;
        Ok(code)
    }

    /// Parse band names in reading order: 4 or 5 names.
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self, CalcError> {
        let bands = names
            .iter()
            .map(|n| n.as_ref().parse::<BandColor>())
            .collect::<Result<Vec<_>, _>>()?;
        match bands.as_slice() {
            [digits @ .., multiplier, tolerance] if matches!(digits.len(), 2 | 3) => {
                Self::new(digits.to_vec(), *multiplier, *tolerance)
            }
            _ => Err(CalcError::InvalidCode(format!(
                "expected 4 or 5 bands, got {}",
                bands.len()
            ))),
        }
    }

    pub fn band_count(&self) -> usize {
        self.digits.len() + 2
    }

    /// All bands in reading order.
    pub fn bands(&self) -> Vec<BandColor> {
        let mut bands = self.digits.clone();
        bands.push(self.multiplier);
        bands.push(self.tolerance);
        bands
    }

    fn validate(&self) -> Result<(), CalcError> {
        if !matches!(self.digits.len(), 2 | 3) {
            return Err(CalcError::InvalidCode(format!(
                "a color code has 2 or 3 digit bands, got {}",
                self.digits.len()
            )));
        }
        if self.digits[0] == BandColor::Black {
            return Err(CalcError::InvalidCode(
                "first digit band cannot be black".to_string(),
            ));
        }
        if let Some(bad) = self.digits.iter().find(|c| c.digit().is_none()) {
            return Err(CalcError::InvalidCode(format!(
                "{} is not a digit color",
                bad
            )));
        }
        if self.multiplier.multiplier_exponent().is_none() {
            return Err(CalcError::InvalidCode(format!(
                "{} is not a multiplier color",
                self.multiplier
            )));
        }
        if self.tolerance.tolerance_percent().is_none() {
            return Err(CalcError::InvalidCode(format!(
                "{} is not a tolerance color",
                self.tolerance
            )));
        }
        Ok(())
    }

    pub fn decode(&self) -> Result<DecodedValue, CalcError> {
        self.validate()?;

        let significant = self
            .digits
            .iter()
            .filter_map(|c| c.digit())
            .fold(0u32, |acc, d| acc * 10 + u32::from(d));
        let exponent = self.multiplier.multiplier_exponent().unwrap_or(0);
        let tolerance_percent = self.tolerance.tolerance_percent().unwrap_or(20.0);

        let value = f64::from(significant) * 10f64.powi(exponent);
        let delta = value * tolerance_percent / 100.0;
        Ok(DecodedValue {
            value,
            tolerance_percent,
            min: value - delta,
            max: value + delta,
        })
    }

    /// Bands for `value` rounded to `significant_digits` (2 or 3) digits.
    pub fn encode(
        value: f64,
        significant_digits: usize,
        tolerance: BandColor,
    ) -> Result<Self, CalcError> {
        if !(value.is_finite() && value > 0.0) {
            return Err(CalcError::InvalidTarget(format!(
                "cannot encode {} as a color code",
                value
            )));
        }
        if !matches!(significant_digits, 2 | 3) {
            return Err(CalcError::InvalidParameter(format!(
                "significant digits must be 2 or 3, got {}",
                significant_digits
            )));
        }

        let sig = significant_digits as i32;
        let mut exponent = value.log10().floor() as i32 - (sig - 1);
        let mut mantissa = (value / 10f64.powi(exponent)).round() as u32;
        if mantissa >= 10u32.pow(significant_digits as u32) {
            exponent += 1;
            mantissa = (value / 10f64.powi(exponent)).round() as u32;
        }

        let multiplier = BandColor::for_multiplier(exponent).ok_or_else(|| {
            CalcError::InvalidTarget(format!(
                "{} needs multiplier 10^{} which has no color",
                value, exponent
            ))
        })?;

        let digits = mantissa
            .to_string()
            .bytes()
            .filter_map(|b| BandColor::from_digit(b - b'0'))
            .collect();

        Self::new(digits, multiplier, tolerance)
    }
}

impl fmt::Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.bands().iter().map(|b| b.name()).collect();
        write!(f, "{}", names.join("-"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BandColor::*;

    #[test]
    fn test_decode_four_band() {
        let code = ColorCode::parse(&["yellow", "violet", "red", "gold"]).unwrap();
        let decoded = code.decode().unwrap();
        assert!((decoded.value - 4_700.0).abs() < 1e-9);
        assert_eq!(decoded.tolerance_percent, 5.0);
        assert!((decoded.min - 4_465.0).abs() < 1e-9);
        assert!((decoded.max - 4_935.0).abs() < 1e-9);
    }

    #[test]
    fn test_decode_five_band() {
        let code = ColorCode::parse(&["brown", "black", "black", "red", "brown"]).unwrap();
        let decoded = code.decode().unwrap();
        assert!((decoded.value - 10_000.0).abs() < 1e-9);
        assert_eq!(decoded.tolerance_percent, 1.0);
        assert_eq!(code.band_count(), 5);
    }

    #[test]
    fn test_decode_fractional_multiplier() {
        let code = ColorCode::new(vec![Red, Red], Silver, Gold).unwrap();
        assert!((code.decode().unwrap().value - 0.22).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_black_first_band() {
        assert!(matches!(
            ColorCode::new(vec![Black, Red], Red, Gold),
            Err(CalcError::InvalidCode(_))
        ));
    }

    #[test]
    fn test_rejects_misplaced_colors() {
        assert!(ColorCode::new(vec![Gold, Red], Red, Gold).is_err());
        assert!(ColorCode::new(vec![Red, Red], None, Gold).is_err());
        assert!(ColorCode::new(vec![Red, Red], Red, Orange).is_err());
        assert!(matches!(
            ColorCode::parse(&["red", "red", "red"]),
            Err(CalcError::InvalidCode(_))
        ));
        assert!(matches!(
            ColorCode::parse(&["red", "pink", "red", "gold"]),
            Err(CalcError::UnknownColor(_))
        ));
    }

    #[test]
    fn test_encode() {
        let code = ColorCode::encode(2_200.0, 2, Gold).unwrap();
        assert_eq!(code.bands(), vec![Red, Red, Red, Gold]);

        let code = ColorCode::encode(1.0, 2, Gold).unwrap();
        assert_eq!(code.bands(), vec![Brown, Black, Gold, Gold]);

        let code = ColorCode::encode(4_990.0, 3, Brown).unwrap();
        assert_eq!(code.bands(), vec![Yellow, White, White, Brown, Brown]);
        assert_eq!(code.to_string(), "yellow-white-white-brown-brown");
    }

    #[test]
    fn test_encode_carries_on_round_up() {
        let code = ColorCode::encode(996.0, 2, Gold).unwrap();
        assert_eq!(code.digits, vec![Brown, Black]);
        assert_eq!(code.multiplier, Orange);
    }

    #[test]
    fn test_encode_out_of_range() {
        assert!(matches!(
            ColorCode::encode(0.001, 2, Gold),
            Err(CalcError::InvalidTarget(_))
        ));
        assert!(matches!(
            ColorCode::encode(1e12, 2, Gold),
            Err(CalcError::InvalidTarget(_))
        ));
        assert!(ColorCode::encode(0.0, 2, Gold).is_err());
    }

    #[test]
    fn test_encode_decode_within_half_step() {
        for &value in &[1.0, 3.3, 12.0, 56.2, 150.0, 1_234.0, 68_000.0, 9.1e6, 8.2e10] {
            for sig in [2usize, 3] {
                let code = ColorCode::encode(value, sig, Brown).unwrap();
                let decoded = code.decode().unwrap().value;
                let step = 10f64.powi(value.log10().floor() as i32 - (sig as i32 - 1));
                assert!(
                    (decoded - value).abs() <= step / 2.0 + 1e-9 * value,
                    "{} → {} ({})",
                    value,
                    decoded,
                    code
                );
            }
        }
    }
}

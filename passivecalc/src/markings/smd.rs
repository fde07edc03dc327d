//! SMD resistor marking codes
//!
//! | Format   | Example | Meaning                         | Tolerance |
//! |----------|---------|---------------------------------|-----------|
//! | 3-digit  | `103`   | 10 · 10³ = 10 kΩ                | 5 %       |
//! | 4-digit  | `4702`  | 470 · 10² = 47 kΩ               | 1 %       |
//! | R        | `4R7`   | R marks the decimal point       | 5 %       |
//! | EIA-96   | `01C`   | table value 100 · letter (100)  | 1 %       |
//!
//! EIA-96 letters: Z Y X S A B H C D E F. The `R` letter of some tables is
//! not supported since it collides with R notation.

use serde::Serialize;

use crate::core::CalcError;

/// Three-digit values indexed by EIA-96 codes 01..=96
const EIA96_VALUES: [u16; 96] = [
    100, 102, 105, 107, 110, 113, 115, 118, 121, 124, 127, 130, 133, 137, 140, 143, 147, 150, 154,
    158, 162, 165, 169, 174, 178, 182, 187, 191, 196, 200, 205, 210, 215, 221, 226, 232, 237, 243,
    249, 255, 261, 267, 274, 280, 287, 294, 301, 309, 316, 324, 332, 340, 348, 357, 365, 374, 383,
    392, 402, 412, 422, 432, 442, 453, 464, 475, 487, 499, 511, 523, 536, 549, 562, 576, 590, 604,
    619, 634, 649, 665, 681, 698, 715, 732, 750, 768, 787, 806, 825, 845, 866, 887, 909, 931, 953,
    976,
];

fn eia96_multiplier(letter: char) -> Option<i32> {
    match letter {
        'Z' => Some(-3),
        'Y' => Some(-2),
        'X' | 'S' => Some(-1),
        'A' => Some(0),
        'B' | 'H' => Some(1),
        'C' => Some(2),
        'D' => Some(3),
        'E' => Some(4),
        'F' => Some(5),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SmdFormat {
    ThreeDigit,
    FourDigit,
    RNotation,
    Eia96,
}

impl SmdFormat {
    pub fn label(&self) -> &'static str {
        match self {
            SmdFormat::ThreeDigit => "3-digit",
            SmdFormat::FourDigit => "4-digit",
            SmdFormat::RNotation => "R notation",
            SmdFormat::Eia96 => "EIA-96",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmdDecoded {
    pub code: String,
    pub format: SmdFormat,
    pub value: f64,
    pub tolerance_percent: f64,
}

fn invalid(code: &str) -> CalcError {
    CalcError::InvalidCode(format!("'{}' is not a recognised SMD marking", code))
}

/// Decode a marking printed on an SMD resistor.
pub fn decode_smd(code: &str) -> Result<SmdDecoded, CalcError> {
    let normalized = code.trim().to_uppercase();
    let chars: Vec<char> = normalized.chars().collect();
    let all_digits = |s: &[char]| !s.is_empty() && s.iter().all(|c| c.is_ascii_digit());

    // Any R is a decimal point, so `47R` is 47 Ω rather than EIA-96.
    let (format, value, tolerance_percent) = match chars.as_slice() {
        s if s.contains(&'R') => decode_r_notation(&normalized, s)?,
        [d @ .., letter] if d.len() == 2 && all_digits(d) && letter.is_ascii_alphabetic() => {
            decode_eia96(&normalized, d, *letter)?
        }
        s if s.len() == 3 && all_digits(s) => {
            (SmdFormat::ThreeDigit, digits_times_power(s), 5.0)
        }
        s if s.len() == 4 && all_digits(s) => {
            (SmdFormat::FourDigit, digits_times_power(s), 1.0)
        }
        _ => return Err(invalid(code)),
    };

    Ok(SmdDecoded {
        code: normalized,
        format,
        value,
        tolerance_percent,
    })
}

/// Leading digits times ten to the last digit.
fn digits_times_power(s: &[char]) -> f64 {
    let (significant, exponent) = s.split_at(s.len() - 1);
    let significant = significant
        .iter()
        .filter_map(|c| c.to_digit(10))
        .fold(0u32, |acc, d| acc * 10 + d);
    let exponent = exponent[0].to_digit(10).unwrap_or(0) as i32;
    f64::from(significant) * 10f64.powi(exponent)
}

fn decode_r_notation(code: &str, s: &[char]) -> Result<(SmdFormat, f64, f64), CalcError> {
    let r_count = s.iter().filter(|c| **c == 'R').count();
    let digit_count = s.iter().filter(|c| c.is_ascii_digit()).count();
    if r_count != 1 || digit_count == 0 || digit_count + 1 != s.len() {
        return Err(invalid(code));
    }
    let value: f64 = code.replace('R', ".").parse().map_err(|_| invalid(code))?;
    let tolerance = if s.len() >= 4 { 1.0 } else { 5.0 };
    Ok((SmdFormat::RNotation, value, tolerance))
}

fn decode_eia96(code: &str, d: &[char], letter: char) -> Result<(SmdFormat, f64, f64), CalcError> {
    let index = d
        .iter()
        .filter_map(|c| c.to_digit(10))
        .fold(0usize, |acc, x| acc * 10 + x as usize);
    if !(1..=96).contains(&index) {
        return Err(invalid(code));
    }
    let exponent = eia96_multiplier(letter).ok_or_else(|| invalid(code))?;
    let value = f64::from(EIA96_VALUES[index - 1]) * 10f64.powi(exponent);
    Ok((SmdFormat::Eia96, value, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_of(code: &str) -> f64 {
        decode_smd(code).unwrap().value
    }

    #[test]
    fn test_three_digit() {
        let decoded = decode_smd("103").unwrap();
        assert_eq!(decoded.format, SmdFormat::ThreeDigit);
        assert!((decoded.value - 10_000.0).abs() < 1e-9);
        assert_eq!(decoded.tolerance_percent, 5.0);
        assert!((value_of("470") - 47.0).abs() < 1e-9);
    }

    #[test]
    fn test_four_digit() {
        let decoded = decode_smd("4702").unwrap();
        assert_eq!(decoded.format, SmdFormat::FourDigit);
        assert!((decoded.value - 47_000.0).abs() < 1e-9);
        assert_eq!(decoded.tolerance_percent, 1.0);
    }

    #[test]
    fn test_r_notation() {
        assert!((value_of("4R7") - 4.7).abs() < 1e-12);
        assert!((value_of("r47") - 0.47).abs() < 1e-12);
        assert!((value_of("47R") - 47.0).abs() < 1e-12);
        assert_eq!(decode_smd("4R7").unwrap().format, SmdFormat::RNotation);
        assert!(decode_smd("4RR7").is_err());
        assert!(decode_smd("R").is_err());
    }

    #[test]
    fn test_eia96() {
        let decoded = decode_smd("01C").unwrap();
        assert_eq!(decoded.format, SmdFormat::Eia96);
        assert!((decoded.value - 10_000.0).abs() < 1e-9);
        assert!((value_of("68X") - 49.9).abs() < 1e-9);
        assert!((value_of("96z") - 0.976).abs() < 1e-12);
        assert!((value_of("01S") - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_codes() {
        for code in ["", "1", "12345", "00A", "97A", "01Q", "1K0", "abc"] {
            assert!(
                matches!(decode_smd(code), Err(CalcError::InvalidCode(_))),
                "{} should be rejected",
                code
            );
        }
    }
}

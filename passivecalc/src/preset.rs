//! Saved color-decode inputs.
//!
//! Stored as pretty-printed JSON. Field names are the file format.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog::colors::BandColor;
use crate::core::CalcError;
use crate::markings::color_code::ColorCode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorDecodePreset {
    pub band_count: u8,
    pub band1: BandColor,
    pub band2: BandColor,
    /// Third digit, used only with 5 bands
    #[serde(default)]
    pub band3: Option<BandColor>,
    pub multiplier: BandColor,
    pub tolerance: BandColor,
}

impl ColorDecodePreset {
    pub fn from_code(code: &ColorCode) -> Self {
        Self {
            band_count: code.band_count() as u8,
            band1: code.digits[0],
            band2: code.digits[1],
            band3: code.digits.get(2).copied(),
            multiplier: code.multiplier,
            tolerance: code.tolerance,
        }
    }

    pub fn to_code(&self) -> Result<ColorCode, CalcError> {
        let mut digits = vec![self.band1, self.band2];
        match (self.band_count, self.band3) {
            (4, _) => {}
            (5, Some(third)) => digits.push(third),
            (5, None) => {
                return Err(CalcError::InvalidCode(
                    "5-band preset is missing band3".to_string(),
                ))
            }
            (n, _) => {
                return Err(CalcError::InvalidCode(format!(
                    "band_count must be 4 or 5, got {}",
                    n
                )))
            }
        }
        ColorCode::new(digits, self.multiplier, self.tolerance)
    }
}

pub fn save_preset(path: &Path, preset: &ColorDecodePreset) -> Result<(), CalcError> {
    let json = serde_json::to_string_pretty(preset)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn load_preset(path: &Path) -> Result<ColorDecodePreset, CalcError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

//! Resistor color band table (IEC 60062)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::CalcError;

/// One band color as printed on a through-hole resistor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandColor {
    Black,
    Brown,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Violet,
    Grey,
    White,
    Gold,
    Silver,
    /// No tolerance band printed
    None,
}

impl BandColor {
    pub const ALL: [BandColor; 13] = [
        BandColor::Black,
        BandColor::Brown,
        BandColor::Red,
        BandColor::Orange,
        BandColor::Yellow,
        BandColor::Green,
        BandColor::Blue,
        BandColor::Violet,
        BandColor::Grey,
        BandColor::White,
        BandColor::Gold,
        BandColor::Silver,
        BandColor::None,
    ];

    const DIGITS: [BandColor; 10] = [
        BandColor::Black,
        BandColor::Brown,
        BandColor::Red,
        BandColor::Orange,
        BandColor::Yellow,
        BandColor::Green,
        BandColor::Blue,
        BandColor::Violet,
        BandColor::Grey,
        BandColor::White,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BandColor::Black => "black",
            BandColor::Brown => "brown",
            BandColor::Red => "red",
            BandColor::Orange => "orange",
            BandColor::Yellow => "yellow",
            BandColor::Green => "green",
            BandColor::Blue => "blue",
            BandColor::Violet => "violet",
            BandColor::Grey => "grey",
            BandColor::White => "white",
            BandColor::Gold => "gold",
            BandColor::Silver => "silver",
            BandColor::None => "none",
        }
    }

    /// Display color for drawing the band.
    pub fn hex(&self) -> &'static str {
        match self {
            BandColor::Black => "#000000",
            BandColor::Brown => "#8B4513",
            BandColor::Red => "#FF0000",
            BandColor::Orange => "#FFA500",
            BandColor::Yellow => "#FFFF00",
            BandColor::Green => "#008000",
            BandColor::Blue => "#0000FF",
            BandColor::Violet => "#800080",
            BandColor::Grey => "#808080",
            BandColor::White => "#FFFFFF",
            BandColor::Gold => "#FFD700",
            BandColor::Silver => "#C0C0C0",
            BandColor::None => "#D3D3D3",
        }
    }

    /// Value of the color in a digit band.
    pub fn digit(&self) -> Option<u8> {
        Self::DIGITS.iter().position(|c| c == self).map(|d| d as u8)
    }

    /// Code used in the multiplier band: digits reuse 0..=9, gold is -1 and
    /// silver is -2.
    pub fn multiplier_exponent(&self) -> Option<i32> {
        match self {
            BandColor::Gold => Some(-1),
            BandColor::Silver => Some(-2),
            other => other.digit().map(i32::from),
        }
    }

    pub fn tolerance_percent(&self) -> Option<f64> {
        match self {
            BandColor::Brown => Some(1.0),
            BandColor::Red => Some(2.0),
            BandColor::Green => Some(0.5),
            BandColor::Blue => Some(0.25),
            BandColor::Violet => Some(0.1),
            BandColor::Grey => Some(0.05),
            BandColor::Gold => Some(5.0),
            BandColor::Silver => Some(10.0),
            BandColor::None => Some(20.0),
            _ => None,
        }
    }

    pub fn from_digit(digit: u8) -> Option<BandColor> {
        Self::DIGITS.get(digit as usize).copied()
    }

    pub fn for_multiplier(exponent: i32) -> Option<BandColor> {
        match exponent {
            -2 => Some(BandColor::Silver),
            -1 => Some(BandColor::Gold),
            0..=9 => Self::from_digit(exponent as u8),
            _ => None,
        }
    }

    /// Band whose tolerance matches `percent` exactly, if any.
    pub fn for_tolerance(percent: f64) -> Option<BandColor> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.tolerance_percent().map_or(false, |t| (t - percent).abs() < 1e-9))
    }
}

impl fmt::Display for BandColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BandColor {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        let alias = match wanted.as_str() {
            "gray" => "grey",
            "purple" => "violet",
            "" | "blank" => "none",
            other => other,
        };
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name() == alias)
            .ok_or_else(|| CalcError::UnknownColor(s.trim().to_string()))
    }
}

//! Candidate catalogs: expanded E-series or a caller-supplied parts list (BOM)

use serde::{Deserialize, Serialize};

use crate::catalog::series::{DecadeRange, ValueSeries};
use crate::core::CalcError;
use crate::units::parse_value;

/// Values actually available on the shelf. Searched as-is, without decade
/// expansion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomValueList {
    values: Vec<f64>,
}

impl CustomValueList {
    pub fn new(values: Vec<f64>) -> Result<Self, CalcError> {
        if let Some(bad) = values.iter().find(|v| !(v.is_finite() && **v > 0.0)) {
            return Err(CalcError::InvalidParameter(format!(
                "custom values must be positive, got {}",
                bad
            )));
        }
        Ok(Self { values })
    }

    /// Parse a BOM text: values separated by whitespace, commas, semicolons or
    /// newlines. `#` starts a comment.
    pub fn parse(text: &str) -> Result<Self, CalcError> {
        let mut values = Vec::new();
        for line in text.lines() {
            let line = line.split('#').next().unwrap_or("");
            for token in line
                .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
                .filter(|t| !t.is_empty())
            {
                let value = parse_value(token).ok_or_else(|| {
                    CalcError::InvalidParameter(format!("cannot parse value '{}'", token))
                })?;
                values.push(value);
            }
        }
        Self::new(values)
    }

    pub fn from_file(path: &std::path::Path) -> Result<Self, CalcError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Where candidate values come from.
#[derive(Debug, Clone, Copy)]
pub enum Catalog<'a> {
    Series {
        series: &'a ValueSeries,
        decades: DecadeRange,
    },
    Custom(&'a CustomValueList),
}

impl<'a> Catalog<'a> {
    pub fn series(series: &'a ValueSeries, decades: DecadeRange) -> Self {
        Catalog::Series { series, decades }
    }

    pub fn custom(list: &'a CustomValueList) -> Self {
        Catalog::Custom(list)
    }

    /// Candidate magnitudes in scan order.
    pub fn values(&self) -> Vec<f64> {
        match self {
            Catalog::Series { series, decades } => series.expand(*decades),
            Catalog::Custom(list) => list.values().to_vec(),
        }
    }

    /// Short label for reports, e.g. `E24` or `custom (12 values)`.
    pub fn label(&self) -> String {
        match self {
            Catalog::Series { series, .. } => series.name.to_string(),
            Catalog::Custom(list) => format!("custom ({} values)", list.len()),
        }
    }
}

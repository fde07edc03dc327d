//! Built-in and External Regulator Specifications
//!
//! Adjustable regulator parameters are loaded from:
//! 1. JSON files compiled into the binary (LM317, LM337, LM350, AMS1117-ADJ)
//! 2. An optional user directory of JSON files with the same layout
//!
//! ```json
//! { "name": "LM317", "vref": 1.25, "iadj_ua": 50.0, "r1_recommended": 240.0 }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

use crate::core::CalcError;

const EMBEDDED_LM317: &str = include_str!("../../data/regulators/lm317.json");
const EMBEDDED_LM337: &str = include_str!("../../data/regulators/lm337.json");
const EMBEDDED_LM350: &str = include_str!("../../data/regulators/lm350.json");
const EMBEDDED_AMS1117_ADJ: &str = include_str!("../../data/regulators/ams1117-adj.json");

/// Feedback parameters of an adjustable linear regulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulatorSpec {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Reference voltage between OUT and ADJ; negative for negative regulators
    pub vref: f64,
    /// Current flowing out of the ADJ pin, in µA
    pub iadj_ua: f64,
    /// R1 suggested by the datasheet, in Ω
    pub r1_recommended: f64,
}

impl RegulatorSpec {
    pub fn iadj_a(&self) -> f64 {
        self.iadj_ua * 1e-6
    }

    fn validate(&self) -> Result<(), CalcError> {
        if self.name.trim().is_empty() {
            return Err(CalcError::InvalidParameter("regulator name is empty".to_string()));
        }
        if self.vref == 0.0 || !self.vref.is_finite() {
            return Err(CalcError::InvalidParameter(format!(
                "{}: vref must be non-zero",
                self.name
            )));
        }
        if !(self.r1_recommended.is_finite() && self.r1_recommended > 0.0) {
            return Err(CalcError::InvalidParameter(format!(
                "{}: r1_recommended must be positive",
                self.name
            )));
        }
        if !(self.iadj_ua.is_finite() && self.iadj_ua >= 0.0) {
            return Err(CalcError::InvalidParameter(format!(
                "{}: iadj_ua must be >= 0",
                self.name
            )));
        }
        Ok(())
    }
}

/// Regulator specs parsed from the embedded JSON files. Parsed once.
pub fn builtin_regulators() -> &'static [RegulatorSpec] {
    static BUILTIN: OnceLock<Vec<RegulatorSpec>> = OnceLock::new();
    BUILTIN.get_or_init(|| {
        let embedded_jsons = [
            EMBEDDED_LM317,
            EMBEDDED_LM337,
            EMBEDDED_LM350,
            EMBEDDED_AMS1117_ADJ,
        ];

        let mut specs = Vec::new();
        for json_str in embedded_jsons {
            match parse_regulator(json_str) {
                Ok(spec) => specs.push(spec),
                Err(e) => {
                    tracing::warn!("Failed to parse embedded regulator spec: {}", e);
                }
            }
        }
        specs
    })
}

fn parse_regulator(json: &str) -> Result<RegulatorSpec, CalcError> {
    let spec: RegulatorSpec = serde_json::from_str(json)?;
    spec.validate()?;
    Ok(spec)
}

/// Load a single regulator spec from a JSON file
pub fn load_regulator_from_file(path: &Path) -> Result<RegulatorSpec, CalcError> {
    let content = std::fs::read_to_string(path)?;
    parse_regulator(&content)
}

/// Load regulator specs from a directory of JSON files.
/// Returns both the specs that loaded and a message per file that did not.
pub fn load_regulators_from_directory(dir: &Path) -> (Vec<RegulatorSpec>, Vec<String>) {
    let mut specs = Vec::new();
    let mut errors = Vec::new();

    if !dir.is_dir() {
        errors.push(format!("{:?} is not a directory", dir));
        return (specs, errors);
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            errors.push(format!("Failed to read directory {:?}: {}", dir, e));
            return (specs, errors);
        }
    };

    let mut paths: Vec<_> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().map(|e| e == "json").unwrap_or(false))
        .collect();
    paths.sort();

    for path in paths {
        match load_regulator_from_file(&path) {
            Ok(spec) => {
                tracing::info!("Loaded regulator {} from {:?}", spec.name, path.file_name());
                specs.push(spec);
            }
            Err(e) => {
                let error_msg = format!("Failed to load {:?}: {}", path.file_name(), e);
                tracing::warn!("{}", error_msg);
                errors.push(error_msg);
            }
        }
    }

    (specs, errors)
}

/// Searchable set of regulator specs. User specs shadow built-ins of the same name.
#[derive(Debug, Clone, Default)]
pub struct RegulatorLibrary {
    specs: Vec<RegulatorSpec>,
}

impl RegulatorLibrary {
    pub fn with_builtin() -> Self {
        Self {
            specs: builtin_regulators().to_vec(),
        }
    }

    pub fn add(&mut self, spec: RegulatorSpec) {
        self.specs.retain(|s| !s.name.eq_ignore_ascii_case(&spec.name));
        self.specs.push(spec);
    }

    /// Add every valid spec found in `dir`; returns per-file error messages.
    pub fn extend_from_directory(&mut self, dir: &Path) -> Vec<String> {
        let (specs, errors) = load_regulators_from_directory(dir);
        for spec in specs {
            self.add(spec);
        }
        errors
    }

    pub fn find(&self, name: &str) -> Result<&RegulatorSpec, CalcError> {
        let wanted = name.trim();
        self.specs
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CalcError::UnknownRegulator(wanted.to_string()))
    }

    pub fn specs(&self) -> &[RegulatorSpec] {
        &self.specs
    }
}

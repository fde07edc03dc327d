//! Error type, options and the facade shared by CLI and library callers.
//! No I/O beyond preset files and regulator directories.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog::custom::{Catalog, CustomValueList};
use crate::catalog::packages;
use crate::catalog::regulators::{RegulatorLibrary, RegulatorSpec};
use crate::catalog::series::{self, DecadeRange};
use crate::designers::{
    design_divider, design_led, design_rc_filter, design_regulator, DividerCandidate, LedDesign,
    RcCandidate, RegulatorCandidate,
};
use crate::markings::{decode_smd, ColorCode, DecodedValue, SmdDecoded};
use crate::montecarlo::{self, SimulationResult, SimulationRun};
use crate::network::{self, NetworkAnalysis, NetworkOptimization, NetworkSpec, Topology};
use crate::power::{self, DeratingCurve, PackageAssessment, PowerEstimate, SafetyThresholds};
use crate::search::{
    find_color_match, find_color_match_any, find_nearest_in, MatchResult, SearchOptions,
    SeriesMatch,
};

#[derive(Debug, thiserror::Error)]
pub enum CalcError {
    #[error("Invalid target: {0}")]
    InvalidTarget(String),
    #[error("No candidate values to search")]
    NoCandidates,
    #[error("Network has no components")]
    EmptyNetwork,
    #[error("Division by zero: {0}")]
    DivisionByZero(String),
    #[error("Insufficient input: {0}")]
    InsufficientInput(String),
    #[error("Unknown series: {0}")]
    UnknownSeries(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Unknown color: {0}")]
    UnknownColor(String),
    #[error("Unknown package: {0}")]
    UnknownPackage(String),
    #[error("Unknown regulator: {0}")]
    UnknownRegulator(String),
    #[error("Invalid code: {0}")]
    InvalidCode(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Preset format error: {0}")]
    Preset(#[from] serde_json::Error),
}

/// Tunables for searches and designers. Every field falls back to its
/// default when missing from a config file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcOptions {
    pub resistor_decades: DecadeRange,
    pub capacitor_decades: DecadeRange,
    /// Stop a nearest-value scan once the error is at or below this percent.
    pub early_exit_percent: f64,
    pub divider_results: usize,
    pub rc_filter_results: usize,
    pub regulator_results: usize,
    pub led_safety_factor: f64,
    pub derating: DeratingCurve,
    pub safety: SafetyThresholds,
}

impl Default for CalcOptions {
    fn default() -> Self {
        Self {
            resistor_decades: DecadeRange::RESISTORS,
            capacitor_decades: DecadeRange::CAPACITORS,
            early_exit_percent: 0.0,
            divider_results: 10,
            rc_filter_results: 15,
            regulator_results: 5,
            led_safety_factor: 2.0,
            derating: DeratingCurve::default(),
            safety: SafetyThresholds::default(),
        }
    }
}

impl CalcOptions {
    /// Load options from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, CalcError> {
        let content = std::fs::read_to_string(path)?;
        let options: CalcOptions = serde_json::from_str(&content)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), CalcError> {
        if self.early_exit_percent.is_nan() || self.early_exit_percent < 0.0 {
            return Err(CalcError::InvalidParameter(
                "early_exit_percent must be >= 0".to_string(),
            ));
        }
        if self.led_safety_factor.is_nan() || self.led_safety_factor <= 0.0 {
            return Err(CalcError::InvalidParameter(
                "led_safety_factor must be > 0".to_string(),
            ));
        }
        if self.divider_results == 0 || self.rc_filter_results == 0 || self.regulator_results == 0 {
            return Err(CalcError::InvalidParameter(
                "result counts must be at least 1".to_string(),
            ));
        }
        self.resistor_decades.validate("resistor_decades")?;
        self.capacitor_decades.validate("capacitor_decades")?;
        self.safety.validate()?;
        Ok(())
    }
}

/// Where a designer takes its candidate values from.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogSource {
    /// A named E-series, expanded over the configured decades
    Series(String),
    /// A parts list searched as-is
    Custom(CustomValueList),
}

impl CatalogSource {
    pub fn series(name: impl Into<String>) -> Self {
        CatalogSource::Series(name.into())
    }

    fn resistors(&self, decades: DecadeRange) -> Result<Catalog<'_>, CalcError> {
        match self {
            CatalogSource::Series(name) => Ok(Catalog::series(series::series(name)?, decades)),
            CatalogSource::Custom(list) => Ok(Catalog::custom(list)),
        }
    }

    fn capacitors(&self, decades: DecadeRange) -> Result<Catalog<'_>, CalcError> {
        match self {
            CatalogSource::Series(name) => {
                Ok(Catalog::series(series::capacitor_series(name)?, decades))
            }
            CatalogSource::Custom(list) => Ok(Catalog::custom(list)),
        }
    }
}

impl Default for CatalogSource {
    fn default() -> Self {
        CatalogSource::Series("E24".to_string())
    }
}

/// Entry point used by the CLI and library callers: resolves series names and
/// decade ranges from [`CalcOptions`] and forwards to the calculators.
#[derive(Debug, Clone)]
pub struct PassiveCalc {
    options: CalcOptions,
    regulators: RegulatorLibrary,
}

impl Default for PassiveCalc {
    fn default() -> Self {
        Self {
            options: CalcOptions::default(),
            regulators: RegulatorLibrary::with_builtin(),
        }
    }
}

impl PassiveCalc {
    pub fn new(options: CalcOptions) -> Result<Self, CalcError> {
        options.validate()?;
        Ok(Self {
            options,
            regulators: RegulatorLibrary::with_builtin(),
        })
    }

    pub fn options(&self) -> &CalcOptions {
        &self.options
    }

    pub fn regulators(&self) -> &RegulatorLibrary {
        &self.regulators
    }

    /// Add regulator specs from a directory of JSON files. Files that fail to
    /// load are reported, not fatal.
    pub fn load_regulator_dir(&mut self, dir: &Path) -> Vec<String> {
        self.regulators.extend_from_directory(dir)
    }

    fn search_options(&self) -> SearchOptions {
        SearchOptions {
            early_exit_percent: self.options.early_exit_percent,
        }
    }

    /// Expand a named resistor series over the configured decades.
    pub fn expand(&self, series_name: &str) -> Result<Vec<f64>, CalcError> {
        let decades = self.options.resistor_decades;
        series::expand(series_name, decades.low, decades.high)
    }

    pub fn nearest(&self, target: f64, source: &CatalogSource) -> Result<MatchResult, CalcError> {
        let catalog = source.resistors(self.options.resistor_decades)?;
        let result = find_nearest_in(target, &catalog, self.search_options())?;
        tracing::debug!(
            "nearest to {} in {}: {} ({:.3}%)",
            target,
            catalog.label(),
            result.value,
            result.error_percent
        );
        Ok(result)
    }

    /// Nearest value with its color bands, in one series or the best of all.
    pub fn color_match(
        &self,
        target: f64,
        series_name: Option<&str>,
    ) -> Result<SeriesMatch, CalcError> {
        let decades = self.options.resistor_decades;
        match series_name {
            Some(name) => {
                let series = series::series(name)?;
                let result = find_color_match(target, series, decades)?;
                Ok(SeriesMatch {
                    series: series.name,
                    tolerance: series.tolerance_band,
                    result,
                })
            }
            None => find_color_match_any(target, decades),
        }
    }

    pub fn decode_colors<S: AsRef<str>>(
        &self,
        bands: &[S],
    ) -> Result<(ColorCode, DecodedValue), CalcError> {
        let code = ColorCode::parse(bands)?;
        let decoded = code.decode()?;
        Ok((code, decoded))
    }

    pub fn decode_smd(&self, code: &str) -> Result<SmdDecoded, CalcError> {
        decode_smd(code)
    }

    pub fn analyze_network(&self, spec: &NetworkSpec) -> Result<NetworkAnalysis, CalcError> {
        spec.analyze()
    }

    pub fn optimize_network(
        &self,
        magnitudes: &[f64],
        topology: Topology,
        source: &CatalogSource,
    ) -> Result<NetworkOptimization, CalcError> {
        let catalog = source.resistors(self.options.resistor_decades)?;
        network::optimize_network(magnitudes, topology, &catalog, self.search_options())
    }

    /// Seeded when `seed` is given, otherwise from the thread-local generator.
    pub fn monte_carlo(
        &self,
        run: &SimulationRun,
        seed: Option<u64>,
    ) -> Result<SimulationResult, CalcError> {
        match seed {
            Some(seed) => montecarlo::simulate_seeded(run, seed),
            None => montecarlo::simulate_entropy(run),
        }
    }

    pub fn power_estimate(
        &self,
        voltage: f64,
        current: f64,
        resistance: f64,
    ) -> Result<PowerEstimate, CalcError> {
        power::power_estimate(voltage, current, resistance)
    }

    pub fn assess_package(
        &self,
        dissipated_w: f64,
        package_name: &str,
        ambient_c: f64,
    ) -> Result<PackageAssessment, CalcError> {
        let package = packages::by_name(package_name)?;
        Ok(power::assess_package(
            dissipated_w,
            package,
            ambient_c,
            &self.options.derating,
            &self.options.safety,
        ))
    }

    pub fn divider(
        &self,
        vin: f64,
        vout: f64,
        source: &CatalogSource,
    ) -> Result<Vec<DividerCandidate>, CalcError> {
        let catalog = source.resistors(self.options.resistor_decades)?;
        design_divider(vin, vout, &catalog, self.options.divider_results)
    }

    pub fn rc_filter(
        &self,
        fc: f64,
        resistors: &CatalogSource,
        capacitors: &CatalogSource,
    ) -> Result<Vec<RcCandidate>, CalcError> {
        let r = resistors.resistors(self.options.resistor_decades)?;
        let c = capacitors.capacitors(self.options.capacitor_decades)?;
        design_rc_filter(fc, &r, &c, self.options.rc_filter_results)
    }

    pub fn led(
        &self,
        v_supply: f64,
        v_forward: f64,
        current_ma: f64,
        source: &CatalogSource,
    ) -> Result<LedDesign, CalcError> {
        let catalog = source.resistors(self.options.resistor_decades)?;
        design_led(
            v_supply,
            v_forward,
            current_ma,
            &catalog,
            self.options.led_safety_factor,
            self.search_options(),
        )
    }

    pub fn regulator(
        &self,
        name: &str,
        vout: f64,
        source: &CatalogSource,
    ) -> Result<(RegulatorSpec, Vec<RegulatorCandidate>), CalcError> {
        let spec = self.regulators.find(name)?.clone();
        let catalog = source.resistors(self.options.resistor_decades)?;
        let candidates = design_regulator(
            &spec,
            vout,
            &catalog,
            self.options.regulator_results,
            self.search_options(),
        )?;
        Ok((spec, candidates))
    }
}

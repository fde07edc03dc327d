//! PassiveCalc - commercial value search and tolerance analysis for passive components
//!
//! This library finds the standard (E-series) or in-stock component values
//! closest to an ideal design value, and carries that search through small
//! circuits: resistor networks, voltage dividers, RC low-pass filters, LED
//! resistors and adjustable regulator feedback networks.
//!
//! # Quick Start
//!
//! ```no_run
//! use passivecalc::{CalcOptions, CatalogSource, PassiveCalc};
//!
//! let calc = PassiveCalc::new(CalcOptions::default()).unwrap();
//! let pairs = calc.divider(12.0, 3.3, &CatalogSource::series("E24")).unwrap();
//!
//! for pair in &pairs {
//!     println!("R1 = {} R2 = {} error = {:.3}%", pair.r1, pair.r2, pair.error_percent);
//! }
//! ```
//!
//! # Features
//!
//! - **Nearest value search**: E3 to E192 or a custom parts list
//! - **Markings**: 4/5-band color codes, SMD codes (3-digit, 4-digit, R, EIA-96)
//! - **Networks**: series/parallel equivalents and commercial-value optimization
//! - **Monte Carlo**: divider output spread under uniform tolerances
//! - **Designers**: divider, RC filter, LED resistor, linear regulator
//! - **Power**: Ohm's-law estimate, thermal derating, package safety margin

pub mod catalog;
pub mod core;
pub mod designers;
pub mod glossary;
pub mod markings;
pub mod montecarlo;
pub mod network;
pub mod power;
pub mod preset;
pub mod search;
pub mod units;
pub mod wire;

// Re-export main types
pub use crate::core::{CalcError, CalcOptions, CatalogSource, PassiveCalc};
pub use catalog::{BandColor, Catalog, CustomValueList, DecadeRange, RegulatorSpec, ValueSeries};
pub use markings::{ColorCode, DecodedValue};
pub use network::{equivalent, optimize_network, tolerance_range, NetworkSpec, Topology};
pub use search::{find_nearest, MatchResult};
pub use units::{format_value, parse_value};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        BandColor, CalcError, CalcOptions, CatalogSource, ColorCode, MatchResult, PassiveCalc,
        Topology,
    };
}

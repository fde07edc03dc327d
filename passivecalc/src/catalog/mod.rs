//! Component Value Catalogs
//!
//! Read-only tables consulted by every search and designer:
//!
//! ```text
//! ┌──────────────┐   expand(decades)   ┌──────────────┐
//! │   E-series   │────────────────────▶│   Catalog    │◀──── CustomValueList (BOM)
//! │ E3 .. E192   │                     └──────┬───────┘
//! └──────────────┘                            │
//!                                             ▼
//!                                    nearest-value search
//! ```
//!
//! Also holds the color band table, resistor packages and adjustable
//! regulator specs. Tables are constants or parsed once; nothing here is
//! mutable after start-up.

pub mod colors;
pub mod custom;
pub mod packages;
pub mod regulators;
pub mod series;

pub use colors::BandColor;
pub use custom::{Catalog, CustomValueList};
pub use packages::Package;
pub use regulators::{RegulatorLibrary, RegulatorSpec};
pub use series::{capacitor_series, expand, series, DecadeRange, ValueSeries};

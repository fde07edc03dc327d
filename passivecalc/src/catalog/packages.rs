//! Resistor packages with typical power ratings at 25 °C.
//! Values are indicative; check the part datasheet for real designs.

use serde::Serialize;

use crate::core::CalcError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Package {
    pub name: &'static str,
    /// Rated power at 25 °C in watts
    pub power_w: f64,
    /// Junction-to-ambient thermal resistance in °C/W
    pub rth_ja: Option<f64>,
}

const fn package(name: &'static str, power_w: f64, rth_ja: f64) -> Package {
    Package {
        name,
        power_w,
        rth_ja: Some(rth_ja),
    }
}

pub const PACKAGES: [Package; 11] = [
    package("0201", 0.05, 1000.0),
    package("0402", 0.0625, 800.0),
    package("0603", 0.1, 600.0),
    package("0805", 0.125, 400.0),
    package("1206", 0.25, 300.0),
    package("1210", 0.33, 250.0),
    package("1812", 0.5, 200.0),
    package("2010", 0.75, 150.0),
    package("2512", 1.0, 100.0),
    package("AXIAL-0.25", 0.25, 150.0),
    package("AXIAL-0.5", 0.5, 100.0),
];

pub fn all() -> &'static [Package] {
    &PACKAGES
}

pub fn by_name(name: &str) -> Result<&'static Package, CalcError> {
    let wanted = name.trim();
    PACKAGES
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| CalcError::UnknownPackage(wanted.to_string()))
}

/// Packages sorted by rated power; equal ratings keep table order.
pub fn ascending_by_power() -> Vec<&'static Package> {
    let mut sorted: Vec<&'static Package> = all().iter().collect();
    sorted.sort_by(|a, b| a.power_w.total_cmp(&b.power_w));
    sorted
}

/// Smallest package whose rating covers `required_w`.
pub fn smallest_rated_for(required_w: f64) -> Option<&'static Package> {
    ascending_by_power()
        .into_iter()
        .find(|p| p.power_w >= required_w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(by_name("0805").unwrap().power_w, 0.125);
        assert_eq!(by_name("axial-0.5").unwrap().name, "AXIAL-0.5");
        assert!(matches!(by_name("0101"), Err(CalcError::UnknownPackage(_))));
    }

    #[test]
    fn test_all_packages() {
        assert_eq!(all().len(), 11);
        assert!(all().iter().all(|p| p.power_w > 0.0 && p.rth_ja.is_some()));
    }

    #[test]
    fn test_ascending_is_stable() {
        let sorted = ascending_by_power();
        assert_eq!(sorted.first().unwrap().name, "0201");
        assert_eq!(sorted.last().unwrap().name, "2512");
        let quarter: Vec<_> = sorted
            .iter()
            .filter(|p| p.power_w == 0.25)
            .map(|p| p.name)
            .collect();
        assert_eq!(quarter, vec!["1206", "AXIAL-0.25"]);
    }

    #[test]
    fn test_smallest_rated_for() {
        assert_eq!(smallest_rated_for(0.1122).unwrap().name, "0805");
        assert_eq!(smallest_rated_for(0.125).unwrap().name, "0805");
        assert!(smallest_rated_for(1.5).is_none());
    }
}

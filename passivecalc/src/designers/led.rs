//! LED series resistor and package selection

use serde::Serialize;

use crate::catalog::custom::Catalog;
use crate::catalog::packages::{self, Package};
use crate::core::CalcError;
use crate::search::{find_nearest_in, SearchOptions};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedDesign {
    pub r_ideal: f64,
    pub r: f64,
    pub r_error_percent: f64,
    pub current_ma: f64,
    /// Power dissipated in the resistor
    pub power_w: f64,
    /// Rating the package must reach: power times the safety factor
    pub required_w: f64,
    /// Smallest package that can take `required_w`; `None` if nothing can
    pub package: Option<Package>,
}

pub fn design_led(
    v_supply: f64,
    v_forward: f64,
    current_ma: f64,
    catalog: &Catalog<'_>,
    safety_factor: f64,
    options: SearchOptions,
) -> Result<LedDesign, CalcError> {
    if !(v_supply.is_finite() && v_forward.is_finite()) || v_supply <= v_forward {
        return Err(CalcError::InvalidTarget(format!(
            "supply voltage {} must exceed LED forward voltage {}",
            v_supply, v_forward
        )));
    }
    if !(current_ma.is_finite() && current_ma > 0.0) {
        return Err(CalcError::InvalidTarget(format!(
            "LED current must be positive, got {} mA",
            current_ma
        )));
    }

    let headroom = v_supply - v_forward;
    let r_ideal = headroom / (current_ma / 1000.0);
    let found = find_nearest_in(r_ideal, catalog, options)?;
    let r = found.value;

    let power_w = headroom * headroom / r;
    let required_w = power_w * safety_factor;
    let package = packages::smallest_rated_for(required_w).cloned();
    if package.is_none() {
        tracing::debug!("no package rated for {:.4} W", required_w);
    }

    Ok(LedDesign {
        r_ideal,
        r,
        r_error_percent: found.error_percent,
        current_ma: headroom / r * 1000.0,
        power_w,
        required_w,
        package,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::custom::CustomValueList;
    use crate::catalog::series::{DecadeRange, E24};

    fn e24() -> Catalog<'static> {
        Catalog::series(&E24, DecadeRange::RESISTORS)
    }

    #[test]
    fn test_red_led_at_5v() {
        let design = design_led(5.0, 2.1, 20.0, &e24(), 2.0, SearchOptions::default()).unwrap();
        assert!((design.r_ideal - 145.0).abs() < 1e-9);
        assert!((design.r - 150.0).abs() < 1e-9);
        assert!((design.current_ma - 19.333).abs() < 1e-3);
        assert!((design.power_w - 0.0561).abs() < 1e-4);
        assert!((design.required_w - 0.1121).abs() < 1e-3);
        assert_eq!(design.package.unwrap().name, "0805");
    }

    #[test]
    fn test_no_suitable_package() {
        let bom = CustomValueList::new(vec![10.0]).unwrap();
        let design = design_led(
            24.0,
            2.0,
            1_000.0,
            &Catalog::custom(&bom),
            2.0,
            SearchOptions::default(),
        )
        .unwrap();
        assert!(design.power_w > 1.0);
        assert!(design.package.is_none());
    }

    #[test]
    fn test_invalid_inputs() {
        let opts = SearchOptions::default();
        assert!(matches!(
            design_led(2.0, 2.1, 20.0, &e24(), 2.0, opts),
            Err(CalcError::InvalidTarget(_))
        ));
        assert!(matches!(
            design_led(5.0, 2.1, 0.0, &e24(), 2.0, opts),
            Err(CalcError::InvalidTarget(_))
        ));
        assert!(design_led(2.1, 2.1, 20.0, &e24(), 2.0, opts).is_err());
    }
}

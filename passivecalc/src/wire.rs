//! American Wire Gauge table for solid copper wire.

use serde::Serialize;

use crate::core::CalcError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WireGauge {
    pub awg: u8,
    pub diameter_mm: f64,
    pub area_mm2: f64,
    pub ohm_per_km: f64,
    /// Typical chassis wiring limit
    pub max_amps: f64,
}

const fn gauge(
    awg: u8,
    diameter_mm: f64,
    area_mm2: f64,
    ohm_per_km: f64,
    max_amps: f64,
) -> WireGauge {
    WireGauge {
        awg,
        diameter_mm,
        area_mm2,
        ohm_per_km,
        max_amps,
    }
}

/// Thickest wire first.
pub const AWG_TABLE: [WireGauge; 11] = [
    gauge(10, 2.588, 5.26, 3.27, 30.0),
    gauge(12, 2.053, 3.31, 5.21, 20.0),
    gauge(14, 1.628, 2.08, 8.28, 15.0),
    gauge(16, 1.291, 1.31, 13.17, 10.0),
    gauge(18, 1.024, 0.823, 20.95, 7.0),
    gauge(20, 0.812, 0.518, 33.31, 5.0),
    gauge(22, 0.644, 0.326, 52.96, 3.0),
    gauge(24, 0.511, 0.205, 84.22, 2.0),
    gauge(26, 0.405, 0.129, 133.9, 1.0),
    gauge(28, 0.321, 0.081, 212.9, 0.5),
    gauge(30, 0.255, 0.050, 338.6, 0.3),
];

impl WireGauge {
    /// Resistance of `length_m` metres of wire in Ω.
    pub fn resistance(&self, length_m: f64) -> f64 {
        self.ohm_per_km * length_m / 1000.0
    }

    pub fn voltage_drop(&self, amps: f64, length_m: f64) -> f64 {
        amps * self.resistance(length_m)
    }
}

pub fn wire_gauge(awg: u8) -> Result<&'static WireGauge, CalcError> {
    AWG_TABLE.iter().find(|g| g.awg == awg).ok_or_else(|| {
        CalcError::InvalidParameter(format!(
            "AWG {} is not in the table (even gauges 10 to 30)",
            awg
        ))
    })
}

/// Thinnest wire rated for `amps`.
pub fn smallest_gauge_for(amps: f64) -> Option<&'static WireGauge> {
    AWG_TABLE.iter().rev().find(|g| g.max_amps >= amps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(wire_gauge(22).unwrap().diameter_mm, 0.644);
        assert!(matches!(wire_gauge(21), Err(CalcError::InvalidParameter(_))));
        assert!(wire_gauge(40).is_err());
    }

    #[test]
    fn test_smallest_gauge_for() {
        assert_eq!(smallest_gauge_for(2.5).unwrap().awg, 22);
        assert_eq!(smallest_gauge_for(0.1).unwrap().awg, 30);
        assert_eq!(smallest_gauge_for(30.0).unwrap().awg, 10);
        assert!(smallest_gauge_for(31.0).is_none());
    }

    #[test]
    fn test_voltage_drop() {
        let awg18 = wire_gauge(18).unwrap();
        assert!((awg18.resistance(2.0) - 0.0419).abs() < 1e-9);
        assert!((awg18.voltage_drop(5.0, 2.0) - 0.2095).abs() < 1e-9);
    }
}

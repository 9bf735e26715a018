//! Ideal on/off HVAC actuator and its electrical energy model.

use super::thermostat::Mode;

/// Maps a thermostat mode to HVAC thermal heat flow in W.
///
/// Ideal bang-bang actuation: when on, the equipment delivers full capacity.
/// Sign convention: positive = heating, negative = cooling. The match is
/// exhaustive, so the idle branch is explicit rather than a fall-through
/// default.
pub fn hvac_heat_flow(mode: Mode, max_heat_w: f64, max_cool_w: f64) -> f64 {
    match mode {
        Mode::Heat => max_heat_w,
        Mode::Cool => -max_cool_w,
        Mode::Off => 0.0,
    }
}

/// Converts HVAC thermal heat flow into electrical energy use per step (kWh).
///
/// Only heating draws electricity in this model: cooling and idle steps
/// return exactly `0.0`. For heating, electrical input power is
/// `Q_thermal / COP` (COP = 1 models resistance heating, COP > 1 a heat
/// pump), integrated over the timestep.
pub fn heat_energy_kwh(q_hvac_w: f64, dt_s: f64, cop: f64) -> f64 {
    if q_hvac_w <= 0.0 {
        return 0.0;
    }

    let p_elec_w = q_hvac_w / cop;
    let e_wh = p_elec_w * (dt_s / 3600.0);
    e_wh / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actuator_totality() {
        // All three modes, only the three nominal magnitudes.
        assert_eq!(hvac_heat_flow(Mode::Heat, 12000.0, 9000.0), 12000.0);
        assert_eq!(hvac_heat_flow(Mode::Cool, 12000.0, 9000.0), -9000.0);
        assert_eq!(hvac_heat_flow(Mode::Off, 12000.0, 9000.0), 0.0);
    }

    #[test]
    fn test_energy_zero_for_cooling_and_off() {
        assert_eq!(heat_energy_kwh(0.0, 900.0, 3.0), 0.0);
        assert_eq!(heat_energy_kwh(-12000.0, 900.0, 3.0), 0.0);
        // Exactly zero regardless of COP.
        assert_eq!(heat_energy_kwh(-1.0, 3600.0, 0.5), 0.0);
    }

    #[test]
    fn test_energy_scaling() {
        // 12 kW over 15 min = 3 kWh thermal; COP=1 -> 3 kWh electric.
        let e = heat_energy_kwh(12000.0, 900.0, 1.0);
        assert!((e - 3.0).abs() < 1e-12, "expected 3 kWh, got {e}");

        // COP=3 -> a third of the electricity.
        let e = heat_energy_kwh(12000.0, 900.0, 3.0);
        assert!((e - 1.0).abs() < 1e-12, "expected 1 kWh, got {e}");
    }

    #[test]
    fn test_energy_linear_in_dt() {
        let e1 = heat_energy_kwh(6000.0, 900.0, 2.0);
        let e2 = heat_energy_kwh(6000.0, 1800.0, 2.0);
        assert!((e2 - 2.0 * e1).abs() < 1e-12);
    }
}

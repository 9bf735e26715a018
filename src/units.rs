//! Unit conversions between SI and US customary units.
//!
//! Conventions:
//! - Temperature: Fahrenheit (°F) ↔ Celsius (°C)
//! - Power/heat rate: Btu/hr ↔ Watt

/// Btu/hr per Watt.
const BTUH_PER_W: f64 = 3.412142;
/// Watt per Btu/hr.
const W_PER_BTUH: f64 = 0.293071;

/// Converts Fahrenheit to Celsius.
pub fn fahrenheit_to_celsius(t_f: f64) -> f64 {
    (t_f - 32.0) * 5.0 / 9.0
}

/// Converts Celsius to Fahrenheit.
pub fn celsius_to_fahrenheit(t_c: f64) -> f64 {
    t_c * 9.0 / 5.0 + 32.0
}

/// Converts a temperature *difference* from Fahrenheit to Celsius degrees.
///
/// Deltas scale by 5/9 without the 32 °F offset, so this is the right
/// conversion for deadband widths.
pub fn fahrenheit_delta_to_celsius(dt_f: f64) -> f64 {
    dt_f * 5.0 / 9.0
}

/// Converts Btu/hr to Watts.
pub fn btuh_to_watts(btuh: f64) -> f64 {
    btuh * W_PER_BTUH
}

/// Converts Watts to Btu/hr.
///
/// The two power conversion factors are independently rounded constants, so
/// `btuh_to_watts` and `watts_to_btuh` are only approximate inverses (unlike
/// the temperature pair, which is algebraically exact).
pub fn watts_to_btuh(w: f64) -> f64 {
    w * BTUH_PER_W
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_temperature_points() {
        assert!((fahrenheit_to_celsius(32.0) - 0.0).abs() < 1e-12);
        assert!((fahrenheit_to_celsius(212.0) - 100.0).abs() < 1e-12);
        assert!((celsius_to_fahrenheit(0.0) - 32.0).abs() < 1e-12);
        assert!((celsius_to_fahrenheit(100.0) - 212.0).abs() < 1e-12);
        // -40 is the fixed point of the conversion
        assert!((fahrenheit_to_celsius(-40.0) - (-40.0)).abs() < 1e-12);
    }

    #[test]
    fn test_temperature_round_trip_exact_inverse() {
        for f in [-100.0, -40.0, 0.0, 32.0, 70.0, 98.6, 451.0] {
            let back = celsius_to_fahrenheit(fahrenheit_to_celsius(f));
            assert!(
                (back - f).abs() < 1e-10,
                "F→C→F round trip should be exact for {f}, got {back}"
            );
        }
    }

    #[test]
    fn test_delta_conversion_has_no_offset() {
        // 2 °F deadband = 2 * 5/9 °C, not F_to_C(2.0)
        assert!((fahrenheit_delta_to_celsius(2.0) - 10.0 / 9.0).abs() < 1e-12);
        assert!((fahrenheit_delta_to_celsius(0.0) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_power_round_trip_approximate() {
        // Independently rounded factors: round trip is close but not bit-exact.
        let w = 12000.0;
        let back = btuh_to_watts(watts_to_btuh(w));
        assert!((back - w).abs() / w < 1e-5);
        assert!((back - w).abs() > 0.0, "factors are not exact inverses");
    }

    #[test]
    fn test_power_known_values() {
        // 1 ton of refrigeration = 12000 Btu/hr ≈ 3517 W
        let w = btuh_to_watts(12000.0);
        assert!((w - 3516.852).abs() < 1e-3, "got {w}");
        let btuh = watts_to_btuh(1000.0);
        assert!((btuh - 3412.142).abs() < 1e-9, "got {btuh}");
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Thermostat control mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// HVAC adds heat to the zone.
    Heat,
    /// HVAC removes heat from the zone.
    Cool,
    /// HVAC idle.
    Off,
}

impl Mode {
    /// Short string token used in output tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Heat => "HEAT",
            Mode::Cool => "COOL",
            Mode::Off => "OFF",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HEAT" => Ok(Mode::Heat),
            "COOL" => Ok(Mode::Cool),
            "OFF" => Ok(Mode::Off),
            other => anyhow::bail!("Unknown thermostat mode: {other:?}"),
        }
    }
}

/// Deadband thermostat decision.
///
/// With `low = setpoint - deadband/2` and `high = setpoint + deadband/2`:
/// - `indoor_temp < low` → [`Mode::Heat`]
/// - `indoor_temp > high` → [`Mode::Cool`]
/// - otherwise (both boundaries inclusive) → [`Mode::Off`]
///
/// The controller is memoryless: it does not remember the previous mode, so
/// the only hysteresis is the deadband width itself. A non-positive deadband
/// degenerates to tighter banding and is the caller's responsibility
/// (the validating constructor in [`crate::SimulationParams`] rejects it).
pub fn thermostat_mode(indoor_temp: f64, setpoint: f64, deadband: f64) -> Mode {
    let low = setpoint - deadband / 2.0;
    let high = setpoint + deadband / 2.0;

    if indoor_temp < low {
        Mode::Heat
    } else if indoor_temp > high {
        Mode::Cool
    } else {
        Mode::Off
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadband_boundaries() {
        // setpoint 70, deadband 2 -> low = 69, high = 71
        assert_eq!(thermostat_mode(68.9, 70.0, 2.0), Mode::Heat);
        assert_eq!(thermostat_mode(69.0, 70.0, 2.0), Mode::Off);
        assert_eq!(thermostat_mode(70.0, 70.0, 2.0), Mode::Off);
        assert_eq!(thermostat_mode(71.0, 70.0, 2.0), Mode::Off);
        assert_eq!(thermostat_mode(71.1, 70.0, 2.0), Mode::Cool);
    }

    #[test]
    fn test_zero_deadband() {
        // Band collapses to the setpoint itself.
        assert_eq!(thermostat_mode(20.0, 20.0, 0.0), Mode::Off);
        assert_eq!(thermostat_mode(19.99, 20.0, 0.0), Mode::Heat);
        assert_eq!(thermostat_mode(20.01, 20.0, 0.0), Mode::Cool);
    }

    #[test]
    fn test_mode_tokens_round_trip() {
        for mode in [Mode::Heat, Mode::Cool, Mode::Off] {
            let parsed: Mode = mode.as_str().parse().unwrap();
            assert_eq!(parsed, mode);
        }
        assert!("heat".parse::<Mode>().is_err(), "tokens are case-sensitive");
        assert!("AUTO".parse::<Mode>().is_err());
    }
}

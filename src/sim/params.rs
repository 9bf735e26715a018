use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parameter validation failure.
#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("Invalid parameter {name}: {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Configuration surface of the simulation driver.
///
/// All values are plain numeric scalars in SI units. Construct with
/// [`SimulationParams::new`], which rejects non-finite and physically
/// nonsensical values up front instead of letting them propagate as
/// non-finite temperatures through the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Thermostat setpoint in °C.
    pub setpoint_c: f64,
    /// Deadband width in °C (band is setpoint ± deadband/2).
    pub deadband_c: f64,
    /// Initial indoor temperature in °C.
    pub initial_indoor_c: f64,
    /// Envelope conductance UA in W/K.
    pub ua_w_per_k: f64,
    /// Zone thermal capacitance in J/K.
    pub capacitance_j_per_k: f64,
    /// Maximum heating capacity in W (thermal).
    pub max_heat_w: f64,
    /// Maximum cooling capacity in W (thermal, stored positive).
    pub max_cool_w: f64,
    /// Internal heat gains in W (people, equipment, lighting).
    pub internal_gains_w: f64,
    /// Heating coefficient of performance (1.0 = resistance heating).
    pub cop: f64,
    /// Timestep duration in seconds.
    pub dt_s: f64,
}

impl SimulationParams {
    /// Validating constructor.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        setpoint_c: f64,
        deadband_c: f64,
        initial_indoor_c: f64,
        ua_w_per_k: f64,
        capacitance_j_per_k: f64,
        max_heat_w: f64,
        max_cool_w: f64,
        internal_gains_w: f64,
        cop: f64,
        dt_s: f64,
    ) -> Result<Self, ParamError> {
        let params = Self {
            setpoint_c,
            deadband_c,
            initial_indoor_c,
            ua_w_per_k,
            capacitance_j_per_k,
            max_heat_w,
            max_cool_w,
            internal_gains_w,
            cop,
            dt_s,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks every field for finiteness and physical plausibility.
    ///
    /// Also used after deserializing a params file, where the struct is
    /// built without going through [`Self::new`].
    pub fn validate(&self) -> Result<(), ParamError> {
        fn finite(name: &'static str, value: f64) -> Result<(), ParamError> {
            if value.is_finite() {
                Ok(())
            } else {
                Err(ParamError::InvalidParameter {
                    name,
                    value,
                    reason: "must be finite",
                })
            }
        }
        fn non_negative(name: &'static str, value: f64) -> Result<(), ParamError> {
            finite(name, value)?;
            if value >= 0.0 {
                Ok(())
            } else {
                Err(ParamError::InvalidParameter {
                    name,
                    value,
                    reason: "must be >= 0",
                })
            }
        }
        fn positive(name: &'static str, value: f64) -> Result<(), ParamError> {
            finite(name, value)?;
            if value > 0.0 {
                Ok(())
            } else {
                Err(ParamError::InvalidParameter {
                    name,
                    value,
                    reason: "must be > 0",
                })
            }
        }

        finite("setpoint_c", self.setpoint_c)?;
        finite("initial_indoor_c", self.initial_indoor_c)?;
        non_negative("deadband_c", self.deadband_c)?;
        non_negative("ua_w_per_k", self.ua_w_per_k)?;
        non_negative("max_heat_w", self.max_heat_w)?;
        non_negative("max_cool_w", self.max_cool_w)?;
        non_negative("internal_gains_w", self.internal_gains_w)?;
        positive("capacitance_j_per_k", self.capacitance_j_per_k)?;
        positive("cop", self.cop)?;
        positive("dt_s", self.dt_s)?;

        // Explicit Euler stability: dt must stay well below the thermal
        // time constant C/UA. Not an error (the caller may know better),
        // but worth flagging.
        if self.ua_w_per_k > 0.0 {
            let tau_s = self.capacitance_j_per_k / self.ua_w_per_k;
            if self.dt_s >= 0.5 * tau_s {
                tracing::warn!(
                    dt_s = self.dt_s,
                    time_constant_s = tau_s,
                    "timestep is large relative to the thermal time constant; \
                     the explicit integration may oscillate"
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> SimulationParams {
        SimulationParams::new(
            21.11, 1.11, 21.11, 250.0, 3.0e7, 12000.0, 12000.0, 2000.0, 3.0, 900.0,
        )
        .unwrap()
    }

    #[test]
    fn test_valid_params_accepted() {
        let p = valid();
        assert!((p.ua_w_per_k - 250.0).abs() < 1e-12);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_cop() {
        let mut p = valid();
        p.cop = 0.0;
        let err = p.validate().unwrap_err();
        assert_eq!(
            err,
            ParamError::InvalidParameter {
                name: "cop",
                value: 0.0,
                reason: "must be > 0",
            }
        );

        p.cop = -3.0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_capacitance() {
        // Division by zero in the plant model otherwise.
        let mut p = valid();
        p.capacitance_j_per_k = 0.0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_deadband() {
        let mut p = valid();
        p.deadband_c = -1.0;
        assert!(p.validate().is_err());
        // Zero deadband is degenerate but allowed.
        p.deadband_c = 0.0;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_finite() {
        let mut p = valid();
        p.setpoint_c = f64::NAN;
        assert!(p.validate().is_err());

        let mut p = valid();
        p.ua_w_per_k = f64::INFINITY;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let p = valid();
        let json = serde_json::to_string(&p).unwrap();
        let back: SimulationParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
        assert!(back.validate().is_ok());
    }
}

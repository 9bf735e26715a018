use anyhow::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::hvac::{heat_energy_kwh, hvac_heat_flow};
use super::params::SimulationParams;
use super::series::OutdoorSeries;
use super::thermal::step_temperature;
use super::thermostat::{Mode, thermostat_mode};

/// One row of the output trajectory, immutable once written.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimestepRecord {
    pub timestamp: NaiveDateTime,
    /// Outdoor temperature in °C (input).
    pub outdoor_c: f64,
    /// Indoor temperature in °C at the *start* of the step.
    pub indoor_c: f64,
    /// Thermostat decision for this step.
    pub mode: Mode,
    /// HVAC thermal heat flow in W (heating +, cooling -).
    pub q_hvac_w: f64,
    /// Heating electricity consumed this step in kWh (>= 0).
    pub energy_kwh: f64,
    /// Running cumulative heating electricity in kWh.
    pub energy_cum_kwh: f64,
}

/// Ordered, append-only sequence of timestep records from one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    records: Vec<TimestepRecord>,
    /// Indoor temperature in °C after the last step.
    final_indoor_c: f64,
}

impl Trajectory {
    pub fn records(&self) -> &[TimestepRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Indoor temperature carried out of the last step in °C.
    pub fn final_indoor_c(&self) -> f64 {
        self.final_indoor_c
    }

    /// Total heating electricity over the run in kWh.
    pub fn total_energy_kwh(&self) -> f64 {
        self.records.last().map(|r| r.energy_cum_kwh).unwrap_or(0.0)
    }

    /// Rebuilds a trajectory from previously saved records.
    ///
    /// Used when a later pipeline stage (carbon, report) consumes a results
    /// file instead of a live run. Records are assumed to be in time order;
    /// the final indoor temperature is not recoverable from the table and is
    /// taken from the last record's pre-step value.
    pub fn from_records(records: Vec<TimestepRecord>) -> Self {
        let final_indoor_c = records.last().map(|r| r.indoor_c).unwrap_or(0.0);
        Self {
            records,
            final_indoor_c,
        }
    }
}

/// Runs the time-marching simulation over the outdoor series.
///
/// For each sample: thermostat decision from the current indoor temperature,
/// actuator heat flow from the mode, electricity from the heat flow, then the
/// plant advances the indoor temperature with the same heat flow. The new
/// temperature feeds the next step's thermostat decision. The single carried
/// state is the indoor temperature, threaded explicitly through the loop.
///
/// The run is deterministic: identical series and params always reproduce the
/// same trajectory.
pub fn run_simulation(params: &SimulationParams, series: &OutdoorSeries) -> Result<Trajectory> {
    params.validate()?;

    if let Some(inferred) = series.inferred_dt_s()
        && (inferred - params.dt_s).abs() > 1e-6
    {
        tracing::warn!(
            configured_dt_s = params.dt_s,
            inferred_dt_s = inferred,
            "configured timestep does not match the sampling interval of the \
             outdoor series; energy and plant integrals assume dt_s"
        );
    }

    let mut records = Vec::with_capacity(series.len());
    let mut indoor_c = params.initial_indoor_c;
    let mut energy_cum_kwh = 0.0;

    for sample in series.samples() {
        let outdoor_c = sample.temperature_c;

        let mode = thermostat_mode(indoor_c, params.setpoint_c, params.deadband_c);
        let q_hvac_w = hvac_heat_flow(mode, params.max_heat_w, params.max_cool_w);
        let energy_kwh = heat_energy_kwh(q_hvac_w, params.dt_s, params.cop);
        let next_indoor_c = step_temperature(
            indoor_c,
            outdoor_c,
            params.ua_w_per_k,
            params.capacitance_j_per_k,
            params.internal_gains_w,
            q_hvac_w,
            params.dt_s,
        );

        energy_cum_kwh += energy_kwh;
        records.push(TimestepRecord {
            timestamp: sample.timestamp,
            outdoor_c,
            indoor_c,
            mode,
            q_hvac_w,
            energy_kwh,
            energy_cum_kwh,
        });

        indoor_c = next_indoor_c;
    }

    Ok(Trajectory {
        records,
        final_indoor_c: indoor_c,
    })
}

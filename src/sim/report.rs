//! Aggregate reporting over a simulation trajectory.
//!
//! Read-only consumer of the trajectory's public columns; imposes nothing on
//! the simulation itself. Plots are out of scope, but the quantities that
//! would feed them (duty cycle, hourly energy) are computed here.

use std::fmt;

use anyhow::Result;
use chrono::{NaiveDateTime, Timelike};

use super::simulation::Trajectory;
use super::thermostat::Mode;
use crate::units::celsius_to_fahrenheit;

/// Min/mean/max of a temperature column, reported in °F.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureStats {
    pub mean_f: f64,
    pub min_f: f64,
    pub max_f: f64,
}

/// One aggregation window (a clock hour) of a resampled column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyValue {
    /// Start of the clock hour.
    pub hour: NaiveDateTime,
    pub value: f64,
}

/// Full-window summary of a trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub indoor: TemperatureStats,
    pub outdoor: TemperatureStats,
    /// Fraction of timesteps in HEAT mode.
    pub heat_runtime_fraction: f64,
    /// Mean of the hourly heating duty cycle.
    pub mean_hourly_duty: f64,
    /// Total heating electricity in kWh.
    pub total_energy_kwh: f64,
}

impl Summary {
    pub fn from_trajectory(trajectory: &Trajectory) -> Result<Self> {
        anyhow::ensure!(
            !trajectory.is_empty(),
            "cannot summarize an empty trajectory"
        );

        let indoor = temperature_stats(trajectory, |r| r.indoor_c);
        let outdoor = temperature_stats(trajectory, |r| r.outdoor_c);

        let heat_steps = trajectory
            .records()
            .iter()
            .filter(|r| r.mode == Mode::Heat)
            .count();
        let heat_runtime_fraction = heat_steps as f64 / trajectory.len() as f64;

        let duty = hourly_duty_cycle(trajectory);
        let mean_hourly_duty = if duty.is_empty() {
            0.0
        } else {
            duty.iter().map(|h| h.value).sum::<f64>() / duty.len() as f64
        };

        Ok(Self {
            indoor,
            outdoor,
            heat_runtime_fraction,
            mean_hourly_duty,
            total_energy_kwh: trajectory.total_energy_kwh(),
        })
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==== Summary (full window) ====")?;
        writeln!(
            f,
            "Indoor Temp (F): mean={:.2}, min={:.2}, max={:.2}",
            self.indoor.mean_f, self.indoor.min_f, self.indoor.max_f
        )?;
        writeln!(
            f,
            "Outdoor Temp (F): mean={:.2}, min={:.2}, max={:.2}",
            self.outdoor.mean_f, self.outdoor.min_f, self.outdoor.max_f
        )?;
        writeln!(
            f,
            "Heating runtime fraction (timestep-level): {:.1}%",
            100.0 * self.heat_runtime_fraction
        )?;
        writeln!(
            f,
            "Hourly duty cycle: mean={:.1}%",
            100.0 * self.mean_hourly_duty
        )?;
        write!(
            f,
            "Total heating electricity over window: {:.2} kWh",
            self.total_energy_kwh
        )
    }
}

fn temperature_stats(
    trajectory: &Trajectory,
    column: impl Fn(&super::simulation::TimestepRecord) -> f64,
) -> TemperatureStats {
    let mut sum = 0.0;
    let mut min = f64::MAX;
    let mut max = f64::MIN;
    for r in trajectory.records() {
        let t = celsius_to_fahrenheit(column(r));
        sum += t;
        min = min.min(t);
        max = max.max(t);
    }
    TemperatureStats {
        mean_f: sum / trajectory.len() as f64,
        min_f: min,
        max_f: max,
    }
}

fn floor_to_hour(t: NaiveDateTime) -> NaiveDateTime {
    t.with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(t)
}

/// Fraction of HEAT timesteps per clock hour, in time order.
pub fn hourly_duty_cycle(trajectory: &Trajectory) -> Vec<HourlyValue> {
    resample_hourly(trajectory, |records| {
        let heat = records.iter().filter(|r| r.mode == Mode::Heat).count();
        heat as f64 / records.len() as f64
    })
}

/// Heating electricity summed per clock hour, in time order.
pub fn hourly_energy_kwh(trajectory: &Trajectory) -> Vec<HourlyValue> {
    resample_hourly(trajectory, |records| {
        records.iter().map(|r| r.energy_kwh).sum()
    })
}

fn resample_hourly(
    trajectory: &Trajectory,
    aggregate: impl Fn(&[super::simulation::TimestepRecord]) -> f64,
) -> Vec<HourlyValue> {
    let records = trajectory.records();
    let mut out = Vec::new();
    let mut start = 0;
    while start < records.len() {
        let hour = floor_to_hour(records[start].timestamp);
        let mut end = start + 1;
        while end < records.len() && floor_to_hour(records[end].timestamp) == hour {
            end += 1;
        }
        out.push(HourlyValue {
            hour,
            value: aggregate(&records[start..end]),
        });
        start = end;
    }
    out
}

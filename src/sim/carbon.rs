//! Derived energy and CO2 metrics for COP scenarios.
//!
//! Consumes only the heat-flow column of a [`Trajectory`] plus independent
//! scalars; it never calls back into the simulation loop, so it can run from
//! a previously saved results file just as well as from a live run.

use anyhow::Result;

use super::simulation::Trajectory;

/// Default electricity emissions factor in kg CO2 per kWh.
pub const DEFAULT_EMISSIONS_FACTOR: f64 = 0.30;

/// Per-step and cumulative electricity/CO2 for one COP value.
#[derive(Debug, Clone, PartialEq)]
pub struct CopScenario {
    /// Scenario COP (1.0 = resistance heating).
    pub cop: f64,
    /// Tag used in column names and summaries, e.g. `3.0` → `"3p0"`.
    pub tag: String,
    /// Electricity per step in kWh.
    pub electricity_kwh: Vec<f64>,
    /// CO2 per step in kg.
    pub co2_kg: Vec<f64>,
    /// Running cumulative electricity in kWh.
    pub electricity_cum_kwh: Vec<f64>,
    /// Running cumulative CO2 in kg.
    pub co2_cum_kg: Vec<f64>,
}

impl CopScenario {
    pub fn total_electricity_kwh(&self) -> f64 {
        self.electricity_cum_kwh.last().copied().unwrap_or(0.0)
    }

    pub fn total_co2_kg(&self) -> f64 {
        self.co2_cum_kg.last().copied().unwrap_or(0.0)
    }
}

/// Carbon analysis of one trajectory across COP scenarios.
#[derive(Debug, Clone, PartialEq)]
pub struct CarbonAnalysis {
    /// Heating thermal energy delivered per step in kWh (cooling → 0).
    pub thermal_kwh: Vec<f64>,
    pub scenarios: Vec<CopScenario>,
    /// Emissions factor used, in kg CO2 per kWh.
    pub emissions_factor: f64,
}

/// Formats a COP value as a column-name-safe tag (`3.0` → `"3p0"`).
pub fn cop_tag(cop: f64) -> String {
    format!("{cop:.1}").replace('.', "p")
}

impl CarbonAnalysis {
    /// Computes electricity and CO2 for each COP scenario.
    ///
    /// `dt_s` must match the timestep the trajectory was simulated with;
    /// the heat-flow column alone does not carry the cadence.
    pub fn from_trajectory(
        trajectory: &Trajectory,
        dt_s: f64,
        cops: &[f64],
        emissions_factor: f64,
    ) -> Result<Self> {
        anyhow::ensure!(dt_s > 0.0, "dt_s must be > 0, got {dt_s}");
        anyhow::ensure!(!cops.is_empty(), "at least one COP scenario is required");
        for &cop in cops {
            anyhow::ensure!(
                cop.is_finite() && cop > 0.0,
                "COP must be finite and > 0, got {cop}"
            );
        }
        anyhow::ensure!(
            emissions_factor.is_finite() && emissions_factor >= 0.0,
            "emissions factor must be finite and >= 0, got {emissions_factor}"
        );

        // Heating thermal energy per step, cooling/idle clipped to zero.
        let thermal_kwh: Vec<f64> = trajectory
            .records()
            .iter()
            .map(|r| r.q_hvac_w.max(0.0) * (dt_s / 3600.0) / 1000.0)
            .collect();

        let scenarios = cops
            .iter()
            .map(|&cop| {
                let electricity_kwh: Vec<f64> = thermal_kwh.iter().map(|e| e / cop).collect();
                let co2_kg: Vec<f64> = electricity_kwh
                    .iter()
                    .map(|e| e * emissions_factor)
                    .collect();
                CopScenario {
                    cop,
                    tag: cop_tag(cop),
                    electricity_cum_kwh: cumsum(&electricity_kwh),
                    co2_cum_kg: cumsum(&co2_kg),
                    electricity_kwh,
                    co2_kg,
                }
            })
            .collect();

        Ok(Self {
            thermal_kwh,
            scenarios,
            emissions_factor,
        })
    }

    /// CO2 saved by the best-COP scenario relative to the worst, as
    /// `(absolute kg, percent)`. `None` with fewer than two scenarios or
    /// when the worst scenario emits nothing.
    pub fn co2_reduction(&self) -> Option<(f64, f64)> {
        if self.scenarios.len() < 2 {
            return None;
        }
        let worst = self
            .scenarios
            .iter()
            .map(CopScenario::total_co2_kg)
            .fold(f64::MIN, f64::max);
        let best = self
            .scenarios
            .iter()
            .map(CopScenario::total_co2_kg)
            .fold(f64::MAX, f64::min);
        if worst <= 0.0 {
            return None;
        }
        let saved = worst - best;
        Some((saved, 100.0 * saved / worst))
    }
}

fn cumsum(values: &[f64]) -> Vec<f64> {
    let mut acc = 0.0;
    values
        .iter()
        .map(|v| {
            acc += v;
            acc
        })
        .collect()
}

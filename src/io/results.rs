//! Trajectory and carbon result tables (CSV).

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};

use crate::sim::carbon::CarbonAnalysis;
use crate::sim::series::parse_timestamp;
use crate::sim::simulation::{TimestepRecord, Trajectory};
use crate::sim::thermostat::Mode;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes the trajectory table.
///
/// Columns: `datetime,T_out_C,T_in_C,mode,Q_hvac_W,E_heat_kWh,E_heat_kWh_cum`.
pub fn write_trajectory_csv(path: &Path, trajectory: &Trajectory) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create results file: {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));

    writer.write_record([
        "datetime",
        "T_out_C",
        "T_in_C",
        "mode",
        "Q_hvac_W",
        "E_heat_kWh",
        "E_heat_kWh_cum",
    ])?;

    for r in trajectory.records() {
        writer.write_record([
            r.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            format!("{}", r.outdoor_c),
            format!("{}", r.indoor_c),
            r.mode.to_string(),
            format!("{}", r.q_hvac_w),
            format!("{}", r.energy_kwh),
            format!("{}", r.energy_cum_kwh),
        ])?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to write results to: {}", path.display()))?;
    Ok(())
}

/// Reads a previously written trajectory table.
///
/// Validates all required columns up front (the timestamp column may be
/// named `datetime` or `DateTime`); a missing column is a hard failure
/// before any computation proceeds.
pub fn read_trajectory_csv(path: &Path) -> Result<Trajectory> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open results file: {}", path.display()))?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let headers = reader.headers()?.clone();
    let col = |names: &[&str]| -> Result<usize> {
        names
            .iter()
            .find_map(|name| headers.iter().position(|h| h.trim() == *name))
            .with_context(|| {
                format!(
                    "Missing required column (expected one of {names:?}) in {}",
                    path.display()
                )
            })
    };

    let ts_idx = col(&["datetime", "DateTime"])?;
    let out_idx = col(&["T_out_C"])?;
    let in_idx = col(&["T_in_C"])?;
    let mode_idx = col(&["mode"])?;
    let q_idx = col(&["Q_hvac_W"])?;
    let e_idx = col(&["E_heat_kWh"])?;
    let ec_idx = col(&["E_heat_kWh_cum"])?;

    let mut records = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Malformed CSV row {}", line + 2))?;
        let parse_f64 = |idx: usize, name: &str| -> Result<f64> {
            record[idx]
                .trim()
                .parse()
                .with_context(|| format!("Bad {name} value at row {}", line + 2))
        };

        records.push(TimestepRecord {
            timestamp: parse_timestamp(&record[ts_idx])
                .with_context(|| format!("Bad timestamp at row {}", line + 2))?,
            outdoor_c: parse_f64(out_idx, "T_out_C")?,
            indoor_c: parse_f64(in_idx, "T_in_C")?,
            mode: record[mode_idx]
                .trim()
                .parse::<Mode>()
                .with_context(|| format!("Bad mode at row {}", line + 2))?,
            q_hvac_w: parse_f64(q_idx, "Q_hvac_W")?,
            energy_kwh: parse_f64(e_idx, "E_heat_kWh")?,
            energy_cum_kwh: parse_f64(ec_idx, "E_heat_kWh_cum")?,
        });
    }

    Ok(Trajectory::from_records(records))
}

/// Writes the carbon analysis alongside the trajectory timestamps.
///
/// Per scenario `tag`, the columns are `E_heat_elec_kWh_COP{tag}`,
/// `CO2_kg_COP{tag}` and their `_cum` counterparts.
pub fn write_carbon_csv(
    path: &Path,
    trajectory: &Trajectory,
    analysis: &CarbonAnalysis,
) -> Result<()> {
    anyhow::ensure!(
        analysis.thermal_kwh.len() == trajectory.len(),
        "carbon analysis has {} rows but trajectory has {}",
        analysis.thermal_kwh.len(),
        trajectory.len()
    );

    let file = File::create(path)
        .with_context(|| format!("Failed to create carbon file: {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));

    let mut header = vec!["datetime".to_string(), "E_heat_th_kWh".to_string()];
    for s in &analysis.scenarios {
        header.push(format!("E_heat_elec_kWh_COP{}", s.tag));
        header.push(format!("CO2_kg_COP{}", s.tag));
        header.push(format!("E_heat_elec_kWh_COP{}_cum", s.tag));
        header.push(format!("CO2_kg_COP{}_cum", s.tag));
    }
    writer.write_record(&header)?;

    for (i, r) in trajectory.records().iter().enumerate() {
        let mut row = vec![
            r.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            format!("{}", analysis.thermal_kwh[i]),
        ];
        for s in &analysis.scenarios {
            row.push(format!("{}", s.electricity_kwh[i]));
            row.push(format!("{}", s.co2_kg[i]));
            row.push(format!("{}", s.electricity_cum_kwh[i]));
            row.push(format!("{}", s.co2_cum_kg[i]));
        }
        writer.write_record(&row)?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to write carbon results to: {}", path.display()))?;
    Ok(())
}

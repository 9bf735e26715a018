//! Weather CSV input.
//!
//! The expected shape is a plain CSV with a timestamp column named
//! `datetime` or `DateTime` and an outdoor temperature column named either
//! `Temperature` (°F, converted on load) or `T_out_C` (°C). Anything else in
//! the file is ignored.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};

use crate::sim::series::{OutdoorSample, OutdoorSeries, parse_timestamp};
use crate::units::fahrenheit_to_celsius;

/// Column names accepted for the timestamp, in order of preference.
const TIMESTAMP_COLUMNS: [&str; 2] = ["datetime", "DateTime"];

fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    names
        .iter()
        .find_map(|name| headers.iter().position(|h| h.trim() == *name))
}

/// Reads an outdoor temperature series from a weather CSV file.
///
/// Fails hard before any simulation work if the timestamp or temperature
/// column is missing. The returned series is sorted ascending by timestamp.
pub fn read_weather_csv(path: &Path) -> Result<OutdoorSeries> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open weather file: {}", path.display()))?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let headers = reader.headers()?.clone();
    let ts_idx = find_column(&headers, &TIMESTAMP_COLUMNS).with_context(|| {
        format!(
            "No timestamp column found (expected one of {TIMESTAMP_COLUMNS:?}) in {}",
            path.display()
        )
    })?;

    // Fahrenheit input takes precedence to match the source data shape;
    // a Celsius column is accepted as-is.
    let (temp_idx, in_fahrenheit) = if let Some(i) = find_column(&headers, &["Temperature"]) {
        (i, true)
    } else if let Some(i) = find_column(&headers, &["T_out_C"]) {
        (i, false)
    } else {
        anyhow::bail!(
            "No outdoor temperature column found (expected 'Temperature' or 'T_out_C') in {}",
            path.display()
        );
    };

    let mut samples = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Malformed CSV row {}", line + 2))?;
        let timestamp = parse_timestamp(&record[ts_idx])
            .with_context(|| format!("Bad timestamp at row {}", line + 2))?;
        let raw: f64 = record[temp_idx]
            .trim()
            .parse()
            .with_context(|| format!("Bad temperature at row {}", line + 2))?;
        let temperature_c = if in_fahrenheit {
            fahrenheit_to_celsius(raw)
        } else {
            raw
        };
        samples.push(OutdoorSample {
            timestamp,
            temperature_c,
        });
    }

    Ok(OutdoorSeries::new(samples))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_file(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_read_fahrenheit_weather() {
        let f = write_temp_file(
            "DateTime,Temperature,Humidity\n\
             2024-01-01 00:00:00,32.0,80\n\
             2024-01-01 00:15:00,33.8,81\n",
        );
        let series = read_weather_csv(f.path()).unwrap();
        assert_eq!(series.len(), 2);
        assert!((series.samples()[0].temperature_c - 0.0).abs() < 1e-12);
        assert!((series.samples()[1].temperature_c - 1.0).abs() < 1e-12);
        assert_eq!(series.inferred_dt_s(), Some(900.0));
    }

    #[test]
    fn test_read_celsius_weather_lowercase_header() {
        let f = write_temp_file(
            "datetime,T_out_C\n\
             2024-01-01 00:00:00,5.5\n",
        );
        let series = read_weather_csv(f.path()).unwrap();
        assert!((series.samples()[0].temperature_c - 5.5).abs() < 1e-12);
    }

    #[test]
    fn test_rows_sorted_on_load() {
        let f = write_temp_file(
            "DateTime,Temperature\n\
             2024-01-01 01:00:00,40.0\n\
             2024-01-01 00:00:00,30.0\n",
        );
        let series = read_weather_csv(f.path()).unwrap();
        assert!(series.samples()[0].timestamp < series.samples()[1].timestamp);
    }

    #[test]
    fn test_missing_timestamp_column_fails() {
        let f = write_temp_file("Time,Temperature\n2024-01-01 00:00:00,32.0\n");
        let err = read_weather_csv(f.path()).unwrap_err();
        assert!(err.to_string().contains("timestamp column"), "{err}");
    }

    #[test]
    fn test_missing_temperature_column_fails() {
        let f = write_temp_file("DateTime,Pressure\n2024-01-01 00:00:00,1013\n");
        let err = read_weather_csv(f.path()).unwrap_err();
        assert!(err.to_string().contains("temperature column"), "{err}");
    }

    #[test]
    fn test_bad_value_fails_with_row_number() {
        let f = write_temp_file(
            "DateTime,Temperature\n\
             2024-01-01 00:00:00,32.0\n\
             2024-01-01 00:15:00,warm\n",
        );
        let err = read_weather_csv(f.path()).unwrap_err();
        assert!(err.to_string().contains("row 3"), "{err}");
    }
}

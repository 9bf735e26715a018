use anyhow::Result;
use chrono::{Duration, NaiveDateTime};

/// One outdoor temperature sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutdoorSample {
    pub timestamp: NaiveDateTime,
    /// Outdoor dry bulb temperature in °C.
    pub temperature_c: f64,
}

/// Exogenous outdoor temperature series at a fixed cadence.
///
/// Samples are kept in ascending time order; [`OutdoorSeries::new`] sorts
/// them, so loaders do not need to. The series is the sole time axis of a
/// simulation run: one transition of the driver per sample.
#[derive(Debug, Clone, Default)]
pub struct OutdoorSeries {
    samples: Vec<OutdoorSample>,
}

impl OutdoorSeries {
    /// Builds a series from samples, sorting by timestamp.
    pub fn new(mut samples: Vec<OutdoorSample>) -> Self {
        samples.sort_by_key(|s| s.timestamp);
        Self { samples }
    }

    /// A constant-temperature series with `n` samples at `dt_s` cadence.
    pub fn constant(start: NaiveDateTime, dt_s: f64, n: usize, temperature_c: f64) -> Self {
        Self::from_fn(start, dt_s, n, |_| temperature_c)
    }

    /// Builds a fixed-cadence series from a per-step temperature function.
    pub fn from_fn(
        start: NaiveDateTime,
        dt_s: f64,
        n: usize,
        temp_at: impl Fn(usize) -> f64,
    ) -> Self {
        let step = Duration::milliseconds((dt_s * 1000.0).round() as i64);
        let samples = (0..n)
            .map(|i| OutdoorSample {
                timestamp: start + step * i as i32,
                temperature_c: temp_at(i),
            })
            .collect();
        // Already ascending by construction.
        Self { samples }
    }

    pub fn samples(&self) -> &[OutdoorSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Infers the timestep from the first two timestamps, in seconds.
    ///
    /// Returns `None` for series with fewer than two samples. The driver
    /// compares this against the configured `dt_s` and warns on mismatch;
    /// a configured timestep that disagrees with the sampling interval is a
    /// silent correctness bug otherwise.
    pub fn inferred_dt_s(&self) -> Option<f64> {
        let first = self.samples.first()?;
        let second = self.samples.get(1)?;
        let dt = (second.timestamp - first.timestamp).num_milliseconds() as f64 / 1000.0;
        Some(dt)
    }

    /// Checks that the cadence is uniform within `tol_s` seconds.
    pub fn has_uniform_cadence(&self, tol_s: f64) -> bool {
        let Some(dt) = self.inferred_dt_s() else {
            return true;
        };
        self.samples.windows(2).all(|w| {
            let step = (w[1].timestamp - w[0].timestamp).num_milliseconds() as f64 / 1000.0;
            (step - dt).abs() <= tol_s
        })
    }

    /// Mean outdoor temperature in °C, or `None` for an empty series.
    pub fn mean_temperature_c(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        let sum: f64 = self.samples.iter().map(|s| s.temperature_c).sum();
        Some(sum / self.samples.len() as f64)
    }
}

/// Parses a timestamp in the formats the weather/result CSVs use.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%m/%d/%Y %H:%M",
    ];
    for fmt in FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(s.trim(), fmt) {
            return Ok(t);
        }
    }
    anyhow::bail!("Unparseable timestamp: {s:?}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_constant_series() {
        let s = OutdoorSeries::constant(t0(), 900.0, 4, 4.4);
        assert_eq!(s.len(), 4);
        assert!(s.samples().iter().all(|x| x.temperature_c == 4.4));
        assert_eq!(s.inferred_dt_s(), Some(900.0));
        assert!(s.has_uniform_cadence(0.001));
    }

    #[test]
    fn test_new_sorts_by_timestamp() {
        let a = OutdoorSample {
            timestamp: t0() + Duration::seconds(900),
            temperature_c: 1.0,
        };
        let b = OutdoorSample {
            timestamp: t0(),
            temperature_c: 2.0,
        };
        let s = OutdoorSeries::new(vec![a, b]);
        assert_eq!(s.samples()[0].temperature_c, 2.0);
        assert_eq!(s.samples()[1].temperature_c, 1.0);
    }

    #[test]
    fn test_inferred_dt_edge_cases() {
        assert_eq!(OutdoorSeries::default().inferred_dt_s(), None);
        let one = OutdoorSeries::constant(t0(), 900.0, 1, 0.0);
        assert_eq!(one.inferred_dt_s(), None);
    }

    #[test]
    fn test_non_uniform_cadence_detected() {
        let mut samples = OutdoorSeries::constant(t0(), 900.0, 3, 0.0)
            .samples()
            .to_vec();
        samples[2].timestamp += Duration::seconds(60);
        let s = OutdoorSeries::new(samples);
        assert!(!s.has_uniform_cadence(1.0));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-01-01 12:30:00").is_ok());
        assert!(parse_timestamp("2024-01-01T12:30:00").is_ok());
        assert!(parse_timestamp("2024-01-01 12:30").is_ok());
        assert!(parse_timestamp("1/1/2024 12:30").is_ok());
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_mean_temperature() {
        let s = OutdoorSeries::from_fn(t0(), 900.0, 3, |i| i as f64);
        assert!((s.mean_temperature_c().unwrap() - 1.0).abs() < 1e-12);
        assert!(OutdoorSeries::default().mean_temperature_c().is_none());
    }
}

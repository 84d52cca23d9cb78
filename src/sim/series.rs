//! Secondary synthetic data sets for the performance view.
//!
//! Unlike gauges these are generated once and only regenerated on demand.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of points in each generated series.
pub const SERIES_POINTS: usize = 24;

/// Spacing between performance points, in seconds.
const PERFORMANCE_SPACING_SECS: u64 = 5 * 60;

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// One point of the host performance chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    /// Wall-clock label (`HH:MM`, UTC).
    pub label: String,
    pub cpu: f64,
    pub memory: f64,
    /// Throughput in Mbps.
    pub network: f64,
}

/// One hourly point of the application performance chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestPoint {
    pub hour: u8,
    pub requests: f64,
    pub errors: u32,
    pub latency_ms: f64,
}

impl RequestPoint {
    pub fn label(&self) -> String {
        format!("{:02}:00", self.hour)
    }
}

/// Aggregates shown under the request chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequestSummary {
    /// Mean requests per minute across the series.
    pub request_rate: f64,
    pub total_errors: u32,
    pub avg_latency_ms: f64,
}

/// Both performance series, generated together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceData {
    pub performance: Vec<PerformancePoint>,
    pub requests: Vec<RequestPoint>,
}

impl PerformanceData {
    /// Generate both series ending at the current wall-clock time.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::generate_at(rng, unix_now())
    }

    /// Generate both series ending at `now` (seconds since the Unix epoch).
    pub fn generate_at<R: Rng + ?Sized>(rng: &mut R, now: u64) -> Self {
        Self {
            performance: performance_series(rng, now, SERIES_POINTS),
            requests: request_series(rng, SERIES_POINTS),
        }
    }

    pub fn request_summary(&self) -> RequestSummary {
        summarize_requests(&self.requests)
    }
}

/// Host metrics spaced five minutes apart, the last point at `now`.
pub fn performance_series<R: Rng + ?Sized>(
    rng: &mut R,
    now: u64,
    points: usize,
) -> Vec<PerformancePoint> {
    (0..points)
        .map(|i| {
            let back = (points - i - 1) as u64 * PERFORMANCE_SPACING_SECS;
            let at = now.saturating_sub(back);
            PerformancePoint {
                label: format_clock(at, false),
                cpu: 30.0 + rng.gen_range(0.0..40.0),
                memory: 50.0 + rng.gen_range(0.0..30.0),
                network: 100.0 + rng.gen_range(0.0..200.0),
            }
        })
        .collect()
}

/// Hourly request volume, error count and latency.
pub fn request_series<R: Rng + ?Sized>(rng: &mut R, points: usize) -> Vec<RequestPoint> {
    (0..points)
        .map(|i| RequestPoint {
            hour: (i % 24) as u8,
            requests: 1500.0 + rng.gen_range(0.0..1000.0),
            errors: rng.gen_range(0.0..10.0_f64).floor() as u32,
            latency_ms: 80.0 + rng.gen_range(0.0..60.0),
        })
        .collect()
}

/// Summarize a request series. Empty input yields zeros.
pub fn summarize_requests(points: &[RequestPoint]) -> RequestSummary {
    if points.is_empty() {
        return RequestSummary {
            request_rate: 0.0,
            total_errors: 0,
            avg_latency_ms: 0.0,
        };
    }

    let n = points.len() as f64;
    let total_requests: f64 = points.iter().map(|p| p.requests).sum();
    let total_latency: f64 = points.iter().map(|p| p.latency_ms).sum();

    RequestSummary {
        request_rate: total_requests / n,
        total_errors: points.iter().map(|p| p.errors).sum(),
        avg_latency_ms: total_latency / n,
    }
}

/// Seconds since the Unix epoch; 0 if the system clock is before it.
pub fn unix_now() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}

/// Format a Unix timestamp as a UTC time of day.
pub fn format_clock(unix_secs: u64, with_seconds: bool) -> String {
    let secs = unix_secs % SECS_PER_DAY;
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if with_seconds {
        format!("{:02}:{:02}:{:02}", h, m, s)
    } else {
        format!("{:02}:{:02}", h, m)
    }
}

/// Format a per-minute rate (e.g. 1900 -> "1.9K/min").
pub fn format_rate(per_minute: f64) -> String {
    if per_minute >= 1_000.0 {
        format!("{:.1}K/min", per_minute / 1_000.0)
    } else {
        format!("{:.0}/min", per_minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn performance_points_within_ranges() {
        let mut rng = StdRng::seed_from_u64(1);
        let series = performance_series(&mut rng, 86_400 * 3, SERIES_POINTS);
        assert_eq!(series.len(), SERIES_POINTS);
        for p in &series {
            assert!((30.0..70.0).contains(&p.cpu));
            assert!((50.0..80.0).contains(&p.memory));
            assert!((100.0..300.0).contains(&p.network));
        }
    }

    #[test]
    fn performance_labels_end_at_now() {
        let mut rng = StdRng::seed_from_u64(2);
        // 12:00:00 UTC
        let now = 12 * 3600;
        let series = performance_series(&mut rng, now, 3);
        let labels: Vec<&str> = series.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["11:50", "11:55", "12:00"]);
    }

    #[test]
    fn request_points_within_ranges() {
        let mut rng = StdRng::seed_from_u64(3);
        let series = request_series(&mut rng, SERIES_POINTS);
        for (i, p) in series.iter().enumerate() {
            assert_eq!(p.hour as usize, i);
            assert!((1500.0..2500.0).contains(&p.requests));
            assert!(p.errors < 10);
            assert!((80.0..140.0).contains(&p.latency_ms));
        }
        assert_eq!(series[7].label(), "07:00");
    }

    #[test]
    fn summary_averages() {
        let points = vec![
            RequestPoint {
                hour: 0,
                requests: 1000.0,
                errors: 2,
                latency_ms: 100.0,
            },
            RequestPoint {
                hour: 1,
                requests: 3000.0,
                errors: 3,
                latency_ms: 120.0,
            },
        ];
        let summary = summarize_requests(&points);
        assert_eq!(summary.request_rate, 2000.0);
        assert_eq!(summary.total_errors, 5);
        assert_eq!(summary.avg_latency_ms, 110.0);
        assert_eq!(summarize_requests(&[]).total_errors, 0);
    }

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(0, true), "00:00:00");
        assert_eq!(format_clock(86_400 + 3_723, true), "01:02:03");
        assert_eq!(format_clock(3_723, false), "01:02");
    }

    #[test]
    fn rate_formatting() {
        assert_eq!(format_rate(1900.0), "1.9K/min");
        assert_eq!(format_rate(950.0), "950/min");
    }
}

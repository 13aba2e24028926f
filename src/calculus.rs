//! Numerical derivatives over an irregularly-dated net worth series
//!
//! First differences give wealth velocity (per-day, annualized for
//! reporting), second differences give acceleration, and sign changes in
//! acceleration locate inflection points. Small series degrade to empty
//! results rather than erroring: at least 3 points are needed for any
//! acceleration, 4 for any inflection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::profile::HistoryEntry;

const DAYS_PER_YEAR: f64 = 365.25;

/// Rate of change of net worth over one observation interval
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VelocitySample {
    /// Date of the later endpoint of the interval
    pub date: NaiveDate,

    /// Days covered by the interval
    pub interval_days: f64,

    /// Dollars per day
    pub per_day: f64,

    /// Dollars per year (per_day * 365.25), the reporting unit
    pub annualized: f64,
}

/// Change in velocity over one observation interval
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AccelerationSample {
    pub date: NaiveDate,

    /// Dollars per day per day
    pub per_day_squared: f64,
}

/// Direction of an acceleration sign change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InflectionKind {
    /// Acceleration flipped positive to negative: local velocity maximum
    Peak,
    /// Acceleration flipped negative to positive: local velocity minimum
    Trough,
}

/// A qualifying velocity extremum in the series
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InflectionPoint {
    pub date: NaiveDate,
    pub kind: InflectionKind,

    /// Annualized velocity at the extremum
    pub velocity: f64,
}

/// Direction of a trend segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Growing,
    Declining,
    Flat,
}

/// A run of consecutive observation intervals sharing one direction
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrendSegment {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub direction: TrendDirection,
    pub avg_annualized_velocity: f64,
}

/// First differences of the series. Zero-length intervals (duplicate dates)
/// are skipped to avoid division by zero.
pub fn velocities(entries: &[HistoryEntry]) -> Vec<VelocitySample> {
    let mut samples = Vec::new();

    for pair in entries.windows(2) {
        let interval_days = (pair[1].date - pair[0].date).num_days() as f64;
        if interval_days <= 0.0 {
            continue;
        }
        let per_day = (pair[1].net_worth - pair[0].net_worth) / interval_days;
        samples.push(VelocitySample {
            date: pair[1].date,
            interval_days,
            per_day,
            annualized: per_day * DAYS_PER_YEAR,
        });
    }

    samples
}

/// Second differences of the series; empty for fewer than 3 usable points
pub fn accelerations(entries: &[HistoryEntry]) -> Vec<AccelerationSample> {
    accelerations_of(&velocities(entries))
}

fn accelerations_of(velocities: &[VelocitySample]) -> Vec<AccelerationSample> {
    velocities
        .windows(2)
        .map(|pair| AccelerationSample {
            date: pair[1].date,
            per_day_squared: (pair[1].per_day - pair[0].per_day) / pair[1].interval_days,
        })
        .collect()
}

/// Scan consecutive acceleration signs for velocity extrema.
///
/// An extremum only qualifies when its annualized velocity magnitude exceeds
/// `min_velocity_magnitude`, suppressing noise from tiny balance wiggles.
/// Requires at least 4 points (two acceleration samples).
pub fn inflection_points(
    entries: &[HistoryEntry],
    min_velocity_magnitude: f64,
) -> Vec<InflectionPoint> {
    let velocity_samples = velocities(entries);
    let acceleration_samples = accelerations_of(&velocity_samples);
    if acceleration_samples.len() < 2 {
        return Vec::new();
    }

    let mut inflections = Vec::new();
    for i in 1..acceleration_samples.len() {
        let prev = acceleration_samples[i - 1].per_day_squared;
        let curr = acceleration_samples[i].per_day_squared;

        let kind = if prev > 0.0 && curr < 0.0 {
            InflectionKind::Peak
        } else if prev < 0.0 && curr > 0.0 {
            InflectionKind::Trough
        } else {
            continue;
        };

        // acceleration_samples[i-1] covers velocity i-1 -> i, [i] covers i -> i+1,
        // so the extremum sits at velocity sample i
        let extremum = &velocity_samples[i];
        if extremum.annualized.abs() <= min_velocity_magnitude {
            continue;
        }

        inflections.push(InflectionPoint {
            date: extremum.date,
            kind,
            velocity: extremum.annualized,
        });
    }

    inflections
}

/// Merge consecutive observation intervals into directional trend segments.
/// Intervals with |annualized velocity| below `flat_threshold` read as Flat.
pub fn segments(entries: &[HistoryEntry], flat_threshold: f64) -> Vec<TrendSegment> {
    let velocity_samples = velocities(entries);
    if velocity_samples.is_empty() {
        return Vec::new();
    }

    let direction_of = |sample: &VelocitySample| {
        if sample.annualized > flat_threshold {
            TrendDirection::Growing
        } else if sample.annualized < -flat_threshold {
            TrendDirection::Declining
        } else {
            TrendDirection::Flat
        }
    };

    let mut result: Vec<TrendSegment> = Vec::new();
    let mut run: Vec<&VelocitySample> = vec![&velocity_samples[0]];
    let mut run_start = entries[0].date;
    let mut run_direction = direction_of(&velocity_samples[0]);

    for sample in &velocity_samples[1..] {
        let direction = direction_of(sample);
        if direction == run_direction {
            run.push(sample);
            continue;
        }

        result.push(close_run(&run, run_start, run_direction));
        run_start = run.last().map(|s| s.date).unwrap_or(run_start);
        run = vec![sample];
        run_direction = direction;
    }
    result.push(close_run(&run, run_start, run_direction));

    result
}

fn close_run(run: &[&VelocitySample], start: NaiveDate, direction: TrendDirection) -> TrendSegment {
    let avg = run.iter().map(|s| s.annualized).sum::<f64>() / run.len() as f64;
    TrendSegment {
        start,
        end: run.last().map(|s| s.date).unwrap_or(start),
        direction,
        avg_annualized_velocity: avg,
    }
}

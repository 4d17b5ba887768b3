//! Virtual clock for the elevator simulation
//!
//! Time only moves when the simulator steps the clock, so a run is fully
//! reproducible for a given seed and time step.

use super::types::SimTime;

pub const NANOSECONDS_PER_SECOND: u64 = 1_000_000_000;
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Fixed-step simulation clock
#[derive(Debug, Clone)]
pub struct SimClock {
    /// Length of one tick in nanoseconds
    time_step: SimTime,
    /// Elapsed simulated time in nanoseconds
    elapsed: SimTime,
}

impl SimClock {
    /// Create a clock that advances `time_step_secs` seconds per step
    pub fn new(time_step_secs: f64) -> Self {
        Self {
            time_step: Self::seconds_to_time(time_step_secs),
            elapsed: 0,
        }
    }

    /// Advance the clock by one time step
    pub fn step(&mut self) {
        self.elapsed += self.time_step;
    }

    /// Elapsed simulated time in nanoseconds
    pub fn simulated_time(&self) -> SimTime {
        self.elapsed
    }

    /// Elapsed simulated time in seconds
    pub fn simulated_seconds(&self) -> f64 {
        Self::time_to_seconds(self.elapsed)
    }

    /// Length of one tick in nanoseconds
    pub fn time_step(&self) -> SimTime {
        self.time_step
    }

    pub fn reset(&mut self) {
        self.elapsed = 0;
    }

    /// Convert a duration in minutes into the internal time unit
    pub fn minutes_to_time(minutes: f64) -> SimTime {
        Self::seconds_to_time(minutes * SECONDS_PER_MINUTE)
    }

    /// Convert a duration in seconds into the internal time unit
    pub fn seconds_to_time(seconds: f64) -> SimTime {
        (seconds * NANOSECONDS_PER_SECOND as f64).round().max(0.0) as SimTime
    }

    /// Signed countdown value for a duration, saturating at `i64::MAX`
    pub fn countdown(time: SimTime) -> i64 {
        i64::try_from(time).unwrap_or(i64::MAX)
    }

    pub fn time_to_seconds(time: SimTime) -> f64 {
        time as f64 / NANOSECONDS_PER_SECOND as f64
    }

    /// Format a number of seconds as `HH:MM:SS.ss`
    pub fn formatted_time(seconds: f64) -> String {
        let seconds = seconds.max(0.0);
        let hours = (seconds / 3600.0).floor();
        let minutes = ((seconds - hours * 3600.0) / 60.0).floor();
        let secs = seconds - hours * 3600.0 - minutes * 60.0;
        format!("{:02}:{:02}:{:05.2}", hours as u64, minutes as u64, secs)
    }

    /// The current simulated time formatted as `HH:MM:SS.ss`
    pub fn formatted_now(&self) -> String {
        Self::formatted_time(self.simulated_seconds())
    }
}

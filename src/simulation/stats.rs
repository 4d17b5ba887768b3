//! Simulation statistics
//!
//! The simulator owns a single [`StatsSink`] and lends it to floors and cars
//! while a tick runs. [`SimulatorStats`] is the built-in sink: it aggregates
//! waiting, riding and total travel times and can export them as JSON.

use ordered_float::OrderedFloat;
use serde::Serialize;
use sorted_vec::SortedVec;
use std::fs;
use std::path::{Path, PathBuf};

use super::building::Building;
use super::clock::SimClock;
use super::error::SimError;
use super::passenger::Passenger;
use super::types::{PassengerId, SimTime};

/// Receives simulation events at fixed points of a tick
pub trait StatsSink {
    /// A floor generated a new passenger
    fn generated_passenger(&mut self, passenger: &Passenger);

    /// A passenger left its car at its destination
    fn passenger_exited(&mut self, passenger: &Passenger, boarded_at: SimTime, now: SimTime);

    /// Called once at the end of every tick
    fn update(&mut self, building: &Building, now: SimTime);

    /// Called once when the building has drained after the horizon
    fn done(&mut self, now: SimTime);

    fn reset(&mut self);
}

/// One generated passenger, as recorded at creation time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArrivalRecord {
    pub passenger: PassengerId,
    pub origin_floor: usize,
    pub destination_floor: usize,
    pub created_at: SimTime,
}

/// Summary of a sample of durations, in seconds
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DurationSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub p95: f64,
    pub max: f64,
}

impl DurationSummary {
    fn from_sorted(samples: &[OrderedFloat<f64>]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        let count = samples.len();
        let sum: f64 = samples.iter().map(|s| s.into_inner()).sum();
        let percentile = |p: f64| {
            let rank = ((p * count as f64).ceil() as usize).clamp(1, count);
            samples[rank - 1].into_inner()
        };
        Self {
            count,
            mean: sum / count as f64,
            median: percentile(0.5),
            p95: percentile(0.95),
            max: samples[count - 1].into_inner(),
        }
    }
}

/// Final figures of a run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsReport {
    pub passengers_generated: usize,
    pub passengers_exited: usize,
    pub arrivals_per_floor: Vec<usize>,
    pub waiting_time: DurationSummary,
    pub riding_time: DurationSummary,
    pub total_time: DurationSummary,
    pub max_queue_length: usize,
    pub ticks: u64,
    pub simulated_seconds: f64,
}

/// Aggregating statistics sink
#[derive(Debug, Clone)]
pub struct SimulatorStats {
    arrivals: Vec<ArrivalRecord>,
    arrivals_per_floor: Vec<usize>,
    passengers_exited: usize,
    /// Seconds from creation until boarding
    waiting_times: SortedVec<OrderedFloat<f64>>,
    /// Seconds from boarding until exit
    riding_times: SortedVec<OrderedFloat<f64>>,
    /// Seconds from creation until exit
    total_times: SortedVec<OrderedFloat<f64>>,
    max_queue_length: usize,
    ticks: u64,
    last_update: SimTime,
    finished_at: Option<SimTime>,
}

impl SimulatorStats {
    pub fn new(num_floors: usize) -> Self {
        Self {
            arrivals: Vec::new(),
            arrivals_per_floor: vec![0; num_floors],
            passengers_exited: 0,
            waiting_times: SortedVec::new(),
            riding_times: SortedVec::new(),
            total_times: SortedVec::new(),
            max_queue_length: 0,
            ticks: 0,
            last_update: 0,
            finished_at: None,
        }
    }

    /// Every generated passenger in creation order
    pub fn arrivals(&self) -> &[ArrivalRecord] {
        &self.arrivals
    }

    pub fn passengers_generated(&self) -> usize {
        self.arrivals.len()
    }

    pub fn passengers_exited(&self) -> usize {
        self.passengers_exited
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_done(&self) -> bool {
        self.finished_at.is_some()
    }

    pub fn report(&self) -> StatsReport {
        let end = self.finished_at.unwrap_or(self.last_update);
        StatsReport {
            passengers_generated: self.arrivals.len(),
            passengers_exited: self.passengers_exited,
            arrivals_per_floor: self.arrivals_per_floor.clone(),
            waiting_time: DurationSummary::from_sorted(&self.waiting_times),
            riding_time: DurationSummary::from_sorted(&self.riding_times),
            total_time: DurationSummary::from_sorted(&self.total_times),
            max_queue_length: self.max_queue_length,
            ticks: self.ticks,
            simulated_seconds: SimClock::time_to_seconds(end),
        }
    }

    /// Print a summary of the statistics
    pub fn print_stats(&self) {
        let report = self.report();
        println!(
            "Simulated time: {}",
            SimClock::formatted_time(report.simulated_seconds)
        );
        println!(
            "Passengers: generated={}, exited={}",
            report.passengers_generated, report.passengers_exited
        );
        for (name, summary) in [
            ("Waiting time", &report.waiting_time),
            ("Riding time", &report.riding_time),
            ("Total time", &report.total_time),
        ] {
            println!(
                "{}: mean={:.2}s, median={:.2}s, p95={:.2}s, max={:.2}s",
                name, summary.mean, summary.median, summary.p95, summary.max
            );
        }
        println!("Longest queue: {}", report.max_queue_length);
        println!("Ticks: {}", report.ticks);
    }

    /// Write the report to `<dir>/<simulation_name>.json`
    pub fn export_stats(&self, dir: &Path, simulation_name: &str) -> Result<PathBuf, SimError> {
        fs::create_dir_all(dir).map_err(|e| SimError::Export(e.to_string()))?;
        let path = dir.join(format!("{}.json", simulation_name));
        let json = serde_json::to_string_pretty(&self.report())
            .map_err(|e| SimError::Export(e.to_string()))?;
        fs::write(&path, json).map_err(|e| SimError::Export(e.to_string()))?;
        Ok(path)
    }
}

impl StatsSink for SimulatorStats {
    fn generated_passenger(&mut self, passenger: &Passenger) {
        if let Some(count) = self.arrivals_per_floor.get_mut(passenger.origin_floor()) {
            *count += 1;
        }
        self.arrivals.push(ArrivalRecord {
            passenger: passenger.id(),
            origin_floor: passenger.origin_floor(),
            destination_floor: passenger.destination_floor(),
            created_at: passenger.created_at(),
        });
    }

    fn passenger_exited(&mut self, passenger: &Passenger, boarded_at: SimTime, now: SimTime) {
        let created_at = passenger.created_at();
        let seconds = |from: SimTime, to: SimTime| {
            OrderedFloat(SimClock::time_to_seconds(to.saturating_sub(from)))
        };
        self.waiting_times.insert(seconds(created_at, boarded_at));
        self.riding_times.insert(seconds(boarded_at, now));
        self.total_times.insert(seconds(created_at, now));
        self.passengers_exited += 1;
    }

    fn update(&mut self, building: &Building, now: SimTime) {
        self.ticks += 1;
        self.last_update = now;
        let longest = building
            .floors()
            .iter()
            .map(|f| f.waiting_queue().len())
            .max()
            .unwrap_or(0);
        self.max_queue_length = self.max_queue_length.max(longest);
    }

    fn done(&mut self, now: SimTime) {
        self.finished_at = Some(now);
    }

    fn reset(&mut self) {
        *self = Self::new(self.arrivals_per_floor.len());
    }
}

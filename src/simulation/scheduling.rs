//! Scheduling algorithm trait definitions.
//!
//! Dispatch strategies implement [`SchedulingAlgorithm`]. The control system
//! calls [`SchedulingAlgorithm::update`] once per tick, after the floors have
//! boarded passengers into cars standing at their floor, and applies the
//! returned [`Dispatch`] decisions.

use super::building::Building;
use super::car::Car;
use super::control_system::HallCall;
use super::error::SimError;
use super::longest_queue_first::LongestQueueFirst;
use super::passenger::Passenger;
use super::round_robin::RoundRobin;
use super::types::{CarId, SimTime};

/// Decision returned by a scheduling algorithm: send `car` to `floor`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub car: CarId,
    pub floor: usize,
}

/// The core scheduling algorithm trait.
///
/// Dispatches only move cars. Boarding always happens through the floor's
/// direct pickup, so a strategy can neither overfill a car nor board a
/// passenger twice.
pub trait SchedulingAlgorithm {
    /// Human-readable name for reports.
    fn name(&self) -> &str;

    /// Called once per tick with the outstanding hall calls in registration order.
    fn update(&mut self, building: &Building, calls: &[HallCall], elapsed: SimTime)
        -> Vec<Dispatch>;

    /// Called when a new hall call is registered.
    fn on_hall_call(&mut self, _call: &HallCall) {}

    /// Called when a hall call is removed because its passenger boarded.
    fn on_hall_call_handled(&mut self, _call: &HallCall) {}

    /// Called when a passenger leaves a car at its destination.
    fn on_passenger_exited(&mut self, _car: CarId, _passenger: &Passenger) {}

    /// Forget all internal state before a new run.
    fn reset(&mut self) {}
}

/// Builds a scheduling algorithm bound to a building
pub trait SchedulerCreator {
    fn create_scheduler(&self, building: &Building)
        -> Result<Box<dyn SchedulingAlgorithm>, SimError>;
}

impl<F> SchedulerCreator for F
where
    F: Fn(&Building) -> Box<dyn SchedulingAlgorithm>,
{
    fn create_scheduler(
        &self,
        building: &Building,
    ) -> Result<Box<dyn SchedulingAlgorithm>, SimError> {
        Ok(self(building))
    }
}

/// Creates a built-in scheduler by its registry name
#[derive(Debug, Clone)]
pub struct NamedScheduler(pub String);

impl SchedulerCreator for NamedScheduler {
    fn create_scheduler(
        &self,
        building: &Building,
    ) -> Result<Box<dyn SchedulingAlgorithm>, SimError> {
        scheduler_by_name(&self.0, building)
            .ok_or_else(|| SimError::UnknownScheduler(self.0.clone()))
    }
}

/// Create a built-in scheduling algorithm by name.
pub fn scheduler_by_name(name: &str, building: &Building) -> Option<Box<dyn SchedulingAlgorithm>> {
    match name {
        "longest_queue_first" => Some(Box::new(LongestQueueFirst::new())),
        "round_robin" => Some(Box::new(RoundRobin::new(building))),
        _ => None,
    }
}

/// List all available built-in scheduler names.
pub fn available_schedulers() -> Vec<&'static str> {
    vec!["longest_queue_first", "round_robin"]
}

/// Cars that are idle, empty and have nowhere to go
pub fn available_cars(building: &Building) -> Vec<&Car> {
    building.cars().iter().filter(|car| car.is_available()).collect()
}

/// Floors with at least one unassigned call, in order of their oldest call
pub fn unassigned_floors(calls: &[HallCall]) -> Vec<usize> {
    let mut floors: Vec<usize> = Vec::new();
    for call in calls.iter().filter(|call| call.assigned_car.is_none()) {
        if !floors.contains(&call.floor) {
            floors.push(call.floor);
        }
    }
    floors
}

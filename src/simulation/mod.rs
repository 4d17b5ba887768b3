//! Elevator group simulation
//!
//! This module contains the simulation engine: clock, floors, cars, the
//! control system with its pluggable scheduling algorithms, statistics and
//! the simulator that drives them tick by tick.

mod arrival;
mod building;
mod car;
mod clock;
mod context;
mod control_system;
mod error;
mod floor;
mod longest_queue_first;
mod passenger;
mod round_robin;
mod scenario;
mod scheduling;
mod simulator;
mod stats;
mod types;

// Re-export public types for external use
pub use arrival::ArrivalModel;
pub use building::Building;
pub use car::{BoardedPassenger, Car};
pub use clock::{SimClock, NANOSECONDS_PER_SECOND, SECONDS_PER_MINUTE};
pub use context::TickContext;
pub use control_system::{ControlSystem, HallCall};
pub use error::SimError;
pub use floor::Floor;
pub use longest_queue_first::LongestQueueFirst;
pub use passenger::Passenger;
pub use round_robin::RoundRobin;
pub use scenario::{
    CarConfiguration, FloorConfig, Scenario, SimulatorSettings, DEFAULT_CAR_CAPACITY,
    DEFAULT_FLOOR_TRAVEL_TIME, DEFAULT_STOP_TIME,
};
pub use scheduling::{
    available_cars, available_schedulers, scheduler_by_name, unassigned_floors, Dispatch,
    NamedScheduler, SchedulerCreator, SchedulingAlgorithm,
};
pub use simulator::{ReseedPolicy, Simulator};
pub use stats::{ArrivalRecord, DurationSummary, SimulatorStats, StatsReport, StatsSink};
pub use types::{CarId, CarState, Direction, PassengerId, SimTime};

//! Error types for the elevator simulation

use thiserror::Error;

use super::types::{CarId, PassengerId};

/// Invariant violations and construction failures
///
/// All of these are programmer or configuration errors. A tick that hits
/// one is aborted and never retried.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("car {car:?} is full (capacity {capacity})")]
    CapacityExceeded { car: CarId, capacity: usize },
    #[error("passenger {passenger:?} cannot board car {car:?}: {reason}")]
    InvalidMatch {
        car: CarId,
        passenger: PassengerId,
        reason: String,
    },
    #[error("no outstanding hall call for passenger {0:?}")]
    UnknownHallCall(PassengerId),
    #[error("invalid dispatch of car {car:?} to floor {floor}")]
    InvalidDispatch { car: CarId, floor: usize },
    #[error("malformed scenario: {0}")]
    MalformedScenario(String),
    #[error("unknown scheduler: {0}")]
    UnknownScheduler(String),
    #[error("failed to export statistics: {0}")]
    Export(String),
}

//! Core types for the elevator simulation

use serde::{Deserialize, Serialize};

/// Simulated time in nanoseconds since the start of a run
pub type SimTime = u64;

/// A wrapper type for car IDs
/// Car ids are the car's index in the building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CarId(pub usize);

/// A wrapper type for passenger IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PassengerId(pub u64);

/// Direction of travel for a passenger or a car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    /// Only used for a car that has no target
    None,
}

impl Direction {
    /// Direction needed to travel from `from` to `to`
    pub fn between(from: usize, to: usize) -> Direction {
        if to > from {
            Direction::Up
        } else if to < from {
            Direction::Down
        } else {
            Direction::None
        }
    }
}

/// State of an elevator car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CarState {
    /// Standing at a floor with nothing to do
    Idle,
    /// Travelling between floors
    Moving,
    /// Standing at a floor with the doors open
    Stopped,
}

//! Passengers travelling through the building

use serde::Serialize;

use super::types::{Direction, PassengerId, SimTime};

/// A passenger waiting for, or riding in, an elevator car
///
/// Passengers never change after creation. They are moved between the
/// floor's waiting queue and a car's boarded set, never copied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Passenger {
    id: PassengerId,
    origin_floor: usize,
    destination_floor: usize,
    created_at: SimTime,
}

impl Passenger {
    pub fn new(
        id: PassengerId,
        origin_floor: usize,
        destination_floor: usize,
        created_at: SimTime,
    ) -> Self {
        Self {
            id,
            origin_floor,
            destination_floor,
            created_at,
        }
    }

    pub fn id(&self) -> PassengerId {
        self.id
    }

    pub fn origin_floor(&self) -> usize {
        self.origin_floor
    }

    pub fn destination_floor(&self) -> usize {
        self.destination_floor
    }

    pub fn created_at(&self) -> SimTime {
        self.created_at
    }

    /// Direction the passenger wants to travel
    pub fn direction(&self) -> Direction {
        Direction::between(self.origin_floor, self.destination_floor)
    }
}

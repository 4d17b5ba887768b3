//! Round-robin dispatching.
//!
//! Cars take turns answering calls in a fixed rotation, regardless of how
//! far they are from the calling floor.

use super::building::Building;
use super::control_system::HallCall;
use super::scheduling::{unassigned_floors, Dispatch, SchedulingAlgorithm};
use super::types::{CarId, SimTime};

/// Round-robin dispatcher.
///
/// Tracks the last car it dispatched; the next call goes to the first
/// available car after it, wrapping around.
pub struct RoundRobin {
    num_cars: usize,
    last_car: Option<CarId>,
}

impl RoundRobin {
    pub fn new(building: &Building) -> Self {
        Self {
            num_cars: building.cars().len(),
            last_car: None,
        }
    }

    /// Car ids in rotation order, starting after the last dispatched car
    fn rotation(&self) -> impl Iterator<Item = CarId> {
        let start = self.last_car.map_or(0, |car| car.0 + 1);
        let num_cars = self.num_cars;
        (0..num_cars).map(move |offset| CarId((start + offset) % num_cars))
    }
}

impl SchedulingAlgorithm for RoundRobin {
    fn name(&self) -> &str {
        "RoundRobin"
    }

    fn update(
        &mut self,
        building: &Building,
        calls: &[HallCall],
        _elapsed: SimTime,
    ) -> Vec<Dispatch> {
        let mut dispatches: Vec<Dispatch> = Vec::new();

        for floor in unassigned_floors(calls) {
            let next = self.rotation().find(|id| {
                !dispatches.iter().any(|d| d.car == *id)
                    && building.car(*id).is_some_and(|car| car.is_available())
            });
            let Some(car) = next else {
                break;
            };
            self.last_car = Some(car);
            dispatches.push(Dispatch { car, floor });
        }
        dispatches
    }

    fn reset(&mut self) {
        self.last_car = None;
    }
}

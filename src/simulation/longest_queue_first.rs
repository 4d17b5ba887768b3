//! Longest-queue-first dispatching.
//!
//! Floors with the most waiting passengers are served first; each gets the
//! nearest available car.

use super::building::Building;
use super::control_system::HallCall;
use super::scheduling::{available_cars, unassigned_floors, Dispatch, SchedulingAlgorithm};
use super::types::SimTime;

#[derive(Debug, Default)]
pub struct LongestQueueFirst;

impl LongestQueueFirst {
    pub fn new() -> Self {
        Self
    }
}

impl SchedulingAlgorithm for LongestQueueFirst {
    fn name(&self) -> &str {
        "LongestQueueFirst"
    }

    fn update(
        &mut self,
        building: &Building,
        calls: &[HallCall],
        _elapsed: SimTime,
    ) -> Vec<Dispatch> {
        let mut idle = available_cars(building);
        if idle.is_empty() {
            return Vec::new();
        }

        // Stable sort keeps the oldest-call order between equal queues
        let mut floors = unassigned_floors(calls);
        floors.sort_by_key(|floor| {
            std::cmp::Reverse(building.floor(*floor).map_or(0, |f| f.waiting_queue().len()))
        });

        let mut dispatches = Vec::new();
        for floor in floors {
            let Some((index, _)) = idle
                .iter()
                .enumerate()
                .min_by_key(|(_, car)| (car.floor().abs_diff(floor), car.id()))
            else {
                break;
            };
            let car = idle.swap_remove(index);
            dispatches.push(Dispatch {
                car: car.id(),
                floor,
            });
        }
        dispatches
    }
}

//! Helpers shared by the integration tests

use elevator_sim::simulation::{Building, Dispatch, HallCall, SchedulingAlgorithm, SimTime};

/// Strategy that never dispatches, so only direct pickups move passengers
pub struct NoDispatch;

impl SchedulingAlgorithm for NoDispatch {
    fn name(&self) -> &str {
        "NoDispatch"
    }

    fn update(
        &mut self,
        _building: &Building,
        _calls: &[HallCall],
        _elapsed: SimTime,
    ) -> Vec<Dispatch> {
        Vec::new()
    }
}

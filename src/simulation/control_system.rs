//! Control system: hall-call bookkeeping and strategy invocation

use log::debug;

use super::building::Building;
use super::clock::SimClock;
use super::error::SimError;
use super::passenger::Passenger;
use super::scheduling::{Dispatch, SchedulingAlgorithm};
use super::types::{CarId, CarState, Direction, PassengerId, SimTime};

/// A pending request for a car at a floor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HallCall {
    pub passenger: PassengerId,
    pub floor: usize,
    pub direction: Direction,
    pub registered_at: SimTime,
    /// Car that has been sent to answer the call, if any
    pub assigned_car: Option<CarId>,
}

/// Mediates between the floors and the active scheduling algorithm
pub struct ControlSystem {
    scheduler: Box<dyn SchedulingAlgorithm>,
    /// Outstanding calls in registration order
    hall_calls: Vec<HallCall>,
}

impl ControlSystem {
    pub fn new(scheduler: Box<dyn SchedulingAlgorithm>) -> Self {
        Self {
            scheduler,
            hall_calls: Vec::new(),
        }
    }

    pub fn scheduler_name(&self) -> &str {
        self.scheduler.name()
    }

    pub fn hall_calls(&self) -> &[HallCall] {
        &self.hall_calls
    }

    /// Register a new hall call for a passenger that just arrived
    pub fn handle_hall_call(&mut self, passenger: &Passenger, now: SimTime) {
        let call = HallCall {
            passenger: passenger.id(),
            floor: passenger.origin_floor(),
            direction: passenger.direction(),
            registered_at: now,
            assigned_car: None,
        };
        self.scheduler.on_hall_call(&call);
        self.hall_calls.push(call);
    }

    /// Remove the call of a passenger that has boarded a car
    pub fn hall_call_handled(&mut self, passenger: PassengerId) -> Result<(), SimError> {
        let position = self
            .hall_calls
            .iter()
            .position(|call| call.passenger == passenger)
            .ok_or(SimError::UnknownHallCall(passenger))?;
        let call = self.hall_calls.remove(position);
        self.scheduler.on_hall_call_handled(&call);
        Ok(())
    }

    pub fn passenger_exited(&mut self, car: CarId, passenger: &Passenger) {
        self.scheduler.on_passenger_exited(car, passenger);
    }

    /// Let the strategy dispatch cars for this tick
    pub fn update(
        &mut self,
        building: &mut Building,
        elapsed: SimTime,
        now: SimTime,
    ) -> Result<(), SimError> {
        self.release_stale_assignments(building);

        let dispatches = self.scheduler.update(building, &self.hall_calls, elapsed);
        for dispatch in dispatches {
            self.apply_dispatch(building, dispatch, now)?;
        }
        Ok(())
    }

    /// Forget assignments whose car is no longer going to the call's floor
    fn release_stale_assignments(&mut self, building: &Building) {
        for call in &mut self.hall_calls {
            let Some(car_id) = call.assigned_car else {
                continue;
            };
            let still_serving = building.car(car_id).is_some_and(|car| {
                car.has_stop(call.floor)
                    || (car.floor() == call.floor && car.state() != CarState::Moving)
            });
            if !still_serving {
                call.assigned_car = None;
            }
        }
    }

    fn apply_dispatch(
        &mut self,
        building: &mut Building,
        dispatch: Dispatch,
        now: SimTime,
    ) -> Result<(), SimError> {
        let num_floors = building.num_floors();
        let car = building
            .car_mut(dispatch.car)
            .filter(|_| dispatch.floor < num_floors)
            .ok_or(SimError::InvalidDispatch {
                car: dispatch.car,
                floor: dispatch.floor,
            })?;

        debug!(
            "Elevator {}: dispatched to floor {} at {}.",
            dispatch.car.0,
            dispatch.floor,
            SimClock::formatted_time(SimClock::time_to_seconds(now))
        );
        car.request_stop(dispatch.floor);

        for call in &mut self.hall_calls {
            if call.floor == dispatch.floor && call.assigned_car.is_none() {
                call.assigned_car = Some(dispatch.car);
            }
        }
        Ok(())
    }

    /// Drop every outstanding call and give the strategy a fresh start
    pub fn reset(&mut self) {
        self.hall_calls.clear();
        self.scheduler.reset();
    }
}

//! Floors: waiting queues, arrival generation and direct pickups
//!
//! Every tick a floor first boards waiting passengers into cars that are
//! already standing at the floor, then advances its arrival timer.

use log::{debug, trace};
use rand::Rng;
use std::collections::VecDeque;

use super::arrival::ArrivalModel;
use super::car::Car;
use super::clock::SimClock;
use super::context::TickContext;
use super::error::SimError;
use super::passenger::Passenger;
use super::types::PassengerId;

/// A floor in the building
#[derive(Debug, Clone)]
pub struct Floor {
    number: usize,
    num_residents: u32,
    /// Minutes between arrivals (mean for non-fixed models)
    average_arrival_rate: f64,
    arrival_model: ArrivalModel,
    waiting_queue: VecDeque<Passenger>,
    /// Time left until the next arrival
    time_left: i64,
    /// The timer is armed on the first update
    is_first: bool,
}

impl Floor {
    pub fn new(
        number: usize,
        num_residents: u32,
        average_arrival_rate: f64,
        arrival_model: ArrivalModel,
    ) -> Self {
        Self {
            number,
            num_residents,
            average_arrival_rate,
            arrival_model,
            waiting_queue: VecDeque::new(),
            time_left: 0,
            is_first: true,
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn num_residents(&self) -> u32 {
        self.num_residents
    }

    pub fn average_arrival_rate(&self) -> f64 {
        self.average_arrival_rate
    }

    pub fn waiting_queue(&self) -> &VecDeque<Passenger> {
        &self.waiting_queue
    }

    /// Floors with a non-positive rate never produce passengers
    pub fn generates_arrivals(&self) -> bool {
        self.average_arrival_rate > 0.0
    }

    /// Update the floor for one tick
    pub fn update(
        &mut self,
        cars: &mut [Car],
        num_floors: usize,
        ctx: &mut TickContext,
    ) -> Result<(), SimError> {
        self.pick_up_waiting(cars, ctx)?;

        if ctx.arrivals_open {
            self.try_generate_new_arrival(num_floors, ctx);
        }
        Ok(())
    }

    /// Board waiting passengers into cars standing at this floor
    ///
    /// First fit: each passenger takes the first eligible car in building
    /// order. Returns the number of passengers picked up.
    pub fn pick_up_waiting(
        &mut self,
        cars: &mut [Car],
        ctx: &mut TickContext,
    ) -> Result<usize, SimError> {
        if self.waiting_queue.is_empty() {
            return Ok(0);
        }

        let snapshot: Vec<PassengerId> = self.waiting_queue.iter().map(|p| p.id()).collect();
        let mut picked_up = 0;

        for passenger_id in snapshot {
            let Some(position) = self
                .waiting_queue
                .iter()
                .position(|p| p.id() == passenger_id)
            else {
                continue;
            };

            let passenger = &self.waiting_queue[position];
            let Some(car) = cars
                .iter_mut()
                .find(|car| car.check_pickup(passenger).is_ok())
            else {
                continue;
            };

            let Some(passenger) = self.waiting_queue.remove(position) else {
                continue;
            };

            debug!(
                "Elevator {}: picked up passenger #{} at floor {} with the destination of {}.",
                car.id().0,
                passenger_id.0,
                self.number,
                passenger.destination_floor()
            );

            car.pick_up(passenger, ctx.now)?;
            ctx.control.hall_call_handled(passenger_id)?;
            picked_up += 1;
        }

        Ok(picked_up)
    }

    /// Advance the arrival timer and create a passenger when it fires
    ///
    /// Returns true if a passenger was generated.
    pub fn try_generate_new_arrival(&mut self, num_floors: usize, ctx: &mut TickContext) -> bool {
        if !self.generates_arrivals() || num_floors < 2 {
            return false;
        }

        if self.is_first {
            self.time_left = self.next_interval(ctx);
            self.is_first = false;
            return false;
        }

        self.time_left = self.time_left.saturating_sub(SimClock::countdown(ctx.duration));
        if self.time_left > 0 {
            return false;
        }

        let destination = self.random_destination(num_floors, ctx);
        let passenger = Passenger::new(ctx.next_passenger_id(), self.number, destination, ctx.now);

        trace!(
            "Generated passenger #{} at floor {} with the destination {}.",
            passenger.id().0,
            self.number,
            destination
        );

        ctx.control.handle_hall_call(&passenger, ctx.now);
        ctx.stats.generated_passenger(&passenger);
        self.waiting_queue.push_back(passenger);

        self.time_left = self.next_interval(ctx);
        true
    }

    fn next_interval(&self, ctx: &mut TickContext) -> i64 {
        let interval = self
            .arrival_model
            .next_interval(self.average_arrival_rate, &mut *ctx.rng);
        SimClock::countdown(interval)
    }

    /// Uniformly random floor other than this one
    fn random_destination(&self, num_floors: usize, ctx: &mut TickContext) -> usize {
        loop {
            let floor = ctx.rng.random_range(0..num_floors);
            if floor != self.number {
                return floor;
            }
        }
    }

    /// Empty the queue and disarm the arrival timer
    pub fn reset(&mut self) {
        self.waiting_queue.clear();
        self.time_left = 0;
        self.is_first = true;
    }
}

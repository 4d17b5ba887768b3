//! Elevator car state machine
//!
//! Cars move one floor per `floor_travel_time`, open their doors for
//! `stop_time` at every floor in their stop set, and let passengers out at
//! their destination. Boarding is driven from the floor side.

use log::debug;
use std::collections::BTreeSet;

use super::clock::SimClock;
use super::context::TickContext;
use super::error::SimError;
use super::passenger::Passenger;
use super::scenario::CarConfiguration;
use super::types::{CarId, CarState, Direction, SimTime};

/// A passenger inside a car, with the time it boarded
#[derive(Debug, Clone)]
pub struct BoardedPassenger {
    pub passenger: Passenger,
    pub boarded_at: SimTime,
}

/// An elevator car
#[derive(Debug, Clone)]
pub struct Car {
    id: CarId,
    capacity: usize,
    /// Nanoseconds needed to travel one floor
    floor_travel_time: i64,
    /// Nanoseconds the doors stay open at a stop
    stop_time: i64,
    start_floor: usize,
    floor: usize,
    direction: Direction,
    state: CarState,
    boarded: Vec<BoardedPassenger>,
    /// Floors the car still has to stop at
    stops: BTreeSet<usize>,
    /// Time left on the current travel or door action
    timer: i64,
}

impl Car {
    pub fn new(id: CarId, config: &CarConfiguration) -> Self {
        let floor_travel_time = SimClock::seconds_to_time(config.floor_travel_time);
        let stop_time = SimClock::seconds_to_time(config.stop_time);
        Self {
            id,
            capacity: config.capacity,
            floor_travel_time: SimClock::countdown(floor_travel_time),
            stop_time: SimClock::countdown(stop_time),
            start_floor: config.start_floor,
            floor: config.start_floor,
            direction: Direction::None,
            state: CarState::Idle,
            boarded: Vec::new(),
            stops: BTreeSet::new(),
            timer: 0,
        }
    }

    pub fn id(&self) -> CarId {
        self.id
    }

    pub fn floor(&self) -> usize {
        self.floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> CarState {
        self.state
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn passengers(&self) -> &[BoardedPassenger] {
        &self.boarded
    }

    pub fn is_empty(&self) -> bool {
        self.boarded.is_empty()
    }

    pub fn has_capacity(&self) -> bool {
        self.boarded.len() < self.capacity
    }

    /// Stopped or idle cars can take passengers directly from the floor
    pub fn is_stationary(&self) -> bool {
        matches!(self.state, CarState::Stopped | CarState::Idle)
    }

    /// Idle, empty and without pending stops
    pub fn is_available(&self) -> bool {
        self.state == CarState::Idle && self.stops.is_empty() && self.boarded.is_empty()
    }

    pub fn stops(&self) -> impl Iterator<Item = usize> + '_ {
        self.stops.iter().copied()
    }

    pub fn has_stop(&self, floor: usize) -> bool {
        self.stops.contains(&floor)
    }

    /// The stop the car will head for next
    ///
    /// Prefers the nearest stop in the current direction of travel, then the
    /// nearest stop overall.
    pub fn next_stop(&self) -> Option<usize> {
        let ahead = match self.direction {
            Direction::Up => self.stops.range(self.floor + 1..).next().copied(),
            Direction::Down => self.stops.range(..self.floor).next_back().copied(),
            Direction::None => None,
        };
        ahead.or_else(|| {
            self.stops
                .iter()
                .copied()
                .min_by_key(|stop| stop.abs_diff(self.floor))
        })
    }

    /// Ask the car to stop at the given floor
    pub fn request_stop(&mut self, floor: usize) {
        // Doors are already open here
        if self.state == CarState::Stopped && self.floor == floor {
            return;
        }
        self.stops.insert(floor);
    }

    /// Check whether the passenger may board right now
    pub fn check_pickup(&self, passenger: &Passenger) -> Result<(), SimError> {
        if !self.is_stationary() {
            return Err(self.invalid_match(passenger, "car is moving".to_string()));
        }
        if !self.has_capacity() {
            return Err(SimError::CapacityExceeded {
                car: self.id,
                capacity: self.capacity,
            });
        }
        if self.floor != passenger.origin_floor() {
            return Err(self.invalid_match(
                passenger,
                format!(
                    "car is at floor {}, passenger is at floor {}",
                    self.floor,
                    passenger.origin_floor()
                ),
            ));
        }
        let direction = passenger.direction();
        if self.direction != Direction::None && self.direction != direction {
            return Err(self.invalid_match(
                passenger,
                format!("car is going {:?}, passenger is going {:?}", self.direction, direction),
            ));
        }
        Ok(())
    }

    fn invalid_match(&self, passenger: &Passenger, reason: String) -> SimError {
        SimError::InvalidMatch {
            car: self.id,
            passenger: passenger.id(),
            reason,
        }
    }

    /// Board a passenger waiting at the car's floor
    ///
    /// The car takes the passenger's direction and (re)opens its doors.
    pub fn pick_up(&mut self, passenger: Passenger, now: SimTime) -> Result<(), SimError> {
        self.check_pickup(&passenger)?;

        self.direction = passenger.direction();
        self.stops.remove(&self.floor);
        self.stops.insert(passenger.destination_floor());
        self.state = CarState::Stopped;
        self.timer = self.stop_time;
        self.boarded.push(BoardedPassenger {
            passenger,
            boarded_at: now,
        });
        Ok(())
    }

    /// Advance the car by one tick
    pub fn update(&mut self, ctx: &mut TickContext) -> Result<(), SimError> {
        match self.state {
            CarState::Idle => {
                if let Some(target) = self.next_stop() {
                    self.depart_towards(target, ctx);
                }
            }
            CarState::Moving => {
                self.timer = self.timer.saturating_sub(SimClock::countdown(ctx.duration));
                while self.timer <= 0 {
                    let Some(target) = self.next_stop() else {
                        self.become_idle();
                        break;
                    };
                    if target == self.floor {
                        self.arrive(ctx);
                        break;
                    }

                    self.direction = Direction::between(self.floor, target);
                    self.floor = match self.direction {
                        Direction::Up => self.floor + 1,
                        _ => self.floor - 1,
                    };

                    if self.stops.contains(&self.floor) {
                        self.arrive(ctx);
                        break;
                    }
                    self.timer += self.floor_travel_time;
                }
            }
            CarState::Stopped => {
                self.timer = self.timer.saturating_sub(SimClock::countdown(ctx.duration));
                if self.timer <= 0 {
                    match self.next_stop() {
                        Some(target) => self.depart_towards(target, ctx),
                        None => self.become_idle(),
                    }
                }
            }
        }
        Ok(())
    }

    fn depart_towards(&mut self, target: usize, ctx: &mut TickContext) {
        if target == self.floor {
            self.arrive(ctx);
            return;
        }
        self.direction = Direction::between(self.floor, target);
        self.state = CarState::Moving;
        self.timer = self.floor_travel_time;
    }

    fn become_idle(&mut self) {
        self.state = CarState::Idle;
        self.direction = Direction::None;
        self.timer = 0;
    }

    /// Open the doors at the current floor and let passengers out
    fn arrive(&mut self, ctx: &mut TickContext) {
        let floor = self.floor;
        self.state = CarState::Stopped;
        self.timer = self.stop_time;
        self.stops.remove(&floor);

        let (exiting, staying): (Vec<_>, Vec<_>) = self
            .boarded
            .drain(..)
            .partition(|b| b.passenger.destination_floor() == floor);
        self.boarded = staying;

        for boarded in exiting {
            debug!(
                "Elevator {}: passenger #{} exited at floor {}.",
                self.id.0,
                boarded.passenger.id().0,
                floor
            );
            ctx.stats
                .passenger_exited(&boarded.passenger, boarded.boarded_at, ctx.now);
            ctx.control.passenger_exited(self.id, &boarded.passenger);
        }

        self.direction = self
            .next_stop()
            .map(|target| Direction::between(floor, target))
            .unwrap_or(Direction::None);
    }

    /// Put the car back at its start floor, empty and idle
    pub fn reset(&mut self) {
        self.floor = self.start_floor;
        self.direction = Direction::None;
        self.state = CarState::Idle;
        self.boarded.clear();
        self.stops.clear();
        self.timer = 0;
    }
}

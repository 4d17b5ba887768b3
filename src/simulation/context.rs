//! Per-tick context handed down to floors and cars
//!
//! Floors and cars never hold on to the control system, the statistics
//! sink or the RNG. The simulator lends them through this context for the
//! duration of one tick.

use rand::rngs::StdRng;

use super::control_system::ControlSystem;
use super::stats::StatsSink;
use super::types::{PassengerId, SimTime};

pub struct TickContext<'a> {
    /// Simulated time at the start of the tick
    pub now: SimTime,
    /// Length of the tick
    pub duration: SimTime,
    /// Whether the horizon still allows new arrivals
    pub arrivals_open: bool,
    pub rng: &'a mut StdRng,
    pub next_passenger_id: &'a mut u64,
    pub control: &'a mut ControlSystem,
    pub stats: &'a mut dyn StatsSink,
}

impl TickContext<'_> {
    /// Hand out the next passenger id
    pub fn next_passenger_id(&mut self) -> PassengerId {
        let id = PassengerId(*self.next_passenger_id);
        *self.next_passenger_id += 1;
        id
    }
}

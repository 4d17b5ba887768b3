//! Inter-arrival time models for floors

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::clock::SimClock;
use super::types::SimTime;

/// How the time until a floor's next arrival is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArrivalModel {
    /// Every arrival comes exactly `average_arrival_rate` minutes after the last
    #[default]
    Fixed,
    /// Exponentially distributed gaps with mean `average_arrival_rate` minutes
    Exponential,
}

impl ArrivalModel {
    /// Time until the next arrival for a floor with the given mean gap in minutes
    pub fn next_interval<R: Rng + ?Sized>(&self, mean_minutes: f64, rng: &mut R) -> SimTime {
        match self {
            ArrivalModel::Fixed => SimClock::minutes_to_time(mean_minutes),
            ArrivalModel::Exponential => {
                let u: f64 = rng.random();
                SimClock::minutes_to_time(-(1.0 - u).ln() * mean_minutes)
            }
        }
    }
}

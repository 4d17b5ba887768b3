//! Scenarios and simulator settings
//!
//! A scenario describes the building (floors, residents, arrival rates) and
//! its elevator cars. Settings describe how the run is stepped. Both are
//! validated before any tick runs.

use serde::{Deserialize, Serialize};

use super::arrival::ArrivalModel;
use super::building::Building;
use super::car::Car;
use super::clock::SimClock;
use super::error::SimError;
use super::floor::Floor;
use super::types::CarId;

/// Default number of passengers a car can hold
pub const DEFAULT_CAR_CAPACITY: usize = 8;
/// Default seconds needed to travel one floor
pub const DEFAULT_FLOOR_TRAVEL_TIME: f64 = 1.5;
/// Default seconds the doors stay open at a stop
pub const DEFAULT_STOP_TIME: f64 = 5.0;

/// Configuration of one floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorConfig {
    pub residents: u32,
    /// Minutes between arrivals; zero disables arrivals on the floor
    pub arrival_rate: f64,
}

/// Configuration shared by every elevator car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarConfiguration {
    pub count: usize,
    pub capacity: usize,
    /// Seconds per floor
    pub floor_travel_time: f64,
    /// Seconds the doors stay open
    pub stop_time: f64,
    pub start_floor: usize,
}

impl CarConfiguration {
    pub fn new(count: usize, capacity: usize) -> Self {
        Self {
            count,
            capacity,
            ..Self::default()
        }
    }
}

impl Default for CarConfiguration {
    fn default() -> Self {
        Self {
            count: 1,
            capacity: DEFAULT_CAR_CAPACITY,
            floor_travel_time: DEFAULT_FLOOR_TRAVEL_TIME,
            stop_time: DEFAULT_STOP_TIME,
            start_floor: 0,
        }
    }
}

/// A building and its traffic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub floors: Vec<FloorConfig>,
    pub cars: CarConfiguration,
    #[serde(default)]
    pub arrival_model: ArrivalModel,
}

impl Scenario {
    pub fn new(name: impl Into<String>, floors: Vec<FloorConfig>, cars: CarConfiguration) -> Self {
        Self {
            name: name.into(),
            floors,
            cars,
            arrival_model: ArrivalModel::Fixed,
        }
    }

    /// Every floor gets the same arrival rate
    pub fn uniform(
        name: impl Into<String>,
        num_floors: usize,
        arrival_rate: f64,
        cars: CarConfiguration,
    ) -> Self {
        let floors = (0..num_floors)
            .map(|_| FloorConfig {
                residents: 0,
                arrival_rate,
            })
            .collect();
        Self::new(name, floors, cars)
    }

    /// Derive each floor's arrival rate from its residents
    ///
    /// `trips_per_resident_per_hour` residents' trips are spread evenly over
    /// the hour. Floors without residents generate no arrivals.
    pub fn from_residents(
        name: impl Into<String>,
        residents: &[u32],
        trips_per_resident_per_hour: f64,
        cars: CarConfiguration,
    ) -> Self {
        let floors = residents
            .iter()
            .map(|&residents| {
                let trips_per_minute = residents as f64 * trips_per_resident_per_hour / 60.0;
                FloorConfig {
                    residents,
                    arrival_rate: if trips_per_minute > 0.0 {
                        1.0 / trips_per_minute
                    } else {
                        0.0
                    },
                }
            })
            .collect();
        Self::new(name, floors, cars)
    }

    /// The 16-floor residential building used for strategy comparisons
    pub fn testing() -> Self {
        let residents = [0, 70, 70, 75, 85, 75, 80, 90, 90, 85, 75, 80, 75, 90, 70, 70];
        let cars = CarConfiguration::new(3, DEFAULT_CAR_CAPACITY);
        Self::from_residents("Testing", &residents, 0.06, cars)
    }

    pub fn with_arrival_model(mut self, arrival_model: ArrivalModel) -> Self {
        self.arrival_model = arrival_model;
        self
    }

    pub fn validate(&self) -> Result<(), SimError> {
        let malformed = |reason: String| Err(SimError::MalformedScenario(reason));

        if self.floors.len() < 2 {
            return malformed(format!(
                "a building needs at least two floors, got {}",
                self.floors.len()
            ));
        }
        if let Some((number, floor)) = self
            .floors
            .iter()
            .enumerate()
            .find(|(_, f)| !f.arrival_rate.is_finite() || f.arrival_rate < 0.0)
        {
            return malformed(format!(
                "floor {} has an invalid arrival rate {}",
                number, floor.arrival_rate
            ));
        }
        if self.cars.count == 0 {
            return malformed("a building needs at least one elevator car".to_string());
        }
        if self.cars.capacity == 0 {
            return malformed("car capacity must be positive".to_string());
        }
        if !(self.cars.floor_travel_time.is_finite() && self.cars.floor_travel_time > 0.0) {
            return malformed(format!(
                "floor travel time must be positive, got {}",
                self.cars.floor_travel_time
            ));
        }
        if !(self.cars.stop_time.is_finite() && self.cars.stop_time > 0.0) {
            return malformed(format!(
                "stop time must be positive, got {}",
                self.cars.stop_time
            ));
        }
        if self.cars.start_floor >= self.floors.len() {
            return malformed(format!(
                "cars start at floor {} but the building has {} floors",
                self.cars.start_floor,
                self.floors.len()
            ));
        }
        Ok(())
    }

    /// Build a fresh building for this scenario
    pub fn create_building(&self) -> Result<Building, SimError> {
        self.validate()?;

        let floors = self
            .floors
            .iter()
            .enumerate()
            .map(|(number, config)| {
                Floor::new(number, config.residents, config.arrival_rate, self.arrival_model)
            })
            .collect();
        let cars = (0..self.cars.count)
            .map(|id| Car::new(CarId(id), &self.cars))
            .collect();

        Building::new(floors, cars)
    }
}

/// How a run is stepped
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulatorSettings {
    /// Seconds per tick
    pub time_step: f64,
    /// Seconds during which new passengers arrive
    pub simulation_horizon: f64,
}

impl SimulatorSettings {
    pub fn new(time_step: f64, simulation_horizon: f64) -> Self {
        Self {
            time_step,
            simulation_horizon,
        }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(SimError::MalformedScenario(format!(
                "time step must be positive, got {}",
                self.time_step
            )));
        }
        // The clock would never move
        if SimClock::seconds_to_time(self.time_step) == 0 {
            return Err(SimError::MalformedScenario(format!(
                "time step {} is below the clock resolution",
                self.time_step
            )));
        }
        if !(self.simulation_horizon.is_finite() && self.simulation_horizon >= 0.0) {
            return Err(SimError::MalformedScenario(format!(
                "simulation horizon must be non-negative, got {}",
                self.simulation_horizon
            )));
        }
        Ok(())
    }
}

//! The building: floors and elevator cars

use super::car::Car;
use super::context::TickContext;
use super::error::SimError;
use super::floor::Floor;
use super::types::CarId;

/// Owns the floors (indexed by floor number) and the cars (indexed by car id)
#[derive(Debug, Clone)]
pub struct Building {
    floors: Vec<Floor>,
    cars: Vec<Car>,
}

impl Building {
    pub fn new(floors: Vec<Floor>, cars: Vec<Car>) -> Result<Self, SimError> {
        if floors.is_empty() {
            return Err(SimError::MalformedScenario(
                "a building needs at least one floor".to_string(),
            ));
        }
        if cars.is_empty() {
            return Err(SimError::MalformedScenario(
                "a building needs at least one elevator car".to_string(),
            ));
        }
        if let Some((index, floor)) = floors
            .iter()
            .enumerate()
            .find(|(index, floor)| floor.number() != *index)
        {
            return Err(SimError::MalformedScenario(format!(
                "floor number {} does not match its index {}",
                floor.number(),
                index
            )));
        }
        if let Some((index, car)) = cars
            .iter()
            .enumerate()
            .find(|(index, car)| car.id() != CarId(*index))
        {
            return Err(SimError::MalformedScenario(format!(
                "car id {} does not match its index {}",
                car.id().0,
                index
            )));
        }

        Ok(Self { floors, cars })
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn num_floors(&self) -> usize {
        self.floors.len()
    }

    pub fn floor(&self, number: usize) -> Option<&Floor> {
        self.floors.get(number)
    }

    pub fn car(&self, id: CarId) -> Option<&Car> {
        self.cars.get(id.0)
    }

    pub fn car_mut(&mut self, id: CarId) -> Option<&mut Car> {
        self.cars.get_mut(id.0)
    }

    /// Update every floor, then every car
    pub fn update(&mut self, ctx: &mut TickContext) -> Result<(), SimError> {
        let num_floors = self.floors.len();
        for floor in &mut self.floors {
            floor.update(&mut self.cars, num_floors, ctx)?;
        }

        for car in &mut self.cars {
            car.update(ctx)?;
        }
        Ok(())
    }

    /// Total number of passengers waiting on all floors
    pub fn waiting_passengers(&self) -> usize {
        self.floors.iter().map(|f| f.waiting_queue().len()).sum()
    }

    /// Total number of passengers riding in all cars
    pub fn riding_passengers(&self) -> usize {
        self.cars.iter().map(|c| c.passengers().len()).sum()
    }

    pub fn floors_empty(&self) -> bool {
        self.floors.iter().all(|f| f.waiting_queue().is_empty())
    }

    pub fn cars_empty(&self) -> bool {
        self.cars.iter().all(|c| c.is_empty())
    }

    /// No passenger is waiting or riding anywhere
    pub fn is_drained(&self) -> bool {
        self.floors_empty() && self.cars_empty()
    }

    pub fn reset(&mut self) {
        for floor in &mut self.floors {
            floor.reset();
        }
        for car in &mut self.cars {
            car.reset();
        }
    }
}

//! Floor behaviour: arrival generation and direct pickup matching

use rand::rngs::StdRng;
use rand::SeedableRng;

use elevator_sim::simulation::{
    ArrivalModel, Car, CarConfiguration, CarId, CarState, ControlSystem, Direction, Floor,
    Passenger, PassengerId, Scenario, SimClock, SimError, SimTime, SimulatorStats, TickContext,
    NANOSECONDS_PER_SECOND,
};

mod common;

use common::NoDispatch;

struct Harness {
    rng: StdRng,
    next_passenger_id: u64,
    control: ControlSystem,
    stats: SimulatorStats,
}

impl Harness {
    fn new(num_floors: usize) -> Self {
        Self {
            rng: StdRng::seed_from_u64(1337),
            next_passenger_id: 0,
            control: ControlSystem::new(Box::new(NoDispatch)),
            stats: SimulatorStats::new(num_floors),
        }
    }

    fn ctx(&mut self, now: SimTime, duration: SimTime, arrivals_open: bool) -> TickContext<'_> {
        TickContext {
            now,
            duration,
            arrivals_open,
            rng: &mut self.rng,
            next_passenger_id: &mut self.next_passenger_id,
            control: &mut self.control,
            stats: &mut self.stats,
        }
    }
}

fn secs(seconds: u64) -> SimTime {
    seconds * NANOSECONDS_PER_SECOND
}

fn car_at(id: usize, floor: usize, capacity: usize) -> Car {
    let config = CarConfiguration {
        count: 1,
        capacity,
        floor_travel_time: 1.5,
        stop_time: 5.0,
        start_floor: floor,
    };
    Car::new(CarId(id), &config)
}

/// Run `floor.update` once per step from time zero up to and including `until`
fn run_floor(
    floor: &mut Floor,
    cars: &mut [Car],
    num_floors: usize,
    harness: &mut Harness,
    step: SimTime,
    until: SimTime,
) {
    let mut now = 0;
    while now <= until {
        let mut ctx = harness.ctx(now, step, true);
        floor
            .update(cars, num_floors, &mut ctx)
            .expect("floor update failed");
        now += step;
    }
}

#[test]
fn test_arrivals_are_periodic() {
    let mut harness = Harness::new(2);
    let mut floor = Floor::new(0, 10, 1.0, ArrivalModel::Fixed);
    // The only car sits on the other floor, so nobody is picked up
    let mut cars = vec![car_at(0, 1, 4)];

    run_floor(&mut floor, &mut cars, 2, &mut harness, secs(10), secs(300));

    let created: Vec<SimTime> = harness.stats.arrivals().iter().map(|a| a.created_at).collect();
    assert_eq!(
        created,
        vec![secs(60), secs(120), secs(180), secs(240), secs(300)]
    );
    assert_eq!(floor.waiting_queue().len(), 5);
    assert_eq!(harness.control.hall_calls().len(), 5);
}

#[test]
fn test_first_activation_only_arms_the_timer() {
    let mut harness = Harness::new(2);
    let mut floor = Floor::new(0, 10, 1.0, ArrivalModel::Fixed);

    let mut ctx = harness.ctx(0, secs(120), true);
    assert!(!floor.try_generate_new_arrival(2, &mut ctx));
    let mut ctx = harness.ctx(secs(120), secs(120), true);
    assert!(floor.try_generate_new_arrival(2, &mut ctx));
}

#[test]
fn test_destination_is_never_the_origin() {
    let mut harness = Harness::new(5);
    let mut floor = Floor::new(2, 10, 1.0, ArrivalModel::Fixed);
    let mut cars = vec![car_at(0, 0, 4)];

    run_floor(&mut floor, &mut cars, 5, &mut harness, secs(60), secs(60 * 200));

    let arrivals = harness.stats.arrivals();
    assert_eq!(arrivals.len(), 200);
    for arrival in arrivals {
        assert_eq!(arrival.origin_floor, 2);
        assert_ne!(arrival.destination_floor, 2);
        assert!(arrival.destination_floor < 5);
    }
    for passenger in floor.waiting_queue() {
        assert_eq!(passenger.origin_floor(), floor.number());
    }
}

#[test]
fn test_no_arrivals_when_horizon_closed() {
    let mut harness = Harness::new(2);
    let mut floor = Floor::new(0, 10, 1.0, ArrivalModel::Fixed);
    let mut cars = vec![car_at(0, 1, 4)];

    for tick in 0..20 {
        let mut ctx = harness.ctx(secs(60 * tick), secs(60), false);
        floor.update(&mut cars, 2, &mut ctx).unwrap();
    }
    assert!(floor.waiting_queue().is_empty());
    assert_eq!(harness.stats.passengers_generated(), 0);
}

#[test]
fn test_floor_without_rate_generates_nothing() {
    let mut harness = Harness::new(2);
    let mut floor = Floor::new(0, 0, 0.0, ArrivalModel::Fixed);
    let mut cars = vec![car_at(0, 1, 4)];

    run_floor(&mut floor, &mut cars, 2, &mut harness, secs(60), secs(600));
    assert!(!floor.generates_arrivals());
    assert!(floor.waiting_queue().is_empty());
}

#[test]
fn test_idle_car_at_floor_picks_up_on_next_tick() {
    let mut harness = Harness::new(2);
    let mut floor = Floor::new(0, 10, 1.0, ArrivalModel::Fixed);
    let mut cars = vec![car_at(0, 0, 4)];

    // Arm at 0s, generate at 60s
    run_floor(&mut floor, &mut cars, 2, &mut harness, secs(60), secs(60));
    assert_eq!(floor.waiting_queue().len(), 1);
    assert!(cars[0].is_empty());

    let mut ctx = harness.ctx(secs(120), secs(60), true);
    floor.update(&mut cars, 2, &mut ctx).unwrap();

    // The first passenger boarded, a second one just arrived
    let boarded: Vec<PassengerId> = cars[0].passengers().iter().map(|b| b.passenger.id()).collect();
    assert_eq!(boarded, vec![PassengerId(0)]);
    assert_eq!(cars[0].direction(), Direction::Up);
    assert_eq!(cars[0].state(), CarState::Stopped);
    assert!(cars[0].has_stop(1));
    assert_eq!(floor.waiting_queue().len(), 1);
    assert_eq!(floor.waiting_queue()[0].id(), PassengerId(1));

    let calls: Vec<PassengerId> = harness
        .control
        .hall_calls()
        .iter()
        .map(|c| c.passenger)
        .collect();
    assert_eq!(calls, vec![PassengerId(1)]);
}

#[test]
fn test_first_fit_in_building_order() {
    let mut harness = Harness::new(2);
    let mut floor = Floor::new(0, 10, 1.0, ArrivalModel::Fixed);
    let mut cars = vec![car_at(0, 1, 4), car_at(1, 0, 4), car_at(2, 0, 4)];

    run_floor(&mut floor, &mut cars, 2, &mut harness, secs(60), secs(120));

    assert!(cars[0].is_empty());
    assert_eq!(cars[1].passengers().len(), 1);
    assert!(cars[2].is_empty());
}

#[test]
fn test_full_car_leaves_passenger_waiting() {
    let mut harness = Harness::new(2);
    let mut floor = Floor::new(0, 10, 1.0, ArrivalModel::Fixed);
    let mut cars = vec![car_at(0, 0, 1)];

    run_floor(&mut floor, &mut cars, 2, &mut harness, secs(60), secs(60 * 5));

    assert_eq!(cars[0].passengers().len(), 1);
    assert_eq!(floor.waiting_queue().len(), 4);
    assert_eq!(harness.control.hall_calls().len(), 4);
}

#[test]
fn test_moving_car_is_not_matched() {
    let mut harness = Harness::new(3);
    let mut floor = Floor::new(0, 10, 1.0, ArrivalModel::Fixed);
    let mut cars = vec![car_at(0, 0, 4)];
    cars[0].request_stop(2);

    // Let the car leave the floor
    let mut ctx = harness.ctx(0, secs(1), true);
    cars[0].update(&mut ctx).unwrap();
    assert_eq!(cars[0].state(), CarState::Moving);
    assert_eq!(cars[0].floor(), 0);

    run_floor(&mut floor, &mut cars, 3, &mut harness, secs(60), secs(180));
    assert!(cars[0].is_empty());
    assert_eq!(floor.waiting_queue().len(), 3);
}

#[test]
fn test_direction_must_match_stopped_car() {
    let mut harness = Harness::new(3);
    let mut floor = Floor::new(1, 10, 1.0, ArrivalModel::Fixed);
    let mut cars = vec![car_at(0, 1, 100)];

    // The car is already heading up with someone inside
    cars[0]
        .pick_up(Passenger::new(PassengerId(1000), 1, 2, 0), 0)
        .unwrap();
    assert_eq!(cars[0].direction(), Direction::Up);

    run_floor(&mut floor, &mut cars, 3, &mut harness, secs(60), secs(60 * 30));

    let boarded = &cars[0].passengers()[1..];
    assert!(!boarded.is_empty());
    assert!(!floor.waiting_queue().is_empty());
    for b in boarded {
        assert_eq!(b.passenger.direction(), Direction::Up);
    }
    // The newest passenger may not have had a matching pass yet
    let last = floor.waiting_queue().len() - 1;
    for passenger in floor.waiting_queue().iter().take(last) {
        assert_eq!(passenger.direction(), Direction::Down);
    }
    assert_eq!(
        boarded.len() + floor.waiting_queue().len(),
        harness.stats.passengers_generated()
    );
}

#[test]
fn test_exponential_model_has_the_requested_mean() {
    let mut rng = StdRng::seed_from_u64(7);
    let samples = 20_000;
    let total: f64 = (0..samples)
        .map(|_| SimClock::time_to_seconds(ArrivalModel::Exponential.next_interval(2.0, &mut rng)))
        .sum();
    let mean_minutes = total / samples as f64 / 60.0;
    assert!((mean_minutes - 2.0).abs() < 0.1, "mean was {}", mean_minutes);

    assert_eq!(
        ArrivalModel::Fixed.next_interval(2.0, &mut rng),
        SimClock::minutes_to_time(2.0)
    );
}

#[test]
fn test_unknown_hall_call_is_an_error() {
    let mut control = ControlSystem::new(Box::new(NoDispatch));
    let passenger = Passenger::new(PassengerId(3), 0, 1, 0);
    control.handle_hall_call(&passenger, 0);

    assert!(control.hall_call_handled(PassengerId(3)).is_ok());
    assert!(matches!(
        control.hall_call_handled(PassengerId(3)),
        Err(SimError::UnknownHallCall(PassengerId(3)))
    ));
}

#[test]
fn test_very_long_interval_never_fires() {
    let mut harness = Harness::new(2);
    // Longer than an i64 worth of nanoseconds
    let mut floor = Floor::new(0, 0, 2.0e8, ArrivalModel::Fixed);
    let mut cars = vec![car_at(0, 1, 4)];

    run_floor(&mut floor, &mut cars, 2, &mut harness, secs(1), secs(60));
    assert_eq!(harness.stats.passengers_generated(), 0);
    assert!(floor.waiting_queue().is_empty());
}

#[test]
fn test_floors_built_from_residents() {
    let building = Scenario::testing().create_building().unwrap();
    let lobby = &building.floors()[0];
    assert_eq!(lobby.num_residents(), 0);
    assert_eq!(lobby.average_arrival_rate(), 0.0);
    assert!(!lobby.generates_arrivals());

    // 85 residents making 0.06 trips an hour
    let fourth = &building.floors()[4];
    assert_eq!(fourth.num_residents(), 85);
    let expected = 60.0 / (85.0 * 0.06);
    assert!((fourth.average_arrival_rate() - expected).abs() < 1e-9);
    assert!(fourth.generates_arrivals());
}

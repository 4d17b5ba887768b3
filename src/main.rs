use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use elevator_sim::simulation::{
    available_schedulers, ArrivalModel, CarConfiguration, NamedScheduler, Scenario, Simulator,
    SimulatorSettings, DEFAULT_FLOOR_TRAVEL_TIME, DEFAULT_STOP_TIME,
};

#[derive(Parser)]
#[command(name = "elevator_sim")]
#[command(about = "Discrete-event simulator for elevator group dispatch strategies")]
struct Cli {
    /// Scheduling algorithm to use
    #[arg(long, default_value = "longest_queue_first")]
    scheduler: String,

    /// List the available scheduling algorithms and exit
    #[arg(long)]
    list_schedulers: bool,

    /// Run the 16-floor, 3-car residential scenario
    #[arg(long)]
    testing: bool,

    /// Number of floors
    #[arg(long, default_value = "10")]
    floors: usize,

    /// Minutes between passenger arrivals on every floor
    #[arg(long, default_value = "1.0")]
    arrival_interval: f64,

    /// Residents per floor; derives the arrival interval instead of --arrival-interval
    #[arg(long)]
    residents: Option<u32>,

    /// Trips each resident makes per hour, used with --residents
    #[arg(long, default_value = "0.06")]
    trips_per_hour: f64,

    /// Use exponentially distributed arrival gaps instead of a fixed period
    #[arg(long)]
    exponential_arrivals: bool,

    /// Number of elevator cars
    #[arg(long, default_value = "2")]
    cars: usize,

    /// Passengers per car
    #[arg(long, default_value = "8")]
    capacity: usize,

    /// Seconds needed to travel one floor
    #[arg(long, default_value_t = DEFAULT_FLOOR_TRAVEL_TIME)]
    floor_travel_time: f64,

    /// Seconds the doors stay open at a stop
    #[arg(long, default_value_t = DEFAULT_STOP_TIME)]
    stop_time: f64,

    /// Time delta per tick in seconds
    #[arg(long, default_value = "0.01")]
    time_step: f64,

    /// Seconds of simulated time during which passengers arrive
    #[arg(long, default_value = "3600")]
    horizon: f64,

    /// Random seed; a random one is used when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Directory to export the statistics to as JSON
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.list_schedulers {
        for name in available_schedulers() {
            println!("{}", name);
        }
        return Ok(());
    }

    let scenario = build_scenario(&cli);
    let settings = SimulatorSettings::new(cli.time_step, cli.horizon);

    let mut simulator = Simulator::new(
        &scenario,
        settings,
        &NamedScheduler(cli.scheduler.clone()),
        cli.seed,
    )
    .context("Failed to set up the simulation")?;

    if let Some(dir) = cli.export_dir {
        simulator = simulator.with_export_dir(dir);
    }

    println!("Seed: {}", simulator.seed());
    simulator.run().context("Simulation aborted")?;
    Ok(())
}

fn build_scenario(cli: &Cli) -> Scenario {
    let arrival_model = if cli.exponential_arrivals {
        ArrivalModel::Exponential
    } else {
        ArrivalModel::Fixed
    };

    if cli.testing {
        return Scenario::testing().with_arrival_model(arrival_model);
    }

    let cars = CarConfiguration {
        count: cli.cars,
        capacity: cli.capacity,
        floor_travel_time: cli.floor_travel_time,
        stop_time: cli.stop_time,
        start_floor: 0,
    };
    let scenario = match cli.residents {
        Some(residents) => Scenario::from_residents(
            "Residential",
            &vec![residents; cli.floors],
            cli.trips_per_hour,
            cars,
        ),
        None => Scenario::uniform("Uniform", cli.floors, cli.arrival_interval, cars),
    };
    scenario.with_arrival_model(arrival_model)
}

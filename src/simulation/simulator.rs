//! Main simulator that ties everything together
//!
//! Owns the clock, the building, the control system, the statistics and the
//! RNG, and drives them either in batch (`run`) or one tick at a time
//! (`start` / `advance` / `reset`).

use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

use super::building::Building;
use super::clock::SimClock;
use super::context::TickContext;
use super::control_system::ControlSystem;
use super::error::SimError;
use super::scenario::{Scenario, SimulatorSettings};
use super::scheduling::SchedulerCreator;
use super::stats::{SimulatorStats, StatsReport, StatsSink};
use super::types::SimTime;

/// How `reset` reseeds the random generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReseedPolicy {
    /// Reuse the seed the simulator was created with; the next run repeats the last one
    ReuseSeed,
    /// Draw a new non-deterministic seed
    Fresh,
    /// Use the given seed
    Explicit(u64),
}

/// The elevator simulator
pub struct Simulator {
    scenario_name: String,
    settings: SimulatorSettings,
    clock: SimClock,
    seed: u64,
    rng: StdRng,
    stats: SimulatorStats,
    building: Building,
    control_system: ControlSystem,
    next_passenger_id: u64,
    /// Armed by `start`, cleared when the run drains or a tick fails
    running: bool,
    /// Where `run` exports statistics, if anywhere
    export_dir: Option<PathBuf>,
}

impl Simulator {
    /// Create a simulator for a scenario
    ///
    /// Without a seed a non-deterministic one is drawn; `seed()` reports it.
    pub fn new(
        scenario: &Scenario,
        settings: SimulatorSettings,
        scheduler_creator: &dyn SchedulerCreator,
        seed: Option<u64>,
    ) -> Result<Self, SimError> {
        settings.validate()?;
        let building = scenario.create_building()?;
        let scheduler = scheduler_creator.create_scheduler(&building)?;
        let seed = seed.unwrap_or_else(|| rand::rng().random());

        Ok(Self {
            scenario_name: scenario.name.clone(),
            settings,
            clock: SimClock::new(settings.time_step),
            seed,
            rng: StdRng::seed_from_u64(seed),
            stats: SimulatorStats::new(building.num_floors()),
            building,
            control_system: ControlSystem::new(scheduler),
            next_passenger_id: 0,
            running: false,
            export_dir: None,
        })
    }

    /// Export statistics to this directory at the end of `run`
    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = Some(dir.into());
        self
    }

    /// `<scenario>-<scheduler>`
    pub fn simulation_name(&self) -> String {
        format!(
            "{}-{}",
            self.scenario_name,
            self.control_system.scheduler_name()
        )
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn stats(&self) -> &SimulatorStats {
        &self.stats
    }

    pub fn building(&self) -> &Building {
        &self.building
    }

    pub fn control_system(&self) -> &ControlSystem {
        &self.control_system
    }

    pub fn settings(&self) -> &SimulatorSettings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// New passengers are only generated before the horizon
    pub fn can_generate_arrivals(&self) -> bool {
        self.clock.simulated_time() < SimClock::seconds_to_time(self.settings.simulation_horizon)
    }

    /// The horizon has passed and nobody is waiting or riding
    pub fn is_finished(&self) -> bool {
        !self.can_generate_arrivals() && self.building.is_drained()
    }

    /// Move the simulation forward one time step
    ///
    /// Floors and cars first, then the control system, then statistics. An
    /// error leaves the tick incomplete and the run must not continue.
    pub fn move_forward(&mut self, duration: SimTime) -> Result<(), SimError> {
        let now = self.clock.simulated_time();
        let arrivals_open = self.can_generate_arrivals();

        let mut ctx = TickContext {
            now,
            duration,
            arrivals_open,
            rng: &mut self.rng,
            next_passenger_id: &mut self.next_passenger_id,
            control: &mut self.control_system,
            stats: &mut self.stats,
        };
        self.building.update(&mut ctx)?;

        self.control_system
            .update(&mut self.building, duration, now)?;
        self.stats.update(&self.building, now);
        Ok(())
    }

    /// One tick followed by a clock step
    fn tick(&mut self) -> Result<(), SimError> {
        let duration = self.clock.time_step();
        if let Err(e) = self.move_forward(duration) {
            warn!(
                "Tick at {} failed, aborting the run: {}",
                self.clock.formatted_now(),
                e
            );
            self.running = false;
            return Err(e);
        }
        self.clock.step();
        Ok(())
    }

    /// Run the simulation until the horizon has passed and the building has drained
    pub fn run(&mut self) -> Result<StatsReport, SimError> {
        println!("Simulation started: {}", self.simulation_name());
        info!(
            "Running {} with seed {}, step {}s, horizon {}s",
            self.simulation_name(),
            self.seed,
            self.settings.time_step,
            self.settings.simulation_horizon
        );

        loop {
            self.tick()?;
            if self.is_finished() {
                break;
            }
        }

        self.stats.done(self.clock.simulated_time());

        println!("Simulation finished: {}", self.simulation_name());
        println!(
            "--------------------{}--------------------",
            self.control_system.scheduler_name()
        );
        self.print_stats()?;
        Ok(self.stats.report())
    }

    /// Arm the simulator for stepwise driving
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Advance one step
    ///
    /// Returns true if there are more steps. Does nothing and returns false
    /// when the simulator has not been started.
    pub fn advance(&mut self) -> Result<bool, SimError> {
        if !self.running {
            return Ok(false);
        }

        self.tick()?;

        if self.is_finished() {
            self.stats.done(self.clock.simulated_time());
            self.running = false;
            return Ok(false);
        }
        Ok(true)
    }

    /// Restore the building, clock, control system and statistics
    pub fn reset(&mut self, reseed: ReseedPolicy) {
        self.control_system.reset();
        self.building.reset();
        self.clock.reset();
        self.stats.reset();
        self.next_passenger_id = 0;
        self.running = false;

        match reseed {
            ReseedPolicy::ReuseSeed => {}
            ReseedPolicy::Fresh => self.seed = rand::rng().random(),
            ReseedPolicy::Explicit(seed) => self.seed = seed,
        }
        self.rng = StdRng::seed_from_u64(self.seed);
    }

    /// Print the statistics and export them if an export directory is set
    pub fn print_stats(&self) -> Result<(), SimError> {
        self.stats.print_stats();

        if let Some(dir) = &self.export_dir {
            let path = self.stats.export_stats(dir, &self.simulation_name())?;
            info!("Exported statistics to {}", path.display());
        }
        Ok(())
    }
}

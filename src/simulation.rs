//! Two-run micromouse trial.
//!
//! The driver owns the true pose of the mouse, turns the maze into sensor
//! readings, applies the planner's instructions and enforces the reset rule:
//! a reset is only honoured during the training run, and only once the goal
//! has been entered. The score is the final run's tick count plus a small
//! fraction of the training run's.

use crate::constants::*;
use crate::heading::*;
use crate::instruction::*;
use crate::location::*;
use crate::maze::MazeSource;
use crate::planner::*;
use crate::wall_map::WallReadings;
use log::*;
use serde::{Deserialize, Serialize};

/// Sensor readings the mouse gets at `location` facing `heading`: distances
/// to the nearest wall on its left, ahead and on its right.
pub fn sense(maze: &dyn MazeSource, location: Location, heading: Heading) -> WallReadings {
    let sensors = [heading.left(), heading, heading.right()]
        .map(|direction| maze.dist_to_wall(location, direction) as i32);
    WallReadings::from_sensors(sensors, heading)
}

/// Tick budget for a simulation.
pub struct TickBudget {
    /// Returns true while the simulation may use the given tick.
    should_continue: Box<dyn Fn(u32) -> bool>,
}

impl TickBudget {
    pub fn new<F: Fn(u32) -> bool + 'static>(should_continue: F) -> Self {
        TickBudget {
            should_continue: Box::new(should_continue),
        }
    }

    pub fn limited(max_ticks: u32) -> Self {
        TickBudget::new(move |tick| tick <= max_ticks)
    }

    /// Unlimited budget (for tests on mazes known to be solvable).
    pub fn unlimited() -> Self {
        TickBudget::new(|_| true)
    }

    pub fn has_budget(&self, tick: u32) -> bool {
        (self.should_continue)(tick)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub max_ticks: u32,
    pub training_score_multiplier: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            max_ticks: DEFAULT_MAX_TICKS,
            training_score_multiplier: DEFAULT_TRAINING_SCORE_MULTIPLIER,
        }
    }
}

/// Where the trial is in its two runs.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum RunState {
    /// First run: exploring, may reset once the goal has been entered.
    Training { hit_goal: bool },
    /// Second run: racing to the goal, no further resets.
    Final,
    Finished,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ResetOutcome {
    Accepted,
    GoalNotReached,
    AfterFirstRun,
}

impl RunState {
    pub fn request_reset(&mut self) -> ResetOutcome {
        match *self {
            RunState::Training { hit_goal: true } => {
                *self = RunState::Final;
                ResetOutcome::Accepted
            }
            RunState::Training { hit_goal: false } => ResetOutcome::GoalNotReached,
            RunState::Final | RunState::Finished => ResetOutcome::AfterFirstRun,
        }
    }

    /// Records entry into a goal cell. Returns true if this completes the
    /// final run.
    pub fn enter_goal(&mut self) -> bool {
        match *self {
            RunState::Training { .. } => {
                *self = RunState::Training { hit_goal: true };
                false
            }
            RunState::Final => {
                *self = RunState::Finished;
                true
            }
            RunState::Finished => false,
        }
    }
}

/// True position and facing of the mouse.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Pose {
    pub location: Location,
    pub heading: Heading,
}

impl Pose {
    pub fn new(location: Location) -> Pose {
        Pose {
            location,
            heading: Heading::NORTH,
        }
    }

    /// Rotates, then moves forward cell by cell until `steps` are used up or
    /// a real wall is in the way. Returns the number of cells travelled.
    pub fn apply(&mut self, maze: &dyn MazeSource, rotation: Rotation, steps: u8) -> u8 {
        self.heading = self.heading.rotate(rotation);
        let mut travelled = 0;
        for _ in 0..steps.min(MAX_MOVEMENT) {
            if !maze.is_open(self.location, self.heading) {
                debug!("Movement stopped by wall at {}", self.location);
                break;
            }
            match self.location.neighbour(self.heading, maze.dim()) {
                Some(next) => self.location = next,
                None => break,
            }
            travelled += 1;
        }
        travelled
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationReport {
    pub planner: String,
    /// Ticks spent in each completed run.
    pub runtimes: Vec<u32>,
    pub total_ticks: u32,
    pub score: Option<f32>,
}

impl SimulationReport {
    pub fn completed(&self) -> bool {
        self.score.is_some()
    }
}

pub struct Simulation<'a> {
    maze: &'a dyn MazeSource,
    config: SimulationConfig,
    start: Location,
    goal: Vec<Location>,
}

impl<'a> Simulation<'a> {
    pub fn new(maze: &'a dyn MazeSource, planner_config: &PlannerConfig) -> Self {
        Simulation {
            maze,
            config: SimulationConfig::default(),
            start: planner_config.start,
            goal: planner_config.goal.clone(),
        }
    }

    pub fn with_config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs both runs with the configured tick budget.
    pub fn run(&self, planner: &mut dyn Planner) -> SimulationReport {
        self.run_with_budget(planner, &TickBudget::limited(self.config.max_ticks))
    }

    pub fn run_with_budget(
        &self,
        planner: &mut dyn Planner,
        budget: &TickBudget,
    ) -> SimulationReport {
        let mut state = RunState::Training { hit_goal: false };
        let mut pose = Pose::new(self.start);
        let mut runtimes: Vec<u32> = Vec::new();
        let mut tick = 0u32;

        info!("Starting {} run 0", planner.name());

        while state != RunState::Finished {
            tick += 1;
            if !budget.has_budget(tick) {
                warn!("{}: allotted time exceeded after {} ticks", planner.name(), tick - 1);
                tick -= 1;
                break;
            }

            let readings = sense(self.maze, pose.location, pose.heading);
            match planner.choose(&readings, pose.heading, pose.location) {
                Instruction::Reset => match state.request_reset() {
                    ResetOutcome::Accepted => {
                        runtimes.push(tick);
                        pose = Pose::new(self.start);
                        info!("Ending first run after {} ticks, starting next run", tick);
                    }
                    rejected => {
                        debug!("{}: reset rejected ({:?})", planner.name(), rejected);
                    }
                },
                Instruction::Move { rotation, steps } => {
                    let travelled = pose.apply(self.maze, rotation, steps);
                    trace!(
                        "{}: rotate {} degrees, move {} of {} to {}",
                        planner.name(),
                        rotation.degrees(),
                        travelled,
                        steps,
                        pose.location
                    );
                    if self.goal.contains(&pose.location) && state.enter_goal() {
                        runtimes.push(tick - runtimes.iter().sum::<u32>());
                        info!("{}: goal found, run 1 completed", planner.name());
                    }
                }
            }
        }

        let score = if runtimes.len() == 2 {
            Some(runtimes[1] as f32 + self.config.training_score_multiplier * runtimes[0] as f32)
        } else {
            None
        };
        if let Some(score) = score {
            info!("{}: task complete, score {:.3}", planner.name(), score);
        }

        SimulationReport {
            planner: planner.name().to_string(),
            runtimes,
            total_ticks: tick,
            score,
        }
    }
}

/// Builds every planner kind from `planner_config` and runs each one through
/// its own trial.
pub fn compare_planners(
    maze: &dyn MazeSource,
    planner_config: &PlannerConfig,
    config: &SimulationConfig,
) -> Vec<SimulationReport> {
    let simulation = Simulation::new(maze, planner_config).with_config(config.clone());
    PlannerKind::ALL
        .iter()
        .map(|kind| {
            let builder = PlannerBuilder::from_config(planner_config.clone());
            let mut planner = builder.build(*kind, maze);
            simulation.run(planner.as_mut())
        })
        .collect()
}

//! Public API for building planners.
//!
//! `PlannerBuilder` provides a fluent, append-only API for configuring a
//! planner. Every planner owns its own wall map; nothing is shared between
//! planner instances or across simulations.

use crate::constants::*;
use crate::heading::*;
use crate::instruction::*;
use crate::location::*;
use crate::maze::MazeSource;
use crate::planners::*;
use crate::wall_map::WallReadings;
use serde::{Deserialize, Serialize};

/// Decides the mouse's next instruction from what it currently senses.
pub trait Planner {
    /// Human-readable name for logging and reports.
    fn name(&self) -> &str;

    /// Called once per simulation tick with the walls sensed at `location`.
    fn choose(&mut self, readings: &WallReadings, heading: Heading, location: Location)
        -> Instruction;
}

/// The available planning strategies.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum PlannerKind {
    WallFollower,
    Waterfall,
    RouteSearch,
    Oracle,
}

impl PlannerKind {
    pub const ALL: [PlannerKind; 4] = [
        PlannerKind::Oracle,
        PlannerKind::WallFollower,
        PlannerKind::Waterfall,
        PlannerKind::RouteSearch,
    ];
}

/// Settings shared by every planner.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub dim: u8,
    pub start: Location,
    pub goal: Vec<Location>,
    /// Exploration laps for the waterfall planner. Derived from the maze
    /// size when unset.
    #[serde(default)]
    pub laps: Option<u32>,
    #[serde(default = "default_max_routes")]
    pub max_routes: usize,
    /// How many times the route search planner may redirect exploration
    /// towards unverified cells before committing anyway. Defaults to the
    /// maze area when unset.
    #[serde(default)]
    pub max_verification_rounds: Option<u32>,
}

fn default_max_routes() -> usize {
    DEFAULT_MAX_ROUTES
}

impl PlannerConfig {
    pub fn new(dim: u8) -> Self {
        PlannerConfig {
            dim,
            start: Location::from_coords(0, 0),
            goal: centre_goal(dim),
            laps: None,
            max_routes: DEFAULT_MAX_ROUTES,
            max_verification_rounds: None,
        }
    }

    pub fn laps(&self) -> u32 {
        self.laps
            .unwrap_or_else(|| (self.dim.saturating_sub(LAP_OFFSET) as u32).max(1))
    }

    pub fn max_verification_rounds(&self) -> u32 {
        self.max_verification_rounds
            .unwrap_or((self.dim as u32) * (self.dim as u32))
    }

    pub fn is_goal(&self, location: Location) -> bool {
        self.goal.contains(&location)
    }
}

/// Append-only builder for configuring a planner.
pub struct PlannerBuilder {
    config: PlannerConfig,
}

impl PlannerBuilder {
    /// Start from the defaults for a maze of side `dim`: start in the south
    /// west corner, goal at the centre.
    pub fn new(dim: u8) -> Self {
        PlannerBuilder {
            config: PlannerConfig::new(dim),
        }
    }

    /// Resume from an existing configuration.
    pub fn from_config(config: PlannerConfig) -> Self {
        PlannerBuilder { config }
    }

    pub fn start(mut self, start: Location) -> Self {
        self.config.start = start;
        self
    }

    pub fn goal(mut self, goal: Vec<Location>) -> Self {
        self.config.goal = goal;
        self
    }

    pub fn laps(mut self, laps: u32) -> Self {
        self.config.laps = Some(laps);
        self
    }

    pub fn max_routes(mut self, max_routes: usize) -> Self {
        self.config.max_routes = max_routes;
        self
    }

    pub fn max_verification_rounds(mut self, rounds: u32) -> Self {
        self.config.max_verification_rounds = Some(rounds);
        self
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Build a planner. Only the oracle reads `maze`; the others start with
    /// nothing but the outer boundary.
    pub fn build(self, kind: PlannerKind, maze: &dyn MazeSource) -> Box<dyn Planner> {
        match kind {
            PlannerKind::WallFollower => Box::new(WallFollowerPlanner::new(self.config)),
            PlannerKind::Waterfall => Box::new(WaterfallPlanner::new(self.config)),
            PlannerKind::RouteSearch => Box::new(RouteSearchPlanner::new(self.config)),
            PlannerKind::Oracle => Box::new(OraclePlanner::new(self.config, maze)),
        }
    }
}

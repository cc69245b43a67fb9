//! Planner handed the complete maze up front. It never explores: it plans
//! one shortest route to the goal and replays it, which makes it the
//! performance ceiling for the exploring planners.

use crate::flood_fill::*;
use crate::heading::*;
use crate::instruction::*;
use crate::location::*;
use crate::maze::MazeSource;
use crate::planner::*;
use crate::planners::waterfall::waterfall_choice;
use crate::route::*;
use crate::wall_map::*;
use log::*;
use std::collections::VecDeque;

pub struct OraclePlanner {
    config: PlannerConfig,
    map: WallMap,
    plan: VecDeque<Step>,
}

impl OraclePlanner {
    pub fn new(config: PlannerConfig, maze: &dyn MazeSource) -> Self {
        let mut map = WallMap::new(config.dim);
        for x in 0..config.dim as u32 {
            for y in 0..config.dim as u32 {
                let location = Location::from_coords(x, y);
                let walls = Heading::ALL
                    .iter()
                    .filter(|heading| !maze.is_open(location, **heading))
                    .fold(WallFlags::NONE, |walls, heading| {
                        walls | WallFlags::from_heading(*heading)
                    });
                map.set_walls(location, walls);
            }
        }

        OraclePlanner {
            config,
            map,
            plan: VecDeque::new(),
        }
    }

    pub fn map(&self) -> &WallMap {
        &self.map
    }

    pub fn queued_route(&self) -> &VecDeque<Step> {
        &self.plan
    }

    fn plan_route(&mut self, heading: Heading, location: Location) {
        let field = flood_fill(&self.map, &self.config.goal);
        let routes = enumerate_routes(&self.map, &field, location, heading, self.config.max_routes);
        if let Some(route) = routes.best() {
            debug!(
                "Oracle planned {} steps from {} ({} candidate routes)",
                route.len(),
                location,
                routes.routes.len()
            );
            self.plan = route.into();
        }
    }
}

impl Planner for OraclePlanner {
    fn name(&self) -> &str {
        "Oracle Waterfall"
    }

    fn choose(
        &mut self,
        _readings: &WallReadings,
        heading: Heading,
        location: Location,
    ) -> Instruction {
        if self.config.is_goal(location) {
            self.plan.clear();
            return Instruction::Reset;
        }

        if self.plan.is_empty() {
            self.plan_route(heading, location);
        }

        match self.plan.pop_front() {
            Some(step) => step.into(),
            None => {
                // No forward route from this pose; turn towards the goal.
                let field = flood_fill(&self.map, &self.config.goal);
                let (rotation, movement) = waterfall_choice(&field, &self.map, heading, location);
                Instruction::new(rotation, movement)
            }
        }
    }
}

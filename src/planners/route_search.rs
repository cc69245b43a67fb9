//! Explorer that only commits to a speed run once the best known route has
//! been walked end to end.
//!
//! Each tick it enumerates every shortest route from the start to the active
//! target and checks the cheapest one against the cells the mouse has
//! actually visited. Unvisited cells on that route become the new target, so
//! exploration is steered towards exactly the gaps that keep the route
//! unverified. Once the route is fully verified it is queued and a reset is
//! requested.

use crate::flood_fill::*;
use crate::heading::*;
use crate::instruction::*;
use crate::location::*;
use crate::planner::*;
use crate::planners::waterfall::waterfall_choice;
use crate::route::*;
use crate::wall_map::*;
use log::*;
use std::collections::VecDeque;

pub struct RouteSearchPlanner {
    config: PlannerConfig,
    map: WallMap,
    target: Vec<Location>,
    plan: VecDeque<Step>,
    verification_rounds: u32,
}

impl RouteSearchPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        let map = WallMap::new(config.dim);
        let target = config.goal.clone();
        RouteSearchPlanner {
            config,
            map,
            target,
            plan: VecDeque::new(),
            verification_rounds: 0,
        }
    }

    pub fn map(&self) -> &WallMap {
        &self.map
    }

    pub fn target(&self) -> &[Location] {
        &self.target
    }

    pub fn queued_route(&self) -> &VecDeque<Step> {
        &self.plan
    }

    /// Drops the current cell from the target set and, once the set is
    /// exhausted, swaps between the goal and the start.
    fn update_target(&mut self, location: Location) {
        self.target.retain(|cell| *cell != location);
        if self.target.is_empty() && !self.config.is_goal(location) {
            self.target = self.config.goal.clone();
        }
        if self.target.is_empty() && location != self.config.start {
            self.target = vec![self.config.start];
        }
        if self.target.is_empty() {
            self.target = self.config.goal.clone();
        }
    }

    fn goal_visited(&self) -> bool {
        self.config.goal.iter().any(|cell| self.map.visits(*cell) > 0)
    }

    fn is_verified(&self, route: &[Step]) -> bool {
        unverified_cells(&self.map, self.config.start, Heading::NORTH, route).is_empty()
    }

    /// Plans from the start towards the active target. Returns a route once
    /// every cell on it has been visited.
    ///
    /// Once the verification round cap is exceeded and a goal cell has been
    /// visited, any fully verified route among the shortest ones is accepted
    /// even if it is not the one with the fewest instructions.
    fn verify_best_route(&mut self) -> Option<Vec<Step>> {
        let field = flood_fill(&self.map, &self.target);
        let routes = enumerate_routes(
            &self.map,
            &field,
            self.config.start,
            Heading::NORTH,
            self.config.max_routes,
        );
        let best = routes.best()?;
        let unverified = unverified_cells(&self.map, self.config.start, Heading::NORTH, &best);

        let route = if unverified.is_empty() {
            best
        } else {
            if self.target == self.config.goal && unverified != self.target {
                self.verification_rounds += 1;
            }
            let exhausted = self.verification_rounds > self.config.max_verification_rounds();
            let fallback = if exhausted && self.goal_visited() {
                routes
                    .routes
                    .iter()
                    .map(|units| compress(units))
                    .filter(|steps| self.is_verified(steps))
                    .min_by_key(|steps| steps.len())
            } else {
                None
            };

            match fallback {
                Some(route) => {
                    warn!(
                        "Verification round cap {} exceeded, committing verified route of {} steps",
                        self.config.max_verification_rounds(),
                        route.len()
                    );
                    route
                }
                None => {
                    debug!(
                        "Route of {} steps has {} unverified cells, exploring them",
                        best.len(),
                        unverified.len()
                    );
                    self.target = unverified;
                    return None;
                }
            }
        };

        if route.len() > 1 {
            Some(route)
        } else {
            None
        }
    }
}

impl Planner for RouteSearchPlanner {
    fn name(&self) -> &str {
        "Search Waterfall"
    }

    fn choose(
        &mut self,
        readings: &WallReadings,
        heading: Heading,
        location: Location,
    ) -> Instruction {
        self.update_target(location);

        if let Some(step) = self.plan.pop_front() {
            return step.into();
        }

        self.map.observe(location, readings);
        self.map.record_visit(location);

        if let Some(route) = self.verify_best_route() {
            debug!("Committing verified route of {} steps", route.len());
            self.plan = route.into();
            self.target = self.config.goal.clone();
            return Instruction::Reset;
        }

        let field = flood_fill(&self.map, &self.target);
        let (rotation, movement) = waterfall_choice(&field, &self.map, heading, location);
        trace!(
            "Route search at {} towards {:?} -> {:?} {}",
            location,
            self.target,
            rotation,
            movement
        );
        Instruction::new(rotation, movement)
    }
}

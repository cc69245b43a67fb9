//! Reactive explorer: always heads for the least visited open neighbour,
//! preferring left, then straight, then right. Never looks further than one
//! cell ahead.

use crate::constants::*;
use crate::heading::*;
use crate::instruction::*;
use crate::location::*;
use crate::planner::*;
use crate::wall_map::*;
use log::*;

pub struct WallFollowerPlanner {
    config: PlannerConfig,
    map: WallMap,
}

impl WallFollowerPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        let map = WallMap::new(config.dim);
        WallFollowerPlanner { config, map }
    }

    pub fn map(&self) -> &WallMap {
        &self.map
    }
}

impl Planner for WallFollowerPlanner {
    fn name(&self) -> &str {
        "Wall Follower"
    }

    fn choose(
        &mut self,
        readings: &WallReadings,
        heading: Heading,
        location: Location,
    ) -> Instruction {
        if self.config.is_goal(location) {
            debug!("Wall follower reached goal at {}", location);
            return Instruction::Reset;
        }

        self.map.observe(location, readings);
        self.map.record_visit(location);

        let visits = self.map.neighbour_visits(location);
        let candidates = [
            (Rotation::Left, visits[heading.left().index()]),
            (Rotation::Straight, visits[heading.index()]),
            (Rotation::Right, visits[heading.right().index()]),
        ];
        let fewest = candidates.iter().map(|(_, v)| *v).min().unwrap_or(IMPASSABLE);

        let choice = candidates
            .iter()
            .find(|(_, v)| *v == fewest && *v < IMPASSABLE)
            .map(|(rotation, _)| Instruction::new(*rotation, 1))
            .unwrap_or(Instruction::new(Rotation::Right, 0));

        trace!("Wall follower at {} visits {:?} -> {:?}", location, visits, choice);
        choice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::*;
    use crate::simulation::sense;

    fn loc(x: u32, y: u32) -> Location {
        Location::from_coords(x, y)
    }

    /// Column 0 walled off from the rest of the maze.
    fn corridor() -> GridMaze {
        (0..4).fold(GridMaze::open(4), |maze, y| {
            maze.with_wall(loc(0, y), Heading::EAST)
        })
    }

    #[test]
    fn corridor_goes_straight_until_goal() {
        let maze = corridor();
        let config = PlannerConfig {
            goal: vec![loc(0, 3)],
            ..PlannerConfig::new(4)
        };
        let mut planner = WallFollowerPlanner::new(config);

        for y in 0..3 {
            let here = loc(0, y);
            let readings = sense(&maze, here, Heading::NORTH);
            assert_eq!(
                planner.choose(&readings, Heading::NORTH, here),
                Instruction::new(Rotation::Straight, 1)
            );
        }
        let goal = loc(0, 3);
        let readings = sense(&maze, goal, Heading::NORTH);
        assert_eq!(
            planner.choose(&readings, Heading::NORTH, goal),
            Instruction::Reset
        );
    }

    #[test]
    fn prefers_left_on_ties_and_avoids_revisits() {
        let maze = GridMaze::open(4);
        let mut planner = WallFollowerPlanner::new(PlannerConfig::new(4));

        // Facing north in the open at (1, 1): every option is unvisited.
        let here = loc(1, 1);
        let readings = sense(&maze, here, Heading::NORTH);
        assert_eq!(
            planner.choose(&readings, Heading::NORTH, here),
            Instruction::new(Rotation::Left, 1)
        );

        // Back at (0, 1) facing east, (1, 1) has been visited, so turn left
        // (north) rather than go straight.
        let here = loc(0, 1);
        let readings = sense(&maze, here, Heading::EAST);
        assert_eq!(
            planner.choose(&readings, Heading::EAST, here),
            Instruction::new(Rotation::Left, 1)
        );
    }

    #[test]
    fn boxed_in_turns_right_without_moving() {
        let maze = GridMaze::open(4)
            .with_wall(loc(0, 0), Heading::NORTH)
            .with_wall(loc(0, 0), Heading::EAST);
        let mut planner = WallFollowerPlanner::new(PlannerConfig::new(4));

        let here = loc(0, 0);
        let readings = sense(&maze, here, Heading::NORTH);
        assert_eq!(
            planner.choose(&readings, Heading::NORTH, here),
            Instruction::new(Rotation::Right, 0)
        );
        assert_eq!(planner.map().decode(here), vec![1, 2, 4, 8]);
    }
}

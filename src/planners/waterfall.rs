//! Flood-fill explorer.
//!
//! During exploration the mouse shuttles between the goal and the start,
//! following the distance field towards whichever end is active, for a fixed
//! number of laps. Afterwards it asks for a reset and races to the goal,
//! merging up to three straight cells per instruction.

use crate::constants::*;
use crate::flood_fill::*;
use crate::heading::*;
use crate::instruction::*;
use crate::location::*;
use crate::planner::*;
use crate::wall_map::*;
use log::*;

/// Single step towards a neighbour with the smallest distance. Straight on
/// is preferred, then left, then right. If no such neighbour is ahead or to
/// either side, turns left in place.
pub fn waterfall_choice(
    field: &DistanceField,
    map: &WallMap,
    heading: Heading,
    location: Location,
) -> (Rotation, u8) {
    let neighbours = field.minimal_neighbours(map, location);
    [Rotation::Straight, Rotation::Left, Rotation::Right]
        .into_iter()
        .find(|rotation| neighbours.contains(&heading.rotate(*rotation)))
        .map(|rotation| (rotation, 1))
        .unwrap_or((Rotation::Left, 0))
}

pub struct WaterfallPlanner {
    config: PlannerConfig,
    map: WallMap,
    exploring: bool,
    laps_total: u32,
    laps_remaining: u32,
}

impl WaterfallPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        let map = WallMap::new(config.dim);
        let laps = config.laps();
        WaterfallPlanner {
            config,
            map,
            exploring: true,
            laps_total: laps,
            laps_remaining: laps,
        }
    }

    pub fn is_exploring(&self) -> bool {
        self.exploring
    }

    pub fn laps_remaining(&self) -> u32 {
        self.laps_remaining
    }

    /// Even numbers of completed laps head for the goal, odd ones for the
    /// start. The speed run always heads for the goal.
    fn target(&self) -> Vec<Location> {
        let completed = self.laps_total - self.laps_remaining;
        if !self.exploring || completed % 2 == 0 {
            self.config.goal.clone()
        } else {
            vec![self.config.start]
        }
    }

    /// Looks up to three cells ahead along the field, merging consecutive
    /// straight moves into one instruction.
    fn speed_run_choice(
        &self,
        field: &DistanceField,
        heading: Heading,
        location: Location,
    ) -> Instruction {
        let (rotation, mut movement) = waterfall_choice(field, &self.map, heading, location);
        let heading = heading.rotate(rotation);
        let mut location = location;

        while movement > 0 && movement < MAX_MOVEMENT {
            let Some(next) = self.map.open_neighbour(location, heading) else {
                break;
            };
            location = next;
            if field.is_target(location) {
                break;
            }
            let (rotate, step) = waterfall_choice(field, &self.map, heading, location);
            if rotate != Rotation::Straight || step == 0 {
                break;
            }
            movement += 1;
        }

        Instruction::new(rotation, movement)
    }
}

impl Planner for WaterfallPlanner {
    fn name(&self) -> &str {
        "Basic Waterfall"
    }

    fn choose(
        &mut self,
        readings: &WallReadings,
        heading: Heading,
        location: Location,
    ) -> Instruction {
        self.map.observe(location, readings);

        if self.exploring {
            if self.target().contains(&location) {
                self.laps_remaining = self.laps_remaining.saturating_sub(1);
                debug!(
                    "Waterfall lap complete at {}, {} remaining",
                    location, self.laps_remaining
                );
            }
            if self.laps_remaining == 0 {
                self.exploring = false;
                debug!("Waterfall exploration finished, requesting reset");
                return Instruction::Reset;
            }
        }

        let field = flood_fill(&self.map, &self.target());
        if self.exploring {
            let (rotation, movement) = waterfall_choice(&field, &self.map, heading, location);
            Instruction::new(rotation, movement)
        } else {
            self.speed_run_choice(&field, heading, location)
        }
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

    fn corridor() -> GridMaze {
        (0..4).fold(GridMaze::open(4), |maze, y| {
            maze.with_wall(loc(0, y), Heading::EAST)
        })
    }

    fn corridor_planner(laps: u32) -> WaterfallPlanner {
        let config = PlannerConfig {
            goal: vec![loc(0, 3)],
            laps: Some(laps),
            ..PlannerConfig::new(4)
        };
        WaterfallPlanner::new(config)
    }

    #[test]
    fn choice_prefers_straight_then_left_then_right() {
        let map = WallMap::new(3);
        let field = flood_fill(&map, &[loc(1, 1)]);
        let corner = loc(0, 0);

        assert_eq!(
            waterfall_choice(&field, &map, Heading::NORTH, corner),
            (Rotation::Straight, 1)
        );
        assert_eq!(
            waterfall_choice(&field, &map, Heading::SOUTH, corner),
            (Rotation::Left, 1)
        );
        assert_eq!(
            waterfall_choice(&field, &map, Heading::WEST, corner),
            (Rotation::Right, 1)
        );
    }

    #[test]
    fn choice_holds_position_when_best_neighbour_is_behind() {
        let map = WallMap::new(3);
        let field = flood_fill(&map, &[loc(0, 0)]);
        assert_eq!(
            waterfall_choice(&field, &map, Heading::NORTH, loc(0, 1)),
            (Rotation::Left, 0)
        );
    }

    #[test]
    fn exploration_then_speed_run() {
        let maze = corridor();
        let mut planner = corridor_planner(1);

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
        assert!(!planner.is_exploring());

        let start = loc(0, 0);
        let readings = sense(&maze, start, Heading::NORTH);
        assert_eq!(
            planner.choose(&readings, Heading::NORTH, start),
            Instruction::new(Rotation::Straight, 3)
        );
    }

    #[test]
    fn lap_turns_back_towards_start() {
        let maze = corridor();
        let mut planner = corridor_planner(2);

        for y in 0..3 {
            let here = loc(0, y);
            let readings = sense(&maze, here, Heading::NORTH);
            planner.choose(&readings, Heading::NORTH, here);
        }
        let goal = loc(0, 3);
        let readings = sense(&maze, goal, Heading::NORTH);
        assert_eq!(
            planner.choose(&readings, Heading::NORTH, goal),
            Instruction::new(Rotation::Left, 0)
        );
        assert_eq!(planner.laps_remaining(), 1);
        assert!(planner.is_exploring());

        let readings = sense(&maze, goal, Heading::WEST);
        assert_eq!(
            planner.choose(&readings, Heading::WEST, goal),
            Instruction::new(Rotation::Left, 1)
        );
    }
}

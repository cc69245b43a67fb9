pub mod constants;
pub mod flood_fill;
pub mod heading;
pub mod instruction;
pub mod location;
pub mod maze;
pub mod planner;
pub mod planners;
pub mod route;
pub mod simulation;
pub mod wall_map;

pub use heading::{Heading, Rotation};
pub use instruction::{Instruction, Step};
pub use location::Location;
pub use maze::{GridMaze, MazeError, MazeSource};
pub use planner::*;
pub use simulation::*;

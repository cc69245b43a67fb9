//! Ground-truth mazes the mouse explores.
//!
//! The planners never read a maze directly; only the simulation driver (to
//! produce sensor readings and apply movement) and the oracle planner do.

use crate::heading::*;
use crate::location::*;
use crate::wall_map::*;
use pathfinding::directed::bfs::bfs;
use std::str::FromStr;
use thiserror::Error;

/// Read-only access to a complete maze.
pub trait MazeSource {
    /// Side length of the square maze.
    fn dim(&self) -> u8;

    /// Whether the edge of `location` facing `heading` can be crossed.
    fn is_open(&self, location: Location, heading: Heading) -> bool;

    /// Number of open cells between `location` and the nearest wall along
    /// `heading`.
    fn dist_to_wall(&self, location: Location, heading: Heading) -> u8 {
        let mut distance = 0;
        let mut current = location;
        while self.is_open(current, heading) {
            match current.neighbour(heading, self.dim()) {
                Some(next) => current = next,
                None => break,
            }
            distance += 1;
        }
        distance
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("maze description is empty")]
    MissingDimension,
    #[error("invalid maze dimension '{0}'")]
    InvalidDimension(String),
    #[error("expected {expected} maze rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("row {row}: expected {expected} cells, found {found}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid cell value '{value}' at {location}")]
    InvalidCell { location: Location, value: String },
    #[error("outer boundary is open at {location}")]
    OpenBoundary { location: Location },
    #[error("edge {heading:?} of {location} disagrees with its neighbour")]
    InconsistentEdge { location: Location, heading: Heading },
}

/// A fully known square maze.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridMaze {
    walls: GridArray<WallFlags>,
}

impl GridMaze {
    /// A maze with only its outer boundary walled.
    pub fn open(dim: u8) -> GridMaze {
        let map = WallMap::new(dim);
        let mut walls = GridArray::new(dim, WallFlags::NONE);
        for x in 0..dim as u32 {
            for y in 0..dim as u32 {
                let location = Location::from_coords(x, y);
                walls.set(location, map.walls(location));
            }
        }
        GridMaze { walls }
    }

    /// Adds a wall on both sides of an edge.
    pub fn with_wall(mut self, location: Location, heading: Heading) -> GridMaze {
        self.walls
            .get_mut(location)
            .insert(WallFlags::from_heading(heading));
        if let Some(neighbour) = location.neighbour(heading, self.dim()) {
            self.walls
                .get_mut(neighbour)
                .insert(WallFlags::from_heading(heading.reverse()));
        }
        self
    }

    /// Parses the text format: the side length on the first line, then one
    /// line per column (x) of comma-separated cell values (one per y). Bit
    /// `2^h` of a value is set when the edge facing heading `h` is open.
    pub fn parse(text: &str) -> Result<GridMaze, MazeError> {
        let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

        let dim_line = lines.next().ok_or(MazeError::MissingDimension)?;
        let dim: u8 = dim_line
            .parse()
            .ok()
            .filter(|d| *d > 0)
            .ok_or_else(|| MazeError::InvalidDimension(dim_line.to_string()))?;

        let rows: Vec<&str> = lines.collect();
        if rows.len() != dim as usize {
            return Err(MazeError::RowCount {
                expected: dim as usize,
                found: rows.len(),
            });
        }

        let mut walls = GridArray::new(dim, WallFlags::NONE);
        for (x, row) in rows.iter().enumerate() {
            let cells: Vec<&str> = row.split(',').map(str::trim).collect();
            if cells.len() != dim as usize {
                return Err(MazeError::ColumnCount {
                    row: x,
                    expected: dim as usize,
                    found: cells.len(),
                });
            }
            for (y, cell) in cells.iter().enumerate() {
                let location = Location::from_coords(x as u32, y as u32);
                let open = cell
                    .parse::<u8>()
                    .ok()
                    .filter(|v| *v < 16)
                    .ok_or_else(|| MazeError::InvalidCell {
                        location,
                        value: cell.to_string(),
                    })?;
                walls.set(location, WallFlags::from_bits_truncate(!open & 0xF));
            }
        }

        let maze = GridMaze { walls };
        maze.validate()?;
        Ok(maze)
    }

    /// Checks that the perimeter is closed and both sides of every interior
    /// edge agree.
    pub fn validate(&self) -> Result<(), MazeError> {
        let dim = self.dim();
        for (location, walls) in self.walls.iter() {
            for heading in Heading::ALL {
                let walled = walls.contains(WallFlags::from_heading(heading));
                match location.neighbour(heading, dim) {
                    None if !walled => return Err(MazeError::OpenBoundary { location }),
                    None => {}
                    Some(neighbour) => {
                        let mirrored = self
                            .walls
                            .get(neighbour)
                            .contains(WallFlags::from_heading(heading.reverse()));
                        if walled != mirrored {
                            return Err(MazeError::InconsistentEdge { location, heading });
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub fn walls(&self, location: Location) -> WallFlags {
        *self.walls.get(location)
    }

    /// True hop count from `from` to the nearest of `targets`.
    pub fn shortest_distance(&self, from: Location, targets: &[Location]) -> Option<usize> {
        bfs(
            &from,
            |loc| {
                let loc = *loc;
                Heading::ALL
                    .iter()
                    .filter(move |h| self.is_open(loc, **h))
                    .filter_map(move |h| loc.neighbour(*h, self.dim()))
                    .collect::<Vec<_>>()
            },
            |loc| targets.contains(loc),
        )
        .map(|path| path.len() - 1)
    }
}

impl MazeSource for GridMaze {
    fn dim(&self) -> u8 {
        self.walls.dim()
    }

    fn is_open(&self, location: Location, heading: Heading) -> bool {
        !self.walls(location).contains(WallFlags::from_heading(heading))
    }
}

impl FromStr for GridMaze {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GridMaze::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(x: u32, y: u32) -> Location {
        Location::from_coords(x, y)
    }

    // A single corridor snaking from (0, 0) up column 0, down column 1 and
    // up column 2.
    const SMALL: &str = "3
        1,5,6
        3,5,12
        9,5,4";

    #[test]
    fn parses_open_bits() {
        let maze = GridMaze::parse(SMALL).unwrap();
        assert_eq!(maze.dim(), 3);
        assert!(maze.is_open(loc(0, 0), Heading::NORTH));
        assert!(!maze.is_open(loc(0, 0), Heading::EAST));
        assert!(maze.is_open(loc(0, 2), Heading::EAST));
        assert!(maze.is_open(loc(1, 0), Heading::EAST));
        assert!(!maze.is_open(loc(1, 1), Heading::EAST));
    }

    #[test]
    fn dist_to_wall_counts_open_cells() {
        let maze = GridMaze::parse(SMALL).unwrap();
        assert_eq!(maze.dist_to_wall(loc(0, 0), Heading::NORTH), 2);
        assert_eq!(maze.dist_to_wall(loc(0, 0), Heading::EAST), 0);
        assert_eq!(maze.dist_to_wall(loc(0, 2), Heading::EAST), 1);
    }

    #[test]
    fn shortest_distance_uses_true_walls() {
        let maze = GridMaze::parse(SMALL).unwrap();
        assert_eq!(maze.shortest_distance(loc(0, 0), &[loc(0, 0)]), Some(0));
        assert_eq!(maze.shortest_distance(loc(0, 0), &[loc(1, 1)]), Some(4));
        assert_eq!(maze.shortest_distance(loc(0, 0), &[loc(2, 0)]), Some(6));
        assert_eq!(maze.shortest_distance(loc(0, 0), &[loc(2, 2)]), Some(8));
    }

    #[test]
    fn rejects_malformed_descriptions() {
        assert_eq!(GridMaze::parse(""), Err(MazeError::MissingDimension));
        assert_eq!(
            GridMaze::parse("x"),
            Err(MazeError::InvalidDimension("x".to_string()))
        );
        assert_eq!(
            GridMaze::parse("2\n2,3"),
            Err(MazeError::RowCount {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            GridMaze::parse("2\n3\n12,9"),
            Err(MazeError::ColumnCount {
                row: 0,
                expected: 2,
                found: 1
            })
        );
        assert!(matches!(
            GridMaze::parse("2\n3,q\n12,9"),
            Err(MazeError::InvalidCell { .. })
        ));
    }

    #[test]
    fn rejects_inconsistent_walls() {
        // (0,0) opens north but (0,1) is closed to the south.
        assert!(matches!(
            GridMaze::parse("2\n1,2\n8,8"),
            Err(MazeError::InconsistentEdge { .. })
        ));
        // (0,0) opens west out of the maze.
        assert_eq!(
            GridMaze::parse("2\n9,4\n0,0"),
            Err(MazeError::OpenBoundary { location: loc(0, 0) })
        );
    }

    #[test]
    fn parsed_maze_equals_built_maze() {
        let built = GridMaze::open(3)
            .with_wall(loc(0, 0), Heading::EAST)
            .with_wall(loc(0, 1), Heading::EAST)
            .with_wall(loc(1, 1), Heading::EAST)
            .with_wall(loc(1, 2), Heading::EAST);
        assert_eq!(GridMaze::parse(SMALL), Ok(built));
        assert_ne!(SMALL.parse::<GridMaze>(), Ok(GridMaze::open(3)));
    }

    #[test]
    fn builder_walls_are_consistent() {
        let maze = GridMaze::open(3)
            .with_wall(loc(1, 1), Heading::NORTH)
            .with_wall(loc(0, 0), Heading::EAST);
        assert!(maze.validate().is_ok());
        assert!(!maze.is_open(loc(1, 2), Heading::SOUTH));
        assert!(!maze.is_open(loc(1, 0), Heading::WEST));
        assert!(maze.is_open(loc(1, 1), Heading::EAST));
    }
}

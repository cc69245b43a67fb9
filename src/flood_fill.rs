//! Multi-source breadth-first distance field ("waterfall") over the known
//! wall map.
//!
//! Target cells hold distance 1, every other reachable cell holds one more
//! than its closest neighbour, and cells the fill never reached hold 0.
//! The field is rebuilt from scratch on every planning call because wall
//! knowledge changes between calls.

use crate::constants::*;
use crate::heading::*;
use crate::location::*;
use crate::wall_map::*;
use itertools::Itertools;
use std::collections::VecDeque;

#[derive(Clone, Debug)]
pub struct DistanceField {
    data: GridArray<u16>,
}

impl DistanceField {
    #[inline]
    pub fn dim(&self) -> u8 {
        self.data.dim()
    }

    /// Distance of a cell from the target set. 0 means unreached.
    #[inline]
    pub fn distance(&self, location: Location) -> u16 {
        *self.data.get(location)
    }

    pub fn is_target(&self, location: Location) -> bool {
        self.distance(location) == 1
    }

    /// Distance of each neighbour, indexed by heading. Neighbours outside
    /// the maze or behind a known wall read as `BLOCKED_DISTANCE`.
    pub fn neighbour_distances(&self, map: &WallMap, location: Location) -> [u16; 4] {
        let mut distances = [BLOCKED_DISTANCE; 4];
        for heading in Heading::ALL {
            if let Some(neighbour) = map.open_neighbour(location, heading) {
                distances[heading.index()] = self.distance(neighbour);
            }
        }
        distances
    }

    /// Headings whose neighbour ties for the smallest distance. All ties are
    /// returned, in heading order.
    pub fn minimal_neighbours(&self, map: &WallMap, location: Location) -> Vec<Heading> {
        let distances = self.neighbour_distances(map, location);
        let min = distances.iter().copied().min().unwrap_or(BLOCKED_DISTANCE);
        distances
            .iter()
            .positions(|&d| d == min)
            .map(|i| Heading::new(i as u8))
            .collect()
    }

    /// Headings whose neighbour is no further from the target than the
    /// current cell.
    pub fn descending_neighbours(&self, map: &WallMap, location: Location) -> Vec<Heading> {
        let current = self.distance(location);
        self.neighbour_distances(map, location)
            .iter()
            .positions(|&d| d <= current)
            .map(|i| Heading::new(i as u8))
            .collect()
    }
}

/// BFS flood-fill distance from a set of target cells, respecting the walls
/// currently known in `map`.
pub fn flood_fill(map: &WallMap, targets: &[Location]) -> DistanceField {
    let mut data = GridArray::new(map.dim(), 0u16);
    let mut queue = VecDeque::new();

    for target in targets {
        if *data.get(*target) == 0 {
            data.set(*target, 1);
            queue.push_back(*target);
        }
    }

    while let Some(loc) = queue.pop_front() {
        let next_dist = data.get(loc) + 1;
        for heading in Heading::ALL {
            if let Some(neighbour) = map.open_neighbour(loc, heading) {
                if *data.get(neighbour) == 0 {
                    data.set(neighbour, next_dist);
                    queue.push_back(neighbour);
                }
            }
        }
    }

    DistanceField { data }
}

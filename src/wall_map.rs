use crate::constants::*;
use crate::heading::*;
use crate::location::*;
use bitflags::*;
use serde::{Deserialize, Serialize};

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct WallFlags: u8 {
        const NONE = 0;
        const NORTH = 1;
        const EAST = 2;
        const SOUTH = 4;
        const WEST = 8;
    }
}

impl WallFlags {
    pub fn from_heading(heading: Heading) -> WallFlags {
        WallFlags::from_bits_truncate(heading.bit())
    }

    pub fn is_dead_end(self) -> bool {
        DEAD_END_MASKS.contains(&self.bits())
    }
}

/// A square array of per-cell data, indexed by location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridArray<T: Copy> {
    dim: u8,
    data: Vec<T>,
}

impl<T: Copy> GridArray<T> {
    pub fn new(dim: u8, initial: T) -> Self {
        GridArray {
            dim,
            data: vec![initial; (dim as usize) * (dim as usize)],
        }
    }

    #[inline]
    pub fn dim(&self) -> u8 {
        self.dim
    }

    #[inline]
    fn index(&self, location: Location) -> usize {
        debug_assert!(location.x() < self.dim && location.y() < self.dim);
        location.y() as usize * self.dim as usize + location.x() as usize
    }

    #[inline]
    pub fn get(&self, location: Location) -> &T {
        &self.data[self.index(location)]
    }

    #[inline]
    pub fn get_mut(&mut self, location: Location) -> &mut T {
        let index = self.index(location);
        &mut self.data[index]
    }

    #[inline]
    pub fn set(&mut self, location: Location, value: T) {
        *self.get_mut(location) = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Location, &T)> {
        let dim = self.dim as usize;
        self.data.iter().enumerate().map(move |(i, v)| {
            let x = i % dim;
            let y = i / dim;
            (Location::from_coords(x as u32, y as u32), v)
        })
    }
}

/// What a single sensor reported about one side of the current cell.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum Reading {
    Wall,
    Open,
    Blind,
}

impl Reading {
    /// Converts a distance sensor value: -1 is a blind spot, 0 a wall
    /// directly adjacent, anything else an open edge.
    pub fn from_distance(distance: i32) -> Reading {
        match distance {
            d if d < 0 => Reading::Blind,
            0 => Reading::Wall,
            _ => Reading::Open,
        }
    }
}

/// Sensor readings for the current cell, resolved to absolute headings.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct WallReadings([Reading; 4]);

impl WallReadings {
    pub fn new(readings: [Reading; 4]) -> Self {
        WallReadings(readings)
    }

    pub fn blind() -> Self {
        WallReadings([Reading::Blind; 4])
    }

    /// Resolves left, front and right distance sensors against the current
    /// heading. The direction behind the mouse is never sensed.
    pub fn from_sensors(sensors: [i32; 3], heading: Heading) -> Self {
        let mut readings = [Reading::Blind; 4];
        let left = heading.left();
        for (i, distance) in sensors.iter().enumerate() {
            let direction = (left.index() + i) % 4;
            readings[direction] = Reading::from_distance(*distance);
        }
        WallReadings(readings)
    }

    pub fn get(&self, heading: Heading) -> Reading {
        self.0[heading.index()]
    }
}

/// Everything the mouse knows about the maze: a wall mask and a visit
/// counter per cell.
///
/// Wall knowledge only grows. Outer boundary walls are known up front.
#[derive(Clone, Debug)]
pub struct WallMap {
    walls: GridArray<WallFlags>,
    visits: GridArray<u8>,
}

impl WallMap {
    pub fn new(dim: u8) -> WallMap {
        let mut walls = GridArray::new(dim, WallFlags::NONE);
        let last = dim.saturating_sub(1) as u32;
        for i in 0..dim as u32 {
            walls.get_mut(Location::from_coords(i, last)).insert(WallFlags::NORTH);
            walls.get_mut(Location::from_coords(i, 0)).insert(WallFlags::SOUTH);
            walls.get_mut(Location::from_coords(last, i)).insert(WallFlags::EAST);
            walls.get_mut(Location::from_coords(0, i)).insert(WallFlags::WEST);
        }

        WallMap {
            walls,
            visits: GridArray::new(dim, 0),
        }
    }

    #[inline]
    pub fn dim(&self) -> u8 {
        self.walls.dim()
    }

    pub fn walls(&self, location: Location) -> WallFlags {
        *self.walls.get(location)
    }

    pub fn has_wall(&self, location: Location, heading: Heading) -> bool {
        self.walls(location).contains(WallFlags::from_heading(heading))
    }

    /// The neighbouring cell in `heading`, if no wall is known to separate it.
    pub fn open_neighbour(&self, location: Location, heading: Heading) -> Option<Location> {
        if self.has_wall(location, heading) {
            return None;
        }
        location.neighbour(heading, self.dim())
    }

    /// Records every sensed wall on the current cell and mirrors it onto the
    /// neighbour across the same edge.
    pub fn observe(&mut self, location: Location, readings: &WallReadings) {
        for heading in Heading::ALL {
            if readings.get(heading) != Reading::Wall {
                continue;
            }
            self.mark(location, heading);
            if let Some(neighbour) = location.neighbour(heading, self.dim()) {
                self.mark(neighbour, heading.reverse());
            }
        }
    }

    /// Adds a single wall bit. Marking a known wall is a no-op.
    pub fn mark(&mut self, location: Location, heading: Heading) {
        self.walls
            .get_mut(location)
            .insert(WallFlags::from_heading(heading));
    }

    /// Wall bit values present on a cell, in ascending order.
    pub fn decode(&self, location: Location) -> Vec<u8> {
        Heading::ALL
            .iter()
            .map(|h| h.bit())
            .filter(|bit| self.walls(location).bits() & bit != 0)
            .collect()
    }

    /// Replaces the wall mask of a cell outright. Used when complete maze
    /// knowledge is available up front.
    pub fn set_walls(&mut self, location: Location, walls: WallFlags) {
        self.walls.set(location, walls);
    }

    pub fn visits(&self, location: Location) -> u8 {
        *self.visits.get(location)
    }

    pub fn record_visit(&mut self, location: Location) {
        let visits = self.visits.get_mut(location);
        *visits = visits.saturating_add(1);
    }

    /// Visit counts of the four neighbours, indexed by heading. Neighbours
    /// behind a known wall read as `IMPASSABLE`. A neighbour that turns out
    /// to be a dead end has its count forced to `DEAD_END_VISITS`.
    pub fn neighbour_visits(&mut self, location: Location) -> [u8; 4] {
        let mut visits = [IMPASSABLE; 4];
        for heading in Heading::ALL {
            if let Some(neighbour) = self.open_neighbour(location, heading) {
                if self.walls(neighbour).is_dead_end() {
                    let count = self.visits.get_mut(neighbour);
                    *count = (*count).max(DEAD_END_VISITS);
                }
                visits[heading.index()] = self.visits(neighbour);
            }
        }
        visits
    }
}

use crate::heading::*;
use serde::*;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct Location {
    packed: u16,
}

impl Location {
    pub fn from_coords(x: u32, y: u32) -> Self {
        Location {
            packed: ((x << 8) | y) as u16,
        }
    }

    #[inline]
    pub fn x(self) -> u8 {
        ((self.packed >> 8) & 0xFF) as u8
    }

    #[inline]
    pub fn y(self) -> u8 {
        (self.packed & 0xFF) as u8
    }

    #[inline]
    pub fn packed_repr(self) -> u16 {
        self.packed
    }

    #[inline]
    pub fn from_packed(packed: u16) -> Self {
        Location { packed }
    }

    /// The adjacent cell in direction `heading`, if it lies inside a maze of
    /// side length `dim`.
    pub fn neighbour(self, heading: Heading, dim: u8) -> Option<Location> {
        let (dx, dy) = heading.offset();
        let nx = self.x() as i16 + dx as i16;
        let ny = self.y() as i16 + dy as i16;
        if nx >= 0 && nx < dim as i16 && ny >= 0 && ny < dim as i16 {
            Some(Location::from_coords(nx as u32, ny as u32))
        } else {
            None
        }
    }

    /// Travel `cells` steps along `heading` without bounds checking.
    ///
    /// Returns `None` if the result would leave the first quadrant.
    pub fn advance(self, heading: Heading, cells: u8) -> Option<Location> {
        let (dx, dy) = heading.offset();
        let nx = self.x() as i16 + dx as i16 * cells as i16;
        let ny = self.y() as i16 + dy as i16 * cells as i16;
        if (0..=u8::MAX as i16).contains(&nx) && (0..=u8::MAX as i16).contains(&ny) {
            Some(Location::from_coords(nx as u32, ny as u32))
        } else {
            None
        }
    }

    pub fn manhattan_distance(self, other: Self) -> u16 {
        let dx = (self.x() as i16) - (other.x() as i16);
        let dy = (self.y() as i16) - (other.y() as i16);

        (dx.abs() + dy.abs()) as u16
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x(), self.y())
    }
}

impl Serialize for Location {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.packed_repr().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        u16::deserialize(deserializer).map(Location::from_packed)
    }
}

/// The goal cells at the centre of a maze: a 2x2 block for even side
/// lengths, the single middle cell for odd ones.
pub fn centre_goal(dim: u8) -> Vec<Location> {
    let centre = (dim / 2) as u32;
    if dim % 2 == 1 {
        return vec![Location::from_coords(centre, centre)];
    }
    vec![
        Location::from_coords(centre, centre),
        Location::from_coords(centre, centre - 1),
        Location::from_coords(centre - 1, centre),
        Location::from_coords(centre - 1, centre - 1),
    ]
}

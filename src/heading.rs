//! Absolute headings and relative rotations.
//!
//! Headings are numbered clockwise from north: 0 = north (+y), 1 = east (+x),
//! 2 = south (-y), 3 = west (-x). The wall bit for heading `h` is `2^h`.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Heading(u8);

impl Heading {
    pub const NORTH: Heading = Heading(0);
    pub const EAST: Heading = Heading(1);
    pub const SOUTH: Heading = Heading(2);
    pub const WEST: Heading = Heading(3);

    pub const ALL: [Heading; 4] = [Heading::NORTH, Heading::EAST, Heading::SOUTH, Heading::WEST];

    /// Panics if `value` is not in 0..4.
    pub fn new(value: u8) -> Heading {
        assert!(value < 4, "invalid heading {}", value);
        Heading(value)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Wall bit for this heading.
    #[inline]
    pub fn bit(self) -> u8 {
        1 << self.0
    }

    pub fn reverse(self) -> Heading {
        Heading((self.0 + 2) % 4)
    }

    pub fn left(self) -> Heading {
        Heading((self.0 + 3) % 4)
    }

    pub fn right(self) -> Heading {
        Heading((self.0 + 1) % 4)
    }

    pub fn rotate(self, rotation: Rotation) -> Heading {
        match rotation {
            Rotation::Left => self.left(),
            Rotation::Straight => self,
            Rotation::Right => self.right(),
        }
    }

    /// Coordinate delta for one cell of travel.
    pub fn offset(self) -> (i8, i8) {
        match self.0 {
            0 => (0, 1),
            1 => (1, 0),
            2 => (0, -1),
            _ => (-1, 0),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Rotation {
    Left,
    Straight,
    Right,
}

impl Rotation {
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Left => -90,
            Rotation::Straight => 0,
            Rotation::Right => 90,
        }
    }

    /// Panics on anything other than -90, 0 or 90.
    pub fn from_degrees(degrees: i32) -> Rotation {
        match degrees {
            -90 => Rotation::Left,
            0 => Rotation::Straight,
            90 => Rotation::Right,
            other => panic!("invalid rotation {}", other),
        }
    }

    /// Rotation that turns `from` into `to`, or `None` for a reversal.
    pub fn between(from: Heading, to: Heading) -> Option<Rotation> {
        if from == to {
            Some(Rotation::Straight)
        } else if from.right() == to {
            Some(Rotation::Right)
        } else if from.left() == to {
            Some(Rotation::Left)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_composes_modulo_four() {
        assert_eq!(Heading::NORTH.rotate(Rotation::Left), Heading::WEST);
        assert_eq!(Heading::WEST.rotate(Rotation::Right), Heading::NORTH);
        assert_eq!(Heading::EAST.rotate(Rotation::Straight), Heading::EAST);
        assert_eq!(Heading::SOUTH.reverse(), Heading::NORTH);
    }

    #[test]
    fn rotation_between_headings() {
        assert_eq!(
            Rotation::between(Heading::NORTH, Heading::EAST),
            Some(Rotation::Right)
        );
        assert_eq!(
            Rotation::between(Heading::NORTH, Heading::WEST),
            Some(Rotation::Left)
        );
        assert_eq!(Rotation::between(Heading::NORTH, Heading::SOUTH), None);
    }

    #[test]
    #[should_panic]
    fn out_of_range_heading_panics() {
        Heading::new(4);
    }

    #[test]
    fn rotation_degrees_round_trip() {
        assert_eq!(Rotation::Left.degrees(), -90);
        for rotation in [Rotation::Left, Rotation::Straight, Rotation::Right] {
            assert_eq!(Rotation::from_degrees(rotation.degrees()), rotation);
        }
    }

    #[test]
    #[should_panic]
    fn out_of_range_rotation_panics() {
        Rotation::from_degrees(180);
    }
}

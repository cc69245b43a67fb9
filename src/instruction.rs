use crate::constants::*;
use crate::heading::*;
use serde::{Deserialize, Serialize};

/// What a planner asks the mouse to do on one tick.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum Instruction {
    /// Rotate, then travel `steps` cells along the new heading.
    Move { rotation: Rotation, steps: u8 },
    /// Return to the start cell and begin the next run.
    Reset,
}

impl Instruction {
    /// Panics if `steps` exceeds the per-instruction movement limit.
    pub fn new(rotation: Rotation, steps: u8) -> Instruction {
        assert!(steps <= MAX_MOVEMENT, "invalid movement {}", steps);
        Instruction::Move { rotation, steps }
    }

    pub fn is_reset(&self) -> bool {
        matches!(self, Instruction::Reset)
    }
}

impl From<Step> for Instruction {
    fn from(step: Step) -> Self {
        Instruction::new(step.rotation, step.count)
    }
}

/// A rotation followed by straight travel over `count` cells.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct Step {
    pub rotation: Rotation,
    pub count: u8,
}

impl Step {
    pub fn new(rotation: Rotation, count: u8) -> Step {
        Step { rotation, count }
    }

    pub fn unit(rotation: Rotation) -> Step {
        Step { rotation, count: 1 }
    }
}

/// Merges unit moves into coarse steps. A step starts at every turn and
/// absorbs the straight moves that follow it, up to `MAX_MOVEMENT` cells.
pub fn compress(units: &[Rotation]) -> Vec<Step> {
    let mut steps: Vec<Step> = Vec::new();
    for rotation in units {
        match steps.last_mut() {
            Some(last) if *rotation == Rotation::Straight && last.count < MAX_MOVEMENT => {
                last.count += 1;
            }
            _ => steps.push(Step::unit(*rotation)),
        }
    }
    steps
}

/// Inverse of [`compress`]: one rotation per cell travelled.
pub fn expand(steps: &[Step]) -> Vec<Rotation> {
    let mut units = Vec::new();
    for step in steps {
        for i in 0..step.count {
            units.push(if i == 0 {
                step.rotation
            } else {
                Rotation::Straight
            });
        }
    }
    units
}

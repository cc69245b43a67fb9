/// Maximum number of cells the mouse may travel in a single instruction.
pub const MAX_MOVEMENT: u8 = 3;

/// Visit count reported for a neighbour that lies behind a known wall or
/// outside the maze.
pub const IMPASSABLE: u8 = 255;

/// Flood-fill distance reported for a neighbour that lies behind a known
/// wall or outside the maze. Never a reachable distance: a 255x255 maze has
/// at most 65 025 cells.
pub const BLOCKED_DISTANCE: u16 = u16::MAX;

/// Visit count forced onto a cell once it is known to be a dead end, so the
/// wall follower never chooses to walk back into it.
pub const DEAD_END_VISITS: u8 = 250;

/// Wall masks with exactly three sides closed.
pub const DEAD_END_MASKS: [u8; 4] = [7, 11, 13, 14];

/// Number of laps subtracted from the maze side length when deriving the
/// waterfall planner's exploration lap count.
pub const LAP_OFFSET: u8 = 9;

/// Default cap on the number of shortest routes enumerated per planning call.
pub const DEFAULT_MAX_ROUTES: usize = 10_000;

/// Default tick budget for a two-run simulation.
pub const DEFAULT_MAX_TICKS: u32 = 1000;

/// Weight applied to the training run's tick count when scoring.
pub const DEFAULT_TRAINING_SCORE_MULTIPLIER: f32 = 1.0 / 30.0;

//! Enumeration of every shortest route over a distance field.
//!
//! Routes are grown with an explicit stack of frames rather than recursion,
//! so memory is proportional to the number of partial routes in flight and
//! the call stack stays flat regardless of maze size. Each frame descends
//! to a neighbour exactly one step closer to the target, which makes every
//! completed route a shortest one.

use crate::flood_fill::*;
use crate::heading::*;
use crate::instruction::*;
use crate::location::*;
use crate::wall_map::*;
use fnv::FnvHashSet;
use log::*;

/// A partial route: where it has reached, which way it faces, and the unit
/// moves taken so far.
#[derive(Clone, Debug)]
struct RouteFrame {
    location: Location,
    heading: Heading,
    units: Vec<Rotation>,
}

/// Every shortest route found, as unit moves.
#[derive(Clone, Debug, Default)]
pub struct RouteSet {
    pub routes: Vec<Vec<Rotation>>,
    pub stats: RouteStats,
}

/// Statistics for one enumeration.
#[derive(Clone, Debug, Default)]
pub struct RouteStats {
    pub frames_expanded: u64,
    pub routes_found: u64,
    pub truncated: bool,
}

impl RouteSet {
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Compresses every route and returns the one with the fewest
    /// instructions. Ties go to the route enumerated first.
    pub fn best(&self) -> Option<Vec<Step>> {
        self.routes
            .iter()
            .map(|units| compress(units))
            .min_by_key(|steps| steps.len())
    }
}

/// Enumerates every strictly descending route from `start` to a target cell
/// of `field`, starting out facing `heading`. Routes that would need an
/// about-turn are not considered. At most `max_routes` routes are collected.
pub fn enumerate_routes(
    map: &WallMap,
    field: &DistanceField,
    start: Location,
    heading: Heading,
    max_routes: usize,
) -> RouteSet {
    let mut result = RouteSet::default();

    if field.distance(start) == 0 {
        trace!("Start {} is unreachable from the target set", start);
        return result;
    }

    let mut stack = vec![RouteFrame {
        location: start,
        heading,
        units: Vec::new(),
    }];

    while let Some(frame) = stack.pop() {
        result.stats.frames_expanded += 1;
        let current = field.distance(frame.location);

        if current == 1 {
            result.routes.push(frame.units);
            result.stats.routes_found += 1;
            if result.routes.len() >= max_routes {
                result.stats.truncated = !stack.is_empty();
                break;
            }
            continue;
        }

        // Pushed in reverse so routes pop out in heading order.
        for next in field.descending_neighbours(map, frame.location).into_iter().rev() {
            let Some(neighbour) = map.open_neighbour(frame.location, next) else {
                continue;
            };
            if field.distance(neighbour) != current - 1 {
                continue;
            }
            let Some(rotation) = Rotation::between(frame.heading, next) else {
                continue;
            };
            let mut units = frame.units.clone();
            units.push(rotation);
            stack.push(RouteFrame {
                location: neighbour,
                heading: next,
                units,
            });
        }
    }

    if result.stats.truncated {
        warn!(
            "Route enumeration from {} truncated at {} routes",
            start, max_routes
        );
    }
    trace!(
        "Route enumeration: expanded={}, routes={}",
        result.stats.frames_expanded,
        result.stats.routes_found
    );

    result
}

/// Every cell entered while replaying `steps` from `start`, in order.
/// Replay stops early if a step would leave the maze.
pub fn trace_route(dim: u8, start: Location, heading: Heading, steps: &[Step]) -> Vec<Location> {
    let mut cells = Vec::new();
    let mut location = start;
    let mut heading = heading;
    for step in steps {
        heading = heading.rotate(step.rotation);
        for _ in 0..step.count {
            match location.neighbour(heading, dim) {
                Some(next) => {
                    location = next;
                    cells.push(location);
                }
                None => return cells,
            }
        }
    }
    cells
}

/// Cells along the route that the mouse has never physically occupied,
/// without duplicates.
pub fn unverified_cells(
    map: &WallMap,
    start: Location,
    heading: Heading,
    steps: &[Step],
) -> Vec<Location> {
    let mut seen = FnvHashSet::default();
    trace_route(map.dim(), start, heading, steps)
        .into_iter()
        .filter(|cell| map.visits(*cell) == 0)
        .filter(|cell| seen.insert(*cell))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use Rotation::*;

    fn loc(x: u32, y: u32) -> Location {
        Location::from_coords(x, y)
    }

    #[test]
    fn open_grid_enumerates_all_shortest_routes() {
        let map = WallMap::new(3);
        let field = flood_fill(&map, &[loc(1, 1)]);
        let set = enumerate_routes(&map, &field, loc(0, 0), Heading::NORTH, 100);

        assert_eq!(set.routes, vec![vec![Straight, Right], vec![Right, Left]]);
        assert!(!set.stats.truncated);

        let best = set.best().unwrap();
        assert_eq!(best, vec![Step::new(Straight, 1), Step::new(Right, 1)]);
    }

    #[test]
    fn routes_end_on_target_without_crossing_walls() {
        let mut map = WallMap::new(4);
        // A wall across the middle with a single gap on the east side.
        for x in 0..3 {
            map.mark(loc(x, 1), Heading::NORTH);
            map.mark(loc(x, 2), Heading::SOUTH);
        }
        let target = loc(0, 3);
        let field = flood_fill(&map, &[target]);
        let set = enumerate_routes(&map, &field, loc(0, 0), Heading::NORTH, 1000);
        assert!(!set.is_empty());

        for units in &set.routes {
            let steps = compress(units);
            let mut location = loc(0, 0);
            let mut heading = Heading::NORTH;
            for rotation in expand(&steps) {
                heading = heading.rotate(rotation);
                location = map
                    .open_neighbour(location, heading)
                    .expect("route crossed a known wall");
            }
            assert_eq!(location, target);
            assert_eq!(units.len() as u16 + 1, field.distance(loc(0, 0)));
        }
    }

    /// A 16x16 maze that is one corridor snaking up and down the columns,
    /// from (0, 0) to (15, 0).
    fn serpentine_map() -> WallMap {
        let mut map = WallMap::new(16);
        for x in 0..15 {
            let gap = if x % 2 == 0 { 15 } else { 0 };
            for y in (0..16).filter(|y| *y != gap) {
                map.mark(loc(x, y), Heading::EAST);
                map.mark(loc(x + 1, y), Heading::WEST);
            }
        }
        map
    }

    #[test]
    fn long_corridor_has_a_single_route() {
        let map = serpentine_map();
        let target = loc(15, 0);
        let field = flood_fill(&map, &[target]);
        assert_eq!(field.distance(loc(0, 0)), 256);

        let set = enumerate_routes(&map, &field, loc(0, 0), Heading::NORTH, 10);
        assert_eq!(set.routes.len(), 1);
        assert_eq!(set.routes[0].len(), 255);
        assert!(!set.stats.truncated);

        let best = set.best().unwrap();
        let cells = trace_route(16, loc(0, 0), Heading::NORTH, &best);
        assert_eq!(cells.len(), 255);
        assert_eq!(cells.last(), Some(&target));
    }

    #[test]
    fn enumeration_respects_route_cap() {
        let map = WallMap::new(6);
        let field = flood_fill(&map, &[loc(5, 5)]);
        let set = enumerate_routes(&map, &field, loc(0, 0), Heading::NORTH, 5);
        assert_eq!(set.routes.len(), 5);
        assert!(set.stats.truncated);
    }

    #[test]
    fn start_on_target_yields_empty_route() {
        let map = WallMap::new(3);
        let field = flood_fill(&map, &[loc(0, 0)]);
        let set = enumerate_routes(&map, &field, loc(0, 0), Heading::NORTH, 10);
        assert_eq!(set.routes, vec![Vec::<Rotation>::new()]);
        assert_eq!(set.best(), Some(vec![]));
    }

    #[test]
    fn unverified_cells_lists_unvisited_cells_once() {
        let mut map = WallMap::new(4);
        map.record_visit(loc(0, 1));
        map.record_visit(loc(0, 3));

        let steps = vec![Step::new(Straight, 3), Step::new(Right, 1)];
        assert_eq!(
            trace_route(4, loc(0, 0), Heading::NORTH, &steps),
            vec![loc(0, 1), loc(0, 2), loc(0, 3), loc(1, 3)]
        );
        assert_eq!(
            unverified_cells(&map, loc(0, 0), Heading::NORTH, &steps),
            vec![loc(0, 2), loc(1, 3)]
        );

        map.record_visit(loc(0, 2));
        map.record_visit(loc(1, 3));
        assert!(unverified_cells(&map, loc(0, 0), Heading::NORTH, &steps).is_empty());
    }
}

//! Shortest paths on the hex grid
//!
//! - `bfs`: unit-cost breadth-first search, first visit wins
//! - `astar`: best-first search ordered by cost + hex distance
//! - `weighted_astar`: the same frontier with caller-supplied step costs
//!
//! Every search returns `None` when the goal is cut off by walls and an empty
//! path when start and goal coincide.

use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use crate::board::{hex_distance, Direction, Grid, OffsetCoord};

/// Directions from start to goal together with every cell visited on the way.
///
/// `cells[0]` is the start, `cells[i + 1]` is where `directions[i]` lands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Route {
    pub directions: Vec<Direction>,
    pub cells: Vec<OffsetCoord>,
}

impl Route {
    pub fn len(&self) -> usize {
        self.directions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    /// Append a route that starts where this one ends
    pub fn join(mut self, next: Route) -> Route {
        debug_assert_eq!(self.cells.last(), next.cells.first());
        self.directions.extend(next.directions);
        self.cells.extend(next.cells.into_iter().skip(1));
        self
    }
}

type Parents = FxHashMap<OffsetCoord, (OffsetCoord, Direction)>;

fn rebuild(parents: &Parents, start: OffsetCoord, goal: OffsetCoord) -> Option<Route> {
    let mut directions = Vec::new();
    let mut cells = vec![goal];
    let mut current = goal;
    while current != start {
        let &(prev, direction) = parents.get(&current)?;
        directions.push(direction);
        cells.push(prev);
        current = prev;
    }
    directions.reverse();
    cells.reverse();
    Some(Route { directions, cells })
}

// ============================================================================
// BREADTH-FIRST
// ============================================================================

pub fn bfs(grid: &Grid, start: OffsetCoord, goal: OffsetCoord) -> Option<Vec<Direction>> {
    bfs_route(grid, start, goal).map(|route| route.directions)
}

pub fn bfs_route(grid: &Grid, start: OffsetCoord, goal: OffsetCoord) -> Option<Route> {
    let mut queue = VecDeque::from([start]);
    let mut visited = FxHashSet::default();
    let mut parents = Parents::default();
    visited.insert(start);

    while let Some(current) = queue.pop_front() {
        if current == goal {
            return rebuild(&parents, start, goal);
        }
        for (direction, next) in grid.neighbors(current) {
            if visited.insert(next) {
                parents.insert(next, (current, direction));
                queue.push_back(next);
            }
        }
    }
    None
}

// ============================================================================
// BEST-FIRST (A*)
// ============================================================================

/// Frontier entry. Lower priority pops first; equal priorities pop in
/// insertion order.
#[derive(Debug)]
struct Frontier {
    priority: f64,
    seq: u64,
    cost: f64,
    pos: OffsetCoord,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

fn best_first<F>(grid: &Grid, start: OffsetCoord, goal: OffsetCoord, step_cost: F) -> Option<Route>
where
    F: Fn(OffsetCoord) -> f64,
{
    let mut heap = BinaryHeap::new();
    let mut costs: FxHashMap<OffsetCoord, f64> = FxHashMap::default();
    let mut parents = Parents::default();
    let mut seq = 0u64;

    costs.insert(start, 0.0);
    heap.push(Frontier {
        priority: hex_distance(start, goal) as f64,
        seq,
        cost: 0.0,
        pos: start,
    });

    while let Some(Frontier { cost, pos, .. }) = heap.pop() {
        if pos == goal {
            return rebuild(&parents, start, goal);
        }
        if costs.get(&pos).is_some_and(|&best| cost > best) {
            continue;
        }
        for (direction, next) in grid.neighbors(pos) {
            let new_cost = cost + step_cost(next);
            if costs.get(&next).map_or(true, |&known| new_cost < known) {
                costs.insert(next, new_cost);
                parents.insert(next, (pos, direction));
                seq += 1;
                heap.push(Frontier {
                    priority: new_cost + hex_distance(next, goal) as f64,
                    seq,
                    cost: new_cost,
                    pos: next,
                });
            }
        }
    }
    None
}

pub fn astar(grid: &Grid, start: OffsetCoord, goal: OffsetCoord) -> Option<Vec<Direction>> {
    astar_route(grid, start, goal).map(|route| route.directions)
}

/// A* that also reports the cells along the path
pub fn astar_route(grid: &Grid, start: OffsetCoord, goal: OffsetCoord) -> Option<Route> {
    best_first(grid, start, goal, |_| 1.0)
}

/// Length of the shortest path, searched from scratch
pub fn distance(grid: &Grid, start: OffsetCoord, goal: OffsetCoord) -> Option<usize> {
    astar_route(grid, start, goal).map(|route| route.len())
}

/// A* with a per-step cost for entering each cell.
///
/// Step costs are clamped to `cost_floor` (expected to be non-negative) so the
/// search terminates even when the raw cost goes negative. Once costs fall
/// below 1 the hex heuristic may overestimate and the result is no longer
/// guaranteed cheapest.
pub fn weighted_astar<F>(
    grid: &Grid,
    start: OffsetCoord,
    goal: OffsetCoord,
    step_cost: F,
    cost_floor: f64,
) -> Option<Vec<Direction>>
where
    F: Fn(OffsetCoord) -> f64,
{
    let floor = cost_floor.max(0.0);
    best_first(grid, start, goal, |pos| step_cost(pos).max(floor)).map(|route| route.directions)
}

/// Position reached by walking `directions` from `start`, or `None` if a step
/// is illegal
pub fn walk(grid: &Grid, start: OffsetCoord, directions: &[Direction]) -> Option<OffsetCoord> {
    directions
        .iter()
        .try_fold(start, |pos, &direction| grid.step(pos, direction))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn walled_grid() -> Grid {
        Grid::from_rows(
            ".......
             .####..
             .....#.
             .#.###.
             .#.....",
        )
        .unwrap()
    }

    fn open_cells(grid: &Grid) -> Vec<OffsetCoord> {
        grid.positions().filter(|&p| grid.is_passable(p)).collect()
    }

    #[test]
    fn test_bfs_and_astar_agree_on_length() {
        let grid = walled_grid();
        let cells = open_cells(&grid);
        for &start in &cells {
            for &goal in &cells {
                let b = bfs(&grid, start, goal).expect("walled grid is connected");
                let a = astar(&grid, start, goal).expect("walled grid is connected");
                assert_eq!(a.len(), b.len(), "{start} -> {goal}");
                assert!(a.len() as u32 >= hex_distance(start, goal));
            }
        }
    }

    #[test]
    fn test_paths_are_sound() {
        let grid = walled_grid();
        let start = OffsetCoord::new(0, 4);
        let goal = OffsetCoord::new(6, 0);
        for path in [bfs(&grid, start, goal), astar(&grid, start, goal)] {
            let path = path.unwrap();
            let mut pos = start;
            for direction in path {
                pos = grid.step(pos, direction).expect("every step must be legal");
            }
            assert_eq!(pos, goal);
        }
    }

    #[test]
    fn test_route_cells_follow_directions() {
        let grid = walled_grid();
        let start = OffsetCoord::new(2, 4);
        let goal = OffsetCoord::new(6, 2);
        for route in [bfs_route(&grid, start, goal), astar_route(&grid, start, goal)] {
            let route = route.unwrap();
            assert_eq!(route.cells.len(), route.directions.len() + 1);
            assert_eq!(route.cells.first(), Some(&start));
            assert_eq!(route.cells.last(), Some(&goal));
            for (i, &direction) in route.directions.iter().enumerate() {
                assert_eq!(grid.step(route.cells[i], direction), Some(route.cells[i + 1]));
            }
        }
    }

    #[test]
    fn test_enclosed_start_is_unreachable() {
        let mut grid = Grid::open(5, 5);
        let center = OffsetCoord::new(2, 2);
        let ring: Vec<_> = grid.neighbors(center).map(|(_, p)| p).collect();
        assert_eq!(ring.len(), 6);
        for pos in ring {
            grid.set_wall(pos);
        }
        let goal = OffsetCoord::new(0, 0);
        assert_eq!(bfs(&grid, center, goal), None);
        assert_eq!(astar(&grid, center, goal), None);
        assert_eq!(distance(&grid, center, goal), None);
        assert_eq!(astar(&grid, goal, center), None);
    }

    #[test]
    fn test_start_equals_goal() {
        let grid = Grid::open(3, 3);
        let p = OffsetCoord::new(1, 1);
        assert_eq!(bfs(&grid, p, p), Some(vec![]));
        assert_eq!(astar(&grid, p, p), Some(vec![]));
        assert_eq!(distance(&grid, p, p), Some(0));
        assert_eq!(astar_route(&grid, p, p).unwrap().cells, vec![p]);
    }

    #[test]
    fn test_open_grid_distance_matches_hex_distance() {
        let grid = Grid::open(6, 6);
        let origin = OffsetCoord::new(0, 0);
        for goal in grid.positions() {
            assert_eq!(distance(&grid, origin, goal), Some(hex_distance(origin, goal) as usize));
        }
    }

    #[test]
    fn test_bfs_prefers_lower_direction_on_ties() {
        // (0,0) -> (1,1): DownRight then Down, or Down then DownRight
        let grid = Grid::open(3, 3);
        let path = bfs(&grid, OffsetCoord::new(0, 0), OffsetCoord::new(1, 1)).unwrap();
        assert_eq!(path, vec![Direction::DownRight, Direction::Down]);
    }

    #[test]
    fn test_weighted_with_unit_cost_is_shortest() {
        let grid = walled_grid();
        let start = OffsetCoord::new(0, 4);
        let goal = OffsetCoord::new(6, 4);
        let weighted = weighted_astar(&grid, start, goal, |_| 1.0, 0.0).unwrap();
        assert_eq!(Some(weighted.len()), distance(&grid, start, goal));
    }

    #[test]
    fn test_weighted_terminates_with_negative_costs() {
        let grid = Grid::open(7, 7);
        let start = OffsetCoord::new(0, 0);
        let goal = OffsetCoord::new(6, 6);
        let path = weighted_astar(&grid, start, goal, |_| -5.0, 0.0).unwrap();
        assert_eq!(walk(&grid, start, &path), Some(goal));
    }

    #[test]
    fn test_weighted_avoids_expensive_cells() {
        // Straight down column 0 is shortest, but make it expensive
        let grid = Grid::open(3, 4);
        let start = OffsetCoord::new(0, 0);
        let goal = OffsetCoord::new(0, 3);
        let path = weighted_astar(&grid, start, goal, |p| if p.x == 0 && p != goal { 50.0 } else { 1.0 }, 0.0)
            .unwrap();
        let mut pos = start;
        for &direction in &path[..path.len() - 1] {
            pos = grid.step(pos, direction).unwrap();
            assert_ne!(pos.x, 0);
        }
        assert_eq!(walk(&grid, start, &path), Some(goal));
    }

    #[test]
    fn test_join_routes() {
        let grid = walled_grid();
        let a = OffsetCoord::new(0, 4);
        let b = OffsetCoord::new(0, 0);
        let c = OffsetCoord::new(6, 0);
        let first = astar_route(&grid, a, b).unwrap();
        let second = astar_route(&grid, b, c).unwrap();
        let total = first.len() + second.len();
        let joined = first.join(second);
        assert_eq!(joined.len(), total);
        assert_eq!(joined.cells.len(), total + 1);
        assert_eq!(walk(&grid, a, &joined.directions), Some(c));
    }

    #[test]
    fn test_walk_rejects_illegal_steps() {
        let grid = Grid::open(2, 2);
        assert_eq!(walk(&grid, OffsetCoord::new(0, 0), &[Direction::Up]), None);
        assert_eq!(
            walk(&grid, OffsetCoord::new(0, 0), &[Direction::Down]),
            Some(OffsetCoord::new(0, 1))
        );
    }
}

//! Potential fields: breadth-first distance from one origin to every cell.
//! Used to bias step costs, never to produce a route by itself.

use std::collections::VecDeque;

use crate::board::{Grid, OffsetCoord};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceField {
    width: usize,
    dist: Vec<Option<u32>>,
}

impl DistanceField {
    /// Flood fill from `origin`. A missing origin gives a field with no
    /// reachable cells.
    pub fn from_origin(grid: &Grid, origin: Option<OffsetCoord>) -> Self {
        let mut field = Self {
            width: grid.width(),
            dist: vec![None; grid.width() * grid.height()],
        };
        let Some(origin) = origin.filter(|&p| grid.contains(p)) else {
            return field;
        };

        field.dist[grid.index(origin)] = Some(0);
        let mut queue = VecDeque::from([(origin, 0u32)]);
        while let Some((pos, d)) = queue.pop_front() {
            for (_, next) in grid.neighbors(pos) {
                let slot = &mut field.dist[grid.index(next)];
                if slot.is_none() {
                    *slot = Some(d + 1);
                    queue.push_back((next, d + 1));
                }
            }
        }
        field
    }

    pub fn get(&self, pos: OffsetCoord) -> Option<u32> {
        if pos.x < 0 || pos.y < 0 || pos.x as usize >= self.width {
            return None;
        }
        self.dist
            .get(pos.y as usize * self.width + pos.x as usize)
            .copied()
            .flatten()
    }

    /// `1 / (d + 1)` for reachable cells: 1 at the origin, fading with distance
    pub fn proximity(&self, pos: OffsetCoord) -> Option<f64> {
        self.get(pos).map(|d| 1.0 / (d as f64 + 1.0))
    }

    pub fn reachable(&self) -> usize {
        self.dist.iter().filter(|d| d.is_some()).count()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::distance;

    #[test]
    fn test_field_matches_search_distance() {
        let grid = Grid::from_rows(
            "......
             .###..
             ...#..
             .#....",
        )
        .unwrap();
        let origin = OffsetCoord::new(0, 0);
        let field = DistanceField::from_origin(&grid, Some(origin));
        for pos in grid.positions() {
            if grid.is_wall(pos.x, pos.y) {
                assert_eq!(field.get(pos), None);
            } else {
                assert_eq!(field.get(pos).map(|d| d as usize), distance(&grid, origin, pos));
            }
        }
        assert_eq!(field.get(origin), Some(0));
        assert_eq!(field.proximity(origin), Some(1.0));
    }

    #[test]
    fn test_unreachable_cells_stay_none() {
        let grid = Grid::from_rows(
            "..#..
             ..#..
             ..#..",
        )
        .unwrap();
        let field = DistanceField::from_origin(&grid, Some(OffsetCoord::new(0, 0)));
        assert_eq!(field.get(OffsetCoord::new(4, 0)), None);
        assert_eq!(field.reachable(), 6);
    }

    #[test]
    fn test_missing_origin() {
        let grid = Grid::open(4, 4);
        let field = DistanceField::from_origin(&grid, None);
        assert_eq!(field.reachable(), 0);
        assert_eq!(field.get(OffsetCoord::new(1, 1)), None);
        assert_eq!(field.get(OffsetCoord::new(-1, 9)), None);
    }
}

//! Interception prediction.
//!
//! Assume the enemy walks its own shortest route to one of its bases. The
//! intercept point is the earliest cell on such a route that we can reach no
//! later than the enemy does.

use crate::board::{Grid, OffsetCoord};
use crate::path::{astar_route, distance};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Intercept {
    pub point: OffsetCoord,
    /// Steps the enemy needs to reach `point`
    pub enemy_eta: usize,
}

/// Earliest feasible intercept over all enemy bases, `None` when the enemy or
/// its bases are unknown or we are too slow everywhere.
pub fn find_intercept(
    grid: &Grid,
    agent: OffsetCoord,
    enemy: Option<OffsetCoord>,
    enemy_bases: &[OffsetCoord],
) -> Option<Intercept> {
    let enemy = enemy?;
    let mut best: Option<Intercept> = None;

    for &base in enemy_bases {
        let Some(route) = astar_route(grid, enemy, base) else {
            continue;
        };
        let earliest = route.cells.iter().enumerate().find_map(|(eta, &cell)| {
            if grid.is_wall(cell.x, cell.y) {
                return None;
            }
            let ours = distance(grid, agent, cell)?;
            (ours <= eta).then_some(Intercept {
                point: cell,
                enemy_eta: eta,
            })
        });
        if let Some(candidate) = earliest {
            if best.map_or(true, |b| candidate.enemy_eta < b.enemy_eta) {
                best = Some(candidate);
            }
        }
    }

    best
}

// ============================================================================
// TESTS
// ============================================================================

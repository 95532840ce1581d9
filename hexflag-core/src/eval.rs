//! Score-ratio evaluation for the adaptive strategy

use serde::{Deserialize, Serialize};

use crate::board::{Grid, OffsetCoord};
use crate::entity::{Roles, Score, TeamColor};
use crate::path::distance;

/// Cost-bias coefficients: `alpha` scales danger, `beta` scales opportunity
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub alpha: f64,
    pub beta: f64,
}

impl Coefficients {
    pub const fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }
}

/// Tunables for the ratio-adaptive weighted search
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatioWeights {
    /// Below this ratio we are losing and play defensively
    pub low_ratio: f64,
    /// Above this ratio we are comfortably ahead and push
    pub high_ratio: f64,
    pub defensive: Coefficients,
    pub balanced: Coefficients,
    pub aggressive: Coefficients,
    /// Lowest cost a single step may have after biasing
    pub step_cost_floor: f64,
}

impl Default for RatioWeights {
    fn default() -> Self {
        Self {
            low_ratio: 1.0,
            high_ratio: 2.0,
            defensive: Coefficients::new(0.2, 1.5),
            balanced: Coefficients::new(0.6, 1.0),
            aggressive: Coefficients::new(1.2, 0.3),
            step_cost_floor: 0.0,
        }
    }
}

impl RatioWeights {
    pub fn coefficients(&self, ratio: f64) -> Coefficients {
        if ratio < self.low_ratio {
            self.defensive
        } else if ratio > self.high_ratio {
            self.aggressive
        } else {
            self.balanced
        }
    }
}

/// Steps we need to score if our next position is `next`
fn own_eta(grid: &Grid, next: OffsetCoord, roles: &Roles, carrying: bool) -> Option<usize> {
    let base = roles.own_base?;
    if carrying {
        return distance(grid, next, base);
    }
    let flag = roles.enemy_flag()?;
    Some(distance(grid, next, flag)? + distance(grid, flag, base)?)
}

/// Steps the enemy needs to score. A missing own flag means they already hold it.
fn enemy_eta(grid: &Grid, roles: &Roles) -> Option<usize> {
    let enemy = roles.enemy_player?;
    let enemy_base = roles.enemy_base()?;
    match roles.own_flag {
        None => distance(grid, enemy, enemy_base),
        Some(flag) => Some(distance(grid, enemy, flag)? + distance(grid, flag, enemy_base)?),
    }
}

/// Score ratio after the next point, assuming whoever reaches their objective
/// first takes it (ties go to us)
pub fn projected_ratio(
    grid: &Grid,
    next: OffsetCoord,
    roles: &Roles,
    carrying: bool,
    score: Score,
    team: TeamColor,
) -> f64 {
    let ours = own_eta(grid, next, roles, carrying);
    let theirs = enemy_eta(grid, roles);

    let mut projected = score;
    match (ours, theirs) {
        (None, None) => return score.ratio(team),
        (_, None) => projected.add_point(team),
        (Some(o), Some(t)) if o <= t => projected.add_point(team),
        _ => projected.add_point(team.opponent()),
    }
    projected.ratio(team)
}

// ============================================================================
// TESTS
// ============================================================================

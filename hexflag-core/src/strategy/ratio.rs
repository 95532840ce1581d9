//! Score-ratio adaptive weighted search.
//!
//! The live score picks how much to fear the enemy player and how strongly
//! to be pulled toward the objective. Those weights bias a weighted A*; the
//! resulting first step is then checked against every other legal move by
//! the projected ratio after the next point.

use super::TurnView;
use crate::board::Direction;
use crate::eval::{projected_ratio, RatioWeights};
use crate::field::DistanceField;
use crate::path::weighted_astar;

pub fn decide(view: &TurnView, carrying: bool, weights: &RatioWeights) -> Direction {
    let roles = view.roles;
    let ratio = view.score.ratio(view.team);
    let coeffs = weights.coefficients(ratio);

    let target = if carrying {
        roles.own_base
    } else {
        roles.enemy_flag().or(roles.own_base)
    };
    let Some(target) = target else {
        return Direction::FALLBACK;
    };

    let danger = DistanceField::from_origin(view.grid, roles.enemy_player);
    let opportunity = DistanceField::from_origin(view.grid, Some(target));
    let step_cost = |pos| {
        let mut cost = 1.0;
        if let Some(p) = danger.proximity(pos) {
            cost += coeffs.alpha * p;
        }
        if let Some(p) = opportunity.proximity(pos) {
            cost -= coeffs.beta * p;
        }
        cost
    };

    let path = weighted_astar(view.grid, view.player, target, step_cost, weights.step_cost_floor).unwrap_or_default();
    let Some(&first) = path.first() else {
        return Direction::FALLBACK;
    };

    let mut best = first;
    let mut best_ratio = view
        .grid
        .step(view.player, first)
        .map_or(f64::NEG_INFINITY, |next| projected_ratio(view.grid, next, roles, carrying, view.score, view.team));
    for (direction, next) in view.grid.neighbors(view.player) {
        if direction == first {
            continue;
        }
        let candidate = projected_ratio(view.grid, next, roles, carrying, view.score, view.team);
        if candidate > best_ratio {
            best = direction;
            best_ratio = candidate;
        }
    }

    tracing::debug!(ratio, alpha = coeffs.alpha, beta = coeffs.beta, chosen = best.number(), best_ratio, "ratio decision");
    best
}

// ============================================================================
// TESTS
// ============================================================================

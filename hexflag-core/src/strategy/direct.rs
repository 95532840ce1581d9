//! Direct search: the shortest A* route through a visible enemy flag and
//! back to our base, falling back to heading home.
//!
//! `decide` recomputes every turn; `decide_cached` keeps the winning route
//! and replays it like the greedy strategy.

use super::{best_capture_route, follow_cached, CachedRoute, TurnView};
use crate::board::Direction;
use crate::path::{astar_route, Route};

/// Capture route if one exists, else the way home. Empty routes don't count.
pub fn plan(view: &TurnView) -> Option<Route> {
    let base = view.roles.own_base?;
    best_capture_route(view.grid, view.player, base, &view.roles.enemy_flags, astar_route)
        .filter(|route| !route.is_empty())
        .or_else(|| astar_route(view.grid, view.player, base).filter(|route| !route.is_empty()))
}

pub fn decide(view: &TurnView) -> Direction {
    plan(view)
        .and_then(|route| route.directions.first().copied())
        .unwrap_or(Direction::FALLBACK)
}

pub fn decide_cached(view: &TurnView, cache: &mut Option<CachedRoute>) -> Direction {
    follow_cached(cache, view.player, || plan(view))
}

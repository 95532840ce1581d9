//! Greedy cached route: BFS to the nearest enemy flag and back home, then
//! replay that route one step per turn until it runs out.

use super::{best_capture_route, follow_cached, CachedRoute, TurnView};
use crate::board::Direction;
use crate::path::bfs_route;

pub fn decide(view: &TurnView, cache: &mut Option<CachedRoute>) -> Direction {
    follow_cached(cache, view.player, || {
        let base = view.roles.own_base?;
        best_capture_route(view.grid, view.player, base, &view.roles.enemy_flags, bfs_route)
    })
}

//! Interception-aware play.
//!
//! Runs the direct search unless our flag looks threatened and we can get in
//! the enemy's way sooner than we could finish our own capture.

use serde::{Deserialize, Serialize};

use super::{best_capture_route, direct, TurnView};
use crate::board::Direction;
use crate::intercept::find_intercept;
use crate::path::{astar, astar_route, distance};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterceptConfig {
    /// Enemy path distance to our flag at which we start defending
    pub threat_distance: usize,
}

impl Default for InterceptConfig {
    fn default() -> Self {
        Self { threat_distance: 3 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterceptMode {
    /// Intercept only while the flag is threatened
    Dynamic,
    /// Once we have scored, intercept whenever possible
    Defend,
}

pub fn decide(
    view: &TurnView,
    carrying: bool,
    captures: u32,
    config: &InterceptConfig,
    mode: InterceptMode,
) -> Direction {
    let roles = view.roles;
    if carrying {
        return roles
            .own_base
            .and_then(|base| astar(view.grid, view.player, base))
            .and_then(|path| path.first().copied())
            .unwrap_or(Direction::FALLBACK);
    }

    let Some(hit) = find_intercept(view.grid, view.player, roles.enemy_player, &roles.enemy_bases) else {
        return direct::decide(view);
    };

    let threatened = match (roles.own_flag, roles.enemy_player) {
        (None, _) => true,
        (Some(flag), Some(enemy)) => {
            distance(view.grid, enemy, flag).is_some_and(|d| d <= config.threat_distance)
        }
        (Some(_), None) => false,
    };
    let needed = threatened || (mode == InterceptMode::Defend && captures >= 1);
    if !needed {
        return direct::decide(view);
    }

    let offense = roles.own_base.and_then(|base| {
        best_capture_route(view.grid, view.player, base, &roles.enemy_flags, astar_route).map(|route| route.len())
    });
    match astar(view.grid, view.player, hit.point) {
        Some(path) if !path.is_empty() && offense.map_or(true, |len| path.len() <= len) => {
            tracing::debug!(point = %hit.point, eta = hit.enemy_eta, "intercepting");
            path[0]
        }
        _ => direct::decide(view),
    }
}

// ============================================================================
// TESTS
// ============================================================================

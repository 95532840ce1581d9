//! Strategy policies
//!
//! A closed set of decision variants sharing the stateless geometry and search
//! functions. Each variant is a plain function over one turn's view; any
//! memory it needs lives in the agent's `AgentState`.

pub mod direct;
pub mod greedy;
pub mod intercept;
pub mod random;
pub mod ratio;

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use crate::board::{Direction, Grid, OffsetCoord};
use crate::entity::{Roles, Score, TeamColor};
use crate::error::HexflagError;
use crate::path::Route;

/// Which policy an agent plays
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Uniformly random legal move
    Random,
    /// BFS capture route, cached until used up
    Greedy,
    /// A* capture route, recomputed every turn
    #[default]
    Direct,
    /// A* capture route, cached until used up
    CachedDirect,
    /// Direct search plus interception when our flag is threatened
    Intercept,
    /// Like `Intercept`, but defends permanently after our first capture
    InterceptDefend,
    /// Score-ratio adaptive weighted search
    Ratio,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 7] = [
        StrategyKind::Random,
        StrategyKind::Greedy,
        StrategyKind::Direct,
        StrategyKind::CachedDirect,
        StrategyKind::Intercept,
        StrategyKind::InterceptDefend,
        StrategyKind::Ratio,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Random => "random",
            StrategyKind::Greedy => "greedy",
            StrategyKind::Direct => "direct",
            StrategyKind::CachedDirect => "cached-direct",
            StrategyKind::Intercept => "intercept",
            StrategyKind::InterceptDefend => "intercept-defend",
            StrategyKind::Ratio => "ratio",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            StrategyKind::Random => "uniformly random legal move",
            StrategyKind::Greedy => "BFS flag-and-return route, cached until used up",
            StrategyKind::Direct => "A* flag-and-return route, recomputed every turn",
            StrategyKind::CachedDirect => "A* flag-and-return route, cached until used up",
            StrategyKind::Intercept => "direct search, intercepts when our flag is threatened",
            StrategyKind::InterceptDefend => "intercept, and always defend after the first capture",
            StrategyKind::Ratio => "weighted search tuned by the live score ratio",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = HexflagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| HexflagError::UnknownStrategy(s.to_string()))
    }
}

/// Everything a policy may look at on one turn. The own player is known to
/// be present.
#[derive(Clone, Copy, Debug)]
pub struct TurnView<'a> {
    pub grid: &'a Grid,
    pub roles: &'a Roles,
    pub player: OffsetCoord,
    pub score: Score,
    pub team: TeamColor,
}

/// A route being consumed one step per turn.
///
/// Each step remembers where the player must stand when it is taken; if the
/// player turns up somewhere else the rest of the route is useless.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CachedRoute {
    steps: VecDeque<(OffsetCoord, Direction)>,
}

impl CachedRoute {
    pub fn new(route: Route) -> Self {
        Self {
            steps: route.cells.into_iter().zip(route.directions).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Next step if the player is where the route expects
    pub fn pop_from(&mut self, player: OffsetCoord) -> Option<Direction> {
        match self.steps.front() {
            Some(&(expected, direction)) if expected == player => {
                self.steps.pop_front();
                Some(direction)
            }
            _ => None,
        }
    }
}

/// Take the next cached step, refilling the cache with `plan` when it is
/// empty or stale.
pub(crate) fn follow_cached<F>(cache: &mut Option<CachedRoute>, player: OffsetCoord, plan: F) -> Direction
where
    F: FnOnce() -> Option<Route>,
{
    if let Some(direction) = cache.as_mut().and_then(|route| route.pop_from(player)) {
        return direction;
    }
    if cache.as_ref().is_some_and(|route| !route.is_empty()) {
        tracing::debug!(%player, "player left the cached route, replanning");
    }
    *cache = None;

    let Some(route) = plan().filter(|route| !route.is_empty()) else {
        return Direction::FALLBACK;
    };
    tracing::debug!(%player, steps = route.len(), "cached new route");
    let mut fresh = CachedRoute::new(route);
    let direction = fresh.pop_from(player).unwrap_or(Direction::FALLBACK);
    *cache = Some(fresh);
    direction
}

/// Shortest player → flag → base route over all visible enemy flags.
/// Earlier flags win ties.
pub(crate) fn best_capture_route<S>(
    grid: &Grid,
    player: OffsetCoord,
    base: OffsetCoord,
    flags: &[OffsetCoord],
    search: S,
) -> Option<Route>
where
    S: Fn(&Grid, OffsetCoord, OffsetCoord) -> Option<Route>,
{
    let mut best: Option<Route> = None;
    for &flag in flags {
        let Some(to_flag) = search(grid, player, flag) else {
            continue;
        };
        let Some(to_base) = search(grid, flag, base) else {
            continue;
        };
        let route = to_flag.join(to_base);
        if best.as_ref().map_or(true, |b| route.len() < b.len()) {
            best = Some(route);
        }
    }
    best
}

// ============================================================================
// TESTS
// ============================================================================

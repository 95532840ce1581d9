//! The playing agent: one strategy, one team, and the memory it carries
//! between turns.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::board::{Direction, Grid};
use crate::carry::FlagCarryTracker;
use crate::config::AgentConfig;
use crate::entity::{Entity, Roles, Score, TeamColor};
use crate::strategy::intercept::InterceptMode;
use crate::strategy::{self, CachedRoute, StrategyKind, TurnView};

/// Per-agent memory, updated once per turn
#[derive(Clone, Debug, Default)]
pub struct AgentState {
    pub carry: FlagCarryTracker,
    /// Route being replayed by the cached strategies
    pub route: Option<CachedRoute>,
}

pub struct Agent {
    team: TeamColor,
    config: AgentConfig,
    state: AgentState,
    rng: ChaCha8Rng,
}

impl Agent {
    pub fn new(team: TeamColor, config: AgentConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed_or_default());
        let state = AgentState {
            carry: FlagCarryTracker::new(config.capture_rule),
            route: None,
        };
        Self {
            team,
            config,
            state,
            rng,
        }
    }

    pub fn with_strategy(team: TeamColor, strategy: StrategyKind) -> Self {
        Self::new(team, AgentConfig::new(strategy))
    }

    /// Choose this turn's move. Never fails: anything missing degrades to
    /// `Direction::FALLBACK`.
    pub fn decide(&mut self, grid: &Grid, entities: &[Entity], score: Option<&Score>) -> Direction {
        let roles = Roles::interpret(entities, self.team);
        self.state
            .carry
            .update(roles.own_player, roles.own_base, roles.enemy_flag());

        let Some(player) = roles.own_player else {
            tracing::debug!(team = %self.team, "own player not visible");
            return Direction::FALLBACK;
        };
        let view = TurnView {
            grid,
            roles: &roles,
            player,
            score: score.copied().unwrap_or_default(),
            team: self.team,
        };

        let carrying = self.state.carry.carrying();
        let direction = match self.config.strategy {
            StrategyKind::Random => strategy::random::decide(&view, &mut self.rng),
            StrategyKind::Greedy => strategy::greedy::decide(&view, &mut self.state.route),
            StrategyKind::Direct => strategy::direct::decide(&view),
            StrategyKind::CachedDirect => strategy::direct::decide_cached(&view, &mut self.state.route),
            StrategyKind::Intercept => strategy::intercept::decide(
                &view,
                carrying,
                self.state.carry.captures(),
                &self.config.intercept,
                InterceptMode::Dynamic,
            ),
            StrategyKind::InterceptDefend => strategy::intercept::decide(
                &view,
                carrying,
                self.state.carry.captures(),
                &self.config.intercept,
                InterceptMode::Defend,
            ),
            StrategyKind::Ratio => strategy::ratio::decide(&view, carrying, &self.config.ratio),
        };

        tracing::debug!(
            team = %self.team,
            strategy = %self.config.strategy,
            %player,
            carrying,
            direction = direction.number(),
            "decided"
        );
        direction
    }

    pub fn team(&self) -> TeamColor {
        self.team
    }

    pub fn strategy(&self) -> StrategyKind {
        self.config.strategy
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    pub fn carrying(&self) -> bool {
        self.state.carry.carrying()
    }

    pub fn captures(&self) -> u32 {
        self.state.carry.captures()
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! Flag-carry inference.
//!
//! The server never says who holds a flag. We infer it from the enemy flag
//! disappearing right after we stood on it, and from it reappearing (or us
//! reaching home) afterwards.
//!
//! | state        | observation                                   | next         |
//! |--------------|-----------------------------------------------|--------------|
//! | NotCarrying  | flag seen at P last turn, gone now, we were at P | Carrying  |
//! | NotCarrying  | anything else                                 | NotCarrying  |
//! | Carrying     | enemy flag visible again                      | NotCarrying  |
//! | Carrying     | standing on own base                          | NotCarrying  |
//! | Carrying     | anything else                                 | Carrying     |

use serde::{Deserialize, Serialize};

use crate::board::OffsetCoord;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarryState {
    #[default]
    NotCarrying,
    Carrying,
}

/// When releasing the flag counts as a capture
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaptureRule {
    /// Only a release while standing on the own base
    #[default]
    BaseArrival,
    /// Also a flag respawn seen anywhere, assuming we delivered it
    BaseArrivalOrRespawn,
}

/// What the tracker sees on one turn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Observation {
    pub player: OffsetCoord,
    pub own_base: Option<OffsetCoord>,
    pub enemy_flag: Option<OffsetCoord>,
    pub last_pos: Option<OffsetCoord>,
    pub last_seen_enemy_flag: Option<OffsetCoord>,
}

/// Pure transition function: next state and whether a capture happened
pub fn transition(state: CarryState, obs: &Observation, rule: CaptureRule) -> (CarryState, bool) {
    let at_base = obs.own_base == Some(obs.player);
    match state {
        CarryState::NotCarrying => {
            let picked_up = obs.enemy_flag.is_none()
                && obs.last_seen_enemy_flag.is_some()
                && obs.last_pos == obs.last_seen_enemy_flag;
            if picked_up {
                (CarryState::Carrying, false)
            } else {
                (CarryState::NotCarrying, false)
            }
        }
        CarryState::Carrying => {
            let respawned = obs.enemy_flag.is_some();
            if respawned || at_base {
                let captured = match rule {
                    CaptureRule::BaseArrival => at_base,
                    CaptureRule::BaseArrivalOrRespawn => true,
                };
                (CarryState::NotCarrying, captured)
            } else {
                (CarryState::Carrying, false)
            }
        }
    }
}

/// Per-agent memory needed to run the transition each turn
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlagCarryTracker {
    state: CarryState,
    rule: CaptureRule,
    last_pos: Option<OffsetCoord>,
    last_seen_enemy_flag: Option<OffsetCoord>,
    captures: u32,
}

impl FlagCarryTracker {
    pub fn new(rule: CaptureRule) -> Self {
        Self {
            rule,
            ..Default::default()
        }
    }

    /// Advance one turn. Does nothing while our player is missing from the
    /// snapshot.
    pub fn update(
        &mut self,
        player: Option<OffsetCoord>,
        own_base: Option<OffsetCoord>,
        enemy_flag: Option<OffsetCoord>,
    ) {
        let Some(player) = player else {
            return;
        };
        let obs = Observation {
            player,
            own_base,
            enemy_flag,
            last_pos: self.last_pos,
            last_seen_enemy_flag: self.last_seen_enemy_flag,
        };
        let (next, captured) = transition(self.state, &obs, self.rule);
        if next != self.state {
            tracing::debug!(?next, %player, captured, "carry state changed");
        }
        self.state = next;
        if captured {
            self.captures += 1;
        }
        self.last_pos = Some(player);
        self.last_seen_enemy_flag = enemy_flag;
    }

    pub fn state(&self) -> CarryState {
        self.state
    }

    pub fn carrying(&self) -> bool {
        self.state == CarryState::Carrying
    }

    pub fn captures(&self) -> u32 {
        self.captures
    }

    pub fn last_pos(&self) -> Option<OffsetCoord> {
        self.last_pos
    }

    pub fn last_seen_enemy_flag(&self) -> Option<OffsetCoord> {
        self.last_seen_enemy_flag
    }
}

// ============================================================================
// TESTS
// ============================================================================

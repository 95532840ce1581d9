//! Offline capture-the-flag rules, for playing agents against each other
//! without the game server.
//!
//! Both players move simultaneously. Order of resolution each turn: pickup,
//! movement, tagging, capture. A flag is picked up by a player that starts
//! the turn standing on it, so agents see themselves on the flag for one
//! snapshot before it vanishes, as on the game server.

use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::board::{Direction, Grid, OffsetCoord};
use crate::entity::{Entity, EntityKind, Score, Snapshot, TeamColor};
use crate::error::HexflagError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Side {
    player: OffsetCoord,
    base: OffsetCoord,
    flag_home: OffsetCoord,
    /// This team's flag is in the enemy player's hands
    flag_taken: bool,
    captures: u32,
}

impl Side {
    fn from_snapshot(snapshot: &Snapshot, team: TeamColor) -> Result<Self, HexflagError> {
        let find = |kind: EntityKind| {
            snapshot
                .entities
                .iter()
                .find(|e| e.kind == kind && e.team == team)
                .map(|e| e.location)
                .ok_or_else(|| HexflagError::Setup(format!("no {kind:?} for {team}")))
        };
        Ok(Self {
            player: find(EntityKind::Player)?,
            base: find(EntityKind::Base)?,
            flag_home: find(EntityKind::Flag)?,
            flag_taken: false,
            captures: 0,
        })
    }
}

/// Turn events, mostly for tests and logging
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TurnEvents {
    pub tagged: Option<TeamColor>,
    pub picked_up: [bool; 2],
    pub scored: [bool; 2],
}

fn slot(team: TeamColor) -> usize {
    match team {
        TeamColor::Red => 0,
        TeamColor::Blue => 1,
    }
}

#[derive(Clone, Debug)]
pub struct Arena {
    grid: Grid,
    red: Side,
    blue: Side,
    score: Score,
    turn: u32,
}

impl Arena {
    pub fn new(snapshot: &Snapshot) -> Result<Self, HexflagError> {
        Ok(Self {
            grid: snapshot.map.clone(),
            red: Side::from_snapshot(snapshot, TeamColor::Red)?,
            blue: Side::from_snapshot(snapshot, TeamColor::Blue)?,
            score: snapshot.score.unwrap_or_default(),
            turn: 0,
        })
    }

    fn side(&self, team: TeamColor) -> &Side {
        match team {
            TeamColor::Red => &self.red,
            TeamColor::Blue => &self.blue,
        }
    }

    fn side_mut(&mut self, team: TeamColor) -> &mut Side {
        match team {
            TeamColor::Red => &mut self.red,
            TeamColor::Blue => &mut self.blue,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn player(&self, team: TeamColor) -> OffsetCoord {
        self.side(team).player
    }

    /// Whether `team`'s player holds the enemy flag
    pub fn carrying(&self, team: TeamColor) -> bool {
        self.side(team.opponent()).flag_taken
    }

    pub fn captures(&self, team: TeamColor) -> u32 {
        self.side(team).captures
    }

    /// Entities as the server would report them: carried flags are hidden
    pub fn entities(&self) -> Vec<Entity> {
        let mut entities = Vec::with_capacity(6);
        for team in [TeamColor::Red, TeamColor::Blue] {
            let side = self.side(team);
            entities.push(Entity::new(EntityKind::Player, team, side.player));
            entities.push(Entity::new(EntityKind::Base, team, side.base));
            if !side.flag_taken {
                entities.push(Entity::new(EntityKind::Flag, team, side.flag_home));
            }
        }
        entities
    }

    /// The full picture both agents receive this turn
    pub fn view(&self) -> Snapshot {
        Snapshot {
            map: self.grid.clone(),
            entities: self.entities(),
            score: Some(self.score),
        }
    }

    /// Apply one simultaneous move. Illegal moves leave the player in place.
    pub fn step(&mut self, red_move: Direction, blue_move: Direction) -> TurnEvents {
        let mut events = TurnEvents::default();
        self.turn += 1;

        for team in [TeamColor::Red, TeamColor::Blue] {
            let player = self.side(team).player;
            let enemy = self.side_mut(team.opponent());
            if !enemy.flag_taken && enemy.flag_home == player {
                enemy.flag_taken = true;
                events.picked_up[slot(team)] = true;
                tracing::debug!(turn = self.turn, %team, "flag picked up");
            }
        }

        for (team, direction) in [(TeamColor::Red, red_move), (TeamColor::Blue, blue_move)] {
            let from = self.side(team).player;
            if let Some(to) = self.grid.step(from, direction) {
                self.side_mut(team).player = to;
            }
        }

        if self.red.player == self.blue.player {
            for team in [TeamColor::Red, TeamColor::Blue] {
                if self.carrying(team) {
                    let side = self.side_mut(team);
                    side.player = side.base;
                    self.side_mut(team.opponent()).flag_taken = false;
                    events.tagged = Some(team);
                    tracing::debug!(turn = self.turn, %team, "carrier tagged");
                }
            }
        }

        for team in [TeamColor::Red, TeamColor::Blue] {
            let side = *self.side(team);
            if self.carrying(team) && side.player == side.base {
                self.side_mut(team.opponent()).flag_taken = false;
                self.side_mut(team).captures += 1;
                self.score.add_point(team);
                events.scored[slot(team)] = true;
                tracing::debug!(turn = self.turn, %team, score = ?self.score, "flag captured");
            }
        }

        events
    }
}

/// Result of one arena game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub score: Score,
    pub turns: u32,
    pub red_captures: u32,
    pub blue_captures: u32,
}

impl MatchOutcome {
    pub fn winner(&self) -> Option<TeamColor> {
        match self.red_captures.cmp(&self.blue_captures) {
            std::cmp::Ordering::Greater => Some(TeamColor::Red),
            std::cmp::Ordering::Less => Some(TeamColor::Blue),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Play `turns` turns between two agents starting from `snapshot`
pub fn play_match(
    snapshot: &Snapshot,
    red: &mut Agent,
    blue: &mut Agent,
    turns: u32,
) -> Result<MatchOutcome, HexflagError> {
    let mut arena = Arena::new(snapshot)?;
    for _ in 0..turns {
        let entities = arena.entities();
        let score = arena.score();
        let red_move = red.decide(arena.grid(), &entities, Some(&score));
        let blue_move = blue.decide(arena.grid(), &entities, Some(&score));
        arena.step(red_move, blue_move);
    }

    Ok(MatchOutcome {
        score: arena.score(),
        turns: arena.turn(),
        red_captures: arena.captures(TeamColor::Red),
        blue_captures: arena.captures(TeamColor::Blue),
    })
}

// ============================================================================
// TESTS
// ============================================================================

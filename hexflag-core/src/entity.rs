//! Entities, scores and snapshots as the game server reports them, and the
//! per-turn interpretation of an entity list into roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::board::{Grid, OffsetCoord};
use crate::error::HexflagError;

// ============================================================================
// WIRE MODELS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamColor {
    Red,
    Blue,
}

impl TeamColor {
    pub fn opponent(self) -> Self {
        match self {
            TeamColor::Red => TeamColor::Blue,
            TeamColor::Blue => TeamColor::Red,
        }
    }
}

impl fmt::Display for TeamColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TeamColor::Red => write!(f, "Red"),
            TeamColor::Blue => write!(f, "Blue"),
        }
    }
}

impl FromStr for TeamColor {
    type Err = HexflagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "red" => Ok(TeamColor::Red),
            "blue" => Ok(TeamColor::Blue),
            _ => Err(HexflagError::UnknownTeam(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Base,
    Flag,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    #[serde(rename = "teamColor")]
    pub team: TeamColor,
    pub location: OffsetCoord,
}

impl Entity {
    pub fn new(kind: EntityKind, team: TeamColor, location: OffsetCoord) -> Self {
        Self { kind, team, location }
    }
}

/// Running score. Missing keys count as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    #[serde(rename = "Red", default)]
    pub red: i64,
    #[serde(rename = "Blue", default)]
    pub blue: i64,
}

impl Score {
    pub fn new(red: i64, blue: i64) -> Self {
        Self { red, blue }
    }

    pub fn of(&self, team: TeamColor) -> i64 {
        match team {
            TeamColor::Red => self.red,
            TeamColor::Blue => self.blue,
        }
    }

    pub fn add_point(&mut self, team: TeamColor) {
        match team {
            TeamColor::Red => self.red += 1,
            TeamColor::Blue => self.blue += 1,
        }
    }

    /// `(own + 1) / (opponent + 1)`
    pub fn ratio(&self, team: TeamColor) -> f64 {
        (self.of(team) + 1) as f64 / (self.of(team.opponent()) + 1) as f64
    }
}

/// One turn's worth of input for `decide`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub map: Grid,
    pub entities: Vec<Entity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self, HexflagError> {
        let content = std::fs::read_to_string(path).map_err(|e| HexflagError::io(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), HexflagError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| HexflagError::io(path, e))
    }
}

// ============================================================================
// ROLES
// ============================================================================

/// Entity list classified from one team's point of view.
///
/// Singleton roles keep the first matching entity. Absent roles stay `None`:
/// a player can vanish for a tick while respawning.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roles {
    pub own_player: Option<OffsetCoord>,
    pub own_base: Option<OffsetCoord>,
    pub own_flag: Option<OffsetCoord>,
    pub enemy_player: Option<OffsetCoord>,
    pub enemy_bases: Vec<OffsetCoord>,
    pub enemy_flags: Vec<OffsetCoord>,
}

impl Roles {
    pub fn interpret(entities: &[Entity], own_team: TeamColor) -> Self {
        let mut roles = Roles::default();
        for entity in entities {
            let own = entity.team == own_team;
            let pos = entity.location;
            match (entity.kind, own) {
                (EntityKind::Player, true) => {
                    roles.own_player.get_or_insert(pos);
                }
                (EntityKind::Player, false) => {
                    roles.enemy_player.get_or_insert(pos);
                }
                (EntityKind::Base, true) => {
                    roles.own_base.get_or_insert(pos);
                }
                (EntityKind::Base, false) => roles.enemy_bases.push(pos),
                (EntityKind::Flag, true) => {
                    roles.own_flag.get_or_insert(pos);
                }
                (EntityKind::Flag, false) => roles.enemy_flags.push(pos),
            }
        }
        roles
    }

    pub fn enemy_flag(&self) -> Option<OffsetCoord> {
        self.enemy_flags.first().copied()
    }

    pub fn enemy_base(&self) -> Option<OffsetCoord> {
        self.enemy_bases.first().copied()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: i32, y: i32) -> OffsetCoord {
        OffsetCoord::new(x, y)
    }

    #[test]
    fn test_interpret_roles() {
        let entities = vec![
            Entity::new(EntityKind::Flag, TeamColor::Blue, at(5, 5)),
            Entity::new(EntityKind::Player, TeamColor::Red, at(1, 1)),
            Entity::new(EntityKind::Base, TeamColor::Blue, at(6, 6)),
            Entity::new(EntityKind::Base, TeamColor::Red, at(0, 0)),
            Entity::new(EntityKind::Player, TeamColor::Blue, at(4, 4)),
            Entity::new(EntityKind::Base, TeamColor::Blue, at(6, 0)),
            Entity::new(EntityKind::Flag, TeamColor::Red, at(0, 1)),
        ];

        let red = Roles::interpret(&entities, TeamColor::Red);
        assert_eq!(red.own_player, Some(at(1, 1)));
        assert_eq!(red.own_base, Some(at(0, 0)));
        assert_eq!(red.own_flag, Some(at(0, 1)));
        assert_eq!(red.enemy_player, Some(at(4, 4)));
        assert_eq!(red.enemy_bases, vec![at(6, 6), at(6, 0)]);
        assert_eq!(red.enemy_flag(), Some(at(5, 5)));

        let blue = Roles::interpret(&entities, TeamColor::Blue);
        assert_eq!(blue.own_player, Some(at(4, 4)));
        assert_eq!(blue.own_base, Some(at(6, 6)));
        assert_eq!(blue.enemy_bases, vec![at(0, 0)]);
        assert_eq!(blue.enemy_flags, vec![at(0, 1)]);
    }

    #[test]
    fn test_missing_roles_are_none() {
        let roles = Roles::interpret(&[], TeamColor::Red);
        assert_eq!(roles, Roles::default());
        assert_eq!(roles.enemy_flag(), None);
    }

    #[test]
    fn test_entity_json() {
        let json = r#"[{"type":"Player","teamColor":"Red","location":{"x":3,"y":4}}]"#;
        let entities: Vec<Entity> = serde_json::from_str(json).unwrap();
        assert_eq!(entities[0], Entity::new(EntityKind::Player, TeamColor::Red, at(3, 4)));
    }

    #[test]
    fn test_score_ratio() {
        let score: Score = serde_json::from_str(r#"{"Red": 3}"#).unwrap();
        assert_eq!(score, Score::new(3, 0));
        assert_eq!(score.ratio(TeamColor::Red), 4.0);
        assert_eq!(score.ratio(TeamColor::Blue), 0.25);
        assert_eq!(Score::default().ratio(TeamColor::Blue), 1.0);
    }

    #[test]
    fn test_team_from_str() {
        assert_eq!("red".parse::<TeamColor>().unwrap(), TeamColor::Red);
        assert_eq!("Blue".parse::<TeamColor>().unwrap(), TeamColor::Blue);
        assert!("green".parse::<TeamColor>().is_err());
    }
}

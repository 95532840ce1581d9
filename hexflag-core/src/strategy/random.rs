//! Baseline: a uniformly random legal move

use rand::seq::IteratorRandom;
use rand::Rng;

use super::TurnView;
use crate::board::Direction;

pub fn decide<R: Rng>(view: &TurnView, rng: &mut R) -> Direction {
    view.grid
        .neighbors(view.player)
        .map(|(direction, _)| direction)
        .choose(rng)
        .unwrap_or(Direction::FALLBACK)
}

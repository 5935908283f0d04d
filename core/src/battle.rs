use core::fmt;

use crate::rng::BattleRng;
use crate::types::{Monster, ObjectId};

pub const STRENGTH_WEIGHT: f64 = 1.5;
pub const AGILITY_WEIGHT: f64 = 1.2;
pub const INTELLIGENCE_WEIGHT: f64 = 1.1;
/// Luck is drawn uniformly from [0, LUCK_MAX]
pub const LUCK_MAX: u32 = 40;

/// Weighted attribute part of a score, before luck.
pub fn base_score(monster: &Monster) -> f64 {
    monster.strength as f64 * STRENGTH_WEIGHT
        + monster.agility as f64 * AGILITY_WEIGHT
        + monster.intelligence as f64 * INTELLIGENCE_WEIGHT
}

/// Full score for a given luck value.
pub fn score(monster: &Monster, luck: u32) -> f64 {
    base_score(monster) + luck as f64
}

/// Draw one luck value in [0, LUCK_MAX].
pub fn roll_luck<R: BattleRng>(rng: &mut R) -> u32 {
    rng.gen_range(LUCK_MAX as usize + 1) as u32
}

/// One combatant's scored entry for a battle.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCard {
    pub monster: Monster,
    pub luck: u32,
    pub score: f64,
}

/// Score a monster with a fresh luck draw.
pub fn score_monster<R: BattleRng>(monster: Monster, rng: &mut R) -> ScoreCard {
    let luck = roll_luck(rng);
    let score = score(&monster, luck);
    ScoreCard {
        monster,
        luck,
        score,
    }
}

/// Which combatant, by input order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

/// Decided battle between two scored combatants.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub first: ScoreCard,
    pub second: ScoreCard,
    pub winner: Side,
}

impl Verdict {
    pub fn winner(&self) -> &ScoreCard {
        match self.winner {
            Side::First => &self.first,
            Side::Second => &self.second,
        }
    }

    pub fn loser(&self) -> &ScoreCard {
        match self.winner {
            Side::First => &self.second,
            Side::Second => &self.first,
        }
    }
}

/// The first combatant wins unless the second scores strictly higher.
pub fn decide(first: ScoreCard, second: ScoreCard) -> Verdict {
    let winner = if first.score >= second.score {
        Side::First
    } else {
        Side::Second
    };
    Verdict {
        first,
        second,
        winner,
    }
}

/// Progress events produced while a battle is settled.
#[derive(Debug, Clone, PartialEq)]
pub enum BattleEvent {
    Scanning { id: ObjectId },
    LookupFailed { id: ObjectId, reason: String },
    ScoringStarted,
    Scored { name: String, score: f64, luck: u32 },
    Victory { name: String, id: ObjectId },
    Submitting { winner: ObjectId, loser: ObjectId },
    Aborted,
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEvent::Scanning { id } => write!(f, "Scanning monster {id}..."),
            BattleEvent::LookupFailed { id, .. } => write!(f, "Monster {id} not found!"),
            BattleEvent::ScoringStarted => write!(f, "\n--- TEE SCORING IN PROGRESS ---"),
            BattleEvent::Scored { name, score, luck } => {
                write!(f, "   {name} -> Score: {score:.2} (Luck: {luck})")
            }
            BattleEvent::Victory { name, .. } => write!(f, "\nVICTORY: {name}!"),
            BattleEvent::Submitting { winner, .. } => {
                write!(f, "The TEE declares {winner} the winner! Sending to the chain...")
            }
            BattleEvent::Aborted => write!(f, "Battle aborted, nothing was submitted."),
        }
    }
}

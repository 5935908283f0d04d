//! Turn-based duel preview
//!
//! An offline rehearsal of a fight between two monsters. Each turn both
//! fighters pick a stance; a stance that counters the enemy's deals bonus
//! damage. Nothing here is ever submitted on chain.

use core::fmt;

use serde::Serialize;

use crate::rng::BattleRng;
use crate::types::{Monster, ObjectId};

pub const STARTING_HP: u64 = 100;
pub const MAX_TURNS: u32 = 15;
/// Base XP for any win, plus `XP_PER_LEVEL` per level of the defeated monster
pub const BASE_XP: u64 = 20;
pub const XP_PER_LEVEL: u64 = 5;

const AGENT_FOCUS_CAP: f64 = 0.95;
const OPPONENT_FOCUS_CAP: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stance {
    Force,
    Intelligence,
    Agility,
}

/// The three monster attributes a stance can use or hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Strength,
    Agility,
    Intelligence,
}

impl Stat {
    fn of(self, monster: &Monster) -> u64 {
        match self {
            Stat::Strength => monster.strength,
            Stat::Agility => monster.agility,
            Stat::Intelligence => monster.intelligence,
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stat::Strength => "strength",
            Stat::Agility => "agility",
            Stat::Intelligence => "intelligence",
        })
    }
}

impl Stance {
    pub const ALL: [Stance; 3] = [Stance::Force, Stance::Intelligence, Stance::Agility];

    /// The stance that beats this one
    pub fn countered_by(self) -> Stance {
        match self {
            Stance::Force => Stance::Agility,
            Stance::Intelligence => Stance::Force,
            Stance::Agility => Stance::Intelligence,
        }
    }

    /// Attribute the attacker strikes with
    pub fn attack_stat(self) -> Stat {
        match self {
            Stance::Force => Stat::Strength,
            Stance::Intelligence => Stat::Intelligence,
            Stance::Agility => Stat::Agility,
        }
    }

    /// Attribute the defender resists with
    pub fn defense_stat(self) -> Stat {
        match self {
            Stance::Force => Stat::Intelligence,
            Stance::Intelligence => Stat::Agility,
            Stance::Agility => Stat::Strength,
        }
    }

    fn from_stat(stat: Stat) -> Stance {
        match stat {
            Stat::Strength => Stance::Force,
            Stat::Agility => Stance::Agility,
            Stat::Intelligence => Stance::Intelligence,
        }
    }
}

/// Highest attribute; ties go to strength, then agility.
pub fn dominant_stat(monster: &Monster) -> Stat {
    let mut best = Stat::Strength;
    for stat in [Stat::Agility, Stat::Intelligence] {
        if stat.of(monster) > best.of(monster) {
            best = stat;
        }
    }
    best
}

fn random_stance<R: BattleRng>(rng: &mut R) -> Stance {
    let index = (rng.next_unit() * Stance::ALL.len() as f64) as usize;
    Stance::ALL.get(index).copied().unwrap_or(Stance::Force)
}

/// Counter the enemy's dominant stance with probability `focus`.
fn choose_stance<R: BattleRng>(enemy: &Monster, focus: f64, rng: &mut R) -> Stance {
    if rng.next_unit() < focus {
        Stance::from_stat(dominant_stat(enemy)).countered_by()
    } else {
        random_stance(rng)
    }
}

fn agent_focus(monster: &Monster) -> f64 {
    (monster.intelligence as f64 / 100.0).min(AGENT_FOCUS_CAP)
}

fn opponent_focus(monster: &Monster) -> f64 {
    (monster.intelligence as f64 / 120.0).min(OPPONENT_FOCUS_CAP)
}

/// Damage dealt by `attacker` in `stance` against `defender`. Always at least 1.
pub fn damage(attacker: &Monster, defender: &Monster, stance: Stance, countered: bool) -> u64 {
    let mut base = (stance.attack_stat().of(attacker) / 2).max(1);
    if countered {
        base = base.saturating_mul(3) / 2;
    }
    let reduction = stance.defense_stat().of(defender) / 4;
    base.saturating_sub(reduction).max(1)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuelTurn {
    pub turn: u32,
    pub player_stance: Stance,
    pub opponent_stance: Stance,
    pub damage_to_opponent: u64,
    pub damage_to_player: u64,
    pub player_hp: u64,
    pub opponent_hp: u64,
    pub player_countered: bool,
    pub opponent_countered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuelReport {
    pub id: String,
    pub winner_id: ObjectId,
    pub loser_id: ObjectId,
    pub xp_gain: u64,
    pub turns: Vec<DuelTurn>,
    pub winner_final_hp: u64,
    pub player_final_hp: u64,
    pub opponent_final_hp: u64,
    pub strategy_note: String,
}

impl DuelReport {
    pub fn total_turns(&self) -> usize {
        self.turns.len()
    }
}

/// Simulate a duel. The player wins only with strictly more HP left.
pub fn simulate_duel<R: BattleRng>(player: &Monster, opponent: &Monster, rng: &mut R) -> DuelReport {
    let mut player_hp = STARTING_HP;
    let mut opponent_hp = STARTING_HP;
    let mut turns = Vec::new();

    for turn in 1..=MAX_TURNS {
        let player_stance = choose_stance(opponent, agent_focus(player), rng);
        let opponent_stance = choose_stance(player, opponent_focus(opponent), rng);

        let player_countered = opponent_stance.countered_by() == player_stance;
        let opponent_countered = player_stance.countered_by() == opponent_stance;

        let damage_to_opponent = damage(player, opponent, player_stance, player_countered);
        let damage_to_player = damage(opponent, player, opponent_stance, opponent_countered);

        opponent_hp = opponent_hp.saturating_sub(damage_to_opponent);
        player_hp = player_hp.saturating_sub(damage_to_player);

        turns.push(DuelTurn {
            turn,
            player_stance,
            opponent_stance,
            damage_to_opponent,
            damage_to_player,
            player_hp,
            opponent_hp,
            player_countered,
            opponent_countered,
        });

        if player_hp == 0 || opponent_hp == 0 {
            break;
        }
    }

    let player_wins = player_hp > opponent_hp;
    let (winner, loser) = if player_wins {
        (player, opponent)
    } else {
        (opponent, player)
    };

    DuelReport {
        id: duel_id(rng),
        winner_id: winner.id.clone(),
        loser_id: loser.id.clone(),
        xp_gain: BASE_XP.saturating_add(loser.level.saturating_mul(XP_PER_LEVEL)),
        turns,
        winner_final_hp: player_hp.max(opponent_hp),
        player_final_hp: player_hp,
        opponent_final_hp: opponent_hp,
        strategy_note: format!(
            "Trinity Tactics AI predicted {}'s {} focus to counter.",
            opponent.name,
            dominant_stat(opponent)
        ),
    }
}

fn duel_id<R: BattleRng>(rng: &mut R) -> String {
    let entropy = (rng.next_unit() * 1e12) as u64;
    format!("battle-{:0>8}", to_base36(entropy))
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

//! Battle settlement engine
//!
//! Drives one battle from operator intake to on-chain settlement:
//! `AwaitInput -> Fetching -> (Aborted | Scoring) -> Reporting -> Submitted`.
//! Progress lines go to the engine's output, diagnostics go to the log.

use std::io::{self, BufRead, Write};

use crate::battle::{decide, score_monster, BattleEvent, ScoreCard, Verdict};
use crate::error::{BattleResult, LookupError};
use crate::ledger::{LedgerClient, Settlement};
use crate::log;
use crate::rng::BattleRng;
use crate::types::{FieldMap, Monster, ObjectId};

/// Where a battle run currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    AwaitInput,
    Fetching,
    Aborted,
    Scoring,
    Reporting,
    Submitted,
}

/// Terminal result of a battle run
#[derive(Debug)]
pub enum BattleOutcome {
    /// At least one lookup failed; nothing was submitted
    Aborted { failures: Vec<(ObjectId, LookupError)> },
    /// A settlement was handed to the ledger tool (or the attempt failed to start)
    Submitted {
        verdict: Verdict,
        settlement: Settlement,
        delivered: bool,
    },
}

impl BattleOutcome {
    pub fn is_aborted(&self) -> bool {
        matches!(self, BattleOutcome::Aborted { .. })
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            BattleOutcome::Submitted { verdict, .. } => Some(verdict),
            BattleOutcome::Aborted { .. } => None,
        }
    }
}

pub struct BattleEngine<L, R, W> {
    ledger: L,
    rng: R,
    out: W,
    phase: BattlePhase,
    events: Vec<BattleEvent>,
}

impl<L: LedgerClient, R: BattleRng, W: Write> BattleEngine<L, R, W> {
    pub fn new(ledger: L, rng: R, out: W) -> Self {
        Self {
            ledger,
            rng,
            out,
            phase: BattlePhase::AwaitInput,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// Events emitted so far, in order
    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn into_parts(self) -> (L, R, W) {
        (self.ledger, self.rng, self.out)
    }

    /// Prompt for both identifiers on `input`, then settle the battle.
    pub fn run<B: BufRead>(&mut self, input: &mut B) -> BattleResult<BattleOutcome> {
        let (first, second) = self.read_identifiers(input)?;
        self.settle(first, second)
    }

    /// Ask the operator for the two combatants.
    pub fn read_identifiers<B: BufRead>(
        &mut self,
        input: &mut B,
    ) -> BattleResult<(ObjectId, ObjectId)> {
        writeln!(self.out, "\n--- TEE BATTLE SYSTEM ---\n")?;
        let first = self.prompt(input, "Monster 1 identifier: ")?;
        let second = self.prompt(input, "Monster 2 identifier: ")?;
        log::debug("intake", &format!("combatants {first} vs {second}"));
        Ok((first, second))
    }

    fn prompt<B: BufRead>(&mut self, input: &mut B, label: &str) -> BattleResult<ObjectId> {
        write!(self.out, "{label}")?;
        self.out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before an identifier was entered",
            )
            .into());
        }
        Ok(ObjectId::new(&line))
    }

    /// Fetch, score, decide and submit a battle between two objects.
    ///
    /// Lookup failures end the run as `Aborted` without touching the
    /// mutation side of the ledger. Malformed attributes are returned as
    /// errors.
    pub fn settle(&mut self, first: ObjectId, second: ObjectId) -> BattleResult<BattleOutcome> {
        self.phase = BattlePhase::Fetching;
        let first_fields = self.fetch(&first)?;
        let second_fields = self.fetch(&second)?;

        let (first_fields, second_fields) = match (first_fields, second_fields) {
            (Ok(a), Ok(b)) => (a, b),
            (a, b) => {
                let failures = [(first, a.err()), (second, b.err())]
                    .into_iter()
                    .filter_map(|(id, err)| err.map(|err| (id, err)))
                    .collect();
                self.phase = BattlePhase::Aborted;
                self.emit(BattleEvent::Aborted)?;
                return Ok(BattleOutcome::Aborted { failures });
            }
        };

        let first_monster = Monster::from_fields(first, &first_fields)?;
        let second_monster = Monster::from_fields(second, &second_fields)?;

        self.phase = BattlePhase::Scoring;
        self.emit(BattleEvent::ScoringStarted)?;
        let first_card = score_monster(first_monster, &mut self.rng);
        self.emit_score(&first_card)?;
        let second_card = score_monster(second_monster, &mut self.rng);
        self.emit_score(&second_card)?;

        self.phase = BattlePhase::Reporting;
        let verdict = decide(first_card, second_card);
        let winner = verdict.winner().monster.clone();
        let loser = verdict.loser().monster.id.clone();
        self.emit(BattleEvent::Victory {
            name: winner.name.clone(),
            id: winner.id.clone(),
        })?;

        let settlement = Settlement::new(winner.id, loser);
        self.emit(BattleEvent::Submitting {
            winner: settlement.winner.clone(),
            loser: settlement.loser.clone(),
        })?;

        log::action(
            "settle_battle",
            &format!(
                "winner={} loser={} reward={}",
                settlement.winner, settlement.loser, settlement.reward
            ),
        );
        let delivered = match self.ledger.submit_battle_result(&settlement) {
            Ok(()) => true,
            Err(err) => {
                log::warn(&err.to_string());
                false
            }
        };
        log::result(delivered, "settlement handed to the ledger tool");
        self.phase = BattlePhase::Submitted;

        Ok(BattleOutcome::Submitted {
            verdict,
            settlement,
            delivered,
        })
    }

    /// Look up one object. The outer result carries console failures only.
    fn fetch(&mut self, id: &ObjectId) -> BattleResult<Result<FieldMap, LookupError>> {
        self.emit(BattleEvent::Scanning { id: id.clone() })?;

        let fetched = if id.is_empty() {
            Err(LookupError::EmptyIdentifier)
        } else {
            self.ledger.fetch_object(id)
        };

        if let Err(err) = &fetched {
            if err.is_transport() {
                log::warn(&format!("ledger tool unavailable: {err}"));
            } else {
                log::debug("fetch", &err.to_string());
            }
            self.emit(BattleEvent::LookupFailed {
                id: id.clone(),
                reason: err.to_string(),
            })?;
        }
        Ok(fetched)
    }

    fn emit_score(&mut self, card: &ScoreCard) -> BattleResult<()> {
        self.emit(BattleEvent::Scored {
            name: card.monster.name.clone(),
            score: card.score,
            luck: card.luck,
        })
    }

    fn emit(&mut self, event: BattleEvent) -> BattleResult<()> {
        writeln!(self.out, "{event}")?;
        self.events.push(event);
        Ok(())
    }
}

//! Chimera battle core
//!
//! Everything needed to settle a monster battle except the ledger transport:
//! typed combatants, the score engine, the settlement engine and an offline
//! duel preview.

pub mod battle;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod log;
pub mod rng;
pub mod roster;
pub mod tactics;
pub mod types;

#[cfg(test)]
mod tests;

pub use battle::*;
pub use engine::{BattleEngine, BattleOutcome, BattlePhase};
pub use error::*;
pub use ledger::{LedgerClient, Settlement};
pub use types::*;

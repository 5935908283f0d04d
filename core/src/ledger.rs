//! Ledger access seam
//!
//! The battle engine never talks to the chain directly. It goes through a
//! `LedgerClient`, which in production shells out to the `sui` CLI and in
//! tests is an in-memory double.

use serde_json::Value;

use crate::error::{LookupError, SubmissionError};
use crate::types::{FieldMap, ObjectId};

/// Published package holding the `monster_battle` module
pub const PACKAGE_ID: &str = "0x2cc49178b0381ffeb4eb4af8b6c3f55c6594a242ad2063e3b0530ec1fb0d1b53";
/// Shared `BattleConfig` object passed to every settlement
pub const BATTLE_CONFIG_ID: &str =
    "0xb46f9f6ad19d7413845a83beeec537d5d80ed2a54009a14f2247e34ba067607c";
pub const MODULE: &str = "monster_battle";
pub const FUNCTION: &str = "settle_battle";
/// Gas budget attached to every settlement transaction
pub const GAS_BUDGET: u64 = 10_000_000;
/// Reward granted to the winner of a settled battle
pub const REWARD: u64 = 50;

/// Outcome of a battle as submitted on chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub winner: ObjectId,
    pub loser: ObjectId,
    pub reward: u64,
}

impl Settlement {
    /// A settlement always carries the fixed reward.
    pub fn new(winner: ObjectId, loser: ObjectId) -> Self {
        Self {
            winner,
            loser,
            reward: REWARD,
        }
    }
}

/// Narrow view of the ledger needed to settle a battle.
pub trait LedgerClient {
    /// Read an object's field map.
    fn fetch_object(&mut self, id: &ObjectId) -> Result<FieldMap, LookupError>;

    /// Submit a settlement. Success means the transaction was handed to the
    /// ledger tool, not that it landed.
    fn submit_battle_result(&mut self, settlement: &Settlement) -> Result<(), SubmissionError>;
}

impl<L: LedgerClient + ?Sized> LedgerClient for &mut L {
    fn fetch_object(&mut self, id: &ObjectId) -> Result<FieldMap, LookupError> {
        (**self).fetch_object(id)
    }

    fn submit_battle_result(&mut self, settlement: &Settlement) -> Result<(), SubmissionError> {
        (**self).submit_battle_result(settlement)
    }
}

/// Extract `content.fields` from the JSON printed by `sui client object --json`.
pub fn parse_object_output(id: &ObjectId, output: &str) -> Result<FieldMap, LookupError> {
    let document: Value = serde_json::from_str(output).map_err(|source| LookupError::Unparsable {
        id: id.to_string(),
        source,
    })?;

    match document.get("content").and_then(|content| content.get("fields")) {
        Some(Value::Object(fields)) => Ok(fields.clone()),
        _ => Err(LookupError::MissingFields { id: id.to_string() }),
    }
}

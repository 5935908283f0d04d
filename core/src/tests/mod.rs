
use std::collections::{HashMap, VecDeque};
use std::io;

use serde_json::json;

use crate::error::{LookupError, SubmissionError};
use crate::ledger::{LedgerClient, Settlement};
use crate::rng::BattleRng;
use crate::types::{FieldMap, Monster, ObjectId};

// ==========================================
// HELPER FUNCTIONS (Boilerplate Reduction)
// ==========================================

/// Replays scripted luck values, one per draw.
struct FixedLuck(VecDeque<u32>);

impl FixedLuck {
    fn new(values: &[u32]) -> Self {
        Self(values.iter().copied().collect())
    }
}

impl BattleRng for FixedLuck {
    fn next_u32(&mut self) -> u32 {
        self.0.pop_front().expect("test scripted too few luck values")
    }
}

fn fields(name: &str, strength: u64, agility: u64, intelligence: u64) -> FieldMap {
    let value = json!({
        "id": { "id": "0x0" },
        "name": name,
        "strength": strength.to_string(),
        "agility": agility,
        "intelligence": intelligence.to_string(),
    });
    match value {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    }
}

fn monster(id: &str, strength: u64, agility: u64, intelligence: u64) -> Monster {
    Monster::new(id, id, strength, agility, intelligence)
}

enum Stored {
    Found(FieldMap),
    Unparsable,
    ToolMissing,
}

/// In-memory ledger that records every call.
#[derive(Default)]
struct RecordingLedger {
    objects: HashMap<String, Stored>,
    fetches: Vec<ObjectId>,
    submissions: Vec<Settlement>,
    fail_submission: bool,
}

impl RecordingLedger {
    fn with(mut self, id: &str, fields: FieldMap) -> Self {
        self.objects.insert(id.to_string(), Stored::Found(fields));
        self
    }

    fn with_garbage(mut self, id: &str) -> Self {
        self.objects.insert(id.to_string(), Stored::Unparsable);
        self
    }

    fn with_missing_tool(mut self, id: &str) -> Self {
        self.objects.insert(id.to_string(), Stored::ToolMissing);
        self
    }
}

impl LedgerClient for RecordingLedger {
    fn fetch_object(&mut self, id: &ObjectId) -> Result<FieldMap, LookupError> {
        self.fetches.push(id.clone());
        match self.objects.get(id.as_str()) {
            Some(Stored::Found(fields)) => Ok(fields.clone()),
            Some(Stored::Unparsable) => {
                crate::ledger::parse_object_output(id, "Error: RPC call failed")
            }
            Some(Stored::ToolMissing) => Err(LookupError::Spawn {
                id: id.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "sui: command not found"),
            }),
            None => Err(LookupError::MissingFields { id: id.to_string() }),
        }
    }

    fn submit_battle_result(&mut self, settlement: &Settlement) -> Result<(), SubmissionError> {
        self.submissions.push(settlement.clone());
        if self.fail_submission {
            return Err(io::Error::new(io::ErrorKind::NotFound, "sui: command not found").into());
        }
        Ok(())
    }
}

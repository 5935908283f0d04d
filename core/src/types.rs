use core::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::{BattleError, BattleResult};

/// Raw `content.fields` object of a ledger object
pub type FieldMap = serde_json::Map<String, Value>;

/// Level assumed for monsters minted before levels existed
pub const DEFAULT_LEVEL: u64 = 1;

/// Opaque identifier of an on-chain object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Wrap an identifier, trimming surrounding whitespace.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A monster as read from chain state, built fresh for every battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monster {
    pub id: ObjectId,
    pub name: String,
    pub strength: u64,
    pub agility: u64,
    pub intelligence: u64,
    pub level: u64,
}

impl Monster {
    pub fn new(
        id: impl Into<ObjectId>,
        name: &str,
        strength: u64,
        agility: u64,
        intelligence: u64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            strength,
            agility,
            intelligence,
            level: DEFAULT_LEVEL,
        }
    }

    pub fn with_level(mut self, level: u64) -> Self {
        self.level = level;
        self
    }

    /// Validate a fetched field map into a typed monster.
    ///
    /// `name`, `strength`, `agility` and `intelligence` are required; `level`
    /// is optional. Integers may be JSON numbers or decimal strings, which is
    /// how the ledger renders `u64` fields.
    pub fn from_fields(id: ObjectId, fields: &FieldMap) -> BattleResult<Self> {
        let name = match fields.get("name") {
            Some(Value::String(name)) => name.clone(),
            Some(other) => {
                return Err(malformed(&id, "name", format!("expected a string, got {other}")))
            }
            None => return Err(malformed(&id, "name", "field is missing".to_string())),
        };

        let strength = required_int(&id, fields, "strength")?;
        let agility = required_int(&id, fields, "agility")?;
        let intelligence = required_int(&id, fields, "intelligence")?;
        let level = match fields.get("level") {
            Some(value) => coerce_int(value).map_err(|reason| malformed(&id, "level", reason))?,
            None => DEFAULT_LEVEL,
        };

        Ok(Self {
            id,
            name,
            strength,
            agility,
            intelligence,
            level,
        })
    }
}

fn required_int(id: &ObjectId, fields: &FieldMap, field: &'static str) -> BattleResult<u64> {
    let value = fields
        .get(field)
        .ok_or_else(|| malformed(id, field, "field is missing".to_string()))?;
    coerce_int(value).map_err(|reason| malformed(id, field, reason))
}

/// Coerce a JSON value into a non-negative integer. Floats are accepted only
/// when they carry no fractional part, e.g. `12.0`.
fn coerce_int(value: &Value) -> Result<u64, String> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().and_then(integral_float))
            .ok_or_else(|| format!("{n} is not a non-negative integer")),
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| format!("{s:?} is not a non-negative integer")),
        other => Err(format!("expected an integer, got {other}")),
    }
}

fn integral_float(value: f64) -> Option<u64> {
    // 2^64 itself is the first float past u64::MAX
    (value.fract() == 0.0 && value >= 0.0 && value < u64::MAX as f64).then(|| value as u64)
}

fn malformed(id: &ObjectId, field: &'static str, reason: String) -> BattleError {
    BattleError::MalformedAttribute {
        id: id.to_string(),
        field,
        reason,
    }
}

//! Error types for battle settlement
//!
//! Lookup failures abort a battle before anything is submitted. Malformed
//! attributes are fatal: they indicate broken chain data, not a missing object.

use thiserror::Error;

/// The ledger could not produce a usable field map for an object.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Identifier was blank; the query tool is never invoked for it
    #[error("object identifier is empty")]
    EmptyIdentifier,
    /// The query tool itself could not be started
    #[error("failed to run ledger query for {id}: {source}")]
    Spawn {
        id: String,
        #[source]
        source: std::io::Error,
    },
    /// Query output was not a JSON document
    #[error("ledger output for {id} is not valid JSON: {source}")]
    Unparsable {
        id: String,
        #[source]
        source: serde_json::Error,
    },
    /// Query output parsed but carries no `content.fields` object
    #[error("object {id} not found or has no field map")]
    MissingFields { id: String },
}

impl LookupError {
    /// True when the failure came from the tool rather than from the object.
    pub fn is_transport(&self) -> bool {
        matches!(self, LookupError::Spawn { .. })
    }
}

/// The mutation tool could not be invoked at all.
///
/// A non-zero exit of the tool is not an error here: the settlement is
/// fire-and-forget once the process has been started.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("failed to run ledger transaction: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Fatal errors that end a battle run.
#[derive(Debug, Error)]
pub enum BattleError {
    /// A fetched attribute is missing or not a non-negative integer
    #[error("malformed attribute `{field}` on {id}: {reason}")]
    MalformedAttribute {
        id: String,
        field: &'static str,
        reason: String,
    },
    /// Operator input or progress output failed
    #[error("console i/o failed: {0}")]
    Intake(#[from] std::io::Error),
}

/// Result type alias for battle operations
pub type BattleResult<T> = Result<T, BattleError>;

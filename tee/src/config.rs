//! Deployment settings for the ledger tool.

use chimera_core::ledger::{BATTLE_CONFIG_ID, FUNCTION, GAS_BUDGET, MODULE, PACKAGE_ID};

/// Where settlements go and how the `sui` binary is found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    pub sui_bin: String,
    pub package_id: String,
    pub module: String,
    pub function: String,
    pub battle_config_id: String,
    pub gas_budget: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            sui_bin: "sui".to_string(),
            package_id: PACKAGE_ID.to_string(),
            module: MODULE.to_string(),
            function: FUNCTION.to_string(),
            battle_config_id: BATTLE_CONFIG_ID.to_string(),
            gas_budget: GAS_BUDGET,
        }
    }
}

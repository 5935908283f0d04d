//! `sui` CLI ledger client
//!
//! Each call spawns the `sui` binary and blocks until it exits. Arguments are
//! passed as an argv vector, never through a shell.

use std::process::{Command, Stdio};

use chimera_core::error::{LookupError, SubmissionError};
use chimera_core::ledger::{parse_object_output, LedgerClient, Settlement};
use chimera_core::types::{FieldMap, ObjectId};

use crate::config::LedgerConfig;

pub struct SuiCli {
    config: LedgerConfig,
}

impl SuiCli {
    pub fn new(config: LedgerConfig) -> Self {
        Self { config }
    }

    /// `client object <id> --json`
    pub fn query_args(&self, id: &ObjectId) -> Vec<String> {
        vec![
            "client".to_string(),
            "object".to_string(),
            id.to_string(),
            "--json".to_string(),
        ]
    }

    /// `client call ... --args <config> <winner> <loser> <reward> --gas-budget <n>`
    pub fn call_args(&self, settlement: &Settlement) -> Vec<String> {
        let c = &self.config;
        vec![
            "client".to_string(),
            "call".to_string(),
            "--package".to_string(),
            c.package_id.clone(),
            "--module".to_string(),
            c.module.clone(),
            "--function".to_string(),
            c.function.clone(),
            "--args".to_string(),
            c.battle_config_id.clone(),
            settlement.winner.to_string(),
            settlement.loser.to_string(),
            settlement.reward.to_string(),
            "--gas-budget".to_string(),
            c.gas_budget.to_string(),
        ]
    }
}

impl LedgerClient for SuiCli {
    fn fetch_object(&mut self, id: &ObjectId) -> Result<FieldMap, LookupError> {
        let args = self.query_args(id);
        log::debug!("running {} {}", self.config.sui_bin, args.join(" "));

        let output = Command::new(&self.config.sui_bin)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| LookupError::Spawn {
                id: id.to_string(),
                source,
            })?;

        if !output.stderr.is_empty() {
            log::debug!("sui stderr: {}", String::from_utf8_lossy(&output.stderr).trim());
        }
        parse_object_output(id, &String::from_utf8_lossy(&output.stdout))
    }

    fn submit_battle_result(&mut self, settlement: &Settlement) -> Result<(), SubmissionError> {
        let args = self.call_args(settlement);
        log::debug!("running {} {}", self.config.sui_bin, args.join(" "));

        // The tool's own output goes straight to the operator's terminal.
        let status = Command::new(&self.config.sui_bin).args(&args).status()?;
        log::debug!("sui client call exited with {status}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_args() {
        let cli = SuiCli::new(LedgerConfig::default());
        assert_eq!(
            cli.query_args(&ObjectId::new("0xabc")),
            ["client", "object", "0xabc", "--json"]
        );
    }

    #[test]
    fn test_call_args_carry_fixed_reward_and_gas_budget() {
        let cli = SuiCli::new(LedgerConfig::default());
        let settlement = Settlement::new(ObjectId::new("0xwin"), ObjectId::new("0xlose"));
        let args = cli.call_args(&settlement);

        assert_eq!(
            args,
            [
                "client",
                "call",
                "--package",
                "0x2cc49178b0381ffeb4eb4af8b6c3f55c6594a242ad2063e3b0530ec1fb0d1b53",
                "--module",
                "monster_battle",
                "--function",
                "settle_battle",
                "--args",
                "0xb46f9f6ad19d7413845a83beeec537d5d80ed2a54009a14f2247e34ba067607c",
                "0xwin",
                "0xlose",
                "50",
                "--gas-budget",
                "10000000",
            ]
        );
    }

    #[test]
    fn test_call_args_follow_config_overrides() {
        let cli = SuiCli::new(LedgerConfig {
            package_id: "0xp".to_string(),
            battle_config_id: "0xc".to_string(),
            gas_budget: 42,
            ..LedgerConfig::default()
        });
        let args = cli.call_args(&Settlement::new(ObjectId::new("0x1"), ObjectId::new("0x2")));

        assert_eq!(args[3], "0xp");
        assert_eq!(args[9], "0xc");
        assert_eq!(args[12], "50");
        assert_eq!(args[14], "42");
    }

    #[test]
    fn test_missing_binary_is_a_transport_failure() {
        let mut cli = SuiCli::new(LedgerConfig {
            sui_bin: "/nonexistent/chimera-test-sui".to_string(),
            ..LedgerConfig::default()
        });

        let err = cli.fetch_object(&ObjectId::new("0xabc")).unwrap_err();
        assert!(err.is_transport());

        let settlement = Settlement::new(ObjectId::new("0x1"), ObjectId::new("0x2"));
        assert!(cli.submit_battle_result(&settlement).is_err());
    }
}

//! Chimera TEE - monster battle settlement
//!
//! Run with no arguments to read two monster ids, score them and settle the
//! battle on chain. `simulate` previews a turn-based duel without submitting.

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use chimera_core::engine::{BattleEngine, BattleOutcome};
use chimera_core::ledger::LedgerClient;
use chimera_core::rng::{EntropyRng, XorShiftRng};
use chimera_core::roster::find_demo;
use chimera_core::tactics::{simulate_duel, DuelReport};
use chimera_core::types::{Monster, ObjectId};
use clap::{Parser, Subcommand};

mod config;
mod sui;

use config::LedgerConfig;
use sui::SuiCli;

#[derive(Parser)]
#[command(name = "chimera-tee")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the sui binary
    #[arg(long, global = true, default_value = "sui")]
    sui: String,

    /// Package that publishes the monster_battle module
    #[arg(long, global = true, default_value = chimera_core::ledger::PACKAGE_ID)]
    package: String,

    /// Shared battle configuration object
    #[arg(long, global = true, default_value = chimera_core::ledger::BATTLE_CONFIG_ID)]
    battle_config: String,

    /// Gas budget for the settlement transaction
    #[arg(long, global = true, default_value_t = chimera_core::ledger::GAS_BUDGET)]
    gas_budget: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Preview a turn-based duel; nothing is submitted
    Simulate {
        /// Player monster: a demo id or an on-chain object id
        player: String,

        /// Opponent monster: a demo id or an on-chain object id
        opponent: String,

        /// Seed for a reproducible preview
        #[arg(long)]
        seed: Option<u64>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    fn ledger_config(&self) -> LedgerConfig {
        LedgerConfig {
            sui_bin: self.sui.clone(),
            package_id: self.package.clone(),
            battle_config_id: self.battle_config.clone(),
            gas_budget: self.gas_budget,
            ..LedgerConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let ledger = SuiCli::new(cli.ledger_config());
    match cli.command {
        None => settle(ledger),
        Some(Commands::Simulate {
            player,
            opponent,
            seed,
            json,
        }) => simulate(ledger, &player, &opponent, seed, json),
    }
}

fn settle(ledger: SuiCli) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut engine = BattleEngine::new(ledger, EntropyRng, io::stdout());

    match engine.run(&mut input)? {
        BattleOutcome::Aborted { failures } => {
            for (id, err) in &failures {
                log::info!("lookup of {id} failed: {err}");
            }
        }
        BattleOutcome::Submitted {
            settlement,
            delivered,
            ..
        } => {
            if !delivered {
                log::warn!(
                    "settlement {} over {} could not be handed to sui",
                    settlement.winner,
                    settlement.loser
                );
            }
        }
    }
    Ok(())
}

fn simulate(
    mut ledger: SuiCli,
    player: &str,
    opponent: &str,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let (player, opponent, report) = preview(&mut ledger, player, opponent, seed)?;

    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "Duel {}: {} vs {}", report.id, player.name, opponent.name)?;
    for turn in &report.turns {
        writeln!(
            out,
            "  turn {:>2}: {:?} vs {:?} -> {} dealt {}, took {} (hp {} / {})",
            turn.turn,
            turn.player_stance,
            turn.opponent_stance,
            player.name,
            turn.damage_to_opponent,
            turn.damage_to_player,
            turn.player_hp,
            turn.opponent_hp,
        )?;
    }
    let winner = if report.winner_id == player.id {
        &player.name
    } else {
        &opponent.name
    };
    writeln!(
        out,
        "{winner} wins after {} turns with {} hp (+{} xp)",
        report.total_turns(),
        report.winner_final_hp,
        report.xp_gain
    )?;
    writeln!(out, "{}", report.strategy_note)?;
    Ok(())
}

/// Load both fighters and run the duel. Only lookups reach the ledger.
fn preview<L: LedgerClient>(
    ledger: &mut L,
    player: &str,
    opponent: &str,
    seed: Option<u64>,
) -> Result<(Monster, Monster, DuelReport)> {
    let player = load_monster(ledger, player)?;
    let opponent = load_monster(ledger, opponent)?;

    let report = match seed {
        Some(seed) => simulate_duel(&player, &opponent, &mut XorShiftRng::seed_from_u64(seed)),
        None => simulate_duel(&player, &opponent, &mut EntropyRng),
    };
    Ok((player, opponent, report))
}

/// Resolve a demo id locally, anything else through the ledger.
fn load_monster<L: LedgerClient>(ledger: &mut L, id: &str) -> Result<Monster> {
    if let Some(monster) = find_demo(id) {
        return Ok(monster);
    }

    let id = ObjectId::new(id);
    if id.is_empty() {
        bail!("monster id is empty");
    }
    let fields = ledger
        .fetch_object(&id)
        .with_context(|| format!("monster {id} not found"))?;
    Ok(Monster::from_fields(id, &fields)?)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chimera_core::error::{LookupError, SubmissionError};
    use chimera_core::ledger::Settlement;
    use chimera_core::types::FieldMap;
    use serde_json::json;

    use super::*;

    /// Ledger double that counts every call it receives.
    #[derive(Default)]
    struct CountingLedger {
        objects: HashMap<String, FieldMap>,
        fetches: usize,
        submissions: usize,
    }

    impl CountingLedger {
        fn with(mut self, id: &str, name: &str, stats: [u64; 3]) -> Self {
            let value = json!({
                "name": name,
                "strength": stats[0].to_string(),
                "agility": stats[1].to_string(),
                "intelligence": stats[2].to_string(),
                "level": "2",
            });
            if let serde_json::Value::Object(map) = value {
                self.objects.insert(id.to_string(), map);
            }
            self
        }
    }

    impl LedgerClient for CountingLedger {
        fn fetch_object(&mut self, id: &ObjectId) -> Result<FieldMap, LookupError> {
            self.fetches += 1;
            self.objects
                .get(id.as_str())
                .cloned()
                .ok_or_else(|| LookupError::MissingFields { id: id.to_string() })
        }

        fn submit_battle_result(&mut self, _settlement: &Settlement) -> Result<(), SubmissionError> {
            self.submissions += 1;
            Ok(())
        }
    }

    #[test]
    fn test_demo_id_never_touches_the_ledger() {
        let mut ledger = CountingLedger::default();
        let monster = load_monster(&mut ledger, "demo-psi-seer").unwrap();

        assert_eq!(monster.name, "Psi Seer");
        assert_eq!(monster.level, 4);
        assert_eq!(ledger.fetches, 0);
        assert_eq!(ledger.submissions, 0);
    }

    #[test]
    fn test_ledger_id_is_fetched_once() {
        let mut ledger = CountingLedger::default().with("0xaaa", "Chain Hydra", [44, 20, 31]);
        let monster = load_monster(&mut ledger, " 0xaaa ").unwrap();

        assert_eq!(monster.id.as_str(), "0xaaa");
        assert_eq!((monster.strength, monster.agility, monster.intelligence), (44, 20, 31));
        assert_eq!(ledger.fetches, 1);
        assert_eq!(ledger.submissions, 0);
    }

    #[test]
    fn test_unknown_id_reports_not_found() {
        let mut ledger = CountingLedger::default();
        let err = load_monster(&mut ledger, "0xmissing").unwrap_err();

        assert_eq!(ledger.fetches, 1);
        assert_eq!(err.to_string(), "monster 0xmissing not found");
        assert!(err.downcast_ref::<LookupError>().is_some());
        assert_eq!(ledger.submissions, 0);
    }

    #[test]
    fn test_blank_id_is_rejected_before_lookup() {
        let mut ledger = CountingLedger::default();
        assert!(load_monster(&mut ledger, "   ").is_err());
        assert_eq!(ledger.fetches, 0);
    }

    #[test]
    fn test_preview_never_submits() {
        let mut ledger = CountingLedger::default().with("0xaaa", "Chain Hydra", [44, 20, 31]);

        let (player, opponent, report) =
            preview(&mut ledger, "0xaaa", "demo-onyx-warden", Some(9)).unwrap();
        assert_eq!(player.name, "Chain Hydra");
        assert_eq!(opponent.name, "Onyx Warden");
        assert!(report.total_turns() >= 1);
        assert_eq!(ledger.fetches, 1);

        let (_, _, again) = preview(&mut ledger, "0xaaa", "demo-onyx-warden", Some(9)).unwrap();
        assert_eq!(again, report);

        // A failed lookup stops the preview before any duel is run
        assert!(preview(&mut ledger, "demo-neon-wisp", "0xmissing", None).is_err());
        assert_eq!(ledger.fetches, 3);
        assert_eq!(ledger.submissions, 0);
    }
}

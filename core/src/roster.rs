//! Built-in demo monsters
//!
//! Lets duel previews run without a ledger. Ids carry a `demo-` prefix so
//! they can never collide with on-chain object ids.

use crate::types::Monster;

pub const DEMO_PREFIX: &str = "demo-";

/// Sparring partners
pub fn demo_opponents() -> Vec<Monster> {
    vec![
        Monster::new("demo-onyx-warden", "Onyx Warden", 48, 28, 32).with_level(3),
        Monster::new("demo-neon-wisp", "Neon Wisp", 32, 55, 26).with_level(2),
        Monster::new("demo-crimson-oracle", "Crimson Oracle", 26, 30, 52).with_level(4),
    ]
}

/// Starter monsters for an operator without a wallet
pub fn demo_roster() -> Vec<Monster> {
    vec![
        Monster::new("demo-aegis-hatchling", "Aegis Hatchling", 40, 35, 30).with_level(2),
        Monster::new("demo-cobalt-runner", "Cobalt Runner", 30, 52, 28).with_level(3),
        Monster::new("demo-psi-seer", "Psi Seer", 24, 32, 56).with_level(4),
    ]
}

/// Look up a demo monster by id.
pub fn find_demo(id: &str) -> Option<Monster> {
    if !id.starts_with(DEMO_PREFIX) {
        return None;
    }
    demo_roster()
        .into_iter()
        .chain(demo_opponents())
        .find(|monster| monster.id.as_str() == id)
}

//! ID prefixes and generation.
//!
//! Every entity id is globally unique, not just unique among its siblings:
//! `"{prefix}-{8 random hex}{counter hex}"`. The random part comes from the OS
//! RNG; the process-wide counter keeps two ids minted in the same instant apart
//! even if the RNG were to repeat.

use std::sync::atomic::{AtomicU64, Ordering};

pub const PREFIX_TOPIC: &str = "top";
pub const PREFIX_SUB_TOPIC: &str = "sub";
pub const PREFIX_QUESTION: &str = "qst";

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Generate a fresh id with the given prefix, e.g. `"top-a3f8b2c10"`.
#[must_use]
pub fn generate_id(prefix: &str) -> String {
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let mut bytes = [0u8; 4];
    if getrandom::fill(&mut bytes).is_err() {
        // The counter alone still keeps ids unique.
        bytes = [0; 4];
    }
    let random: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("{prefix}-{random}{seq:x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_carry_prefix() {
        let id = generate_id(PREFIX_TOPIC);
        assert!(id.starts_with("top-"));
        assert!(id.len() > "top-".len() + 8);
    }

    #[test]
    fn rapid_successive_ids_are_unique() {
        let ids: HashSet<String> = (0..10_000).map(|_| generate_id(PREFIX_QUESTION)).collect();
        assert_eq!(ids.len(), 10_000);
    }
}

//! Session configuration from environment variables.
//!
//! - `MEMORY_MATCH_REVEAL_SETUP`: deal cards face-up for inspection before play
//! - `MEMORY_MATCH_HISTORY`: mirror stage transitions onto a history stack
//! - `MEMORY_MATCH_SEED`: fixed shuffle seed (default: OS entropy)

use crate::game_state::EngineConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionConfig {
    pub engine: EngineConfig,
    pub mirror_history: bool,
    pub seed: Option<u64>,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let reveal_during_setup = lookup("MEMORY_MATCH_REVEAL_SETUP")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        let mirror_history = lookup("MEMORY_MATCH_HISTORY")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        let seed = lookup("MEMORY_MATCH_SEED").and_then(|s| s.trim().parse().ok());

        Self {
            engine: EngineConfig {
                reveal_during_setup,
                ..EngineConfig::default()
            },
            mirror_history,
            seed,
        }
    }
}

/// `1`, `true`, `yes` and `on` (any case) enable a flag.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = SessionConfig::from_lookup(lookup(&[]));
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.engine.reveal_ms, crate::types::MISMATCH_REVEAL_MS);
    }

    #[test]
    fn test_reads_flags_and_seed() {
        let config = SessionConfig::from_lookup(lookup(&[
            ("MEMORY_MATCH_REVEAL_SETUP", "true"),
            ("MEMORY_MATCH_HISTORY", "1"),
            ("MEMORY_MATCH_SEED", " 42 "),
        ]));
        assert!(config.engine.reveal_during_setup);
        assert!(config.mirror_history);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = SessionConfig::from_lookup(lookup(&[
            ("MEMORY_MATCH_HISTORY", "nope"),
            ("MEMORY_MATCH_SEED", "abc"),
        ]));
        assert!(!config.mirror_history);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("ON"));
        assert!(parse_flag("Yes"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
    }
}

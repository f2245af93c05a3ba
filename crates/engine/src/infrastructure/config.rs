//! Engine configuration, read from the environment.
//!
//! Every variable is optional:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `SPELL_LISTS_STORE_PROPERTY` | `spellLists` |
//! | `SPELL_LISTS_FLAG_SCOPE` | `flexible-spell-lists` |
//! | `SPELL_LISTS_LOG` | `spellbinder_engine=info` |
//! | `SPELL_LISTS_RESYNC_ACTIVE` | `true` |

use std::path::Path;

pub const DEFAULT_STORE_PROPERTY: &str = "spellLists";
pub const DEFAULT_FLAG_SCOPE: &str = "flexible-spell-lists";
pub const DEFAULT_LOG_DIRECTIVE: &str = "spellbinder_engine=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellListConfig {
    /// Property the collection blob is stored under on each character.
    pub store_property: String,
    /// Namespace for flags, used by file-backed stores as a directory.
    pub flag_scope: String,
    /// Fallback `tracing` filter when `RUST_LOG` is unset.
    pub log_directive: String,
    /// Re-run synchronization when the already-active list is activated again.
    pub resync_active: bool,
}

impl Default for SpellListConfig {
    fn default() -> Self {
        Self {
            store_property: DEFAULT_STORE_PROPERTY.into(),
            flag_scope: DEFAULT_FLAG_SCOPE.into(),
            log_directive: DEFAULT_LOG_DIRECTIVE.into(),
            resync_active: true,
        }
    }
}

impl SpellListConfig {
    /// Load `.env.local` / `.env` from `dir` (if present), then read the environment.
    pub fn load(dir: impl AsRef<Path>) -> Self {
        // Prefer local overrides.
        for filename in [".env.local", ".env"] {
            let path = dir.as_ref().join(filename);
            if path.exists() {
                let _ = dotenvy::from_path(path);
            }
        }
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let resync_active = match non_empty("SPELL_LISTS_RESYNC_ACTIVE") {
            Some(raw) => parse_bool(&raw).unwrap_or_else(|| {
                tracing::warn!(
                    value = %raw,
                    "Invalid SPELL_LISTS_RESYNC_ACTIVE, using default"
                );
                defaults.resync_active
            }),
            None => defaults.resync_active,
        };

        Self {
            store_property: non_empty("SPELL_LISTS_STORE_PROPERTY")
                .unwrap_or(defaults.store_property),
            flag_scope: non_empty("SPELL_LISTS_FLAG_SCOPE").unwrap_or(defaults.flag_scope),
            log_directive: non_empty("SPELL_LISTS_LOG").unwrap_or(defaults.log_directive),
            resync_active,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(
            SpellListConfig::from_lookup(lookup(&[])),
            SpellListConfig::default()
        );
    }

    #[test]
    fn overrides_are_trimmed() {
        let config = SpellListConfig::from_lookup(lookup(&[
            ("SPELL_LISTS_STORE_PROPERTY", " lists "),
            ("SPELL_LISTS_RESYNC_ACTIVE", "off"),
        ]));
        assert_eq!(config.store_property, "lists");
        assert!(!config.resync_active);
    }

    #[test]
    fn invalid_bool_falls_back_to_default() {
        let config =
            SpellListConfig::from_lookup(lookup(&[("SPELL_LISTS_RESYNC_ACTIVE", "maybe")]));
        assert!(config.resync_active);
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = SpellListConfig::from_lookup(lookup(&[("SPELL_LISTS_FLAG_SCOPE", "  ")]));
        assert_eq!(config.flag_scope, DEFAULT_FLAG_SCOPE);
    }

    #[test]
    fn load_reads_dotenv_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".env"),
            "SPELL_LISTS_FLAG_SCOPE=from-dotenv-test\n",
        )
        .unwrap();

        let config = SpellListConfig::load(dir.path());
        assert_eq!(config.flag_scope, "from-dotenv-test");
    }
}

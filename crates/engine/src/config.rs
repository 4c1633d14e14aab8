use crate::core::error::MAX_ADDRESSABLE_X;
use crate::core::types::DEFAULT_MAX_ABS_X;
use crate::output::RecordFormat;

/// Run configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Largest accepted `|x|`
    pub max_abs_x: i64,
    /// Dump the board after every placement instead of listing records
    pub debug: bool,
    pub format: RecordFormat,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_abs_x: DEFAULT_MAX_ABS_X,
            debug: false,
            format: RecordFormat::Text,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables
    ///
    /// `SPARSE_STACK_MAX_X`, `SPARSE_STACK_DEBUG`, `SPARSE_STACK_FORMAT`.
    /// Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let max_abs_x = lookup("SPARSE_STACK_MAX_X")
            .and_then(|s| s.trim().parse().ok())
            .and_then(Self::checked_bound)
            .unwrap_or(defaults.max_abs_x);

        let debug = lookup("SPARSE_STACK_DEBUG")
            .map(|s| parse_flag(&s))
            .unwrap_or(defaults.debug);

        let format = lookup("SPARSE_STACK_FORMAT")
            .and_then(|s| RecordFormat::from_str(&s))
            .unwrap_or(defaults.format);

        Self {
            max_abs_x,
            debug,
            format,
        }
    }

    /// `Some(bound)` if the board can address every `|x| <= bound`
    pub fn checked_bound(bound: i64) -> Option<i64> {
        (0..=MAX_ADDRESSABLE_X).contains(&bound).then_some(bound)
    }
}

fn parse_flag(s: &str) -> bool {
    matches!(
        s.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> EngineConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_env() {
        assert_eq!(lookup(&[]), EngineConfig::default());
        assert_eq!(EngineConfig::default().max_abs_x, 999_999_999);
    }

    #[test]
    fn test_env_overrides() {
        let config = lookup(&[
            ("SPARSE_STACK_MAX_X", " 500 "),
            ("SPARSE_STACK_DEBUG", "yes"),
            ("SPARSE_STACK_FORMAT", "json"),
        ]);
        assert_eq!(config.max_abs_x, 500);
        assert!(config.debug);
        assert_eq!(config.format, RecordFormat::Json);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = lookup(&[
            ("SPARSE_STACK_MAX_X", "-3"),
            ("SPARSE_STACK_DEBUG", "maybe"),
            ("SPARSE_STACK_FORMAT", "yaml"),
        ]);
        assert_eq!(config, EngineConfig::default());
        assert_eq!(EngineConfig::checked_bound(MAX_ADDRESSABLE_X + 1), None);
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _config = EngineConfig::from_env();
    }
}

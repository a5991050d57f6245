//! CLI configuration via environment variables
//!
//! Everything that shapes a run comes from flags; the environment only
//! controls presentation and diagnostics.

use std::env;

/// Default tracing directives when `FDT_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Disable colored output (NO_COLOR set, or FORCE_COLOR=0)
    pub no_color: bool,
    /// Tracing filter directives (FDT_LOG=debug, FDT_LOG=fdt_cli=trace)
    pub log_filter: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            no_color: lookup("NO_COLOR").is_some()
                || lookup("FORCE_COLOR").is_some_and(|v| v == "0"),
            log_filter: lookup("FDT_LOG")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_config_defaults() {
        let config = config(&[]);
        assert!(!config.no_color);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_config_no_color() {
        assert!(config(&[("NO_COLOR", "1")]).no_color);
        // Presence is enough, even when empty
        assert!(config(&[("NO_COLOR", "")]).no_color);
    }

    #[test]
    fn test_config_force_color_zero() {
        assert!(config(&[("FORCE_COLOR", "0")]).no_color);
        assert!(!config(&[("FORCE_COLOR", "1")]).no_color);
    }

    #[test]
    fn test_config_log_filter() {
        assert_eq!(config(&[("FDT_LOG", "debug")]).log_filter, "debug");
        assert_eq!(config(&[("FDT_LOG", "  ")]).log_filter, "warn");
    }
}

//! Configuration file for `marx`.
//!
//! # Example
//!
//! ```toml
//! [engine]
//! strategy_limit = 4
//! default_budget_percent = 12.5
//! ```

use std::path::Path;

use marx_eval::EngineConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration. Every table is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub engine: EngineConfig,
}

/// Read and parse a config TOML file from `path`.
///
/// Returns a human-readable error string on failure.
pub fn read_config(path: &Path) -> Result<CliConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("could not parse '{}': {}", path.display(), e))
}

/// Load the config file if one was given, then apply flag overrides.
pub fn resolve(
    path: Option<&Path>,
    strategy_limit: Option<usize>,
    max_passes: Option<usize>,
) -> Result<EngineConfig, String> {
    let mut engine = match path {
        Some(p) => read_config(p)?.engine,
        None => EngineConfig::default(),
    };
    if let Some(limit) = strategy_limit {
        engine.strategy_limit = limit;
    }
    if let Some(passes) = max_passes {
        engine.max_passes = passes;
    }
    engine.validate().map_err(|e| e.to_string())?;
    Ok(engine)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn empty_file_is_default() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn engine_table_overrides_defaults() {
        let config: CliConfig = toml::from_str(
            "[engine]\nstrategy_limit = 4\ndefault_budget_percent = 12.5\n",
        )
        .unwrap();
        assert_eq!(config.engine.strategy_limit, 4);
        assert_eq!(config.engine.default_budget_percent, Decimal::new(125, 1));
        assert_eq!(config.engine.max_passes, 12);
    }

    #[test]
    fn flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[engine]\nstrategy_limit = 4").unwrap();
        let engine = resolve(Some(file.path()), Some(5), None).unwrap();
        assert_eq!(engine.strategy_limit, 5);
    }

    #[test]
    fn out_of_range_limit_is_rejected() {
        let err = resolve(None, Some(9), None).unwrap_err();
        assert!(err.contains("strategy_limit"), "{}", err);
    }
}

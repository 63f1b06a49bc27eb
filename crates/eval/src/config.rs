//! Engine configuration.
//!
//! All fields have defaults, so an empty TOML table or JSON object is a
//! valid configuration.
//!
//! ```toml
//! [engine]
//! max_passes = 12
//! strategy_limit = 4
//! default_budget_percent = 15
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rules::Layer;
use crate::types::EngineError;

/// Accepted range for `strategy_limit`.
pub const STRATEGY_LIMIT_RANGE: std::ops::RangeInclusive<usize> = 3..=5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Pass cap for the fixpoint loop.
    pub max_passes: usize,
    /// Number of strategy codes kept in the recommendation.
    pub strategy_limit: usize,
    /// Budget share given to a strategy no channel fact covers.
    #[serde(with = "rust_decimal::serde::float")]
    pub default_budget_percent: Decimal,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_passes: Layer::COUNT + 1,
            strategy_limit: 3,
            default_budget_percent: Decimal::from(15),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_passes == 0 {
            return Err(EngineError::invalid("max_passes must be at least 1"));
        }
        if !STRATEGY_LIMIT_RANGE.contains(&self.strategy_limit) {
            return Err(EngineError::invalid(format!(
                "strategy_limit must be between {} and {}, got {}",
                STRATEGY_LIMIT_RANGE.start(),
                STRATEGY_LIMIT_RANGE.end(),
                self.strategy_limit
            )));
        }
        if self.default_budget_percent <= Decimal::ZERO
            || self.default_budget_percent > Decimal::ONE_HUNDRED
        {
            return Err(EngineError::invalid(format!(
                "default_budget_percent must be in (0, 100], got {}",
                self.default_budget_percent
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.max_passes, 12);
        assert_eq!(config.strategy_limit, 3);
        assert_eq!(config.default_budget_percent, Decimal::from(15));
        config.validate().unwrap();
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"strategy_limit": 5}"#).unwrap();
        assert_eq!(config.strategy_limit, 5);
        assert_eq!(config.max_passes, 12);
    }

    #[test]
    fn rejects_out_of_range_values() {
        for config in [
            EngineConfig {
                strategy_limit: 2,
                ..EngineConfig::default()
            },
            EngineConfig {
                strategy_limit: 6,
                ..EngineConfig::default()
            },
            EngineConfig {
                max_passes: 0,
                ..EngineConfig::default()
            },
            EngineConfig {
                default_budget_percent: Decimal::ZERO,
                ..EngineConfig::default()
            },
        ] {
            assert!(
                matches!(config.validate(), Err(EngineError::InvalidInput { .. })),
                "{:?}",
                config
            );
        }
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(serde_json::from_str::<EngineConfig>(r#"{"passes": 3}"#).is_err());
    }
}

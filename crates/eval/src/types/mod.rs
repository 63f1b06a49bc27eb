//! Fact model, request/response types and errors for the MARX evaluator.
//!
//! Facts are a closed sum type with a fixed field schema per kind. The
//! condition language reads facts only through `Fact::field`, so every
//! field a rule can test is listed in `FactKind::fields`.

use thiserror::Error;

/// Declares a closed symbolic enum with a stable wire name per variant.
///
/// The wire name is used for serde, `Display`, and for equality tests in
/// rule conditions (`Value::Symbol`).
macro_rules! symbol_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        $vis enum $name {
            $($(#[$vmeta])* #[serde(rename = $wire)] $variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Stable wire name.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for $crate::types::Value {
            fn from(v: $name) -> Self {
                $crate::types::Value::Symbol(v.as_str())
            }
        }
    };
}

pub mod fact;
pub mod recommendation;
pub mod request;
pub mod values;

pub use fact::{
    Angle, Approach, BudgetTier, Channel, CompetitionIntensity, Complexity, ContentKind, Effort,
    Fact, FactKind, FactStore, FieldType, Focus, KpiTier, MaturityLevel, Readiness, SalesCycle,
    Severity,
};
pub use recommendation::{
    BudgetAllocation, BudgetShare, ChannelTactic, ContentPlanItem, KpiTarget, Recommendation,
    StrategyCode, TacticPriority, TacticalAction, TacticalTimeline,
};
pub use request::{
    ContentCapability, PrimaryGoal, PriorityKpi, ProductType, Request, SalesStructure,
    TargetCustomer, TimeHorizon,
};
pub use values::Value;

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

/// Errors raised while evaluating a rule condition against the fact store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The condition names a field that the fact kind does not declare.
    #[error("{kind} has no field '{field}'")]
    UnknownField { kind: FactKind, field: String },
    /// A test was applied to a value of the wrong type.
    #[error("type error: {message}")]
    TypeError { message: String },
}

/// Errors surfaced by `evaluate` and the engine.
///
/// None of these are retryable: a run is deterministic, so repeating it
/// with the same input reproduces the same failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The request or configuration is outside its accepted domain.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// A rule action failed. The run is aborted and the snapshot holds the
    /// fact store as it was when the rule fired.
    #[error("rule '{rule}' failed: {message} ({} facts in snapshot)", .snapshot.len())]
    RuleExecution {
        rule: &'static str,
        message: String,
        snapshot: Vec<Fact>,
    },

    /// A rule condition could not be evaluated.
    #[error("condition of rule '{rule}' could not be evaluated: {source}")]
    Condition {
        rule: &'static str,
        #[source]
        source: EvalError,
    },

    /// The pass limit was reached while rules were still producing facts.
    #[error("no fixpoint after {passes} passes")]
    NoFixpoint { passes: usize },

    /// The fact store could not be reduced into a valid recommendation.
    #[error("aggregation failed: {message}")]
    Aggregation { message: String },
}

impl EngineError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            message: message.into(),
        }
    }
}

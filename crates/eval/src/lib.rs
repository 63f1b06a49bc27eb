//! MARX evaluator -- turns a marketing request into a prioritized
//! recommendation by forward chaining over a layered rule table.
//!
//! The request is seeded as eight input facts, the engine runs the rule
//! table to fixpoint, and the aggregator reduces the final fact store to a
//! `Recommendation`. Evaluation is pure: no clock, randomness or I/O.

pub mod aggregate;
pub mod config;
pub mod engine;
pub mod predicate;
pub mod rules;
pub mod types;

pub use config::EngineConfig;
pub use engine::{Engine, RunOutcome};
pub use rules::{rule_table, Layer, RuleDescriptor};
pub use types::{EngineError, EvalError, Fact, FactKind, FactStore, Recommendation, Request};

/// Evaluate a request with the default configuration.
pub fn evaluate(request: &Request) -> Result<Recommendation, EngineError> {
    evaluate_with(request, &EngineConfig::default())
}

/// Evaluate a request.
///
/// Pipeline:
/// 1. Validate the request and configuration
/// 2. Seed the eight input facts
/// 3. Run the engine to fixpoint
/// 4. Aggregate the final fact store
pub fn evaluate_with(
    request: &Request,
    config: &EngineConfig,
) -> Result<Recommendation, EngineError> {
    let outcome = run_engine(request, config)?;
    aggregate::aggregate(&outcome.facts, request, config)
}

/// Run the engine only, returning the final fact store and fired rules.
pub fn run_engine(request: &Request, config: &EngineConfig) -> Result<RunOutcome, EngineError> {
    request.validate()?;
    config.validate()?;
    Engine::new(config).run(request.to_facts())
}

/// Describe every rule in table order.
pub fn describe_rule_table() -> Vec<RuleDescriptor> {
    rule_table().describe()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::{
        BudgetTier, ContentCapability, PrimaryGoal, PriorityKpi, ProductType, SalesStructure,
        StrategyCode, TacticPriority, TargetCustomer, TimeHorizon,
    };

    fn saas_request() -> Request {
        Request {
            product_type: ProductType::B2bSaas,
            target_customer: TargetCustomer::LargeEnterprise,
            primary_goal: PrimaryGoal::LeadGen,
            time_horizon: TimeHorizon::Long,
            content_capability: ContentCapability::High,
            sales_structure: SalesStructure::SalesTeam,
            priority_kpi: PriorityKpi::Sql,
            raw_budget_amount: Decimal::from(250_000),
        }
    }

    #[test]
    fn enterprise_saas_gets_abm_first() {
        let rec = evaluate(&saas_request()).unwrap();
        assert_eq!(rec.recommended_strategies[0], StrategyCode::Abm);
        assert_eq!(rec.channel_tactics[0].priority, TacticPriority::High);
        assert_eq!(rec.budget_allocation.len(), rec.recommended_strategies.len());
        assert!(rec
            .resources
            .iter()
            .any(|r| r == "[Partner] B2B PR Firm for Media Relations"));
    }

    #[test]
    fn run_engine_derives_one_tier() {
        let outcome = run_engine(&saas_request(), &EngineConfig::default()).unwrap();
        let tiers = outcome.facts.of_kind(FactKind::BudgetLevel).count();
        assert_eq!(tiers, 1);
        assert_eq!(outcome.facts.budget_tier(), Some(BudgetTier::Large));
    }

    #[test]
    fn invalid_budget_is_rejected_before_running() {
        let mut request = saas_request();
        request.raw_budget_amount = Decimal::ZERO;
        assert!(matches!(
            evaluate(&request),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    #[test]
    fn strategy_limit_widens_selection() {
        let config = EngineConfig {
            strategy_limit: 5,
            ..EngineConfig::default()
        };
        let rec = evaluate_with(&saas_request(), &config).unwrap();
        assert!(rec.recommended_strategies.len() > 3);
        assert!(rec.recommended_strategies.len() <= 5);
    }

    #[test]
    fn recommendation_serializes_with_labels() {
        let rec = evaluate(&saas_request()).unwrap();
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(
            json["recommended_strategies"][0],
            "S7 - Account-Based Marketing (ABM)"
        );
        assert!(json["total_monthly_budget"].is_number());
    }

    #[test]
    fn rule_table_description_is_complete() {
        assert_eq!(describe_rule_table().len(), rule_table().len());
    }
}

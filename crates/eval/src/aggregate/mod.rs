//! Reduce a final fact store to a `Recommendation`.
//!
//! The aggregator only reads the store. Every projection is deterministic
//! and total; the only failure is a budget that cannot be normalized.

pub mod insights;
pub mod narrative;
pub mod plan;
pub mod strategy;

use tracing::debug;

use crate::config::EngineConfig;
use crate::types::{
    BudgetTier, EngineError, FactStore, KpiTier, Recommendation, Request, StrategyCode,
};

pub fn aggregate(
    facts: &FactStore,
    request: &Request,
    config: &EngineConfig,
) -> Result<Recommendation, EngineError> {
    let ranked = strategy::rank_channels(facts);
    let selected =
        strategy::select_codes(facts, &ranked, request.time_horizon, config.strategy_limit);
    let monthly = request.monthly_budget();
    let budget_allocation =
        strategy::allocate_budget(&selected, config.default_budget_percent, monthly)?;
    let channel_tactics = strategy::tactics(&selected);
    let recommended_strategies: Vec<StrategyCode> = selected.iter().map(|s| s.code).collect();
    let channel_mix_rationale =
        narrative::channel_mix_rationale(request, ranked.first().map(|c| c.channel));

    debug!(
        channels = ranked.len(),
        strategies = ?recommended_strategies.iter().map(|c| c.short()).collect::<Vec<_>>(),
        "strategies selected"
    );

    let tier = facts.budget_tier();
    let critical_insights = insights::insights(
        request,
        tier.unwrap_or_else(|| BudgetTier::classify(request.raw_budget_amount)),
    );

    Ok(Recommendation {
        recommended_strategies,
        critical_insights,
        budget_allocation,
        total_monthly_budget: monthly,
        channel_tactics,
        channel_mix_rationale,
        action_plan: plan::action_plan(facts),
        tactical_actions: plan::tactical_actions(request),
        primary_kpis: plan::kpi_targets(facts, KpiTier::Primary),
        secondary_kpis: plan::kpi_targets(facts, KpiTier::Secondary),
        resources: plan::resources(facts),
        content_plan: plan::content_plan(facts),
        content_themes: narrative::content_themes(request.product_type)
            .iter()
            .map(|t| t.to_string())
            .collect(),
        budget_categories: plan::budget_categories(facts),
        strategy_summary: narrative::strategy_summary(request, tier),
        strategic_positioning: narrative::strategic_positioning(request).to_string(),
        messaging_focus: narrative::messaging_focus(request, facts).to_string(),
        differentiation: narrative::differentiation(facts).to_string(),
        competitive_advantages: narrative::competitive_advantages(request),
        scaling_strategy: narrative::scaling_strategy(&plan::scaling_actions(facts)),
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::{
        ContentCapability, PrimaryGoal, PriorityKpi, ProductType, SalesStructure, TargetCustomer,
        TimeHorizon,
    };

    #[test]
    fn bare_input_facts_fall_back_everywhere() {
        let request = Request {
            product_type: ProductType::DigitalProduct,
            target_customer: TargetCustomer::Sme,
            primary_goal: PrimaryGoal::LeadGen,
            time_horizon: TimeHorizon::Medium,
            content_capability: ContentCapability::Medium,
            sales_structure: SalesStructure::OwnerDriven,
            priority_kpi: PriorityKpi::Sql,
            raw_budget_amount: Decimal::from(8_000),
        };
        let facts: FactStore = request.to_facts().into_iter().collect();
        let rec = aggregate(&facts, &request, &EngineConfig::default()).unwrap();
        assert_eq!(
            rec.recommended_strategies,
            vec![StrategyCode::Ppc, StrategyCode::Seo, StrategyCode::Email]
        );
        let total: Decimal = rec.budget_allocation.iter().map(|a| a.percentage).sum();
        assert_eq!(total, Decimal::ONE_HUNDRED);
        assert_eq!(rec.total_monthly_budget, Decimal::from(2_000));
        assert_eq!(rec.critical_insights.len(), 3);
        assert!(rec.strategy_summary.contains("leveraging a multi-channel approach"));
        assert_eq!(rec.content_plan.len(), 1);
        assert_eq!(
            rec.channel_mix_rationale,
            "Diversified channel approach based on your business profile."
        );
        assert!(rec.primary_kpis.is_empty());
        assert!(rec.secondary_kpis.is_empty());
        assert_eq!(rec.tactical_actions.short_term.len(), 2);
        assert_eq!(rec.content_themes[0], "Educational content and tutorials");
        assert_eq!(rec.competitive_advantages.len(), 3);
    }

    #[test]
    fn engine_facts_feed_kpis_and_rationale() {
        let request = Request {
            product_type: ProductType::B2cRetail,
            target_customer: TargetCustomer::GenZ,
            primary_goal: PrimaryGoal::Awareness,
            time_horizon: TimeHorizon::Long,
            content_capability: ContentCapability::Medium,
            sales_structure: SalesStructure::Automated,
            priority_kpi: PriorityKpi::ConversionRate,
            raw_budget_amount: Decimal::from(50_000),
        };
        let config = EngineConfig::default();
        let outcome = crate::engine::Engine::new(&config)
            .run(request.to_facts())
            .unwrap();
        let rec = aggregate(&outcome.facts, &request, &config).unwrap();
        assert!(rec
            .channel_mix_rationale
            .starts_with("Broad-reach channel strategy with emphasis on"));
        let website = rec
            .primary_kpis
            .iter()
            .find(|k| k.metric_name == "Website Conversion Rate")
            .unwrap();
        assert_eq!(website.measurement_frequency, "Weekly");
        assert!(rec
            .primary_kpis
            .iter()
            .chain(&rec.secondary_kpis)
            .all(|k| k.measurement_frequency == "Weekly" || k.measurement_frequency == "Monthly"));
        assert_eq!(rec.tactical_actions.long_term.len(), 3);
    }
}

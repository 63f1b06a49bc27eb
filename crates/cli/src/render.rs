//! Text and JSON rendering of command results.

use marx_eval::types::{KpiTarget, Recommendation, TacticalAction};
use marx_eval::{RuleDescriptor, RunOutcome};
use serde::Serialize;

pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("serialization error: {}", e))
}

fn push_actions(out: &mut String, heading: &str, actions: &[TacticalAction]) {
    out.push_str(&format!("  {}:\n", heading));
    for a in actions {
        out.push_str(&format!(
            "    [{} / effort {}] {} ({})\n      -> {}\n",
            a.priority, a.estimated_effort, a.action, a.timeline, a.expected_outcome
        ));
        if !a.dependencies.is_empty() {
            out.push_str(&format!("      needs: {}\n", a.dependencies.join(", ")));
        }
    }
}

fn push_kpis(out: &mut String, heading: &str, kpis: &[KpiTarget]) {
    if kpis.is_empty() {
        return;
    }
    out.push_str(&format!("  {}:\n", heading));
    for k in kpis {
        out.push_str(&format!(
            "    {}: {} ({})\n",
            k.metric_name, k.target_value, k.measurement_frequency
        ));
    }
}

pub(crate) fn recommendation_text(rec: &Recommendation) -> String {
    let mut out = String::new();

    out.push_str("Recommended strategies:\n");
    for (i, code) in rec.recommended_strategies.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, code));
    }

    out.push_str(&format!(
        "\nBudget allocation (monthly total: ${}):\n",
        rec.total_monthly_budget.round_dp(2)
    ));
    for a in &rec.budget_allocation {
        out.push_str(&format!(
            "  {:<8} {:>5}%  ${}\n",
            a.strategy_code.short(),
            a.percentage,
            a.monthly_amount
        ));
    }

    out.push_str("\nCritical insights:\n");
    for insight in &rec.critical_insights {
        out.push_str(&format!("  - {}\n", insight));
    }

    out.push_str("\nChannel tactics:\n");
    for t in &rec.channel_tactics {
        out.push_str(&format!(
            "  [{:?}] {}: {}\n      -> {}\n",
            t.priority,
            t.strategy_code.short(),
            t.tactic,
            t.expected_outcome
        ));
    }

    out.push_str(&format!("\nChannel mix: {}\n", rec.channel_mix_rationale));

    out.push_str("\nAction plan:\n");
    for line in &rec.action_plan {
        out.push_str(&format!("  {}\n", line));
    }

    out.push_str("\nTimeline:\n");
    push_actions(&mut out, "Short term", &rec.tactical_actions.short_term);
    push_actions(&mut out, "Medium term", &rec.tactical_actions.medium_term);
    push_actions(&mut out, "Long term", &rec.tactical_actions.long_term);

    if !rec.primary_kpis.is_empty() || !rec.secondary_kpis.is_empty() {
        out.push_str("\nKPIs:\n");
        push_kpis(&mut out, "Primary", &rec.primary_kpis);
        push_kpis(&mut out, "Secondary", &rec.secondary_kpis);
    }

    out.push_str("\nResources:\n");
    for line in &rec.resources {
        out.push_str(&format!("  {}\n", line));
    }

    out.push_str("\nContent plan:\n");
    for item in &rec.content_plan {
        out.push_str(&format!(
            "  {} (priority {}): {}\n",
            item.content_type, item.priority, item.frequency
        ));
    }

    out.push_str("\nContent themes:\n");
    for theme in &rec.content_themes {
        out.push_str(&format!("  - {}\n", theme));
    }

    if !rec.budget_categories.is_empty() {
        out.push_str("\nBudget categories:\n");
        for share in &rec.budget_categories {
            out.push_str(&format!("  {}: {}%\n", share.category, share.percentage));
        }
    }

    out.push_str(&format!("\nSummary: {}\n", rec.strategy_summary));
    out.push_str(&format!("Positioning: {}\n", rec.strategic_positioning));
    out.push_str(&format!("Messaging: {}\n", rec.messaging_focus));
    out.push_str(&format!("Differentiation: {}\n", rec.differentiation));
    out.push_str("Competitive advantages:\n");
    for advantage in &rec.competitive_advantages {
        out.push_str(&format!("  - {}\n", advantage));
    }
    out.push_str(&format!("Scaling: {}\n", rec.scaling_strategy));
    out
}

#[derive(Serialize)]
struct OutcomeJson<'a> {
    passes: usize,
    fired: &'a [&'static str],
    facts: Vec<&'a marx_eval::Fact>,
}

pub(crate) fn outcome_json(outcome: &RunOutcome) -> String {
    to_json(&OutcomeJson {
        passes: outcome.passes,
        fired: &outcome.fired,
        facts: outcome.facts.iter().collect(),
    })
}

pub(crate) fn outcome_text(outcome: &RunOutcome) -> String {
    let mut out = format!(
        "{} fact(s), {} rule(s) fired in {} pass(es)\n",
        outcome.facts.len(),
        outcome.fired.len(),
        outcome.passes
    );
    for fact in &outcome.facts {
        out.push_str(&format!("  {}\n", fact));
    }
    out.push_str("Fired rules:\n");
    for name in &outcome.fired {
        out.push_str(&format!("  {}\n", name));
    }
    out
}

pub(crate) fn rules_text(rules: &[RuleDescriptor]) -> String {
    let mut out = String::new();
    for r in rules {
        out.push_str(&format!(
            "[{}] {}: {}\n    when {}\n    asserts {}\n",
            r.layer,
            r.name,
            r.description,
            r.condition,
            r.asserts.join(", ")
        ));
    }
    out.push_str(&format!("{} rule(s)\n", rules.len()));
    out
}

#[cfg(test)]
mod tests {
    use marx_eval::types::{
        ContentCapability, PrimaryGoal, PriorityKpi, ProductType, SalesStructure, TargetCustomer,
        TimeHorizon,
    };
    use marx_eval::{describe_rule_table, evaluate, Request};
    use rust_decimal::Decimal;

    use super::*;

    fn request() -> Request {
        Request {
            product_type: ProductType::LocalService,
            target_customer: TargetCustomer::LocalCommunity,
            primary_goal: PrimaryGoal::LeadGen,
            time_horizon: TimeHorizon::Short,
            content_capability: ContentCapability::Low,
            sales_structure: SalesStructure::OwnerDriven,
            priority_kpi: PriorityKpi::Cpa,
            raw_budget_amount: Decimal::from(800),
        }
    }

    #[test]
    fn text_lists_every_section() {
        let text = recommendation_text(&evaluate(&request()).unwrap());
        for heading in [
            "Recommended strategies:",
            "Budget allocation (monthly total: $400",
            "Critical insights:",
            "Channel tactics:",
            "Channel mix: ",
            "Action plan:",
            "Timeline:",
            "  Short term:",
            "KPIs:",
            "Resources:",
            "Content plan:",
            "Content themes:",
            "Budget categories:",
            "Summary: ",
            "Competitive advantages:",
        ] {
            assert!(text.contains(heading), "missing {:?} in\n{}", heading, text);
        }
    }

    #[test]
    fn rules_text_counts_rules() {
        let rules = describe_rule_table();
        let text = rules_text(&rules[..1]);
        assert!(text.starts_with("[0] classify_budget:"));
        assert!(text.ends_with("1 rule(s)\n"));
    }
}

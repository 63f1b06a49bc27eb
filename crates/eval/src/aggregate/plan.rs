//! Action plan, resources, KPIs, tactical timeline, content plan and
//! budget categories.
//!
//! Every extraction is total: an empty subset yields its fallback entry.
//! Facts of a kind are read in rule-table order (the rule that asserts them,
//! then their place in its list); ranked extractions sort stably on top of
//! that, so ties never depend on how the texts collate.

use std::collections::BTreeMap;

use crate::rules::rule_table;
use crate::types::{
    BudgetShare, ContentCapability, ContentKind, ContentPlanItem, Effort, Fact, FactKind,
    FactStore, KpiTarget, KpiTier, PrimaryGoal, Request, Severity, TacticalAction,
    TacticalTimeline, TimeHorizon,
};

/// Scaling triggers used when no rule produced one.
pub const DEFAULT_TRIGGERS: [&str; 3] = [
    "Consistent positive ROI for 3+ months",
    "Marketing qualified leads exceed sales capacity",
    "Customer acquisition cost below industry benchmark",
];

/// Facts of one kind, ordered by where the rule table asserts them. Facts
/// no rule asserts verbatim keep store order after the rest.
fn in_rule_order(facts: &FactStore, kind: FactKind) -> Vec<&Fact> {
    let table = rule_table();
    let mut out: Vec<&Fact> = facts.of_kind(kind).collect();
    out.sort_by_key(|f| table.position_of(f).unwrap_or((usize::MAX, usize::MAX)));
    out
}

fn texts(facts: &FactStore, kind: FactKind) -> impl Iterator<Item = &'static str> + '_ {
    in_rule_order(facts, kind).into_iter().filter_map(|f| match f {
        Fact::CostTip { tip } => Some(*tip),
        Fact::ScalingTrigger { trigger } => Some(*trigger),
        Fact::ScalingAction { action } => Some(*action),
        Fact::PartnerRecommendation { partner_type } => Some(*partner_type),
        _ => None,
    })
}

/// Scaling actions in rule-table order.
pub fn scaling_actions(facts: &FactStore) -> Vec<&'static str> {
    texts(facts, FactKind::ScalingAction).collect()
}

fn or_fallback(mut lines: Vec<String>, fallback: String) -> Vec<String> {
    if lines.is_empty() {
        lines.push(fallback);
    }
    lines
}

// ──────────────────────────────────────────────
// Action plan
// ──────────────────────────────────────────────

fn quick_wins(facts: &FactStore) -> Vec<String> {
    let mut wins: Vec<(Severity, &str)> = in_rule_order(facts, FactKind::QuickWin)
        .into_iter()
        .filter_map(|f| match f {
            Fact::QuickWin {
                action, priority, ..
            } => Some((*priority, *action)),
            _ => None,
        })
        .collect();
    wins.sort_by_key(|(severity, _)| *severity);
    let lines = wins
        .into_iter()
        .take(2)
        .map(|(severity, action)| format!("[Quick Win - {}] {}", severity, action))
        .collect();
    or_fallback(
        lines,
        "[Quick Win - Critical] Set up analytics tracking and conversion funnels".to_string(),
    )
}

fn primary_kpi_lines(facts: &FactStore) -> Vec<String> {
    let lines = kpi_targets(facts, KpiTier::Primary)
        .into_iter()
        .take(2)
        .map(|k| format!("[KPI] {}: {}", k.metric_name, k.target_value))
        .collect();
    or_fallback(
        lines,
        "[KPI] Marketing ROI: positive return within the planning horizon".to_string(),
    )
}

fn risks(facts: &FactStore) -> Vec<String> {
    let mut risks: Vec<(Severity, &str, &str)> = in_rule_order(facts, FactKind::Risk)
        .into_iter()
        .filter_map(|f| match f {
            Fact::Risk {
                risk,
                severity,
                mitigation,
            } => Some((*severity, *risk, *mitigation)),
            _ => None,
        })
        .collect();
    risks.sort_by_key(|(severity, _, _)| *severity);
    let lines = risks
        .into_iter()
        .take(2)
        .map(|(_, risk, mitigation)| format!("[Risk] {}. Mitigation: {}", risk, mitigation))
        .collect();
    or_fallback(
        lines,
        "[Risk] Channel performance may differ from benchmarks. Mitigation: Review results weekly and shift budget to proven channels".to_string(),
    )
}

fn scaling_trigger(facts: &FactStore) -> String {
    let trigger = texts(facts, FactKind::ScalingTrigger)
        .next()
        .unwrap_or(DEFAULT_TRIGGERS[0]);
    format!("[Scaling] {}", trigger)
}

pub fn action_plan(facts: &FactStore) -> Vec<String> {
    let mut plan = quick_wins(facts);
    plan.extend(primary_kpi_lines(facts));
    plan.extend(risks(facts));
    plan.push(scaling_trigger(facts));
    plan
}

// ──────────────────────────────────────────────
// Resources
// ──────────────────────────────────────────────

fn tools(facts: &FactStore) -> Vec<String> {
    let mut seen: Vec<&str> = Vec::new();
    for fact in in_rule_order(facts, FactKind::ToolRecommendation) {
        if let Fact::ToolRecommendation { tool, .. } = fact {
            if !seen.contains(tool) {
                seen.push(*tool);
            }
        }
    }
    let lines = seen
        .into_iter()
        .take(3)
        .map(|tool| format!("[Tool] {}", tool))
        .collect();
    or_fallback(lines, "[Tool] Google Analytics (free)".to_string())
}

fn capabilities(facts: &FactStore) -> Vec<String> {
    let mut needs: Vec<(Severity, &str)> = in_rule_order(facts, FactKind::CapabilityRequirement)
        .into_iter()
        .filter_map(|f| match f {
            Fact::CapabilityRequirement {
                capability,
                importance,
            } => Some((*importance, *capability)),
            _ => None,
        })
        .collect();
    needs.sort_by_key(|(importance, _)| *importance);
    let lines = needs
        .into_iter()
        .take(2)
        .map(|(importance, capability)| format!("[Capability - {}] {}", importance, capability))
        .collect();
    or_fallback(
        lines,
        "[Capability - Medium] Campaign Management & Performance Tracking".to_string(),
    )
}

fn partners(facts: &FactStore) -> Vec<String> {
    let lines = texts(facts, FactKind::PartnerRecommendation)
        .take(1)
        .map(|p| format!("[Partner] {}", p))
        .collect();
    or_fallback(
        lines,
        "[Partner] Freelance specialists for overflow execution".to_string(),
    )
}

fn cost_tips(facts: &FactStore) -> Vec<String> {
    let lines = texts(facts, FactKind::CostTip)
        .take(2)
        .map(|tip| format!("[Cost Tip] {}", tip))
        .collect();
    or_fallback(
        lines,
        "[Cost Tip] Reallocate spend monthly from the weakest channel to the strongest".to_string(),
    )
}

pub fn resources(facts: &FactStore) -> Vec<String> {
    let mut out = tools(facts);
    out.extend(capabilities(facts));
    out.extend(partners(facts));
    out.extend(cost_tips(facts));
    out
}

// ──────────────────────────────────────────────
// KPI targets
// ──────────────────────────────────────────────

/// Conversion metrics move fast enough to review weekly.
fn measurement_frequency(metric: &str) -> &'static str {
    if metric.to_lowercase().contains("conversion") {
        "Weekly"
    } else {
        "Monthly"
    }
}

/// KPI recommendations of one tier, in rule-table order.
pub fn kpi_targets(facts: &FactStore, tier: KpiTier) -> Vec<KpiTarget> {
    in_rule_order(facts, FactKind::KpiRecommendation)
        .into_iter()
        .filter_map(|f| match f {
            Fact::KpiRecommendation {
                kpi,
                target,
                tier: t,
            } if *t == tier => Some(KpiTarget {
                metric_name: kpi.to_string(),
                target_value: target.to_string(),
                measurement_frequency: measurement_frequency(kpi).to_string(),
            }),
            _ => None,
        })
        .collect()
}

// ──────────────────────────────────────────────
// Tactical timeline
// ──────────────────────────────────────────────

fn action(
    action: &str,
    timeline: &str,
    priority: Severity,
    effort: Effort,
    outcome: &str,
    dependencies: &[&str],
) -> TacticalAction {
    TacticalAction {
        action: action.to_string(),
        timeline: timeline.to_string(),
        priority,
        estimated_effort: effort,
        expected_outcome: outcome.to_string(),
        dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
    }
}

/// Phased actions for the first year. The core sequence is the same for
/// every request; content capability, goal and horizon add extra steps.
pub fn tactical_actions(request: &Request) -> TacticalTimeline {
    let mut short_term = vec![
        action(
            "Set up analytics tracking and conversion funnels",
            "Month 1",
            Severity::Critical,
            Effort::Medium,
            "Complete visibility into marketing performance",
            &[],
        ),
        action(
            "Launch first campaign on primary channel",
            "Month 1-2",
            Severity::High,
            Effort::High,
            "Initial lead flow and performance data",
            &["Analytics setup"],
        ),
    ];
    if request.content_capability == ContentCapability::High {
        short_term.push(action(
            "Publish comprehensive content piece (whitepaper/guide)",
            "Month 2-3",
            Severity::High,
            Effort::High,
            "Lead magnet and SEO authority building",
            &[],
        ));
    }

    let mut medium_term = vec![
        action(
            "Expand to secondary channels based on performance data",
            "Month 3-4",
            Severity::High,
            Effort::Medium,
            "Diversified traffic sources and reduced channel risk",
            &["Primary channel performance validation"],
        ),
        action(
            "Implement marketing automation workflows",
            "Month 4-5",
            Severity::Medium,
            Effort::High,
            "Improved lead nurturing and conversion efficiency",
            &["Email list of 500+ leads"],
        ),
    ];
    if request.primary_goal == PrimaryGoal::Retention {
        medium_term.push(action(
            "Launch customer loyalty or referral program",
            "Month 5-6",
            Severity::High,
            Effort::High,
            "Increased customer lifetime value and organic growth",
            &["Customer base of 100+ active users"],
        ));
    }

    let mut long_term = vec![
        action(
            "Conduct comprehensive marketing audit and optimization",
            "Month 6-9",
            Severity::Medium,
            Effort::Medium,
            "Refined strategy based on 6 months of data",
            &[],
        ),
        action(
            "Scale successful channels and test advanced tactics",
            "Month 9-12",
            Severity::High,
            Effort::High,
            "Accelerated growth with proven playbooks",
            &["Positive ROI on existing channels"],
        ),
    ];
    if request.primary_goal == PrimaryGoal::Awareness && request.time_horizon == TimeHorizon::Long
    {
        long_term.push(action(
            "Develop brand partnership or sponsorship strategy",
            "Month 10-12",
            Severity::Medium,
            Effort::High,
            "Enhanced brand recognition and credibility",
            &["Established market presence"],
        ));
    }

    TacticalTimeline {
        short_term,
        medium_term,
        long_term,
    }
}

// ──────────────────────────────────────────────
// Content and budget categories
// ──────────────────────────────────────────────

pub const MAX_CONTENT_ITEMS: usize = 5;

/// Best priority per content type, ranked by priority then declaration order.
pub fn content_plan(facts: &FactStore) -> Vec<ContentPlanItem> {
    let mut best: BTreeMap<ContentKind, (u8, &'static str)> = BTreeMap::new();
    for fact in facts.of_kind(FactKind::ContentPriority) {
        if let Fact::ContentPriority {
            content_type,
            priority,
            frequency,
        } = fact
        {
            let entry = best.entry(*content_type).or_insert((*priority, *frequency));
            if *priority < entry.0 {
                *entry = (*priority, *frequency);
            }
        }
    }

    let mut ranked: Vec<(ContentKind, u8, &str)> =
        best.into_iter().map(|(kind, (p, f))| (kind, p, f)).collect();
    ranked.sort_by_key(|(kind, priority, _)| (*priority, *kind));

    if ranked.is_empty() {
        ranked.push((ContentKind::BlogArticles, 1, "1-2 per week"));
    }
    ranked
        .into_iter()
        .take(MAX_CONTENT_ITEMS)
        .map(|(kind, priority, frequency)| ContentPlanItem {
            content_type: kind.label().to_string(),
            priority,
            frequency: frequency.to_string(),
        })
        .collect()
}

/// The tier's category split, largest share first.
pub fn budget_categories(facts: &FactStore) -> Vec<BudgetShare> {
    let mut shares: Vec<BudgetShare> = facts
        .of_kind(FactKind::BudgetCategory)
        .filter_map(|f| match f {
            Fact::BudgetCategory {
                category,
                percentage,
            } => Some(BudgetShare {
                category: category.to_string(),
                percentage: *percentage,
            }),
            _ => None,
        })
        .collect();
    shares.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    shares
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::{PriorityKpi, ProductType, SalesStructure, TargetCustomer};

    fn store(facts: Vec<Fact>) -> FactStore {
        facts.into_iter().collect()
    }

    #[test]
    fn empty_store_yields_fallbacks() {
        let facts = FactStore::new();
        let plan = action_plan(&facts);
        assert_eq!(plan.len(), 4);
        assert!(plan[0].starts_with("[Quick Win - Critical]"));
        assert!(plan[1].starts_with("[KPI]"));
        assert!(plan[2].starts_with("[Risk]"));
        assert_eq!(plan[3], "[Scaling] Consistent positive ROI for 3+ months");

        let res = resources(&facts);
        assert_eq!(res.len(), 4);
        assert!(res[0].starts_with("[Tool]"));
        assert!(res[3].starts_with("[Cost Tip]"));

        let content = content_plan(&facts);
        assert_eq!(content.len(), 1);
        assert_eq!(content[0].content_type, "Blog Articles");
        assert!(budget_categories(&facts).is_empty());
    }

    #[test]
    fn quick_wins_rank_by_severity() {
        let facts = store(vec![
            Fact::QuickWin {
                action: "A",
                priority: Severity::High,
                effort: Effort::Low,
            },
            Fact::QuickWin {
                action: "B",
                priority: Severity::Critical,
                effort: Effort::Low,
            },
            Fact::QuickWin {
                action: "C",
                priority: Severity::High,
                effort: Effort::Low,
            },
        ]);
        assert_eq!(
            quick_wins(&facts),
            vec!["[Quick Win - Critical] B", "[Quick Win - High] A"]
        );
    }

    #[test]
    fn cost_tips_follow_rule_order_not_text_order() {
        let facts = store(vec![
            Fact::CostTip {
                tip: "Create content in-house or use AI writing assistants",
            },
            Fact::CostTip {
                tip: "Leverage organic social media before paid ads",
            },
            Fact::CostTip {
                tip: "Use free tools: Google Analytics, Google Search Console, Mailchimp free tier",
            },
        ]);
        assert_eq!(
            cost_tips(&facts),
            vec![
                "[Cost Tip] Use free tools: Google Analytics, Google Search Console, Mailchimp free tier",
                "[Cost Tip] Leverage organic social media before paid ads",
            ]
        );
    }

    #[test]
    fn kpi_targets_split_by_tier_with_frequency() {
        let facts = store(vec![
            Fact::KpiRecommendation {
                kpi: "Churn Rate",
                target: "<5% monthly",
                tier: KpiTier::Secondary,
            },
            Fact::KpiRecommendation {
                kpi: "Conversion Rate",
                target: "2-5%",
                tier: KpiTier::Secondary,
            },
            Fact::KpiRecommendation {
                kpi: "Cost Per Acquisition",
                target: "<33% of customer LTV",
                tier: KpiTier::Primary,
            },
        ]);
        let primary = kpi_targets(&facts, KpiTier::Primary);
        assert_eq!(primary.len(), 1);
        assert_eq!(primary[0].measurement_frequency, "Monthly");
        let secondary = kpi_targets(&facts, KpiTier::Secondary);
        assert_eq!(secondary.len(), 2);
        let conversion = secondary
            .iter()
            .find(|k| k.metric_name == "Conversion Rate")
            .unwrap();
        assert_eq!(conversion.measurement_frequency, "Weekly");
        assert!(kpi_targets(&FactStore::new(), KpiTier::Secondary).is_empty());
    }

    #[test]
    fn timeline_adds_steps_for_capability_goal_and_horizon() {
        let mut request = Request {
            product_type: ProductType::B2cRetail,
            target_customer: TargetCustomer::GenZ,
            primary_goal: PrimaryGoal::LeadGen,
            time_horizon: TimeHorizon::Short,
            content_capability: ContentCapability::Low,
            sales_structure: SalesStructure::Automated,
            priority_kpi: PriorityKpi::Cpa,
            raw_budget_amount: Decimal::from(5_000),
        };
        let base = tactical_actions(&request);
        assert_eq!(
            (base.short_term.len(), base.medium_term.len(), base.long_term.len()),
            (2, 2, 2)
        );
        assert_eq!(base.short_term[0].priority, Severity::Critical);
        assert_eq!(base.short_term[1].dependencies, vec!["Analytics setup"]);

        request.content_capability = ContentCapability::High;
        request.primary_goal = PrimaryGoal::Awareness;
        request.time_horizon = TimeHorizon::Long;
        let full = tactical_actions(&request);
        assert_eq!(full.short_term.len(), 3);
        assert_eq!(full.medium_term.len(), 2);
        assert_eq!(
            full.long_term[2].action,
            "Develop brand partnership or sponsorship strategy"
        );

        request.primary_goal = PrimaryGoal::Retention;
        let retention = tactical_actions(&request);
        assert_eq!(retention.medium_term.len(), 3);
        assert_eq!(retention.long_term.len(), 2);
    }

    #[test]
    fn secondary_kpis_are_skipped() {
        let facts = store(vec![
            Fact::KpiRecommendation {
                kpi: "Churn Rate",
                target: "<5% monthly",
                tier: KpiTier::Secondary,
            },
            Fact::KpiRecommendation {
                kpi: "Cost Per Acquisition",
                target: "<33% of customer LTV",
                tier: KpiTier::Primary,
            },
        ]);
        assert_eq!(
            primary_kpi_lines(&facts),
            vec!["[KPI] Cost Per Acquisition: <33% of customer LTV"]
        );
    }

    #[test]
    fn capabilities_rank_by_importance() {
        let facts = store(vec![
            Fact::CapabilityRequirement {
                capability: "Technical SEO",
                importance: Severity::Medium,
            },
            Fact::CapabilityRequirement {
                capability: "Writing",
                importance: Severity::Critical,
            },
        ]);
        assert_eq!(
            capabilities(&facts),
            vec![
                "[Capability - Critical] Writing",
                "[Capability - Medium] Technical SEO"
            ]
        );
    }

    #[test]
    fn content_plan_keeps_best_priority_per_type() {
        let facts = store(vec![
            Fact::ContentPriority {
                content_type: ContentKind::Webinars,
                priority: 2,
                frequency: "2 per month",
            },
            Fact::ContentPriority {
                content_type: ContentKind::SocialPosts,
                priority: 1,
                frequency: "daily",
            },
            Fact::ContentPriority {
                content_type: ContentKind::Webinars,
                priority: 1,
                frequency: "weekly",
            },
        ]);
        let plan = content_plan(&facts);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].content_type, "Webinars & Workshops");
        assert_eq!(plan[0].frequency, "weekly");
        assert_eq!(plan[1].content_type, "Social Media Posts");
    }

    #[test]
    fn categories_sorted_by_share() {
        let facts = store(vec![
            Fact::BudgetCategory {
                category: "Tools & Software",
                percentage: Decimal::from(10),
            },
            Fact::BudgetCategory {
                category: "Organic Marketing",
                percentage: Decimal::from(60),
            },
        ]);
        let shares = budget_categories(&facts);
        assert_eq!(shares[0].category, "Organic Marketing");
        assert_eq!(shares[1].percentage, Decimal::from(10));
    }
}

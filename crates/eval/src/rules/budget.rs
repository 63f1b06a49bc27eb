//! Layers 8-9: budget split, cost tips and scaling.

use super::{approach, capability, kpi, pct, rule, tier, Layer, Rule};
use crate::predicate::all;
use crate::types::{Approach, BudgetTier, ContentCapability, Fact, PriorityKpi};

fn split(shares: &[(&'static str, u32)]) -> Vec<Fact> {
    shares
        .iter()
        .map(|&(category, percentage)| Fact::BudgetCategory {
            category,
            percentage: pct(percentage),
        })
        .collect()
}

fn tips(tips: &[&'static str]) -> Vec<Fact> {
    tips.iter().map(|&tip| Fact::CostTip { tip }).collect()
}

pub(super) fn rules() -> Vec<Rule> {
    let mut rules = budget_split();
    rules.extend(cost_tips());
    rules.extend(scaling());
    rules
}

fn budget_split() -> Vec<Rule> {
    let l = Layer::BudgetSplit;
    vec![
        rule(
            "budget_split_micro",
            l,
            "Category split for micro budgets",
            tier(BudgetTier::Micro),
            split(&[
                ("Organic Marketing", 60),
                ("Paid Advertising", 20),
                ("Tools & Software", 10),
                ("Content Creation", 10),
            ]),
        ),
        rule(
            "budget_split_small",
            l,
            "Category split for small budgets",
            tier(BudgetTier::Small),
            split(&[
                ("Paid Advertising", 35),
                ("Content Marketing", 25),
                ("Tools & Software", 15),
                ("SEO & Organic", 15),
                ("Marketing Operations", 10),
            ]),
        ),
        rule(
            "budget_split_medium",
            l,
            "Category split for medium budgets",
            tier(BudgetTier::Medium),
            split(&[
                ("Paid Advertising", 40),
                ("Content & SEO", 25),
                ("Marketing Technology", 15),
                ("Events & Partnerships", 10),
                ("Team & Freelancers", 10),
            ]),
        ),
        rule(
            "budget_split_large",
            l,
            "Category split for large budgets",
            tier(BudgetTier::Large),
            split(&[
                ("Paid Media Mix", 45),
                ("Brand & Content", 20),
                ("Marketing Team", 15),
                ("Technology Stack", 10),
                ("Events & PR", 10),
            ]),
        ),
        rule(
            "budget_split_enterprise",
            l,
            "Category split for enterprise budgets",
            tier(BudgetTier::Enterprise),
            split(&[
                ("Multi-Channel Paid Media", 40),
                ("Brand & Demand Gen", 20),
                ("Marketing Organization", 20),
                ("MarTech & Analytics", 10),
                ("Strategic Partnerships", 10),
            ]),
        ),
    ]
}

fn cost_tips() -> Vec<Rule> {
    let l = Layer::BudgetSplit;
    vec![
        rule(
            "cost_tips_micro",
            l,
            "Stretch a micro budget with free tooling",
            tier(BudgetTier::Micro),
            tips(&[
                "Use free tools: Google Analytics, Google Search Console, Mailchimp free tier",
                "Leverage organic social media before paid ads",
                "Create content in-house or use AI writing assistants",
            ]),
        ),
        rule(
            "cost_tips_performance",
            l,
            "Keep acquisition cost down on small budgets",
            all(vec![tier(BudgetTier::Small), kpi(PriorityKpi::Cpa)]),
            tips(&[
                "Start with long-tail keywords for lower CPCs",
                "Use retargeting to improve conversion efficiency",
                "A/B test ad creative weekly to improve CTR",
            ]),
        ),
        rule(
            "cost_tips_content",
            l,
            "Get more from limited content capacity",
            capability(ContentCapability::Low),
            tips(&[
                "Repurpose content across multiple channels",
                "Use user-generated content and testimonials",
                "Curate industry content instead of always creating original",
            ]),
        ),
    ]
}

fn scaling() -> Vec<Rule> {
    let l = Layer::Scaling;
    vec![
        rule(
            "scaling_trigger_cpa",
            l,
            "Scale when acquisition cost holds below target",
            kpi(PriorityKpi::Cpa),
            vec![Fact::ScalingTrigger {
                trigger: "When CPA is below target for 2 consecutive weeks",
            }],
        ),
        rule(
            "scaling_trigger_traffic",
            l,
            "Scale when organic traffic compounds",
            kpi(PriorityKpi::Traffic),
            vec![Fact::ScalingTrigger {
                trigger: "When organic traffic grows 20% month-over-month",
            }],
        ),
        rule(
            "scaling_trigger_clv",
            l,
            "Scale when lifetime value outpaces acquisition cost",
            kpi(PriorityKpi::Clv),
            vec![Fact::ScalingTrigger {
                trigger: "When CLV:CAC ratio exceeds 3:1",
            }],
        ),
        rule(
            "scaling_actions_aggressive",
            l,
            "Aggressive growth on a medium budget doubles down on winners",
            all(vec![
                approach(Approach::AggressiveGrowth),
                tier(BudgetTier::Medium),
            ]),
            vec![
                Fact::ScalingAction {
                    action: "Increase winning channel budgets by 50% when efficiency maintained",
                },
                Fact::ScalingAction {
                    action: "Expand to 2-3 new channels after proving core channels",
                },
            ],
        ),
        rule(
            "scaling_actions_steady",
            l,
            "Steady growth scales budgets gradually",
            approach(Approach::SteadyGrowth),
            vec![
                Fact::ScalingAction {
                    action: "Increase budgets 20% monthly while maintaining target metrics",
                },
                Fact::ScalingAction {
                    action: "Test one new channel per quarter",
                },
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::rules::{rule_table, tests::store};

    #[test]
    fn exactly_one_split_per_tier() {
        for t in BudgetTier::ALL {
            let facts = store(vec![Fact::BudgetLevel { tier: *t }]);
            let matching: Vec<_> = budget_split()
                .into_iter()
                .filter(|r| r.matches(&facts).unwrap())
                .collect();
            assert_eq!(matching.len(), 1, "{}", t);
            let total: Decimal = matching[0]
                .fire(&facts)
                .unwrap()
                .iter()
                .map(|f| match f {
                    Fact::BudgetCategory { percentage, .. } => *percentage,
                    other => panic!("unexpected {}", other),
                })
                .sum();
            assert_eq!(total, Decimal::ONE_HUNDRED);
        }
    }

    #[test]
    fn steady_growth_scales_gradually() {
        let facts = store(vec![Fact::StrategicApproach {
            approach: Approach::SteadyGrowth,
        }]);
        let rule = rule_table().get("scaling_actions_steady").unwrap();
        assert!(rule.matches(&facts).unwrap());
        assert_eq!(rule.fire(&facts).unwrap().len(), 2);
    }
}

//! Layers 6-7: KPI recommendations and risk identification.

use super::{
    capability, competition, cycle, goal, horizon, kpi, product, rule, structure, tier, Layer,
    Rule,
};
use crate::predicate::all;
use crate::types::{
    BudgetTier, CompetitionIntensity, ContentCapability, Fact, KpiTier, PrimaryGoal, PriorityKpi,
    ProductType, SalesCycle, SalesStructure, Severity, TimeHorizon,
};

fn target(kpi: &'static str, target: &'static str, tier: KpiTier) -> Fact {
    Fact::KpiRecommendation { kpi, target, tier }
}

fn risk(risk: &'static str, severity: Severity, mitigation: &'static str) -> Vec<Fact> {
    vec![Fact::Risk {
        risk,
        severity,
        mitigation,
    }]
}

pub(super) fn rules() -> Vec<Rule> {
    let mut rules = kpis();
    rules.extend(risks());
    rules
}

fn kpis() -> Vec<Rule> {
    use KpiTier::{Primary, Secondary};
    let l = Layer::Kpis;
    vec![
        rule(
            "kpi_conversion_rate",
            l,
            "Conversion-rate targets",
            kpi(PriorityKpi::ConversionRate),
            vec![
                target(
                    "Website Conversion Rate",
                    "2-5% improvement per quarter",
                    Primary,
                ),
                target(
                    "Landing Page Conversion Rate",
                    "10-20% for cold traffic",
                    Primary,
                ),
            ],
        ),
        rule(
            "kpi_lifetime_value",
            l,
            "Lifetime-value targets",
            kpi(PriorityKpi::Clv),
            vec![
                target(
                    "Customer Lifetime Value",
                    "3x customer acquisition cost minimum",
                    Primary,
                ),
                target(
                    "Repeat Purchase Rate",
                    "25-40% depending on industry",
                    Primary,
                ),
            ],
        ),
        rule(
            "kpi_organic_traffic",
            l,
            "Organic traffic targets",
            kpi(PriorityKpi::Traffic),
            vec![
                target("Organic Traffic Growth", "15-30% monthly growth", Primary),
                target("Domain Authority", "+5 points per quarter", Secondary),
            ],
        ),
        rule(
            "kpi_acquisition_cost",
            l,
            "Acquisition-cost targets",
            kpi(PriorityKpi::Cpa),
            vec![
                target("Cost Per Acquisition", "<33% of customer LTV", Primary),
                target("Return on Ad Spend", "3:1 minimum, 5:1 target", Primary),
            ],
        ),
        rule(
            "kpi_qualified_leads",
            l,
            "Sales-qualified lead targets",
            kpi(PriorityKpi::Sql),
            vec![
                target("Sales Qualified Leads", "20% MQL to SQL conversion", Primary),
                target(
                    "SQL to Close Rate",
                    "25-40% depending on sales cycle",
                    Primary,
                ),
            ],
        ),
        rule(
            "kpi_awareness",
            l,
            "Secondary awareness metrics",
            goal(PrimaryGoal::Awareness),
            vec![
                target(
                    "Brand Awareness (Surveys)",
                    "15-25% increase quarterly",
                    Secondary,
                ),
                target("Social Media Reach", "20% monthly growth", Secondary),
            ],
        ),
        rule(
            "kpi_saas",
            l,
            "Secondary SaaS metrics",
            product(ProductType::B2bSaas),
            vec![
                target("Monthly Recurring Revenue Growth", "10-20% monthly", Secondary),
                target("Churn Rate", "<5% monthly", Secondary),
            ],
        ),
    ]
}

fn risks() -> Vec<Rule> {
    let l = Layer::Risks;
    vec![
        rule(
            "risk_limited_budget",
            l,
            "Micro budgets restrict channel diversification",
            tier(BudgetTier::Micro),
            risk(
                "Limited budget may restrict channel diversification",
                Severity::High,
                "Focus on 1-2 high-ROI channels, leverage organic and low-cost tactics",
            ),
        ),
        rule(
            "risk_crowded_market",
            l,
            "Very high competition makes paid channels expensive on small budgets",
            all(vec![
                competition(CompetitionIntensity::VeryHigh),
                tier(BudgetTier::Small),
            ]),
            risk(
                "High competition may make paid channels expensive",
                Severity::High,
                "Focus on long-tail keywords, niche positioning, and organic growth",
            ),
        ),
        rule(
            "risk_low_content_capability",
            l,
            "Low content capability limits content marketing",
            capability(ContentCapability::Low),
            risk(
                "Low content capability limits content marketing effectiveness",
                Severity::Medium,
                "Invest in content training, hire freelancers, or use AI tools",
            ),
        ),
        rule(
            "risk_timeline_mismatch",
            l,
            "A short horizon cannot close a very long sales cycle",
            all(vec![
                cycle(SalesCycle::VeryLong),
                horizon(TimeHorizon::Short),
            ]),
            risk(
                "Short timeline incompatible with long sales cycle",
                Severity::High,
                "Set realistic expectations, focus on pipeline building not closed deals",
            ),
        ),
        rule(
            "risk_owner_bottleneck",
            l,
            "Owner-driven sales limit scale",
            structure(SalesStructure::OwnerDriven),
            risk(
                "Owner-driven sales may limit scalability",
                Severity::Medium,
                "Implement marketing automation, nurture sequences, and self-service options",
            ),
        ),
        rule(
            "risk_seasonal_ad_costs",
            l,
            "Retail ad costs swing with the seasons",
            all(vec![product(ProductType::B2cRetail), kpi(PriorityKpi::Cpa)]),
            risk(
                "B2C ad costs can fluctuate seasonally",
                Severity::Medium,
                "Diversify traffic sources, build organic channels, reserve budget for peak seasons",
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::tests::{fire, matches, store};

    #[test]
    fn traffic_kpi_has_primary_and_secondary() {
        let facts = store(vec![Fact::PriorityKpi {
            kpi: PriorityKpi::Traffic,
        }]);
        let out = fire("kpi_organic_traffic", &facts);
        assert_eq!(out.len(), 2);
        assert!(out.contains(&target(
            "Domain Authority",
            "+5 points per quarter",
            KpiTier::Secondary
        )));
    }

    #[test]
    fn timeline_mismatch_needs_both_facts() {
        let mut facts = store(vec![Fact::TimeHorizon {
            horizon: TimeHorizon::Short,
        }]);
        assert!(!matches("risk_timeline_mismatch", &facts));
        facts.assert(Fact::SalesCycle {
            cycle: SalesCycle::VeryLong,
        });
        let out = fire("risk_timeline_mismatch", &facts);
        assert!(matches!(
            out.as_slice(),
            [Fact::Risk {
                severity: Severity::High,
                ..
            }]
        ));
    }
}

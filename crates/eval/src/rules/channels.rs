//! Layer 3: channel suitability.
//!
//! Each rule proposes a priority (1 = highest) and a budget share for one
//! channel. Several rules may propose the same channel; the aggregator
//! keeps the best priority and the largest share independently.

use super::{
    capability, complexity, customer, customers, cycle, goal, horizon, kpi, pct, product,
    products, rule, structure, tier, Layer, Rule,
};
use crate::predicate::all;
use crate::types::{
    BudgetTier, Channel, Complexity, ContentCapability, Fact, PrimaryGoal, PriorityKpi,
    ProductType, Readiness, SalesCycle, SalesStructure, StrategyCode, TargetCustomer, TimeHorizon,
};

fn priority(channel: Channel, priority: u8, budget_percent: u32) -> Fact {
    Fact::ChannelPriority {
        channel,
        priority,
        budget_percent: pct(budget_percent),
    }
}

fn ready(channel: Channel) -> Fact {
    Fact::ChannelReadiness {
        channel,
        readiness: Readiness::Ready,
    }
}

const YOUTH: &[TargetCustomer] = &[TargetCustomer::GenZ, TargetCustomer::Millenial];
const ADVISORY: &[ProductType] = &[ProductType::B2bSaas, ProductType::Consulting];

pub(super) fn rules() -> Vec<Rule> {
    let l = Layer::Channels;
    vec![
        // Paid search
        rule(
            "paid_search_high_intent",
            l,
            "Paid search for high-intent products on a small lead-generation budget",
            all(vec![
                products(&[ProductType::B2bSaas, ProductType::LocalService]),
                tier(BudgetTier::Small),
                goal(PrimaryGoal::LeadGen),
            ]),
            vec![priority(Channel::PaidSearch, 1, 35), ready(Channel::PaidSearch)],
        ),
        rule(
            "paid_search_micro_budget",
            l,
            "Keep paid search minimal on micro budgets",
            tier(BudgetTier::Micro),
            vec![priority(Channel::PaidSearch, 4, 10)],
        ),
        rule(
            "paid_search_cpa_focus",
            l,
            "Paid search for CPA optimization on medium budgets",
            all(vec![tier(BudgetTier::Medium), kpi(PriorityKpi::Cpa)]),
            vec![priority(Channel::PaidSearch, 2, 30)],
        ),
        // Paid social
        rule(
            "paid_social_b2c_youth",
            l,
            "Paid social for retail aimed at younger buyers",
            all(vec![product(ProductType::B2cRetail), customers(YOUTH)]),
            vec![priority(Channel::PaidSocial, 1, 40), ready(Channel::PaidSocial)],
        ),
        rule(
            "paid_social_linkedin_sme",
            l,
            "LinkedIn campaigns for SaaS sold to SMEs on medium budgets",
            all(vec![
                product(ProductType::B2bSaas),
                customer(TargetCustomer::Sme),
                tier(BudgetTier::Medium),
            ]),
            vec![priority(Channel::PaidSocial, 2, 25)],
        ),
        rule(
            "paid_social_awareness_at_scale",
            l,
            "Paid social for awareness on large budgets",
            all(vec![goal(PrimaryGoal::Awareness), tier(BudgetTier::Large)]),
            vec![priority(Channel::PaidSocial, 1, 30)],
        ),
        // Organic SEO
        rule(
            "seo_long_term_traffic",
            l,
            "SEO when organic traffic is the KPI over a long horizon",
            all(vec![horizon(TimeHorizon::Long), kpi(PriorityKpi::Traffic)]),
            vec![priority(Channel::OrganicSeo, 1, 25)],
        ),
        rule(
            "seo_content_strength",
            l,
            "SEO when content capability is high",
            capability(ContentCapability::High),
            vec![priority(Channel::OrganicSeo, 2, 20), ready(Channel::OrganicSeo)],
        ),
        rule(
            "seo_budget_constrained",
            l,
            "SEO as the main lever for micro budgets with time to compound",
            all(vec![tier(BudgetTier::Micro), horizon(TimeHorizon::Long)]),
            vec![priority(Channel::OrganicSeo, 1, 40)],
        ),
        // Email
        rule(
            "email_retention",
            l,
            "Email for retention",
            goal(PrimaryGoal::Retention),
            vec![priority(Channel::EmailMarketing, 1, 20)],
        ),
        rule(
            "email_long_cycle_nurture",
            l,
            "Email nurture for lead generation with long sales cycles",
            all(vec![cycle(SalesCycle::Long), goal(PrimaryGoal::LeadGen)]),
            vec![priority(Channel::EmailMarketing, 2, 15)],
        ),
        rule(
            "email_subscription",
            l,
            "Email is critical for subscriptions",
            product(ProductType::Subscription),
            vec![priority(Channel::EmailMarketing, 1, 25)],
        ),
        // Content marketing
        rule(
            "content_thought_leadership",
            l,
            "Content marketing for thought leadership with strong content capability",
            all(vec![capability(ContentCapability::High), products(ADVISORY)]),
            vec![priority(Channel::ContentMarketing, 1, 30)],
        ),
        rule(
            "content_brand_building",
            l,
            "Content marketing for long-horizon awareness",
            all(vec![goal(PrimaryGoal::Awareness), horizon(TimeHorizon::Long)]),
            vec![priority(Channel::ContentMarketing, 2, 25)],
        ),
        // Influencer
        rule(
            "influencer_b2c_youth",
            l,
            "Influencers for retail aimed at younger buyers on medium budgets",
            all(vec![
                product(ProductType::B2cRetail),
                customers(YOUTH),
                tier(BudgetTier::Medium),
            ]),
            vec![priority(Channel::Influencer, 2, 20)],
        ),
        // Events and webinars
        rule(
            "events_b2b_large_budget",
            l,
            "Events for SaaS and consulting on large budgets",
            all(vec![products(ADVISORY), tier(BudgetTier::Large)]),
            vec![priority(Channel::EventsWebinars, 2, 20)],
        ),
        rule(
            "events_complex_sales",
            l,
            "Events for very complex, very long sales",
            all(vec![
                complexity(Complexity::VeryComplex),
                cycle(SalesCycle::VeryLong),
            ]),
            vec![priority(Channel::EventsWebinars, 1, 25)],
        ),
        // Community
        rule(
            "community_technical_niche",
            l,
            "Community building for technical tools in a niche industry",
            all(vec![
                product(ProductType::TechnicalTools),
                customer(TargetCustomer::NicheIndustry),
            ]),
            vec![priority(Channel::Community, 1, 15)],
        ),
        rule(
            "community_local_service",
            l,
            "Community presence for local services",
            product(ProductType::LocalService),
            vec![priority(Channel::Community, 2, 10)],
        ),
        // Local SEO
        rule(
            "local_seo_service",
            l,
            "Local SEO for local services serving the local community",
            all(vec![
                product(ProductType::LocalService),
                customer(TargetCustomer::LocalCommunity),
            ]),
            vec![priority(Channel::LocalSeo, 1, 30)],
        ),
        rule(
            "local_seo_hospitality",
            l,
            "Local SEO for hospitality",
            product(ProductType::Hospitality),
            vec![priority(Channel::LocalSeo, 1, 25)],
        ),
        // Retargeting
        rule(
            "retargeting_conversion",
            l,
            "Retargeting for conversion rate on medium budgets",
            all(vec![
                kpi(PriorityKpi::ConversionRate),
                tier(BudgetTier::Medium),
            ]),
            vec![priority(Channel::Retargeting, 2, 15)],
        ),
        rule(
            "retargeting_medium_cycle",
            l,
            "Retargeting for medium sales cycles",
            cycle(SalesCycle::Medium),
            vec![priority(Channel::Retargeting, 3, 10)],
        ),
        // Referral
        rule(
            "referral_clv_retention",
            l,
            "Referral programs when retaining for lifetime value",
            all(vec![kpi(PriorityKpi::Clv), goal(PrimaryGoal::Retention)]),
            vec![priority(Channel::Referral, 2, 10)],
        ),
        rule(
            "referral_subscription",
            l,
            "Referral programs for subscriptions",
            product(ProductType::Subscription),
            vec![priority(Channel::Referral, 2, 12)],
        ),
        // Account-based marketing
        rule(
            "inject_account_based_marketing",
            l,
            "Account-based marketing for enterprise deals worked by a sales team",
            all(vec![
                products(ADVISORY),
                customer(TargetCustomer::LargeEnterprise),
                structure(SalesStructure::SalesTeam),
            ]),
            vec![Fact::StrategyInjection {
                code: StrategyCode::Abm,
            }],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::tests::{fire, matches, store};

    #[test]
    fn paid_search_high_intent_asserts_priority_and_readiness() {
        let facts = store(vec![
            Fact::Product {
                product_type: ProductType::LocalService,
            },
            Fact::BudgetLevel {
                tier: BudgetTier::Small,
            },
            Fact::PrimaryGoal {
                goal: PrimaryGoal::LeadGen,
            },
        ]);
        assert_eq!(
            fire("paid_search_high_intent", &facts),
            vec![
                priority(Channel::PaidSearch, 1, 35),
                ready(Channel::PaidSearch)
            ]
        );
    }

    #[test]
    fn influencer_requires_medium_tier() {
        let mut facts = store(vec![
            Fact::Product {
                product_type: ProductType::B2cRetail,
            },
            Fact::TargetCustomer {
                customer: TargetCustomer::GenZ,
            },
            Fact::BudgetLevel {
                tier: BudgetTier::Micro,
            },
        ]);
        assert!(!matches("influencer_b2c_youth", &facts));
        facts.assert(Fact::BudgetLevel {
            tier: BudgetTier::Medium,
        });
        assert_eq!(
            fire("influencer_b2c_youth", &facts),
            vec![priority(Channel::Influencer, 2, 20)]
        );
    }

    #[test]
    fn abm_injection_requires_all_three() {
        let base = vec![
            Fact::Product {
                product_type: ProductType::Consulting,
            },
            Fact::TargetCustomer {
                customer: TargetCustomer::LargeEnterprise,
            },
        ];
        let without_team = store(base.clone());
        assert!(!matches("inject_account_based_marketing", &without_team));

        let mut with_team = base;
        with_team.push(Fact::SalesStructure {
            structure: SalesStructure::SalesTeam,
        });
        assert_eq!(
            fire("inject_account_based_marketing", &store(with_team)),
            vec![Fact::StrategyInjection {
                code: StrategyCode::Abm
            }]
        );
    }

    #[test]
    fn events_for_complex_sales_read_derived_facts() {
        let facts = store(vec![
            Fact::AcquisitionComplexity {
                complexity: Complexity::VeryComplex,
            },
            Fact::SalesCycle {
                cycle: SalesCycle::VeryLong,
            },
        ]);
        assert_eq!(
            fire("events_complex_sales", &facts),
            vec![priority(Channel::EventsWebinars, 1, 25)]
        );
    }
}

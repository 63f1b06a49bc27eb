//! Layers 4-5: content mix and quick wins.

use super::{
    capability, complexity, customer, customers, cycle, goal, kpi, product, products, rule,
    structure, tier, Layer, Rule,
};
use crate::predicate::all;
use crate::types::{
    BudgetTier, Complexity, ContentCapability, ContentKind, Effort, Fact, PrimaryGoal, PriorityKpi,
    ProductType, SalesCycle, SalesStructure, Severity, TargetCustomer,
};

fn content(content_type: ContentKind, priority: u8, frequency: &'static str) -> Vec<Fact> {
    vec![Fact::ContentPriority {
        content_type,
        priority,
        frequency,
    }]
}

fn quick_win(action: &'static str, priority: Severity, effort: Effort) -> Vec<Fact> {
    vec![Fact::QuickWin {
        action,
        priority,
        effort,
    }]
}

pub(super) fn rules() -> Vec<Rule> {
    let mut rules = content_mix();
    rules.extend(quick_wins());
    rules
}

fn content_mix() -> Vec<Rule> {
    let l = Layer::Content;
    vec![
        rule(
            "content_type_blog",
            l,
            "Blog articles for thought leadership",
            all(vec![
                capability(ContentCapability::High),
                products(&[ProductType::B2bSaas, ProductType::Consulting]),
            ]),
            content(ContentKind::BlogArticles, 1, "3-4 per week"),
        ),
        rule(
            "content_type_video_youth",
            l,
            "Video for younger audiences",
            all(vec![
                customers(&[TargetCustomer::GenZ, TargetCustomer::Millenial]),
                capability(ContentCapability::Medium),
            ]),
            content(ContentKind::VideoContent, 1, "2-3 per week"),
        ),
        rule(
            "content_type_case_studies",
            l,
            "Case studies for enterprise SaaS buyers",
            all(vec![
                product(ProductType::B2bSaas),
                customer(TargetCustomer::LargeEnterprise),
            ]),
            content(ContentKind::CaseStudies, 1, "2 per month"),
        ),
        rule(
            "content_type_whitepapers",
            l,
            "Whitepapers for very complex sales",
            all(vec![
                complexity(Complexity::VeryComplex),
                capability(ContentCapability::High),
            ]),
            content(ContentKind::Whitepapers, 2, "1 per month"),
        ),
        rule(
            "content_type_webinars",
            l,
            "Webinars to nurture long sales cycles",
            all(vec![cycle(SalesCycle::Long), tier(BudgetTier::Medium)]),
            content(ContentKind::Webinars, 2, "2 per month"),
        ),
        rule(
            "content_type_social_posts",
            l,
            "Daily social posts for retail",
            product(ProductType::B2cRetail),
            content(ContentKind::SocialPosts, 1, "daily"),
        ),
        rule(
            "content_type_newsletter",
            l,
            "Newsletters to retain subscribers",
            all(vec![
                goal(PrimaryGoal::Retention),
                product(ProductType::Subscription),
            ]),
            content(ContentKind::EmailNewsletters, 1, "weekly"),
        ),
        rule(
            "content_type_user_generated",
            l,
            "User-generated content for retail on micro budgets",
            all(vec![product(ProductType::B2cRetail), tier(BudgetTier::Micro)]),
            content(ContentKind::UserGenerated, 1, "ongoing"),
        ),
    ]
}

fn quick_wins() -> Vec<Rule> {
    let l = Layer::QuickWins;
    vec![
        rule(
            "quick_win_business_listing",
            l,
            "Claim the Google business listing",
            all(vec![
                product(ProductType::LocalService),
                tier(BudgetTier::Micro),
            ]),
            quick_win(
                "Optimize Google My Business listing",
                Severity::Critical,
                Effort::Low,
            ),
        ),
        rule(
            "quick_win_content_calendar",
            l,
            "Plan content ahead when capability and budget are thin",
            all(vec![
                capability(ContentCapability::Low),
                tier(BudgetTier::Micro),
            ]),
            quick_win("Set up 30-day content calendar", Severity::High, Effort::Low),
        ),
        rule(
            "quick_win_welcome_sequence",
            l,
            "Automated sellers start with a welcome sequence",
            structure(SalesStructure::Automated),
            quick_win(
                "Implement welcome email sequence",
                Severity::High,
                Effort::Medium,
            ),
        ),
        rule(
            "quick_win_funnel_audit",
            l,
            "Audit the funnel when conversion rate is the KPI",
            all(vec![
                kpi(PriorityKpi::ConversionRate),
                structure(SalesStructure::Automated),
            ]),
            quick_win(
                "Conduct conversion funnel audit",
                Severity::Critical,
                Effort::Medium,
            ),
        ),
        rule(
            "quick_win_linkedin_page",
            l,
            "SaaS companies start posting on LinkedIn",
            product(ProductType::B2bSaas),
            quick_win(
                "Optimize LinkedIn company page and start posting",
                Severity::High,
                Effort::Low,
            ),
        ),
        rule(
            "quick_win_competitor_analysis",
            l,
            "Study competitors before spending a micro budget",
            tier(BudgetTier::Micro),
            quick_win(
                "Complete competitor marketing analysis",
                Severity::High,
                Effort::Low,
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::tests::{fire, matches, store};

    #[test]
    fn video_for_youth_needs_medium_capability() {
        let mut facts = store(vec![
            Fact::TargetCustomer {
                customer: TargetCustomer::Millenial,
            },
            Fact::ContentCapability {
                capability: ContentCapability::High,
            },
        ]);
        assert!(!matches("content_type_video_youth", &facts));
        facts.assert(Fact::ContentCapability {
            capability: ContentCapability::Medium,
        });
        assert_eq!(
            fire("content_type_video_youth", &facts),
            content(ContentKind::VideoContent, 1, "2-3 per week")
        );
    }

    #[test]
    fn funnel_audit_is_critical() {
        let facts = store(vec![
            Fact::PriorityKpi {
                kpi: PriorityKpi::ConversionRate,
            },
            Fact::SalesStructure {
                structure: SalesStructure::Automated,
            },
        ]);
        assert_eq!(
            fire("quick_win_funnel_audit", &facts),
            vec![Fact::QuickWin {
                action: "Conduct conversion funnel audit",
                priority: Severity::Critical,
                effort: Effort::Medium,
            }]
        );
    }

    #[test]
    fn micro_budget_quick_win() {
        let facts = store(vec![Fact::BudgetLevel {
            tier: BudgetTier::Micro,
        }]);
        assert_eq!(fire("quick_win_competitor_analysis", &facts).len(), 1);
        assert!(!matches("quick_win_business_listing", &facts));
    }
}

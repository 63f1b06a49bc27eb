//! Layer 10: tools, capabilities and partners.

use super::{capability, competition, customer, customers, product, products, rule, structure, tier, Layer, Rule};
use crate::predicate::all;
use crate::types::{
    BudgetTier, CompetitionIntensity, ContentCapability, Fact, ProductType, SalesStructure,
    Severity, TargetCustomer,
};

fn tools(tools: &[(&'static str, &'static str)]) -> Vec<Fact> {
    tools
        .iter()
        .map(|&(tool, category)| Fact::ToolRecommendation { tool, category })
        .collect()
}

fn needs(capability: &'static str, importance: Severity) -> Vec<Fact> {
    vec![Fact::CapabilityRequirement {
        capability,
        importance,
    }]
}

fn partner(partner_type: &'static str) -> Vec<Fact> {
    vec![Fact::PartnerRecommendation { partner_type }]
}

pub(super) fn rules() -> Vec<Rule> {
    let l = Layer::Resources;
    vec![
        // Tools
        rule(
            "tools_micro_budget",
            l,
            "Free tiers for micro budgets",
            tier(BudgetTier::Micro),
            tools(&[
                ("Google Analytics (free)", "analytics"),
                ("Mailchimp Free Tier", "email"),
                ("Canva Free", "design"),
                ("Buffer Free", "social_media"),
            ]),
        ),
        rule(
            "tools_small_budget",
            l,
            "Entry-level paid tools for small budgets",
            tier(BudgetTier::Small),
            tools(&[
                ("Google Ads", "paid_search"),
                ("Mailchimp or ConvertKit", "email"),
                ("SEMrush or Ahrefs (basic)", "seo"),
                ("Hootsuite or Buffer", "social_media"),
            ]),
        ),
        rule(
            "tools_medium_budget",
            l,
            "Automation suites for medium budgets",
            tier(BudgetTier::Medium),
            tools(&[
                ("HubSpot or Marketo", "marketing_automation"),
                ("SEMrush Enterprise", "seo"),
                ("Google Analytics + Data Studio", "analytics"),
                ("Sprout Social", "social_media"),
            ]),
        ),
        rule(
            "tools_b2b_saas",
            l,
            "Prospecting and enrichment for SaaS",
            product(ProductType::B2bSaas),
            tools(&[
                ("LinkedIn Sales Navigator", "prospecting"),
                ("Clearbit", "data_enrichment"),
                ("Intercom or Drift", "conversational_marketing"),
            ]),
        ),
        rule(
            "tools_b2c_retail",
            l,
            "Commerce advertising tools for retail",
            product(ProductType::B2cRetail),
            tools(&[
                ("Facebook Ads Manager", "paid_social"),
                ("Klaviyo", "email_ecommerce"),
                ("Google Merchant Center", "product_ads"),
            ]),
        ),
        rule(
            "tools_content_creation",
            l,
            "Research and production tools for strong content teams",
            capability(ContentCapability::High),
            tools(&[
                ("BuzzSumo", "content_research"),
                ("Grammarly Premium", "content_quality"),
                ("Loom or Descript", "video_content"),
            ]),
        ),
        // Capabilities
        rule(
            "capability_content_writing",
            l,
            "Advisory products need writers when content capability is low",
            all(vec![
                capability(ContentCapability::Low),
                products(&[ProductType::B2bSaas, ProductType::Consulting]),
            ]),
            needs("Content Writing & Thought Leadership", Severity::Critical),
        ),
        rule(
            "capability_marketing_automation",
            l,
            "Automated sales need workflow skills",
            structure(SalesStructure::Automated),
            needs("Marketing Automation & Email Workflows", Severity::High),
        ),
        rule(
            "capability_data_analysis",
            l,
            "Medium budgets need performance analysis",
            tier(BudgetTier::Medium),
            needs("Data Analysis & Performance Optimization", Severity::High),
        ),
        rule(
            "capability_social_media",
            l,
            "Younger audiences need social and community skills",
            customers(&[TargetCustomer::GenZ, TargetCustomer::Millenial]),
            needs(
                "Social Media Management & Community Engagement",
                Severity::High,
            ),
        ),
        rule(
            "capability_technical_seo",
            l,
            "SaaS needs technical SEO",
            product(ProductType::B2bSaas),
            needs("Technical SEO & Content Optimization", Severity::Medium),
        ),
        // Partners
        rule(
            "partner_content_agency",
            l,
            "Outsource content on a medium budget with low capability",
            all(vec![
                tier(BudgetTier::Medium),
                capability(ContentCapability::Low),
            ]),
            partner("Content Marketing Agency or Freelance Writers"),
        ),
        rule(
            "partner_paid_media_agency",
            l,
            "Specialist paid media help in a crowded market",
            all(vec![
                tier(BudgetTier::Large),
                competition(CompetitionIntensity::VeryHigh),
            ]),
            partner("Specialized Paid Media Agency (Google Ads, Facebook Ads)"),
        ),
        rule(
            "partner_influencer_platform",
            l,
            "Influencer platforms for retail",
            product(ProductType::B2cRetail),
            partner("Influencer Marketing Platform or Agency"),
        ),
        rule(
            "partner_pr_firm",
            l,
            "Media relations for enterprise SaaS",
            all(vec![
                product(ProductType::B2bSaas),
                customer(TargetCustomer::LargeEnterprise),
            ]),
            partner("B2B PR Firm for Media Relations"),
        ),
        rule(
            "partner_local_seo",
            l,
            "Local SEO specialists for local services",
            product(ProductType::LocalService),
            partner("Local SEO Specialist or Agency"),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::tests::{fire, matches, store};

    #[test]
    fn micro_tools_are_free() {
        let facts = store(vec![Fact::BudgetLevel {
            tier: BudgetTier::Micro,
        }]);
        let out = fire("tools_micro_budget", &facts);
        assert_eq!(out.len(), 4);
        assert!(out.contains(&Fact::ToolRecommendation {
            tool: "Canva Free",
            category: "design",
        }));
    }

    #[test]
    fn paid_media_partner_needs_crowded_market() {
        let mut facts = store(vec![Fact::BudgetLevel {
            tier: BudgetTier::Large,
        }]);
        assert!(!matches("partner_paid_media_agency", &facts));
        facts.assert(Fact::CompetitionLevel {
            level: CompetitionIntensity::VeryHigh,
        });
        assert_eq!(
            fire("partner_paid_media_agency", &facts),
            partner("Specialized Paid Media Agency (Google Ads, Facebook Ads)")
        );
    }

    #[test]
    fn content_writing_is_critical_for_advisory_products() {
        let facts = store(vec![
            Fact::ContentCapability {
                capability: ContentCapability::Low,
            },
            Fact::Product {
                product_type: ProductType::Consulting,
            },
        ]);
        assert_eq!(
            fire("capability_content_writing", &facts),
            needs("Content Writing & Thought Leadership", Severity::Critical)
        );
    }
}

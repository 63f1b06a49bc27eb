//! Critical insights.
//!
//! Goal, budget and product insights are always present. Horizon and
//! content insights are appended in that order while fewer than five have
//! been collected.

use crate::types::{BudgetTier, ContentCapability, PrimaryGoal, ProductType, Request, TimeHorizon};

pub const MAX_INSIGHTS: usize = 5;

fn goal_insight(goal: PrimaryGoal) -> &'static str {
    match goal {
        PrimaryGoal::Awareness => {
            "Build recognition before conversion - invest in reach and consistent brand presence across the channels your audience already uses"
        }
        PrimaryGoal::LeadGen => {
            "Optimize for conversion - implement targeted campaigns with clear CTAs and lead capture mechanisms"
        }
        PrimaryGoal::Retention => {
            "Retention beats acquisition on cost - nurture existing customers with personalized email, loyalty incentives and referral programs"
        }
    }
}

fn budget_insight(tier: BudgetTier) -> &'static str {
    match tier {
        BudgetTier::Micro => {
            "Concentrate a micro budget on one or two high-ROI channels - organic and low-cost tactics first, paid only where intent is proven"
        }
        BudgetTier::Small => {
            "Balance paid and organic - use paid channels for early data while organic assets compound"
        }
        BudgetTier::Medium => {
            "Leverage multi-channel approach - diversify across paid and organic to maximize reach while maintaining efficiency"
        }
        BudgetTier::Large => {
            "Run comprehensive demand generation - fund full-funnel programs and dedicate budget to testing new channels"
        }
        BudgetTier::Enterprise => {
            "Operate at enterprise scale - integrate brand, demand and partnerships under one measurement framework"
        }
    }
}

fn product_insight(product: ProductType) -> &'static str {
    match product {
        ProductType::B2bSaas => {
            "B2B buyers need education and trust - create case studies, whitepapers, and demonstrate ROI through content"
        }
        ProductType::B2cRetail => {
            "Retail competes on attention - pair visual social content with social proof and seasonal promotions"
        }
        ProductType::LocalService => {
            "Local buyers search nearby - own your map listing, reviews and neighborhood word-of-mouth"
        }
        ProductType::Consulting => {
            "Consulting sells on credibility - publish a clear point of view and let past client results speak for you"
        }
        ProductType::DigitalProduct => {
            "Digital products convert on trust in the creator - offer free samples and lead magnets before the sale"
        }
        ProductType::Fmcg => {
            "Consumer goods win on reach and repeat purchase - keep the brand visible at the moment of choice"
        }
        ProductType::TechnicalTools => {
            "Practitioners trust peers over ads - invest in documentation, community and developer advocacy"
        }
        ProductType::Hospitality => {
            "Hospitality is chosen on reviews and imagery - manage ratings actively and showcase the experience"
        }
        ProductType::Subscription => {
            "Subscription revenue depends on churn - onboarding and lifecycle email matter as much as acquisition"
        }
    }
}

fn horizon_insight(horizon: TimeHorizon) -> Option<&'static str> {
    match horizon {
        TimeHorizon::Short => Some(
            "Short timeline requires immediate action - prioritize paid channels and quick-win optimizations over long-term SEO",
        ),
        TimeHorizon::Long => Some(
            "A long horizon rewards compounding assets - invest early in SEO and content that keep producing traffic",
        ),
        TimeHorizon::Medium => None,
    }
}

fn content_insight(capability: ContentCapability) -> Option<&'static str> {
    match capability {
        ContentCapability::High => Some(
            "Maximize your content strength - produce authoritative resources that attract organic traffic and establish industry credibility",
        ),
        ContentCapability::Low => Some(
            "Limited content capacity - repurpose each piece across channels and lean on freelancers or curated content",
        ),
        ContentCapability::Medium => None,
    }
}

/// Three to five insights for a request and its budget tier.
pub fn insights(request: &Request, tier: BudgetTier) -> Vec<String> {
    let mut out = vec![
        goal_insight(request.primary_goal),
        budget_insight(tier),
        product_insight(request.product_type),
    ];
    let optional = [
        horizon_insight(request.time_horizon),
        content_insight(request.content_capability),
    ];
    for text in optional.into_iter().flatten() {
        if out.len() >= MAX_INSIGHTS {
            break;
        }
        out.push(text);
    }
    out.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::{PriorityKpi, SalesStructure, TargetCustomer};

    fn request(horizon: TimeHorizon, capability: ContentCapability) -> Request {
        Request {
            product_type: ProductType::B2bSaas,
            target_customer: TargetCustomer::Sme,
            primary_goal: PrimaryGoal::LeadGen,
            time_horizon: horizon,
            content_capability: capability,
            sales_structure: SalesStructure::SalesTeam,
            priority_kpi: PriorityKpi::Sql,
            raw_budget_amount: Decimal::from(20_000),
        }
    }

    #[test]
    fn goal_and_budget_come_first() {
        let out = insights(
            &request(TimeHorizon::Medium, ContentCapability::Medium),
            BudgetTier::Medium,
        );
        assert_eq!(out.len(), 3);
        assert!(out[0].starts_with("Optimize for conversion"));
        assert!(out[1].starts_with("Leverage multi-channel approach"));
        assert!(out[2].starts_with("B2B buyers need education"));
    }

    #[test]
    fn every_product_contributes_an_insight() {
        for &product in ProductType::ALL {
            let mut req = request(TimeHorizon::Medium, ContentCapability::Medium);
            req.product_type = product;
            let out = insights(&req, BudgetTier::Small);
            assert_eq!(out.len(), 3, "{}", product);
            assert_eq!(out[2], product_insight(product));
        }
    }

    #[test]
    fn capped_at_five() {
        let out = insights(
            &request(TimeHorizon::Short, ContentCapability::High),
            BudgetTier::Small,
        );
        assert_eq!(out.len(), MAX_INSIGHTS);
        assert!(out[4].starts_with("Maximize your content strength"));
    }
}

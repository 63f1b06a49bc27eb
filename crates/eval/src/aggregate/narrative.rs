//! Narrative strings for the recommendation.

use crate::types::{
    BudgetTier, Channel, CompetitionIntensity, ContentCapability, Fact, FactKind, FactStore,
    PrimaryGoal, PriorityKpi, ProductType, Request, SalesStructure, TargetCustomer, TimeHorizon,
};

/// Most advantages a recommendation lists.
pub const MAX_ADVANTAGES: usize = 5;

fn product_phrase(product: ProductType) -> &'static str {
    match product {
        ProductType::B2bSaas => "enterprise SaaS solution",
        ProductType::B2cRetail => "consumer retail offering",
        ProductType::LocalService => "local service business",
        ProductType::Consulting => "high-end consulting practice",
        ProductType::DigitalProduct => "digital product",
        ProductType::Fmcg => "consumer packaged goods",
        ProductType::TechnicalTools => "technical tools",
        ProductType::Hospitality => "hospitality business",
        ProductType::Subscription => "subscription service",
    }
}

fn goal_phrase(goal: PrimaryGoal) -> &'static str {
    match goal {
        PrimaryGoal::Awareness => "brand awareness and market presence",
        PrimaryGoal::LeadGen => "lead generation and customer acquisition",
        PrimaryGoal::Retention => "customer retention and lifetime value maximization",
    }
}

fn budget_context(tier: BudgetTier) -> &'static str {
    match tier {
        BudgetTier::Micro => "with a focus on high-impact, low-cost tactics",
        BudgetTier::Small => "balancing paid and organic channels",
        BudgetTier::Medium => "leveraging a multi-channel approach",
        BudgetTier::Large => "with comprehensive demand generation",
        BudgetTier::Enterprise => "through full-scale enterprise marketing",
    }
}

pub fn strategy_summary(request: &Request, tier: Option<BudgetTier>) -> String {
    format!(
        "Comprehensive marketing strategy for your {} focused on {} {} over a {} time horizon.",
        product_phrase(request.product_type),
        goal_phrase(request.primary_goal),
        budget_context(tier.unwrap_or(BudgetTier::Medium)),
        request.time_horizon.as_str().replace('_', "-"),
    )
}

pub fn strategic_positioning(request: &Request) -> &'static str {
    match (request.product_type, request.target_customer) {
        (ProductType::B2bSaas | ProductType::Consulting, _) => {
            "Position as a thought leader and trusted advisor in your industry. Emphasize expertise, reliability, and proven results through case studies and data-driven content."
        }
        (ProductType::B2cRetail, TargetCustomer::Luxury) => {
            "Position as a premium, aspirational brand. Focus on exclusivity, quality, and brand storytelling to justify premium pricing."
        }
        (ProductType::B2cRetail, TargetCustomer::BudgetShopper) => {
            "Position as the value leader in your category. Emphasize affordability, practicality, and smart shopping without compromising quality."
        }
        (ProductType::B2cRetail, _) => {
            "Position based on unique product benefits and lifestyle alignment. Create emotional connections through authentic storytelling and social proof."
        }
        (ProductType::LocalService, _) => {
            "Position as the trusted local expert. Leverage community engagement, reviews, and local partnerships to build credibility and word-of-mouth referrals."
        }
        (ProductType::TechnicalTools, _) => {
            "Position as the technical solution of choice for practitioners. Focus on product superiority, integration capabilities, and developer advocacy."
        }
        _ => {
            "Differentiate through unique value proposition and customer success stories. Build trust through transparency, proof points, and consistent delivery."
        }
    }
}

pub fn messaging_focus(request: &Request, facts: &FactStore) -> &'static str {
    if facts.of_kind(FactKind::MessagingAngle).next().is_some() {
        return "Focus messaging on unique differentiators that set you apart from competitors. Emphasize what only you can offer.";
    }
    match (request.priority_kpi, request.product_type) {
        (PriorityKpi::Cpa, _) => {
            "ROI-focused messaging that emphasizes tangible business outcomes and fast time-to-value."
        }
        (PriorityKpi::Clv, _) => {
            "Value-driven messaging focused on long-term benefits, customer success, and partnership approach."
        }
        (_, ProductType::Consulting) => {
            "Expertise-led messaging that positions you as the authority. Share insights, perspectives, and thought leadership."
        }
        _ => {
            "Customer-centric messaging that addresses pain points, aspirations, and desired outcomes. Focus on benefits over features."
        }
    }
}

pub fn differentiation(facts: &FactStore) -> &'static str {
    let level = facts
        .of_kind(FactKind::CompetitionLevel)
        .find_map(|f| match f {
            Fact::CompetitionLevel { level } => Some(*level),
            _ => None,
        })
        .unwrap_or(CompetitionIntensity::Moderate);
    match level {
        CompetitionIntensity::VeryHigh => {
            "In a highly competitive market, differentiate through niche specialization, exceptional customer experience, or innovative positioning. Avoid competing purely on price or generic features."
        }
        CompetitionIntensity::High => {
            "Stand out through superior content marketing, stronger social proof, and more personalized customer engagement. Build brand preference through consistency and quality."
        }
        CompetitionIntensity::Moderate | CompetitionIntensity::Low => {
            "Leverage your position in a less saturated market to establish category leadership. Focus on building trust and becoming the go-to solution before competitors intensify."
        }
    }
}

/// Why the channel mix looks the way it does, anchored on the top channel.
pub fn channel_mix_rationale(request: &Request, top: Option<Channel>) -> String {
    let Some(channel) = top else {
        return "Diversified channel approach based on your business profile.".to_string();
    };
    let primary = channel.label();
    match request.primary_goal {
        PrimaryGoal::LeadGen => format!(
            "Channel mix optimized for lead generation with {} as the primary driver. Secondary channels provide diversification and support the customer journey from awareness to conversion.",
            primary
        ),
        PrimaryGoal::Awareness => format!(
            "Broad-reach channel strategy with emphasis on {} to maximize brand visibility. Multi-channel presence ensures consistent touchpoints across the customer journey.",
            primary
        ),
        PrimaryGoal::Retention => format!(
            "Retention-focused channel mix with {} as the anchor for ongoing customer engagement. Supporting channels nurture relationships and drive repeat business.",
            primary
        ),
    }
}

pub fn content_themes(product: ProductType) -> [&'static str; 5] {
    match product {
        ProductType::B2bSaas => [
            "Industry trends and insights",
            "Product tutorials and best practices",
            "Customer success stories and ROI metrics",
            "Thought leadership on business challenges",
            "Competitive comparisons and buying guides",
        ],
        ProductType::B2cRetail => [
            "Lifestyle content and inspiration",
            "Product styling and usage ideas",
            "Customer testimonials and reviews",
            "Behind-the-scenes and brand story",
            "Seasonal trends and gift guides",
        ],
        ProductType::LocalService => [
            "Local community involvement",
            "Customer testimonials and before/after",
            "Service education and tips",
            "Team spotlights and company culture",
            "Local events and partnerships",
        ],
        ProductType::Consulting => [
            "Industry analysis and market insights",
            "Methodologies and frameworks",
            "Case studies and transformation stories",
            "Speaking engagements and conference content",
            "Research reports and original data",
        ],
        ProductType::DigitalProduct => [
            "Educational content and tutorials",
            "Success strategies and frameworks",
            "User-generated success stories",
            "Industry news and commentary",
            "Product updates and roadmap",
        ],
        _ => [
            "Industry insights and trends",
            "Product benefits and use cases",
            "Customer success stories",
            "Educational content",
            "Company news and updates",
        ],
    }
}

/// Strengths of the business worth leaning on, three to five of them.
/// Generic strengths pad the list when the request suggests fewer than three.
pub fn competitive_advantages(request: &Request) -> Vec<String> {
    let mut out = Vec::new();
    if request.content_capability == ContentCapability::High {
        out.push("Strong content creation capability enables thought leadership positioning");
    }
    match request.sales_structure {
        SalesStructure::SalesTeam => {
            out.push("Dedicated sales team allows for high-touch customer engagement")
        }
        SalesStructure::Automated => {
            out.push("Automated sales process enables scalability and efficiency")
        }
        SalesStructure::OwnerDriven => {}
    }
    if matches!(
        request.product_type,
        ProductType::B2bSaas | ProductType::TechnicalTools
    ) {
        out.push("Technical product depth creates barriers to switching");
    }
    if request.product_type == ProductType::LocalService {
        out.push("Local market presence and community relationships");
    }
    if request.time_horizon == TimeHorizon::Long {
        out.push("Long-term perspective allows for sustainable brand building");
    }
    if out.len() < 3 {
        out.extend([
            "Focused strategy aligned with business goals",
            "Data-driven approach to marketing investment",
            "Agile execution with continuous optimization",
        ]);
    }
    out.into_iter()
        .take(MAX_ADVANTAGES)
        .map(str::to_string)
        .collect()
}

pub fn scaling_strategy(actions: &[&str]) -> String {
    if actions.is_empty() {
        return "Scale incrementally as channels prove ROI. Increase budgets 20-30% monthly while maintaining or improving efficiency metrics. Test new channels only after optimizing existing ones.".to_string();
    }
    let first: Vec<&str> = actions.iter().take(2).copied().collect();
    format!(
        "Scale marketing investment systematically based on performance triggers. {}",
        first.join(" ")
    )
}

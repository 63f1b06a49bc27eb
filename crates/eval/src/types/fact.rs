//! Facts and the fact store.
//!
//! Every piece of knowledge in a run is a `Fact`: one closed enum variant
//! per kind, each with a fixed field schema. Facts derive `Ord` so the store
//! is a `BTreeSet` and every projection over it is independent of the
//! order in which rules fired.

use std::collections::BTreeSet;
use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use super::recommendation::StrategyCode;
use super::request::{
    ContentCapability, PrimaryGoal, PriorityKpi, ProductType, SalesStructure, TargetCustomer,
    TimeHorizon,
};
use super::values::Value;

// ──────────────────────────────────────────────
// Derived symbol domains
// ──────────────────────────────────────────────

symbol_enum! {
    /// Coarse classification of the raw budget.
    pub enum BudgetTier {
        Micro => "micro",
        Small => "small",
        Medium => "medium",
        Large => "large",
        Enterprise => "enterprise",
    }
}

impl BudgetTier {
    /// Classify a raw amount. Thresholds are inclusive upper bounds.
    pub fn classify(amount: Decimal) -> BudgetTier {
        if amount <= Decimal::from(1_000) {
            BudgetTier::Micro
        } else if amount <= Decimal::from(10_000) {
            BudgetTier::Small
        } else if amount <= Decimal::from(100_000) {
            BudgetTier::Medium
        } else if amount <= Decimal::from(1_000_000) {
            BudgetTier::Large
        } else {
            BudgetTier::Enterprise
        }
    }
}

symbol_enum! {
    pub enum MaturityLevel {
        Growth => "growth",
        Mature => "mature",
        Saturated => "saturated",
    }
}

symbol_enum! {
    pub enum CompetitionIntensity {
        Low => "low",
        Moderate => "moderate",
        High => "high",
        VeryHigh => "very_high",
    }
}

symbol_enum! {
    /// How hard it is to win a customer of a given segment.
    pub enum Complexity {
        Simple => "simple",
        Moderate => "moderate",
        Complex => "complex",
        VeryComplex => "very_complex",
    }
}

symbol_enum! {
    pub enum SalesCycle {
        Immediate => "immediate",
        Short => "short",
        Medium => "medium",
        Long => "long",
        VeryLong => "very_long",
    }
}

symbol_enum! {
    pub enum Approach {
        AggressiveGrowth => "aggressive_growth",
        SteadyGrowth => "steady_growth",
        Defensive => "defensive",
        NicheDomination => "niche_domination",
    }
}

symbol_enum! {
    pub enum Focus {
        BrandBuilding => "brand_building",
        Acquisition => "acquisition",
        Retention => "retention",
    }
}

symbol_enum! {
    pub enum Angle {
        Differentiation => "differentiation",
    }
}

symbol_enum! {
    /// Marketing channels. Declaration order is the final ranking tie-break.
    pub enum Channel {
        PaidSearch => "paid_search",
        PaidSocial => "paid_social",
        OrganicSeo => "organic_seo",
        EmailMarketing => "email_marketing",
        ContentMarketing => "content_marketing",
        Influencer => "influencer",
        EventsWebinars => "events_webinars",
        Community => "community",
        LocalSeo => "local_seo",
        Retargeting => "retargeting",
        Referral => "referral",
    }
}

impl Channel {
    /// The strategy code a channel rolls up into.
    pub fn strategy_code(self) -> StrategyCode {
        match self {
            Channel::PaidSearch | Channel::Retargeting => StrategyCode::Ppc,
            Channel::PaidSocial | Channel::Community => StrategyCode::Social,
            Channel::OrganicSeo => StrategyCode::Seo,
            Channel::EmailMarketing | Channel::Referral => StrategyCode::Email,
            Channel::ContentMarketing => StrategyCode::Content,
            Channel::Influencer => StrategyCode::Influencer,
            Channel::EventsWebinars => StrategyCode::Events,
            Channel::LocalSeo => StrategyCode::LocalSeo,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Channel::PaidSearch => "Paid Search",
            Channel::PaidSocial => "Paid Social",
            Channel::OrganicSeo => "Organic SEO",
            Channel::EmailMarketing => "Email Marketing",
            Channel::ContentMarketing => "Content Marketing",
            Channel::Influencer => "Influencer",
            Channel::EventsWebinars => "Events & Webinars",
            Channel::Community => "Community",
            Channel::LocalSeo => "Local SEO",
            Channel::Retargeting => "Retargeting",
            Channel::Referral => "Referral",
        }
    }
}

symbol_enum! {
    pub enum Readiness {
        Ready => "ready",
    }
}

symbol_enum! {
    pub enum ContentKind {
        BlogArticles => "blog_articles",
        VideoContent => "video_content",
        CaseStudies => "case_studies",
        Whitepapers => "whitepapers",
        Webinars => "webinars",
        SocialPosts => "social_posts",
        EmailNewsletters => "email_newsletters",
        UserGenerated => "user_generated",
    }
}

impl ContentKind {
    pub fn label(self) -> &'static str {
        match self {
            ContentKind::BlogArticles => "Blog Articles",
            ContentKind::VideoContent => "Video Content",
            ContentKind::CaseStudies => "Case Studies",
            ContentKind::Whitepapers => "Whitepapers & E-books",
            ContentKind::Webinars => "Webinars & Workshops",
            ContentKind::SocialPosts => "Social Media Posts",
            ContentKind::EmailNewsletters => "Email Newsletters",
            ContentKind::UserGenerated => "User-Generated Content",
        }
    }
}

symbol_enum! {
    /// Ordered most to least urgent, so ascending sort puts `Critical` first.
    pub enum Severity {
        Critical => "Critical",
        High => "High",
        Medium => "Medium",
        Low => "Low",
    }
}

symbol_enum! {
    pub enum Effort {
        Low => "Low",
        Medium => "Medium",
        High => "High",
    }
}

symbol_enum! {
    pub enum KpiTier {
        Primary => "primary",
        Secondary => "secondary",
    }
}

// ──────────────────────────────────────────────
// Fact
// ──────────────────────────────────────────────

/// A typed, immutable record in the engine's working memory.
///
/// Identity is the variant plus all field values: asserting an equal fact
/// twice leaves the store unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind")]
pub enum Fact {
    // Input facts, one per request field.
    Product {
        product_type: ProductType,
    },
    TargetCustomer {
        customer: TargetCustomer,
    },
    RawBudget {
        amount: Decimal,
    },
    PrimaryGoal {
        goal: PrimaryGoal,
    },
    TimeHorizon {
        horizon: TimeHorizon,
    },
    ContentCapability {
        capability: ContentCapability,
    },
    SalesStructure {
        structure: SalesStructure,
    },
    PriorityKpi {
        kpi: PriorityKpi,
    },

    // Derived facts.
    BudgetLevel {
        tier: BudgetTier,
    },
    MarketMaturity {
        level: MaturityLevel,
    },
    CompetitionLevel {
        level: CompetitionIntensity,
    },
    AcquisitionComplexity {
        complexity: Complexity,
    },
    SalesCycle {
        cycle: SalesCycle,
    },
    StrategicApproach {
        approach: Approach,
    },
    MarketingFocus {
        focus: Focus,
    },
    MessagingAngle {
        angle: Angle,
    },
    ChannelPriority {
        channel: Channel,
        priority: u8,
        budget_percent: Decimal,
    },
    ChannelReadiness {
        channel: Channel,
        readiness: Readiness,
    },
    ContentPriority {
        content_type: ContentKind,
        priority: u8,
        frequency: &'static str,
    },
    QuickWin {
        action: &'static str,
        priority: Severity,
        effort: Effort,
    },
    KpiRecommendation {
        kpi: &'static str,
        target: &'static str,
        tier: KpiTier,
    },
    Risk {
        risk: &'static str,
        severity: Severity,
        mitigation: &'static str,
    },
    BudgetCategory {
        category: &'static str,
        percentage: Decimal,
    },
    CostTip {
        tip: &'static str,
    },
    ScalingTrigger {
        trigger: &'static str,
    },
    ScalingAction {
        action: &'static str,
    },
    ToolRecommendation {
        tool: &'static str,
        category: &'static str,
    },
    CapabilityRequirement {
        capability: &'static str,
        importance: Severity,
    },
    PartnerRecommendation {
        partner_type: &'static str,
    },
    StrategyInjection {
        code: StrategyCode,
    },
}

/// Field types a fact schema can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldType {
    Symbol,
    Int,
    Decimal,
    Text,
}

impl FieldType {
    pub fn is_numeric(self) -> bool {
        matches!(self, FieldType::Int | FieldType::Decimal)
    }

    /// Whether a literal of this value type can be compared to the field.
    pub fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (FieldType::Symbol, Value::Symbol(_))
                | (FieldType::Text, Value::Text(_))
                | (FieldType::Int | FieldType::Decimal, Value::Int(_) | Value::Decimal(_))
        )
    }
}

/// The tag of a `Fact`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FactKind {
    Product,
    TargetCustomer,
    RawBudget,
    PrimaryGoal,
    TimeHorizon,
    ContentCapability,
    SalesStructure,
    PriorityKpi,
    BudgetLevel,
    MarketMaturity,
    CompetitionLevel,
    AcquisitionComplexity,
    SalesCycle,
    StrategicApproach,
    MarketingFocus,
    MessagingAngle,
    ChannelPriority,
    ChannelReadiness,
    ContentPriority,
    QuickWin,
    KpiRecommendation,
    Risk,
    BudgetCategory,
    CostTip,
    ScalingTrigger,
    ScalingAction,
    ToolRecommendation,
    CapabilityRequirement,
    PartnerRecommendation,
    StrategyInjection,
}

impl FactKind {
    pub fn name(self) -> &'static str {
        match self {
            FactKind::Product => "ProductFact",
            FactKind::TargetCustomer => "TargetCustomerFact",
            FactKind::RawBudget => "RawBudget",
            FactKind::PrimaryGoal => "PrimaryGoalFact",
            FactKind::TimeHorizon => "TimeHorizonFact",
            FactKind::ContentCapability => "ContentCapabilityFact",
            FactKind::SalesStructure => "SalesStructureFact",
            FactKind::PriorityKpi => "PriorityKPIFact",
            FactKind::BudgetLevel => "BudgetLevelFact",
            FactKind::MarketMaturity => "MarketMaturityFact",
            FactKind::CompetitionLevel => "CompetitionLevelFact",
            FactKind::AcquisitionComplexity => "CustomerAcquisitionComplexityFact",
            FactKind::SalesCycle => "SalesCycleFact",
            FactKind::StrategicApproach => "StrategicApproachFact",
            FactKind::MarketingFocus => "MarketingFocusFact",
            FactKind::MessagingAngle => "MessagingAngleFact",
            FactKind::ChannelPriority => "ChannelPriorityFact",
            FactKind::ChannelReadiness => "ChannelReadinessFact",
            FactKind::ContentPriority => "ContentTypePriorityFact",
            FactKind::QuickWin => "QuickWinFact",
            FactKind::KpiRecommendation => "KPIRecommendationFact",
            FactKind::Risk => "RiskIdentificationFact",
            FactKind::BudgetCategory => "BudgetCategoryFact",
            FactKind::CostTip => "CostOptimizationFact",
            FactKind::ScalingTrigger => "ScalingTriggerFact",
            FactKind::ScalingAction => "ScalingActionFact",
            FactKind::ToolRecommendation => "ToolRecommendationFact",
            FactKind::CapabilityRequirement => "CapabilityRequirementFact",
            FactKind::PartnerRecommendation => "PartnerRecommendationFact",
            FactKind::StrategyInjection => "StrategyInjectionFact",
        }
    }

    /// The field schema of this kind, in declaration order.
    pub fn fields(self) -> &'static [(&'static str, FieldType)] {
        use FieldType::{Int, Symbol, Text};
        match self {
            FactKind::Product => &[("product_type", Symbol)],
            FactKind::TargetCustomer => &[("customer", Symbol)],
            FactKind::RawBudget => &[("amount", FieldType::Decimal)],
            FactKind::PrimaryGoal => &[("goal", Symbol)],
            FactKind::TimeHorizon => &[("horizon", Symbol)],
            FactKind::ContentCapability => &[("capability", Symbol)],
            FactKind::SalesStructure => &[("structure", Symbol)],
            FactKind::PriorityKpi => &[("kpi", Symbol)],
            FactKind::BudgetLevel => &[("tier", Symbol)],
            FactKind::MarketMaturity | FactKind::CompetitionLevel => &[("level", Symbol)],
            FactKind::AcquisitionComplexity => &[("complexity", Symbol)],
            FactKind::SalesCycle => &[("cycle", Symbol)],
            FactKind::StrategicApproach => &[("approach", Symbol)],
            FactKind::MarketingFocus => &[("focus", Symbol)],
            FactKind::MessagingAngle => &[("angle", Symbol)],
            FactKind::ChannelPriority => &[
                ("channel", Symbol),
                ("priority", Int),
                ("budget_percent", FieldType::Decimal),
            ],
            FactKind::ChannelReadiness => &[("channel", Symbol), ("readiness", Symbol)],
            FactKind::ContentPriority => &[
                ("content_type", Symbol),
                ("priority", Int),
                ("frequency", Text),
            ],
            FactKind::QuickWin => &[("action", Text), ("priority", Symbol), ("effort", Symbol)],
            FactKind::KpiRecommendation => &[("kpi", Text), ("target", Text), ("tier", Symbol)],
            FactKind::Risk => &[("risk", Text), ("severity", Symbol), ("mitigation", Text)],
            FactKind::BudgetCategory => &[("category", Text), ("percentage", FieldType::Decimal)],
            FactKind::CostTip => &[("tip", Text)],
            FactKind::ScalingTrigger => &[("trigger", Text)],
            FactKind::ScalingAction => &[("action", Text)],
            FactKind::ToolRecommendation => &[("tool", Text), ("category", Text)],
            FactKind::CapabilityRequirement => &[("capability", Text), ("importance", Symbol)],
            FactKind::PartnerRecommendation => &[("partner_type", Text)],
            FactKind::StrategyInjection => &[("code", Symbol)],
        }
    }

    /// Type of a named field, if the schema declares it.
    pub fn field_type(self, field: &str) -> Option<FieldType> {
        self.fields()
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, ty)| *ty)
    }
}

impl fmt::Display for FactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Fact {
    pub fn kind(&self) -> FactKind {
        match self {
            Fact::Product { .. } => FactKind::Product,
            Fact::TargetCustomer { .. } => FactKind::TargetCustomer,
            Fact::RawBudget { .. } => FactKind::RawBudget,
            Fact::PrimaryGoal { .. } => FactKind::PrimaryGoal,
            Fact::TimeHorizon { .. } => FactKind::TimeHorizon,
            Fact::ContentCapability { .. } => FactKind::ContentCapability,
            Fact::SalesStructure { .. } => FactKind::SalesStructure,
            Fact::PriorityKpi { .. } => FactKind::PriorityKpi,
            Fact::BudgetLevel { .. } => FactKind::BudgetLevel,
            Fact::MarketMaturity { .. } => FactKind::MarketMaturity,
            Fact::CompetitionLevel { .. } => FactKind::CompetitionLevel,
            Fact::AcquisitionComplexity { .. } => FactKind::AcquisitionComplexity,
            Fact::SalesCycle { .. } => FactKind::SalesCycle,
            Fact::StrategicApproach { .. } => FactKind::StrategicApproach,
            Fact::MarketingFocus { .. } => FactKind::MarketingFocus,
            Fact::MessagingAngle { .. } => FactKind::MessagingAngle,
            Fact::ChannelPriority { .. } => FactKind::ChannelPriority,
            Fact::ChannelReadiness { .. } => FactKind::ChannelReadiness,
            Fact::ContentPriority { .. } => FactKind::ContentPriority,
            Fact::QuickWin { .. } => FactKind::QuickWin,
            Fact::KpiRecommendation { .. } => FactKind::KpiRecommendation,
            Fact::Risk { .. } => FactKind::Risk,
            Fact::BudgetCategory { .. } => FactKind::BudgetCategory,
            Fact::CostTip { .. } => FactKind::CostTip,
            Fact::ScalingTrigger { .. } => FactKind::ScalingTrigger,
            Fact::ScalingAction { .. } => FactKind::ScalingAction,
            Fact::ToolRecommendation { .. } => FactKind::ToolRecommendation,
            Fact::CapabilityRequirement { .. } => FactKind::CapabilityRequirement,
            Fact::PartnerRecommendation { .. } => FactKind::PartnerRecommendation,
            Fact::StrategyInjection { .. } => FactKind::StrategyInjection,
        }
    }

    /// Read a field by schema name. `None` when the kind does not declare it.
    pub fn field(&self, name: &str) -> Option<Value> {
        let value: Value = match (self, name) {
            (Fact::Product { product_type }, "product_type") => (*product_type).into(),
            (Fact::TargetCustomer { customer }, "customer") => (*customer).into(),
            (Fact::RawBudget { amount }, "amount") => (*amount).into(),
            (Fact::PrimaryGoal { goal }, "goal") => (*goal).into(),
            (Fact::TimeHorizon { horizon }, "horizon") => (*horizon).into(),
            (Fact::ContentCapability { capability }, "capability") => (*capability).into(),
            (Fact::SalesStructure { structure }, "structure") => (*structure).into(),
            (Fact::PriorityKpi { kpi }, "kpi") => (*kpi).into(),
            (Fact::BudgetLevel { tier }, "tier") => (*tier).into(),
            (Fact::MarketMaturity { level }, "level") => (*level).into(),
            (Fact::CompetitionLevel { level }, "level") => (*level).into(),
            (Fact::AcquisitionComplexity { complexity }, "complexity") => (*complexity).into(),
            (Fact::SalesCycle { cycle }, "cycle") => (*cycle).into(),
            (Fact::StrategicApproach { approach }, "approach") => (*approach).into(),
            (Fact::MarketingFocus { focus }, "focus") => (*focus).into(),
            (Fact::MessagingAngle { angle }, "angle") => (*angle).into(),
            (Fact::ChannelPriority { channel, .. }, "channel") => (*channel).into(),
            (Fact::ChannelPriority { priority, .. }, "priority") => (*priority).into(),
            (Fact::ChannelPriority { budget_percent, .. }, "budget_percent") => {
                (*budget_percent).into()
            }
            (Fact::ChannelReadiness { channel, .. }, "channel") => (*channel).into(),
            (Fact::ChannelReadiness { readiness, .. }, "readiness") => (*readiness).into(),
            (Fact::ContentPriority { content_type, .. }, "content_type") => {
                (*content_type).into()
            }
            (Fact::ContentPriority { priority, .. }, "priority") => (*priority).into(),
            (Fact::ContentPriority { frequency, .. }, "frequency") => Value::Text(*frequency),
            (Fact::QuickWin { action, .. }, "action") => Value::Text(*action),
            (Fact::QuickWin { priority, .. }, "priority") => (*priority).into(),
            (Fact::QuickWin { effort, .. }, "effort") => (*effort).into(),
            (Fact::KpiRecommendation { kpi, .. }, "kpi") => Value::Text(*kpi),
            (Fact::KpiRecommendation { target, .. }, "target") => Value::Text(*target),
            (Fact::KpiRecommendation { tier, .. }, "tier") => (*tier).into(),
            (Fact::Risk { risk, .. }, "risk") => Value::Text(*risk),
            (Fact::Risk { severity, .. }, "severity") => (*severity).into(),
            (Fact::Risk { mitigation, .. }, "mitigation") => Value::Text(*mitigation),
            (Fact::BudgetCategory { category, .. }, "category") => Value::Text(*category),
            (Fact::BudgetCategory { percentage, .. }, "percentage") => (*percentage).into(),
            (Fact::CostTip { tip }, "tip") => Value::Text(*tip),
            (Fact::ScalingTrigger { trigger }, "trigger") => Value::Text(*trigger),
            (Fact::ScalingAction { action }, "action") => Value::Text(*action),
            (Fact::ToolRecommendation { tool, .. }, "tool") => Value::Text(*tool),
            (Fact::ToolRecommendation { category, .. }, "category") => Value::Text(*category),
            (Fact::CapabilityRequirement { capability, .. }, "capability") => {
                Value::Text(*capability)
            }
            (Fact::CapabilityRequirement { importance, .. }, "importance") => {
                (*importance).into()
            }
            (Fact::PartnerRecommendation { partner_type }, "partner_type") => {
                Value::Text(*partner_type)
            }
            (Fact::StrategyInjection { code }, "code") => (*code).into(),
            _ => return None,
        };
        Some(value)
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind();
        write!(f, "{}(", kind)?;
        for (i, (name, _)) in kind.fields().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match self.field(name) {
                Some(value) => write!(f, "{}={}", name, value)?,
                None => write!(f, "{}=?", name)?,
            }
        }
        f.write_str(")")
    }
}

// ──────────────────────────────────────────────
// FactStore
// ──────────────────────────────────────────────

/// The working memory of one engine run. Append-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactStore(BTreeSet<Fact>);

impl FactStore {
    pub fn new() -> Self {
        FactStore(BTreeSet::new())
    }

    /// Insert a fact. Returns `false` when an identical fact was already
    /// present.
    pub fn assert(&mut self, fact: Fact) -> bool {
        self.0.insert(fact)
    }

    pub fn contains(&self, fact: &Fact) -> bool {
        self.0.contains(fact)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fact> {
        self.0.iter()
    }

    /// All facts of one kind, in store order.
    pub fn of_kind(&self, kind: FactKind) -> impl Iterator<Item = &Fact> {
        self.0.iter().filter(move |f| f.kind() == kind)
    }

    /// Owned copy of the current contents, for error reports.
    pub fn snapshot(&self) -> Vec<Fact> {
        self.0.iter().cloned().collect()
    }

    /// The budget tier, if it has been derived yet.
    pub fn budget_tier(&self) -> Option<BudgetTier> {
        self.0.iter().find_map(|f| match f {
            Fact::BudgetLevel { tier } => Some(*tier),
            _ => None,
        })
    }
}

impl FromIterator<Fact> for FactStore {
    fn from_iter<I: IntoIterator<Item = Fact>>(iter: I) -> Self {
        FactStore(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FactStore {
    type Item = &'a Fact;
    type IntoIter = std::collections::btree_set::Iter<'a, Fact>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_thresholds_are_inclusive() {
        assert_eq!(BudgetTier::classify(Decimal::from(1)), BudgetTier::Micro);
        assert_eq!(BudgetTier::classify(Decimal::from(1_000)), BudgetTier::Micro);
        assert_eq!(BudgetTier::classify(Decimal::new(100_001, 2)), BudgetTier::Small);
        assert_eq!(BudgetTier::classify(Decimal::from(10_000)), BudgetTier::Small);
        assert_eq!(BudgetTier::classify(Decimal::from(10_001)), BudgetTier::Medium);
        assert_eq!(BudgetTier::classify(Decimal::from(100_000)), BudgetTier::Medium);
        assert_eq!(BudgetTier::classify(Decimal::from(1_000_000)), BudgetTier::Large);
        assert_eq!(
            BudgetTier::classify(Decimal::from(1_000_001)),
            BudgetTier::Enterprise
        );
    }

    #[test]
    fn identical_assert_is_noop() {
        let mut store = FactStore::new();
        let fact = Fact::ChannelPriority {
            channel: Channel::PaidSearch,
            priority: 1,
            budget_percent: Decimal::from(35),
        };
        assert!(store.assert(fact.clone()));
        assert!(!store.assert(fact.clone()));
        assert_eq!(store.len(), 1);
        assert!(store.contains(&fact));
    }

    #[test]
    fn decimal_identity_ignores_scale() {
        let mut store = FactStore::new();
        store.assert(Fact::RawBudget {
            amount: Decimal::new(500, 0),
        });
        store.assert(Fact::RawBudget {
            amount: Decimal::new(50000, 2),
        });
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn field_matches_schema_for_every_kind() {
        let samples = vec![
            Fact::Product {
                product_type: ProductType::Hospitality,
            },
            Fact::ChannelPriority {
                channel: Channel::LocalSeo,
                priority: 1,
                budget_percent: Decimal::from(25),
            },
            Fact::ContentPriority {
                content_type: ContentKind::Webinars,
                priority: 2,
                frequency: "2 per month",
            },
            Fact::Risk {
                risk: "r",
                severity: Severity::High,
                mitigation: "m",
            },
            Fact::StrategyInjection {
                code: StrategyCode::Abm,
            },
        ];
        for fact in samples {
            for (name, ty) in fact.kind().fields() {
                let value = fact
                    .field(name)
                    .unwrap_or_else(|| panic!("{} missing {}", fact.kind(), name));
                assert!(ty.accepts(&value), "{} {} is {:?}", fact.kind(), name, value);
            }
            assert_eq!(fact.field("no_such_field"), None);
        }
    }

    #[test]
    fn of_kind_filters() {
        let store: FactStore = [
            Fact::CostTip { tip: "a" },
            Fact::CostTip { tip: "b" },
            Fact::ScalingTrigger { trigger: "t" },
        ]
        .into_iter()
        .collect();
        assert_eq!(store.of_kind(FactKind::CostTip).count(), 2);
        assert_eq!(store.of_kind(FactKind::ScalingAction).count(), 0);
    }

    #[test]
    fn display_renders_fields() {
        let fact = Fact::BudgetLevel {
            tier: BudgetTier::Micro,
        };
        assert_eq!(fact.to_string(), "BudgetLevelFact(tier=micro)");
    }

    #[test]
    fn channels_map_to_codes() {
        assert_eq!(Channel::Retargeting.strategy_code(), StrategyCode::Ppc);
        assert_eq!(Channel::Community.strategy_code(), StrategyCode::Social);
        assert_eq!(Channel::Referral.strategy_code(), StrategyCode::Email);
        assert_eq!(Channel::LocalSeo.strategy_code(), StrategyCode::LocalSeo);
    }
}

//! The aggregated recommendation returned to callers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::fact::{Effort, Severity};

symbol_enum! {
    /// Closed set of strategy codes. The wire name is the display label.
    pub enum StrategyCode {
        Seo => "S1 - Search Engine Optimization (SEO)",
        Ppc => "S2 - Pay-Per-Click Advertising (PPC)",
        Social => "S3 - Social Media Marketing",
        Email => "S4 - Email Marketing",
        Content => "S5 - Content Marketing",
        LocalSeo => "S6 - Local SEO",
        Abm => "S7 - Account-Based Marketing (ABM)",
        Events => "S8 - Trade Shows/Conferences",
        Influencer => "S9 - Influencer Marketing",
    }
}

impl StrategyCode {
    /// Full label, e.g. `S2 - Pay-Per-Click Advertising (PPC)`.
    pub fn label(self) -> &'static str {
        self.as_str()
    }

    /// Short mnemonic used in logs and text output.
    pub fn short(self) -> &'static str {
        match self {
            StrategyCode::Seo => "SEO",
            StrategyCode::Ppc => "PPC",
            StrategyCode::Social => "Social",
            StrategyCode::Email => "Email",
            StrategyCode::Content => "Content",
            StrategyCode::LocalSeo => "LocalSEO",
            StrategyCode::Abm => "ABM",
            StrategyCode::Events => "Events",
            StrategyCode::Influencer => "Influencer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TacticPriority {
    High,
    Medium,
    Low,
}

impl TacticPriority {
    /// Map a best channel priority (1 = highest) to a tactic priority.
    pub fn from_channel_priority(priority: u8) -> TacticPriority {
        match priority {
            0 | 1 => TacticPriority::High,
            2 | 3 => TacticPriority::Medium,
            _ => TacticPriority::Low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetAllocation {
    pub strategy_code: StrategyCode,
    #[serde(with = "rust_decimal::serde::float")]
    pub percentage: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelTactic {
    pub strategy_code: StrategyCode,
    pub tactic: String,
    pub priority: TacticPriority,
    pub expected_outcome: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPlanItem {
    pub content_type: String,
    pub priority: u8,
    pub frequency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetShare {
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub percentage: Decimal,
}

/// A measurable target with how often it should be reviewed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiTarget {
    pub metric_name: String,
    pub target_value: String,
    pub measurement_frequency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TacticalAction {
    pub action: String,
    pub timeline: String,
    pub priority: Severity,
    pub estimated_effort: Effort,
    pub expected_outcome: String,
    pub dependencies: Vec<String>,
}

/// Actions grouped by when they start: months 1-3, 3-6 and 6 onward.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TacticalTimeline {
    pub short_term: Vec<TacticalAction>,
    pub medium_term: Vec<TacticalAction>,
    pub long_term: Vec<TacticalAction>,
}

/// A complete marketing recommendation.
///
/// Invariants: `budget_allocation` percentages sum to exactly 100,
/// `recommended_strategies`, `budget_allocation` and `channel_tactics` have
/// the same length (3 to 5), and `critical_insights` has 2 to 5 entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub recommended_strategies: Vec<StrategyCode>,
    pub critical_insights: Vec<String>,
    pub budget_allocation: Vec<BudgetAllocation>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_monthly_budget: Decimal,
    pub channel_tactics: Vec<ChannelTactic>,
    pub channel_mix_rationale: String,
    pub action_plan: Vec<String>,
    pub tactical_actions: TacticalTimeline,
    pub primary_kpis: Vec<KpiTarget>,
    pub secondary_kpis: Vec<KpiTarget>,
    pub resources: Vec<String>,
    pub content_plan: Vec<ContentPlanItem>,
    pub content_themes: Vec<String>,
    pub budget_categories: Vec<BudgetShare>,
    pub strategy_summary: String,
    pub strategic_positioning: String,
    pub messaging_focus: String,
    pub differentiation: String,
    pub competitive_advantages: Vec<String>,
    pub scaling_strategy: String,
}

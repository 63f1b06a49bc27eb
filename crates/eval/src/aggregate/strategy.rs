//! Channel ranking, strategy-code selection and budget allocation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::warn;

use crate::types::{
    BudgetAllocation, Channel, ChannelTactic, EngineError, Fact, FactKind, FactStore,
    StrategyCode, TacticPriority, TimeHorizon,
};

/// Minimum number of strategy codes in a recommendation.
pub const MIN_STRATEGIES: usize = 3;

/// The best priority and the largest budget share seen for one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelScore {
    pub channel: Channel,
    pub priority: u8,
    pub budget_percent: Decimal,
}

/// Collapse channel priority facts to one score per channel.
///
/// Priority and budget are reduced independently. The result is sorted by
/// priority ascending, budget descending, then channel declaration order.
pub fn rank_channels(facts: &FactStore) -> Vec<ChannelScore> {
    let mut best: BTreeMap<Channel, (u8, Decimal)> = BTreeMap::new();
    for fact in facts.of_kind(FactKind::ChannelPriority) {
        if let Fact::ChannelPriority {
            channel,
            priority,
            budget_percent,
        } = fact
        {
            best.entry(*channel)
                .and_modify(|(p, b)| {
                    *p = (*p).min(*priority);
                    *b = (*b).max(*budget_percent);
                })
                .or_insert((*priority, *budget_percent));
        }
    }

    let mut ranked: Vec<ChannelScore> = best
        .into_iter()
        .map(|(channel, (priority, budget_percent))| ChannelScore {
            channel,
            priority,
            budget_percent,
        })
        .collect();
    ranked.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then(b.budget_percent.cmp(&a.budget_percent))
            .then(a.channel.cmp(&b.channel))
    });
    ranked
}

/// Codes appended when too few survive ranking.
pub fn horizon_defaults(horizon: TimeHorizon) -> [StrategyCode; 3] {
    use StrategyCode::*;
    match horizon {
        TimeHorizon::Short => [Ppc, Social, Email],
        TimeHorizon::Medium => [Ppc, Seo, Email],
        TimeHorizon::Long => [Seo, Content, Ppc],
    }
}

/// A surviving strategy code and what supports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedCode {
    pub code: StrategyCode,
    pub injected: bool,
    /// Best priority among channels rolling up into this code.
    pub best_priority: Option<u8>,
    /// Sum of the per-channel budget maxima rolling up into this code.
    pub budget_percent: Option<Decimal>,
}

/// Pick the strategy codes for a run.
///
/// Injected codes come first, then codes of ranked channels. Duplicates
/// keep their first position. Horizon defaults fill up to three codes and
/// the list is cut to `limit`.
pub fn select_codes(
    facts: &FactStore,
    ranked: &[ChannelScore],
    horizon: TimeHorizon,
    limit: usize,
) -> Vec<SelectedCode> {
    let injected: Vec<StrategyCode> = facts
        .of_kind(FactKind::StrategyInjection)
        .filter_map(|f| match f {
            Fact::StrategyInjection { code } => Some(*code),
            _ => None,
        })
        .collect();

    let mut codes: Vec<StrategyCode> = Vec::new();
    let candidates = injected
        .iter()
        .copied()
        .chain(ranked.iter().map(|s| s.channel.strategy_code()));
    for code in candidates {
        if !codes.contains(&code) {
            codes.push(code);
        }
    }

    if codes.len() < MIN_STRATEGIES {
        warn!(
            derived = codes.len(),
            horizon = %horizon,
            "too few strategies derived, filling with horizon defaults"
        );
        for code in horizon_defaults(horizon) {
            if codes.len() >= MIN_STRATEGIES {
                break;
            }
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
    }
    codes.truncate(limit);

    codes
        .into_iter()
        .map(|code| {
            let covering = ranked.iter().filter(|s| s.channel.strategy_code() == code);
            let best_priority = covering.clone().map(|s| s.priority).min();
            let budget_percent = covering
                .map(|s| s.budget_percent)
                .reduce(|acc, b| acc + b);
            SelectedCode {
                code,
                injected: injected.contains(&code),
                best_priority,
                budget_percent,
            }
        })
        .collect()
}

/// Normalize budget shares to 100 and price them against the monthly budget.
///
/// Percentages are rounded to one decimal; the rounding residue goes to
/// the largest share so the total is exactly 100.
pub fn allocate_budget(
    selected: &[SelectedCode],
    default_percent: Decimal,
    monthly_budget: Decimal,
) -> Result<Vec<BudgetAllocation>, EngineError> {
    let raw: Vec<Decimal> = selected
        .iter()
        .map(|s| s.budget_percent.unwrap_or(default_percent))
        .collect();
    let total: Decimal = raw.iter().copied().sum();
    if total <= Decimal::ZERO {
        return Err(EngineError::Aggregation {
            message: format!("budget shares sum to {}, cannot normalize", total),
        });
    }

    let mut percentages: Vec<Decimal> = raw
        .iter()
        .map(|r| (*r / total * Decimal::ONE_HUNDRED).round_dp(1))
        .collect();
    let residue = Decimal::ONE_HUNDRED - percentages.iter().copied().sum::<Decimal>();
    if !residue.is_zero() {
        if let Some(largest) = (0..raw.len()).reduce(|a, b| if raw[b] > raw[a] { b } else { a }) {
            percentages[largest] += residue;
        }
    }

    Ok(selected
        .iter()
        .zip(percentages)
        .map(|(s, percentage)| BudgetAllocation {
            strategy_code: s.code,
            percentage,
            monthly_amount: (percentage / Decimal::ONE_HUNDRED * monthly_budget).round_dp(2),
        })
        .collect())
}

fn tactic_text(code: StrategyCode) -> (&'static str, &'static str) {
    match code {
        StrategyCode::Seo => (
            "Build topic clusters around high-intent keywords and fix technical SEO issues",
            "Sustainable traffic growth and authority building",
        ),
        StrategyCode::Ppc => (
            "Launch tightly targeted search and retargeting campaigns with clear CTAs",
            "Immediate qualified traffic and lead flow",
        ),
        StrategyCode::Social => (
            "Run audience-targeted social campaigns with visual storytelling and community engagement",
            "Brand awareness and engagement at scale",
        ),
        StrategyCode::Email => (
            "Set up segmented nurture sequences and a referral incentive for existing customers",
            "Improved conversion and customer lifetime value",
        ),
        StrategyCode::Content => (
            "Create value-driven content (blogs, videos, guides) addressing customer pain points",
            "Establish thought leadership and generate inbound leads",
        ),
        StrategyCode::LocalSeo => (
            "Optimize local listings, collect reviews and build local citations",
            "Increased local visibility and foot traffic",
        ),
        StrategyCode::Abm => (
            "Identify top 20 target accounts and create personalized outreach campaigns",
            "Increase enterprise deal closure rate by 40%",
        ),
        StrategyCode::Events => (
            "Attend industry conferences and host booth/speaking sessions",
            "Generate 50-100 qualified leads per event",
        ),
        StrategyCode::Influencer => (
            "Partner with micro-influencers whose audience matches your target customer",
            "Expanded reach and social proof",
        ),
    }
}

const DEFAULT_TACTIC: &str = "Pilot this channel with a limited test budget before scaling";
const DEFAULT_OUTCOME: &str = "Validate channel fit and establish baseline metrics";

/// One tactic per selected code.
pub fn tactics(selected: &[SelectedCode]) -> Vec<ChannelTactic> {
    selected
        .iter()
        .map(|s| {
            let (tactic, outcome, priority) = match (s.injected, s.best_priority) {
                (true, _) => {
                    let (t, o) = tactic_text(s.code);
                    (t, o, TacticPriority::High)
                }
                (false, Some(p)) => {
                    let (t, o) = tactic_text(s.code);
                    (t, o, TacticPriority::from_channel_priority(p))
                }
                (false, None) => (DEFAULT_TACTIC, DEFAULT_OUTCOME, TacticPriority::Low),
            };
            ChannelTactic {
                strategy_code: s.code,
                tactic: tactic.to_string(),
                priority,
                expected_outcome: outcome.to_string(),
            }
        })
        .collect()
}

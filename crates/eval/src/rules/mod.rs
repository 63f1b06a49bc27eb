//! The rule table.
//!
//! Rules are grouped into eleven layers by what they read and produce.
//! Layers document dependencies and drive introspection; the engine scans
//! the whole table every pass and never special-cases a layer.
//!
//! The table is built once per process and is immutable afterwards.

mod budget;
mod channels;
mod content;
mod market;
mod measurement;
mod resources;

use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::predicate::{self, eval_condition, one_of, Condition};
use crate::types::{
    Approach, BudgetTier, CompetitionIntensity, Complexity, ContentCapability, EngineError, Fact,
    FactKind, FactStore, PrimaryGoal, PriorityKpi, ProductType, SalesCycle, SalesStructure,
    TargetCustomer, TimeHorizon,
};

// ──────────────────────────────────────────────
// Layers
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Layer {
    BudgetTier,
    MarketContext,
    Strategy,
    Channels,
    Content,
    QuickWins,
    Kpis,
    Risks,
    BudgetSplit,
    Scaling,
    Resources,
}

impl Layer {
    pub const COUNT: usize = 11;

    pub const ALL: [Layer; Layer::COUNT] = [
        Layer::BudgetTier,
        Layer::MarketContext,
        Layer::Strategy,
        Layer::Channels,
        Layer::Content,
        Layer::QuickWins,
        Layer::Kpis,
        Layer::Risks,
        Layer::BudgetSplit,
        Layer::Scaling,
        Layer::Resources,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Layer> {
        Layer::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Layer::BudgetTier => "budget classification",
            Layer::MarketContext => "market context",
            Layer::Strategy => "strategic direction",
            Layer::Channels => "channel suitability",
            Layer::Content => "content strategy",
            Layer::QuickWins => "quick wins",
            Layer::Kpis => "KPI recommendations",
            Layer::Risks => "risk assessment",
            Layer::BudgetSplit => "budget split",
            Layer::Scaling => "scaling strategy",
            Layer::Resources => "tools and resources",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.index(), self.name())
    }
}

// ──────────────────────────────────────────────
// Rules
// ──────────────────────────────────────────────

/// Computes facts from the store. Errors are reported as rule failures.
pub type DeriveFn = fn(&FactStore) -> Result<Vec<Fact>, String>;

pub enum Action {
    /// Assert a fixed list of facts.
    Assert(Vec<Fact>),
    /// Compute the facts to assert. `kinds` lists what it may produce.
    Derive {
        kinds: &'static [FactKind],
        derive: DeriveFn,
    },
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Assert(facts) => f.debug_tuple("Assert").field(facts).finish(),
            Action::Derive { kinds, .. } => f.debug_struct("Derive").field("kinds", kinds).finish(),
        }
    }
}

#[derive(Debug)]
pub struct Rule {
    pub name: &'static str,
    pub layer: Layer,
    pub description: &'static str,
    pub condition: Condition,
    pub action: Action,
}

impl Rule {
    /// Whether the condition currently holds.
    pub fn matches(&self, facts: &FactStore) -> Result<bool, EngineError> {
        eval_condition(&self.condition, facts).map_err(|source| EngineError::Condition {
            rule: self.name,
            source,
        })
    }

    /// Run the action. Does not check the condition.
    pub fn fire(&self, facts: &FactStore) -> Result<Vec<Fact>, EngineError> {
        match &self.action {
            Action::Assert(out) => Ok(out.clone()),
            Action::Derive { derive, .. } => {
                derive(facts).map_err(|message| EngineError::RuleExecution {
                    rule: self.name,
                    message,
                    snapshot: facts.snapshot(),
                })
            }
        }
    }

    /// Kinds of fact this rule can assert, without duplicates.
    pub fn asserts(&self) -> Vec<FactKind> {
        let kinds: BTreeSet<FactKind> = match &self.action {
            Action::Assert(out) => out.iter().map(Fact::kind).collect(),
            Action::Derive { kinds, .. } => kinds.iter().copied().collect(),
        };
        kinds.into_iter().collect()
    }
}

fn rule(
    name: &'static str,
    layer: Layer,
    description: &'static str,
    condition: Condition,
    facts: Vec<Fact>,
) -> Rule {
    Rule {
        name,
        layer,
        description,
        condition,
        action: Action::Assert(facts),
    }
}

// ──────────────────────────────────────────────
// Condition helpers
// ──────────────────────────────────────────────

fn product(p: ProductType) -> Condition {
    predicate::is(FactKind::Product, "product_type", p)
}

fn products(ps: &[ProductType]) -> Condition {
    one_of(FactKind::Product, "product_type", ps.iter().copied())
}

fn customer(c: TargetCustomer) -> Condition {
    predicate::is(FactKind::TargetCustomer, "customer", c)
}

fn customers(cs: &[TargetCustomer]) -> Condition {
    one_of(FactKind::TargetCustomer, "customer", cs.iter().copied())
}

fn tier(t: BudgetTier) -> Condition {
    predicate::is(FactKind::BudgetLevel, "tier", t)
}

fn goal(g: PrimaryGoal) -> Condition {
    predicate::is(FactKind::PrimaryGoal, "goal", g)
}

fn horizon(h: TimeHorizon) -> Condition {
    predicate::is(FactKind::TimeHorizon, "horizon", h)
}

fn capability(c: ContentCapability) -> Condition {
    predicate::is(FactKind::ContentCapability, "capability", c)
}

fn structure(s: SalesStructure) -> Condition {
    predicate::is(FactKind::SalesStructure, "structure", s)
}

fn kpi(k: PriorityKpi) -> Condition {
    predicate::is(FactKind::PriorityKpi, "kpi", k)
}

fn competition(level: CompetitionIntensity) -> Condition {
    predicate::is(FactKind::CompetitionLevel, "level", level)
}

fn complexity(c: Complexity) -> Condition {
    predicate::is(FactKind::AcquisitionComplexity, "complexity", c)
}

fn cycle(c: SalesCycle) -> Condition {
    predicate::is(FactKind::SalesCycle, "cycle", c)
}

fn approach(a: Approach) -> Condition {
    predicate::is(FactKind::StrategicApproach, "approach", a)
}

fn pct(n: u32) -> Decimal {
    Decimal::from(n)
}

// ──────────────────────────────────────────────
// Table
// ──────────────────────────────────────────────

#[derive(Debug)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

/// Serializable description of one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleDescriptor {
    pub name: &'static str,
    pub layer: usize,
    pub layer_name: &'static str,
    pub description: &'static str,
    pub condition: String,
    pub asserts: Vec<&'static str>,
}

impl RuleTable {
    pub fn new(rules: Vec<Rule>) -> Self {
        RuleTable { rules }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// Rules of one layer, in table order.
    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(move |r| r.layer == layer)
    }

    /// Where `fact` first appears among the fixed assertions of the table:
    /// the rule's index, then the fact's index within that rule's list.
    /// Derived facts have no position.
    pub fn position_of(&self, fact: &Fact) -> Option<(usize, usize)> {
        self.rules.iter().enumerate().find_map(|(i, rule)| match &rule.action {
            Action::Assert(facts) => facts.iter().position(|f| f == fact).map(|j| (i, j)),
            Action::Derive { .. } => None,
        })
    }

    /// Structural checks over the whole table. Returns every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();
        let mut names = BTreeSet::new();
        let mut previous = Layer::BudgetTier;

        for rule in &self.rules {
            if !names.insert(rule.name) {
                problems.push(format!("duplicate rule name '{}'", rule.name));
            }
            if rule.layer < previous {
                problems.push(format!(
                    "rule '{}' in layer {} follows layer {}",
                    rule.name,
                    rule.layer.index(),
                    previous.index()
                ));
            }
            previous = rule.layer;

            if let Err(e) = predicate::validate(&rule.condition) {
                problems.push(format!("rule '{}': {}", rule.name, e));
            }

            if let Action::Assert(facts) = &rule.action {
                if facts.is_empty() {
                    problems.push(format!("rule '{}' asserts nothing", rule.name));
                }
                for fact in facts {
                    let priority = match fact {
                        Fact::ChannelPriority { priority, .. }
                        | Fact::ContentPriority { priority, .. } => Some(*priority),
                        _ => None,
                    };
                    if let Some(p) = priority {
                        if !(1..=5).contains(&p) {
                            problems.push(format!(
                                "rule '{}' asserts priority {} outside 1-5",
                                rule.name, p
                            ));
                        }
                    }
                }
                let split: Option<Decimal> = facts
                    .iter()
                    .filter_map(|f| match f {
                        Fact::BudgetCategory { percentage, .. } => Some(*percentage),
                        _ => None,
                    })
                    .fold(None, |acc, p| Some(acc.unwrap_or(Decimal::ZERO) + p));
                if let Some(total) = split {
                    if total != Decimal::ONE_HUNDRED {
                        problems.push(format!(
                            "rule '{}' splits the budget into {}%",
                            rule.name, total
                        ));
                    }
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }

    pub fn describe(&self) -> Vec<RuleDescriptor> {
        self.rules
            .iter()
            .map(|rule| RuleDescriptor {
                name: rule.name,
                layer: rule.layer.index(),
                layer_name: rule.layer.name(),
                description: rule.description,
                condition: rule.condition.to_string(),
                asserts: rule.asserts().into_iter().map(FactKind::name).collect(),
            })
            .collect()
    }
}

static RULE_TABLE: OnceLock<RuleTable> = OnceLock::new();

/// The process-wide rule table.
pub fn rule_table() -> &'static RuleTable {
    RULE_TABLE.get_or_init(|| {
        let mut rules = market::rules();
        rules.extend(channels::rules());
        rules.extend(content::rules());
        rules.extend(measurement::rules());
        rules.extend(budget::rules());
        rules.extend(resources::rules());
        RuleTable::new(rules)
    })
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

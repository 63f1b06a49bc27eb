//! Forward-chaining inference.
//!
//! Each pass scans the rule table in order. A rule whose condition holds
//! and which has not fired yet runs its action, and the produced facts are
//! merged into the store immediately, so later rules in the same pass see
//! them. A pass that adds no fact ends the run.
//!
//! Conditions bind no variables, so a rule's binding is the rule itself:
//! every rule fires at most once per run, however many ways its condition
//! can be satisfied.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::rules::{rule_table, RuleTable};
use crate::types::{EngineError, Fact, FactStore};

/// The result of one run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub facts: FactStore,
    /// Names of the rules that fired, in firing order.
    pub fired: Vec<&'static str>,
    /// Passes executed, including the final pass that added nothing.
    pub passes: usize,
}

pub struct Engine<'t> {
    table: &'t RuleTable,
    max_passes: usize,
}

impl Engine<'static> {
    /// An engine over the process-wide rule table.
    pub fn new(config: &EngineConfig) -> Self {
        Engine::with_table(rule_table(), config)
    }
}

impl<'t> Engine<'t> {
    pub fn with_table(table: &'t RuleTable, config: &EngineConfig) -> Self {
        Engine {
            table,
            max_passes: config.max_passes,
        }
    }

    /// Seed the store with `initial` and run to fixpoint.
    ///
    /// On error nothing of the partial store is returned except the
    /// snapshot carried by `EngineError::RuleExecution`.
    pub fn run(&self, initial: impl IntoIterator<Item = Fact>) -> Result<RunOutcome, EngineError> {
        let mut facts: FactStore = initial.into_iter().collect();
        let mut fired_names: BTreeSet<&'static str> = BTreeSet::new();
        let mut fired = Vec::new();

        for pass in 1..=self.max_passes {
            let mut added = 0;

            for rule in self.table.iter() {
                if fired_names.contains(rule.name) || !rule.matches(&facts)? {
                    continue;
                }
                let produced = rule.fire(&facts)?;
                let new = produced
                    .into_iter()
                    .filter(|fact| facts.assert(fact.clone()))
                    .count();
                fired_names.insert(rule.name);
                fired.push(rule.name);
                added += new;
                debug!(rule = rule.name, layer = rule.layer.index(), added = new, "rule fired");
            }

            debug!(pass, added, total = facts.len(), "pass complete");

            if added == 0 {
                info!(
                    passes = pass,
                    fired = fired.len(),
                    facts = facts.len(),
                    "reached fixpoint"
                );
                return Ok(RunOutcome {
                    facts,
                    fired,
                    passes: pass,
                });
            }
        }

        Err(EngineError::NoFixpoint {
            passes: self.max_passes,
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::predicate::{all, is};
    use crate::rules::{Action, Layer, Rule};
    use crate::types::{
        BudgetTier, ContentCapability, FactKind, PrimaryGoal, PriorityKpi, ProductType, Request,
        SalesStructure, TargetCustomer, TimeHorizon, Value,
    };

    fn request() -> Request {
        Request {
            product_type: ProductType::B2cRetail,
            target_customer: TargetCustomer::GenZ,
            primary_goal: PrimaryGoal::Awareness,
            time_horizon: TimeHorizon::Long,
            content_capability: ContentCapability::Medium,
            sales_structure: SalesStructure::Automated,
            priority_kpi: PriorityKpi::ConversionRate,
            raw_budget_amount: Decimal::from(50_000),
        }
    }

    fn tip_rule(name: &'static str, needs: Option<&'static str>, gives: &'static str) -> Rule {
        let condition = match needs {
            Some(tip) => is(FactKind::CostTip, "tip", Value::Text(tip)),
            None => all(vec![]),
        };
        Rule {
            name,
            layer: Layer::BudgetSplit,
            description: "",
            condition,
            action: Action::Assert(vec![Fact::CostTip { tip: gives }]),
        }
    }

    /// Three chained rules listed in reverse dependency order, so each
    /// pass can fire only one of them.
    fn chain() -> RuleTable {
        RuleTable::new(vec![
            tip_rule("third", Some("b"), "c"),
            tip_rule("second", Some("a"), "b"),
            tip_rule("first", None, "a"),
        ])
    }

    #[test]
    fn run_reaches_fixpoint() {
        let outcome = Engine::new(&EngineConfig::default())
            .run(request().to_facts())
            .unwrap();
        assert!(outcome.passes <= Layer::COUNT + 1);
        assert_eq!(outcome.facts.budget_tier(), Some(BudgetTier::Medium));
        assert_eq!(outcome.fired[0], "classify_budget");
        let unique: BTreeSet<_> = outcome.fired.iter().collect();
        assert_eq!(unique.len(), outcome.fired.len());
    }

    #[test]
    fn run_is_deterministic() {
        let engine = Engine::new(&EngineConfig::default());
        let a = engine.run(request().to_facts()).unwrap();
        let b = engine.run(request().to_facts()).unwrap();
        assert_eq!(a.facts, b.facts);
        assert_eq!(a.fired, b.fired);
    }

    #[test]
    fn chained_rules_need_one_pass_each() {
        let table = chain();
        let outcome = Engine::with_table(&table, &EngineConfig::default())
            .run(Vec::new())
            .unwrap();
        assert_eq!(outcome.fired, vec!["first", "second", "third"]);
        assert_eq!(outcome.passes, 4);
        assert_eq!(outcome.facts.len(), 3);
    }

    #[test]
    fn pass_cap_reports_no_fixpoint() {
        let table = chain();
        let config = EngineConfig {
            max_passes: 2,
            ..EngineConfig::default()
        };
        let err = Engine::with_table(&table, &config)
            .run(Vec::new())
            .unwrap_err();
        assert_eq!(err, EngineError::NoFixpoint { passes: 2 });
    }

    #[test]
    fn rule_producing_known_facts_fires_once() {
        let table = RuleTable::new(vec![tip_rule("echo", None, "a")]);
        let outcome = Engine::with_table(&table, &EngineConfig::default())
            .run(vec![Fact::CostTip { tip: "a" }])
            .unwrap();
        assert_eq!(outcome.fired, vec!["echo"]);
        assert_eq!(outcome.passes, 1);
        assert_eq!(outcome.facts.len(), 1);
    }

    #[test]
    fn missing_budget_derives_no_tier() {
        let facts: Vec<Fact> = request()
            .to_facts()
            .into_iter()
            .filter(|f| f.kind() != FactKind::RawBudget)
            .collect();
        // classify_budget only matches a positive RawBudget.
        let outcome = Engine::new(&EngineConfig::default()).run(facts).unwrap();
        assert_eq!(outcome.facts.budget_tier(), None);
        assert!(!outcome.fired.contains(&"classify_budget"));
    }

    #[test]
    fn duplicate_budget_aborts_with_snapshot() {
        let mut two_budgets = request().to_facts().to_vec();
        two_budgets.push(Fact::RawBudget {
            amount: Decimal::from(7),
        });
        match Engine::new(&EngineConfig::default()).run(two_budgets) {
            Err(EngineError::RuleExecution { rule, snapshot, .. }) => {
                assert_eq!(rule, "classify_budget");
                assert_eq!(snapshot.len(), 9);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}

//! Layers 0-2: budget tier, market context and strategic direction.

use rust_decimal::Decimal;

use super::{
    competition, customer, customers, goal, horizon, product, rule, Action, Layer, Rule,
};
use crate::predicate::{all, compare, CmpOp};
use crate::types::{
    Angle, Approach, BudgetTier, CompetitionIntensity, Complexity, Fact, FactKind, FactStore,
    Focus, MaturityLevel, PrimaryGoal, ProductType, SalesCycle, TargetCustomer, TimeHorizon,
};

pub(super) fn rules() -> Vec<Rule> {
    let mut rules = vec![Rule {
        name: "classify_budget",
        layer: Layer::BudgetTier,
        description: "Classify the raw budget into a tier",
        condition: compare(FactKind::RawBudget, "amount", CmpOp::Gt, Decimal::ZERO),
        action: Action::Derive {
            kinds: &[FactKind::BudgetLevel],
            derive: classify_budget,
        },
    }];
    rules.extend(market_context());
    rules.extend(acquisition());
    rules.extend(strategy());
    rules
}

fn classify_budget(facts: &FactStore) -> Result<Vec<Fact>, String> {
    let mut amounts = facts.of_kind(FactKind::RawBudget).filter_map(|f| match f {
        Fact::RawBudget { amount } => Some(*amount),
        _ => None,
    });
    let amount = amounts
        .next()
        .ok_or_else(|| "no raw budget in the fact store".to_string())?;
    if amounts.next().is_some() {
        return Err("more than one raw budget in the fact store".to_string());
    }
    Ok(vec![Fact::BudgetLevel {
        tier: BudgetTier::classify(amount),
    }])
}

fn market(level: MaturityLevel, intensity: CompetitionIntensity) -> Vec<Fact> {
    vec![
        Fact::MarketMaturity { level },
        Fact::CompetitionLevel { level: intensity },
    ]
}

fn market_context() -> Vec<Rule> {
    use CompetitionIntensity as C;
    use MaturityLevel as M;
    let l = Layer::MarketContext;
    vec![
        rule(
            "market_b2b_saas",
            l,
            "B2B SaaS: growth market, high competition",
            product(ProductType::B2bSaas),
            market(M::Growth, C::High),
        ),
        rule(
            "market_b2c_retail",
            l,
            "B2C retail: mature market, very high competition",
            product(ProductType::B2cRetail),
            market(M::Mature, C::VeryHigh),
        ),
        rule(
            "market_local_service",
            l,
            "Local service: mature market, moderate competition",
            product(ProductType::LocalService),
            market(M::Mature, C::Moderate),
        ),
        rule(
            "market_consulting",
            l,
            "Consulting: mature market, high competition",
            product(ProductType::Consulting),
            market(M::Mature, C::High),
        ),
        rule(
            "market_digital_product",
            l,
            "Digital product: growth market, high competition",
            product(ProductType::DigitalProduct),
            market(M::Growth, C::High),
        ),
        rule(
            "market_fmcg",
            l,
            "FMCG: saturated market, very high competition",
            product(ProductType::Fmcg),
            market(M::Saturated, C::VeryHigh),
        ),
        rule(
            "market_technical_tools",
            l,
            "Technical tools: growth market, moderate competition",
            product(ProductType::TechnicalTools),
            market(M::Growth, C::Moderate),
        ),
        rule(
            "market_hospitality",
            l,
            "Hospitality: mature market, high competition",
            product(ProductType::Hospitality),
            market(M::Mature, C::High),
        ),
        rule(
            "market_subscription",
            l,
            "Subscription: growth market, high competition",
            product(ProductType::Subscription),
            market(M::Growth, C::High),
        ),
    ]
}

fn segment(complexity: Complexity, cycle: SalesCycle) -> Vec<Fact> {
    vec![
        Fact::AcquisitionComplexity { complexity },
        Fact::SalesCycle { cycle },
    ]
}

fn acquisition() -> Vec<Rule> {
    use Complexity as X;
    use SalesCycle as S;
    let l = Layer::MarketContext;
    vec![
        rule(
            "acquisition_enterprise",
            l,
            "Large enterprises: very complex acquisition, very long cycle",
            customer(TargetCustomer::LargeEnterprise),
            segment(X::VeryComplex, S::VeryLong),
        ),
        rule(
            "acquisition_sme",
            l,
            "SMEs: complex acquisition, medium cycle",
            customer(TargetCustomer::Sme),
            segment(X::Complex, S::Medium),
        ),
        rule(
            "acquisition_digital_natives",
            l,
            "Gen Z and millennials: moderate acquisition, short cycle",
            customers(&[TargetCustomer::GenZ, TargetCustomer::Millenial]),
            segment(X::Moderate, S::Short),
        ),
        rule(
            "acquisition_senior",
            l,
            "Seniors: moderate acquisition, medium cycle",
            customer(TargetCustomer::Senior),
            segment(X::Moderate, S::Medium),
        ),
        rule(
            "acquisition_local",
            l,
            "Local community: simple acquisition, short cycle",
            customer(TargetCustomer::LocalCommunity),
            segment(X::Simple, S::Short),
        ),
        rule(
            "acquisition_niche",
            l,
            "Niche industry: complex acquisition, long cycle",
            customer(TargetCustomer::NicheIndustry),
            segment(X::Complex, S::Long),
        ),
        rule(
            "acquisition_budget_shopper",
            l,
            "Budget shoppers: simple acquisition, immediate purchase",
            customer(TargetCustomer::BudgetShopper),
            segment(X::Simple, S::Immediate),
        ),
        rule(
            "acquisition_luxury",
            l,
            "Luxury buyers: complex acquisition, long cycle",
            customer(TargetCustomer::Luxury),
            segment(X::Complex, S::Long),
        ),
    ]
}

fn direction(approach: Approach, focus: Focus) -> Vec<Fact> {
    vec![
        Fact::StrategicApproach { approach },
        Fact::MarketingFocus { focus },
    ]
}

fn strategy() -> Vec<Rule> {
    let l = Layer::Strategy;
    vec![
        rule(
            "strategy_brand_building",
            l,
            "Long-horizon awareness: dominate a niche through brand building",
            all(vec![
                goal(PrimaryGoal::Awareness),
                horizon(TimeHorizon::Long),
            ]),
            direction(Approach::NicheDomination, Focus::BrandBuilding),
        ),
        rule(
            "strategy_aggressive_growth",
            l,
            "Short-horizon lead generation: aggressive acquisition",
            all(vec![goal(PrimaryGoal::LeadGen), horizon(TimeHorizon::Short)]),
            direction(Approach::AggressiveGrowth, Focus::Acquisition),
        ),
        rule(
            "strategy_retention",
            l,
            "Retention goal: defend the existing customer base",
            goal(PrimaryGoal::Retention),
            direction(Approach::Defensive, Focus::Retention),
        ),
        rule(
            "strategy_steady_growth",
            l,
            "Medium-horizon lead generation: steady acquisition",
            all(vec![goal(PrimaryGoal::LeadGen), horizon(TimeHorizon::Medium)]),
            direction(Approach::SteadyGrowth, Focus::Acquisition),
        ),
        rule(
            "strategy_differentiation",
            l,
            "Awareness in a crowded market: differentiate",
            all(vec![
                goal(PrimaryGoal::Awareness),
                competition(CompetitionIntensity::VeryHigh),
            ]),
            vec![
                Fact::StrategicApproach {
                    approach: Approach::NicheDomination,
                },
                Fact::MessagingAngle {
                    angle: Angle::Differentiation,
                },
            ],
        ),
    ]
}

//! The validated business profile the engine is seeded from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::fact::Fact;
use super::EngineError;

symbol_enum! {
    /// What the business sells.
    pub enum ProductType {
        B2bSaas => "b2b_enterprise_saas",
        B2cRetail => "b2c_retail_goods",
        LocalService => "local_service",
        Consulting => "high_end_consulting",
        DigitalProduct => "digital_info_product",
        Fmcg => "fast_moving_consumer_goods",
        TechnicalTools => "niche_technical_tools",
        Hospitality => "hospitality",
        Subscription => "subscription_recurring",
    }
}

symbol_enum! {
    /// Who the business sells to.
    pub enum TargetCustomer {
        LargeEnterprise => "large_enterprise",
        Sme => "small_to_medium_enterprise",
        GenZ => "gen_z",
        Millenial => "millenial",
        Senior => "senior",
        LocalCommunity => "local_community",
        NicheIndustry => "niche_industry",
        BudgetShopper => "budget_shopper",
        Luxury => "luxury",
    }
}

symbol_enum! {
    pub enum PrimaryGoal {
        Awareness => "brand_awareness",
        LeadGen => "immediate_lead_generation",
        Retention => "customer_retention_loyalty",
    }
}

symbol_enum! {
    pub enum TimeHorizon {
        /// 1-3 months.
        Short => "short_term",
        /// 3-6 months.
        Medium => "medium_term",
        /// 6+ months.
        Long => "long_term",
    }
}

impl TimeHorizon {
    /// Number of months the raw budget is spread over.
    pub fn months(self) -> u32 {
        match self {
            TimeHorizon::Short => 2,
            TimeHorizon::Medium => 4,
            TimeHorizon::Long => 9,
        }
    }
}

symbol_enum! {
    pub enum ContentCapability {
        Low => "low_capability",
        Medium => "medium_capability",
        High => "high_capability",
    }
}

symbol_enum! {
    pub enum SalesStructure {
        Automated => "automated_ecommerce",
        SalesTeam => "dedicated_sales_team",
        OwnerDriven => "owner_driven",
    }
}

symbol_enum! {
    pub enum PriorityKpi {
        ConversionRate => "conversion_rate",
        Clv => "customer_lifetime_value",
        Traffic => "organic_traffic_impressions",
        Cpa => "cost_per_acquisition",
        Sql => "sales_qualified_leads",
    }
}

/// A marketing analysis request.
///
/// Enumerated fields are closed by construction; the only value that can
/// be out of domain after deserialization is the budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub product_type: ProductType,
    pub target_customer: TargetCustomer,
    pub primary_goal: PrimaryGoal,
    pub time_horizon: TimeHorizon,
    pub content_capability: ContentCapability,
    pub sales_structure: SalesStructure,
    pub priority_kpi: PriorityKpi,
    /// Total marketing budget in USD over the whole horizon.
    pub raw_budget_amount: Decimal,
}

impl Request {
    /// Reject a request the engine must never see.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.raw_budget_amount <= Decimal::ZERO {
            return Err(EngineError::invalid(format!(
                "raw_budget_amount must be positive, got {}",
                self.raw_budget_amount
            )));
        }
        Ok(())
    }

    /// The eight input facts, one per request field.
    pub fn to_facts(&self) -> [Fact; 8] {
        [
            Fact::Product {
                product_type: self.product_type,
            },
            Fact::TargetCustomer {
                customer: self.target_customer,
            },
            Fact::RawBudget {
                amount: self.raw_budget_amount,
            },
            Fact::PrimaryGoal {
                goal: self.primary_goal,
            },
            Fact::TimeHorizon {
                horizon: self.time_horizon,
            },
            Fact::ContentCapability {
                capability: self.content_capability,
            },
            Fact::SalesStructure {
                structure: self.sales_structure,
            },
            Fact::PriorityKpi {
                kpi: self.priority_kpi,
            },
        ]
    }

    /// Budget available per month over the chosen horizon.
    pub fn monthly_budget(&self) -> Decimal {
        self.raw_budget_amount / Decimal::from(self.time_horizon.months())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Request {
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

    #[test]
    fn deserializes_wire_names() {
        let json = serde_json::json!({
            "product_type": "b2c_retail_goods",
            "target_customer": "gen_z",
            "primary_goal": "brand_awareness",
            "time_horizon": "long_term",
            "content_capability": "medium_capability",
            "sales_structure": "automated_ecommerce",
            "priority_kpi": "conversion_rate",
            "raw_budget_amount": 50000
        });
        let request: Request = serde_json::from_value(json).unwrap();
        assert_eq!(request, sample());
    }

    #[test]
    fn rejects_unknown_enum_value() {
        let json = serde_json::json!({
            "product_type": "spaceships",
            "target_customer": "gen_z",
            "primary_goal": "brand_awareness",
            "time_horizon": "long_term",
            "content_capability": "medium_capability",
            "sales_structure": "automated_ecommerce",
            "priority_kpi": "conversion_rate",
            "raw_budget_amount": 50000
        });
        assert!(serde_json::from_value::<Request>(json).is_err());
    }

    #[test]
    fn validate_rejects_non_positive_budget() {
        let mut request = sample();
        request.raw_budget_amount = Decimal::ZERO;
        assert!(matches!(
            request.validate(),
            Err(EngineError::InvalidInput { .. })
        ));
        request.raw_budget_amount = Decimal::from(-5);
        assert!(request.validate().is_err());
        request.raw_budget_amount = Decimal::new(1, 2);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn seeds_one_fact_per_field() {
        let facts = sample().to_facts();
        let kinds: std::collections::BTreeSet<_> = facts.iter().map(|f| f.kind()).collect();
        assert_eq!(kinds.len(), 8);
    }

    #[test]
    fn monthly_budget_uses_horizon_months() {
        let mut request = sample();
        request.time_horizon = TimeHorizon::Short;
        assert_eq!(request.monthly_budget(), Decimal::from(25_000));
        request.time_horizon = TimeHorizon::Medium;
        assert_eq!(request.monthly_budget(), Decimal::from(12_500));
    }
}

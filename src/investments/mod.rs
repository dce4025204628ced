pub mod espp;
pub mod projection;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::Result;
use crate::types::{InvestmentId, InvestmentStatus, InvestmentType};

pub use espp::{compute_espp_gains, per_share_gain, shares_per_contribution, EsppGains, EsppHolding};
pub use projection::{compute_projection, InvestmentPlan, ProjectionResult};

/// a tracked investment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: InvestmentId,
    pub name: String,
    pub investment_type: InvestmentType,
    pub plan: InvestmentPlan,
    pub start_date: NaiveDate,
    /// last value reported by the user
    pub current_value: Money,
    pub status: InvestmentStatus,
    pub espp: Option<EsppHolding>,
}

impl Investment {
    pub fn new(
        name: impl Into<String>,
        investment_type: InvestmentType,
        plan: InvestmentPlan,
        start_date: NaiveDate,
    ) -> Result<Self> {
        plan.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            investment_type,
            plan,
            start_date,
            current_value: Money::ZERO,
            status: InvestmentStatus::Active,
            espp: None,
        })
    }

    pub fn with_current_value(mut self, value: Money) -> Self {
        self.current_value = value;
        self
    }

    pub fn with_status(mut self, status: InvestmentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_espp(mut self, holding: EsppHolding) -> Self {
        self.espp = Some(holding);
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == InvestmentStatus::Active
    }

    /// value at the end of the plan's horizon
    pub fn projected_maturity(&self) -> Result<ProjectionResult> {
        self.plan.project()
    }

    /// ESPP position as of `today`; empty for non-ESPP investments
    pub fn espp_gains(&self, today: NaiveDate) -> EsppGains {
        match (self.investment_type, &self.espp) {
            (InvestmentType::Espp, Some(holding)) => holding.gains_as_of(today),
            _ => EsppGains::default(),
        }
    }
}

/// headline totals across a user's investments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTotals {
    /// principal plus every planned contribution, over all investments
    pub total_committed: Money,
    pub total_current_value: Money,
    /// contributions due each month from active investments
    pub monthly_investment_total: Money,
}

impl PortfolioTotals {
    pub fn compute(investments: &[Investment]) -> Self {
        Self {
            total_committed: investments.iter().map(|i| i.plan.total_contributions()).sum(),
            total_current_value: investments.iter().map(|i| i.current_value).sum(),
            monthly_investment_total: investments
                .iter()
                .filter(|i| i.is_active())
                .map(|i| i.plan.monthly_contribution)
                .sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use rust_decimal_macros::dec;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn sip(contribution: i64) -> Investment {
        let plan = InvestmentPlan::new(
            Money::from_major(10_000),
            Money::from_major(contribution),
            Rate::from_percent(dec!(12)),
            60,
        )
        .unwrap();
        Investment::new("Index fund", InvestmentType::Sip, plan, start()).unwrap()
    }

    #[test]
    fn test_portfolio_totals() {
        let investments = vec![
            sip(5_000).with_current_value(Money::from_major(70_000)),
            sip(2_000).with_status(InvestmentStatus::Paused),
        ];
        let totals = PortfolioTotals::compute(&investments);

        assert_eq!(
            totals.total_committed,
            Money::from_major(10_000 + 5_000 * 60 + 10_000 + 2_000 * 60)
        );
        assert_eq!(totals.total_current_value, Money::from_major(70_000));
        assert_eq!(totals.monthly_investment_total, Money::from_major(5_000));
    }

    #[test]
    fn test_projected_maturity_matches_calculator() {
        let investment = sip(5_000);
        let maturity = investment.projected_maturity().unwrap();
        let direct = compute_projection(
            Money::from_major(10_000),
            Money::from_major(5_000),
            Rate::from_percent(dec!(12)),
            5,
        )
        .unwrap();
        assert_eq!(maturity, direct);
    }

    #[test]
    fn test_espp_gains_only_for_espp() {
        let holding = EsppHolding {
            purchase_price: Money::from_major(80),
            current_price: Money::from_major(100),
            shares_per_month: dec!(1),
            start_date: start(),
        };
        let today = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();

        let plain = sip(1_000).with_espp(holding);
        assert!(plain.espp_gains(today).is_empty());

        let plan = InvestmentPlan::new(Money::ZERO, Money::from_major(8_000), Rate::ZERO, 24).unwrap();
        let espp = Investment::new("Employer ESPP", InvestmentType::Espp, plan, start())
            .unwrap()
            .with_espp(holding);
        assert_eq!(espp.espp_gains(today).total_shares, dec!(6));
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::{checked_product, compound_factor, Money, Rate};
use crate::errors::{FinanceError, Result};

/// lump sum plus recurring monthly contributions at an expected return
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentPlan {
    pub initial_principal: Money,
    pub monthly_contribution: Money,
    pub annual_return: Rate,
    pub horizon_months: u32,
}

/// projected maturity of an investment plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub total_invested: Money,
    pub total_returns: Money,
    /// always `total_invested + total_returns`
    pub future_value: Money,
}

impl ProjectionResult {
    /// returns as a percent of the amount invested
    pub fn return_percent(&self) -> Decimal {
        self.total_returns.percent_of(self.total_invested)
    }
}

impl InvestmentPlan {
    pub fn new(
        initial_principal: Money,
        monthly_contribution: Money,
        annual_return: Rate,
        horizon_months: u32,
    ) -> Result<Self> {
        let plan = Self {
            initial_principal,
            monthly_contribution,
            annual_return,
            horizon_months,
        };
        plan.validate()?;
        Ok(plan)
    }

    pub fn validate(&self) -> Result<()> {
        if self.initial_principal.is_negative() {
            return Err(FinanceError::investment_plan(format!(
                "initial principal must not be negative, got {}",
                self.initial_principal
            )));
        }
        if self.monthly_contribution.is_negative() {
            return Err(FinanceError::investment_plan(format!(
                "monthly contribution must not be negative, got {}",
                self.monthly_contribution
            )));
        }
        if self.annual_return.as_decimal() <= -Decimal::ONE {
            return Err(FinanceError::investment_plan(format!(
                "annual return must be above -100%, got {}",
                self.annual_return
            )));
        }
        Ok(())
    }

    /// everything paid in over the horizon
    pub fn total_contributions(&self) -> Money {
        self.initial_principal + self.monthly_contribution.times(self.horizon_months)
    }

    /// future value with monthly compounding and start-of-month contributions
    pub fn project(&self) -> Result<ProjectionResult> {
        self.validate()?;

        let r = self.annual_return.monthly_rate().as_decimal();
        let n = self.horizon_months;
        let growth = compound_factor(r, n)?;

        let fv_principal = self.initial_principal.checked_mul(growth)?;
        let fv_contributions = if r.is_zero() {
            self.monthly_contribution.times(n)
        } else {
            // annuity-due: each contribution compounds for its whole month
            let annuity = checked_product((growth - Decimal::ONE) / r, Decimal::ONE + r)?;
            self.monthly_contribution.checked_mul(annuity)?
        };

        let total_invested = self.total_contributions();
        let total_returns = (fv_principal + fv_contributions) - total_invested;

        debug!(
            principal = %self.initial_principal,
            contribution = %self.monthly_contribution,
            rate = %self.annual_return,
            months = n,
            %total_invested,
            %total_returns,
            "investment projection computed"
        );

        Ok(ProjectionResult {
            total_invested,
            total_returns,
            future_value: total_invested + total_returns,
        })
    }
}

/// project a plan over a horizon expressed in whole years
pub fn compute_projection(
    initial_principal: Money,
    monthly_contribution: Money,
    annual_return: Rate,
    horizon_years: u32,
) -> Result<ProjectionResult> {
    let horizon_months = horizon_years.checked_mul(12).ok_or_else(|| {
        FinanceError::investment_plan(format!("horizon of {horizon_years} years is too long"))
    })?;
    InvestmentPlan::new(initial_principal, monthly_contribution, annual_return, horizon_months)?
        .project()
}

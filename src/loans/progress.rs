use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::dates::whole_months_elapsed;
use crate::decimal::{checked_product, compound_factor, Money};
use crate::errors::Result;

use super::Loan;

/// repayment progress of a single loan as of a given day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanProgress {
    pub months_elapsed: u32,
    pub months_remaining: u32,
    /// percent of the term completed, capped at 100
    pub progress_percent: Decimal,
    pub amount_paid: Money,
    pub amount_remaining: Money,
}

impl LoanProgress {
    pub fn compute(loan: &Loan, today: NaiveDate) -> Self {
        let term = loan.term_months();
        let months_elapsed = whole_months_elapsed(loan.start_date(), today).min(term);
        let months_remaining = term - months_elapsed;

        Self {
            months_elapsed,
            months_remaining,
            progress_percent: Decimal::from(months_elapsed) / Decimal::from(term.max(1))
                * Decimal::ONE_HUNDRED,
            amount_paid: loan.monthly_payment.times(months_elapsed),
            amount_remaining: loan.monthly_payment.times(months_remaining),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.months_remaining == 0
    }
}

/// combined progress over a set of loans
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioProgress {
    pub total_paid: Money,
    pub total_remaining: Money,
    pub average_progress_percent: Decimal,
    /// months until the last loan is repaid
    pub debt_free_in_months: u32,
}

impl PortfolioProgress {
    pub fn compute(loans: &[Loan], today: NaiveDate) -> Self {
        let progress: Vec<LoanProgress> = loans
            .iter()
            .filter(|loan| loan.is_active())
            .map(|loan| LoanProgress::compute(loan, today))
            .collect();

        let average_progress_percent = if progress.is_empty() {
            Decimal::ZERO
        } else {
            progress.iter().map(|p| p.progress_percent).sum::<Decimal>()
                / Decimal::from(progress.len() as u64)
        };

        Self {
            total_paid: progress.iter().map(|p| p.amount_paid).sum(),
            total_remaining: progress.iter().map(|p| p.amount_remaining).sum(),
            average_progress_percent,
            debt_free_in_months: progress.iter().map(|p| p.months_remaining).max().unwrap_or(0),
        }
    }
}

/// outstanding principal once `months_paid` scheduled payments have been made
///
/// Present value of the payments still due: `PMT * ((1+r)^k - 1) / (r (1+r)^k)`
/// with `k` months left, or `PMT * k` for an interest-free loan.
pub fn remaining_balance_after(loan: &Loan, months_paid: u32) -> Result<Money> {
    let remaining_months = loan.term_months().saturating_sub(months_paid);
    if remaining_months == 0 {
        return Ok(Money::ZERO);
    }

    let r = loan.terms.monthly_rate();
    if r.is_zero() {
        return Ok(loan.monthly_payment.times(remaining_months));
    }

    let compound = compound_factor(r, remaining_months)?;
    let annuity = (compound - Decimal::ONE) / checked_product(r, compound)?;
    loan.monthly_payment.checked_mul(annuity)
}

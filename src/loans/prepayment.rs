use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::decimal::Money;
use crate::errors::{FinanceError, Result};

use super::amortization::monthly_payment;
use super::Loan;

/// outcome of a hypothetical lump-sum prepayment
///
/// Advisory only: the loan it was computed from is left untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepaymentScenario {
    pub revised_term_months: u32,
    pub revised_monthly_payment: Money,
    pub interest_saved: Money,
    pub months_saved: u32,
    pub total_saved: Money,
}

impl PrepaymentScenario {
    /// true when the lump sum retires the whole principal
    pub fn clears_loan(&self) -> bool {
        self.revised_term_months == 0
    }
}

/// recompute a loan after a lump-sum prepayment and a shortened payoff target
pub fn compute_prepayment_scenario(
    loan: &Loan,
    lump_sum: Money,
    payoff_acceleration_months: u32,
) -> Result<PrepaymentScenario> {
    if lump_sum.is_negative() {
        return Err(FinanceError::scenario(format!(
            "prepayment must not be negative, got {lump_sum}"
        )));
    }

    let terms = &loan.terms;
    let original_total_payment = loan.total_payable();
    let remaining_principal = terms.principal - lump_sum;

    if !remaining_principal.is_positive() {
        warn!(loan = %loan.name, %lump_sum, "prepayment clears the loan outright");
        return Ok(PrepaymentScenario {
            revised_term_months: 0,
            revised_monthly_payment: Money::ZERO,
            interest_saved: loan.total_interest,
            months_saved: terms.term_months,
            total_saved: original_total_payment - lump_sum,
        });
    }

    let revised_term_months = terms
        .term_months
        .checked_sub(payoff_acceleration_months)
        .filter(|months| *months >= 1)
        .ok_or_else(|| {
            FinanceError::scenario(format!(
                "cannot shorten a {}-month loan by {} months",
                terms.term_months, payoff_acceleration_months
            ))
        })?;

    let revised_monthly_payment =
        monthly_payment(remaining_principal, terms.annual_rate, revised_term_months)?;
    let new_total_payment = lump_sum + revised_monthly_payment.times(revised_term_months);
    let new_interest = new_total_payment - terms.principal;

    let scenario = PrepaymentScenario {
        revised_term_months,
        revised_monthly_payment,
        interest_saved: loan.total_interest - new_interest,
        months_saved: payoff_acceleration_months,
        total_saved: original_total_payment - new_total_payment,
    };

    debug!(
        loan = %loan.name,
        %lump_sum,
        revised_term_months,
        revised_payment = %scenario.revised_monthly_payment,
        interest_saved = %scenario.interest_saved,
        "prepayment scenario computed"
    );

    Ok(scenario)
}

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dates::add_months;
use crate::decimal::{compound_factor, Money, Rate};
use crate::errors::{FinanceError, Result};

/// immutable terms of a fixed-payment loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
    pub start_date: NaiveDate,
}

impl LoanTerms {
    /// validate and build loan terms
    pub fn new(
        principal: Money,
        annual_rate: Rate,
        term_months: u32,
        start_date: NaiveDate,
    ) -> Result<Self> {
        let terms = Self {
            principal,
            annual_rate,
            term_months,
            start_date,
        };
        terms.validate()?;
        Ok(terms)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(FinanceError::loan_terms(format!(
                "principal must be positive, got {}",
                self.principal
            )));
        }
        if self.annual_rate.is_negative() {
            return Err(FinanceError::loan_terms(format!(
                "interest rate must not be negative, got {}",
                self.annual_rate
            )));
        }
        if self.term_months < 1 {
            return Err(FinanceError::loan_terms("term must be at least one month"));
        }
        Ok(())
    }

    pub fn monthly_rate(&self) -> Decimal {
        self.annual_rate.monthly_rate().as_decimal()
    }

    /// date the final payment period closes (start + term calendar months)
    pub fn payoff_date(&self) -> Result<NaiveDate> {
        add_months(self.start_date, self.term_months)
    }

    /// generate the full payment schedule
    pub fn amortize(&self) -> Result<AmortizationResult> {
        self.validate()?;
        AmortizationCalculator::new(*self).calculate()
    }
}

/// one row of the payment schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentScheduleEntry {
    /// 1-based payment number
    pub month_index: u32,
    pub date: NaiveDate,
    pub payment_amount: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub remaining_balance: Money,
    pub cumulative_interest: Money,
}

/// amortization schedule and headline totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationResult {
    pub schedule: Vec<PaymentScheduleEntry>,
    pub monthly_payment: Money,
    pub total_interest: Money,
}

impl AmortizationResult {
    /// sum of every scheduled payment
    pub fn total_payment(&self) -> Money {
        self.schedule.iter().map(|e| e.payment_amount).sum()
    }

    /// get payment for specific period
    pub fn entry(&self, month_index: u32) -> Option<&PaymentScheduleEntry> {
        month_index
            .checked_sub(1)
            .and_then(|i| self.schedule.get(i as usize))
    }

    /// remaining balance after the given 1-based payment
    pub fn balance_after(&self, month_index: u32) -> Option<Money> {
        self.entry(month_index).map(|e| e.remaining_balance)
    }

    /// date of the final scheduled payment
    pub fn last_payment_date(&self) -> Option<NaiveDate> {
        self.schedule.last().map(|e| e.date)
    }
}

/// computes equal-installment schedules
pub struct AmortizationCalculator {
    terms: LoanTerms,
}

impl AmortizationCalculator {
    pub fn new(terms: LoanTerms) -> Self {
        Self { terms }
    }

    /// calculate full amortization schedule
    pub fn calculate(&self) -> Result<AmortizationResult> {
        let terms = &self.terms;
        let monthly_rate = terms.monthly_rate();
        let payment = monthly_payment(terms.principal, terms.annual_rate, terms.term_months)?;

        let mut schedule = Vec::with_capacity(terms.term_months as usize);
        let mut balance = terms.principal;
        let mut cumulative_interest = Money::ZERO;

        for month_index in 1..=terms.term_months {
            let date = add_months(terms.start_date, month_index - 1)?;
            let interest_portion = balance * monthly_rate;
            let principal_portion = payment - interest_portion;

            cumulative_interest += interest_portion;
            balance = (balance - principal_portion).max(Money::ZERO);

            schedule.push(PaymentScheduleEntry {
                month_index,
                date,
                payment_amount: payment,
                principal_portion,
                interest_portion,
                remaining_balance: balance,
                cumulative_interest,
            });
        }

        // fold sub-cent rounding residue into the final payment
        if let Some(last) = schedule.last_mut() {
            if last.remaining_balance.is_positive() && last.remaining_balance < Money::CENT {
                last.principal_portion += last.remaining_balance;
                last.payment_amount += last.remaining_balance;
                last.remaining_balance = Money::ZERO;
            }
        }

        debug!(
            principal = %terms.principal,
            rate = %terms.annual_rate,
            term_months = terms.term_months,
            monthly_payment = %payment,
            total_interest = %cumulative_interest,
            "amortization schedule generated"
        );

        Ok(AmortizationResult {
            schedule,
            monthly_payment: payment,
            total_interest: cumulative_interest,
        })
    }
}

/// compute a full amortization schedule from plain inputs
pub fn compute_amortization(
    principal: Money,
    annual_rate: Rate,
    term_months: u32,
    start_date: NaiveDate,
) -> Result<AmortizationResult> {
    LoanTerms::new(principal, annual_rate, term_months, start_date)?.amortize()
}

/// fixed monthly payment (EMI) for a fully amortizing loan
///
/// `payment = P * r * (1 + r)^n / ((1 + r)^n - 1)`, or `P / n` when the rate is zero.
pub fn monthly_payment(principal: Money, annual_rate: Rate, months: u32) -> Result<Money> {
    if months == 0 {
        return Err(FinanceError::loan_terms("term must be at least one month"));
    }

    let r = annual_rate.monthly_rate().as_decimal();
    if r.is_zero() {
        return Ok(principal / Decimal::from(months));
    }

    let compound = compound_factor(r, months)?;
    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        // rate too small to register over this many periods
        return Ok(principal / Decimal::from(months));
    }

    let numerator = principal.checked_mul(r)?.checked_mul(compound)?;
    Ok(numerator / denominator)
}

/// serialization support for loan schedules
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::loans::{AmortizationResult, Loan, PaymentScheduleEntry};
use crate::types::LoanId;

/// serializable view of a loan and its full payment schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleView {
    pub loan_id: LoanId,
    pub loan_name: String,
    pub principal: Money,
    pub interest_rate: Rate,
    pub term_months: u32,
    pub start_date: NaiveDate,
    pub payoff_date: NaiveDate,
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub total_payment: Money,
    pub schedule: Vec<PaymentScheduleEntry>,
}

impl ScheduleView {
    pub fn from_loan(loan: &Loan) -> Result<Self> {
        let result = loan.schedule()?;
        Self::from_parts(loan, result)
    }

    fn from_parts(loan: &Loan, result: AmortizationResult) -> Result<Self> {
        Ok(ScheduleView {
            loan_id: loan.id,
            loan_name: loan.name.clone(),
            principal: loan.principal(),
            interest_rate: loan.interest_rate(),
            term_months: loan.term_months(),
            start_date: loan.start_date(),
            payoff_date: loan.payoff_date()?,
            total_payment: result.total_payment(),
            monthly_payment: result.monthly_payment,
            total_interest: result.total_interest,
            schedule: result.schedule,
        })
    }

    /// copy with every amount rounded to cents for display
    pub fn rounded(&self) -> Self {
        let round = |m: Money| m.round_dp(2);
        ScheduleView {
            principal: round(self.principal),
            monthly_payment: round(self.monthly_payment),
            total_interest: round(self.total_interest),
            total_payment: round(self.total_payment),
            schedule: self
                .schedule
                .iter()
                .map(|e| PaymentScheduleEntry {
                    payment_amount: round(e.payment_amount),
                    principal_portion: round(e.principal_portion),
                    interest_portion: round(e.interest_portion),
                    remaining_balance: round(e.remaining_balance),
                    cumulative_interest: round(e.cumulative_interest),
                    ..e.clone()
                })
                .collect(),
            ..self.clone()
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

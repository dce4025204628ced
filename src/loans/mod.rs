pub mod amortization;
pub mod prepayment;
pub mod progress;
pub mod timeline;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::dates::parse_iso_date;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::types::{LoanId, LoanStatus, LoanType};

pub use amortization::{
    compute_amortization, monthly_payment, AmortizationCalculator, AmortizationResult, LoanTerms,
    PaymentScheduleEntry,
};
pub use prepayment::{compute_prepayment_scenario, PrepaymentScenario};
pub use progress::{remaining_balance_after, LoanProgress, PortfolioProgress};
pub use timeline::{build_payoff_timeline, LoanTimelineValue, TimelinePoint};

/// a stored loan with its precomputed payment and interest totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: LoanId,
    pub name: String,
    pub loan_type: LoanType,
    pub terms: LoanTerms,
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub status: LoanStatus,
}

impl Loan {
    /// build a loan, deriving payment and total interest unless the lender's payment is known
    ///
    /// When `stated_payment` is given it is kept as-is and total interest is
    /// estimated as `payment * term - principal`; otherwise both come from the
    /// amortization schedule.
    pub fn from_terms(
        name: impl Into<String>,
        loan_type: LoanType,
        terms: LoanTerms,
        stated_payment: Option<Money>,
    ) -> Result<Self> {
        terms.validate()?;

        let (monthly_payment, total_interest) = match stated_payment {
            Some(payment) if payment.is_positive() => {
                (payment, payment.times(terms.term_months) - terms.principal)
            }
            _ => {
                let result = terms.amortize()?;
                (result.monthly_payment, result.total_interest)
            }
        };

        let loan = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            loan_type,
            terms,
            monthly_payment,
            total_interest,
            status: LoanStatus::Active,
        };

        debug!(loan = %loan.name, payment = %loan.monthly_payment, "loan terms resolved");

        Ok(loan)
    }

    /// build a loan from the raw REAL/INTEGER/TEXT columns of a persisted row
    pub fn from_row(row: &LoanRow) -> Result<Self> {
        let terms = LoanTerms::new(
            Money::from_f64(row.principal_amount)?,
            Rate::from_percent_f64(row.interest_rate)?,
            row.loan_term_months,
            parse_iso_date(&row.start_date)?,
        )?;
        let stated_payment = row.monthly_payment.map(Money::from_f64).transpose()?;
        Self::from_terms(row.loan_name.clone(), row.loan_type, terms, stated_payment)
    }

    pub fn with_status(mut self, status: LoanStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == LoanStatus::Active
    }

    pub fn principal(&self) -> Money {
        self.terms.principal
    }

    pub fn interest_rate(&self) -> Rate {
        self.terms.annual_rate
    }

    pub fn term_months(&self) -> u32 {
        self.terms.term_months
    }

    pub fn start_date(&self) -> NaiveDate {
        self.terms.start_date
    }

    /// start date plus the full term in calendar months
    pub fn payoff_date(&self) -> Result<NaiveDate> {
        self.terms.payoff_date()
    }

    /// every payment over the life of the loan
    pub fn total_payable(&self) -> Money {
        self.monthly_payment.times(self.terms.term_months)
    }

    /// full schedule regenerated from the stored terms
    pub fn schedule(&self) -> Result<AmortizationResult> {
        self.terms.amortize()
    }
}

/// loan columns as handed over by the persistence layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRow {
    pub loan_name: String,
    pub loan_type: LoanType,
    pub principal_amount: f64,
    pub interest_rate: f64,
    pub loan_term_months: u32,
    pub start_date: String,
    #[serde(default)]
    pub monthly_payment: Option<f64>,
}

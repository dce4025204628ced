use serde::{Deserialize, Serialize};

use crate::config::TimelineConfig;
use crate::decimal::Money;
use crate::errors::Result;
use crate::types::LoanId;

use super::progress::remaining_balance_after;
use super::Loan;

/// per-loan values at one sampled month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTimelineValue {
    pub loan_id: LoanId,
    pub name: String,
    pub remaining_balance: Money,
    pub total_paid: Money,
    pub interest_paid: Money,
}

/// one sampled month of the payoff chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    /// months from the start of repayment
    pub month: u32,
    pub year: u32,
    /// e.g. `2y 3m`
    pub label: String,
    pub loans: Vec<LoanTimelineValue>,
}

impl TimelinePoint {
    pub fn total_remaining(&self) -> Money {
        self.loans.iter().map(|l| l.remaining_balance).sum()
    }
}

/// sample every loan's balance from month 0 to the longest term
///
/// Sampling is monthly for short horizons and coarser for long ones (see
/// [`TimelineConfig::step_for`]); the final month is always included so the
/// chart ends at zero.
pub fn build_payoff_timeline(loans: &[Loan], config: &TimelineConfig) -> Result<Vec<TimelinePoint>> {
    let max_term = loans.iter().map(Loan::term_months).max().unwrap_or(0);
    if loans.is_empty() {
        return Ok(Vec::new());
    }

    let step = config.step_for(max_term) as usize;
    let mut months: Vec<u32> = (0..=max_term).step_by(step).collect();
    if months.last() != Some(&max_term) {
        months.push(max_term);
    }

    months
        .into_iter()
        .map(|month| {
            let values = loans
                .iter()
                .map(|loan| loan_value_at(loan, month))
                .collect::<Result<Vec<_>>>()?;
            Ok(TimelinePoint {
                month,
                year: month / 12,
                label: format!("{}y {}m", month / 12, month % 12),
                loans: values,
            })
        })
        .collect()
}

fn loan_value_at(loan: &Loan, month: u32) -> Result<LoanTimelineValue> {
    let (remaining_balance, total_paid, interest_paid) = if month < loan.term_months() {
        let balance = remaining_balance_after(loan, month)?;
        let paid = loan.monthly_payment.times(month);
        (balance, paid, paid - (loan.principal() - balance))
    } else {
        let paid = loan.total_payable();
        (Money::ZERO, paid, paid - loan.principal())
    };

    Ok(LoanTimelineValue {
        loan_id: loan.id,
        name: loan.name.clone(),
        remaining_balance,
        total_paid,
        interest_paid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::loans::LoanTerms;
    use crate::types::LoanType;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn loan(name: &str, principal: i64, term: u32) -> Loan {
        let terms = LoanTerms::new(
            Money::from_major(principal),
            Rate::from_percent(dec!(10)),
            term,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )
        .unwrap();
        Loan::from_terms(name, LoanType::Personal, terms, None).unwrap()
    }

    #[test]
    fn test_empty_timeline() {
        assert!(build_payoff_timeline(&[], &TimelineConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn test_short_timeline_is_monthly() {
        let loans = vec![loan("Phone", 30_000, 12), loan("Bike", 90_000, 24)];
        let points = build_payoff_timeline(&loans, &TimelineConfig::default()).unwrap();

        assert_eq!(points.len(), 25);
        assert_eq!(points[0].month, 0);
        assert_eq!(points[0].total_remaining().round_dp(4), Money::from_major(120_000));
        assert_eq!(points[13].label, "1y 1m");

        // the shorter loan stays at zero once repaid
        let after_phone = &points[12].loans[0];
        assert_eq!(after_phone.remaining_balance, Money::ZERO);
        assert_eq!(after_phone.total_paid, loans[0].total_payable());

        assert_eq!(points.last().unwrap().total_remaining(), Money::ZERO);
    }

    #[test]
    fn test_long_timeline_sampling_includes_final_month() {
        let loans = vec![loan("Home", 2_000_000, 100)];
        let points = build_payoff_timeline(&loans, &TimelineConfig::default()).unwrap();

        let months: Vec<u32> = points.iter().map(|p| p.month).collect();
        assert_eq!(months[..3], [0, 3, 6]);
        assert_eq!(*months.last().unwrap(), 100);
        assert_eq!(months.len(), 35);
    }

    #[test]
    fn test_balances_decline() {
        let loans = vec![loan("Car", 600_000, 60)];
        let points = build_payoff_timeline(&loans, &TimelineConfig::default()).unwrap();
        for pair in points.windows(2) {
            assert!(pair[1].loans[0].remaining_balance < pair[0].loans[0].remaining_balance);
            assert!(pair[1].loans[0].interest_paid >= pair[0].loans[0].interest_paid);
        }
    }
}

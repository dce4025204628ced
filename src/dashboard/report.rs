/// serializable analytics response for the dashboard
use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::AdvisorConfig;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::loans::Loan;
use crate::types::{LoanId, LoanType};

use super::{build_dashboard_summary_with, DashboardSummary, Recommendation};

/// full analytics payload: headline summary, per-loan overview and advice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub summary: SummaryView,
    pub loans: Vec<LoanOverview>,
    pub recommendations: Vec<Recommendation>,
}

/// headline figures without the recommendation list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub total_loans: usize,
    pub total_principal: Money,
    pub total_interest: Money,
    pub total_debt: Money,
    pub monthly_payments: Money,
    pub total_income: Money,
    pub available_after_loans: Money,
    pub debt_to_income_ratio: Decimal,
    pub all_loans_cleared_by: NaiveDate,
    pub months_remaining: u32,
    pub years_remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanOverview {
    pub id: LoanId,
    pub name: String,
    #[serde(rename = "type")]
    pub loan_type: LoanType,
    pub principal: Money,
    pub interest: Money,
    pub monthly_payment: Money,
    /// term in months
    pub tenure: u32,
    pub interest_rate: Rate,
    pub cleared_by: NaiveDate,
}

impl SummaryView {
    pub fn from_summary(summary: &DashboardSummary) -> Self {
        SummaryView {
            total_loans: summary.loan_count,
            total_principal: summary.total_principal,
            total_interest: summary.total_interest,
            total_debt: summary.total_debt,
            monthly_payments: summary.monthly_payments,
            total_income: summary.total_income,
            available_after_loans: summary.available_after_loans,
            debt_to_income_ratio: summary.debt_to_income_ratio_percent,
            all_loans_cleared_by: summary.all_loans_cleared_by,
            months_remaining: summary.months_remaining,
            years_remaining: summary.years_remaining,
        }
    }
}

impl LoanOverview {
    pub fn from_loan(loan: &Loan) -> Result<Self> {
        Ok(LoanOverview {
            id: loan.id,
            name: loan.name.clone(),
            loan_type: loan.loan_type,
            principal: loan.principal(),
            interest: loan.total_interest,
            monthly_payment: loan.monthly_payment,
            tenure: loan.term_months(),
            interest_rate: loan.interest_rate(),
            cleared_by: loan.payoff_date()?,
        })
    }
}

impl DashboardReport {
    pub fn from_summary(summary: DashboardSummary, active_loans: &[Loan]) -> Result<Self> {
        let loans = active_loans
            .iter()
            .map(LoanOverview::from_loan)
            .collect::<Result<Vec<_>>>()?;
        Ok(DashboardReport {
            summary: SummaryView::from_summary(&summary),
            loans,
            recommendations: summary.recommendations,
        })
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// build the analytics payload from every stored loan; closed loans are left out
pub fn build_dashboard_report(
    loans: &[Loan],
    total_income: Money,
    time_provider: &SafeTimeProvider,
    config: &AdvisorConfig,
) -> Result<DashboardReport> {
    let active: Vec<Loan> = loans.iter().filter(|l| l.is_active()).cloned().collect();
    let summary = build_dashboard_summary_with(&active, total_income, time_provider, config)?;
    DashboardReport::from_summary(summary, &active)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loans::LoanTerms;
    use crate::types::LoanStatus;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;
    use serde_json::Value;

    fn loans() -> Vec<Loan> {
        let start = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let home = LoanTerms::new(Money::from_major(500_000), Rate::from_percent(dec!(8.5)), 60, start)
            .unwrap();
        let card = LoanTerms::new(Money::from_major(40_000), Rate::from_percent(dec!(18)), 13, start)
            .unwrap();
        vec![
            Loan::from_terms("Home", LoanType::Home, home, None).unwrap(),
            Loan::from_terms("Card", LoanType::CreditCard, card, None).unwrap(),
            Loan::from_terms("Old car", LoanType::Car, card, None)
                .unwrap()
                .with_status(LoanStatus::Closed),
        ]
    }

    fn clock() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap()))
    }

    #[test]
    fn test_report_skips_closed_loans() {
        let report =
            build_dashboard_report(&loans(), Money::from_major(60_000), &clock(), &AdvisorConfig::default())
                .unwrap();

        assert_eq!(report.summary.total_loans, 2);
        assert_eq!(report.loans.len(), 2);
        assert_eq!(report.loans[0].name, "Home");
        assert_eq!(report.loans[0].cleared_by, NaiveDate::from_ymd_opt(2030, 1, 31).unwrap());
        // Jan 31 + 13 months clamps to the end of February
        assert_eq!(report.loans[1].cleared_by, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
        assert_eq!(report.summary.all_loans_cleared_by, report.loans[0].cleared_by);
        assert!(!report.recommendations.is_empty());
    }

    #[test]
    fn test_report_json_shape() {
        let report =
            build_dashboard_report(&loans(), Money::from_major(60_000), &clock(), &AdvisorConfig::default())
                .unwrap();
        let json: Value = serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();

        assert_eq!(json["summary"]["totalLoans"], 2);
        assert_eq!(json["summary"]["allLoansClearedBy"], "2030-01-31");
        assert!(json["summary"]["debtToIncomeRatio"].is_number());
        assert_eq!(json["loans"][1]["type"], "credit_card");
        assert_eq!(json["loans"][1]["tenure"], 13);
        assert_eq!(json["loans"][0]["clearedBy"], "2030-01-31");
        assert_eq!(json["recommendations"][0]["type"], "success");
        assert!(json["summary"].get("recommendations").is_none());
    }
}

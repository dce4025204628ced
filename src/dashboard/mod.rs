pub mod recommendations;
pub mod report;

/// dashboard aggregation over a user's active loans
use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AdvisorConfig;
use crate::dates::{months_between, today};
use crate::decimal::Money;
use crate::errors::Result;
use crate::loans::Loan;

pub use recommendations::{payoff_order, Recommendation, RecommendationRule};
pub use report::{build_dashboard_report, DashboardReport, LoanOverview, SummaryView};

use recommendations::{recommend, AdvisorInputs};

/// totals, payoff horizon and advice across the active loans
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub loan_count: usize,
    pub total_principal: Money,
    pub total_interest: Money,
    /// principal plus interest
    pub total_debt: Money,
    pub monthly_payments: Money,
    pub total_income: Money,
    pub available_after_loans: Money,
    /// monthly payments as a percent of income, 0 without income
    pub debt_to_income_ratio_percent: Decimal,
    /// latest payoff date, never earlier than today
    pub all_loans_cleared_by: NaiveDate,
    pub months_remaining: u32,
    pub years_remaining: u32,
    pub recommendations: Vec<Recommendation>,
}

impl DashboardSummary {
    pub fn is_debt_free(&self) -> bool {
        self.loan_count == 0 || self.months_remaining == 0
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Recommendation> {
        self.recommendations
            .iter()
            .filter(|r| r.kind == crate::types::RecommendationKind::Warning)
    }
}

/// aggregate active loans against monthly income with the default thresholds
pub fn build_dashboard_summary(
    active_loans: &[Loan],
    total_income: Money,
    time_provider: &SafeTimeProvider,
) -> Result<DashboardSummary> {
    build_dashboard_summary_with(active_loans, total_income, time_provider, &AdvisorConfig::default())
}

/// aggregate active loans against monthly income
///
/// Sums the totals stored on each loan; schedules are never regenerated.
pub fn build_dashboard_summary_with(
    active_loans: &[Loan],
    total_income: Money,
    time_provider: &SafeTimeProvider,
    config: &AdvisorConfig,
) -> Result<DashboardSummary> {
    let today = today(time_provider);

    let total_principal: Money = active_loans.iter().map(Loan::principal).sum();
    let total_interest: Money = active_loans.iter().map(|l| l.total_interest).sum();
    let monthly_payments: Money = active_loans.iter().map(|l| l.monthly_payment).sum();

    if !total_income.is_positive() {
        warn!(%total_income, "no income recorded, debt-to-income ratio reported as 0");
    }
    let available_after_loans = total_income - monthly_payments;
    let debt_to_income_ratio_percent = monthly_payments.percent_of(total_income);

    let mut all_loans_cleared_by = today;
    for loan in active_loans {
        all_loans_cleared_by = all_loans_cleared_by.max(loan.payoff_date()?);
    }
    let months_remaining =
        u32::try_from(months_between(today, all_loans_cleared_by).max(0)).unwrap_or(u32::MAX);

    let recommendations = recommend(
        &AdvisorInputs {
            loans: active_loans,
            total_income,
            available_after_loans,
            debt_to_income_percent: debt_to_income_ratio_percent,
        },
        config,
    );

    debug!(
        loans = active_loans.len(),
        %monthly_payments,
        dti = %debt_to_income_ratio_percent,
        %all_loans_cleared_by,
        recommendations = recommendations.len(),
        "dashboard summary built"
    );

    Ok(DashboardSummary {
        loan_count: active_loans.len(),
        total_principal,
        total_interest,
        total_debt: total_principal + total_interest,
        monthly_payments,
        total_income,
        available_after_loans,
        debt_to_income_ratio_percent,
        all_loans_cleared_by,
        months_remaining,
        years_remaining: months_remaining.div_ceil(12),
        recommendations,
    })
}

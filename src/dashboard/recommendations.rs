use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::AdvisorConfig;
use crate::decimal::Money;
use crate::loans::Loan;
use crate::types::RecommendationKind;

/// rule that produced a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationRule {
    HighDebtToIncome,
    AboveIdealDebtToIncome,
    LowResidualIncome,
    HealthyResidualIncome,
    PayoffPriority,
    PayoffOrder,
    EmergencyFund,
}

/// one advisory message on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub rule: RecommendationRule,
    pub message: String,
}

impl Recommendation {
    fn new(kind: RecommendationKind, rule: RecommendationRule, message: String) -> Self {
        Self { kind, rule, message }
    }
}

/// inputs the recommendation rules look at
pub(crate) struct AdvisorInputs<'a> {
    pub loans: &'a [Loan],
    pub total_income: Money,
    pub available_after_loans: Money,
    pub debt_to_income_percent: Decimal,
}

/// evaluate every rule in its fixed order
pub(crate) fn recommend(inputs: &AdvisorInputs<'_>, config: &AdvisorConfig) -> Vec<Recommendation> {
    let mut out = Vec::new();

    if inputs.debt_to_income_percent > config.dti_high_percent {
        out.push(Recommendation::new(
            RecommendationKind::Warning,
            RecommendationRule::HighDebtToIncome,
            format!(
                "Your debt-to-income ratio is high (>{}%). Consider reducing expenses or increasing income.",
                config.dti_high_percent.normalize()
            ),
        ));
    } else if inputs.debt_to_income_percent > config.dti_ideal_percent {
        out.push(Recommendation::new(
            RecommendationKind::Warning,
            RecommendationRule::AboveIdealDebtToIncome,
            format!(
                "DTI ratio is above ideal ({}%). Monitor your debt levels closely.",
                config.dti_ideal_percent.normalize()
            ),
        ));
    }

    if inputs.available_after_loans < inputs.total_income * config.low_residual_share {
        out.push(Recommendation::new(
            RecommendationKind::Warning,
            RecommendationRule::LowResidualIncome,
            format!(
                "Less than {}% of income remains after loan payments. Budget carefully and avoid new debt.",
                (config.low_residual_share * Decimal::ONE_HUNDRED).normalize()
            ),
        ));
    }

    if inputs.available_after_loans > inputs.total_income * config.healthy_residual_share {
        out.push(Recommendation::new(
            RecommendationKind::Success,
            RecommendationRule::HealthyResidualIncome,
            "Good financial health! Consider extra payments to clear loans faster and save on interest."
                .to_string(),
        ));
    }

    if inputs.loans.len() > 1 {
        let order = payoff_order(inputs.loans);
        let first = order[0];
        out.push(Recommendation::new(
            RecommendationKind::Info,
            RecommendationRule::PayoffPriority,
            format!(
                "Priority: Focus on \"{}\" first (highest interest: {}). Pay minimum on others.",
                first.name,
                first.interest_rate()
            ),
        ));

        let listing = order
            .iter()
            .enumerate()
            .map(|(i, loan)| format!("{}. {} ({})", i + 1, loan.name, loan.interest_rate()))
            .collect::<Vec<_>>()
            .join(", ");
        out.push(Recommendation::new(
            RecommendationKind::Info,
            RecommendationRule::PayoffOrder,
            format!("Recommended payoff order: {listing}"),
        ));
    }

    let target = inputs.total_income.times(config.emergency_fund_months);
    out.push(Recommendation::new(
        RecommendationKind::Info,
        RecommendationRule::EmergencyFund,
        format!(
            "Emergency Fund Target: Build {} ({} months of income) before aggressive loan payoff.",
            target, config.emergency_fund_months
        ),
    ));

    out
}

/// loans ordered by interest rate, highest first; equal rates keep their input order
pub fn payoff_order(loans: &[Loan]) -> Vec<&Loan> {
    let mut ordered: Vec<&Loan> = loans.iter().collect();
    // sort_by is stable
    ordered.sort_by(|a, b| b.interest_rate().cmp(&a.interest_rate()));
    ordered
}

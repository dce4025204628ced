/// monthly income and outgoings records
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::decimal::Money;
use crate::errors::{FinanceError, Result};
use rust_decimal::Decimal;

/// one month of income and planned outgoings, loan payments excluded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBudget {
    pub salary: Money,
    #[serde(default)]
    pub other_income: Money,
    #[serde(default)]
    pub other_expenses: Money,
    #[serde(default)]
    pub investments: Money,
    #[serde(default)]
    pub emergency_fund: Money,
}

/// derived totals for a monthly record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRecordSummary {
    pub total_income: Money,
    pub total_loan_payment: Money,
    /// income less loans, expenses, investments and the emergency fund, so
    /// lower than the dashboard's `available_after_loans`; negative when overspent
    pub savings: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetCategory {
    Loans,
    Expenses,
    Investments,
    EmergencyFund,
    Savings,
}

/// one slice of the income breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetShare {
    pub category: BudgetCategory,
    pub amount: Money,
    pub percent_of_income: Decimal,
}

impl MonthlyBudget {
    /// a budget with the monthly investment total already filled in
    pub fn prefilled(salary: Money, other_income: Money, monthly_investment_total: Money) -> Self {
        Self {
            salary,
            other_income,
            investments: monthly_investment_total,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("salary", self.salary),
            ("other_income", self.other_income),
            ("other_expenses", self.other_expenses),
            ("investments", self.investments),
            ("emergency_fund", self.emergency_fund),
        ] {
            if value.is_negative() {
                return Err(FinanceError::InvalidAmount {
                    field: field.to_string(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn total_income(&self) -> Money {
        self.salary + self.other_income
    }

    /// totals for the month given what the active loans cost
    pub fn summarize(&self, total_loan_payment: Money) -> Result<MonthlyRecordSummary> {
        self.validate()?;
        let total_income = self.total_income();
        let savings = total_income
            - total_loan_payment
            - self.other_expenses
            - self.investments
            - self.emergency_fund;

        if savings.is_negative() {
            warn!(%total_income, %savings, "monthly outgoings exceed income");
        }

        Ok(MonthlyRecordSummary {
            total_income,
            total_loan_payment,
            savings,
        })
    }

    /// share of income going to each non-empty category; empty without income
    pub fn breakdown(&self, total_loan_payment: Money) -> Result<Vec<BudgetShare>> {
        let summary = self.summarize(total_loan_payment)?;
        Ok(income_shares(
            summary.total_income,
            [
                (BudgetCategory::Loans, total_loan_payment),
                (BudgetCategory::Expenses, self.other_expenses),
                (BudgetCategory::Investments, self.investments),
                (BudgetCategory::EmergencyFund, self.emergency_fund),
                (BudgetCategory::Savings, summary.savings),
            ],
        ))
    }
}

fn income_shares(total_income: Money, amounts: [(BudgetCategory, Money); 5]) -> Vec<BudgetShare> {
    if !total_income.is_positive() {
        return Vec::new();
    }
    amounts
        .into_iter()
        .filter(|(_, amount)| amount.is_positive())
        .map(|(category, amount)| BudgetShare {
            category,
            amount,
            percent_of_income: amount.percent_of(total_income),
        })
        .collect()
}

/// a saved month: the budget as entered plus its derived totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRecord {
    pub year: i32,
    /// 1 to 12
    pub month: u32,
    pub budget: MonthlyBudget,
    pub summary: MonthlyRecordSummary,
}

impl MonthlyRecord {
    pub fn new(year: i32, month: u32, budget: MonthlyBudget, total_loan_payment: Money) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(FinanceError::InvalidDate {
                message: format!("month {month} is not between 1 and 12"),
            });
        }
        let summary = budget.summarize(total_loan_payment)?;
        Ok(Self {
            year,
            month,
            budget,
            summary,
        })
    }
}

/// totals over the records of one year, or one month of it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PeriodTotals {
    pub record_count: usize,
    pub total_income: Money,
    pub total_loan_payments: Money,
    pub total_expenses: Money,
    pub total_investments: Money,
    pub total_emergency_fund: Money,
    pub total_savings: Money,
}

impl PeriodTotals {
    /// sum the records of `year`, restricted to `month` when given
    pub fn compute(records: &[MonthlyRecord], year: i32, month: Option<u32>) -> Self {
        records
            .iter()
            .filter(|r| r.year == year && month.map_or(true, |m| r.month == m))
            .fold(Self::default(), |mut totals, r| {
                totals.record_count += 1;
                totals.total_income += r.summary.total_income;
                totals.total_loan_payments += r.summary.total_loan_payment;
                totals.total_expenses += r.budget.other_expenses;
                totals.total_investments += r.budget.investments;
                totals.total_emergency_fund += r.budget.emergency_fund;
                totals.total_savings += r.summary.savings;
                totals
            })
    }

    /// share of the period's income per non-empty category
    pub fn breakdown(&self) -> Vec<BudgetShare> {
        if self.record_count == 0 {
            return Vec::new();
        }
        income_shares(
            self.total_income,
            [
                (BudgetCategory::Loans, self.total_loan_payments),
                (BudgetCategory::Expenses, self.total_expenses),
                (BudgetCategory::Investments, self.total_investments),
                (BudgetCategory::EmergencyFund, self.total_emergency_fund),
                (BudgetCategory::Savings, self.total_savings),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn budget() -> MonthlyBudget {
        MonthlyBudget {
            salary: Money::from_major(90_000),
            other_income: Money::from_major(10_000),
            other_expenses: Money::from_major(25_000),
            investments: Money::from_major(15_000),
            emergency_fund: Money::from_major(5_000),
        }
    }

    #[test]
    fn test_savings_subtract_every_outgoing() {
        let summary = budget().summarize(Money::from_major(30_000)).unwrap();
        assert_eq!(
            summary,
            MonthlyRecordSummary {
                total_income: Money::from_major(100_000),
                total_loan_payment: Money::from_major(30_000),
                savings: Money::from_major(25_000),
            }
        );
    }

    #[test]
    fn test_overspending_gives_negative_savings() {
        let summary = budget().summarize(Money::from_major(60_000)).unwrap();
        assert_eq!(summary.savings, Money::from_major(-5_000));
    }

    #[test]
    fn test_prefilled_carries_investment_total() {
        let budget =
            MonthlyBudget::prefilled(Money::from_major(80_000), Money::ZERO, Money::from_major(12_500));
        assert_eq!(budget.investments, Money::from_major(12_500));
        assert_eq!(budget.other_expenses, Money::ZERO);
        assert_eq!(
            budget.summarize(Money::ZERO).unwrap().savings,
            Money::from_major(67_500)
        );
    }

    #[test]
    fn test_breakdown_percentages() {
        let shares = budget().breakdown(Money::from_major(30_000)).unwrap();
        let percents: Vec<(BudgetCategory, Decimal)> =
            shares.iter().map(|s| (s.category, s.percent_of_income)).collect();
        assert_eq!(
            percents,
            vec![
                (BudgetCategory::Loans, dec!(30)),
                (BudgetCategory::Expenses, dec!(25)),
                (BudgetCategory::Investments, dec!(15)),
                (BudgetCategory::EmergencyFund, dec!(5)),
                (BudgetCategory::Savings, dec!(25)),
            ]
        );
    }

    #[test]
    fn test_breakdown_without_income() {
        let empty = MonthlyBudget::default().breakdown(Money::from_major(1_000)).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_rejects_negative_amounts() {
        let budget = MonthlyBudget {
            other_expenses: Money::from_major(-1),
            ..budget()
        };
        let err = budget.summarize(Money::ZERO).unwrap_err();
        assert!(matches!(err, FinanceError::InvalidAmount { ref field, .. } if field == "other_expenses"));
    }

    fn record(year: i32, month: u32, salary: i64, loans: i64) -> MonthlyRecord {
        let budget = MonthlyBudget {
            salary: Money::from_major(salary),
            ..budget()
        };
        MonthlyRecord::new(year, month, budget, Money::from_major(loans)).unwrap()
    }

    #[test]
    fn test_period_totals_for_year_and_month() {
        let records = vec![
            record(2026, 1, 90_000, 30_000),
            record(2026, 2, 110_000, 30_000),
            record(2025, 12, 90_000, 30_000),
        ];

        let year = PeriodTotals::compute(&records, 2026, None);
        assert_eq!(
            year,
            PeriodTotals {
                record_count: 2,
                total_income: Money::from_major(220_000),
                total_loan_payments: Money::from_major(60_000),
                total_expenses: Money::from_major(50_000),
                total_investments: Money::from_major(30_000),
                total_emergency_fund: Money::from_major(10_000),
                total_savings: Money::from_major(70_000),
            }
        );

        let february = PeriodTotals::compute(&records, 2026, Some(2));
        assert_eq!(february.record_count, 1);
        assert_eq!(february.total_savings, Money::from_major(45_000));

        assert_eq!(PeriodTotals::compute(&records, 2024, None), PeriodTotals::default());
    }

    #[test]
    fn test_period_breakdown_skips_empty_categories() {
        let budget = MonthlyBudget {
            emergency_fund: Money::ZERO,
            ..budget()
        };
        let records = vec![MonthlyRecord::new(2026, 3, budget, Money::ZERO).unwrap()];
        let categories: Vec<BudgetCategory> = PeriodTotals::compute(&records, 2026, Some(3))
            .breakdown()
            .iter()
            .map(|s| s.category)
            .collect();
        assert_eq!(
            categories,
            vec![BudgetCategory::Expenses, BudgetCategory::Investments, BudgetCategory::Savings]
        );
        assert!(PeriodTotals::default().breakdown().is_empty());
    }

    #[test]
    fn test_record_rejects_bad_month() {
        let err = MonthlyRecord::new(2026, 13, budget(), Money::ZERO).unwrap_err();
        assert!(matches!(err, FinanceError::InvalidDate { .. }));
    }

    #[test]
    fn test_missing_optional_fields_default_to_zero() {
        let budget: MonthlyBudget = serde_json::from_str(r#"{"salary": 50000}"#).unwrap();
        assert_eq!(budget.total_income(), Money::from_major(50_000));
        assert_eq!(budget.emergency_fund, Money::ZERO);
    }
}

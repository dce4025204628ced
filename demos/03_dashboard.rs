/// dashboard - analytics report, payoff timeline and a monthly budget
use chrono::{NaiveDate, TimeZone, Utc};
use personal_finance_rs::dates::today;
use personal_finance_rs::{
    build_dashboard_report, build_payoff_timeline, FinanceConfig, Loan, LoanStatus, LoanTerms,
    LoanType, Money, MonthlyBudget, PortfolioProgress, Rate, SafeTimeProvider, TimeSource,
};
use rust_decimal_macros::dec;

fn loan(
    name: &str,
    loan_type: LoanType,
    principal: i64,
    rate: rust_decimal::Decimal,
    term: u32,
    start: (i32, u32, u32),
) -> Result<Loan, Box<dyn std::error::Error>> {
    let start = NaiveDate::from_ymd_opt(start.0, start.1, start.2).ok_or("bad date")?;
    let terms = LoanTerms::new(Money::from_major(principal), Rate::from_percent(rate), term, start)?;
    Ok(Loan::from_terms(name, loan_type, terms, None)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "personal_finance_rs=info".into()),
        )
        .init();

    println!("=== dashboard example ===\n");

    let config = FinanceConfig::from_json(r#"{ "advisor": {
        "dti_high_percent": 43, "dti_ideal_percent": 36,
        "low_residual_share": 0.2, "healthy_residual_share": 0.5,
        "emergency_fund_months": 6 } }"#)?;
    let time = SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap()));

    let loans = vec![
        loan("Home", LoanType::Home, 2_500_000, dec!(8.4), 180, (2023, 5, 10))?,
        loan("Car", LoanType::Car, 700_000, dec!(9.1), 60, (2024, 2, 1))?,
        loan("Credit card EMI", LoanType::CreditCard, 90_000, dec!(16), 12, (2026, 3, 15))?,
        loan("Old bike", LoanType::Personal, 60_000, dec!(12), 24, (2021, 1, 1))?
            .with_status(LoanStatus::Closed),
    ];
    let income = Money::from_major(150_000);

    let report = build_dashboard_report(&loans, income, &time, &config.advisor)?;
    println!("{}\n", report.to_json_pretty()?);

    let active: Vec<Loan> = loans.iter().filter(|l| l.is_active()).cloned().collect();
    let progress = PortfolioProgress::compute(&active, today(&time));
    println!(
        "paid so far {}, remaining {}, average progress {}%, debt free in {} months\n",
        progress.total_paid.round_dp(0),
        progress.total_remaining.round_dp(0),
        progress.average_progress_percent.round_dp(1),
        progress.debt_free_in_months
    );

    let timeline = build_payoff_timeline(&active, &config.timeline)?;
    for point in timeline.iter().step_by(6) {
        println!("{:>8}  outstanding {}", point.label, point.total_remaining().round_dp(0));
    }

    let budget = MonthlyBudget {
        other_expenses: Money::from_major(35_000),
        emergency_fund: Money::from_major(5_000),
        ..MonthlyBudget::prefilled(Money::from_major(140_000), Money::from_major(10_000), Money::from_major(20_000))
    };
    let month = budget.summarize(report.summary.monthly_payments)?;
    println!("\nsavings this month: {}", month.savings.round_dp(2));
    for share in budget.breakdown(report.summary.monthly_payments)? {
        println!("  {:?}: {}%", share.category, share.percent_of_income.round_dp(1));
    }

    Ok(())
}

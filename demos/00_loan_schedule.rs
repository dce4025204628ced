/// loan schedule - amortize a home loan and print the first and last payments
use chrono::NaiveDate;
use personal_finance_rs::{Loan, LoanTerms, LoanType, Money, Rate, ScheduleView};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "personal_finance_rs=debug".into()),
        )
        .init();

    println!("=== loan schedule example ===\n");

    let terms = LoanTerms::new(
        Money::from_major(500_000),
        Rate::from_percent(dec!(8.5)),
        60,
        NaiveDate::from_ymd_opt(2025, 1, 1).ok_or("bad date")?,
    )?;
    let loan = Loan::from_terms("Home renovation", LoanType::Home, terms, None)?;

    println!("monthly payment: {}", loan.monthly_payment);
    println!("total interest:  {}", loan.total_interest);
    println!("paid off on:     {}\n", loan.payoff_date()?);

    let view = ScheduleView::from_loan(&loan)?.rounded();
    let last = view.schedule.len().saturating_sub(3);
    for entry in view.schedule.iter().take(3).chain(view.schedule.iter().skip(last)) {
        println!(
            "{:>3}  {}  principal {:>10}  interest {:>9}  balance {:>11}",
            entry.month_index,
            entry.date,
            entry.principal_portion,
            entry.interest_portion,
            entry.remaining_balance
        );
    }

    // loans stored without a payment column go through the same path
    let row: personal_finance_rs::LoanRow = serde_json::from_str(
        r#"{
            "loan_name": "Car",
            "loan_type": "car",
            "principal_amount": 800000,
            "interest_rate": 9.25,
            "loan_term_months": 48,
            "start_date": "2025-06-15T00:00:00.000Z"
        }"#,
    )?;
    let car = Loan::from_row(&row)?;
    println!("\ncar loan payment: {} until {}", car.monthly_payment, car.payoff_date()?);

    Ok(())
}

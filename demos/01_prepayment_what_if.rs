/// prepayment what-if - compare lump-sum prepayments against a loan
use chrono::NaiveDate;
use personal_finance_rs::{compute_prepayment_scenario, Loan, LoanTerms, LoanType, Money, Rate};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "personal_finance_rs=info".into()),
        )
        .init();

    println!("=== prepayment what-if example ===\n");

    let terms = LoanTerms::new(
        Money::from_major(1_200_000),
        Rate::from_percent(dec!(10.5)),
        84,
        NaiveDate::from_ymd_opt(2024, 4, 1).ok_or("bad date")?,
    )?;
    let loan = Loan::from_terms("Personal loan", LoanType::Personal, terms, None)?;
    println!(
        "original: {} / month for {} months, interest {}\n",
        loan.monthly_payment,
        loan.term_months(),
        loan.total_interest
    );

    for (lump_sum, acceleration) in [(100_000, 0), (250_000, 12), (500_000, 24), (1_200_000, 0)] {
        let scenario = compute_prepayment_scenario(&loan, Money::from_major(lump_sum), acceleration)?;
        if scenario.clears_loan() {
            println!("prepay {lump_sum:>9}: loan cleared, interest saved {}", scenario.interest_saved);
            continue;
        }
        println!(
            "prepay {lump_sum:>9}, {acceleration:>2} months sooner: {} / month for {} months, interest saved {}",
            scenario.revised_monthly_payment.round_dp(2),
            scenario.revised_term_months,
            scenario.interest_saved.round_dp(2)
        );
    }

    // accelerating past the whole term is rejected
    match compute_prepayment_scenario(&loan, Money::ZERO, 84) {
        Ok(_) => println!("\nunexpected: scenario accepted"),
        Err(e) => println!("\nrejected: {e}"),
    }

    Ok(())
}

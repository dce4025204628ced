/// investments - SIP projection, ESPP gains and portfolio totals
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use personal_finance_rs::dates::today;
use personal_finance_rs::investments::shares_per_contribution;
use personal_finance_rs::{
    compute_projection, EsppHolding, Investment, InvestmentPlan, InvestmentType, Money,
    PortfolioTotals, Rate, SafeTimeProvider, TimeSource,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "personal_finance_rs=info".into()),
        )
        .init();

    println!("=== investments example ===\n");

    let projection = compute_projection(
        Money::from_major(100_000),
        Money::from_major(10_000),
        Rate::from_percent(dec!(12)),
        10,
    )?;
    println!("SIP over 10 years");
    println!("  invested:     {}", projection.total_invested);
    println!("  returns:      {}", projection.total_returns);
    println!("  future value: {}", projection.future_value);
    println!("  return:       {}%\n", projection.return_percent().round_dp(1));

    let time = SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap()));
    let controller = time.test_control().unwrap();

    let start = NaiveDate::from_ymd_opt(2025, 11, 1).ok_or("bad date")?;
    let shares = shares_per_contribution(Money::from_major(16_600), Money::from_major(100), dec!(83))?;
    let holding = EsppHolding {
        purchase_price: Money::from_major(100),
        current_price: Money::from_minor(13_250, 2),
        shares_per_month: shares,
        start_date: start,
    };

    let espp_plan = InvestmentPlan::new(Money::ZERO, Money::from_major(16_600), Rate::ZERO, 24)?;
    let espp = Investment::new("Employer ESPP", InvestmentType::Espp, espp_plan, start)?.with_espp(holding);

    let sip_plan = InvestmentPlan::new(
        Money::from_major(100_000),
        Money::from_major(10_000),
        Rate::from_percent(dec!(12)),
        120,
    )?;
    let sip = Investment::new("Index SIP", InvestmentType::Sip, sip_plan, start)?
        .with_current_value(Money::from_major(235_000));

    for _ in 0..2 {
        let gains = espp.espp_gains(today(&time));
        println!(
            "ESPP on {}: {} shares, gain {} ({}%)",
            today(&time),
            gains.total_shares,
            gains.total_gain,
            gains.gain_percent.round_dp(2)
        );
        controller.advance(Duration::days(92));
    }

    let totals = PortfolioTotals::compute(&[sip, espp]);
    println!("\ncommitted:          {}", totals.total_committed);
    println!("current value:      {}", totals.total_current_value);
    println!("monthly investment: {}", totals.monthly_investment_total);

    Ok(())
}

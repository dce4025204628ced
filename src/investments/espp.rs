use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::dates::whole_months_elapsed;
use crate::decimal::Money;
use crate::errors::{FinanceError, Result};

/// an employee stock purchase plan holding accumulating shares every month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EsppHolding {
    pub purchase_price: Money,
    pub current_price: Money,
    pub shares_per_month: Decimal,
    pub start_date: NaiveDate,
}

/// derived position of an ESPP holding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EsppGains {
    pub total_shares: Decimal,
    pub total_invested: Money,
    pub current_value: Money,
    pub total_gain: Money,
    pub gain_percent: Decimal,
}

impl EsppGains {
    pub fn is_empty(&self) -> bool {
        self.total_shares.is_zero()
    }
}

impl EsppHolding {
    /// position after the whole calendar months completed by `today`
    pub fn gains_as_of(&self, today: NaiveDate) -> EsppGains {
        compute_espp_gains(
            self.purchase_price,
            self.current_price,
            self.shares_per_month,
            whole_months_elapsed(self.start_date, today),
        )
    }

    /// gain on a single share, `None` until both prices are set
    pub fn per_share_gain(&self) -> Option<(Money, Decimal)> {
        per_share_gain(self.purchase_price, self.current_price)
    }
}

/// accumulated shares, cost basis and unrealised gain
///
/// A non-positive purchase or current price means the plan is not fully set
/// up yet; every derived field is zero in that case.
pub fn compute_espp_gains(
    purchase_price: Money,
    current_price: Money,
    shares_per_month: Decimal,
    months_elapsed: u32,
) -> EsppGains {
    if !purchase_price.is_positive() || !current_price.is_positive() {
        warn!(%purchase_price, %current_price, "espp prices incomplete, reporting no gains");
        return EsppGains::default();
    }
    if shares_per_month <= Decimal::ZERO || months_elapsed == 0 {
        return EsppGains::default();
    }

    let total_shares = shares_per_month * Decimal::from(months_elapsed);
    let total_invested = purchase_price * total_shares;
    let current_value = current_price * total_shares;
    let total_gain = current_value - total_invested;

    EsppGains {
        total_shares,
        total_invested,
        current_value,
        total_gain,
        gain_percent: total_gain.percent_of(total_invested),
    }
}

/// gain per share and its percent of the purchase price
pub fn per_share_gain(purchase_price: Money, current_price: Money) -> Option<(Money, Decimal)> {
    if !purchase_price.is_positive() || !current_price.is_positive() {
        return None;
    }
    let gain = current_price - purchase_price;
    Some((gain, gain.percent_of(purchase_price)))
}

/// shares one monthly contribution buys, converting the share price into the contribution currency
pub fn shares_per_contribution(
    monthly_contribution: Money,
    purchase_price: Money,
    exchange_rate: Decimal,
) -> Result<Decimal> {
    if exchange_rate <= Decimal::ZERO {
        return Err(FinanceError::InvalidAmount {
            field: "exchange_rate".to_string(),
            value: exchange_rate.to_string(),
        });
    }
    if !purchase_price.is_positive() || monthly_contribution.is_negative() {
        return Ok(Decimal::ZERO);
    }
    Ok(monthly_contribution.as_decimal() / (purchase_price.as_decimal() * exchange_rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_gain_calculation() {
        let gains = compute_espp_gains(
            Money::from_minor(8550, 2),
            Money::from_major(120),
            dec!(2.5),
            10,
        );

        assert_eq!(
            gains,
            EsppGains {
                total_shares: dec!(25),
                total_invested: Money::from_minor(213_750, 2),
                current_value: Money::from_major(3_000),
                total_gain: Money::from_minor(86_250, 2),
                gain_percent: Money::from_minor(86_250, 2).percent_of(Money::from_minor(213_750, 2)),
            }
        );
    }

    #[test]
    fn test_loss_is_negative_gain() {
        let gains = compute_espp_gains(Money::from_major(100), Money::from_major(80), dec!(1), 12);
        assert_eq!(gains.total_gain, Money::from_major(-240));
        assert_eq!(gains.gain_percent, dec!(-20));
    }

    #[test]
    fn test_incomplete_setup_yields_zero() {
        for (purchase, current) in [
            (Money::ZERO, Money::from_major(100)),
            (Money::from_major(100), Money::ZERO),
            (Money::from_major(-1), Money::from_major(100)),
        ] {
            let gains = compute_espp_gains(purchase, current, dec!(3), 12);
            assert_eq!(gains, EsppGains::default());
        }
    }

    #[test]
    fn test_zero_shares_guard() {
        let zero_shares = compute_espp_gains(Money::from_major(50), Money::from_major(60), dec!(0), 12);
        let zero_months = compute_espp_gains(Money::from_major(50), Money::from_major(60), dec!(4), 0);
        for gains in [zero_shares, zero_months] {
            assert!(gains.is_empty());
            assert_eq!(gains.total_gain, Money::ZERO);
            assert_eq!(gains.gain_percent, Decimal::ZERO);
        }
    }

    #[test]
    fn test_gains_as_of_truncates_months() {
        let holding = EsppHolding {
            purchase_price: Money::from_major(80),
            current_price: Money::from_major(100),
            shares_per_month: dec!(2),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 20).unwrap(),
        };
        let gains = holding.gains_as_of(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
        assert_eq!(gains.total_shares, dec!(16));
        assert_eq!(gains.total_gain, Money::from_major(320));
        assert_eq!(gains.gain_percent, dec!(25));
    }

    #[test]
    fn test_per_share_gain() {
        assert_eq!(
            per_share_gain(Money::from_major(80), Money::from_major(100)),
            Some((Money::from_major(20), dec!(25)))
        );
        assert_eq!(per_share_gain(Money::ZERO, Money::from_major(100)), None);
    }

    #[test]
    fn test_shares_per_contribution() {
        let shares =
            shares_per_contribution(Money::from_major(16_600), Money::from_major(100), dec!(83)).unwrap();
        assert_eq!(shares, dec!(2));
        assert_eq!(
            shares_per_contribution(Money::from_major(16_600), Money::ZERO, dec!(83)).unwrap(),
            Decimal::ZERO
        );
        assert!(shares_per_contribution(Money::ONE, Money::ONE, Decimal::ZERO).is_err());
    }
}

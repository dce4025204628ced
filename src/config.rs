use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::{FinanceError, Result};

/// calculator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FinanceConfig {
    #[serde(default)]
    pub advisor: AdvisorConfig,
    #[serde(default)]
    pub timeline: TimelineConfig,
}

/// thresholds driving the dashboard recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// debt-to-income percent above which debt is flagged as high
    pub dti_high_percent: Decimal,
    /// debt-to-income percent above which debt is above the ideal band
    pub dti_ideal_percent: Decimal,
    /// residual income below this share of income triggers a budget warning
    pub low_residual_share: Decimal,
    /// residual income above this share of income counts as healthy
    pub healthy_residual_share: Decimal,
    /// months of income to hold as an emergency fund
    pub emergency_fund_months: u32,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            dti_high_percent: dec!(43),
            dti_ideal_percent: dec!(36),
            low_residual_share: dec!(0.2),
            healthy_residual_share: dec!(0.5),
            emergency_fund_months: 6,
        }
    }
}

/// sampling of the payoff timeline chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// longest term sampled every month
    pub monthly_until: u32,
    /// longest term sampled every quarter; anything longer uses `long_step`
    pub quarterly_until: u32,
    pub long_step: u32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            monthly_until: 36,
            quarterly_until: 120,
            long_step: 6,
        }
    }
}

impl TimelineConfig {
    /// sampling step for a timeline spanning `max_term` months
    pub fn step_for(&self, max_term: u32) -> u32 {
        if max_term <= self.monthly_until {
            1
        } else if max_term <= self.quarterly_until {
            3
        } else {
            self.long_step.max(1)
        }
    }
}

impl FinanceConfig {
    /// tighter thresholds for users who want earlier warnings
    pub fn conservative() -> Self {
        Self {
            advisor: AdvisorConfig {
                dti_high_percent: dec!(36),
                dti_ideal_percent: dec!(28),
                low_residual_share: dec!(0.3),
                healthy_residual_share: dec!(0.6),
                emergency_fund_months: 9,
            },
            timeline: TimelineConfig::default(),
        }
    }

    /// parse and validate a JSON configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: FinanceConfig =
            serde_json::from_str(json).map_err(|e| FinanceError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.advisor.validate()?;
        if self.timeline.monthly_until > self.timeline.quarterly_until {
            return Err(FinanceError::InvalidConfiguration {
                message: "timeline monthly_until exceeds quarterly_until".to_string(),
            });
        }
        Ok(())
    }
}

impl AdvisorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.dti_ideal_percent.is_sign_negative() || self.dti_ideal_percent > self.dti_high_percent {
            return Err(FinanceError::InvalidConfiguration {
                message: format!(
                    "dti thresholds out of order: ideal {} high {}",
                    self.dti_ideal_percent, self.dti_high_percent
                ),
            });
        }
        let share_range = Decimal::ZERO..=Decimal::ONE;
        if !share_range.contains(&self.low_residual_share)
            || !share_range.contains(&self.healthy_residual_share)
            || self.low_residual_share > self.healthy_residual_share
        {
            return Err(FinanceError::InvalidConfiguration {
                message: format!(
                    "residual income shares out of order: low {} healthy {}",
                    self.low_residual_share, self.healthy_residual_share
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(FinanceConfig::default().validate().is_ok());
        assert!(FinanceConfig::conservative().validate().is_ok());
    }

    #[test]
    fn test_from_json_partial_document() {
        let config = FinanceConfig::from_json(
            r#"{"advisor": {"dti_high_percent": 40, "dti_ideal_percent": 30,
                "low_residual_share": 0.25, "healthy_residual_share": 0.5,
                "emergency_fund_months": 3}}"#,
        )
        .unwrap();
        assert_eq!(config.advisor.dti_high_percent, dec!(40));
        assert_eq!(config.advisor.emergency_fund_months, 3);
        assert_eq!(config.timeline, TimelineConfig::default());
    }

    #[test]
    fn test_json_round_trip() {
        let config = FinanceConfig::conservative();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(FinanceConfig::from_json(&json).unwrap(), config);
        assert_eq!(FinanceConfig::from_json("{}").unwrap(), FinanceConfig::default());
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let mut config = FinanceConfig::default();
        config.advisor.dti_ideal_percent = dec!(50);
        assert!(matches!(
            config.validate(),
            Err(FinanceError::InvalidConfiguration { .. })
        ));

        let err = FinanceConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, FinanceError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_timeline_step() {
        let timeline = TimelineConfig::default();
        assert_eq!(timeline.step_for(24), 1);
        assert_eq!(timeline.step_for(36), 1);
        assert_eq!(timeline.step_for(60), 3);
        assert_eq!(timeline.step_for(240), 6);
    }
}

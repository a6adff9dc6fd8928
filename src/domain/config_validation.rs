//! Configuration validation and settings construction.
//!
//! Every key is optional; present keys must hold sensible values.

use chrono::Duration;

use crate::domain::decay::{DEFAULT_FLOOR_RATIO, TimeDecayPricer};
use crate::domain::error::CrestoxError;
use crate::domain::resale::{
    DEFAULT_PLATFORM_FEE_RATE, DEFAULT_ROYALTY_RATE, FeeSchedule, QuantityPolicy,
};
use crate::domain::settings::{
    DEFAULT_LISTING_DURATION_DAYS, MAX_LISTING_DURATION_DAYS, MarketSettings,
};
use crate::ports::config_port::ConfigPort;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), CrestoxError> {
    validate_fees(config)?;
    validate_listing(config)?;
    validate_data(config)?;
    Ok(())
}

/// Builds settings from a config, validating first. Absent keys take their
/// defaults.
pub fn build_settings(config: &dyn ConfigPort) -> Result<MarketSettings, CrestoxError> {
    validate_config(config)?;

    Ok(MarketSettings {
        fees: FeeSchedule {
            platform_fee_rate: config.get_double(
                "fees",
                "platform_fee_rate",
                DEFAULT_PLATFORM_FEE_RATE,
            ),
            royalty_rate: config.get_double("fees", "royalty_rate", DEFAULT_ROYALTY_RATE),
        },
        listing_duration: Duration::days(config.get_int(
            "listing",
            "duration_days",
            DEFAULT_LISTING_DURATION_DAYS,
        )),
        pricer: TimeDecayPricer::new(config.get_double(
            "listing",
            "floor_ratio",
            DEFAULT_FLOOR_RATIO,
        )),
        quantity_policy: parse_policy(config)?.unwrap_or_default(),
    })
}

fn validate_fees(config: &dyn ConfigPort) -> Result<(), CrestoxError> {
    let platform_fee_rate = read_double(config, "fees", "platform_fee_rate")?
        .unwrap_or(DEFAULT_PLATFORM_FEE_RATE);
    check_rate("platform_fee_rate", platform_fee_rate)?;

    let royalty_rate =
        read_double(config, "fees", "royalty_rate")?.unwrap_or(DEFAULT_ROYALTY_RATE);
    check_rate("royalty_rate", royalty_rate)?;

    let fees = FeeSchedule {
        platform_fee_rate,
        royalty_rate,
    };
    if fees.total_rate() >= 1.0 {
        return Err(CrestoxError::ConfigInvalid {
            section: "fees".to_string(),
            key: "royalty_rate".to_string(),
            reason: "platform_fee_rate and royalty_rate must sum below 1".to_string(),
        });
    }
    Ok(())
}

fn check_rate(key: &str, value: f64) -> Result<(), CrestoxError> {
    if !(0.0..1.0).contains(&value) {
        return Err(CrestoxError::ConfigInvalid {
            section: "fees".to_string(),
            key: key.to_string(),
            reason: format!("{key} must be between 0 and 1"),
        });
    }
    Ok(())
}

fn validate_listing(config: &dyn ConfigPort) -> Result<(), CrestoxError> {
    if let Some(raw) = config.get_string("listing", "duration_days") {
        match raw.trim().parse::<i64>() {
            Ok(days) if (1..=MAX_LISTING_DURATION_DAYS).contains(&days) => {}
            _ => {
                return Err(CrestoxError::ConfigInvalid {
                    section: "listing".to_string(),
                    key: "duration_days".to_string(),
                    reason: format!(
                        "duration_days must be a whole number between 1 and {MAX_LISTING_DURATION_DAYS}"
                    ),
                });
            }
        }
    }

    if let Some(ratio) = read_double(config, "listing", "floor_ratio")? {
        if ratio <= 0.0 || ratio > 1.0 {
            return Err(CrestoxError::ConfigInvalid {
                section: "listing".to_string(),
                key: "floor_ratio".to_string(),
                reason: "floor_ratio must be greater than 0 and at most 1".to_string(),
            });
        }
    }

    parse_policy(config)?;
    Ok(())
}

fn validate_data(config: &dyn ConfigPort) -> Result<(), CrestoxError> {
    match config.get_string("data", "holdings_csv") {
        Some(s) if s.trim().is_empty() => Err(CrestoxError::ConfigInvalid {
            section: "data".to_string(),
            key: "holdings_csv".to_string(),
            reason: "holdings_csv must not be empty when set".to_string(),
        }),
        _ => Ok(()),
    }
}

fn parse_policy(config: &dyn ConfigPort) -> Result<Option<QuantityPolicy>, CrestoxError> {
    config
        .get_string("listing", "quantity_policy")
        .map(|raw| {
            raw.parse::<QuantityPolicy>()
                .map_err(|reason| CrestoxError::ConfigInvalid {
                    section: "listing".to_string(),
                    key: "quantity_policy".to_string(),
                    reason,
                })
        })
        .transpose()
}

/// Reads a float, distinguishing an absent key from an unparsable one.
fn read_double(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<f64>, CrestoxError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(raw) => match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(CrestoxError::ConfigInvalid {
                section: section.to_string(),
                key: key.to_string(),
                reason: format!("{raw:?} is not a number"),
            }),
        },
    }
}

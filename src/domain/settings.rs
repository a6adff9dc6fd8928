//! Market settings: fees, listing window, decay floor, quantity policy.

use chrono::Duration;

use super::decay::TimeDecayPricer;
use super::resale::{FeeSchedule, QuantityPolicy};

pub const DEFAULT_LISTING_DURATION_DAYS: i64 = 7;
pub const MAX_LISTING_DURATION_DAYS: i64 = 3650;

#[derive(Debug, Clone, PartialEq)]
pub struct MarketSettings {
    pub fees: FeeSchedule,
    pub listing_duration: Duration,
    pub pricer: TimeDecayPricer,
    pub quantity_policy: QuantityPolicy,
}

impl Default for MarketSettings {
    fn default() -> Self {
        MarketSettings {
            fees: FeeSchedule::default(),
            listing_duration: Duration::days(DEFAULT_LISTING_DURATION_DAYS),
            pricer: TimeDecayPricer::default(),
            quantity_policy: QuantityPolicy::default(),
        }
    }
}

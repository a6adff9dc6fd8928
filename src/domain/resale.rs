//! Resale pricing: gross value, platform fee, artist royalty, net payout.

use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PLATFORM_FEE_RATE: f64 = 0.02;
pub const DEFAULT_ROYALTY_RATE: f64 = 0.05;

/// Deductions applied to a resale, as fractions of gross.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeSchedule {
    pub platform_fee_rate: f64,
    pub royalty_rate: f64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        FeeSchedule {
            platform_fee_rate: DEFAULT_PLATFORM_FEE_RATE,
            royalty_rate: DEFAULT_ROYALTY_RATE,
        }
    }
}

impl FeeSchedule {
    pub fn total_rate(&self) -> f64 {
        self.platform_fee_rate + self.royalty_rate
    }
}

/// What a sell action does when asked for more shards than are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuantityPolicy {
    /// List the available shards instead.
    Clamp,
    /// Refuse the listing.
    #[default]
    Reject,
}

impl FromStr for QuantityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clamp" => Ok(QuantityPolicy::Clamp),
            "reject" => Ok(QuantityPolicy::Reject),
            other => Err(format!("unknown quantity policy {other:?} (expected clamp or reject)")),
        }
    }
}

impl fmt::Display for QuantityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityPolicy::Clamp => write!(f, "clamp"),
            QuantityPolicy::Reject => write!(f, "reject"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResaleQuote {
    pub price: f64,
    pub requested_quantity: u64,
    pub quantity: u64,
    pub gross: f64,
    pub platform_fee: f64,
    pub royalty: f64,
    pub net: f64,
}

impl ResaleQuote {
    /// Prices a resale of `quantity` shards at `price` each.
    ///
    /// The quantity is clamped to `max_quantity`; a negative or NaN price is
    /// treated as zero. Never fails.
    pub fn compute(price: f64, quantity: u64, max_quantity: u64, fees: &FeeSchedule) -> Self {
        let price = price.max(0.0);
        let clamped = quantity.min(max_quantity);

        let gross = price * clamped as f64;
        let platform_fee = gross * fees.platform_fee_rate;
        let royalty = gross * fees.royalty_rate;

        ResaleQuote {
            price,
            requested_quantity: quantity,
            quantity: clamped,
            gross,
            platform_fee,
            royalty,
            net: gross - platform_fee - royalty,
        }
    }

    pub fn was_clamped(&self) -> bool {
        self.quantity < self.requested_quantity
    }

    /// A listing with no positive payout must not be submitted.
    pub fn is_submittable(&self) -> bool {
        self.quantity > 0 && self.net > 0.0
    }
}

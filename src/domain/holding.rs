//! Shard holdings.

use serde::Deserialize;

use super::error::CrestoxError;
use super::portfolio::Valuation;

/// A position in one artwork, measured in shards.
///
/// `price_per_shard` is the current market price of one shard and
/// `purchase_price` is the per-shard cost basis. `shards_available` counts
/// the shards not currently tied up in listings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Holding {
    pub artwork_id: String,
    pub artist: String,
    pub shards_owned: u64,
    pub shards_available: u64,
    pub price_per_shard: f64,
    pub purchase_price: f64,
}

impl Holding {
    pub fn new(
        artwork_id: impl Into<String>,
        artist: impl Into<String>,
        shards_owned: u64,
        shards_available: u64,
        price_per_shard: f64,
        purchase_price: f64,
    ) -> Result<Self, CrestoxError> {
        let holding = Holding {
            artwork_id: artwork_id.into(),
            artist: artist.into(),
            shards_owned,
            shards_available,
            price_per_shard,
            purchase_price,
        };
        holding.validate()?;
        Ok(holding)
    }

    pub fn validate(&self) -> Result<(), CrestoxError> {
        let invalid = |reason: &str| CrestoxError::InvalidHolding {
            artwork_id: self.artwork_id.clone(),
            reason: reason.to_string(),
        };

        if self.artwork_id.trim().is_empty() {
            return Err(invalid("artwork_id must not be empty"));
        }
        if self.shards_available > self.shards_owned {
            return Err(invalid("shards_available exceeds shards_owned"));
        }
        if !self.price_per_shard.is_finite() || self.price_per_shard < 0.0 {
            return Err(invalid("price_per_shard must be a non-negative number"));
        }
        if !self.purchase_price.is_finite() || self.purchase_price < 0.0 {
            return Err(invalid("purchase_price must be a non-negative number"));
        }
        Ok(())
    }

    pub fn current_value(&self) -> f64 {
        self.shards_owned as f64 * self.price_per_shard
    }

    pub fn invested_amount(&self) -> f64 {
        self.shards_owned as f64 * self.purchase_price
    }

    /// Shards currently committed to open listings.
    pub fn shards_listed(&self) -> u64 {
        self.shards_owned.saturating_sub(self.shards_available)
    }

    pub fn valuation(&self) -> Valuation {
        Valuation {
            current_value: self.current_value(),
            invested_amount: self.invested_amount(),
        }
    }

    pub(crate) fn reserve(&mut self, quantity: u64) -> Result<(), CrestoxError> {
        if quantity > self.shards_available {
            return Err(CrestoxError::QuantityExceedsAvailable {
                artwork_id: self.artwork_id.clone(),
                requested: quantity,
                available: self.shards_available,
            });
        }
        self.shards_available -= quantity;
        Ok(())
    }

    pub(crate) fn release(&mut self, quantity: u64) {
        self.shards_available = (self.shards_available + quantity).min(self.shards_owned);
    }
}

//! Resale listings.

use chrono::{DateTime, Utc};

use super::decay::{DecayQuote, TimeDecayPricer};
use super::error::CrestoxError;

#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: u64,
    pub artwork_id: String,
    pub quantity: u64,
    /// Per-shard price at creation.
    pub listing_price: f64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Listing {
    pub fn new(
        id: u64,
        artwork_id: impl Into<String>,
        quantity: u64,
        listing_price: f64,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<Self, CrestoxError> {
        if expires_at <= created_at {
            return Err(CrestoxError::InvalidListingWindow {
                reason: format!("expires_at {expires_at} is not after created_at {created_at}"),
            });
        }
        Ok(Listing {
            id,
            artwork_id: artwork_id.into(),
            quantity,
            listing_price,
            created_at,
            expires_at,
        })
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn decay(&self, pricer: &TimeDecayPricer, now: DateTime<Utc>) -> DecayQuote {
        pricer.quote(self.listing_price, self.created_at, self.expires_at, now)
    }

    /// Value of the whole listing at the decayed per-shard price.
    pub fn current_total(&self, pricer: &TimeDecayPricer, now: DateTime<Utc>) -> f64 {
        self.decay(pricer, now).current_price * self.quantity as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decay::ListingStatus;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn sample_listing() -> Listing {
        Listing::new(1, "ART-001", 10, 5000.0, t0(), t0() + Duration::days(7)).unwrap()
    }

    #[test]
    fn rejects_window_that_does_not_move_forward() {
        let err = Listing::new(1, "ART-001", 1, 10.0, t0(), t0()).unwrap_err();
        assert!(matches!(err, CrestoxError::InvalidListingWindow { .. }));
        assert!(Listing::new(1, "ART-001", 1, 10.0, t0(), t0() - Duration::hours(1)).is_err());
    }

    #[test]
    fn expiry_is_strictly_after_expires_at() {
        let l = sample_listing();
        assert!(!l.is_expired(l.expires_at));
        assert!(l.is_expired(l.expires_at + Duration::milliseconds(1)));
    }

    #[test]
    fn decay_uses_listing_window() {
        let l = sample_listing();
        let q = l.decay(&TimeDecayPricer::default(), t0() + Duration::hours(84));
        assert_relative_eq!(q.current_price, 4500.0);
        assert_eq!(q.status, ListingStatus::Active);
    }

    #[test]
    fn current_total_scales_by_quantity() {
        let l = sample_listing();
        let total = l.current_total(&TimeDecayPricer::default(), t0() + Duration::days(30));
        assert_relative_eq!(total, 40_000.0);
    }
}

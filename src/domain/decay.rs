//! Time-decay pricing for resale listings.
//!
//! A listing's price falls linearly from its listing price at creation to a
//! floor (80% of the listing price by default) at expiry. Status is derived
//! at read time; nothing transitions when a listing expires.

use chrono::{DateTime, Duration, Utc};
use std::fmt;

pub const DEFAULT_FLOOR_RATIO: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStatus {
    Active,
    Expired,
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingStatus::Active => write!(f, "active"),
            ListingStatus::Expired => write!(f, "expired"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayQuote {
    pub progress: f64,
    pub min_price: f64,
    pub current_price: f64,
    pub status: ListingStatus,
}

/// Linear decay from a listing price down to `floor_ratio` of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeDecayPricer {
    pub floor_ratio: f64,
}

impl Default for TimeDecayPricer {
    fn default() -> Self {
        TimeDecayPricer {
            floor_ratio: DEFAULT_FLOOR_RATIO,
        }
    }
}

impl TimeDecayPricer {
    pub fn new(floor_ratio: f64) -> Self {
        TimeDecayPricer { floor_ratio }
    }

    pub fn min_price(&self, listing_price: f64) -> f64 {
        listing_price * self.floor_ratio
    }

    /// Price at a given fraction of the window, `progress` clamped to 0..=1.
    pub fn price_at_progress(&self, listing_price: f64, progress: f64) -> f64 {
        let progress = clamp_unit(progress);
        let min_price = self.min_price(listing_price);
        listing_price - (listing_price - min_price) * progress
    }

    pub fn quote(
        &self,
        listing_price: f64,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> DecayQuote {
        let min_price = self.min_price(listing_price);

        if now > expires_at {
            return DecayQuote {
                progress: 1.0,
                min_price,
                current_price: min_price,
                status: ListingStatus::Expired,
            };
        }

        let progress = window_progress(created_at, expires_at, now);
        DecayQuote {
            progress,
            min_price,
            current_price: self.price_at_progress(listing_price, progress),
            status: ListingStatus::Active,
        }
    }

    /// Samples the price at each whole day of the window, plus expiry.
    pub fn schedule(
        &self,
        listing_price: f64,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Vec<DecayPoint> {
        let mut points = Vec::new();
        let mut at = created_at;
        while at < expires_at {
            let progress = window_progress(created_at, expires_at, at);
            points.push(DecayPoint {
                at,
                progress,
                price: self.price_at_progress(listing_price, progress),
            });
            at += Duration::days(1);
        }
        points.push(DecayPoint {
            at: expires_at,
            progress: 1.0,
            price: self.min_price(listing_price),
        });
        points
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayPoint {
    pub at: DateTime<Utc>,
    pub progress: f64,
    pub price: f64,
}

/// Fraction of the window elapsed at `now`. A window with no length counts
/// as fully elapsed.
pub fn window_progress(
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> f64 {
    let span = (expires_at - created_at).num_milliseconds();
    if span <= 0 {
        return 1.0;
    }
    let elapsed = (now - created_at).num_milliseconds();
    clamp_unit(elapsed as f64 / span as f64)
}

fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn price_at_creation_is_listing_price() {
        let pricer = TimeDecayPricer::default();
        let q = pricer.quote(1000.0, t0(), t0() + Duration::days(7), t0());
        assert_eq!(q.progress, 0.0);
        assert_relative_eq!(q.current_price, 1000.0);
        assert_eq!(q.status, ListingStatus::Active);
    }

    #[test]
    fn half_window_is_ten_percent_off() {
        let pricer = TimeDecayPricer::default();
        let now = t0() + Duration::hours(84);
        let q = pricer.quote(1000.0, t0(), t0() + Duration::days(7), now);
        assert_relative_eq!(q.progress, 0.5);
        assert_relative_eq!(q.current_price, 900.0);
    }

    #[test]
    fn at_expiry_is_floor_and_still_active() {
        let pricer = TimeDecayPricer::default();
        let expires = t0() + Duration::days(7);
        let q = pricer.quote(1000.0, t0(), expires, expires);
        assert_relative_eq!(q.progress, 1.0);
        assert_relative_eq!(q.current_price, 800.0);
        assert_eq!(q.status, ListingStatus::Active);
    }

    #[test]
    fn after_expiry_is_pinned_to_floor() {
        let pricer = TimeDecayPricer::default();
        let expires = t0() + Duration::days(7);
        let q = pricer.quote(1000.0, t0(), expires, expires + Duration::seconds(1));
        assert_eq!(q.status, ListingStatus::Expired);
        assert_relative_eq!(q.current_price, 800.0);
        assert_relative_eq!(q.min_price, 800.0);
    }

    #[test]
    fn before_creation_clamps_to_start() {
        let pricer = TimeDecayPricer::default();
        let q = pricer.quote(
            1000.0,
            t0(),
            t0() + Duration::days(7),
            t0() - Duration::days(1),
        );
        assert_eq!(q.progress, 0.0);
        assert_relative_eq!(q.current_price, 1000.0);
    }

    #[test]
    fn degenerate_window_is_fully_decayed() {
        assert_eq!(window_progress(t0(), t0(), t0()), 1.0);
        assert_eq!(
            window_progress(t0(), t0() - Duration::days(1), t0() - Duration::days(2)),
            1.0
        );
    }

    #[test]
    fn custom_floor_ratio() {
        let pricer = TimeDecayPricer::new(0.5);
        assert_relative_eq!(pricer.price_at_progress(200.0, 1.0), 100.0);
        assert_relative_eq!(pricer.price_at_progress(200.0, 0.5), 150.0);
    }

    #[test]
    fn schedule_covers_each_day_and_expiry() {
        let pricer = TimeDecayPricer::default();
        let points = pricer.schedule(1000.0, t0(), t0() + Duration::days(7));
        assert_eq!(points.len(), 8);
        assert_relative_eq!(points[0].price, 1000.0);
        assert_eq!(points[7].at, t0() + Duration::days(7));
        assert_relative_eq!(points[7].price, 800.0);
        for pair in points.windows(2) {
            assert!(pair[1].price <= pair[0].price);
        }
    }

    #[test]
    fn schedule_for_partial_day_window() {
        let pricer = TimeDecayPricer::default();
        let points = pricer.schedule(100.0, t0(), t0() + Duration::hours(36));
        assert_eq!(points.len(), 3);
        assert_relative_eq!(points[1].progress, 24.0 / 36.0);
    }

    #[test]
    fn status_display() {
        assert_eq!(ListingStatus::Active.to_string(), "active");
        assert_eq!(ListingStatus::Expired.to_string(), "expired");
    }

    proptest! {
        #[test]
        fn price_stays_between_floor_and_listing(
            price in 0.0f64..1_000_000.0,
            offset_secs in -1_000_000i64..2_000_000,
        ) {
            let pricer = TimeDecayPricer::default();
            let expires = t0() + Duration::days(7);
            let q = pricer.quote(price, t0(), expires, t0() + Duration::seconds(offset_secs));
            prop_assert!(q.current_price <= price + 1e-9);
            prop_assert!(q.current_price >= q.min_price - 1e-9);
            prop_assert!((0.0..=1.0).contains(&q.progress));
        }

        #[test]
        fn window_endpoints_hit_listing_and_floor(price in 0.01f64..1_000_000.0) {
            let pricer = TimeDecayPricer::default();
            let expires = t0() + Duration::days(7);

            let start = pricer.quote(price, t0(), expires, t0());
            prop_assert_eq!(start.progress, 0.0);
            prop_assert!((start.current_price - price).abs() <= price * 1e-12);

            let end = pricer.quote(price, t0(), expires, expires);
            prop_assert_eq!(end.progress, 1.0);
            prop_assert_eq!(end.status, ListingStatus::Active);
            prop_assert!((end.current_price - 0.8 * price).abs() <= price * 1e-12);

            prop_assert_eq!(pricer.price_at_progress(price, 0.0), price);
        }
    }
}

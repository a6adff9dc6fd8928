//! In-memory application state: holdings, listings and the watchlist.
//!
//! One `MarketStore` is built per process from seed holdings and passed to
//! whatever needs it. Listings reserve shards from their holding while open;
//! expiry is derived when a listing is read.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use super::decay::DecayQuote;
use super::error::CrestoxError;
use super::holding::Holding;
use super::listing::Listing;
use super::portfolio::{HoldingPerformance, PortfolioSummary};
use super::resale::{QuantityPolicy, ResaleQuote};
use super::settings::MarketSettings;
use super::watchlist::Watchlist;

#[derive(Debug, Clone, PartialEq)]
pub struct SellRequest {
    pub artwork_id: String,
    pub quantity: u64,
    /// Asking price per shard.
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingReceipt {
    pub listing: Listing,
    pub quote: ResaleQuote,
}

#[derive(Debug, Clone)]
pub struct MarketStore {
    settings: MarketSettings,
    holdings: BTreeMap<String, Holding>,
    listings: BTreeMap<u64, Listing>,
    watchlist: Watchlist,
    next_listing_id: u64,
}

impl MarketStore {
    pub fn new(holdings: Vec<Holding>, settings: MarketSettings) -> Result<Self, CrestoxError> {
        let mut by_id = BTreeMap::new();
        for holding in holdings {
            holding.validate()?;
            if by_id.contains_key(&holding.artwork_id) {
                return Err(CrestoxError::Data {
                    reason: format!("duplicate holding for artwork {}", holding.artwork_id),
                });
            }
            by_id.insert(holding.artwork_id.clone(), holding);
        }
        debug!(holdings = by_id.len(), "market store seeded");

        Ok(MarketStore {
            settings,
            holdings: by_id,
            listings: BTreeMap::new(),
            watchlist: Watchlist::new(),
            next_listing_id: 1,
        })
    }

    pub fn settings(&self) -> &MarketSettings {
        &self.settings
    }

    pub fn holding(&self, artwork_id: &str) -> Option<&Holding> {
        self.holdings.get(artwork_id)
    }

    pub fn holdings(&self) -> impl Iterator<Item = &Holding> {
        self.holdings.values()
    }

    pub fn summary(&self) -> PortfolioSummary {
        PortfolioSummary::from_holdings(self.holdings.values())
    }

    pub fn performance(&self) -> Vec<HoldingPerformance> {
        HoldingPerformance::compute_per_holding(self.holdings.values())
    }

    /// Prices a resale against the shards currently available, clamping
    /// the quantity.
    pub fn quote(
        &self,
        artwork_id: &str,
        price: f64,
        quantity: u64,
    ) -> Result<ResaleQuote, CrestoxError> {
        let holding = self.require_holding(artwork_id)?;
        Ok(ResaleQuote::compute(
            price,
            quantity,
            holding.shards_available,
            &self.settings.fees,
        ))
    }

    /// Opens a listing and reserves its shards. Over-quantity requests are
    /// clamped or rejected according to the configured policy.
    pub fn create_listing(
        &mut self,
        request: &SellRequest,
        now: DateTime<Utc>,
    ) -> Result<ListingReceipt, CrestoxError> {
        let available = self.require_holding(&request.artwork_id)?.shards_available;

        if request.quantity > available && self.settings.quantity_policy == QuantityPolicy::Reject
        {
            return Err(CrestoxError::QuantityExceedsAvailable {
                artwork_id: request.artwork_id.clone(),
                requested: request.quantity,
                available,
            });
        }

        let quote = self.quote(&request.artwork_id, request.price, request.quantity)?;
        if quote.quantity == 0 {
            return Err(CrestoxError::EmptyListing {
                artwork_id: request.artwork_id.clone(),
            });
        }
        if !quote.is_submittable() {
            return Err(CrestoxError::NotSubmittable { net: quote.net });
        }
        if quote.was_clamped() {
            warn!(
                artwork_id = %request.artwork_id,
                requested = quote.requested_quantity,
                listed = quote.quantity,
                "sell quantity clamped to available shards"
            );
        }

        let expires_at = now
            .checked_add_signed(self.settings.listing_duration)
            .ok_or_else(|| CrestoxError::InvalidListingWindow {
                reason: format!(
                    "listing window of {} days from {now} is out of range",
                    self.settings.listing_duration.num_days()
                ),
            })?;

        let holding = self
            .holdings
            .get_mut(&request.artwork_id)
            .ok_or_else(|| CrestoxError::HoldingNotFound {
                artwork_id: request.artwork_id.clone(),
            })?;

        let listing = Listing::new(
            self.next_listing_id,
            request.artwork_id.clone(),
            quote.quantity,
            quote.price,
            now,
            expires_at,
        )?;
        holding.reserve(listing.quantity)?;
        self.next_listing_id += 1;
        self.listings.insert(listing.id, listing.clone());

        info!(
            listing_id = listing.id,
            artwork_id = %listing.artwork_id,
            quantity = listing.quantity,
            price = listing.listing_price,
            expires_at = %listing.expires_at,
            "listing created"
        );
        Ok(ListingReceipt { listing, quote })
    }

    /// Removes a listing and returns its shards to the holding.
    pub fn cancel_listing(&mut self, id: u64) -> Result<Listing, CrestoxError> {
        let listing = self
            .listings
            .remove(&id)
            .ok_or(CrestoxError::ListingNotFound { id })?;

        match self.holdings.get_mut(&listing.artwork_id) {
            Some(holding) => holding.release(listing.quantity),
            None => warn!(
                listing_id = id,
                artwork_id = %listing.artwork_id,
                "cancelled listing has no holding to release into"
            ),
        }

        info!(listing_id = id, quantity = listing.quantity, "listing cancelled");
        Ok(listing)
    }

    pub fn listing(&self, id: u64) -> Option<&Listing> {
        self.listings.get(&id)
    }

    pub fn listings(&self) -> impl Iterator<Item = &Listing> {
        self.listings.values()
    }

    pub fn listing_decay(&self, id: u64, now: DateTime<Utc>) -> Result<DecayQuote, CrestoxError> {
        self.listings
            .get(&id)
            .map(|l| l.decay(&self.settings.pricer, now))
            .ok_or(CrestoxError::ListingNotFound { id })
    }

    pub fn active_listings(&self, now: DateTime<Utc>) -> Vec<&Listing> {
        self.listings.values().filter(|l| !l.is_expired(now)).collect()
    }

    pub fn expired_listings(&self, now: DateTime<Utc>) -> Vec<&Listing> {
        self.listings.values().filter(|l| l.is_expired(now)).collect()
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    pub fn watchlist_mut(&mut self) -> &mut Watchlist {
        &mut self.watchlist
    }

    fn require_holding(&self, artwork_id: &str) -> Result<&Holding, CrestoxError> {
        self.holdings
            .get(artwork_id)
            .ok_or_else(|| CrestoxError::HoldingNotFound {
                artwork_id: artwork_id.to_string(),
            })
    }
}

//! Core domain types and logic.

pub mod holding;
pub mod listing;
pub mod watchlist;
pub mod portfolio;
pub mod resale;
pub mod decay;
pub mod settings;
pub mod store;
pub mod config_validation;
pub mod error;

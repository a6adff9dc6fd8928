//! Seed holdings port trait.

use crate::domain::error::CrestoxError;
use crate::domain::holding::Holding;

/// Source of the holdings a market store is seeded with.
pub trait HoldingsPort {
    fn load_holdings(&self) -> Result<Vec<Holding>, CrestoxError>;

    /// Describes where the holdings come from, for progress output.
    fn source(&self) -> String;
}

//! CSV file holdings adapter.
//!
//! Expects a header row:
//! `artwork_id,artist,shards_owned,shards_available,price_per_shard,purchase_price`.

use crate::domain::error::CrestoxError;
use crate::domain::holding::Holding;
use crate::ports::holdings_port::HoldingsPort;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

pub struct CsvHoldingsAdapter {
    path: PathBuf,
}

impl CsvHoldingsAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn parse(content: &str) -> Result<Vec<Holding>, CrestoxError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let mut holdings = Vec::new();
        for (row, result) in rdr.deserialize::<Holding>().enumerate() {
            let holding = result.map_err(|e| CrestoxError::Data {
                reason: format!("CSV parse error on row {}: {}", row + 1, e),
            })?;
            holding.validate()?;
            holdings.push(holding);
        }
        Ok(holdings)
    }
}

impl HoldingsPort for CsvHoldingsAdapter {
    fn load_holdings(&self) -> Result<Vec<Holding>, CrestoxError> {
        let content = fs::read_to_string(&self.path).map_err(|e| CrestoxError::Data {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        let holdings = Self::parse(&content)?;
        debug!(path = %self.path.display(), count = holdings.len(), "holdings loaded");
        Ok(holdings)
    }

    fn source(&self) -> String {
        self.path.display().to_string()
    }
}

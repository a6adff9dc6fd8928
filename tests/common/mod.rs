#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use crestox::domain::error::CrestoxError;
use crestox::domain::holding::Holding;
use crestox::domain::resale::QuantityPolicy;
use crestox::domain::settings::MarketSettings;
use crestox::domain::store::{MarketStore, SellRequest};
use crestox::ports::holdings_port::HoldingsPort;
use std::io::Write;

pub struct MockHoldingsPort {
    pub holdings: Vec<Holding>,
    pub error: Option<String>,
}

impl MockHoldingsPort {
    pub fn new() -> Self {
        Self {
            holdings: Vec::new(),
            error: None,
        }
    }

    pub fn with_holding(mut self, holding: Holding) -> Self {
        self.holdings.push(holding);
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl HoldingsPort for MockHoldingsPort {
    fn load_holdings(&self) -> Result<Vec<Holding>, CrestoxError> {
        if let Some(reason) = &self.error {
            return Err(CrestoxError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self.holdings.clone())
    }

    fn source(&self) -> String {
        "mock".to_string()
    }
}

pub fn make_holding(id: &str, owned: u64, available: u64, price: f64, cost: f64) -> Holding {
    Holding::new(id, format!("Artist of {id}"), owned, available, price, cost).unwrap()
}

pub fn sample_port() -> MockHoldingsPort {
    MockHoldingsPort::new()
        .with_holding(make_holding("ART-001", 40, 40, 5375.0, 4500.0))
        .with_holding(make_holding("ART-002", 25, 20, 2100.0, 2400.0))
        .with_holding(make_holding("ART-003", 10, 10, 500.0, 0.0))
}

pub fn store_from(port: &dyn HoldingsPort, policy: QuantityPolicy) -> MarketStore {
    let settings = MarketSettings {
        quantity_policy: policy,
        ..MarketSettings::default()
    };
    MarketStore::new(port.load_holdings().unwrap(), settings).unwrap()
}

pub fn sell(artwork_id: &str, quantity: u64, price: f64) -> SellRequest {
    SellRequest {
        artwork_id: artwork_id.to_string(),
        quantity,
        price,
    }
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

pub fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub const HOLDINGS_CSV: &str = "\
artwork_id,artist,shards_owned,shards_available,price_per_shard,purchase_price
ART-101,Meera Rao,40,40,5375.0,4500.0
ART-102,Tomas Lind,12,12,800.0,1000.0
";

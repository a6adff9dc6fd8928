//! Built-in demo holdings, used when no holdings file is configured.

use crate::domain::error::CrestoxError;
use crate::domain::holding::Holding;
use crate::ports::holdings_port::HoldingsPort;

const DEMO_HOLDINGS: &[(&str, &str, u64, u64, f64, f64)] = &[
    ("ART-001", "Meera Rao", 40, 40, 5375.0, 4500.0),
    ("ART-002", "Tomas Lind", 25, 20, 2100.0, 2400.0),
    ("ART-003", "Ines Duarte", 60, 60, 950.0, 700.0),
    ("ART-004", "Kwame Asante", 8, 8, 12500.0, 11000.0),
];

#[derive(Debug, Default)]
pub struct DemoHoldingsAdapter;

impl HoldingsPort for DemoHoldingsAdapter {
    fn load_holdings(&self) -> Result<Vec<Holding>, CrestoxError> {
        DEMO_HOLDINGS
            .iter()
            .map(|&(id, artist, owned, available, price, cost)| {
                Holding::new(id, artist, owned, available, price, cost)
            })
            .collect()
    }

    fn source(&self) -> String {
        "built-in demo holdings".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::portfolio::PortfolioSummary;
    use approx::assert_relative_eq;

    #[test]
    fn demo_holdings_are_valid_and_unique() {
        let holdings = DemoHoldingsAdapter.load_holdings().unwrap();
        assert_eq!(holdings.len(), DEMO_HOLDINGS.len());
        let mut ids: Vec<_> = holdings.iter().map(|h| h.artwork_id.clone()).collect();
        ids.dedup();
        assert_eq!(ids.len(), holdings.len());
    }

    #[test]
    fn first_demo_holding_matches_reference_figures() {
        let holdings = DemoHoldingsAdapter.load_holdings().unwrap();
        let summary = PortfolioSummary::from_holdings(&holdings[..1]);
        assert_relative_eq!(summary.total_value, 215_000.0);
        assert_relative_eq!(summary.total_invested, 180_000.0);
        assert_relative_eq!(summary.gain_loss_percent, 19.444_444, epsilon = 1e-5);
    }
}

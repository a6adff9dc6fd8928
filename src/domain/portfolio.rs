//! Portfolio aggregation over holdings.

use super::holding::Holding;

/// Value and cost basis of one position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Valuation {
    pub current_value: f64,
    pub invested_amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PortfolioSummary {
    pub total_value: f64,
    pub total_invested: f64,
    pub gain_loss_abs: f64,
    pub gain_loss_percent: f64,
}

impl PortfolioSummary {
    /// Sums valuations into totals. Gain/loss percent is zero when nothing
    /// was invested; an empty input yields all zeros.
    pub fn aggregate<I>(valuations: I) -> Self
    where
        I: IntoIterator<Item = Valuation>,
    {
        let (total_value, total_invested) = valuations
            .into_iter()
            .fold((0.0, 0.0), |(value, invested), v| {
                (value + v.current_value, invested + v.invested_amount)
            });

        let gain_loss_abs = total_value - total_invested;
        PortfolioSummary {
            total_value,
            total_invested,
            gain_loss_abs,
            gain_loss_percent: percent_of(gain_loss_abs, total_invested),
        }
    }

    pub fn from_holdings<'a, I>(holdings: I) -> Self
    where
        I: IntoIterator<Item = &'a Holding>,
    {
        Self::aggregate(holdings.into_iter().map(Holding::valuation))
    }

    pub fn is_gain(&self) -> bool {
        self.gain_loss_abs >= 0.0
    }
}

/// One row of the per-holding performance table.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingPerformance {
    pub artwork_id: String,
    pub artist: String,
    pub shards_owned: u64,
    pub current_value: f64,
    pub invested_amount: f64,
    pub gain_loss_abs: f64,
    pub gain_loss_percent: f64,
    /// Fraction of total portfolio value, 0..=1.
    pub weight: f64,
}

impl HoldingPerformance {
    pub fn compute_per_holding<'a, I>(holdings: I) -> Vec<HoldingPerformance>
    where
        I: IntoIterator<Item = &'a Holding>,
        I::IntoIter: Clone,
    {
        let iter = holdings.into_iter();
        let total_value: f64 = iter.clone().map(Holding::current_value).sum();

        iter.map(|h| {
            let current_value = h.current_value();
            let invested_amount = h.invested_amount();
            let gain_loss_abs = current_value - invested_amount;
            HoldingPerformance {
                artwork_id: h.artwork_id.clone(),
                artist: h.artist.clone(),
                shards_owned: h.shards_owned,
                current_value,
                invested_amount,
                gain_loss_abs,
                gain_loss_percent: percent_of(gain_loss_abs, invested_amount),
                weight: if total_value > 0.0 {
                    current_value / total_value
                } else {
                    0.0
                },
            }
        })
        .collect()
    }
}

fn percent_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

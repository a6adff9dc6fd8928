//! CLI definition and dispatch.

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvHoldingsAdapter;
use crate::adapters::demo_adapter::DemoHoldingsAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{build_settings, validate_config};
use crate::domain::decay::{DecayPoint, DecayQuote};
use crate::domain::error::CrestoxError;
use crate::domain::holding::Holding;
use crate::domain::portfolio::{HoldingPerformance, PortfolioSummary};
use crate::domain::resale::ResaleQuote;
use crate::domain::settings::MarketSettings;
use crate::domain::store::{ListingReceipt, MarketStore, SellRequest};
use crate::ports::config_port::ConfigPort;
use crate::ports::holdings_port::HoldingsPort;

#[derive(Parser, Debug)]
#[command(name = "crestox", about = "Fractional art holdings and resale pricing")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show holdings and portfolio gain/loss
    Portfolio {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Price a resale of shards from a holding
    Quote {
        #[arg(long)]
        artwork: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        quantity: u64,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Show the decayed price of a listing window at a point in time
    Decay {
        #[arg(long)]
        price: f64,
        #[arg(long)]
        created: String,
        #[arg(long)]
        expires: String,
        #[arg(long)]
        at: Option<String>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Create a listing against the seeded holdings and show its price path
    Sell {
        #[arg(long)]
        artwork: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        quantity: u64,
        #[arg(long)]
        at: Option<String>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Portfolio { config } => run_portfolio(config.as_ref()),
        Command::Quote {
            artwork,
            price,
            quantity,
            config,
        } => run_quote(&artwork, price, quantity, config.as_ref()),
        Command::Decay {
            price,
            created,
            expires,
            at,
            config,
        } => run_decay(price, &created, &expires, at.as_deref(), config.as_ref()),
        Command::Sell {
            artwork,
            price,
            quantity,
            at,
            config,
        } => run_sell(&artwork, price, quantity, at.as_deref(), config.as_ref()),
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Loads the config file if one was given; otherwise every setting takes
/// its default.
pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, CrestoxError> {
    match path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            FileConfigAdapter::from_file(path).map_err(|e| CrestoxError::ConfigParse {
                file: path.display().to_string(),
                reason: e.to_string(),
            })
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

pub fn holdings_source(config: &dyn ConfigPort) -> Box<dyn HoldingsPort> {
    match config.get_string("data", "holdings_csv") {
        Some(path) => Box::new(CsvHoldingsAdapter::new(PathBuf::from(path.trim()))),
        None => Box::new(DemoHoldingsAdapter),
    }
}

pub fn build_store(config: &dyn ConfigPort) -> Result<MarketStore, CrestoxError> {
    let settings = build_settings(config)?;
    let port = holdings_source(config);
    eprintln!("Loading holdings from {}", port.source());
    MarketStore::new(port.load_holdings()?, settings)
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, CrestoxError> {
    let trimmed = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| CrestoxError::InvalidTimestamp {
            value: value.to_string(),
            reason: "expected RFC 3339 or YYYY-MM-DD".to_string(),
        })
}

fn resolve_now(at: Option<&str>) -> Result<DateTime<Utc>, CrestoxError> {
    match at {
        Some(s) => parse_timestamp(s),
        None => Ok(Utc::now()),
    }
}

pub fn run_portfolio(config_path: Option<&PathBuf>) -> Result<String, CrestoxError> {
    let config = load_config(config_path)?;
    let store = build_store(&config)?;
    Ok(render_portfolio(&store.performance(), &store.summary()))
}

pub fn run_quote(
    artwork_id: &str,
    price: f64,
    quantity: u64,
    config_path: Option<&PathBuf>,
) -> Result<String, CrestoxError> {
    let config = load_config(config_path)?;
    let store = build_store(&config)?;
    let quote = store.quote(artwork_id, price, quantity)?;
    Ok(render_quote(artwork_id, &quote))
}

pub fn run_decay(
    price: f64,
    created: &str,
    expires: &str,
    at: Option<&str>,
    config_path: Option<&PathBuf>,
) -> Result<String, CrestoxError> {
    let config = load_config(config_path)?;
    let settings = build_settings(&config)?;

    let created_at = parse_timestamp(created)?;
    let expires_at = parse_timestamp(expires)?;
    if expires_at <= created_at {
        return Err(CrestoxError::InvalidListingWindow {
            reason: format!("expires {expires_at} is not after created {created_at}"),
        });
    }
    let now = resolve_now(at)?;

    let quote = settings.pricer.quote(price, created_at, expires_at, now);
    Ok(render_decay(price, now, &quote))
}

pub fn run_sell(
    artwork_id: &str,
    price: f64,
    quantity: u64,
    at: Option<&str>,
    config_path: Option<&PathBuf>,
) -> Result<String, CrestoxError> {
    let config = load_config(config_path)?;
    let mut store = build_store(&config)?;
    let now = resolve_now(at)?;

    let request = SellRequest {
        artwork_id: artwork_id.to_string(),
        quantity,
        price,
    };
    let receipt = store.create_listing(&request, now)?;

    let holding = store
        .holding(artwork_id)
        .ok_or_else(|| CrestoxError::HoldingNotFound {
            artwork_id: artwork_id.to_string(),
        })?;
    let schedule = store.settings().pricer.schedule(
        receipt.listing.listing_price,
        receipt.listing.created_at,
        receipt.listing.expires_at,
    );
    Ok(render_sell(&receipt, holding, &schedule, store.settings()))
}

pub fn run_validate(config_path: &PathBuf) -> Result<String, CrestoxError> {
    let config = load_config(Some(config_path))?;
    validate_config(&config)?;
    let settings = build_settings(&config)?;

    let mut out = String::new();
    let _ = writeln!(out, "Configuration is valid.");
    let _ = writeln!(
        out,
        "  platform fee:    {:.2}%",
        settings.fees.platform_fee_rate * 100.0
    );
    let _ = writeln!(
        out,
        "  royalty:         {:.2}%",
        settings.fees.royalty_rate * 100.0
    );
    let _ = writeln!(
        out,
        "  listing window:  {} days",
        settings.listing_duration.num_days()
    );
    let _ = writeln!(
        out,
        "  floor price:     {:.0}% of listing price",
        settings.pricer.floor_ratio * 100.0
    );
    let _ = writeln!(out, "  quantity policy: {}", settings.quantity_policy);
    let _ = writeln!(out, "  holdings:        {}", holdings_source(&config).source());
    Ok(out)
}

fn signed(value: f64) -> &'static str {
    if value >= 0.0 { "+" } else { "" }
}

pub fn render_portfolio(rows: &[HoldingPerformance], summary: &PortfolioSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Holdings ===");
    for row in rows {
        let _ = writeln!(
            out,
            "  {}  {:<16} {:>4} shards  value {:>12.2}  invested {:>12.2}  {}{:.2}%  ({:.1}% of portfolio)",
            row.artwork_id,
            row.artist,
            row.shards_owned,
            row.current_value,
            row.invested_amount,
            signed(row.gain_loss_percent),
            row.gain_loss_percent,
            row.weight * 100.0,
        );
    }

    let _ = writeln!(out, "\n=== Portfolio ===");
    let _ = writeln!(out, "Total Value:      {:.2}", summary.total_value);
    let _ = writeln!(out, "Total Invested:   {:.2}", summary.total_invested);
    let _ = writeln!(
        out,
        "Gain/Loss:        {}{:.2}",
        signed(summary.gain_loss_abs),
        summary.gain_loss_abs
    );
    let _ = writeln!(
        out,
        "Gain/Loss %:      {}{:.2}%",
        signed(summary.gain_loss_percent),
        summary.gain_loss_percent
    );
    out
}

pub fn render_quote(artwork_id: &str, quote: &ResaleQuote) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Resale Quote: {artwork_id} ===");
    let _ = writeln!(out, "Price per shard:  {:.2}", quote.price);
    if quote.was_clamped() {
        let _ = writeln!(
            out,
            "Quantity:         {} (requested {}, clamped to available)",
            quote.quantity, quote.requested_quantity
        );
    } else {
        let _ = writeln!(out, "Quantity:         {}", quote.quantity);
    }
    let _ = writeln!(out, "Gross:            {:.2}", quote.gross);
    let _ = writeln!(out, "Platform fee:     -{:.2}", quote.platform_fee);
    let _ = writeln!(out, "Artist royalty:   -{:.2}", quote.royalty);
    let _ = writeln!(out, "Net payout:       {:.2}", quote.net);
    let _ = writeln!(
        out,
        "Submittable:      {}",
        if quote.is_submittable() { "yes" } else { "no" }
    );
    out
}

pub fn render_decay(listing_price: f64, now: DateTime<Utc>, quote: &DecayQuote) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Listing Price at {} ===", now.to_rfc3339());
    let _ = writeln!(out, "Listing price:    {:.2}", listing_price);
    let _ = writeln!(out, "Floor price:      {:.2}", quote.min_price);
    let _ = writeln!(out, "Progress:         {:.1}%", quote.progress * 100.0);
    let _ = writeln!(out, "Current price:    {:.2}", quote.current_price);
    let _ = writeln!(out, "Status:           {}", quote.status);
    out
}

pub fn render_sell(
    receipt: &ListingReceipt,
    holding: &Holding,
    schedule: &[DecayPoint],
    settings: &MarketSettings,
) -> String {
    let listing = &receipt.listing;
    let mut out = render_quote(&listing.artwork_id, &receipt.quote);

    let _ = writeln!(out, "\n=== Listing #{} ===", listing.id);
    let _ = writeln!(out, "Created:          {}", listing.created_at.to_rfc3339());
    let _ = writeln!(out, "Expires:          {}", listing.expires_at.to_rfc3339());
    let _ = writeln!(
        out,
        "Shards:           {} listed, {} of {} still available",
        listing.quantity, holding.shards_available, holding.shards_owned
    );
    let _ = writeln!(
        out,
        "Floor:            {:.2} ({:.0}% of listing price)",
        settings.pricer.min_price(listing.listing_price),
        settings.pricer.floor_ratio * 100.0
    );

    let _ = writeln!(out, "\n=== Price Path ===");
    for point in schedule {
        let _ = writeln!(
            out,
            "  {}  {:>5.1}%  {:.2}",
            point.at.format("%Y-%m-%d %H:%M"),
            point.progress * 100.0,
            point.price
        );
    }
    out
}

//! Domain error types.

/// Top-level error type for crestox.
#[derive(Debug, thiserror::Error)]
pub enum CrestoxError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("seed data error: {reason}")]
    Data { reason: String },

    #[error("invalid holding {artwork_id}: {reason}")]
    InvalidHolding { artwork_id: String, reason: String },

    #[error("no holding for artwork {artwork_id}")]
    HoldingNotFound { artwork_id: String },

    #[error("no listing with id {id}")]
    ListingNotFound { id: u64 },

    #[error("quantity exceeds holdings for {artwork_id}: requested {requested}, available {available}")]
    QuantityExceedsAvailable {
        artwork_id: String,
        requested: u64,
        available: u64,
    },

    #[error("nothing to list for {artwork_id}: quantity is zero")]
    EmptyListing { artwork_id: String },

    #[error("listing not submittable: net payout {net:.2} is not positive")]
    NotSubmittable { net: f64 },

    #[error("invalid listing window: {reason}")]
    InvalidListingWindow { reason: String },

    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&CrestoxError> for std::process::ExitCode {
    fn from(err: &CrestoxError) -> Self {
        let code: u8 = match err {
            CrestoxError::Io(_) => 1,
            CrestoxError::ConfigParse { .. }
            | CrestoxError::ConfigInvalid { .. } => 2,
            CrestoxError::Data { .. } | CrestoxError::InvalidHolding { .. } => 3,
            CrestoxError::HoldingNotFound { .. }
            | CrestoxError::ListingNotFound { .. }
            | CrestoxError::QuantityExceedsAvailable { .. }
            | CrestoxError::EmptyListing { .. }
            | CrestoxError::NotSubmittable { .. }
            | CrestoxError::InvalidListingWindow { .. } => 4,
            CrestoxError::InvalidTimestamp { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

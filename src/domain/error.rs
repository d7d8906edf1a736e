//! Domain error types.

/// Top-level error type for fxfetch.
#[derive(Debug, thiserror::Error)]
pub enum FxFetchError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("authentication failed: {reason}")]
    Authentication { reason: String },

    #[error("connection error: {reason}")]
    Connection { reason: String },

    #[error("not connected to the trading API")]
    NotConnected,

    #[error("a trading session is already open")]
    AlreadyConnected,

    #[error("history query for {ticker} {timeframe} failed: {reason}")]
    Query {
        ticker: String,
        timeframe: String,
        reason: String,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&FxFetchError> for std::process::ExitCode {
    fn from(err: &FxFetchError) -> Self {
        let code: u8 = match err {
            FxFetchError::Io(_) | FxFetchError::Csv(_) => 1,
            FxFetchError::ConfigParse { .. }
            | FxFetchError::ConfigMissing { .. }
            | FxFetchError::ConfigInvalid { .. } => 2,
            FxFetchError::Authentication { .. } | FxFetchError::Connection { .. } => 3,
            FxFetchError::Query { .. } => 4,
            FxFetchError::NotConnected | FxFetchError::AlreadyConnected => 5,
        };
        std::process::ExitCode::from(code)
    }
}

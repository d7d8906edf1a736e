//! Trading platform port trait: login, logout and history queries.

use crate::domain::connection::{ConnectionConfig, StatusCallback};
use crate::domain::error::FxFetchError;
use crate::domain::history_query::HistoryQuery;
use crate::domain::price_bar::PriceBar;

pub trait TradingPort {
    /// Live authenticated handle returned by `login`.
    type Session;

    fn login(
        &self,
        config: &ConnectionConfig,
        on_status: StatusCallback,
    ) -> Result<Self::Session, FxFetchError>;

    fn logout(&self, session: &Self::Session) -> Result<(), FxFetchError>;

    /// Bars in broker order; an empty vector means no bars in range.
    fn get_history(
        &self,
        session: &Self::Session,
        query: &HistoryQuery,
    ) -> Result<Vec<PriceBar>, FxFetchError>;
}

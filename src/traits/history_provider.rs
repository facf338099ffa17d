use async_trait::async_trait;

use crate::error::DashboardResult;
use crate::models::{HistoryPoint, TimeRange, TokenDetails};

/// Source of the series behind trend charts
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Daily net worth samples for an address, oldest first
    async fn networth_history(&self, address: &str, latest_usd: f64) -> DashboardResult<Vec<HistoryPoint>>;

    /// Price samples for a token over a range, oldest first
    async fn price_history(&self, token: &TokenDetails, range: TimeRange) -> DashboardResult<Vec<HistoryPoint>>;
}

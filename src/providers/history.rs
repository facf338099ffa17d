use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reqwest::{Client, Url};
use tracing::debug;

use super::http_provider::{build_url, get_validated, parse_base_url};
use crate::error::DashboardResult;
use crate::models::{HistoryPoint, TimeRange, TokenDetails};
use crate::traits::history_provider::HistoryProvider;

/// Days covered by the net worth trend chart
pub const NETWORTH_HISTORY_DAYS: usize = 30;

/// Base of the synthetic walk when the wallet has no value to anchor to
const FALLBACK_BASE_USD: f64 = 10_000.0;

/// Seeded stand-in for a time-series endpoint.
///
/// The same seed, address and range always yield the same series.
#[derive(Debug, Clone)]
pub struct SyntheticHistory {
    seed: u64,
    start: NaiveDate,
}

impl SyntheticHistory {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
        }
    }

    /// First date of the net worth series
    pub fn with_start(mut self, start: NaiveDate) -> Self {
        self.start = start;
        self
    }

    fn rng_for(&self, key: &str) -> StdRng {
        StdRng::seed_from_u64(self.seed ^ fnv1a(key.as_bytes()))
    }
}

#[async_trait]
impl HistoryProvider for SyntheticHistory {
    async fn networth_history(&self, address: &str, latest_usd: f64) -> DashboardResult<Vec<HistoryPoint>> {
        let mut rng = self.rng_for(&address.to_lowercase());
        let base = if latest_usd > 0.0 { latest_usd } else { FALLBACK_BASE_USD };
        let step = base * 0.05;

        let mut value = base;
        let points = (0..NETWORTH_HISTORY_DAYS)
            .map(|i| {
                value = (value + (rng.gen::<f64>() - 0.5) * step).max(0.0);
                let date = self.start + Duration::days(i as i64);
                HistoryPoint::new(date.format("%Y-%m-%d").to_string(), value)
            })
            .collect();
        Ok(points)
    }

    async fn price_history(&self, token: &TokenDetails, range: TimeRange) -> DashboardResult<Vec<HistoryPoint>> {
        let key = format!("{}:{}:{}", token.chain, token.contract_address.to_lowercase(), range);
        let mut rng = self.rng_for(&key);

        let points = (0..range.points())
            .map(|i| {
                let price = token.usd_price * (1.0 + (rng.gen::<f64>() - 0.5) * range.spread());
                HistoryPoint::new(range.label(i), price.max(0.0))
            })
            .collect();
        Ok(points)
    }
}

/// History served by a time-series endpoint
pub struct HttpHistoryProvider {
    client: Client,
    base_url: Url,
}

impl HttpHistoryProvider {
    pub fn new(base_url: &str, client: Client) -> DashboardResult<Self> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }
}

#[async_trait]
impl HistoryProvider for HttpHistoryProvider {
    async fn networth_history(&self, address: &str, _latest_usd: f64) -> DashboardResult<Vec<HistoryPoint>> {
        let mut url = build_url(&self.base_url, &["networth-history", address])?;
        url.query_pairs_mut()
            .append_pair("days", &NETWORTH_HISTORY_DAYS.to_string());

        let points: Vec<HistoryPoint> = get_validated(&self.client, url).await?;
        debug!("Fetched {} net worth samples for {}", points.len(), address);
        Ok(points)
    }

    async fn price_history(&self, token: &TokenDetails, range: TimeRange) -> DashboardResult<Vec<HistoryPoint>> {
        let mut url = build_url(
            &self.base_url,
            &["price-history", &token.chain, &token.contract_address],
        )?;
        url.query_pairs_mut().append_pair("range", range.code());

        let points: Vec<HistoryPoint> = get_validated(&self.client, url).await?;
        debug!("Fetched {} {} price samples for {}", points.len(), range, token.symbol);
        Ok(points)
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn http_history(server: &MockServer) -> HttpHistoryProvider {
        HttpHistoryProvider::new(&format!("{}/api", server.uri()), Client::new()).unwrap()
    }

    #[tokio::test]
    async fn synthetic_networth_is_deterministic() {
        let history = SyntheticHistory::new(7);
        let a = history.networth_history("0xAbC", 2_000.0).await.unwrap();
        let b = history.networth_history("0xabc", 2_000.0).await.unwrap();

        assert_eq!(a.len(), NETWORTH_HISTORY_DAYS);
        assert_eq!(a, b);
        assert_eq!(a[0].label, "2023-01-01");
        assert_eq!(a[29].label, "2023-01-30");
        assert!(a.iter().all(|p| p.value >= 0.0));
    }

    #[tokio::test]
    async fn different_seeds_diverge() {
        let a = SyntheticHistory::new(1).networth_history("0x1", 0.0).await.unwrap();
        let b = SyntheticHistory::new(2).networth_history("0x1", 0.0).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn price_series_stays_within_spread() {
        let token = TokenDetails::new("eth", "Ether", "ETH", 3_000.0);
        let history = SyntheticHistory::new(42);

        for range in TimeRange::ALL {
            let points = history.price_history(&token, range).await.unwrap();
            assert_eq!(points.len(), range.points());
            let bound = 3_000.0 * range.spread() / 2.0 + 1e-9;
            assert!(points.iter().all(|p| (p.value - 3_000.0).abs() <= bound));
        }
    }

    #[tokio::test]
    async fn real_networth_history_asks_for_thirty_days() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/networth-history/0xabc"))
            .and(query_param("days", "30"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "label": "2024-01-01", "value": 100 },
                { "date": "2024-01-02", "price": "110.5" }
            ])))
            .mount(&server)
            .await;

        let points = http_history(&server).networth_history("0xabc", 0.0).await.unwrap();
        assert_eq!(
            points,
            vec![HistoryPoint::new("2024-01-01", 100.0), HistoryPoint::new("2024-01-02", 110.5)]
        );
    }

    #[tokio::test]
    async fn real_price_history_is_keyed_by_chain_contract_and_range() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/price-history/eth/0xuni"))
            .and(query_param("range", "1W"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "date": "Mon", "price": 7.25 },
                { "time": "Tue", "price": "7.5" }
            ])))
            .mount(&server)
            .await;

        let mut token = TokenDetails::new("eth", "Uniswap", "UNI", 7.5);
        token.contract_address = "0xuni".to_string();
        let points = http_history(&server)
            .price_history(&token, TimeRange::OneWeek)
            .await
            .unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].label, "Mon");
        assert_eq!(points[1].value, 7.5);
    }

    #[tokio::test]
    async fn real_history_server_error_is_fetch_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/networth-history/0xabc"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = http_history(&server).networth_history("0xabc", 0.0).await.unwrap_err();
        assert!(matches!(err, DashboardError::FetchFailure { status: 500, .. }));
    }
}

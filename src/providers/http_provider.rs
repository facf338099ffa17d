use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::error::{DashboardError, DashboardResult};
use crate::models::{NetworthSnapshot, NftHolding, TokenHolding, Transaction, Validate};
use crate::traits::data_provider::WalletDataProvider;

/// Aggregation API client (Moralis-backed proxy)
pub struct MoralisProxyProvider {
    client: Client,
    base_url: Url,
}

impl MoralisProxyProvider {
    /// Create a new provider against `base_url`, e.g. `https://host/api/moralis`
    pub fn new(base_url: &str, client: Client) -> DashboardResult<Self> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get<T>(&self, segments: &[&str]) -> DashboardResult<T>
    where
        T: DeserializeOwned + Validate,
    {
        let url = build_url(&self.base_url, segments)?;
        get_validated(&self.client, url).await
    }
}

#[async_trait]
impl WalletDataProvider for MoralisProxyProvider {
    async fn fetch_networth(&self, address: &str) -> DashboardResult<NetworthSnapshot> {
        let mut snapshot: NetworthSnapshot = self.get(&["networth", address]).await?;
        if snapshot.address.is_empty() {
            snapshot.address = address.to_string();
        }
        info!(
            "Net worth of {}: ${:.2} across {} chains",
            address,
            snapshot.total_networth_usd,
            snapshot.chain_count()
        );
        Ok(snapshot)
    }

    async fn fetch_tokens(&self, address: &str, page: u32) -> DashboardResult<Vec<TokenHolding>> {
        let page = page.to_string();
        let tokens: Vec<TokenHolding> = self.get(&["tokens", address, &page]).await?;
        info!("Found {} token holdings for {}", tokens.len(), address);
        Ok(tokens)
    }

    async fn fetch_nfts(&self, address: &str, page: u32) -> DashboardResult<Vec<NftHolding>> {
        let page = page.to_string();
        let nfts: Vec<NftHolding> = self.get(&["nfts", address, &page]).await?;
        info!("Found {} NFTs for {}", nfts.len(), address);
        Ok(nfts)
    }

    async fn fetch_transactions(&self, address: &str, page: u32) -> DashboardResult<Vec<Transaction>> {
        let page = page.to_string();
        let transactions: Vec<Transaction> = self.get(&["transactions", address, &page]).await?;
        info!("Found {} transactions for {}", transactions.len(), address);
        Ok(transactions)
    }
}

pub(crate) fn parse_base_url(base_url: &str) -> DashboardResult<Url> {
    let url = Url::parse(base_url.trim())
        .map_err(|e| DashboardError::Config(format!("invalid base URL {:?}: {}", base_url, e)))?;
    if url.cannot_be_a_base() {
        return Err(DashboardError::Config(format!("{} cannot be a base URL", url)));
    }
    Ok(url)
}

/// Append path segments to a base URL, escaping each one
pub(crate) fn build_url(base: &Url, segments: &[&str]) -> DashboardResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| DashboardError::Config(format!("{} cannot be a base URL", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// One GET, decoded and schema-checked.
///
/// Non-2xx is a `FetchFailure`, a request that never completes is a
/// `NetworkFailure`, and an undecodable or invalid body is a `MalformedResponse`.
pub(crate) async fn get_validated<T>(client: &Client, url: Url) -> DashboardResult<T>
where
    T: DeserializeOwned + Validate,
{
    let endpoint = url.path().to_string();
    debug!("GET {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| DashboardError::NetworkFailure {
            endpoint: endpoint.clone(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        warn!("{} responded with {}", endpoint, status);
        return Err(DashboardError::FetchFailure {
            endpoint,
            status: status.as_u16(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|source| DashboardError::NetworkFailure {
            endpoint: endpoint.clone(),
            source,
        })?;

    let decoded: T = serde_json::from_slice(&body).map_err(|e| DashboardError::MalformedResponse {
        endpoint: endpoint.clone(),
        reason: e.to_string(),
    })?;

    decoded
        .validate()
        .map_err(|reason| DashboardError::MalformedResponse { endpoint, reason })?;

    Ok(decoded)
}

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use reqwest::{Client, Url};
use tracing::debug;

use super::http_provider::{build_url, get_validated, parse_base_url};
use crate::error::{DashboardError, DashboardResult};
use crate::models::TokenDetails;
use crate::traits::token_directory::TokenDirectory;

/// Token metadata collaborator with a per-process cache
pub struct HttpTokenDirectory {
    client: Client,
    base_url: Url,
    cache: Arc<DashMap<(String, u64), TokenDetails>>,
}

impl HttpTokenDirectory {
    /// Create a new token directory against `base_url`, e.g. `https://host/api`
    pub fn new(base_url: &str, client: Client) -> DashboardResult<Self> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
            cache: Arc::new(DashMap::new()),
        })
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl TokenDirectory for HttpTokenDirectory {
    async fn get_token(&self, contract: &str, chain_id: u64) -> DashboardResult<Option<TokenDetails>> {
        let key = (contract.to_lowercase(), chain_id);

        // Check cache first
        if let Some(details) = self.cache.get(&key) {
            return Ok(Some(details.clone()));
        }

        let mut url = build_url(&self.base_url, &["tokens", contract])?;
        url.query_pairs_mut().append_pair("chain", &chain_id.to_string());

        match get_validated::<TokenDetails>(&self.client, url).await {
            Ok(details) => {
                self.cache.insert(key, details.clone());
                Ok(Some(details))
            }
            Err(DashboardError::FetchFailure { status: 404, .. }) => {
                debug!("No metadata for {} on chain {}", contract, chain_id);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn list_tokens(&self) -> DashboardResult<Vec<TokenDetails>> {
        let url = build_url(&self.base_url, &["tokens"])?;
        let tokens: Vec<TokenDetails> = get_validated(&self.client, url).await?;
        debug!("Token directory lists {} tokens", tokens.len());
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn caches_found_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tokens/0xUNI"))
            .and(query_param("chain", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "contractAddress": "0xUNI", "chain": "eth", "name": "Uniswap", "symbol": "UNI", "usdPrice": 7.5
            })))
            .expect(1)
            .mount(&server)
            .await;

        let directory = HttpTokenDirectory::new(&format!("{}/api", server.uri()), Client::new()).unwrap();
        let first = directory.get_token("0xUNI", 1).await.unwrap().unwrap();
        let second = directory.get_token("0xuni", 1).await.unwrap().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.symbol, "UNI");
        assert_eq!(directory.cached_len(), 1);
    }

    #[tokio::test]
    async fn unknown_token_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tokens/0xdead"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let directory = HttpTokenDirectory::new(&format!("{}/api", server.uri()), Client::new()).unwrap();
        assert_eq!(directory.get_token("0xdead", 1).await.unwrap(), None);
        assert_eq!(directory.cached_len(), 0);
    }

    #[tokio::test]
    async fn lists_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tokens"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "chain": "eth", "symbol": "UNI" },
                { "chain": "bsc", "symbol": "CAKE" }
            ])))
            .mount(&server)
            .await;

        let directory = HttpTokenDirectory::new(&format!("{}/api", server.uri()), Client::new()).unwrap();
        let tokens = directory.list_tokens().await.unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].symbol, "CAKE");
    }
}

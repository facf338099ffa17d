use std::str::FromStr;
use std::time::Duration;

use tracing::level_filters::LevelFilter;
use tracing::warn;

use crate::error::{DashboardError, DashboardResult};
use crate::models::{AmountScaling, TimeRange, WalletCategory};

pub const DEFAULT_DASHBOARD_API_URL: &str = "https://d4og4sw4sgogskkc8o0okk8k.keke.ceo/api/moralis";
pub const DEFAULT_TOKEN_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_HISTORY_SEED: u64 = 42;
pub const DEFAULT_STORE_PATH: &str = "wallets.json";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_CHAIN_ID: u64 = 1;

/// Where history series come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryMode {
    #[default]
    Synthetic,
    Real,
}

impl FromStr for HistoryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "synthetic" => Ok(HistoryMode::Synthetic),
            "real" => Ok(HistoryMode::Real),
            other => Err(format!("unknown history mode {:?}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub dashboard_api_url: String,
    pub token_api_url: String,
    pub history_api_url: Option<String>,
    pub history_mode: HistoryMode,
    pub history_seed: u64,
    pub amount_scaling: AmountScaling,
    pub wallet_store_path: String,
    pub wallet_address: Option<String>,
    pub wallet_category: WalletCategory,
    pub token_contract: Option<String>,
    pub token_chain_id: u64,
    pub price_range: TimeRange,
    pub request_timeout: Duration,
    pub log_level: LevelFilter,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dashboard_api_url: DEFAULT_DASHBOARD_API_URL.to_string(),
            token_api_url: DEFAULT_TOKEN_API_URL.to_string(),
            history_api_url: None,
            history_mode: HistoryMode::default(),
            history_seed: DEFAULT_HISTORY_SEED,
            amount_scaling: AmountScaling::default(),
            wallet_store_path: DEFAULT_STORE_PATH.to_string(),
            wallet_address: None,
            wallet_category: WalletCategory::default(),
            token_contract: None,
            token_chain_id: DEFAULT_CHAIN_ID,
            price_range: TimeRange::default(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            log_level: LevelFilter::INFO,
        }
    }
}

impl DashboardConfig {
    /// Read the process environment; call `dotenvy::dotenv()` first
    pub fn from_env() -> DashboardResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DashboardResult<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let config = Self {
            dashboard_api_url: get("DASHBOARD_API_URL").unwrap_or(defaults.dashboard_api_url),
            token_api_url: get("TOKEN_API_URL").unwrap_or(defaults.token_api_url),
            history_api_url: get("HISTORY_API_URL"),
            history_mode: parse_or(get("HISTORY_MODE"), "HISTORY_MODE", defaults.history_mode),
            history_seed: parse_or(get("HISTORY_SEED"), "HISTORY_SEED", defaults.history_seed),
            amount_scaling: parse_or(get("AMOUNT_SCALING"), "AMOUNT_SCALING", defaults.amount_scaling),
            wallet_store_path: get("WALLET_STORE_PATH").unwrap_or(defaults.wallet_store_path),
            wallet_address: get("WALLET_ADDRESS"),
            wallet_category: get("WALLET_CATEGORY")
                .map(WalletCategory::from)
                .unwrap_or(defaults.wallet_category),
            token_contract: get("TOKEN_CONTRACT"),
            token_chain_id: parse_or(get("TOKEN_CHAIN_ID"), "TOKEN_CHAIN_ID", defaults.token_chain_id),
            price_range: parse_or(get("PRICE_RANGE"), "PRICE_RANGE", defaults.price_range),
            request_timeout: Duration::from_millis(parse_or(
                get("REQUEST_TIMEOUT_MS"),
                "REQUEST_TIMEOUT_MS",
                DEFAULT_TIMEOUT_MS,
            )),
            log_level: parse_or(get("LOG_LEVEL"), "LOG_LEVEL", defaults.log_level),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> DashboardResult<()> {
        if self.history_mode == HistoryMode::Real && self.history_api_url.is_none() {
            return Err(DashboardError::Config(
                "HISTORY_MODE=real requires HISTORY_API_URL".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(DashboardError::Config("REQUEST_TIMEOUT_MS must be positive".to_string()));
        }
        Ok(())
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => default,
        Some(raw) => match raw.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Ignoring {}={:?}: {}; using the default", key, raw, e);
                default
            }
        },
    }
}

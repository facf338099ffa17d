use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use wallet_dashboard::{
    ConsoleEventHandler, Dashboard, DashboardConfig, FileWalletStore, HistoryMode, HistoryProvider,
    HttpHistoryProvider, HttpTokenDirectory, MoralisProxyProvider, SyntheticHistory, WalletRegistry,
    VERSION,
};
use wallet_dashboard::views::TokenQuery;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = DashboardConfig::from_env().context("invalid configuration")?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_level(true)
        .with_target(false)
        .with_max_level(config.log_level)
        .with_file(true)
        .with_line_number(true)
        .init();

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run(config))
}

async fn run(config: DashboardConfig) -> anyhow::Result<()> {
    info!("Initializing wallet dashboard v{}...", VERSION);
    info!("Dashboard API: {}", config.dashboard_api_url);
    info!("Token API: {}", config.token_api_url);

    let client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("failed to build HTTP client")?;

    let data_provider = Arc::new(MoralisProxyProvider::new(&config.dashboard_api_url, client.clone())?);
    let token_directory = Arc::new(HttpTokenDirectory::new(&config.token_api_url, client.clone())?);
    let history_provider: Arc<dyn HistoryProvider> = match (config.history_mode, &config.history_api_url) {
        (HistoryMode::Real, Some(url)) => Arc::new(HttpHistoryProvider::new(url, client)?),
        _ => Arc::new(SyntheticHistory::new(config.history_seed)),
    };

    let store = Arc::new(FileWalletStore::new(&config.wallet_store_path));
    let registry = WalletRegistry::load(store);
    info!("Loaded {} watched wallets from {}", registry.len(), config.wallet_store_path);

    let dashboard = Dashboard::new(
        registry,
        data_provider,
        token_directory,
        history_provider,
        Arc::new(ConsoleEventHandler::new()),
    )
    .with_scaling(config.amount_scaling);

    if let Some(address) = &config.wallet_address {
        match dashboard.add_wallet(address, config.wallet_category.clone()).await {
            Ok(true) => info!("Now watching {} ({})", address, config.wallet_category),
            Ok(false) => {}
            Err(e) => warn!("Could not save {} to the wallet list: {}", address, e),
        }
    }

    dashboard.refresh_watched().await;
    dashboard.render_watched().await;

    if let Some(address) = &config.wallet_address {
        dashboard.show_wallet(address, &TokenQuery::default(), true).await;
    }

    match &config.token_contract {
        Some(contract) => {
            dashboard
                .token_detail_view(contract, config.token_chain_id, config.price_range)
                .await;
        }
        None => {
            dashboard.token_list_view().await;
        }
    }

    Ok(())
}

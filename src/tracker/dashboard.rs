use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use futures_util::future::join_all;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::page::{FetchTrigger, PageState, PageView};
use crate::error::{DashboardError, DashboardResult};
use crate::models::{
    AmountScaling, NetworthSnapshot, NftHolding, PageCategory, TimeRange, TokenDetails, TokenHolding,
    Transaction, WalletCategory, WatchedWallet,
};
use crate::registry::{WalletGroup, WalletRegistry};
use crate::traits::{
    data_provider::WalletDataProvider, event_handler::DashboardEventHandler,
    history_provider::HistoryProvider, token_directory::TokenDirectory,
};
use crate::views::{
    networth::{networth_trend, wallet_card, NetworthTrend, WalletCard},
    nft::{nft_gallery, NftGallery},
    token_detail::{token_detail, token_listing, TokenDetailView, TokenListingRow},
    tokens::{token_table, TokenQuery, TokenTable},
    transactions::{transaction_list, TransactionList},
};

/// Page of each paginated collection shown by default
pub const FIRST_PAGE: u32 = 1;

/// Identity of one fetch: what, for whom, which page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageKey {
    pub category: PageCategory,
    pub subject: String,
    /// Page number, or the chain id for token pages
    pub page: u64,
}

impl PageKey {
    pub fn new(category: PageCategory, subject: &str, page: impl Into<u64>) -> Self {
        Self {
            category,
            subject: subject.trim().to_lowercase(),
            page: page.into(),
        }
    }
}

type Slots<T> = DashMap<PageKey, PageState<T>>;

/// Wires the registry, fetchers, derivers and renderers together.
///
/// Each page slice is independent: a slow or failed fetch only touches its
/// own slot, and a response whose generation was superseded is dropped.
pub struct Dashboard {
    data_provider: Arc<dyn WalletDataProvider>,
    token_directory: Arc<dyn TokenDirectory>,
    history_provider: Arc<dyn HistoryProvider>,
    event_handler: Arc<dyn DashboardEventHandler>,
    registry: Mutex<WalletRegistry>,
    scaling: AmountScaling,
    generation: AtomicU64,
    networth: Slots<NetworthSnapshot>,
    tokens: Slots<Vec<TokenHolding>>,
    nfts: Slots<Vec<NftHolding>>,
    transactions: Slots<Vec<Transaction>>,
    token_details: Slots<TokenDetails>,
}

impl Dashboard {
    /// Create a new dashboard
    pub fn new(
        registry: WalletRegistry,
        data_provider: Arc<dyn WalletDataProvider>,
        token_directory: Arc<dyn TokenDirectory>,
        history_provider: Arc<dyn HistoryProvider>,
        event_handler: Arc<dyn DashboardEventHandler>,
    ) -> Self {
        Self {
            data_provider,
            token_directory,
            history_provider,
            event_handler,
            registry: Mutex::new(registry),
            scaling: AmountScaling::default(),
            generation: AtomicU64::new(0),
            networth: DashMap::new(),
            tokens: DashMap::new(),
            nfts: DashMap::new(),
            transactions: DashMap::new(),
            token_details: DashMap::new(),
        }
    }

    pub fn with_scaling(mut self, scaling: AmountScaling) -> Self {
        self.scaling = scaling;
        self
    }

    pub async fn watched_wallets(&self) -> Vec<WatchedWallet> {
        self.registry.lock().await.wallets().to_vec()
    }

    pub async fn wallet_groups(&self) -> Vec<WalletGroup> {
        self.registry.lock().await.list()
    }

    /// Watch an address and fetch its net worth; no-op for known addresses.
    ///
    /// A failed save still leaves the wallet watched and fetched. The result
    /// is the registry's; fetch problems only show in the page state.
    pub async fn add_wallet(&self, address: &str, category: impl Into<WalletCategory>) -> DashboardResult<bool> {
        let outcome = self.registry.lock().await.add(address, category);
        if matches!(outcome, Ok(true) | Err(DashboardError::Persistence(_))) {
            if let Some(trigger) = self.networth_refresh_trigger(address) {
                if let Err(e) = self.load_networth(address, trigger).await {
                    debug!("Net worth of {} not fetched on add: {}", address, e);
                }
            }
        }
        outcome
    }

    /// Stop watching an address and drop every cached slice for it
    pub async fn remove_wallet(&self, address: &str) -> DashboardResult<Option<WatchedWallet>> {
        let outcome = self.registry.lock().await.remove(address);
        if !matches!(outcome, Ok(None)) {
            let subject = address.trim().to_lowercase();
            self.networth.retain(|k, _| k.subject != subject);
            self.tokens.retain(|k, _| k.subject != subject);
            self.nfts.retain(|k, _| k.subject != subject);
            self.transactions.retain(|k, _| k.subject != subject);
            debug!("Dropped cached pages of {}", subject);
        }
        outcome
    }

    /// Fetch net worth for every watched wallet concurrently.
    ///
    /// Loaded wallets are re-fetched, idle ones opened, failed ones left for
    /// a manual retry. Completion order is unspecified.
    pub async fn refresh_watched(&self) {
        let wallets = self.watched_wallets().await;
        info!("Refreshing net worth of {} watched wallets", wallets.len());

        let fetches = wallets.iter().filter_map(|wallet| {
            let trigger = self.networth_refresh_trigger(&wallet.address)?;
            Some(self.load_networth(&wallet.address, trigger))
        });

        for outcome in join_all(fetches).await {
            if let Err(e) = outcome {
                warn!("Skipped a net worth refresh: {}", e);
            }
        }
    }

    /// Idle cards open, loaded ones re-fetch, failed or in-flight ones wait
    fn networth_refresh_trigger(&self, address: &str) -> Option<FetchTrigger> {
        let key = PageKey::new(PageCategory::Networth, address, FIRST_PAGE);
        let slot = self.networth.get(&key);
        match slot.as_deref() {
            None | Some(PageState::Idle) => Some(FetchTrigger::Initial),
            Some(PageState::Success(_)) | Some(PageState::NotFound(_)) => Some(FetchTrigger::Refetch),
            Some(PageState::Loading { .. }) | Some(PageState::Failure(_)) => None,
        }
    }

    /// Render every watched wallet card, grouped by category
    pub async fn render_watched(&self) {
        let groups = self.wallet_groups().await;
        let rendered: Vec<(WalletGroup, Vec<PageView<WalletCard>>)> = groups
            .into_iter()
            .map(|group| {
                let cards = group
                    .wallets
                    .iter()
                    .map(|w| self.wallet_card_view(&w.address))
                    .collect();
                (group, cards)
            })
            .collect();
        self.event_handler.render_wallet_groups(&rendered).await;
    }

    /// Open all four pages of an address concurrently and render them
    pub async fn show_wallet(&self, address: &str, query: &TokenQuery, hide_spam: bool) {
        let (networth, tokens, nfts, transactions) = tokio::join!(
            self.open(PageCategory::Networth, address),
            self.open(PageCategory::Tokens, address),
            self.open(PageCategory::Nfts, address),
            self.open(PageCategory::Transactions, address),
        );
        for outcome in [networth, tokens, nfts, transactions] {
            if let Err(e) = outcome {
                debug!("Page of {} not opened: {}", address, e);
            }
        }

        let handler = &self.event_handler;
        handler.render_networth(address, &self.networth_view(address).await).await;
        handler.render_tokens(address, &self.tokens_view(address, FIRST_PAGE, query)).await;
        handler.render_nfts(address, &self.nfts_view(address, FIRST_PAGE, hide_spam)).await;
        handler
            .render_transactions(address, &self.transactions_view(address, FIRST_PAGE))
            .await;
    }

    /// Fetch a wallet page if it has never been fetched
    pub async fn open(&self, category: PageCategory, address: &str) -> DashboardResult<()> {
        let key = PageKey::new(category, address, FIRST_PAGE);
        let trigger = match category {
            PageCategory::Networth => open_trigger(&self.networth, &key),
            PageCategory::Tokens => open_trigger(&self.tokens, &key),
            PageCategory::Nfts => open_trigger(&self.nfts, &key),
            PageCategory::Transactions => open_trigger(&self.transactions, &key),
            PageCategory::TokenDetail | PageCategory::TokenList => None,
        };
        match trigger {
            Some(trigger) => self.fetch(category, address, trigger).await,
            None => Ok(()),
        }
    }

    /// Explicit re-fetch of a loaded page
    pub async fn refetch(&self, category: PageCategory, address: &str) -> DashboardResult<()> {
        self.fetch(category, address, FetchTrigger::Refetch).await
    }

    /// Manual retry of a failed page
    pub async fn retry(&self, category: PageCategory, address: &str) -> DashboardResult<()> {
        self.fetch(category, address, FetchTrigger::Retry).await
    }

    async fn fetch(&self, category: PageCategory, address: &str, trigger: FetchTrigger) -> DashboardResult<()> {
        match category {
            PageCategory::Networth => self.load_networth(address, trigger).await.map(drop),
            PageCategory::Tokens => self.load_tokens(address, FIRST_PAGE, trigger).await.map(drop),
            PageCategory::Nfts => self.load_nfts(address, FIRST_PAGE, trigger).await.map(drop),
            PageCategory::Transactions => self
                .load_transactions(address, FIRST_PAGE, trigger)
                .await
                .map(drop),
            PageCategory::TokenDetail | PageCategory::TokenList => Err(DashboardError::InvalidTransition {
                from: "a token page",
                action: "fetch by wallet address",
            }),
        }
    }

    pub async fn load_networth(&self, address: &str, trigger: FetchTrigger) -> DashboardResult<PageState<NetworthSnapshot>> {
        let key = PageKey::new(PageCategory::Networth, address, FIRST_PAGE);
        self.load(&self.networth, key, trigger, self.data_provider.fetch_networth(address))
            .await
    }

    pub async fn load_tokens(&self, address: &str, page: u32, trigger: FetchTrigger) -> DashboardResult<PageState<Vec<TokenHolding>>> {
        let key = PageKey::new(PageCategory::Tokens, address, page);
        self.load(&self.tokens, key, trigger, self.data_provider.fetch_tokens(address, page))
            .await
    }

    pub async fn load_nfts(&self, address: &str, page: u32, trigger: FetchTrigger) -> DashboardResult<PageState<Vec<NftHolding>>> {
        let key = PageKey::new(PageCategory::Nfts, address, page);
        self.load(&self.nfts, key, trigger, self.data_provider.fetch_nfts(address, page))
            .await
    }

    pub async fn load_transactions(&self, address: &str, page: u32, trigger: FetchTrigger) -> DashboardResult<PageState<Vec<Transaction>>> {
        let key = PageKey::new(PageCategory::Transactions, address, page);
        self.load(
            &self.transactions,
            key,
            trigger,
            self.data_provider.fetch_transactions(address, page),
        )
        .await
    }

    /// Token metadata by contract; an unknown contract ends as `NotFound`
    pub async fn load_token_detail(&self, contract: &str, chain_id: u64, trigger: FetchTrigger) -> DashboardResult<PageState<TokenDetails>> {
        let key = PageKey::new(PageCategory::TokenDetail, contract, chain_id);
        let directory = self.token_directory.clone();
        let contract_owned = contract.to_string();
        let lookup = async move {
            directory
                .get_token(&contract_owned, chain_id)
                .await?
                .ok_or_else(|| DashboardError::MissingResource(format!("token {} on chain {}", contract_owned, chain_id)))
        };
        self.load(&self.token_details, key, trigger, lookup).await
    }

    /// Run one fetch against its slot, keeping only the newest generation
    async fn load<T, F>(&self, slots: &Slots<T>, key: PageKey, trigger: FetchTrigger, fetch: F) -> DashboardResult<PageState<T>>
    where
        T: Clone,
        F: Future<Output = DashboardResult<T>>,
    {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        slots.entry(key.clone()).or_default().begin(generation, trigger)?;

        let outcome = fetch.await;

        // Guard released before any await below
        let (applied, state, error) = match slots.get_mut(&key) {
            Some(mut slot) => {
                let (applied, error) = match outcome {
                    Ok(data) => (slot.complete(generation, Ok(data), key.category), None),
                    Err(e) => (slot.complete(generation, Err(&e), key.category), Some(e)),
                };
                (applied, slot.value().clone(), error)
            }
            None => {
                debug!("{} of {} was dropped while in flight", key.category, key.subject);
                return Ok(PageState::Idle);
            }
        };

        if !applied {
            debug!(
                "Discarded superseded {} response for {} (generation {})",
                key.category, key.subject, generation
            );
        } else if let Some(e) = &error {
            warn!("Failed to load {} for {}: {}", key.category, key.subject, e);
            self.event_handler.handle_error(key.category, &key.subject, e).await;
        }
        Ok(state)
    }

    pub fn networth_state(&self, address: &str) -> PageState<NetworthSnapshot> {
        state_of(&self.networth, &PageKey::new(PageCategory::Networth, address, FIRST_PAGE))
    }

    pub fn wallet_card_view(&self, address: &str) -> PageView<WalletCard> {
        self.networth_state(address)
            .view(PageCategory::Networth, wallet_card, |_| false)
    }

    /// Wallet header: card plus trend against the history series
    pub async fn networth_view(&self, address: &str) -> PageView<(WalletCard, NetworthTrend)> {
        let state = self.networth_state(address);
        let Some(snapshot) = state.data() else {
            return state.pending().unwrap_or(PageView::Loading);
        };

        let points = match self
            .history_provider
            .networth_history(address, snapshot.total_networth_usd)
            .await
        {
            Ok(points) => points,
            Err(e) => {
                warn!("No net worth history for {}: {}", address, e);
                Vec::new()
            }
        };

        PageView::Ready((wallet_card(snapshot), networth_trend(snapshot, points)))
    }

    pub fn tokens_view(&self, address: &str, page: u32, query: &TokenQuery) -> PageView<TokenTable> {
        let scaling = self.scaling;
        state_of(&self.tokens, &PageKey::new(PageCategory::Tokens, address, page)).view(
            PageCategory::Tokens,
            |holdings| token_table(holdings, scaling, query),
            TokenTable::is_empty,
        )
    }

    pub fn nfts_view(&self, address: &str, page: u32, hide_spam: bool) -> PageView<NftGallery> {
        state_of(&self.nfts, &PageKey::new(PageCategory::Nfts, address, page)).view(
            PageCategory::Nfts,
            |nfts| nft_gallery(nfts, hide_spam),
            NftGallery::is_empty,
        )
    }

    pub fn transactions_view(&self, address: &str, page: u32) -> PageView<TransactionList> {
        state_of(&self.transactions, &PageKey::new(PageCategory::Transactions, address, page)).view(
            PageCategory::Transactions,
            |txs| transaction_list(txs, address),
            TransactionList::is_empty,
        )
    }

    /// Price card for a token over `range`, fetching metadata on first use
    pub async fn token_detail_view(&self, contract: &str, chain_id: u64, range: TimeRange) -> PageView<TokenDetailView> {
        let key = PageKey::new(PageCategory::TokenDetail, contract, chain_id);
        if let Some(trigger) = open_trigger(&self.token_details, &key) {
            if let Err(e) = self.load_token_detail(contract, chain_id, trigger).await {
                debug!("Token page {} not opened: {}", contract, e);
            }
        }

        let state = state_of(&self.token_details, &key);
        let view = match state.data() {
            Some(details) => {
                let points = match self.history_provider.price_history(details, range).await {
                    Ok(points) => points,
                    Err(e) => {
                        warn!("No {} price history for {}: {}", range, details.symbol, e);
                        Vec::new()
                    }
                };
                PageView::Ready(token_detail(details, range, points))
            }
            None => state.pending().unwrap_or(PageView::Loading),
        };
        self.event_handler.render_token_detail(contract, &view).await;
        view
    }

    /// Known tokens; a failed listing reads as not found
    pub async fn token_list_view(&self) -> PageView<Vec<TokenListingRow>> {
        let view = match self.token_directory.list_tokens().await {
            Ok(tokens) if tokens.is_empty() => PageView::Empty(PageCategory::TokenList.empty_message()),
            Ok(tokens) => PageView::Ready(token_listing(&tokens)),
            Err(e) => {
                warn!("Token listing unavailable: {}", e);
                PageView::NotFound(DashboardError::MissingResource(e.to_string()).user_message(PageCategory::TokenList))
            }
        };
        self.event_handler.render_token_list(&view).await;
        view
    }
}

fn open_trigger<T>(slots: &Slots<T>, key: &PageKey) -> Option<FetchTrigger> {
    match slots.get(key) {
        Some(state) => state.open_trigger(),
        None => Some(FetchTrigger::Initial),
    }
}

fn state_of<T: Clone>(slots: &Slots<T>, key: &PageKey) -> PageState<T> {
    slots.get(key).map(|s| s.value().clone()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::models::{ChainNetworth, HistoryPoint};
    use crate::providers::{MemoryWalletStore, SyntheticHistory};
    use crate::views::token_detail::TokenListingRow;

    #[derive(Default)]
    struct FakeData {
        fail_networth_for: Option<&'static str>,
        fail_nfts: bool,
        empty_tokens: bool,
        gate: Option<Arc<Notify>>,
        token_calls: AtomicUsize,
        nft_gate: Option<Arc<Notify>>,
        nft_calls: AtomicUsize,
    }

    fn holding(symbol: &str, value: f64, price: f64) -> TokenHolding {
        TokenHolding::new(value, TokenDetails::new("eth", symbol, symbol, price))
    }

    #[async_trait]
    impl WalletDataProvider for FakeData {
        async fn fetch_networth(&self, address: &str) -> DashboardResult<NetworthSnapshot> {
            if self.fail_networth_for == Some(address) {
                return Err(DashboardError::FetchFailure {
                    endpoint: format!("/networth/{}", address),
                    status: 502,
                });
            }
            Ok(NetworthSnapshot::new(address, 250.0, vec![ChainNetworth::new("eth", 250.0)]))
        }

        async fn fetch_tokens(&self, _address: &str, _page: u32) -> DashboardResult<Vec<TokenHolding>> {
            let call = self.token_calls.fetch_add(1, Ordering::SeqCst);
            if self.empty_tokens {
                return Ok(vec![]);
            }
            match (&self.gate, call) {
                (Some(gate), 0) => {
                    gate.notified().await;
                    Ok(vec![holding("OLD", 1.0, 1.0)])
                }
                _ => Ok(vec![holding("NEW", 2.0, 3.0)]),
            }
        }

        async fn fetch_nfts(&self, address: &str, _page: u32) -> DashboardResult<Vec<NftHolding>> {
            let call = self.nft_calls.fetch_add(1, Ordering::SeqCst);
            if let (Some(gate), 0) = (&self.nft_gate, call) {
                gate.notified().await;
                return Err(DashboardError::FetchFailure {
                    endpoint: format!("/nfts/{}/1", address),
                    status: 503,
                });
            }
            if self.fail_nfts {
                return Err(DashboardError::FetchFailure {
                    endpoint: format!("/nfts/{}/1", address),
                    status: 500,
                });
            }
            Ok(vec![])
        }

        async fn fetch_transactions(&self, _address: &str, _page: u32) -> DashboardResult<Vec<Transaction>> {
            Ok(vec![])
        }
    }

    struct FakeDirectory;

    #[async_trait]
    impl TokenDirectory for FakeDirectory {
        async fn get_token(&self, contract: &str, _chain_id: u64) -> DashboardResult<Option<TokenDetails>> {
            Ok((contract == "0xuni").then(|| TokenDetails::new("eth", "Uniswap", "UNI", 7.0)))
        }

        async fn list_tokens(&self) -> DashboardResult<Vec<TokenDetails>> {
            Ok(vec![])
        }
    }

    #[derive(Default)]
    struct RecordingHandler {
        errors: std::sync::Mutex<Vec<PageCategory>>,
    }

    impl RecordingHandler {
        fn errors(&self) -> Vec<PageCategory> {
            self.errors.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DashboardEventHandler for RecordingHandler {
        async fn render_wallet_groups(&self, _groups: &[(WalletGroup, Vec<PageView<WalletCard>>)]) {}
        async fn render_networth(&self, _address: &str, _view: &PageView<(WalletCard, NetworthTrend)>) {}
        async fn render_tokens(&self, _address: &str, _view: &PageView<TokenTable>) {}
        async fn render_nfts(&self, _address: &str, _view: &PageView<NftGallery>) {}
        async fn render_transactions(&self, _address: &str, _view: &PageView<TransactionList>) {}
        async fn render_token_detail(&self, _contract: &str, _view: &PageView<TokenDetailView>) {}
        async fn render_token_list(&self, _view: &PageView<Vec<TokenListingRow>>) {}

        async fn handle_error(&self, category: PageCategory, _address: &str, _error: &DashboardError) {
            self.errors.lock().unwrap().push(category);
        }
    }

    fn dashboard(data: FakeData) -> (Dashboard, Arc<RecordingHandler>) {
        let handler = Arc::new(RecordingHandler::default());
        let registry = WalletRegistry::load(Arc::new(MemoryWalletStore::new()));
        let dashboard = Dashboard::new(
            registry,
            Arc::new(data),
            Arc::new(FakeDirectory),
            Arc::new(SyntheticHistory::new(42)),
            handler.clone(),
        );
        (dashboard, handler)
    }

    #[tokio::test]
    async fn failed_page_does_not_affect_siblings() {
        let (dashboard, handler) = dashboard(FakeData {
            fail_nfts: true,
            ..Default::default()
        });

        dashboard.show_wallet("0xabc", &TokenQuery::default(), true).await;

        assert_eq!(
            dashboard.nfts_view("0xabc", FIRST_PAGE, true),
            PageView::Failed("Failed to load NFTs. Please try again later.".to_string())
        );
        assert!(dashboard.tokens_view("0xabc", FIRST_PAGE, &TokenQuery::default()).ready().is_some());
        assert!(matches!(dashboard.networth_view("0xabc").await, PageView::Ready(_)));
        assert_eq!(
            dashboard.transactions_view("0xabc", FIRST_PAGE),
            PageView::Empty("No transactions found for this address.".to_string())
        );
        assert_eq!(handler.errors(), vec![PageCategory::Nfts]);
    }

    #[tokio::test]
    async fn failure_waits_for_manual_retry() {
        let (dashboard, handler) = dashboard(FakeData {
            fail_nfts: true,
            ..Default::default()
        });

        dashboard.open(PageCategory::Nfts, "0xabc").await.unwrap();
        // Opening again does not refetch a failed page
        dashboard.open(PageCategory::Nfts, "0xabc").await.unwrap();
        assert_eq!(handler.errors().len(), 1);

        assert!(matches!(
            dashboard.refetch(PageCategory::Nfts, "0xabc").await,
            Err(DashboardError::InvalidTransition { .. })
        ));
        dashboard.retry(PageCategory::Nfts, "0xabc").await.unwrap();
        assert_eq!(handler.errors().len(), 2);
    }

    #[tokio::test]
    async fn superseded_fetch_is_discarded() {
        let gate = Arc::new(Notify::new());
        let (dashboard, _) = dashboard(FakeData {
            gate: Some(gate.clone()),
            ..Default::default()
        });

        let slow = dashboard.load_tokens("0xabc", FIRST_PAGE, FetchTrigger::Initial);
        let fast = async {
            let state = dashboard
                .load_tokens("0xabc", FIRST_PAGE, FetchTrigger::Refetch)
                .await
                .unwrap();
            gate.notify_one();
            state
        };
        let (slow, fast) = tokio::join!(slow, fast);

        let symbol = |state: &PageState<Vec<TokenHolding>>| state.data().map(|t| t[0].token_details.symbol.clone());
        assert_eq!(symbol(&fast), Some("NEW".to_string()));
        assert_eq!(symbol(&slow.unwrap()), Some("NEW".to_string()));

        let table = dashboard.tokens_view("0xabc", FIRST_PAGE, &TokenQuery::default());
        assert_eq!(table.ready().unwrap().rows[0].symbol, "NEW");
    }

    #[tokio::test]
    async fn superseded_failure_is_not_reported() {
        let gate = Arc::new(Notify::new());
        let (dashboard, handler) = dashboard(FakeData {
            nft_gate: Some(gate.clone()),
            ..Default::default()
        });

        let slow = dashboard.load_nfts("0xabc", FIRST_PAGE, FetchTrigger::Initial);
        let fast = async {
            let state = dashboard
                .load_nfts("0xabc", FIRST_PAGE, FetchTrigger::Refetch)
                .await
                .unwrap();
            gate.notify_one();
            state
        };
        let (slow, fast) = tokio::join!(slow, fast);

        assert_eq!(fast, PageState::Success(vec![]));
        assert_eq!(slow.unwrap(), PageState::Success(vec![]));
        assert!(handler.errors().is_empty());
    }

    #[tokio::test]
    async fn adding_a_viewed_wallet_succeeds() {
        let (dashboard, handler) = dashboard(FakeData::default());
        dashboard.show_wallet("0xabc", &TokenQuery::default(), true).await;
        assert!(dashboard.networth_state("0xabc").data().is_some());

        assert!(dashboard.add_wallet("0xABC", "Personal").await.unwrap());
        assert_eq!(dashboard.watched_wallets().await.len(), 1);
        assert!(dashboard.networth_state("0xabc").data().is_some());
        assert!(handler.errors().is_empty());
    }

    #[tokio::test]
    async fn adding_a_failed_wallet_keeps_the_registry_result() {
        let (dashboard, handler) = dashboard(FakeData {
            fail_networth_for: Some("0xbad"),
            ..Default::default()
        });
        dashboard.open(PageCategory::Networth, "0xbad").await.unwrap();

        assert!(dashboard.add_wallet("0xbad", "Personal").await.unwrap());
        // No second fetch until a manual retry
        assert_eq!(handler.errors(), vec![PageCategory::Networth]);
    }

    #[test]
    fn chain_ids_above_u32_get_their_own_slot() {
        let low = PageKey::new(PageCategory::TokenDetail, "0xUNI", 1u64);
        let high = PageKey::new(PageCategory::TokenDetail, "0xuni", 1u64 + (1u64 << 32));
        assert_ne!(low, high);
        assert_eq!(low, PageKey::new(PageCategory::TokenDetail, " 0xuni ", 1u64));
    }

    #[tokio::test]
    async fn empty_holdings_show_empty_message() {
        let (dashboard, _) = dashboard(FakeData {
            empty_tokens: true,
            ..Default::default()
        });

        dashboard.open(PageCategory::Tokens, "0xabc").await.unwrap();
        assert_eq!(
            dashboard.tokens_view("0xabc", FIRST_PAGE, &TokenQuery::default()),
            PageView::Empty("No tokens found for this address.".to_string())
        );
    }

    #[tokio::test]
    async fn removing_a_wallet_drops_its_pages() {
        let (dashboard, _) = dashboard(FakeData::default());

        assert!(dashboard.add_wallet("0xABC", "Savings").await.unwrap());
        assert!(!dashboard.add_wallet("0xabc", "Personal").await.unwrap());
        assert!(dashboard.networth_state("0xabc").data().is_some());
        dashboard.open(PageCategory::Tokens, "0xabc").await.unwrap();

        let removed = dashboard.remove_wallet("0xAbC").await.unwrap().unwrap();
        assert_eq!(removed.category, WalletCategory::Savings);
        assert_eq!(dashboard.networth_state("0xabc"), PageState::Idle);
        assert_eq!(
            dashboard.tokens_view("0xabc", FIRST_PAGE, &TokenQuery::default()),
            PageView::Loading
        );
        assert!(dashboard.watched_wallets().await.is_empty());
    }

    #[tokio::test]
    async fn refresh_loads_every_watched_wallet() {
        let (dashboard, _) = dashboard(FakeData::default());
        dashboard.add_wallet("0x1", "Personal").await.unwrap();
        dashboard.add_wallet("0x2", "Business").await.unwrap();

        dashboard.refresh_watched().await;

        for address in ["0x1", "0x2"] {
            let card = dashboard.wallet_card_view(address);
            assert_eq!(card.ready().unwrap().total_usd, 250.0);
        }
        assert_eq!(dashboard.wallet_groups().await.len(), 2);
    }

    #[tokio::test]
    async fn one_failed_card_leaves_others_rendering() {
        let (dashboard, handler) = dashboard(FakeData {
            fail_networth_for: Some("0xbad"),
            ..Default::default()
        });
        dashboard.add_wallet("0xgood", "Personal").await.unwrap();
        dashboard.add_wallet("0xbad", "Personal").await.unwrap();

        // Failed cards stay failed through a refresh until retried
        dashboard.refresh_watched().await;
        assert_eq!(handler.errors(), vec![PageCategory::Networth]);

        assert_eq!(dashboard.wallet_card_view("0xgood").ready().unwrap().total_usd, 250.0);
        assert_eq!(
            dashboard.wallet_card_view("0xbad"),
            PageView::Failed("Failed to load net worth. Please try again later.".to_string())
        );
    }

    #[tokio::test]
    async fn networth_trend_ends_at_snapshot_total() {
        let (dashboard, _) = dashboard(FakeData::default());
        dashboard.add_wallet("0xabc", "Personal").await.unwrap();

        let view = dashboard.networth_view("0xabc").await;
        let (card, trend) = view.ready().unwrap();
        assert_eq!(card.total_usd, 250.0);
        assert_eq!(trend.latest_usd, 250.0);
        assert!(!trend.points.is_empty());
        assert!(trend.points.iter().all(|p: &HistoryPoint| p.value.is_finite()));
    }

    #[tokio::test]
    async fn token_pages() {
        let (dashboard, _) = dashboard(FakeData::default());

        let found = dashboard.token_detail_view("0xuni", 1, TimeRange::OneDay).await;
        let detail = found.ready().unwrap();
        assert_eq!(detail.current_price, Some(7.0));
        assert_eq!(detail.points.len(), TimeRange::OneDay.points());

        assert_eq!(
            dashboard.token_detail_view("0xdead", 1, TimeRange::OneDay).await,
            PageView::NotFound("Token not found.".to_string())
        );
        assert_eq!(
            dashboard.token_list_view().await,
            PageView::Empty("No tokens listed.".to_string())
        );
    }
}

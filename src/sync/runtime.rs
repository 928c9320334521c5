//! Tokio driver around [`ListSyncController`].
//!
//! One background task owns the controller. Intents arrive over an unbounded
//! channel, fetches run concurrently in a `FuturesUnordered`, and every change
//! is published as a [`ListSnapshot`] on a watch channel.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::domain::tool::Tool;
use crate::domain::types::{BrandName, ToolId};
use crate::pagination::Page;
use crate::repository::ToolReader;
use crate::repository::errors::RepositoryResult;
use crate::sync::controller::{FetchRequest, ListSyncController, SyncSettings, ViewState};
use crate::sync::intent::{InputEvent, Intent, ScrollPosition, intent_for};

/// Everything the list view renders.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ListSnapshot {
    /// Text shown in the search box.
    pub search_text: String,
    /// Search text the current results were requested with.
    pub active_search: String,
    pub brand_filter: Option<BrandName>,
    /// Options for the brand select.
    pub brands: Vec<BrandName>,
    pub tools: Vec<Tool>,
    pub total_count: usize,
    pub has_next: bool,
    pub view: ViewState,
    /// Bumped whenever a response for the active query is merged.
    pub settled: u64,
}

impl ListSnapshot {
    fn capture(controller: &ListSyncController, brands: &[BrandName]) -> Self {
        let query = controller.query();
        Self {
            search_text: controller.pending_search().to_string(),
            active_search: query.search_text.clone(),
            brand_filter: query.brand_filter.clone(),
            brands: brands.to_vec(),
            tools: controller.tools().to_vec(),
            total_count: controller.total_count(),
            has_next: controller.has_next(),
            view: controller.view(),
            settled: controller.settled(),
        }
    }
}

enum Settled {
    Tools(u64, RepositoryResult<Page<Tool>>),
    Brands(RepositoryResult<Vec<BrandName>>),
}

/// Handle to a running list synchronization task.
pub struct ListSync {
    intents: mpsc::UnboundedSender<Intent>,
    state: watch::Receiver<ListSnapshot>,
    task: JoinHandle<()>,
}

impl ListSync {
    /// Starts the task: brand options are loaded once and the unfiltered
    /// first page is requested right away.
    pub fn spawn<R>(repo: Arc<R>, settings: SyncSettings) -> Self
    where
        R: ToolReader + Send + Sync + 'static,
    {
        let mut controller = ListSyncController::new(settings);
        let initial = controller.start();
        let (intents, receiver) = mpsc::unbounded_channel();
        let (publisher, state) = watch::channel(ListSnapshot::capture(&controller, &[]));

        let task = tokio::spawn(drive(repo, controller, initial, receiver, publisher));

        Self {
            intents,
            state,
            task,
        }
    }

    pub fn set_search_text(&self, text: impl Into<String>) {
        self.send(Intent::SetSearchText(text.into()));
    }

    pub fn set_brand_filter(&self, brand: Option<BrandName>) {
        self.send(Intent::SetBrandFilter(brand));
    }

    pub fn load_next_page(&self) {
        self.send(Intent::LoadNextPage);
    }

    pub fn retry(&self) {
        self.send(Intent::Retry);
    }

    pub fn scrolled(&self, position: ScrollPosition) {
        self.send(Intent::Scrolled(position));
    }

    pub fn handle(&self, event: InputEvent) {
        self.send(intent_for(event));
    }

    pub fn apply_created(&self, tool: Tool) {
        self.send(Intent::Created(tool));
    }

    pub fn apply_updated(&self, tool: Tool) {
        self.send(Intent::Updated(tool));
    }

    pub fn apply_removed(&self, id: ToolId) {
        self.send(Intent::Removed(id));
    }

    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot> {
        self.state.clone()
    }

    pub fn snapshot(&self) -> ListSnapshot {
        self.state.borrow().clone()
    }

    /// Applies the filters, then requests pages until the listing is
    /// exhausted or a request fails. Returns `None` if the task stopped.
    pub async fn load_all(&self, search: &str, brand: Option<BrandName>) -> Option<ListSnapshot> {
        let mut state = self.subscribe();

        // The brand change picks up the still-debouncing search text.
        self.set_search_text(search);
        self.set_brand_filter(brand.clone());

        let mut snapshot = state
            .wait_for(|s| {
                !s.view.loading && s.active_search == search && s.brand_filter == brand
            })
            .await
            .ok()?
            .clone();

        while snapshot.has_next && snapshot.view.error.is_none() {
            let settled = snapshot.settled;
            self.load_next_page();
            snapshot = state
                .wait_for(|s| !s.view.loading && s.settled > settled)
                .await
                .ok()?
                .clone();
        }

        Some(snapshot)
    }

    /// Stops the task. Pending timers are dropped and in-flight fetches are
    /// never merged.
    pub async fn dispose(self) {
        drop(self.intents);
        if let Err(err) = self.task.await {
            log::error!("List sync task failed: {err}");
        }
    }

    fn send(&self, intent: Intent) {
        if self.intents.send(intent).is_err() {
            log::warn!("List sync task is no longer running");
        }
    }
}

async fn drive<R>(
    repo: Arc<R>,
    mut controller: ListSyncController,
    initial: FetchRequest,
    mut intents: mpsc::UnboundedReceiver<Intent>,
    publisher: watch::Sender<ListSnapshot>,
) where
    R: ToolReader + Send + Sync + 'static,
{
    let mut brands: Vec<BrandName> = Vec::new();
    let mut pending: FuturesUnordered<BoxFuture<'static, Settled>> = FuturesUnordered::new();
    pending.push(fetch_brands(&repo));
    pending.push(fetch_tools(&repo, initial));

    loop {
        let deadline = controller.next_deadline();

        tokio::select! {
            intent = intents.recv() => {
                let Some(intent) = intent else {
                    break;
                };
                if let Some(request) = controller.apply(intent, Instant::now()) {
                    pending.push(fetch_tools(&repo, request));
                }
            }
            Some(settled) = pending.next(), if !pending.is_empty() => match settled {
                Settled::Tools(seq, result) => {
                    controller.on_response(seq, result);
                }
                Settled::Brands(Ok(list)) => brands = list,
                Settled::Brands(Err(err)) => {
                    log::error!("Failed to load brands: {err}");
                }
            },
            () = time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if let Some(request) = controller.poll_timers(Instant::now()) {
                    pending.push(fetch_tools(&repo, request));
                }
            }
        }

        publish(&publisher, &controller, &brands);
    }

    controller.dispose();
    log::debug!("List sync stopped with {} fetches abandoned", pending.len());
}

fn publish(
    publisher: &watch::Sender<ListSnapshot>,
    controller: &ListSyncController,
    brands: &[BrandName],
) {
    let next = ListSnapshot::capture(controller, brands);
    publisher.send_if_modified(|current| {
        if *current == next {
            false
        } else {
            *current = next;
            true
        }
    });
}

fn fetch_tools<R>(repo: &Arc<R>, request: FetchRequest) -> BoxFuture<'static, Settled>
where
    R: ToolReader + Send + Sync + 'static,
{
    let repo = Arc::clone(repo);
    async move {
        let result = repo.list_tools(&request.query).await;
        Settled::Tools(request.seq, result)
    }
    .boxed()
}

fn fetch_brands<R>(repo: &Arc<R>) -> BoxFuture<'static, Settled>
where
    R: ToolReader + Send + Sync + 'static,
{
    let repo = Arc::clone(repo);
    async move { Settled::Brands(repo.list_brands().await) }.boxed()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::types::ToolName;
    use crate::dto::api::ToolsQuery;
    use crate::repository::errors::RepositoryError;

    /// In-memory catalog that records every query it receives.
    struct FakeCatalog {
        tools: Vec<Tool>,
        delays: HashMap<String, Duration>,
        /// Canned responses by page number, served instead of slicing `tools`.
        scripted: HashMap<usize, Page<Tool>>,
        failing: AtomicBool,
        queries: Mutex<Vec<ToolsQuery>>,
    }

    impl FakeCatalog {
        fn new(tools: Vec<Tool>) -> Self {
            Self {
                tools,
                delays: HashMap::new(),
                scripted: HashMap::new(),
                failing: AtomicBool::new(false),
                queries: Mutex::new(Vec::new()),
            }
        }

        fn with_delay(mut self, search: &str, delay: Duration) -> Self {
            self.delays.insert(search.to_string(), delay);
            self
        }

        fn with_page(mut self, page: Page<Tool>) -> Self {
            self.scripted.insert(page.page, page);
            self
        }

        fn queries(&self) -> Vec<ToolsQuery> {
            self.queries.lock().expect("query log").clone()
        }

        fn searches(&self) -> Vec<String> {
            self.queries()
                .into_iter()
                .filter_map(|q| q.search)
                .collect()
        }
    }

    #[async_trait]
    impl ToolReader for FakeCatalog {
        async fn list_tools(&self, query: &ToolsQuery) -> RepositoryResult<Page<Tool>> {
            self.queries.lock().expect("query log").push(query.clone());
            let search = query.search.clone().unwrap_or_default();
            let delay = self
                .delays
                .get(&search)
                .copied()
                .unwrap_or(Duration::from_millis(50));
            time::sleep(delay).await;

            if self.failing.load(Ordering::SeqCst) {
                return Err(RepositoryError::Http { status: 500 });
            }
            if let Some(page) = self.scripted.get(&query.page) {
                return Ok(page.clone());
            }
            let matching: Vec<Tool> = self
                .tools
                .iter()
                .filter(|t| t.matches(&search, query.brand.as_ref()))
                .cloned()
                .collect();
            Ok(Page::slice(&matching, query.page, query.per_page))
        }

        async fn list_brands(&self) -> RepositoryResult<Vec<BrandName>> {
            Ok(vec![brand("Bosch"), brand("Makita")])
        }
    }

    fn brand(name: &str) -> BrandName {
        BrandName::new(name).expect("valid brand")
    }

    fn tool(id: i64, name: &str) -> Tool {
        Tool::new(
            ToolId::new(id).expect("valid id"),
            ToolName::new(name).expect("valid name"),
        )
    }

    fn inventory(count: i64) -> Vec<Tool> {
        (1..=count)
            .map(|id| {
                let t = tool(id, &format!("Wrench {id}"));
                if id % 3 == 0 {
                    t.with_brand(brand("Makita"))
                } else {
                    t
                }
            })
            .collect()
    }

    async fn settle(
        state: &mut watch::Receiver<ListSnapshot>,
        ready: impl FnMut(&ListSnapshot) -> bool,
    ) -> ListSnapshot {
        state
            .wait_for(ready)
            .await
            .expect("list sync task alive")
            .clone()
    }

    fn idle(snapshot: &ListSnapshot) -> bool {
        !snapshot.view.loading
    }

    #[tokio::test(start_paused = true)]
    async fn loads_first_page_and_brands_on_start() {
        let catalog = Arc::new(FakeCatalog::new(inventory(45)));
        let sync = ListSync::spawn(catalog.clone(), SyncSettings::default());
        assert!(sync.snapshot().view.filtering);

        let mut state = sync.subscribe();
        let snapshot = settle(&mut state, |s| idle(s) && !s.brands.is_empty()).await;

        assert_eq!(snapshot.tools.len(), 20);
        assert_eq!(snapshot.total_count, 45);
        assert!(snapshot.has_next);
        assert_eq!(snapshot.brands, vec![brand("Bosch"), brand("Makita")]);
        assert_eq!(catalog.queries(), vec![ToolsQuery::new(20)]);

        sync.dispose().await;
    }

    #[tokio::test(start_paused = true)]
    async fn typing_burst_sends_one_query() {
        let catalog = Arc::new(FakeCatalog::new(inventory(5)));
        let sync = ListSync::spawn(catalog.clone(), SyncSettings::default());
        let mut state = sync.subscribe();
        settle(&mut state, idle).await;

        sync.set_search_text("w");
        time::sleep(Duration::from_millis(100)).await;
        sync.set_search_text("wr");
        time::sleep(Duration::from_millis(100)).await;
        sync.set_search_text("wrench 2");
        assert_eq!(settle(&mut state, |s| s.search_text == "wrench 2").await.active_search, "");

        time::sleep(Duration::from_secs(1)).await;

        assert_eq!(catalog.searches(), vec!["wrench 2".to_string()]);
        let snapshot = sync.snapshot();
        assert_eq!(snapshot.active_search, "wrench 2");
        assert_eq!(snapshot.tools.len(), 1);

        sync.dispose().await;
    }

    #[tokio::test(start_paused = true)]
    async fn slow_stale_response_is_ignored() {
        let catalog = Arc::new(
            FakeCatalog::new(vec![tool(1, "Slow cooker"), tool(2, "Fast charger")])
                .with_delay("slow", Duration::from_secs(2)),
        );
        let sync = ListSync::spawn(catalog.clone(), SyncSettings::default());
        let mut state = sync.subscribe();
        settle(&mut state, idle).await;

        sync.set_search_text("slow");
        time::sleep(Duration::from_millis(400)).await;
        sync.set_search_text("fast");
        time::sleep(Duration::from_secs(5)).await;

        assert_eq!(catalog.searches(), vec!["slow".to_string(), "fast".to_string()]);
        let snapshot = sync.snapshot();
        let names: Vec<&str> = snapshot.tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Fast charger"]);
        assert!(!snapshot.view.loading);

        sync.dispose().await;
    }

    #[tokio::test(start_paused = true)]
    async fn pages_until_exhausted() {
        let catalog = Arc::new(FakeCatalog::new(inventory(45)));
        let sync = ListSync::spawn(catalog.clone(), SyncSettings::default());
        let mut state = sync.subscribe();
        settle(&mut state, idle).await;

        sync.load_next_page();
        let second = settle(&mut state, |s| idle(s) && s.tools.len() == 40).await;
        assert!(second.has_next);

        sync.handle(InputEvent::LoadMoreClicked);
        let last = settle(&mut state, |s| idle(s) && s.tools.len() == 45).await;
        assert!(!last.has_next);

        sync.load_next_page();
        time::sleep(Duration::from_secs(1)).await;
        let pages: Vec<usize> = catalog.queries().iter().map(|q| q.page).collect();
        assert_eq!(pages, vec![1, 2, 3]);

        sync.dispose().await;
    }

    #[tokio::test(start_paused = true)]
    async fn load_all_survives_page_of_repeated_tools() {
        let catalog = Arc::new(
            FakeCatalog::new(inventory(4))
                .with_page(Page::new(inventory(2), 2, 2, 4, true))
                .with_page(Page::new(inventory(4)[2..].to_vec(), 3, 2, 4, false)),
        );
        let settings = SyncSettings {
            per_page: 2,
            ..SyncSettings::default()
        };
        let sync = ListSync::spawn(catalog.clone(), settings);

        let snapshot = time::timeout(Duration::from_secs(10), sync.load_all("", None))
            .await
            .expect("paging finishes")
            .expect("list sync task alive");

        let ids: Vec<i64> = snapshot.tools.iter().map(|t| t.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(!snapshot.has_next);
        let pages: Vec<usize> = catalog.queries().iter().map(|q| q.page).collect();
        assert_eq!(pages, vec![1, 1, 2, 3]);

        sync.dispose().await;
    }

    #[tokio::test(start_paused = true)]
    async fn load_all_stops_on_failure() {
        let catalog = Arc::new(FakeCatalog::new(inventory(5)));
        catalog.failing.store(true, Ordering::SeqCst);
        let sync = ListSync::spawn(catalog.clone(), SyncSettings::default());

        let snapshot = time::timeout(Duration::from_secs(10), sync.load_all("wrench", None))
            .await
            .expect("paging finishes")
            .expect("list sync task alive");

        assert!(snapshot.view.error.is_some());
        assert!(snapshot.tools.is_empty());

        sync.dispose().await;
    }

    #[tokio::test(start_paused = true)]
    async fn brand_filter_requeries_without_debounce() {
        let catalog = Arc::new(FakeCatalog::new(inventory(45)));
        let sync = ListSync::spawn(catalog.clone(), SyncSettings::default());
        let mut state = sync.subscribe();
        settle(&mut state, idle).await;

        sync.handle(InputEvent::BrandSelected("Makita".to_string()));
        time::sleep(Duration::from_millis(10)).await;
        let last = catalog.queries().pop().expect("query issued");
        assert_eq!(last.brand, Some(brand("Makita")));
        assert_eq!(last.page, 1);

        let snapshot = settle(&mut state, |s| idle(s) && s.total_count == 15).await;
        assert!(
            snapshot
                .tools
                .iter()
                .all(|t| t.brand == Some(brand("Makita")))
        );

        sync.dispose().await;
    }

    #[tokio::test(start_paused = true)]
    async fn failure_clears_list_until_retry() {
        let catalog = Arc::new(FakeCatalog::new(inventory(5)));
        catalog.failing.store(true, Ordering::SeqCst);
        let sync = ListSync::spawn(catalog.clone(), SyncSettings::default());
        let mut state = sync.subscribe();

        let failed = settle(&mut state, |s| s.view.error.is_some()).await;
        assert!(failed.tools.is_empty());
        assert!(!failed.view.loading);

        catalog.failing.store(false, Ordering::SeqCst);
        sync.handle(InputEvent::RetryClicked);
        let recovered = settle(&mut state, |s| idle(s) && s.tools.len() == 5).await;
        assert!(recovered.view.error.is_none());

        sync.dispose().await;
    }

    #[tokio::test(start_paused = true)]
    async fn optimistic_updates_reach_snapshot() {
        let catalog = Arc::new(FakeCatalog::new(inventory(3)));
        let sync = ListSync::spawn(catalog, SyncSettings::default());
        let mut state = sync.subscribe();
        settle(&mut state, idle).await;

        sync.apply_created(tool(10, "Wrench XL"));
        sync.apply_removed(ToolId::new(1).expect("valid id"));
        let snapshot = settle(&mut state, |s| s.total_count == 3 && s.tools[0].id.get() == 10).await;

        let ids: Vec<i64> = snapshot.tools.iter().map(|t| t.id.get()).collect();
        assert_eq!(ids, vec![10, 2, 3]);

        sync.dispose().await;
    }

    #[tokio::test(start_paused = true)]
    async fn dispose_drops_pending_search() {
        let catalog = Arc::new(FakeCatalog::new(inventory(3)));
        let sync = ListSync::spawn(catalog.clone(), SyncSettings::default());
        let mut state = sync.subscribe();
        settle(&mut state, idle).await;

        sync.set_search_text("late");
        sync.dispose().await;
        time::sleep(Duration::from_secs(1)).await;

        assert!(catalog.searches().is_empty());
    }
}

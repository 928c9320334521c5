//! Query state, pagination bookkeeping and the stale-response guard for the
//! tool list.
//!
//! The controller never performs I/O. Operations that need the network return
//! a [`FetchRequest`]; whoever executes it reports back through
//! [`ListSyncController::on_response`] with the request's sequence number.
//! Only the most recently issued request is ever merged, so responses that
//! arrive out of order are dropped on arrival instead of being cancelled.

use std::collections::HashSet;
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

use crate::domain::tool::Tool;
use crate::domain::types::{BrandName, ToolId};
use crate::dto::api::ToolsQuery;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Page};
use crate::repository::errors::RepositoryResult;
use crate::sync::intent::{Intent, ScrollPosition};
use crate::sync::timer::{Debounce, Throttle};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
pub const SCROLL_THROTTLE: Duration = Duration::from_millis(100);
pub const NEAR_BOTTOM_THRESHOLD_PX: u32 = 200;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncSettings {
    pub per_page: usize,
    pub search_debounce: Duration,
    pub scroll_throttle: Duration,
    pub near_bottom_threshold: u32,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_ITEMS_PER_PAGE,
            search_debounce: SEARCH_DEBOUNCE,
            scroll_throttle: SCROLL_THROTTLE,
            near_bottom_threshold: NEAR_BOTTOM_THRESHOLD_PX,
        }
    }
}

/// The query currently in effect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    pub search_text: String,
    pub brand_filter: Option<BrandName>,
    /// Last page merged into the result set; 0 before the first success.
    pub page: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchKind {
    /// Page 1 of a new lineage; replaces the result set.
    Full,
    /// Continuation of the current lineage; appends.
    NextPage,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub kind: FetchKind,
    pub query: ToolsQuery,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub loading: bool,
    pub filtering: bool,
    pub loading_more: bool,
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct ListSyncController {
    settings: SyncSettings,
    /// Text echoed in the search box, possibly not yet in effect.
    pending_search: String,
    query: Query,
    debounce: Debounce<String>,
    throttle: Throttle,
    last_seq: u64,
    in_flight: Option<FetchRequest>,
    last_failed: Option<FetchRequest>,
    /// Responses merged so far, successful or not.
    settled: u64,
    tools: Vec<Tool>,
    total_count: usize,
    has_next: bool,
    error: Option<String>,
}

impl ListSyncController {
    pub fn new(settings: SyncSettings) -> Self {
        Self {
            debounce: Debounce::new(settings.search_debounce),
            throttle: Throttle::new(settings.scroll_throttle),
            settings,
            pending_search: String::new(),
            query: Query::default(),
            last_seq: 0,
            in_flight: None,
            last_failed: None,
            settled: 0,
            tools: Vec::new(),
            total_count: 0,
            has_next: false,
            error: None,
        }
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn pending_search(&self) -> &str {
        &self.pending_search
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn settled(&self) -> u64 {
        self.settled
    }

    pub fn view(&self) -> ViewState {
        let kind = self.in_flight.as_ref().map(|r| r.kind);
        ViewState {
            loading: kind.is_some(),
            filtering: kind == Some(FetchKind::Full),
            loading_more: kind == Some(FetchKind::NextPage),
            error: self.error.clone(),
        }
    }

    /// Earliest instant at which [`Self::poll_timers`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    /// Issues the initial full query for the current filters.
    pub fn start(&mut self) -> FetchRequest {
        self.requery()
    }

    pub fn apply(&mut self, intent: Intent, now: Instant) -> Option<FetchRequest> {
        match intent {
            Intent::SetSearchText(text) => {
                self.set_search_text(text, now);
                None
            }
            Intent::SetBrandFilter(brand) => Some(self.set_brand_filter(brand)),
            Intent::LoadNextPage => self.load_next_page(),
            Intent::Scrolled(position) => self.on_scroll(position, now),
            Intent::Retry => self.retry(),
            Intent::Created(tool) => {
                self.apply_created(tool);
                None
            }
            Intent::Updated(tool) => {
                self.apply_updated(tool);
                None
            }
            Intent::Removed(id) => {
                self.apply_removed(id);
                None
            }
        }
    }

    /// Echoes the text immediately; the query changes once input settles.
    pub fn set_search_text(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        self.pending_search.clone_from(&text);
        self.debounce.schedule(text, now);
    }

    /// Fires the debounced search if its window has elapsed.
    pub fn poll_timers(&mut self, now: Instant) -> Option<FetchRequest> {
        let text = self.debounce.take_due(now)?;
        self.query.search_text = text;
        Some(self.requery())
    }

    /// Applies the brand filter right away. Search text still waiting in the
    /// debounce window is folded into the same request.
    pub fn set_brand_filter(&mut self, brand: Option<BrandName>) -> FetchRequest {
        if let Some(text) = self.debounce.cancel() {
            self.query.search_text = text;
        }
        self.query.brand_filter = brand;
        self.requery()
    }

    pub fn load_next_page(&mut self) -> Option<FetchRequest> {
        if !self.has_next || self.in_flight.is_some() {
            return None;
        }
        let query = self.base_query().page(self.query.page + 1);
        Some(self.issue(FetchKind::NextPage, query))
    }

    /// Evaluates a scroll event, at most once per throttle interval.
    pub fn on_scroll(&mut self, position: ScrollPosition, now: Instant) -> Option<FetchRequest> {
        if !self.throttle.allow(now) {
            log::debug!("Scroll evaluation throttled");
            return None;
        }
        if !position.is_near_bottom(self.settings.near_bottom_threshold) {
            return None;
        }
        self.load_next_page()
    }

    /// Re-issues the last failed request unchanged.
    pub fn retry(&mut self) -> Option<FetchRequest> {
        if self.in_flight.is_some() {
            return None;
        }
        let failed = self.last_failed.take()?;
        Some(self.issue(failed.kind, failed.query))
    }

    /// Merges a settled fetch. Returns `false` when the response was stale and
    /// therefore ignored.
    pub fn on_response(&mut self, seq: u64, result: RepositoryResult<Page<Tool>>) -> bool {
        let Some(request) = self.in_flight.take_if(|r| r.seq == seq) else {
            log::debug!("Discarding stale tools response #{seq} (latest #{})", self.last_seq);
            return false;
        };
        self.settled += 1;

        match result {
            Ok(page) => {
                if request.kind == FetchKind::Full {
                    self.tools.clear();
                }
                self.append_unique(page.items);
                self.query.page = page.page;
                self.total_count = page.total_count;
                self.has_next = page.has_next;
                self.error = None;
                self.last_failed = None;
            }
            Err(err) => {
                log::error!("Failed to load tools page {}: {err}", request.query.page);
                if request.kind == FetchKind::Full {
                    self.tools.clear();
                    self.query.page = 0;
                    self.total_count = 0;
                    self.has_next = false;
                }
                self.error = Some(err.user_message());
                self.last_failed = Some(request);
            }
        }
        true
    }

    /// Inserts a freshly created tool at the top if it belongs to the current
    /// listing.
    pub fn apply_created(&mut self, tool: Tool) -> bool {
        let belongs = tool.matches(&self.query.search_text, self.query.brand_filter.as_ref());
        if !belongs || self.position(tool.id).is_some() {
            return false;
        }
        self.tools.insert(0, tool);
        self.total_count += 1;
        true
    }

    pub fn apply_updated(&mut self, tool: Tool) -> bool {
        match self.position(tool.id) {
            Some(idx) => {
                self.tools[idx] = tool;
                true
            }
            None => false,
        }
    }

    pub fn apply_removed(&mut self, id: ToolId) -> bool {
        match self.position(id) {
            Some(idx) => {
                self.tools.remove(idx);
                self.total_count = self.total_count.saturating_sub(1);
                true
            }
            None => false,
        }
    }

    /// Drops the pending debounce and forgets the in-flight request, so
    /// nothing fires or merges afterwards.
    pub fn dispose(&mut self) {
        self.debounce.cancel();
        self.throttle.reset();
        self.in_flight = None;
    }

    fn base_query(&self) -> ToolsQuery {
        ToolsQuery::new(self.settings.per_page)
            .search(self.query.search_text.as_str())
            .brand(self.query.brand_filter.clone())
    }

    fn requery(&mut self) -> FetchRequest {
        let query = self.base_query().page(1);
        self.issue(FetchKind::Full, query)
    }

    fn issue(&mut self, kind: FetchKind, query: ToolsQuery) -> FetchRequest {
        self.last_seq += 1;
        let request = FetchRequest {
            seq: self.last_seq,
            kind,
            query,
        };
        log::info!(
            "Requesting tools #{} ({kind:?}): page {}, search {:?}, brand {:?}",
            request.seq,
            request.query.page,
            request.query.search,
            request.query.brand
        );
        self.in_flight = Some(request.clone());
        request
    }

    fn append_unique(&mut self, items: Vec<Tool>) {
        let mut seen: HashSet<ToolId> = self.tools.iter().map(|t| t.id).collect();
        self.tools
            .extend(items.into_iter().filter(|tool| seen.insert(tool.id)));
    }

    fn position(&self, id: ToolId) -> Option<usize> {
        self.tools.iter().position(|t| t.id == id)
    }
}

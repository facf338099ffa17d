//! Per-page fetch lifecycle: `Idle → Loading → {Success, Failure}`

use crate::error::{DashboardError, DashboardResult};
use crate::models::PageCategory;

/// What caused a fetch to start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTrigger {
    /// First visit of a page
    Initial,
    /// Explicit re-fetch, e.g. the viewed address changed
    Refetch,
    /// Manual retry after a failure
    Retry,
}

/// Fetch state of one page slice
#[derive(Debug, Clone, PartialEq)]
pub enum PageState<T> {
    Idle,
    Loading { generation: u64 },
    Success(T),
    /// Collaborator has no record; shown as a not-found page, not an error
    NotFound(String),
    Failure(String),
}

impl<T> Default for PageState<T> {
    fn default() -> Self {
        PageState::Idle
    }
}

impl<T> PageState<T> {
    pub fn name(&self) -> &'static str {
        match self {
            PageState::Idle => "idle",
            PageState::Loading { .. } => "loading",
            PageState::Success(_) => "loaded",
            PageState::NotFound(_) => "not found",
            PageState::Failure(_) => "failed",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PageState::Loading { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            PageState::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Trigger an automatic page open may use, if any.
    ///
    /// Only an idle page fetches on open; loaded pages wait for an explicit
    /// re-fetch and failed pages for a manual retry.
    pub fn open_trigger(&self) -> Option<FetchTrigger> {
        match self {
            PageState::Idle => Some(FetchTrigger::Initial),
            _ => None,
        }
    }

    /// Enter `Loading` under a fresh generation
    pub fn begin(&mut self, generation: u64, trigger: FetchTrigger) -> DashboardResult<()> {
        let allowed = match (&*self, trigger) {
            (PageState::Idle, FetchTrigger::Initial | FetchTrigger::Refetch) => true,
            (PageState::Loading { .. }, FetchTrigger::Initial | FetchTrigger::Refetch) => true,
            (PageState::Success(_) | PageState::NotFound(_), FetchTrigger::Refetch) => true,
            (PageState::Failure(_), FetchTrigger::Retry) => true,
            _ => false,
        };

        if !allowed {
            return Err(DashboardError::InvalidTransition {
                from: self.name(),
                action: match trigger {
                    FetchTrigger::Initial => "open",
                    FetchTrigger::Refetch => "re-fetch",
                    FetchTrigger::Retry => "retry",
                },
            });
        }

        *self = PageState::Loading { generation };
        Ok(())
    }

    /// Apply a fetch outcome if `generation` is still the one in flight.
    ///
    /// Returns false when the response was superseded and discarded.
    pub fn complete(&mut self, generation: u64, outcome: Result<T, &DashboardError>, category: PageCategory) -> bool {
        match self {
            PageState::Loading { generation: current } if *current == generation => {}
            _ => return false,
        }

        *self = match outcome {
            Ok(data) => PageState::Success(data),
            Err(e) if e.is_not_found() => PageState::NotFound(e.user_message(category)),
            Err(e) => PageState::Failure(e.user_message(category)),
        };
        true
    }

    /// View of a state without data; `None` once loaded
    pub fn pending<V>(&self) -> Option<PageView<V>> {
        match self {
            PageState::Idle | PageState::Loading { .. } => Some(PageView::Loading),
            PageState::Failure(message) => Some(PageView::Failed(message.clone())),
            PageState::NotFound(message) => Some(PageView::NotFound(message.clone())),
            PageState::Success(_) => None,
        }
    }

    /// Render model of this state; `Idle` shows the loading skeleton
    pub fn view<V>(&self, category: PageCategory, derive: impl FnOnce(&T) -> V, is_empty: impl FnOnce(&V) -> bool) -> PageView<V> {
        let PageState::Success(data) = self else {
            return self.pending().unwrap_or(PageView::Loading);
        };

        let derived = derive(data);
        if is_empty(&derived) {
            PageView::Empty(category.empty_message())
        } else {
            PageView::Ready(derived)
        }
    }
}

/// What a renderer draws for one page
#[derive(Debug, Clone, PartialEq)]
pub enum PageView<V> {
    /// Skeleton placeholder
    Loading,
    Failed(String),
    Empty(String),
    NotFound(String),
    Ready(V),
}

impl<V> PageView<V> {
    pub fn ready(&self) -> Option<&V> {
        match self {
            PageView::Ready(v) => Some(v),
            _ => None,
        }
    }
}

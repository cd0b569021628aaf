use std::collections::BTreeSet;
use std::time::Duration;

use crate::view_model::{Article, ViewState};

/// Identifier assigned to every outbound fetch, starting at 1.
pub type RequestId = u64;

/// Interval between polls: 11 minutes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(660_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Inactive,
    Active,
    TornDown,
}

/// Controller state. Owned by the caller and threaded through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedState {
    lifecycle: Lifecycle,
    poll_interval: Duration,
    articles: Option<Vec<Article>>,
    loaded: bool,
    error: Option<String>,
    next_request_id: RequestId,
    in_flight: BTreeSet<RequestId>,
    dirty: bool,
}

impl Default for FeedState {
    fn default() -> Self {
        Self::with_poll_interval(DEFAULT_POLL_INTERVAL)
    }
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_poll_interval(poll_interval: Duration) -> Self {
        Self {
            lifecycle: Lifecycle::Inactive,
            poll_interval,
            articles: None,
            loaded: false,
            error: None,
            next_request_id: 1,
            in_flight: BTreeSet::new(),
            dirty: false,
        }
    }

    pub fn view(&self) -> ViewState {
        ViewState {
            articles: self.articles.clone(),
            loaded: self.loaded,
            error: self.error.clone(),
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Requests issued but not yet completed, in issue order.
    pub fn in_flight(&self) -> Vec<RequestId> {
        self.in_flight.iter().copied().collect()
    }

    /// Returns whether a render-visible field changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn activate(&mut self) {
        self.lifecycle = Lifecycle::Active;
    }

    pub(crate) fn tear_down(&mut self) {
        self.lifecycle = Lifecycle::TornDown;
        self.in_flight.clear();
    }

    pub(crate) fn issue_request(&mut self) -> RequestId {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight.insert(request_id);
        request_id
    }

    /// Returns false when the request was not in flight (e.g. cancelled by teardown).
    pub(crate) fn complete_request(&mut self, request_id: RequestId) -> bool {
        self.in_flight.remove(&request_id)
    }

    pub(crate) fn replace_articles(&mut self, articles: Vec<Article>) {
        self.articles = Some(articles);
        self.loaded = true;
        self.dirty = true;
    }

    pub(crate) fn set_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
        self.dirty = true;
    }
}

use std::sync::Arc;

use feed_core::{update, FeedState, Lifecycle, Msg};
use feed_logging::feed_warn;

use crate::{ArticleSource, EngineEvent, EngineHandle};

/// Bridges an [`ArticleSource`] and a caller-owned [`FeedState`].
///
/// The controller never owns the state: every operation borrows it, runs the
/// pure [`update`] and hands the resulting effects to the engine. All methods
/// must be called from within a tokio runtime. State is only ever touched from
/// the caller's task, in the order events arrive.
pub struct ArticleFeedController {
    engine: EngineHandle,
}

impl ArticleFeedController {
    pub fn new(source: Arc<dyn ArticleSource>) -> Self {
        Self {
            engine: EngineHandle::new(source),
        }
    }

    /// Fetch now, then every poll interval until [`Self::teardown`].
    pub fn activate(&mut self, state: &mut FeedState) {
        self.dispatch(state, Msg::Activated);
    }

    /// Issue one fetch immediately, independent of the timer.
    pub fn fetch_articles(&mut self, state: &mut FeedState) {
        self.dispatch(state, Msg::FetchArticles);
    }

    /// Release the timer and cancel in-flight fetches.
    pub fn teardown(&mut self, state: &mut FeedState) {
        self.dispatch(state, Msg::Teardown);
    }

    pub fn dispatch(&mut self, state: &mut FeedState, msg: Msg) {
        let (next, effects) = update(std::mem::take(state), msg);
        *state = next;
        self.engine.execute(effects);
    }

    /// Waits for the next timer tick or fetch completion and applies it.
    ///
    /// Returns `false` once the controller is torn down; nothing more will arrive.
    pub async fn step(&mut self, state: &mut FeedState) -> bool {
        if state.lifecycle() == Lifecycle::TornDown {
            self.drain_pending(state);
            return false;
        }
        match self.engine.recv().await {
            Some(event) => {
                self.dispatch(state, event_to_msg(event));
                true
            }
            None => false,
        }
    }

    /// Applies every event already queued without waiting. Returns how many were applied.
    pub fn drain_pending(&mut self, state: &mut FeedState) -> usize {
        let mut applied = 0;
        while let Some(event) = self.engine.try_recv() {
            self.dispatch(state, event_to_msg(event));
            applied += 1;
        }
        applied
    }

    pub fn is_polling(&self) -> bool {
        self.engine.is_polling()
    }
}

fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PollTick => Msg::FetchArticles,
        EngineEvent::FetchCompleted {
            request_id,
            result: Ok(articles),
        } => Msg::ArticlesFetched {
            request_id,
            articles,
        },
        EngineEvent::FetchCompleted {
            request_id,
            result: Err(err),
        } => {
            feed_warn!("Request {} failed: {}", request_id, err);
            Msg::FetchFailed { request_id }
        }
    }
}

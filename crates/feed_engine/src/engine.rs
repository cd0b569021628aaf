use std::sync::Arc;
use std::time::Duration;

use feed_core::Effect;
use feed_logging::{feed_debug, feed_info};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;

use crate::{ArticleSource, EngineEvent, PollTimer, RequestId};

/// Executes core effects as tokio tasks and collects their completions.
///
/// Every spawned task hangs off one shutdown token, so `StopPolling` (or
/// dropping the handle) cancels the timer and all in-flight fetches at once.
pub struct EngineHandle {
    source: Arc<dyn ArticleSource>,
    event_tx: UnboundedSender<EngineEvent>,
    event_rx: UnboundedReceiver<EngineEvent>,
    shutdown: CancellationToken,
    timer: Option<PollTimer>,
}

impl EngineHandle {
    pub fn new(source: Arc<dyn ArticleSource>) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            source,
            event_tx,
            event_rx,
            shutdown: CancellationToken::new(),
            timer: None,
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn execute(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchArticles { request_id } => self.spawn_fetch(request_id),
                Effect::StartPolling { period } => self.start_polling(period),
                Effect::StopPolling => self.stop(),
            }
        }
    }

    pub async fn recv(&mut self) -> Option<EngineEvent> {
        self.event_rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn is_polling(&self) -> bool {
        self.timer
            .as_ref()
            .is_some_and(|timer| !timer.is_cancelled())
    }

    fn spawn_fetch(&self, request_id: RequestId) {
        if self.shutdown.is_cancelled() {
            return;
        }
        let source = Arc::clone(&self.source);
        let event_tx = self.event_tx.clone();
        let cancel = self.shutdown.child_token();
        tokio::spawn(async move {
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    feed_debug!("Request {} cancelled", request_id);
                    return;
                }
                result = source.fetch_articles(request_id) => result,
            };
            let _ = event_tx.send(EngineEvent::FetchCompleted { request_id, result });
        });
    }

    fn start_polling(&mut self, period: Duration) {
        if self.timer.is_some() || self.shutdown.is_cancelled() {
            return;
        }
        self.timer = Some(PollTimer::start(
            period,
            self.shutdown.child_token(),
            self.event_tx.clone(),
        ));
    }

    fn stop(&mut self) {
        self.shutdown.cancel();
        if let Some(timer) = self.timer.take() {
            timer.cancel();
            feed_info!("Poll timer released");
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

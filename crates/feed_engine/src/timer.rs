use std::time::Duration;

use feed_logging::feed_trace;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tokio_util::sync::CancellationToken;

use crate::EngineEvent;

/// Recurring poll timer. Emits [`EngineEvent::PollTick`] every `period`,
/// first tick one full period after start. Cancelled on [`PollTimer::cancel`]
/// or when dropped.
#[derive(Debug)]
pub struct PollTimer {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PollTimer {
    /// Must be called from within a tokio runtime.
    pub fn start(
        period: Duration,
        cancel: CancellationToken,
        event_tx: UnboundedSender<EngineEvent>,
    ) -> Self {
        // `interval_at` panics on a zero period.
        let period = period.max(Duration::from_millis(1));
        let token = cancel.clone();
        let task = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = ticks.tick() => {
                        feed_trace!("Poll timer fired");
                        if event_tx.send(EngineEvent::PollTick).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self { cancel, task }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollTimer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

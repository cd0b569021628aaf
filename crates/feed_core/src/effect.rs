use std::time::Duration;

/// Side effects requested by [`crate::update`]; executed by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue exactly one GET for the article collection.
    FetchArticles { request_id: crate::RequestId },
    /// Acquire the recurring poll timer.
    StartPolling { period: Duration },
    /// Release the poll timer, if armed, and cancel every in-flight fetch.
    StopPolling,
}

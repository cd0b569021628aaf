use feed_logging::{feed_debug, feed_info, feed_warn};

use crate::{Effect, FeedState, Lifecycle, Msg};

/// Text shown to the view for every kind of fetch failure.
pub const FETCH_ERROR_MESSAGE: &str = "Could not fetch articles";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: FeedState, msg: Msg) -> (FeedState, Vec<Effect>) {
    let effects = match msg {
        Msg::Activated => {
            if state.lifecycle() != Lifecycle::Inactive {
                return (state, Vec::new());
            }
            state.activate();
            // The initial fetch goes out before the timer is armed.
            let request_id = state.issue_request();
            feed_info!(
                "Feed activated; polling every {:?}",
                state.poll_interval()
            );
            vec![
                Effect::FetchArticles { request_id },
                Effect::StartPolling {
                    period: state.poll_interval(),
                },
            ]
        }
        Msg::FetchArticles => {
            if state.lifecycle() == Lifecycle::TornDown {
                return (state, Vec::new());
            }
            // Overlapping requests are allowed; whichever completes last wins.
            let request_id = state.issue_request();
            vec![Effect::FetchArticles { request_id }]
        }
        Msg::ArticlesFetched {
            request_id,
            articles,
        } => {
            if state.complete_request(request_id) {
                feed_debug!("Request {} loaded {} articles", request_id, articles.len());
                // A previous error stays visible after a later success.
                state.replace_articles(articles);
            } else {
                feed_debug!("Ignoring stale completion for request {}", request_id);
            }
            Vec::new()
        }
        Msg::FetchFailed { request_id } => {
            if state.complete_request(request_id) {
                feed_warn!("Request {} failed", request_id);
                state.set_error(FETCH_ERROR_MESSAGE);
            } else {
                feed_debug!("Ignoring stale failure for request {}", request_id);
            }
            Vec::new()
        }
        Msg::Teardown => {
            if state.lifecycle() == Lifecycle::TornDown {
                return (state, Vec::new());
            }
            // Manual refreshes may be in flight even if the view never activated.
            state.tear_down();
            feed_info!("Feed torn down");
            vec![Effect::StopPolling]
        }
    };

    (state, effects)
}

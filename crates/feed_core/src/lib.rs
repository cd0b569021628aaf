//! Feedme core: pure controller state machine and view-state helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{FeedState, Lifecycle, RequestId, DEFAULT_POLL_INTERVAL};
pub use update::{update, FETCH_ERROR_MESSAGE};
pub use view_model::{Article, ViewState};

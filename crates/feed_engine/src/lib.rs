//! Feedme engine: HTTP article source, poll timer and effect execution.
mod controller;
mod endpoint;
mod engine;
mod fetch;
mod timer;
mod types;

pub use controller::ArticleFeedController;
pub use endpoint::ArticleEndpoint;
pub use engine::EngineHandle;
pub use fetch::{ArticleSource, FetchSettings, ReqwestArticleSource, SourceError};
pub use timer::PollTimer;
pub use types::{EngineEvent, FailureKind, FetchError, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The view was instantiated.
    Activated,
    /// Poll timer tick or manual refresh.
    FetchArticles,
    /// A fetch resolved with a JSON array.
    ArticlesFetched {
        request_id: crate::RequestId,
        articles: Vec<crate::Article>,
    },
    /// A fetch failed for any reason (network, status, timeout, decode).
    FetchFailed { request_id: crate::RequestId },
    /// The view is going away.
    Teardown,
}

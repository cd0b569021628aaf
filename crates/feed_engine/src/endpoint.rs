use serde::{Deserialize, Serialize};
use url::Url;

/// Article collections served by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArticleEndpoint {
    #[default]
    All,
    Today,
    Month,
}

impl ArticleEndpoint {
    pub fn path(self) -> &'static str {
        match self {
            ArticleEndpoint::All => "/api/v1/articles",
            ArticleEndpoint::Today => "/api/v1/articles/today",
            ArticleEndpoint::Month => "/api/v1/articles/month",
        }
    }

    /// Resolves the endpoint under `base`, keeping any path prefix `base` carries.
    pub fn resolve(self, base: &Url) -> Result<Url, url::ParseError> {
        let mut base = base.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(self.path().trim_start_matches('/'))
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One record of the article collection. Its shape belongs to the remote API;
/// the controller never inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Article(Value);

impl Article {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// String field lookup for renderers; `None` if absent or not a string.
    pub fn text_field(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }
}

impl From<Value> for Article {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// What the rendering layer sees.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    /// `None` until the first successful fetch.
    pub articles: Option<Vec<Article>>,
    /// True once any fetch succeeded.
    pub loaded: bool,
    /// Set on failure and never cleared by a later success.
    pub error: Option<String>,
}

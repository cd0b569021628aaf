pub const SEPARATOR: &str = "----------------------------------------";
pub const LOADING_TEXT: &str = "Loading articles...";
pub const EMPTY_TEXT: &str = "No articles.";
/// Longest title shown before truncation.
pub const TITLE_MAX_CHARS: usize = 100;

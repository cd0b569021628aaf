use feed_core::{Article, ViewState};

use super::constants::*;

/// Renders the view state as terminal lines. Pure: same input, same output.
pub fn render(view: &ViewState, refreshed_at: Option<&str>) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(error) = &view.error {
        lines.push(format!("Error: {error}"));
    }

    if !view.loaded {
        if view.error.is_none() {
            lines.push(LOADING_TEXT.to_string());
        }
        return lines;
    }

    let articles = view.articles.as_deref().unwrap_or_default();
    let header = match refreshed_at {
        Some(at) => format!("Articles: {} (refreshed {at})", articles.len()),
        None => format!("Articles: {}", articles.len()),
    };
    lines.push(header);

    if articles.is_empty() {
        lines.push(EMPTY_TEXT.to_string());
    }
    lines.extend(
        articles
            .iter()
            .enumerate()
            .map(|(index, article)| article_line(index + 1, article)),
    );

    lines
}

fn article_line(position: usize, article: &Article) -> String {
    let title = match article.text_field("title") {
        Some(title) => truncate(title.trim(), TITLE_MAX_CHARS),
        None => truncate(&article.as_value().to_string(), TITLE_MAX_CHARS),
    };

    let mut line = format!("{position:>3}. {title}");
    if let Some(editor) = article
        .as_value()
        .pointer("/source/editor")
        .and_then(|value| value.as_str())
    {
        line.push_str(&format!(" [{editor}]"));
    }
    if let Some(url) = article.text_field("url") {
        line.push_str(&format!(" <{url}>"));
    }
    line
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn articles(value: serde_json::Value) -> Option<Vec<Article>> {
        Some(serde_json::from_value(value).unwrap())
    }

    #[test]
    fn fresh_view_shows_loading() {
        assert_eq!(render(&ViewState::default(), None), vec![LOADING_TEXT]);
    }

    #[test]
    fn failure_before_any_load_shows_only_error() {
        let view = ViewState {
            error: Some("Could not fetch articles".to_string()),
            ..ViewState::default()
        };
        assert_eq!(render(&view, None), vec!["Error: Could not fetch articles"]);
    }

    #[test]
    fn loaded_view_lists_titles_in_order() {
        let view = ViewState {
            articles: articles(json!([
                {"id": 1, "title": "A", "url": "https://example.com/a"},
                {"id": 2, "title": "B", "source": {"editor": "Le Monde"}}
            ])),
            loaded: true,
            error: None,
        };
        assert_eq!(
            render(&view, Some("2026-10-19T08:00:00Z")),
            vec![
                "Articles: 2 (refreshed 2026-10-19T08:00:00Z)",
                "  1. A <https://example.com/a>",
                "  2. B [Le Monde]",
            ]
        );
    }

    #[test]
    fn untitled_article_falls_back_to_json() {
        let view = ViewState {
            articles: articles(json!([{"id": 7}])),
            loaded: true,
            error: None,
        };
        assert_eq!(render(&view, None), vec!["Articles: 1", r#"  1. {"id":7}"#]);
    }

    #[test]
    fn stale_error_stays_above_fresh_articles() {
        let view = ViewState {
            articles: articles(json!([])),
            loaded: true,
            error: Some("Could not fetch articles".to_string()),
        };
        assert_eq!(
            render(&view, None),
            vec!["Error: Could not fetch articles", "Articles: 0", EMPTY_TEXT]
        );
    }

    #[test]
    fn long_titles_are_truncated() {
        let long = "x".repeat(TITLE_MAX_CHARS + 20);
        let line = truncate(&long, TITLE_MAX_CHARS);
        assert_eq!(line.chars().count(), TITLE_MAX_CHARS);
        assert!(line.ends_with("..."));
    }
}

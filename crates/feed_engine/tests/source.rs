use std::net::TcpListener;
use std::time::Duration;

use feed_core::Article;
use feed_engine::{
    ArticleEndpoint, ArticleSource, FailureKind, FetchSettings, ReqwestArticleSource, SourceError,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> FetchSettings {
    FetchSettings {
        base_url: server.uri(),
        ..FetchSettings::default()
    }
}

#[tokio::test]
async fn source_decodes_json_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/articles"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "title": "A"}])))
        .expect(1)
        .mount(&server)
        .await;

    let source = ReqwestArticleSource::new(settings_for(&server)).expect("source");
    let articles = source.fetch_articles(1).await.expect("fetch ok");

    assert_eq!(articles, vec![Article::new(json!({"id": 1, "title": "A"}))]);
}

#[tokio::test]
async fn source_keeps_article_shape_untouched() {
    let server = MockServer::start().await;
    let body = json!([
        {
            "title": "Headline",
            "url": "https://example.com/a",
            "pub_date": "2018-03-01T10:00:00Z",
            "source": {"country": "fr", "language": "fr", "editor": "Le Monde"}
        },
        {"unexpected": [1, 2, 3]}
    ]);
    Mock::given(method("GET"))
        .and(path("/api/v1/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .mount(&server)
        .await;

    let source = ReqwestArticleSource::new(settings_for(&server)).expect("source");
    let articles = source.fetch_articles(1).await.expect("fetch ok");

    let values: Vec<_> = articles.iter().map(|a| a.as_value().clone()).collect();
    assert_eq!(serde_json::Value::Array(values), body);
}

#[tokio::test]
async fn source_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/articles"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let source = ReqwestArticleSource::new(settings_for(&server)).expect("source");
    let err = source.fetch_articles(2).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
}

#[tokio::test]
async fn source_rejects_non_array_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"articles": []})))
        .mount(&server)
        .await;

    let source = ReqwestArticleSource::new(settings_for(&server)).expect("source");
    let err = source.fetch_articles(3).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn source_rejects_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/articles"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let source = ReqwestArticleSource::new(settings_for(&server)).expect("source");
    let err = source.fetch_articles(4).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn source_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/articles"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let source = ReqwestArticleSource::new(settings).expect("source");
    let err = source.fetch_articles(5).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn source_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/articles"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/json")
                .set_body_string("[1,2,3,4,5,6]"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..settings_for(&server)
    };
    let source = ReqwestArticleSource::new(settings).expect("source");
    let err = source.fetch_articles(6).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(13)
        }
    );
}

#[tokio::test]
async fn source_reports_network_failure() {
    // Reserve a free port, then release it so nothing is listening.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("local addr").port()
    };
    let settings = FetchSettings {
        base_url: format!("http://127.0.0.1:{port}"),
        ..FetchSettings::default()
    };
    let source = ReqwestArticleSource::new(settings).expect("source");
    let err = source.fetch_articles(7).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}

#[tokio::test]
async fn period_endpoints_hit_their_paths() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/articles/today"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"period": "today"}])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/articles/month"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"period": "month"}])))
        .mount(&server)
        .await;

    for (endpoint, expected) in [
        (ArticleEndpoint::Today, "today"),
        (ArticleEndpoint::Month, "month"),
    ] {
        let settings = FetchSettings {
            endpoint,
            ..settings_for(&server)
        };
        let source = ReqwestArticleSource::new(settings).expect("source");
        let articles = source.fetch_articles(1).await.expect("fetch ok");
        assert_eq!(articles[0].text_field("period"), Some(expected));
    }
}

#[test]
fn invalid_base_url_is_rejected_up_front() {
    let settings = FetchSettings {
        base_url: "not a url".to_string(),
        ..FetchSettings::default()
    };
    let err = ReqwestArticleSource::new(settings).unwrap_err();
    assert!(matches!(err, SourceError::InvalidBaseUrl(_)));
}

#[test]
fn source_reports_resolved_url() {
    let source = ReqwestArticleSource::new(FetchSettings::default()).expect("source");
    assert_eq!(source.url().as_str(), "http://localhost:8080/api/v1/articles");
}

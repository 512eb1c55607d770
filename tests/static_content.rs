//! End-to-end tests for content resolution, probes and `/config.json`.

use std::time::Duration;

use reqwest::StatusCode;
use staticsrv::config::ConfigVariables;

mod common;

#[tokio::test]
async fn test_serves_files_and_probes() {
    let dir = tempfile::tempdir().unwrap();
    common::write_site(dir.path(), true);
    let server = common::start_server(common::config_for(dir.path()), ConfigVariables::default()).await;
    let client = common::client();

    let res = client.get(server.url("/static/app.css")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "text/css");
    assert_eq!(res.text().await.unwrap(), "body { margin: 0 }");

    for probe in ["/livez", "/readyz", "/healthz"] {
        let res = client.get(server.url(probe)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{}", probe);
        assert_eq!(res.text().await.unwrap(), "ok");
    }

    let res = client.get(server.url("/missing/page")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "404 page not found\n");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_fallback_serves_index() {
    let dir = tempfile::tempdir().unwrap();
    common::write_site(dir.path(), true);
    let mut config = common::config_for(dir.path());
    config.content.fallback_to_index = true;
    config.observability.access_log = true;
    let server = common::start_server(config, ConfigVariables::default()).await;
    let client = common::client();

    for path in ["/users/42/profile", "/../../etc/passwd", "/static/missing.css"] {
        let res = client.get(server.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{}", path);
        assert_eq!(res.text().await.unwrap(), "<html><body>app</body></html>");
    }

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_fallback_without_index_sends_empty_response() {
    let dir = tempfile::tempdir().unwrap();
    common::write_site(dir.path(), false);
    let mut config = common::config_for(dir.path());
    config.content.fallback_to_index = true;
    let server = common::start_server(config, ConfigVariables::default()).await;

    let res = common::client().get(server.url("/users/42")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.bytes().await.unwrap().is_empty());

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_config_json() {
    let dir = tempfile::tempdir().unwrap();
    common::write_site(dir.path(), true);
    let variables = ConfigVariables::from_names("FOO,BAR", |key| {
        (key == "FOO").then(|| "baz".to_string())
    });
    let server = common::start_server(common::config_for(dir.path()), variables).await;

    let res = common::client().get(server.url("/config.json")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/json");
    let json: serde_json::Value = res.json().await.unwrap();
    assert_eq!(json, serde_json::json!({"BAR": "", "FOO": "baz"}));

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_disabled_endpoints_fall_through_to_content() {
    let dir = tempfile::tempdir().unwrap();
    common::write_site(dir.path(), true);
    let mut config = common::config_for(dir.path());
    config.endpoints.health_checks = false;
    config.endpoints.config_variables = false;
    let server = common::start_server(config, ConfigVariables::default()).await;
    let client = common::client();

    for path in ["/livez", "/readyz", "/healthz", "/config.json"] {
        let res = client.get(server.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{}", path);
    }

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_graceful_shutdown() {
    let dir = tempfile::tempdir().unwrap();
    common::write_site(dir.path(), true);
    let server = common::start_server(common::config_for(dir.path()), ConfigVariables::default()).await;

    server.shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), server.handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}

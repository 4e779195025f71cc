//! End-to-end tests for forwarding, rewriting and error fallback.

use std::time::Duration;

use reqwest::StatusCode;

mod common;

use common::{client, http_response, relay_config, start_backend, start_relay, static_root};

#[tokio::test]
async fn test_admin_login_without_backend() {
    let backend = common::unused_addr().await;
    let root = static_root();
    let (addr, shutdown, _) = start_relay(relay_config(backend, &root)).await;

    let res = client()
        .get(format!("http://{}/admin/login", addr))
        .send()
        .await
        .expect("relay unreachable");

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.text().await.unwrap();
    assert!(body.to_lowercase().contains("cannot connect"), "body: {}", body);
    assert!(body.contains(r#"href="/admin/login""#), "body: {}", body);

    shutdown.trigger();
}

#[tokio::test]
async fn test_api_without_backend_returns_json() {
    let backend = common::unused_addr().await;
    let root = static_root();
    let (addr, shutdown, _) = start_relay(relay_config(backend, &root)).await;

    let res = client()
        .get(format!("http://{}/api/events", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Cannot connect to admin server");

    shutdown.trigger();
}

#[tokio::test]
async fn test_backend_timeout_is_unreachable() {
    let backend = common::start_silent_backend().await;
    let root = static_root();
    let mut config = relay_config(backend, &root);
    config.backend.timeout_secs = 1;
    let (addr, shutdown, _) = start_relay(config).await;

    let started = std::time::Instant::now();
    let res = client()
        .get(format!("http://{}/admin", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(res.text().await.unwrap().contains("Cannot connect to admin server"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_api_status_relayed() {
    let (backend, mut requests) = start_backend(http_response(
        "200 OK",
        &[("Content-Type", "application/json")],
        r#"{"ok":true}"#,
    ))
    .await;
    let root = static_root();
    let (addr, shutdown, _) = start_relay(relay_config(backend, &root)).await;

    let res = client()
        .get(format!("http://{}/api/status", addr))
        .header("Cookie", "sid=abc")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    assert_eq!(res.headers()["content-type"], "application/json");
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.bytes().await.unwrap().as_ref(), br#"{"ok":true}"#);

    let seen = requests.recv().await.unwrap();
    assert_eq!(seen.request_line(), "GET /api/status HTTP/1.1");
    assert_eq!(seen.header("host").unwrap(), backend.to_string());
    assert_eq!(seen.header("cookie").unwrap(), "sid=abc");
    assert!(seen.header("x-request-id").is_some());
    assert!(seen.body.is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_post_redirect_is_rewritten() {
    let (backend, mut requests) = common::start_backend_with(|backend| {
        let location = format!("http://{}/admin", backend);
        http_response(
            "302 Found",
            &[
                ("Location", location.as_str()),
                ("Set-Cookie", "sid=xyz; Path=/; HttpOnly"),
            ],
            "",
        )
    })
    .await;
    let root = static_root();
    let (addr, shutdown, _) = start_relay(relay_config(backend, &root)).await;

    let res = client()
        .post(format!("http://{}/admin/save", addr))
        .header("Content-Type", "application/json")
        .header("X-Custom", "1")
        .body(r#"{"x":1}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()["location"], "/admin");
    assert_eq!(res.headers()["set-cookie"], "sid=xyz; Path=/; HttpOnly");

    let seen = requests.recv().await.unwrap();
    assert_eq!(seen.request_line(), "POST /admin/save HTTP/1.1");
    assert_eq!(seen.body, br#"{"x":1}"#);
    assert_eq!(seen.header("content-type").unwrap(), "application/json");
    assert_eq!(seen.header("x-custom").unwrap(), "1");

    shutdown.trigger();
}

#[tokio::test]
async fn test_backend_error_body_relayed() {
    let (backend, _requests) = start_backend(http_response(
        "404 Not Found",
        &[("Content-Type", "text/plain"), ("X-Powered-By", "Express")],
        "no such page",
    ))
    .await;
    let root = static_root();
    let (addr, shutdown, _) = start_relay(relay_config(backend, &root)).await;

    let res = client()
        .get(format!("http://{}/admin/missing", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(!res.headers().contains_key("x-powered-by"));
    assert_eq!(res.text().await.unwrap(), "no such page");

    shutdown.trigger();
}

#[tokio::test]
async fn test_empty_backend_error_gets_page() {
    let (backend, _requests) = start_backend(http_response("500 Internal Server Error", &[], "")).await;
    let root = static_root();
    let (addr, shutdown, _) = start_relay(relay_config(backend, &root)).await;

    let res = client()
        .get(format!("http://{}/admin/report", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.text().await.unwrap().contains("Admin Server Error (500)"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_set_cookie_passthrough() {
    let (backend, _requests) = start_backend(http_response(
        "200 OK",
        &[
            ("Content-Type", "text/html"),
            ("Set-Cookie", "sid=abc; Path=/admin; HttpOnly"),
            ("Set-Cookie", "theme=dark"),
        ],
        "<p>dashboard</p>",
    ))
    .await;
    let root = static_root();
    let (addr, shutdown, _) = start_relay(relay_config(backend, &root)).await;

    let res = client()
        .get(format!("http://{}/admin/dashboard", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let cookies: Vec<_> = res
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert_eq!(cookies, vec!["sid=abc; Path=/admin; HttpOnly", "theme=dark"]);

    shutdown.trigger();
}

#[tokio::test]
async fn test_bare_admin_query_opt_in() {
    let (backend, mut requests) = start_backend(http_response("200 OK", &[], "ok")).await;
    let root = static_root();
    let mut config = relay_config(backend, &root);
    config.routing.append_query_to_bare_prefix = true;
    let (addr, shutdown, _) = start_relay(config).await;

    let res = client().get(format!("http://{}/admin", addr)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let seen = requests.recv().await.unwrap();
    assert_eq!(seen.request_line(), "GET /admin? HTTP/1.1");

    shutdown.trigger();
}

#[tokio::test]
async fn test_graceful_shutdown() {
    let backend = common::unused_addr().await;
    let root = static_root();
    let (_, shutdown, handle) = start_relay(relay_config(backend, &root)).await;

    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}

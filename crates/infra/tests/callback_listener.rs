//! Loopback callback listener against real sockets.

use std::net::TcpListener as StdListener;
use std::time::Duration;

use slack_status_core::{CallbackListener, TlsMaterialStrategy};
use slack_status_domain::{ListenerTimeouts, ListenerTls, SlackStatusError};
use slack_status_infra::{EmbeddedPair, LoopbackCallbackListener};

fn free_port() -> u16 {
    let listener = StdListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    listener.local_addr().expect("local addr").port()
}

fn timeouts(idle: Duration) -> ListenerTimeouts {
    ListenerTimeouts { read: Duration::from_secs(5), write: Duration::from_secs(5), idle }
}

fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .danger_accept_invalid_certs(true)
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client")
}

/// The listener task may not have started serving yet; retry until it does.
async fn get_with_retry(url: &str) -> reqwest::Response {
    let client = http_client();
    for _ in 0..50 {
        if let Ok(response) = client.get(url).send().await {
            return response;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("listener never answered {url}");
}

fn start(
    port: u16,
    tls: ListenerTls,
    idle: Duration,
) -> tokio::task::JoinHandle<slack_status_domain::Result<String>> {
    let listener = LoopbackCallbackListener::new(timeouts(idle));
    tokio::spawn(async move {
        listener.listen_for_code(&format!("127.0.0.1:{port}"), "/auth", &tls).await
    })
}

#[tokio::test]
async fn plaintext_listener_returns_code() {
    let port = free_port();
    let task = start(port, ListenerTls::Plaintext, Duration::from_secs(10));

    let response = get_with_retry(&format!("http://127.0.0.1:{port}/auth?code=abc123")).await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert!(response.text().await.unwrap().contains("Authorization received"));

    assert_eq!(task.await.unwrap().unwrap(), "abc123");
}

#[tokio::test]
async fn tls_listener_returns_code() {
    let material = EmbeddedPair.resolve().unwrap().expect("embedded pair");
    let port = free_port();
    let task = start(port, ListenerTls::Tls(material), Duration::from_secs(10));

    let response = get_with_retry(&format!("https://127.0.0.1:{port}/auth?code=tls-code")).await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    assert_eq!(task.await.unwrap().unwrap(), "tls-code");
}

#[tokio::test]
async fn missing_code_stops_listener_with_error() {
    let port = free_port();
    let task = start(port, ListenerTls::Plaintext, Duration::from_secs(10));

    let response = get_with_retry(&format!("http://127.0.0.1:{port}/auth?state=xyz")).await;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let result = task.await.unwrap();
    assert_eq!(result, Err(SlackStatusError::MissingAuthorizationCode));
}

#[tokio::test]
async fn listener_closes_after_first_code() {
    let port = free_port();
    let task = start(port, ListenerTls::Plaintext, Duration::from_secs(10));

    get_with_retry(&format!("http://127.0.0.1:{port}/auth?code=first")).await;
    assert_eq!(task.await.unwrap().unwrap(), "first");

    let second = http_client().get(format!("http://127.0.0.1:{port}/auth?code=second")).send().await;
    assert!(second.is_err(), "listener still accepting connections");
}

#[tokio::test]
async fn times_out_without_callback() {
    let port = free_port();
    let task = start(port, ListenerTls::Plaintext, Duration::from_millis(200));

    let result = task.await.unwrap();
    assert_eq!(result, Err(SlackStatusError::CallbackTimeout(0)));
}

#[tokio::test]
async fn invalid_tls_material_is_bind_error() {
    let material = slack_status_domain::TlsMaterial {
        cert_pem: b"not a certificate".to_vec(),
        key_pem: b"not a key".to_vec(),
        source: slack_status_domain::TlsSource::Installed,
    };
    let port = free_port();

    let result = start(port, ListenerTls::Tls(material), Duration::from_secs(1)).await.unwrap();
    assert!(matches!(result, Err(SlackStatusError::ListenerBind(_))), "got {result:?}");
}

//! Loopback HTTP(S) server that receives the OAuth redirect.
//!
//! One listener per login attempt. The handler hands the code to the waiting
//! caller over a oneshot channel; the caller then shuts the server down
//! gracefully, so the browser always gets its response before the socket
//! closes.

use std::collections::HashMap;
use std::io;
use std::net::{SocketAddr, TcpListener, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;
use hyper_util::rt::{TokioExecutor, TokioTimer};
use hyper_util::server::conn::auto::Builder as ConnectionBuilder;
use parking_lot::Mutex;
use slack_status_core::CallbackListener;
use slack_status_domain::{ListenerTimeouts, ListenerTls, Result, SlackStatusError, TlsMaterial};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::timeout::TimeoutLayer;
use tracing::{debug, info, warn};

const ACKNOWLEDGEMENT: &str =
    "Authorization received. You can close this window and return to your terminal.\n";
const MISSING_CODE: &str = "No authorization code found in the redirect. Run the login again.\n";
const ALREADY_RECEIVED: &str = "This login has already completed.\n";

type CodeSender = oneshot::Sender<Result<String>>;

#[derive(Clone)]
struct CallbackState {
    sender: Arc<Mutex<Option<CodeSender>>>,
}

/// [`CallbackListener`] backed by axum on a loopback socket.
#[derive(Debug, Clone, Copy)]
pub struct LoopbackCallbackListener {
    timeouts: ListenerTimeouts,
}

impl LoopbackCallbackListener {
    /// `timeouts.idle` bounds the whole wait for the callback.
    pub fn new(timeouts: ListenerTimeouts) -> Self {
        Self { timeouts }
    }

    async fn spawn_server(
        &self,
        listener: TcpListener,
        tls: &ListenerTls,
        app: Router,
        handle: Handle,
    ) -> Result<JoinHandle<io::Result<()>>> {
        let service = app.into_make_service();

        match tls {
            ListenerTls::Plaintext => {
                let mut server = axum_server::from_tcp(listener).handle(handle);
                self.configure(server.http_builder());
                Ok(tokio::spawn(async move { server.serve(service).await }))
            }
            ListenerTls::Tls(material) => {
                let config = rustls_config(material).await?;
                let mut server = axum_server::from_tcp_rustls(listener, config).handle(handle);
                self.configure(server.http_builder());
                Ok(tokio::spawn(async move { server.serve(service).await }))
            }
        }
    }

    fn configure(&self, builder: &mut ConnectionBuilder<TokioExecutor>) {
        builder.http1().timer(TokioTimer::new()).header_read_timeout(self.timeouts.read);
    }
}

#[async_trait]
impl CallbackListener for LoopbackCallbackListener {
    async fn listen_for_code(
        &self,
        address: &str,
        path: &str,
        tls: &ListenerTls,
    ) -> Result<String> {
        validate_path(path)?;
        let listener = bind(address)?;
        let local_addr = listener.local_addr().ok();

        let (sender, receiver) = oneshot::channel();
        let app = router(path, sender, self.timeouts.write);
        let handle = Handle::new();
        let mut server = self.spawn_server(listener, tls, app, handle.clone()).await?;
        info!(address, ?local_addr, path, scheme = tls.scheme(), "callback_listener.bound");

        let outcome = tokio::select! {
            received = tokio::time::timeout(self.timeouts.idle, receiver) => match received {
                Ok(Ok(result)) => result,
                Ok(Err(_)) => Err(SlackStatusError::Internal(
                    "callback handler dropped without reporting a result".into(),
                )),
                Err(_) => Err(SlackStatusError::CallbackTimeout(self.timeouts.idle.as_secs())),
            },
            stopped = &mut server => return Err(unexpected_stop(stopped)),
        };

        handle.graceful_shutdown(Some(self.timeouts.write));
        match server.await {
            Ok(Ok(())) => debug!("callback_listener.closed"),
            Ok(Err(err)) => warn!(error = %err, "callback_listener.shutdown_failed"),
            Err(err) => warn!(error = %err, "callback_listener.task_failed"),
        }

        outcome
    }
}

fn router(path: &str, sender: CodeSender, write_timeout: Duration) -> Router {
    let state = CallbackState { sender: Arc::new(Mutex::new(Some(sender))) };

    Router::new()
        .route(path, get(receive_code))
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, write_timeout))
        .with_state(state)
}

async fn receive_code(
    State(state): State<CallbackState>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, &'static str) {
    let Some(sender) = state.sender.lock().take() else {
        return (StatusCode::GONE, ALREADY_RECEIVED);
    };

    if let Some(code) = params.get("code").filter(|code| !code.is_empty()) {
        let _ = sender.send(Ok(code.clone()));
        return (StatusCode::OK, ACKNOWLEDGEMENT);
    }

    warn!(provider_error = params.get("error").map(String::as_str), "callback_listener.missing_code");
    let _ = sender.send(Err(SlackStatusError::MissingAuthorizationCode));
    (StatusCode::BAD_REQUEST, MISSING_CODE)
}

async fn rustls_config(material: &TlsMaterial) -> Result<RustlsConfig> {
    // Installing twice is harmless; the first provider stays.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    RustlsConfig::from_pem(material.cert_pem.clone(), material.key_pem.clone()).await.map_err(
        |err| {
            SlackStatusError::ListenerBind(format!(
                "unusable {} certificate pair: {err}",
                material.source
            ))
        },
    )
}

/// Bind the first usable address, preferring IPv4 loopback.
fn bind(address: &str) -> Result<TcpListener> {
    let mut candidates: Vec<SocketAddr> = address
        .to_socket_addrs()
        .map_err(|err| SlackStatusError::ListenerBind(format!("cannot resolve {address}: {err}")))?
        .collect();
    candidates.sort_by_key(|candidate| !candidate.is_ipv4());

    let mut last_error = None;
    for candidate in candidates {
        match TcpListener::bind(candidate) {
            Ok(listener) => {
                listener.set_nonblocking(true).map_err(|err| {
                    SlackStatusError::ListenerBind(format!("cannot configure {candidate}: {err}"))
                })?;
                return Ok(listener);
            }
            Err(err) => {
                debug!(%candidate, error = %err, "callback_listener.bind_failed");
                last_error = Some(err);
            }
        }
    }

    Err(SlackStatusError::ListenerBind(match last_error {
        Some(err) => format!("cannot listen on {address}: {err}"),
        None => format!("{address} did not resolve to any address"),
    }))
}

fn validate_path(path: &str) -> Result<()> {
    let valid = path.starts_with('/')
        && path.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(SlackStatusError::InvalidInput(format!("unsupported callback path {path:?}")))
    }
}

type ServerExit = std::result::Result<io::Result<()>, tokio::task::JoinError>;

fn unexpected_stop(stopped: ServerExit) -> SlackStatusError {
    match stopped {
        Ok(Ok(())) => SlackStatusError::ListenerBind(
            "callback listener stopped before a callback arrived".into(),
        ),
        Ok(Err(err)) => SlackStatusError::ListenerBind(format!("callback listener failed: {err}")),
        Err(err) => SlackStatusError::Internal(format!("callback listener task failed: {err}")),
    }
}

//! HTTP webhook receiver.
//!
//! Routes:
//!
//! | Method | Path | Purpose |
//! |--------|------|---------|
//! | `POST` | [`WEBHOOK_PATH`] | GitHub webhook deliveries |
//! | `GET` | `/health` | Liveness probe, answers `ok` |
//!
//! A delivery that routes to the policy is answered with `202 Accepted` and
//! handled on its own task; the response never waits for GitHub mutations.
//! Those tasks are tracked, and shutdown waits for every accepted delivery to
//! finish after the HTTP side has stopped.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use policy::DeliveryId;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use crate::Dispatcher;

/// Path GitHub posts webhook deliveries to.
pub const WEBHOOK_PATH: &str = "/api/github/webhooks";

const EVENT_HEADER: &str = "x-github-event";
const DELIVERY_HEADER: &str = "x-github-delivery";

/// Errors that stop the webhook server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listen address could not be bound.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// Requested address.
        addr: SocketAddr,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The server failed while running.
    #[error("Webhook server error: {0}")]
    Serve(#[source] std::io::Error),
}

#[derive(Clone)]
struct AppState {
    dispatcher: Arc<Dispatcher>,
    deliveries: TaskTracker,
}

/// Builds the webhook router. Accepted deliveries are spawned on `deliveries`.
pub fn router(dispatcher: Arc<Dispatcher>, deliveries: TaskTracker) -> Router {
    Router::new()
        .route(WEBHOOK_PATH, post(receive_webhook))
        .route("/health", get(health))
        .with_state(AppState {
            dispatcher,
            deliveries,
        })
}

/// Binds `addr` and serves webhooks until `shutdown` resolves.
pub async fn serve<F>(addr: SocketAddr, dispatcher: Arc<Dispatcher>, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    serve_listener(listener, dispatcher, shutdown).await
}

/// Serves webhooks on an already-bound listener until `shutdown` resolves,
/// then waits for in-flight deliveries.
pub async fn serve_listener<F>(
    listener: TcpListener,
    dispatcher: Arc<Dispatcher>,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, path = WEBHOOK_PATH, "listening for GitHub webhooks");
    }

    let deliveries = TaskTracker::new();
    let served = axum::serve(listener, router(dispatcher, deliveries.clone()))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve);

    deliveries.close();
    if !deliveries.is_empty() {
        info!(
            in_flight = deliveries.len(),
            "waiting for accepted deliveries to finish"
        );
    }
    deliveries.wait().await;

    served
}

async fn health() -> &'static str {
    "ok"
}

async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

    let Some(event_name) = header(EVENT_HEADER) else {
        warn!("webhook delivery without {EVENT_HEADER} header");
        return StatusCode::BAD_REQUEST;
    };
    let delivery = DeliveryId::parse_or_random(header(DELIVERY_HEADER));

    match Dispatcher::route(event_name, &body) {
        Ok(Some(event)) => {
            let dispatcher = state.dispatcher;
            state.deliveries.spawn(async move {
                dispatcher.dispatch(delivery, event).await;
            });
            StatusCode::ACCEPTED
        }
        Ok(None) => {
            debug!(%delivery, event = event_name, "delivery ignored");
            StatusCode::OK
        }
        Err(err) => {
            warn!(%delivery, event = event_name, error = %err, "rejected webhook delivery");
            StatusCode::BAD_REQUEST
        }
    }
}

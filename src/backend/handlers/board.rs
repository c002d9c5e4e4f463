/**
 * Board Document Handlers
 *
 * GET /board returns the current document, or - with a `Subscribe:`
 * header - a long-lived stream of newline-delimited JSON documents:
 * first the current snapshot, then every accepted write as it lands.
 *
 * PUT /board atomically overwrites the full document. There is no merge
 * and no patching; whichever write lands last is the state every
 * subscriber converges on.
 *
 * A subscription request carrying `?session=<id>` also registers that
 * session's presence marker for as long as the stream lives. The marker
 * is erased here, server-side, when the stream ends - whether the client
 * said goodbye or simply vanished.
 */
use std::collections::HashMap;

use axum::{
    body::Body,
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use bytes::Bytes;
use futures_util::stream;

use crate::backend::server::state::AppState;
use crate::store::MemoryStore;

/// Erases a session's presence marker when dropped
///
/// Held by the stream-forwarding task; the task ends when the client is
/// gone, and the guard's drop is the store-side disconnect cleanup.
struct PresenceGuard {
    store: MemoryStore,
    session_id: String,
}

impl Drop for PresenceGuard {
    fn drop(&mut self) {
        tracing::info!(
            "[Server] Subscription ended, erasing presence/{}",
            self.session_id
        );
        self.store.remove_presence(&self.session_id);
    }
}

/// Format one document update as a stream frame (JSON + newline)
fn format_update(document: &serde_json::Value) -> Result<Bytes, StatusCode> {
    let mut frame = serde_json::to_vec(document).map_err(|e| {
        tracing::error!("[Server] Failed to serialize document: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    frame.push(b'\n');
    Ok(Bytes::from(frame))
}

/// Handle GET /board
///
/// Without a `Subscribe:` header, returns the current document (or 204
/// when the store holds none). With it, returns a subscription stream.
pub async fn handle_board_get(
    State(app_state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    headers: axum::http::HeaderMap,
) -> Result<Response<Body>, StatusCode> {
    if !headers.contains_key("subscribe") {
        return match app_state.store.read_document() {
            Some(document) => {
                let frame = format_update(&document)?;
                Response::builder()
                    .status(StatusCode::OK)
                    .header(axum::http::header::CONTENT_TYPE, "application/json")
                    .body(Body::from(frame))
                    .map_err(|e| {
                        tracing::error!("[Server] Failed to build response: {:?}", e);
                        StatusCode::INTERNAL_SERVER_ERROR
                    })
            }
            None => Response::builder()
                .status(StatusCode::NO_CONTENT)
                .body(Body::empty())
                .map_err(|e| {
                    tracing::error!("[Server] Failed to build response: {:?}", e);
                    StatusCode::INTERNAL_SERVER_ERROR
                }),
        };
    }

    tracing::info!("[Server] Board subscription request received");

    let store = app_state.store.clone();
    let mut broadcast_rx = store.subscribe_document();
    let initial = store.read_document();

    // A subscription may bind a presence session to this connection.
    let guard = params.get("session").map(|session_id| {
        tracing::info!("[Server] Subscription registers presence/{session_id}");
        store.set_presence(session_id);
        PresenceGuard {
            store: store.clone(),
            session_id: session_id.clone(),
        }
    });

    let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<Result<Bytes, std::io::Error>>();
    let tx_heartbeat = tx.clone();

    tokio::spawn(async move {
        // Held until the client goes away; dropping it is the
        // store-side disconnect cleanup.
        let _guard = guard;

        if let Some(document) = initial {
            match format_update(&document) {
                Ok(frame) => {
                    if tx.send(Ok(frame)).is_err() {
                        tracing::warn!("[Server] Failed to send initial snapshot (receiver dropped)");
                        return;
                    }
                }
                Err(e) => {
                    tracing::error!("[Server] Failed to format initial snapshot: {:?}", e);
                    return;
                }
            }
        }

        loop {
            match broadcast_rx.recv().await {
                Ok(document) => match format_update(&document) {
                    Ok(frame) => {
                        if tx.send(Ok(frame)).is_err() {
                            tracing::info!("[Server] Subscriber gone, stopping stream");
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::error!("[Server] Failed to format update: {:?}", e);
                        // Keep the stream alive; the next write may be fine.
                    }
                },
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        "[Server] Subscriber lagged, skipped {skipped} updates; next frame carries the full document"
                    );
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                    tracing::warn!("[Server] Store channel closed, ending stream");
                    break;
                }
            }
        }
    });

    // Keep-alive heartbeats so intermediaries flush and hold the
    // connection. The first beat waits a full period; the initial
    // snapshot frame always leads the stream.
    tokio::spawn(async move {
        let period = tokio::time::Duration::from_secs(30);
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        loop {
            interval.tick().await;
            if tx_heartbeat.send(Ok(Bytes::from("\n"))).is_err() {
                break;
            }
        }
    });

    let body_stream = stream::unfold(rx, |mut receiver| async move {
        receiver.recv().await.map(|item| (item, receiver))
    });

    Response::builder()
        .status(StatusCode::OK)
        .header("Subscribe", "")
        .header(
            axum::http::header::CACHE_CONTROL,
            "no-cache, no-transform, no-store",
        )
        .header(axum::http::header::CONTENT_TYPE, "application/x-ndjson")
        .header("X-Accel-Buffering", "no")
        .body(Body::from_stream(body_stream))
        .map_err(|e| {
            tracing::error!("[Server] Failed to build response: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// Handle PUT /board: atomic full-document overwrite
///
/// The store does not validate board shape; it replicates whatever JSON
/// the last writer published, and clients decide what is well-formed.
/// Only bodies that are not JSON at all are rejected.
pub async fn handle_board_put(
    State(app_state): State<AppState>,
    body: axum::body::Bytes,
) -> Result<Response<Body>, StatusCode> {
    let document: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!("[Server] Failed to parse document body: {:?}", e);
        StatusCode::BAD_REQUEST
    })?;

    tracing::debug!("[Server] Accepting full-document write ({} bytes)", body.len());
    app_state.store.write_document(document);

    Response::builder()
        .status(StatusCode::OK)
        .body(Body::empty())
        .map_err(|e| {
            tracing::error!("[Server] Failed to build response: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

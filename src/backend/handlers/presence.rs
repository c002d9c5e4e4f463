/**
 * Presence Handlers
 *
 * GET /presence reports the online count - the number of currently
 * present session markers - or, with a `Subscribe:` header, streams the
 * count on every presence change.
 *
 * PUT /presence/{session} and DELETE /presence/{session} register and
 * explicitly erase one session's marker. The DELETE is the graceful
 * path; ungraceful disconnects are cleaned up by the subscription
 * connection itself (see the board handler's presence guard).
 */
use axum::{
    body::Body,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use bytes::Bytes;
use futures_util::StreamExt;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::backend::server::state::AppState;

/// Format one online-count frame (JSON + newline)
fn count_frame(online: usize) -> Bytes {
    Bytes::from(format!("{{\"online\":{online}}}\n"))
}

/// Handle GET /presence
pub async fn handle_presence_get(
    State(app_state): State<AppState>,
    headers: axum::http::HeaderMap,
) -> Result<Response<Body>, StatusCode> {
    let store = app_state.store.clone();

    if !headers.contains_key("subscribe") {
        return Response::builder()
            .status(StatusCode::OK)
            .header(axum::http::header::CONTENT_TYPE, "application/json")
            .body(Body::from(count_frame(store.online_count())))
            .map_err(|e| {
                tracing::error!("[Server] Failed to build response: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            });
    }

    tracing::info!("[Server] Presence subscription request received");

    let mut broadcast_rx = store.subscribe_presence();
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<Bytes>();

    tokio::spawn(async move {
        if tx.send(count_frame(store.online_count())).is_err() {
            return;
        }
        loop {
            match broadcast_rx.recv().await {
                Ok(sessions) => {
                    if tx.send(count_frame(sessions.len())).is_err() {
                        tracing::info!("[Server] Presence subscriber gone, stopping stream");
                        break;
                    }
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("[Server] Presence subscriber lagged, skipped {skipped}");
                    // Resync from the live count on the next event.
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                    tracing::warn!("[Server] Presence channel closed, ending stream");
                    break;
                }
            }
        }
    });

    let body_stream = UnboundedReceiverStream::new(rx).map(Ok::<_, std::io::Error>);

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

/// Handle PUT /presence/{session}: register a session marker
pub async fn handle_presence_register(
    State(app_state): State<AppState>,
    Path(session_id): Path<String>,
) -> StatusCode {
    tracing::debug!("[Server] Registering presence/{session_id}");
    app_state.store.set_presence(&session_id);
    StatusCode::OK
}

/// Handle DELETE /presence/{session}: explicitly erase a session marker
pub async fn handle_presence_remove(
    State(app_state): State<AppState>,
    Path(session_id): Path<String>,
) -> StatusCode {
    tracing::debug!("[Server] Erasing presence/{session_id}");
    app_state.store.remove_presence(&session_id);
    StatusCode::OK
}

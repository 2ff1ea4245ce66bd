//! HTTP routes.
//!
//! Besides the WebSocket the game can be driven with plain JSON requests, which is
//! handy for scripting and for tests.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::game::GameError;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::screen::ScreenView;
use crate::state::AppState;
use crate::ws;

/// Build the application router
pub fn router(state: Arc<AppState>, static_dir: &str) -> Router {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .route("/api/view", get(get_view))
        .route("/api/action", post(post_action))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Current screen.
///
/// GET /api/view
pub async fn get_view(State(state): State<Arc<AppState>>) -> Json<ScreenView> {
    Json(state.view().await)
}

/// Apply a client message and return the resulting screen.
///
/// POST /api/action
pub async fn post_action(
    State(state): State<Arc<AppState>>,
    Json(msg): Json<ClientMessage>,
) -> Response {
    let Some(action) = msg.into_action() else {
        return Json(state.view().await).into_response();
    };

    match state.dispatch(action).await {
        Ok(view) => Json(view).into_response(),
        Err(e) => {
            let status = match e {
                GameError::MissingPlayerName | GameError::UnknownChoice(_) => {
                    StatusCode::BAD_REQUEST
                }
                GameError::InvalidAction { .. }
                | GameError::CategoryUnavailable(_)
                | GameError::AnswerLocked => StatusCode::CONFLICT,
            };
            (status, Json(ServerMessage::error(e.code(), e.to_string()))).into_response()
        }
    }
}

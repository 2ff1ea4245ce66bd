//! WebSocket message dispatch
//!
//! Turns client messages into game actions. Successful actions answer through the
//! broadcast channel; only errors and sync requests are answered directly.

use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;
use std::sync::Arc;

/// Handle client messages and return optional response
pub async fn handle_message(msg: ClientMessage, state: &Arc<AppState>) -> Option<ServerMessage> {
    let Some(action) = msg.into_action() else {
        return Some(ServerMessage::screen(
            state.game_id().await,
            state.view().await,
        ));
    };

    tracing::info!("Client requested to {}", action.name());
    match state.dispatch(action).await {
        Ok(_) => None,
        Err(e) => Some(ServerMessage::error(e.code(), e.to_string())),
    }
}

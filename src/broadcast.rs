use crate::state::AppState;
use crate::types::GameId;
use std::sync::Arc;
use std::time::Duration;

/// Spawn the "let the players read the feedback" pause.
///
/// When it elapses game `game_id` moves past `question_index`; if the game has
/// moved on in the meantime (ended, reset) the advance is ignored.
pub fn spawn_advance_timer(
    state: Arc<AppState>,
    game_id: GameId,
    question_index: usize,
    after: Duration,
) {
    tokio::spawn(async move {
        tokio::time::sleep(after).await;

        tracing::debug!(
            "Feedback delay elapsed for game {} question {}",
            game_id,
            question_index
        );
        state.advance(&game_id, question_index).await;
    });
}

use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

use crate::broadcast::spawn_advance_timer;
use crate::game::{Action, Effect, Game, GameError};
use crate::protocol::ServerMessage;
use crate::screen::ScreenView;
use crate::trivia::QuestionSource;
use crate::types::*;

/// Shared application state.
///
/// Owns the one game of this server. Every mutation, including the network
/// fetches it triggers, runs while holding the game lock, so actions are
/// applied strictly one after another.
pub struct AppState {
    pub game: Mutex<Game>,
    pub source: Arc<dyn QuestionSource>,
    /// Broadcast channel for screen updates and notices
    pub broadcast: broadcast::Sender<ServerMessage>,
}

impl AppState {
    pub fn new(source: Arc<dyn QuestionSource>, config: GameConfig) -> Self {
        Self::with_game(source, Game::new(config))
    }

    pub fn with_game(source: Arc<dyn QuestionSource>, game: Game) -> Self {
        let (tx, _rx) = broadcast::channel(100);
        Self {
            game: Mutex::new(game),
            source,
            broadcast: tx,
        }
    }

    /// Current view of the visible panel
    pub async fn view(&self) -> ScreenView {
        ScreenView::render(&*self.game.lock().await)
    }

    pub async fn game_id(&self) -> GameId {
        self.game.lock().await.id().to_string()
    }

    /// Apply a player action and carry out everything it sets in motion
    pub async fn dispatch(self: &Arc<Self>, action: Action) -> Result<ScreenView, GameError> {
        let mut game = self.game.lock().await;
        let name = action.name();

        let effects = game.apply(action).map_err(|e| {
            tracing::debug!("Rejected action '{}': {}", name, e);
            e
        })?;
        self.run_effects(&mut game, effects).await;

        Ok(ScreenView::render(&game))
    }

    /// Feedback pause elapsed for the given question of game `game_id`
    pub async fn advance(self: &Arc<Self>, game_id: &str, question_index: usize) -> ScreenView {
        let mut game = self.game.lock().await;
        let effects = game.advance(game_id, question_index);
        self.run_effects(&mut game, effects).await;
        ScreenView::render(&game)
    }

    async fn run_effects(self: &Arc<Self>, game: &mut Game, effects: Vec<Effect>) {
        let mut queue: VecDeque<Effect> = effects.into();

        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::FetchCategories => {
                    tracing::info!("Fetching categories from {}", self.source.name());
                    let result = self.source.fetch_categories().await;
                    queue.extend(game.on_categories(result));
                }
                Effect::FetchQuestions(category) => {
                    tracing::info!(
                        "Fetching questions for {} from {}",
                        category,
                        self.source.name()
                    );
                    let result = self.source.fetch_questions(&category).await;
                    queue.extend(game.on_questions(&category, result));
                }
                Effect::Notify(notice) => {
                    self.broadcast_to_all(ServerMessage::Notice { notice });
                }
                Effect::ScheduleAdvance {
                    game_id,
                    question_index,
                    after,
                } => {
                    spawn_advance_timer(self.clone(), game_id, question_index, after);
                }
                Effect::Show(phase) => {
                    tracing::debug!("Showing {:?}", phase);
                    self.broadcast_to_all(ServerMessage::screen(
                        game.id().to_string(),
                        ScreenView::render(game),
                    ));
                }
            }
        }
    }

    pub fn broadcast_to_all(&self, msg: ServerMessage) {
        // No receivers connected is fine
        let _ = self.broadcast.send(msg);
    }
}

use serde::{Deserialize, Serialize};

use super::{Effect, Game, GameError, Phase};
use crate::types::Player;

/// Final result of a game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Winner { name: String },
    Tie,
}

impl Outcome {
    pub fn message(&self) -> String {
        match self {
            Outcome::Winner { name } => format!("{} wins!", name),
            Outcome::Tie => "It's a tie!".to_string(),
        }
    }
}

impl Game {
    /// Register both players and move on to category selection
    pub(super) fn start(&mut self, first: &str, second: &str) -> Result<Vec<Effect>, GameError> {
        self.expect_phase("start", Phase::Setup)?;

        let (first, second) = (first.trim(), second.trim());
        if first.is_empty() || second.is_empty() {
            return Err(GameError::MissingPlayerName);
        }

        self.players = vec![Player::new(first), Player::new(second)];
        self.current_player = 0;
        self.phase = Phase::CategorySelect;

        tracing::info!("Game {} started: {} vs {}", self.id, first, second);
        Ok(vec![Effect::Show(Phase::CategorySelect), Effect::FetchCategories])
    }

    /// Add points to whoever is answering right now
    pub(super) fn award_current(&mut self, points: u32) -> Option<&Player> {
        let player = self.players.get_mut(self.current_player)?;
        player.score += points;
        Some(player)
    }

    /// Hand the turn to the other player
    pub(super) fn pass_turn(&mut self) {
        if !self.players.is_empty() {
            self.current_player = (self.current_player + 1) % self.players.len();
        }
    }

    /// Finish the game from wherever it is
    pub(super) fn end_game(&mut self) -> Result<Vec<Effect>, GameError> {
        if self.phase == Phase::GameOver {
            return Err(GameError::InvalidAction {
                action: "end the game",
                phase: self.phase,
            });
        }

        self.phase = Phase::GameOver;
        self.pending_category = None;
        self.choices.clear();

        tracing::info!("Game {} ended: {}", self.id, self.outcome().message());
        Ok(vec![Effect::Show(Phase::GameOver)])
    }

    /// Throw away everything and return to setup with a fresh game id
    pub(super) fn reset(&mut self) -> Result<Vec<Effect>, GameError> {
        self.expect_phase("reset the game", Phase::GameOver)?;

        let config = self.config.clone();
        let rng = self.rng.clone();
        let previous = std::mem::replace(self, Game::with_rng(config, rng));

        tracing::info!("Game {} reset, new game {}", previous.id, self.id);
        Ok(vec![Effect::Show(Phase::Setup)])
    }

    /// Compare the two scores
    pub fn outcome(&self) -> Outcome {
        match self.players.as_slice() {
            [first, second] if first.score > second.score => Outcome::Winner {
                name: first.name.clone(),
            },
            [first, second] if second.score > first.score => Outcome::Winner {
                name: second.name.clone(),
            },
            _ => Outcome::Tie,
        }
    }
}

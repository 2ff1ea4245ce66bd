//! Two-player trivia state machine.
//!
//! The game never performs I/O. Every operation mutates the game in place and
//! returns the effects the caller has to carry out (fetches, timers, redraws).
//! Results of those effects are fed back through `on_categories`,
//! `on_questions` and `advance`.

mod player;
mod round;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::types::*;

pub use player::Outcome;

/// Where the game currently is
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Setup,
    CategorySelect,
    QuestionActive,
    RoundComplete,
    GameOver,
}

/// Player-initiated actions
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Start { first: String, second: String },
    ChooseCategory(Category),
    SubmitAnswer(String),
    RequestNewCategory,
    EndGame,
    ResetGame,
    /// Re-run category discovery after it failed
    RetryCategories,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Start { .. } => "start",
            Action::ChooseCategory(_) => "choose a category",
            Action::SubmitAnswer(_) => "submit an answer",
            Action::RequestNewCategory => "request a new category",
            Action::EndGame => "end the game",
            Action::ResetGame => "reset the game",
            Action::RetryCategories => "retry category discovery",
        }
    }
}

/// Work the caller must perform on behalf of the game
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchCategories,
    FetchQuestions(Category),
    Notify(Notice),
    /// Call `advance(game_id, question_index)` once `after` has elapsed
    ScheduleAdvance {
        game_id: GameId,
        question_index: usize,
        after: Duration,
    },
    /// The visible panel or its content changed
    Show(Phase),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Correct,
    Incorrect,
    Info,
    Error,
}

/// Transient message shown to the players
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    pub dismiss_after_ms: u64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("Please enter names for both players")]
    MissingPlayerName,

    #[error("Cannot {action} while in phase {phase:?}")]
    InvalidAction { action: &'static str, phase: Phase },

    #[error("Category '{0}' is not available")]
    CategoryUnavailable(Category),

    #[error("This question has already been answered")]
    AnswerLocked,

    #[error("'{0}' is not one of the offered answers")]
    UnknownChoice(String),
}

impl GameError {
    /// Stable code for protocol error messages
    pub fn code(&self) -> &'static str {
        match self {
            GameError::MissingPlayerName => "VALIDATION_ERROR",
            GameError::InvalidAction { .. } => "INVALID_ACTION",
            GameError::CategoryUnavailable(_) => "CATEGORY_UNAVAILABLE",
            GameError::AnswerLocked => "ANSWER_LOCKED",
            GameError::UnknownChoice(_) => "UNKNOWN_CHOICE",
        }
    }
}

pub struct Game {
    id: GameId,
    phase: Phase,
    players: Vec<Player>,
    current_player: usize,
    /// None until discovery succeeds
    categories: Option<Vec<Category>>,
    used_categories: Vec<Category>,
    current_category: Option<Category>,
    /// Category whose questions are being fetched
    pending_category: Option<Category>,
    questions: Vec<Question>,
    question_index: usize,
    /// Shuffled answers for the current question
    choices: Vec<String>,
    /// Set once the current question has been answered
    answered: bool,
    config: GameConfig,
    rng: StdRng,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Deterministic answer shuffling, for tests
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            phase: Phase::Setup,
            players: Vec::new(),
            current_player: 0,
            categories: None,
            used_categories: Vec::new(),
            current_category: None,
            pending_category: None,
            questions: Vec::new(),
            question_index: 0,
            choices: Vec::new(),
            answered: false,
            config,
            rng,
        }
    }

    /// Apply a player action
    pub fn apply(&mut self, action: Action) -> Result<Vec<Effect>, GameError> {
        match action {
            Action::Start { first, second } => self.start(&first, &second),
            Action::ChooseCategory(category) => self.choose_category(category),
            Action::SubmitAnswer(answer) => self.submit_answer(&answer),
            Action::RequestNewCategory => self.request_new_category(),
            Action::EndGame => self.end_game(),
            Action::ResetGame => self.reset(),
            Action::RetryCategories => self.retry_categories(),
        }
    }

    fn expect_phase(&self, action: &'static str, phase: Phase) -> Result<(), GameError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(GameError::InvalidAction {
                action,
                phase: self.phase,
            })
        }
    }

    fn notice(&self, kind: NoticeKind, text: String) -> Effect {
        Effect::Notify(Notice {
            text,
            kind,
            dismiss_after_ms: self.config.notice_ttl.as_millis() as u64,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player)
    }

    /// Categories returned by discovery, if it has completed
    pub fn categories(&self) -> Option<&[Category]> {
        self.categories.as_deref()
    }

    pub fn used_categories(&self) -> &[Category] {
        &self.used_categories
    }

    /// Discovered categories that have not been played yet
    pub fn available_categories(&self) -> Vec<Category> {
        self.categories
            .iter()
            .flatten()
            .filter(|c| !self.used_categories.contains(*c))
            .cloned()
            .collect()
    }

    pub fn current_category(&self) -> Option<&str> {
        self.current_category.as_deref()
    }

    pub fn pending_category(&self) -> Option<&str> {
        self.pending_category.as_deref()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.question_index)
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn is_answer_locked(&self) -> bool {
        self.answered
    }
}

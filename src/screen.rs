//! Mapping game state onto the five UI panels.
//!
//! Exactly one panel is visible at a time and the choice depends only on the
//! current phase. `ScreenView` carries what the visible panel needs to draw.

use serde::{Deserialize, Serialize};

use crate::game::{Game, Outcome, Phase};
use crate::types::{Category, Difficulty, Player};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Setup,
    CategorySelect,
    QuestionActive,
    RoundComplete,
    GameOver,
}

impl Screen {
    #[cfg(test)]
    pub const ALL: [Screen; 5] = [
        Screen::Setup,
        Screen::CategorySelect,
        Screen::QuestionActive,
        Screen::RoundComplete,
        Screen::GameOver,
    ];

    pub fn for_phase(phase: Phase) -> Screen {
        match phase {
            Phase::Setup => Screen::Setup,
            Phase::CategorySelect => Screen::CategorySelect,
            Phase::QuestionActive => Screen::QuestionActive,
            Phase::RoundComplete => Screen::RoundComplete,
            Phase::GameOver => Screen::GameOver,
        }
    }

    /// DOM id of the panel in `static/index.html`
    pub fn panel_id(self) -> &'static str {
        match self {
            Screen::Setup => "setup",
            Screen::CategorySelect => "categories",
            Screen::QuestionActive => "question",
            Screen::RoundComplete => "post-cat",
            Screen::GameOver => "game-over",
        }
    }

    /// Visibility of every panel for the given phase
    #[cfg(test)]
    pub fn visibility(phase: Phase) -> [(Screen, bool); 5] {
        let visible = Screen::for_phase(phase);
        Screen::ALL.map(|screen| (screen, screen == visible))
    }
}

/// Content of the visible panel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum ScreenView {
    Setup,
    CategorySelect {
        /// Categories that can still be chosen
        categories: Vec<Category>,
        used_categories: Vec<Category>,
        /// Discovery or a question fetch is outstanding
        loading: bool,
        players: Vec<Player>,
    },
    QuestionActive {
        category: Category,
        current_player: String,
        /// 1-based position within the round
        question_number: usize,
        question_count: usize,
        prompt: String,
        difficulty: Option<Difficulty>,
        choices: Vec<String>,
        /// Answer already submitted, choices disabled
        locked: bool,
        players: Vec<Player>,
    },
    RoundComplete {
        category: Category,
        players: Vec<Player>,
    },
    GameOver {
        players: Vec<Player>,
        outcome: Outcome,
        message: String,
    },
}

impl ScreenView {
    pub fn render(game: &Game) -> Self {
        let players = game.players().to_vec();

        match game.phase() {
            Phase::Setup => ScreenView::Setup,
            Phase::CategorySelect => ScreenView::CategorySelect {
                categories: game.available_categories(),
                used_categories: game.used_categories().to_vec(),
                loading: game.categories().is_none() || game.pending_category().is_some(),
                players,
            },
            Phase::QuestionActive => {
                let question = game.current_question();
                ScreenView::QuestionActive {
                    category: game.current_category().unwrap_or_default().to_string(),
                    current_player: game
                        .current_player()
                        .map(|p| p.name.clone())
                        .unwrap_or_default(),
                    question_number: game.question_index() + 1,
                    question_count: game.questions().len(),
                    prompt: question.map(|q| q.text.clone()).unwrap_or_default(),
                    difficulty: question.map(|q| q.difficulty),
                    choices: game.choices().to_vec(),
                    // Nothing to answer without a question
                    locked: game.is_answer_locked() || question.is_none(),
                    players,
                }
            }
            Phase::RoundComplete => ScreenView::RoundComplete {
                category: game.current_category().unwrap_or_default().to_string(),
                players,
            },
            Phase::GameOver => {
                let outcome = game.outcome();
                ScreenView::GameOver {
                    message: outcome.message(),
                    outcome,
                    players,
                }
            }
        }
    }

    pub fn screen(&self) -> Screen {
        match self {
            ScreenView::Setup => Screen::Setup,
            ScreenView::CategorySelect { .. } => Screen::CategorySelect,
            ScreenView::QuestionActive { .. } => Screen::QuestionActive,
            ScreenView::RoundComplete { .. } => Screen::RoundComplete,
            ScreenView::GameOver { .. } => Screen::GameOver,
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::game::{Action, Notice};
use crate::screen::ScreenView;
use crate::types::*;

pub const PROTOCOL_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ClientMessage {
    Start {
        first_player: String,
        second_player: String,
    },
    ChooseCategory {
        category: Category,
    },
    SubmitAnswer {
        answer: String,
    },
    RequestNewCategory,
    EndGame,
    ResetGame,
    RetryCategories,
    /// Ask for the current screen (e.g. after reconnecting)
    Sync,
}

impl ClientMessage {
    /// The game action this message asks for, if any
    pub fn into_action(self) -> Option<Action> {
        match self {
            ClientMessage::Start {
                first_player,
                second_player,
            } => Some(Action::Start {
                first: first_player,
                second: second_player,
            }),
            ClientMessage::ChooseCategory { category } => Some(Action::ChooseCategory(category)),
            ClientMessage::SubmitAnswer { answer } => Some(Action::SubmitAnswer(answer)),
            ClientMessage::RequestNewCategory => Some(Action::RequestNewCategory),
            ClientMessage::EndGame => Some(Action::EndGame),
            ClientMessage::ResetGame => Some(Action::ResetGame),
            ClientMessage::RetryCategories => Some(Action::RetryCategories),
            ClientMessage::Sync => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        protocol: String,
        game_id: GameId,
        /// DOM id of the panel to show
        panel: String,
        view: ScreenView,
        server_now: String,
    },
    /// Broadcast whenever the visible panel or its content changes
    Screen {
        game_id: GameId,
        panel: String,
        view: ScreenView,
    },
    /// Transient message, the client hides it after `dismiss_after_ms`
    Notice {
        #[serde(flatten)]
        notice: Notice,
    },
    Error {
        code: String,
        msg: String,
    },
}

impl ServerMessage {
    pub fn screen(game_id: GameId, view: ScreenView) -> Self {
        ServerMessage::Screen {
            game_id,
            panel: view.screen().panel_id().to_string(),
            view,
        }
    }

    pub fn error(code: &str, msg: impl Into<String>) -> Self {
        ServerMessage::Error {
            code: code.to_string(),
            msg: msg.into(),
        }
    }
}

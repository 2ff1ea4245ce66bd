use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Opaque ID types
pub type GameId = String;
pub type Category = String;

/// Difficulty tier of a question, used both for round selection and point value
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Position of this tier within a round (easy questions come first)
    pub fn rank(self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("Unknown difficulty: {}", other)),
        }
    }
}

/// A question as delivered by the trivia service.
///
/// The service does not guarantee a difficulty tag, so it stays optional until
/// the question is admitted into a round.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FetchedQuestion {
    pub category: Category,
    pub text: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
    pub difficulty: Option<Difficulty>,
}

impl FetchedQuestion {
    /// Admit the question into a round under the given tier
    pub fn with_difficulty(self, difficulty: Difficulty) -> Question {
        Question {
            category: self.category,
            text: self.text,
            correct_answer: self.correct_answer,
            incorrect_answers: self.incorrect_answers,
            difficulty,
        }
    }
}

/// A question that is part of the current round
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub category: Category,
    pub text: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
    pub difficulty: Difficulty,
}

impl Question {
    /// All answer texts, correct answer first (callers shuffle before presenting)
    pub fn choices(&self) -> Vec<String> {
        std::iter::once(self.correct_answer.clone())
            .chain(self.incorrect_answers.iter().cloned())
            .collect()
    }

    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub name: String,
    pub score: u32,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
        }
    }
}

/// Timing knobs for the game flow
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Pause after an answer before the next question is presented
    pub feedback_delay: Duration,
    /// How long a transient notice stays on screen
    pub notice_ttl: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            feedback_delay: Duration::from_secs(2),
            notice_ttl: Duration::from_secs(2),
        }
    }
}

impl GameConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            feedback_delay: std::env::var("FEEDBACK_DELAY_MS")
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.feedback_delay),
            notice_ttl: std::env::var("NOTICE_TTL_MS")
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.notice_ttl),
        }
    }
}

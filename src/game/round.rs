use rand::seq::SliceRandom;

use super::{Effect, Game, GameError, NoticeKind, Phase};
use crate::scoring;
use crate::selection::{group_by_difficulty, tier_counts};
use crate::trivia::TriviaResult;
use crate::types::{Category, FetchedQuestion};

impl Game {
    /// Handle the result of category discovery
    pub fn on_categories(&mut self, result: TriviaResult<Vec<Category>>) -> Vec<Effect> {
        if self.phase != Phase::CategorySelect {
            tracing::debug!("Ignoring categories, game is in {:?}", self.phase);
            return Vec::new();
        }

        match result {
            Ok(categories) => {
                tracing::info!("Game {} offers categories {:?}", self.id, categories);
                self.categories = Some(categories);
                self.enter_category_select()
            }
            Err(e) => {
                tracing::warn!("Failed to fetch categories: {}", e);
                vec![self.notice(
                    NoticeKind::Error,
                    "Failed to fetch categories. Please try again.".to_string(),
                )]
            }
        }
    }

    pub(super) fn retry_categories(&mut self) -> Result<Vec<Effect>, GameError> {
        self.expect_phase("retry category discovery", Phase::CategorySelect)?;
        if self.categories.is_some() {
            return Err(GameError::InvalidAction {
                action: "retry category discovery",
                phase: self.phase,
            });
        }
        Ok(vec![Effect::FetchCategories])
    }

    pub(super) fn choose_category(&mut self, category: Category) -> Result<Vec<Effect>, GameError> {
        self.expect_phase("choose a category", Phase::CategorySelect)?;

        if !self.available_categories().contains(&category) {
            return Err(GameError::CategoryUnavailable(category));
        }

        self.pending_category = Some(category.clone());
        Ok(vec![Effect::FetchQuestions(category)])
    }

    /// Handle the questions fetched for a chosen category.
    ///
    /// On failure the category stays selectable; nothing else changes.
    pub fn on_questions(
        &mut self,
        category: &str,
        result: TriviaResult<Vec<FetchedQuestion>>,
    ) -> Vec<Effect> {
        if self.phase != Phase::CategorySelect || self.pending_category.as_deref() != Some(category)
        {
            tracing::debug!("Ignoring stale questions for {}", category);
            return Vec::new();
        }
        self.pending_category = None;

        let fetched = match result {
            Ok(fetched) => fetched,
            Err(e) => {
                tracing::warn!("Failed to fetch questions for {}: {}", category, e);
                return vec![self.notice(
                    NoticeKind::Error,
                    "Failed to fetch questions. Please try again.".to_string(),
                )];
            }
        };

        self.questions = group_by_difficulty(fetched);
        self.used_categories.push(category.to_string());
        self.current_category = Some(category.to_string());
        self.question_index = 0;

        let [easy, medium, hard] = tier_counts(&self.questions);
        tracing::info!(
            "Round for {} has {} questions ({} easy, {} medium, {} hard)",
            category,
            self.questions.len(),
            easy,
            medium,
            hard
        );

        if self.questions.is_empty() {
            self.phase = Phase::RoundComplete;
            return vec![
                self.notice(
                    NoticeKind::Info,
                    format!("No questions available for {}.", category),
                ),
                Effect::Show(Phase::RoundComplete),
            ];
        }

        self.present_question()
    }

    fn present_question(&mut self) -> Vec<Effect> {
        let Some(question) = self.questions.get(self.question_index) else {
            return self.complete_round();
        };

        let mut choices = question.choices();
        choices.shuffle(&mut self.rng);

        self.choices = choices;
        self.answered = false;
        self.phase = Phase::QuestionActive;
        vec![Effect::Show(Phase::QuestionActive)]
    }

    pub(super) fn submit_answer(&mut self, answer: &str) -> Result<Vec<Effect>, GameError> {
        self.expect_phase("submit an answer", Phase::QuestionActive)?;

        if self.answered {
            return Err(GameError::AnswerLocked);
        }
        if !self.choices.iter().any(|c| c == answer) {
            return Err(GameError::UnknownChoice(answer.to_string()));
        }

        let Some(question) = self.questions.get(self.question_index) else {
            return Err(GameError::InvalidAction {
                action: "submit an answer",
                phase: self.phase,
            });
        };
        let correct = question.is_correct(answer);
        let points = scoring::award(question.difficulty, correct);
        let correct_answer = question.correct_answer.clone();

        self.answered = true;

        let text = match self.award_current(points) {
            Some(player) if correct => {
                format!("Correct! {} earned {} points.", player.name, points)
            }
            _ => format!("Incorrect. The correct answer was: {}", correct_answer),
        };
        let kind = if correct {
            NoticeKind::Correct
        } else {
            NoticeKind::Incorrect
        };

        Ok(vec![
            Effect::Show(Phase::QuestionActive),
            self.notice(kind, text),
            Effect::ScheduleAdvance {
                game_id: self.id.clone(),
                question_index: self.question_index,
                after: self.config.feedback_delay,
            },
        ])
    }

    /// Move past an answered question once the feedback pause is over.
    ///
    /// Anything but the answered current question of this game is a stale timer
    /// and ignored.
    pub fn advance(&mut self, game_id: &str, question_index: usize) -> Vec<Effect> {
        if game_id != self.id
            || self.phase != Phase::QuestionActive
            || !self.answered
            || question_index != self.question_index
        {
            tracing::debug!(
                "Ignoring stale advance for game {} question {}",
                game_id,
                question_index
            );
            return Vec::new();
        }

        self.question_index += 1;
        self.pass_turn();

        if self.question_index < self.questions.len() {
            self.present_question()
        } else {
            self.complete_round()
        }
    }

    fn complete_round(&mut self) -> Vec<Effect> {
        self.phase = Phase::RoundComplete;
        self.choices.clear();
        self.answered = false;

        tracing::info!(
            "Round for {} complete",
            self.current_category.as_deref().unwrap_or("?")
        );
        vec![Effect::Show(Phase::RoundComplete)]
    }

    pub(super) fn request_new_category(&mut self) -> Result<Vec<Effect>, GameError> {
        self.expect_phase("request a new category", Phase::RoundComplete)?;
        Ok(self.enter_category_select())
    }

    /// Show the category list, or finish the game once every category is used
    fn enter_category_select(&mut self) -> Vec<Effect> {
        self.phase = Phase::CategorySelect;

        if self.categories.is_some() && self.available_categories().is_empty() {
            tracing::info!("Game {} has used every category", self.id);
            self.phase = Phase::GameOver;
            return vec![Effect::Show(Phase::GameOver)];
        }

        vec![Effect::Show(Phase::CategorySelect)]
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{answer, full_round, in_round, question, started};
    use super::super::*;
    use crate::trivia::TriviaError;
    use std::time::Duration;

    fn correct_answer(game: &Game) -> String {
        game.current_question().unwrap().correct_answer.clone()
    }

    #[test]
    fn test_choose_category_fetches_then_starts_round() {
        let mut game = started(&["history", "music"]);

        let effects = game
            .apply(Action::ChooseCategory("history".to_string()))
            .unwrap();
        assert_eq!(effects, vec![Effect::FetchQuestions("history".to_string())]);
        assert_eq!(game.pending_category(), Some("history"));
        // Not used until the questions arrive
        assert!(game.used_categories().is_empty());

        let effects = game.on_questions("history", Ok(full_round()));
        assert_eq!(effects, vec![Effect::Show(Phase::QuestionActive)]);
        assert_eq!(game.phase(), Phase::QuestionActive);
        assert_eq!(game.current_category(), Some("history"));
        assert_eq!(game.used_categories(), &["history".to_string()]);
        assert_eq!(game.question_index(), 0);
        assert_eq!(game.questions().len(), 6);
        assert_eq!(game.pending_category(), None);
    }

    #[test]
    fn test_choices_are_a_shuffle_of_all_answers() {
        let game = in_round(&["history"], "history", full_round());
        let question = game.current_question().unwrap();

        let mut shown = game.choices().to_vec();
        let mut expected = question.choices();
        shown.sort();
        expected.sort();
        assert_eq!(shown, expected);
        assert!(!game.is_answer_locked());
    }

    #[test]
    fn test_unknown_or_used_category_is_rejected() {
        let mut game = in_round(&["history", "music"], "history", full_round());
        for _ in 0..6 {
            answer(&mut game, false);
        }
        game.apply(Action::RequestNewCategory).unwrap();

        assert_eq!(
            game.apply(Action::ChooseCategory("history".to_string())),
            Err(GameError::CategoryUnavailable("history".to_string()))
        );
        assert_eq!(
            game.apply(Action::ChooseCategory("sport".to_string())),
            Err(GameError::CategoryUnavailable("sport".to_string()))
        );
        assert_eq!(game.available_categories(), vec!["music"]);
    }

    #[test]
    fn test_category_rejected_before_discovery() {
        let mut game = Game::seeded(GameConfig::default(), 1);
        game.apply(Action::Start {
            first: "Alice".to_string(),
            second: "Bob".to_string(),
        })
        .unwrap();

        assert!(matches!(
            game.apply(Action::ChooseCategory("history".to_string())),
            Err(GameError::CategoryUnavailable(_))
        ));
    }

    #[test]
    fn test_failed_question_fetch_leaves_category_selectable() {
        let mut game = started(&["history"]);
        game.apply(Action::ChooseCategory("history".to_string()))
            .unwrap();

        let effects = game.on_questions("history", Err(TriviaError::Status(503)));
        match effects.as_slice() {
            [Effect::Notify(notice)] => {
                assert_eq!(notice.kind, NoticeKind::Error);
                assert_eq!(notice.text, "Failed to fetch questions. Please try again.");
                assert_eq!(notice.dismiss_after_ms, 1500);
            }
            other => panic!("Expected a single notice, got {:?}", other),
        }

        assert_eq!(game.phase(), Phase::CategorySelect);
        assert!(game.used_categories().is_empty());
        assert_eq!(game.available_categories(), vec!["history"]);

        // Re-selecting is the retry
        assert!(game
            .apply(Action::ChooseCategory("history".to_string()))
            .is_ok());
    }

    #[test]
    fn test_questions_for_other_category_are_ignored() {
        let mut game = started(&["history", "music"]);
        game.apply(Action::ChooseCategory("history".to_string()))
            .unwrap();

        assert!(game.on_questions("music", Ok(full_round())).is_empty());
        assert_eq!(game.phase(), Phase::CategorySelect);
        assert_eq!(game.pending_category(), Some("history"));
    }

    #[test]
    fn test_category_without_usable_questions_completes_round() {
        let mut game = started(&["history", "music"]);
        game.apply(Action::ChooseCategory("history".to_string()))
            .unwrap();

        let untagged = FetchedQuestion {
            difficulty: None,
            ..question("x", Difficulty::Easy)
        };
        let effects = game.on_questions("history", Ok(vec![untagged]));

        assert_eq!(game.phase(), Phase::RoundComplete);
        assert_eq!(effects.last(), Some(&Effect::Show(Phase::RoundComplete)));
        assert_eq!(game.used_categories(), &["history".to_string()]);
    }

    #[test]
    fn test_correct_hard_answer_scores_twenty() {
        let round = vec![question("h1", Difficulty::Hard)];
        let mut game = in_round(&["history"], "history", round);

        let effects = game
            .apply(Action::SubmitAnswer(correct_answer(&game)))
            .unwrap();

        assert_eq!(game.players()[0].score, 20);
        assert_eq!(game.players()[1].score, 0);
        assert!(game.is_answer_locked());
        assert_eq!(
            effects,
            vec![
                Effect::Show(Phase::QuestionActive),
                Effect::Notify(Notice {
                    text: "Correct! Alice earned 20 points.".to_string(),
                    kind: NoticeKind::Correct,
                    dismiss_after_ms: 1500,
                }),
                Effect::ScheduleAdvance {
                    game_id: game.id().to_string(),
                    question_index: 0,
                    after: Duration::from_millis(2000),
                },
            ]
        );
    }

    #[test]
    fn test_incorrect_medium_answer_scores_nothing() {
        let round = vec![question("m1", Difficulty::Medium)];
        let mut game = in_round(&["history"], "history", round);

        let effects = game
            .apply(Action::SubmitAnswer("m1 worse".to_string()))
            .unwrap();

        assert!(game.players().iter().all(|p| p.score == 0));
        assert!(effects.contains(&Effect::Notify(Notice {
            text: "Incorrect. The correct answer was: m1 right".to_string(),
            kind: NoticeKind::Incorrect,
            dismiss_after_ms: 1500,
        })));
    }

    #[test]
    fn test_second_submission_is_locked_out() {
        let mut game = in_round(&["history"], "history", full_round());
        let right = correct_answer(&game);

        game.apply(Action::SubmitAnswer(right.clone())).unwrap();
        assert_eq!(
            game.apply(Action::SubmitAnswer(right)),
            Err(GameError::AnswerLocked)
        );
        assert_eq!(game.players()[0].score, 10);
    }

    #[test]
    fn test_answer_must_be_an_offered_choice() {
        let mut game = in_round(&["history"], "history", full_round());

        assert_eq!(
            game.apply(Action::SubmitAnswer("made up".to_string())),
            Err(GameError::UnknownChoice("made up".to_string()))
        );
        assert!(!game.is_answer_locked());
    }

    #[test]
    fn test_advance_moves_one_question_and_alternates_turns() {
        let mut game = in_round(&["history"], "history", full_round());

        for expected in 1..=5 {
            let before = game.current_player_index();
            answer(&mut game, true);
            assert_eq!(game.question_index(), expected);
            assert_eq!(game.current_player_index(), 1 - before);
            assert_eq!(game.phase(), Phase::QuestionActive);
            assert!(!game.is_answer_locked());
        }

        let effects = answer(&mut game, true);
        assert_eq!(effects, vec![Effect::Show(Phase::RoundComplete)]);
        assert_eq!(game.question_index(), game.questions().len());
        assert_eq!(game.phase(), Phase::RoundComplete);

        // Alice: e1 (10) + m1 (15) + h1 (20); Bob: e2 (10) + m2 (15) + h2 (20)
        assert_eq!(game.players()[0].score, 45);
        assert_eq!(game.players()[1].score, 45);
    }

    #[test]
    fn test_turn_alternation_carries_into_next_round() {
        let round = vec![
            question("e1", Difficulty::Easy),
            question("m1", Difficulty::Medium),
            question("h1", Difficulty::Hard),
        ];
        let mut game = in_round(&["history", "music"], "history", round);
        for _ in 0..3 {
            answer(&mut game, false);
        }
        assert_eq!(game.current_player_index(), 1);

        game.apply(Action::RequestNewCategory).unwrap();
        game.apply(Action::ChooseCategory("music".to_string()))
            .unwrap();
        game.on_questions("music", Ok(full_round()));
        assert_eq!(game.current_player().unwrap().name, "Bob");
    }

    #[test]
    fn test_stale_advance_is_ignored() {
        let mut game = in_round(&["history"], "history", full_round());
        let id = game.id().to_string();

        // Not answered yet
        assert!(game.advance(&id, 0).is_empty());

        game.apply(Action::SubmitAnswer(correct_answer(&game)))
            .unwrap();
        // Wrong question
        assert!(game.advance(&id, 3).is_empty());
        // Wrong game
        assert!(game.advance("another game", 0).is_empty());

        assert!(!game.advance(&id, 0).is_empty());
        // Same timer firing twice
        assert!(game.advance(&id, 0).is_empty());
        assert_eq!(game.question_index(), 1);
    }

    #[test]
    fn test_advance_after_end_game_is_ignored() {
        let mut game = in_round(&["history"], "history", full_round());
        game.apply(Action::SubmitAnswer(correct_answer(&game)))
            .unwrap();
        game.apply(Action::EndGame).unwrap();

        let id = game.id().to_string();
        assert!(game.advance(&id, 0).is_empty());
        assert_eq!(game.phase(), Phase::GameOver);
    }

    #[test]
    fn test_advance_from_previous_game_is_ignored_after_reset() {
        let mut game = in_round(&["history"], "history", full_round());
        let old_id = game.id().to_string();
        game.apply(Action::SubmitAnswer(correct_answer(&game)))
            .unwrap();
        game.apply(Action::EndGame).unwrap();
        game.apply(Action::ResetGame).unwrap();

        // The new game reaches an answered first question before the old timer fires
        game.apply(Action::Start {
            first: "Carol".to_string(),
            second: "Dave".to_string(),
        })
        .unwrap();
        game.on_categories(Ok(vec!["history".to_string()]));
        game.apply(Action::ChooseCategory("history".to_string()))
            .unwrap();
        game.on_questions("history", Ok(full_round()));
        game.apply(Action::SubmitAnswer(correct_answer(&game)))
            .unwrap();

        assert!(game.advance(&old_id, 0).is_empty());
        assert_eq!(game.question_index(), 0);
        assert!(game.is_answer_locked());

        let new_id = game.id().to_string();
        assert!(!game.advance(&new_id, 0).is_empty());
        assert_eq!(game.question_index(), 1);
    }

    #[test]
    fn test_new_category_is_a_manual_transition() {
        let round = vec![question("e1", Difficulty::Easy)];
        let mut game = in_round(&["history", "music"], "history", round);
        answer(&mut game, true);

        assert_eq!(game.phase(), Phase::RoundComplete);
        assert_eq!(
            game.apply(Action::RequestNewCategory),
            Ok(vec![Effect::Show(Phase::CategorySelect)])
        );
        assert_eq!(game.phase(), Phase::CategorySelect);
    }

    #[test]
    fn test_empty_discovery_ends_game() {
        let mut game = Game::seeded(GameConfig::default(), 1);
        game.apply(Action::Start {
            first: "Alice".to_string(),
            second: "Bob".to_string(),
        })
        .unwrap();

        assert_eq!(
            game.on_categories(Ok(Vec::new())),
            vec![Effect::Show(Phase::GameOver)]
        );
        assert_eq!(game.phase(), Phase::GameOver);
    }

    #[test]
    fn test_retry_only_while_categories_missing() {
        let mut game = started(&["history"]);
        assert!(matches!(
            game.apply(Action::RetryCategories),
            Err(GameError::InvalidAction { .. })
        ));
    }
}

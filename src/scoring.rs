//! Point awards for answered questions

use crate::types::Difficulty;

/// Points earned for a correct answer at the given tier
pub fn points_for(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Easy => 10,
        Difficulty::Medium => 15,
        Difficulty::Hard => 20,
    }
}

/// Points awarded for an answer; wrong answers never score
pub fn award(difficulty: Difficulty, correct: bool) -> u32 {
    if correct {
        points_for(difficulty)
    } else {
        0
    }
}

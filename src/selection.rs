//! Assembling a round from the questions fetched for a category

use crate::types::{Difficulty, FetchedQuestion, Question};

/// Upper bound on questions taken from each difficulty tier
pub const QUESTIONS_PER_TIER: usize = 2;

/// Bucket fetched questions by tier and keep the first few of each.
///
/// Questions without a difficulty are dropped. Within a tier the service order is
/// preserved; tiers are concatenated easy, medium, hard. A short tier simply
/// yields a shorter round.
pub fn group_by_difficulty(fetched: Vec<FetchedQuestion>) -> Vec<Question> {
    let mut tiers: [Vec<Question>; 3] = Default::default();

    for question in fetched {
        let Some(difficulty) = question.difficulty else {
            tracing::debug!("Dropping question without difficulty: {}", question.text);
            continue;
        };

        let tier = &mut tiers[difficulty.rank()];
        if tier.len() < QUESTIONS_PER_TIER {
            tier.push(question.with_difficulty(difficulty));
        }
    }

    tiers.into_iter().flatten().collect()
}

/// Number of selected questions per tier, in easy/medium/hard order
pub fn tier_counts(questions: &[Question]) -> [usize; 3] {
    let mut counts = [0; 3];
    for question in questions {
        counts[question.difficulty.rank()] += 1;
    }
    counts
}

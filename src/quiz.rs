use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{Question, QuizOutcome};

/// Draw one question uniformly from `candidates`, skipping ids already asked.
pub fn next_question<R: Rng + ?Sized>(
    candidates: Vec<Question>,
    previous: &[i64],
    rng: &mut R,
) -> QuizOutcome {
    let asked: HashSet<i64> = previous.iter().copied().collect();
    let remaining: Vec<Question> = candidates
        .into_iter()
        .filter(|q| !asked.contains(&q.id))
        .collect();

    match remaining.choose(rng) {
        Some(question) => QuizOutcome::Next {
            question: question.clone(),
        },
        None => QuizOutcome::Exhausted {},
    }
}

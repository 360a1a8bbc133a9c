//! Contains the running score of a training session.

use serde::Serialize;
use std::fmt::{Display, Formatter};
use ts_rs::TS;

use crate::exercise::Verdict;

/// The number of correct and incorrect answers given during a session. The counters only move
/// forward and only validated exercises move them.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct SessionScore {
    correct: u32,
    incorrect: u32,
}

impl SessionScore {
    /// Records the verdict of a validated exercise.
    pub(crate) fn record(&mut self, verdict: &Verdict) {
        if verdict.correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
    }

    /// Returns the number of exercises answered correctly.
    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    /// Returns the number of exercises answered incorrectly.
    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    /// Returns the number of validated exercises.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.correct + self.incorrect
    }
}

impl Display for SessionScore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Correct: {} | Incorrect: {}", self.correct, self.incorrect)
    }
}

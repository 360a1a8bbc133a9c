//! Contains the ear-training exercises and the state machine each exercise goes through.
//!
//! An exercise is generated from the notes of the active scale, presented by playing its stimulus,
//! and then waits for the student to answer by picking notes on the fretboard. Exercises are never
//! retried: once the answer is validated the exercise is finished and a new one must be requested.
//!
//! There are three kinds of exercises:
//!
//! 1. Find note: a random note of the scale is played and the student must find it.
//! 2. Find degree: same as above, but the student is also told the degree of the note (its 1-based
//!    position in the scale).
//! 3. Echo motif: a motif of three or four random notes of the scale is played and the student must
//!    repeat it in order.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    ops::RangeInclusive,
};
use strum::{EnumIter, EnumString};
use ts_rs::TS;

use crate::{
    data::music::{PitchSet, notes::PitchClass, scales::Scale},
    error::InvalidStateError,
};

/// The possible lengths of a generated motif.
pub const MOTIF_LENGTHS: RangeInclusive<usize> = 3..=4;

/// The kinds of exercises that can be generated.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    EnumIter,
    EnumString,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    strum::Display,
    TS,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
#[ts(export)]
#[allow(missing_docs)]
pub enum ExerciseKind {
    #[default]
    FindNote,
    FindDegree,
    EchoMotif,
}

/// The states an exercise goes through. The only transitions are `Created` to `Presented` (the
/// stimulus is played), `Presented` to `AwaitingInput`, and `AwaitingInput` to `Validated` once the
/// answer is complete.
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display)]
#[allow(missing_docs)]
pub enum ExerciseState {
    Created,
    Presented,
    AwaitingInput,
    Validated,
}

/// An exercise along with the data generated for it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Exercise {
    /// Find the note that was played.
    FindNote {
        /// The note to find.
        target: PitchClass,
    },

    /// Find the note that was played, given its degree.
    FindDegree {
        /// The note to find.
        target: PitchClass,

        /// The 1-based position of the note in the scale.
        degree: usize,
    },

    /// Repeat the motif that was played.
    EchoMotif {
        /// The notes of the motif, in the order they were played.
        motif: Vec<PitchClass>,

        /// The notes entered so far, in the order they were entered.
        answer: Vec<PitchClass>,
    },
}

impl Exercise {
    /// Generates an exercise of the given kind from the notes of the scale. Every random choice is
    /// uniform and independent, so a motif can repeat notes.
    pub fn generate<R: Rng>(
        kind: ExerciseKind,
        scale: &Scale,
        rng: &mut R,
    ) -> Result<Exercise, InvalidStateError> {
        let notes = scale.pitch_classes();
        if notes.is_empty() {
            return Err(InvalidStateError::NoTarget);
        }

        let exercise = match kind {
            ExerciseKind::FindNote => Exercise::FindNote {
                target: notes[rng.random_range(0..notes.len())],
            },
            ExerciseKind::FindDegree => {
                let index = rng.random_range(0..notes.len());
                Exercise::FindDegree {
                    target: notes[index],
                    degree: index + 1,
                }
            }
            ExerciseKind::EchoMotif => {
                let length = rng.random_range(MOTIF_LENGTHS);
                Exercise::EchoMotif {
                    motif: (0..length)
                        .map(|_| notes[rng.random_range(0..notes.len())])
                        .collect(),
                    answer: Vec::with_capacity(length),
                }
            }
        };
        Ok(exercise)
    }

    /// Returns the kind of the exercise.
    #[must_use]
    pub fn kind(&self) -> ExerciseKind {
        match self {
            Exercise::FindNote { .. } => ExerciseKind::FindNote,
            Exercise::FindDegree { .. } => ExerciseKind::FindDegree,
            Exercise::EchoMotif { .. } => ExerciseKind::EchoMotif,
        }
    }

    /// Returns the notes that make up the correct answer, which are also the notes played as the
    /// stimulus.
    #[must_use]
    pub fn expected(&self) -> Vec<PitchClass> {
        match self {
            Exercise::FindNote { target } | Exercise::FindDegree { target, .. } => vec![*target],
            Exercise::EchoMotif { motif, .. } => motif.clone(),
        }
    }

    /// Returns the number of notes the student must enter.
    #[must_use]
    pub fn answer_len(&self) -> usize {
        match self {
            Exercise::FindNote { .. } | Exercise::FindDegree { .. } => 1,
            Exercise::EchoMotif { motif, .. } => motif.len(),
        }
    }

    /// Returns the instructions shown to the student once the stimulus has been played.
    #[must_use]
    pub fn prompt(&self) -> Prompt {
        let (degree, text) = match self {
            Exercise::FindNote { .. } => (
                None,
                "Listen and find the note on the fretboard".to_string(),
            ),
            Exercise::FindDegree { degree, .. } => (
                Some(*degree),
                format!("Listen and find degree {degree}"),
            ),
            Exercise::EchoMotif { motif, .. } => (
                None,
                format!("Repeat the {} notes you just heard", motif.len()),
            ),
        };
        Prompt {
            kind: self.kind(),
            degree,
            num_notes: self.answer_len(),
            text,
        }
    }
}

/// Compares an answer against the exercise. The comparison is on pitch classes and is order
/// sensitive: every position of the answer must match the expected note at the same position, and
/// the lengths must be equal. Degree labels play no part.
#[must_use]
pub fn validate(exercise: &Exercise, answer: &[PitchClass]) -> Verdict {
    let expected = exercise.expected();
    Verdict {
        correct: answer == expected.as_slice(),
        expected,
        answer: answer.to_vec(),
    }
}

/// The instructions for the student after an exercise has been presented.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct Prompt {
    /// The kind of the exercise.
    pub kind: ExerciseKind,

    /// The degree to find, for find-degree exercises.
    pub degree: Option<usize>,

    /// The number of notes the student must enter.
    pub num_notes: usize,

    /// The text to show.
    pub text: String,
}

/// The result of validating an answer.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct Verdict {
    /// Whether the answer was correct.
    pub correct: bool,

    /// The correct answer.
    pub expected: Vec<PitchClass>,

    /// The answer that was given.
    pub answer: Vec<PitchClass>,
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.correct {
            return write!(f, "✓ Correct!");
        }
        let names: Vec<&str> = self.expected.iter().map(|pc| pc.name()).collect();
        write!(f, "✗ Incorrect. The answer was {}", names.join(" → "))
    }
}

/// The result of submitting a single note to an exercise.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, TS)]
#[ts(export)]
pub enum SubmitOutcome {
    /// More notes are needed before the answer can be validated.
    Pending {
        /// The number of notes entered so far.
        collected: usize,

        /// The number of notes needed.
        expected: usize,
    },

    /// The answer was complete and has been validated.
    Validated(Verdict),
}

impl Display for SubmitOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitOutcome::Pending {
                collected,
                expected,
            } => write!(f, "Selected {collected}/{expected} notes"),
            SubmitOutcome::Validated(verdict) => verdict.fmt(f),
        }
    }
}

/// An exercise together with its current state.
#[derive(Clone, Debug)]
pub struct ActiveExercise {
    exercise: Exercise,
    state: ExerciseState,
}

impl ActiveExercise {
    /// Wraps a freshly generated exercise.
    #[must_use]
    pub fn new(exercise: Exercise) -> Self {
        ActiveExercise {
            exercise,
            state: ExerciseState::Created,
        }
    }

    #[must_use]
    pub fn exercise(&self) -> &Exercise {
        &self.exercise
    }

    #[must_use]
    pub fn state(&self) -> ExerciseState {
        self.state
    }

    /// Records that the stimulus has been played.
    pub fn mark_presented(&mut self) -> Result<(), InvalidStateError> {
        self.transition(ExerciseState::Created, ExerciseState::Presented)
    }

    /// Starts accepting answers.
    pub fn await_input(&mut self) -> Result<(), InvalidStateError> {
        self.transition(ExerciseState::Presented, ExerciseState::AwaitingInput)
    }

    fn transition(
        &mut self,
        from: ExerciseState,
        to: ExerciseState,
    ) -> Result<(), InvalidStateError> {
        if self.state != from {
            return Err(InvalidStateError::UnexpectedState {
                expected: from,
                actual: self.state,
            });
        }
        self.state = to;
        Ok(())
    }

    /// Submits one note of the answer. Single-note exercises are validated immediately. Motif
    /// answers are collected in order and validated once they have as many notes as the motif.
    pub fn submit(&mut self, pitch_class: PitchClass) -> Result<SubmitOutcome, InvalidStateError> {
        if self.state != ExerciseState::AwaitingInput {
            return Err(InvalidStateError::NotAwaitingInput(self.state));
        }

        if let Exercise::EchoMotif { motif, answer } = &mut self.exercise {
            answer.push(pitch_class);
            if answer.len() < motif.len() {
                return Ok(SubmitOutcome::Pending {
                    collected: answer.len(),
                    expected: motif.len(),
                });
            }
        }

        let verdict = match &self.exercise {
            Exercise::EchoMotif { answer, .. } => validate(&self.exercise, answer),
            Exercise::FindNote { .. } | Exercise::FindDegree { .. } => {
                validate(&self.exercise, &[pitch_class])
            }
        };
        self.state = ExerciseState::Validated;
        Ok(SubmitOutcome::Validated(verdict))
    }
}

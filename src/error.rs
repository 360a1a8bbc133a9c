//! Contains the errors returned by fretwise.

use thiserror::Error;

use crate::exercise::ExerciseState;

/// Generic errors for operations that can fail in more than one way.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    InvalidState(#[from] InvalidStateError),
}

/// An error returned when a name or symbol does not match any known table entry.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum LookupError {
    #[error("unknown chord type {0}")]
    ChordType(String),

    #[error("unknown note name {0}")]
    NoteName(String),

    #[error("unknown option {0}")]
    OptionName(String),

    #[error("unknown value {value} for option {option}")]
    OptionValue { option: &'static str, value: String },
}

/// An error returned when a value falls outside the range the instrument or the pitch model allows.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum RangeError {
    #[error("string index {index} is out of bounds for a tuning with {num_strings} strings")]
    StringIndex { index: usize, num_strings: usize },

    #[error("fret {0} is negative")]
    NegativeFret(i32),

    #[error("fret {fret} is above the maximum fret {max_fret}")]
    FretAboveMax { fret: i32, max_fret: u8 },

    #[error("pitch class {0} is outside the range 0 to 11")]
    PitchClass(i64),

    #[error("the frequency at string {string_index} fret {fret} cannot be represented")]
    Frequency { string_index: usize, fret: i32 },

    #[error("a tuning must contain at least one string")]
    EmptyTuning,

    #[error("the tuning has {num_strings} strings but {num_offsets} octave offsets")]
    OctaveOffsets {
        num_strings: usize,
        num_offsets: usize,
    },
}

/// An error returned when an exercise operation is not valid in the current state.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum InvalidStateError {
    #[error("there is no active exercise")]
    NoActiveExercise,

    #[error("the exercise has no target because the scale is empty")]
    NoTarget,

    #[error("the exercise is {actual} but the operation requires it to be {expected}")]
    UnexpectedState {
        expected: ExerciseState,
        actual: ExerciseState,
    },

    #[error("the exercise is not awaiting input (current state: {0})")]
    NotAwaitingInput(ExerciseState),
}

/// An error returned when dealing with saved trainer preferences.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum PreferencesManagerError {
    #[error("cannot get trainer preferences: {0}")]
    GetPreferences(#[source] anyhow::Error),

    #[error("cannot set trainer preferences: {0}")]
    SetPreferences(#[source] anyhow::Error),
}

//! Defines the twelve pitch classes and the note names used to refer to them.

use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};
use ts_rs::TS;

use crate::error::{LookupError, RangeError};

/// The number of pitch classes in twelve-tone equal temperament.
pub const NUM_PITCH_CLASSES: u8 = 12;

/// The canonical name of each pitch class, starting at C.
const NAMES: [&str; NUM_PITCH_CLASSES as usize] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// The frequency in Hz of each pitch class in the fourth octave, tuned to A4 = 440 Hz.
const OCTAVE_FOUR_FREQUENCIES: [f64; NUM_PITCH_CLASSES as usize] = [
    261.63, 277.18, 293.66, 311.13, 329.63, 349.23, 369.99, 392.00, 415.30, 440.00, 466.16, 493.88,
];

/// Defines the names of the natural notes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum NaturalNote {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl NaturalNote {
    /// Returns the number of semitones between C and this note.
    fn semitones_from_c(self) -> i64 {
        match self {
            NaturalNote::C => 0,
            NaturalNote::D => 2,
            NaturalNote::E => 4,
            NaturalNote::F => 5,
            NaturalNote::G => 7,
            NaturalNote::A => 9,
            NaturalNote::B => 11,
        }
    }

    /// Parses the letter of a natural note. Lowercase letters are accepted.
    fn from_letter(letter: char) -> Option<NaturalNote> {
        match letter.to_ascii_uppercase() {
            'A' => Some(NaturalNote::A),
            'B' => Some(NaturalNote::B),
            'C' => Some(NaturalNote::C),
            'D' => Some(NaturalNote::D),
            'E' => Some(NaturalNote::E),
            'F' => Some(NaturalNote::F),
            'G' => Some(NaturalNote::G),
            _ => None,
        }
    }
}

/// Defines the pitch accidentals that can follow the letter of a note name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Accidental {
    Flat,
    Sharp,
}

impl Accidental {
    /// Returns the number of semitones the accidental moves the note by.
    fn offset(self) -> i64 {
        match self {
            Accidental::Flat => -1,
            Accidental::Sharp => 1,
        }
    }

    /// Parses an accidental in either its ASCII or its Unicode form.
    fn from_symbol(symbol: char) -> Option<Accidental> {
        match symbol {
            '#' | '♯' => Some(Accidental::Sharp),
            'b' | '♭' => Some(Accidental::Flat),
            _ => None,
        }
    }
}

/// One of the twelve equivalence classes of notes under octave identity, stored as the number of
/// semitones above C. The value is always in the range 0 to 11.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, TS,
)]
#[serde(try_from = "u8", into = "u8")]
#[ts(export)]
pub struct PitchClass(u8);

#[allow(missing_docs)]
impl PitchClass {
    pub const C: PitchClass = PitchClass(0);
    pub const C_SHARP: PitchClass = PitchClass(1);
    pub const D: PitchClass = PitchClass(2);
    pub const D_SHARP: PitchClass = PitchClass(3);
    pub const E: PitchClass = PitchClass(4);
    pub const F: PitchClass = PitchClass(5);
    pub const F_SHARP: PitchClass = PitchClass(6);
    pub const G: PitchClass = PitchClass(7);
    pub const G_SHARP: PitchClass = PitchClass(8);
    pub const A: PitchClass = PitchClass(9);
    pub const A_SHARP: PitchClass = PitchClass(10);
    pub const B: PitchClass = PitchClass(11);

    /// All the pitch classes in ascending order starting at C.
    pub const ALL: [PitchClass; NUM_PITCH_CLASSES as usize] = [
        Self::C,
        Self::C_SHARP,
        Self::D,
        Self::D_SHARP,
        Self::E,
        Self::F,
        Self::F_SHARP,
        Self::G,
        Self::G_SHARP,
        Self::A,
        Self::A_SHARP,
        Self::B,
    ];

    /// Returns the pitch class with the given index, failing if it is outside the range 0 to 11.
    pub fn new(index: i64) -> Result<PitchClass, RangeError> {
        if (0..NUM_PITCH_CLASSES as i64).contains(&index) {
            Ok(PitchClass(index as u8))
        } else {
            Err(RangeError::PitchClass(index))
        }
    }

    /// Returns the pitch class reached by counting the given number of semitones up from C. Any
    /// integer is accepted, including negative ones.
    #[must_use]
    pub fn wrapping(semitones: i64) -> PitchClass {
        PitchClass(semitones.rem_euclid(NUM_PITCH_CLASSES as i64) as u8)
    }

    /// Returns the number of semitones between C and this pitch class.
    #[must_use]
    pub fn index(self) -> u8 {
        self.0
    }

    /// Returns the canonical name of the pitch class, using sharps for the black keys.
    #[must_use]
    pub fn name(self) -> &'static str {
        NAMES[self.0 as usize]
    }

    /// Returns the pitch class that lies the given number of semitones above this one.
    #[must_use]
    pub fn transpose(self, semitones: i64) -> PitchClass {
        Self::wrapping(self.0 as i64 + semitones)
    }

    /// Returns the frequency of this pitch class in the fourth octave.
    #[must_use]
    pub fn reference_frequency(self) -> f64 {
        OCTAVE_FOUR_FREQUENCIES[self.0 as usize]
    }
}

impl TryFrom<u8> for PitchClass {
    type Error = RangeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        PitchClass::new(value as i64)
    }
}

impl From<PitchClass> for u8 {
    fn from(pitch_class: PitchClass) -> Self {
        pitch_class.0
    }
}

impl Display for PitchClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PitchClass {
    type Err = LookupError;

    /// Parses a note name made of a letter followed by any number of sharps or flats. Enharmonic
    /// spellings resolve to the same pitch class, so "Db", "D♭", and "C#" all return C#.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || LookupError::NoteName(s.to_string());
        let mut chars = s.trim().chars();
        let natural = chars
            .next()
            .and_then(NaturalNote::from_letter)
            .ok_or_else(unknown)?;

        let mut semitones = natural.semitones_from_c();
        for symbol in chars {
            semitones += Accidental::from_symbol(symbol).ok_or_else(unknown)?.offset();
        }
        Ok(PitchClass::wrapping(semitones))
    }
}

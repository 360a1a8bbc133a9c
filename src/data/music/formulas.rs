//! Defines the semitone formulas and degree labels of the supported scales and chords.
//!
//! A formula is an ordered list of semitone offsets from a root. The first offset is always zero
//! and no offset appears twice. Each formula carries a parallel list of degree labels with one
//! label per offset. Chord formulas can contain offsets of an octave or more (e.g. the ninth at 14
//! semitones); the label keeps the compound name even though the pitch class wraps around.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use ts_rs::TS;

use crate::error::LookupError;

/// An ordered list of semitone offsets from a root along with the label of each degree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Formula {
    /// The semitone offsets from the root, in degree order.
    pub offsets: &'static [u8],

    /// The label of each degree, aligned with `offsets`.
    pub degrees: &'static [&'static str],
}

impl Formula {
    /// Returns the number of notes in the formula.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Returns whether the formula contains no notes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// The major (Ionian) scale.
pub const DIATONIC_MAJOR: Formula = Formula {
    offsets: &[0, 2, 4, 5, 7, 9, 11],
    degrees: &["1", "2", "3", "4", "5", "6", "7"],
};

/// The natural minor (Aeolian) scale.
pub const DIATONIC_MINOR: Formula = Formula {
    offsets: &[0, 2, 3, 5, 7, 8, 10],
    degrees: &["1", "2", "♭3", "4", "5", "♭6", "♭7"],
};

/// The major scale without its fourth and seventh degrees.
pub const PENTATONIC_MAJOR: Formula = Formula {
    offsets: &[0, 2, 4, 7, 9],
    degrees: &["1", "2", "3", "5", "6"],
};

/// The natural minor scale without its second and sixth degrees.
pub const PENTATONIC_MINOR: Formula = Formula {
    offsets: &[0, 3, 5, 7, 10],
    degrees: &["1", "♭3", "4", "5", "♭7"],
};

/// The chord qualities that can be drawn as arpeggios. Each type is identified by the symbol used
/// after the root in a chord name (e.g. "m7b5" in "Bm7b5").
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    Eq,
    Hash,
    IntoStaticStr,
    PartialEq,
    Serialize,
    TS,
)]
#[ts(export)]
#[allow(missing_docs)]
pub enum ChordType {
    #[strum(serialize = "maj")]
    #[serde(rename = "maj")]
    Major,

    #[strum(serialize = "min")]
    #[serde(rename = "min")]
    Minor,

    #[strum(serialize = "aug")]
    #[serde(rename = "aug")]
    Augmented,

    #[strum(serialize = "dim")]
    #[serde(rename = "dim")]
    Diminished,

    #[strum(serialize = "7")]
    #[serde(rename = "7")]
    DominantSeventh,

    #[strum(serialize = "maj7")]
    #[serde(rename = "maj7")]
    MajorSeventh,

    #[strum(serialize = "m7")]
    #[serde(rename = "m7")]
    MinorSeventh,

    #[strum(serialize = "m7b5")]
    #[serde(rename = "m7b5")]
    HalfDiminishedSeventh,

    #[strum(serialize = "dim7")]
    #[serde(rename = "dim7")]
    DiminishedSeventh,

    #[strum(serialize = "9")]
    #[serde(rename = "9")]
    DominantNinth,

    #[strum(serialize = "maj9")]
    #[serde(rename = "maj9")]
    MajorNinth,

    #[strum(serialize = "m9")]
    #[serde(rename = "m9")]
    MinorNinth,

    #[strum(serialize = "6")]
    #[serde(rename = "6")]
    MajorSixth,

    #[strum(serialize = "m6")]
    #[serde(rename = "m6")]
    MinorSixth,
}

impl ChordType {
    /// Looks up the chord type with the given symbol. Unknown symbols are an error rather than an
    /// empty chord.
    pub fn from_symbol(symbol: &str) -> Result<ChordType, LookupError> {
        ChordType::from_str(symbol).map_err(|_| LookupError::ChordType(symbol.to_string()))
    }

    /// Returns the symbol of this chord type.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        self.into()
    }

    /// Returns the formula of this chord type.
    #[must_use]
    pub fn formula(self) -> Formula {
        match self {
            ChordType::Major => Formula {
                offsets: &[0, 4, 7],
                degrees: &["1", "3", "5"],
            },
            ChordType::Minor => Formula {
                offsets: &[0, 3, 7],
                degrees: &["1", "♭3", "5"],
            },
            ChordType::Augmented => Formula {
                offsets: &[0, 4, 8],
                degrees: &["1", "3", "♯5"],
            },
            ChordType::Diminished => Formula {
                offsets: &[0, 3, 6],
                degrees: &["1", "♭3", "♭5"],
            },
            ChordType::DominantSeventh => Formula {
                offsets: &[0, 4, 7, 10],
                degrees: &["1", "3", "5", "♭7"],
            },
            ChordType::MajorSeventh => Formula {
                offsets: &[0, 4, 7, 11],
                degrees: &["1", "3", "5", "7"],
            },
            ChordType::MinorSeventh => Formula {
                offsets: &[0, 3, 7, 10],
                degrees: &["1", "♭3", "5", "♭7"],
            },
            ChordType::HalfDiminishedSeventh => Formula {
                offsets: &[0, 3, 6, 10],
                degrees: &["1", "♭3", "♭5", "♭7"],
            },
            ChordType::DiminishedSeventh => Formula {
                offsets: &[0, 3, 6, 9],
                degrees: &["1", "♭3", "♭5", "♭♭7"],
            },
            ChordType::DominantNinth => Formula {
                offsets: &[0, 4, 7, 10, 14],
                degrees: &["1", "3", "5", "♭7", "9"],
            },
            ChordType::MajorNinth => Formula {
                offsets: &[0, 4, 7, 11, 14],
                degrees: &["1", "3", "5", "7", "9"],
            },
            ChordType::MinorNinth => Formula {
                offsets: &[0, 3, 7, 10, 14],
                degrees: &["1", "♭3", "5", "♭7", "9"],
            },
            ChordType::MajorSixth => Formula {
                offsets: &[0, 4, 7, 9],
                degrees: &["1", "3", "5", "6"],
            },
            ChordType::MinorSixth => Formula {
                offsets: &[0, 3, 7, 9],
                degrees: &["1", "♭3", "5", "6"],
            },
        }
    }
}

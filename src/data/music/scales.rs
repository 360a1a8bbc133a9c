//! Defines the scales that can be highlighted on the fretboard and used to generate exercises.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use strum::{EnumIter, EnumString};
use ts_rs::TS;

use crate::data::music::{PitchSet, formulas::*, notes::PitchClass};

/// Defines the quality of a scale.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[ts(export)]
#[allow(missing_docs)]
pub enum Mode {
    #[default]
    Major,
    Minor,
}

/// Defines how many degrees of the mode the scale uses.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[ts(export)]
pub enum ScaleKind {
    /// The seven-note scale.
    #[default]
    Diatonic,

    /// The five-note scale.
    Pentatonic,
}

/// The root, mode, and kind that identify a scale.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct ScaleContext {
    /// The tonic of the scale.
    pub root: PitchClass,

    /// Whether the scale is major or minor.
    pub mode: Mode,

    /// Whether the scale is diatonic or pentatonic.
    pub kind: ScaleKind,
}

impl ScaleContext {
    /// Returns the formula that generates this scale.
    #[must_use]
    pub fn formula(&self) -> Formula {
        match (self.mode, self.kind) {
            (Mode::Major, ScaleKind::Diatonic) => DIATONIC_MAJOR,
            (Mode::Minor, ScaleKind::Diatonic) => DIATONIC_MINOR,
            (Mode::Major, ScaleKind::Pentatonic) => PENTATONIC_MAJOR,
            (Mode::Minor, ScaleKind::Pentatonic) => PENTATONIC_MINOR,
        }
    }

    /// Resolves the context into the concrete pitch classes of the scale.
    #[must_use]
    pub fn derive(&self) -> Scale {
        derive_scale(self.root, self.mode, self.kind)
    }
}

impl Display for ScaleContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ScaleKind::Diatonic => write!(f, "{} {}", self.root, self.mode),
            ScaleKind::Pentatonic => write!(f, "{} {} pentatonic", self.root, self.mode),
        }
    }
}

/// A tonal scale resolved into pitch classes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scale {
    /// The context the scale was derived from.
    pub context: ScaleContext,

    /// The notes which form the scale in degree order.
    pub pitch_classes: Vec<PitchClass>,

    /// The degree label of each note.
    pub degrees: Vec<&'static str>,
}

impl PitchSet for Scale {
    fn root(&self) -> PitchClass {
        self.context.root
    }

    fn pitch_classes(&self) -> &[PitchClass] {
        &self.pitch_classes
    }

    fn degrees(&self) -> &[&'static str] {
        &self.degrees
    }
}

/// Returns the scale with the given root, mode, and kind. The notes are listed in ascending degree
/// order starting at the root, not in ascending pitch.
#[must_use]
pub fn derive_scale(root: PitchClass, mode: Mode, kind: ScaleKind) -> Scale {
    let context = ScaleContext { root, mode, kind };
    let formula = context.formula();
    Scale {
        context,
        pitch_classes: formula
            .offsets
            .iter()
            .map(|offset| root.transpose(*offset as i64))
            .collect(),
        degrees: formula.degrees.to_vec(),
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    /// Verifies the C major scale.
    #[test]
    fn c_major() {
        let scale = derive_scale(PitchClass::C, Mode::Major, ScaleKind::Diatonic);
        let indices: Vec<u8> = scale.pitch_classes.iter().map(|pc| pc.index()).collect();
        assert_eq!(indices, vec![0, 2, 4, 5, 7, 9, 11]);
        assert_eq!(scale.degrees, vec!["1", "2", "3", "4", "5", "6", "7"]);
    }

    /// Verifies the A minor scale shares its notes with C major but starts on A.
    #[test]
    fn a_minor() {
        let scale = derive_scale(PitchClass::A, Mode::Minor, ScaleKind::Diatonic);
        assert_eq!(
            scale.pitch_classes,
            vec![
                PitchClass::A,
                PitchClass::B,
                PitchClass::C,
                PitchClass::D,
                PitchClass::E,
                PitchClass::F,
                PitchClass::G,
            ]
        );
        assert_eq!(scale.degree_of(PitchClass::C), Some("♭3"));
        assert_eq!(scale.degree_of(PitchClass::C_SHARP), None);
    }

    /// Verifies the E minor pentatonic scale.
    #[test]
    fn e_minor_pentatonic() {
        let scale = derive_scale(PitchClass::E, Mode::Minor, ScaleKind::Pentatonic);
        assert_eq!(
            scale.pitch_classes,
            vec![
                PitchClass::E,
                PitchClass::G,
                PitchClass::A,
                PitchClass::B,
                PitchClass::D,
            ]
        );
        assert_eq!(scale.degrees, vec!["1", "♭3", "4", "5", "♭7"]);
    }

    /// Verifies the root comes first and the lengths match the formula for every root.
    #[test]
    fn every_root() {
        for root in PitchClass::ALL {
            let major = derive_scale(root, Mode::Major, ScaleKind::Diatonic);
            assert_eq!(major.pitch_classes[0], root);
            assert_eq!(major.pitch_classes.len(), 7);
            assert_eq!(major.root(), root);

            let minor_pentatonic = derive_scale(root, Mode::Minor, ScaleKind::Pentatonic);
            assert_eq!(minor_pentatonic.pitch_classes[0], root);
            assert_eq!(minor_pentatonic.pitch_classes.len(), 5);

            for mode in Mode::iter() {
                for kind in ScaleKind::iter() {
                    let scale = derive_scale(root, mode, kind);
                    assert_eq!(scale.pitch_classes.len(), scale.degrees.len());
                }
            }
        }
    }

    /// Verifies 1-based positions within a scale.
    #[test]
    fn positions() {
        let scale = derive_scale(PitchClass::G, Mode::Major, ScaleKind::Diatonic);
        assert_eq!(scale.position_of(PitchClass::G), Some(1));
        assert_eq!(scale.position_of(PitchClass::F_SHARP), Some(7));
        assert_eq!(scale.position_of(PitchClass::F), None);
    }

    /// Verifies the names of scale contexts.
    #[test]
    fn display() {
        let context = ScaleContext {
            root: PitchClass::F_SHARP,
            mode: Mode::Minor,
            kind: ScaleKind::Pentatonic,
        };
        assert_eq!(context.to_string(), "F# minor pentatonic");
        assert_eq!(ScaleContext::default().to_string(), "C major");
    }
}

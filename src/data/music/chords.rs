//! Defines the chords whose tones can be drawn as arpeggios on the fretboard.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use ts_rs::TS;

use crate::{
    data::music::{PitchSet, formulas::ChordType, notes::PitchClass},
    error::LookupError,
};

/// The root and chord type that identify a chord.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct ChordContext {
    /// The root of the chord.
    pub root: PitchClass,

    /// The quality of the chord.
    pub chord_type: ChordType,
}

impl ChordContext {
    /// Resolves the context into the concrete tones of the chord.
    #[must_use]
    pub fn derive(&self) -> Chord {
        let formula = self.chord_type.formula();
        Chord {
            context: *self,
            pitch_classes: formula
                .offsets
                .iter()
                .map(|offset| self.root.transpose(*offset as i64))
                .collect(),
            degrees: formula.degrees.to_vec(),
        }
    }
}

impl Default for ChordContext {
    fn default() -> Self {
        ChordContext {
            root: PitchClass::C,
            chord_type: ChordType::Major,
        }
    }
}

impl Display for ChordContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.root, self.chord_type)
    }
}

/// A chord resolved into pitch classes. Offsets of an octave or more are reduced to their pitch
/// class, while their labels keep the compound degree (e.g. "9").
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chord {
    /// The context the chord was derived from.
    pub context: ChordContext,

    /// The chord tones in formula order.
    pub pitch_classes: Vec<PitchClass>,

    /// The degree label of each chord tone.
    pub degrees: Vec<&'static str>,
}

impl PitchSet for Chord {
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

/// Returns the chord with the given root and chord-type symbol. Unknown symbols fail with a
/// [LookupError].
pub fn derive_chord(root: PitchClass, chord_symbol: &str) -> Result<Chord, LookupError> {
    let chord_type = ChordType::from_symbol(chord_symbol)?;
    Ok(ChordContext { root, chord_type }.derive())
}

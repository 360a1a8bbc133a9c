//! Contains types and functions for working with pitch classes, scales, and chords.

pub mod chords;
pub mod formulas;
pub mod notes;
pub mod scales;

use crate::data::music::notes::PitchClass;

/// Returns the degree label at the first position where `pitch_class` appears in `pitch_classes`,
/// or `None` if the pitch class is not a member. The two slices are expected to be aligned, as
/// produced by a scale or chord; any pair can be passed, so a chord's tones can be labelled with
/// the degrees of a different scale by passing that scale instead.
#[must_use]
pub fn degree_of(
    pitch_class: PitchClass,
    pitch_classes: &[PitchClass],
    degrees: &[&'static str],
) -> Option<&'static str> {
    pitch_classes
        .iter()
        .position(|pc| *pc == pitch_class)
        .and_then(|position| degrees.get(position).copied())
}

/// A trait for an ordered collection of pitch classes derived from a root and a formula.
pub trait PitchSet {
    /// Returns the root of the collection, which is always its first pitch class.
    fn root(&self) -> PitchClass;

    /// Returns the pitch classes in formula order.
    fn pitch_classes(&self) -> &[PitchClass];

    /// Returns the degree label of each pitch class, aligned with `pitch_classes`.
    fn degrees(&self) -> &[&'static str];

    /// Returns whether the pitch class belongs to the collection.
    fn contains(&self, pitch_class: PitchClass) -> bool {
        self.pitch_classes().contains(&pitch_class)
    }

    /// Returns the degree label of the pitch class within this collection.
    fn degree_of(&self, pitch_class: PitchClass) -> Option<&'static str> {
        degree_of(pitch_class, self.pitch_classes(), self.degrees())
    }

    /// Returns the 1-based position of the pitch class within this collection.
    fn position_of(&self, pitch_class: PitchClass) -> Option<usize> {
        self.pitch_classes()
            .iter()
            .position(|pc| *pc == pitch_class)
            .map(|position| position + 1)
    }
}

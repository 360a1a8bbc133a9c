//! Maps positions on the neck of a fretted instrument to pitch classes and sounding frequencies.
//!
//! A tuning lists the pitch class of each open string, starting at string index 0 (the highest
//! string in the presets). Because two strings can share a pitch class while sitting in different
//! octaves, each string also carries its octave relative to the fourth octave, which is the octave
//! of the reference frequencies in [PitchClass::reference_frequency].

pub mod view;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{
    data::music::notes::{NUM_PITCH_CLASSES, PitchClass},
    error::RangeError,
};

/// The number of frets on the neck unless configured otherwise.
pub const DEFAULT_MAX_FRET: u8 = 24;

/// The highest fret any tuning accepts. A [Fretboard] can lower it but never raise it.
pub const FRET_LIMIT: u8 = u8::MAX;

/// Checks the fret lies between the open string and `max_fret`.
fn check_fret(fret: i32, max_fret: u8) -> Result<(), RangeError> {
    if fret < 0 {
        Err(RangeError::NegativeFret(fret))
    } else if fret > max_fret as i32 {
        Err(RangeError::FretAboveMax { fret, max_fret })
    } else {
        Ok(())
    }
}

/// The open strings of an instrument and the octave each one sounds in.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Tuning {
    /// The pitch class of each open string.
    pub open_strings: Vec<PitchClass>,

    /// The octave of each open string relative to the fourth octave. For example, the low E string
    /// of a guitar (E2) has an offset of -2.
    pub octave_offsets: Vec<i32>,
}

impl Tuning {
    /// Creates a tuning after checking it has at least one string and one octave offset per string.
    pub fn new(
        open_strings: Vec<PitchClass>,
        octave_offsets: Vec<i32>,
    ) -> Result<Self, RangeError> {
        let tuning = Tuning {
            open_strings,
            octave_offsets,
        };
        tuning.validate()?;
        Ok(tuning)
    }

    /// Standard guitar tuning from the high E string (E4) to the low E string (E2).
    #[must_use]
    pub fn standard_guitar() -> Self {
        Tuning {
            open_strings: vec![
                PitchClass::E,
                PitchClass::B,
                PitchClass::G,
                PitchClass::D,
                PitchClass::A,
                PitchClass::E,
            ],
            octave_offsets: vec![0, -1, -1, -1, -2, -2],
        }
    }

    /// Standard six-string bass tuning from the high C string (C3) to the low B string (B0).
    #[must_use]
    pub fn six_string_bass() -> Self {
        Tuning {
            open_strings: vec![
                PitchClass::C,
                PitchClass::G,
                PitchClass::D,
                PitchClass::A,
                PitchClass::E,
                PitchClass::B,
            ],
            octave_offsets: vec![-1, -2, -2, -3, -3, -4],
        }
    }

    /// Checks the invariants of the tuning.
    pub fn validate(&self) -> Result<(), RangeError> {
        if self.open_strings.is_empty() {
            return Err(RangeError::EmptyTuning);
        }
        if self.open_strings.len() != self.octave_offsets.len() {
            return Err(RangeError::OctaveOffsets {
                num_strings: self.open_strings.len(),
                num_offsets: self.octave_offsets.len(),
            });
        }
        Ok(())
    }

    /// Returns the number of strings.
    #[must_use]
    pub fn num_strings(&self) -> usize {
        self.open_strings.len()
    }

    /// Returns the open pitch class of the string, checking the index is in bounds.
    fn open_string(&self, string_index: usize) -> Result<PitchClass, RangeError> {
        self.open_strings
            .get(string_index)
            .copied()
            .ok_or(RangeError::StringIndex {
                index: string_index,
                num_strings: self.open_strings.len(),
            })
    }

    /// Returns the pitch class sounding at the given string and fret. Frets above [FRET_LIMIT] are
    /// rejected.
    pub fn pitch_class_at(&self, string_index: usize, fret: i32) -> Result<PitchClass, RangeError> {
        let open = self.open_string(string_index)?;
        check_fret(fret, FRET_LIMIT)?;
        Ok(open.transpose(fret as i64))
    }

    /// Returns the equal-tempered frequency in Hz sounding at the given string and fret. The
    /// frequency doubles every twelve frets. Frets above [FRET_LIMIT] are rejected, as are octave
    /// offsets so large the frequency cannot be represented.
    pub fn frequency_at(&self, string_index: usize, fret: i32) -> Result<f64, RangeError> {
        let open = self.open_string(string_index)?;
        check_fret(fret, FRET_LIMIT)?;
        let octave_offset = *self.octave_offsets.get(string_index).ok_or(
            RangeError::OctaveOffsets {
                num_strings: self.open_strings.len(),
                num_offsets: self.octave_offsets.len(),
            },
        )?;

        // Count semitones from the C below the open string so the octave boundary falls on C, the
        // same boundary used by the reference frequencies.
        let total_semitones = open.index() as i32 + fret;
        let pitch_class = PitchClass::wrapping(total_semitones as i64);
        let octaves_crossed = total_semitones / NUM_PITCH_CLASSES as i32;
        octave_offset
            .checked_add(octaves_crossed)
            .map(|total| pitch_class.reference_frequency() * 2f64.powi(total))
            .filter(|frequency| frequency.is_normal())
            .ok_or(RangeError::Frequency { string_index, fret })
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::standard_guitar()
    }
}

/// An instrument neck: a tuning plus the highest playable fret.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fretboard {
    /// The tuning of the instrument.
    tuning: Tuning,

    /// The highest fret, inclusive.
    max_fret: u8,
}

impl Fretboard {
    /// Creates a fretboard with the given tuning and number of frets.
    pub fn new(tuning: Tuning, max_fret: u8) -> Result<Self, RangeError> {
        tuning.validate()?;
        Ok(Fretboard { tuning, max_fret })
    }

    /// Returns the tuning of the instrument.
    #[must_use]
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Returns the highest fret, inclusive.
    #[must_use]
    pub fn max_fret(&self) -> u8 {
        self.max_fret
    }

    /// Returns the pitch class at the given position on the neck.
    pub fn pitch_class_at(&self, string_index: usize, fret: i32) -> Result<PitchClass, RangeError> {
        check_fret(fret, self.max_fret)?;
        self.tuning.pitch_class_at(string_index, fret)
    }

    /// Returns the frequency at the given position on the neck.
    pub fn frequency_at(&self, string_index: usize, fret: i32) -> Result<f64, RangeError> {
        check_fret(fret, self.max_fret)?;
        self.tuning.frequency_at(string_index, fret)
    }

    /// Returns every position on the neck where the pitch class can be played, ordered by string
    /// and then by fret.
    #[must_use]
    pub fn positions_of(&self, pitch_class: PitchClass) -> Vec<(usize, u8)> {
        self.tuning
            .open_strings
            .iter()
            .enumerate()
            .flat_map(|(string_index, open)| {
                (0..=self.max_fret)
                    .filter(move |fret| open.transpose(*fret as i64) == pitch_class)
                    .map(move |fret| (string_index, fret))
            })
            .collect()
    }
}

impl Default for Fretboard {
    fn default() -> Self {
        Fretboard {
            tuning: Tuning::default(),
            max_fret: DEFAULT_MAX_FRET,
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Asserts two frequencies are equal within a small tolerance.
    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    /// Verifies the pitch classes of the open strings and a few fretted notes.
    #[test]
    fn pitch_class_at() {
        let tuning = Tuning::standard_guitar();
        assert_eq!(tuning.pitch_class_at(0, 0).unwrap(), PitchClass::E);
        assert_eq!(tuning.pitch_class_at(1, 1).unwrap(), PitchClass::C);
        assert_eq!(tuning.pitch_class_at(5, 5).unwrap(), PitchClass::A);
        assert_eq!(tuning.pitch_class_at(2, 13).unwrap(), PitchClass::G_SHARP);
    }

    /// Verifies pitch classes repeat every twelve frets on every string.
    #[test]
    fn pitch_class_periodic() {
        for tuning in [Tuning::standard_guitar(), Tuning::six_string_bass()] {
            for string_index in 0..tuning.num_strings() {
                for fret in 0..=12 {
                    assert_eq!(
                        tuning.pitch_class_at(string_index, fret + 12).unwrap(),
                        tuning.pitch_class_at(string_index, fret).unwrap()
                    );
                }
            }
        }
    }

    /// Verifies out of bounds positions are rejected.
    #[test]
    fn out_of_range() {
        let tuning = Tuning::standard_guitar();
        assert_eq!(
            tuning.pitch_class_at(6, 0),
            Err(RangeError::StringIndex {
                index: 6,
                num_strings: 6
            })
        );
        assert_eq!(
            tuning.pitch_class_at(0, -1),
            Err(RangeError::NegativeFret(-1))
        );
        assert!(tuning.frequency_at(9, 0).is_err());
        assert!(tuning.frequency_at(0, -3).is_err());
    }

    /// Verifies huge frets and octave offsets are rejected instead of overflowing.
    #[test]
    fn fret_and_octave_limits() {
        let tuning = Tuning::standard_guitar();
        for fret in [FRET_LIMIT as i32 + 1, i32::MAX] {
            let expected = RangeError::FretAboveMax {
                fret,
                max_fret: FRET_LIMIT,
            };
            assert_eq!(tuning.pitch_class_at(0, fret), Err(expected.clone()));
            assert_eq!(tuning.frequency_at(0, fret), Err(expected));
        }
        assert!(tuning.frequency_at(5, FRET_LIMIT as i32).unwrap().is_finite());

        let high = Tuning::new(vec![PitchClass::B], vec![i32::MAX]).unwrap();
        assert_eq!(
            high.frequency_at(0, 1),
            Err(RangeError::Frequency {
                string_index: 0,
                fret: 1
            })
        );
        let low = Tuning::new(vec![PitchClass::C], vec![-2000]).unwrap();
        assert!(low.frequency_at(0, 0).is_err());
    }

    /// Verifies the frequencies of the open guitar strings.
    #[test]
    fn open_string_frequencies() {
        let tuning = Tuning::standard_guitar();
        assert_close(tuning.frequency_at(0, 0).unwrap(), 329.63);
        assert_close(tuning.frequency_at(1, 0).unwrap(), 493.88 / 2.0);
        assert_close(tuning.frequency_at(4, 0).unwrap(), 440.0 / 4.0);
        assert_close(tuning.frequency_at(5, 0).unwrap(), 329.63 / 4.0);

        // The first fret of the B string crosses into the next octave at C4.
        assert_close(tuning.frequency_at(1, 1).unwrap(), 261.63);

        // The fifth fret of the low E string matches the open A string.
        assert_close(
            tuning.frequency_at(5, 5).unwrap(),
            tuning.frequency_at(4, 0).unwrap(),
        );
    }

    /// Verifies the frequency doubles every twelve frets and never decreases along a string.
    #[test]
    fn frequency_doubles_per_octave() {
        for tuning in [Tuning::standard_guitar(), Tuning::six_string_bass()] {
            for string_index in 0..tuning.num_strings() {
                let mut previous = 0.0;
                for fret in 0..=24 {
                    let frequency = tuning.frequency_at(string_index, fret).unwrap();
                    assert!(frequency >= previous);
                    previous = frequency;
                    if fret <= 12 {
                        assert_close(
                            tuning.frequency_at(string_index, fret + 12).unwrap(),
                            2.0 * frequency,
                        );
                    }
                }
            }
        }
    }

    /// Verifies a custom tuning with an arbitrary number of strings.
    #[test]
    fn custom_tuning() {
        let ukulele = Tuning::new(
            vec![PitchClass::A, PitchClass::E, PitchClass::C, PitchClass::G],
            vec![0, 0, 0, 0],
        )
        .unwrap();
        assert_eq!(ukulele.num_strings(), 4);
        assert_eq!(ukulele.pitch_class_at(3, 2).unwrap(), PitchClass::A);
        assert_close(ukulele.frequency_at(0, 0).unwrap(), 440.0);
    }

    /// Verifies invalid tunings are rejected.
    #[test]
    fn invalid_tunings() {
        assert_eq!(Tuning::new(vec![], vec![]), Err(RangeError::EmptyTuning));
        assert_eq!(
            Tuning::new(vec![PitchClass::E, PitchClass::A], vec![0]),
            Err(RangeError::OctaveOffsets {
                num_strings: 2,
                num_offsets: 1
            })
        );
    }

    /// Verifies the fretboard enforces its maximum fret.
    #[test]
    fn fretboard_max_fret() {
        let fretboard = Fretboard::new(Tuning::standard_guitar(), 12).unwrap();
        assert_eq!(fretboard.pitch_class_at(0, 12).unwrap(), PitchClass::E);
        assert_eq!(
            fretboard.pitch_class_at(0, 13),
            Err(RangeError::FretAboveMax {
                fret: 13,
                max_fret: 12
            })
        );
        assert_eq!(
            fretboard.frequency_at(0, -1),
            Err(RangeError::NegativeFret(-1))
        );
    }

    /// Verifies finding every position of a pitch class.
    #[test]
    fn positions_of() {
        let fretboard = Fretboard::new(Tuning::standard_guitar(), 5).unwrap();
        assert_eq!(
            fretboard.positions_of(PitchClass::A),
            vec![(0, 5), (2, 2), (4, 0), (5, 5)]
        );
    }
}

//! Defines the options that control what the fretboard shows and which exercises are generated,
//! along with the music-theory data structures they refer to.

pub mod music;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::{str::FromStr, time::Duration};
use strum::{Display, EnumIter, EnumString};
use ts_rs::TS;

use crate::{
    data::music::{
        chords::ChordContext,
        formulas::ChordType,
        notes::PitchClass,
        scales::{Mode, ScaleContext, ScaleKind},
    },
    error::{LookupError, RangeError},
    exercise::ExerciseKind,
    fretboard::{DEFAULT_MAX_FRET, Fretboard, Tuning},
};

/// Defines what is written on each highlighted fretboard cell.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    Eq,
    PartialEq,
    Serialize,
    TS,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
#[ts(export)]
pub enum DisplayMode {
    /// Show the name of the note (e.g. "F#").
    #[default]
    NoteName,

    /// Show the degree of the note within the reference scale or chord (e.g. "♭3").
    Degree,
}

/// Defines which group of notes is highlighted on the fretboard.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    Eq,
    PartialEq,
    Serialize,
    TS,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
#[ts(export)]
pub enum ViewMode {
    /// Highlight the notes of the selected scale.
    #[default]
    Scale,

    /// Highlight the tones of the selected chord.
    Arpeggio,
}

/// Defines where the degree labels of an arpeggio come from.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    Eq,
    PartialEq,
    Serialize,
    TS,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
#[ts(export)]
pub enum DegreeReference {
    /// Label chord tones with their degree in the selected key (e.g. the third of G7 in C major is
    /// labelled "7").
    #[default]
    Key,

    /// Label chord tones with their degree in the chord itself (e.g. the third of G7 is "3").
    Chord,
}

/// The timing used when playing notes.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct PlaybackOptions {
    /// How long a single note rings, in milliseconds.
    pub note_duration_ms: u64,

    /// The time between the starts of consecutive notes of a motif, in milliseconds.
    pub motif_interval_ms: u64,

    /// How long the note entered as an answer rings, in milliseconds.
    pub answer_tone_ms: u64,
}

impl PlaybackOptions {
    #[must_use]
    pub fn note_duration(&self) -> Duration {
        Duration::from_millis(self.note_duration_ms)
    }

    #[must_use]
    pub fn motif_interval(&self) -> Duration {
        Duration::from_millis(self.motif_interval_ms)
    }

    #[must_use]
    pub fn answer_tone(&self) -> Duration {
        Duration::from_millis(self.answer_tone_ms)
    }
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        PlaybackOptions {
            note_duration_ms: 500,
            motif_interval_ms: 500,
            answer_tone_ms: 300,
        }
    }
}

/// The options of a training session. Every field has a default, so a partial JSON document is a
/// valid configuration.
#[derive(Builder, Clone, Debug, Deserialize, Eq, PartialEq, Serialize, TS)]
#[builder(default)]
#[serde(default)]
#[ts(export)]
pub struct TrainerOptions {
    /// The tuning of the instrument.
    pub tuning: Tuning,

    /// The highest fret shown and accepted as input.
    pub max_fret: u8,

    /// The tonic of the selected key.
    pub key: PitchClass,

    /// Whether the selected key is major or minor.
    pub mode: Mode,

    /// Whether the selected scale is diatonic or pentatonic.
    pub scale_kind: ScaleKind,

    /// What to write on the highlighted cells.
    pub display_mode: DisplayMode,

    /// Whether the fretboard highlights the scale or the chord.
    pub view_mode: ViewMode,

    /// The chord drawn in the arpeggio view.
    pub chord: ChordContext,

    /// Where arpeggio degree labels come from.
    pub degree_reference: DegreeReference,

    /// The exercise generated when a new exercise is requested without a kind.
    pub exercise_kind: ExerciseKind,

    /// The timing used when playing notes.
    pub playback: PlaybackOptions,
}

impl Default for TrainerOptions {
    fn default() -> Self {
        TrainerOptions {
            tuning: Tuning::standard_guitar(),
            max_fret: DEFAULT_MAX_FRET,
            key: PitchClass::C,
            mode: Mode::Major,
            scale_kind: ScaleKind::Diatonic,
            display_mode: DisplayMode::NoteName,
            view_mode: ViewMode::Scale,
            chord: ChordContext::default(),
            degree_reference: DegreeReference::Key,
            exercise_kind: ExerciseKind::FindNote,
            playback: PlaybackOptions::default(),
        }
    }
}

/// Parses the value of an option from its string form.
fn parse_value<T: FromStr>(option: &'static str, value: &str) -> Result<T, LookupError> {
    value.trim().parse().map_err(|_| LookupError::OptionValue {
        option,
        value: value.to_string(),
    })
}

impl TrainerOptions {
    /// Returns the selected key as a scale context.
    #[must_use]
    pub fn scale_context(&self) -> ScaleContext {
        ScaleContext {
            root: self.key,
            mode: self.mode,
            kind: self.scale_kind,
        }
    }

    /// Builds the fretboard described by the tuning and fret range.
    pub fn fretboard(&self) -> Result<Fretboard, RangeError> {
        Fretboard::new(self.tuning.clone(), self.max_fret)
    }

    /// Sets a single option from the string values used by a settings form. The recognized options
    /// are `key`, `mode`, `scale`, `display`, `view`, `chordRoot`, `chordType`, `degreeReference`,
    /// `exercise`, and `maxFret`.
    pub fn set_option(&mut self, option: &str, value: &str) -> Result<(), LookupError> {
        match option {
            "key" => self.key = PitchClass::from_str(value)?,
            "mode" => self.mode = parse_value("mode", value)?,
            "scale" => self.scale_kind = parse_value("scale", value)?,
            "display" => self.display_mode = parse_value("display", value)?,
            "view" => self.view_mode = parse_value("view", value)?,
            "chordRoot" => self.chord.root = PitchClass::from_str(value)?,
            "chordType" => self.chord.chord_type = ChordType::from_symbol(value.trim())?,
            "degreeReference" => self.degree_reference = parse_value("degreeReference", value)?,
            "exercise" => self.exercise_kind = parse_value("exercise", value)?,
            "maxFret" => self.max_fret = parse_value("maxFret", value)?,
            _ => return Err(LookupError::OptionName(option.to_string())),
        }
        Ok(())
    }
}

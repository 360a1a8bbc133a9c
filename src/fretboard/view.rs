//! Builds the grid a renderer draws for the fretboard: one row per string, one cell per fret.

use serde::Serialize;
use ts_rs::TS;

use crate::{
    data::{DisplayMode, music::PitchSet, music::notes::PitchClass},
    fretboard::Fretboard,
};

/// The frets marked with a dot in the legend.
pub const MARKER_FRETS: [u8; 4] = [0, 7, 12, 19];

/// A single position on the neck.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct FretCell {
    pub string_index: usize,
    pub fret: u8,
    pub pitch_class: PitchClass,

    /// Whether the note belongs to the highlighted scale or chord.
    pub in_group: bool,

    /// Whether the note is the root of the highlighted scale or chord.
    pub is_root: bool,

    /// Whether this is the open string.
    pub is_open: bool,

    /// Whether the cell is drawn dimmed. Only notes outside the group in degree display are muted.
    pub muted: bool,

    /// The text drawn on the cell.
    pub label: String,
}

/// The cells of a single string.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct StringRow {
    /// The pitch class of the open string.
    pub open: PitchClass,

    /// One cell per fret, starting at the open string.
    pub cells: Vec<FretCell>,
}

/// A label in the fret legend drawn above the grid.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct LegendEntry {
    pub fret: u8,
    pub text: String,
    pub marker: bool,
}

/// The full grid of the fretboard.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct FretboardView {
    pub strings: Vec<StringRow>,
    pub legend: Vec<LegendEntry>,
}

impl FretboardView {
    /// Builds the grid. Membership and the root come from `group`. In degree display, the labels of
    /// highlighted notes come from `labels`, which may be the same collection as `group` or a
    /// different one (e.g. the key an arpeggio is played over). A highlighted note with no degree
    /// in `labels` shows its note name instead.
    #[must_use]
    pub fn build(
        fretboard: &Fretboard,
        group: &dyn PitchSet,
        labels: &dyn PitchSet,
        display_mode: DisplayMode,
    ) -> Self {
        let root = group.root();
        let strings = fretboard
            .tuning()
            .open_strings
            .iter()
            .enumerate()
            .map(|(string_index, open)| StringRow {
                open: *open,
                cells: (0..=fretboard.max_fret())
                    .map(|fret| {
                        let pitch_class = open.transpose(fret as i64);
                        let in_group = group.contains(pitch_class);
                        let label = match display_mode {
                            DisplayMode::Degree if in_group => labels
                                .degree_of(pitch_class)
                                .unwrap_or(pitch_class.name())
                                .to_string(),
                            _ => pitch_class.name().to_string(),
                        };
                        FretCell {
                            string_index,
                            fret,
                            pitch_class,
                            in_group,
                            is_root: in_group && pitch_class == root,
                            is_open: fret == 0,
                            muted: display_mode == DisplayMode::Degree && !in_group,
                            label,
                        }
                    })
                    .collect(),
            })
            .collect();

        let legend = (0..=fretboard.max_fret())
            .map(|fret| LegendEntry {
                fret,
                text: if fret == 0 {
                    "Open".to_string()
                } else {
                    fret.to_string()
                },
                marker: MARKER_FRETS.contains(&fret),
            })
            .collect();

        FretboardView { strings, legend }
    }

    /// Returns the cell at the given position, if it exists.
    #[must_use]
    pub fn cell(&self, string_index: usize, fret: u8) -> Option<&FretCell> {
        self.strings
            .get(string_index)
            .and_then(|row| row.cells.get(fret as usize))
    }
}

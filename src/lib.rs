//! Fretwise is an ear-training engine for fretted instruments. It maps the neck of an instrument to
//! pitch classes and frequencies, highlights scales and arpeggios on it, and runs exercises in
//! which the student hears notes and finds them on the fretboard.
//!
//! The music theory lives in [data::music]: pitch classes, the formulas of scales and chords, and
//! the scales and chords derived from them. The [fretboard] module maps string and fret positions
//! to notes and builds the grid drawn by a renderer. The [exercise] module generates exercises from
//! the active scale and validates answers, and [session::Session] ties everything together with
//! the running score and an audio output implementing [player::TonePlayer].
//!
//! Fretwise does not produce sound nor draw anything by itself. The embedding application provides
//! the audio output and renders the grid and prompts returned by the session.

pub mod data;
pub mod error;
pub mod exercise;
pub mod fretboard;
pub mod player;
pub mod preferences_manager;
pub mod scorer;
pub mod session;

use anyhow::{Context, Result, anyhow};
use std::{fs::create_dir, path::Path};
use tracing::debug;

use data::TrainerOptions;
use preferences_manager::{LocalPreferencesManager, PreferencesManager};

/// The path to the folder inside the working directory containing the user data.
pub const CONFIG_DIR_PATH: &str = ".fretwise";

/// The path to the file inside the config directory containing the saved trainer options.
pub const PREFERENCES_PATH: &str = "preferences.json";

/// Initializes the config directory at path .fretwise inside the working directory.
fn init_config_directory(working_dir: &Path) -> Result<()> {
    if !working_dir.is_dir() {
        return Err(anyhow!("working_dir must be the path to a directory"));
    }

    // Create the config folder inside the working directory if it does not exist already.
    let config_path = working_dir.join(CONFIG_DIR_PATH);
    if !config_path.exists() {
        create_dir(&config_path).with_context(|| {
            format!(
                "failed to create config directory at {}",
                config_path.display()
            )
        })?;
    } else if !config_path.is_dir() {
        return Err(anyhow!("config path .fretwise must be a directory"));
    }
    Ok(())
}

/// Returns a preferences manager for the file stored in the config directory inside the working
/// directory, creating the directory if needed.
pub fn open_preferences(working_dir: &Path) -> Result<LocalPreferencesManager> {
    init_config_directory(working_dir)?;
    Ok(LocalPreferencesManager {
        path: working_dir.join(CONFIG_DIR_PATH).join(PREFERENCES_PATH),
    })
}

/// Loads the options saved in the working directory. If no options have been saved yet, the
/// default options are saved and returned.
pub fn load_options(working_dir: &Path) -> Result<TrainerOptions> {
    let mut manager = open_preferences(working_dir)?;
    if !manager.path.exists() {
        debug!(path = %manager.path.display(), "saving default options");
        let options = TrainerOptions::default();
        manager.set_preferences(&options)?;
        return Ok(options);
    }
    Ok(manager.get_preferences()?)
}

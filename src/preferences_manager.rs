//! A module containing methods to read and write the saved trainer options.

use anyhow::{Context, Result, anyhow};
use std::{fs::File, io::BufReader, path::PathBuf};

use crate::{data::TrainerOptions, error::PreferencesManagerError};

/// A trait for managing the options the trainer starts with.
pub trait PreferencesManager {
    /// Gets the saved trainer options.
    fn get_preferences(&self) -> Result<TrainerOptions, PreferencesManagerError>;

    /// Saves the given trainer options.
    fn set_preferences(&mut self, options: &TrainerOptions) -> Result<(), PreferencesManagerError>;
}

/// A preferences manager backed by a local file containing a serialized `TrainerOptions` object.
/// Options missing from the file take their default values.
pub struct LocalPreferencesManager {
    /// The path to the preferences file.
    pub path: PathBuf,
}

impl LocalPreferencesManager {
    /// Helper function to get the saved trainer options.
    fn get_preferences_helper(&self) -> Result<TrainerOptions> {
        let file = File::open(&self.path)
            .with_context(|| anyhow!("cannot open preferences file {}", self.path.display()))?;
        let reader = BufReader::new(file);
        let options: TrainerOptions = serde_json::from_reader(reader)
            .with_context(|| anyhow!("cannot parse preferences file {}", self.path.display()))?;
        options.tuning.validate().with_context(|| {
            anyhow!("invalid tuning in preferences file {}", self.path.display())
        })?;
        Ok(options)
    }

    /// Helper function to save the trainer options.
    fn set_preferences_helper(&self, options: &TrainerOptions) -> Result<()> {
        let file = File::create(&self.path)
            .with_context(|| anyhow!("cannot create preferences file {}", self.path.display()))?;
        serde_json::to_writer_pretty(file, options).with_context(|| {
            anyhow!(
                "cannot serialize preferences to file at {}",
                self.path.display()
            )
        })
    }
}

impl PreferencesManager for LocalPreferencesManager {
    fn get_preferences(&self) -> Result<TrainerOptions, PreferencesManagerError> {
        self.get_preferences_helper()
            .map_err(PreferencesManagerError::GetPreferences)
    }

    fn set_preferences(&mut self, options: &TrainerOptions) -> Result<(), PreferencesManagerError> {
        self.set_preferences_helper(options)
            .map_err(PreferencesManagerError::SetPreferences)
    }
}

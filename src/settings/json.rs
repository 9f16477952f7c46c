use std::{
    fs::{self, OpenOptions, rename, write},
    path::{Path, PathBuf},
};

use fs2::FileExt;
use serde_json::to_string_pretty;
use tracing::debug;
use uuid::Uuid;

use crate::settings::{Settings, SettingsError, SettingsSource};

pub struct JsonFileSettings {
    path: PathBuf,
}

impl JsonFileSettings {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Renames `temp_path` over the settings file under the exclusive lock.
    fn commit(&self, temp_path: &Path) -> Result<(), SettingsError> {
        let lock_file_path = self.path.with_extension("lock");
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_file_path)
            .map_err(|e| SettingsError::SaveFailed {
                path: lock_file_path.clone(),
                source: e,
            })?;
        lock_file
            .lock_exclusive()
            .map_err(|e| SettingsError::SaveFailed {
                path: lock_file_path,
                source: e,
            })?;

        rename(temp_path, &self.path).map_err(|e| SettingsError::SaveFailed {
            path: self.path.clone(),
            source: e,
        })?;

        lock_file.unlock().map_err(|e| SettingsError::SaveFailed {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl SettingsSource for JsonFileSettings {
    fn load(&self) -> Result<Settings, SettingsError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let settings: Settings =
                    serde_json::from_str(&content).map_err(|e| SettingsError::ParseFailed {
                        path: self.path.clone(),
                        source: e,
                    })?;
                settings.validate()?;
                debug!(path = %self.path.display(), "settings loaded");
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no settings file, using defaults");
                Ok(Settings::default())
            }
            Err(e) => Err(SettingsError::LoadFailed {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    /// Writes to a unique temp file and renames it over the target while
    /// holding an exclusive lock, so readers never see a partial file.
    fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        settings.validate()?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| SettingsError::SaveFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json =
            to_string_pretty(settings).map_err(|e| SettingsError::SerializeFailed { source: e })?;

        let unique_temp = format!("{}.tmp.{}", self.path.display(), Uuid::new_v4());
        let temp_path = PathBuf::from(&unique_temp);
        write(&temp_path, json).map_err(|e| SettingsError::SaveFailed {
            path: temp_path.clone(),
            source: e,
        })?;

        let committed = self.commit(&temp_path);
        if committed.is_err() {
            // The commit error is the one reported
            let _ = fs::remove_file(&temp_path);
        }
        committed?;

        debug!(path = %self.path.display(), "settings saved");

        Ok(())
    }
}

//! User profile persistence with file locking.
//!
//! Profiles are stored as pretty JSON. Saving goes through a locked temp
//! file in the same directory and an atomic rename.

use crate::{Error, Result, UserProfile};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

impl UserProfile {
    /// Load a profile with a shared lock
    ///
    /// A missing or unparsable file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Profile(format!(
                "No profile found at {:?}; create one with `wplan init-profile`",
                path
            )));
        }

        let file = File::open(path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;
        read?;

        let profile: UserProfile = serde_json::from_str(&contents)
            .map_err(|e| Error::Profile(format!("Failed to parse {:?}: {}", path, e)))?;

        tracing::debug!(
            "Loaded profile {} with {} past workouts from {:?}",
            profile.user_id,
            profile.past_workouts.len(),
            path
        );
        Ok(profile)
    }

    /// Save the profile atomically with an exclusive lock
    ///
    /// Writes to a temp file, syncs it, then renames over the original.
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, self)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved profile {} to {:?}", self.user_id, path);
        Ok(())
    }

    /// Load a profile, modify it, and save it back
    pub fn update<F>(path: &Path, f: F) -> Result<Self>
    where
        F: FnOnce(&mut UserProfile) -> Result<()>,
    {
        let mut profile = Self::load(path)?;
        f(&mut profile)?;
        profile.save(path)?;
        Ok(profile)
    }
}

//! Player profile persistence
//!
//! A small JSON key-value store for the numbers that survive across runs:
//! best score, total apples, games played. Loaded once at startup; saved
//! fire-and-forget on game over. A missing or unreadable file degrades to a
//! fresh profile — persistence failures never reach the game loop.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// The persisted numbers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub best_score: u32,
    pub total_apples: u64,
    pub games_played: u32,
}

/// Profile file handle: owns the path and the in-memory copy
#[derive(Debug)]
pub struct ProfileStore {
    path: PathBuf,
    profile: Profile,
}

impl ProfileStore {
    /// Open the store at `path`, reading the existing profile if there is
    /// one. Corrupt or missing files fall back to a default profile.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let profile = match Self::read(&path) {
            Ok(Some(profile)) => profile,
            Ok(None) => Profile::default(),
            Err(error) => {
                warn!(path = %path.display(), %error, "failed to read profile, starting fresh");
                Profile::default()
            }
        };

        Self { path, profile }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Fold a finished run into the profile. Returns true if the run set a
    /// new best score.
    pub fn record_run(&mut self, score: u32, apples: u32) -> bool {
        self.profile.games_played += 1;
        self.profile.total_apples += u64::from(apples);

        if score > self.profile.best_score {
            self.profile.best_score = score;
            true
        } else {
            false
        }
    }

    /// Write the profile to disk, creating parent directories if needed
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }

        let json = serde_json::to_string_pretty(&self.profile).context("serializing profile")?;
        fs::write(&self.path, json)
            .with_context(|| format!("writing profile to {}", self.path.display()))?;
        Ok(())
    }

    fn read(path: &Path) -> Result<Option<Profile>> {
        if !path.exists() {
            return Ok(None);
        }
        let json =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let profile = serde_json::from_str(&json)
            .with_context(|| format!("parsing profile at {}", path.display()))?;
        Ok(Some(profile))
    }
}

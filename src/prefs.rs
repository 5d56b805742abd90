//! Persisted card/mixer preference.
//!
//! A two-key `key=value` text file, rewritten wholesale on every change.
//! Loading tolerates anything: a missing file, unknown keys and unparseable
//! lines are all skipped. Saving is best-effort and never fails the caller.

use crate::mixer::Selection;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

/// What a preference file contributed: either half may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredPrefs {
    pub card: Option<u32>,
    pub mixer: Option<String>,
}

/// File-backed preference store.
pub struct PrefStore {
    path: PathBuf,
}

impl PrefStore {
    const DIR_NAME: &'static str = "alsa-tray";
    const FILE_NAME: &'static str = "alsa-tray.rc";

    /// Store at the default XDG location, or `~/.alsa-tray.rc` without one.
    pub fn new() -> Self {
        let path = match dirs::config_dir() {
            Some(dir) => dir.join(Self::DIR_NAME).join(Self::FILE_NAME),
            None => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".alsa-tray.rc"),
        };
        Self { path }
    }

    /// Store at an explicit path (tests).
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load the stored preference. `None` when no file exists.
    pub fn load(&self) -> Option<StoredPrefs> {
        let content = fs::read_to_string(&self.path).ok()?;
        Some(Self::parse(&content))
    }

    fn parse(content: &str) -> StoredPrefs {
        let mut prefs = StoredPrefs::default();
        for line in content.lines() {
            let line: String = line.chars().filter(|c| !c.is_whitespace()).collect();
            if let Some(value) = line.strip_prefix("card=hw:") {
                if let Ok(index) = value.parse::<u32>() {
                    prefs.card = Some(index);
                }
            } else if let Some(value) = line.strip_prefix("mixer=") {
                if !value.is_empty() && value.chars().all(|c| c.is_alphanumeric()) {
                    prefs.mixer = Some(value.to_string());
                }
            }
            // Anything else: unknown key or garbage, skipped
        }
        prefs
    }

    /// Overwrite the file with the given selection. Failures are swallowed;
    /// persistence is not on the critical path.
    pub fn save(&self, selection: &Selection) {
        if let Err(e) = self.try_save(selection) {
            debug!(path = %self.path.display(), error = %e, "preference write failed");
        }
    }

    fn try_save(&self, selection: &Selection) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(&self.path)?;
        writeln!(file, "card=hw:{}", selection.card)?;
        writeln!(file, "mixer={}", selection.mixer)?;
        Ok(())
    }
}

impl Default for PrefStore {
    fn default() -> Self {
        Self::new()
    }
}

//! Load and save every channel's history to a single JSON file.
//!
//! [`HistoryFile::load`] and [`HistoryFile::dump`] are best-effort: failures
//! are logged and the engine keeps whatever it had. [`HistoryFile::read`] and
//! [`HistoryFile::write`] are the strict versions they build on.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::engine::{ChannelStore, Engine};
use crate::error::ExitError;
use crate::history::{BoundedHistory, UrlRecord};

/// Default history file name, placed in the home directory.
pub const STORE_FILE: &str = ".grue.json";

const FORMAT_VERSION: u32 = 1;

/// Default store location: `~/.grue.json`, or the working directory if there is no home.
pub fn default_store_path() -> PathBuf {
    dirs::home_dir().unwrap_or_default().join(STORE_FILE)
}

/// On-disk shape of a [`ChannelStore`].
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    channels: BTreeMap<String, Vec<UrlRecord>>,
}

impl Snapshot {
    fn capture(store: &ChannelStore) -> Self {
        let channels = store
            .iter()
            .map(|(channel, history)| (channel.clone(), history.iter().cloned().collect()))
            .collect();
        Self {
            version: FORMAT_VERSION,
            channels,
        }
    }

    fn restore(self, capacity: NonZeroUsize) -> ChannelStore {
        self.channels
            .into_iter()
            .map(|(channel, records)| (channel, BoundedHistory::from_records(capacity, records)))
            .collect()
    }
}

/// The file a deployment keeps its link history in.
#[derive(Debug, Clone)]
pub struct HistoryFile {
    path: PathBuf,
}

impl HistoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file, rebuilding each channel at `capacity`.
    pub fn read(&self, capacity: NonZeroUsize) -> anyhow::Result<ChannelStore> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let snapshot: Snapshot = serde_json::from_str(&contents)
            .map_err(|e| self.store_error(format!("invalid history file: {e}")))?;
        if snapshot.version != FORMAT_VERSION {
            return Err(
                self.store_error(format!("unsupported format version {}", snapshot.version))
            );
        }
        Ok(snapshot.restore(capacity))
    }

    /// Write the whole store. The previous file stays intact if this fails.
    pub fn write(&self, store: &ChannelStore) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let json = serde_json::to_string(&Snapshot::capture(store)).context("serializing history")?;

        let tmp_path = self.tmp_path();
        let written = fs::File::create(&tmp_path)
            .and_then(|mut file| {
                file.write_all(json.as_bytes())?;
                file.sync_all()
            })
            .with_context(|| format!("writing {}", tmp_path.display()))
            .and_then(|()| {
                fs::rename(&tmp_path, &self.path)
                    .with_context(|| format!("replacing {}", self.path.display()))
            });
        if written.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        written
    }

    /// Replace the engine's channels with the file's contents.
    ///
    /// Returns whether anything was loaded; on failure the engine is untouched.
    /// A file that exists but cannot be read is moved to `<path>.bad` so a
    /// later dump does not overwrite it.
    pub fn load(&self, engine: &mut Engine) -> bool {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no history file yet");
            return false;
        }
        match self.read(engine.capacity()) {
            Ok(channels) => {
                tracing::info!(
                    path = %self.path.display(),
                    channels = channels.len(),
                    "loaded history"
                );
                engine.replace_channels(channels);
                true
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "error loading history: {e:#}");
                self.set_aside();
                false
            }
        }
    }

    /// Save the engine's channels, logging rather than returning failures.
    pub fn dump(&self, engine: &Engine) -> bool {
        match self.write(engine.channels()) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "dumped history");
                true
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "error dumping history: {e:#}");
                false
            }
        }
    }

    /// Where an unreadable history file is kept.
    pub fn bad_path(&self) -> PathBuf {
        self.sibling(".bad")
    }

    fn set_aside(&self) {
        let bad = self.bad_path();
        match fs::rename(&self.path, &bad) {
            Ok(()) => tracing::warn!(
                path = %self.path.display(),
                moved_to = %bad.display(),
                "kept unreadable history aside"
            ),
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                "could not move unreadable history aside: {e}"
            ),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        self.sibling(".tmp")
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn store_error(&self, message: String) -> anyhow::Error {
        ExitError::Store {
            path: self.path.display().to_string(),
            message,
        }
        .into()
    }
}

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::Context;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::duration::DurationStyle;
use crate::error::ExitError;
use crate::history::DEFAULT_CAPACITY;
use crate::store::default_store_path;

/// Config file name inside the grue config directory.
pub const CONFIG_TOML: &str = "config.toml";

/// Default config location: `<config_dir>/grue/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("grue").join(CONFIG_TOML))
}

/// Top-level grue config.
///
/// Every field is optional; a missing file behaves like an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// File the link history is loaded from and dumped to.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    /// Links remembered per channel before the oldest are forgotten.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// How elapsed time is phrased in notices.
    #[serde(default)]
    pub duration_style: DurationStyle,
    /// Notices longer than this many characters are cut off with "...".
    #[serde(default = "default_max_notice_length")]
    pub max_notice_length: usize,
    /// Channels watched by `grue watch`. Empty means every channel.
    #[serde(default)]
    pub channels: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            capacity: default_capacity(),
            duration_style: DurationStyle::default(),
            max_notice_length: default_max_notice_length(),
            channels: Vec::new(),
        }
    }
}

const fn default_capacity() -> usize { DEFAULT_CAPACITY.get() }
const fn default_max_notice_length() -> usize { 1024 }

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse_toml(&contents)
    }

    /// Load `path` if given, else the default location; missing default means defaults.
    pub fn resolve(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Parse config from a TOML string.
    pub fn parse_toml(toml_str: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| ExitError::Config(format!("invalid config.toml: {e}")))?;
        config.history_capacity()?;
        Ok(config)
    }

    /// The per-channel capacity, rejecting zero.
    pub fn history_capacity(&self) -> anyhow::Result<NonZeroUsize> {
        NonZeroUsize::new(self.capacity)
            .ok_or_else(|| ExitError::Config("capacity must be greater than zero".into()).into())
    }

    /// Serialize config to a TOML string with helpful comments.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        let raw = toml::to_string_pretty(self)
            .context("serializing config to TOML")?;

        let mut doc: toml_edit::DocumentMut = raw.parse()
            .context("parsing generated TOML for comment injection")?;

        doc.decor_mut().set_prefix("# grue configuration\n\n");

        fn set_key_comment(doc: &mut toml_edit::DocumentMut, key: &str, comment: &str) {
            if let Some(mut key) = doc.key_mut(key) {
                key.leaf_decor_mut().set_prefix(comment);
            }
        }

        set_key_comment(&mut doc, "store_path", "# Where link history is kept between runs\n");
        set_key_comment(&mut doc, "capacity", "\n# Links remembered per channel\n");
        set_key_comment(
            &mut doc,
            "duration_style",
            "\n# \"coarsest\" (1 day) or \"full\" (1 day 2 hours 5 seconds)\n",
        );
        set_key_comment(&mut doc, "max_notice_length", "\n# Longer notices are truncated\n");
        set_key_comment(&mut doc, "channels", "\n# Channels to watch; empty watches all\n");

        Ok(doc.to_string())
    }

    /// Whether `grue watch` should look at `channel`, given any `--channel` overrides.
    pub fn is_active(&self, channel: &str, overrides: &[String]) -> bool {
        let active = if overrides.is_empty() { self.channels.as_slice() } else { overrides };
        active.is_empty() || active.iter().any(|c| c == channel)
    }
}

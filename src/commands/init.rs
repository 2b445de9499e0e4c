use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use grue::config::{Config, default_config_path};
use grue::error::ExitError;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Where to write the config (defaults to `--config`, then the user config directory)
    #[arg(long)]
    pub path: Option<PathBuf>,
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    pub fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<()> {
        let path = self
            .path
            .clone()
            .or_else(|| config_path.map(Path::to_path_buf))
            .or_else(default_config_path);
        let path = match path {
            Some(p) => p,
            None => {
                return Err(ExitError::Config(
                    "could not determine config directory; pass --path".into(),
                )
                .into());
            }
        };

        if path.exists() && !self.force {
            return Err(ExitError::Other(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            ))
            .into());
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let contents = Config::default().to_toml()?;
        fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote default config");
        println!("Wrote {}", path.display());
        Ok(())
    }
}

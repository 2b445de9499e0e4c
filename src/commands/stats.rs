use std::collections::HashSet;

use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;

use grue::config::Config;
use grue::{BoundedHistory, ChannelStore, HistoryFile};

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub store_path: String,
    pub channels: Vec<ChannelStats>,
}

#[derive(Debug, Serialize)]
pub struct ChannelStats {
    pub channel: String,
    pub links: usize,
    pub distinct: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oldest: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newest: Option<DateTime<Utc>>,
}

impl ChannelStats {
    fn from_history(channel: &str, history: &BoundedHistory) -> Self {
        let distinct: HashSet<String> =
            history.iter().map(|r| r.url.to_ascii_lowercase()).collect();
        Self {
            channel: channel.to_string(),
            links: history.len(),
            distinct: distinct.len(),
            oldest: history.iter().next().map(|r| r.observed_at),
            newest: history.iter().last().map(|r| r.observed_at),
        }
    }
}

impl StatsReport {
    pub fn new(store_path: String, store: &ChannelStore) -> Self {
        Self {
            store_path,
            channels: store
                .iter()
                .map(|(channel, history)| ChannelStats::from_history(channel, history))
                .collect(),
        }
    }

    fn render_text(&self) -> String {
        let mut out = format!("History: {}\n", self.store_path);
        if self.channels.is_empty() {
            out.push_str("  (no links recorded)\n");
        }
        for stats in &self.channels {
            out.push_str(&format!(
                "  {}: {} links ({} distinct)\n",
                stats.channel, stats.links, stats.distinct
            ));
        }
        out
    }
}

impl StatsArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let file = HistoryFile::new(&config.store_path);
        let store = if file.path().exists() {
            file.read(config.history_capacity()?)?
        } else {
            ChannelStore::new()
        };
        let report = StatsReport::new(file.path().display().to_string(), &store);

        match self.format {
            OutputFormat::Text => print!("{}", report.render_text()),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        }
        Ok(())
    }
}

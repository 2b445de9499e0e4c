pub mod check;
pub mod init;
pub mod schema;
pub mod stats;
pub mod watch;

use chrono::{DateTime, Utc};

use grue::config::Config;
use grue::{DurationStyle, Engine, HistoryFile, notice};

/// An engine loaded from the configured history file, plus how to phrase notices.
pub struct Session {
    engine: Engine,
    file: HistoryFile,
    style: DurationStyle,
    max_notice_length: usize,
}

impl Session {
    pub fn open(config: &Config) -> anyhow::Result<Self> {
        let mut engine = Engine::new(config.history_capacity()?);
        let file = HistoryFile::new(&config.store_path);
        file.load(&mut engine);
        Ok(Self {
            engine,
            file,
            style: config.duration_style,
            max_notice_length: config.max_notice_length,
        })
    }

    /// Process one statement, returning the notice to post if it repeats a link.
    pub fn handle(
        &mut self,
        channel: &str,
        speaker: &str,
        text: &str,
        now: DateTime<Utc>,
    ) -> Option<String> {
        let sightings = self.engine.process(channel, speaker, text, now)?;
        notice::render(speaker, &sightings, now, self.style, self.max_notice_length)
    }

    pub fn checkpoint(&self) -> bool {
        self.file.dump(&self.engine)
    }
}

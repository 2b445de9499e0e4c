use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Args;

use grue::config::Config;
use grue::notice;

use super::Session;

/// A stdin line that asks for the history to be written out now.
pub const CHECKPOINT: &str = "/dump";

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Channel to watch (repeatable); overrides `channels` from the config
    #[arg(long = "channel", short = 'c')]
    pub channels: Vec<String>,
}

/// One `channel<TAB>speaker<TAB>text` input line.
#[derive(Debug, PartialEq, Eq)]
pub struct Statement<'a> {
    pub channel: &'a str,
    pub speaker: &'a str,
    pub text: &'a str,
}

impl<'a> Statement<'a> {
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut fields = line.splitn(3, '\t');
        let channel = fields.next().filter(|c| !c.is_empty())?;
        let speaker = fields.next().filter(|s| !s.is_empty())?;
        let text = fields.next()?;
        Some(Self { channel, speaker, text })
    }
}

impl WatchArgs {
    /// Read statements from stdin until EOF, printing `channel<TAB>notice` for each repeat.
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut session = Session::open(config)?;
        let result = self.pump(
            config,
            &mut session,
            io::stdin().lock(),
            &mut io::stdout().lock(),
        );
        session.checkpoint();
        result
    }

    /// Bytes that are not valid UTF-8 are replaced rather than ending the session.
    fn pump(
        &self,
        config: &Config,
        session: &mut Session,
        mut input: impl BufRead,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf).context("reading stdin")? == 0 {
                break;
            }
            let decoded = String::from_utf8_lossy(&buf);
            let line = decoded.trim_end_matches(['\n', '\r']);
            if line.trim_end() == CHECKPOINT {
                session.checkpoint();
                continue;
            }
            let Some(statement) = Statement::parse(line) else {
                tracing::debug!(line, "skipping malformed line");
                continue;
            };
            if !config.is_active(statement.channel, &self.channels)
                || notice::is_echo(statement.text)
            {
                continue;
            }
            let now = chrono::Utc::now();
            let Statement { channel, speaker, text } = statement;
            if let Some(reply) = session.handle(channel, speaker, text, now) {
                writeln!(out, "{channel}\t{reply}").context("writing notice")?;
                out.flush().context("writing notice")?;
            }
        }
        Ok(())
    }
}

use clap::Args;

use grue::config::Config;

use super::Session;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Don't write the updated history back to disk
    #[arg(long)]
    pub no_save: bool,
    /// Channel the statement was made in
    pub channel: String,
    /// Who made the statement
    pub speaker: String,
    /// Statement text
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub text: Vec<String>,
}

impl CheckArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut session = Session::open(config)?;
        let text = self.text.join(" ");

        let now = chrono::Utc::now();
        if let Some(notice) = session.handle(&self.channel, &self.speaker, &text, now) {
            println!("{notice}");
        }

        if !self.no_save {
            session.checkpoint();
        }
        Ok(())
    }
}

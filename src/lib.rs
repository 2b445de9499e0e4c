//! Grue - notice when a link is posted again in the same channel

pub mod config;
pub mod duration;
pub mod engine;
pub mod error;
pub mod extract;
pub mod history;
pub mod notice;
pub mod store;
pub mod telemetry;

pub use duration::{DurationStyle, format_elapsed};
pub use engine::{ChannelStore, Engine, Sightings};
pub use extract::first_url;
pub use history::{BoundedHistory, UrlRecord};
pub use store::HistoryFile;

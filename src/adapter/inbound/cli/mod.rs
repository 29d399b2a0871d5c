//! CLI module graph.

pub mod command;
pub mod detect;
pub mod dispatch;
pub mod history;
pub mod init;
pub mod output;
pub mod render;
pub mod scrape;
pub mod snapshots;

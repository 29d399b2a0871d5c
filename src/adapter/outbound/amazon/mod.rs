//! Amazon marketplace integration.

pub mod client;
pub mod parse;
pub mod settings;

pub use client::AmazonSource;
pub use settings::AmazonConfig;

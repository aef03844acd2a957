pub mod commands;
pub mod config;
pub mod error;
pub mod journal;
pub mod logging;
pub mod timeline;

use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, ValueEnum, Debug, Default, Serialize, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

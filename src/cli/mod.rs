use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

/// Aggregate a JSON file or directory tree and print it.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// File or directory to scan; `<target>.json` is tried when it is absent
    pub target: PathBuf,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Extra parser to activate (e.g. `yaml`); may be repeated
    #[clap(long = "plugin", short = 'p')]
    pub plugins: Vec<String>,

    /// Print only the value at this dotted path
    #[clap(long, conflicts_with = "alias")]
    pub get: Option<String>,

    /// Print only the value this alias points at
    #[clap(long)]
    pub alias: Option<String>,

    /// Keep the `_info` metadata in the output
    #[clap(long)]
    pub include_info: bool,

    /// Visit directory entries in listing order instead of by name
    #[clap(long)]
    pub unsorted: bool,

    /// Add a content hash to the metadata of every file
    #[clap(long)]
    pub fingerprint: bool,
}

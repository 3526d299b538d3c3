//! Parsers turning the text of one data file into a [`Value`].
//!
//! A [`Plugin`] only understands file contents. Finding the file, reading
//! it and attaching filesystem metadata is the job of
//! [`FileNodeBuilder`](crate::filesystem::FileNodeBuilder), which asks the
//! [`PluginRegistry`] which plugin claims a given path.

mod catalog;
mod json;
mod yaml;

use std::{ffi::OsStr, fmt, path::Path};

use snafu::Snafu;

use crate::value::Value;

pub use catalog::{PluginCatalog, PluginRegistry};
pub use json::JsonPlugin;
pub use yaml::YamlPlugin;

pub trait Plugin: fmt::Debug {
    /// Name under which the plugin is activated through the options.
    fn name(&self) -> &str;

    /// File extensions, without the dot, this plugin claims.
    fn extensions(&self) -> &[&str];

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| {
                self.extensions()
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
    }

    /// Parses a whole document. Blank input yields an empty mapping.
    fn parse(&self, contents: &str) -> Result<Value, ParseError>;
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ParseError {
    #[snafu(display("Invalid JSON document"))]
    Json { source: serde_json::Error },
    #[snafu(display("Invalid YAML document"))]
    Yaml { source: saphyr::ScanError },
    #[snafu(display("{message}"))]
    Custom { message: String },
}

use std::{
    fs, io,
    path::{Path, PathBuf},
    rc::Rc,
};

use snafu::{ResultExt, Snafu};
use tracing::debug;

use super::MetadataProvider;
use crate::ext::BestEffortPathExt;
use crate::plugins::{ParseError, PluginRegistry};
use crate::value::{INFO_KEY, Mapping, Value};

/// Turns a single file into a node using the active plugins.
#[derive(Debug, Clone)]
pub struct FileNodeBuilder {
    registry: PluginRegistry,
    metadata: Rc<dyn MetadataProvider>,
}

impl FileNodeBuilder {
    pub fn new(registry: PluginRegistry, metadata: Rc<dyn MetadataProvider>) -> Self {
        Self { registry, metadata }
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    pub fn metadata(&self) -> &dyn MetadataProvider {
        &*self.metadata
    }

    /// Parses `path` and, when the result is a mapping, merges the file's
    /// metadata under the metadata key.
    pub fn build(&self, path: &Path) -> Result<Value, BuildError> {
        let mut node = self.parse(path)?;
        if let Value::Mapping(map) = &mut node {
            let info = self.metadata.file_info(path).context(MetadataSnafu { path })?;
            merge_info(map, info);
        }
        Ok(node)
    }

    /// Parses `path` with the first plugin that claims it, without metadata.
    /// A file no active plugin claims contributes an empty mapping.
    pub fn parse(&self, path: &Path) -> Result<Value, BuildError> {
        let Some(plugin) = self.registry.select(path) else {
            if !path.exists() {
                return FileNotFoundSnafu { path }.fail();
            }
            debug!("No active plugin for {}, using an empty node", path.display());
            return Ok(Value::empty_mapping());
        };

        debug!("Parsing {} with the {} plugin", path.display(), plugin.name());
        let contents = match fs::read_to_string(path) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return FileNotFoundSnafu { path }.fail();
            }
            read => read.context(ReadSnafu { path })?,
        };

        plugin.parse(&contents).context(MalformedSnafu { path })
    }
}

fn merge_info(map: &mut Mapping, info: Mapping) {
    match map.get_mut(INFO_KEY) {
        Some(existing) => existing.merge_shallow(Value::Mapping(info)),
        None => {
            map.insert(INFO_KEY.to_string(), Value::Mapping(info));
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum BuildError {
    #[snafu(display("File {} does not exist", path.best_effort_path_display()))]
    FileNotFound { path: PathBuf },
    #[snafu(display("Failed to read {}", path.best_effort_path_display()))]
    Read { path: PathBuf, source: io::Error },
    #[snafu(display("Malformed document {}", path.best_effort_path_display()))]
    Malformed { path: PathBuf, source: ParseError },
    #[snafu(display("Failed to read metadata of {}", path.best_effort_path_display()))]
    Metadata { path: PathBuf, source: io::Error },
}

use std::{
    ffi::OsStr,
    fs, io,
    path::{Path, PathBuf},
};

use snafu::{ResultExt, Snafu};
use tracing::{debug, warn};

use super::{BuildError, FileNodeBuilder};
use crate::ext::BestEffortPathExt;
use crate::value::{INFO_KEY, Mapping, Value};

/// File inside a directory whose contents seed the directory's node.
pub const INDEX_FILE: &str = "index.json";

/// Folds a directory tree into one nested [`Value`].
///
/// Each directory becomes a mapping built from its optional index file,
/// plus one key per entry named after the entry with its extension
/// stripped, plus the directory's own metadata under the metadata key.
#[derive(Debug, Clone)]
pub struct Aggregator {
    builder: FileNodeBuilder,
    sort_entries: bool,
}

impl Aggregator {
    pub fn new(builder: FileNodeBuilder, sort_entries: bool) -> Self {
        Self {
            builder,
            sort_entries,
        }
    }

    pub fn builder(&self) -> &FileNodeBuilder {
        &self.builder
    }

    pub fn aggregate(&self, path: &Path) -> Result<Value, AggregateError> {
        if path.is_dir() {
            self.aggregate_directory(path)
        } else {
            Ok(self.builder.build(path)?)
        }
    }

    fn aggregate_directory(&self, dir: &Path) -> Result<Value, AggregateError> {
        debug!("Aggregating directory {}", dir.display());
        let mut node = self.read_index(dir)?;

        let mut info = match node.remove(INFO_KEY) {
            Some(Value::Mapping(info)) => info,
            Some(_) => {
                warn!(
                    "Ignoring non-mapping {} in the index of {}",
                    INFO_KEY,
                    dir.display()
                );
                Mapping::new()
            }
            None => Mapping::new(),
        };

        for entry in self.list_entries(dir)? {
            if entry.file_name() == Some(OsStr::new(INDEX_FILE)) {
                continue;
            }
            let Some(name) = entry.file_stem() else {
                continue;
            };
            let name = name.to_string_lossy().into_owned();
            let child = self.aggregate(&entry)?;
            match node.get_mut(&name) {
                None => {
                    node.insert(name, child);
                }
                Some(existing) if existing.is_mapping() && child.is_mapping() => {
                    existing.merge_shallow(child);
                }
                Some(existing) if existing.as_mapping().is_some_and(|map| map.is_empty()) => {
                    *existing = child;
                }
                Some(_) => return EntryConflictSnafu { path: entry, name }.fail(),
            }
        }

        let own_info = self
            .builder
            .metadata()
            .file_info(dir)
            .context(MetadataSnafu { path: dir })?;
        for (key, value) in own_info {
            info.replace(key, value);
        }
        node.insert(INFO_KEY.to_string(), Value::Mapping(info));

        Ok(Value::Mapping(node))
    }

    /// The index is parsed without file metadata, so the only `_info` it
    /// can contribute is the one written inside it.
    fn read_index(&self, dir: &Path) -> Result<Mapping, AggregateError> {
        let index_path = dir.join(INDEX_FILE);
        match self.builder.parse(&index_path) {
            Ok(Value::Mapping(map)) => Ok(map),
            Ok(_) => IndexNotMappingSnafu { path: index_path }.fail(),
            Err(BuildError::FileNotFound { .. }) => {
                debug!("No index file in {}", dir.display());
                Ok(Mapping::new())
            }
            Err(source) => Err(AggregateError::Build { source }),
        }
    }

    fn list_entries(&self, dir: &Path) -> Result<Vec<PathBuf>, AggregateError> {
        let mut entries = fs::read_dir(dir)
            .and_then(|read_dir| {
                read_dir
                    .map(|entry| entry.map(|entry| entry.path()))
                    .collect::<io::Result<Vec<_>>>()
            })
            .context(ListDirectorySnafu { path: dir })?;
        if self.sort_entries {
            entries.sort();
        }
        Ok(entries)
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum AggregateError {
    #[snafu(display("Failed to build a file node"), context(false))]
    Build { source: BuildError },
    #[snafu(display("Failed to list directory {}", path.best_effort_path_display()))]
    ListDirectory { path: PathBuf, source: io::Error },
    #[snafu(display("Index file {} must hold a mapping", path.best_effort_path_display()))]
    IndexNotMapping { path: PathBuf },
    #[snafu(display(
        "{} cannot be merged into the existing '{}' entry",
        path.best_effort_path_display(),
        name
    ))]
    EntryConflict { path: PathBuf, name: String },
    #[snafu(display("Failed to read metadata of {}", path.best_effort_path_display()))]
    Metadata { path: PathBuf, source: io::Error },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::FilesystemMetadata;
    use crate::filesystem::builder::tests::builder;
    use crate::options::Options;
    use crate::plugins::PluginCatalog;
    use serde_json::json;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(path, contents).expect("Failed to write file");
    }

    fn aggregator(options: &Options) -> Aggregator {
        Aggregator::new(builder(options), options.sort_entries)
    }

    #[test]
    fn single_file_is_returned_as_built() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        write(dir.path(), "doc.json", r#"["a", "b"]"#);

        let value = aggregator(&Options::default())
            .aggregate(&dir.path().join("doc.json"))
            .expect("Failed to aggregate");
        assert_eq!(value, Value::from(json!(["a", "b"])));
    }

    #[test]
    fn directory_merges_index_children_and_info() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        write(
            dir.path(),
            "index.json",
            r#"{"title": "root", "users": {"count": 2}, "_info": {"owner": "ops"}}"#,
        );
        write(dir.path(), "users.json", r#"{"alice": 1}"#);
        write(dir.path(), "config/db.json", r#"{"host": "localhost"}"#);

        let value = aggregator(&Options::default())
            .aggregate(dir.path())
            .expect("Failed to aggregate");

        let root_name = dir.path().file_name().unwrap().to_string_lossy().into_owned();
        assert_eq!(
            value,
            Value::from(json!({
                "title": "root",
                "users": {"count": 2, "alice": 1, "_info": {"name": "users.json"}},
                "config": {
                    "db": {"host": "localhost", "_info": {"name": "db.json"}},
                    "_info": {"name": "config"},
                },
                "_info": {"owner": "ops", "name": root_name},
            }))
        );
    }

    #[test]
    fn missing_index_starts_empty() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        write(dir.path(), "b.json", r#"{"v": 2}"#);
        write(dir.path(), "a.json", r#"{"v": 1}"#);

        let value = aggregator(&Options::default())
            .aggregate(dir.path())
            .expect("Failed to aggregate");
        let keys: Vec<_> = value.as_mapping().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b", INFO_KEY]);
    }

    #[test]
    fn sequence_file_replaces_placeholder() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        write(dir.path(), "list.json", r#"[1, 2, 3]"#);

        let value = aggregator(&Options::default())
            .aggregate(dir.path())
            .expect("Failed to aggregate");
        assert_eq!(value.get_path("list.2"), Some(&Value::from(3i64)));
    }

    #[test]
    fn file_and_directory_with_same_stem_merge() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        write(dir.path(), "part.json", r#"{"from_file": true}"#);
        write(dir.path(), "part/inner.json", r#"{"x": 1}"#);

        let value = aggregator(&Options::default())
            .aggregate(dir.path())
            .expect("Failed to aggregate");
        assert_eq!(value.get_path("part.from_file"), Some(&Value::from(true)));
        assert_eq!(value.get_path("part.inner.x"), Some(&Value::from(1i64)));
    }

    #[test]
    fn sequence_file_cannot_replace_a_directory() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        write(dir.path(), "x.json", r#"[1, 2]"#);
        write(dir.path(), "x/inner.json", r#"{"kept": true}"#);

        let result = aggregator(&Options::default()).aggregate(dir.path());
        assert!(matches!(
            result,
            Err(AggregateError::EntryConflict { ref name, .. }) if name == "x"
        ));
    }

    #[test]
    fn index_scalar_cannot_absorb_a_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        write(dir.path(), "index.json", r#"{"limits": 5}"#);
        write(dir.path(), "limits.json", r#"{"max": 10}"#);

        let result = aggregator(&Options::default()).aggregate(dir.path());
        assert!(matches!(result, Err(AggregateError::EntryConflict { .. })));
    }

    #[test]
    fn empty_index_entry_is_replaced_by_sequence() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        write(dir.path(), "index.json", r#"{"list": {}}"#);
        write(dir.path(), "list.json", r#"[1, 2]"#);

        let value = aggregator(&Options::default())
            .aggregate(dir.path())
            .expect("Failed to aggregate");
        assert_eq!(value.get_path("list"), Some(&Value::from(json!([1, 2]))));
    }

    #[test]
    fn directory_info_has_no_index_fingerprint() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        write(dir.path(), "index.json", r#"{"_info": {"owner": "ops"}}"#);
        write(dir.path(), "doc.json", r#"{"a": 1}"#);

        let options = Options::default().with_fingerprint(true);
        let builder = FileNodeBuilder::new(
            PluginCatalog::default().resolve(&options),
            Rc::new(FilesystemMetadata::new(true)),
        );
        let value = Aggregator::new(builder, true)
            .aggregate(dir.path())
            .expect("Failed to aggregate");

        assert_eq!(value.get_path("_info.type"), Some(&Value::from("directory")));
        assert_eq!(value.get_path("_info.owner"), Some(&Value::from("ops")));
        assert_eq!(value.get_path("_info.fingerprint"), None);
        assert!(value.get_path("doc._info.fingerprint").is_some());
    }

    #[test]
    fn unclaimed_files_still_get_a_key() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        write(dir.path(), "README.md", "# notes");

        let value = aggregator(&Options::default())
            .aggregate(dir.path())
            .expect("Failed to aggregate");
        assert_eq!(value.get_path("README"), Some(&Value::empty_mapping()));
    }

    #[test]
    fn index_that_is_not_a_mapping_fails() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        write(dir.path(), "index.json", r#"[1]"#);

        let result = aggregator(&Options::default()).aggregate(dir.path());
        assert!(matches!(result, Err(AggregateError::IndexNotMapping { .. })));
    }

    #[test]
    fn malformed_child_propagates() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        write(dir.path(), "good.json", r#"{"ok": true}"#);
        write(dir.path(), "sub/bad.json", "{oops");

        let result = aggregator(&Options::default()).aggregate(dir.path());
        assert!(matches!(
            result,
            Err(AggregateError::Build {
                source: BuildError::Malformed { .. }
            })
        ));
    }

    #[test]
    fn malformed_index_propagates() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        write(dir.path(), "index.json", "{oops");

        let result = aggregator(&Options::default()).aggregate(dir.path());
        assert!(matches!(result, Err(AggregateError::Build { .. })));
    }

    #[test]
    fn missing_path_is_file_not_found() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let result = aggregator(&Options::default()).aggregate(&dir.path().join("absent.json"));
        assert!(matches!(
            result,
            Err(AggregateError::Build {
                source: BuildError::FileNotFound { .. }
            })
        ));
    }
}

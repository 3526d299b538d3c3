use std::{fmt, fs, hash::Hasher, io, path::Path};

use metrohash::MetroHash64;
use tracing::debug;

use crate::ext::SystemTimeExt;
use crate::value::{Mapping, Value};

/// Supplies the scalar facts stored under a node's metadata key.
pub trait MetadataProvider: fmt::Debug {
    fn file_info(&self, path: &Path) -> io::Result<Mapping>;
}

/// Reads metadata straight from the filesystem.
///
/// Timestamps are seconds since the Unix epoch. A timestamp the platform
/// cannot report is left out rather than guessed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilesystemMetadata {
    /// Hash the contents of regular files into a `fingerprint` field.
    pub fingerprint: bool,
}

impl FilesystemMetadata {
    pub fn new(fingerprint: bool) -> Self {
        Self { fingerprint }
    }
}

impl MetadataProvider for FilesystemMetadata {
    fn file_info(&self, path: &Path) -> io::Result<Mapping> {
        let metadata = fs::metadata(path)?;
        let mut info = Mapping::new();

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        info.insert("name".to_string(), name.into());
        info.insert("path".to_string(), path.display().to_string().into());
        info.insert("type".to_string(), entry_type(&metadata).into());
        info.insert("size".to_string(), Value::Scalar(metadata.len().into()));

        let timestamps = [
            ("modified", metadata.modified()),
            ("accessed", metadata.accessed()),
            ("created", metadata.created()),
        ];
        for (key, time) in timestamps {
            match time {
                Ok(time) => {
                    info.insert(key.to_string(), time.to_unix_seconds().into());
                }
                Err(err) => debug!("No {} time for {}: {}", key, path.display(), err),
            }
        }

        if self.fingerprint && metadata.is_file() {
            info.insert(
                "fingerprint".to_string(),
                format!("{:016x}", fingerprint(path)?).into(),
            );
        }

        Ok(info)
    }
}

fn entry_type(metadata: &fs::Metadata) -> &'static str {
    if metadata.is_dir() {
        "directory"
    } else if metadata.is_file() {
        "file"
    } else {
        "other"
    }
}

/// MetroHash64 of the whole file contents.
pub fn fingerprint(path: &Path) -> io::Result<u64> {
    let bytes = fs::read(path)?;
    let mut hasher = MetroHash64::default();
    hasher.write(&bytes);
    Ok(hasher.finish())
}

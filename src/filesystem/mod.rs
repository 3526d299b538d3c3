//! Reading a file or directory tree into a single [`Value`](crate::Value).
//!
//! [`FileNodeBuilder`] handles one file, [`Aggregator`] walks directories
//! and merges the per-file nodes, and [`MetadataProvider`] supplies the
//! filesystem facts kept under each node's metadata key.

mod aggregator;
mod builder;
mod metadata;

pub use aggregator::{AggregateError, Aggregator, INDEX_FILE};
pub use builder::{BuildError, FileNodeBuilder};
pub use metadata::{FilesystemMetadata, MetadataProvider, fingerprint};

//! Aggregates a tree of JSON documents into one ordered, navigable value.
//!
//! A directory becomes a mapping holding its `index.json` contents plus one
//! key per entry (file name without extension); a file becomes whatever its
//! parser produces. The result can be queried by dotted path or by alias,
//! dumped as indented text, and deep-copied.
//!
//! ```no_run
//! use djson::{DJson, Options};
//!
//! let data = DJson::new("config", Options::default())?;
//! if let Some(host) = data.get_value("database.host") {
//!     print!("{}", djson::Dumper::default().dump(host));
//! }
//! # Ok::<(), djson::AggregateError>(())
//! ```

pub mod aliases;
pub mod container;
pub mod ext;
pub mod filesystem;
pub mod options;
pub mod plugins;
pub mod value;

pub use crate::aliases::AliasTable;
pub use crate::container::DJson;
pub use crate::filesystem::{AggregateError, BuildError, MetadataProvider};
pub use crate::options::Options;
pub use crate::plugins::{ParseError, Plugin, PluginCatalog, PluginRegistry};
pub use crate::value::{Copier, Dumper, Mapping, Scalar, TraversalPolicy, Value};

//! Named shortcuts to dotted paths, read from the root `_aliases` key.
//!
//! ```json
//! {"_aliases": {"host": "config.db.host", "users": {"admin": "0"}}}
//! ```
//!
//! A nested mapping is an alias group: its entries stay addressable by
//! their own names while their paths are prefixed with the group name, so
//! `admin` above resolves to `users.0`.

use hashlink::LinkedHashMap;
use tracing::warn;

use crate::value::{ALIASES_KEY, Mapping, Navigator, Value};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    paths: LinkedHashMap<String, String>,
}

impl AliasTable {
    /// Builds the table from the alias key of `root`. A root without one,
    /// or whose alias key is not a mapping, gives an empty table.
    pub fn from_root(root: &Value) -> Self {
        let mut table = Self::default();
        match root.as_mapping().and_then(|map| map.get(ALIASES_KEY)) {
            Some(Value::Mapping(aliases)) => table.add_group(aliases, ""),
            Some(_) => warn!("Ignoring {} because it is not a mapping", ALIASES_KEY),
            None => {}
        }
        table
    }

    fn add_group(&mut self, aliases: &Mapping, prefix: &str) {
        for (name, target) in aliases {
            match target {
                Value::Mapping(group) => self.add_group(group, &join(prefix, name)),
                _ => match target.as_str() {
                    Some(path) => {
                        self.paths.replace(name.clone(), join(prefix, path));
                    }
                    None => warn!("Skipping alias '{}': target is not a path", name),
                },
            }
        }
    }

    /// The dotted path an alias stands for.
    pub fn path(&self, name: &str) -> Option<&str> {
        self.paths.get(name).map(String::as_str)
    }

    pub fn resolve<'a>(&self, name: &str, root: &'a Value) -> Option<&'a Value> {
        self.path(name).and_then(|path| Navigator::new(root).get(path))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.paths
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_str()))
    }
}

fn join(prefix: &str, path: &str) -> String {
    if prefix.is_empty() {
        path.to_string()
    } else {
        format!("{prefix}.{path}")
    }
}

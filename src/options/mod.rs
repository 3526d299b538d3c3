//! Settings consumed when a [`DJson`](crate::DJson) container is built.

/// Name of the parser that every container activates.
pub const BASE_PLUGIN: &str = "json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Parsers to activate in addition to [`BASE_PLUGIN`], in priority order.
    pub plugins: Vec<String>,
    /// Visit directory entries in file name order rather than listing order.
    pub sort_entries: bool,
    /// Add a content hash to the metadata of every regular file.
    pub fingerprint: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            plugins: Vec::new(),
            sort_entries: true,
            fingerprint: false,
        }
    }
}

impl Options {
    pub fn with_plugin(mut self, name: impl Into<String>) -> Self {
        self.plugins.push(name.into());
        self
    }

    pub fn with_sort_entries(mut self, sort_entries: bool) -> Self {
        self.sort_entries = sort_entries;
        self
    }

    pub fn with_fingerprint(mut self, fingerprint: bool) -> Self {
        self.fingerprint = fingerprint;
        self
    }

    /// The base parser followed by the configured ones, duplicates removed.
    pub fn plugin_names(&self) -> Vec<&str> {
        std::iter::once(BASE_PLUGIN)
            .chain(self.plugins.iter().map(String::as_str))
            .fold(Vec::new(), |mut names, name| {
                if !names.contains(&name) {
                    names.push(name);
                }
                names
            })
    }
}

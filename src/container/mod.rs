//! The top-level container tying aggregation, aliases and lookups together.

use std::{
    fmt,
    path::{Path, PathBuf},
    rc::Rc,
};

use tracing::{debug, info};

use crate::aliases::AliasTable;
use crate::filesystem::{AggregateError, Aggregator, FileNodeBuilder, FilesystemMetadata};
use crate::options::Options;
use crate::plugins::{PluginCatalog, PluginRegistry};
use crate::value::{Copier, Dumper, Navigator, TraversalPolicy, Value};

/// An aggregated view of a file or directory tree.
///
/// The root structure is owned by the container and only ever replaced as
/// a whole: by [`refresh`](Self::refresh), [`clear`](Self::clear),
/// [`load_dict`](Self::load_dict) or [`copy_from`](Self::copy_from). The
/// alias table is rebuilt every time that happens.
#[derive(Debug, Clone)]
pub struct DJson {
    options: Options,
    catalog: PluginCatalog,
    aggregator: Aggregator,
    structure: Value,
    aliases: AliasTable,
}

impl DJson {
    /// A container with an empty structure.
    pub fn empty(options: Options) -> Self {
        Self::empty_with_catalog(options, PluginCatalog::default())
    }

    fn empty_with_catalog(options: Options, catalog: PluginCatalog) -> Self {
        let aggregator = Self::aggregator_for(&options, &catalog);
        Self {
            options,
            catalog,
            aggregator,
            structure: Value::empty_mapping(),
            aliases: AliasTable::default(),
        }
    }

    /// Scans `target` with the default plugin catalog. An empty target
    /// leaves the structure empty.
    pub fn new(target: impl AsRef<Path>, options: Options) -> Result<Self, AggregateError> {
        Self::with_catalog(target, options, PluginCatalog::default())
    }

    pub fn with_catalog(
        target: impl AsRef<Path>,
        options: Options,
        catalog: PluginCatalog,
    ) -> Result<Self, AggregateError> {
        let mut djson = Self::empty_with_catalog(options, catalog);
        let target = target.as_ref();
        if !target.as_os_str().is_empty() {
            djson.scan(target)?;
        }
        Ok(djson)
    }

    fn aggregator_for(options: &Options, catalog: &PluginCatalog) -> Aggregator {
        let registry = catalog.resolve(options);
        debug!("Active plugins: {:?}", registry.names());
        let metadata = Rc::new(FilesystemMetadata::new(options.fingerprint));
        Aggregator::new(FileNodeBuilder::new(registry, metadata), options.sort_entries)
    }

    /// `target` itself, or `<target>.json` when only that exists.
    fn locate(target: &Path) -> Option<PathBuf> {
        if target.exists() {
            return Some(target.to_path_buf());
        }
        let mut with_extension = target.as_os_str().to_owned();
        with_extension.push(".json");
        let with_extension = PathBuf::from(with_extension);
        with_extension.exists().then_some(with_extension)
    }

    fn scan(&mut self, target: &Path) -> Result<(), AggregateError> {
        let Some(path) = Self::locate(target) else {
            info!("Nothing to scan at {}", target.display());
            return Ok(());
        };
        let structure = self.aggregator.aggregate(&path)?;
        info!("Scanned {}", path.display());
        self.replace_structure(structure);
        Ok(())
    }

    fn replace_structure(&mut self, structure: Value) {
        self.aliases = AliasTable::from_root(&structure);
        self.structure = structure;
    }

    /// Drops the current structure and scans `target` again.
    ///
    /// On failure the container is left empty.
    pub fn refresh(&mut self, target: impl AsRef<Path>) -> Result<(), AggregateError> {
        self.clear();
        self.scan(target.as_ref())
    }

    pub fn clear(&mut self) {
        self.structure = Value::empty_mapping();
        self.aliases = AliasTable::default();
    }

    /// Value at a dotted path; `""` is the whole structure.
    pub fn get_value(&self, path: &str) -> Option<&Value> {
        Navigator::new(&self.structure).get(path)
    }

    /// Value an alias points at. Unknown aliases give `None`.
    pub fn alias(&self, name: &str) -> Option<&Value> {
        self.aliases.resolve(name, &self.structure)
    }

    /// Dump of the structure without metadata.
    pub fn dump(&self) -> String {
        self.dump_with(TraversalPolicy::default())
    }

    pub fn dump_with(&self, policy: TraversalPolicy) -> String {
        Dumper::new(policy).dump(&self.structure)
    }

    /// Independent copy of the structure.
    pub fn to_dict(&self, exclude_info: bool) -> Value {
        Copier::new(TraversalPolicy { exclude_info }).copy(&self.structure)
    }

    /// Adopts a copy of `data` as the structure, bypassing aggregation.
    ///
    /// This is the `from_dict` operation; it works on an existing container
    /// so the options and plugins stay in place.
    #[doc(alias = "from_dict")]
    pub fn load_dict(&mut self, data: &Value) -> &mut Self {
        self.replace_structure(data.clone());
        self
    }

    /// Takes over the options, plugins and a full copy of the structure of
    /// `other`.
    pub fn copy_from(&mut self, other: &DJson) -> &mut Self {
        self.options = other.options.clone();
        self.catalog = other.catalog.clone();
        self.aggregator = Self::aggregator_for(&self.options, &self.catalog);
        let structure = Copier::new(TraversalPolicy::including_info()).copy(&other.structure);
        self.replace_structure(structure);
        self
    }

    pub fn structure(&self) -> &Value {
        &self.structure
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn plugins(&self) -> &PluginRegistry {
        self.aggregator.builder().registry()
    }
}

impl Default for DJson {
    fn default() -> Self {
        Self::empty(Options::default())
    }
}

impl fmt::Display for DJson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}

use std::{path::Path, rc::Rc};

use hashlink::LinkedHashMap;
use tracing::debug;

use super::{JsonPlugin, Plugin, YamlPlugin};
use crate::options::Options;

/// Every plugin a container may activate, keyed by plugin name.
#[derive(Debug, Clone)]
pub struct PluginCatalog {
    known: LinkedHashMap<String, Rc<dyn Plugin>>,
}

impl Default for PluginCatalog {
    fn default() -> Self {
        Self::empty().with(JsonPlugin).with(YamlPlugin)
    }
}

impl PluginCatalog {
    pub fn empty() -> Self {
        Self {
            known: LinkedHashMap::new(),
        }
    }

    /// Adds a plugin, replacing any plugin already known under its name.
    pub fn with(mut self, plugin: impl Plugin + 'static) -> Self {
        self.register(Rc::new(plugin));
        self
    }

    pub fn register(&mut self, plugin: Rc<dyn Plugin>) {
        self.known.replace(plugin.name().to_string(), plugin);
    }

    pub fn get(&self, name: &str) -> Option<Rc<dyn Plugin>> {
        self.known.get(name).cloned()
    }

    /// Activates the base plugin and every configured plugin this catalog
    /// knows. Unknown names are skipped.
    pub fn resolve(&self, options: &Options) -> PluginRegistry {
        let plugins = options
            .plugin_names()
            .into_iter()
            .filter_map(|name| {
                let plugin = self.get(name);
                if plugin.is_none() {
                    debug!("Skipping unknown plugin '{}'", name);
                }
                plugin
            })
            .collect();
        PluginRegistry { plugins }
    }
}

/// The plugins active for one container, in the order they are tried.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    plugins: Vec<Rc<dyn Plugin>>,
}

impl PluginRegistry {
    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|plugin| plugin.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// First active plugin claiming `path`.
    pub fn select(&self, path: &Path) -> Option<&dyn Plugin> {
        self.plugins
            .iter()
            .find(|plugin| plugin.accepts(path))
            .map(|plugin| &**plugin)
    }
}

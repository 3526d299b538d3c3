use saphyr::{LoadableYamlNode, Scalar as YamlScalar, Yaml};
use snafu::ResultExt;
use tracing::{debug, warn};

use super::{ParseError, Plugin, YamlSnafu};
use crate::value::{Scalar, Value};

/// Optional parser for YAML documents, activated as `yaml`.
///
/// Only the first document of a multi-document stream is used. Scalar keys
/// are stringified; mappings or sequences used as keys are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlPlugin;

impl Plugin for YamlPlugin {
    fn name(&self) -> &str {
        "yaml"
    }

    fn extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }

    fn parse(&self, contents: &str) -> Result<Value, ParseError> {
        let documents = Yaml::load_from_str(contents).context(YamlSnafu)?;
        if documents.len() > 1 {
            debug!("Ignoring {} trailing YAML documents", documents.len() - 1);
        }
        Ok(documents
            .first()
            .map(convert_node)
            .unwrap_or_else(Value::empty_mapping))
    }
}

fn convert_node(node: &Yaml<'_>) -> Value {
    match node {
        Yaml::Value(scalar) => Value::Scalar(convert_scalar(scalar)),
        Yaml::Sequence(items) => Value::Sequence(items.iter().map(convert_node).collect()),
        Yaml::Mapping(map) => Value::Mapping(
            map.iter()
                .filter_map(|(key, value)| match key {
                    Yaml::Value(scalar) => {
                        Some((convert_scalar(scalar).to_string(), convert_node(value)))
                    }
                    _ => {
                        warn!("Skipping YAML mapping entry with a non-scalar key");
                        None
                    }
                })
                .collect(),
        ),
        other => {
            debug!("Unsupported YAML node {other:?}, using null");
            Value::null()
        }
    }
}

fn convert_scalar(scalar: &YamlScalar<'_>) -> Scalar {
    match scalar {
        YamlScalar::Null => Scalar::Null,
        YamlScalar::Boolean(b) => Scalar::Bool(*b),
        YamlScalar::Integer(i) => Scalar::Integer(*i),
        YamlScalar::FloatingPoint(f) => Scalar::Float(f.into_inner()),
        YamlScalar::String(s) => Scalar::String(s.to_string()),
    }
}

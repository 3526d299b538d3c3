use super::{INFO_KEY, Mapping, Value};

const INDENT: &str = ". ";

/// Which keys a traversal visits. Shared by [`Copier`] and [`Dumper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalPolicy {
    /// Skip the metadata key at every mapping level.
    pub exclude_info: bool,
}

impl Default for TraversalPolicy {
    fn default() -> Self {
        Self { exclude_info: true }
    }
}

impl TraversalPolicy {
    pub fn including_info() -> Self {
        Self {
            exclude_info: false,
        }
    }

    pub fn excluding_info() -> Self {
        Self::default()
    }

    fn entries<'a>(&self, map: &'a Mapping) -> impl Iterator<Item = (&'a String, &'a Value)> {
        let exclude_info = self.exclude_info;
        map.iter()
            .filter(move |(key, _)| !(exclude_info && key.as_str() == INFO_KEY))
    }
}

/// Produces independent deep copies of a tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct Copier {
    policy: TraversalPolicy,
}

impl Copier {
    pub fn new(policy: TraversalPolicy) -> Self {
        Self { policy }
    }

    pub fn copy(&self, node: &Value) -> Value {
        match node {
            Value::Mapping(map) => Value::Mapping(
                self.policy
                    .entries(map)
                    .map(|(key, value)| (key.clone(), self.copy(value)))
                    .collect(),
            ),
            Value::Sequence(items) => {
                Value::Sequence(items.iter().map(|item| self.copy(item)).collect())
            }
            Value::Scalar(scalar) => Value::Scalar(scalar.clone()),
        }
    }
}

/// Renders a tree as indented `key: value` lines.
///
/// Every nesting level adds one `". "` to the indentation. Mapping entries
/// are labelled with their key, sequence elements with `#<index>`, and a
/// container line ends right after its `": "` separator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dumper {
    policy: TraversalPolicy,
}

impl Dumper {
    pub fn new(policy: TraversalPolicy) -> Self {
        Self { policy }
    }

    pub fn dump(&self, node: &Value) -> String {
        let mut out = String::new();
        self.dump_node(&mut out, node, "", "");
        out
    }

    fn dump_node(&self, out: &mut String, node: &Value, key: &str, indent: &str) {
        match node {
            Value::Scalar(scalar) => {
                out.push_str(indent);
                if !key.is_empty() {
                    out.push_str(key);
                    out.push_str(": ");
                }
                out.push_str(&scalar.to_string());
                out.push('\n');
            }
            Value::Sequence(items) => {
                Self::header(out, key, indent);
                let child_indent = format!("{indent}{INDENT}");
                for (index, item) in items.iter().enumerate() {
                    self.dump_node(out, item, &format!("#{index}"), &child_indent);
                }
            }
            Value::Mapping(map) => {
                Self::header(out, key, indent);
                let child_indent = format!("{indent}{INDENT}");
                for (name, value) in self.policy.entries(map) {
                    self.dump_node(out, value, name, &child_indent);
                }
            }
        }
    }

    fn header(out: &mut String, key: &str, indent: &str) {
        if !key.is_empty() {
            out.push_str(indent);
            out.push_str(key);
            out.push_str(": \n");
        }
    }
}

use super::Value;

/// Splits a dotted path into its segments. The empty path has no segments.
pub fn split_path(path: &str) -> Vec<&str> {
    if path.is_empty() {
        Vec::new()
    } else {
        path.split('.').collect()
    }
}

/// Read-only walker resolving dotted paths against a tree.
///
/// Mappings are entered by key and sequences by non-negative index. Any
/// segment that cannot be followed ends the walk with `None`; a miss is an
/// ordinary outcome and never an error.
#[derive(Debug, Clone, Copy)]
pub struct Navigator<'a> {
    root: &'a Value,
}

impl<'a> Navigator<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root }
    }

    pub fn get(&self, path: &str) -> Option<&'a Value> {
        self.get_segments(&split_path(path))
    }

    pub fn get_segments(&self, segments: &[&str]) -> Option<&'a Value> {
        segments
            .iter()
            .try_fold(self.root, |node, segment| Self::step(node, segment))
    }

    fn step(node: &'a Value, segment: &str) -> Option<&'a Value> {
        match node {
            Value::Mapping(map) => map.get(segment),
            Value::Sequence(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index)),
            Value::Scalar(_) => None,
        }
    }
}

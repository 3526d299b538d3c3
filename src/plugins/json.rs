use snafu::ResultExt;

use super::{JsonSnafu, ParseError, Plugin};
use crate::value::Value;

/// The base parser. Object key order from the file is preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPlugin;

impl Plugin for JsonPlugin {
    fn name(&self) -> &str {
        "json"
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn parse(&self, contents: &str) -> Result<Value, ParseError> {
        if contents.trim().is_empty() {
            return Ok(Value::empty_mapping());
        }
        let parsed: serde_json::Value = serde_json::from_str(contents).context(JsonSnafu)?;
        Ok(parsed.into())
    }
}

use djson::{AggregateError, DJson, Dumper, TraversalPolicy};
use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, warn};

use crate::application::{Query, RuntimeConfig};

pub struct Application;

impl Application {
    pub fn run(config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        print!("{}", Self::render(config)?);
        Ok(())
    }

    /// Scans the target and renders the requested part of it.
    ///
    /// A path or alias that resolves to nothing renders as an empty string.
    pub fn render(config: impl Into<RuntimeConfig>) -> Result<String, ApplicationError> {
        let config: RuntimeConfig = config.into();
        debug!("Runtime config: {:?}", config);

        let djson = DJson::new(&config.target, config.options.clone()).context(ScanSnafu)?;
        let policy = TraversalPolicy {
            exclude_info: !config.include_info,
        };

        let node = match &config.query {
            Query::Everything => return Ok(djson.dump_with(policy)),
            Query::Path(path) => djson.get_value(path),
            Query::Alias(name) => djson.alias(name),
        };

        match node {
            Some(node) => Ok(Dumper::new(policy).dump(node)),
            None => {
                warn!("No value for {:?}", config.query);
                Ok(String::new())
            }
        }
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Failed to scan the target"))]
    ScanError { source: AggregateError },
}

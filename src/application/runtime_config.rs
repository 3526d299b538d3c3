use std::path::PathBuf;

use djson::Options;

use crate::cli::Cli;

/// What part of the aggregated structure to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Everything,
    Path(String),
    Alias(String),
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub target: PathBuf,
    pub options: Options,
    pub query: Query,
    pub include_info: bool,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        let query = match (cli.get, cli.alias) {
            (Some(path), _) => Query::Path(path),
            (None, Some(name)) => Query::Alias(name),
            (None, None) => Query::Everything,
        };
        let options = cli
            .plugins
            .into_iter()
            .fold(Options::default(), Options::with_plugin)
            .with_sort_entries(!cli.unsorted)
            .with_fingerprint(cli.fingerprint);

        Self {
            target: cli.target,
            options,
            query,
            include_info: cli.include_info,
        }
    }
}

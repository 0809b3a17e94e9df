//! Route file loading.
//!
//! Each non-blank, non-comment line is
//! `<upstream-url> <hostname> [<hostname> ...] [# comment]`.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use url::Url;

use crate::routing::matcher::{normalize_host, normalize_name};
use crate::routing::RouteTable;

/// Fatal error while loading the route file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not read config: {0}")]
    Read(#[from] io::Error),
}

/// Non-fatal problem with a single line. Line numbers start at 1.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigWarning {
    #[error("ignoring invalid line {line} (insufficient fields)")]
    InsufficientFields { line: usize },

    #[error("ignoring invalid line {line} (invalid url)")]
    InvalidUrl { line: usize },

    #[error("ignoring hostname '{host}' on line {line} (can never match a request host)")]
    InvalidHost { line: usize, host: String },

    #[error("hostname '{host}' was assigned multiple upstreams, using {upstream} from line {line}")]
    DuplicateHost {
        line: usize,
        host: String,
        upstream: Url,
    },
}

impl ConfigWarning {
    pub fn line(&self) -> usize {
        match self {
            ConfigWarning::InsufficientFields { line }
            | ConfigWarning::InvalidUrl { line }
            | ConfigWarning::InvalidHost { line, .. }
            | ConfigWarning::DuplicateHost { line, .. } => *line,
        }
    }
}

/// Result of parsing a route source.
#[derive(Debug, Clone, Default)]
pub struct LoadedRoutes {
    pub table: RouteTable,
    pub warnings: Vec<ConfigWarning>,
}

/// Parse route lines from `reader`.
///
/// Malformed lines are skipped and reported in [`LoadedRoutes::warnings`];
/// only a failure of the reader itself aborts the load.
pub fn parse_routes<R: BufRead>(reader: R) -> Result<LoadedRoutes, ConfigError> {
    let mut loaded = LoadedRoutes::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 2 {
            loaded
                .warnings
                .push(ConfigWarning::InsufficientFields { line: line_no });
            continue;
        }

        let Some(upstream) = parse_upstream(fields[0]) else {
            loaded.warnings.push(ConfigWarning::InvalidUrl { line: line_no });
            continue;
        };

        for token in fields[1..].iter().take_while(|f| !f.starts_with('#')) {
            let host = normalize_name(token);
            // Request hosts lose their port before matching, so a key that
            // still differs after the same treatment is unreachable.
            if host.is_empty() || normalize_host(&host) != host {
                loaded.warnings.push(ConfigWarning::InvalidHost {
                    line: line_no,
                    host: token.to_string(),
                });
                continue;
            }
            if loaded.table.contains(&host) {
                loaded.warnings.push(ConfigWarning::DuplicateHost {
                    line: line_no,
                    host: host.clone(),
                    upstream: upstream.clone(),
                });
            }
            loaded.table.insert(host, upstream.clone());
        }
    }

    Ok(loaded)
}

/// Parse an upstream URL; it must carry both a scheme and a host.
fn parse_upstream(raw: &str) -> Option<Url> {
    let url = Url::parse(raw).ok()?;
    match url.host_str() {
        Some(host) if !host.is_empty() && !url.scheme().is_empty() => Some(url),
        _ => None,
    }
}

/// Load the route table from `path`, logging every line warning.
pub fn load_routes(path: &Path) -> Result<RouteTable, ConfigError> {
    let file = File::open(path).map_err(|source| ConfigError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let loaded = parse_routes(BufReader::new(file))?;

    for warning in &loaded.warnings {
        tracing::warn!(
            file = %path.display(),
            line = warning.line(),
            "{}",
            warning
        );
    }

    tracing::info!(
        file = %path.display(),
        routes = loaded.table.len(),
        warnings = loaded.warnings.len(),
        "Routes loaded"
    );

    Ok(loaded.table)
}

//! `xgraph.toml` configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use xgraph_codec::CodecOptions;

/// File name searched for in the working directory and its ancestors.
pub const CONFIG_FILE: &str = "xgraph.toml";

/// Output file used when neither the command line nor the config names one.
pub const DEFAULT_OUTPUT: &str = "data.bin";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct XGraphConfig {
    /// Codec options (byte order).
    #[serde(default)]
    pub codec: CodecOptions,
    /// Output settings for commands that write blobs.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default blob path, relative to the config file's directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl XGraphConfig {
    /// Search upward from `start_dir` for `xgraph.toml`, returning the parsed
    /// config and the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let config: XGraphConfig = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((config, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a config from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing xgraph.toml")
    }

    /// Resolve the output path: explicit flag, then config, then `data.bin`
    /// in the working directory.
    pub fn output_path(&self, explicit: Option<&Path>, config_dir: Option<&Path>, cwd: &Path) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        match (&self.output.path, config_dir) {
            (Some(path), Some(dir)) => dir.join(path),
            (Some(path), None) => cwd.join(path),
            (None, _) => cwd.join(DEFAULT_OUTPUT),
        }
    }
}

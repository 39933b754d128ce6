//! `xgraph encode`: JSON tree description to blob.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use xgraph_codec::{CodecOptions, Encoder};
use xgraph_core::Node;

/// Read a JSON tree from `input` and write its encoding to `output`.
pub fn run(input: &Path, output: &Path, options: CodecOptions) -> Result<()> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let tree: Node = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", input.display()))?;

    let len = write_tree(&tree, output, options)?;
    println!(
        "Encoded {} nodes, {} goals into {} ({len} bytes)",
        tree.node_count(),
        tree.goal_count(),
        output.display()
    );
    Ok(())
}

/// Encode `tree` and write the blob, returning its length.
pub(crate) fn write_tree(tree: &Node, output: &Path, options: CodecOptions) -> Result<usize> {
    let bytes = Encoder::with_options(options)
        .encode(tree)
        .context("encoding tree")?;
    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    fs::write(output, &bytes).with_context(|| format!("writing {}", output.display()))?;
    info!(path = %output.display(), len = bytes.len(), "wrote blob");
    Ok(bytes.len())
}

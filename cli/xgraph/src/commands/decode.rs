//! `xgraph decode`: print the tree stored in a blob.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use xgraph_codec::{CodecOptions, Decoder};
use xgraph_core::Node;

/// Decode `input` and print it as an outline, or as pretty JSON.
pub fn run(input: &Path, json: bool, options: CodecOptions) -> Result<()> {
    let tree = load(input, options)?;
    if json {
        let text = serde_json::to_string_pretty(&tree).context("serializing tree")?;
        println!("{text}");
    } else {
        print!("{}", render_outline(&tree));
    }
    Ok(())
}

pub(crate) fn load(input: &Path, options: CodecOptions) -> Result<Node> {
    let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    Decoder::with_options(options)
        .decode(&bytes)
        .with_context(|| format!("decoding {}", input.display()))
}

/// One line per node and goal, indented by depth.
pub fn render_outline(root: &Node) -> String {
    let mut out = String::new();
    for (depth, node) in root.iter() {
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{indent}node {}", node.id);
        if node.is_root() {
            out.push_str(" (root)");
        }
        out.push('\n');
        for goal in &node.goals {
            let _ = match &goal.name {
                Some(name) => writeln!(out, "{indent}  goal {} {name:?}", goal.guid),
                None => writeln!(out, "{indent}  goal {}", goal.guid),
            };
        }
    }
    out
}

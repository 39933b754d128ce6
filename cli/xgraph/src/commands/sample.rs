//! `xgraph sample`: write a small built-in tree.

use std::path::Path;

use anyhow::Result;
use xgraph_codec::CodecOptions;
use xgraph_core::{Goal, Node};

use super::encode::write_tree;

const SAMPLE_GUID: &str = "502721f4-48cd-4379-821f-df0f0ba089ae";

/// Root 0 with an empty child 1 and a child 2 carrying three named goals.
pub fn sample_tree() -> Result<Node> {
    let goal = Goal::parse(SAMPLE_GUID)?;
    Ok(Node::root(0)
        .with_child(Node::new(1, 0))
        .with_child(
            Node::new(2, 0)
                .with_goal(goal.clone().with_name("Leaflet 1"))
                .with_goal(goal.clone().with_name("Leaflet 2"))
                .with_goal(goal.with_name("Leaflet 3")),
        ))
}

pub fn run(output: &Path, options: CodecOptions) -> Result<()> {
    let tree = sample_tree()?;
    let len = write_tree(&tree, output, options)?;
    println!("Wrote sample graph to {} ({len} bytes)", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_is_within_limits() {
        let tree = sample_tree().unwrap();
        tree.validate().unwrap();
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.goal_count(), 3);
    }

    #[test]
    fn sample_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("data.bin");
        run(&output, CodecOptions::default()).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(xgraph_codec::decode(&bytes).unwrap(), sample_tree().unwrap());
    }
}

//! `xgraph inspect`: header and trailer summary.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use xgraph_codec::{BlobInfo, CodecOptions, Decoder};

pub fn run(input: &Path, options: CodecOptions) -> Result<()> {
    let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let info = Decoder::with_options(options)
        .inspect(&bytes)
        .with_context(|| format!("inspecting {}", input.display()))?;

    println!("--- XGraph ({}) ---", input.display());
    print!("{}", render(&info));
    Ok(())
}

pub fn render(info: &BlobInfo) -> String {
    format!(
        "  Version:  {:#010x}\n  Magic:    {:#x}\n  Nodes:    {}\n  Goals:    {}\n  Size:     {} bytes\n  Checksum: {}\n",
        info.header.version,
        info.header.magic,
        info.header.node_count,
        info.header.goal_count,
        info.len,
        info.checksum,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::sample::sample_tree;

    #[test]
    fn render_shows_header_fields() {
        let bytes = xgraph_codec::encode(&sample_tree().unwrap()).unwrap();
        let info = xgraph_codec::read_header(&bytes).unwrap();
        let text = render(&info);
        assert!(text.contains("Version:  0x22446688"));
        assert!(text.contains("Magic:    0xb0b0bebafeca"));
        assert!(text.contains("Nodes:    3"));
        assert!(text.contains("Goals:    3"));
        assert!(text.contains(&format!("Size:     {} bytes", bytes.len())));
    }
}

//! `xgraph verify`: integrity check only.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use xgraph_codec::checksum;

/// Check the trailer of `input` without parsing the body.
pub fn run(input: &Path) -> Result<()> {
    let digest = check(input)?;
    println!("{}: OK ({digest})", input.display());
    Ok(())
}

pub(crate) fn check(input: &Path) -> Result<String> {
    let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let covered = checksum::verify(&bytes)
        .with_context(|| format!("verifying {}", input.display()))?;
    Ok(checksum::checksum(covered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::sample::sample_tree;

    #[test]
    fn intact_and_tampered_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");
        let mut bytes = xgraph_codec::encode(&sample_tree().unwrap()).unwrap();
        fs::write(&path, &bytes).unwrap();
        assert_eq!(check(&path).unwrap().len(), checksum::DIGEST_TEXT_LEN);

        bytes[40] ^= 0x10;
        fs::write(&path, &bytes).unwrap();
        let err = check(&path).unwrap_err();
        assert!(format!("{err:#}").contains("checksum mismatch"));
    }
}

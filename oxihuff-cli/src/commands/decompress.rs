//! Decompress command implementation.

use super::CmdResult;
use crate::utils::{confirm_overwrite, decompressed_path, format_size, write_atomic};
use oxihuff_huffman::{DecodeStrategy, HuffConfig, HuffmanDecoder};
use std::fs;
use std::path::Path;
use tracing::debug;

pub fn cmd_decompress(
    input: &Path,
    output: Option<&Path>,
    force: bool,
    strategy: DecodeStrategy,
    max_output: Option<usize>,
) -> CmdResult {
    let target = output.map_or_else(|| decompressed_path(input), Path::to_path_buf);
    if target == input {
        return Err(format!("refusing to overwrite the input {}", input.display()).into());
    }

    let mut config = HuffConfig::new().with_decode_strategy(strategy);
    if let Some(limit) = max_output {
        config = config.with_max_output_size(limit);
    }

    let data = fs::read(input)?;
    // Decode fully before touching the destination.
    let decoded = HuffmanDecoder::new(config)
        .decode_bytes(&data)
        .map_err(|e| format!("{}: {}", input.display(), e))?;

    confirm_overwrite(&target, force)?;
    write_atomic(&target, &decoded)?;

    debug!(
        input = %input.display(),
        output = %target.display(),
        %strategy,
        "decompressed file"
    );
    println!(
        "{} -> {}: {} -> {}",
        input.display(),
        target.display(),
        format_size(data.len() as u64),
        format_size(decoded.len() as u64)
    );
    Ok(())
}

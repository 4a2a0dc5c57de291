//! Compress command implementation.

use super::CmdResult;
use crate::utils::{compressed_path, confirm_overwrite, create_progress_bar, format_size, write_atomic};
use oxihuff_huffman::encode;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn cmd_compress(inputs: &[PathBuf], output: Option<&Path>, force: bool) -> CmdResult {
    if output.is_some() && inputs.len() > 1 {
        return Err("--output can only be used with a single input file".into());
    }

    let pb = create_progress_bar(inputs.len() as u64, inputs.len() > 1);

    for input in inputs {
        let target = output.map_or_else(|| compressed_path(input), Path::to_path_buf);
        pb.set_message(input.display().to_string());

        let data = fs::read(input)?;
        let container = encode(&data).map_err(|e| format!("{}: {}", input.display(), e))?;

        pb.suspend(|| confirm_overwrite(&target, force))?;
        write_atomic(&target, &container.to_bytes())?;

        let stats = container.stats();
        debug!(
            input = %input.display(),
            output = %target.display(),
            symbols = stats.distinct_symbols,
            max_code_length = stats.max_code_length,
            "compressed file"
        );
        pb.suspend(|| {
            println!(
                "{} -> {}: {} -> {} ({:.1}% saved)",
                input.display(),
                target.display(),
                format_size(stats.original_size),
                format_size(stats.compressed_size),
                stats.space_savings()
            )
        });
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(())
}

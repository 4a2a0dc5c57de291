//! Info command implementation.

use super::CmdResult;
use crate::utils::format_size;
use oxihuff_huffman::{CompressionStats, Container};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// JSON serializable code table entry.
#[derive(Debug, Serialize, Deserialize)]
struct CodeJson {
    symbol: u8,
    length: u8,
    code: String,
}

/// JSON serializable compression statistics.
#[derive(Debug, Serialize, Deserialize)]
struct StatsJson {
    original_size: u64,
    compressed_size: u64,
    payload_bits: u64,
    distinct_symbols: usize,
    max_code_length: u8,
    ratio: f64,
    space_savings: f64,
    bits_per_symbol: f64,
}

impl From<CompressionStats> for StatsJson {
    fn from(stats: CompressionStats) -> Self {
        Self {
            original_size: stats.original_size,
            compressed_size: stats.compressed_size,
            payload_bits: stats.payload_bits,
            distinct_symbols: stats.distinct_symbols,
            max_code_length: stats.max_code_length,
            ratio: stats.compression_ratio(),
            space_savings: stats.space_savings(),
            bits_per_symbol: stats.bits_per_symbol(),
        }
    }
}

/// JSON output for container inspection.
#[derive(Debug, Serialize, Deserialize)]
struct ContainerInfoJson {
    file: String,
    original_symbol_count: u32,
    code_table_entries: usize,
    usable_bits_in_last_byte: u8,
    payload_bytes: usize,
    codes: Vec<CodeJson>,
    stats: StatsJson,
}

pub fn cmd_info(path: &Path, json: bool) -> CmdResult {
    let data = fs::read(path)?;
    let container = Container::from_bytes(&data).map_err(|e| format!("{}: {}", path.display(), e))?;
    let stats = container.stats();

    if json {
        let info = ContainerInfoJson {
            file: path.display().to_string(),
            original_symbol_count: container.original_len(),
            code_table_entries: container.table().len(),
            usable_bits_in_last_byte: container.usable_bits(),
            payload_bytes: container.payload().len(),
            codes: container
                .table()
                .iter()
                .map(|(symbol, code)| CodeJson {
                    symbol,
                    length: code.len(),
                    code: code.to_string(),
                })
                .collect(),
            stats: stats.into(),
        };
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Container Information");
    println!("=====================");
    println!("File: {}", path.display());
    println!("Size: {} bytes", data.len());
    println!();
    println!("Header:");
    println!("  Original symbols: {}", container.original_len());
    println!("  Code table entries: {}", container.table().len());
    println!("  Usable bits in last byte: {}", container.usable_bits());
    println!("  Payload: {} bytes ({} bits)", container.payload().len(), stats.payload_bits);

    if stats.original_size > 0 {
        println!();
        println!("Statistics:");
        println!("  Original size: {}", format_size(stats.original_size));
        println!("  Compressed size: {}", format_size(stats.compressed_size));
        println!("  Space savings: {:.1}%", stats.space_savings());
        println!("  Bits per symbol: {:.3}", stats.bits_per_symbol());
        println!("  Longest code: {} bits", stats.max_code_length);

        println!();
        println!("{:>6} {:>4} {:>6}  Code", "Symbol", "Hex", "Length");
        println!("{}", "-".repeat(40));
        for (symbol, code) in container.table().iter() {
            println!(
                "{:>6}   {:02x} {:>6}  {}",
                printable(symbol),
                symbol,
                code.len(),
                code
            );
        }
    }

    Ok(())
}

fn printable(symbol: u8) -> String {
    match symbol {
        b' ' => "' '".to_string(),
        b'\n' => "\\n".to_string(),
        b'\r' => "\\r".to_string(),
        b'\t' => "\\t".to_string(),
        s if s.is_ascii_graphic() => (s as char).to_string(),
        _ => ".".to_string(),
    }
}

//! OxiHuff CLI - Huffman compression for single files
//!
//! Compresses files into self-describing `.huff` containers and restores them.

mod commands;
mod utils;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use oxihuff_huffman::DecodeStrategy;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxihuff")]
#[command(author, version, about = "Byte-oriented Huffman compressor")]
#[command(long_about = "
OxiHuff compresses files with a per-file optimal Huffman code. The code table
travels inside the output container, so every file decompresses on its own.

Examples:
  oxihuff compress notes.txt
  oxihuff compress a.bin b.bin c.bin
  oxihuff compress notes.txt -o packed.huff
  oxihuff decompress notes.txt.huff
  oxihuff decompress notes.txt.huff --strategy tree
  oxihuff info notes.txt.huff --json
  oxihuff test notes.txt.huff
  oxihuff completions bash
")]
struct Cli {
    /// Log codec details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress files into .huff containers
    #[command(alias = "c")]
    Compress {
        /// Files to compress
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (only with a single input; default: <input>.huff)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite existing output files without asking
        #[arg(short, long)]
        force: bool,
    },

    /// Restore the original file from a .huff container
    #[command(alias = "d")]
    Decompress {
        /// Container to decompress
        input: PathBuf,

        /// Output file (default: input without .huff, or <input>.out)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing output file without asking
        #[arg(short, long)]
        force: bool,

        /// Symbol decoding strategy
        #[arg(long, value_enum, default_value = "table")]
        strategy: StrategyArg,

        /// Refuse containers that decode to more than this many bytes
        #[arg(long, value_name = "BYTES")]
        max_output: Option<usize>,
    },

    /// Show container header, code table and statistics
    #[command(alias = "i")]
    Info {
        /// Container to inspect
        container: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Verify that containers decode cleanly
    #[command(alias = "t")]
    Test {
        /// Containers to test
        #[arg(required = true)]
        containers: Vec<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

/// Decoding strategy selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
enum StrategyArg {
    /// Per-length code table lookup (default)
    #[default]
    Table,
    /// Walk a decode tree rebuilt from the codes
    Tree,
}

impl From<StrategyArg> for DecodeStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Table => DecodeStrategy::Table,
            StrategyArg::Tree => DecodeStrategy::Tree,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    utils::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Compress {
            inputs,
            output,
            force,
        } => commands::cmd_compress(&inputs, output.as_deref(), force),
        Commands::Decompress {
            input,
            output,
            force,
            strategy,
            max_output,
        } => commands::cmd_decompress(
            &input,
            output.as_deref(),
            force,
            strategy.into(),
            max_output,
        ),
        Commands::Info { container, json } => commands::cmd_info(&container, json),
        Commands::Test { containers } => commands::cmd_test(&containers),
        Commands::Completions { shell } => {
            commands::cmd_completions::<Cli>(shell);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use lzss::{file::write_atomic, EncoderOptions, Stats, DEFAULT_MAX_CHAIN};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Do not print progress and size information
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress an input file to an output file
    #[command(alias = "encode")]
    Compress {
        /// Input file path (use - for stdin)
        input: String,
        /// Output file path (use - for stdout)
        output: String,
        /// Hash-chain candidates probed per position; higher is slower but smaller
        #[arg(long, default_value_t = DEFAULT_MAX_CHAIN)]
        max_chain: usize,
    },
    /// Decompress an input file to an output file
    #[command(alias = "decode")]
    Decompress {
        /// Input file path (use - for stdin)
        input: String,
        /// Output file path (use - for stdout)
        output: String,
    },
}

enum Mode {
    Compress(EncoderOptions),
    Decompress,
}

impl Mode {
    fn name(&self) -> &'static str {
        match self {
            Mode::Compress(_) => "Compression",
            Mode::Decompress => "Decompression",
        }
    }

    fn run_files(&self, input: &str, output: &str) -> lzss::Result<Stats> {
        match self {
            Mode::Compress(options) => lzss::encode_file_with(input, output, options),
            Mode::Decompress => lzss::decode_file(input, output),
        }
    }

    fn run_stream(&self, reader: &mut impl Read, writer: &mut impl Write) -> lzss::Result<Stats> {
        match self {
            Mode::Compress(options) => lzss::encode_stream_with(reader, writer, options),
            Mode::Decompress => lzss::decode_stream(reader, writer),
        }
    }
}

// Helper to open input (file or stdin)
fn open_input(path: &str) -> Result<Box<dyn Read>> {
    if path == "-" {
        Ok(Box::new(BufReader::new(io::stdin())))
    } else {
        let file = File::open(path).with_context(|| format!("Failed to open input file: {}", path))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

// Files on both ends go through the atomic file API. Otherwise the result is
// staged in memory, then written to stdout or atomically to the output file.
fn run(mode: &Mode, input: &str, output: &str) -> Result<Stats> {
    let failed = || format!("{} failed from {} to {}", mode.name(), input, output);

    if input != "-" && output != "-" {
        return mode.run_files(input, output).with_context(failed);
    }

    let mut reader = open_input(input)?;
    let mut staged = Vec::new();
    let stats = mode.run_stream(&mut reader, &mut staged).with_context(failed)?;

    if output == "-" {
        let mut writer = BufWriter::new(io::stdout());
        writer.write_all(&staged).context("Failed to write to stdout")?;
        writer.flush().context("Failed to write to stdout")?;
    } else {
        write_atomic(output, &staged)
            .with_context(|| format!("Failed to write output file: {}", output))?;
    }
    Ok(stats)
}

fn report(quiet: bool, stats: &Stats) {
    if quiet {
        return;
    }
    eprintln!("In : {} bytes", stats.input_bytes);
    eprintln!("Out: {} bytes", stats.output_bytes);
    eprintln!("Out/In: {:.3}", stats.ratio());
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    let (mode, input, output) = match cli.command {
        Commands::Compress {
            input,
            output,
            max_chain,
        } => (Mode::Compress(EncoderOptions { max_chain }), input, output),
        Commands::Decompress { input, output } => (Mode::Decompress, input, output),
    };

    if !quiet {
        eprintln!("{} of {} to {}...", mode.name(), input, output);
    }
    let stats = run(&mode, &input, &output)?;
    report(quiet, &stats);

    Ok(())
}

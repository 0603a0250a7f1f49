//! Trace-replay front end for the co-simulation harness.
//!
//! This binary replays a recorded DUT signal trace through the harness and emits what an
//! external checker consumes:
//! 1. **Commits:** One JSON object per retired instruction, `{"pc":..,"dnpc":..}`.
//! 2. **Faults:** Illegal instructions after pipeline fill end the run with exit code 1.
//! 3. **Diagnostics:** Optional statistics and register dump on stderr.
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use npcsim_core::Config;
use npcsim_core::Harness;
use npcsim_core::bridge::{LogReporter, SparseMemory};
use npcsim_core::common::HarnessError;
use npcsim_core::dut::ReplayModel;

/// Half edges allowed past the end of the trace before giving up on a commit.
const DRAIN_HALF_EDGES: u64 = 16;

#[derive(Parser, Debug)]
#[command(
    name = "npcsim",
    author,
    version,
    about = "Replay a DUT signal trace and report the resolved next PC of every commit"
)]
struct Cli {
    /// JSON-lines signal trace, one frame per rising edge.
    #[arg(short, long)]
    trace: PathBuf,

    /// Harness configuration (JSON).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Flat memory image served to model loads.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Load address of the memory image.
    #[arg(long, default_value = "0x80000000", value_parser = parse_addr)]
    base: u64,

    /// Stop after this many commits.
    #[arg(long)]
    max_commits: Option<u64>,

    /// Print run statistics to stderr at exit.
    #[arg(long)]
    stats: bool,

    /// Print the register dump to stderr at exit.
    #[arg(long)]
    dump_regs: bool,
}

#[derive(Serialize)]
struct CommitRecord {
    pc: u64,
    dnpc: u64,
}

fn parse_addr(s: &str) -> Result<u64, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
        None => s.replace('_', "").parse(),
    };
    parsed.map_err(|e| format!("invalid address {s:?}: {e}"))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let model = ReplayModel::from_file(&cli.trace, config.encoding)?;
    let frames = model.len() as u64;
    let _ = config
        .general
        .max_sim_time
        .get_or_insert(2 * frames + DRAIN_HALF_EDGES);

    let mut memory = SparseMemory::new();
    if let Some(path) = &cli.image {
        let image = fs::read(path).map_err(|source| HarnessError::Io {
            path: path.clone(),
            source,
        })?;
        memory.load_image(cli.base, &image);
        info!("loaded {} byte image at {:#x}", image.len(), cli.base);
    }

    let mut harness = Harness::new(
        model,
        Box::new(memory),
        Box::new(LogReporter::new()),
        &config,
    );
    harness.reset();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut code = ExitCode::SUCCESS;
    let mut commits = 0u64;
    while cli.max_commits.is_none_or(|max| commits < max) {
        let Some(pc) = harness.step() else {
            break;
        };
        commits += 1;
        serde_json::to_writer(
            &mut out,
            &CommitRecord {
                pc,
                dnpc: harness.dnpc(),
            },
        )?;
        writeln!(out)?;

        if let Some(fault) = harness.sanity_check() {
            eprintln!("[!] FATAL: {fault}");
            code = ExitCode::FAILURE;
            break;
        }
    }
    out.flush()?;

    if cli.dump_regs {
        eprint!("{}", harness.register_dump());
        eprintln!("{}", harness.dump_csrs());
    }
    if cli.stats {
        eprintln!("{}", harness.stats());
    }
    Ok(code)
}

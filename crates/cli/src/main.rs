//! RV32IM pipeline simulator CLI.
//!
//! Stages a named workload (`<name>.exe` / `<name>.data` hex images) from a
//! source directory into a working directory, builds the simulator, runs it
//! to EBREAK or the cycle cap, and writes the cycle-tagged trace to stdout.
//! Exit status is 0 on EBREAK, nonzero on any simulation fault.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use rv32pipe_core::config::Config;
use rv32pipe_core::sim::loader;
use rv32pipe_core::sim::trace::Trace;
use rv32pipe_core::{SimError, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "rv32pipe",
    version,
    about = "Cycle-accurate RV32IM five-stage pipeline simulator",
    long_about = "Stages <workload>.exe and <workload>.data from the source directory \
into the working directory, runs the program until EBREAK or the cycle cap, and \
writes a cycle-tagged trace to stdout.\n\nExamples:\n  \
rv32pipe 0to100 --src-dir workloads --work-dir run\n  \
rv32pipe mul1to10 --src-dir workloads --work-dir run --max-cycles 200000"
)]
struct Cli {
    /// Workload name (expects <name>.exe and <name>.data in the source directory).
    workload: String,

    /// Directory holding the workload images.
    #[arg(long, default_value = "workloads")]
    src_dir: PathBuf,

    /// Working directory the images are copied into.
    #[arg(long, default_value = "run")]
    work_dir: PathBuf,

    /// Cycle cap override.
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Memory address width override, in words (each memory is 2^N words).
    #[arg(long)]
    mem_bits: Option<usize>,

    /// JSON configuration file (overridden by the flags above).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Suppress the per-cycle trace.
    #[arg(long)]
    quiet: bool,
}

fn load_config(cli: &Cli) -> Result<Config, SimError> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| SimError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&text).map_err(|e| SimError::Io {
                path: path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            })?
        }
        None => Config::default(),
    };
    if let Some(max_cycles) = cli.max_cycles {
        config.run.max_cycles = max_cycles;
    }
    if let Some(mem_bits) = cli.mem_bits {
        config.memory.addr_bits = mem_bits;
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<Simulator, SimError> {
    let config = load_config(cli)?;

    let workload = loader::stage_workload(&cli.workload, &cli.src_dir, &cli.work_dir)?;
    eprintln!(
        "[*] {}: {} instruction words, {} data words, sp={:#x}, cap={} cycles",
        cli.workload,
        workload.exe.len(),
        workload.data.len(),
        config.initial_sp(),
        config.run.max_cycles
    );

    let trace = if cli.quiet {
        Trace::off()
    } else {
        Trace::stdout()
    };
    let mut sim = Simulator::new(&config, trace);
    sim.load_program(&workload.exe)?;
    sim.load_data(&workload.data)?;
    sim.run()?;
    Ok(sim)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(sim) => {
            eprintln!("[*] halted via EBREAK after {} cycles", sim.cycle());
            sim.stats.print();
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("[!] FATAL: {e}");
            ExitCode::FAILURE
        }
    }
}

//! run-bench: build at each optimization level and benchmark the result
//!
//! Usage:
//!   run-bench                              - Run all benchmarks
//!   run-bench optimize_linprog.KleeMinty   - Run only the named benchmark
//!
//! Configuration comes from `$SFBENCH_CONFIG` or `./sfbench.toml`;
//! `RUST_LOG=info` shows every command as it is issued.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use sf_bench::{BenchConfig, BenchError, Orchestrator, SystemRunner};

/// Exit status for an unreadable or invalid configuration
const CONFIG_ERROR_EXIT: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "run-bench",
    version,
    about = "Build the library at each optimization level and run the benchmark suite"
)]
struct Cli {
    /// Benchmark names to run (every benchmark when omitted)
    #[arg(value_name = "BENCH", trailing_var_arg = true, allow_hyphen_values = true)]
    benchmarks: Vec<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{:#}", err);
            return ExitCode::from(CONFIG_ERROR_EXIT);
        }
    };

    let inherited = std::env::var_os(&config.search_path_var);
    let orchestrator = Orchestrator::new(SystemRunner, config).with_inherited_search_path(inherited);

    match orchestrator.run(&cli.benchmarks) {
        Ok(summary) => {
            print!("{}", summary);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::from(exit_status(&err))
        }
    }
}

/// Failing child's status where it fits in a process exit code, else 1
fn exit_status(err: &BenchError) -> u8 {
    u8::try_from(err.exit_code())
        .ok()
        .filter(|&code| code != 0)
        .unwrap_or(1)
}

fn load_config() -> Result<BenchConfig> {
    let config = BenchConfig::discover().context("Failed to load benchmark configuration")?;
    log::info!(
        "root {}, levels {:?}",
        config.root.display(),
        config.optimization_levels
    );
    Ok(config)
}

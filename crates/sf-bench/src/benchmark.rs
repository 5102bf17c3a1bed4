//! Benchmark suite runner (Airspeed Velocity)

use std::ffi::OsStr;
use std::io;

use crate::process::{CommandSpec, ProcessRunner};
use crate::{BenchConfig, BenchError, Result};

/// `asv run ... --bench <a> --bench <b>`; no filters selects every benchmark
pub fn suite_command(config: &BenchConfig, filters: &[String]) -> CommandSpec {
    filters.iter().fold(
        CommandSpec::new(&config.tools.asv).args(&config.asv_run_args),
        |spec, name| spec.arg("--bench").arg(name),
    )
}

pub fn publish_command(config: &BenchConfig) -> CommandSpec {
    CommandSpec::new(&config.tools.asv).arg("publish")
}

/// Run the suite against the installed build, then publish the results.
///
/// `inherited_search_path` is the caller's current value of the search path
/// variable; the installed library is prepended to it for the children only.
pub fn run_benchmarks<R: ProcessRunner + ?Sized>(
    runner: &R,
    config: &BenchConfig,
    filters: &[String],
    inherited_search_path: Option<&OsStr>,
) -> Result<()> {
    let library = config.library_path();
    if !library.is_dir() {
        return Err(BenchError::LibraryMissing(library));
    }
    println!("Running benchmarks against {}", library.display());

    let env = config.child_env(inherited_search_path)?;
    let cwd = config.benchmarks_path();

    for spec in [suite_command(config, filters), publish_command(config)] {
        let spec = spec.current_dir(&cwd).envs(env.clone());
        run_step(runner, &spec)?;
    }

    Ok(())
}

fn run_step<R: ProcessRunner + ?Sized>(runner: &R, spec: &CommandSpec) -> Result<()> {
    let command = spec.display();
    log::info!("{}", command);

    match runner.status(spec) {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => {
            eprintln!("{} failed", command);
            Err(BenchError::CommandFailed { command, status })
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            eprintln!("Error when running '{}': {}\n", command, err);
            eprintln!("You need to install Airspeed Velocity (https://airspeed-velocity.github.io/asv/)");
            eprintln!("to run the benchmarks");
            Err(BenchError::ToolMissing { command })
        }
        Err(source) => Err(BenchError::Spawn { command, source }),
    }
}

//! Build → size → benchmark loop over the configured optimization levels

use std::ffi::OsString;
use std::time::Instant;

use crate::process::ProcessRunner;
use crate::report::{LevelResult, Summary};
use crate::{BenchConfig, Result, benchmark, build, size};

/// Runs every configured level strictly one after another
pub struct Orchestrator<R: ProcessRunner> {
    runner: R,
    config: BenchConfig,
    inherited_search_path: Option<OsString>,
}

impl<R: ProcessRunner> Orchestrator<R> {
    pub fn new(runner: R, config: BenchConfig) -> Self {
        Self {
            runner,
            config,
            inherited_search_path: None,
        }
    }

    /// Search path value the benchmark children should extend
    pub fn with_inherited_search_path(mut self, value: Option<OsString>) -> Self {
        self.inherited_search_path = value;
        self
    }

    /// Build, measure and benchmark each level in order.
    ///
    /// The first failure ends the run; levels after it are not started.
    pub fn run(&self, filters: &[String]) -> Result<Summary> {
        let mut summary = Summary::default();

        for &level in &self.config.optimization_levels {
            let start = Instant::now();
            build::build(&self.runner, &self.config, level)?;
            let build_time = start.elapsed();

            let install_size = size::install_size(&self.runner, &self.config)?;

            let start = Instant::now();
            if let Err(err) = benchmark::run_benchmarks(
                &self.runner,
                &self.config,
                filters,
                self.inherited_search_path.as_deref(),
            ) {
                eprintln!("Error while running benchmarks for optimization level: {}", level);
                return Err(err);
            }
            let benchmark_time = start.elapsed();

            log::info!(
                "level {}: build {:.3}s, benchmarks {:.3}s, size {}",
                level,
                build_time.as_secs_f64(),
                benchmark_time.as_secs_f64(),
                install_size
            );

            summary.push(LevelResult {
                level,
                build_time,
                benchmark_time,
                install_size,
            });
        }

        Ok(summary)
    }
}

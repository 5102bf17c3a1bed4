//! Build step: clean, configure, compile, install

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::process::{CommandSpec, ProcessRunner};
use crate::{BenchConfig, BenchError, OptimizationLevel, Result};

/// Phase of the build sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    /// `meson setup`
    Configure,
    /// `ninja`
    Compile,
    /// `meson install`
    Install,
}

impl fmt::Display for BuildPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Configure => "configure",
            Self::Compile => "compile",
            Self::Install => "install",
        })
    }
}

/// The three external build commands for `level`, in execution order
pub fn build_commands(config: &BenchConfig, level: OptimizationLevel) -> [(BuildPhase, CommandSpec); 3] {
    let build_dir = config.build_path();
    let meson = &config.tools.meson;

    let configure = CommandSpec::new(meson)
        .args(["setup", "--optimization", level.tag()])
        .arg(&build_dir)
        .arg("--prefix")
        .arg(config.install_path())
        .current_dir(&config.root);

    let compile = CommandSpec::new(&config.tools.ninja)
        .arg("-C")
        .arg(&build_dir)
        .arg("-j")
        .arg(config.jobs.to_string())
        .current_dir(&config.root);

    let install = CommandSpec::new(meson)
        .args(["install", "-C"])
        .arg(&build_dir)
        .current_dir(&config.root);

    [
        (BuildPhase::Configure, configure),
        (BuildPhase::Compile, compile),
        (BuildPhase::Install, install),
    ]
}

/// Rebuild and install at `level`.
///
/// Stops at the first failing phase; whatever the earlier phases left on
/// disk stays there.
pub fn build<R: ProcessRunner + ?Sized>(
    runner: &R,
    config: &BenchConfig,
    level: OptimizationLevel,
) -> Result<()> {
    println!("Building with optimization level: {}", level);

    clear_dir(&config.build_path())?;

    for (phase, spec) in build_commands(config, level) {
        log::info!("{}: {}", phase, spec.display());

        let status = runner.status(&spec).map_err(|source| BenchError::Spawn {
            command: spec.display(),
            source,
        })?;

        if !status.success() {
            eprintln!("{} step failed: {}", phase, spec.display());
            return Err(BenchError::Build { phase, status });
        }
    }

    Ok(())
}

fn clear_dir(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => {
            log::debug!("Removed {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

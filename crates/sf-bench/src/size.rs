//! Install size via `du -sh`

use crate::process::{CommandSpec, ProcessRunner};
use crate::{BenchConfig, BenchError, Result};

pub fn du_command(config: &BenchConfig) -> CommandSpec {
    CommandSpec::new(&config.tools.du)
        .arg("-sh")
        .arg(config.install_path())
}

/// First whitespace-delimited token of `du` output, verbatim ("152M")
pub fn parse_size(stdout: &str) -> Option<String> {
    stdout.split_whitespace().next().map(str::to_owned)
}

/// Human-readable size of the install prefix
pub fn install_size<R: ProcessRunner + ?Sized>(runner: &R, config: &BenchConfig) -> Result<String> {
    let spec = du_command(config);
    let command = spec.display();

    let out = runner.output(&spec).map_err(|source| BenchError::Spawn {
        command: command.clone(),
        source,
    })?;

    if !out.status.success() {
        return Err(BenchError::CommandFailed {
            command,
            status: out.status,
        });
    }

    parse_size(&out.stdout).ok_or(BenchError::UnexpectedOutput {
        command,
        output: out.stdout,
    })
}

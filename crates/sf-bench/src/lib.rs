//! # sf-bench
//!
//! Optimization-level benchmark orchestrator.
//!
//! For each configured compiler optimization level the library is rebuilt
//! with meson, its install size measured with `du`, and the Airspeed
//! Velocity suite run against the fresh install. Build time, benchmark
//! time and size are reported per level in execution order.
//!
//! ## Flow
//!
//! ```text
//! for level in optimization_levels:
//!     rm -rf build
//!     meson setup --optimization <level> build --prefix installdir
//!     ninja -C build -j <jobs>
//!     meson install -C build
//!     du -sh installdir
//!     asv run --python=same --steps=1 [--bench NAME]...
//!     asv publish
//! ```
//!
//! Everything runs sequentially on the calling thread. External commands go
//! through [`ProcessRunner`], so the whole flow can be driven without
//! spawning real processes.

pub mod benchmark;
pub mod build;
pub mod config;
pub mod error;
pub mod level;
pub mod orchestrator;
pub mod process;
pub mod report;
pub mod size;

#[cfg(test)]
pub(crate) mod testing;

pub use build::BuildPhase;
pub use config::{BenchConfig, Tools};
pub use error::{BenchError, Result};
pub use level::OptimizationLevel;
pub use orchestrator::Orchestrator;
pub use process::{CapturedOutput, CommandSpec, ProcessRunner, ProcessStatus, SystemRunner};
pub use report::{LevelResult, Summary};

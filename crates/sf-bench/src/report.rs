//! Per-level results and the summary table

use std::fmt;
use std::time::Duration;

use crate::OptimizationLevel;

/// Measurements for one optimization level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelResult {
    pub level: OptimizationLevel,
    pub build_time: Duration,
    pub benchmark_time: Duration,
    /// `du -sh` size, verbatim
    pub install_size: String,
}

impl LevelResult {
    /// Tab-separated summary row
    pub fn row(&self) -> String {
        format!(
            "{}\t\t{:.3}\t\t{:.3}\t\t{}",
            self.level,
            self.build_time.as_secs_f64(),
            self.benchmark_time.as_secs_f64(),
            self.install_size
        )
    }
}

/// Results in execution order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub results: Vec<LevelResult>,
}

impl Summary {
    pub fn push(&mut self, result: LevelResult) {
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn render(&self) -> String {
        let stars = "*".repeat(80);
        let mut output = String::new();

        output.push_str(&format!("{}\n", stars));
        output.push_str(&format!("{} Results {}\n", "-".repeat(35), "-".repeat(36)));
        output.push_str(&format!("{}\n", stars));
        output.push_str("Optimization Level \tBuild Time \t      Benchmarks Time \t\t Size \t\n");

        for result in &self.results {
            output.push_str(&result.row());
            output.push('\n');
        }

        output
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

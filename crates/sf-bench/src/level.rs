//! Compiler optimization levels accepted by `meson setup --optimization`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::BenchError;

/// Optimization level tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OptimizationLevel {
    /// No optimization flags at all
    Plain,
    /// -O0
    O0,
    /// -O1
    O1,
    /// -O2
    O2,
    /// -O3
    O3,
    /// -Og (debug-friendly)
    Debug,
    /// -Os (size)
    Size,
}

impl OptimizationLevel {
    /// Meson tag for this level
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::O0 => "0",
            Self::O1 => "1",
            Self::O2 => "2",
            Self::O3 => "3",
            Self::Debug => "g",
            Self::Size => "s",
        }
    }

    pub fn all() -> &'static [OptimizationLevel] {
        &[
            Self::Plain,
            Self::O0,
            Self::O1,
            Self::O2,
            Self::O3,
            Self::Debug,
            Self::Size,
        ]
    }
}

impl fmt::Display for OptimizationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for OptimizationLevel {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|level| level.tag() == s)
            .ok_or_else(|| BenchError::InvalidConfig(format!("unknown optimization level '{s}'")))
    }
}

impl TryFrom<String> for OptimizationLevel {
    type Error = BenchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OptimizationLevel> for String {
    fn from(level: OptimizationLevel) -> Self {
        level.tag().to_string()
    }
}

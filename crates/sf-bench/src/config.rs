//! Orchestrator configuration
//!
//! Loaded from `sfbench.toml` (or the file named by `SFBENCH_CONFIG`).
//! Every field is optional; omitted fields keep the built-in defaults.
//!
//! ```toml
//! optimization_levels = ["0", "2", "s"]
//! jobs = 4
//!
//! [thread_limits]
//! OPENBLAS_NUM_THREADS = "1"
//! MKL_NUM_THREADS = "1"
//! ```

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{BenchError, OptimizationLevel, Result};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "SFBENCH_CONFIG";

/// Config file looked up in the current directory
pub const CONFIG_FILE: &str = "sfbench.toml";

/// External tool names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tools {
    pub meson: String,
    pub ninja: String,
    pub du: String,
    pub asv: String,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            meson: "meson".into(),
            ninja: "ninja".into(),
            du: "du".into(),
            asv: "asv".into(),
        }
    }
}

/// Benchmark orchestrator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Project root; relative paths below resolve against it
    pub root: PathBuf,
    /// Meson build directory
    pub build_dir: PathBuf,
    /// Install prefix
    pub install_dir: PathBuf,
    /// Installed library location under the prefix
    pub library_subdir: PathBuf,
    /// Working directory of the benchmark suite
    pub benchmarks_dir: PathBuf,
    /// Levels to build, in execution order
    pub optimization_levels: Vec<OptimizationLevel>,
    /// Compile parallelism (`ninja -j`)
    pub jobs: usize,
    /// Thread-count overrides for numeric backends
    pub thread_limits: BTreeMap<String, String>,
    /// Library search path variable prepended with the library location
    pub search_path_var: String,
    pub tools: Tools,
    /// Suite invocation before the `--bench` filters
    pub asv_run_args: Vec<String>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        let thread_limits = [("OPENBLAS_NUM_THREADS", "1"), ("MKL_NUM_THREADS", "1")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Self {
            root: PathBuf::from("."),
            build_dir: PathBuf::from("build"),
            install_dir: PathBuf::from("installdir"),
            library_subdir: PathBuf::from("lib/python3.9/site-packages"),
            benchmarks_dir: PathBuf::from("benchmarks"),
            optimization_levels: vec![OptimizationLevel::O0],
            jobs: 2,
            thread_limits,
            search_path_var: "PYTHONPATH".into(),
            tools: Tools::default(),
            asv_run_args: vec!["run".into(), "--python=same".into(), "--steps=1".into()],
        }
    }
}

impl BenchConfig {
    /// Parse from TOML text (root left as written)
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file; a relative `root` resolves against the file's directory
    pub fn load(path: &Path) -> Result<Self> {
        log::debug!("Loading config from {}", path.display());
        let text = fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&text)?;

        if config.root.is_relative() {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            config.root = base.join(&config.root);
        }
        config.resolved()
    }

    /// `$SFBENCH_CONFIG`, then `./sfbench.toml`, then defaults
    pub fn discover() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::discover_from(explicit.as_deref(), &cwd)
    }

    /// Lookup relative to `cwd`. An explicit file must exist; a missing
    /// local file falls back to defaults rooted at `cwd`.
    pub fn discover_from(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(&cwd.join(path));
        }

        let local = cwd.join(CONFIG_FILE);
        if local.is_file() {
            return Self::load(&local);
        }

        log::debug!("No {} found, using defaults", CONFIG_FILE);
        Self {
            root: cwd.to_path_buf(),
            ..Self::default()
        }
        .resolved()
    }

    /// Make `root` absolute (meson requires an absolute prefix)
    pub fn resolved(mut self) -> Result<Self> {
        self.root = std::path::absolute(&self.root)?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.optimization_levels.is_empty() {
            return Err(BenchError::InvalidConfig(
                "at least one optimization level is required".into(),
            ));
        }
        if self.jobs == 0 {
            return Err(BenchError::InvalidConfig("jobs must be at least 1".into()));
        }
        if self.search_path_var.is_empty() {
            return Err(BenchError::InvalidConfig("search_path_var is empty".into()));
        }
        Ok(())
    }

    pub fn build_path(&self) -> PathBuf {
        self.root.join(&self.build_dir)
    }

    pub fn install_path(&self) -> PathBuf {
        self.root.join(&self.install_dir)
    }

    pub fn library_path(&self) -> PathBuf {
        self.install_path().join(&self.library_subdir)
    }

    pub fn benchmarks_path(&self) -> PathBuf {
        self.root.join(&self.benchmarks_dir)
    }

    /// Environment overrides for benchmark commands.
    ///
    /// Thread limits plus the search path variable with the installed
    /// library prepended to `inherited`.
    pub fn child_env(&self, inherited: Option<&OsStr>) -> Result<BTreeMap<String, OsString>> {
        let mut env: BTreeMap<String, OsString> = self
            .thread_limits
            .iter()
            .map(|(k, v)| (k.clone(), OsString::from(v)))
            .collect();

        let mut paths = vec![self.library_path()];
        if let Some(existing) = inherited {
            paths.extend(std::env::split_paths(existing).filter(|p| !p.as_os_str().is_empty()));
        }
        let joined = std::env::join_paths(paths)
            .map_err(|e| BenchError::InvalidConfig(format!("{}: {e}", self.search_path_var)))?;
        env.insert(self.search_path_var.clone(), joined);

        Ok(env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BenchConfig::default();
        assert_eq!(config.optimization_levels, vec![OptimizationLevel::O0]);
        assert_eq!(config.jobs, 2);
        assert_eq!(config.thread_limits["OPENBLAS_NUM_THREADS"], "1");
        assert_eq!(config.thread_limits["MKL_NUM_THREADS"], "1");
        assert_eq!(config.search_path_var, "PYTHONPATH");
        assert_eq!(config.asv_run_args, ["run", "--python=same", "--steps=1"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = BenchConfig::from_toml_str(
            r#"
            optimization_levels = ["0", "3", "s"]

            [tools]
            asv = "/opt/asv/bin/asv"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.optimization_levels,
            vec![OptimizationLevel::O0, OptimizationLevel::O3, OptimizationLevel::Size]
        );
        assert_eq!(config.tools.asv, "/opt/asv/bin/asv");
        assert_eq!(config.tools.meson, "meson");
        assert_eq!(config.jobs, 2);
    }

    #[test]
    fn test_invalid_toml_values() {
        assert!(BenchConfig::from_toml_str(r#"optimization_levels = ["9"]"#).is_err());
        assert!(BenchConfig::from_toml_str("optimization_levels = []").is_err());
        assert!(BenchConfig::from_toml_str("jobs = 0").is_err());
    }

    #[test]
    fn test_load_resolves_root_against_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "jobs = 8\n").unwrap();

        let config = BenchConfig::load(&path).unwrap();
        assert_eq!(config.jobs, 8);
        assert!(config.root.is_absolute());
        assert_eq!(config.install_path(), config.root.join("installdir"));
        assert!(config.root.starts_with(std::path::absolute(dir.path()).unwrap()));
    }

    #[test]
    fn test_discover_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();

        let config = BenchConfig::discover_from(None, dir.path()).unwrap();
        assert_eq!(config.jobs, 2);
        assert_eq!(config.root, std::path::absolute(dir.path()).unwrap());
    }

    #[test]
    fn test_discover_reads_local_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "jobs = 5\n").unwrap();

        let config = BenchConfig::discover_from(None, dir.path()).unwrap();
        assert_eq!(config.jobs, 5);
    }

    #[test]
    fn test_discover_explicit_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "jobs = 5\n").unwrap();
        fs::create_dir_all(dir.path().join("ci")).unwrap();
        fs::write(dir.path().join("ci/bench.toml"), "jobs = 7\n").unwrap();

        let config = BenchConfig::discover_from(Some(Path::new("ci/bench.toml")), dir.path()).unwrap();
        assert_eq!(config.jobs, 7);
        assert!(config.root.ends_with("ci"));
    }

    #[test]
    fn test_discover_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "jobs = 5\n").unwrap();

        let err = BenchConfig::discover_from(Some(Path::new("missing.toml")), dir.path()).unwrap_err();
        assert!(matches!(err, BenchError::Io(_)));
    }

    #[test]
    fn test_child_env_prepends_library_path() {
        let config = BenchConfig {
            root: PathBuf::from("/work/scipy"),
            ..Default::default()
        };

        let inherited = std::env::join_paths(["/usr/lib/extra"]).unwrap();
        let env = config.child_env(Some(inherited.as_os_str())).unwrap();

        let paths: Vec<PathBuf> = std::env::split_paths(&env["PYTHONPATH"]).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/work/scipy/installdir/lib/python3.9/site-packages"),
                PathBuf::from("/usr/lib/extra"),
            ]
        );
        assert_eq!(env["OPENBLAS_NUM_THREADS"], OsString::from("1"));
        assert_eq!(env["MKL_NUM_THREADS"], OsString::from("1"));
    }

    #[test]
    fn test_child_env_without_inherited_path() {
        let config = BenchConfig::default();
        let env = config.child_env(None).unwrap();
        assert_eq!(env["PYTHONPATH"], config.library_path().into_os_string());
    }
}

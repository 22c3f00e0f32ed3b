//! Demo configuration loading and management.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tanks_nav::{GridConfig, PathRequest};

/// Demo configuration, loaded from `tanks.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Grid geometry, wall density and edge topology
    pub grid: GridConfig,

    /// Heuristic and smoothing used for every query
    pub search: PathRequest,

    /// RNG seed; a random seed is drawn when absent
    pub seed: Option<u64>,

    /// Auto-run settings
    pub auto_run: AutoRunConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoRunConfig {
    /// Goals picked per `run` invocation
    #[serde(default = "default_goals")]
    pub goals: usize,

    /// Consecutive unreachable goals tolerated before giving up
    #[serde(default = "default_max_failures")]
    pub max_failures: usize,
}

fn default_goals() -> usize {
    10
}
fn default_max_failures() -> usize {
    25
}

impl Default for AutoRunConfig {
    fn default() -> Self {
        Self {
            goals: default_goals(),
            max_failures: default_max_failures(),
        }
    }
}

impl DemoConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.grid.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tanks_nav::{Heuristic, Topology, Vec2};

    #[test]
    fn defaults_describe_the_stock_demo() {
        let config = DemoConfig::default();
        assert_eq!(config.grid.rows, 25);
        assert_eq!(config.grid.cols, 25);
        assert_eq!(config.grid.tile_size, Vec2::new(25.0, 25.0));
        assert_eq!(config.grid.origin, Vec2::new(200.0, 75.0));
        assert_eq!(config.grid.obstacle_probability, 30);
        assert_eq!(config.grid.topology, Topology::FourDirectional);
        assert_eq!(config.search.heuristic, Heuristic::Distance);
        assert!(!config.search.smooth);
        assert_eq!(config.auto_run.goals, 10);
    }

    #[test]
    fn parses_partial_yaml() {
        let config = DemoConfig::parse(
            r#"
grid:
  rows: 10
  cols: 12
  obstacle_probability: 45
  topology: eight-directional
search:
  heuristic: diagonal
  smooth: true
seed: 7
"#,
        )
        .expect("config");

        assert_eq!(config.grid.rows, 10);
        assert_eq!(config.grid.cols, 12);
        assert_eq!(config.grid.tile_size, Vec2::new(25.0, 25.0));
        assert_eq!(config.grid.topology, Topology::EightDirectional);
        assert_eq!(config.search.heuristic, Heuristic::Diagonal);
        assert!(config.search.smooth);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.auto_run.max_failures, 25);
    }

    #[test]
    fn rejects_invalid_grid() {
        let err = DemoConfig::parse("grid:\n  obstacle_probability: 150\n").unwrap_err();
        assert!(err.to_string().contains("obstacle probability"));
    }

    #[test]
    fn load_reads_file_and_missing_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "grid:\n  rows: 3\n  cols: 4").expect("write");

        let config = DemoConfig::load_or_default(file.path()).expect("load");
        assert_eq!((config.grid.rows, config.grid.cols), (3, 4));

        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("tanks.yaml");
        let config = DemoConfig::load_or_default(&missing).expect("defaults");
        assert_eq!(config.grid.rows, 25);
    }
}

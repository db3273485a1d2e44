use serde::Deserialize;
use shadowbox_mesh::{DEFAULT_RESOLUTION, DEFAULT_WALL_THICKNESS, MeshParams};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::pipeline::PipelineOptions;

/// 10 mm voxels at the default resolution.
pub const DEFAULT_SCALE_MM: f64 = 0.01;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub mesh: Mesh,
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub filter: Filter,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Mesh {
    #[serde(default = "default_resolution")]
    pub resolution: u32,
    #[serde(default = "default_wall_thickness")]
    pub wall_thickness: u32,
}
fn default_resolution() -> u32 {
    DEFAULT_RESOLUTION
}
fn default_wall_thickness() -> u32 {
    DEFAULT_WALL_THICKNESS
}
impl Default for Mesh {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            wall_thickness: DEFAULT_WALL_THICKNESS,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Output {
    /// Millimetres per grid unit.
    #[serde(default = "default_scale_mm")]
    pub scale_mm: f64,
}
fn default_scale_mm() -> f64 {
    DEFAULT_SCALE_MM
}
impl Default for Output {
    fn default() -> Self {
        Self {
            scale_mm: DEFAULT_SCALE_MM,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Filter {
    #[serde(default = "default_trim_floating")]
    pub trim_floating: bool,
}
fn default_trim_floating() -> bool {
    true
}
impl Default for Filter {
    fn default() -> Self {
        Self {
            trim_floating: true,
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_toml_str(&s)?;
        log::debug!("loaded config from {}: {:?}", path.display(), cfg);
        Ok(cfg)
    }

    pub fn mesh_params(&self) -> MeshParams {
        MeshParams::new(self.mesh.resolution, self.mesh.wall_thickness)
    }

    /// Pipeline settings described by this file. Range checks happen in
    /// [`crate::pipeline::generate`].
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            params: self.mesh_params(),
            scale: self.output.scale_mm,
            trim_floating: self.filter.trim_floating,
            parallel: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = Config::from_toml_str("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.mesh_params(), MeshParams::default());
        assert_eq!(cfg.output.scale_mm, 0.01);
        assert!(cfg.filter.trim_floating);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = Config::from_toml_str(
            r#"
            [mesh]
            wall_thickness = 25

            [filter]
            trim_floating = false
            "#,
        )
        .unwrap();
        assert_eq!(cfg.mesh.resolution, 1000);
        assert_eq!(cfg.mesh.wall_thickness, 25);
        assert_eq!(cfg.output.scale_mm, 0.01);
        let opts = cfg.pipeline_options();
        assert!(!opts.trim_floating);
        assert_eq!(opts.params, MeshParams::new(1000, 25));
    }

    #[test]
    fn wrong_types_are_parse_errors() {
        let err = Config::from_toml_str("[mesh]\nresolution = \"fine\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        let err = Config::from_toml_str("[mesh]\nresolution = -4\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_names_the_path() {
        let path = Path::new("/nonexistent/shadowbox.toml");
        let err = Config::load(path).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("shadowbox.toml"));
    }
}

//! Voxel grids to printable shell meshes.
#![forbid(unsafe_code)]

pub mod config;
pub mod gridfile;
pub mod pipeline;

pub use config::{Config, ConfigError};
pub use gridfile::{GridFileError, load_grid, parse_grid};
pub use pipeline::{Generated, PipelineError, PipelineOptions, generate};

pub use shadowbox_geom as geom;
pub use shadowbox_grid as grid;
pub use shadowbox_io as io;
pub use shadowbox_mesh as mesh;

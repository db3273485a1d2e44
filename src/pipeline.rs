//! Grid in, STL bytes out: validate, trim, extract, encode.

use shadowbox_grid::{TrimReport, VoxelGrid, trim_floating};
use shadowbox_io::{StlError, encode_binary_stl};
use shadowbox_mesh::{MeshParams, ParamsError, extract};
use thiserror::Error;

use crate::config::DEFAULT_SCALE_MM;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PipelineOptions {
    pub params: MeshParams,
    /// Output units (millimetres) per grid unit.
    pub scale: f64,
    pub trim_floating: bool,
    /// Extract z-slices on the rayon pool. Ignored without the `parallel` feature.
    pub parallel: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            params: MeshParams::default(),
            scale: DEFAULT_SCALE_MM,
            trim_floating: true,
            parallel: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Params(#[from] ParamsError),
    #[error("grid {sx}x{sy}x{sz} has no cells")]
    ZeroSizedGrid { sx: usize, sy: usize, sz: usize },
    #[error("scale {0} must be finite and positive")]
    InvalidScale(f64),
    #[error(transparent)]
    Stl(#[from] StlError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generated {
    /// Encoded binary STL.
    pub stl: Vec<u8>,
    /// Component filter outcome; all zero when trimming is off.
    pub report: TrimReport,
    pub triangles: usize,
}

/// Rejects a request before any mesh work starts.
pub fn validate(grid: &VoxelGrid, opts: &PipelineOptions) -> Result<(), PipelineError> {
    opts.params.validate()?;
    if !opts.scale.is_finite() || opts.scale <= 0.0 {
        return Err(PipelineError::InvalidScale(opts.scale));
    }
    if grid.is_zero_sized() {
        let (sx, sy, sz) = grid.dims();
        return Err(PipelineError::ZeroSizedGrid { sx, sy, sz });
    }
    Ok(())
}

fn run_extract(grid: &VoxelGrid, opts: &PipelineOptions) -> shadowbox_geom::Mesh {
    #[cfg(feature = "parallel")]
    {
        if opts.parallel {
            return shadowbox_mesh::extract_parallel(grid, &opts.params);
        }
    }
    extract(grid, &opts.params)
}

/// Runs the whole pipeline on `grid`, which is consumed because trimming edits it.
/// A grid with nothing left to mesh encodes to an empty, valid STL.
pub fn generate(mut grid: VoxelGrid, opts: &PipelineOptions) -> Result<Generated, PipelineError> {
    validate(&grid, opts)?;

    let report = if opts.trim_floating {
        trim_floating(&mut grid)
    } else {
        TrimReport::default()
    };
    if report.removed > 0 {
        log::info!(
            "removed {} floating voxel(s) across {} component(s)",
            report.removed,
            report.components.saturating_sub(1)
        );
    }

    let mesh = run_extract(&grid, opts);
    if mesh.is_empty() {
        let (sx, sy, sz) = grid.dims();
        log::warn!("grid {}x{}x{} produced no triangles", sx, sy, sz);
    }
    let stl = encode_binary_stl(mesh.triangles(), opts.scale)?;
    log::info!(
        "generated {} triangle(s), {} byte(s) of STL",
        mesh.len(),
        stl.len()
    );
    Ok(Generated {
        stl,
        report,
        triangles: mesh.len(),
    })
}

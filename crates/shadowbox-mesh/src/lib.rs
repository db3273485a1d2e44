//! Shell meshing: turns a voxel grid into a closed triangle surface.
#![forbid(unsafe_code)]

mod extract;
mod face;
mod params;
mod sink;

pub use extract::{emit_voxel, extract, extract_into, extract_slice};
#[cfg(feature = "parallel")]
pub use extract::extract_parallel;
pub use face::Face;
pub use params::{DEFAULT_RESOLUTION, DEFAULT_WALL_THICKNESS, MeshParams, ParamsError};
pub use sink::{QuadCounter, QuadSink, quad_triangles};

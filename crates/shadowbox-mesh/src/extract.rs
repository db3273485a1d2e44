//! Voxel-to-shell surface extraction.
//!
//! Each voxel owns the cube `[p*R, (p+1)*R]` on every axis. A wall on axis `a`
//! is a slab of thickness `w` lining both `a` faces of that cube; where the
//! voxel lacks the wall the face is open and the cavity runs through as a
//! square tunnel of side `R - 2w`. Solid voxels (or voxels carrying all three
//! walls) are closed cubes.
//!
//! Faces are emitted per voxel in `Face::ALL` order, voxels in z, y, x order.
//! The result is closed: every edge is shared by exactly two triangles with
//! opposite directions.

use shadowbox_geom::{IVec3, Mesh};
use shadowbox_grid::{Axis, Voxel, VoxelGrid};

use crate::face::Face;
use crate::params::MeshParams;
use crate::sink::QuadSink;

/// Point with the given coordinate on each of three distinct axes.
#[inline]
fn point(a: Axis, av: i64, u: Axis, uv: i64, v: Axis, vv: i64) -> IVec3 {
    let mut p = IVec3::ZERO;
    p.set(a.index(), av);
    p.set(u.index(), uv);
    p.set(v.index(), vv);
    p
}

/// Axis-aligned rectangle in the plane `a = plane`.
#[inline]
fn rect(
    sink: &mut impl QuadSink,
    a: Axis,
    plane: i64,
    u: Axis,
    (u0, u1): (i64, i64),
    v: Axis,
    (v0, v1): (i64, i64),
    normal: IVec3,
) {
    sink.push_quad(
        [
            point(a, plane, u, u0, v, v0),
            point(a, plane, u, u1, v, v0),
            point(a, plane, u, u1, v, v1),
            point(a, plane, u, u0, v, v1),
        ],
        normal,
    );
}

/// Emits the geometry owned by one voxel face.
fn emit_face(
    sink: &mut impl QuadSink,
    here: Voxel,
    neighbour: Voxel,
    face: Face,
    lo: IVec3,
    hi: IVec3,
    w: i64,
) {
    let a = face.axis();
    let (u, v) = a.perpendicular();
    let n = face.normal();
    let outer = if face.sign() > 0 { hi.get(a.index()) } else { lo.get(a.index()) };
    let inner = outer - face.sign() * w;

    let span = |ax: Axis| (lo.get(ax.index()), hi.get(ax.index()));
    let inset = |ax: Axis| (lo.get(ax.index()) + w, hi.get(ax.index()) - w);

    if here.has_surface(a) {
        // Outer skin: whole face against empty space, only the tunnel mouth
        // against a neighbour that is open on this axis.
        if !neighbour.is_active() {
            rect(sink, a, outer, u, span(u), v, span(v), n);
        } else if !neighbour.has_surface(a) {
            rect(sink, a, outer, u, inset(u), v, inset(v), n);
        }
        if here.is_fully_solid() {
            return;
        }
        rect(sink, a, inner, u, inset(u), v, inset(v), -n);
    } else if !neighbour.is_active() {
        // Open face into empty space: frame between the cube edge and the tunnel rim.
        let (ulo, uhi) = span(u);
        let (vlo, vhi) = span(v);
        let (iu0, iu1) = inset(u);
        let (iv0, iv1) = inset(v);
        let outer_ring = [(ulo, vlo), (uhi, vlo), (uhi, vhi), (ulo, vhi)];
        let inner_ring = [(iu0, iv0), (iu1, iv0), (iu1, iv1), (iu0, iv1)];
        for k in 0..4 {
            let k2 = (k + 1) % 4;
            sink.push_quad(
                [
                    point(a, outer, u, outer_ring[k].0, v, outer_ring[k].1),
                    point(a, outer, u, outer_ring[k2].0, v, outer_ring[k2].1),
                    point(a, outer, u, inner_ring[k2].0, v, inner_ring[k2].1),
                    point(a, outer, u, inner_ring[k].0, v, inner_ring[k].1),
                ],
                n,
            );
        }
    }

    // Tunnels along a perpendicular axis leave stubs at the inset depth.
    for q in [u, v] {
        if here.has_surface(q) {
            continue;
        }
        let r = if q == u { v } else { u };
        let (q0, q1) = span(q);
        for band in [(q0, q0 + w), (q1 - w, q1)] {
            rect(sink, a, inner, q, band, r, inset(r), -n);
        }
    }
}

/// Emits every face of the voxel at `(x,y,z)`. Empty voxels emit nothing.
pub fn emit_voxel(
    grid: &VoxelGrid,
    params: &MeshParams,
    x: usize,
    y: usize,
    z: usize,
    sink: &mut impl QuadSink,
) {
    let (xi, yi, zi) = (x as i64, y as i64, z as i64);
    let here = grid.voxel(xi, yi, zi);
    if !here.is_active() {
        return;
    }
    let r = i64::from(params.resolution);
    let w = i64::from(params.wall_thickness);
    let lo = IVec3::new(xi, yi, zi) * r;
    let hi = lo + IVec3::new(r, r, r);
    for face in Face::ALL {
        let (dx, dy, dz) = face.delta();
        let neighbour = grid.voxel(xi + dx, yi + dy, zi + dz);
        emit_face(sink, here, neighbour, face, lo, hi, w);
    }
}

/// Emits one z-slice of the grid in y, x order.
pub fn extract_slice(grid: &VoxelGrid, params: &MeshParams, z: usize, sink: &mut impl QuadSink) {
    let (sx, sy, _) = grid.dims();
    for y in 0..sy {
        for x in 0..sx {
            emit_voxel(grid, params, x, y, z, sink);
        }
    }
}

/// Streams the whole grid into `sink`. `params` are expected to pass
/// [`MeshParams::validate`].
pub fn extract_into(grid: &VoxelGrid, params: &MeshParams, sink: &mut impl QuadSink) {
    let (_, _, sz) = grid.dims();
    for z in 0..sz {
        extract_slice(grid, params, z, sink);
    }
}

/// Serial extraction into a fresh mesh.
pub fn extract(grid: &VoxelGrid, params: &MeshParams) -> Mesh {
    let mut mesh = Mesh::new();
    extract_into(grid, params, &mut mesh);
    let (sx, sy, sz) = grid.dims();
    log::debug!(
        "extract: {}x{}x{} grid, {} active voxel(s) -> {} triangle(s)",
        sx,
        sy,
        sz,
        grid.active_count(),
        mesh.len()
    );
    mesh
}

/// Same output as [`extract`], with one rayon task per z-slice. Slices are
/// concatenated in z order.
#[cfg(feature = "parallel")]
pub fn extract_parallel(grid: &VoxelGrid, params: &MeshParams) -> Mesh {
    use rayon::prelude::*;

    let (sx, sy, sz) = grid.dims();
    let slices: Vec<Mesh> = (0..sz)
        .into_par_iter()
        .map(|z| {
            let mut m = Mesh::new();
            extract_slice(grid, params, z, &mut m);
            m
        })
        .collect();
    let mut mesh = Mesh::with_capacity(slices.iter().map(Mesh::len).sum());
    for mut s in slices {
        mesh.append(&mut s);
    }
    log::debug!(
        "extract_parallel: {}x{}x{} grid over {} slice(s) -> {} triangle(s)",
        sx,
        sy,
        sz,
        sz,
        mesh.len()
    );
    mesh
}

//! Binary STL encoding.
//!
//! Layout: 80 zero header bytes, a little-endian `u32` triangle count, then one
//! 50-byte record per triangle: a zero normal, three vertices of three `f32`,
//! and a zero `u16` attribute count. Readers recompute normals from winding.

use std::io::Write;

use shadowbox_geom::{IVec3, Triangle};
use thiserror::Error;

pub const HEADER_LEN: usize = 80;
pub const COUNT_LEN: usize = 4;
pub const RECORD_LEN: usize = 50;

#[derive(Debug, Error)]
pub enum StlError {
    #[error("{count} triangles do not fit in a binary STL count field")]
    TooManyTriangles { count: usize },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Exact encoded size for `n` triangles.
#[inline]
pub const fn encoded_len(n: usize) -> usize {
    HEADER_LEN + COUNT_LEN + RECORD_LEN * n
}

fn triangle_count(tris: &[Triangle]) -> Result<u32, StlError> {
    u32::try_from(tris.len()).map_err(|_| StlError::TooManyTriangles { count: tris.len() })
}

#[inline]
fn put_vertex(out: &mut Vec<u8>, p: IVec3, scale: f64) {
    // Scale in f64, round to f32 once.
    for c in [p.x, p.y, p.z] {
        out.extend_from_slice(&((c as f64 * scale) as f32).to_le_bytes());
    }
}

fn put_record(out: &mut Vec<u8>, t: &Triangle, scale: f64) {
    out.extend_from_slice(&[0u8; 12]);
    for &p in &t.v {
        put_vertex(out, p, scale);
    }
    out.extend_from_slice(&0u16.to_le_bytes());
}

/// Encodes `tris` in order, each coordinate multiplied by `scale`.
pub fn encode_binary_stl(tris: &[Triangle], scale: f64) -> Result<Vec<u8>, StlError> {
    let count = triangle_count(tris)?;
    let mut out = Vec::with_capacity(encoded_len(tris.len()));
    out.extend_from_slice(&[0u8; HEADER_LEN]);
    out.extend_from_slice(&count.to_le_bytes());
    for t in tris {
        put_record(&mut out, t, scale);
    }
    debug_assert_eq!(out.len(), encoded_len(tris.len()));
    log::debug!("encode_binary_stl: {} triangle(s), {} byte(s)", count, out.len());
    Ok(out)
}

/// Streams the same bytes as [`encode_binary_stl`] into `w`.
pub fn write_binary_stl<W: Write>(mut w: W, tris: &[Triangle], scale: f64) -> Result<(), StlError> {
    let count = triangle_count(tris)?;
    w.write_all(&[0u8; HEADER_LEN])?;
    w.write_all(&count.to_le_bytes())?;
    let mut rec = Vec::with_capacity(RECORD_LEN);
    for t in tris {
        rec.clear();
        put_record(&mut rec, t, scale);
        w.write_all(&rec)?;
    }
    w.flush()?;
    Ok(())
}

/// Triangle count field of an encoded buffer, if it is long enough to hold one.
pub fn read_triangle_count(bytes: &[u8]) -> Option<u32> {
    let field = bytes.get(HEADER_LEN..HEADER_LEN + COUNT_LEN)?;
    Some(u32::from_le_bytes(field.try_into().ok()?))
}

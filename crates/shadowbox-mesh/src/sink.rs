use shadowbox_geom::{IVec3, Mesh, Triangle};

/// Receives planar quads from the extractor.
pub trait QuadSink {
    /// `corners` go around the quad in either direction; `normal` is the side it must face.
    fn push_quad(&mut self, corners: [IVec3; 4], normal: IVec3);
}

/// Splits a quad into two triangles along the p0-p2 diagonal, wound so that
/// the right-hand-rule normal agrees with `normal`.
#[inline]
pub fn quad_triangles(corners: [IVec3; 4], normal: IVec3) -> [Triangle; 2] {
    let mut vs = corners;
    let cross = (vs[1] - vs[0]).cross(vs[2] - vs[0]);
    if cross.dot(normal) < 0 {
        vs.swap(1, 3);
    }
    [
        Triangle::new(vs[0], vs[1], vs[2]),
        Triangle::new(vs[0], vs[2], vs[3]),
    ]
}

impl QuadSink for Mesh {
    #[inline]
    fn push_quad(&mut self, corners: [IVec3; 4], normal: IVec3) {
        let [a, b] = quad_triangles(corners, normal);
        self.push(a);
        self.push(b);
    }
}

/// Counts quads without storing them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuadCounter(pub usize);

impl QuadSink for QuadCounter {
    #[inline]
    fn push_quad(&mut self, _corners: [IVec3; 4], _normal: IVec3) {
        self.0 += 1;
    }
}

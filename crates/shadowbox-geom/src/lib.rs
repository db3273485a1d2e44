//! Fixed-point geometry types shared by the meshing crates.
#![forbid(unsafe_code)]

use core::ops::{Add, Mul, Neg, Sub};

/// Integer point in grid units (voxel index times resolution, plus insets).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct IVec3 {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl IVec3 {
    pub const ZERO: IVec3 = IVec3 { x: 0, y: 0, z: 0 };

    #[inline]
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Component by axis index `0..3` (x, y, z).
    #[inline]
    pub fn get(self, axis: usize) -> i64 {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    #[inline]
    pub fn set(&mut self, axis: usize, v: i64) {
        match axis {
            0 => self.x = v,
            1 => self.y = v,
            _ => self.z = v,
        }
    }

    #[inline]
    pub fn dot(self, rhs: IVec3) -> i64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[inline]
    pub fn cross(self, rhs: IVec3) -> IVec3 {
        IVec3 {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    #[inline]
    pub fn min(self, rhs: IVec3) -> IVec3 {
        IVec3::new(self.x.min(rhs.x), self.y.min(rhs.y), self.z.min(rhs.z))
    }

    #[inline]
    pub fn max(self, rhs: IVec3) -> IVec3 {
        IVec3::new(self.x.max(rhs.x), self.y.max(rhs.y), self.z.max(rhs.z))
    }
}

impl Add for IVec3 {
    type Output = IVec3;
    #[inline]
    fn add(self, rhs: IVec3) -> IVec3 {
        IVec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for IVec3 {
    type Output = IVec3;
    #[inline]
    fn sub(self, rhs: IVec3) -> IVec3 {
        IVec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for IVec3 {
    type Output = IVec3;
    #[inline]
    fn neg(self) -> IVec3 {
        IVec3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<i64> for IVec3 {
    type Output = IVec3;
    #[inline]
    fn mul(self, rhs: i64) -> IVec3 {
        IVec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Aabb {
    pub min: IVec3,
    pub max: IVec3,
}

impl Aabb {
    #[inline]
    pub fn point(p: IVec3) -> Self {
        Self { min: p, max: p }
    }

    #[inline]
    pub fn include(&mut self, p: IVec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    #[inline]
    pub fn extent(&self) -> IVec3 {
        self.max - self.min
    }
}

/// One output triangle. No normal is stored; winding carries orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub v: [IVec3; 3],
}

impl Triangle {
    #[inline]
    pub const fn new(a: IVec3, b: IVec3, c: IVec3) -> Self {
        Self { v: [a, b, c] }
    }

    /// Right-hand-rule normal, not normalized (twice the triangle area in length).
    #[inline]
    pub fn normal_unscaled(&self) -> IVec3 {
        (self.v[1] - self.v[0]).cross(self.v[2] - self.v[0])
    }

    /// Six times the signed volume of the tetrahedron spanned with the origin.
    #[inline]
    pub fn signed_volume6(&self) -> i128 {
        let c = self.v[1].cross(self.v[2]);
        i128::from(self.v[0].x) * i128::from(c.x)
            + i128::from(self.v[0].y) * i128::from(c.y)
            + i128::from(self.v[0].z) * i128::from(c.z)
    }
}

/// Ordered triangle list. Order is the emission order and is kept stable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mesh {
    pub tris: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            tris: Vec::with_capacity(n),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tris.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tris.is_empty()
    }

    #[inline]
    pub fn push(&mut self, t: Triangle) {
        self.tris.push(t);
    }

    /// Appends another mesh, preserving both orders.
    pub fn append(&mut self, other: &mut Mesh) {
        self.tris.append(&mut other.tris);
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.tris
    }

    pub fn bounds(&self) -> Option<Aabb> {
        let mut it = self.tris.iter().flat_map(|t| t.v.iter().copied());
        let first = it.next()?;
        let mut bb = Aabb::point(first);
        for p in it {
            bb.include(p);
        }
        Some(bb)
    }

    /// Enclosed volume in cubic grid units. Positive when faces wind outward.
    pub fn signed_volume(&self) -> f64 {
        let six: i128 = self.tris.iter().map(Triangle::signed_volume6).sum();
        six as f64 / 6.0
    }
}

impl FromIterator<Triangle> for Mesh {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        Mesh {
            tris: iter.into_iter().collect(),
        }
    }
}

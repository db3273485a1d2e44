//! Voxel occupancy grid and the floating-voxel filter.
#![forbid(unsafe_code)]

pub mod filter;

pub use filter::{DisjointSet, TrimReport, trim_floating};

use thiserror::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The two axes perpendicular to this one, in ascending order.
    #[inline]
    pub fn perpendicular(self) -> (Axis, Axis) {
        match self {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }

    /// Unit step `(dx,dy,dz)` along this axis.
    #[inline]
    pub fn unit(self) -> (i64, i64, i64) {
        match self {
            Axis::X => (1, 0, 0),
            Axis::Y => (0, 1, 0),
            Axis::Z => (0, 0, 1),
        }
    }
}

/// One grid cell packed into the low nibble of a byte.
/// Bit 0: solid. Bits 1..=3: carries a wall normal to X, Y, Z.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Voxel(pub u8);

impl Voxel {
    pub const SOLID: u8 = 0x01;
    pub const SURFACE_X: u8 = 0x02;
    pub const SURFACE_Y: u8 = 0x04;
    pub const SURFACE_Z: u8 = 0x08;
    pub const MASK: u8 = 0x0F;

    pub const EMPTY: Voxel = Voxel(0);
    pub const FULL: Voxel = Voxel(Self::MASK);

    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Voxel(bits & Self::MASK)
    }

    #[inline]
    pub const fn surface_bit(axis: Axis) -> u8 {
        match axis {
            Axis::X => Self::SURFACE_X,
            Axis::Y => Self::SURFACE_Y,
            Axis::Z => Self::SURFACE_Z,
        }
    }

    /// Non-solid cell carrying walls on the given axes.
    pub fn lattice(axes: &[Axis]) -> Self {
        Voxel(axes.iter().fold(0, |acc, &a| acc | Self::surface_bit(a)))
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0 & Self::MASK
    }

    #[inline]
    pub const fn is_solid(self) -> bool {
        self.0 & Self::SOLID != 0
    }

    #[inline]
    pub const fn is_active(self) -> bool {
        self.bits() != 0
    }

    /// Effective surface: a solid cell has walls on every axis.
    #[inline]
    pub const fn has_surface(self, axis: Axis) -> bool {
        self.0 & (Self::SOLID | Self::surface_bit(axis)) != 0
    }

    /// Raw flag, ignoring the solid bit.
    #[inline]
    pub const fn surface_flag(self, axis: Axis) -> bool {
        self.0 & Self::surface_bit(axis) != 0
    }

    #[inline]
    pub const fn is_fully_solid(self) -> bool {
        self.has_surface(Axis::X) && self.has_surface(Axis::Y) && self.has_surface(Axis::Z)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("voxel data length {got} does not match {sx}x{sy}x{sz} = {expected}")]
    LengthMismatch {
        sx: usize,
        sy: usize,
        sz: usize,
        expected: usize,
        got: usize,
    },
    #[error("grid dimensions {sx}x{sy}x{sz} overflow usize")]
    TooLarge { sx: usize, sy: usize, sz: usize },
}

/// Dense grid indexed `x + sx * (y + sy * z)`.
///
/// Every query takes signed coordinates. Anything outside `[0, size)` reads as
/// empty space: not solid, no surfaces, empty.
///
/// Dimensions are fixed at construction and read through [`VoxelGrid::dims`]:
///
/// ```compile_fail
/// let mut g = shadowbox_grid::VoxelGrid::new(2, 2, 2);
/// g.sx = 3;
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelGrid {
    sx: usize,
    sy: usize,
    sz: usize,
    voxels: Vec<Voxel>,
}

impl VoxelGrid {
    /// All-empty grid. Use [`VoxelGrid::from_voxels`] for untrusted dimensions.
    pub fn new(sx: usize, sy: usize, sz: usize) -> Self {
        VoxelGrid {
            sx,
            sy,
            sz,
            voxels: vec![Voxel::EMPTY; sx * sy * sz],
        }
    }

    /// Builds a grid by evaluating `f` in index order (x fastest, then y, then z).
    pub fn from_fn(
        sx: usize,
        sy: usize,
        sz: usize,
        mut f: impl FnMut(usize, usize, usize) -> Voxel,
    ) -> Self {
        let mut grid = VoxelGrid::new(sx, sy, sz);
        for z in 0..sz {
            for y in 0..sy {
                for x in 0..sx {
                    let i = grid.idx(x, y, z);
                    grid.voxels[i] = Voxel::from_bits(f(x, y, z).0);
                }
            }
        }
        grid
    }

    pub fn from_voxels(sx: usize, sy: usize, sz: usize, voxels: Vec<Voxel>) -> Result<Self, GridError> {
        let expected = sx
            .checked_mul(sy)
            .and_then(|v| v.checked_mul(sz))
            .ok_or(GridError::TooLarge { sx, sy, sz })?;
        if voxels.len() != expected {
            return Err(GridError::LengthMismatch {
                sx,
                sy,
                sz,
                expected,
                got: voxels.len(),
            });
        }
        let voxels = voxels.into_iter().map(|v| Voxel::from_bits(v.0)).collect();
        Ok(VoxelGrid { sx, sy, sz, voxels })
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.sx, self.sy, self.sz)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    #[inline]
    pub fn is_zero_sized(&self) -> bool {
        self.voxels.is_empty()
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.sx * (y + self.sy * z)
    }

    /// Inverse of [`VoxelGrid::idx`].
    #[inline]
    pub fn coords(&self, i: usize) -> (usize, usize, usize) {
        let x = i % self.sx;
        let rest = i / self.sx;
        (x, rest % self.sy, rest / self.sy)
    }

    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64, z: i64) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as u64) < self.sx as u64
            && (y as u64) < self.sy as u64
            && (z as u64) < self.sz as u64
    }

    /// The cell at `(x,y,z)`, or `Voxel::EMPTY` outside the grid.
    #[inline]
    pub fn voxel(&self, x: i64, y: i64, z: i64) -> Voxel {
        if !self.in_bounds(x, y, z) {
            return Voxel::EMPTY;
        }
        self.voxels[self.idx(x as usize, y as usize, z as usize)]
    }

    /// The cell at linear index `i`, or `Voxel::EMPTY` past the end.
    #[inline]
    pub fn voxel_at(&self, i: usize) -> Voxel {
        self.voxels.get(i).copied().unwrap_or(Voxel::EMPTY)
    }

    #[inline]
    pub fn solid(&self, x: i64, y: i64, z: i64) -> bool {
        self.voxel(x, y, z).is_solid()
    }

    #[inline]
    pub fn has_surface(&self, axis: Axis, x: i64, y: i64, z: i64) -> bool {
        self.voxel(x, y, z).has_surface(axis)
    }

    #[inline]
    pub fn is_empty(&self, x: i64, y: i64, z: i64) -> bool {
        !self.voxel(x, y, z).is_active()
    }

    #[inline]
    pub fn is_fully_solid(&self, x: i64, y: i64, z: i64) -> bool {
        self.voxel(x, y, z).is_fully_solid()
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, v: Voxel) {
        let i = self.idx(x, y, z);
        self.voxels[i] = Voxel::from_bits(v.0);
    }

    #[inline]
    pub fn clear(&mut self, x: usize, y: usize, z: usize) {
        self.set(x, y, z, Voxel::EMPTY);
    }

    #[inline]
    pub(crate) fn clear_index(&mut self, i: usize) {
        self.voxels[i] = Voxel::EMPTY;
    }

    #[inline]
    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    pub fn active_count(&self) -> usize {
        self.voxels.iter().filter(|v| v.is_active()).count()
    }

    #[inline]
    pub fn has_active(&self) -> bool {
        self.voxels.iter().any(|v| v.is_active())
    }
}

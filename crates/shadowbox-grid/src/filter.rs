//! Floating-voxel removal: keep only the largest connected mass.
//!
//! Two axis-adjacent active voxels touch along axis `a` when, for at least one
//! of the two axes perpendicular to `a`, both carry a wall on that axis. Their
//! wall skins then overlap on the shared face.
//!
//! Components are built with an array-backed disjoint set (path compression,
//! union by size) in a single sweep over the grid. Among components of equal
//! maximal size, the one containing the lowest linear voxel index is kept.

use crate::{Axis, VoxelGrid};

/// Disjoint-set forest over `0..n`.
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    /// Root of the set containing `x`, compressing the path on the way out.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Merges the sets of `a` and `b`. Returns false if they were already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        let (big, small) = if self.size[ra] >= self.size[rb] { (ra, rb) } else { (rb, ra) };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        true
    }

    /// Member count of the set containing `x`.
    pub fn set_size(&mut self, x: usize) -> usize {
        let r = self.find(x);
        self.size[r]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrimReport {
    /// Connected components among active voxels before trimming.
    pub components: usize,
    /// Active voxels left in the grid.
    pub kept: usize,
    /// Active voxels cleared.
    pub removed: usize,
}

/// True if the voxel at `(x,y,z)` and its `+axis` neighbour are both active and
/// share a wall skin. Out-of-bounds neighbours never connect.
pub fn connected(grid: &VoxelGrid, x: i64, y: i64, z: i64, axis: Axis) -> bool {
    let (dx, dy, dz) = axis.unit();
    let (nx, ny, nz) = (x + dx, y + dy, z + dz);
    let (p, q) = axis.perpendicular();
    (grid.has_surface(p, x, y, z) && grid.has_surface(p, nx, ny, nz))
        || (grid.has_surface(q, x, y, z) && grid.has_surface(q, nx, ny, nz))
}

/// Clears every active voxel outside the largest connected component.
/// An empty grid is left untouched.
pub fn trim_floating(grid: &mut VoxelGrid) -> TrimReport {
    let n = grid.len();
    if !grid.has_active() {
        return TrimReport::default();
    }

    let mut sets = DisjointSet::new(n);
    let (sx, sy, sz) = grid.dims();
    for z in 0..sz {
        for y in 0..sy {
            for x in 0..sx {
                let (xi, yi, zi) = (x as i64, y as i64, z as i64);
                if grid.is_empty(xi, yi, zi) {
                    continue;
                }
                let here = grid.idx(x, y, z);
                for axis in Axis::ALL {
                    if !connected(grid, xi, yi, zi, axis) {
                        continue;
                    }
                    let (dx, dy, dz) = axis.unit();
                    let there = grid.idx(x + dx as usize, y + dy as usize, z + dz as usize);
                    sets.union(here, there);
                }
            }
        }
    }

    // First root reached in index order with the strictly largest size wins.
    let mut components = 0usize;
    let mut best: Option<(usize, usize)> = None;
    for i in 0..n {
        if !grid.voxel_at(i).is_active() {
            continue;
        }
        let root = sets.find(i);
        if root == i {
            components += 1;
        }
        let size = sets.set_size(root);
        if best.is_none_or(|(_, s)| size > s) {
            best = Some((root, size));
        }
    }
    let Some((keep_root, kept)) = best else {
        return TrimReport::default();
    };

    let mut removed = 0usize;
    for i in 0..n {
        if grid.voxel_at(i).is_active() && sets.find(i) != keep_root {
            grid.clear_index(i);
            removed += 1;
        }
    }

    log::debug!(
        "trim_floating: {} component(s), kept {} voxel(s), removed {}",
        components,
        kept,
        removed
    );
    TrimReport {
        components,
        kept,
        removed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Voxel;

    #[test]
    fn disjoint_set_merges_by_size() {
        let mut ds = DisjointSet::new(6);
        assert!(ds.union(0, 1));
        assert!(ds.union(1, 2));
        assert!(!ds.union(0, 2));
        assert!(ds.union(4, 5));
        assert_eq!(ds.set_size(2), 3);
        assert_eq!(ds.set_size(5), 2);
        assert_eq!(ds.set_size(3), 1);
        assert_eq!(ds.find(0), ds.find(2));
        assert_ne!(ds.find(0), ds.find(4));
        // Smaller set hangs under the larger root.
        let big = ds.find(0);
        assert!(ds.union(4, 0));
        assert_eq!(ds.find(5), big);
        assert_eq!(ds.set_size(3), 1);
    }

    #[test]
    fn connected_needs_a_shared_perpendicular_wall() {
        // Along X: Y with Y connects, Y with Z does not.
        let g = VoxelGrid::from_fn(3, 1, 1, |x, _, _| match x {
            0 => Voxel::lattice(&[Axis::Y]),
            1 => Voxel::lattice(&[Axis::Y]),
            _ => Voxel::lattice(&[Axis::Z]),
        });
        assert!(connected(&g, 0, 0, 0, Axis::X));
        assert!(!connected(&g, 1, 0, 0, Axis::X));
        // A wall along the step axis itself does not count.
        let g = VoxelGrid::from_fn(2, 1, 1, |_, _, _| Voxel::lattice(&[Axis::X]));
        assert!(!connected(&g, 0, 0, 0, Axis::X));
        // Edge of the grid never connects.
        assert!(!connected(&g, 1, 0, 0, Axis::X));
    }

    #[test]
    fn empty_grid_is_a_no_op() {
        let mut g = VoxelGrid::new(3, 3, 3);
        let before = g.clone();
        assert_eq!(trim_floating(&mut g), TrimReport::default());
        assert_eq!(g, before);

        let mut zero = VoxelGrid::new(0, 4, 4);
        assert_eq!(trim_floating(&mut zero), TrimReport::default());
    }

    #[test]
    fn equal_components_keep_lowest_index() {
        // Two 2-voxel bars along X separated by a gap; both size 2.
        let mut g = VoxelGrid::from_fn(5, 1, 1, |x, _, _| {
            if x == 2 { Voxel::EMPTY } else { Voxel::FULL }
        });
        let report = trim_floating(&mut g);
        assert_eq!(report, TrimReport { components: 2, kept: 2, removed: 2 });
        assert!(g.solid(0, 0, 0) && g.solid(1, 0, 0));
        assert!(g.is_empty(3, 0, 0) && g.is_empty(4, 0, 0));
    }
}

use shadowbox_grid::{Axis, TrimReport, Voxel, VoxelGrid, trim_floating};

const S: Voxel = Voxel::FULL;
const E: Voxel = Voxel::EMPTY;

fn lat(axes: &[Axis]) -> Voxel {
    Voxel::lattice(axes)
}

/// A one-voxel-thick line of cells laid out along `axis`.
fn line(axis: Axis, cells: &[Voxel]) -> VoxelGrid {
    let n = cells.len();
    let (sx, sy, sz) = match axis {
        Axis::X => (n, 1, 1),
        Axis::Y => (1, n, 1),
        Axis::Z => (1, 1, n),
    };
    VoxelGrid::from_fn(sx, sy, sz, |x, y, z| cells[x + y + z])
}

fn at(g: &VoxelGrid, axis: Axis, i: usize) -> Voxel {
    let i = i as i64;
    match axis {
        Axis::X => g.voxel(i, 0, 0),
        Axis::Y => g.voxel(0, i, 0),
        Axis::Z => g.voxel(0, 0, i),
    }
}

fn solid_count(g: &VoxelGrid) -> usize {
    g.voxels().iter().filter(|v| v.is_solid()).count()
}

fn is_ring_cell(y: usize, z: usize) -> bool {
    y == 0 || z == 0 || y == 4 || z == 4
}

#[test]
fn ring_survives_and_floating_centre_is_removed() {
    let mut g = VoxelGrid::from_fn(1, 5, 5, |_, y, z| {
        if is_ring_cell(y, z) || (y == 2 && z == 2) { S } else { E }
    });
    let report = trim_floating(&mut g);
    assert_eq!(report, TrimReport { components: 2, kept: 16, removed: 1 });
    assert_eq!(solid_count(&g), 16);
    for y in 0..5 {
        for z in 0..5 {
            assert_eq!(
                g.solid(0, y as i64, z as i64),
                is_ring_cell(y, z),
                "unexpected solid at y={y} z={z}"
            );
        }
    }
}

#[test]
fn single_voxel_component_is_preserved() {
    let mut g = VoxelGrid::from_fn(1, 1, 1, |_, _, _| S);
    let report = trim_floating(&mut g);
    assert_eq!(report, TrimReport { components: 1, kept: 1, removed: 0 });
    assert!(g.solid(0, 0, 0));
}

#[test]
fn smaller_component_is_removed() {
    let mut g = line(Axis::Y, &[S, S, E, S]);
    trim_floating(&mut g);
    assert_eq!(solid_count(&g), 2);
    assert!(g.solid(0, 0, 0));
    assert!(g.solid(0, 1, 0));
    assert!(!g.solid(0, 3, 0));
}

#[test]
fn larger_component_beats_the_origin_voxel() {
    let mut g = VoxelGrid::from_fn(4, 2, 1, |x, y, _| {
        if (x == 0 && y == 0) || x >= 2 { S } else { E }
    });
    trim_floating(&mut g);
    assert_eq!(solid_count(&g), 4);
    assert!(!g.solid(0, 0, 0));
    for (x, y) in [(2, 0), (3, 0), (2, 1), (3, 1)] {
        assert!(g.solid(x, y, 0));
    }
}

#[test]
fn wall_along_the_step_axis_does_not_bridge() {
    for axis in Axis::ALL {
        // S | wall-on-axis | S S S, forwards and reversed.
        let forward = [S, lat(&[axis]), S, S, S];
        let mut g = line(axis, &forward);
        trim_floating(&mut g);
        assert_eq!(solid_count(&g), 3, "{axis:?} forward");
        assert!(!at(&g, axis, 0).is_solid());
        assert!((2..5).all(|i| at(&g, axis, i).is_solid()));

        let mut reversed = forward;
        reversed.reverse();
        let mut g = line(axis, &reversed);
        trim_floating(&mut g);
        assert_eq!(solid_count(&g), 3, "{axis:?} reversed");
        assert!(!at(&g, axis, 4).is_solid());
        assert!((0..3).all(|i| at(&g, axis, i).is_solid()));
    }
}

#[test]
fn mismatched_perpendicular_walls_split_the_line() {
    for axis in Axis::ALL {
        let (p, q) = axis.perpendicular();
        for (first, second) in [(p, q), (q, p)] {
            // S [first] [second] S S: S-first joins, first-second does not, second-S-S joins.
            let mut g = line(axis, &[S, lat(&[first]), lat(&[second]), S, S]);
            let report = trim_floating(&mut g);
            assert_eq!(report.components, 2);
            assert_eq!(g.active_count(), 3, "{axis:?} {first:?}->{second:?}");
            assert!(at(&g, axis, 0) == E && at(&g, axis, 1) == E);
            let kept = at(&g, axis, 2);
            assert!(!kept.is_solid());
            assert!(kept.surface_flag(second));
            assert!(at(&g, axis, 3).is_solid() && at(&g, axis, 4).is_solid());
        }
    }
}

#[test]
fn shared_wall_chain_stays_whole() {
    for axis in Axis::ALL {
        let (p, q) = axis.perpendicular();
        let mut g = line(axis, &[S, lat(&[p]), lat(&[p, q]), lat(&[q]), S]);
        let report = trim_floating(&mut g);
        assert_eq!(report, TrimReport { components: 1, kept: 5, removed: 0 });
        assert!(at(&g, axis, 0).is_solid() && at(&g, axis, 4).is_solid());
    }
}

#[test]
fn equal_components_are_resolved_deterministically() {
    let build = || {
        VoxelGrid::from_fn(3, 3, 1, |x, y, _| {
            // Two disjoint 2-voxel bars: (0,0)-(1,0) and (0,2)-(1,2).
            if x < 2 && (y == 0 || y == 2) { S } else { E }
        })
    };
    let mut a = build();
    let mut b = build();
    trim_floating(&mut a);
    trim_floating(&mut b);
    assert_eq!(a, b);
    // The bar holding linear index 0 wins.
    assert!(a.solid(0, 0, 0) && a.solid(1, 0, 0));
    assert!(a.is_empty(0, 2, 0) && a.is_empty(1, 2, 0));
}

#[test]
fn trimming_twice_changes_nothing() {
    let mut g = VoxelGrid::from_fn(4, 4, 4, |x, y, z| {
        if (x + 2 * y + 3 * z) % 3 == 0 { S } else { E }
    });
    trim_floating(&mut g);
    let once = g.clone();
    let report = trim_floating(&mut g);
    assert_eq!(g, once);
    assert_eq!(report.removed, 0);
    assert!(report.components <= 1);
}

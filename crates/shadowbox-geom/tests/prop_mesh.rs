use proptest::prelude::*;
use shadowbox_geom::{Aabb, IVec3, Mesh, Triangle};

fn coord() -> impl Strategy<Value = i64> {
    -10_000i64..10_000
}

fn arb_ivec3() -> impl Strategy<Value = IVec3> {
    (coord(), coord(), coord()).prop_map(|(x, y, z)| IVec3::new(x, y, z))
}

/// Outward-wound box with corners `lo` and `lo + size`.
fn box_mesh(lo: IVec3, size: IVec3) -> Mesh {
    let hi = lo + size;
    let c = |x: bool, y: bool, z: bool| {
        IVec3::new(
            if x { hi.x } else { lo.x },
            if y { hi.y } else { lo.y },
            if z { hi.z } else { lo.z },
        )
    };
    let quads = [
        [c(false, false, false), c(false, true, false), c(true, true, false), c(true, false, false)],
        [c(false, false, true), c(true, false, true), c(true, true, true), c(false, true, true)],
        [c(false, false, false), c(true, false, false), c(true, false, true), c(false, false, true)],
        [c(false, true, false), c(false, true, true), c(true, true, true), c(true, true, false)],
        [c(false, false, false), c(false, false, true), c(false, true, true), c(false, true, false)],
        [c(true, false, false), c(true, true, false), c(true, true, true), c(true, false, true)],
    ];
    quads
        .iter()
        .flat_map(|q| [Triangle::new(q[0], q[1], q[2]), Triangle::new(q[0], q[2], q[3])])
        .collect()
}

#[test]
fn box_helper_is_outward() {
    let m = box_mesh(IVec3::ZERO, IVec3::new(2, 2, 2));
    for t in m.triangles() {
        // Three times (centroid - box centre) points out through the face.
        let offset = t.v[0] + t.v[1] + t.v[2] - IVec3::new(3, 3, 3);
        assert!(t.normal_unscaled().dot(offset) > 0, "{t:?}");
    }
    assert_eq!(m.signed_volume(), 8.0);
}

proptest! {
    // A closed box's volume does not depend on where it sits
    #[test]
    fn box_volume_is_translation_invariant(
        lo in arb_ivec3(),
        (sx, sy, sz) in (1i64..200, 1i64..200, 1i64..200),
    ) {
        let m = box_mesh(lo, IVec3::new(sx, sy, sz));
        prop_assert_eq!(m.len(), 12);
        prop_assert_eq!(m.signed_volume(), (sx * sy * sz) as f64);
    }

    // Bounds are the componentwise extremes of every vertex
    #[test]
    fn bounds_cover_every_vertex(pts in prop::collection::vec(arb_ivec3(), 3..30)) {
        let mesh: Mesh = pts
            .chunks_exact(3)
            .map(|c| Triangle::new(c[0], c[1], c[2]))
            .collect();
        let used = &pts[..mesh.len() * 3];
        let bb: Aabb = mesh.bounds().unwrap();
        for p in used {
            prop_assert!(bb.min.x <= p.x && p.x <= bb.max.x);
            prop_assert!(bb.min.y <= p.y && p.y <= bb.max.y);
            prop_assert!(bb.min.z <= p.z && p.z <= bb.max.z);
        }
        prop_assert!(used.iter().any(|p| p.x == bb.min.x));
        prop_assert!(used.iter().any(|p| p.z == bb.max.z));
        let e = bb.extent();
        prop_assert!(e.x >= 0 && e.y >= 0 && e.z >= 0);
    }

    // Reversing every triangle negates the volume
    #[test]
    fn flipped_winding_negates_volume(lo in arb_ivec3(), s in 1i64..100) {
        let m = box_mesh(lo, IVec3::new(s, s, s));
        let flipped: Mesh = m
            .triangles()
            .iter()
            .map(|t| Triangle::new(t.v[0], t.v[2], t.v[1]))
            .collect();
        prop_assert_eq!(flipped.signed_volume(), -m.signed_volume());
    }
}

use glam::{Mat4, Vec3};
use crate::geometry::WorldPoint;
use super::*;

// ============================================================================
// Corner winding
// ============================================================================

#[test]
fn test_corner_winding_top_face_then_bottom_face() {
    let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
    let corners = aabb.corners();

    // Top face (+y), counter-clockwise seen from above starting at (+x, +z)
    assert_eq!(corners[0], Vec3::new(1.0, 1.0, 1.0));
    assert_eq!(corners[1], Vec3::new(-1.0, 1.0, 1.0));
    assert_eq!(corners[2], Vec3::new(-1.0, 1.0, -1.0));
    assert_eq!(corners[3], Vec3::new(1.0, 1.0, -1.0));
    // Bottom face (-y), same x/z order
    assert_eq!(corners[4], Vec3::new(1.0, -1.0, 1.0));
    assert_eq!(corners[5], Vec3::new(-1.0, -1.0, 1.0));
    assert_eq!(corners[6], Vec3::new(-1.0, -1.0, -1.0));
    assert_eq!(corners[7], Vec3::new(1.0, -1.0, -1.0));
}

#[test]
fn test_box_edges_touch_every_corner_three_times() {
    // A box corner joins exactly 3 of the 12 edges
    let mut degree = [0usize; 8];
    for (a, b) in BOX_EDGES {
        degree[a] += 1;
        degree[b] += 1;
    }
    assert_eq!(degree, [3; 8]);
}

#[test]
fn test_box_edges_all_have_unit_manhattan_span() {
    // Each edge of a unit-half-extent box changes exactly one coordinate
    let corners = Aabb::new(Vec3::ZERO, Vec3::ONE).corners();
    for (a, b) in BOX_EDGES {
        let delta = (corners[a] - corners[b]).abs();
        let changed = [delta.x, delta.y, delta.z]
            .iter()
            .filter(|&&d| d > 1e-6)
            .count();
        assert_eq!(changed, 1, "edge ({}, {}) spans more than one axis", a, b);
    }
}

// ============================================================================
// Aabc
// ============================================================================

#[test]
fn test_aabc_to_aabb_is_uniform() {
    let cube = Aabc::new(WorldPoint::new(Vec3::new(2.0, 4.0, -6.0)), 3.0);
    let aabb = cube.to_aabb();

    assert_eq!(aabb.center(), Vec3::new(2.0, 4.0, -6.0));
    assert_eq!(aabb.half_extents(), Vec3::splat(3.0));
}

#[test]
fn test_aabc_contains_point_boundary_is_inside() {
    let cube = Aabc::new(WorldPoint::new(Vec3::ZERO), 2.0);

    assert!(cube.contains_point(Vec3::ZERO));
    assert!(cube.contains_point(Vec3::new(2.0, -2.0, 2.0)));
    assert!(!cube.contains_point(Vec3::new(2.1, 0.0, 0.0)));
}

// ============================================================================
// Aabb
// ============================================================================

#[test]
fn test_aabb_from_min_max() {
    let aabb = Aabb::from_min_max(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(3.0, 4.0, 8.0));

    assert_eq!(aabb.center(), Vec3::new(1.0, 2.0, 5.0));
    assert_eq!(aabb.half_extents(), Vec3::new(2.0, 2.0, 3.0));
    assert_eq!(aabb.min(), Vec3::new(-1.0, 0.0, 2.0));
    assert_eq!(aabb.max(), Vec3::new(3.0, 4.0, 8.0));
}

// ============================================================================
// Obb
// ============================================================================

#[test]
fn test_obb_from_identity_matches_the_aabb() {
    let aabb = Aabb::new(Vec3::new(1.0, 2.0, 3.0), Vec3::splat(0.5));
    let obb = Obb::from_aabb(&aabb, &Mat4::IDENTITY);

    assert_eq!(*obb.corners(), aabb.corners());
    assert_eq!(*obb.axes(), [Vec3::X, Vec3::Y, Vec3::Z]);
}

#[test]
fn test_obb_axes_follow_rotation_and_stay_unit() {
    let rotation = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2);
    let obb = Obb::from_aabb(&Aabb::new(Vec3::ZERO, Vec3::ONE), &rotation);

    for axis in obb.axes() {
        assert!((axis.length() - 1.0).abs() < 1e-5);
    }
    // +x rotates onto -z under a quarter turn around y
    assert!((obb.axes()[0] - Vec3::NEG_Z).length() < 1e-5);
}

#[test]
fn test_obb_zero_scaled_axis_degenerates_to_zero() {
    let flat = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
    let obb = Obb::from_aabb(&Aabb::new(Vec3::ZERO, Vec3::ONE), &flat);

    assert_eq!(obb.axes()[1], Vec3::ZERO);
    assert_eq!(obb.axes()[0], Vec3::X);
    assert_eq!(obb.axes()[2], Vec3::Z);
}

#[test]
fn test_obb_corners_are_transformed_points() {
    let translate = Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0));
    let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
    let obb = Obb::from_aabb(&aabb, &translate);

    for (obb_corner, aabb_corner) in obb.corners().iter().zip(aabb.corners()) {
        assert_eq!(*obb_corner, aabb_corner + Vec3::new(10.0, 0.0, 0.0));
    }
}

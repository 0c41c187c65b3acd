use glam::{Mat4, Vec3};
use super::*;

// ============================================================================
// Construction & access
// ============================================================================

#[test]
fn test_coordinate_wraps_position() {
    let point = WorldPoint::new(Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(point.position(), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_coordinate_is_copy_and_eq() {
    let a = LocalPoint::new(Vec3::ONE);
    let b = a;
    assert_eq!(a, b);
    assert_ne!(a, LocalPoint::new(Vec3::ZERO));
}

#[test]
fn test_debug_output_names_the_space() {
    let local = format!("{:?}", LocalPoint::new(Vec3::ZERO));
    let world = format!("{:?}", WorldPoint::new(Vec3::ZERO));

    assert!(local.contains("local"));
    assert!(world.contains("world"));
}

// ============================================================================
// Space conversion
// ============================================================================

#[test]
fn test_to_world_applies_the_model_matrix() {
    let model_to_world = Mat4::from_translation(Vec3::new(10.0, 0.0, -5.0));
    let local = LocalPoint::new(Vec3::new(1.0, 2.0, 3.0));

    let world = local.to_world(&model_to_world);
    assert_eq!(world.position(), Vec3::new(11.0, 2.0, -2.0));
}

#[test]
fn test_world_local_round_trip() {
    let model_to_world = Mat4::from_rotation_y(0.7) * Mat4::from_translation(Vec3::new(3.0, -1.0, 8.0));
    let world_to_model = model_to_world.inverse();

    let original = WorldPoint::new(Vec3::new(-4.0, 2.5, 1.0));
    let round_tripped = original.to_local(&world_to_model).to_world(&model_to_world);

    assert!((round_tripped.position() - original.position()).length() < 1e-5);
}

#[test]
fn test_coordinate_is_vec3_sized() {
    // The space tag must cost nothing at runtime
    assert_eq!(
        std::mem::size_of::<WorldPoint>(),
        std::mem::size_of::<Vec3>()
    );
}

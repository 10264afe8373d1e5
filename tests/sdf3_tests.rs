//! 3d field algebra: primitives, booleans, transforms, extrusions.

use approx::assert_relative_eq;
use nalgebra::{Matrix4, Point2, Point3, Rotation3, Unit, Vector2, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sdfrs::d2::{Circle, Sdf2};
use sdfrs::d3::{
    Array3, Box3, Cone, Cut3, Cylinder, Difference3, Extrude, Intersection3, Revolve,
    RotateCopy3, ScaleUniform3, Sdf3, Sphere, Transform3, Union3,
};
use sdfrs::errors::ValidationError;
use sdfrs::float_types::Real;

#[test]
fn sphere_is_exact() {
    let s = Sphere::new(2.0).unwrap();
    assert_relative_eq!(s.evaluate(&Point3::origin()), -2.0);
    assert_relative_eq!(s.evaluate(&Point3::new(2.0, 0.0, 0.0)), 0.0);
    assert_relative_eq!(s.evaluate(&Point3::new(0.0, 0.0, 5.0)), 3.0);
    assert_relative_eq!(s.bounding_box().min.z, -2.0);
}

#[test]
fn box3_closed_form() {
    let b = Box3::new(Vector3::new(2.0, 4.0, 6.0), 0.0).unwrap();
    assert_relative_eq!(b.evaluate(&Point3::origin()), -1.0);
    assert_relative_eq!(b.evaluate(&Point3::new(1.0, 0.0, 0.0)), 0.0);
    assert_relative_eq!(b.evaluate(&Point3::new(4.0, 0.0, 0.0)), 3.0);
    // outside an edge the distance is euclidean in the two violated axes
    assert_relative_eq!(
        b.evaluate(&Point3::new(2.0, 3.0, 0.0)),
        (2.0 as Real).sqrt(),
        epsilon = 1e-12
    );
}

#[test]
fn cylinder_and_capsule() {
    let c = Cylinder::new(4.0, 1.0, 0.0).unwrap();
    assert_relative_eq!(c.evaluate(&Point3::origin()), -1.0);
    assert_relative_eq!(c.evaluate(&Point3::new(1.0, 0.0, 0.0)), 0.0);
    assert_relative_eq!(c.evaluate(&Point3::new(0.0, 0.0, 3.0)), 1.0);
    assert_relative_eq!(c.evaluate(&Point3::new(3.0, 0.0, 0.0)), 2.0);

    let cap = Cylinder::capsule(4.0, 1.0).unwrap();
    // the cap is hemispherical: on-axis distance reaches zero at z = 2
    assert_relative_eq!(cap.evaluate(&Point3::new(0.0, 0.0, 2.0)), 0.0);
    assert_relative_eq!(cap.evaluate(&Point3::new(0.0, 0.0, 3.0)), 1.0);
    // diagonal from the cap center at z = 1
    let d = cap.evaluate(&Point3::new(1.0, 0.0, 2.0));
    assert_relative_eq!(d, (2.0 as Real).sqrt() - 1.0, epsilon = 1e-12);
}

#[test]
fn cone_surface_and_axis() {
    // a 45 degree cone: base radius 2, top radius 1, height 1
    let c = Cone::new(1.0, 2.0, 1.0, 0.0).unwrap();
    // on the slope surface
    assert_relative_eq!(c.evaluate(&Point3::new(1.5, 0.0, 0.0)), 0.0, epsilon = 1e-12);
    // above the top face
    assert_relative_eq!(c.evaluate(&Point3::new(0.0, 0.0, 1.5)), 1.0);
    // below the base face
    assert_relative_eq!(c.evaluate(&Point3::new(0.0, 0.0, -1.5)), 1.0);
    // interior
    assert!(c.evaluate(&Point3::origin()) < 0.0);
    // outside the base vertex
    let d = c.evaluate(&Point3::new(3.0, 0.0, -0.5));
    assert_relative_eq!(d, 1.0, epsilon = 1e-12);
}

#[test]
fn union_law_matches_min() {
    let a = Sphere::new(1.0).unwrap();
    let b = Box3::new(Vector3::new(1.0, 1.0, 1.0), 0.0).unwrap();
    let u = Union3::new(vec![
        Box::new(Sphere::new(1.0).unwrap()) as Box<dyn Sdf3>,
        Box::new(Box3::new(Vector3::new(1.0, 1.0, 1.0), 0.0).unwrap()),
    ])
    .unwrap();
    for p in [
        Point3::new(0.2, -0.1, 0.4),
        Point3::new(1.5, 0.0, 0.0),
        Point3::new(-2.0, 2.0, 1.0),
    ] {
        assert_relative_eq!(
            u.evaluate(&p),
            a.evaluate(&p).min(b.evaluate(&p)),
            epsilon = 1e-12
        );
    }
}

#[test]
fn difference_law_matches_max_of_negation() {
    let a = Sphere::new(2.0).unwrap();
    let b = Sphere::new(1.0).unwrap();
    let d = Difference3::new(
        Box::new(Sphere::new(2.0).unwrap()),
        Box::new(Sphere::new(1.0).unwrap()),
    );
    for p in [
        Point3::origin(),
        Point3::new(1.5, 0.0, 0.0),
        Point3::new(0.0, 3.0, 0.0),
    ] {
        assert_relative_eq!(
            d.evaluate(&p),
            a.evaluate(&p).max(-b.evaluate(&p)),
            epsilon = 1e-12
        );
    }
}

#[test]
fn intersection_law_matches_max() {
    let a = Sphere::new(1.0).unwrap();
    let b = Box3::new(Vector3::new(1.0, 1.0, 4.0), 0.0).unwrap();
    let i = Intersection3::new(
        Box::new(Sphere::new(1.0).unwrap()),
        Box::new(Box3::new(Vector3::new(1.0, 1.0, 4.0), 0.0).unwrap()),
    );
    for p in [
        Point3::origin(),
        Point3::new(0.0, 0.0, 0.9),
        Point3::new(0.75, 0.0, 0.0),
    ] {
        assert_relative_eq!(
            i.evaluate(&p),
            a.evaluate(&p).max(b.evaluate(&p)),
            epsilon = 1e-12
        );
    }
}

#[test]
fn rigid_transform_preserves_distance() {
    let mut rng = StdRng::seed_from_u64(0x5df5);
    let sphere = Sphere::new(1.0).unwrap();
    for _ in 0..100 {
        let axis = Unit::new_normalize(Vector3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        ));
        let angle: Real = rng.gen_range(0.0..6.28);
        let shift = Vector3::new(
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
        );
        let m = Matrix4::new_translation(&shift)
            * Rotation3::from_axis_angle(&axis, angle).to_homogeneous();
        let t = Transform3::new(Box::new(Sphere::new(1.0).unwrap()), m).unwrap();
        for _ in 0..10 {
            let p = Point3::new(
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
            );
            let q = m.transform_point(&p);
            assert_relative_eq!(t.evaluate(&q), sphere.evaluate(&p), epsilon = 1e-9);
        }
    }
}

#[test]
fn transform_nested_with_its_inverse_is_identity() {
    // general invertible affine maps: rotation, translation, shear and
    // anisotropic scale composed, then undone by the inverse transform
    let mut rng = StdRng::seed_from_u64(0x1d41);
    let sphere = Sphere::new(1.0).unwrap();
    for _ in 0..100 {
        let axis = Unit::new_normalize(Vector3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        ));
        let angle: Real = rng.gen_range(0.0..6.28);
        let shift = Vector3::new(
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
        );
        let mut shear = Matrix4::identity();
        shear[(0, 1)] = rng.gen_range(-1.0..1.0);
        shear[(1, 2)] = rng.gen_range(-1.0..1.0);
        let scale = Matrix4::new_nonuniform_scaling(&Vector3::new(
            rng.gen_range(0.5..2.0),
            rng.gen_range(0.5..2.0),
            rng.gen_range(0.5..2.0),
        ));
        let m = Matrix4::new_translation(&shift)
            * Rotation3::from_axis_angle(&axis, angle).to_homogeneous()
            * shear
            * scale;
        let inv = m.try_inverse().unwrap();
        let forward = Transform3::new(Box::new(Sphere::new(1.0).unwrap()), m).unwrap();
        let round = Transform3::new(Box::new(forward), inv).unwrap();
        for _ in 0..10 {
            let p = Point3::new(
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
            );
            assert_relative_eq!(round.evaluate(&p), sphere.evaluate(&p), epsilon = 1e-9);
        }
    }
}

#[test]
fn uniform_scale_compensates_distance() {
    let mut rng = StdRng::seed_from_u64(0xca1e);
    let sphere = Sphere::new(1.0).unwrap();
    for _ in 0..100 {
        let k: Real = rng.gen_range(0.5..2.0);
        let s = ScaleUniform3::new(Box::new(Sphere::new(1.0).unwrap()), k).unwrap();
        let p = Point3::new(
            rng.gen_range(-3.0..3.0),
            rng.gen_range(-3.0..3.0),
            rng.gen_range(-3.0..3.0),
        );
        assert_relative_eq!(
            s.evaluate(&(p * k)),
            k * sphere.evaluate(&p),
            epsilon = 1e-9
        );
    }
}

#[test]
fn cut_slices_a_sphere() {
    // keep z <= 0
    let c = Cut3::new(
        Box::new(Sphere::new(1.0).unwrap()),
        Point3::origin(),
        Vector3::new(0.0, 0.0, -1.0),
    )
    .unwrap();
    assert!(c.evaluate(&Point3::new(0.0, 0.0, -0.5)) < 0.0);
    assert!(c.evaluate(&Point3::new(0.0, 0.0, 0.5)) > 0.0);
}

#[test]
fn rotate_copy_places_all_copies() {
    let ball = Transform3::new(
        Box::new(Sphere::new(0.5).unwrap()),
        Matrix4::new_translation(&Vector3::new(2.0, 0.0, 0.0)),
    )
    .unwrap();
    let ring = RotateCopy3::new(Box::new(ball), 6).unwrap();
    let theta = sdfrs::float_types::TAU / 6.0;
    for i in 0..6 {
        let a = theta * i as Real;
        let p = Point3::new(2.0 * a.cos(), 2.0 * a.sin(), 0.0);
        assert_relative_eq!(ring.evaluate(&p), -0.5, epsilon = 1e-9);
    }
}

#[test]
fn array_tiles_a_lattice() {
    let grid = Array3::new(
        Box::new(Sphere::new(0.5).unwrap()),
        [2, 2, 2],
        Vector3::new(2.0, 2.0, 2.0),
    )
    .unwrap();
    // the center of every copy is interior at full depth
    for j in 0..2 {
        for k in 0..2 {
            for l in 0..2 {
                let p = Point3::new(2.0 * j as Real, 2.0 * k as Real, 2.0 * l as Real);
                assert_relative_eq!(grid.evaluate(&p), -0.5, epsilon = 1e-12);
            }
        }
    }
    // the lattice midpoint is outside every copy
    assert!(grid.evaluate(&Point3::new(1.0, 1.0, 1.0)) > 0.0);
    // the box spans the original copy extended by the last step
    let bb = grid.bounding_box();
    assert_relative_eq!(bb.min.x, -0.5);
    assert_relative_eq!(bb.max.x, 2.5);
    assert_relative_eq!(bb.max.z, 2.5);
    assert!(matches!(
        Array3::new(
            Box::new(Sphere::new(0.5).unwrap()),
            [2, 0, 2],
            Vector3::new(2.0, 2.0, 2.0)
        ),
        Err(ValidationError::ZeroCount { .. })
    ));
}

#[test]
fn straight_extrusion_matches_profile_and_slab() {
    let e = Extrude::new(Box::new(Circle::new(1.0).unwrap()), 2.0).unwrap();
    let profile = Circle::new(1.0).unwrap();
    for p in [
        Point3::new(0.5, 0.0, 0.0),
        Point3::new(0.0, 2.0, 0.5),
        Point3::new(0.3, -0.3, 1.5),
        Point3::new(0.0, 0.0, -0.9),
    ] {
        let a = profile.evaluate(&Point2::new(p.x, p.y));
        let b = p.z.abs() - 1.0;
        assert_relative_eq!(e.evaluate(&p), a.max(b), epsilon = 1e-12);
    }
    let bb = e.bounding_box();
    assert_relative_eq!(bb.min.z, -1.0);
    assert_relative_eq!(bb.max.z, 1.0);
}

#[test]
fn twisted_extrusion_rotates_the_profile() {
    // a thin box profile twisting a half turn over the height, so the top
    // cross-section sits a quarter turn from the middle one
    let profile = sdfrs::d2::Box2::new(Vector2::new(2.0, 0.5), 0.0).unwrap();
    let e = Extrude::twisted(Box::new(profile), 2.0, sdfrs::float_types::PI).unwrap();
    // at mid-height the profile is unrotated
    assert!(e.evaluate(&Point3::new(0.9, 0.0, 0.0)) < 0.0);
    assert!(e.evaluate(&Point3::new(0.0, 0.9, 0.0)) > 0.0);
    // at the top the profile has turned: the long axis now spans y
    assert!(e.evaluate(&Point3::new(0.9, 0.0, 0.99)) > 0.0);
    assert!(e.evaluate(&Point3::new(0.0, 0.9, 0.99)) < 0.0);
}

#[test]
fn scaled_extrusion_tapers() {
    let e = Extrude::scaled(
        Box::new(Circle::new(1.0).unwrap()),
        2.0,
        Vector2::new(0.5, 0.5),
    )
    .unwrap();
    // full radius at the bottom, half radius at the top
    assert!(e.evaluate(&Point3::new(0.9, 0.0, -0.99)) < 0.0);
    assert!(e.evaluate(&Point3::new(0.9, 0.0, 0.99)) > 0.0);
    assert!(e.evaluate(&Point3::new(0.4, 0.0, 0.99)) < 0.0);
}

#[test]
fn revolved_circle_is_a_torus() {
    // profile: circle radius 1 centered at x = 3 in the profile plane
    let profile = sdfrs::d2::Transform2::new(
        Box::new(Circle::new(1.0).unwrap()),
        nalgebra::Matrix3::new_translation(&Vector2::new(3.0, 0.0)),
    )
    .unwrap();
    let torus = Revolve::new(Box::new(profile)).unwrap();
    // torus closed form: sqrt((sqrt(x^2+y^2) - 3)^2 + z^2) - 1
    for p in [
        Point3::new(3.0, 0.0, 0.0),
        Point3::new(0.0, 4.0, 0.0),
        Point3::new(-3.0, 0.0, 0.5),
        Point3::new(5.0, 0.0, 0.0),
    ] {
        let q = Vector2::new(p.x, p.y).norm();
        let expect = (Vector2::new(q - 3.0, p.z)).norm() - 1.0;
        assert_relative_eq!(torus.evaluate(&p), expect, epsilon = 1e-12);
    }
}

#[test]
fn partial_revolve_cuts_a_wedge() {
    let profile = sdfrs::d2::Transform2::new(
        Box::new(Circle::new(1.0).unwrap()),
        nalgebra::Matrix3::new_translation(&Vector2::new(3.0, 0.0)),
    )
    .unwrap();
    let half = Revolve::partial(Box::new(profile), sdfrs::float_types::PI).unwrap();
    // the +y half is kept
    assert!(half.evaluate(&Point3::new(0.0, 3.0, 0.0)) < 0.0);
    assert!(half.evaluate(&Point3::new(0.0, -3.0, 0.0)) > 0.0);
    assert!(half.evaluate(&Point3::new(3.0, 0.0, 0.0)) <= 0.0);
}

#[test]
fn constructor_validation() {
    assert!(matches!(
        Sphere::new(0.0),
        Err(ValidationError::NonPositive { .. })
    ));
    assert!(matches!(
        Cylinder::new(1.0, 1.0, 0.75),
        Err(ValidationError::RoundTooLarge { .. })
    ));
    assert!(matches!(
        Cone::new(-1.0, 1.0, 1.0, 0.0),
        Err(ValidationError::NonPositive { .. })
    ));
    assert!(matches!(
        Extrude::new(Box::new(Circle::new(1.0).unwrap()), 0.0),
        Err(ValidationError::NonPositive { .. })
    ));
    assert!(matches!(
        Revolve::partial(Box::new(Circle::new(1.0).unwrap()), -1.0),
        Err(ValidationError::Negative { .. })
    ));
    assert!(matches!(
        RotateCopy3::new(Box::new(Sphere::new(1.0).unwrap()), 0),
        Err(ValidationError::ZeroCount { .. })
    ));
}

//! Distance cache: determinism, hit accounting, concurrent sharing.

use nalgebra::{Point2, Point3, Vector2, Vector3};
use sdfrs::d2::{Circle, Sdf2};
use sdfrs::d3::{Sdf3, Sphere};
use sdfrs::float_types::Real;
use sdfrs::render::{DistanceCache2, DistanceCache3};

#[test]
fn cached_values_are_bit_identical_to_direct_evaluation() {
    let s = Sphere::new(2.0).unwrap();
    let origin = Point3::new(-2.5, -2.5, -2.5);
    let resolution = 0.25;
    let dc = DistanceCache3::new(&s, origin, resolution, 6);
    for x in 0..8 {
        for y in 0..8 {
            for z in 0..8 {
                let vi = Vector3::new(x, y, z);
                let (p, d) = dc.evaluate(vi);
                let direct = s.evaluate(&p);
                assert_eq!(d.to_bits(), direct.to_bits());
                // and again through the cache
                let (_, again) = dc.evaluate(vi);
                assert_eq!(d.to_bits(), again.to_bits());
            }
        }
    }
}

#[test]
fn lattice_points_map_to_world_positions() {
    let s = Sphere::new(1.0).unwrap();
    let dc = DistanceCache3::new(&s, Point3::new(1.0, 2.0, 3.0), 0.5, 4);
    let (p, _) = dc.evaluate(Vector3::new(2, 4, 6));
    assert_eq!(p, Point3::new(2.0, 4.0, 6.0));
}

#[test]
fn hit_counter_counts_repeats_only() {
    let s = Sphere::new(1.0).unwrap();
    let dc = DistanceCache3::new(&s, Point3::new(-1.0, -1.0, -1.0), 0.5, 4);
    for i in 0..10 {
        dc.evaluate(Vector3::new(i, 0, 0));
    }
    assert_eq!(dc.hits(), 0);
    assert_eq!(dc.len(), 10);
    for i in 0..10 {
        dc.evaluate(Vector3::new(i, 0, 0));
    }
    assert_eq!(dc.hits(), 10);
    assert_eq!(dc.len(), 10);
}

#[test]
fn lookup_and_store_round_trip() {
    let s = Sphere::new(1.0).unwrap();
    let dc = DistanceCache3::new(&s, Point3::origin(), 1.0, 2);
    let vi = Vector3::new(5, -3, 7);
    assert_eq!(dc.lookup(&vi), None);
    dc.store(vi, 0.125);
    assert_eq!(dc.lookup(&vi), Some(0.125));
}

#[test]
fn concurrent_walkers_share_one_cache() {
    let s = Sphere::new(2.0).unwrap();
    let dc = DistanceCache3::new(&s, Point3::new(-2.5, -2.5, -2.5), 0.5, 5);
    // four threads evaluate overlapping lattice ranges
    std::thread::scope(|scope| {
        for t in 0..4 {
            let dc = &dc;
            scope.spawn(move || {
                for x in t..(t + 6) {
                    for y in 0..6 {
                        for z in 0..6 {
                            dc.evaluate(Vector3::new(x, y, z));
                        }
                    }
                }
            });
        }
    });
    // distinct lattice points: x in 0..9, y and z in 0..6
    assert_eq!(dc.len(), 9 * 6 * 6);
    // every stored value matches a direct evaluation
    for x in 0..9 {
        for y in 0..6 {
            for z in 0..6 {
                let vi = Vector3::new(x, y, z);
                let d = dc.lookup(&vi).expect("point evaluated");
                let p = Point3::new(
                    -2.5 + 0.5 * x as Real,
                    -2.5 + 0.5 * y as Real,
                    -2.5 + 0.5 * z as Real,
                );
                assert_eq!(d.to_bits(), s.evaluate(&p).to_bits());
            }
        }
    }
}

#[test]
fn cache2_mirrors_cache3() {
    let c = Circle::new(1.0).unwrap();
    let dc = DistanceCache2::new(&c, Point2::new(-1.5, -1.5), 0.5, 4);
    let (p, d) = dc.evaluate(Vector2::new(3, 3));
    assert_eq!(p, Point2::new(0.0, 0.0));
    assert_eq!(d.to_bits(), c.evaluate(&p).to_bits());
    dc.evaluate(Vector2::new(3, 3));
    assert_eq!(dc.hits(), 1);
    assert_eq!(dc.len(), 1);
}

// tests/collision_scenarios.rs

use drop_rescue::generator::PolygonGenerator;
use drop_rescue::geometry::{Edge, Point2};
use drop_rescue::intersection::{Contact, PolygonCollision};
use drop_rescue::shape::Shape;
use drop_rescue::terrain::{Terrain, TerrainProfile};
use drop_rescue::transform::Transform2;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Shape {
    Shape::from_points(&[
        Point2::new(x0, y0),
        Point2::new(x1, y0),
        Point2::new(x1, y1),
        Point2::new(x0, y1),
    ])
    .unwrap()
}

fn placed(mut shape: Shape, transform: Transform2) -> Shape {
    shape.update(&transform.to_affine());
    shape
}

#[test]
fn overlapping_and_disjoint_squares() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = rect(5.0, 5.0, 15.0, 15.0);
    let c = rect(20.0, 20.0, 30.0, 30.0);
    assert!(PolygonCollision::intersects(&a, &b));
    assert!(!PolygonCollision::intersects(&a, &c));
}

#[test]
fn squares_sharing_one_edge_touch() {
    let a = rect(0.0, 0.0, 1.0, 1.0);
    let b = rect(1.0, 0.0, 2.0, 1.0);
    assert!(PolygonCollision::intersects(&a, &b));
    assert!(PolygonCollision::intersects(&b, &a));
}

#[test]
fn coincident_edges_alone_do_not_count() {
    let top = Edge::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
    let overlap = Edge::new(Point2::new(5.0, 0.0), Point2::new(15.0, 0.0));
    assert_eq!(top.intersection(&overlap), None);
}

#[test]
fn small_polygon_inside_concave_polygon() {
    // U opening upwards, walls 10 wide
    let u = Shape::from_points(&[
        Point2::new(0.0, 0.0),
        Point2::new(10.0, 0.0),
        Point2::new(10.0, 40.0),
        Point2::new(30.0, 40.0),
        Point2::new(30.0, 0.0),
        Point2::new(40.0, 0.0),
        Point2::new(40.0, 50.0),
        Point2::new(0.0, 50.0),
    ])
    .unwrap();
    let in_wall = rect(2.0, 10.0, 8.0, 20.0);
    let in_gap = rect(15.0, 10.0, 25.0, 20.0);

    assert_eq!(PolygonCollision::find_contact(&u, &in_wall), Some(Contact::Contained));
    assert_eq!(PolygonCollision::find_contact(&in_wall, &u), Some(Contact::Contained));
    // bounds overlap but the square sits in the notch
    assert!(!PolygonCollision::intersects(&u, &in_gap));
}

#[test]
fn upside_down_ship_buried_in_terrain() {
    let profile = TerrainProfile { samples: vec![[0.0, 0.5], [0.5, 0.3], [1.0, 0.5]] };
    let terrain = Terrain::from_profile(&profile, 1024.0, 768.0).unwrap();

    let ship = placed(
        Shape::new(PolygonGenerator::ship_hull(32.0, 32.0)).unwrap(),
        Transform2::new(Vec2::new(512.0, 700.0), std::f32::consts::PI, Vec2::ONE),
    );
    assert_eq!(ship.count(), 8);
    assert_eq!(PolygonCollision::find_contact(&ship, terrain.shape()), Some(Contact::Contained));
    assert_eq!(PolygonCollision::find_contact(terrain.shape(), &ship), Some(Contact::Contained));
}

#[test]
fn ship_touching_surface_reports_crossing() {
    let terrain = Terrain::from_profile(&TerrainProfile::default(), 1000.0, 800.0).unwrap();
    // surface at x = 100 is y = 760; hull bottom reaches y + 16
    let ship = placed(
        Shape::new(PolygonGenerator::ship_hull(32.0, 32.0)).unwrap(),
        Transform2::from_translation(Vec2::new(100.0, 750.0)),
    );
    match PolygonCollision::find_contact(&ship, terrain.shape()) {
        Some(Contact::Crossing(point)) => assert!((point.y - 760.0).abs() < 1e-3),
        other => panic!("expected a crossing, got {other:?}"),
    }

    let above = placed(
        Shape::new(PolygonGenerator::ship_hull(32.0, 32.0)).unwrap(),
        Transform2::from_translation(Vec2::new(100.0, 700.0)),
    );
    assert!(!PolygonCollision::intersects(&above, terrain.shape()));
}

fn random_shape(rng: &mut StdRng) -> Shape {
    let n = rng.gen_range(3..=12);
    let radius = rng.gen_range(10.0..60.0);
    let outline = PolygonGenerator::generate_convex_polygon(rng, 0.0, 0.0, radius, n);
    let transform = Transform2::new(
        Vec2::new(rng.gen_range(-80.0..80.0), rng.gen_range(-80.0..80.0)),
        rng.gen_range(0.0..std::f32::consts::TAU),
        Vec2::splat(rng.gen_range(0.25..1.5)),
    );
    placed(Shape::new(outline).unwrap(), transform)
}

#[test]
fn intersects_is_symmetric() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut hits = 0;
    for _ in 0..500 {
        let a = random_shape(&mut rng);
        let b = random_shape(&mut rng);
        let forward = PolygonCollision::intersects(&a, &b);
        assert_eq!(forward, PolygonCollision::intersects(&b, &a));
        hits += usize::from(forward);
    }
    // the sweep should see both outcomes
    assert!(hits > 0 && hits < 500, "hits = {hits}");
}

#[test]
fn point_inside_survives_rotation() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..200 {
        let n = rng.gen_range(8..=12);
        let outline = PolygonGenerator::generate_convex_polygon(&mut rng, 0.0, 0.0, 50.0, n);
        let base = Shape::new(outline).unwrap();

        // well clear of every edge: edges stay beyond r = 35, vertices within r = 60
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let (sin, cos) = angle.sin_cos();
        let inner = Point2::new(cos * 20.0, sin * 20.0);
        let outer = Point2::new(cos * 70.0, sin * 70.0);
        assert!(base.point_inside(inner));
        assert!(!base.point_inside(outer));

        let turn = rng.gen_range(0.0..std::f32::consts::TAU);
        let offset = Vec2::new(rng.gen_range(-500.0..500.0), rng.gen_range(-500.0..500.0));
        let transform = Transform2::new(offset, turn, Vec2::ONE);
        let affine = transform.to_affine();
        let rotated = placed(base.clone(), transform);

        let moved = |p: Point2| Point2::from(affine.transform_point2(Vec2::from(p)));
        assert!(rotated.point_inside(moved(inner)));
        assert!(!rotated.point_inside(moved(outer)));
    }
}

#[test]
fn boxes_apart_means_no_hit() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..100 {
        let n = rng.gen_range(3..=10);
        let a = Shape::new(PolygonGenerator::generate_convex_polygon(&mut rng, 0.0, 0.0, 20.0, n)).unwrap();
        let b = placed(
            Shape::new(PolygonGenerator::generate_convex_polygon(&mut rng, 0.0, 0.0, 20.0, n)).unwrap(),
            Transform2::from_translation(Vec2::new(rng.gen_range(60.0..200.0), rng.gen_range(-200.0..200.0))),
        );
        assert!(!a.bounds().overlaps(b.bounds()));
        assert!(!PolygonCollision::intersects(&a, &b));
    }
}

use kdtree2d::{Point, PointSet, PointSetBuilder, Rect};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;

fn random_points(rng: &mut StdRng, count: usize, extent: f64) -> Vec<Point> {
    (0..count)
        .map(|_| Point::new(rng.random_range(-extent..extent), rng.random_range(-extent..extent)))
        .collect()
}

fn random_rect(rng: &mut StdRng, extent: f64) -> Rect {
    Rect::new(
        Point::new(rng.random_range(-extent..extent), rng.random_range(-extent..extent)),
        Point::new(rng.random_range(-extent..extent), rng.random_range(-extent..extent)),
    )
}

fn brute_force_range(points: &[Point], query: &Rect) -> Vec<Point> {
    let mut hits: Vec<Point> = points.iter().copied().filter(|p| query.contains(p)).collect();
    hits.sort_by(|a, b| a.partial_cmp(b).unwrap());
    hits.dedup();
    hits
}

fn brute_force_distances(points: &[Point], key: &Point, k: usize) -> Vec<f64> {
    let mut distances: Vec<f64> = points.iter().map(|p| p.distance(key)).collect();
    distances.sort_by(f64::total_cmp);
    distances.truncate(k);
    distances
}

/// Scenario from the four-point example set
#[test]
fn test_four_point_scenario() {
    let set = PointSet::from_points(vec![
        Point::new(1.0, 2.0),
        Point::new(3.0, 4.0),
        Point::new(5.0, 1.0),
        Point::new(2.0, 8.0),
    ]);

    assert!(set.contains(&Point::new(3.0, 4.0)));
    assert!(!set.contains(&Point::new(9.0, 9.0)));

    let hits = set.range(&Rect::new(Point::new(0.0, 0.0), Point::new(4.0, 5.0)));
    assert_eq!(hits.as_slice(), &[Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);

    let nearest = set.nearest(&Point::new(0.0, 0.0)).expect("nearest failed");
    assert_eq!(nearest, Some(Point::new(1.0, 2.0)));
}

#[test]
fn test_size_and_membership_after_bulk_build() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut points = random_points(&mut rng, 2_000, 1_000.0);
    // Exact duplicates must collapse.
    let duplicates = points[..300].to_vec();
    points.extend(duplicates);

    let set = PointSet::from_points(points.clone());
    assert_eq!(set.len(), 2_000);
    for point in &points {
        assert!(set.contains(point));
    }
    for probe in random_points(&mut rng, 200, 1_000.0) {
        assert_eq!(set.contains(&probe), points.contains(&probe));
    }
    // 2000 points fit in 11 levels when every split is even.
    assert!(set.depth() <= 12, "depth {}", set.depth());
}

#[test]
fn test_range_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(42);
    let points = random_points(&mut rng, 3_000, 100.0);
    let set = PointSet::from_points(points.clone());

    for _ in 0..100 {
        let query = random_rect(&mut rng, 120.0);
        let expected = brute_force_range(&points, &query);
        let found = set.range(&query);
        assert_eq!(found.as_slice(), expected.as_slice(), "query {}", query);
    }
}

#[test]
fn test_range_same_set_for_any_insertion_order() {
    let mut rng = StdRng::seed_from_u64(3);
    let points = random_points(&mut rng, 500, 50.0);

    let balanced = PointSet::from_points(points.clone());
    let mut incremental = PointSet::new();
    incremental.extend(points.iter().copied());
    let mut sorted_points = points.clone();
    sorted_points.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let mut degenerate = PointSet::new();
    degenerate.extend(sorted_points);

    for _ in 0..50 {
        let query = random_rect(&mut rng, 60.0);
        let expected = balanced.range(&query);
        assert_eq!(incremental.range(&query), expected);
        assert_eq!(degenerate.range(&query), expected);
    }
}

#[test]
fn test_nearest_k_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(1234);
    let points = random_points(&mut rng, 2_500, 500.0);
    let set = PointSet::from_points(points.clone());

    for _ in 0..60 {
        let key = Point::new(rng.random_range(-600.0..600.0), rng.random_range(-600.0..600.0));
        for k in [1, 3, 10, 64] {
            let found = set.nearest_k(&key, k).expect("nearest_k failed");
            assert_eq!(found.len(), k);
            let distances: Vec<f64> = found.iter().map(|p| p.distance(&key)).collect();
            assert_eq!(distances, brute_force_distances(&points, &key, k));
        }
    }
}

#[test]
fn test_nearest_one_matches_nearest() {
    let mut rng = StdRng::seed_from_u64(99);
    let set = PointSet::from_points(random_points(&mut rng, 300, 10.0));
    for _ in 0..50 {
        let key = Point::new(rng.random_range(-12.0..12.0), rng.random_range(-12.0..12.0));
        let single = set.nearest(&key).unwrap();
        let first = set.nearest_k(&key, 1).unwrap().first().copied();
        assert_eq!(single, first);
        assert!(single.is_some());
    }
}

#[test]
fn test_nearest_after_incremental_inserts() {
    let mut rng = StdRng::seed_from_u64(5);
    let initial = random_points(&mut rng, 200, 100.0);
    let extra = random_points(&mut rng, 200, 100.0);

    let mut set = PointSet::from_points(initial.clone());
    set.extend(extra.iter().copied());
    let all: Vec<Point> = initial.into_iter().chain(extra).collect();
    assert_eq!(set.len(), all.len());

    let key = Point::new(0.0, 0.0);
    let distances: Vec<f64> = set
        .nearest_k(&key, 15)
        .unwrap()
        .iter()
        .map(|p| p.distance(&key))
        .collect();
    assert_eq!(distances, brute_force_distances(&all, &key, 15));
}

#[test]
fn test_load_query_save_round_trip() {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "1 2\n3 4\n5 1\n2 8").unwrap();

    let set = PointSetBuilder::new()
        .path(file.path())
        .build()
        .expect("Failed to build point set");
    assert_eq!(set.len(), 4);
    assert_eq!(
        set.to_string(),
        "PointSet {\n\tPoint(1 2),\n\tPoint(2 8),\n\tPoint(3 4),\n\tPoint(5 1),\n}"
    );

    let out = tempfile::NamedTempFile::new().unwrap();
    set.save(out.path()).expect("Failed to save");
    let reopened = PointSet::open(out.path()).expect("Failed to reopen");
    assert_eq!(reopened.to_string(), set.to_string());
}

#[test]
fn test_level_order_visits_every_point_once() {
    let mut rng = StdRng::seed_from_u64(11);
    let points = random_points(&mut rng, 777, 1.0);
    let set = PointSet::from_points(points);

    let mut seen: Vec<Point> = set.iter().copied().collect();
    assert_eq!(seen.len(), set.len());
    seen.sort_by(|a, b| a.partial_cmp(b).unwrap());
    seen.dedup();
    assert_eq!(seen.len(), set.len());
    assert_eq!(set.range(&Rect::plane()).into_vec(), seen);
}

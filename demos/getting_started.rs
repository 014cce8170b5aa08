//! Getting Started Example
//!
//! Builds a small point set, runs membership, range and nearest-neighbor
//! queries, then saves the set and loads it back.

use kdtree2d::prelude::*;
use std::error::Error;

fn main() -> std::result::Result<(), Box<dyn Error>> {
    env_logger::init();

    println!("=== kdtree2d - Getting Started ===\n");

    // ========================================
    // 1. Bulk build
    // ========================================
    println!("1. Bulk build");
    println!("-------------");

    let mut set = PointSet::from_points(vec![
        Point::new(1.0, 2.0),
        Point::new(3.0, 4.0),
        Point::new(5.0, 1.0),
        Point::new(2.0, 8.0),
    ]);
    println!("   {} points, depth {}", set.len(), set.depth());
    println!("{}\n", set);

    // ========================================
    // 2. Insert and membership
    // ========================================
    println!("2. Insert and membership");
    println!("------------------------");

    let inserted = set.put(Point::new(4.0, 4.0));
    let duplicate = set.put(Point::new(3.0, 4.0));
    println!("   put (4, 4): {}", inserted);
    println!("   put (3, 4) again: {}", duplicate);
    println!("   contains (9, 9): {}\n", set.contains(&Point::new(9.0, 9.0)));

    // ========================================
    // 3. Range query
    // ========================================
    println!("3. Range query");
    println!("--------------");

    let window = Rect::new(Point::new(0.0, 0.0), Point::new(4.0, 5.0));
    let inside = set.range(&window);
    println!("   {} contains {} points:", window, inside.len());
    for point in &inside {
        println!("     {}", point);
    }
    println!();

    // ========================================
    // 4. Nearest neighbors
    // ========================================
    println!("4. Nearest neighbors");
    println!("--------------------");

    let origin = Point::new(0.0, 0.0);
    if let Some(closest) = set.nearest(&origin)? {
        println!("   nearest to {}: {}", origin, closest);
    }
    for (rank, point) in set.nearest_k(&origin, 3)?.iter().enumerate() {
        println!("   #{} {} at {:.3}", rank + 1, point, point.distance(&origin));
    }
    println!();

    // ========================================
    // 5. Save and reload
    // ========================================
    println!("5. Save and reload");
    println!("------------------");

    let path = std::env::temp_dir().join("kdtree2d_getting_started.txt");
    set.save(&path)?;
    let reloaded = PointSetBuilder::new()
        .path(&path)
        .config(Config::default().with_strict_pairs(false))
        .build()?;
    println!("   reloaded {} points from {}", reloaded.len(), path.display());
    std::fs::remove_file(&path)?;

    println!("\n=== Done ===");
    Ok(())
}

//! Balanced 2D-tree point index with range and k-nearest-neighbor queries.
//!
//! ## Features
//! - **Bulk balancing**: median splits on alternating axes give logarithmic depth
//! - **Range queries**: axis-aligned rectangles, edges inclusive
//! - **k-nearest neighbors**: branch-and-bound search with a bounded slab pool
//! - **Detached results**: query results own their points and outlive later edits
//!
//! Single-point insertion after the bulk build does not rebalance, so long runs
//! of sorted inserts degrade query cost toward linear.
//!
//! ```rust
//! use kdtree2d::{Point, PointSet, Rect};
//!
//! let mut set = PointSet::from_points(vec![
//!     Point::new(1.0, 2.0),
//!     Point::new(3.0, 4.0),
//!     Point::new(5.0, 1.0),
//!     Point::new(2.0, 8.0),
//! ]);
//! set.put(Point::new(4.0, 4.0));
//!
//! let inside = set.range(&Rect::new(Point::new(0.0, 0.0), Point::new(4.0, 5.0)));
//! assert_eq!(inside.len(), 3);
//!
//! let closest = set.nearest_k(&Point::new(0.0, 0.0), 2)?;
//! assert_eq!(closest.first(), Some(&Point::new(1.0, 2.0)));
//! # Ok::<(), kdtree2d::PointSetError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod error;
pub mod geometry;
pub mod loader;
pub mod pool;
pub mod tree;

pub use builder::PointSetBuilder;
pub use compute::Points;
pub use config::Config;
pub use error::{PointSetError, Result};
pub use geometry::{EPSILON, Point, Rect};
pub use pool::{SlabPool, SlabRun};
pub use tree::{InOrder, Iter, Orientation, PointSet};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{PointSet, PointSetBuilder, PointSetError, Result};

    pub use crate::{Point, Points, Rect};

    pub use crate::Config;

    pub use crate::loader::{read_points, write_points};
}

//! Builder for point sets loaded from files and in-memory batches.
//!
//! Everything the builder collects is bulk balanced in one pass, so a set
//! built here starts out with logarithmic depth.

use crate::config::Config;
use crate::error::Result;
use crate::geometry::Point;
use crate::loader;
use crate::tree::PointSet;
use std::path::{Path, PathBuf};

/// Builder for a [`PointSet`] with an optional file source.
///
/// ```rust
/// use kdtree2d::{Point, PointSetBuilder};
///
/// let set = PointSetBuilder::new()
///     .points([Point::new(0.0, 0.0), Point::new(1.0, 1.0)])
///     .build()?;
/// assert_eq!(set.len(), 2);
/// # Ok::<(), kdtree2d::PointSetError>(())
/// ```
#[derive(Debug, Default)]
pub struct PointSetBuilder {
    path: Option<PathBuf>,
    points: Vec<Point>,
    config: Config,
}

impl PointSetBuilder {
    /// Create a new builder with no source and the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read coordinate pairs from the file at `path` on build. An empty path
    /// means no file.
    pub fn path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        let path = path.into();
        self.path = if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        };
        self
    }

    /// Add points to the batch.
    pub fn points<I: IntoIterator<Item = Point>>(mut self, points: I) -> Self {
        self.points.extend(points);
        self
    }

    /// Set the loader configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Load the file (if any), combine it with the batch and bulk balance.
    pub fn build(self) -> Result<PointSet> {
        self.config.validate()?;

        let mut points = self.points;
        if let Some(path) = &self.path {
            let loaded = loader::read_points_from_path(path, &self.config)?;
            log::debug!("Loaded {} points from {}", loaded.len(), path.display());
            points.extend(loaded);
        }
        Ok(PointSet::from_points(points))
    }
}

impl PointSet {
    /// Builds a balanced set from the coordinate pairs in the file at `path`.
    ///
    /// An empty path gives an empty set.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        PointSetBuilder::new()
            .path(path.as_ref().to_path_buf())
            .build()
    }

    /// Writes the stored points, one `x y` pair per line, in level order.
    ///
    /// Reading the file back with [`PointSet::open`] reproduces the same set.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        loader::write_points_to_path(path, self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PointSetError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builder_default_is_empty() {
        let set = PointSetBuilder::new().build().unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_empty_path_is_no_source() {
        let set = PointSet::open("").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_builder_combines_file_and_batch() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1 2\n3 4").unwrap();

        let set = PointSetBuilder::new()
            .path(file.path())
            .points([Point::new(5.0, 1.0), Point::new(1.0, 2.0)])
            .build()
            .unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains(&Point::new(3.0, 4.0)));
    }

    #[test]
    fn test_builder_propagates_parse_errors() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "1 2 3").unwrap();

        let err = PointSetBuilder::new().path(file.path()).build().unwrap_err();
        assert!(matches!(err, PointSetError::Parse { .. }));

        let set = PointSetBuilder::new()
            .path(file.path())
            .config(Config::default().with_strict_pairs(false))
            .build()
            .unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_save_and_open() {
        let set = PointSet::from_points(vec![
            Point::new(1.0, 2.0),
            Point::new(3.0, 4.0),
            Point::new(5.0, 1.0),
            Point::new(2.0, 8.0),
        ]);
        let file = NamedTempFile::new().unwrap();
        set.save(file.path()).unwrap();

        let reopened = PointSet::open(file.path()).unwrap();
        assert_eq!(reopened.len(), set.len());
        assert!(set.iter().all(|p| reopened.contains(p)));
        // Bulk building sorts its input, so the shape does not depend on order.
        assert_eq!(reopened.depth(), set.depth());
    }
}

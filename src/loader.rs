//! Plain-text point streams.
//!
//! The format is a sequence of whitespace-separated real numbers read in
//! pairs, x then y. Line breaks carry no meaning. [`write_points`] emits one
//! `x y` pair per line, which reads back to the same points.

use crate::config::Config;
use crate::error::{PointSetError, Result};
use crate::geometry::Point;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Reads coordinate pairs from `reader`.
///
/// Fails on a token that is not a number. An unpaired trailing coordinate
/// and non-finite values are handled according to `config`.
pub fn read_points<R: BufRead>(reader: R, config: &Config) -> Result<Vec<Point>> {
    config.validate()?;

    let mut points = Vec::new();
    let mut pending: Option<(usize, String, f64)> = None;
    let mut position = 0;

    'lines: for line in reader.lines() {
        let line = line?;
        for token in line.split_whitespace() {
            position += 1;
            let value: f64 = token
                .parse()
                .map_err(|_| PointSetError::parse(position, token, "not a number"))?;

            let Some((x_position, x_token, x)) = pending.take() else {
                pending = Some((position, token.to_string(), value));
                continue;
            };

            let point = Point::new(x, value);
            if !point.is_finite() {
                if config.skip_non_finite {
                    log::warn!("Skipping non-finite point {} ending at token {}", point, position);
                    continue;
                }
                return Err(if x.is_finite() {
                    PointSetError::parse(position, token, "non-finite coordinate")
                } else {
                    PointSetError::parse(x_position, x_token, "non-finite coordinate")
                });
            }
            points.push(point);

            if let Some(max) = config.max_points
                && points.len() >= max
            {
                log::debug!("Stopped reading after max_points = {} points", max);
                break 'lines;
            }
        }
    }

    if let Some((position, token, _)) = pending {
        if config.strict_pairs {
            return Err(PointSetError::parse(
                position,
                token,
                "unpaired trailing coordinate",
            ));
        }
        log::warn!(
            "Dropping unpaired trailing coordinate {:?} at token {}",
            token,
            position
        );
    }

    log::debug!("Read {} points from {} tokens", points.len(), position);
    Ok(points)
}

/// Reads coordinate pairs from the file at `path`.
pub fn read_points_from_path<P: AsRef<Path>>(path: P, config: &Config) -> Result<Vec<Point>> {
    let file = File::open(path.as_ref())?;
    read_points(BufReader::new(file), config)
}

/// Writes one `x y` line per point.
pub fn write_points<'a, W, I>(writer: W, points: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Point>,
{
    let mut writer = BufWriter::new(writer);
    for point in points {
        writeln!(writer, "{} {}", point.x(), point.y())?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `points` to a new file at `path`, replacing any existing file.
pub fn write_points_to_path<'a, P, I>(path: P, points: I) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a Point>,
{
    let file = File::create(path.as_ref())?;
    write_points(file, points)
}

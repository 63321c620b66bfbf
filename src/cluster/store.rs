//! Trajectory store: turns raw records into validated trajectories

use super::point::{Point, PointList, Trajectory, TrajectoryList};
use crate::error::{Result, TrajectoryError};
use serde::Deserialize;

/// Largest accepted coordinate magnitude
///
/// Keeps the difference of any two coordinates, and so every distance,
/// finite.
pub const COORDINATE_LIMIT: f64 = f64::MAX / 4.0;

/// A raw trajectory record as handed over by the ingestion side
///
/// Only the coordinate text is read; ids, timestamps and any other fields of
/// the source record are ignored.
///
/// Coordinate format: whitespace separated `x,y` pairs, e.g. `"0,0 3.5,4 7,8"`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTrajectory {
    pub coordinates: String,
}

/// Validates raw records and builds the trajectory collection
///
/// Record order is preserved: record `i` becomes trajectory `i`. The first
/// invalid record aborts the load.
pub fn load(records: &[RawTrajectory]) -> Result<TrajectoryList> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| -> Result<Trajectory> {
            let points = parse_coordinates(index, &record.coordinates)?;
            if points.is_empty() {
                return Err(TrajectoryError::EmptyTrajectory { index });
            }
            Ok(Trajectory::new(points))
        })
        .collect()
}

/// Parses coordinate text of the record at `index` into points
///
/// Empty text yields an empty list; deciding whether that is acceptable is
/// left to the caller.
pub fn parse_coordinates(index: usize, text: &str) -> Result<PointList> {
    text.split_whitespace()
        .map(|token| {
            parse_point(token)
                .map_err(|reason| TrajectoryError::MalformedTrajectory { index, reason })
        })
        .collect()
}

fn parse_point(token: &str) -> std::result::Result<Point, String> {
    let mut parts = token.split(',');
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected `x,y` pair, got `{token}`"));
    };

    let x = parse_coordinate(x, token)?;
    let y = parse_coordinate(y, token)?;

    Ok(Point([x, y]))
}

fn parse_coordinate(value: &str, token: &str) -> std::result::Result<f64, String> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v.abs() <= COORDINATE_LIMIT => Ok(v),
        Ok(v) if v.is_finite() => Err(format!(
            "coordinate {v} in `{token}` exceeds magnitude {COORDINATE_LIMIT}"
        )),
        Ok(_) => Err(format!("non-finite coordinate in `{token}`")),
        Err(e) => Err(format!("invalid coordinate `{value}` in `{token}`: {e}")),
    }
}

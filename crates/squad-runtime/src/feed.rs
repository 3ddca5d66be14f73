//! Position report feed
//!
//! One JSON object per line: `x` and `y` coordinates plus optional
//! wire-named fields (`sic`, `uniquedesignation`, `speed`, ...).
//!
//! ```text
//! {"x": 10.0, "y": 20.0, "sic": "SFGPEVAC-------", "uniquedesignation": "Dustoff 6"}
//! ```

use serde_json::{Map, Value};
use shared_types::{GeoPoint, TypeError};
use sl_02_symbology_gate::AttributeOverrides;
use thiserror::Error;

/// Errors for a single feed line
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON object")]
    NotAnObject,

    #[error("Missing or non-numeric coordinate {0:?}")]
    MissingCoordinate(&'static str),

    #[error("Invalid report field: {0}")]
    Field(#[from] TypeError),
}

/// A unit's position plus any attributes it reported.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionReport {
    pub location: GeoPoint,
    pub overrides: AttributeOverrides,
}

/// Parse one line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<PositionReport>, FeedError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let mut fields = match serde_json::from_str::<Value>(line)? {
        Value::Object(fields) => fields,
        _ => return Err(FeedError::NotAnObject),
    };

    let x = take_coordinate(&mut fields, "x")?;
    let y = take_coordinate(&mut fields, "y")?;
    let overrides = AttributeOverrides::try_from(&fields)?;

    Ok(Some(PositionReport {
        location: GeoPoint::new(x, y),
        overrides,
    }))
}

fn take_coordinate(fields: &mut Map<String, Value>, name: &'static str) -> Result<f64, FeedError> {
    fields
        .remove(name)
        .and_then(|v| v.as_f64())
        .ok_or(FeedError::MissingCoordinate(name))
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::LoadError;

pub const POINT_TYPE: &str = "Point";

/// Longitude/latitude pair in degrees, encoded as `[lon, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl From<[f64; 2]> for LngLat {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(value: LngLat) -> Self {
        [value.lng, value.lat]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Point")]
pub struct Point {
    pub coordinates: LngLat,
}

impl Point {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self {
            coordinates: LngLat::new(lng, lat),
        }
    }

    pub fn lng(&self) -> f64 {
        self.coordinates.lng
    }

    pub fn lat(&self) -> f64 {
        self.coordinates.lat
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "GeometryCollection")]
pub struct GeometryCollection {
    pub geometries: Vec<Point>,
}

impl GeometryCollection {
    pub fn new(geometries: Vec<Point>) -> Self {
        Self { geometries }
    }
}

/// Result of decoding the wells payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadedWells {
    pub wells: Vec<Point>,
    /// Entries that were not usable points (other geometry types, bad coordinates).
    pub skipped: usize,
}

#[derive(Deserialize)]
struct RawGeometry {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    coordinates: Value,
}

pub fn decode_geometry_collection(text: &str) -> Result<LoadedWells, LoadError> {
    let value: Value = serde_json::from_str(text).map_err(|err| LoadError::Json(err.to_string()))?;
    let Some(Value::Array(items)) = value.get("geometries") else {
        return Err(LoadError::NotGeometryCollection);
    };
    let mut loaded = LoadedWells {
        wells: Vec::with_capacity(items.len()),
        skipped: 0,
    };
    for item in items {
        match point_from_value(item) {
            Some(point) => loaded.wells.push(point),
            None => loaded.skipped += 1,
        }
    }
    Ok(loaded)
}

fn point_from_value(value: &Value) -> Option<Point> {
    let raw = RawGeometry::deserialize(value).ok()?;
    if raw.kind != POINT_TYPE {
        return None;
    }
    // Extra positions (altitude) are allowed and ignored.
    let coords = raw.coordinates.as_array()?;
    if coords.len() < 2 {
        return None;
    }
    let lng = coords[0].as_f64()?;
    let lat = coords[1].as_f64()?;
    if !lng.is_finite() || !lat.is_finite() {
        return None;
    }
    Some(Point::new(lng, lat))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_points_in_order() {
        let text = r#"{
            "type": "GeometryCollection",
            "geometries": [
                { "type": "Point", "coordinates": [-116.57654321, 53.9333] },
                { "type": "Point", "coordinates": [-113.4909, 53.5444, 670.0] }
            ]
        }"#;
        let loaded = decode_geometry_collection(text).unwrap();
        assert_eq!(
            loaded.wells,
            vec![Point::new(-116.57654321, 53.9333), Point::new(-113.4909, 53.5444)]
        );
        assert_eq!(loaded.skipped, 0);
    }

    #[test]
    fn missing_geometries_is_not_a_collection() {
        let err = decode_geometry_collection(r#"{ "type": "GeometryCollection" }"#).unwrap_err();
        assert_eq!(err, LoadError::NotGeometryCollection);
    }

    #[test]
    fn null_or_object_geometries_is_not_a_collection() {
        for text in [
            r#"{ "geometries": null }"#,
            r#"{ "geometries": { "type": "Point" } }"#,
            "null",
            "[]",
        ] {
            assert_eq!(
                decode_geometry_collection(text).unwrap_err(),
                LoadError::NotGeometryCollection,
                "payload {text}"
            );
        }
    }

    #[test]
    fn invalid_json_reports_parser_detail() {
        let err = decode_geometry_collection("<!doctype html>").unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn skips_non_point_and_malformed_entries() {
        let text = r#"{
            "type": "GeometryCollection",
            "geometries": [
                { "type": "LineString", "coordinates": [[0, 0], [1, 1]] },
                { "type": "Point", "coordinates": [10.5] },
                { "type": "Point", "coordinates": ["a", "b"] },
                { "coordinates": [1, 2] },
                42,
                { "type": "Point", "coordinates": [1, 2] }
            ]
        }"#;
        let loaded = decode_geometry_collection(text).unwrap();
        assert_eq!(loaded.wells, vec![Point::new(1.0, 2.0)]);
        assert_eq!(loaded.skipped, 5);
    }

    #[test]
    fn empty_collection_is_valid() {
        let loaded = decode_geometry_collection(r#"{ "type": "GeometryCollection", "geometries": [] }"#)
            .unwrap();
        assert!(loaded.wells.is_empty());
    }

    #[test]
    fn point_serializes_with_type_tag() {
        let json = serde_json::to_value(Point::new(-114.0, 51.0)).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "Point", "coordinates": [-114.0, 51.0] }));
    }
}

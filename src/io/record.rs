//! JSON document form of an offline region definition.
//!
//! ```json
//! {"style_url": "...", "geometry": {...}, "min_zoom": 0, "max_zoom": 15, "pixel_ratio": 2}
//! ```
//!
//! `max_zoom` is left out when unbounded. Older documents carry
//! `"bounds": [south, west, north, east]` in place of `geometry`; those still
//! decode, to the same rectangle ring a bounds-built definition has.

use geo::Point;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    bounds::LatLngBounds,
    definition::RegionDefinition,
    error::{RegionError, Result},
    geometry::RegionGeometry,
    io::geojson,
};

/// Serde shape of the document. [`RegionDefinition`] serializes through it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegionRecord {
    style_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bounds: Option<[f64; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    geometry: Option<Value>,
    min_zoom: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_zoom: Option<f64>,
    pixel_ratio: f64,
}

impl From<RegionDefinition> for RegionRecord {
    fn from(definition: RegionDefinition) -> Self {
        Self {
            geometry: Some(geojson::to_geojson_value(definition.geometry())),
            bounds: None,
            min_zoom: definition.min_zoom(),
            max_zoom: definition.has_max_zoom_bound().then(|| definition.max_zoom()),
            pixel_ratio: f64::from(definition.pixel_ratio()),
            style_url: definition.into_style_reference(),
        }
    }
}

impl TryFrom<RegionRecord> for RegionDefinition {
    type Error = RegionError;

    fn try_from(record: RegionRecord) -> Result<Self> {
        let geometry: RegionGeometry = match (record.bounds, &record.geometry) {
            (Some([south, west, north, east]), _) => {
                LatLngBounds::hull(Point::new(west, south), Point::new(east, north)).into()
            }
            (None, Some(value)) => geojson::from_geojson_value(value)?,
            (None, None) => {
                return Err(RegionError::record("[io::record] record has neither 'bounds' nor 'geometry'"));
            }
        };

        RegionDefinition::new(
            record.style_url,
            geometry,
            record.min_zoom,
            record.max_zoom.unwrap_or(f64::INFINITY),
            record.pixel_ratio as f32,
        )
    }
}

/// Serialize a definition to its JSON document.
pub fn encode_record(definition: &RegionDefinition) -> Result<String> {
    serde_json::to_string(&RegionRecord::from(definition.clone()))
        .map_err(|e| RegionError::record(format!("[io::record::encode] {e}")))
}

/// Parse a JSON document into a definition.
pub fn decode_record(text: &str) -> Result<RegionDefinition> {
    let record: RegionRecord = serde_json::from_str(text)
        .map_err(|e| RegionError::record(format!("[io::record::decode] {e}")))?;

    RegionDefinition::try_from(record)
        .inspect(|definition| tracing::debug!(
            style = definition.style_reference(),
            kind = %definition.geometry().kind(),
            "[io::record::decode] decoded offline region definition"
        ))
        .inspect_err(|e| tracing::warn!("[io::record::decode] {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> RegionDefinition {
        RegionDefinition::from_bounds("mapbox://styles/mapbox/streets-v11", LatLngBounds::new(-122.5, 37.7, -122.4, 37.8), 0.0, 15.0, 2.0).unwrap()
    }

    #[test]
    fn document_shape() {
        let value: Value = serde_json::from_str(&encode_record(&sample()).unwrap()).unwrap();
        assert_eq!(value, json!({
            "style_url": "mapbox://styles/mapbox/streets-v11",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[-122.5, 37.7], [-122.4, 37.7], [-122.4, 37.8], [-122.5, 37.8], [-122.5, 37.7]]],
            },
            "min_zoom": 0.0,
            "max_zoom": 15.0,
            "pixel_ratio": 2.0,
        }));
    }

    #[test]
    fn round_trip() {
        assert_eq!(decode_record(&encode_record(&sample()).unwrap()).unwrap(), sample());
    }

    #[test]
    fn unbounded_max_zoom_is_omitted() {
        let definition = RegionDefinition::from_bounds("s", LatLngBounds::world(), 2.0, f64::INFINITY, 1.0).unwrap();
        let text = encode_record(&definition).unwrap();
        assert!(!text.contains("max_zoom"));
        assert_eq!(decode_record(&text).unwrap().max_zoom(), f64::INFINITY);
    }

    #[test]
    fn legacy_bounds_document() {
        let text = r#"{"style_url":"s","bounds":[37.7,-122.5,37.8,-122.4],"min_zoom":0,"max_zoom":15,"pixel_ratio":2}"#;
        let definition = decode_record(text).unwrap();
        let expected = RegionDefinition::from_bounds("s", LatLngBounds::new(-122.5, 37.7, -122.4, 37.8), 0.0, 15.0, 2.0).unwrap();
        assert_eq!(definition, expected);
    }

    #[test]
    fn bounds_take_precedence_over_geometry() {
        let text = r#"{"style_url":"s","bounds":[0,0,1,1],"geometry":{"type":"Point","coordinates":[5,5]},"min_zoom":0,"pixel_ratio":1}"#;
        assert_eq!(decode_record(text).unwrap().geometry(), &RegionGeometry::from(LatLngBounds::new(0.0, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn malformed_documents() {
        let cases = [
            "",
            "[]",
            r#"{"geometry":{"type":"Point","coordinates":[0,0]},"min_zoom":0,"pixel_ratio":1}"#,
            r#"{"style_url":"s","min_zoom":0,"pixel_ratio":1}"#,
            r#"{"style_url":"s","geometry":{"type":"Point","coordinates":[0,0]},"pixel_ratio":1}"#,
            r#"{"style_url":"s","geometry":{"type":"Point","coordinates":[0,0]},"min_zoom":0}"#,
            r#"{"style_url":"s","geometry":{"type":"Point","coordinates":[0,0]},"min_zoom":"0","pixel_ratio":1}"#,
            r#"{"style_url":"s","bounds":[0,0,1],"min_zoom":0,"pixel_ratio":1}"#,
        ];
        for text in cases {
            assert!(
                matches!(decode_record(text), Err(RegionError::MalformedRecord(_))),
                "expected MalformedRecord for {text:?}"
            );
        }
    }

    #[test]
    fn bad_geometry_is_malformed_geometry() {
        let text = r#"{"style_url":"s","geometry":{"type":"Triangle","coordinates":[]},"min_zoom":0,"pixel_ratio":1}"#;
        assert!(matches!(decode_record(text), Err(RegionError::MalformedGeometry(_))));
    }

    #[test]
    fn invalid_values_are_invalid_definition() {
        let text = r#"{"style_url":"s","geometry":{"type":"Point","coordinates":[0,0]},"min_zoom":4,"max_zoom":2,"pixel_ratio":1}"#;
        assert!(matches!(decode_record(text), Err(RegionError::InvalidDefinition(_))));
    }
}

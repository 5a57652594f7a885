//! GeoJSON geometry codec.
//!
//! Only geometry objects are handled (no `Feature` or `FeatureCollection`).
//! Positions are `[longitude, latitude]`; an altitude member is accepted on
//! input and dropped.

use geo::{Coord, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
use serde_json::{json, Value};

use crate::{
    error::{RegionError, Result},
    geometry::{GeometryKind, RegionGeometry},
};

/// Convert a geometry to a GeoJSON geometry object.
pub fn to_geojson_value(geometry: &RegionGeometry) -> Value {
    let coordinates = match geometry {
        RegionGeometry::Point(p) => position(p.0),
        RegionGeometry::MultiPoint(mp) => Value::Array(mp.iter().map(|p| position(p.0)).collect()),
        RegionGeometry::LineString(ls) => line_coords(ls),
        RegionGeometry::MultiLineString(mls) => Value::Array(mls.iter().map(line_coords).collect()),
        RegionGeometry::Polygon(p) => polygon_coords(p),
        RegionGeometry::MultiPolygon(mp) => Value::Array(mp.iter().map(polygon_coords).collect()),
    };

    json!({
        "type": geometry.kind().as_str(),
        "coordinates": coordinates,
    })
}

/// Serialize a geometry to compact GeoJSON text.
pub fn to_geojson_string(geometry: &RegionGeometry) -> String {
    to_geojson_value(geometry).to_string()
}

/// Parse GeoJSON text into a geometry.
pub fn from_geojson_str(text: &str) -> Result<RegionGeometry> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| RegionError::geometry(format!("[io::geojson] invalid JSON: {e}")))?;
    from_geojson_value(&value)
}

/// Convert a GeoJSON geometry object into a geometry, dispatching on `type`.
pub fn from_geojson_value(value: &Value) -> Result<RegionGeometry> {
    let object = value.as_object()
        .ok_or_else(|| RegionError::geometry("[io::geojson] geometry must be a JSON object"))?;

    let kind: GeometryKind = object.get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| RegionError::geometry("[io::geojson] missing string member 'type'"))?
        .parse()?;

    let coords = object.get("coordinates")
        .ok_or_else(|| RegionError::geometry(format!("[io::geojson] {kind} is missing 'coordinates'")))?;

    let geometry: RegionGeometry = match kind {
        GeometryKind::Point => Point::from(parse_position(coords)?).into(),
        GeometryKind::MultiPoint => MultiPoint::new(
            as_array(coords, "MultiPoint coordinates")?.iter()
                .map(|v| parse_position(v).map(Point::from))
                .collect::<Result<Vec<_>>>()?
        ).into(),
        GeometryKind::LineString => parse_line(coords)?.into(),
        GeometryKind::MultiLineString => MultiLineString::new(
            as_array(coords, "MultiLineString coordinates")?.iter()
                .map(parse_line)
                .collect::<Result<Vec<_>>>()?
        ).into(),
        GeometryKind::Polygon => parse_polygon(coords)?.into(),
        GeometryKind::MultiPolygon => MultiPolygon::new(
            as_array(coords, "MultiPolygon coordinates")?.iter()
                .map(parse_polygon)
                .collect::<Result<Vec<_>>>()?
        ).into(),
    };

    Ok(geometry)
}

fn position(c: Coord<f64>) -> Value { json!([c.x, c.y]) }

fn line_coords(line: &LineString<f64>) -> Value {
    Value::Array(line.coords().map(|c| position(*c)).collect())
}

fn polygon_coords(polygon: &Polygon<f64>) -> Value {
    Value::Array(
        std::iter::once(polygon.exterior())
            .chain(polygon.interiors())
            .map(line_coords)
            .collect()
    )
}

fn as_array<'a>(value: &'a Value, what: &str) -> Result<&'a Vec<Value>> {
    value.as_array()
        .ok_or_else(|| RegionError::geometry(format!("[io::geojson] {what} must be an array")))
}

/// Parse a single `[x, y]` or `[x, y, z]` position.
fn parse_position(value: &Value) -> Result<Coord<f64>> {
    let members = as_array(value, "position")?;
    if members.len() < 2 {
        return Err(RegionError::geometry(format!(
            "[io::geojson] position needs at least 2 numbers, got {}", members.len()
        )));
    }

    let number = |v: &Value| v.as_f64()
        .ok_or_else(|| RegionError::geometry(format!("[io::geojson] coordinate must be a number, got {v}")));

    Ok(Coord { x: number(&members[0])?, y: number(&members[1])? })
}

fn parse_positions(value: &Value, what: &str) -> Result<Vec<Coord<f64>>> {
    as_array(value, what)?.iter().map(parse_position).collect()
}

fn parse_line(value: &Value) -> Result<LineString<f64>> {
    let coords = parse_positions(value, "line string")?;
    if coords.len() < 2 {
        return Err(RegionError::geometry(format!(
            "[io::geojson] line string needs at least 2 positions, got {}", coords.len()
        )));
    }
    Ok(LineString::new(coords))
}

/// Parse a linear ring, which must be closed and have at least 4 positions.
fn parse_ring(value: &Value) -> Result<LineString<f64>> {
    let coords = parse_positions(value, "linear ring")?;
    if coords.len() < 4 {
        return Err(RegionError::geometry(format!(
            "[io::geojson] linear ring needs at least 4 positions, got {}", coords.len()
        )));
    }
    if coords.first() != coords.last() {
        return Err(RegionError::geometry("[io::geojson] linear ring is not closed"));
    }
    Ok(LineString::new(coords))
}

fn parse_polygon(value: &Value) -> Result<Polygon<f64>> {
    let mut rings = as_array(value, "polygon")?.iter()
        .map(parse_ring)
        .collect::<Result<Vec<_>>>()?
        .into_iter();

    let exterior = rings.next()
        .ok_or_else(|| RegionError::geometry("[io::geojson] polygon needs an exterior ring"))?;

    Ok(Polygon::new(exterior, rings.collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::LatLngBounds;
    use geo::{line_string, point, polygon};

    #[test]
    fn decode_point() {
        let g = from_geojson_str(r#"{"type":"Point","coordinates":[10.0,20.0]}"#).unwrap();
        assert_eq!(g, RegionGeometry::Point(point!(x: 10.0, y: 20.0)));
    }

    #[test]
    fn decode_integer_coordinates() {
        let g = from_geojson_str(r#"{"type":"Point","coordinates":[10,-20]}"#).unwrap();
        assert_eq!(g, RegionGeometry::Point(point!(x: 10.0, y: -20.0)));
    }

    #[test]
    fn altitude_is_dropped() {
        let g = from_geojson_str(r#"{"type":"Point","coordinates":[1.5,2.5,100.0]}"#).unwrap();
        assert_eq!(g, RegionGeometry::Point(point!(x: 1.5, y: 2.5)));
    }

    #[test]
    fn encode_point() {
        let value = to_geojson_value(&RegionGeometry::Point(point!(x: 10.0, y: 20.0)));
        assert_eq!(value, json!({"type": "Point", "coordinates": [10.0, 20.0]}));
    }

    #[test]
    fn encode_bounds_polygon() {
        let g = RegionGeometry::from(LatLngBounds::new(-122.5, 37.7, -122.4, 37.8));
        assert_eq!(to_geojson_value(&g), json!({
            "type": "Polygon",
            "coordinates": [[[-122.5, 37.7], [-122.4, 37.7], [-122.4, 37.8], [-122.5, 37.8], [-122.5, 37.7]]],
        }));
    }

    #[test]
    fn polygon_with_hole_round_trips() {
        let exterior = line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0), (x: 0.0, y: 0.0)];
        let hole = line_string![(x: 2.0, y: 2.0), (x: 2.0, y: 4.0), (x: 4.0, y: 4.0), (x: 2.0, y: 2.0)];
        let g = RegionGeometry::Polygon(Polygon::new(exterior, vec![hole]));
        assert_eq!(from_geojson_str(&to_geojson_string(&g)).unwrap(), g);
    }

    #[test]
    fn multi_geometries_round_trip() {
        let square = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0)];
        let geometries = [
            RegionGeometry::MultiPoint(MultiPoint::new(vec![point!(x: 1.0, y: 2.0), point!(x: -3.25, y: 4.125)])),
            RegionGeometry::LineString(line_string![(x: -122.5, y: 37.76), (x: -122.4, y: 37.76)]),
            RegionGeometry::MultiLineString(MultiLineString::new(vec![
                line_string![(x: -122.5, y: 37.76), (x: -122.4, y: 37.76)],
                line_string![(x: -122.5, y: 37.72), (x: -122.4, y: 37.72)],
            ])),
            RegionGeometry::MultiPolygon(MultiPolygon::new(vec![square.clone(), square])),
        ];
        for g in geometries {
            assert_eq!(from_geojson_str(&to_geojson_string(&g)).unwrap(), g);
        }
    }

    #[test]
    fn unknown_type_is_malformed() {
        let err = from_geojson_str(r#"{"type":"Triangle","coordinates":[[0,0],[1,0],[0,1]]}"#).unwrap_err();
        assert!(matches!(err, RegionError::MalformedGeometry(_)));
    }

    #[test]
    fn structural_failures_are_malformed() {
        let cases = [
            "not json",
            "[1, 2]",
            r#"{"coordinates":[1,2]}"#,
            r#"{"type":7,"coordinates":[1,2]}"#,
            r#"{"type":"Point"}"#,
            r#"{"type":"Point","coordinates":[1]}"#,
            r#"{"type":"Point","coordinates":["a",2]}"#,
            r#"{"type":"Point","coordinates":{"x":1}}"#,
            r#"{"type":"LineString","coordinates":[[0,0]]}"#,
            r#"{"type":"Polygon","coordinates":[]}"#,
            r#"{"type":"Polygon","coordinates":[[[0,0],[1,0],[0,0]]]}"#,
            r#"{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,1]]]}"#,
            r#"{"type":"MultiPolygon","coordinates":[[[[0,0],[1,0],[1,1]]]]}"#,
            r#"{"type":"GeometryCollection","geometries":[]}"#,
        ];
        for text in cases {
            assert!(
                matches!(from_geojson_str(text), Err(RegionError::MalformedGeometry(_))),
                "expected MalformedGeometry for {text}"
            );
        }
    }

    #[test]
    fn bbox_member_is_ignored() {
        let g = from_geojson_str(r#"{"type":"Point","bbox":[0,0,1,1],"coordinates":[0.5,0.5]}"#).unwrap();
        assert_eq!(g.kind(), GeometryKind::Point);
    }
}

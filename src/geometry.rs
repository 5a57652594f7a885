use std::{fmt, str::FromStr};

use geo::{BoundingRect, CoordsIter, Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};

use crate::{bounds::LatLngBounds, error::{RegionError, Result}};

/// The area an offline region covers.
///
/// A closed set of shapes, each tagged by its GeoJSON `type`. Coordinates are
/// `x` = longitude, `y` = latitude, in degrees.
#[derive(Clone, Debug, PartialEq)]
pub enum RegionGeometry {
    Point(Point<f64>),
    MultiPoint(MultiPoint<f64>),
    LineString(LineString<f64>),
    MultiLineString(MultiLineString<f64>),
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

/// Discriminator of a [`RegionGeometry`], matching the GeoJSON `type` member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 6] = [
        GeometryKind::Point,
        GeometryKind::MultiPoint,
        GeometryKind::LineString,
        GeometryKind::MultiLineString,
        GeometryKind::Polygon,
        GeometryKind::MultiPolygon,
    ];

    /// The GeoJSON `type` string for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::LineString => "LineString",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
        }
    }
}

impl FromStr for GeometryKind {
    type Err = RegionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL.into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| RegionError::geometry(format!("unsupported geometry type '{s}'")))
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RegionGeometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            RegionGeometry::Point(_) => GeometryKind::Point,
            RegionGeometry::MultiPoint(_) => GeometryKind::MultiPoint,
            RegionGeometry::LineString(_) => GeometryKind::LineString,
            RegionGeometry::MultiLineString(_) => GeometryKind::MultiLineString,
            RegionGeometry::Polygon(_) => GeometryKind::Polygon,
            RegionGeometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
        }
    }

    /// Bounding box of all coordinates, or `None` for an empty geometry.
    pub fn bounds(&self) -> Option<LatLngBounds> {
        Geometry::from(self).bounding_rect().map(LatLngBounds::from)
    }

    /// Check that the geometry can be written as GeoJSON and read back and
    /// that it covers something: finite coordinates, no empty multi-geometry,
    /// lines of at least 2 positions and polygon rings of at least 4.
    pub(crate) fn check_shape(&self) -> std::result::Result<(), String> {
        if !Geometry::from(self).coords_iter().all(|c| c.x.is_finite() && c.y.is_finite()) {
            return Err("coordinates must be finite".to_string());
        }

        let check_line = |line: &LineString<f64>| match line.0.len() {
            n if n < 2 => Err(format!("line string needs at least 2 positions, got {n}")),
            _ => Ok(()),
        };
        let check_polygon = |polygon: &Polygon<f64>| {
            std::iter::once(polygon.exterior()).chain(polygon.interiors()).try_for_each(|ring| match ring.0.len() {
                n if n < 4 => Err(format!("polygon ring needs at least 4 positions, got {n}")),
                _ => Ok(()),
            })
        };

        let empty = match self {
            RegionGeometry::MultiPoint(points) => points.0.is_empty(),
            RegionGeometry::MultiLineString(lines) => lines.0.is_empty(),
            RegionGeometry::MultiPolygon(polygons) => polygons.0.is_empty(),
            _ => false,
        };
        if empty {
            return Err(format!("{} has no members", self.kind()));
        }

        match self {
            RegionGeometry::Point(_) | RegionGeometry::MultiPoint(_) => Ok(()),
            RegionGeometry::LineString(line) => check_line(line),
            RegionGeometry::MultiLineString(lines) => lines.iter().try_for_each(check_line),
            RegionGeometry::Polygon(polygon) => check_polygon(polygon),
            RegionGeometry::MultiPolygon(polygons) => polygons.iter().try_for_each(check_polygon),
        }
    }
}

impl From<Point<f64>> for RegionGeometry {
    fn from(g: Point<f64>) -> Self { RegionGeometry::Point(g) }
}

impl From<MultiPoint<f64>> for RegionGeometry {
    fn from(g: MultiPoint<f64>) -> Self { RegionGeometry::MultiPoint(g) }
}

impl From<LineString<f64>> for RegionGeometry {
    fn from(g: LineString<f64>) -> Self { RegionGeometry::LineString(g) }
}

impl From<MultiLineString<f64>> for RegionGeometry {
    fn from(g: MultiLineString<f64>) -> Self { RegionGeometry::MultiLineString(g) }
}

impl From<Polygon<f64>> for RegionGeometry {
    fn from(g: Polygon<f64>) -> Self { RegionGeometry::Polygon(g) }
}

impl From<MultiPolygon<f64>> for RegionGeometry {
    fn from(g: MultiPolygon<f64>) -> Self { RegionGeometry::MultiPolygon(g) }
}

impl From<LatLngBounds> for RegionGeometry {
    fn from(bounds: LatLngBounds) -> Self { RegionGeometry::Polygon(bounds.to_polygon()) }
}

impl From<&RegionGeometry> for Geometry<f64> {
    fn from(g: &RegionGeometry) -> Self {
        match g {
            RegionGeometry::Point(p) => Geometry::Point(*p),
            RegionGeometry::MultiPoint(mp) => Geometry::MultiPoint(mp.clone()),
            RegionGeometry::LineString(ls) => Geometry::LineString(ls.clone()),
            RegionGeometry::MultiLineString(mls) => Geometry::MultiLineString(mls.clone()),
            RegionGeometry::Polygon(p) => Geometry::Polygon(p.clone()),
            RegionGeometry::MultiPolygon(mp) => Geometry::MultiPolygon(mp.clone()),
        }
    }
}

impl TryFrom<Geometry<f64>> for RegionGeometry {
    type Error = RegionError;

    /// Lines, rectangles and triangles become line strings and polygons;
    /// geometry collections have no region equivalent.
    fn try_from(g: Geometry<f64>) -> Result<Self> {
        match g {
            Geometry::Point(p) => Ok(p.into()),
            Geometry::Line(line) => Ok(LineString::new(vec![line.start, line.end]).into()),
            Geometry::LineString(ls) => Ok(ls.into()),
            Geometry::Polygon(p) => Ok(p.into()),
            Geometry::MultiPoint(mp) => Ok(mp.into()),
            Geometry::MultiLineString(mls) => Ok(mls.into()),
            Geometry::MultiPolygon(mp) => Ok(mp.into()),
            Geometry::Rect(rect) => Ok(rect.to_polygon().into()),
            Geometry::Triangle(triangle) => Ok(triangle.to_polygon().into()),
            Geometry::GeometryCollection(_) => Err(RegionError::geometry("geometry collections are not supported")),
        }
    }
}

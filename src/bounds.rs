use geo::{Coord, LineString, Point, Polygon, Rect};

/// A geographic rectangle in degrees, given by its four edges.
///
/// Longitudes are not normalized, so bounds east of the antimeridian
/// (e.g. `238.3..238.6`) are kept as given and wrapped only when tiles are
/// computed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLngBounds {
    west: f64,
    south: f64,
    east: f64,
    north: f64,
}

impl LatLngBounds {
    /// Create bounds from edges, as given.
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self { west, south, east, north }
    }

    /// Smallest bounds containing both corner points (`x` = longitude, `y` = latitude).
    pub fn hull(a: Point<f64>, b: Point<f64>) -> Self {
        Self {
            west: a.x().min(b.x()),
            south: a.y().min(b.y()),
            east: a.x().max(b.x()),
            north: a.y().max(b.y()),
        }
    }

    /// Bounds covering the whole world.
    pub fn world() -> Self { Self::new(-180.0, -90.0, 180.0, 90.0) }

    #[inline] pub fn west(&self) -> f64 { self.west }
    #[inline] pub fn south(&self) -> f64 { self.south }
    #[inline] pub fn east(&self) -> f64 { self.east }
    #[inline] pub fn north(&self) -> f64 { self.north }

    #[inline] pub fn southwest(&self) -> Point<f64> { Point::new(self.west, self.south) }
    #[inline] pub fn northeast(&self) -> Point<f64> { Point::new(self.east, self.north) }

    #[inline]
    pub fn center(&self) -> Point<f64> {
        Point::new((self.west + self.east) / 2.0, (self.south + self.north) / 2.0)
    }

    /// Closed ring tracing the rectangle: SW, SE, NE, NW, back to SW.
    pub fn to_polygon(&self) -> Polygon<f64> {
        let ring = LineString::new(vec![
            Coord { x: self.west, y: self.south },
            Coord { x: self.east, y: self.south },
            Coord { x: self.east, y: self.north },
            Coord { x: self.west, y: self.north },
            Coord { x: self.west, y: self.south },
        ]);
        Polygon::new(ring, vec![])
    }
}

impl From<Rect<f64>> for LatLngBounds {
    fn from(rect: Rect<f64>) -> Self {
        Self::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }
}

impl From<LatLngBounds> for Rect<f64> {
    fn from(bounds: LatLngBounds) -> Self {
        Rect::new(
            Coord { x: bounds.west, y: bounds.south },
            Coord { x: bounds.east, y: bounds.north },
        )
    }
}

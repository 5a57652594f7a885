//! Tile cover of point, line and polygon geometry.
//!
//! Lines are traced with a fast voxel traversal over the projected segments.
//! Polygons trace every ring the same way, record where each ring crosses a
//! tile row, and fill the tiles between sorted pairs of crossings.

use ahash::AHashSet;
use geo::{Coord, Geometry, LineString, Polygon};

use crate::{
    projection::project,
    tile::{CanonicalTileId, MAX_ZOOM},
};

/// A tile position before wrapping; `x` may fall outside the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TilePoint {
    x: i64,
    y: i64,
}

/// Compute the canonical tiles at zoom `z` touched by `geometry`.
///
/// Tiles are ordered by row, then column, before wrapping. Rows past the
/// poles are clamped to the first or last row and columns are wrapped across
/// the antimeridian. Non-finite coordinates are skipped. Zoom levels above
/// [`MAX_ZOOM`] yield no tiles.
pub fn tile_cover(geometry: &Geometry<f64>, z: u8) -> Vec<CanonicalTileId> {
    if z > MAX_ZOOM {
        tracing::warn!("[tilecover::tile_cover] zoom {z} exceeds maximum {MAX_ZOOM}");
        return Vec::new();
    }

    let mut tiles = geometry_cover(geometry, z);
    tiles.sort_by_key(|t| (t.y, t.x));
    tiles.dedup();

    let world = CanonicalTileId::tiles_per_axis(z) as i64;
    let mut seen = AHashSet::with_capacity(tiles.len());
    let cover: Vec<CanonicalTileId> = tiles.into_iter()
        .map(|t| CanonicalTileId::new(z, t.x.rem_euclid(world) as u32, t.y.clamp(0, world - 1) as u32))
        .filter(|id| seen.insert(*id))
        .collect();

    tracing::trace!(zoom = z, tiles = cover.len(), "[tilecover::tile_cover] covered geometry");
    cover
}

/// Number of canonical tiles at zoom `z` touched by `geometry`.
#[inline]
pub fn tile_count(geometry: &Geometry<f64>, z: u8) -> u64 {
    tile_cover(geometry, z).len() as u64
}

fn geometry_cover(geometry: &Geometry<f64>, z: u8) -> Vec<TilePoint> {
    match geometry {
        Geometry::Point(point) => point_tile(point.0, z).into_iter().collect(),
        Geometry::MultiPoint(points) => points.iter().filter_map(|p| point_tile(p.0, z)).collect(),
        Geometry::Line(line) => line_cover(&[line.start, line.end], z, None),
        Geometry::LineString(line) => line_cover(&line.0, z, None),
        Geometry::MultiLineString(lines) => lines.iter()
            .flat_map(|line| line_cover(&line.0, z, None))
            .collect(),
        Geometry::Polygon(polygon) => polygon_cover(polygon, z),
        Geometry::MultiPolygon(polygons) => polygons.iter()
            .flat_map(|polygon| polygon_cover(polygon, z))
            .collect(),
        Geometry::Rect(rect) => polygon_cover(&rect.to_polygon(), z),
        Geometry::Triangle(triangle) => polygon_cover(&triangle.to_polygon(), z),
        Geometry::GeometryCollection(collection) => collection.iter()
            .flat_map(|g| geometry_cover(g, z))
            .collect(),
    }
}

fn is_finite(c: Coord<f64>) -> bool { c.x.is_finite() && c.y.is_finite() }

fn point_tile(coord: Coord<f64>, z: u8) -> Option<TilePoint> {
    let p = project(coord.x, coord.y, z);
    is_finite(p).then(|| TilePoint { x: p.x.floor() as i64, y: p.y.floor() as i64 })
}

/// Records visited tiles, and optionally the first tile of every row change
/// (the ring crossings used by the polygon fill).
struct LineTracer {
    tiles: Vec<TilePoint>,
    ring: Option<Vec<TilePoint>>,
    prev: Option<TilePoint>,
}

impl LineTracer {
    fn visit(&mut self, x: i64, y: i64) {
        let tile = TilePoint { x, y };
        self.tiles.push(tile);
        if let Some(ring) = self.ring.as_mut() {
            if self.prev.map(|p| p.y) != Some(y) { ring.push(tile) }
        }
        self.prev = Some(tile);
    }
}

fn line_cover(coords: &[Coord<f64>], z: u8, ring: Option<&mut Vec<TilePoint>>) -> Vec<TilePoint> {
    let mut tracer = LineTracer { tiles: Vec::new(), ring: ring.as_ref().map(|_| Vec::new()), prev: None };
    let Some(first) = coords.first() else { return tracer.tiles };

    let mut prev_point = project(first.x, first.y, z);
    for coord in &coords[1..] {
        let p0 = prev_point;
        let p1 = project(coord.x, coord.y, z);
        prev_point = p1;

        // The traversal never terminates on an infinite or NaN step.
        if !is_finite(p0) || !is_finite(p1) { continue }

        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;
        if dx == 0.0 && dy == 0.0 { continue }

        let xi: i64 = if dx > 0.0 { 1 } else { -1 };
        let yi: i64 = if dy > 0.0 { 1 } else { -1 };

        let mut x = p0.x.floor() as i64;
        let mut y = p0.y.floor() as i64;

        // Parametric distance along the segment to the next column/row boundary.
        let mut t_max_x = if dx == 0.0 { f64::INFINITY } else {
            ((if dx > 0.0 { 1.0 } else { 0.0 } + x as f64 - p0.x) / dx).abs()
        };
        let mut t_max_y = if dy == 0.0 { f64::INFINITY } else {
            ((if dy > 0.0 { 1.0 } else { 0.0 } + y as f64 - p0.y) / dy).abs()
        };

        let t_dx = (xi as f64 / dx).abs();
        let t_dy = (yi as f64 / dy).abs();

        if tracer.prev != Some(TilePoint { x, y }) {
            tracer.visit(x, y);
        }

        while t_max_x < 1.0 || t_max_y < 1.0 {
            if t_max_x < t_max_y {
                t_max_x += t_dx;
                x += xi;
            } else {
                t_max_y += t_dy;
                y += yi;
            }
            tracer.visit(x, y);
        }
    }

    if let (Some(crossings), Some(last)) = (tracer.ring.as_mut(), tracer.prev) {
        // The closing row repeats the ring's first row.
        if crossings.first().is_some_and(|first| first.y == last.y) {
            crossings.pop();
        }
    }

    if let (Some(out), Some(crossings)) = (ring, tracer.ring.take()) {
        *out = crossings;
    }
    tracer.tiles
}

fn polygon_cover(polygon: &Polygon<f64>, z: u8) -> Vec<TilePoint> {
    let mut tiles = Vec::new();
    let mut intersections = Vec::new();

    let rings: Vec<&LineString<f64>> = std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .collect();

    for line in rings {
        let mut ring = Vec::new();
        tiles.extend(line_cover(&line.0, z, Some(&mut ring)));

        let len = ring.len();
        if len == 0 { continue }

        let mut k = len - 1;
        for j in 0..len {
            let m = (j + 1) % len;
            let y = ring[j].y;

            // Keep crossings that are neither a local extremum nor a repeat of the next row.
            if (y > ring[k].y || y > ring[m].y)
                && (y < ring[k].y || y < ring[m].y)
                && y != ring[m].y
            {
                intersections.push(ring[j]);
            }
            k = j;
        }
    }

    intersections.sort_by_key(|t| (t.y, t.x));

    for pair in intersections.chunks_exact(2) {
        let (start, end) = (pair[0], pair[1]);
        tiles.extend((start.x + 1..end.x).map(|x| TilePoint { x, y: start.y }));
    }

    tiles
}

use crate::tile::MAX_ZOOM;

/// Tile size (in pixels) that map zoom levels are defined against.
pub const DEFAULT_TILE_SIZE: u16 = 512;

/// Kind of tile source a style references.
///
/// Only the rounding rule of [`covering_zoom_level`] depends on it: raster
/// imagery is fetched at the nearest zoom, everything else at the zoom below.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceType {
    Vector,
    Raster,
    RasterDem,
    GeoJson,
    Video,
    Image,
}

/// Inclusive range of zoom levels offered by a tile source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ZoomRange {
    pub min: u8,
    pub max: u8,
}

impl ZoomRange {
    #[inline] pub fn new(min: u8, max: u8) -> Self { Self { min, max } }

    /// Iterate over the zoom levels in ascending order.
    #[inline] pub fn levels(&self) -> impl Iterator<Item = u8> { self.min..=self.max }
}

impl Default for ZoomRange {
    fn default() -> Self { Self { min: 0, max: 22 } }
}

/// The tile zoom needed to render map zoom `zoom` from tiles of `tile_size` pixels.
pub fn covering_zoom_level(zoom: f64, source_type: SourceType, tile_size: u16) -> f64 {
    let zoom = zoom + (f64::from(DEFAULT_TILE_SIZE) / f64::from(tile_size)).log2();
    match source_type {
        SourceType::Raster | SourceType::Video => zoom.round(),
        _ => zoom.floor(),
    }
}

/// Intersect a map zoom range with the zoom levels a tile source offers.
///
/// `max_zoom` may be `+inf`, in which case the source's maximum applies.
/// Returns `None` when the two ranges do not overlap.
pub fn covering_zoom_range(
    min_zoom: f64,
    max_zoom: f64,
    source_type: SourceType,
    tile_size: u16,
    zoom_range: ZoomRange,
) -> Option<ZoomRange> {
    let min = covering_zoom_level(min_zoom, source_type, tile_size).max(f64::from(zoom_range.min));
    let max = covering_zoom_level(max_zoom, source_type, tile_size)
        .min(f64::from(zoom_range.max))
        .min(f64::from(MAX_ZOOM));

    // A zero tile size pushes `min` to +inf, so it falls through to `None` as well.
    if min <= max { Some(ZoomRange::new(min as u8, max as u8)) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tile_size_keeps_zoom() {
        assert_eq!(covering_zoom_level(3.0, SourceType::Vector, 512), 3.0);
        assert_eq!(covering_zoom_level(3.7, SourceType::Vector, 512), 3.0);
    }

    #[test]
    fn smaller_tiles_need_one_more_zoom() {
        assert_eq!(covering_zoom_level(0.0, SourceType::Vector, 256), 1.0);
        assert_eq!(covering_zoom_level(5.0, SourceType::Raster, 256), 6.0);
    }

    #[test]
    fn raster_rounds_vector_floors() {
        assert_eq!(covering_zoom_level(0.6, SourceType::Vector, 512), 0.0);
        assert_eq!(covering_zoom_level(0.6, SourceType::Raster, 512), 1.0);
        assert_eq!(covering_zoom_level(0.6, SourceType::Video, 512), 1.0);
        assert_eq!(covering_zoom_level(0.6, SourceType::RasterDem, 512), 0.0);
    }

    #[test]
    fn range_intersects_source_range() {
        let range = covering_zoom_range(2.0, 2.0, SourceType::Vector, 512, ZoomRange::new(0, 22));
        assert_eq!(range, Some(ZoomRange::new(2, 2)));

        let range = covering_zoom_range(2.0, 2.0, SourceType::Vector, 512, ZoomRange::new(3, 22));
        assert_eq!(range, None);
    }

    #[test]
    fn unbounded_max_uses_source_max() {
        let range = covering_zoom_range(0.0, f64::INFINITY, SourceType::Vector, 512, ZoomRange::new(0, 14));
        assert_eq!(range, Some(ZoomRange::new(0, 14)));
    }

    #[test]
    fn zero_tile_size_yields_nothing() {
        assert_eq!(covering_zoom_range(0.0, 5.0, SourceType::Vector, 0, ZoomRange::default()), None);
    }

    #[test]
    fn levels_are_inclusive() {
        let levels: Vec<u8> = ZoomRange::new(3, 5).levels().collect();
        assert_eq!(levels, vec![3, 4, 5]);
    }
}

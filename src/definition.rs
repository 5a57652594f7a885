use bytes::Bytes;
use geo::Geometry;
use serde::{Deserialize, Serialize};
use tilecover::{CanonicalTileId, SourceType, ZoomRange};

use crate::{
    bounds::LatLngBounds,
    error::{RegionError, Result},
    geometry::RegionGeometry,
    io::{binary, record},
};

/// An immutable description of a map region to keep offline.
///
/// Holds a style reference, the area to cover, an inclusive zoom range and
/// the device pixel ratio. Every constructor and decoder validates that:
/// - `min_zoom` is finite and `>= 0`
/// - `max_zoom >= min_zoom` and is not NaN (`+inf` means unbounded)
/// - `pixel_ratio` is finite and `>= 0`
/// - the geometry has finite coordinates, well-formed lines and rings, and
///   no empty multi-geometry
///
/// The style reference is passed through as given and never interpreted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "record::RegionRecord", into = "record::RegionRecord")]
pub struct RegionDefinition {
    style_reference: String,
    geometry: RegionGeometry,
    min_zoom: f64,
    max_zoom: f64,
    pixel_ratio: f32,
}

impl RegionDefinition {
    /// Create a definition covering `geometry`.
    pub fn new(
        style_reference: impl Into<String>,
        geometry: impl Into<RegionGeometry>,
        min_zoom: f64,
        max_zoom: f64,
        pixel_ratio: f32,
    ) -> Result<Self> {
        let definition = Self {
            style_reference: style_reference.into(),
            geometry: geometry.into(),
            min_zoom,
            max_zoom,
            pixel_ratio,
        };
        definition.validate()?;
        Ok(definition)
    }

    /// Create a definition covering a rectangle, stored as the closed ring
    /// SW, SE, NE, NW, SW.
    pub fn from_bounds(
        style_reference: impl Into<String>,
        bounds: LatLngBounds,
        min_zoom: f64,
        max_zoom: f64,
        pixel_ratio: f32,
    ) -> Result<Self> {
        Self::new(style_reference, bounds.to_polygon(), min_zoom, max_zoom, pixel_ratio)
    }

    fn validate(&self) -> Result<()> {
        if !self.min_zoom.is_finite() || self.min_zoom < 0.0 {
            return Err(RegionError::invalid(format!(
                "[RegionDefinition::new] min_zoom must be finite and >= 0, got {}", self.min_zoom
            )));
        }
        if self.max_zoom.is_nan() || self.max_zoom < self.min_zoom {
            return Err(RegionError::invalid(format!(
                "[RegionDefinition::new] max_zoom must be >= min_zoom ({}), got {}", self.min_zoom, self.max_zoom
            )));
        }
        if !self.pixel_ratio.is_finite() || self.pixel_ratio < 0.0 {
            return Err(RegionError::invalid(format!(
                "[RegionDefinition::new] pixel_ratio must be finite and >= 0, got {}", self.pixel_ratio
            )));
        }
        self.geometry.check_shape()
            .map_err(|e| RegionError::invalid(format!("[RegionDefinition::new] {} {e}", self.geometry.kind())))
    }

    #[inline] pub fn style_reference(&self) -> &str { &self.style_reference }
    #[inline] pub fn geometry(&self) -> &RegionGeometry { &self.geometry }
    #[inline] pub fn min_zoom(&self) -> f64 { self.min_zoom }
    #[inline] pub fn max_zoom(&self) -> f64 { self.max_zoom }
    #[inline] pub fn pixel_ratio(&self) -> f32 { self.pixel_ratio }

    /// False when the zoom range is open-ended (`max_zoom` is `+inf`).
    #[inline] pub fn has_max_zoom_bound(&self) -> bool { self.max_zoom != f64::INFINITY }

    #[inline] pub(crate) fn into_style_reference(self) -> String { self.style_reference }

    /// Encode as a binary record (see [`crate::io::binary`]).
    pub fn to_bytes(&self) -> Result<Bytes> { binary::encode(self) }

    /// Decode a binary record that spans all of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> { binary::decode(bytes) }

    /// Encode as a JSON document (see [`crate::io::record`]).
    pub fn to_json(&self) -> Result<String> { record::encode_record(self) }

    /// Decode a JSON document.
    pub fn from_json(text: &str) -> Result<Self> { record::decode_record(text) }

    /// Tile zoom levels of a source that this definition addresses, or `None`
    /// if the source offers none of them.
    pub fn covering_zoom_range(&self, source_type: SourceType, tile_size: u16, zoom_range: ZoomRange) -> Option<ZoomRange> {
        tilecover::covering_zoom_range(self.min_zoom, self.max_zoom, source_type, tile_size, zoom_range)
    }

    /// Every tile of a source needed to cover this region, ordered by zoom
    /// and then row-major within each zoom.
    pub fn tile_cover(&self, source_type: SourceType, tile_size: u16, zoom_range: ZoomRange) -> Vec<CanonicalTileId> {
        let Some(range) = self.covering_zoom_range(source_type, tile_size, zoom_range) else {
            return Vec::new();
        };
        let geometry = Geometry::from(&self.geometry);
        range.levels()
            .flat_map(|z| tilecover::tile_cover(&geometry, z))
            .collect()
    }

    /// Number of tiles [`tile_cover`](Self::tile_cover) would return.
    pub fn tile_count(&self, source_type: SourceType, tile_size: u16, zoom_range: ZoomRange) -> u64 {
        let Some(range) = self.covering_zoom_range(source_type, tile_size, zoom_range) else {
            return 0;
        };
        let geometry = Geometry::from(&self.geometry);
        let count: u64 = range.levels().map(|z| tilecover::tile_count(&geometry, z)).sum();
        tracing::debug!(
            min = range.min,
            max = range.max,
            count,
            "[RegionDefinition::tile_count] counted region tiles"
        );
        count
    }
}

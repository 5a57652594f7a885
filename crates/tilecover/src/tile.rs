use std::fmt;

/// Highest zoom level a tile id can address.
///
/// At zoom 30 the world is `2^30` tiles wide, which still fits `x`/`y` in a
/// `u32` with room to spare.
pub const MAX_ZOOM: u8 = 30;

/// A tile in the canonical `z/x/y` scheme, with `0 <= x, y < 2^z`.
///
/// Tiles covering geometry that crosses the antimeridian are wrapped back
/// into the canonical range, so the same tile is never addressed twice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalTileId {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl CanonicalTileId {
    #[inline] pub fn new(z: u8, x: u32, y: u32) -> Self { Self { z, x, y } }

    /// Number of tiles along one axis at zoom `z`.
    #[inline] pub fn tiles_per_axis(z: u8) -> u64 { 1u64 << z }
}

impl fmt::Display for CanonicalTileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_slash_separated() {
        assert_eq!(CanonicalTileId::new(10, 163, 395).to_string(), "10/163/395");
    }

    #[test]
    fn ordering_is_zoom_first() {
        assert!(CanonicalTileId::new(1, 1, 1) < CanonicalTileId::new(2, 0, 0));
        assert!(CanonicalTileId::new(2, 0, 3) < CanonicalTileId::new(2, 1, 0));
    }

    #[test]
    fn tiles_per_axis() {
        assert_eq!(CanonicalTileId::tiles_per_axis(0), 1);
        assert_eq!(CanonicalTileId::tiles_per_axis(10), 1024);
        assert_eq!(CanonicalTileId::tiles_per_axis(MAX_ZOOM), 1 << 30);
    }
}

pub mod cover;
pub mod projection;
pub mod tile;
pub mod zoom;

pub use cover::{tile_count, tile_cover};
pub use projection::{project, LATITUDE_MAX};
pub use tile::{CanonicalTileId, MAX_ZOOM};
pub use zoom::{covering_zoom_level, covering_zoom_range, SourceType, ZoomRange, DEFAULT_TILE_SIZE};

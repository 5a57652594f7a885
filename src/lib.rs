#![doc = "Offline region definitions: validated value type, codecs and tile-cover planning"]
mod bounds;
mod definition;
mod error;
mod geometry;
pub mod io;

#[doc(inline)]
pub use definition::RegionDefinition;

#[doc(inline)]
pub use bounds::LatLngBounds;

#[doc(inline)]
pub use geometry::{GeometryKind, RegionGeometry};

#[doc(inline)]
pub use error::{RegionError, Result};

#[doc(inline)]
pub use tilecover::{CanonicalTileId, SourceType, ZoomRange};

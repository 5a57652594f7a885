//! Serialized forms of an offline region definition.
//!
//! Each format module handles both directions for one encoding.
//!
//! # Format Modules
//!
//! - `geojson` - GeoJSON geometry objects for the region's area
//! - `binary` - fixed-layout binary record for crossing process or FFI boundaries
//! - `record` - JSON document stored per region by an offline database

pub mod binary;
pub mod geojson;
pub mod record;

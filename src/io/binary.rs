//! Binary transfer record for offline region definitions.
//!
//! Fixed field order, little-endian, no header or version tag:
//!
//! | field             | encoding                                   |
//! |-------------------|--------------------------------------------|
//! | `style_reference` | `u32` byte length + UTF-8 bytes            |
//! | `geometry`        | `u32` byte length + UTF-8 GeoJSON text     |
//! | `min_zoom`        | `f64`                                      |
//! | `max_zoom`        | `f64` (`+inf` when unbounded)              |
//! | `pixel_ratio`     | `f32`                                      |
//!
//! Adding, removing or reordering a field breaks every existing reader.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::{
    definition::RegionDefinition,
    error::{RegionError, Result},
    io::geojson,
};

/// Size of the length prefix in front of each string field.
pub const LENGTH_PREFIX_BYTES: usize = 4;

/// Size of a record whose strings are both empty.
pub const MIN_RECORD_LEN: usize = 2 * LENGTH_PREFIX_BYTES + 8 + 8 + 4;

/// Encode a definition into a new buffer.
pub fn encode(definition: &RegionDefinition) -> Result<Bytes> {
    let geometry = geojson::to_geojson_string(definition.geometry());
    let mut buf = BytesMut::with_capacity(MIN_RECORD_LEN + definition.style_reference().len() + geometry.len());
    write_record(definition, &geometry, &mut buf)?;
    Ok(buf.freeze())
}

/// Append the encoded definition to `buf`.
pub fn encode_into(definition: &RegionDefinition, buf: &mut impl BufMut) -> Result<()> {
    let geometry = geojson::to_geojson_string(definition.geometry());
    write_record(definition, &geometry, buf)
}

fn write_record(definition: &RegionDefinition, geometry: &str, buf: &mut impl BufMut) -> Result<()> {
    write_string(buf, "style_reference", definition.style_reference())?;
    write_string(buf, "geometry", geometry)?;
    buf.put_f64_le(definition.min_zoom());
    buf.put_f64_le(definition.max_zoom());
    buf.put_f32_le(definition.pixel_ratio());
    Ok(())
}

fn write_string(buf: &mut impl BufMut, field: &str, value: &str) -> Result<()> {
    let len = u32::try_from(value.len())
        .map_err(|_| RegionError::record(format!("[io::binary::encode] {field} is too long ({} bytes)", value.len())))?;
    buf.put_u32_le(len);
    buf.put_slice(value.as_bytes());
    Ok(())
}

/// Decode a definition that occupies all of `bytes`.
///
/// Trailing bytes after the last field are rejected.
pub fn decode(bytes: &[u8]) -> Result<RegionDefinition> {
    let mut buf = bytes;
    let definition = decode_from(&mut buf)?;

    if buf.has_remaining() {
        let err = RegionError::record(format!("[io::binary::decode] {} trailing bytes after record", buf.remaining()));
        tracing::warn!("{err}");
        return Err(err);
    }

    Ok(definition)
}

/// Decode one definition from the front of `buf`, leaving any following bytes in place.
pub fn decode_from(buf: &mut impl Buf) -> Result<RegionDefinition> {
    read_record(buf)
        .inspect(|definition| tracing::debug!(
            style = definition.style_reference(),
            kind = %definition.geometry().kind(),
            min_zoom = definition.min_zoom(),
            max_zoom = definition.max_zoom(),
            "[io::binary::decode] decoded offline region definition"
        ))
        .inspect_err(|e| tracing::warn!("[io::binary::decode] {e}"))
}

fn read_record(buf: &mut impl Buf) -> Result<RegionDefinition> {
    let style_reference = read_string(buf, "style_reference")?;
    let geometry = geojson::from_geojson_str(&read_string(buf, "geometry")?)?;

    ensure_remaining(buf.remaining(), "min_zoom", 8)?;
    let min_zoom = buf.get_f64_le();

    ensure_remaining(buf.remaining(), "max_zoom", 8)?;
    let max_zoom = buf.get_f64_le();

    ensure_remaining(buf.remaining(), "pixel_ratio", 4)?;
    let pixel_ratio = buf.get_f32_le();

    RegionDefinition::new(style_reference, geometry, min_zoom, max_zoom, pixel_ratio)
}

fn ensure_remaining(remaining: usize, field: &'static str, needed: usize) -> Result<()> {
    if remaining < needed {
        return Err(RegionError::TruncatedRecord { field, needed, remaining });
    }
    Ok(())
}

fn read_string(buf: &mut impl Buf, field: &'static str) -> Result<String> {
    ensure_remaining(buf.remaining(), field, LENGTH_PREFIX_BYTES)?;
    let len = buf.get_u32_le() as usize;

    ensure_remaining(buf.remaining(), field, len)?;
    let bytes = buf.copy_to_bytes(len);

    String::from_utf8(bytes.to_vec())
        .map_err(|e| RegionError::record(format!("[io::binary::decode] {field} is not valid UTF-8: {e}")))
}

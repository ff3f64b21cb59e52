/*
This code is part of the WhiteboxTools geospatial analysis library.
Authors: Dr. John Lindsay
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT

Notes: One codec per shape kind. A handler reads a record payload from a
cursor placed just after the record's shape type, and writes a payload
starting with the shape type. Lengths are in bytes and include the shape
type.
*/

// private sub-module defined in other files
mod multiline;
mod multipoint;
mod point;
mod polygon;

use super::rules::{m_min_max, z_min_max};
use super::ShapeType;
use crate::error::{Result, ShapefileError};
use crate::io_utils::{ByteOrderReader, ByteOrderWriter};
use crate::structures::{BoundingBox, Coordinate, Geometry};
use std::io::prelude::*;

/// Measures below this value on the wire mean "no measure".
pub const NO_DATA_M_THRESHOLD: f64 = -1e38;
/// Written in place of a missing measure.
pub const NO_DATA_M: f64 = -1e40;

/// The codec for one shape kind, carrying the shape type it writes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ShapeHandler {
    Point(ShapeType),
    MultiPoint(ShapeType),
    MultiLine(ShapeType),
    Polygon(ShapeType),
}

impl ShapeHandler {
    pub fn shape_type(&self) -> ShapeType {
        match *self {
            ShapeHandler::Point(t)
            | ShapeHandler::MultiPoint(t)
            | ShapeHandler::MultiLine(t)
            | ShapeHandler::Polygon(t) => t,
        }
    }

    /// Decodes one payload. `shape_type` is the type the record declares;
    /// a Null record yields an empty geometry. With `flatten` set the Z and
    /// M blocks are not read.
    pub fn read<R: Read + Seek>(
        &self,
        bor: &mut ByteOrderReader<R>,
        shape_type: ShapeType,
        flatten: bool,
    ) -> Result<Geometry> {
        match self {
            ShapeHandler::Point(_) => point::read(bor, shape_type, flatten),
            ShapeHandler::MultiPoint(_) => multipoint::read(bor, shape_type, flatten),
            ShapeHandler::MultiLine(_) => multiline::read(bor, shape_type, flatten),
            ShapeHandler::Polygon(_) => polygon::read(bor, shape_type, flatten),
        }
    }

    /// Encodes one payload, including the leading shape type.
    pub fn write<W: Write>(&self, bow: &mut ByteOrderWriter<W>, geometry: &Geometry) -> Result<()> {
        match *self {
            ShapeHandler::Point(t) => point::write(bow, geometry, t),
            ShapeHandler::MultiPoint(t) => multipoint::write(bow, geometry, t),
            ShapeHandler::MultiLine(t) => multiline::write(bow, geometry, t),
            ShapeHandler::Polygon(t) => polygon::write(bow, geometry, t),
        }
    }

    /// The exact number of bytes `write` produces for `geometry`.
    pub fn get_length(&self, geometry: &Geometry) -> Result<usize> {
        match *self {
            ShapeHandler::Point(t) => point::get_length(geometry, t),
            ShapeHandler::MultiPoint(t) => multipoint::get_length(geometry, t),
            ShapeHandler::MultiLine(t) => multiline::get_length(geometry, t),
            ShapeHandler::Polygon(t) => polygon::get_length(geometry, t),
        }
    }
}

pub(crate) fn read_m<R: Read + Seek>(bor: &mut ByteOrderReader<R>) -> Result<f64> {
    let m = bor.read_f64()?;
    if m < NO_DATA_M_THRESHOLD {
        return Ok(f64::NAN);
    }
    Ok(m)
}

pub(crate) fn z_to_wire(z: f64) -> f64 {
    if z.is_nan() {
        0f64
    } else {
        z
    }
}

pub(crate) fn m_to_wire(m: f64) -> f64 {
    if m.is_nan() {
        NO_DATA_M
    } else {
        m
    }
}

/// Fails with `Truncated` unless `needed` more bytes remain in the payload.
/// Counts read from the wire are checked with this before anything is
/// allocated for them.
pub(crate) fn ensure_available<R: Read + Seek>(
    bor: &ByteOrderReader<R>,
    needed: usize,
) -> Result<()> {
    if needed > bor.remaining() {
        return Err(ShapefileError::Truncated {
            offset: bor.pos() as u64,
            needed: needed,
            available: bor.remaining(),
        });
    }
    Ok(())
}

/// Reads `n` (x, y) pairs.
pub(crate) fn read_xy<R: Read + Seek>(bor: &mut ByteOrderReader<R>, n: usize) -> Result<Vec<Coordinate>> {
    ensure_available(bor, n.saturating_mul(16))?;
    let mut coords = Vec::with_capacity(n);
    for _ in 0..n {
        let x = bor.read_f64()?;
        let y = bor.read_f64()?;
        coords.push(Coordinate::new(x, y));
    }
    Ok(coords)
}

/// Reads the Z range and Z values into `coords`.
pub(crate) fn read_z_block<R: Read + Seek>(
    bor: &mut ByteOrderReader<R>,
    coords: &mut [Coordinate],
) -> Result<()> {
    bor.inc_pos(16)?;
    for c in coords.iter_mut() {
        c.z = bor.read_f64()?;
    }
    Ok(())
}

/// Reads the M range and M values into `coords`.
pub(crate) fn read_m_block<R: Read + Seek>(
    bor: &mut ByteOrderReader<R>,
    coords: &mut [Coordinate],
) -> Result<()> {
    bor.inc_pos(16)?;
    for c in coords.iter_mut() {
        c.m = read_m(bor)?;
    }
    Ok(())
}

/// Reads whatever Z and M blocks `shape_type` carries into `coords` and
/// returns the (has_z, has_m) flags of the decoded sequence. The M block of
/// a Z record is optional and read only when the payload still holds it.
pub(crate) fn read_zm_blocks<R: Read + Seek>(
    bor: &mut ByteOrderReader<R>,
    coords: &mut [Coordinate],
    shape_type: ShapeType,
    flatten: bool,
) -> Result<(bool, bool)> {
    if flatten {
        return Ok((false, false));
    }
    let mut has_z = false;
    let mut has_m = false;
    if shape_type.has_z() {
        read_z_block(bor, coords)?;
        has_z = true;
        if bor.remaining() >= 16 + 8 * coords.len() {
            read_m_block(bor, coords)?;
            has_m = true;
        }
    } else if shape_type.has_m() {
        read_m_block(bor, coords)?;
        has_m = true;
    }
    Ok((has_z, has_m))
}

pub(crate) fn write_bbox<W: Write>(bow: &mut ByteOrderWriter<W>, bbox: &BoundingBox) -> Result<()> {
    if bbox.is_empty() {
        for _ in 0..4 {
            bow.write_f64(0f64)?;
        }
        return Ok(());
    }
    bow.write_f64(bbox.min_x)?;
    bow.write_f64(bbox.min_y)?;
    bow.write_f64(bbox.max_x)?;
    bow.write_f64(bbox.max_y)?;
    Ok(())
}

pub(crate) fn write_xy<W: Write>(bow: &mut ByteOrderWriter<W>, coords: &[Coordinate]) -> Result<()> {
    for c in coords {
        bow.write_f64(c.x)?;
        bow.write_f64(c.y)?;
    }
    Ok(())
}

/// Writes the Z block and then the M block for Z types, or only the M block
/// for M types.
pub(crate) fn write_zm_blocks<W: Write>(
    bow: &mut ByteOrderWriter<W>,
    coords: &[Coordinate],
    shape_type: ShapeType,
) -> Result<()> {
    if shape_type.has_z() {
        let (z_min, z_max) = z_min_max(coords);
        if z_min.is_nan() {
            bow.write_f64(0f64)?;
            bow.write_f64(0f64)?;
        } else {
            bow.write_f64(z_min)?;
            bow.write_f64(z_max)?;
        }
        for c in coords {
            bow.write_f64(z_to_wire(c.z))?;
        }
    }
    if shape_type.has_m() {
        let (m_min, m_max) = m_min_max(coords);
        bow.write_f64(m_to_wire(m_min))?;
        bow.write_f64(m_to_wire(m_max))?;
        for c in coords {
            bow.write_f64(m_to_wire(c.m))?;
        }
    }
    Ok(())
}

/// Bytes taken by the Z and M blocks of `n` points.
pub(crate) fn zm_length(shape_type: ShapeType, n: usize) -> usize {
    let mut len = 0;
    if shape_type.has_z() {
        len += 16 + 8 * n;
    }
    if shape_type.has_m() {
        len += 16 + 8 * n;
    }
    len
}

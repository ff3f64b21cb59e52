/*
This code is part of the WhiteboxTools geospatial analysis library.
Authors: Dr. John Lindsay
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/

use super::{read_xy, read_zm_blocks, write_bbox, write_xy, write_zm_blocks, zm_length};
use crate::error::{Result, ShapefileError};
use crate::io_utils::{ByteOrderReader, ByteOrderWriter};
use crate::structures::{CoordinateSequence, Geometry, MultiPoint};
use crate::vector::shapefile::ShapeType;
use std::io::prelude::*;

pub(super) fn read<R: Read + Seek>(
    bor: &mut ByteOrderReader<R>,
    shape_type: ShapeType,
    flatten: bool,
) -> Result<Geometry> {
    if shape_type == ShapeType::Null {
        return Ok(Geometry::from(MultiPoint::default()));
    }
    // skip the bounding box
    bor.inc_pos(32)?;
    let num_points = bor.read_i32()?.max(0) as usize;
    let mut coords = read_xy(bor, num_points)?;
    let (has_z, has_m) = read_zm_blocks(bor, &mut coords, shape_type, flatten)?;
    Ok(Geometry::from(MultiPoint::new(CoordinateSequence::from_coords(
        coords, has_z, has_m,
    ))))
}

/// Points and multipoints are both encoded as multipoints.
fn as_sequence<'a>(geometry: &'a Geometry, shape_type: ShapeType) -> Result<&'a CoordinateSequence> {
    match geometry {
        Geometry::MultiPoint(mp) => Ok(&mp.coords),
        Geometry::Point(p) => Ok(&p.coords),
        _ => Err(ShapefileError::UnsupportedGeometry {
            kind: geometry.kind(),
            shape_type: shape_type,
        }),
    }
}

pub(super) fn write<W: Write>(
    bow: &mut ByteOrderWriter<W>,
    geometry: &Geometry,
    shape_type: ShapeType,
) -> Result<()> {
    let coords = as_sequence(geometry, shape_type)?;
    bow.write_i32(shape_type.to_int())?;
    write_bbox(bow, &coords.get_bounding_box())?;
    bow.write_i32(coords.len() as i32)?;
    write_xy(bow, coords.coords())?;
    write_zm_blocks(bow, coords.coords(), shape_type)
}

pub(super) fn get_length(geometry: &Geometry, shape_type: ShapeType) -> Result<usize> {
    let n = as_sequence(geometry, shape_type)?.len();
    Ok(40 + 16 * n + zm_length(shape_type, n))
}

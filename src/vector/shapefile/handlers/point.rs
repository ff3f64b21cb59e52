/*
This code is part of the WhiteboxTools geospatial analysis library.
Authors: Dr. John Lindsay
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/

use super::{m_to_wire, read_m, z_to_wire};
use crate::error::{Result, ShapefileError};
use crate::io_utils::{ByteOrderReader, ByteOrderWriter};
use crate::structures::{Coordinate, Geometry, Point};
use crate::vector::shapefile::ShapeType;
use std::io::prelude::*;

pub(super) fn read<R: Read + Seek>(
    bor: &mut ByteOrderReader<R>,
    shape_type: ShapeType,
    flatten: bool,
) -> Result<Geometry> {
    if shape_type == ShapeType::Null {
        return Ok(Geometry::from(Point::new(f64::NAN, f64::NAN)));
    }
    let x = bor.read_f64()?;
    let y = bor.read_f64()?;
    let mut c = Coordinate::new(x, y);
    let mut has_z = false;
    let mut has_m = false;
    if !flatten {
        if shape_type.has_z() {
            c.z = bor.read_f64()?;
            has_z = true;
            if bor.remaining() >= 8 {
                c.m = read_m(bor)?;
                has_m = true;
            }
        } else if shape_type.has_m() {
            c.m = read_m(bor)?;
            has_m = true;
        }
    }
    Ok(Geometry::from(Point::from_coordinate(c, has_z, has_m)))
}

fn as_point<'a>(geometry: &'a Geometry, shape_type: ShapeType) -> Result<&'a Point> {
    match geometry {
        Geometry::Point(p) => Ok(p),
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
    let point = as_point(geometry, shape_type)?;
    let c = point
        .coordinate()
        .copied()
        .unwrap_or_else(|| Coordinate::new(f64::NAN, f64::NAN));
    bow.write_i32(shape_type.to_int())?;
    bow.write_f64(c.x)?;
    bow.write_f64(c.y)?;
    if shape_type.has_z() {
        bow.write_f64(z_to_wire(c.z))?;
    }
    if shape_type.has_m() {
        bow.write_f64(m_to_wire(c.m))?;
    }
    Ok(())
}

pub(super) fn get_length(geometry: &Geometry, shape_type: ShapeType) -> Result<usize> {
    as_point(geometry, shape_type)?;
    let len = if shape_type.has_z() {
        36
    } else if shape_type.has_m() {
        28
    } else {
        20
    };
    Ok(len)
}

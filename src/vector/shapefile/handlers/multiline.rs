/*
This code is part of the WhiteboxTools geospatial analysis library.
Authors: Dr. John Lindsay
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/

use super::{ensure_available, read_xy, read_zm_blocks, write_bbox, write_xy, write_zm_blocks, zm_length};
use crate::error::{Result, ShapefileError};
use crate::io_utils::{ByteOrderReader, ByteOrderWriter};
use crate::structures::{
    BoundingBox, Coordinate, CoordinateSequence, Geometry, LineString, MultiLineString,
};
use crate::vector::shapefile::ShapeType;
use std::io::prelude::*;

/// The parts of a multi-part record as coordinate sequences. Shared with
/// the polygon handler, which has the same layout.
pub(super) fn read_parts<R: Read + Seek>(
    bor: &mut ByteOrderReader<R>,
    shape_type: ShapeType,
    flatten: bool,
) -> Result<Vec<CoordinateSequence>> {
    // skip the bounding box
    bor.inc_pos(32)?;
    let num_parts = bor.read_i32()?.max(0) as usize;
    let num_points = bor.read_i32()?.max(0) as usize;
    ensure_available(
        bor,
        num_parts.saturating_mul(4).saturating_add(num_points.saturating_mul(16)),
    )?;
    let mut part_offsets = Vec::with_capacity(num_parts);
    for _ in 0..num_parts {
        part_offsets.push(bor.read_i32()?.max(0) as usize);
    }
    let mut coords = read_xy(bor, num_points)?;
    let (has_z, has_m) = read_zm_blocks(bor, &mut coords, shape_type, flatten)?;

    let mut parts = Vec::with_capacity(num_parts);
    for i in 0..num_parts {
        let end = if i + 1 < num_parts {
            part_offsets[i + 1].min(num_points)
        } else {
            num_points
        };
        let start = part_offsets[i].min(end);
        let mut part: Vec<Coordinate> = coords[start..end].to_vec();
        if part.is_empty() {
            continue;
        }
        if part.len() == 1 {
            // a single point part becomes a zero-length two point part
            let c = part[0];
            part.push(c);
        }
        parts.push(CoordinateSequence::from_coords(part, has_z, has_m));
    }
    Ok(parts)
}

/// Writes a multi-part record: shape type, bounding box, part and point
/// counts, part offsets, then the coordinate blocks.
pub(super) fn write_parts<W: Write>(
    bow: &mut ByteOrderWriter<W>,
    parts: &[&CoordinateSequence],
    shape_type: ShapeType,
) -> Result<()> {
    let mut bbox = BoundingBox::empty();
    let mut coords: Vec<Coordinate> = vec![];
    let mut part_offsets = Vec::with_capacity(parts.len());
    for part in parts {
        part_offsets.push(coords.len() as i32);
        bbox.expand_to(part.get_bounding_box());
        coords.extend_from_slice(part.coords());
    }

    bow.write_i32(shape_type.to_int())?;
    write_bbox(bow, &bbox)?;
    bow.write_i32(parts.len() as i32)?;
    bow.write_i32(coords.len() as i32)?;
    for offset in part_offsets {
        bow.write_i32(offset)?;
    }
    write_xy(bow, &coords)?;
    write_zm_blocks(bow, &coords, shape_type)
}

pub(super) fn parts_length(parts: &[&CoordinateSequence], shape_type: ShapeType) -> usize {
    let n: usize = parts.iter().map(|p| p.len()).sum();
    44 + 4 * parts.len() + 16 * n + zm_length(shape_type, n)
}

pub(super) fn read<R: Read + Seek>(
    bor: &mut ByteOrderReader<R>,
    shape_type: ShapeType,
    flatten: bool,
) -> Result<Geometry> {
    if shape_type == ShapeType::Null {
        return Ok(Geometry::from(MultiLineString::default()));
    }
    let lines = read_parts(bor, shape_type, flatten)?
        .into_iter()
        .map(LineString::new)
        .collect();
    Ok(Geometry::from(MultiLineString::new(lines)))
}

fn as_parts<'a>(geometry: &'a Geometry, shape_type: ShapeType) -> Result<Vec<&'a CoordinateSequence>> {
    match geometry {
        Geometry::LineString(ls) => Ok(vec![&ls.coords]),
        Geometry::LinearRing(lr) => Ok(vec![&lr.coords]),
        Geometry::MultiLineString(mls) => Ok(mls.lines.iter().map(|ls| &ls.coords).collect()),
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
    let parts = as_parts(geometry, shape_type)?;
    write_parts(bow, &parts, shape_type)
}

pub(super) fn get_length(geometry: &Geometry, shape_type: ShapeType) -> Result<usize> {
    let parts = as_parts(geometry, shape_type)?;
    Ok(parts_length(&parts, shape_type))
}

#[cfg(test)]
mod test {
    use crate::io_utils::{ByteOrderReader, ByteOrderWriter, Endianness};
    use crate::structures::{Coordinate, Geometry};
    use crate::vector::shapefile::ShapeType;
    use std::io::Cursor;

    #[test]
    fn test_single_point_part_is_duplicated() {
        let mut bow = ByteOrderWriter::new(vec![], Endianness::LittleEndian);
        for v in &[5.0, 5.0, 7.0, 8.0] {
            bow.write_f64(*v).unwrap();
        }
        bow.write_i32(2).unwrap(); // parts
        bow.write_i32(3).unwrap(); // points
        bow.write_i32(0).unwrap();
        bow.write_i32(1).unwrap();
        for v in &[5.0, 5.0, 6.0, 6.0, 7.0, 8.0] {
            bow.write_f64(*v).unwrap();
        }
        let bytes = bow.into_inner();
        let mut bor = ByteOrderReader::new(Cursor::new(bytes), Endianness::LittleEndian).unwrap();
        let handler = ShapeType::PolyLine.handler().unwrap();
        match handler.read(&mut bor, ShapeType::PolyLine, false).unwrap() {
            Geometry::MultiLineString(mls) => {
                assert_eq!(mls.num_geometries(), 2);
                assert_eq!(mls.lines[0].coords.len(), 2);
                assert_eq!(mls.lines[0].coords[0], Coordinate::new(5.0, 5.0));
                assert_eq!(mls.lines[0].coords[1], Coordinate::new(5.0, 5.0));
                assert_eq!(mls.lines[1].coords.len(), 2);
            }
            g => panic!("unexpected {}", g.kind()),
        }
    }
}

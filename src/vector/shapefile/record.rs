/*
This code is part of the WhiteboxTools geospatial analysis library.
Authors: Dr. John Lindsay
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/

use super::handlers::ShapeHandler;
use super::ShapeType;
use crate::error::Result;
use crate::io_utils::{ByteOrderReader, Endianness};
use crate::structures::{
    BoundingBox, Coordinate, CoordinateSequence, Geometry, LineString, LinearRing, MultiPoint,
    Point, Polygon,
};
use std::io::Cursor;

/// One record of a .shp file. The geometry is decoded on first access and
/// cached.
#[derive(Clone, Debug)]
pub struct ShapeRecord {
    /// The 1-based record number from the record header.
    pub number: i32,
    /// Byte offset of the record header.
    pub offset: u64,
    /// Byte offset just past the record.
    pub end: u64,
    /// Content length in bytes, excluding the 8-byte record header.
    pub length: usize,
    pub shape_type: ShapeType,
    payload: Vec<u8>,
    bbox: BoundingBox,
    handler: Option<ShapeHandler>,
    flatten: bool,
    shape: Option<Geometry>,
}

impl ShapeRecord {
    /// Builds a record from its content bytes, which start with the shape
    /// type. The bounding box is peeked here without decoding the geometry.
    pub(crate) fn new(
        number: i32,
        offset: u64,
        shape_type: ShapeType,
        content: &[u8],
        handler: Option<ShapeHandler>,
        flatten: bool,
    ) -> Result<ShapeRecord> {
        let payload = content.get(4..).unwrap_or(&[]).to_vec();
        let bbox = peek_bbox(&payload, shape_type)?;
        Ok(ShapeRecord {
            number: number,
            offset: offset,
            end: offset + 8 + content.len() as u64,
            length: content.len(),
            shape_type: shape_type,
            payload: payload,
            bbox: bbox,
            handler: handler,
            flatten: flatten,
            shape: None,
        })
    }

    fn decode(&self) -> Result<Geometry> {
        match self.handler {
            Some(handler) => {
                let mut bor =
                    ByteOrderReader::new(Cursor::new(&self.payload[..]), Endianness::LittleEndian)?;
                handler.read(&mut bor, self.shape_type, self.flatten)
            }
            None => Ok(Geometry::GeometryCollection(vec![])),
        }
    }

    /// The decoded geometry.
    pub fn shape(&mut self) -> Result<&Geometry> {
        let shape = match self.shape.take() {
            Some(shape) => shape,
            None => self.decode()?,
        };
        Ok(self.shape.insert(shape))
    }

    pub fn into_shape(self) -> Result<Geometry> {
        match self.shape {
            Some(shape) => Ok(shape),
            None => self.decode(),
        }
    }

    /// The record's bounding box, read without decoding the geometry.
    pub fn envelope(&self) -> BoundingBox {
        self.bbox
    }

    /// A cheap stand-in for the geometry built from the bounding box alone:
    /// the point itself for point records, the box diagonal for lines, the
    /// two corners for multipoints and the box outline for polygons.
    pub fn simplified_shape(&self) -> Geometry {
        let bb = self.bbox;
        if bb.is_empty() {
            return Geometry::GeometryCollection(vec![]);
        }
        let corners = [(bb.min_x, bb.min_y), (bb.max_x, bb.max_y)];
        match self.shape_type.base_shape_type() {
            ShapeType::Point => Geometry::from(Point::new(bb.min_x, bb.min_y)),
            ShapeType::MultiPoint => {
                Geometry::from(MultiPoint::new(CoordinateSequence::from_xy(&corners)))
            }
            ShapeType::PolyLine => Geometry::from(LineString::from_xy(&corners)),
            ShapeType::Polygon => Geometry::from(Polygon::new(
                LinearRing::from_xy(&[
                    (bb.min_x, bb.min_y),
                    (bb.min_x, bb.max_y),
                    (bb.max_x, bb.max_y),
                    (bb.max_x, bb.min_y),
                ]),
                vec![],
            )),
            _ => Geometry::GeometryCollection(vec![]),
        }
    }
}

/// Reads the bounding box at the front of a payload and leaves the payload
/// untouched. Point records have no box; their coordinate is used instead.
fn peek_bbox(payload: &[u8], shape_type: ShapeType) -> Result<BoundingBox> {
    if shape_type == ShapeType::Null || shape_type == ShapeType::Undefined {
        return Ok(BoundingBox::empty());
    }
    let mut bor = ByteOrderReader::new(Cursor::new(payload), Endianness::LittleEndian)?;
    let bbox = if shape_type.is_point_type() {
        let x = bor.read_f64()?;
        let y = bor.read_f64()?;
        BoundingBox::from_coordinates(&[Coordinate::new(x, y)])
    } else {
        let min_x = bor.read_f64()?;
        let min_y = bor.read_f64()?;
        let max_x = bor.read_f64()?;
        let max_y = bor.read_f64()?;
        BoundingBox::new(min_x, max_x, min_y, max_y)
    };
    bor.seek(0)?;
    Ok(bbox)
}

/*
This code is part of the WhiteboxTools geospatial analysis library.
Authors: Dr. John Lindsay
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/

use super::ShapeType;
use crate::error::{Result, ShapefileError};
use crate::io_utils::{ByteOrderReader, ByteOrderWriter, Endianness};
use crate::structures::BoundingBox;
use std::fmt;
use std::io::prelude::*;

pub const HEADER_SIZE: usize = 100;
pub const FILE_CODE: i32 = 9994;
pub const VERSION: i32 = 1000;

/// The 100-byte header shared by the .shp and .shx files.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct ShapefileHeader {
    pub file_code: i32,        // BigEndian; value is 9994
    pub file_length: i32,      // BigEndian; in 16-bit words
    pub version: i32,          // LittleEndian; value is 1000
    pub shape_type: ShapeType, // LittleEndian
    pub x_min: f64,            // LittleEndian
    pub y_min: f64,            // LittleEndian
    pub x_max: f64,            // LittleEndian
    pub y_max: f64,            // LittleEndian
    pub z_min: f64,            // LittleEndian; 0f64 if shapeType not z or measured
    pub z_max: f64,            // LittleEndian; 0f64 if shapeType not z or measured
    pub m_min: f64,            // LittleEndian; 0f64 if shapeType not z or measured
    pub m_max: f64,            // LittleEndian; 0f64 if shapeType not z or measured
}

impl ShapefileHeader {
    /// Parses a header from the start of `bor`. A bad file code or version
    /// fails in strict mode and is logged otherwise. An unknown shape type
    /// always fails.
    pub fn read<R: Read + Seek>(
        bor: &mut ByteOrderReader<R>,
        strict: bool,
    ) -> Result<ShapefileHeader> {
        if bor.len() < HEADER_SIZE {
            return Err(ShapefileError::Truncated {
                offset: 0,
                needed: HEADER_SIZE,
                available: bor.len(),
            });
        }
        let mut header = ShapefileHeader::default();

        // Note: the header uses mixed endianness.
        bor.seek(0)?;
        bor.set_byte_order(Endianness::BigEndian);
        header.file_code = bor.read_i32()?;
        if header.file_code != FILE_CODE {
            if strict {
                return Err(ShapefileError::InvalidFileCode {
                    found: header.file_code,
                });
            }
            tracing::warn!(
                "wrong file code {} in shapefile header, expected {}",
                header.file_code,
                FILE_CODE
            );
        }
        bor.seek(24)?;
        header.file_length = bor.read_i32()?;

        bor.set_byte_order(Endianness::LittleEndian);
        header.version = bor.read_i32()?;
        if header.version != VERSION {
            if strict {
                return Err(ShapefileError::InvalidVersion {
                    found: header.version,
                });
            }
            tracing::warn!(
                "wrong version {} in shapefile header, expected {}",
                header.version,
                VERSION
            );
        }

        let type_id = bor.read_i32()?;
        header.shape_type = ShapeType::from_int(type_id);
        if header.shape_type == ShapeType::Undefined {
            return Err(ShapefileError::UnsupportedShapeType(type_id));
        }

        header.x_min = bor.read_f64()?;
        header.y_min = bor.read_f64()?;
        header.x_max = bor.read_f64()?;
        header.y_max = bor.read_f64()?;
        header.z_min = bor.read_f64()?;
        header.z_max = bor.read_f64()?;
        header.m_min = bor.read_f64()?;
        header.m_max = bor.read_f64()?;
        bor.seek(HEADER_SIZE)?;

        Ok(header)
    }

    /// Emits a well-formed header. `file_length` is in 16-bit words. An
    /// empty bounding box is written as zeros, as are the Z and M ranges.
    pub fn write<W: Write>(
        bow: &mut ByteOrderWriter<W>,
        shape_type: ShapeType,
        num_geoms: usize,
        file_length: i32,
        bbox: &BoundingBox,
    ) -> Result<()> {
        tracing::debug!(
            "writing {} header for {} records, {} words",
            shape_type,
            num_geoms,
            file_length
        );
        bow.set_byte_order(Endianness::BigEndian);
        bow.write_i32(FILE_CODE)?;
        for _ in 0..5 {
            bow.write_i32(0i32)?;
        }
        bow.write_i32(file_length)?;

        bow.set_byte_order(Endianness::LittleEndian);
        bow.write_i32(VERSION)?;
        bow.write_i32(shape_type.to_int())?;
        if bbox.is_empty() {
            for _ in 0..4 {
                bow.write_f64(0f64)?;
            }
        } else {
            bow.write_f64(bbox.min_x)?;
            bow.write_f64(bbox.min_y)?;
            bow.write_f64(bbox.max_x)?;
            bow.write_f64(bbox.max_y)?;
        }
        for _ in 0..4 {
            bow.write_f64(0f64)?;
        }
        Ok(())
    }

    pub fn get_bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.x_min, self.x_max, self.y_min, self.y_max)
    }

    /// The file length in bytes.
    pub fn file_length_bytes(&self) -> usize {
        (self.file_length.max(0) as usize) * 2
    }
}

impl fmt::Display for ShapefileHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = format!(
            "file_code: {}
file_length: {}
version: {}
shape_type: {}
x_min: {}
x_max: {}
y_min: {}
y_max: {}
z_min: {}
z_max: {}
m_min: {}
m_max: {}",
            self.file_code,
            self.file_length,
            self.version,
            self.shape_type,
            self.x_min,
            self.x_max,
            self.y_min,
            self.y_max,
            self.z_min,
            self.z_max,
            self.m_min,
            self.m_max
        );
        write!(f, "{}", s)
    }
}

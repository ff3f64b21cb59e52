/*
This code is part of the WhiteboxTools geospatial analysis library.
Authors: Dr. John Lindsay
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT

Notes: Writes the .shp and .shx files in lockstep. Headers go out first and
are rewritten on close if the record count or file length turned out to
differ from what was declared.
*/

use super::handlers::ShapeHandler;
use super::header::{ShapefileHeader, HEADER_SIZE};
use super::ShapeType;
use crate::error::{Result, ShapefileError};
use crate::io_utils::{ByteOrderWriter, Endianness};
use crate::structures::{BoundingBox, Geometry};
use std::io::prelude::*;

/// A sequential writer of shapefile geometry.
pub struct ShapefileWriter<W: Write + Seek> {
    shp: Option<ByteOrderWriter<W>>,
    shx: Option<ByteOrderWriter<W>>,
    shape_type: ShapeType,
    handler: Option<ShapeHandler>,
    headers_written: bool,
    declared_count: usize,
    declared_length: usize,
    bbox: BoundingBox,
    count: usize,
    /// Total .shp length in bytes so far.
    length: usize,
    /// Offset of the next record in 16-bit words.
    offset: i32,
    closed: bool,
}

impl<W: Write + Seek> ShapefileWriter<W> {
    pub fn new(shp: W, shx: W) -> ShapefileWriter<W> {
        ShapefileWriter {
            shp: Some(ByteOrderWriter::new(shp, Endianness::BigEndian)),
            shx: Some(ByteOrderWriter::new(shx, Endianness::BigEndian)),
            shape_type: ShapeType::Null,
            handler: None,
            headers_written: false,
            declared_count: 0,
            declared_length: HEADER_SIZE,
            bbox: BoundingBox::empty(),
            count: 0,
            length: HEADER_SIZE,
            offset: (HEADER_SIZE / 2) as i32,
            closed: false,
        }
    }

    fn writers(&mut self) -> Result<(&mut ByteOrderWriter<W>, &mut ByteOrderWriter<W>)> {
        match (self.shp.as_mut(), self.shx.as_mut()) {
            (Some(shp), Some(shx)) => Ok((shp, shx)),
            _ => Err(ShapefileError::Closed("shapefile writer")),
        }
    }

    fn emit_headers(
        &mut self,
        bbox: &BoundingBox,
        shape_type: ShapeType,
        num_geoms: usize,
        file_length: usize,
    ) -> Result<()> {
        let (shp, shx) = self.writers()?;
        ShapefileHeader::write(shp, shape_type, num_geoms, (file_length / 2) as i32, bbox)?;
        let shx_length = (HEADER_SIZE / 2 + 4 * num_geoms) as i32;
        ShapefileHeader::write(shx, shape_type, num_geoms, shx_length, bbox)?;
        Ok(())
    }

    /// Writes both file headers. `file_length` is the expected .shp length
    /// in bytes; when it or `num_geoms` turns out wrong the headers are
    /// rewritten on close.
    pub fn write_headers(
        &mut self,
        bbox: &BoundingBox,
        shape_type: ShapeType,
        num_geoms: usize,
        file_length: usize,
    ) -> Result<()> {
        if shape_type == ShapeType::Undefined {
            return Err(ShapefileError::UnsupportedShapeType(shape_type.to_int()));
        }
        if self.headers_written {
            for w in [self.shp.as_mut(), self.shx.as_mut()].into_iter().flatten() {
                w.seek_from_start(0)?;
            }
        }
        self.emit_headers(bbox, shape_type, num_geoms, file_length)?;
        if self.headers_written {
            for w in [self.shp.as_mut(), self.shx.as_mut()].into_iter().flatten() {
                w.seek_end()?;
            }
        }
        self.shape_type = shape_type;
        self.handler = shape_type.handler().ok();
        self.declared_count = num_geoms;
        self.declared_length = file_length;
        self.bbox.expand_to(*bbox);
        self.headers_written = true;
        Ok(())
    }

    /// Encodes one record's content, a Null marker for absent or empty
    /// geometries.
    fn encode(&self, geometry: Option<&Geometry>) -> Result<Vec<u8>> {
        let mut content = ByteOrderWriter::new(vec![], Endianness::LittleEndian);
        match (geometry, self.handler) {
            (Some(g), Some(handler)) if !g.is_empty() => {
                let expected = handler.get_length(g)?;
                handler.write(&mut content, g)?;
                if content.len() != expected {
                    return Err(ShapefileError::LengthMismatch {
                        expected: expected,
                        written: content.len(),
                    });
                }
            }
            _ => content.write_i32(ShapeType::Null.to_int())?,
        }
        Ok(content.into_inner())
    }

    /// Appends one record and its index entry.
    pub fn write_geometry(&mut self, geometry: Option<&Geometry>) -> Result<()> {
        if self.closed {
            return Err(ShapefileError::Closed("shapefile writer"));
        }
        if !self.headers_written {
            return Err(ShapefileError::HeadersNotWritten);
        }
        let content = self.encode(geometry)?;
        let length_words = (content.len() / 2) as i32;
        let record_number = self.count as i32 + 1;
        let offset = self.offset;

        let (shp, shx) = self.writers()?;
        shp.set_byte_order(Endianness::BigEndian);
        shp.write_i32(record_number)?;
        shp.write_i32(length_words)?;
        shp.write_bytes(&content)?;

        shx.set_byte_order(Endianness::BigEndian);
        shx.write_i32(offset)?;
        shx.write_i32(length_words)?;

        if let Some(g) = geometry {
            self.bbox.expand_to(g.get_bounding_box());
        }
        self.offset += 4 + length_words;
        self.length += 8 + content.len();
        self.count += 1;
        Ok(())
    }

    /// Writes a complete set of geometries: the lengths and bounds are
    /// computed first so the headers go out correct, then each record.
    pub fn write(&mut self, geoms: &[Option<Geometry>], shape_type: ShapeType) -> Result<()> {
        let handler = shape_type.handler().ok();
        let mut file_length = HEADER_SIZE;
        let mut bbox = BoundingBox::empty();
        for g in geoms {
            let content_length = match (g, handler) {
                (Some(g), Some(handler)) if !g.is_empty() => {
                    bbox.expand_to(g.get_bounding_box());
                    handler.get_length(g)?
                }
                _ => 4,
            };
            file_length += 8 + content_length;
        }
        self.write_headers(&bbox, shape_type, geoms.len(), file_length)?;
        for g in geoms {
            self.write_geometry(g.as_ref())?;
        }
        Ok(())
    }

    /// The number of records written.
    pub fn count(&self) -> usize {
        self.count
    }

    fn finalize(&mut self) -> Result<()> {
        if self.headers_written
            && (self.count != self.declared_count || self.length != self.declared_length)
        {
            tracing::debug!(
                "rewriting headers: {} records, {} bytes",
                self.count,
                self.length
            );
            for w in [self.shp.as_mut(), self.shx.as_mut()].into_iter().flatten() {
                w.seek_from_start(0)?;
            }
            let bbox = self.bbox;
            self.emit_headers(&bbox, self.shape_type, self.count, self.length)?;
            for w in [self.shp.as_mut(), self.shx.as_mut()].into_iter().flatten() {
                w.seek_end()?;
            }
        }
        let (shp, shx) = self.writers()?;
        shp.flush()?;
        shx.flush()?;
        Ok(())
    }

    /// Finalizes the headers and releases both outputs. Closing twice is a
    /// no-op.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let res = self.finalize();
        self.shp = None;
        self.shx = None;
        res
    }

    /// Finalizes the headers and hands back the (.shp, .shx) outputs.
    pub fn finish(mut self) -> Result<(W, W)> {
        if self.closed {
            return Err(ShapefileError::Closed("shapefile writer"));
        }
        self.closed = true;
        self.finalize()?;
        match (self.shp.take(), self.shx.take()) {
            (Some(shp), Some(shx)) => Ok((shp.into_inner(), shx.into_inner())),
            _ => Err(ShapefileError::Closed("shapefile writer")),
        }
    }
}

impl<W: Write + Seek> Drop for ShapefileWriter<W> {
    fn drop(&mut self) {
        if !self.closed {
            tracing::warn!("shapefile writer dropped without being closed");
            if let Err(e) = self.close() {
                tracing::warn!("error closing shapefile writer: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::structures::{LineString, MultiLineString, Point};
    use byteorder::{BigEndian, ByteOrder, LittleEndian};
    use std::io::Cursor;

    fn lines() -> Vec<Option<Geometry>> {
        vec![
            Some(Geometry::from(LineString::from_xy(&[(0.0, 0.0), (1.0, 1.0)]))),
            None,
            Some(Geometry::from(MultiLineString::new(vec![
                LineString::from_xy(&[(2.0, 2.0), (3.0, 5.0), (4.0, 4.0)]),
                LineString::from_xy(&[(-1.0, 0.0), (0.0, -1.0)]),
            ]))),
        ]
    }

    #[test]
    fn test_index_consistency() {
        let geoms = lines();
        let mut writer = ShapefileWriter::new(Cursor::new(vec![]), Cursor::new(vec![]));
        writer.write(&geoms, ShapeType::PolyLine).unwrap();
        assert_eq!(writer.count(), 3);
        let (shp, shx) = writer.finish().unwrap();
        let (shp, shx) = (shp.into_inner(), shx.into_inner());

        assert_eq!(shx.len(), 100 + 3 * 8);
        assert_eq!(BigEndian::read_i32(&shx[24..28]) as usize * 2, shx.len());
        assert_eq!(BigEndian::read_i32(&shp[24..28]) as usize * 2, shp.len());

        let mut offset = 100usize;
        for i in 0..3 {
            let entry = &shx[100 + 8 * i..108 + 8 * i];
            assert_eq!(BigEndian::read_i32(&entry[0..4]) as usize * 2, offset);
            let length = BigEndian::read_i32(&entry[4..8]) as usize * 2;
            assert_eq!(BigEndian::read_i32(&shp[offset..offset + 4]), i as i32 + 1);
            assert_eq!(BigEndian::read_i32(&shp[offset + 4..offset + 8]) as usize * 2, length);
            offset += 8 + length;
        }
        assert_eq!(offset, shp.len());

        // the Null record is just a shape type
        let null_at = 100 + 8 + (44 + 4 + 32);
        assert_eq!(LittleEndian::read_i32(&shp[null_at + 8..null_at + 12]), 0);

        // header bounding box
        assert_eq!(LittleEndian::read_f64(&shp[36..44]), -1.0);
        assert_eq!(LittleEndian::read_f64(&shp[60..68]), 5.0);
    }

    #[test]
    fn test_headers_rewritten_when_counts_change() {
        let mut writer = ShapefileWriter::new(Cursor::new(vec![]), Cursor::new(vec![]));
        writer
            .write_headers(&BoundingBox::empty(), ShapeType::Point, 0, 100)
            .unwrap();
        for i in 0..4 {
            let p = Geometry::from(Point::new(i as f64, 1.0));
            writer.write_geometry(Some(&p)).unwrap();
        }
        let (shp, shx) = writer.finish().unwrap();
        let (shp, shx) = (shp.into_inner(), shx.into_inner());
        assert_eq!(shp.len(), 100 + 4 * 28);
        assert_eq!(BigEndian::read_i32(&shp[24..28]) as usize * 2, shp.len());
        assert_eq!(BigEndian::read_i32(&shx[24..28]) as usize * 2, shx.len());
        assert_eq!(LittleEndian::read_f64(&shp[52..60]), 3.0);
    }

    #[test]
    fn test_geometry_before_headers() {
        let mut writer = ShapefileWriter::new(Cursor::new(vec![]), Cursor::new(vec![]));
        match writer.write_geometry(None) {
            Err(ShapefileError::HeadersNotWritten) => {}
            _ => panic!("expected a missing headers error"),
        }
        writer.close().unwrap();
        writer.close().unwrap();
        assert!(writer.write_geometry(None).is_err());
    }

    #[test]
    fn test_wrong_geometry_kind() {
        let mut writer = ShapefileWriter::new(Cursor::new(vec![]), Cursor::new(vec![]));
        let p = Geometry::from(Point::new(1.0, 1.0));
        assert!(writer.write(&[Some(p)], ShapeType::Polygon).is_err());
        writer.close().unwrap();
    }
}

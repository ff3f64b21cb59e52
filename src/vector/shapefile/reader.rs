/*
This code is part of the WhiteboxTools geospatial analysis library.
Authors: Dr. John Lindsay
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT

Notes: Records are visited in file order, either by following the .shx
offsets or by chaining each record's end to the next record's start. A
manual seek switches to chaining for the rest of the session.
*/

use super::channel::{ByteSource, ReadBuffer};
use super::handlers::ShapeHandler;
use super::header::{ShapefileHeader, HEADER_SIZE};
use super::index::IndexFile;
use super::record::ShapeRecord;
use super::ShapeType;
use crate::configs::ShapefileConfigs;
use crate::error::{Result, ShapefileError};
use crate::io_utils::{ByteOrderReader, Endianness};
use crate::structures::Geometry;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::io::Cursor;

/// A streaming reader over the records of a .shp file.
pub struct ShapefileReader {
    buffer: ReadBuffer,
    header: ShapefileHeader,
    index: Option<IndexFile>,
    handler: Option<ShapeHandler>,
    flatten: bool,
    check_record_numbers: bool,
    /// The index entry of the next record while the .shx drives iteration.
    next_index: Option<usize>,
    /// Byte offset just past the last record read.
    record_end: u64,
    last_record_number: i32,
    failed: bool,
    closed: bool,
}

impl ShapefileReader {
    /// Opens a reader over `shp`, with the matching index when one is
    /// available. The index only drives iteration when `shp` supports
    /// random access.
    pub fn open(
        shp: ByteSource,
        shx: Option<ByteSource>,
        configs: &ShapefileConfigs,
    ) -> Result<ShapefileReader> {
        let is_random_access = shp.is_random_access();
        let mut buffer = ReadBuffer::new(shp, configs.read_buffer_size);
        let header_bytes = buffer.read_bytes(HEADER_SIZE)?;
        let mut bor = ByteOrderReader::new(Cursor::new(header_bytes), Endianness::BigEndian)?;
        let header = ShapefileHeader::read(&mut bor, configs.strict)?;
        let handler = header.shape_type.handler().ok();

        let index = match shx {
            Some(source) => Some(IndexFile::open(source, configs)?),
            None => None,
        };
        let next_index = if index.is_some() && is_random_access {
            Some(0)
        } else {
            None
        };

        tracing::debug!(
            "opened {} shapefile of {} bytes",
            header.shape_type,
            header.file_length_bytes()
        );
        Ok(ShapefileReader {
            buffer: buffer,
            header: header,
            index: index,
            handler: handler,
            flatten: configs.flatten,
            check_record_numbers: configs.check_record_numbers,
            next_index: next_index,
            record_end: HEADER_SIZE as u64,
            last_record_number: 0,
            failed: false,
            closed: false,
        })
    }

    pub fn header(&self) -> &ShapefileHeader {
        &self.header
    }

    pub fn shape_type(&self) -> ShapeType {
        self.header.shape_type
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(ShapefileError::Closed("shapefile reader"));
        }
        Ok(())
    }

    /// The offset of the next record, or None when the index is exhausted.
    fn next_offset(&mut self) -> Result<Option<u64>> {
        match (self.next_index, self.index.as_mut()) {
            (Some(i), Some(index)) => {
                if i >= index.count() {
                    return Ok(None);
                }
                Ok(Some(index.offset(i)? as u64))
            }
            _ => Ok(Some(self.record_end)),
        }
    }

    /// True when another record follows. Peeks the next record header
    /// without consuming it.
    pub fn has_next(&mut self) -> Result<bool> {
        self.ensure_open()?;
        let offset = match self.next_offset()? {
            Some(offset) => offset,
            None => return Ok(false),
        };
        match self.buffer.seek(offset) {
            Ok(()) => {}
            // a stream that ends before the next record
            Err(ShapefileError::Truncated { .. }) => return Ok(false),
            Err(e) => return Err(e),
        }
        if !self.buffer.require(8)? {
            return Ok(false);
        }
        if self.check_record_numbers {
            let number = BigEndian::read_i32(self.buffer.peek(8)?);
            if number != self.last_record_number + 1 {
                tracing::warn!(
                    "record number {} at byte {} does not follow {}; stopping",
                    number,
                    offset,
                    self.last_record_number
                );
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Reads the next record. The geometry is not decoded until asked for.
    pub fn next_record(&mut self) -> Result<ShapeRecord> {
        self.ensure_open()?;
        let offset = match self.next_offset()? {
            Some(offset) => offset,
            None => {
                let count = self.index.as_ref().map(|i| i.count()).unwrap_or(0);
                return Err(ShapefileError::IndexOutOfBounds {
                    index: count,
                    count: count,
                });
            }
        };
        let record = self.read_record(offset)?;
        self.record_end = record.end;
        self.last_record_number = record.number;
        if let Some(i) = self.next_index {
            self.next_index = Some(i + 1);
        }
        Ok(record)
    }

    fn read_record(&mut self, offset: u64) -> Result<ShapeRecord> {
        self.buffer.seek(offset)?;
        let (number, length) = {
            let head = self.buffer.peek(8)?;
            (
                BigEndian::read_i32(&head[0..4]),
                BigEndian::read_i32(&head[4..8]).max(0) as usize * 2,
            )
        };
        if length < 4 {
            return Err(ShapefileError::Truncated {
                offset: offset + 8,
                needed: 4,
                available: length,
            });
        }
        let bytes = self.buffer.read_bytes(8 + length)?;
        let content = &bytes[8..];

        let shape_type = ShapeType::from_int(LittleEndian::read_i32(&content[0..4]));
        if shape_type != ShapeType::Null && shape_type != self.header.shape_type {
            return Err(ShapefileError::ShapeTypeMismatch {
                expected: self.header.shape_type,
                found: shape_type,
            });
        }
        ShapeRecord::new(
            number,
            offset,
            shape_type,
            content,
            self.handler,
            self.flatten,
        )
    }

    /// Positions the reader at a record header. Index-driven iteration and
    /// the record number check are switched off from here on.
    pub fn goto(&mut self, offset: u64) -> Result<()> {
        self.ensure_open()?;
        if !self.buffer.is_random_access() {
            return Err(ShapefileError::NotSeekable);
        }
        self.next_index = None;
        self.check_record_numbers = false;
        self.record_end = offset;
        self.buffer.seek(offset)
    }

    /// Reads the record whose header starts at byte `offset`.
    pub fn record_at(&mut self, offset: u64) -> Result<ShapeRecord> {
        self.goto(offset)?;
        self.next_record()
    }

    /// Decodes the geometry whose record header starts at byte `offset`.
    pub fn shape_at(&mut self, offset: u64) -> Result<Geometry> {
        self.record_at(offset)?.into_shape()
    }

    /// Reads record `index` (0-based) through the .shx offsets.
    pub fn record_by_index(&mut self, index: usize) -> Result<ShapeRecord> {
        self.ensure_open()?;
        let offset = match self.index.as_mut() {
            Some(shx) => shx.offset(index)?,
            None => return Err(ShapefileError::NoIndex),
        };
        self.record_at(offset as u64)
    }

    pub fn shape_by_index(&mut self, index: usize) -> Result<Geometry> {
        self.record_by_index(index)?.into_shape()
    }

    /// The number of records. Taken from the index when there is one,
    /// otherwise counted by walking the record headers, which needs a
    /// random access source. The read position is left unchanged.
    pub fn num_records(&mut self) -> Result<usize> {
        self.ensure_open()?;
        if let Some(index) = &self.index {
            return Ok(index.count());
        }
        if !self.buffer.is_random_access() {
            return Err(ShapefileError::NotSeekable);
        }
        let mut count = 0usize;
        let mut offset = HEADER_SIZE as u64;
        loop {
            self.buffer.seek(offset)?;
            if !self.buffer.require(8)? {
                break;
            }
            let length = BigEndian::read_i32(&self.buffer.peek(8)?[4..8]).max(0) as u64 * 2;
            count += 1;
            offset += 8 + length;
        }
        self.buffer.seek(self.record_end)?;
        Ok(count)
    }

    /// Releases the buffer, the source and the index. Closing twice is a
    /// no-op.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.buffer.close();
        if let Some(index) = self.index.as_mut() {
            index.close();
        }
        self.closed = true;
    }
}

impl Iterator for ShapefileReader {
    type Item = Result<ShapeRecord>;

    fn next(&mut self) -> Option<Result<ShapeRecord>> {
        if self.failed {
            return None;
        }
        let res = match self.has_next() {
            Ok(true) => self.next_record(),
            Ok(false) => return None,
            Err(e) => Err(e),
        };
        if res.is_err() {
            self.failed = true;
        }
        Some(res)
    }
}

impl Drop for ShapefileReader {
    fn drop(&mut self) {
        if !self.closed {
            tracing::warn!("shapefile reader dropped without being closed");
            self.close();
        }
    }
}

/*
This code is part of the WhiteboxTools geospatial analysis library.
Authors: Dr. John Lindsay
Created: Unknown
Last Modified: 19/10/2026
License: MIT
*/
use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::io::prelude::*;
use std::io::{Error, ErrorKind, Result, SeekFrom};

/// Reads numbers from a seekable source in a byte order that may be
/// switched between reads. Shapefiles mix big- and little-endian fields,
/// often within the same record.
pub struct ByteOrderReader<R: Read + Seek> {
    is_le: bool,
    reader: R,
    pos: usize,
    len: usize,
}

impl<R: Read + Seek> ByteOrderReader<R> {
    pub fn new(mut reader: R, byte_order: Endianness) -> Result<ByteOrderReader<R>> {
        let is_le = byte_order == Endianness::LittleEndian;
        let len = reader.seek(SeekFrom::End(0))? as usize;
        reader.seek(SeekFrom::Start(0))?;
        Ok(ByteOrderReader {
            reader: reader,
            is_le: is_le,
            pos: 0usize,
            len: len,
        })
    }

    pub fn set_byte_order(&mut self, byte_order: Endianness) {
        self.is_le = byte_order == Endianness::LittleEndian;
    }

    pub fn seek(&mut self, position: usize) -> Result<()> {
        self.pos = position;
        self.reader.seek(SeekFrom::Start(self.pos as u64))?;
        Ok(())
    }

    pub fn inc_pos(&mut self, skip: usize) -> Result<()> {
        if self.pos + skip > self.len {
            return Err(Error::new(
                ErrorKind::UnexpectedEof,
                "attempt to skip past the end of the data",
            ));
        }
        let pos = self.pos + skip;
        self.seek(pos)
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of bytes between the cursor and the end of the data.
    pub fn remaining(&self) -> usize {
        self.len.saturating_sub(self.pos)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let val = if self.is_le {
            self.reader.read_i32::<LittleEndian>()?
        } else {
            self.reader.read_i32::<BigEndian>()?
        };
        self.pos += 4;
        Ok(val)
    }

    /// Reads an i32 without moving the cursor.
    pub fn peek_i32(&mut self) -> Result<i32> {
        let pos = self.pos;
        let val = self.read_i32();
        self.seek(pos)?;
        val
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        let val = if self.is_le {
            self.reader.read_f64::<LittleEndian>()?
        } else {
            self.reader.read_f64::<BigEndian>()?
        };
        self.pos += 8;
        Ok(val)
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Endianness {
    LittleEndian,
    BigEndian,
}

impl Default for Endianness {
    fn default() -> Endianness {
        Endianness::LittleEndian
    }
}

#[cfg(test)]
mod test {
    use super::{ByteOrderReader, Endianness};
    use std::io::Cursor;

    #[test]
    fn test_mixed_byte_order() {
        let bytes: Vec<u8> = vec![0, 0, 39, 10, 232, 3, 0, 0];
        let mut bor = ByteOrderReader::new(Cursor::new(&bytes[..]), Endianness::BigEndian).unwrap();
        assert_eq!(bor.len(), 8);
        assert_eq!(bor.read_i32().unwrap(), 9994);
        bor.set_byte_order(Endianness::LittleEndian);
        assert_eq!(bor.peek_i32().unwrap(), 1000);
        assert_eq!(bor.pos(), 4);
        assert_eq!(bor.read_i32().unwrap(), 1000);
        assert_eq!(bor.remaining(), 0);
        assert!(bor.read_i32().is_err());
    }

    #[test]
    fn test_inc_pos_past_end() {
        let bytes = [0u8; 4];
        let mut bor = ByteOrderReader::new(Cursor::new(&bytes[..]), Endianness::LittleEndian).unwrap();
        assert!(bor.inc_pos(4).is_ok());
        assert!(bor.inc_pos(1).is_err());
    }
}

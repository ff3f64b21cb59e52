/*
This code is part of the WhiteboxTools geospatial analysis library.
Authors: Dr. John Lindsay
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT

Notes: Byte sources handed to the reader and index file, and the growable
read buffer that windows over them.
*/

use crate::error::{Result, ShapefileError};
use memmap2::{Mmap, MmapOptions};
use std::fs::File;
use std::io::prelude::*;
use std::io::{Cursor, ErrorKind, SeekFrom};

/// A readable source that can also be repositioned.
pub trait SeekRead: Read + Seek {}

impl<T: Read + Seek> SeekRead for T {}

/// An already-open source of shapefile bytes.
pub enum ByteSource {
    /// Forward-only; random access is unavailable.
    Streamed(Box<dyn Read>),
    Seekable(Box<dyn SeekRead>),
    /// The whole file mapped into memory.
    Mapped(Mmap),
}

impl ByteSource {
    pub fn streamed<R: Read + 'static>(reader: R) -> ByteSource {
        ByteSource::Streamed(Box::new(reader))
    }

    pub fn seekable<R: Read + Seek + 'static>(reader: R) -> ByteSource {
        ByteSource::Seekable(Box::new(reader))
    }

    pub fn from_bytes(bytes: Vec<u8>) -> ByteSource {
        ByteSource::Seekable(Box::new(Cursor::new(bytes)))
    }

    /// Wraps an open file, memory mapping it when asked to.
    pub fn from_file(file: File, use_memory_mapped: bool) -> Result<ByteSource> {
        if use_memory_mapped {
            let mmap = unsafe { MmapOptions::new().map(&file)? };
            return Ok(ByteSource::Mapped(mmap));
        }
        Ok(ByteSource::Seekable(Box::new(file)))
    }

    pub fn is_random_access(&self) -> bool {
        !matches!(self, ByteSource::Streamed(_))
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, ByteSource::Mapped(_))
    }
}

/// Reads into `buf` until it is full or the source is exhausted, returning
/// the number of bytes read.
fn fill(source: &mut ByteSource, buf: &mut [u8]) -> Result<usize> {
    let mut total = 0usize;
    while total < buf.len() {
        let res = match source {
            ByteSource::Streamed(r) => r.read(&mut buf[total..]),
            ByteSource::Seekable(r) => r.read(&mut buf[total..]),
            ByteSource::Mapped(_) => Ok(0),
        };
        match res {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(total)
}

/// A growable buffer over a `ByteSource`. `data[pos..limit]` holds the
/// unread bytes of the current window and `start` is the file offset of
/// `data[0]`. Mapped sources are read in place; for them `pos` is the file
/// offset and `limit` the file length.
pub struct ReadBuffer {
    source: Option<ByteSource>,
    data: Vec<u8>,
    start: u64,
    pos: usize,
    limit: usize,
}

impl ReadBuffer {
    pub fn new(source: ByteSource, capacity: usize) -> ReadBuffer {
        let (data, limit) = match &source {
            ByteSource::Mapped(m) => (vec![], m.len()),
            _ => (vec![0u8; capacity.max(8)], 0),
        };
        ReadBuffer {
            source: Some(source),
            data: data,
            start: 0,
            pos: 0,
            limit: limit,
        }
    }

    fn source(&self) -> Result<&ByteSource> {
        self.source.as_ref().ok_or(ShapefileError::Closed("read buffer"))
    }

    pub fn is_closed(&self) -> bool {
        self.source.is_none()
    }

    pub fn is_random_access(&self) -> bool {
        self.source
            .as_ref()
            .map(|s| s.is_random_access())
            .unwrap_or(false)
    }

    /// The file offset of the cursor.
    pub fn position(&self) -> u64 {
        self.start + self.pos as u64
    }

    /// Bytes available without touching the source.
    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.pos)
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Makes at least `n` bytes available from the cursor. The unread tail is
    /// moved to the front of the buffer before refilling. The buffer only
    /// doubles once it is full, so its size follows the bytes the source
    /// actually holds rather than `n`. Returns false when the source ends
    /// first.
    pub fn require(&mut self, n: usize) -> Result<bool> {
        if self.source()?.is_mapped() || self.remaining() >= n {
            return Ok(self.remaining() >= n);
        }

        if self.pos > 0 {
            self.data.copy_within(self.pos..self.limit, 0);
            self.start += self.pos as u64;
            self.limit -= self.pos;
            self.pos = 0;
        }

        while self.limit < n {
            if self.limit == self.data.len() {
                let capacity = self.data.len().max(8).saturating_mul(2).min(n.max(8));
                self.data.resize(capacity, 0u8);
            }
            let limit = self.limit;
            let read = match self.source.as_mut() {
                Some(source) => fill(source, &mut self.data[limit..])?,
                None => return Err(ShapefileError::Closed("read buffer")),
            };
            if read == 0 {
                break;
            }
            self.limit += read;
        }
        Ok(self.remaining() >= n)
    }

    /// Moves the cursor to an absolute file offset. Offsets inside the
    /// current window reuse it; a seekable source is repositioned and a
    /// stream can only skip forward.
    pub fn seek(&mut self, offset: u64) -> Result<()> {
        if self.source()?.is_mapped() {
            self.pos = offset as usize;
            return Ok(());
        }
        let window_end = self.start + self.limit as u64;
        if offset >= self.start && offset <= window_end {
            self.pos = (offset - self.start) as usize;
            return Ok(());
        }
        match self.source.as_mut() {
            Some(ByteSource::Seekable(r)) => {
                r.seek(SeekFrom::Start(offset))?;
            }
            Some(ByteSource::Streamed(r)) => {
                if offset < self.start {
                    return Err(ShapefileError::NotSeekable);
                }
                let skip = offset - window_end;
                let skipped = std::io::copy(&mut r.by_ref().take(skip), &mut std::io::sink())?;
                if skipped < skip {
                    return Err(ShapefileError::Truncated {
                        offset: window_end + skipped,
                        needed: (skip - skipped) as usize,
                        available: 0,
                    });
                }
            }
            _ => return Err(ShapefileError::Closed("read buffer")),
        }
        self.start = offset;
        self.pos = 0;
        self.limit = 0;
        Ok(())
    }

    /// Returns the next `n` bytes without consuming them.
    pub fn peek(&mut self, n: usize) -> Result<&[u8]> {
        if !self.require(n)? {
            return Err(ShapefileError::Truncated {
                offset: self.position(),
                needed: n,
                available: self.remaining(),
            });
        }
        match &self.source {
            Some(ByteSource::Mapped(m)) => Ok(&m[self.pos..self.pos + n]),
            Some(_) => Ok(&self.data[self.pos..self.pos + n]),
            None => Err(ShapefileError::Closed("read buffer")),
        }
    }

    /// Moves the cursor forward over bytes already made available.
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.limit);
    }

    /// Consumes the next `n` bytes into a new vector.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let bytes = self.peek(n)?.to_vec();
        self.advance(n);
        Ok(bytes)
    }

    /// Consumes every byte from the cursor to the end of the source.
    pub fn read_remaining(&mut self) -> Result<Vec<u8>> {
        let pos = self.pos;
        let limit = self.limit;
        let mut out = match self.source.as_mut() {
            Some(ByteSource::Mapped(m)) => {
                let out = m[pos.min(limit)..].to_vec();
                self.pos = limit;
                return Ok(out);
            }
            Some(ByteSource::Streamed(r)) => {
                let mut tail = vec![];
                r.read_to_end(&mut tail)?;
                tail
            }
            Some(ByteSource::Seekable(r)) => {
                let mut tail = vec![];
                r.read_to_end(&mut tail)?;
                tail
            }
            None => return Err(ShapefileError::Closed("read buffer")),
        };
        let mut bytes = self.data[pos..limit].to_vec();
        bytes.append(&mut out);
        self.start += (pos + bytes.len()) as u64;
        self.pos = 0;
        self.limit = 0;
        Ok(bytes)
    }

    /// Releases the source and the buffer. Closing twice is a no-op.
    pub fn close(&mut self) {
        self.source = None;
        self.data = vec![];
        self.pos = 0;
        self.limit = 0;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn counting(n: u8) -> Vec<u8> {
        (0..n).collect()
    }

    #[test]
    fn test_require_grows_and_compacts() {
        let mut buf = ReadBuffer::new(ByteSource::from_bytes(counting(100)), 8);
        assert!(buf.require(4).unwrap());
        buf.advance(4);
        assert!(buf.require(40).unwrap());
        assert!(buf.capacity() >= 40);
        assert_eq!(buf.position(), 4);
        assert_eq!(buf.peek(2).unwrap(), &[4, 5]);
        assert!(!buf.require(200).unwrap());
    }

    #[test]
    fn test_oversized_request_does_not_grow_past_source() {
        let mut buf = ReadBuffer::new(ByteSource::streamed(Cursor::new(counting(50))), 16);
        assert!(!buf.require(1 << 32).unwrap());
        assert_eq!(buf.remaining(), 50);
        assert!(buf.capacity() <= 64);
        match buf.read_bytes(usize::MAX) {
            Err(ShapefileError::Truncated { available, .. }) => assert_eq!(available, 50),
            _ => panic!("expected a truncated error"),
        }
    }

    #[test]
    fn test_seek_on_seekable_and_stream() {
        let mut buf = ReadBuffer::new(ByteSource::from_bytes(counting(64)), 16);
        buf.seek(50).unwrap();
        assert_eq!(buf.read_bytes(2).unwrap(), vec![50, 51]);
        buf.seek(3).unwrap();
        assert_eq!(buf.read_bytes(1).unwrap(), vec![3]);

        let mut stream = ReadBuffer::new(ByteSource::streamed(Cursor::new(counting(64))), 16);
        stream.seek(40).unwrap();
        assert_eq!(stream.read_bytes(1).unwrap(), vec![40]);
        match stream.seek(2) {
            Err(ShapefileError::NotSeekable) => {}
            _ => panic!("a stream cannot seek backwards"),
        }
    }

    #[test]
    fn test_read_remaining() {
        let mut buf = ReadBuffer::new(ByteSource::streamed(Cursor::new(counting(30))), 8);
        buf.read_bytes(5).unwrap();
        let rest = buf.read_remaining().unwrap();
        assert_eq!(rest.len(), 25);
        assert_eq!(rest[0], 5);
    }

    #[test]
    fn test_truncated_and_closed() {
        let mut buf = ReadBuffer::new(ByteSource::from_bytes(counting(6)), 8);
        assert!(buf.peek(10).is_err());
        buf.close();
        buf.close();
        assert!(buf.is_closed());
        match buf.require(1) {
            Err(ShapefileError::Closed(_)) => {}
            _ => panic!("expected a closed error"),
        }
    }

    #[test]
    fn test_mapped_source() {
        let mut file = tempfile::tempfile().unwrap();
        file.write_all(&counting(20)).unwrap();
        let mut buf = ReadBuffer::new(ByteSource::from_file(file, true).unwrap(), 8);
        buf.seek(10).unwrap();
        assert_eq!(buf.read_bytes(3).unwrap(), vec![10, 11, 12]);
        assert!(!buf.require(8).unwrap());
    }
}

/*
This code is part of the WhiteboxTools geospatial analysis library.
Authors: Dr. John Lindsay
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT

Notes: The .shx file holds one (offset, length) pair per record, both
big-endian and in 16-bit words.
*/

use super::channel::{ByteSource, ReadBuffer};
use super::header::{ShapefileHeader, HEADER_SIZE};
use crate::configs::ShapefileConfigs;
use crate::error::{Result, ShapefileError};
use crate::io_utils::{ByteOrderReader, Endianness};
use byteorder::{BigEndian, ByteOrder};
use std::io::Cursor;

const RECORD_SIZE: usize = 8;

enum IndexStorage {
    /// Streamed sources are read completely when opened.
    Eager(Vec<i32>),
    /// A window of `content.len() / 2` records starting at record `first`.
    Windowed {
        buffer: ReadBuffer,
        first: usize,
        content: Vec<i32>,
    },
    /// Memory-mapped sources are read in place.
    Mapped(ReadBuffer),
}

/// Random access to the record offsets and lengths of a .shp file.
pub struct IndexFile {
    header: ShapefileHeader,
    count: usize,
    window_records: usize,
    storage: Option<IndexStorage>,
}

impl IndexFile {
    pub fn open(source: ByteSource, configs: &ShapefileConfigs) -> Result<IndexFile> {
        let is_random_access = source.is_random_access();
        let is_mapped = source.is_mapped();
        let mut buffer = ReadBuffer::new(source, configs.read_buffer_size);

        let header_bytes = buffer.read_bytes(HEADER_SIZE)?;
        let mut bor = ByteOrderReader::new(Cursor::new(header_bytes), Endianness::BigEndian)?;
        let header = ShapefileHeader::read(&mut bor, configs.strict)?;
        let count = (header.file_length_bytes().saturating_sub(HEADER_SIZE)) / RECORD_SIZE;

        let storage = if is_mapped {
            IndexStorage::Mapped(buffer)
        } else if is_random_access {
            IndexStorage::Windowed {
                buffer: buffer,
                first: 0,
                content: vec![],
            }
        } else {
            let bytes = buffer.read_remaining()?;
            buffer.close();
            let mut content = vec![0i32; bytes.len() / 4];
            BigEndian::read_i32_into(&bytes[0..content.len() * 4], &mut content);
            IndexStorage::Eager(content)
        };

        tracing::debug!("opened shapefile index with {} records", count);
        Ok(IndexFile {
            header: header,
            count: count,
            window_records: configs.index_window_records.max(1),
            storage: Some(storage),
        })
    }

    pub fn header(&self) -> &ShapefileHeader {
        &self.header
    }

    /// The number of records, as implied by the header's file length.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_closed(&self) -> bool {
        self.storage.is_none()
    }

    /// The offset of record `index` (0-based) in 16-bit words.
    pub fn offset_words(&mut self, index: usize) -> Result<i32> {
        self.read_entry(index, 0)
    }

    /// The offset of record `index` (0-based) in bytes.
    pub fn offset(&mut self, index: usize) -> Result<usize> {
        Ok(self.offset_words(index)?.max(0) as usize * 2)
    }

    /// The content length of record `index` (0-based) in 16-bit words.
    pub fn content_length(&mut self, index: usize) -> Result<i32> {
        self.read_entry(index, 1)
    }

    fn read_entry(&mut self, index: usize, field: usize) -> Result<i32> {
        if self.is_closed() {
            return Err(ShapefileError::Closed("index file"));
        }
        if index >= self.count {
            return Err(ShapefileError::IndexOutOfBounds {
                index: index,
                count: self.count,
            });
        }
        let count = self.count;
        let window_records = self.window_records;
        match self.storage.as_mut() {
            None => Err(ShapefileError::Closed("index file")),
            Some(IndexStorage::Eager(content)) => {
                content
                    .get(2 * index + field)
                    .copied()
                    .ok_or(ShapefileError::Truncated {
                        offset: (HEADER_SIZE + index * RECORD_SIZE) as u64,
                        needed: RECORD_SIZE,
                        available: 0,
                    })
            }
            Some(IndexStorage::Mapped(buffer)) => {
                buffer.seek((HEADER_SIZE + index * RECORD_SIZE + field * 4) as u64)?;
                Ok(BigEndian::read_i32(buffer.peek(4)?))
            }
            Some(IndexStorage::Windowed {
                buffer,
                first,
                content,
            }) => {
                let in_window = index >= *first && 2 * (index - *first) + 1 < content.len();
                if !in_window {
                    let num_records = window_records.min(count - index);
                    buffer.seek((HEADER_SIZE + index * RECORD_SIZE) as u64)?;
                    let bytes = buffer.read_bytes(num_records * RECORD_SIZE)?;
                    content.clear();
                    content.resize(num_records * 2, 0i32);
                    BigEndian::read_i32_into(&bytes, content);
                    *first = index;
                }
                Ok(content[2 * (index - *first) + field])
            }
        }
    }

    /// Releases the buffers and the source. Closing twice is a no-op.
    pub fn close(&mut self) {
        if let Some(storage) = self.storage.take() {
            match storage {
                IndexStorage::Windowed { mut buffer, .. } | IndexStorage::Mapped(mut buffer) => {
                    buffer.close()
                }
                IndexStorage::Eager(_) => {}
            }
        }
    }
}

impl Drop for IndexFile {
    fn drop(&mut self) {
        if !self.is_closed() {
            tracing::warn!("shapefile index dropped without being closed");
            self.close();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::io_utils::ByteOrderWriter;
    use crate::structures::BoundingBox;
    use crate::vector::shapefile::ShapeType;

    fn index_bytes(entries: &[(i32, i32)]) -> Vec<u8> {
        let mut bow = ByteOrderWriter::new(Cursor::new(vec![]), Endianness::BigEndian);
        let length = 50 + 4 * entries.len() as i32;
        ShapefileHeader::write(
            &mut bow,
            ShapeType::Point,
            entries.len(),
            length,
            &BoundingBox::empty(),
        )
        .unwrap();
        bow.set_byte_order(Endianness::BigEndian);
        for &(offset, len) in entries {
            bow.write_i32(offset).unwrap();
            bow.write_i32(len).unwrap();
        }
        bow.into_inner().into_inner()
    }

    fn entries(n: i32) -> Vec<(i32, i32)> {
        (0..n).map(|i| (50 + i * 14, 10)).collect()
    }

    #[test]
    fn test_windowed_access() {
        let configs = ShapefileConfigs {
            index_window_records: 3,
            ..Default::default()
        };
        let mut index = IndexFile::open(ByteSource::from_bytes(index_bytes(&entries(10))), &configs)
            .unwrap();
        assert_eq!(index.count(), 10);
        assert_eq!(index.offset_words(0).unwrap(), 50);
        assert_eq!(index.offset(9).unwrap(), (50 + 9 * 14) * 2);
        assert_eq!(index.offset_words(4).unwrap(), 50 + 4 * 14);
        assert_eq!(index.content_length(2).unwrap(), 10);
        match index.offset(10) {
            Err(ShapefileError::IndexOutOfBounds { index, count }) => {
                assert_eq!((index, count), (10, 10))
            }
            _ => panic!("expected an out of bounds error"),
        }
        index.close();
    }

    #[test]
    fn test_streamed_access() {
        let source = ByteSource::streamed(Cursor::new(index_bytes(&entries(5))));
        let mut index = IndexFile::open(source, &ShapefileConfigs::default()).unwrap();
        assert_eq!(index.count(), 5);
        assert_eq!(index.offset_words(3).unwrap(), 50 + 3 * 14);
        assert_eq!(index.offset_words(1).unwrap(), 64);
        index.close();
    }

    #[test]
    fn test_access_after_close_fails() {
        let mut index = IndexFile::open(
            ByteSource::from_bytes(index_bytes(&entries(2))),
            &ShapefileConfigs::default(),
        )
        .unwrap();
        index.close();
        index.close();
        for i in &[0, 5] {
            match index.offset(*i) {
                Err(ShapefileError::Closed(_)) => {}
                _ => panic!("expected a closed error"),
            }
        }
    }

    #[test]
    fn test_mapped_access() {
        use std::io::Write;
        let mut file = tempfile::tempfile().unwrap();
        file.write_all(&index_bytes(&entries(4))).unwrap();
        let configs = ShapefileConfigs::default();
        let mut index = IndexFile::open(ByteSource::from_file(file, true).unwrap(), &configs)
            .unwrap();
        assert_eq!(index.offset_words(3).unwrap(), 50 + 3 * 14);
        assert_eq!(index.content_length(0).unwrap(), 10);
        index.close();
    }
}

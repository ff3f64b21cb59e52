/*
This code is part of the WhiteboxTools geospatial analysis library.
Authors: Dr. John Lindsay
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT

Notes: Reading and writing the geometry half of the ESRI Shapefile format,
i.e. the .shp main file and its .shx offset index.
*/

// private sub-module defined in other files
mod channel;
mod files;
mod handlers;
mod header;
mod index;
mod reader;
mod record;
pub mod rules;
mod shape_type;
mod writer;

// exports identifiers from private sub-modules in the current module namespace
pub use self::channel::{ByteSource, ReadBuffer};
pub use self::files::{ShpFileType, ShpFiles};
pub use self::handlers::ShapeHandler;
pub use self::header::ShapefileHeader;
pub use self::index::IndexFile;
pub use self::reader::ShapefileReader;
pub use self::record::ShapeRecord;
pub use self::shape_type::{ShapeType, ShapeTypeDimension};
pub use self::writer::ShapefileWriter;

use crate::configs::ShapefileConfigs;
use crate::error::Result;
use crate::structures::Geometry;

/// A whole shapefile held in memory. `None` records are Null shapes.
#[derive(Default, Clone, Debug)]
pub struct Shapefile {
    pub file_name: String,
    pub header: ShapefileHeader,
    pub records: Vec<Option<Geometry>>,
}

impl Shapefile {
    /// Reads every record of an existing shapefile.
    pub fn read(file_name: &str) -> Result<Shapefile> {
        Shapefile::read_with_configs(file_name, &ShapefileConfigs::default())
    }

    pub fn read_with_configs(file_name: &str, configs: &ShapefileConfigs) -> Result<Shapefile> {
        let files = ShpFiles::new(file_name)?;
        let mut reader = files.open_reader(configs)?;
        let header = reader.header().clone();
        let mut records = vec![];
        while reader.has_next()? {
            let record = reader.next_record()?;
            if record.shape_type == ShapeType::Null {
                records.push(None);
            } else {
                records.push(Some(record.into_shape()?));
            }
        }
        reader.close();
        Ok(Shapefile {
            file_name: file_name.to_string(),
            header: header,
            records: records,
        })
    }

    /// An empty shapefile to be filled with `add_record` and saved with
    /// `write`.
    pub fn new(file_name: &str, shape_type: ShapeType) -> Shapefile {
        let mut header = ShapefileHeader::default();
        header.shape_type = shape_type;
        Shapefile {
            file_name: file_name.to_string(),
            header: header,
            records: vec![],
        }
    }

    pub fn add_record(&mut self, geometry: Option<Geometry>) {
        self.records.push(geometry);
    }

    pub fn num_records(&self) -> usize {
        self.records.len()
    }

    /// Writes the .shp and .shx files, then refreshes `header` from what
    /// was written.
    pub fn write(&mut self) -> Result<()> {
        let files = ShpFiles::new(&self.file_name)?;
        let mut writer = files.create_writer()?;
        writer.write(&self.records, self.header.shape_type)?;
        writer.close()?;

        let mut reader = files.open_reader(&ShapefileConfigs::default())?;
        self.header = reader.header().clone();
        reader.close();
        Ok(())
    }
}

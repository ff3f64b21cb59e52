/*
This code is part of the WhiteboxTools geospatial analysis library.
Authors: Dr. John Lindsay
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/

/*
Eventually this will be used to support multiple vector formats but
for now it's just Shapefiles.
*/

// private sub-module defined in other files
pub mod shapefile;

// exports identifiers from private sub-modules in the current module namespace
pub use crate::vector::shapefile::{
    ShapeRecord, ShapeType, ShapeTypeDimension, Shapefile, ShapefileHeader, ShapefileReader,
    ShapefileWriter, ShpFiles,
};

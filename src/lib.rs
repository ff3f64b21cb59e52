/*
This code is part of the WhiteboxTools geospatial analysis library.
Authors: Dr. John Lindsay
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT

Notes: A codec for the geometry files of the ESRI Shapefile format.
*/

pub mod algorithms;
pub mod configs;
pub mod error;
pub mod io_utils;
pub mod structures;
pub mod vector;

pub use crate::configs::ShapefileConfigs;
pub use crate::error::{Result, ShapefileError};
pub use crate::structures::Geometry;
pub use crate::vector::shapefile::{
    ShapeType, Shapefile, ShapefileReader, ShapefileWriter, ShpFiles,
};

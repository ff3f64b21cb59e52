/*
This code is part of the WhiteboxTools geospatial analysis library.
Authors: Dr. John Lindsay
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/

use crate::vector::shapefile::ShapeType;
use std::io;
use thiserror::Error;

/// Errors raised while reading or writing Shapefile geometry.
#[derive(Error, Debug)]
pub enum ShapefileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid file code {found}, expected 9994")]
    InvalidFileCode { found: i32 },

    #[error("invalid version {found}, expected 1000")]
    InvalidVersion { found: i32 },

    #[error("unsupported shape type id {0}")]
    UnsupportedShapeType(i32),

    #[error("no shape handler exists for shape type {0}")]
    NoHandler(ShapeType),

    #[error("geometry of kind {kind} cannot be encoded as {shape_type}")]
    UnsupportedGeometry {
        kind: &'static str,
        shape_type: ShapeType,
    },

    #[error("shape type changed illegally from {expected} to {found}")]
    ShapeTypeMismatch {
        expected: ShapeType,
        found: ShapeType,
    },

    #[error("truncated data at byte {offset}: {needed} bytes declared, {available} available")]
    Truncated {
        offset: u64,
        needed: usize,
        available: usize,
    },

    #[error("record index {index} out of bounds ({count} records)")]
    IndexOutOfBounds { index: usize, count: usize },

    #[error("the {0} has been closed")]
    Closed(&'static str),

    #[error("random access is not supported by a streamed source")]
    NotSeekable,

    #[error("no .shx index is available for access by record number")]
    NoIndex,

    #[error("the headers must be written before any geometry")]
    HeadersNotWritten,

    #[error("handler length {expected} does not match {written} bytes written")]
    LengthMismatch { expected: usize, written: usize },

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShapefileError>;

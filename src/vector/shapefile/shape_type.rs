/*
This code is part of the WhiteboxTools geospatial analysis library.
Authors: Dr. John Lindsay
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/

use super::handlers::ShapeHandler;
use crate::error::{Result, ShapefileError};
use std::fmt;

/// The closed set of shape types a Shapefile may declare. The integer id of
/// each variant is its wire value; Z types are the base id plus 10 and M
/// types the base id plus 20.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShapeType {
    Null = 0,
    Point = 1,
    PolyLine = 3,
    Polygon = 5,
    MultiPoint = 8,
    PointZ = 11,
    PolyLineZ = 13,
    PolygonZ = 15,
    MultiPointZ = 18,
    PointM = 21,
    PolyLineM = 23,
    PolygonM = 25,
    MultiPointM = 28,
    Undefined = -1,
}

impl ShapeType {
    /// Maps a wire id to a shape type. Unknown ids give `Undefined`.
    pub fn from_int(value: i32) -> ShapeType {
        match value {
            0 => ShapeType::Null,
            1 => ShapeType::Point,
            3 => ShapeType::PolyLine,
            5 => ShapeType::Polygon,
            8 => ShapeType::MultiPoint,
            11 => ShapeType::PointZ,
            13 => ShapeType::PolyLineZ,
            15 => ShapeType::PolygonZ,
            18 => ShapeType::MultiPointZ,
            21 => ShapeType::PointM,
            23 => ShapeType::PolyLineM,
            25 => ShapeType::PolygonM,
            28 => ShapeType::MultiPointM,
            _ => ShapeType::Undefined,
        }
    }

    pub fn to_int(&self) -> i32 {
        *self as i32
    }

    pub fn base_shape_type(&self) -> ShapeType {
        match self {
            ShapeType::Point | ShapeType::PointZ | ShapeType::PointM => ShapeType::Point,
            ShapeType::PolyLine | ShapeType::PolyLineZ | ShapeType::PolyLineM => {
                ShapeType::PolyLine
            }
            ShapeType::Polygon | ShapeType::PolygonZ | ShapeType::PolygonM => ShapeType::Polygon,
            ShapeType::MultiPoint | ShapeType::MultiPointZ | ShapeType::MultiPointM => {
                ShapeType::MultiPoint
            }
            ShapeType::Null => ShapeType::Null,
            ShapeType::Undefined => ShapeType::Undefined,
        }
    }

    pub fn dimension(&self) -> ShapeTypeDimension {
        match self.to_int() / 10 {
            1 => ShapeTypeDimension::Z,
            2 => ShapeTypeDimension::Measure,
            _ => ShapeTypeDimension::XY,
        }
    }

    /// Builds the shape type of the given base kind and dimension.
    pub fn with_dimension(base: ShapeType, dimension: ShapeTypeDimension) -> ShapeType {
        let base = base.base_shape_type();
        if base == ShapeType::Null || base == ShapeType::Undefined {
            return base;
        }
        let offset = match dimension {
            ShapeTypeDimension::XY => 0,
            ShapeTypeDimension::Z => 10,
            ShapeTypeDimension::Measure => 20,
        };
        ShapeType::from_int(base.to_int() + offset)
    }

    fn id_class(&self) -> i32 {
        if *self == ShapeType::Undefined {
            return -1;
        }
        self.to_int() % 10
    }

    pub fn is_point_type(&self) -> bool {
        self.id_class() == 1
    }

    pub fn is_line_type(&self) -> bool {
        self.id_class() == 3
    }

    pub fn is_polygon_type(&self) -> bool {
        self.id_class() == 5
    }

    pub fn is_multi_point_type(&self) -> bool {
        self.id_class() == 8
    }

    /// True for the Z variants, which also carry an optional M block.
    pub fn has_z(&self) -> bool {
        self.dimension() == ShapeTypeDimension::Z
    }

    /// True when records of this type may carry measures.
    pub fn has_m(&self) -> bool {
        self.dimension() != ShapeTypeDimension::XY
    }

    /// Returns the codec for this shape type. Null and Undefined have none.
    pub fn handler(&self) -> Result<ShapeHandler> {
        match self.base_shape_type() {
            ShapeType::Point => Ok(ShapeHandler::Point(*self)),
            ShapeType::MultiPoint => Ok(ShapeHandler::MultiPoint(*self)),
            ShapeType::PolyLine => Ok(ShapeHandler::MultiLine(*self)),
            ShapeType::Polygon => Ok(ShapeHandler::Polygon(*self)),
            _ => Err(ShapefileError::NoHandler(*self)),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShapeTypeDimension {
    XY,
    Measure,
    Z,
}

impl Default for ShapeType {
    fn default() -> ShapeType {
        ShapeType::Null
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let printable = match *self {
            ShapeType::Null => "Null",
            ShapeType::Point => "Point",
            ShapeType::PolyLine => "PolyLine",
            ShapeType::Polygon => "Polygon",
            ShapeType::MultiPoint => "MultiPoint",
            ShapeType::PointZ => "PointZ",
            ShapeType::PolyLineZ => "PolyLineZ",
            ShapeType::PolygonZ => "PolygonZ",
            ShapeType::MultiPointZ => "MultiPointZ",
            ShapeType::PointM => "PointM",
            ShapeType::PolyLineM => "PolyLineM",
            ShapeType::PolygonM => "PolygonM",
            ShapeType::MultiPointM => "MultiPointM",
            ShapeType::Undefined => "Undefined",
        };
        write!(f, "{}", printable)
    }
}

#[cfg(test)]
mod test {
    use super::{ShapeType, ShapeTypeDimension};

    #[test]
    fn test_ids_round_trip() {
        for id in &[0, 1, 3, 5, 8, 11, 13, 15, 18, 21, 23, 25, 28] {
            assert_eq!(ShapeType::from_int(*id).to_int(), *id);
        }
        assert_eq!(ShapeType::from_int(31), ShapeType::Undefined);
        assert_eq!(ShapeType::from_int(-7), ShapeType::Undefined);
    }

    #[test]
    fn test_predicates_hold_across_dimensions() {
        for base in &[0, 10, 20] {
            assert!(ShapeType::from_int(base + 1).is_point_type());
            assert!(ShapeType::from_int(base + 3).is_line_type());
            assert!(ShapeType::from_int(base + 5).is_polygon_type());
            assert!(ShapeType::from_int(base + 8).is_multi_point_type());
        }
        assert!(!ShapeType::Undefined.is_point_type());
        assert!(!ShapeType::Null.is_line_type());
    }

    #[test]
    fn test_dimension() {
        assert_eq!(ShapeType::PolygonZ.dimension(), ShapeTypeDimension::Z);
        assert_eq!(ShapeType::MultiPointM.dimension(), ShapeTypeDimension::Measure);
        assert_eq!(ShapeType::Undefined.dimension(), ShapeTypeDimension::XY);
        assert!(ShapeType::PointZ.has_m());
        assert!(!ShapeType::PointM.has_z());
        assert_eq!(
            ShapeType::with_dimension(ShapeType::PolyLineZ, ShapeTypeDimension::Measure),
            ShapeType::PolyLineM
        );
    }

    #[test]
    fn test_handler_availability() {
        assert!(ShapeType::Null.handler().is_err());
        assert!(ShapeType::Undefined.handler().is_err());
        assert!(ShapeType::PolygonM.handler().is_ok());
    }
}

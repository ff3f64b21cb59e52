// private sub-module defined in other files
mod bounding_box;
mod coordinate;
mod coordinate_sequence;
mod geometry;

// exports identifiers from private sub-modules in the current module namespace
pub use self::bounding_box::BoundingBox;
pub use self::coordinate::Coordinate;
pub use self::coordinate_sequence::CoordinateSequence;
pub use self::geometry::{
    Geometry, LineString, LinearRing, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};

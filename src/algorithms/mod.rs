/*
This code is part of the WhiteboxTools geospatial analysis library.
Authors: Dr. John Lindsay
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/
// private sub-module defined in other files
mod is_clockwise_order;
mod poly_area;
mod poly_ops;

// exports identifiers from private sub-modules in the current module namespace
pub use self::is_clockwise_order::is_clockwise_order;
pub use self::poly_area::{polygon_area, signed_area};
pub use self::poly_ops::{is_vertex_of, point_in_poly, winding_number};

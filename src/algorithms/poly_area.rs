/*
This code is part of the WhiteboxTools geospatial analysis library.
Authors: Dr. John Lindsay
Created: 19/10/2026
Last Modified: 19/10/2026
License: MIT
*/

use crate::structures::Coordinate;

/// Calculates the signed area of a ring using the shoelace formula. The
/// result is positive for counter-clockwise rings and negative for clockwise
/// ones. Open rings are treated as implicitly closed.
pub fn signed_area(vertices: &[Coordinate]) -> f64 {
    let num_vertices = vertices.len();
    if num_vertices < 3 {
        return 0f64;
    }

    let mut area = 0f64;
    for i in 0..num_vertices - 1 {
        area += vertices[i].x * vertices[i + 1].y - vertices[i + 1].x * vertices[i].y;
    }
    area +=
        vertices[num_vertices - 1].x * vertices[0].y - vertices[0].x * vertices[num_vertices - 1].y;

    area / 2.0f64
}

/// Calculates the area of a polygon defined by a series of vertices.
pub fn polygon_area(vertices: &[Coordinate]) -> f64 {
    signed_area(vertices).abs()
}

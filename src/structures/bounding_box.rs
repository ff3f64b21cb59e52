use super::Coordinate;
use std::f64;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Default for BoundingBox {
    fn default() -> BoundingBox {
        BoundingBox::empty()
    }
}

impl BoundingBox {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> BoundingBox {
        let (x1, x2) = if min_x < max_x {
            (min_x, max_x)
        } else {
            (max_x, min_x)
        };
        let (y1, y2) = if min_y < max_y {
            (min_y, max_y)
        } else {
            (max_y, min_y)
        };
        BoundingBox {
            min_x: x1,
            min_y: y1,
            max_x: x2,
            max_y: y2,
        }
    }

    /// A box that contains nothing; expanding it by any point yields that point.
    pub fn empty() -> BoundingBox {
        BoundingBox {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn get_height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn get_width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn area(&self) -> f64 {
        if self.is_empty() {
            return 0f64;
        }
        self.get_width() * self.get_height()
    }

    pub fn contains(&self, other: BoundingBox) -> bool {
        other.max_y <= self.max_y
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.min_x >= self.min_x
    }

    pub fn expand_to(&mut self, other: BoundingBox) {
        if other.is_empty() {
            return;
        }
        self.max_y = if self.max_y >= other.max_y { self.max_y } else { other.max_y };
        self.max_x = if self.max_x >= other.max_x { self.max_x } else { other.max_x };
        self.min_y = if self.min_y <= other.min_y { self.min_y } else { other.min_y };
        self.min_x = if self.min_x <= other.min_x { self.min_x } else { other.min_x };
    }

    pub fn expand_to_include(&mut self, c: &Coordinate) {
        if c.x < self.min_x {
            self.min_x = c.x;
        }
        if c.x > self.max_x {
            self.max_x = c.x;
        }
        if c.y < self.min_y {
            self.min_y = c.y;
        }
        if c.y > self.max_y {
            self.max_y = c.y;
        }
    }

    pub fn from_coordinates<'a, I: IntoIterator<Item = &'a Coordinate>>(coords: I) -> BoundingBox {
        let mut bb = BoundingBox::empty();
        for c in coords {
            bb.expand_to_include(c);
        }
        bb
    }
}

// src/geometry.rs

use bytemuck::{Pod, Zeroable};

/// Capacity of the assembled perimeter-vertex list. Two convex quadrilaterals
/// can contribute at most 8 boundary vertices (inside corners plus crossings).
pub const MAX_PERIMETER_VERTICES: usize = 8;

/// Boundary tolerance of the point-in-quad test. A corner sitting exactly on
/// the other quadrilateral's edge counts as inside.
pub const INSIDE_EPSILON: f32 = 1e-5;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable, PartialEq)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn sub(&self, other: &Point2) -> Point2 {
        Point2::new(self.x - other.x, self.y - other.y)
    }

    /// z-component of the 2D cross product.
    pub fn cross(&self, other: &Point2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    pub fn lerp(&self, other: &Point2, t: f32) -> Point2 {
        Point2::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

/// A directed 2-point segment, built on demand from two adjacent corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: Point2,
    pub b: Point2,
}

impl Segment {
    pub fn new(a: Point2, b: Point2) -> Self {
        Self { a, b }
    }

    pub fn direction(&self) -> Point2 {
        self.b.sub(&self.a)
    }

    /// Point at progress t, t=0 at `a`, t=1 at `b`.
    pub fn point_at(&self, t: f32) -> Point2 {
        self.a.lerp(&self.b, t)
    }
}

/// A convex quadrilateral: 4 corners in counterclockwise winding order.
/// Both inputs of an intersection query must share this winding.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable, PartialEq)]
pub struct Quad {
    pub corners: [Point2; 4],
}

impl Quad {
    pub fn new(corners: [Point2; 4]) -> Self {
        Self { corners }
    }

    /// Side `index` joins corner `index` to corner `(index + 1) % 4`.
    pub fn side(&self, index: usize) -> Segment {
        Segment::new(self.corners[index % 4], self.corners[(index + 1) % 4])
    }

    /// Boundary-tolerant containment: the point may sit on an edge.
    pub fn contains_point(&self, p: &Point2) -> bool {
        for i in 0..4 {
            let corner = self.corners[i];
            let edge = self.corners[(i + 1) % 4].sub(&corner);
            let to_p = p.sub(&corner);
            if edge.cross(&to_p) < -INSIDE_EPSILON {
                return false;
            }
        }
        true
    }

    pub fn area(&self) -> f32 {
        let mut area = 0.0;
        for i in 0..4 {
            let j = (i + 1) % 4;
            area += self.corners[i].x * self.corners[j].y;
            area -= self.corners[j].x * self.corners[i].y;
        }
        area.abs() / 2.0
    }
}

/// A 4-bit corner set: bit `i` marks corner `i` of one quadrilateral as lying
/// inside the other one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CornerMask(u8);

impl CornerMask {
    pub const NONE: CornerMask = CornerMask(0);
    pub const ALL: CornerMask = CornerMask(0b1111);

    pub fn from_bits(bits: u8) -> Self {
        Self(bits & 0b1111)
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn contains(&self, corner: usize) -> bool {
        self.0 & (1 << (corner % 4)) != 0
    }

    pub fn insert(&mut self, corner: usize) {
        self.0 |= 1 << (corner % 4);
    }

    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// First corner of the contiguous run of set bits around the 4-corner
    /// cycle (the unique set bit whose cyclic predecessor is clear). Full and
    /// empty masks have no run boundary: full answers 0, empty answers None.
    /// For the two non-contiguous patterns the lowest qualifying corner wins.
    pub fn run_start(&self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        if self.0 == 0b1111 {
            return Some(0);
        }
        for i in 0..4 {
            if self.contains(i) && !self.contains((i + 3) % 4) {
                return Some(i);
            }
        }
        None
    }

    /// True for the {0,2} and {1,3} placements.
    pub fn is_opposite_pair(&self) -> bool {
        self.0 == 0b0101 || self.0 == 0b1010
    }
}

/// Which corners of `quad` lie inside `other` (boundary-tolerant).
pub fn inside_mask(quad: &Quad, other: &Quad) -> CornerMask {
    let mut mask = CornerMask::NONE;
    for i in 0..4 {
        if other.contains_point(&quad.corners[i]) {
            mask.insert(i);
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square_at(x: f32, y: f32) -> Quad {
        Quad::new([
            Point2::new(x, y),
            Point2::new(x + 1.0, y),
            Point2::new(x + 1.0, y + 1.0),
            Point2::new(x, y + 1.0),
        ])
    }

    #[test]
    fn side_wraps_to_first_corner() {
        let q = unit_square_at(0.0, 0.0);
        let s = q.side(3);
        assert_eq!(s.a, Point2::new(0.0, 1.0));
        assert_eq!(s.b, Point2::new(0.0, 0.0));
    }

    #[test]
    fn contains_point_accepts_boundary() {
        let q = unit_square_at(0.0, 0.0);
        assert!(q.contains_point(&Point2::new(0.5, 0.5)));
        assert!(q.contains_point(&Point2::new(1.0, 0.5)));
        assert!(q.contains_point(&Point2::new(0.0, 0.0)));
        assert!(!q.contains_point(&Point2::new(1.1, 0.5)));
    }

    #[test]
    fn inside_mask_of_offset_squares() {
        let a = unit_square_at(0.0, 0.0);
        let b = unit_square_at(0.5, 0.0);
        assert_eq!(inside_mask(&a, &b).bits(), 0b0110);
        assert_eq!(inside_mask(&b, &a).bits(), 0b1001);
    }

    #[test]
    fn run_start_handles_wrap() {
        assert_eq!(CornerMask::from_bits(0b0011).run_start(), Some(0));
        assert_eq!(CornerMask::from_bits(0b0110).run_start(), Some(1));
        assert_eq!(CornerMask::from_bits(0b1001).run_start(), Some(3));
        assert_eq!(CornerMask::from_bits(0b1110).run_start(), Some(1));
        assert_eq!(CornerMask::from_bits(0b1111).run_start(), Some(0));
        assert_eq!(CornerMask::NONE.run_start(), None);
        assert_eq!(CornerMask::from_bits(0b0101).run_start(), Some(0));
    }

    #[test]
    fn quad_area_is_signed_sum() {
        let q = unit_square_at(2.0, 3.0);
        assert!((q.area() - 1.0).abs() < 1e-6);
    }
}

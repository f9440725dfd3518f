// src/lib.rs

pub mod classify;
pub mod cooperative;
pub mod generator;
pub mod geometry;
pub mod intersect;
pub mod overlap;
pub mod tables;

// Re-export the calling surface so hosts can stay off the module paths.
pub use classify::TriangleIndexType;
pub use cooperative::{intersect_cooperative, intersect_cooperative_into, GroupScratch, ThreadCoords};
pub use geometry::{inside_mask, CornerMask, Point2, Quad, Segment, MAX_PERIMETER_VERTICES};
pub use overlap::{intersect, intersect_into, GeometryCounts, IntersectionOutput};
pub use tables::triangle_indices;

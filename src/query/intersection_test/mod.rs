//! Overlap tests between pairs of shapes.

pub use self::intersection_test_aabb_triangle::intersection_test_aabb_triangle;

mod intersection_test_aabb_triangle;

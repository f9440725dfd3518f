// src/generator.rs

use rand::Rng;

use crate::geometry::{Point2, Quad};

pub struct RectangleGenerator;

impl RectangleGenerator {
    /// Counter-clockwise rectangle around `center`, long axis at `angle`.
    pub fn arm_quad(center: Point2, half_length: f32, half_width: f32, angle: f32) -> Quad {
        let (sin, cos) = angle.sin_cos();
        let axis = Point2::new(cos, sin);
        let normal = Point2::new(-sin, cos);
        let corner = |along: f32, across: f32| {
            Point2::new(
                center.x + along * axis.x + across * normal.x,
                center.y + along * axis.y + across * normal.y,
            )
        };
        Quad::new([
            corner(-half_length, -half_width),
            corner(half_length, -half_width),
            corner(half_length, half_width),
            corner(-half_length, half_width),
        ])
    }

    /// Two arm rectangles sharing a joint, the way consecutive links of a
    /// chain do: each rectangle covers its segment plus a joint-radius
    /// overhang at both ends.
    pub fn joint_pair() -> (Quad, Quad) {
        let mut rng = rand::thread_rng();

        let joint = Point2::new(rng.gen_range(-4.0..4.0), rng.gen_range(-4.0..4.0));
        let half_width = rng.gen_range(0.08..0.25);
        let overhang = half_width;

        let angle1 = rng.gen_range(0.0..std::f32::consts::TAU);
        let bend = rng.gen_range(-1.2..1.2_f32);
        let angle2 = angle1 + bend;

        let length1 = rng.gen_range(0.8..2.0);
        let length2 = rng.gen_range(0.8..2.0);

        let center1 = Point2::new(
            joint.x - 0.5 * length1 * angle1.cos(),
            joint.y - 0.5 * length1 * angle1.sin(),
        );
        let center2 = Point2::new(
            joint.x + 0.5 * length2 * angle2.cos(),
            joint.y + 0.5 * length2 * angle2.sin(),
        );

        (
            Self::arm_quad(center1, 0.5 * length1 + overhang, half_width, angle1),
            Self::arm_quad(center2, 0.5 * length2 + overhang, half_width, angle2),
        )
    }

    /// Two axis-aligned squares offset along one axis by a dyadic fraction
    /// of their size. Every coordinate stays exactly representable, so the
    /// corner-on-boundary contacts this family is built around survive the
    /// arithmetic unchanged.
    pub fn offset_pair() -> (Quad, Quad) {
        let mut rng = rand::thread_rng();

        let size = [0.5, 1.0, 2.0, 4.0][rng.gen_range(0..4)];
        let fraction = [0.25, 0.5, 0.75][rng.gen_range(0..3)];
        let x = rng.gen_range(-8..8) as f32;
        let y = rng.gen_range(-8..8) as f32;

        let mut dx = size * fraction * if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let mut dy = 0.0;
        if rng.gen_bool(0.5) {
            std::mem::swap(&mut dx, &mut dy);
        }

        let square = |ox: f32, oy: f32| {
            Quad::new([
                Point2::new(ox, oy),
                Point2::new(ox + size, oy),
                Point2::new(ox + size, oy + size),
                Point2::new(ox, oy + size),
            ])
        };
        (square(x, y), square(x + dx, y + dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::inside_mask;

    #[test]
    fn arm_quads_wind_counter_clockwise() {
        let quad = RectangleGenerator::arm_quad(Point2::new(1.0, -2.0), 1.5, 0.2, 0.7);
        assert!(quad.area() > 0.0);
        for i in 0..4 {
            let side = quad.side(i);
            let next = quad.side(i + 1);
            assert!(side.direction().cross(&next.direction()) > 0.0);
        }
    }

    #[test]
    fn joint_pairs_share_the_joint_region() {
        for _ in 0..32 {
            let (first, second) = RectangleGenerator::joint_pair();
            assert!(first.area() > 0.0);
            assert!(second.area() > 0.0);
            // The overhang keeps both rectangles covering the joint, so the
            // pair always overlaps somewhere.
            let overlap_hint = inside_mask(&first, &second).count()
                + inside_mask(&second, &first).count();
            let crossings = (0..4)
                .flat_map(|i| (0..4).map(move |j| (i, j)))
                .filter(|&(i, j)| {
                    crate::intersect::check_pair(&first.side(i), &second.side(j)).genuine
                })
                .count();
            assert!(overlap_hint > 0 || crossings > 0);
        }
    }

    #[test]
    fn offset_pairs_keep_exact_coordinates() {
        for _ in 0..32 {
            let (first, second) = RectangleGenerator::offset_pair();
            let size = first.side(0).direction().x;
            for quad in [&first, &second] {
                for corner in &quad.corners {
                    // Dyadic coordinates scaled back to integers stay whole.
                    for coordinate in [corner.x, corner.y] {
                        let scaled = coordinate * 4.0 / size;
                        assert_eq!(scaled, scaled.round());
                    }
                }
            }
        }
    }
}

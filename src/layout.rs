use std::f64::consts::PI;

use crate::surface::{Point, Size};

/// Fraction of the shorter surface side used as the branch ring radius
pub const RING_RATIO: f64 = 0.3;

/// Node positions for a one-level radial map.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialLayout {
    pub center: Point,
    pub radius: f64,
    pub angle_step: f64,
    pub children: Vec<Point>,
}

impl RadialLayout {
    /// Root sits at the horizontal middle, one third down, so branches
    /// have room below and beside it. Branches are spread evenly on a ring
    /// starting at angle 0 (to the right of the root).
    pub fn compute(size: Size, child_count: usize) -> Self {
        let center = Point::new(size.width / 2.0, size.height / 3.0);
        let radius = RING_RATIO * size.width.min(size.height);

        let angle_step = if child_count == 0 {
            0.0
        } else {
            2.0 * PI / child_count as f64
        };

        let children = (0..child_count)
            .map(|i| {
                let (s, c) = (i as f64 * angle_step).sin_cos();
                Point::new(center.x + radius * c, center.y + radius * s)
            })
            .collect();

        RadialLayout {
            center,
            radius,
            angle_step,
            children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_center_and_radius() {
        let layout = RadialLayout::compute(Size::new(800.0, 500.0), 4);
        assert_eq!(layout.center, Point::new(400.0, 500.0 / 3.0));
        assert!((layout.radius - 150.0).abs() < EPS);
    }

    #[test]
    fn test_zero_children() {
        let layout = RadialLayout::compute(Size::new(800.0, 500.0), 0);
        assert!(layout.children.is_empty());
        assert_eq!(layout.angle_step, 0.0);
        assert!(layout.angle_step.is_finite());
    }

    #[test]
    fn test_children_on_ring() {
        let layout = RadialLayout::compute(Size::new(600.0, 600.0), 7);
        assert_eq!(layout.children.len(), 7);
        for p in &layout.children {
            assert!((p.dist(layout.center) - layout.radius).abs() < 1e-6);
        }
    }

    #[test]
    fn test_four_children_cardinal_points() {
        let layout = RadialLayout::compute(Size::new(300.0, 300.0), 4);
        let c = layout.center;
        let r = layout.radius;
        let expected = [
            Point::new(c.x + r, c.y),
            Point::new(c.x, c.y + r),
            Point::new(c.x - r, c.y),
            Point::new(c.x, c.y - r),
        ];
        for (got, want) in layout.children.iter().zip(expected.iter()) {
            assert!(got.dist(*want) < 1e-6, "{:?} != {:?}", got, want);
        }
    }
}

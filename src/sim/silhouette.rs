//! Missile silhouette geometry
//!
//! The outline is described once, as convex polygons relative to the missile
//! center (y grows downward, nose points up):
//! - body: rectangle `0.4r` wide, `1.6r` tall
//! - nose: triangle on top of the body reaching `-1.6r`
//! - fins: two triangles at the base, `0.8 * body width` wide, `0.3 * body height` tall
//!
//! Both the renderer and the precise hit test consume these polygons, so what
//! the player sees is exactly what can be hit.

use glam::Vec2;

/// Which piece of the missile a polygon belongs to (renderer picks colors by part)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Body,
    Nose,
    Fin,
}

/// Convex polygons making up a missile, relative to its center
#[derive(Debug, Clone, PartialEq)]
pub struct Silhouette {
    pub body: [Vec2; 4],
    pub nose: [Vec2; 3],
    pub left_fin: [Vec2; 3],
    pub right_fin: [Vec2; 3],
}

impl Silhouette {
    pub fn for_radius(radius: f32) -> Self {
        let body_w = radius * 0.4;
        let body_h = radius * 1.6;
        let fin_h = body_h * 0.3;
        let fin_w = body_w * 0.8;

        let hw = body_w / 2.0;
        let hh = body_h / 2.0;

        Self {
            body: [
                Vec2::new(-hw, -hh),
                Vec2::new(hw, -hh),
                Vec2::new(hw, hh),
                Vec2::new(-hw, hh),
            ],
            nose: [Vec2::new(-hw, -hh), Vec2::new(hw, -hh), Vec2::new(0.0, -body_h)],
            left_fin: [
                Vec2::new(-hw, hh),
                Vec2::new(-hw - fin_w, hh + fin_h),
                Vec2::new(-hw, hh + fin_h),
            ],
            right_fin: [
                Vec2::new(hw, hh),
                Vec2::new(hw + fin_w, hh + fin_h),
                Vec2::new(hw, hh + fin_h),
            ],
        }
    }

    /// All polygons with their part tag, in draw order
    pub fn parts(&self) -> [(Part, &[Vec2]); 4] {
        [
            (Part::Body, &self.body[..]),
            (Part::Nose, &self.nose[..]),
            (Part::Fin, &self.left_fin[..]),
            (Part::Fin, &self.right_fin[..]),
        ]
    }

    /// Point (relative to missile center) inside any polygon
    pub fn contains(&self, local: Vec2) -> bool {
        self.parts()
            .iter()
            .any(|(_, poly)| point_in_convex_polygon(local, poly))
    }
}

/// Point-in-convex-polygon test (boundary counts as inside, either winding)
pub fn point_in_convex_polygon(p: Vec2, poly: &[Vec2]) -> bool {
    if poly.len() < 3 {
        return false;
    }
    let mut sign = 0.0f32;
    for i in 0..poly.len() {
        let a = poly[i];
        let b = poly[(i + 1) % poly.len()];
        let cross = (b - a).perp_dot(p - a);
        if cross == 0.0 {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_for_radius_20() {
        let s = Silhouette::for_radius(20.0);
        // Body 8 x 32 centered on origin
        assert_eq!(s.body[0], Vec2::new(-4.0, -16.0));
        assert_eq!(s.body[2], Vec2::new(4.0, 16.0));
        // Nose tip at -body height
        assert_eq!(s.nose[2], Vec2::new(0.0, -32.0));
        // Fins extend 6.4 wide and 9.6 tall below the body
        assert!((s.right_fin[1].x - 10.4).abs() < 1e-4);
        assert!((s.right_fin[1].y - 25.6).abs() < 1e-4);
    }

    #[test]
    fn test_contains_body_nose_and_fin() {
        let s = Silhouette::for_radius(20.0);
        assert!(s.contains(Vec2::new(0.0, 1.0)));
        assert!(s.contains(Vec2::new(0.0, -25.0)));
        assert!(s.contains(Vec2::new(5.0, 18.0)));
        assert!(s.contains(Vec2::new(-5.0, 18.0)));
    }

    #[test]
    fn test_rejects_points_outside() {
        let s = Silhouette::for_radius(20.0);
        assert!(!s.contains(Vec2::new(6.0, 0.0)));
        assert!(!s.contains(Vec2::new(0.0, -33.0)));
        assert!(!s.contains(Vec2::new(3.5, -30.0)));
        assert!(!s.contains(Vec2::new(0.0, 30.0)));
    }

    #[test]
    fn test_point_in_polygon_winding_agnostic() {
        let ccw = [Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)];
        let cw = [Vec2::ZERO, Vec2::new(0.0, 10.0), Vec2::new(10.0, 0.0)];
        let p = Vec2::new(2.0, 2.0);
        assert!(point_in_convex_polygon(p, &ccw));
        assert!(point_in_convex_polygon(p, &cw));
        assert!(!point_in_convex_polygon(Vec2::new(8.0, 8.0), &ccw));
    }
}

//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in screen pixels (y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors, fade};
use crate::sim::{Explosion, Missile, Part, Silhouette};

fn on_circle(center: Vec2, radius: f32, theta: f32) -> Vec2 {
    Vec2::new(
        center.x + radius * theta.cos(),
        center.y + radius * theta.sin(),
    )
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        let p1 = on_circle(center, radius, theta1);
        let p2 = on_circle(center, radius, theta2);
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Filled circle whose color varies with distance from the center.
///
/// `stops` are `(t, color)` pairs with `t` in `[0, 1]` ascending; each pair of
/// neighbouring stops becomes one ring blended between their colors.
pub fn radial_gradient(
    center: Vec2,
    radius: f32,
    stops: &[(f32, [f32; 4])],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(stops.len() * (segments * 6) as usize);

    for band in stops.windows(2) {
        let (t_in, c_in) = band[0];
        let (t_out, c_out) = band[1];
        let r_in = radius * t_in;
        let r_out = radius * t_out;

        for i in 0..segments {
            let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
            let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

            let inner1 = on_circle(center, r_in, theta1);
            let outer1 = on_circle(center, r_out, theta1);
            let inner2 = on_circle(center, r_in, theta2);
            let outer2 = on_circle(center, r_out, theta2);

            // Two triangles per segment (the inner pair collapses at t = 0)
            vertices.push(Vertex::new(inner1.x, inner1.y, c_in));
            vertices.push(Vertex::new(outer1.x, outer1.y, c_out));
            vertices.push(Vertex::new(inner2.x, inner2.y, c_in));

            vertices.push(Vertex::new(inner2.x, inner2.y, c_in));
            vertices.push(Vertex::new(outer1.x, outer1.y, c_out));
            vertices.push(Vertex::new(outer2.x, outer2.y, c_out));
        }
    }

    vertices
}

/// Upper half of a disc (the side facing negative y), shaded per vertex.
///
/// Tessellated into `bands` concentric rings so `shade` can approximate a
/// gradient that is not centered on the disc.
pub fn upper_half_disc(
    center: Vec2,
    radius: f32,
    segments: u32,
    bands: u32,
    shade: impl Fn(Vec2) -> [f32; 4],
) -> Vec<Vertex> {
    let bands = bands.max(1);
    let mut vertices = Vec::with_capacity((segments * bands * 6) as usize);
    let vertex = |p: Vec2| Vertex::new(p.x, p.y, shade(p));

    for b in 0..bands {
        let r_in = radius * b as f32 / bands as f32;
        let r_out = radius * (b + 1) as f32 / bands as f32;

        for i in 0..segments {
            // Angles from PI to 2*PI sweep the half above the center
            let theta1 = PI + (i as f32 / segments as f32) * PI;
            let theta2 = PI + ((i + 1) as f32 / segments as f32) * PI;

            let inner1 = on_circle(center, r_in, theta1);
            let outer1 = on_circle(center, r_out, theta1);
            let inner2 = on_circle(center, r_in, theta2);
            let outer2 = on_circle(center, r_out, theta2);

            vertices.push(vertex(inner1));
            vertices.push(vertex(outer1));
            vertices.push(vertex(inner2));

            vertices.push(vertex(inner2));
            vertices.push(vertex(outer1));
            vertices.push(vertex(outer2));
        }
    }

    vertices
}

/// Fill a polygon that is star-shaped around its vertex centroid
pub fn polygon(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }

    let centroid = points.iter().copied().sum::<Vec2>() / points.len() as f32;
    let mut vertices = Vec::with_capacity(points.len() * 3);

    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        vertices.push(Vertex::new(centroid.x, centroid.y, color));
        vertices.push(Vertex::new(a.x, a.y, color));
        vertices.push(Vertex::new(b.x, b.y, color));
    }

    vertices
}

/// Missile body, nose and fins from the same outline the hit test uses
pub fn missile(missile: &Missile) -> Vec<Vertex> {
    let silhouette = Silhouette::for_radius(missile.radius);
    let mut vertices = Vec::with_capacity(24);

    for (part, poly) in silhouette.parts() {
        let color = match part {
            Part::Body => colors::MISSILE_BODY,
            Part::Nose => colors::MISSILE_NOSE,
            Part::Fin => colors::MISSILE_FIN,
        };
        let placed: Vec<Vec2> = poly.iter().map(|p| missile.pos + *p).collect();
        vertices.extend(polygon(&placed, color));
    }

    vertices
}

/// Expanding fireball: yellow-white center fading through orange, plus a white core
pub fn explosion(explosion: &Explosion, segments: u32) -> Vec<Vertex> {
    if explosion.radius <= 0.0 || explosion.alpha <= 0.0 {
        return Vec::new();
    }

    let a = explosion.alpha;
    let stops = [
        (0.0, fade(colors::EXPLOSION_CENTER, a)),
        (0.5, fade(colors::EXPLOSION_MID, a)),
        (1.0, colors::EXPLOSION_RIM),
    ];

    let mut vertices = radial_gradient(explosion.pos, explosion.radius, &stops, segments);
    vertices.extend(circle(
        explosion.pos,
        explosion.radius * 0.3,
        fade(colors::EXPLOSION_CORE, a),
        segments,
    ));
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_triangle_count() {
        let v = circle(Vec2::ZERO, 10.0, [1.0; 4], 16);
        assert_eq!(v.len(), 16 * 3);
        for vertex in &v {
            let p = Vec2::from(vertex.position);
            assert!(p.length() <= 10.0 + 1e-4);
        }
    }

    #[test]
    fn test_upper_half_disc_stays_above_center() {
        let center = Vec2::new(100.0, 500.0);
        let v = upper_half_disc(center, 50.0, 12, 3, |_| [1.0; 4]);
        assert_eq!(v.len(), 12 * 3 * 6);
        assert!(v.iter().all(|vertex| vertex.position[1] <= center.y + 1e-3));
    }

    #[test]
    fn test_polygon_needs_three_points() {
        assert!(polygon(&[Vec2::ZERO, Vec2::X], [1.0; 4]).is_empty());
        assert_eq!(polygon(&[Vec2::ZERO, Vec2::X, Vec2::Y], [1.0; 4]).len(), 9);
    }

    #[test]
    fn test_missile_uses_part_colors() {
        let m = Missile {
            id: 1,
            pos: Vec2::new(50.0, 50.0),
            radius: 20.0,
            speed: 0.0,
        };
        let v = missile(&m);
        // Body quad (4 fan triangles) + nose + two fins (3 each)
        assert_eq!(v.len(), (4 + 3 + 3 + 3) * 3);
        assert!(v.iter().any(|x| x.color == colors::MISSILE_NOSE));
        assert!(v.iter().any(|x| x.color == colors::MISSILE_FIN));
        // Nose tip reaches 1.6r above the center
        let top = v.iter().map(|x| x.position[1]).fold(f32::MAX, f32::min);
        assert!((top - (50.0 - 32.0)).abs() < 1e-3);
    }

    #[test]
    fn test_explosion_fades_with_alpha() {
        let mut e = Explosion::new(Vec2::ZERO, 20.0, 3.0, 800.0);
        assert!(explosion(&e, 16).is_empty(), "zero radius draws nothing");

        e.advance(400.0);
        let v = explosion(&e, 16);
        assert!(!v.is_empty());
        let max_alpha = v.iter().map(|x| x.color[3]).fold(0.0, f32::max);
        assert!((max_alpha - 0.8 * e.alpha).abs() < 1e-4);
    }
}

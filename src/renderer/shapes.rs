//! Shape generation for 2D primitives
//!
//! Every shape is emitted as a triangle list in canvas coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, with_alpha};

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    arc_band(center, inner_radius, outer_radius, 0.0, 2.0 * PI, color, segments)
}

/// Thick arc band around `center` from `theta_start` spanning `span` radians
pub fn arc_band(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    theta_start: f32,
    span: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(1);
    let mut vertices = Vec::with_capacity((segments * 6) as usize);
    let at = |r: f32, theta: f32| center + Vec2::new(r * theta.cos(), r * theta.sin());

    for i in 0..segments {
        let theta1 = theta_start + (i as f32 / segments as f32) * span;
        let theta2 = theta_start + ((i + 1) as f32 / segments as f32) * span;

        let inner1 = at(inner_radius, theta1);
        let outer1 = at(outer_radius, theta1);
        let inner2 = at(inner_radius, theta2);
        let outer2 = at(outer_radius, theta2);

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Soft halo: opaque-ish at `inner_radius`, transparent at `outer_radius`
pub fn radial_glow(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let inner_color = color;
    let outer_color = with_alpha(color, 0.0);
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());

        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        vertices.push(Vertex::new(inner1.x, inner1.y, inner_color));
        vertices.push(Vertex::new(outer1.x, outer1.y, outer_color));
        vertices.push(Vertex::new(inner2.x, inner2.y, inner_color));

        vertices.push(Vertex::new(inner2.x, inner2.y, inner_color));
        vertices.push(Vertex::new(outer1.x, outer1.y, outer_color));
        vertices.push(Vertex::new(outer2.x, outer2.y, outer_color));
    }

    vertices
}

/// Axis-aligned filled rectangle from its top-left corner
pub fn rect(corner: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    gradient_rect(corner, size, color, color)
}

/// Rectangle with a vertical gradient from `top` to `bottom`
pub fn gradient_rect(corner: Vec2, size: Vec2, top: [f32; 4], bottom: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (corner.x, corner.y);
    let (x1, y1) = (corner.x + size.x, corner.y + size.y);
    vec![
        Vertex::new(x0, y0, top),
        Vertex::new(x1, y0, top),
        Vertex::new(x0, y1, bottom),
        Vertex::new(x0, y1, bottom),
        Vertex::new(x1, y0, top),
        Vertex::new(x1, y1, bottom),
    ]
}

/// Rectangle border of the given thickness (drawn inside the bounds)
pub fn rect_outline(corner: Vec2, size: Vec2, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let t = thickness.min(size.x / 2.0).min(size.y / 2.0);
    let mut vertices = Vec::with_capacity(24);
    // Top, bottom, left, right
    vertices.extend(rect(corner, Vec2::new(size.x, t), color));
    vertices.extend(rect(
        corner + Vec2::new(0.0, size.y - t),
        Vec2::new(size.x, t),
        color,
    ));
    vertices.extend(rect(
        corner + Vec2::new(0.0, t),
        Vec2::new(t, size.y - 2.0 * t),
        color,
    ));
    vertices.extend(rect(
        corner + Vec2::new(size.x - t, t),
        Vec2::new(t, size.y - 2.0 * t),
        color,
    ));
    vertices
}

pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Line segment as a quad
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a = from + perp;
    let b = from - perp;
    let c = to + perp;
    let d = to - perp;
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(vertices: &[Vertex]) -> impl Iterator<Item = Vec2> + '_ {
        vertices
            .iter()
            .map(|v| Vec2::new(v.position[0], v.position[1]))
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let center = Vec2::new(100.0, 50.0);
        let vertices = circle(center, 10.0, [1.0; 4], 16);
        assert_eq!(vertices.len(), 16 * 3);
        assert!(positions(&vertices).all(|p| p.distance(center) <= 10.0 + 1e-3));
    }

    #[test]
    fn test_ring_between_radii() {
        let center = Vec2::new(0.0, 0.0);
        let vertices = ring(center, 20.0, 25.0, [1.0; 4], 24);
        assert_eq!(vertices.len(), 24 * 6);
        assert!(positions(&vertices).all(|p| {
            let d = p.length();
            (20.0 - 1e-3..=25.0 + 1e-3).contains(&d)
        }));
    }

    #[test]
    fn test_glow_fades_outward() {
        let vertices = radial_glow(Vec2::ZERO, 10.0, 20.0, [1.0, 0.0, 0.0, 0.5], 8);
        for v in &vertices {
            let d = Vec2::new(v.position[0], v.position[1]).length();
            if d > 15.0 {
                assert_eq!(v.color[3], 0.0);
            } else {
                assert_eq!(v.color[3], 0.5);
            }
        }
    }

    #[test]
    fn test_gradient_rect_corners() {
        let top = [1.0, 0.0, 0.0, 1.0];
        let bottom = [0.0, 0.0, 1.0, 1.0];
        let vertices = gradient_rect(Vec2::ZERO, Vec2::new(800.0, 600.0), top, bottom);
        assert_eq!(vertices.len(), 6);
        for v in &vertices {
            let expected = if v.position[1] == 0.0 { top } else { bottom };
            assert_eq!(v.color, expected);
        }
    }

    #[test]
    fn test_outline_stays_inside_bounds() {
        let corner = Vec2::new(10.0, 10.0);
        let size = Vec2::new(50.0, 30.0);
        let vertices = rect_outline(corner, size, 3.0, [1.0; 4]);
        assert_eq!(vertices.len(), 24);
        assert!(positions(&vertices).all(|p| {
            p.x >= corner.x && p.x <= corner.x + size.x && p.y >= corner.y && p.y <= corner.y + size.y
        }));
    }
}

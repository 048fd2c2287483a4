//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in world coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Generate vertices for an axis-aligned rectangle
pub fn rect(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> Vec<Vertex> {
    gradient_rect(x, y, w, h, color, color)
}

/// Rectangle with a vertical gradient from `top` to `bottom`
pub fn gradient_rect(
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    top: [f32; 4],
    bottom: [f32; 4],
) -> Vec<Vertex> {
    if w <= 0.0 || h <= 0.0 {
        return Vec::new();
    }
    let (x2, y2) = (x + w, y + h);
    vec![
        Vertex::new(x, y, top),
        Vertex::new(x, y2, bottom),
        Vertex::new(x2, y, top),
        Vertex::new(x2, y, top),
        Vertex::new(x, y2, bottom),
        Vertex::new(x2, y2, bottom),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ellipse(center, Vec2::splat(radius), 0.0, color, segments)
}

/// Filled ellipse with the given radii, rotated by `angle` about its center
pub fn ellipse(
    center: Vec2,
    radii: Vec2,
    angle: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    let rotation = Vec2::from_angle(angle);
    let point = |theta: f32| {
        let local = Vec2::new(radii.x * theta.cos(), radii.y * theta.sin());
        center + rotation.rotate(local)
    };

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let p1 = point(theta1);
        let p2 = point(theta2);

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Single filled triangle
pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Rotate vertices by `angle` about the origin, then move them to `origin`.
/// Used to pose shapes built around (0, 0).
pub fn place(vertices: &mut [Vertex], origin: Vec2, angle: f32) {
    let rotation = Vec2::from_angle(angle);
    for v in vertices {
        let p = origin + rotation.rotate(Vec2::from(v.position));
        v.position = p.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_is_two_triangles() {
        let v = rect(10.0, 20.0, 30.0, 40.0, [1.0; 4]);
        assert_eq!(v.len(), 6);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_empty_rect_emits_nothing() {
        assert!(rect(0.0, 0.0, 0.0, 10.0, [1.0; 4]).is_empty());
        assert!(rect(0.0, 0.0, 10.0, -1.0, [1.0; 4]).is_empty());
    }

    #[test]
    fn test_circle_points_on_radius() {
        let center = Vec2::new(5.0, 5.0);
        let v = circle(center, 3.0, [1.0; 4], 16);
        assert_eq!(v.len(), 48);
        for tri in v.chunks(3) {
            let edge = Vec2::from(tri[1].position);
            assert!(((edge - center).length() - 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_place_rotates_then_translates() {
        let mut v = vec![Vertex::new(1.0, 0.0, [1.0; 4])];
        place(&mut v, Vec2::new(10.0, 10.0), PI / 2.0);
        assert!((v[0].position[0] - 10.0).abs() < 1e-5);
        assert!((v[0].position[1] - 11.0).abs() < 1e-5);
    }
}

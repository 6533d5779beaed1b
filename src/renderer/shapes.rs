//! Shape generation for 2D primitives
//!
//! All coordinates are screen pixels; the pipeline maps them to clip space.

use super::vertex::{Vertex, colors};
use crate::sim::{EntityKind, Frame, HealthBar, Rect};

/// Health bar outline thickness (pixels)
const OUTLINE_WIDTH: f32 = 2.0;

/// Two triangles covering `rect`, with the full texture mapped across it
pub fn quad(rect: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let (l, t, r, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
    [
        Vertex::new(l, t, 0.0, 0.0, color),
        Vertex::new(l, b, 0.0, 1.0, color),
        Vertex::new(r, b, 1.0, 1.0, color),
        Vertex::new(l, t, 0.0, 0.0, color),
        Vertex::new(r, b, 1.0, 1.0, color),
        Vertex::new(r, t, 1.0, 0.0, color),
    ]
}

/// Hollow rectangle drawn inside `rect`
pub fn outline(rect: &Rect, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let w = width.min(rect.width() / 2.0).min(rect.height() / 2.0);
    let inner_height = rect.height() - 2.0 * w;
    let edges = [
        Rect::new(rect.left(), rect.top(), rect.width(), w),
        Rect::new(rect.left(), rect.bottom() - w, rect.width(), w),
        Rect::new(rect.left(), rect.top() + w, w, inner_height),
        Rect::new(rect.right() - w, rect.top() + w, w, inner_height),
    ];
    edges.iter().flat_map(|e| quad(e, color)).collect()
}

/// Player quad, textured with the sprite and tinted
pub fn player(frame: &Frame, tint: [f32; 4]) -> Vec<Vertex> {
    frame
        .items
        .iter()
        .filter(|item| item.kind == EntityKind::Player)
        .flat_map(|item| quad(&item.bounds, tint))
        .collect()
}

/// Enemies and projectiles, in frame order
pub fn world(frame: &Frame) -> Vec<Vertex> {
    frame
        .items
        .iter()
        .filter_map(|item| match item.kind {
            EntityKind::Player => None,
            EntityKind::Enemy => Some(quad(&item.bounds, colors::ENEMY)),
            EntityKind::Projectile => Some(quad(&item.bounds, colors::PROJECTILE)),
        })
        .flatten()
        .collect()
}

/// Red outline with a green fill proportional to health
pub fn health_bar(bar: &HealthBar) -> Vec<Vertex> {
    let mut vertices = outline(&bar.outline(), OUTLINE_WIDTH, colors::HEALTH_OUTLINE);
    if bar.fill_width() > 0.0 {
        vertices.extend(quad(&bar.fill(), colors::HEALTH_FILL));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::GameState;
    use glam::Vec2;

    #[test]
    fn test_quad_covers_rect() {
        let v = quad(&Rect::new(10.0, 20.0, 30.0, 40.0), colors::ENEMY);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_health_bar_empty_has_only_outline() {
        let mut bar = GameState::new(3, &Config::default(), Vec2::splat(128.0))
            .frame()
            .health_bar;
        assert_eq!(health_bar(&bar).len(), 4 * 6 + 6);
        bar.current = 0;
        assert_eq!(health_bar(&bar).len(), 4 * 6);
    }

    #[test]
    fn test_frame_split() {
        let state = GameState::new(3, &Config::default(), Vec2::splat(128.0));
        let frame = state.frame();
        assert_eq!(player(&frame, [1.0; 4]).len(), 6);
        assert_eq!(world(&frame).len(), state.enemies.len() * 6);
    }
}

//! Quad generation for sprites

use glam::Vec2;

use super::batch::DrawParams;
use super::vertex::SpriteVertex;
use crate::sim::Viewport;

/// Vertices per sprite quad (two triangles)
pub const QUAD_VERTICES: usize = 6;

/// Map a viewport point (origin top-left, +Y down) to normalized device coordinates
#[inline]
pub fn viewport_to_ndc(viewport: &Viewport, p: Vec2) -> Vec2 {
    Vec2::new(
        p.x / viewport.width * 2.0 - 1.0,
        1.0 - p.y / viewport.height * 2.0,
    )
}

/// Corner positions of a sprite in viewport space: top-left, top-right, bottom-left, bottom-right
pub fn sprite_corners(params: &DrawParams) -> [Vec2; 4] {
    let size = params.dest_size();
    [
        Vec2::ZERO,
        Vec2::new(size.x, 0.0),
        Vec2::new(0.0, size.y),
        size,
    ]
    .map(|c| params.position + c)
}

/// Two triangles covering the sprite, in NDC
pub fn sprite_quad(params: &DrawParams, viewport: &Viewport) -> [SpriteVertex; QUAD_VERTICES] {
    let [tl, tr, bl, br] = sprite_corners(params).map(|c| viewport_to_ndc(viewport, c));
    let color = params.tint.to_array();

    [
        SpriteVertex::new(tl.x, tl.y, 0.0, 0.0, color),
        SpriteVertex::new(bl.x, bl.y, 0.0, 1.0, color),
        SpriteVertex::new(tr.x, tr.y, 1.0, 0.0, color),
        SpriteVertex::new(tr.x, tr.y, 1.0, 0.0, color),
        SpriteVertex::new(bl.x, bl.y, 0.0, 1.0, color),
        SpriteVertex::new(br.x, br.y, 1.0, 1.0, color),
    ]
}

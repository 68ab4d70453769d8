//! Entity model: static sprites, bouncing sprites and the player
//!
//! Built by composition: a [`MovingEntity`] wraps an [`Entity`], a [`Player`]
//! wraps a [`MovingEntity`]. All three expose drawing through [`Draw`].

use glam::Vec2;

use super::input::{Key, KeyboardState};
use super::viewport::Viewport;
use crate::assets::SpriteHandle;
use crate::consts::PLAYER_SPEED;
use crate::renderer::{Color, DrawParams, SpriteBatch};

/// Depth layer every sprite is drawn on
pub const SPRITE_LAYER: f32 = 0.0;

/// Anything that can put itself on screen
pub trait Draw {
    fn draw(&self, batch: &mut dyn SpriteBatch);
}

/// A sprite at a fixed position
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub sprite: SpriteHandle,
    pub pos: Vec2,
    pub scale: f32,
}

impl Entity {
    pub fn new(sprite: SpriteHandle, pos: Vec2, scale: f32) -> Self {
        debug_assert!(scale > 0.0, "entity scale must be positive, got {scale}");
        Self { sprite, pos, scale }
    }

    /// Source size times scale
    #[inline]
    pub fn rendered_size(&self) -> Vec2 {
        self.sprite.size() * self.scale
    }

    pub fn draw_params(&self) -> DrawParams {
        DrawParams {
            texture: self.sprite.id,
            source_size: self.sprite.size(),
            position: self.pos,
            scale: self.scale,
            tint: Color::WHITE,
            layer_depth: SPRITE_LAYER,
        }
    }
}

impl Draw for Entity {
    fn draw(&self, batch: &mut dyn SpriteBatch) {
        batch.draw(self.draw_params());
    }
}

/// A sprite that moves a fixed displacement per tick and bounces off the viewport edges
#[derive(Debug, Clone, PartialEq)]
pub struct MovingEntity {
    pub body: Entity,
    pub vel: Vec2,
}

impl MovingEntity {
    pub fn new(sprite: SpriteHandle, pos: Vec2, vel: Vec2, scale: f32) -> Self {
        Self {
            body: Entity::new(sprite, pos, scale),
            vel,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    /// Advance one tick: move, then bounce.
    ///
    /// The bounce runs against the post-move position on every tick, so an
    /// entity that stays in contact with an edge keeps flipping.
    pub fn update(&mut self, viewport: &Viewport) {
        self.body.pos += self.vel;
        self.vel = viewport.reflect(self.body.pos, self.body.rendered_size(), self.vel);
    }
}

impl Draw for MovingEntity {
    fn draw(&self, batch: &mut dyn SpriteBatch) {
        self.body.draw(batch);
    }
}

/// Keyboard-driven sprite. Not bounded by the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub mover: MovingEntity,
    pub speed: f32,
    keyboard: KeyboardState,
    prev_keyboard: KeyboardState,
}

impl Player {
    pub fn new(sprite: SpriteHandle, pos: Vec2, scale: f32) -> Self {
        Self::with_speed(sprite, pos, scale, PLAYER_SPEED)
    }

    pub fn with_speed(sprite: SpriteHandle, pos: Vec2, scale: f32, speed: f32) -> Self {
        Self {
            mover: MovingEntity::new(sprite, pos, Vec2::ZERO, scale),
            speed,
            keyboard: KeyboardState::empty(),
            prev_keyboard: KeyboardState::empty(),
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.mover.body.pos
    }

    #[inline]
    pub fn vel(&self) -> Vec2 {
        self.mover.vel
    }

    pub fn previous_keyboard(&self) -> KeyboardState {
        self.prev_keyboard
    }

    /// Held this tick but not the previous one
    pub fn just_pressed(&self, key: Key) -> bool {
        self.keyboard.is_down(key) && !self.prev_keyboard.is_down(key)
    }

    /// Advance one tick from a fresh keyboard snapshot.
    ///
    /// Velocity is rebuilt from scratch each tick: unit direction times speed.
    pub fn update(&mut self, keyboard: KeyboardState) {
        self.prev_keyboard = self.keyboard;
        self.keyboard = keyboard;

        self.mover.vel = self.keyboard.direction() * self.speed;
        self.mover.body.pos += self.mover.vel;
    }
}

impl Draw for Player {
    fn draw(&self, batch: &mut dyn SpriteBatch) {
        self.mover.draw(batch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::TextureId;
    use crate::renderer::RecordingBatch;
    use proptest::prelude::*;

    fn sprite(w: u32, h: u32) -> SpriteHandle {
        SpriteHandle {
            id: TextureId(7),
            width: w,
            height: h,
        }
    }

    #[test]
    fn test_left_edge_bounce() {
        let vp = Viewport::default();
        let mut e = MovingEntity::new(sprite(10, 10), Vec2::new(0.0, 500.0), Vec2::new(-2.0, 0.0), 1.0);
        e.update(&vp);
        assert_eq!(e.pos(), Vec2::new(-2.0, 500.0));
        assert_eq!(e.vel, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_right_edge_bounce_uses_rendered_width() {
        let vp = Viewport::default();
        let mut e = MovingEntity::new(sprite(100, 100), Vec2::new(1830.0, 500.0), Vec2::new(5.0, 0.0), 1.0);
        e.update(&vp);
        assert_eq!(e.pos(), Vec2::new(1835.0, 500.0));
        assert_eq!(e.vel, Vec2::new(-5.0, 0.0));
    }

    #[test]
    fn test_scale_shrinks_bounds() {
        let vp = Viewport::default();
        // 200px sprite at 0.5 scale is 100px wide: 1815 + 100 < 1920
        let mut e = MovingEntity::new(sprite(200, 200), Vec2::new(1810.0, 500.0), Vec2::new(5.0, 0.0), 0.5);
        e.update(&vp);
        assert_eq!(e.vel, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_bottom_edge_bounce() {
        let vp = Viewport::default();
        let mut e = MovingEntity::new(sprite(50, 80), Vec2::new(300.0, 997.0), Vec2::new(1.0, 3.0), 1.0);
        e.update(&vp);
        assert_eq!(e.pos(), Vec2::new(301.0, 1000.0));
        assert_eq!(e.vel, Vec2::new(1.0, -3.0));
    }

    #[test]
    fn test_resting_on_edge_oscillates() {
        let vp = Viewport::default();
        let mut e = MovingEntity::new(sprite(10, 10), Vec2::new(-1.0, 500.0), Vec2::new(1.0, 0.0), 1.0);
        // -1 + 1 = 0: still touching, flips to -1
        e.update(&vp);
        assert_eq!(e.pos().x, 0.0);
        assert_eq!(e.vel.x, -1.0);
        // 0 - 1 = -1: touching again, flips back
        e.update(&vp);
        assert_eq!(e.pos().x, -1.0);
        assert_eq!(e.vel.x, 1.0);
    }

    #[test]
    fn test_player_idle() {
        let mut p = Player::new(sprite(100, 100), Vec2::new(500.0, 500.0), 0.3);
        p.update(KeyboardState::empty());
        assert_eq!(p.vel(), Vec2::ZERO);
        assert_eq!(p.pos(), Vec2::new(500.0, 500.0));
    }

    #[test]
    fn test_player_up_right() {
        let mut p = Player::new(sprite(100, 100), Vec2::new(500.0, 500.0), 0.3);
        p.update(KeyboardState::with_keys(&[Key::W, Key::D]));
        let v = p.vel();
        assert!((v.length() - 6.0).abs() < 1e-5);
        assert!(v.x > 0.0 && v.y < 0.0);
        assert!((v.x + v.y).abs() < 1e-5, "45 degrees: |x| == |y|");
        assert_eq!(p.pos(), Vec2::new(500.0, 500.0) + v);
    }

    #[test]
    fn test_player_ignores_viewport() {
        let mut p = Player::new(sprite(100, 100), Vec2::new(2.0, 500.0), 1.0);
        let left = KeyboardState::with_keys(&[Key::Left]);
        p.update(left);
        p.update(left);
        assert_eq!(p.pos(), Vec2::new(-10.0, 500.0));
        assert_eq!(p.vel(), Vec2::new(-6.0, 0.0));
    }

    #[test]
    fn test_player_keeps_previous_snapshot() {
        let mut p = Player::new(sprite(1, 1), Vec2::ZERO, 1.0);
        p.update(KeyboardState::with_keys(&[Key::S]));
        assert!(p.just_pressed(Key::S));
        p.update(KeyboardState::with_keys(&[Key::S, Key::A]));
        assert!(!p.just_pressed(Key::S));
        assert!(p.just_pressed(Key::A));
        assert_eq!(p.previous_keyboard(), KeyboardState::with_keys(&[Key::S]));
    }

    #[test]
    fn test_draw_is_idempotent() {
        let p = Player::new(sprite(64, 32), Vec2::new(12.0, 34.0), 0.3);
        let mut batch = RecordingBatch::new();
        for _ in 0..3 {
            batch.begin();
            p.draw(&mut batch);
            batch.end();
        }
        let frames = batch.frames();
        assert_eq!(frames[0], frames[1]);
        assert_eq!(frames[1], frames[2]);

        let d = frames[0].draws[0];
        assert_eq!(d.position, Vec2::new(12.0, 34.0));
        assert_eq!(d.scale, 0.3);
        assert_eq!(d.tint, Color::WHITE);
        assert_eq!(d.layer_depth, SPRITE_LAYER);
    }

    proptest! {
        #[test]
        fn moving_update_adds_velocity(
            x in -100.0f32..2000.0,
            y in -100.0f32..1200.0,
            vx in -20.0f32..20.0,
            vy in -20.0f32..20.0,
            w in 1u32..400,
            h in 1u32..400,
            scale in 0.1f32..2.0,
        ) {
            let vp = Viewport::default();
            let mut e = MovingEntity::new(sprite(w, h), Vec2::new(x, y), Vec2::new(vx, vy), scale);
            e.update(&vp);
            let pos = e.pos();
            prop_assert_eq!(pos, Vec2::new(x, y) + Vec2::new(vx, vy));

            let size = Vec2::new(w as f32, h as f32) * scale;
            let hit_x = pos.x <= 0.0 || pos.x + size.x >= vp.width;
            let hit_y = pos.y <= 0.0 || pos.y + size.y >= vp.height;
            prop_assert_eq!(e.vel.x, if hit_x { -vx } else { vx });
            prop_assert_eq!(e.vel.y, if hit_y { -vy } else { vy });
        }

        #[test]
        fn player_speed_is_zero_or_six(mask in 0u8..=255) {
            let keys: Vec<Key> = Key::MOVEMENT
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, k)| *k)
                .collect();
            let kb = KeyboardState::with_keys(&keys);
            let mut p = Player::new(sprite(10, 10), Vec2::new(500.0, 500.0), 1.0);
            p.update(kb);
            let speed = p.vel().length();
            prop_assert!(speed == 0.0 || (speed - PLAYER_SPEED).abs() < 1e-5);
            prop_assert_eq!(speed == 0.0, kb.raw_direction() == Vec2::ZERO);
        }
    }
}

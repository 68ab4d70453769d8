//! Sprite batch abstraction
//!
//! The simulation only talks to a [`SpriteBatch`]; the wgpu renderer and the
//! in-memory [`RecordingBatch`] both implement it.

use glam::Vec2;

use crate::assets::TextureId;

/// Linear RGBA colour, components in 0..=1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour from 8-bit sRGB-style components
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self::rgba(
            rgb[0] as f32 / 255.0,
            rgb[1] as f32 / 255.0,
            rgb[2] as f32 / 255.0,
            1.0,
        )
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Everything needed to place one sprite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawParams {
    pub texture: TextureId,
    /// Source size in pixels (before scaling)
    pub source_size: Vec2,
    /// Top-left corner in viewport units
    pub position: Vec2,
    /// Uniform scale
    pub scale: f32,
    pub tint: Color,
    /// 0 = front, 1 = back
    pub layer_depth: f32,
}

impl DrawParams {
    /// On-screen size
    #[inline]
    pub fn dest_size(&self) -> Vec2 {
        self.source_size * self.scale
    }
}

/// Frame-scoped sprite submission
pub trait SpriteBatch {
    /// Fill the frame with a solid colour
    fn clear(&mut self, color: Color);
    /// Start collecting sprites for this frame
    fn begin(&mut self);
    /// Queue one sprite; must be called between `begin` and `end`
    fn draw(&mut self, params: DrawParams);
    /// Flush queued sprites in submission order
    fn end(&mut self);
}

/// One recorded frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordedFrame {
    pub clear: Option<Color>,
    pub draws: Vec<DrawParams>,
}

/// Keeps every submitted frame in memory
#[derive(Debug, Default)]
pub struct RecordingBatch {
    frames: Vec<RecordedFrame>,
    current: Option<RecordedFrame>,
    pending_clear: Option<Color>,
    /// Keep only the most recent frame
    keep_last_only: bool,
}

impl RecordingBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder that drops older frames, for long headless runs
    pub fn last_frame_only() -> Self {
        Self {
            keep_last_only: true,
            ..Self::default()
        }
    }

    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&RecordedFrame> {
        self.frames.last()
    }

    pub fn is_in_frame(&self) -> bool {
        self.current.is_some()
    }
}

impl SpriteBatch for RecordingBatch {
    fn clear(&mut self, color: Color) {
        self.pending_clear = Some(color);
    }

    fn begin(&mut self) {
        if self.current.is_some() {
            log::warn!("RecordingBatch::begin called twice without end");
        }
        self.current = Some(RecordedFrame {
            clear: self.pending_clear.take(),
            draws: Vec::new(),
        });
    }

    fn draw(&mut self, params: DrawParams) {
        match self.current.as_mut() {
            Some(frame) => frame.draws.push(params),
            None => log::warn!("RecordingBatch::draw outside begin/end, dropped"),
        }
    }

    fn end(&mut self) {
        if let Some(frame) = self.current.take() {
            if self.keep_last_only {
                self.frames.clear();
            }
            self.frames.push(frame);
        }
    }
}

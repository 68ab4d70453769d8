//! Keyboard snapshots and per-frame input

use glam::Vec2;

/// Logical keys the demo reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
    Escape,
}

impl Key {
    /// Every logical key, in bit order
    pub const ALL: [Key; 9] = [
        Key::W,
        Key::A,
        Key::S,
        Key::D,
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::Escape,
    ];

    /// The eight movement keys (WASD and arrows)
    pub const MOVEMENT: [Key; 8] = [
        Key::W,
        Key::A,
        Key::S,
        Key::D,
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
    ];

    #[inline]
    fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// Pressed/released state of every logical key at one instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardState {
    bits: u16,
}

impl KeyboardState {
    /// Snapshot with nothing held
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Snapshot with exactly the given keys held
    pub fn with_keys(keys: &[Key]) -> Self {
        let mut state = Self::empty();
        for &key in keys {
            state.press(key);
        }
        state
    }

    pub fn press(&mut self, key: Key) {
        self.bits |= key.bit();
    }

    pub fn release(&mut self, key: Key) {
        self.bits &= !key.bit();
    }

    /// Set a key's state from a key event
    pub fn set(&mut self, key: Key, down: bool) {
        if down {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    #[inline]
    pub fn is_down(&self, key: Key) -> bool {
        self.bits & key.bit() != 0
    }

    /// Keys currently held
    pub fn pressed(&self) -> impl Iterator<Item = Key> + '_ {
        Key::ALL.into_iter().filter(|&k| self.is_down(k))
    }

    /// Unnormalized direction from the four movement checks.
    ///
    /// Screen space: up is -Y, down is +Y. WASD and arrows are OR'd, so
    /// holding W and Up together still counts once.
    pub fn raw_direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.is_down(Key::W) || self.is_down(Key::Up) {
            dir.y -= 1.0;
        }
        if self.is_down(Key::S) || self.is_down(Key::Down) {
            dir.y += 1.0;
        }
        if self.is_down(Key::A) || self.is_down(Key::Left) {
            dir.x -= 1.0;
        }
        if self.is_down(Key::D) || self.is_down(Key::Right) {
            dir.x += 1.0;
        }
        dir
    }

    /// Unit-length movement direction, or zero when no net direction is held
    pub fn direction(&self) -> Vec2 {
        let dir = self.raw_direction();
        if dir.length() > 0.0 {
            dir.normalize()
        } else {
            dir
        }
    }
}

/// Input sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub keyboard: KeyboardState,
    /// Gamepad "Back" button
    pub gamepad_back: bool,
}

impl FrameInput {
    pub fn from_keys(keys: &[Key]) -> Self {
        Self {
            keyboard: KeyboardState::with_keys(keys),
            gamepad_back: false,
        }
    }

    /// Back/cancel signal: gamepad Back or Escape
    pub fn exit_requested(&self) -> bool {
        self.gamepad_back || self.keyboard.is_down(Key::Escape)
    }
}

// src/controls.rs

//! Platform-neutral input state. The windowing layer feeds key and pointer
//! events in with a millisecond clock; the simulation reads a
//! [`FrameInput`] snapshot once per tick.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Up,
    Left,
    Down,
    Right,
}

impl Key {
    pub const ALL: [Key; 5] = [Key::Space, Key::Up, Key::Left, Key::Down, Key::Right];

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    pub pressed: bool,
    pub double_tap: bool,
    /// Time of the last release that did not end a double tap.
    pub released_at_ms: Option<u64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerState {
    pub left: bool,
    pub right: bool,
}

/// What the ship sees this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub thrust: bool,
    pub left: bool,
    pub right: bool,
}

#[derive(Clone, Debug)]
pub struct Controls {
    keys: [KeyState; 5],
    pointer: PointerState,
    double_tap_ms: u64,
}

impl Controls {
    pub fn new(double_tap_ms: u64) -> Self {
        Self {
            keys: [KeyState::default(); 5],
            pointer: PointerState::default(),
            double_tap_ms,
        }
    }

    pub fn key(&self, key: Key) -> &KeyState {
        &self.keys[key.index()]
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn key_down(&mut self, key: Key, now_ms: u64) {
        let window = self.double_tap_ms;
        let state = &mut self.keys[key.index()];
        let quick_repeat = state
            .released_at_ms
            .is_some_and(|t| now_ms.saturating_sub(t) < window);
        state.double_tap = state.double_tap || quick_repeat;
        state.pressed = true;
    }

    pub fn key_up(&mut self, key: Key, now_ms: u64) {
        let state = &mut self.keys[key.index()];
        state.pressed = false;
        if state.double_tap {
            state.double_tap = false;
        } else {
            state.released_at_ms = Some(now_ms);
        }
    }

    /// Pointer press; the half of the window it lands in picks the side.
    pub fn pointer_down(&mut self, x: f32, window_width: f32) {
        if x < window_width / 2.0 {
            self.pointer.left = true;
        } else {
            self.pointer.right = true;
        }
    }

    pub fn pointer_up(&mut self) {
        self.pointer = PointerState::default();
    }

    /// Drops every held key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        for state in self.keys.iter_mut() {
            state.pressed = false;
        }
        self.pointer_up();
    }

    pub fn frame_input(&self) -> FrameInput {
        FrameInput {
            thrust: self.key(Key::Down).pressed,
            left: self.key(Key::Left).pressed || self.pointer.left,
            right: self.key(Key::Right).pressed || self.pointer.right,
        }
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(300)
    }
}

// src/engine_lib/controller.rs

use winit::{
    event::{ElementState, MouseButton, TouchPhase, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use drop_rescue::controls::{Controls, FrameInput, Key};

/// One-shot requests that act on the whole game rather than the ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    Reset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResponse {
    Ignored,
    Consumed,
    Command(Command),
}

pub fn key_for(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Space => Some(Key::Space),
        KeyCode::KeyW | KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::KeyA | KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::KeyS | KeyCode::ArrowDown => Some(Key::Down),
        KeyCode::KeyD | KeyCode::ArrowRight => Some(Key::Right),
        _ => None,
    }
}

pub fn command_for(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::KeyP => Some(Command::TogglePause),
        KeyCode::KeyR => Some(Command::Reset),
        _ => None,
    }
}

pub fn releases_pointer(event: &WindowEvent) -> bool {
    match event {
        WindowEvent::MouseInput { state: ElementState::Released, button: MouseButton::Left, .. } => true,
        WindowEvent::Touch(touch) => matches!(touch.phase, TouchPhase::Ended | TouchPhase::Cancelled),
        _ => false,
    }
}

/// Translates winit events into [`Controls`] state.
pub struct InputController {
    controls: Controls,
    cursor_x: f32,
}

impl InputController {
    pub fn new(double_tap_ms: u64) -> Self {
        Self {
            controls: Controls::new(double_tap_ms),
            cursor_x: 0.0,
        }
    }

    pub fn frame_input(&self) -> FrameInput {
        self.controls.frame_input()
    }

    /// For events another layer (the egui overlay) already consumed. Only
    /// releases get through, so a press that started on the game always ends.
    pub fn handle_consumed_event(&mut self, event: &WindowEvent) {
        if releases_pointer(event) {
            self.controls.pointer_up();
        }
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent, window_width: f32, now_ms: u64) -> InputResponse {
        match event {
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                let PhysicalKey::Code(code) = key_event.physical_key else {
                    return InputResponse::Ignored;
                };
                let pressed = key_event.state == ElementState::Pressed;
                if let Some(command) = command_for(code) {
                    return if pressed && !key_event.repeat {
                        InputResponse::Command(command)
                    } else {
                        InputResponse::Consumed
                    };
                }
                match key_for(code) {
                    Some(key) if pressed => {
                        // auto-repeat would otherwise look like a double tap
                        if !self.controls.key(key).pressed {
                            self.controls.key_down(key, now_ms);
                        }
                        InputResponse::Consumed
                    }
                    Some(key) => {
                        self.controls.key_up(key, now_ms);
                        InputResponse::Consumed
                    }
                    None => InputResponse::Ignored,
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_x = position.x as f32;
                InputResponse::Ignored
            }
            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                match state {
                    ElementState::Pressed => self.controls.pointer_down(self.cursor_x, window_width),
                    ElementState::Released => self.controls.pointer_up(),
                }
                InputResponse::Consumed
            }
            WindowEvent::Touch(touch) => {
                match touch.phase {
                    TouchPhase::Started => self.controls.pointer_down(touch.location.x as f32, window_width),
                    TouchPhase::Ended | TouchPhase::Cancelled => self.controls.pointer_up(),
                    TouchPhase::Moved => {}
                }
                InputResponse::Consumed
            }
            WindowEvent::Focused(false) => {
                self.controls.release_all();
                InputResponse::Ignored
            }
            _ => InputResponse::Ignored,
        }
    }
}

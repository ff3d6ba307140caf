use clap::ValueEnum;
use sawscope_core::{CapturePolicy, Pointer};
use sawscope_hand_udp::HandPosition;
use sdl2::{event::Event, keyboard::Scancode, mouse::MouseButton};

/// Which pointer drives the knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputSource {
    /// The hand tracker, with a pinch acting as the button.
    Hand,
    /// The mouse, with the left button.
    Mouse,
}

/// When a knob may be grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Capture {
    /// Any frame where the pointer is down inside the knob.
    WhileHeld,
    /// Only the frame where the pointer is first pressed.
    PressEdge,
}

impl From<Capture> for CapturePolicy {
    fn from(capture: Capture) -> Self {
        match capture {
            Capture::WhileHeld => Self::WhileHeld,
            Capture::PressEdge => Self::PressEdge,
        }
    }
}

#[derive(Debug, Default)]
pub struct InputState {
    mouse: Pointer,
    quit_requested: bool,
}

impl InputState {
    pub fn handle_event(&mut self, event: &Event) {
        match *event {
            Event::Quit { .. }
            | Event::KeyDown {
                scancode: Some(Scancode::Escape),
                ..
            } => self.request_quit(),
            Event::MouseButtonDown {
                mouse_btn: MouseButton::Left,
                x,
                y,
                ..
            } => self.set_mouse(x, y, true),
            Event::MouseButtonUp {
                mouse_btn: MouseButton::Left,
                x,
                y,
                ..
            } => self.set_mouse(x, y, false),
            Event::MouseMotion { x, y, .. } => {
                self.set_mouse(x, y, self.mouse.down)
            }
            _ => (),
        }
    }

    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn set_mouse(&mut self, x: i32, y: i32, down: bool) {
        self.mouse = Pointer { x, y, down };
    }

    pub fn pointer(&self, source: InputSource, hand: &HandPosition) -> Pointer {
        match source {
            InputSource::Hand => hand.pointer(),
            InputSource::Mouse => self.mouse,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use sawscope_hand_udp::Datagram;
    use sdl2::mouse::MouseState;

    #[test]
    fn motion_keeps_button_state() {
        let mut input = InputState::default();
        let hand = HandPosition::new();
        input.set_mouse(10, 10, true);
        input.handle_event(&Event::MouseMotion {
            timestamp: 0,
            window_id: 0,
            which: 0,
            mousestate: MouseState::from_sdl_state(0),
            x: 20,
            y: 5,
            xrel: 10,
            yrel: -5,
        });
        assert_eq!(
            input.pointer(InputSource::Mouse, &hand),
            Pointer {
                x: 20,
                y: 5,
                down: true
            }
        );
    }

    #[test]
    fn pointer_follows_selected_source() {
        let mut input = InputState::default();
        input.set_mouse(1, 2, false);
        let hand = HandPosition::new();
        hand.apply(&Datagram {
            x: 300,
            y: 400,
            pinch: Some(true),
        });
        assert_eq!(
            input.pointer(InputSource::Hand, &hand),
            Pointer {
                x: 300,
                y: 400,
                down: true
            }
        );
        assert_eq!(
            input.pointer(InputSource::Mouse, &hand),
            Pointer {
                x: 1,
                y: 2,
                down: false
            }
        );
    }

    #[test]
    fn quit_is_sticky() {
        let mut input = InputState::default();
        assert!(!input.quit_requested());
        input.request_quit();
        input.set_mouse(0, 0, false);
        assert!(input.quit_requested());
    }
}

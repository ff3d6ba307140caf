use crate::datagram::Datagram;
use sawscope_core::Pointer;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

/// The most recent hand position, shared between the thread receiving datagrams and the thread
/// reading them. Each field is updated independently so a reader may briefly see a new x with
/// an old y.
#[derive(Debug, Default)]
pub struct HandPosition {
    x: AtomicI32,
    y: AtomicI32,
    pinch: AtomicBool,
}

impl HandPosition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&self, datagram: &Datagram) {
        self.x.store(datagram.x, Ordering::Relaxed);
        self.y.store(datagram.y, Ordering::Relaxed);
        if let Some(pinch) = datagram.pinch {
            self.pinch.store(pinch, Ordering::Relaxed);
        }
    }

    pub fn x(&self) -> i32 {
        self.x.load(Ordering::Relaxed)
    }

    pub fn y(&self) -> i32 {
        self.y.load(Ordering::Relaxed)
    }

    pub fn pinch(&self) -> bool {
        self.pinch.load(Ordering::Relaxed)
    }

    /// The hand as a pointer, with pinching treated as the button being held.
    pub fn pointer(&self) -> Pointer {
        Pointer {
            x: self.x(),
            y: self.y(),
            down: self.pinch(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::datagram::parse_datagram;

    fn apply_str(position: &HandPosition, s: &str) {
        if let Some(datagram) = parse_datagram(s.as_bytes()) {
            position.apply(&datagram);
        }
    }

    #[test]
    fn starts_at_origin_not_pinching() {
        assert_eq!(HandPosition::new().pointer(), Pointer::default());
    }

    #[test]
    fn malformed_message_keeps_previous_position() {
        let position = HandPosition::new();
        apply_str(&position, "10,20,1");
        apply_str(&position, "abc");
        assert_eq!(
            position.pointer(),
            Pointer {
                x: 10,
                y: 20,
                down: true
            }
        );
    }

    #[test]
    fn message_without_pinch_keeps_pinch() {
        let position = HandPosition::new();
        apply_str(&position, "10,20,1");
        apply_str(&position, "100,200");
        assert_eq!(
            position.pointer(),
            Pointer {
                x: 100,
                y: 200,
                down: true
            }
        );
        apply_str(&position, "5,6,0");
        apply_str(&position, "7,8");
        assert!(!position.pinch());
    }
}

use std::f32::consts::PI;

pub const KNOB_RADIUS_PX: f32 = 30.0;

// Dragging the full height of this many pixels sweeps the entire range.
const DRAG_RANGE_PX: f32 = 100.0;

const SWEEP_RADS: f32 = PI * 1.6;

/// When a knob is allowed to grab the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapturePolicy {
    /// Capture whenever the pointer is held down inside the knob, including when a held pointer
    /// moves onto the knob.
    #[default]
    WhileHeld,
    /// Capture only on the update where the pointer is first pressed.
    PressEdge,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging { start_y: f32, start_value: f32 },
}

/// A rotary control dragged vertically with a pointer.
#[derive(Debug, Clone)]
pub struct Knob {
    label: String,
    centre_x: f32,
    centre_y: f32,
    min: f32,
    max: f32,
    value: f32,
    radius_px: f32,
    capture: CapturePolicy,
    drag: DragState,
    pointer_was_down: bool,
}

impl Knob {
    pub fn new(
        label: impl Into<String>,
        (centre_x, centre_y): (f32, f32),
        (min, max): (f32, f32),
        initial_value: f32,
        capture: CapturePolicy,
    ) -> anyhow::Result<Self> {
        if !(min.is_finite() && max.is_finite() && min <= max) {
            anyhow::bail!("invalid knob range: {min}..{max}");
        }
        if initial_value.is_nan() {
            anyhow::bail!("knob initial value is NaN");
        }
        Ok(Self {
            label: label.into(),
            centre_x,
            centre_y,
            min,
            max,
            value: initial_value.clamp(min, max),
            radius_px: KNOB_RADIUS_PX,
            capture,
            drag: DragState::Idle,
            pointer_was_down: false,
        })
    }

    fn contains(&self, x: f32, y: f32) -> bool {
        let dx = x - self.centre_x;
        let dy = y - self.centre_y;
        ((dx * dx) + (dy * dy)).sqrt() <= self.radius_px
    }

    pub fn update(
        &mut self,
        pointer_x: i32,
        pointer_y: i32,
        pointer_down: bool,
    ) {
        let x = pointer_x as f32;
        let y = pointer_y as f32;
        let pressed_now = pointer_down && !self.pointer_was_down;
        self.pointer_was_down = pointer_down;
        let may_capture = match self.capture {
            CapturePolicy::WhileHeld => pointer_down,
            CapturePolicy::PressEdge => pressed_now,
        };
        if may_capture && self.drag == DragState::Idle && self.contains(x, y) {
            self.drag = DragState::Dragging {
                start_y: y,
                start_value: self.value,
            };
        }
        if let DragState::Dragging {
            start_y,
            start_value,
        } = self.drag
        {
            if pointer_down {
                // Moving up increases the value.
                let sensitivity = (self.max - self.min) / DRAG_RANGE_PX;
                self.value = (start_value + ((start_y - y) * sensitivity))
                    .clamp(self.min, self.max);
            } else {
                self.drag = DragState::Idle;
            }
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn value_01(&self) -> f32 {
        let range = self.max - self.min;
        if range > 0.0 {
            (self.value - self.min) / range
        } else {
            0.0
        }
    }

    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    pub fn centre(&self) -> (f32, f32) {
        (self.centre_x, self.centre_y)
    }

    pub fn radius_px(&self) -> f32 {
        self.radius_px
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Angle of the value indicator in screen coordinates (y down). The knob sweeps 288 degrees
    /// clockwise, leaving a gap on its left side.
    pub fn indicator_angle_rads(&self) -> f32 {
        (self.value_01() * SWEEP_RADS) - (SWEEP_RADS / 2.0)
    }

    /// Large ranges are shown as whole numbers, small ones with two decimal places.
    pub fn value_text(&self) -> String {
        if self.max > 100.0 {
            format!("{:.0}", self.value)
        } else {
            format!("{:.2}", self.value)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn frequency_knob(capture: CapturePolicy) -> Knob {
        Knob::new(
            "Frequency",
            (150.0, 540.0),
            (50.0, 2000.0),
            440.0,
            capture,
        )
        .unwrap()
    }

    #[test]
    fn rejects_inverted_range() {
        assert!(
            Knob::new("x", (0.0, 0.0), (1.0, 0.0), 0.5, Default::default())
                .is_err()
        );
    }

    #[test]
    fn initial_value_is_clamped() {
        let knob =
            Knob::new("x", (0.0, 0.0), (0.0, 1.0), 3.0, Default::default())
                .unwrap();
        assert_eq!(knob.value(), 1.0);
    }

    #[test]
    fn drag_up_increases_value() {
        let mut knob = frequency_knob(CapturePolicy::WhileHeld);
        knob.update(150, 540, true);
        assert_eq!(
            knob.drag_state(),
            DragState::Dragging {
                start_y: 540.0,
                start_value: 440.0
            }
        );
        // 10px of a 1950Hz range spread over 100px
        knob.update(150, 530, true);
        assert_eq!(knob.value(), 635.0);
    }

    #[test]
    fn drag_uses_start_of_drag_as_reference() {
        let mut knob = Knob::new(
            "Frequency",
            (150.0, 100.0),
            (50.0, 2000.0),
            440.0,
            Default::default(),
        )
        .unwrap();
        knob.update(150, 100, true);
        knob.update(150, 50, true);
        assert_eq!(knob.value(), 440.0 + (50.0 * 19.5));
        // far enough to hit the top of the range
        knob.update(150, -100, true);
        assert_eq!(knob.value(), 2000.0);
        knob.update(150, 1000, true);
        assert_eq!(knob.value(), 50.0);
    }

    #[test]
    fn release_freezes_value() {
        let mut knob = frequency_knob(CapturePolicy::WhileHeld);
        knob.update(150, 540, true);
        knob.update(150, 520, true);
        let value = knob.value();
        knob.update(150, 400, false);
        assert_eq!(knob.drag_state(), DragState::Idle);
        assert_eq!(knob.value(), value);
        // moving around without pressing changes nothing
        knob.update(150, 300, false);
        knob.update(400, 10, false);
        assert_eq!(knob.value(), value);
    }

    #[test]
    fn press_outside_does_not_capture() {
        let mut knob = frequency_knob(CapturePolicy::WhileHeld);
        knob.update(150 + 31, 540, true);
        assert!(!knob.is_dragging());
        knob.update(150, 540 + 30, true);
        assert!(knob.is_dragging());
    }

    #[test]
    fn held_pointer_entering_knob_captures_while_held() {
        let mut knob = frequency_knob(CapturePolicy::WhileHeld);
        knob.update(0, 0, true);
        knob.update(150, 540, true);
        assert!(knob.is_dragging());
    }

    #[test]
    fn held_pointer_entering_knob_is_ignored_with_press_edge() {
        let mut knob = frequency_knob(CapturePolicy::PressEdge);
        knob.update(0, 0, true);
        knob.update(150, 540, true);
        assert!(!knob.is_dragging());
        knob.update(150, 540, false);
        knob.update(150, 540, true);
        assert!(knob.is_dragging());
    }

    #[test]
    fn pressing_again_while_dragging_keeps_drag_origin() {
        let mut knob = frequency_knob(CapturePolicy::WhileHeld);
        knob.update(150, 540, true);
        knob.update(150, 530, true);
        knob.update(150, 530, true);
        assert_eq!(
            knob.drag_state(),
            DragState::Dragging {
                start_y: 540.0,
                start_value: 440.0
            }
        );
    }

    #[test]
    fn value_stays_in_range_for_any_trajectory() {
        // Deterministic pseudo-random walk over the whole window and beyond.
        let mut seed: u32 = 0x1234_5678;
        let mut next = || {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            seed
        };
        for capture in [CapturePolicy::WhileHeld, CapturePolicy::PressEdge] {
            let mut knob = frequency_knob(capture);
            for _ in 0..10_000 {
                let x = (next() % 400) as i32;
                let y = (next() % 4000) as i32 - 2000;
                let down = next() % 3 != 0;
                knob.update(x, y, down);
                let (min, max) = knob.range();
                assert!(knob.value() >= min && knob.value() <= max);
            }
        }
    }

    #[test]
    fn indicator_sweep() {
        let mut knob =
            Knob::new("Phase", (0.0, 0.0), (0.0, 1.0), 0.0, Default::default())
                .unwrap();
        assert!((knob.indicator_angle_rads() + (PI * 0.8)).abs() < 1e-5);
        knob.update(0, 0, true);
        knob.update(0, -100, true);
        assert_eq!(knob.value(), 1.0);
        assert!((knob.indicator_angle_rads() - (PI * 0.8)).abs() < 1e-5);
    }

    #[test]
    fn value_text_precision_depends_on_range() {
        let knob = frequency_knob(CapturePolicy::WhileHeld);
        assert_eq!(knob.value_text(), "440");
        let knob = Knob::new(
            "Amplitude",
            (0.0, 0.0),
            (0.0, 1.0),
            0.3,
            Default::default(),
        )
        .unwrap();
        assert_eq!(knob.value_text(), "0.30");
    }
}

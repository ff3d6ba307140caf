use crate::{
    knob::{CapturePolicy, Knob},
    oscillator::Params,
};

pub const KNOB_PANEL_HEIGHT_PX: u32 = 120;

/// Where the pointer is and whether it's pressed. Produced once per frame from either the mouse
/// or the hand tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pointer {
    pub x: i32,
    pub y: i32,
    pub down: bool,
}

/// The knobs that control the oscillator, laid out in a row along the control panel.
#[derive(Debug, Clone)]
pub struct KnobBank {
    pub frequency: Knob,
    pub phase_offset: Knob,
    pub amplitude: Knob,
}

impl KnobBank {
    pub fn new(
        window_height_px: u32,
        initial: Params,
        capture: CapturePolicy,
    ) -> anyhow::Result<Self> {
        let y =
            window_height_px.saturating_sub(KNOB_PANEL_HEIGHT_PX / 2) as f32;
        Ok(Self {
            frequency: Knob::new(
                "Frequency",
                (150.0, y),
                (50.0, 2000.0),
                initial.frequency_hz,
                capture,
            )?,
            phase_offset: Knob::new(
                "Phase",
                (350.0, y),
                (0.0, 1.0),
                initial.phase_offset_01,
                capture,
            )?,
            amplitude: Knob::new(
                "Amplitude",
                (550.0, y),
                (0.0, 1.0),
                initial.amplitude,
                capture,
            )?,
        })
    }

    pub fn update(&mut self, pointer: Pointer) {
        for knob in self.iter_mut() {
            knob.update(pointer.x, pointer.y, pointer.down);
        }
    }

    pub fn params(&self) -> Params {
        Params {
            frequency_hz: self.frequency.value(),
            phase_offset_01: self.phase_offset.value(),
            amplitude: self.amplitude.value(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Knob> {
        [&self.frequency, &self.phase_offset, &self.amplitude].into_iter()
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut Knob> {
        [
            &mut self.frequency,
            &mut self.phase_offset,
            &mut self.amplitude,
        ]
        .into_iter()
    }
}

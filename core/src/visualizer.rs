use crate::{history::History, oscillator::Oscillator};
use line_2d::Coord;

/// Maps history samples onto the waveform area of the window.
#[derive(Debug, Clone, Copy)]
pub struct WaveformView {
    pub width_px: u32,
    pub centre_y: i32,
    pub scale_y: f32,
}

impl WaveformView {
    /// A sample of 1.0 reaches 40% of the wave area's height above the centre line.
    pub fn new(width_px: u32, wave_area_height_px: u32) -> Self {
        Self {
            width_px,
            centre_y: wave_area_height_px as i32 / 2,
            scale_y: wave_area_height_px as f32 * 0.4,
        }
    }

    pub fn point(&self, index: usize, sample: f32, len: usize) -> Coord {
        Coord {
            x: ((index * self.width_px as usize) / len) as i32,
            y: (self.centre_y as f32 - (sample * self.scale_y)) as i32,
        }
    }
}

/// Screen coordinates of the most recent history, reused from frame to frame.
#[derive(Default)]
pub struct WaveformScratch {
    coords: Vec<Coord>,
}

impl WaveformScratch {
    pub fn update_from_history(
        &mut self,
        history: &History,
        view: &WaveformView,
    ) {
        let len = history.len();
        self.coords.clear();
        self.coords.extend(
            history
                .iter_chronological()
                .enumerate()
                .map(|(i, sample)| view.point(i, sample, len)),
        );
    }

    /// Converts the oscillator's history to coordinates under a single lock acquisition.
    pub fn update(&mut self, oscillator: &Oscillator, view: &WaveformView) {
        oscillator.with_history(|history| {
            self.update_from_history(history, view)
        });
    }

    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    /// The line segments joining each pair of adjacent samples, oldest first.
    pub fn segments(&self) -> impl Iterator<Item = (Coord, Coord)> + '_ {
        self.coords.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

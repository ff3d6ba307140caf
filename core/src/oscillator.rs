use crate::{
    generator::{advance_phase, generate},
    history::{Decimation, History},
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub const DEFAULT_HISTORY_LEN: usize = 800;
pub const DEFAULT_HISTORY_STRIDE: usize = 4;

/// The three values controlled from the user interface. They are always written together so
/// the audio thread never sees a half-updated set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    pub frequency_hz: f32,
    pub phase_offset_01: f32,
    pub amplitude: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            frequency_hz: 440.0,
            phase_offset_01: 0.0,
            amplitude: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OscillatorConfig {
    /// default: 800
    pub history_len: usize,
    /// Record one in every `history_stride` frames into the history. default: 4
    pub history_stride: usize,
    pub initial: Params,
}

impl Default for OscillatorConfig {
    fn default() -> Self {
        Self {
            history_len: DEFAULT_HISTORY_LEN,
            history_stride: DEFAULT_HISTORY_STRIDE,
            initial: Params::default(),
        }
    }
}

/// The phase wraps at most once per frame, so every frequency the oscillator
/// can be set to must be below the sample rate.
pub fn check_sample_rate(
    sample_rate_hz: u32,
    max_frequency_hz: f32,
) -> anyhow::Result<()> {
    if sample_rate_hz as f32 <= max_frequency_hz {
        anyhow::bail!(
            "sample rate must be above {max_frequency_hz}Hz (got {sample_rate_hz}Hz)"
        );
    }
    Ok(())
}

#[derive(Debug)]
pub struct OscillatorState {
    params: Params,
    phase_01: f32,
    history: History,
    decimation: Decimation,
}

impl OscillatorState {
    pub fn new(config: &OscillatorConfig) -> anyhow::Result<Self> {
        if config.history_len < 2 {
            anyhow::bail!(
                "history length must be at least 2 (got {})",
                config.history_len
            );
        }
        if config.history_stride == 0 {
            anyhow::bail!("history stride must be at least 1");
        }
        Ok(Self {
            params: config.initial,
            phase_01: 0.0,
            history: History::new(config.history_len),
            decimation: Decimation::new(config.history_stride),
        })
    }

    pub fn params(&self) -> Params {
        self.params
    }

    pub fn set_params(&mut self, params: Params) {
        self.params = params;
    }

    pub fn phase_01(&self) -> f32 {
        self.phase_01
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Computes the sample for the current frame and moves on to the next one.
    pub fn next_sample(&mut self, sample_rate_hz: f32) -> f32 {
        let Params {
            frequency_hz,
            phase_offset_01,
            amplitude,
        } = self.params;
        let sample = generate(self.phase_01, phase_offset_01, amplitude);
        if self.decimation.tick() {
            self.history.push(sample);
        }
        self.phase_01 =
            advance_phase(self.phase_01, frequency_hz, sample_rate_hz);
        sample
    }

    /// Fills an interleaved output buffer. Every channel of a frame gets the same sample. This
    /// runs on the audio thread so it must not allocate.
    pub fn render_interleaved(
        &mut self,
        out: &mut [f32],
        channels: usize,
        sample_rate_hz: f32,
    ) {
        if channels == 0 {
            return;
        }
        for frame in out.chunks_mut(channels) {
            let sample = self.next_sample(sample_rate_hz);
            frame.fill(sample);
        }
    }
}

/// Handle to oscillator state shared between the audio thread and the main thread. Cloning the
/// handle shares the same state.
#[derive(Debug, Clone)]
pub struct Oscillator(Arc<Mutex<OscillatorState>>);

impl Oscillator {
    pub fn new(config: &OscillatorConfig) -> anyhow::Result<Self> {
        Ok(Self(Arc::new(Mutex::new(OscillatorState::new(config)?))))
    }

    // Poisoning is ignored. The state is plain data.
    fn lock(&self) -> MutexGuard<'_, OscillatorState> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Renders a whole block under a single lock acquisition. Called from the audio callback.
    pub fn render_block(
        &self,
        out: &mut [f32],
        channels: usize,
        sample_rate_hz: f32,
    ) {
        self.lock().render_interleaved(out, channels, sample_rate_hz);
    }

    pub fn params(&self) -> Params {
        self.lock().params()
    }

    pub fn set_params(&self, params: Params) {
        self.lock().set_params(params);
    }

    /// Runs `f` on the history while holding the lock, so the samples it sees all come from the
    /// same moment in time.
    pub fn with_history<T>(&self, f: impl FnOnce(&History) -> T) -> T {
        f(self.lock().history())
    }
}

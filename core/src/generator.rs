//! The sawtooth generator. Everything here is a pure function of its arguments so it can be
//! called from the audio thread without touching any shared state.

/// Wraps a phase into the range [0, 1).
pub fn wrap_01(x: f32) -> f32 {
    let mut wrapped = x % 1.0;
    if wrapped < 0.0 {
        wrapped += 1.0;
    }
    // Adding 1 to a tiny negative number rounds to exactly 1.
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

/// A single sawtooth sample rising from `-amplitude` to `amplitude` over one period.
pub fn generate(phase_01: f32, phase_offset_01: f32, amplitude: f32) -> f32 {
    let adjusted_01 = wrap_01(phase_01 + phase_offset_01);
    ((2.0 * adjusted_01) - 1.0) * amplitude
}

/// Advances a phase by one frame. Only wraps once, so `frequency_hz` must be below
/// `sample_rate_hz`.
pub fn advance_phase(
    phase_01: f32,
    frequency_hz: f32,
    sample_rate_hz: f32,
) -> f32 {
    let next_phase_01 = phase_01 + (frequency_hz / sample_rate_hz);
    if next_phase_01 >= 1.0 {
        next_phase_01 - 1.0
    } else {
        next_phase_01
    }
}

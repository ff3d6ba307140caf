//! The parts of the sawscope synthesizer that are shared between the audio thread and the user
//! interface. Nothing in this crate talks to a sound card, a window or a socket.

mod controls;
mod generator;
mod history;
mod knob;
mod oscillator;
mod visualizer;

pub use controls::*;
pub use generator::*;
pub use history::*;
pub use knob::*;
pub use oscillator::*;
pub use visualizer::*;

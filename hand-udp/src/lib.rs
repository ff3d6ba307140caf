//! Hand tracking input for the sawscope synthesizer. A separate hand tracking process sends the
//! position of the index fingertip as a short text datagram, and this crate turns those into a
//! pointer that can drive the on-screen knobs.

mod client;
mod datagram;
mod listener;
mod position;

pub use client::*;
pub use datagram::*;
pub use listener::*;
pub use position::*;

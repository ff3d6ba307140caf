use sawscope_core::{Oscillator, OscillatorConfig, Params};
use sawscope_player::Player;
use std::{thread, time::Duration};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let oscillator = Oscillator::new(&OscillatorConfig::default())?;
    let player = Player::new()?;
    let stream = player.play(oscillator.clone(), Default::default())?;
    // Sweep up an octave, one semitone at a time.
    for semitone in 0..=12 {
        oscillator.set_params(Params {
            frequency_hz: 220.0 * 2_f32.powf(semitone as f32 / 12.0),
            ..oscillator.params()
        });
        thread::sleep(Duration::from_millis(250));
    }
    stream.stop()
}

use clap::Parser;
use sawscope_core::{
    DEFAULT_HISTORY_LEN, DEFAULT_HISTORY_STRIDE, KNOB_PANEL_HEIGHT_PX,
    KnobBank, Oscillator, OscillatorConfig, Params, WaveformScratch,
    WaveformView, check_sample_rate,
};
use sawscope_hand_udp::{DEFAULT_PORT, HandPosition, HandUdpListener};
use sawscope_player::Player;
use std::{
    fmt,
    net::Ipv4Addr,
    path::PathBuf,
    process::ExitCode,
    sync::Arc,
    time::Instant,
};

mod input;
mod scene;
mod window;

use input::{Capture, InputSource, InputState};
use scene::{Scene, TITLE};
use window::Window;

const WINDOW_WIDTH_PX: u32 = 1000;
const WINDOW_HEIGHT_PX: u32 = 600;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// UDP port to receive hand positions on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,
    #[arg(long, default_value_t = 44100)]
    sample_rate: u32,
    /// Number of frames rendered per audio callback
    #[arg(long, default_value_t = 256)]
    block_size: u32,
    /// Number of samples shown on the oscilloscope
    #[arg(long, default_value_t = DEFAULT_HISTORY_LEN)]
    history_len: usize,
    /// Record every nth sample for the oscilloscope
    #[arg(long, default_value_t = DEFAULT_HISTORY_STRIDE)]
    history_stride: usize,
    #[arg(long, value_enum, default_value_t = InputSource::Hand)]
    input: InputSource,
    #[arg(long, value_enum, default_value_t = Capture::WhileHeld)]
    capture: Capture,
    /// TTF font for labels. Without one, text is drawn as outline boxes.
    #[arg(long)]
    font: Option<PathBuf>,
    #[arg(long, default_value_t = 14)]
    font_size: u16,
}

/// A startup failure, tagged with the stage that failed.
enum Fatal {
    Config(anyhow::Error),
    Window(anyhow::Error),
    Audio(anyhow::Error),
    Listener(anyhow::Error),
}

impl Fatal {
    fn exit_code(&self) -> ExitCode {
        match self {
            Self::Window(_) => ExitCode::from(1),
            Self::Audio(_) => ExitCode::from(2),
            Self::Listener(_) => ExitCode::from(3),
            Self::Config(_) => ExitCode::from(4),
        }
    }
}

impl fmt::Display for Fatal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid configuration: {e:#}"),
            Self::Window(e) => write!(f, "failed to open window: {e:#}"),
            Self::Audio(e) => write!(f, "failed to start audio: {e:#}"),
            Self::Listener(e) => {
                write!(f, "failed to listen for hand positions: {e:#}")
            }
        }
    }
}

fn log_instructions(input: InputSource) {
    log::info!("{TITLE}");
    match input {
        InputSource::Hand => log::info!(
            "Move your index finger over a knob and pinch to grab it."
        ),
        InputSource::Mouse => {
            log::info!("Press the left mouse button over a knob to grab it.")
        }
    }
    log::info!("Drag up to increase the value and down to decrease it.");
    log::info!("Close the window or press Escape to quit.");
}

fn run(args: Args) -> Result<(), Fatal> {
    let oscillator_config = OscillatorConfig {
        history_len: args.history_len,
        history_stride: args.history_stride,
        initial: Params::default(),
    };
    let oscillator =
        Oscillator::new(&oscillator_config).map_err(Fatal::Config)?;
    let mut knobs = KnobBank::new(
        WINDOW_HEIGHT_PX,
        oscillator_config.initial,
        args.capture.into(),
    )
    .map_err(Fatal::Config)?;
    let (_, max_frequency_hz) = knobs.frequency.range();
    check_sample_rate(args.sample_rate, max_frequency_hz)
        .map_err(Fatal::Config)?;
    let mut window = Window::new(
        TITLE,
        WINDOW_WIDTH_PX,
        WINDOW_HEIGHT_PX,
        args.font.as_deref(),
        args.font_size,
    )
    .map_err(Fatal::Window)?;
    let player_config = sawscope_player::Config {
        sample_rate_hz: args.sample_rate,
        block_size_frames: args.block_size,
    };
    let stream = Player::new()
        .and_then(|player| player.play(oscillator.clone(), player_config))
        .map_err(Fatal::Audio)?;
    log_instructions(args.input);
    let hand = Arc::new(HandPosition::new());
    HandUdpListener::bind((Ipv4Addr::UNSPECIFIED, args.port))
        .and_then(|listener| listener.spawn(Arc::clone(&hand)))
        .map_err(Fatal::Listener)?;
    let view = WaveformView::new(
        window.width_px(),
        window.height_px() - KNOB_PANEL_HEIGHT_PX,
    );
    let mut waveform = WaveformScratch::default();
    let mut input = InputState::default();
    while !input.quit_requested() {
        window.wait_until_next_frame();
        for event in window.event_pump.poll_iter() {
            input.handle_event(&event);
        }
        let pointer = input.pointer(args.input, &hand);
        knobs.update(pointer);
        oscillator.set_params(knobs.params());
        waveform.update(&oscillator, &view);
        let scene = Scene {
            width_px: window.width_px(),
            height_px: window.height_px(),
            waveform: &waveform,
            knobs: &knobs,
            hand: (args.input == InputSource::Hand).then_some(pointer),
        };
        if let Err(e) = scene.render(&mut window.canvas, &window.text) {
            log::warn!("failed to render frame: {e}");
        }
        window.prev_tick_complete = Instant::now();
    }
    if let Err(e) = stream.stop() {
        log::warn!("failed to stop audio stream: {e}");
    }
    drop(window);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(fatal) => {
            log::error!("{fatal}");
            fatal.exit_code()
        }
    }
}

use cpal::{
    BufferSize, Device, OutputCallbackInfo, SampleFormat, SampleRate,
    StreamConfig, SupportedBufferSize,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use sawscope_core::Oscillator;

pub const NUM_CHANNELS: u16 = 2;

#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// default: 44100
    pub sample_rate_hz: u32,
    /// Number of frames the device is asked to request per callback. default: 256
    pub block_size_frames: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_rate_hz: 44100,
            block_size_frames: 256,
        }
    }
}

/// Picks the fixed block size closest to the one requested that the device supports.
fn choose_buffer_size(
    block_size_frames: u32,
    supported: &SupportedBufferSize,
) -> BufferSize {
    match supported {
        SupportedBufferSize::Range { min, max } => {
            let frame_count = if block_size_frames < *min {
                *min
            } else if block_size_frames > *max {
                *max
            } else {
                block_size_frames
            };
            BufferSize::Fixed(frame_count)
        }
        SupportedBufferSize::Unknown => BufferSize::Default,
    }
}

pub struct Player {
    device: Device,
}

impl Player {
    pub fn new() -> anyhow::Result<Self> {
        let host = cpal::default_host();
        log::info!("cpal host: {}", host.id().name());
        let device = host
            .default_output_device()
            .ok_or(anyhow::anyhow!("no output device"))?;
        if let Ok(name) = device.name() {
            log::info!("cpal device: {}", name);
        } else {
            log::info!("cpal device: (no name)");
        }
        Ok(Self { device })
    }

    fn choose_config(&self, config: Config) -> anyhow::Result<StreamConfig> {
        let sample_rate = SampleRate(config.sample_rate_hz);
        let supported = self
            .device
            .supported_output_configs()?
            .find(|supported| {
                supported.channels() == NUM_CHANNELS
                    && supported.sample_format() == SampleFormat::F32
                    && supported.min_sample_rate() <= sample_rate
                    && supported.max_sample_rate() >= sample_rate
            })
            .ok_or(anyhow::anyhow!(
                "output device doesn't support {} channels of f32 samples at {}Hz",
                NUM_CHANNELS,
                config.sample_rate_hz
            ))?;
        Ok(StreamConfig {
            channels: NUM_CHANNELS,
            sample_rate,
            buffer_size: choose_buffer_size(
                config.block_size_frames,
                supported.buffer_size(),
            ),
        })
    }

    /// Starts rendering `oscillator` on the audio thread. Sound keeps playing until the returned
    /// stream is stopped or dropped.
    pub fn play(
        &self,
        oscillator: Oscillator,
        config: Config,
    ) -> anyhow::Result<PlayingStream> {
        let config = self.choose_config(config)?;
        log::info!("sample rate: {}", config.sample_rate.0);
        log::info!("num channels: {}", config.channels);
        log::info!("buffer size: {:?}", config.buffer_size);
        let channels = config.channels as usize;
        let sample_rate_hz = config.sample_rate.0 as f32;
        let stream = self.device.build_output_stream(
            &config,
            move |data: &mut [f32], _: &OutputCallbackInfo| {
                oscillator.render_block(data, channels, sample_rate_hz);
            },
            |err| log::error!("stream error: {}", err),
            None,
        )?;
        stream.play()?;
        Ok(PlayingStream { stream })
    }
}

pub struct PlayingStream {
    stream: cpal::Stream,
}

impl PlayingStream {
    pub fn stop(self) -> anyhow::Result<()> {
        self.stream.pause()?;
        log::info!("audio stream stopped");
        Ok(())
    }
}

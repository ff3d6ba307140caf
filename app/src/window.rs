use anyhow::anyhow;
use sawscope_window_utils::{font::load_font, text::TextRenderer};
use sdl2::{
    EventPump,
    render::{BlendMode, Canvas},
    video::Window as SdlWindow,
};
use std::{
    path::Path,
    thread,
    time::{Duration, Instant},
};

const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / 60);

pub struct Window {
    pub canvas: Canvas<SdlWindow>,
    pub event_pump: EventPump,
    pub text: TextRenderer,
    pub prev_tick_complete: Instant,
    width_px: u32,
    height_px: u32,
}

impl Window {
    /// Opens a centred window. If the font fails to load, text is drawn as
    /// placeholder boxes instead.
    pub fn new(
        title: &str,
        width_px: u32,
        height_px: u32,
        font_path: Option<&Path>,
        font_pt_size: u16,
    ) -> anyhow::Result<Self> {
        let sdl_context = sdl2::init().map_err(|e| anyhow!(e))?;
        let video_subsystem = sdl_context.video().map_err(|e| anyhow!(e))?;
        let window = video_subsystem
            .window(title, width_px, height_px)
            .position_centered()
            .build()?;
        let mut canvas = window
            .into_canvas()
            .target_texture()
            .present_vsync()
            .build()?;
        canvas.set_blend_mode(BlendMode::Blend);
        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump().map_err(|e| anyhow!(e))?;
        let font =
            font_path.and_then(|path| match load_font(path, font_pt_size) {
                Ok(font) => Some(font),
                Err(e) => {
                    log::warn!("Failed to load font, using placeholders: {e}");
                    None
                }
            });
        let text = TextRenderer::new(font, texture_creator);
        if !text.has_font() {
            log::info!("No font loaded. Text will be drawn as outline boxes.");
        }
        Ok(Self {
            canvas,
            event_pump,
            text,
            prev_tick_complete: Instant::now(),
            width_px,
            height_px,
        })
    }

    pub fn wait_until_next_frame(&self) {
        if let Some(period_to_sleep) = (self.prev_tick_complete
            + FRAME_DURATION)
            .checked_duration_since(Instant::now())
        {
            thread::sleep(period_to_sleep);
        }
    }

    pub fn width_px(&self) -> u32 {
        self.width_px
    }

    pub fn height_px(&self) -> u32 {
        self.height_px
    }
}

use anyhow::anyhow;
use line_2d::Coord;
use rgb_int::Rgb24;
use sawscope_core::{
    KNOB_PANEL_HEIGHT_PX, Knob, KnobBank, Pointer, WaveformScratch,
};
use sawscope_window_utils::text::TextRenderer;
use sdl2::{
    gfx::primitives::DrawRenderer, pixels::Color, rect::Rect, render::Canvas,
    video::Window as SdlWindow,
};

pub const TITLE: &str = "Sawtooth Wave Generator with Controls";

const NUM_GRID_COLUMNS: i32 = 10;
const NUM_GRID_ROWS: i32 = 8;
const INDICATOR_DOT_RADIUS_PX: i16 = 4;
const INDICATOR_DOT_INSET_PX: f32 = 8.0;
const HAND_INDICATOR_RADIUS_PX: i16 = 25;

const BACKGROUND: Rgb24 = grey(0);
const TEXT: Rgb24 = grey(255);
const GRID: Rgb24 = grey(64);
const SEPARATOR: Rgb24 = grey(128);
const WAVE: Rgb24 = rgb(255, 0, 0);
const PANEL: Rgb24 = grey(30);
const KNOB_BASE: Rgb24 = grey(60);
const KNOB_OUTLINE: Rgb24 = grey(200);
const KNOB_INDICATOR: Rgb24 = rgb(255, 100, 100);
const HAND_OPEN: Rgb24 = rgb(0, 200, 255);
const HAND_OPEN_ALPHA: u8 = 100;
const HAND_PINCHED: Rgb24 = rgb(255, 80, 180);
const HAND_PINCHED_ALPHA: u8 = 120;

const fn rgb(r: u8, g: u8, b: u8) -> Rgb24 {
    Rgb24 { r, g, b }
}

const fn grey(c: u8) -> Rgb24 {
    rgb(c, c, c)
}

fn color(rgb24: Rgb24) -> Color {
    Color::RGB(rgb24.r, rgb24.g, rgb24.b)
}

fn color_alpha(rgb24: Rgb24, alpha: u8) -> Color {
    Color::RGBA(rgb24.r, rgb24.g, rgb24.b, alpha)
}

// The gfx primitives take i16 coordinates.
fn to_i16(x: i32) -> i16 {
    x.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

// The waveform is a 1px line.
fn wave_pixel(Coord { x, y }: Coord) -> Rect {
    Rect::new(x, y, 1, 1)
}

fn wave_area_height_px(height_px: u32) -> u32 {
    height_px.saturating_sub(KNOB_PANEL_HEIGHT_PX)
}

/// Everything that gets drawn in a single frame.
pub struct Scene<'a> {
    pub width_px: u32,
    pub height_px: u32,
    pub waveform: &'a WaveformScratch,
    pub knobs: &'a KnobBank,
    /// Where to draw the hand indicator, if the hand is driving the knobs.
    pub hand: Option<Pointer>,
}

impl<'a> Scene<'a> {
    pub fn render(
        &self,
        canvas: &mut Canvas<SdlWindow>,
        text: &TextRenderer,
    ) -> anyhow::Result<()> {
        canvas.set_draw_color(color(BACKGROUND));
        canvas.clear();
        self.render_grid(canvas)?;
        self.render_waveform(canvas)?;
        self.render_panel(canvas)?;
        for knob in self.knobs.iter() {
            render_knob(canvas, text, knob)?;
        }
        text.draw(canvas, TITLE, 10, 10, color(TEXT))?;
        if let Some(hand) = self.hand {
            render_hand(canvas, hand)?;
        }
        canvas.present();
        Ok(())
    }

    fn render_grid(
        &self,
        canvas: &mut Canvas<SdlWindow>,
    ) -> anyhow::Result<()> {
        let width = self.width_px as i32;
        let wave_height = wave_area_height_px(self.height_px) as i32;
        canvas.set_draw_color(color(GRID));
        for i in 0..=NUM_GRID_COLUMNS {
            let x = (i * width) / NUM_GRID_COLUMNS;
            canvas
                .draw_line((x, 0), (x, wave_height))
                .map_err(|e| anyhow!("{e}"))?;
        }
        for i in 0..=NUM_GRID_ROWS {
            let y = (i * wave_height) / NUM_GRID_ROWS;
            canvas
                .draw_line((0, y), (width, y))
                .map_err(|e| anyhow!("{e}"))?;
        }
        Ok(())
    }

    fn render_waveform(
        &self,
        canvas: &mut Canvas<SdlWindow>,
    ) -> anyhow::Result<()> {
        canvas.set_draw_color(color(WAVE));
        for (start, end) in self.waveform.segments() {
            for coord in line_2d::coords_between(start, end) {
                canvas
                    .fill_rect(wave_pixel(coord))
                    .map_err(|e| anyhow!("{e}"))?;
            }
        }
        Ok(())
    }

    fn render_panel(
        &self,
        canvas: &mut Canvas<SdlWindow>,
    ) -> anyhow::Result<()> {
        let top = wave_area_height_px(self.height_px) as i32;
        canvas.set_draw_color(color(PANEL));
        canvas
            .fill_rect(Rect::new(0, top, self.width_px, KNOB_PANEL_HEIGHT_PX))
            .map_err(|e| anyhow!("{e}"))?;
        canvas.set_draw_color(color(SEPARATOR));
        canvas
            .draw_line((0, top), (self.width_px as i32, top))
            .map_err(|e| anyhow!("{e}"))?;
        Ok(())
    }
}

fn render_knob(
    canvas: &mut Canvas<SdlWindow>,
    text: &TextRenderer,
    knob: &Knob,
) -> anyhow::Result<()> {
    let (centre_x, centre_y) = knob.centre();
    let radius = knob.radius_px();
    let (cx, cy) = (centre_x as i32, centre_y as i32);
    let r = radius as i32;
    canvas
        .filled_circle(to_i16(cx), to_i16(cy), to_i16(r), color(KNOB_BASE))
        .map_err(|e| anyhow!("{e}"))?;
    canvas
        .circle(to_i16(cx), to_i16(cy), to_i16(r), color(KNOB_OUTLINE))
        .map_err(|e| anyhow!("{e}"))?;
    let angle = knob.indicator_angle_rads();
    let dot_distance = radius - INDICATOR_DOT_INSET_PX;
    let dot_x = centre_x + angle.cos() * dot_distance;
    let dot_y = centre_y + angle.sin() * dot_distance;
    canvas
        .filled_circle(
            to_i16(dot_x as i32),
            to_i16(dot_y as i32),
            INDICATOR_DOT_RADIUS_PX,
            color(KNOB_INDICATOR),
        )
        .map_err(|e| anyhow!("{e}"))?;
    text.draw(canvas, knob.label(), cx - 25, cy + r + 10, color(TEXT))?;
    text.draw(
        canvas,
        &knob.value_text(),
        cx - 15,
        cy + r + 25,
        color(TEXT),
    )?;
    Ok(())
}

fn render_hand(
    canvas: &mut Canvas<SdlWindow>,
    hand: Pointer,
) -> anyhow::Result<()> {
    let fill = if hand.down {
        color_alpha(HAND_PINCHED, HAND_PINCHED_ALPHA)
    } else {
        color_alpha(HAND_OPEN, HAND_OPEN_ALPHA)
    };
    canvas
        .filled_circle(
            to_i16(hand.x),
            to_i16(hand.y),
            HAND_INDICATOR_RADIUS_PX,
            fill,
        )
        .map_err(|e| anyhow!("{e}"))?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn wave_area_leaves_room_for_panel() {
        assert_eq!(wave_area_height_px(600), 480);
        assert_eq!(wave_area_height_px(100), 0);
    }

    #[test]
    fn waveform_is_one_pixel_wide() {
        let rect = wave_pixel(Coord::new(10, 20));
        assert_eq!((rect.x(), rect.y()), (10, 20));
        assert_eq!((rect.width(), rect.height()), (1, 1));
    }

    #[test]
    fn gfx_coordinates_saturate() {
        assert_eq!(to_i16(100), 100);
        assert_eq!(to_i16(-5), -5);
        assert_eq!(to_i16(1_000_000), i16::MAX);
        assert_eq!(to_i16(-1_000_000), i16::MIN);
    }
}

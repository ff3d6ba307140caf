use crate::font::Font;
use anyhow::anyhow;
use sdl2::{
    pixels::Color,
    rect::Rect,
    render::{Canvas, TextureCreator},
    video::{Window, WindowContext},
};

// Size of each character's placeholder box when there is no font.
const PLACEHOLDER_CHAR_WIDTH_PX: u32 = 6;
const PLACEHOLDER_HEIGHT_PX: u32 = 10;

/// Draws text with a TTF font if one was loaded, and otherwise draws an outline box roughly the
/// size the text would have been.
pub struct TextRenderer {
    font: Option<Font<'static, 'static>>,
    texture_creator: TextureCreator<WindowContext>,
}

impl TextRenderer {
    pub fn new(
        font: Option<Font<'static, 'static>>,
        texture_creator: TextureCreator<WindowContext>,
    ) -> Self {
        Self {
            font,
            texture_creator,
        }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Draws `text` with its top left corner at (`x`, `y`).
    pub fn draw(
        &self,
        canvas: &mut Canvas<Window>,
        text: &str,
        x: i32,
        y: i32,
        color: Color,
    ) -> anyhow::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        match self.font.as_ref() {
            Some(font) => {
                let text_surface = font
                    .render(text)
                    .blended(color)
                    .map_err(|e| anyhow!("{e}"))?;
                let text_texture =
                    text_surface.as_texture(&self.texture_creator)?;
                let text_texture_query = text_texture.query();
                let text_rect = Rect::new(
                    x,
                    y,
                    text_texture_query.width,
                    text_texture_query.height,
                );
                canvas
                    .copy(&text_texture, None, Some(text_rect))
                    .map_err(|e| anyhow!("{e}"))?;
            }
            None => {
                canvas.set_draw_color(color);
                let rect = Rect::new(
                    x,
                    y,
                    text.chars().count() as u32 * PLACEHOLDER_CHAR_WIDTH_PX,
                    PLACEHOLDER_HEIGHT_PX,
                );
                canvas.draw_rect(rect).map_err(|e| anyhow!("{e}"))?;
            }
        }
        Ok(())
    }
}

use super::geometry::{Point, Rect, Size};

/// sRGB RGBA color.
pub type Color = [f32; 4];

/// Text extent query used by measuring widgets.
pub trait TextMeasure {
    fn measure_text(&self, text: &str) -> Size;
}

/// Rendering backend the skin draws through. Coordinates are canvas space.
pub trait Renderer {
    /// Restrict subsequent drawing to `clip`.
    fn set_clip(&mut self, clip: Rect);
    fn draw_filled_rect(&mut self, rect: Rect, color: Color);
    /// One pixel outline.
    fn draw_lined_rect(&mut self, rect: Rect, color: Color);
    /// `uv` is (u1, v1, u2, v2) into the named texture.
    fn draw_textured_rect(&mut self, texture: &str, rect: Rect, uv: [f32; 4]);
    fn draw_text(&mut self, text: &str, at: Point, color: Color);
}

/// Monospace text metrics: every glyph is `glyph_width` wide, one line tall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedMetrics {
    pub glyph_width: i32,
    pub line_height: i32,
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self {
            glyph_width: 7,
            line_height: 14,
        }
    }
}

impl TextMeasure for FixedMetrics {
    fn measure_text(&self, text: &str) -> Size {
        let width = text.chars().count() as i32 * self.glyph_width;
        Size::new(width, self.line_height)
    }
}

/// Intermediate draw command for a solid or outlined rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCommand {
    pub rect: Rect,
    pub color: Color,
    pub filled: bool,
    pub clip: Rect,
}

/// Intermediate draw command for a text run.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    pub text: String,
    pub at: Point,
    pub color: Color,
    pub clip: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextureCommand {
    pub texture: String,
    pub rect: Rect,
    pub uv: [f32; 4],
    pub clip: Rect,
}

/// Collects draw commands from the widget tree.
/// Decouples widget logic from any real rendering backend.
pub struct DrawList {
    pub rects: Vec<RectCommand>,
    pub texts: Vec<TextCommand>,
    pub textures: Vec<TextureCommand>,
    pub metrics: FixedMetrics,
    clip: Rect,
}

impl DrawList {
    pub fn new() -> Self {
        Self::with_metrics(FixedMetrics::default())
    }

    pub fn with_metrics(metrics: FixedMetrics) -> Self {
        Self {
            rects: Vec::new(),
            texts: Vec::new(),
            textures: Vec::new(),
            metrics,
            clip: Rect::EMPTY,
        }
    }

    pub fn clear(&mut self) {
        self.rects.clear();
        self.texts.clear();
        self.textures.clear();
        self.clip = Rect::EMPTY;
    }

    pub fn command_count(&self) -> usize {
        self.rects.len() + self.texts.len() + self.textures.len()
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasure for DrawList {
    fn measure_text(&self, text: &str) -> Size {
        self.metrics.measure_text(text)
    }
}

impl Renderer for DrawList {
    fn set_clip(&mut self, clip: Rect) {
        self.clip = clip;
    }

    fn draw_filled_rect(&mut self, rect: Rect, color: Color) {
        self.rects.push(RectCommand {
            rect,
            color,
            filled: true,
            clip: self.clip,
        });
    }

    fn draw_lined_rect(&mut self, rect: Rect, color: Color) {
        self.rects.push(RectCommand {
            rect,
            color,
            filled: false,
            clip: self.clip,
        });
    }

    fn draw_textured_rect(&mut self, texture: &str, rect: Rect, uv: [f32; 4]) {
        self.textures.push(TextureCommand {
            texture: texture.to_string(),
            rect,
            uv,
            clip: self.clip,
        });
    }

    fn draw_text(&mut self, text: &str, at: Point, color: Color) {
        self.texts.push(TextCommand {
            text: text.to_string(),
            at,
            color,
            clip: self.clip,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_metrics_counts_chars_not_bytes() {
        let m = FixedMetrics {
            glyph_width: 6,
            line_height: 12,
        };
        assert_eq!(m.measure_text("abc"), Size::new(18, 12));
        assert_eq!(m.measure_text("é"), Size::new(6, 12));
        assert_eq!(m.measure_text(""), Size::new(0, 12));
    }

    #[test]
    fn commands_capture_current_clip() {
        let mut list = DrawList::new();
        list.set_clip(Rect::new(0, 0, 50, 50));
        list.draw_filled_rect(Rect::new(1, 1, 5, 5), [1.0; 4]);
        list.set_clip(Rect::new(10, 10, 5, 5));
        list.draw_text("hi", Point::new(10, 10), [0.0; 4]);

        assert_eq!(list.rects[0].clip, Rect::new(0, 0, 50, 50));
        assert_eq!(list.texts[0].clip, Rect::new(10, 10, 5, 5));
        assert_eq!(list.command_count(), 2);

        list.clear();
        assert_eq!(list.command_count(), 0);
    }
}

use serde::{Deserialize, Serialize};

use super::draw::{Color, FixedMetrics};

/// Centralized visual style constants.
///
/// Loaded from RON (`loading::load_theme`); any field missing from the file
/// keeps its default. Skins read colors from here instead of hardcoding them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    // -- Palette (sRGB RGBA) --
    /// Panel and page background.
    pub background: Color,
    /// Border of panels, docks and tables.
    pub border: Color,
    pub text: Color,
    /// Text of disabled controls.
    pub text_disabled: Color,
    /// Keyboard focus outline.
    pub focus: Color,

    // -- Buttons --
    pub button: Color,
    pub button_hover: Color,
    pub button_pressed: Color,
    /// Toggle buttons and check marks in the "on" state.
    pub button_checked: Color,

    // -- Tables and lists --
    pub row_selected: Color,
    /// Even rows when alternate coloring is on.
    pub row_alternate: Color,

    // -- Scroll bars and splitters --
    pub scroll_track: Color,
    pub scroll_bar: Color,
    pub scroll_bar_hover: Color,
    pub splitter: Color,

    // -- Tabs --
    pub tab_active: Color,
    pub tab_inactive: Color,

    // -- Dock drop highlight --
    /// Wash over the whole dock while a drag hovers it.
    pub dock_hover_wash: Color,
    /// Fill of the targeted drop region.
    pub dock_hover_fill: Color,
    /// Outline of the targeted drop region.
    pub dock_hover_outline: Color,

    // -- Text metrics --
    /// Advance of one glyph in pixels.
    pub glyph_width: i32,
    /// Height of one line of text in pixels.
    pub line_height: i32,
}

/// Convert a hex color (#RRGGBB) to sRGB [f32; 4] with alpha 1.0.
const fn hex(r: u8, g: u8, b: u8) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Convert a hex color with custom alpha.
const fn hex_a(r: u8, g: u8, b: u8, a: f32) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a]
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: hex(0xEC, 0xEC, 0xEC),
            border: hex(0x80, 0x80, 0x80),
            text: hex(0x1E, 0x1E, 0x1E),
            text_disabled: hex(0x9A, 0x9A, 0x9A),
            focus: hex(0x33, 0x7A, 0xCC),

            button: hex(0xD8, 0xD8, 0xD8),
            button_hover: hex(0xE6, 0xEE, 0xF8),
            button_pressed: hex(0xB4, 0xC8, 0xE0),
            button_checked: hex(0x5A, 0x8C, 0xC8),

            row_selected: hex(0x9C, 0xC4, 0xF0),
            row_alternate: hex_a(0x00, 0x00, 0x00, 0.05),

            scroll_track: hex(0xDC, 0xDC, 0xDC),
            scroll_bar: hex(0xA8, 0xA8, 0xA8),
            scroll_bar_hover: hex(0x8C, 0x8C, 0x8C),
            splitter: hex(0xC0, 0xC0, 0xC0),

            tab_active: hex(0xF8, 0xF8, 0xF8),
            tab_inactive: hex(0xC8, 0xC8, 0xC8),

            // Pale magenta at rising opacity.
            dock_hover_wash: hex_a(0xFF, 0xC8, 0xFF, 20.0 / 255.0),
            dock_hover_fill: hex_a(0xFF, 0xC8, 0xFF, 100.0 / 255.0),
            dock_hover_outline: hex_a(0xFF, 0xC8, 0xFF, 200.0 / 255.0),

            glyph_width: FixedMetrics::default().glyph_width,
            line_height: FixedMetrics::default().line_height,
        }
    }
}

impl Theme {
    /// Text metrics matching this theme's glyph box.
    pub fn metrics(&self) -> FixedMetrics {
        FixedMetrics {
            glyph_width: self.glyph_width.max(1),
            line_height: self.line_height.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_conversion() {
        let white = hex(0xFF, 0xFF, 0xFF);
        assert!((white[0] - 1.0).abs() < 0.001);
        assert!((white[1] - 1.0).abs() < 0.001);
        assert!((white[2] - 1.0).abs() < 0.001);
        assert!((white[3] - 1.0).abs() < 0.001);

        let black = hex(0x00, 0x00, 0x00);
        assert!(black[0].abs() < 0.001);
        assert!(black[1].abs() < 0.001);
        assert!(black[2].abs() < 0.001);

        let half_alpha = hex_a(0x80, 0x80, 0x80, 0.5);
        assert!((half_alpha[3] - 0.5).abs() < 0.001);
    }

    #[test]
    fn dock_highlight_grows_more_opaque() {
        let t = Theme::default();
        assert!(t.dock_hover_wash[3] < t.dock_hover_fill[3]);
        assert!(t.dock_hover_fill[3] < t.dock_hover_outline[3]);
        assert!(t.dock_hover_outline[3] < 1.0);
    }

    #[test]
    fn partial_ron_keeps_defaults() {
        let t: Theme = ron::from_str("(glyph_width: 8, text: (1.0, 0.0, 0.0, 1.0))").expect("parse");
        assert_eq!(t.glyph_width, 8);
        assert_eq!(t.text, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(t.line_height, Theme::default().line_height);
        assert_eq!(t.metrics().glyph_width, 8);
    }

    #[test]
    fn metrics_never_zero() {
        let t = Theme {
            glyph_width: 0,
            line_height: -3,
            ..Theme::default()
        };
        assert_eq!(t.metrics(), FixedMetrics { glyph_width: 1, line_height: 1 });
    }
}

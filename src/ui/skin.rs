//! Skins turn arranged widgets into renderer primitives.

use super::draw::{Color, Renderer};
use super::geometry::{Point, Rect};
use super::theme::Theme;
use super::widget::Widget;
use super::{WidgetId, WidgetNode, WidgetTree};

/// What a skin sees of one widget during a render pass.
pub struct ControlView<'a> {
    pub id: WidgetId,
    pub node: &'a WidgetNode,
    /// Canvas-space bounds.
    pub bounds: Rect,
    pub hovered: bool,
    pub pressed: bool,
    pub focused: bool,
    /// Checked toggle, selected row or current tab.
    pub active: bool,
}

/// Draws stock controls. Called exactly once per visible widget per render
/// pass, parents before children.
pub trait Skin {
    fn draw(&mut self, renderer: &mut dyn Renderer, view: &ControlView<'_>);

    /// Drawn after the widget's children.
    fn draw_overlay(&mut self, _renderer: &mut dyn Renderer, _view: &ControlView<'_>) {}
}

/// Flat skin drawing every control from `Theme` colors.
#[derive(Debug, Clone, Default)]
pub struct ThemedSkin {
    pub theme: Theme,
    /// Texture for check marks. Drawn as a filled rect when absent.
    pub check_texture: Option<String>,
}

impl ThemedSkin {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            check_texture: None,
        }
    }

    fn text_color(&self, view: &ControlView<'_>) -> Color {
        if view.node.disabled {
            self.theme.text_disabled
        } else {
            self.theme.text
        }
    }

    fn draw_text(&self, r: &mut dyn Renderer, view: &ControlView<'_>, text: &str) {
        let pad = view.node.padding;
        let at = Point::new(view.bounds.x + pad.left, view.bounds.y + pad.top);
        r.draw_text(text, at, self.text_color(view));
    }

    fn button_fill(&self, view: &ControlView<'_>) -> Color {
        let t = &self.theme;
        if view.pressed {
            t.button_pressed
        } else if view.active {
            t.button_checked
        } else if view.hovered && !view.node.disabled {
            t.button_hover
        } else {
            t.button
        }
    }

    fn draw_scroll_bar(&self, r: &mut dyn Renderer, view: &ControlView<'_>) {
        let Widget::ScrollBar(bar) = &view.node.widget else {
            return;
        };
        let b = view.bounds;
        r.draw_filled_rect(b, self.theme.scroll_track);

        let button = bar.button_size();
        let (first, last) = if b.width >= b.height {
            (
                Rect::new(b.x, b.y, button, b.height),
                Rect::new(b.right() - button, b.y, button, b.height),
            )
        } else {
            (
                Rect::new(b.x, b.y, b.width, button),
                Rect::new(b.x, b.bottom() - button, b.width, button),
            )
        };
        r.draw_filled_rect(first, self.theme.button);
        r.draw_filled_rect(last, self.theme.button);

        if !bar.is_bar_hidden() {
            let color = if view.hovered || bar.bar_held {
                self.theme.scroll_bar_hover
            } else {
                self.theme.scroll_bar
            };
            r.draw_filled_rect(bar.bar_rect().offset(b.origin()), color);
        }
    }
}

impl Skin for ThemedSkin {
    fn draw(&mut self, r: &mut dyn Renderer, view: &ControlView<'_>) {
        let t = &self.theme;
        match &view.node.widget {
            Widget::Label { text } => self.draw_text(r, view, text),
            Widget::Button { text, .. } => {
                r.draw_filled_rect(view.bounds, self.button_fill(view));
                r.draw_lined_rect(view.bounds, t.border);
                self.draw_text(r, view, text);
            }
            Widget::TabButton { text, .. } => {
                let fill = if view.active { t.tab_active } else { t.tab_inactive };
                r.draw_filled_rect(view.bounds, fill);
                r.draw_lined_rect(view.bounds, t.border);
                self.draw_text(r, view, text);
            }
            Widget::CheckBox { state } => {
                r.draw_filled_rect(view.bounds, t.background);
                r.draw_lined_rect(view.bounds, t.border);
                if state.on {
                    let mark = Rect::new(
                        view.bounds.x + 3,
                        view.bounds.y + 3,
                        view.bounds.width - 6,
                        view.bounds.height - 6,
                    );
                    match &self.check_texture {
                        Some(texture) => r.draw_textured_rect(texture, mark, [0.0, 0.0, 1.0, 1.0]),
                        None => r.draw_filled_rect(mark, t.button_checked),
                    }
                }
            }
            Widget::TableRow(row) => {
                if row.selected {
                    r.draw_filled_rect(view.bounds, t.row_selected);
                } else if row.even_row {
                    r.draw_filled_rect(view.bounds, t.row_alternate);
                }
            }
            Widget::ListBox(_) | Widget::ScrollControl(_) => {
                r.draw_filled_rect(view.bounds, t.background);
                r.draw_lined_rect(view.bounds, t.border);
            }
            Widget::ScrollBar(_) => self.draw_scroll_bar(r, view),
            Widget::SplitterBar | Widget::Resizer(_) => {
                r.draw_filled_rect(view.bounds, t.splitter);
            }
            Widget::TabControl(_) => r.draw_lined_rect(view.bounds, t.border),
            Widget::Panel
            | Widget::Stack(_)
            | Widget::Grid(_)
            | Widget::Table(_)
            | Widget::ScrollArea(_)
            | Widget::HorizontalSplitter(_)
            | Widget::Properties(_)
            | Widget::PropertyRow { .. }
            | Widget::Dock(_) => {}
        }
        if view.focused {
            r.draw_lined_rect(view.bounds, self.theme.focus);
        }
    }

    fn draw_overlay(&mut self, r: &mut dyn Renderer, view: &ControlView<'_>) {
        let Widget::Dock(dock) = &view.node.widget else {
            return;
        };
        if !dock.draw_hover {
            return;
        }
        r.draw_filled_rect(view.bounds, self.theme.dock_hover_wash);
        if dock.hover_rect.width == 0 {
            return;
        }
        let target = dock.hover_rect.offset(view.bounds.origin());
        r.draw_filled_rect(target, self.theme.dock_hover_fill);
        r.draw_lined_rect(target, self.theme.dock_hover_outline);
    }
}

impl WidgetTree {
    /// Whether the widget is in its "on" state for drawing.
    pub(super) fn is_active(&self, node: &WidgetNode) -> bool {
        match &node.widget {
            Widget::CheckBox { state } => state.on,
            Widget::Button { toggle, .. } => toggle.is_some_and(|t| t.on),
            Widget::TableRow(row) => row.selected,
            Widget::TabButton { page, .. } => self.get(*page).is_some_and(|p| !p.collapsed),
            _ => false,
        }
    }
}

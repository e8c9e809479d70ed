//! Scroll bars, the scrolling viewport, and the control combining them.

use super::error::UiError;
use super::events::Event;
use super::geometry::{INFINITY, Point, Rect, Size};
use super::widget::{Orientation, Widget};
use super::{WidgetId, WidgetTree};

/// Thickness of scroll bars, which is also the side of their end buttons.
pub const SCROLL_BAR_SIZE: i32 = 15;

/// Pixels moved per nudge when the track is not held.
const DEFAULT_NUDGE_PIXELS: f32 = 20.0;

// ---------------------------------------------------------------------------
// ScrollBar
// ---------------------------------------------------------------------------

/// Scroll bar state. Geometry is along the bar's own axis: `length` is its
/// extent in that direction, `button_size` its thickness (the end buttons
/// are square).
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollBar {
    pub orientation: Orientation,
    scroll_amount: f32,
    content_size: f32,
    viewable_size: f32,
    pub nudge_pixels: f32,
    bar_pos: i32,
    bar_size: i32,
    bar_hidden: bool,
    /// Track is held down: nudges jump a page.
    pub depressed: bool,
    /// Bar is being dragged: size updates leave its position alone.
    pub bar_held: bool,
    length: i32,
    button_size: i32,
}

impl ScrollBar {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            scroll_amount: 0.0,
            content_size: 0.0,
            viewable_size: 0.0,
            nudge_pixels: DEFAULT_NUDGE_PIXELS,
            bar_pos: SCROLL_BAR_SIZE,
            bar_size: 0,
            bar_hidden: true,
            depressed: false,
            bar_held: false,
            length: 0,
            button_size: SCROLL_BAR_SIZE,
        }
    }

    pub fn scroll_amount(&self) -> f32 {
        self.scroll_amount
    }

    pub fn bar_size(&self) -> i32 {
        self.bar_size
    }

    /// Bar offset from the start of the scroll bar, buttons included.
    pub fn bar_pos(&self) -> i32 {
        self.bar_pos
    }

    pub fn is_bar_hidden(&self) -> bool {
        self.bar_hidden
    }

    pub fn button_size(&self) -> i32 {
        self.button_size
    }

    pub fn length(&self) -> i32 {
        self.length
    }

    pub fn content_size(&self) -> f32 {
        self.content_size
    }

    pub fn viewable_size(&self) -> f32 {
        self.viewable_size
    }

    /// Adopt arranged geometry: length along the axis, thickness across.
    pub fn resize(&mut self, size: Size) {
        let (length, thickness) = match self.orientation {
            Orientation::Vertical => (size.height, size.width),
            Orientation::Horizontal => (size.width, size.height),
        };
        self.length = length;
        self.button_size = thickness;
        self.update_bar_size();
        self.set_scroll_amount(self.scroll_amount, true);
    }

    pub fn set_content_size(&mut self, content: f32, viewable: f32) {
        self.content_size = content;
        self.viewable_size = viewable;
        self.update_bar_size();
    }

    /// Recompute the bar extent from the viewable/content ratio.
    pub fn update_bar_size(&mut self) {
        let button = self.button_size as f32;
        let track = (self.length - self.button_size * 2) as f32;
        let mut bar = if self.content_size > 0.0 {
            self.viewable_size / self.content_size * track
        } else {
            0.0
        };
        if bar < button * 0.5 {
            bar = (button * 0.5).floor();
        }
        self.bar_size = bar as i32;
        self.bar_hidden = track <= bar;
        if !self.bar_held {
            self.set_scroll_amount(self.scroll_amount, true);
        }
    }

    /// Clamp `value` into `[0, 1]` and store it. Returns false when nothing
    /// changed and `force_update` is off. Forced updates also move the bar.
    pub fn set_scroll_amount(&mut self, value: f32, force_update: bool) -> bool {
        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        if value == self.scroll_amount && !force_update {
            return false;
        }
        self.scroll_amount = value;
        if force_update {
            let free = self.length - self.bar_size - self.button_size * 2;
            self.bar_pos = (self.button_size as f32 + value * free as f32) as i32;
        }
        true
    }

    /// Fraction implied by the current bar position.
    pub fn calculate_scrolled_amount(&self) -> f32 {
        let free = self.length - self.bar_size - self.button_size * 2;
        let value = (self.bar_pos - self.button_size) as f32 / free as f32;
        if value.is_finite() { value } else { 0.0 }
    }

    /// Move the bar by `delta` pixels inside the track. Returns whether the
    /// scroll amount changed.
    pub fn drag_bar_by(&mut self, delta: i32) -> bool {
        let max = (self.length - self.bar_size - self.button_size).max(self.button_size);
        self.bar_pos = (self.bar_pos + delta).clamp(self.button_size, max);
        self.set_scroll_amount(self.calculate_scrolled_amount(), false)
    }

    /// Fraction moved by one nudge: a page while the track is held, else
    /// `nudge_pixels` worth of content.
    pub fn nudge_amount(&self) -> f32 {
        let amount = if self.depressed {
            self.viewable_size / self.content_size
        } else {
            self.nudge_pixels / self.content_size
        };
        if amount.is_finite() { amount } else { 0.0 }
    }

    /// Step backwards (`-1`) or forwards (`1`).
    pub fn nudge(&mut self, direction: i32) -> bool {
        let target = self.scroll_amount + direction.signum() as f32 * self.nudge_amount();
        self.set_scroll_amount(target, true)
    }

    /// Bar rectangle in the scroll bar's local space.
    pub fn bar_rect(&self) -> Rect {
        match self.orientation {
            Orientation::Vertical => Rect::new(0, self.bar_pos, self.button_size, self.bar_size),
            Orientation::Horizontal => Rect::new(self.bar_pos, 0, self.bar_size, self.button_size),
        }
    }

    /// Position along the axis of a local point.
    pub fn axis_coord(&self, p: Point) -> i32 {
        match self.orientation {
            Orientation::Vertical => p.y,
            Orientation::Horizontal => p.x,
        }
    }
}

// ---------------------------------------------------------------------------
// ScrollArea / ScrollControl
// ---------------------------------------------------------------------------

/// Viewport of a scroll control; its only child is the scrolled content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollArea {
    pub can_scroll_h: bool,
    pub can_scroll_v: bool,
    /// Visible size from the last arrange.
    pub viewable: Size,
    /// Content offset from the last arrange (non-negative).
    pub scroll: Point,
}

impl Default for ScrollArea {
    fn default() -> Self {
        Self {
            can_scroll_h: true,
            can_scroll_v: true,
            viewable: Size::ZERO,
            scroll: Point::ZERO,
        }
    }
}

/// Parts of a scroll control: the viewport and both bars (children of the
/// control, in that order).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollControl {
    pub area: WidgetId,
    pub vbar: WidgetId,
    pub hbar: WidgetId,
    pub can_scroll_h: bool,
    pub can_scroll_v: bool,
    /// Hide a bar when the content fits along its axis.
    pub auto_hide_bars: bool,
}

impl WidgetTree {
    /// Scroll control with an empty content panel.
    pub fn add_scroll_control(&mut self, parent: WidgetId) -> Result<WidgetId, UiError> {
        let placeholder = ScrollControl {
            area: WidgetId::default(),
            vbar: WidgetId::default(),
            hbar: WidgetId::default(),
            can_scroll_h: true,
            can_scroll_v: true,
            auto_hide_bars: true,
        };
        let id = self.insert(parent, Widget::ScrollControl(placeholder))?;
        let parts = self.build_scroll_parts(id, true, true, true)?;
        self.add_panel(parts.area)?;
        if let Some(Widget::ScrollControl(sc)) = self.get_mut(id).map(|n| &mut n.widget) {
            *sc = parts;
        }
        Ok(id)
    }

    /// Create the viewport and both bars under `owner`.
    pub(super) fn build_scroll_parts(
        &mut self,
        owner: WidgetId,
        can_scroll_h: bool,
        can_scroll_v: bool,
        auto_hide_bars: bool,
    ) -> Result<ScrollControl, UiError> {
        let area = self.insert(
            owner,
            Widget::ScrollArea(ScrollArea {
                can_scroll_h,
                can_scroll_v,
                ..ScrollArea::default()
            }),
        )?;
        let vbar = self.insert(owner, Widget::ScrollBar(ScrollBar::new(Orientation::Vertical)))?;
        self.set_width(vbar, Some(SCROLL_BAR_SIZE))?;
        let hbar = self.insert(owner, Widget::ScrollBar(ScrollBar::new(Orientation::Horizontal)))?;
        self.set_height(hbar, Some(SCROLL_BAR_SIZE))?;
        Ok(ScrollControl {
            area,
            vbar,
            hbar,
            can_scroll_h,
            can_scroll_v,
            auto_hide_bars,
        })
    }

    /// Scroll parts of a scroll control or list box.
    pub fn scroll_parts(&self, id: WidgetId) -> Result<ScrollControl, UiError> {
        match self.get(id).map(|n| &n.widget) {
            Some(Widget::ScrollControl(sc)) => Ok(*sc),
            Some(Widget::ListBox(lb)) => Ok(lb.scroll),
            Some(_) => Err(UiError::WrongKind {
                id,
                expected: "scroll control",
            }),
            None => Err(UiError::StaleWidget(id)),
        }
    }

    fn scroll_parts_mut(&mut self, id: WidgetId) -> Result<&mut ScrollControl, UiError> {
        match self.get_mut(id).map(|n| &mut n.widget) {
            Some(Widget::ScrollControl(sc)) => Ok(sc),
            Some(Widget::ListBox(lb)) => Ok(&mut lb.scroll),
            Some(_) => Err(UiError::WrongKind {
                id,
                expected: "scroll control",
            }),
            None => Err(UiError::StaleWidget(id)),
        }
    }

    /// The scrolled content widget: the panel of a plain scroll control, the
    /// table of a list box.
    pub fn scroll_content(&self, id: WidgetId) -> Result<WidgetId, UiError> {
        let area = self.scroll_parts(id)?.area;
        self.children(area)
            .first()
            .copied()
            .ok_or(UiError::StaleWidget(area))
    }

    pub fn enable_scroll(&mut self, id: WidgetId, horizontal: bool, vertical: bool) -> Result<(), UiError> {
        let parts = self.scroll_parts_mut(id)?;
        parts.can_scroll_h = horizontal;
        parts.can_scroll_v = vertical;
        let area = parts.area;
        let a = self.scroll_area_mut(area)?;
        a.can_scroll_h = horizontal;
        a.can_scroll_v = vertical;
        self.invalidate(area);
        Ok(())
    }

    pub fn set_auto_hide_bars(&mut self, id: WidgetId, auto_hide: bool) -> Result<(), UiError> {
        self.scroll_parts_mut(id)?.auto_hide_bars = auto_hide;
        self.invalidate(id);
        Ok(())
    }

    /// Set a bar's fraction, moving its bar, and notify listeners on the
    /// owning scroll control when it changed.
    pub fn set_scroll_amount(&mut self, bar: WidgetId, value: f32) -> Result<bool, UiError> {
        let changed = self.scroll_bar_mut(bar)?.set_scroll_amount(value, true);
        self.after_bar_moved(bar, changed);
        Ok(changed)
    }

    /// Drag a bar's thumb by `delta` pixels.
    pub fn drag_scroll_bar(&mut self, bar: WidgetId, delta: i32) -> Result<bool, UiError> {
        let changed = self.scroll_bar_mut(bar)?.drag_bar_by(delta);
        self.after_bar_moved(bar, changed);
        Ok(changed)
    }

    /// Nudge a bar one step backwards (`-1`) or forwards (`1`).
    pub fn nudge_scroll_bar(&mut self, bar: WidgetId, direction: i32) -> Result<bool, UiError> {
        if self.get(bar).is_some_and(|n| n.disabled) {
            return Ok(false);
        }
        let changed = self.scroll_bar_mut(bar)?.nudge(direction);
        self.after_bar_moved(bar, changed);
        Ok(changed)
    }

    fn after_bar_moved(&mut self, bar: WidgetId, changed: bool) {
        if !changed {
            return;
        }
        let amount = self.scroll_bar(bar).map(|b| b.scroll_amount()).unwrap_or(0.0);
        let owner = self.parent(bar).filter(|&p| self.scroll_parts(p).is_ok());
        let source = owner.unwrap_or(bar);
        self.invalidate(source);
        self.events.emit(Event::ScrollChanged { source, amount });
    }

    /// Vertical and horizontal scroll fractions of a scroll control.
    pub fn scroll_amounts(&self, id: WidgetId) -> Result<(f32, f32), UiError> {
        let parts = self.scroll_parts(id)?;
        let h = self.scroll_bar(parts.hbar)?.scroll_amount();
        let v = self.scroll_bar(parts.vbar)?.scroll_amount();
        Ok((h, v))
    }

    /// Scroll by whole pixels of content (mouse wheel). Returns whether
    /// either bar moved.
    pub fn scroll_by_pixels(&mut self, id: WidgetId, dx: i32, dy: i32) -> Result<bool, UiError> {
        let parts = self.scroll_parts(id)?;
        let mut moved = false;
        for (bar, delta) in [(parts.hbar, dx), (parts.vbar, dy)] {
            if delta == 0 || self.get(bar).is_none_or(|n| n.collapsed) {
                continue;
            }
            let b = self.scroll_bar(bar)?;
            let scrollable = b.content_size() - b.viewable_size();
            if scrollable <= 0.0 {
                continue;
            }
            let target = b.scroll_amount() + delta as f32 / scrollable;
            moved |= self.set_scroll_amount(bar, target)?;
        }
        Ok(moved)
    }

    /// Scroll the minimum amount so that `rect` (content-local) is visible.
    pub fn scroll_to_visible(&mut self, id: WidgetId, rect: Rect) -> Result<(), UiError> {
        let parts = self.scroll_parts(id)?;
        let viewable = self.scroll_area(parts.area)?.viewable;
        let content = self.scroll_content(id)?;
        let content_size = self.get(content).map(|n| n.bounds.size()).unwrap_or(Size::ZERO);
        let (h, v) = self.scroll_amounts(id)?;

        let axes = [
            (parts.vbar, rect.y, rect.bottom(), viewable.height, content_size.height, v),
            (parts.hbar, rect.x, rect.right(), viewable.width, content_size.width, h),
        ];
        for (bar, start, end, view, total, amount) in axes {
            let scrollable = total - view;
            if scrollable <= 0 {
                continue;
            }
            let offset = (amount * scrollable as f32) as i32;
            let target = if start < offset {
                start
            } else if end > offset + view {
                end - view
            } else {
                continue;
            };
            self.set_scroll_amount(bar, target as f32 / scrollable as f32)?;
        }
        Ok(())
    }

    pub(super) fn measure_scroll_area(&mut self, id: WidgetId, available: Size) -> Size {
        let Ok(&area) = self.scroll_area(id) else {
            return Size::ZERO;
        };
        let Some(&content) = self.children(id).first() else {
            return Size::ZERO;
        };
        let offer = Size::new(
            if area.can_scroll_h { INFINITY } else { available.width },
            if area.can_scroll_v { INFINITY } else { available.height },
        );
        let s = self.measure(content, offer);
        Size::new(
            if area.can_scroll_h { 0 } else { s.width.min(available.width) },
            if area.can_scroll_v { 0 } else { s.height.min(available.height) },
        )
    }

    pub(super) fn arrange_scroll_area(&mut self, id: WidgetId, size: Size) -> Size {
        let Some(&content) = self.children(id).first() else {
            return size;
        };
        let measured = self.get(content).map(|n| n.measured).unwrap_or(Size::ZERO);
        self.arrange(content, Rect::from_size(size.max(measured)));
        if let Ok(area) = self.scroll_area_mut(id) {
            area.viewable = size;
            area.scroll = Point::ZERO;
        }
        size
    }

    pub(super) fn measure_scroll_control(&mut self, id: WidgetId, available: Size) -> Size {
        let Ok(parts) = self.scroll_parts(id) else {
            return Size::ZERO;
        };
        let padding = self.get(id).map(|n| n.padding).unwrap_or_default();
        let inner = available - padding;

        self.measure(parts.area, inner);
        let content = self
            .children(parts.area)
            .first()
            .and_then(|&c| self.get(c))
            .map(|n| n.measured)
            .unwrap_or(Size::ZERO);

        let (mut show_v, mut show_h) = (parts.can_scroll_v, parts.can_scroll_h);
        if parts.auto_hide_bars {
            show_v = parts.can_scroll_v && content.height > inner.height;
            let width_left = inner.width - if show_v { SCROLL_BAR_SIZE } else { 0 };
            show_h = parts.can_scroll_h && content.width > width_left;
            if show_h && !show_v {
                show_v = parts.can_scroll_v && content.height > inner.height - SCROLL_BAR_SIZE;
            }
        }
        for (bar, show) in [(parts.vbar, show_v), (parts.hbar, show_h)] {
            if let Some(node) = self.get_mut(bar)
                && node.collapsed == show
            {
                node.collapsed = !show;
                self.invalidate_local(bar);
            }
        }

        let v_thick = if show_v { SCROLL_BAR_SIZE } else { 0 };
        let h_thick = if show_h { SCROLL_BAR_SIZE } else { 0 };
        self.measure(parts.vbar, Size::new(v_thick, (inner.height - h_thick).max(0)));
        self.measure(parts.hbar, Size::new((inner.width - v_thick).max(0), h_thick));

        let width = (content.width + v_thick).min(inner.width);
        let height = (content.height + h_thick).min(inner.height);
        Size::new(width, height) + padding
    }

    pub(super) fn arrange_scroll_control(&mut self, id: WidgetId, size: Size) -> Size {
        let Ok(parts) = self.scroll_parts(id) else {
            return size;
        };
        let padding = self.get(id).map(|n| n.padding).unwrap_or_default();
        let inner = Rect::from_size(size).deflate(padding);
        let shown = |tree: &WidgetTree, bar: WidgetId| tree.get(bar).is_some_and(|n| !n.collapsed);
        let v_thick = if shown(self, parts.vbar) { SCROLL_BAR_SIZE } else { 0 };
        let h_thick = if shown(self, parts.hbar) { SCROLL_BAR_SIZE } else { 0 };

        let area_rect = Rect::new(
            inner.x,
            inner.y,
            (inner.width - v_thick).max(0),
            (inner.height - h_thick).max(0),
        );
        self.arrange(parts.area, area_rect);

        let viewable = self.scroll_area(parts.area).map(|a| a.viewable).unwrap_or(Size::ZERO);
        let content = self.children(parts.area).first().copied();
        let content_size = content
            .and_then(|c| self.get(c))
            .map(|n| n.bounds.size())
            .unwrap_or(Size::ZERO);

        for (bar, total, view, thick) in [
            (parts.vbar, content_size.height, viewable.height, v_thick),
            (parts.hbar, content_size.width, viewable.width, h_thick),
        ] {
            if let Ok(b) = self.scroll_bar_mut(bar) {
                b.set_content_size(total as f32, view as f32);
                if thick == 0 {
                    b.set_scroll_amount(0.0, true);
                }
            }
        }
        if v_thick > 0 {
            let r = Rect::new(inner.right() - v_thick, inner.y, v_thick, area_rect.height);
            self.arrange(parts.vbar, r);
        }
        if h_thick > 0 {
            let r = Rect::new(inner.x, inner.bottom() - h_thick, area_rect.width, h_thick);
            self.arrange(parts.hbar, r);
        }

        let (h, v) = self.scroll_amounts(id).unwrap_or((0.0, 0.0));
        let offset = Point::new(
            ((content_size.width - viewable.width).max(0) as f32 * h) as i32,
            ((content_size.height - viewable.height).max(0) as f32 * v) as i32,
        );
        if let Some(c) = content
            && let Some(node) = self.get_mut(c)
        {
            node.bounds.x = -offset.x;
            node.bounds.y = -offset.y;
        }
        if let Ok(area) = self.scroll_area_mut(parts.area) {
            area.scroll = offset;
        }
        size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Dock;

    fn bar(length: i32, content: f32, viewable: f32) -> ScrollBar {
        let mut b = ScrollBar::new(Orientation::Vertical);
        b.resize(Size::new(10, length));
        b.set_content_size(content, viewable);
        b
    }

    #[test]
    fn bar_size_from_viewable_ratio() {
        let b = bar(200, 100.0, 20.0);
        assert_eq!(b.bar_size(), 36);
        assert!(!b.is_bar_hidden());
    }

    #[test]
    fn bar_size_has_minimum_and_hides_when_content_fits() {
        let tiny = bar(200, 100_000.0, 1.0);
        assert_eq!(tiny.bar_size(), 5);

        let fits = bar(200, 50.0, 100.0);
        assert!(fits.is_bar_hidden());

        let empty = bar(200, 0.0, 100.0);
        assert_eq!(empty.bar_size(), 5);
    }

    #[test]
    fn set_scroll_amount_clamps_and_reports_change() {
        let mut b = bar(200, 100.0, 20.0);
        assert!(b.set_scroll_amount(2.0, false));
        assert_eq!(b.scroll_amount(), 1.0);
        assert!(!b.set_scroll_amount(1.0, false));
        assert!(b.set_scroll_amount(1.0, true));
        // Forced update puts the bar at the end of the track.
        assert_eq!(b.bar_pos(), 200 - 10 - 36);
    }

    #[test]
    fn drag_recomputes_fraction_within_track() {
        let mut b = bar(200, 100.0, 20.0);
        assert!(b.drag_bar_by(72));
        assert!((b.scroll_amount() - 0.5).abs() < 1e-6);
        b.drag_bar_by(10_000);
        assert_eq!(b.scroll_amount(), 1.0);
        b.drag_bar_by(-10_000);
        assert_eq!(b.bar_pos(), 10);
        assert_eq!(b.scroll_amount(), 0.0);
    }

    #[test]
    fn degenerate_track_yields_zero_fraction() {
        // Track exactly as long as the minimum bar: no free space.
        let mut b = ScrollBar::new(Orientation::Horizontal);
        b.resize(Size::new(25, 10));
        assert_eq!(b.calculate_scrolled_amount(), 0.0);
    }

    #[test]
    fn nudge_uses_pixels_or_pages() {
        let mut b = bar(200, 200.0, 50.0);
        b.nudge(1);
        assert!((b.scroll_amount() - 0.1).abs() < 1e-6);
        b.depressed = true;
        b.nudge(1);
        assert!((b.scroll_amount() - 0.35).abs() < 1e-6);
        b.nudge(-1);
        b.nudge(-1);
        assert_eq!(b.scroll_amount(), 0.0);
    }

    fn scroll_with_content(w: i32, h: i32) -> (WidgetTree, WidgetId, WidgetId, WidgetId) {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Widget::Panel);
        let sc = tree.add_scroll_control(root).expect("scroll");
        tree.set_dock(sc, Dock::Fill).expect("dock");
        let content = tree.scroll_content(sc).expect("content");
        tree.set_min_size(content, Size::new(w, h)).expect("min");
        (tree, root, sc, content)
    }

    #[test]
    fn bars_hidden_when_content_fits() {
        let (mut tree, root, sc, _) = scroll_with_content(50, 50);
        tree.layout(root, Size::new(100, 100));
        let parts = tree.scroll_parts(sc).expect("parts");
        assert!(tree.get(parts.vbar).expect("vbar").collapsed);
        assert!(tree.get(parts.hbar).expect("hbar").collapsed);
        assert_eq!(tree.get(parts.area).expect("area").bounds, Rect::new(0, 0, 100, 100));
    }

    #[test]
    fn tall_content_shows_vertical_bar_and_scrolls() {
        let (mut tree, root, sc, content) = scroll_with_content(50, 400);
        tree.layout(root, Size::new(100, 100));
        let parts = tree.scroll_parts(sc).expect("parts");
        assert!(!tree.get(parts.vbar).expect("vbar").collapsed);
        assert!(tree.get(parts.hbar).expect("hbar").collapsed);
        assert_eq!(
            tree.get(parts.vbar).expect("vbar").bounds,
            Rect::new(100 - SCROLL_BAR_SIZE, 0, SCROLL_BAR_SIZE, 100)
        );

        tree.events.set_recording(true);
        assert!(tree.scroll_by_pixels(sc, 0, 150).expect("scroll"));
        tree.layout(root, Size::new(100, 100));
        assert_eq!(tree.get(content).expect("content").bounds.y, -150);
        assert!(matches!(
            tree.events.drain_log().as_slice(),
            [Event::ScrollChanged { source, .. }] if *source == sc
        ));
    }

    #[test]
    fn scroll_to_visible_reveals_rect() {
        let (mut tree, root, sc, content) = scroll_with_content(50, 400);
        tree.layout(root, Size::new(100, 100));
        tree.scroll_to_visible(sc, Rect::new(0, 280, 10, 20)).expect("scroll");
        tree.layout(root, Size::new(100, 100));
        // Bottom of the rect lines up with the bottom of the viewport.
        assert_eq!(tree.get(content).expect("content").bounds.y, -200);

        tree.scroll_to_visible(sc, Rect::new(0, 0, 10, 20)).expect("scroll");
        tree.layout(root, Size::new(100, 100));
        assert_eq!(tree.get(content).expect("content").bounds.y, 0);
    }
}

use super::dock::{DragPackage, PackageKind};
use super::error::UiError;
use super::geometry::Point;
use super::widget::Widget;
use super::{WidgetId, WidgetTree};

use std::time::{Duration, Instant};

/// Mouse button identifier (decoupled from any windowing backend).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Keys the stock controls react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    /// Shift+Tab.
    BackTab,
    Enter,
    Space,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Escape,
}

/// Per-frame view of the pointer and keyboard state, handed to skins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub hovered: Option<WidgetId>,
    pub pressed: Option<WidgetId>,
    pub focused: Option<WidgetId>,
}

/// Minimum pixel distance before a press becomes a drag.
const DRAG_THRESHOLD: i32 = 4;

/// Pixels scrolled per mouse wheel line.
const SCROLL_SPEED: f32 = 40.0;

/// Second click on the same row within this window is a double click.
const DOUBLE_CLICK: Duration = Duration::from_millis(500);

/// What the captured press is dragging.
#[derive(Debug, Clone)]
enum Drag {
    /// Scroll bar thumb; `last` is the previous canvas coordinate along the
    /// bar's axis.
    ScrollBar { bar: WidgetId, last: i32 },
    /// Splitter bar; `grab` is the press offset inside the bar.
    Splitter { splitter: WidgetId, grab: i32 },
    /// Label column bar of a property grid.
    LabelSplitter { props: WidgetId, grab: i32 },
    Resizer { resizer: WidgetId, last: Point },
    /// Drag and drop of a tab; only active past the drag threshold.
    Tab(DragPackage),
}

/// Widget roles that react to a left press.
enum PressTarget {
    ScrollBar,
    SplitterBar,
    Resizer,
    TabButton,
    Row(WidgetId),
    Other,
}

/// Focused widget roles that react to keys.
enum FocusTarget {
    Activate,
    List,
    Tab,
    Other,
}

/// Interaction state for one canvas: hover, press, capture, focus and the
/// drag in progress.
pub struct UiState {
    /// Widget currently under the cursor.
    pub hovered: Option<WidgetId>,
    /// Widget receiving keyboard events (Tab to cycle).
    pub focused: Option<WidgetId>,
    /// Widget being pressed (mouse down, not yet released).
    pressed: Option<WidgetId>,
    pressed_button: Option<MouseButton>,
    /// Widget with mouse capture. While captured, moves and the release
    /// route to it even if the cursor leaves its rect.
    pub captured: Option<WidgetId>,
    /// Canvas point where the press started (for drag threshold).
    press_origin: Option<Point>,
    /// Whether the current press crossed the drag threshold.
    dragging: bool,
    /// Last known cursor position in canvas space.
    pub cursor: Point,
    drag: Option<Drag>,
    /// Dock currently showing the drop highlight.
    drop_target: Option<WidgetId>,
    last_click: Option<(WidgetId, Instant)>,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub fn new() -> Self {
        Self {
            hovered: None,
            focused: None,
            pressed: None,
            pressed_button: None,
            captured: None,
            press_origin: None,
            dragging: false,
            cursor: Point::ZERO,
            drag: None,
            drop_target: None,
            last_click: None,
        }
    }

    pub fn interaction(&self) -> InteractionState {
        InteractionState {
            hovered: self.hovered,
            pressed: self.pressed,
            focused: self.focused,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Forget a removed widget wherever it is referenced.
    pub fn forget(&mut self, tree: &WidgetTree) {
        let alive = |w: Option<WidgetId>| w.filter(|&id| tree.contains(id));
        self.hovered = alive(self.hovered);
        self.focused = alive(self.focused);
        self.drop_target = alive(self.drop_target);
        if self.captured.is_some_and(|id| !tree.contains(id)) {
            self.cancel_press();
        }
    }

    fn cancel_press(&mut self) {
        self.pressed = None;
        self.pressed_button = None;
        self.captured = None;
        self.press_origin = None;
        self.dragging = false;
        self.drag = None;
    }

    /// Handle cursor movement. Returns true if the cursor is over a widget
    /// or a captured press is in progress.
    pub fn handle_cursor_moved(
        &mut self,
        tree: &mut WidgetTree,
        root: WidgetId,
        p: Point,
    ) -> Result<bool, UiError> {
        self.cursor = p;
        let hit = tree.hit_test(root, p);
        self.hovered = hit;
        if self.captured.is_none() {
            return Ok(hit.is_some());
        }

        if let Some(origin) = self.press_origin
            && !self.dragging
        {
            let d = p - origin;
            if d.x * d.x + d.y * d.y >= DRAG_THRESHOLD * DRAG_THRESHOLD {
                self.dragging = true;
            }
        }

        let mut tab_package = None;
        match &mut self.drag {
            Some(Drag::ScrollBar { bar, last }) => {
                let axis = tree.scroll_bar(*bar)?.axis_coord(p);
                let delta = axis - *last;
                *last = axis;
                if delta != 0 {
                    tree.drag_scroll_bar(*bar, delta)?;
                }
            }
            Some(Drag::Splitter { splitter, grab }) => {
                let local = tree.canvas_to_local(*splitter, p);
                tree.move_splitter_bar(*splitter, local.y - *grab)?;
            }
            Some(Drag::LabelSplitter { props, grab }) => {
                let local = tree.canvas_to_local(*props, p);
                tree.move_label_splitter(*props, local.x - *grab)?;
            }
            Some(Drag::Resizer { resizer, last }) => {
                let delta = p - *last;
                *last = p;
                let along = if tree.resizer(*resizer)?.resize_dir.is_horizontal_edge() {
                    delta.x
                } else {
                    delta.y
                };
                if along != 0 {
                    tree.resize_by(*resizer, along)?;
                }
            }
            Some(Drag::Tab(package)) => tab_package = Some(package.clone()),
            None => {}
        }

        if self.dragging
            && let Some(package) = tab_package
        {
            self.update_drop_target(tree, root, &package, p)?;
        }
        Ok(true)
    }

    /// Move the drop highlight to the innermost dock under `p` that takes
    /// the package.
    fn update_drop_target(
        &mut self,
        tree: &mut WidgetTree,
        root: WidgetId,
        package: &DragPackage,
        p: Point,
    ) -> Result<(), UiError> {
        let target = tree
            .hit_test(root, p)
            .and_then(|hit| tree.find_ancestor(hit, |w| matches!(w, Widget::Dock(_))))
            .filter(|_| tree.can_accept(package));
        if target != self.drop_target {
            if let Some(old) = self.drop_target
                && tree.contains(old)
            {
                tree.drag_hover_leave(old)?;
            }
            if let Some(new) = target {
                tree.drag_hover_enter(new)?;
            }
            self.drop_target = target;
        }
        if let Some(dock) = target {
            tree.drag_hover(dock, p)?;
        }
        Ok(())
    }

    /// Handle mouse button press/release at a canvas point. Returns true if
    /// consumed by a widget.
    pub fn handle_mouse_input(
        &mut self,
        tree: &mut WidgetTree,
        root: WidgetId,
        button: MouseButton,
        pressed: bool,
        p: Point,
        now: Instant,
    ) -> Result<bool, UiError> {
        self.cursor = p;
        if pressed {
            self.press(tree, root, button, p, now)
        } else {
            self.release(tree, root, p)
        }
    }

    fn press(
        &mut self,
        tree: &mut WidgetTree,
        root: WidgetId,
        button: MouseButton,
        p: Point,
        now: Instant,
    ) -> Result<bool, UiError> {
        let hit = self.captured.or_else(|| tree.hit_test(root, p));
        let Some(id) = hit else {
            // Pressed outside every widget.
            self.focused = None;
            return Ok(false);
        };
        self.pressed = Some(id);
        self.pressed_button = Some(button);
        self.captured = Some(id);
        self.press_origin = Some(p);
        self.dragging = false;

        if button != MouseButton::Left || tree.get(id).is_none_or(|n| n.disabled) {
            return Ok(true);
        }
        self.focused = tree.find_ancestor(id, Widget::is_focusable);

        let target = match tree.get(id).map(|n| &n.widget) {
            Some(Widget::ScrollBar(_)) => PressTarget::ScrollBar,
            Some(Widget::SplitterBar) => PressTarget::SplitterBar,
            Some(Widget::Resizer(_)) => PressTarget::Resizer,
            Some(Widget::TabButton { .. }) => PressTarget::TabButton,
            Some(Widget::TableRow(row)) => row.list.map_or(PressTarget::Other, PressTarget::Row),
            _ => PressTarget::Other,
        };
        match target {
            PressTarget::ScrollBar => self.press_scroll_bar(tree, id, p)?,
            PressTarget::SplitterBar => {
                let local = tree.canvas_to_local(id, p);
                if let Some(parent) = tree.parent(id) {
                    if tree.splitter(parent).is_ok() {
                        self.drag = Some(Drag::Splitter {
                            splitter: parent,
                            grab: local.y,
                        });
                    } else if tree.properties(parent).is_ok() {
                        self.drag = Some(Drag::LabelSplitter {
                            props: parent,
                            grab: local.x,
                        });
                    }
                }
            }
            PressTarget::Resizer => self.drag = Some(Drag::Resizer { resizer: id, last: p }),
            PressTarget::TabButton => {
                tree.select_tab(id)?;
                self.drag = Some(Drag::Tab(DragPackage {
                    kind: PackageKind::TabButtonMove,
                    source: id,
                }));
            }
            PressTarget::Row(list) => {
                let double = self
                    .last_click
                    .is_some_and(|(row, at)| row == id && now.duration_since(at) <= DOUBLE_CLICK);
                if double {
                    tree.row_double_clicked(list, id)?;
                    self.last_click = None;
                } else {
                    tree.row_clicked(list, id)?;
                    self.last_click = Some((id, now));
                }
            }
            PressTarget::Other => {}
        }
        Ok(true)
    }

    /// Press on a scroll bar: grab the thumb, or nudge from the end buttons
    /// and the track.
    fn press_scroll_bar(&mut self, tree: &mut WidgetTree, bar: WidgetId, p: Point) -> Result<(), UiError> {
        let local = tree.canvas_to_local(bar, p);
        let b = tree.scroll_bar(bar)?;
        let axis = b.axis_coord(local);
        let (thumb, button, length, bar_pos) = (b.bar_rect(), b.button_size(), b.length(), b.bar_pos());

        if !b.is_bar_hidden() && thumb.contains(local) {
            tree.scroll_bar_mut(bar)?.bar_held = true;
            self.drag = Some(Drag::ScrollBar {
                bar,
                last: tree.scroll_bar(bar)?.axis_coord(p),
            });
        } else if axis < button {
            tree.nudge_scroll_bar(bar, -1)?;
        } else if axis >= length - button {
            tree.nudge_scroll_bar(bar, 1)?;
        } else {
            // Track click pages towards the cursor.
            let direction = if axis < bar_pos { -1 } else { 1 };
            tree.scroll_bar_mut(bar)?.depressed = true;
            tree.nudge_scroll_bar(bar, direction)?;
            tree.scroll_bar_mut(bar)?.depressed = false;
        }
        Ok(())
    }

    fn release(&mut self, tree: &mut WidgetTree, root: WidgetId, p: Point) -> Result<bool, UiError> {
        let was_pressed = self.pressed.take();
        let was_button = self.pressed_button.take();
        let was_captured = self.captured.take();
        let was_dragging = self.dragging;
        let drag = self.drag.take();
        self.press_origin = None;
        self.dragging = false;

        match drag {
            Some(Drag::ScrollBar { bar, .. }) => {
                if let Ok(b) = tree.scroll_bar_mut(bar) {
                    b.bar_held = false;
                }
            }
            Some(Drag::Tab(package)) if was_dragging => {
                if let Some(dock) = self.drop_target.take()
                    && tree.contains(dock)
                {
                    tree.drag_hover_leave(dock)?;
                    let taken = tree.handle_drop(dock, &package, p)?;
                    log::debug!("tab {:?} dropped on {:?}: {}", package.source, dock, taken);
                }
                return Ok(true);
            }
            _ => {}
        }

        if was_captured.is_none() {
            return Ok(false);
        }
        if !was_dragging
            && was_button == Some(MouseButton::Left)
            && let Some(id) = was_pressed
            && tree.hit_test(root, p) == Some(id)
            && tree
                .get(id)
                .is_some_and(|n| matches!(n.widget, Widget::Button { .. } | Widget::CheckBox { .. }))
        {
            tree.click(id)?;
        }
        Ok(true)
    }

    /// Handle keyboard input. Returns true if consumed.
    pub fn handle_key_input(
        &mut self,
        tree: &mut WidgetTree,
        root: WidgetId,
        key: Key,
        pressed: bool,
    ) -> Result<bool, UiError> {
        if !pressed {
            return Ok(self.focused.is_some());
        }

        match key {
            Key::Tab | Key::BackTab => {
                let focusable = tree.focusable_widgets(root);
                if focusable.is_empty() {
                    self.focused = None;
                    return Ok(false);
                }
                let len = focusable.len();
                let current = self
                    .focused
                    .and_then(|f| focusable.iter().position(|&id| id == f));
                let next = match (current, key) {
                    (None, Key::BackTab) => len - 1,
                    (None, _) => 0,
                    (Some(i), Key::BackTab) => (i + len - 1) % len,
                    (Some(i), _) => (i + 1) % len,
                };
                self.focused = Some(focusable[next]);
                return Ok(true);
            }
            Key::Escape if self.dragging => {
                if let Some(dock) = self.drop_target.take()
                    && tree.contains(dock)
                {
                    tree.drag_hover_leave(dock)?;
                }
                self.cancel_press();
                return Ok(true);
            }
            _ => {}
        }

        let Some(focused) = self.focused else {
            return Ok(false);
        };
        let Some(node) = tree.get(focused) else {
            self.focused = None;
            return Ok(false);
        };
        if node.disabled {
            return Ok(true);
        }
        let target = match &node.widget {
            Widget::Button { .. } | Widget::CheckBox { .. } => FocusTarget::Activate,
            Widget::ListBox(_) => FocusTarget::List,
            Widget::TabButton { .. } => FocusTarget::Tab,
            _ => FocusTarget::Other,
        };
        match target {
            FocusTarget::Activate if matches!(key, Key::Space | Key::Enter) => tree.click(focused)?,
            FocusTarget::List => self.navigate_list(tree, focused, key)?,
            FocusTarget::Tab if matches!(key, Key::Left | Key::Right) => {
                let Some(strip) = tree.parent(focused) else {
                    return Ok(true);
                };
                let buttons = tree.children(strip).to_vec();
                if let Some(i) = buttons.iter().position(|&b| b == focused) {
                    let next = if key == Key::Left { i.checked_sub(1) } else { Some(i + 1) };
                    if let Some(&next) = next.and_then(|n| buttons.get(n)) {
                        tree.select_tab(next)?;
                        self.focused = Some(next);
                    }
                }
            }
            _ => {}
        }
        Ok(true)
    }

    /// Arrow, Home/End and paging keys move the selection of a list box.
    fn navigate_list(&mut self, tree: &mut WidgetTree, list: WidgetId, key: Key) -> Result<(), UiError> {
        let count = tree.row_count(list)?;
        if count == 0 {
            return Ok(());
        }
        let last = count - 1;
        let current = tree.selected_row_index(list);
        let page = list_page(tree, list);
        let target = match key {
            Key::Up => current.map_or(0, |i| i.saturating_sub(1)),
            Key::Down => current.map_or(0, |i| (i + 1).min(last)),
            Key::PageUp => current.map_or(0, |i| i.saturating_sub(page)),
            Key::PageDown => current.map_or(0, |i| (i + page).min(last)),
            Key::Home => 0,
            Key::End => last,
            _ => return Ok(()),
        };
        if current == Some(target) {
            return Ok(());
        }
        tree.select_row_at(list, target, true)?;
        let row = tree.row(list, target)?;
        tree.scroll_to_row(list, row)
    }

    /// Handle scroll wheel at the last cursor position (positive = down).
    /// Returns true if the cursor is over a widget.
    pub fn handle_scroll(&mut self, tree: &mut WidgetTree, root: WidgetId, delta: f32) -> Result<bool, UiError> {
        let Some(hit) = tree.hit_test(root, self.cursor) else {
            return Ok(false);
        };
        let scrollable = tree.find_ancestor(hit, |w| {
            matches!(w, Widget::ScrollControl(_) | Widget::ListBox(_))
        });
        if let Some(id) = scrollable {
            let pixels = (delta * SCROLL_SPEED).round() as i32;
            tree.scroll_by_pixels(id, 0, pixels)?;
        }
        Ok(true)
    }
}

/// Rows visible in a list box viewport, at least one.
fn list_page(tree: &WidgetTree, list: WidgetId) -> usize {
    let Ok(parts) = tree.scroll_parts(list) else {
        return 1;
    };
    let viewable = tree.get(parts.area).map_or(0, |n| n.bounds.height);
    let row_height = tree
        .row(list, 0)
        .ok()
        .and_then(|r| tree.get(r))
        .map_or(0, |n| n.bounds.height);
    if row_height > 0 {
        (viewable / row_height).max(1) as usize
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{Dock, Event, Rect, Size};

    fn at(ms: u64) -> Instant {
        thread_local! {
            static EPOCH: Instant = Instant::now();
        }
        EPOCH.with(|e| *e + Duration::from_millis(ms))
    }

    fn center(r: Rect) -> Point {
        Point::new(r.x + r.width / 2, r.y + r.height / 2)
    }

    /// Root panel with a button offset from the origin.
    fn tree_with_button() -> (WidgetTree, WidgetId, WidgetId) {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Widget::Panel);
        let button = tree.add_button(root, "Click me").expect("button");
        tree.set_position(button, Point::new(10, 10)).expect("position");
        tree.layout(root, Size::new(200, 100));
        (tree, root, button)
    }

    fn click(state: &mut UiState, tree: &mut WidgetTree, root: WidgetId, p: Point, now: Instant) {
        state
            .handle_mouse_input(tree, root, MouseButton::Left, true, p, now)
            .expect("press");
        state
            .handle_mouse_input(tree, root, MouseButton::Left, false, p, now)
            .expect("release");
    }

    #[test]
    fn hover_tracking() {
        let (mut tree, root, button) = tree_with_button();
        let mut state = UiState::new();
        let p = center(tree.canvas_bounds(button));

        assert!(state.handle_cursor_moved(&mut tree, root, p).expect("move"));
        assert_eq!(state.hovered, Some(button));
        assert_eq!(state.interaction().hovered, Some(button));

        assert!(state.handle_cursor_moved(&mut tree, root, Point::new(150, 80)).expect("move"));
        assert_eq!(state.hovered, Some(root));

        assert!(!state.handle_cursor_moved(&mut tree, root, Point::new(500, 500)).expect("move"));
        assert_eq!(state.hovered, None);
    }

    #[test]
    fn click_sets_focus_and_emits_clicked() {
        let (mut tree, root, button) = tree_with_button();
        tree.events.set_recording(true);
        let mut state = UiState::new();
        let p = center(tree.canvas_bounds(button));

        assert!(state
            .handle_mouse_input(&mut tree, root, MouseButton::Left, true, p, at(0))
            .expect("press"));
        assert_eq!(state.focused, Some(button));
        assert_eq!(state.interaction().pressed, Some(button));

        state
            .handle_mouse_input(&mut tree, root, MouseButton::Left, false, p, at(0))
            .expect("release");
        assert!(matches!(
            tree.events.drain_log().as_slice(),
            [Event::Clicked { source }] if *source == button
        ));
        assert_eq!(state.interaction().pressed, None);
    }

    #[test]
    fn release_elsewhere_or_after_drag_does_not_click() {
        let (mut tree, root, button) = tree_with_button();
        tree.events.set_recording(true);
        let mut state = UiState::new();
        let p = center(tree.canvas_bounds(button));

        state
            .handle_mouse_input(&mut tree, root, MouseButton::Left, true, p, at(0))
            .expect("press");
        state
            .handle_mouse_input(&mut tree, root, MouseButton::Left, false, Point::new(150, 80), at(0))
            .expect("release");

        state
            .handle_mouse_input(&mut tree, root, MouseButton::Left, true, p, at(0))
            .expect("press");
        state
            .handle_cursor_moved(&mut tree, root, p + Point::new(2, 0))
            .expect("move");
        assert!(!state.is_dragging());
        state
            .handle_cursor_moved(&mut tree, root, p + Point::new(10, 0))
            .expect("move");
        assert!(state.is_dragging());
        assert_eq!(state.captured, Some(button));
        state
            .handle_mouse_input(&mut tree, root, MouseButton::Left, false, p, at(0))
            .expect("release");
        assert!(!state.is_dragging());
        assert_eq!(state.captured, None);

        assert!(tree.events.drain_log().is_empty());
    }

    #[test]
    fn click_outside_clears_focus() {
        let (mut tree, root, button) = tree_with_button();
        let mut state = UiState::new();
        let pos = center(tree.canvas_bounds(button));
        click(&mut state, &mut tree, root, pos, at(0));
        assert_eq!(state.focused, Some(button));

        let consumed = state
            .handle_mouse_input(&mut tree, root, MouseButton::Left, true, Point::new(500, 500), at(0))
            .expect("press");
        assert!(!consumed);
        assert_eq!(state.focused, None);
    }

    #[test]
    fn tab_cycles_focus_and_space_toggles() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Widget::Panel);
        let a = tree.add_button(root, "A").expect("a");
        let check = tree.add_check_box(root).expect("check");
        tree.set_position(check, Point::new(60, 0)).expect("position");
        tree.layout(root, Size::new(200, 100));
        let mut state = UiState::new();

        state.handle_key_input(&mut tree, root, Key::Tab, true).expect("tab");
        assert_eq!(state.focused, Some(a));
        state.handle_key_input(&mut tree, root, Key::Tab, true).expect("tab");
        assert_eq!(state.focused, Some(check));
        state.handle_key_input(&mut tree, root, Key::Tab, true).expect("tab");
        assert_eq!(state.focused, Some(a));
        state.handle_key_input(&mut tree, root, Key::BackTab, true).expect("tab");
        assert_eq!(state.focused, Some(check));

        state.handle_key_input(&mut tree, root, Key::Space, true).expect("space");
        assert_eq!(tree.is_checked(check), Some(true));
    }

    fn list_tree() -> (WidgetTree, WidgetId, WidgetId, Vec<WidgetId>) {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Widget::Panel);
        let list = tree.add_list_box(root).expect("list");
        tree.set_dock(list, Dock::Fill).expect("dock");
        let rows = ["alpha", "beta", "gamma"]
            .into_iter()
            .map(|t| tree.add_row_text(list, t).expect("row"))
            .collect();
        tree.layout(root, Size::new(200, 200));
        (tree, root, list, rows)
    }

    #[test]
    fn row_click_selects_and_second_click_is_double() {
        let (mut tree, root, list, rows) = list_tree();
        let mut state = UiState::new();
        let p = center(tree.canvas_bounds(rows[1]));

        click(&mut state, &mut tree, root, p, at(0));
        assert_eq!(tree.selected_row(list), Some(rows[1]));
        assert_eq!(state.focused, Some(list));

        tree.events.set_recording(true);
        click(&mut state, &mut tree, root, p, at(100));
        assert!(tree
            .events
            .drain_log()
            .iter()
            .any(|e| matches!(e, Event::RowDoubleClicked { row, .. } if *row == rows[1])));

        // Too slow: a plain click again.
        click(&mut state, &mut tree, root, p, at(1000));
        click(&mut state, &mut tree, root, p, at(2000));
        assert!(!tree
            .events
            .drain_log()
            .iter()
            .any(|e| matches!(e, Event::RowDoubleClicked { .. })));
    }

    #[test]
    fn arrow_keys_move_list_selection() {
        let (mut tree, root, list, rows) = list_tree();
        let mut state = UiState::new();
        state.focused = Some(list);

        state.handle_key_input(&mut tree, root, Key::Down, true).expect("down");
        assert_eq!(tree.selected_row(list), Some(rows[0]));
        state.handle_key_input(&mut tree, root, Key::Down, true).expect("down");
        assert_eq!(tree.selected_row(list), Some(rows[1]));
        state.handle_key_input(&mut tree, root, Key::End, true).expect("end");
        assert_eq!(tree.selected_row(list), Some(rows[2]));
        state.handle_key_input(&mut tree, root, Key::Down, true).expect("down");
        assert_eq!(tree.selected_row(list), Some(rows[2]));
        state.handle_key_input(&mut tree, root, Key::Home, true).expect("home");
        assert_eq!(tree.selected_rows(list).expect("rows"), &[rows[0]]);
    }

    #[test]
    fn wheel_scrolls_nearest_scroll_control() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Widget::Panel);
        let sc = tree.add_scroll_control(root).expect("scroll");
        tree.set_dock(sc, Dock::Fill).expect("dock");
        let content = tree.scroll_content(sc).expect("content");
        tree.set_min_size(content, Size::new(50, 400)).expect("min");
        tree.layout(root, Size::new(100, 100));

        let mut state = UiState::new();
        state.cursor = Point::new(10, 10);
        assert!(state.handle_scroll(&mut tree, root, 1.0).expect("wheel"));
        tree.layout(root, Size::new(100, 100));
        let y = tree.get(content).expect("content").bounds.y;
        assert!((-40..=-39).contains(&y), "scrolled to {y}");

        state.cursor = Point::new(500, 500);
        assert!(!state.handle_scroll(&mut tree, root, 1.0).expect("wheel"));
    }

    #[test]
    fn dragging_scroll_thumb_scrolls_content() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Widget::Panel);
        let sc = tree.add_scroll_control(root).expect("scroll");
        tree.set_dock(sc, Dock::Fill).expect("dock");
        let content = tree.scroll_content(sc).expect("content");
        tree.set_min_size(content, Size::new(50, 400)).expect("min");
        tree.layout(root, Size::new(100, 100));

        let vbar = tree.scroll_parts(sc).expect("parts").vbar;
        let thumb = tree
            .scroll_bar(vbar)
            .expect("bar")
            .bar_rect()
            .offset(tree.canvas_position(vbar));
        let mut state = UiState::new();
        let p = center(thumb);
        state
            .handle_mouse_input(&mut tree, root, MouseButton::Left, true, p, at(0))
            .expect("press");
        assert!(tree.scroll_bar(vbar).expect("bar").bar_held);

        state
            .handle_cursor_moved(&mut tree, root, p + Point::new(0, 10))
            .expect("move");
        assert!(tree.scroll_bar(vbar).expect("bar").scroll_amount() > 0.0);
        state
            .handle_mouse_input(&mut tree, root, MouseButton::Left, false, p, at(0))
            .expect("release");
        assert!(!tree.scroll_bar(vbar).expect("bar").bar_held);

        tree.layout(root, Size::new(100, 100));
        assert!(tree.get(content).expect("content").bounds.y < 0);
    }

    #[test]
    fn dragging_splitter_bar_moves_value() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Widget::Panel);
        let splitter = tree.add_horizontal_splitter(root).expect("splitter");
        tree.set_dock(splitter, Dock::Fill).expect("dock");
        tree.layout(root, Size::new(100, 205));

        let mut state = UiState::new();
        state
            .handle_mouse_input(&mut tree, root, MouseButton::Left, true, Point::new(50, 102), at(0))
            .expect("press");
        state
            .handle_cursor_moved(&mut tree, root, Point::new(50, 52))
            .expect("move");
        assert!((tree.splitter_value(splitter).expect("value") - 0.25).abs() < 1e-6);
    }

    #[test]
    fn tab_drag_to_dock_edge_creates_child_dock() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Widget::Panel);
        let dock = tree.add_dock(root).expect("dock");
        tree.set_dock(dock, Dock::Fill).expect("fill");
        let left = tree.child_dock(dock, Dock::Left).expect("left");
        let left_tabs = tree.dock_tab_control(left).expect("dock").expect("tabs");
        tree.add_page(left_tabs, "A").expect("a");
        let b = tree.add_page(left_tabs, "B").expect("b");
        tree.layout(root, Size::new(400, 300));

        let mut state = UiState::new();
        let start = center(tree.canvas_bounds(b));
        let drop = Point::new(390, 150);
        state
            .handle_mouse_input(&mut tree, root, MouseButton::Left, true, start, at(0))
            .expect("press");
        assert_eq!(tree.current_tab(left_tabs).expect("current"), Some(b));

        state.handle_cursor_moved(&mut tree, root, drop).expect("move");
        assert!(state.is_dragging());
        assert!(tree.dock_base(dock).expect("dock").draw_hover);

        state
            .handle_mouse_input(&mut tree, root, MouseButton::Left, false, drop, at(0))
            .expect("release");
        assert!(!tree.dock_base(dock).expect("dock").draw_hover);

        let right = tree.dock_child(dock, Dock::Right).expect("dock").expect("right");
        let right_tabs = tree.dock_tab_control(right).expect("dock").expect("tabs");
        assert_eq!(tree.tab_buttons(right_tabs).expect("buttons"), vec![b]);
        assert_eq!(tree.tab_count(left_tabs).expect("count"), 1);
    }

    #[test]
    fn escape_cancels_tab_drag() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Widget::Panel);
        let dock = tree.add_dock(root).expect("dock");
        tree.set_dock(dock, Dock::Fill).expect("fill");
        let left = tree.child_dock(dock, Dock::Left).expect("left");
        let tabs = tree.dock_tab_control(left).expect("dock").expect("tabs");
        let a = tree.add_page(tabs, "A").expect("a");
        tree.layout(root, Size::new(400, 300));

        let mut state = UiState::new();
        let drop = Point::new(390, 150);
        let press = center(tree.canvas_bounds(a));
        state
            .handle_mouse_input(&mut tree, root, MouseButton::Left, true, press, at(0))
            .expect("press");
        state.handle_cursor_moved(&mut tree, root, drop).expect("move");
        assert!(state.handle_key_input(&mut tree, root, Key::Escape, true).expect("escape"));
        assert!(!tree.dock_base(dock).expect("dock").draw_hover);

        state
            .handle_mouse_input(&mut tree, root, MouseButton::Left, false, drop, at(0))
            .expect("release");
        assert_eq!(tree.dock_child(dock, Dock::Right).expect("dock"), None);
        assert_eq!(tree.tab_count(tabs).expect("count"), 1);
    }
}

mod animation;
mod canvas;
mod dock;
mod draw;
mod error;
mod events;
pub mod geometry;
mod input;
mod layout;
mod scroll;
mod skin;
mod splitter;
mod table;
mod theme;
mod widget;

pub use animation::{AnimatedProperty, Animator, Easing};
pub use canvas::{Canvas, LayoutSnapshot};
pub use dock::{
    DROP_FAR_THRESHOLD, DROP_FILL_THRESHOLD, DockBase, DragPackage, PackageKind, Resizer,
    TabControl,
};
pub use draw::{
    Color, DrawList, FixedMetrics, RectCommand, Renderer, TextCommand, TextMeasure,
    TextureCommand,
};
pub use error::UiError;
pub use events::{Event, EventBus, EventKind, Listener};
pub use geometry::{Edges, INFINITY, Margin, Padding, Point, Rect, Size};
pub use input::{InteractionState, Key, MouseButton, UiState};
pub use layout::{CellSize, GridLayout, StackLayout};
pub use scroll::{SCROLL_BAR_SIZE, ScrollArea, ScrollBar, ScrollControl};
pub use skin::{ControlView, Skin, ThemedSkin};
pub use splitter::{DEFAULT_LABEL_WIDTH, HorizontalSplitter, Properties};
pub use table::{ListBox, MAX_COLUMNS, Table, TableRow};
pub use theme::Theme;
pub use widget::{Dock, HAlign, Orientation, Toggle, VAlign, Widget};

use std::any::Any;

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Handle into the widget arena. Stable across insertions/removals.
    pub struct WidgetId;
}

/// Side length of a check box glyph in pixels.
pub const CHECK_BOX_SIZE: i32 = 15;

/// Default inner padding of push buttons.
pub const BUTTON_PADDING: Edges = Edges::symmetric(8, 4);

// ---------------------------------------------------------------------------
// Widget node (arena entry)
// ---------------------------------------------------------------------------

/// Arena entry pairing a widget with tree/layout metadata.
///
/// Fields are public for inspection. Mutating layout inputs directly
/// bypasses the measure cache; use the `WidgetTree` setters, or call
/// `WidgetTree::invalidate` afterwards.
pub struct WidgetNode {
    pub widget: Widget,
    pub parent: Option<WidgetId>,
    pub children: Vec<WidgetId>,
    /// Parent-local rectangle from the last arrange pass.
    pub bounds: Rect,
    /// Desired size from the last measure pass, margin included.
    pub measured: Size,
    pub padding: Padding,
    pub margin: Margin,
    pub dock: Dock,
    pub halign: HAlign,
    pub valign: VAlign,
    /// Excluded from layout entirely.
    pub collapsed: bool,
    /// Keeps its space but is neither drawn nor hit.
    pub hidden: bool,
    pub disabled: bool,
    /// Offset inside the parent's content area when `dock` is `None`.
    pub position: Point,
    /// Fixed width request.
    pub width: Option<i32>,
    /// Fixed height request.
    pub height: Option<i32>,
    pub min_size: Size,
    pub max_size: Size,
    pub name: String,
    pub user_data: Option<Box<dyn Any>>,
    /// Needs a new arrange.
    pub dirty: bool,
    /// Availability of the last measure; `None` once invalidated.
    last_available: Option<Size>,
}

impl WidgetNode {
    fn new(widget: Widget, parent: Option<WidgetId>) -> Self {
        Self {
            widget,
            parent,
            children: Vec::new(),
            bounds: Rect::EMPTY,
            measured: Size::ZERO,
            padding: Edges::ZERO,
            margin: Edges::ZERO,
            dock: Dock::None,
            halign: HAlign::default(),
            valign: VAlign::default(),
            collapsed: false,
            hidden: false,
            disabled: false,
            position: Point::ZERO,
            width: None,
            height: None,
            min_size: Size::ZERO,
            max_size: Size::new(INFINITY, INFINITY),
            name: String::new(),
            user_data: None,
            dirty: true,
            last_available: None,
        }
    }
}

/// How a widget measures and arranges its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LayoutPolicy {
    Text,
    CheckBox,
    /// Takes whatever it is offered (bars, resizers).
    Fill,
    Docked,
    Stack,
    Grid,
    Table,
    TableRow,
    ScrollControl,
    ScrollArea,
    Splitter,
    Properties,
    PropertyRow,
}

impl LayoutPolicy {
    fn of(widget: &Widget) -> Self {
        match widget {
            Widget::Label { .. } | Widget::Button { .. } | Widget::TabButton { .. } => {
                LayoutPolicy::Text
            }
            Widget::CheckBox { .. } => LayoutPolicy::CheckBox,
            Widget::SplitterBar | Widget::Resizer(_) | Widget::ScrollBar(_) => LayoutPolicy::Fill,
            Widget::Panel | Widget::Dock(_) | Widget::TabControl(_) => LayoutPolicy::Docked,
            Widget::Stack(_) => LayoutPolicy::Stack,
            Widget::Grid(_) => LayoutPolicy::Grid,
            Widget::Table(_) => LayoutPolicy::Table,
            Widget::TableRow(_) => LayoutPolicy::TableRow,
            Widget::ListBox(_) | Widget::ScrollControl(_) => LayoutPolicy::ScrollControl,
            Widget::ScrollArea(_) => LayoutPolicy::ScrollArea,
            Widget::HorizontalSplitter(_) => LayoutPolicy::Splitter,
            Widget::Properties(_) => LayoutPolicy::Properties,
            Widget::PropertyRow { .. } => LayoutPolicy::PropertyRow,
        }
    }
}

/// Typed accessors returning `WrongKind` / `StaleWidget` on mismatch.
macro_rules! widget_accessors {
    ($get:ident, $get_mut:ident, $variant:ident, $ty:ty, $name:literal) => {
        pub(crate) fn $get(&self, id: WidgetId) -> Result<&$ty, UiError> {
            match self.arena.get(id).map(|n| &n.widget) {
                Some(Widget::$variant(w)) => Ok(w),
                Some(_) => Err(UiError::WrongKind { id, expected: $name }),
                None => Err(UiError::StaleWidget(id)),
            }
        }

        pub(crate) fn $get_mut(&mut self, id: WidgetId) -> Result<&mut $ty, UiError> {
            match self.arena.get_mut(id).map(|n| &mut n.widget) {
                Some(Widget::$variant(w)) => Ok(w),
                Some(_) => Err(UiError::WrongKind { id, expected: $name }),
                None => Err(UiError::StaleWidget(id)),
            }
        }
    };
}

// ---------------------------------------------------------------------------
// WidgetTree
// ---------------------------------------------------------------------------

/// Arena-backed retained widget tree.
pub struct WidgetTree {
    arena: SlotMap<WidgetId, WidgetNode>,
    roots: Vec<WidgetId>,
    pub events: EventBus,
    metrics: Box<dyn TextMeasure>,
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::with_metrics(Box::new(FixedMetrics::default()))
    }

    pub fn with_metrics(metrics: Box<dyn TextMeasure>) -> Self {
        Self {
            arena: SlotMap::with_key(),
            roots: Vec::new(),
            events: EventBus::new(),
            metrics,
        }
    }

    /// Replace the text metrics. Invalidates every root.
    pub fn set_metrics(&mut self, metrics: Box<dyn TextMeasure>) {
        self.metrics = metrics;
        let ids: Vec<WidgetId> = self.arena.keys().collect();
        for id in ids {
            self.invalidate_local(id);
        }
    }

    widget_accessors!(stack, stack_mut, Stack, StackLayout, "stack");
    widget_accessors!(grid, grid_mut, Grid, GridLayout, "grid");
    widget_accessors!(table, table_mut, Table, Table, "table");
    widget_accessors!(table_row, table_row_mut, TableRow, TableRow, "table row");
    widget_accessors!(list_box, list_box_mut, ListBox, ListBox, "list box");
    widget_accessors!(scroll_area, scroll_area_mut, ScrollArea, ScrollArea, "scroll area");
    widget_accessors!(scroll_bar, scroll_bar_mut, ScrollBar, ScrollBar, "scroll bar");
    widget_accessors!(
        splitter,
        splitter_mut,
        HorizontalSplitter,
        HorizontalSplitter,
        "horizontal splitter"
    );
    widget_accessors!(properties, properties_mut, Properties, Properties, "property grid");
    widget_accessors!(dock_base, dock_base_mut, Dock, DockBase, "dock");
    widget_accessors!(resizer, resizer_mut, Resizer, Resizer, "resizer");
    widget_accessors!(tab_control, tab_control_mut, TabControl, TabControl, "tab control");

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    /// Insert a widget as a root (no parent).
    pub fn insert_root(&mut self, widget: Widget) -> WidgetId {
        let id = self.arena.insert(WidgetNode::new(widget, None));
        self.roots.push(id);
        id
    }

    /// Insert a widget as the last child of `parent`.
    ///
    /// Fails with `TooManyChildren` when `parent` has a fixed number of
    /// content slots that are all taken.
    pub fn insert(&mut self, parent: WidgetId, widget: Widget) -> Result<WidgetId, UiError> {
        let parent_node = self.arena.get(parent).ok_or(UiError::StaleWidget(parent))?;
        let takes_section = matches!(parent_node.widget, Widget::HorizontalSplitter(_))
            && !matches!(widget, Widget::SplitterBar);
        if takes_section
            && let Widget::HorizontalSplitter(s) = &parent_node.widget
            && s.sections.iter().all(Option::is_some)
        {
            return Err(UiError::TooManyChildren {
                container: "horizontal splitter",
                limit: 2,
            });
        }

        let id = self.arena.insert(WidgetNode::new(widget, Some(parent)));
        if let Some(parent_node) = self.arena.get_mut(parent) {
            parent_node.children.push(id);
            if takes_section
                && let Widget::HorizontalSplitter(s) = &mut parent_node.widget
                && let Some(slot) = s.sections.iter_mut().find(|s| s.is_none())
            {
                *slot = Some(id);
            }
        }
        self.invalidate(parent);
        Ok(id)
    }

    /// Remove a widget and all its descendants, unhooking composite
    /// bookkeeping and dropping their listeners.
    pub fn remove(&mut self, id: WidgetId) -> Result<(), UiError> {
        let Some(node) = self.arena.get(id) else {
            return Err(UiError::StaleWidget(id));
        };
        let parent = node.parent;

        let mut to_remove = Vec::new();
        Self::collect_subtree(&self.arena, id, &mut to_remove);

        // Rows leaving a list box leave its selection too.
        for &rid in &to_remove {
            if let Some(Widget::TableRow(row)) = self.arena.get(rid).map(|n| &n.widget)
                && let Some(list) = row.list
                && let Ok(lb) = self.list_box_mut(list)
            {
                lb.selected.retain(|r| *r != rid);
            }
        }

        if let Some(parent_id) = parent {
            if let Some(parent_node) = self.arena.get_mut(parent_id) {
                parent_node.children.retain(|c| *c != id);
            }
            self.unhook(parent_id, id);
            self.invalidate(parent_id);
        }
        self.roots.retain(|r| *r != id);

        for rid in to_remove {
            self.events.forget(rid);
            self.arena.remove(rid);
        }
        Ok(())
    }

    /// Clear references a composite parent keeps to a child being removed.
    fn unhook(&mut self, parent: WidgetId, child: WidgetId) {
        let grandparent = self.arena.get(parent).and_then(|n| n.parent);
        let Some(parent_node) = self.arena.get_mut(parent) else {
            return;
        };
        match &mut parent_node.widget {
            Widget::HorizontalSplitter(s) => {
                for (i, slot) in s.sections.iter_mut().enumerate() {
                    if *slot == Some(child) {
                        *slot = None;
                        if s.zoomed == Some(i) {
                            s.zoomed = None;
                        }
                    }
                }
            }
            Widget::Dock(d) => d.forget_child(child),
            Widget::Table(t) => t.row_measurement_dirty = true,
            _ => {}
        }
        // Tab buttons live one level below their tab control.
        if let Some(gp) = grandparent
            && let Ok(tc) = self.tab_control_mut(gp)
            && tc.current == Some(child)
        {
            tc.current = None;
        }
    }

    /// `id` followed by all of its descendants, depth first.
    pub fn subtree(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        if self.arena.contains_key(id) {
            Self::collect_subtree(&self.arena, id, &mut out);
        }
        out
    }

    fn collect_subtree(
        arena: &SlotMap<WidgetId, WidgetNode>,
        id: WidgetId,
        out: &mut Vec<WidgetId>,
    ) {
        out.push(id);
        if let Some(node) = arena.get(id) {
            for &child in &node.children {
                Self::collect_subtree(arena, child, out);
            }
        }
    }

    /// Move `id` to the end of `new_parent`'s children.
    pub(crate) fn reparent(&mut self, id: WidgetId, new_parent: WidgetId) -> Result<(), UiError> {
        if !self.arena.contains_key(new_parent) {
            return Err(UiError::StaleWidget(new_parent));
        }
        let old_parent = self
            .arena
            .get(id)
            .ok_or(UiError::StaleWidget(id))?
            .parent;
        if let Some(old) = old_parent {
            if let Some(n) = self.arena.get_mut(old) {
                n.children.retain(|c| *c != id);
            }
            self.invalidate(old);
        }
        self.roots.retain(|r| *r != id);
        if let Some(n) = self.arena.get_mut(new_parent) {
            n.children.push(id);
        }
        if let Some(n) = self.arena.get_mut(id) {
            n.parent = Some(new_parent);
        }
        self.invalidate(id);
        Ok(())
    }

    /// Get a reference to a widget node.
    pub fn get(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.arena.get(id)
    }

    /// Get a mutable reference to a widget node.
    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut WidgetNode> {
        self.arena.get_mut(id)
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.arena.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Root widget ids.
    pub fn roots(&self) -> &[WidgetId] {
        &self.roots
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.arena.get(id)?.parent
    }

    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.arena.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// First descendant of `root` (depth-first, `root` included) with `name`.
    pub fn find_by_name(&self, root: WidgetId, name: &str) -> Option<WidgetId> {
        let node = self.arena.get(root)?;
        if node.name == name {
            return Some(root);
        }
        node.children
            .iter()
            .find_map(|&child| self.find_by_name(child, name))
    }

    fn node_mut(&mut self, id: WidgetId) -> Result<&mut WidgetNode, UiError> {
        self.arena.get_mut(id).ok_or(UiError::StaleWidget(id))
    }

    // ------------------------------------------------------------------
    // Invalidation
    // ------------------------------------------------------------------

    /// Mark a widget and all its ancestors as needing measure and arrange.
    pub fn invalidate(&mut self, id: WidgetId) {
        let mut current = Some(id);
        while let Some(cid) = current {
            let Some(node) = self.arena.get_mut(cid) else {
                break;
            };
            node.dirty = true;
            node.last_available = None;
            current = node.parent;
        }
    }

    /// Drop only this node's measure cache. Used by containers that push
    /// new constraints into children during their own measure.
    pub(crate) fn invalidate_local(&mut self, id: WidgetId) {
        if let Some(node) = self.arena.get_mut(id) {
            node.dirty = true;
            node.last_available = None;
        }
    }

    // ------------------------------------------------------------------
    // Setters
    // ------------------------------------------------------------------

    pub fn set_padding(&mut self, id: WidgetId, padding: Padding) -> Result<(), UiError> {
        self.node_mut(id)?.padding = padding;
        self.invalidate(id);
        Ok(())
    }

    pub fn set_margin(&mut self, id: WidgetId, margin: Margin) -> Result<(), UiError> {
        self.node_mut(id)?.margin = margin;
        self.invalidate(id);
        Ok(())
    }

    pub fn set_dock(&mut self, id: WidgetId, dock: Dock) -> Result<(), UiError> {
        self.node_mut(id)?.dock = dock;
        self.invalidate(id);
        Ok(())
    }

    pub fn set_alignment(&mut self, id: WidgetId, h: HAlign, v: VAlign) -> Result<(), UiError> {
        let node = self.node_mut(id)?;
        node.halign = h;
        node.valign = v;
        self.invalidate(id);
        Ok(())
    }

    pub fn set_halign(&mut self, id: WidgetId, h: HAlign) -> Result<(), UiError> {
        self.node_mut(id)?.halign = h;
        self.invalidate(id);
        Ok(())
    }

    pub fn set_valign(&mut self, id: WidgetId, v: VAlign) -> Result<(), UiError> {
        self.node_mut(id)?.valign = v;
        self.invalidate(id);
        Ok(())
    }

    pub fn set_collapsed(&mut self, id: WidgetId, collapsed: bool) -> Result<(), UiError> {
        let node = self.node_mut(id)?;
        if node.collapsed != collapsed {
            node.collapsed = collapsed;
            self.invalidate(id);
        }
        Ok(())
    }

    /// Hidden widgets keep their space but are skipped by render and hit testing.
    pub fn set_hidden(&mut self, id: WidgetId, hidden: bool) -> Result<(), UiError> {
        self.node_mut(id)?.hidden = hidden;
        Ok(())
    }

    pub fn set_disabled(&mut self, id: WidgetId, disabled: bool) -> Result<(), UiError> {
        self.node_mut(id)?.disabled = disabled;
        Ok(())
    }

    pub fn set_position(&mut self, id: WidgetId, position: Point) -> Result<(), UiError> {
        self.node_mut(id)?.position = position;
        self.invalidate(id);
        Ok(())
    }

    /// Fixed size request. `None` on an axis means "size to content".
    pub fn set_size(
        &mut self,
        id: WidgetId,
        width: Option<i32>,
        height: Option<i32>,
    ) -> Result<(), UiError> {
        let node = self.node_mut(id)?;
        node.width = width.map(|w| w.max(0));
        node.height = height.map(|h| h.max(0));
        self.invalidate(id);
        Ok(())
    }

    pub fn set_width(&mut self, id: WidgetId, width: Option<i32>) -> Result<(), UiError> {
        self.node_mut(id)?.width = width.map(|w| w.max(0));
        self.invalidate(id);
        Ok(())
    }

    pub fn set_height(&mut self, id: WidgetId, height: Option<i32>) -> Result<(), UiError> {
        self.node_mut(id)?.height = height.map(|h| h.max(0));
        self.invalidate(id);
        Ok(())
    }

    pub fn set_min_size(&mut self, id: WidgetId, min: Size) -> Result<(), UiError> {
        self.node_mut(id)?.min_size = min;
        self.invalidate(id);
        Ok(())
    }

    pub fn set_max_size(&mut self, id: WidgetId, max: Size) -> Result<(), UiError> {
        self.node_mut(id)?.max_size = max;
        self.invalidate(id);
        Ok(())
    }

    pub fn set_name(&mut self, id: WidgetId, name: impl Into<String>) -> Result<(), UiError> {
        self.node_mut(id)?.name = name.into();
        Ok(())
    }

    pub fn set_user_data(
        &mut self,
        id: WidgetId,
        data: Option<Box<dyn Any>>,
    ) -> Result<(), UiError> {
        self.node_mut(id)?.user_data = data;
        Ok(())
    }

    /// Replace the text of a label, button or tab button.
    pub fn set_text(&mut self, id: WidgetId, value: impl Into<String>) -> Result<(), UiError> {
        match &mut self.node_mut(id)?.widget {
            Widget::Label { text } | Widget::Button { text, .. } | Widget::TabButton { text, .. } => {
                *text = value.into();
            }
            _ => {
                return Err(UiError::WrongKind {
                    id,
                    expected: "text widget",
                });
            }
        }
        self.invalidate(id);
        Ok(())
    }

    pub fn text(&self, id: WidgetId) -> Option<&str> {
        self.arena.get(id)?.widget.text()
    }

    /// Move `id` to the end of its parent's children: drawn last, docked
    /// innermost.
    pub fn bring_to_front(&mut self, id: WidgetId) -> Result<(), UiError> {
        let parent = self.arena.get(id).ok_or(UiError::StaleWidget(id))?.parent;
        if let Some(p) = parent {
            if let Some(n) = self.arena.get_mut(p) {
                n.children.retain(|c| *c != id);
                n.children.push(id);
            }
            self.invalidate(p);
        }
        Ok(())
    }

    /// Move `id` to the start of its parent's children: drawn first, docked
    /// outermost.
    pub fn send_to_back(&mut self, id: WidgetId) -> Result<(), UiError> {
        let parent = self.arena.get(id).ok_or(UiError::StaleWidget(id))?.parent;
        if let Some(p) = parent {
            if let Some(n) = self.arena.get_mut(p) {
                n.children.retain(|c| *c != id);
                n.children.insert(0, id);
            }
            self.invalidate(p);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Simple widgets
    // ------------------------------------------------------------------

    pub fn add_panel(&mut self, parent: WidgetId) -> Result<WidgetId, UiError> {
        self.insert(parent, Widget::Panel)
    }

    pub fn add_label(&mut self, parent: WidgetId, text: impl Into<String>) -> Result<WidgetId, UiError> {
        self.insert(parent, Widget::Label { text: text.into() })
    }

    pub fn add_button(&mut self, parent: WidgetId, text: impl Into<String>) -> Result<WidgetId, UiError> {
        let id = self.insert(
            parent,
            Widget::Button {
                text: text.into(),
                toggle: None,
            },
        )?;
        self.set_padding(id, BUTTON_PADDING)?;
        Ok(id)
    }

    /// Button that stays pressed until clicked again.
    pub fn add_toggle_button(
        &mut self,
        parent: WidgetId,
        text: impl Into<String>,
    ) -> Result<WidgetId, UiError> {
        let id = self.insert(
            parent,
            Widget::Button {
                text: text.into(),
                toggle: Some(Toggle::default()),
            },
        )?;
        self.set_padding(id, BUTTON_PADDING)?;
        Ok(id)
    }

    pub fn add_check_box(&mut self, parent: WidgetId) -> Result<WidgetId, UiError> {
        self.insert(
            parent,
            Widget::CheckBox {
                state: Toggle::default(),
            },
        )
    }

    /// Toggle state of a check box or toggle button.
    pub fn is_checked(&self, id: WidgetId) -> Option<bool> {
        match &self.arena.get(id)?.widget {
            Widget::CheckBox { state } => Some(state.on),
            Widget::Button {
                toggle: Some(state),
                ..
            } => Some(state.on),
            _ => None,
        }
    }

    /// Set a toggle state, emitting `Toggled` when it changes.
    pub fn set_checked(&mut self, id: WidgetId, on: bool) -> Result<(), UiError> {
        let state = match &mut self.node_mut(id)?.widget {
            Widget::CheckBox { state } => state,
            Widget::Button {
                toggle: Some(state),
                ..
            } => state,
            _ => {
                return Err(UiError::WrongKind {
                    id,
                    expected: "check box or toggle button",
                });
            }
        };
        if state.on != on {
            state.on = on;
            self.events.emit(Event::Toggled { source: id, on });
        }
        Ok(())
    }

    /// Activate a button or check box as if clicked: flips toggle state
    /// (emitting `Toggled`) then emits `Clicked`. Disabled widgets ignore it.
    pub fn click(&mut self, id: WidgetId) -> Result<(), UiError> {
        let node = self.node_mut(id)?;
        if node.disabled {
            return Ok(());
        }
        let toggled = match &mut node.widget {
            Widget::CheckBox { state } => Some(state.flip()),
            Widget::Button { toggle, .. } => toggle.as_mut().map(Toggle::flip),
            _ => {
                return Err(UiError::WrongKind {
                    id,
                    expected: "button or check box",
                });
            }
        };
        if let Some(on) = toggled {
            self.events.emit(Event::Toggled { source: id, on });
        }
        self.events.emit(Event::Clicked { source: id });
        Ok(())
    }

    /// Subscribe a listener to one kind of event raised by `source`.
    pub fn subscribe(
        &mut self,
        source: WidgetId,
        kind: EventKind,
        listener: impl FnMut(&Event) + 'static,
    ) -> Result<(), UiError> {
        if !self.arena.contains_key(source) {
            return Err(UiError::StaleWidget(source));
        }
        self.events.subscribe(source, kind, Box::new(listener));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Coordinates & hit testing
    // ------------------------------------------------------------------

    /// Canvas-space origin of a widget (sum of ancestor offsets).
    pub fn canvas_position(&self, id: WidgetId) -> Point {
        let mut pos = Point::ZERO;
        let mut current = Some(id);
        while let Some(cid) = current {
            let Some(node) = self.arena.get(cid) else {
                break;
            };
            pos = pos + node.bounds.origin();
            current = node.parent;
        }
        pos
    }

    /// Canvas-space rectangle of a widget.
    pub fn canvas_bounds(&self, id: WidgetId) -> Rect {
        let size = self.arena.get(id).map(|n| n.bounds.size()).unwrap_or(Size::ZERO);
        let origin = self.canvas_position(id);
        Rect::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn canvas_to_local(&self, id: WidgetId, p: Point) -> Point {
        p - self.canvas_position(id)
    }

    /// Find the topmost widget under a canvas-space point.
    /// Walks back-to-front: last child is topmost.
    pub fn hit_test(&self, root: WidgetId, p: Point) -> Option<WidgetId> {
        self.hit_test_node(root, p, Point::ZERO)
    }

    fn hit_test_node(&self, id: WidgetId, p: Point, origin: Point) -> Option<WidgetId> {
        let node = self.arena.get(id)?;
        if node.collapsed || node.hidden {
            return None;
        }
        let rect = node.bounds.offset(origin);
        if !rect.contains(p) {
            return None;
        }
        // Children drawn on top: check last child first.
        for &child in node.children.iter().rev() {
            if let Some(hit) = self.hit_test_node(child, p, rect.origin()) {
                return Some(hit);
            }
        }
        // Labels pass clicks to whatever hosts them (table cells, tab pages).
        if matches!(node.widget, Widget::Label { .. }) {
            return None;
        }
        Some(id)
    }

    /// Collect all focusable widgets under `root` in tree order.
    pub fn focusable_widgets(&self, root: WidgetId) -> Vec<WidgetId> {
        let mut result = Vec::new();
        self.collect_focusable(root, &mut result);
        result
    }

    fn collect_focusable(&self, id: WidgetId, out: &mut Vec<WidgetId>) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        if node.collapsed || node.hidden || node.disabled {
            return;
        }
        if node.widget.is_focusable() {
            out.push(id);
        }
        for &child in &node.children {
            self.collect_focusable(child, out);
        }
    }

    /// Nearest ancestor (or `id` itself) matching `pred`.
    pub fn find_ancestor(
        &self,
        id: WidgetId,
        pred: impl Fn(&Widget) -> bool,
    ) -> Option<WidgetId> {
        let mut current = Some(id);
        while let Some(cid) = current {
            let node = self.arena.get(cid)?;
            if pred(&node.widget) {
                return Some(cid);
            }
            current = node.parent;
        }
        None
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// Full layout pass: measure `root` against `size`, then arrange it
    /// into `(0, 0, size)`.
    pub fn layout(&mut self, root: WidgetId, size: Size) {
        log::trace!("layout {:?} at {}x{}", root, size.width, size.height);
        self.measure(root, size);
        self.arrange(root, Rect::from_size(size));
    }

    /// Desired size of `id` (margin included) for the offered space.
    /// Never touches bounds. Cached until the node is invalidated or
    /// offered a different size.
    pub fn measure(&mut self, id: WidgetId, available: Size) -> Size {
        let Some(node) = self.arena.get_mut(id) else {
            return Size::ZERO;
        };
        if node.collapsed {
            node.measured = Size::ZERO;
            return Size::ZERO;
        }
        if node.last_available == Some(available) {
            return node.measured;
        }

        let margin = node.margin;
        let (fixed_w, fixed_h) = (node.width, node.height);
        let (min, max) = (node.min_size, node.max_size);

        let mut inner = available - margin;
        if let Some(w) = fixed_w {
            inner.width = w;
        }
        if let Some(h) = fixed_h {
            inner.height = h;
        }
        inner = inner.min(max);

        let mut desired = self.measure_content(id, inner);
        if let Some(w) = fixed_w {
            desired.width = w;
        }
        if let Some(h) = fixed_h {
            desired.height = h;
        }
        let measured = desired.clamp(min, max) + margin;

        if let Some(node) = self.arena.get_mut(id) {
            node.measured = measured;
            node.last_available = Some(available);
        }
        measured
    }

    /// Commit bounds for `id` inside the parent-local `rect`, using the
    /// size from the latest measure.
    pub fn arrange(&mut self, id: WidgetId, rect: Rect) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        if node.collapsed {
            return;
        }
        let outer = rect.deflate(node.margin);
        let desired = node.measured - node.margin;

        let mut w = match node.halign {
            HAlign::Stretch => outer.width,
            _ => desired.width.min(outer.width),
        };
        let mut h = match node.valign {
            VAlign::Stretch => outer.height,
            _ => desired.height.min(outer.height),
        };
        if let Some(fw) = node.width {
            w = fw;
        }
        if let Some(fh) = node.height {
            h = fh;
        }
        let size = Size::new(w, h).clamp(node.min_size, node.max_size);

        let x = match node.halign {
            HAlign::Left | HAlign::Stretch => outer.x,
            HAlign::Center => outer.x + (outer.width - size.width) / 2,
            HAlign::Right => outer.right() - size.width,
        };
        let y = match node.valign {
            VAlign::Top | VAlign::Stretch => outer.y,
            VAlign::Center => outer.y + (outer.height - size.height) / 2,
            VAlign::Bottom => outer.bottom() - size.height,
        };

        let actual = self.arrange_content(id, size);
        if let Some(node) = self.arena.get_mut(id) {
            node.bounds = Rect::new(x, y, actual.width, actual.height);
            node.dirty = false;
        }
    }

    fn measure_content(&mut self, id: WidgetId, available: Size) -> Size {
        let Some(node) = self.arena.get(id) else {
            return Size::ZERO;
        };
        match LayoutPolicy::of(&node.widget) {
            LayoutPolicy::Text => {
                let text = node.widget.text().unwrap_or("");
                self.metrics.measure_text(text) + node.padding
            }
            LayoutPolicy::CheckBox => Size::new(CHECK_BOX_SIZE, CHECK_BOX_SIZE) + node.padding,
            LayoutPolicy::Fill => available,
            LayoutPolicy::Docked => self.measure_docked(id, available),
            LayoutPolicy::Stack => self.measure_stack(id, available),
            LayoutPolicy::Grid => self.measure_grid(id, available),
            LayoutPolicy::Table => self.measure_table(id, available),
            LayoutPolicy::TableRow => self.measure_table_row(id, available),
            LayoutPolicy::ScrollControl => self.measure_scroll_control(id, available),
            LayoutPolicy::ScrollArea => self.measure_scroll_area(id, available),
            LayoutPolicy::Splitter => self.measure_splitter(id, available),
            LayoutPolicy::Properties => self.measure_properties(id, available),
            LayoutPolicy::PropertyRow => self.measure_property_row(id, available),
        }
    }

    fn arrange_content(&mut self, id: WidgetId, size: Size) -> Size {
        let Some(node) = self.arena.get(id) else {
            return size;
        };
        match LayoutPolicy::of(&node.widget) {
            LayoutPolicy::Text | LayoutPolicy::CheckBox => size,
            LayoutPolicy::Fill => self.arrange_leaf(id, size),
            LayoutPolicy::Docked => self.arrange_docked(id, size),
            LayoutPolicy::Stack => self.arrange_stack(id, size),
            LayoutPolicy::Grid => self.arrange_grid(id, size),
            LayoutPolicy::Table => self.arrange_table(id, size),
            LayoutPolicy::TableRow => self.arrange_table_row(id, size),
            LayoutPolicy::ScrollControl => self.arrange_scroll_control(id, size),
            LayoutPolicy::ScrollArea => self.arrange_scroll_area(id, size),
            LayoutPolicy::Splitter => self.arrange_splitter(id, size),
            LayoutPolicy::Properties => self.arrange_properties(id, size),
            LayoutPolicy::PropertyRow => self.arrange_property_row(id, size),
        }
    }

    /// Leaves that track their own arranged length (scroll bars).
    fn arrange_leaf(&mut self, id: WidgetId, size: Size) -> Size {
        if let Ok(bar) = self.scroll_bar_mut(id) {
            bar.resize(size);
        }
        size
    }

    /// Generic dock layout: Left/Right children consume width, Top/Bottom
    /// consume height in child order; Fill children share what is left;
    /// undocked children are measured against the whole content area and
    /// sit at their `position`.
    fn measure_docked(&mut self, id: WidgetId, available: Size) -> Size {
        let Some(node) = self.arena.get(id) else {
            return Size::ZERO;
        };
        let padding = node.padding;
        let children = node.children.clone();
        let inner = available - padding;

        let (mut parent_w, mut parent_h) = (0, 0);
        let (mut acc_w, mut acc_h) = (0, 0);
        let mut fill = Vec::new();
        let mut free = Size::ZERO;

        for child in children {
            let Some(c) = self.arena.get(child) else {
                continue;
            };
            let (dock, position) = (c.dock, c.position);
            match dock {
                Dock::Fill => fill.push(child),
                Dock::None => {
                    let s = self.measure(child, inner);
                    free = free.max(Size::new(position.x + s.width, position.y + s.height));
                }
                Dock::Left | Dock::Right => {
                    let budget = Size::new(inner.width - acc_w, inner.height - acc_h).max(Size::ZERO);
                    let s = self.measure(child, budget);
                    parent_h = parent_h.max(acc_h + s.height);
                    acc_w += s.width;
                }
                Dock::Top | Dock::Bottom => {
                    let budget = Size::new(inner.width - acc_w, inner.height - acc_h).max(Size::ZERO);
                    let s = self.measure(child, budget);
                    parent_w = parent_w.max(acc_w + s.width);
                    acc_h += s.height;
                }
            }
        }

        let remaining = Size::new(inner.width - acc_w, inner.height - acc_h).max(Size::ZERO);
        let mut fill_size = Size::ZERO;
        for child in fill {
            fill_size = fill_size.max(self.measure(child, remaining));
        }
        parent_w = parent_w.max(acc_w + fill_size.width);
        parent_h = parent_h.max(acc_h + fill_size.height);

        Size::new(parent_w, parent_h).max(free) + padding
    }

    fn arrange_docked(&mut self, id: WidgetId, size: Size) -> Size {
        let Some(node) = self.arena.get(id) else {
            return size;
        };
        let padding = node.padding;
        let children = node.children.clone();
        let mut area = Rect::from_size(size).deflate(padding);
        let mut fill = Vec::new();

        for child in children {
            let Some(c) = self.arena.get(child) else {
                continue;
            };
            if c.collapsed {
                continue;
            }
            let (dock, m, position) = (c.dock, c.measured, c.position);
            match dock {
                Dock::Fill => fill.push(child),
                Dock::None => {
                    let r = Rect::new(
                        padding.left + position.x,
                        padding.top + position.y,
                        m.width,
                        m.height,
                    );
                    self.arrange(child, r);
                }
                Dock::Left => {
                    let w = m.width.min(area.width);
                    self.arrange(child, Rect::new(area.x, area.y, w, area.height));
                    area.x += w;
                    area.width -= w;
                }
                Dock::Right => {
                    let w = m.width.min(area.width);
                    self.arrange(child, Rect::new(area.right() - w, area.y, w, area.height));
                    area.width -= w;
                }
                Dock::Top => {
                    let h = m.height.min(area.height);
                    self.arrange(child, Rect::new(area.x, area.y, area.width, h));
                    area.y += h;
                    area.height -= h;
                }
                Dock::Bottom => {
                    let h = m.height.min(area.height);
                    self.arrange(child, Rect::new(area.x, area.bottom() - h, area.width, h));
                    area.height -= h;
                }
            }
        }

        for child in fill {
            self.arrange(child, area);
        }
        size
    }

    // ------------------------------------------------------------------
    // Render
    // ------------------------------------------------------------------

    /// Walk visible widgets under `root`, calling the skin once per widget
    /// before its children and once more (overlay) after them.
    pub fn render(
        &self,
        root: WidgetId,
        skin: &mut dyn Skin,
        renderer: &mut dyn Renderer,
        state: &InteractionState,
    ) {
        let Some(node) = self.arena.get(root) else {
            return;
        };
        let clip = node.bounds;
        let parent_origin = self.canvas_position(root) - node.bounds.origin();
        self.render_node(root, parent_origin, clip, skin, renderer, state);
    }

    fn render_node(
        &self,
        id: WidgetId,
        origin: Point,
        clip: Rect,
        skin: &mut dyn Skin,
        renderer: &mut dyn Renderer,
        state: &InteractionState,
    ) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        if node.collapsed || node.hidden {
            return;
        }
        let bounds = node.bounds.offset(origin);
        let clip = clip.intersect(&bounds);
        if clip.is_empty() {
            return;
        }

        let view = ControlView {
            id,
            node,
            bounds,
            hovered: state.hovered == Some(id),
            pressed: state.pressed == Some(id),
            focused: state.focused == Some(id),
            active: self.is_active(node),
        };
        renderer.set_clip(clip);
        skin.draw(renderer, &view);

        for &child in &node.children {
            self.render_node(child, bounds.origin(), clip, skin, renderer, state);
        }

        renderer.set_clip(clip);
        skin.draw_overlay(renderer, &view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel_tree() -> (WidgetTree, WidgetId) {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Widget::Panel);
        (tree, root)
    }

    #[test]
    fn insert_root_and_child() {
        let (mut tree, root) = panel_tree();
        assert_eq!(tree.roots().len(), 1);

        let child = tree.add_label(root, "Hello").expect("insert");
        let root_node = tree.get(root).expect("root exists");
        assert_eq!(root_node.children, vec![child]);
        assert_eq!(tree.parent(child), Some(root));
    }

    #[test]
    fn insert_under_removed_parent_is_stale() {
        let (mut tree, root) = panel_tree();
        let a = tree.add_panel(root).expect("insert");
        tree.remove(a).expect("remove");
        assert!(matches!(
            tree.add_panel(a),
            Err(UiError::StaleWidget(id)) if id == a
        ));
        assert!(matches!(tree.remove(a), Err(UiError::StaleWidget(_))));
    }

    #[test]
    fn remove_subtree() {
        let (mut tree, root) = panel_tree();
        let child = tree.add_panel(root).expect("insert");
        let grandchild = tree.add_label(child, "B").expect("insert");
        tree.subscribe(grandchild, EventKind::Clicked, |_| {})
            .expect("subscribe");

        tree.remove(child).expect("remove");

        assert!(tree.get(child).is_none());
        assert!(tree.get(grandchild).is_none());
        assert!(tree.get(root).expect("root").children.is_empty());
        assert_eq!(tree.events.listener_count(grandchild), 0);
        assert!(tree.get(root).expect("root").dirty);
    }

    #[test]
    fn dirty_propagation() {
        let (mut tree, root) = panel_tree();
        let mid = tree.add_panel(root).expect("insert");
        let leaf = tree.add_label(mid, "X").expect("insert");

        tree.layout(root, Size::new(800, 600));
        assert!(!tree.get(root).expect("root").dirty);
        assert!(!tree.get(leaf).expect("leaf").dirty);

        tree.invalidate(leaf);
        assert!(tree.get(leaf).expect("leaf").dirty);
        assert!(tree.get(mid).expect("mid").dirty);
        assert!(tree.get(root).expect("root").dirty);
    }

    #[test]
    fn label_measures_text_plus_margin() {
        let (mut tree, root) = panel_tree();
        let label = tree.add_label(root, "abcd").expect("insert");
        tree.set_margin(label, Edges::all(2)).expect("margin");
        let s = tree.measure(label, Size::new(500, 500));
        // 4 glyphs * 7px + 4 margin, 14px line + 4 margin.
        assert_eq!(s, Size::new(32, 18));
    }

    #[test]
    fn collapsed_measures_zero_and_is_not_arranged() {
        let (mut tree, root) = panel_tree();
        let label = tree.add_label(root, "hidden").expect("insert");
        tree.set_collapsed(label, true).expect("collapse");
        tree.layout(root, Size::new(100, 100));
        let node = tree.get(label).expect("label");
        assert_eq!(node.measured, Size::ZERO);
        assert_eq!(node.bounds, Rect::EMPTY);
    }

    #[test]
    fn measure_is_cached_until_invalidated() {
        let (mut tree, root) = panel_tree();
        let label = tree.add_label(root, "abc").expect("insert");
        let first = tree.measure(root, Size::new(100, 100));
        // Mutating a field directly bypasses invalidation: cache still answers.
        if let Some(Widget::Label { text }) = tree.get_mut(label).map(|n| &mut n.widget) {
            *text = "abcdefgh".into();
        }
        assert_eq!(tree.measure(root, Size::new(100, 100)), first);

        tree.invalidate(label);
        let second = tree.measure(root, Size::new(100, 100));
        assert_eq!(second.width, 8 * 7);
    }

    #[test]
    fn fixed_and_min_max_sizes() {
        let (mut tree, root) = panel_tree();
        let a = tree.add_label(root, "abcdefghij").expect("insert");
        tree.set_width(a, Some(30)).expect("width");
        assert_eq!(tree.measure(a, Size::new(500, 500)).width, 30);

        let b = tree.add_label(root, "ab").expect("insert");
        tree.set_min_size(b, Size::new(50, 20)).expect("min");
        assert_eq!(tree.measure(b, Size::new(500, 500)), Size::new(50, 20));

        let c = tree.add_label(root, "abcdefghij").expect("insert");
        tree.set_max_size(c, Size::new(40, 10)).expect("max");
        assert_eq!(tree.measure(c, Size::new(500, 500)), Size::new(40, 10));
    }

    #[test]
    fn alignment_places_measured_size() {
        let (mut tree, root) = panel_tree();
        let label = tree.add_label(root, "ab").expect("insert");
        tree.set_dock(label, Dock::Fill).expect("dock");
        tree.set_alignment(label, HAlign::Center, VAlign::Bottom)
            .expect("align");
        tree.layout(root, Size::new(100, 100));
        // 14x14 label centered horizontally, bottom-aligned.
        assert_eq!(tree.get(label).expect("label").bounds, Rect::new(43, 86, 14, 14));

        tree.set_alignment(label, HAlign::Right, VAlign::Top).expect("align");
        tree.layout(root, Size::new(100, 100));
        assert_eq!(tree.get(label).expect("label").bounds, Rect::new(86, 0, 14, 14));
    }

    #[test]
    fn docked_children_consume_edges_in_order() {
        let (mut tree, root) = panel_tree();
        tree.set_padding(root, Edges::all(1)).expect("padding");
        let left = tree.add_panel(root).expect("insert");
        tree.set_dock(left, Dock::Left).expect("dock");
        tree.set_width(left, Some(20)).expect("w");
        let top = tree.add_panel(root).expect("insert");
        tree.set_dock(top, Dock::Top).expect("dock");
        tree.set_height(top, Some(10)).expect("h");
        let fill = tree.add_panel(root).expect("insert");
        tree.set_dock(fill, Dock::Fill).expect("dock");
        let free = tree.add_label(root, "x").expect("insert");
        tree.set_position(free, Point::new(5, 6)).expect("pos");

        tree.layout(root, Size::new(102, 102));
        assert_eq!(tree.get(left).expect("left").bounds, Rect::new(1, 1, 20, 100));
        assert_eq!(tree.get(top).expect("top").bounds, Rect::new(21, 1, 80, 10));
        assert_eq!(tree.get(fill).expect("fill").bounds, Rect::new(21, 11, 80, 90));
        assert_eq!(tree.get(free).expect("free").bounds, Rect::new(6, 7, 7, 14));
    }

    #[test]
    fn docked_measure_reports_required_space() {
        let (mut tree, root) = panel_tree();
        tree.set_padding(root, Edges::all(2)).expect("padding");
        let left = tree.add_label(root, "abc").expect("insert");
        tree.set_dock(left, Dock::Left).expect("dock");
        let fill = tree.add_label(root, "abcdef").expect("insert");
        tree.set_dock(fill, Dock::Fill).expect("dock");
        let s = tree.measure(root, Size::new(500, 500));
        assert_eq!(s, Size::new(21 + 42 + 4, 14 + 4));
    }

    #[test]
    fn bring_to_front_and_send_to_back_reorder() {
        let (mut tree, root) = panel_tree();
        let a = tree.add_panel(root).expect("a");
        let b = tree.add_panel(root).expect("b");
        let c = tree.add_panel(root).expect("c");
        tree.bring_to_front(a).expect("front");
        assert_eq!(tree.children(root), &[b, c, a]);
        tree.send_to_back(c).expect("back");
        assert_eq!(tree.children(root), &[c, b, a]);
    }

    #[test]
    fn hit_test_topmost_and_hidden() {
        let (mut tree, root) = panel_tree();
        let under = tree.add_panel(root).expect("under");
        tree.set_dock(under, Dock::Fill).expect("dock");
        let over = tree.add_panel(root).expect("over");
        tree.set_dock(over, Dock::Fill).expect("dock");
        tree.layout(root, Size::new(50, 50));

        assert_eq!(tree.hit_test(root, Point::new(10, 10)), Some(over));
        tree.set_hidden(over, true).expect("hide");
        assert_eq!(tree.hit_test(root, Point::new(10, 10)), Some(under));
        assert_eq!(tree.hit_test(root, Point::new(60, 10)), None);
    }

    #[test]
    fn canvas_position_sums_ancestors() {
        let (mut tree, root) = panel_tree();
        tree.set_padding(root, Edges::all(5)).expect("padding");
        let inner = tree.add_panel(root).expect("inner");
        tree.set_dock(inner, Dock::Fill).expect("dock");
        tree.set_padding(inner, Edges::all(3)).expect("padding");
        let leaf = tree.add_panel(inner).expect("leaf");
        tree.set_dock(leaf, Dock::Fill).expect("dock");
        tree.layout(root, Size::new(100, 100));

        assert_eq!(tree.canvas_position(leaf), Point::new(8, 8));
        assert_eq!(tree.canvas_to_local(leaf, Point::new(10, 20)), Point::new(2, 12));
    }

    #[test]
    fn click_flips_toggle_and_emits() {
        let (mut tree, root) = panel_tree();
        let check = tree.add_check_box(root).expect("insert");
        tree.events.set_recording(true);
        tree.click(check).expect("click");
        assert_eq!(tree.is_checked(check), Some(true));
        assert_eq!(
            tree.events.drain_log(),
            vec![
                Event::Toggled {
                    source: check,
                    on: true
                },
                Event::Clicked { source: check },
            ]
        );

        let label = tree.add_label(root, "x").expect("insert");
        assert!(matches!(tree.click(label), Err(UiError::WrongKind { .. })));
    }

    #[test]
    fn find_by_name_depth_first() {
        let (mut tree, root) = panel_tree();
        let a = tree.add_panel(root).expect("a");
        let b = tree.add_label(a, "x").expect("b");
        tree.set_name(b, "target").expect("name");
        assert_eq!(tree.find_by_name(root, "target"), Some(b));
        assert_eq!(tree.find_by_name(root, "missing"), None);
    }
}

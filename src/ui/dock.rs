//! Docking containers, tab controls and tab drag and drop.
//!
//! A dock owns up to four lazily created child docks (one per edge) and,
//! when it is itself a child, a tab control filling its centre plus a thin
//! resizer on the edge facing its parent's centre. Tabs dropped near an edge
//! materialise the child dock for that edge. Whenever a tab leaves a dock,
//! empty child docks collapse and a dock whose own strip emptied adopts the
//! tabs of one of its children.

use super::error::UiError;
use super::events::Event;
use super::geometry::{Edges, Point, Rect, Size};
use super::widget::{Dock, Widget};
use super::{BUTTON_PADDING, WidgetId, WidgetTree};

/// Minimum fractional edge distance above which a drop targets the centre.
pub const DROP_FILL_THRESHOLD: f32 = 0.3;

/// Fractional edge distance below which an edge drop docks outermost.
pub const DROP_FAR_THRESHOLD: f32 = 0.2;

const CHILD_DOCK_SIZE: i32 = 200;
const RESIZER_THICKNESS: i32 = 2;
const MIN_DOCK_SIZE: Size = Size::new(30, 30);
const CONSOLIDATION_ORDER: [Dock; 4] = [Dock::Bottom, Dock::Top, Dock::Left, Dock::Right];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DockBase {
    pub left: Option<WidgetId>,
    pub right: Option<WidgetId>,
    pub top: Option<WidgetId>,
    pub bottom: Option<WidgetId>,
    /// Always present on child docks; root docks get one from
    /// `fill_tab_control`.
    pub tab_control: Option<WidgetId>,
    pub sizer: Option<WidgetId>,
    pub draw_hover: bool,
    pub drop_far: bool,
    /// Dock-local highlight of where a hovering drop would land.
    pub hover_rect: Rect,
}

impl DockBase {
    pub fn child(&self, side: Dock) -> Option<WidgetId> {
        match side {
            Dock::Left => self.left,
            Dock::Right => self.right,
            Dock::Top => self.top,
            Dock::Bottom => self.bottom,
            Dock::None | Dock::Fill => None,
        }
    }

    fn child_slot(&mut self, side: Dock) -> Option<&mut Option<WidgetId>> {
        match side {
            Dock::Left => Some(&mut self.left),
            Dock::Right => Some(&mut self.right),
            Dock::Top => Some(&mut self.top),
            Dock::Bottom => Some(&mut self.bottom),
            Dock::None | Dock::Fill => None,
        }
    }

    /// Drop every reference to a widget that is leaving the dock.
    pub(crate) fn forget_child(&mut self, child: WidgetId) {
        for slot in [
            &mut self.left,
            &mut self.right,
            &mut self.top,
            &mut self.bottom,
            &mut self.tab_control,
            &mut self.sizer,
        ] {
            if *slot == Some(child) {
                *slot = None;
            }
        }
    }
}

/// Edge handle changing the fixed size of its parent dock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resizer {
    /// Edge of the parent the handle sits on; dragging away from the
    /// parent's centre grows it.
    pub resize_dir: Dock,
}

/// Tab strip plus one page per tab. Buttons live in `strip`; pages are the
/// control's other children, docked Fill, and every page except the current
/// one is collapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabControl {
    pub strip: WidgetId,
    /// Selected tab button.
    pub current: Option<WidgetId>,
    pub strip_position: Dock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageKind {
    /// A single tab button being dragged.
    TabButtonMove,
    /// A whole tab control being dragged.
    TabWindowMove,
    Custom(String),
}

/// Payload carried by a drag and drop operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPackage {
    pub kind: PackageKind,
    pub source: WidgetId,
}

/// Which region a drop at `p` inside a `size` dock targets, and whether an
/// edge drop is far enough out to dock outermost. `open` says whether a
/// side may take a new child dock.
fn drop_direction(size: Size, p: Point, open: impl Fn(Dock) -> bool) -> (Dock, bool) {
    if size.width <= 0 || size.height <= 0 {
        return (Dock::Fill, false);
    }
    let (w, h) = (size.width as f32, size.height as f32);
    let top = p.y as f32 / h;
    let left = p.x as f32 / w;
    let right = (size.width - p.x) as f32 / w;
    let bottom = (size.height - p.y) as f32 / h;
    let minimum = top.min(left).min(right).min(bottom);
    let far = minimum < DROP_FAR_THRESHOLD;

    if minimum > DROP_FILL_THRESHOLD {
        return (Dock::Fill, far);
    }
    for (side, distance) in [
        (Dock::Top, top),
        (Dock::Left, left),
        (Dock::Right, right),
        (Dock::Bottom, bottom),
    ] {
        if distance == minimum && open(side) {
            return (side, far);
        }
    }
    (Dock::Fill, far)
}

// ---------------------------------------------------------------------------
// Docks
// ---------------------------------------------------------------------------

impl WidgetTree {
    /// Top-level dock. Child docks are created on demand by `child_dock`.
    pub fn add_dock(&mut self, parent: WidgetId) -> Result<WidgetId, UiError> {
        let id = self.insert(parent, Widget::Dock(DockBase::default()))?;
        self.set_padding(id, Edges::ONE)?;
        self.set_min_size(id, MIN_DOCK_SIZE)?;
        Ok(id)
    }

    /// Existing child dock on `side`, if any. Never creates one.
    pub fn dock_child(&self, dock: WidgetId, side: Dock) -> Result<Option<WidgetId>, UiError> {
        Ok(self.dock_base(dock)?.child(side))
    }

    pub fn dock_tab_control(&self, dock: WidgetId) -> Result<Option<WidgetId>, UiError> {
        Ok(self.dock_base(dock)?.tab_control)
    }

    /// Child dock on `side`, created if missing and un-collapsed either way.
    pub fn child_dock(&mut self, dock: WidgetId, side: Dock) -> Result<WidgetId, UiError> {
        if !(side.is_horizontal_edge() || side.is_vertical_edge()) {
            return Err(UiError::InvalidDock(side));
        }
        let child = match self.dock_base(dock)?.child(side) {
            Some(child) => child,
            None => {
                let child = self.add_dock(dock)?;
                if side.is_horizontal_edge() {
                    self.set_width(child, Some(CHILD_DOCK_SIZE))?;
                } else {
                    self.set_height(child, Some(CHILD_DOCK_SIZE))?;
                }
                self.setup_child_dock(child, side)?;
                if let Some(slot) = self.dock_base_mut(dock)?.child_slot(side) {
                    *slot = Some(child);
                }
                log::debug!("created {side:?} child dock {child:?} under {dock:?}");
                child
            }
        };
        self.set_collapsed(child, false)?;
        Ok(child)
    }

    fn setup_child_dock(&mut self, dock: WidgetId, side: Dock) -> Result<(), UiError> {
        self.fill_tab_control(dock)?;
        self.set_dock(dock, side)?;

        let size_dir = side.opposite();
        if let Some(old) = self.dock_base(dock)?.sizer {
            self.remove(old)?;
        }
        let sizer = self.insert(dock, Widget::Resizer(Resizer { resize_dir: size_dir }))?;
        self.set_dock(sizer, size_dir)?;
        if size_dir.is_horizontal_edge() {
            self.set_width(sizer, Some(RESIZER_THICKNESS))?;
        } else {
            self.set_height(sizer, Some(RESIZER_THICKNESS))?;
        }
        self.dock_base_mut(dock)?.sizer = Some(sizer);
        Ok(())
    }

    /// The dock's own tab control filling its centre, created if missing.
    /// Child docks always have one; root docks get one on request so that
    /// Fill drops land somewhere.
    pub fn fill_tab_control(&mut self, dock: WidgetId) -> Result<WidgetId, UiError> {
        if let Some(tc) = self.dock_base(dock)?.tab_control {
            return Ok(tc);
        }
        let tc = self.add_tab_control(dock)?;
        self.set_dock(tc, Dock::Fill)?;
        self.set_tab_strip_position(tc, Dock::Bottom)?;
        self.dock_base_mut(dock)?.tab_control = Some(tc);
        Ok(tc)
    }

    /// No tabs anywhere in the dock's subtree.
    pub fn dock_is_empty(&self, dock: WidgetId) -> bool {
        let Ok(d) = self.dock_base(dock) else {
            return true;
        };
        if let Some(tc) = d.tab_control
            && self.tab_count(tc).unwrap_or(0) > 0
        {
            return false;
        }
        [d.left, d.right, d.top, d.bottom]
            .into_iter()
            .flatten()
            .all(|child| self.dock_is_empty(child))
    }

    /// Region a drop at the dock-local point would target. Records whether
    /// the drop is far out on the dock for the following `handle_drop`.
    pub fn dropped_tab_direction(&mut self, dock: WidgetId, local: Point) -> Result<Dock, UiError> {
        let size = self.get(dock).map(|n| n.bounds.size()).unwrap_or(Size::ZERO);
        let d = self.dock_base(dock)?;
        let open = |side: Dock| {
            d.child(side)
                .is_none_or(|c| self.get(c).is_none_or(|n| n.collapsed))
        };
        let (dir, far) = drop_direction(size, local, open);
        self.dock_base_mut(dock)?.drop_far = far;
        Ok(dir)
    }

    pub fn can_accept(&self, package: &DragPackage) -> bool {
        matches!(
            package.kind,
            PackageKind::TabButtonMove | PackageKind::TabWindowMove
        )
    }

    /// Complete a drop at a canvas-space point. Returns whether the package
    /// was taken.
    pub fn handle_drop(&mut self, dock: WidgetId, package: &DragPackage, at: Point) -> Result<bool, UiError> {
        if !self.can_accept(package) {
            return Ok(false);
        }
        let local = self.canvas_to_local(dock, at);
        let dir = self.dropped_tab_direction(dock, local)?;
        self.invalidate(dock);

        let mut add_to = self.dock_base(dock)?.tab_control;
        if dir == Dock::Fill && add_to.is_none() {
            return Ok(false);
        }
        if dir != Dock::Fill {
            let child = self.child_dock(dock, dir)?;
            add_to = self.dock_base(child)?.tab_control;
            if self.dock_base(dock)?.drop_far {
                self.send_to_back(child)?;
            } else {
                self.bring_to_front(child)?;
            }
        }
        let Some(add_to) = add_to else {
            return Ok(false);
        };

        match package.kind {
            PackageKind::TabButtonMove => {
                if !matches!(self.get(package.source).map(|n| &n.widget), Some(Widget::TabButton { .. })) {
                    return Ok(false);
                }
                self.move_tab(package.source, add_to)?;
            }
            PackageKind::TabWindowMove => {
                if self.tab_control(package.source).is_err() || package.source == add_to {
                    return Ok(false);
                }
                self.move_tabs_to(package.source, add_to)?;
            }
            PackageKind::Custom(_) => return Ok(false),
        }
        Ok(true)
    }

    pub fn drag_hover_enter(&mut self, dock: WidgetId) -> Result<(), UiError> {
        self.dock_base_mut(dock)?.draw_hover = true;
        Ok(())
    }

    pub fn drag_hover_leave(&mut self, dock: WidgetId) -> Result<(), UiError> {
        let d = self.dock_base_mut(dock)?;
        d.draw_hover = false;
        d.hover_rect = Rect::EMPTY;
        Ok(())
    }

    /// Update the hover highlight for a drag at a canvas-space point.
    pub fn drag_hover(&mut self, dock: WidgetId, at: Point) -> Result<(), UiError> {
        let local = self.canvas_to_local(dock, at);
        let dir = self.dropped_tab_direction(dock, local)?;
        let Some(node) = self.get(dock) else {
            return Err(UiError::StaleWidget(dock));
        };
        let render_bounds = Rect::from_size(node.bounds.size());
        let inner_bounds = render_bounds.deflate(node.padding);
        let d = self.dock_base(dock)?.clone();

        if dir == Dock::Fill {
            let rect = if d.tab_control.is_some() {
                inner_bounds
            } else {
                Rect::EMPTY
            };
            self.dock_base_mut(dock)?.hover_rect = rect;
            return Ok(());
        }

        let mut rect = render_bounds;
        match dir {
            Dock::Left => rect.width = (rect.width as f32 * 0.25) as i32,
            Dock::Right => {
                let bar = (rect.width as f32 * 0.25) as i32;
                rect.x = rect.width - bar;
                rect.width = bar;
            }
            Dock::Top => rect.height = (rect.height as f32 * 0.25) as i32,
            Dock::Bottom => {
                let bar = (rect.height as f32 * 0.25) as i32;
                rect.y = rect.height - bar;
                rect.height = bar;
            }
            Dock::None | Dock::Fill => {}
        }

        if !d.drop_far {
            let open_extent = |side: Dock| {
                d.child(side)
                    .and_then(|c| self.get(c))
                    .filter(|n| !n.collapsed)
                    .map(|n| n.bounds.size())
            };
            if dir.is_vertical_edge() {
                if let Some(s) = open_extent(Dock::Left) {
                    rect.x += s.width;
                    rect.width -= s.width;
                }
                if let Some(s) = open_extent(Dock::Right) {
                    rect.width -= s.width;
                }
            } else {
                if let Some(s) = open_extent(Dock::Top) {
                    rect.y += s.height;
                    rect.height -= s.height;
                }
                if let Some(s) = open_extent(Dock::Bottom) {
                    rect.height -= s.height;
                }
            }
        }
        self.dock_base_mut(dock)?.hover_rect = rect;
        Ok(())
    }

    /// A tab left `tab_control`; tidy the dock that owns it.
    fn after_tab_removed(&mut self, tab_control: WidgetId) {
        let Some(dock) = self.parent(tab_control) else {
            return;
        };
        if self
            .dock_base(dock)
            .is_ok_and(|d| d.tab_control == Some(tab_control))
        {
            self.redundancy_check(dock);
            self.consolidate_check(dock);
        }
    }

    fn redundancy_check(&mut self, dock: WidgetId) {
        if !self.dock_is_empty(dock) {
            return;
        }
        let Some(parent) = self.parent(dock) else {
            return;
        };
        if self.dock_base(parent).is_ok() {
            self.on_redundant_child_dock(parent, dock);
        }
    }

    fn on_redundant_child_dock(&mut self, parent: WidgetId, child: WidgetId) {
        log::debug!("collapsing empty dock {child:?}");
        if self.set_collapsed(child, true).is_err() {
            return;
        }
        self.redundancy_check(parent);
        self.consolidate_check(parent);
    }

    /// A dock whose own strip emptied adopts a non-empty child's tabs.
    fn consolidate_check(&mut self, dock: WidgetId) {
        if self.dock_is_empty(dock) {
            return;
        }
        let Ok(d) = self.dock_base(dock) else {
            return;
        };
        let Some(tc) = d.tab_control else {
            return;
        };
        if self.tab_count(tc).unwrap_or(0) > 0 {
            return;
        }
        let d = d.clone();
        for side in CONSOLIDATION_ORDER {
            let Some(child) = d.child(side) else {
                continue;
            };
            if self.dock_is_empty(child) {
                continue;
            }
            if let Ok(Some(child_tc)) = self.dock_tab_control(child) {
                log::debug!("dock {dock:?} adopting tabs of its {side:?} child");
                if let Err(e) = self.move_tabs_to(child_tc, tc) {
                    log::warn!("tab consolidation into {dock:?} failed: {e}");
                }
            }
            return;
        }
    }

    /// Drag a resizer by `delta` pixels along its axis.
    pub fn resize_by(&mut self, resizer: WidgetId, delta: i32) -> Result<(), UiError> {
        let dir = self.resizer(resizer)?.resize_dir;
        let target = self.parent(resizer).ok_or(UiError::StaleWidget(resizer))?;
        let node = self.get(target).ok_or(UiError::StaleWidget(target))?;
        let (width, height) = (
            node.width.unwrap_or(node.bounds.width),
            node.height.unwrap_or(node.bounds.height),
        );
        let (min, max) = (node.min_size, node.max_size);
        match dir {
            Dock::Left | Dock::Right => {
                let w = if dir == Dock::Left { width - delta } else { width + delta };
                self.set_width(target, Some(w.clamp(min.width, max.width.max(min.width))))
            }
            Dock::Top | Dock::Bottom => {
                let h = if dir == Dock::Top { height - delta } else { height + delta };
                self.set_height(target, Some(h.clamp(min.height, max.height.max(min.height))))
            }
            Dock::None | Dock::Fill => Err(UiError::InvalidDock(dir)),
        }
    }
}

// ---------------------------------------------------------------------------
// Tab controls
// ---------------------------------------------------------------------------

impl WidgetTree {
    pub fn add_tab_control(&mut self, parent: WidgetId) -> Result<WidgetId, UiError> {
        let id = self.insert(
            parent,
            Widget::TabControl(TabControl {
                strip: WidgetId::default(),
                current: None,
                strip_position: Dock::Top,
            }),
        )?;
        let strip = self.add_stack(id, true)?;
        self.set_dock(strip, Dock::Top)?;
        self.tab_control_mut(id)?.strip = strip;
        Ok(id)
    }

    pub fn set_tab_strip_position(&mut self, id: WidgetId, side: Dock) -> Result<(), UiError> {
        if !(side.is_horizontal_edge() || side.is_vertical_edge()) {
            return Err(UiError::InvalidDock(side));
        }
        let tc = self.tab_control_mut(id)?;
        tc.strip_position = side;
        let strip = tc.strip;
        self.set_stack_horizontal(strip, side.is_vertical_edge())?;
        self.set_dock(strip, side)
    }

    /// New tab with an empty page. The first tab added is selected.
    /// Returns the tab button; `tab_page` gives its page.
    pub fn add_page(&mut self, id: WidgetId, text: impl Into<String>) -> Result<WidgetId, UiError> {
        let strip = self.tab_control(id)?.strip;
        let page = self.add_panel(id)?;
        self.set_dock(page, Dock::Fill)?;
        self.set_collapsed(page, true)?;
        let button = self.insert(
            strip,
            Widget::TabButton {
                text: text.into(),
                page,
            },
        )?;
        self.set_padding(button, BUTTON_PADDING)?;
        if self.tab_control(id)?.current.is_none() {
            self.select_tab(button)?;
        }
        Ok(button)
    }

    /// Owning tab control and page of a tab button.
    fn tab_parts(&self, button: WidgetId) -> Result<(WidgetId, WidgetId), UiError> {
        let page = match self.get(button).map(|n| &n.widget) {
            Some(Widget::TabButton { page, .. }) => *page,
            Some(_) => {
                return Err(UiError::WrongKind {
                    id: button,
                    expected: "tab button",
                });
            }
            None => return Err(UiError::StaleWidget(button)),
        };
        let owner = self
            .parent(button)
            .and_then(|strip| self.parent(strip))
            .filter(|tc| self.tab_control(*tc).is_ok())
            .ok_or(UiError::StaleWidget(button))?;
        Ok((owner, page))
    }

    pub fn tab_page(&self, button: WidgetId) -> Result<WidgetId, UiError> {
        Ok(self.tab_parts(button)?.1)
    }

    pub fn tab_buttons(&self, id: WidgetId) -> Result<Vec<WidgetId>, UiError> {
        let strip = self.tab_control(id)?.strip;
        Ok(self.children(strip).to_vec())
    }

    pub fn tab_count(&self, id: WidgetId) -> Result<usize, UiError> {
        let strip = self.tab_control(id)?.strip;
        Ok(self.children(strip).len())
    }

    pub fn current_tab(&self, id: WidgetId) -> Result<Option<WidgetId>, UiError> {
        Ok(self.tab_control(id)?.current)
    }

    /// Show a tab's page and collapse the previously shown one.
    pub fn select_tab(&mut self, button: WidgetId) -> Result<(), UiError> {
        let (tc, page) = self.tab_parts(button)?;
        let previous = self.tab_control(tc)?.current;
        if previous == Some(button) {
            return Ok(());
        }
        if let Some(prev) = previous
            && let Ok(prev_page) = self.tab_page(prev)
        {
            self.set_collapsed(prev_page, true)?;
        }
        self.set_collapsed(page, false)?;
        self.tab_control_mut(tc)?.current = Some(button);
        self.events.emit(Event::TabSelected { source: tc, button });
        Ok(())
    }

    /// Destroy a tab and its page.
    pub fn remove_tab(&mut self, button: WidgetId) -> Result<(), UiError> {
        let (tc, page) = self.tab_parts(button)?;
        self.remove(page)?;
        self.remove(button)?;
        self.lose_tab(tc, button)
    }

    /// Bookkeeping on the control a tab just left.
    fn lose_tab(&mut self, tc: WidgetId, button: WidgetId) -> Result<(), UiError> {
        let control = self.tab_control_mut(tc)?;
        if control.current == Some(button) {
            control.current = None;
        }
        let (current, strip) = (control.current, control.strip);
        if current.is_none()
            && let Some(&next) = self.children(strip).first()
        {
            self.select_tab(next)?;
        }
        self.invalidate(tc);
        self.events.emit(Event::TabRemoved { source: tc, button });
        self.after_tab_removed(tc);
        Ok(())
    }

    /// Move a tab (button and page) to another tab control. The tab is
    /// attached to `dest` before `source` sees it leave.
    pub fn move_tab(&mut self, button: WidgetId, dest: WidgetId) -> Result<(), UiError> {
        let (source, page) = self.tab_parts(button)?;
        let dest_strip = self.tab_control(dest)?.strip;
        if source == dest {
            return Ok(());
        }
        self.reparent(page, dest)?;
        self.reparent(button, dest_strip)?;
        self.set_collapsed(page, true)?;
        if self.tab_control(dest)?.current.is_none() {
            self.select_tab(button)?;
        }
        self.lose_tab(source, button)
    }

    /// Move every tab of `source` to `dest`.
    pub fn move_tabs_to(&mut self, source: WidgetId, dest: WidgetId) -> Result<(), UiError> {
        for button in self.tab_buttons(source)? {
            // Tidying after an earlier move may already have relocated it.
            if self.tab_parts(button).is_ok_and(|(owner, _)| owner == source) {
                self.move_tab(button, dest)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dock_tree(size: Size) -> (WidgetTree, WidgetId, WidgetId) {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Widget::Panel);
        let dock = tree.add_dock(root).expect("dock");
        tree.set_dock(dock, Dock::Fill).expect("fill");
        tree.layout(root, size);
        (tree, root, dock)
    }

    fn tabs_of(tree: &WidgetTree, dock: WidgetId) -> WidgetId {
        tree.dock_tab_control(dock)
            .expect("dock")
            .expect("child docks carry a tab control")
    }

    #[test]
    fn drop_direction_prefers_fill_in_centre() {
        let size = Size::new(100, 100);
        assert_eq!(drop_direction(size, Point::new(50, 50), |_| true), (Dock::Fill, false));
        assert_eq!(drop_direction(size, Point::new(50, 5), |_| true), (Dock::Top, true));
        assert_eq!(drop_direction(size, Point::new(25, 50), |_| true), (Dock::Left, false));
        assert_eq!(drop_direction(size, Point::new(95, 50), |_| true), (Dock::Right, true));
        assert_eq!(drop_direction(size, Point::new(50, 75), |_| true), (Dock::Bottom, false));
    }

    #[test]
    fn drop_direction_skips_occupied_sides_and_degenerate_sizes() {
        let size = Size::new(100, 100);
        let top_taken = |side: Dock| side != Dock::Top;
        assert_eq!(drop_direction(size, Point::new(50, 5), top_taken).0, Dock::Fill);
        // Exact tie between top and left: top wins, left when top is taken.
        assert_eq!(drop_direction(size, Point::new(10, 10), |_| true).0, Dock::Top);
        assert_eq!(drop_direction(size, Point::new(10, 10), top_taken).0, Dock::Left);
        assert_eq!(drop_direction(Size::ZERO, Point::new(0, 0), |_| true), (Dock::Fill, false));
    }

    #[test]
    fn child_dock_is_created_once_with_tabs_and_resizer() {
        let (mut tree, root, dock) = dock_tree(Size::new(400, 300));
        let left = tree.child_dock(dock, Dock::Left).expect("left");
        assert_eq!(tree.child_dock(dock, Dock::Left).expect("again"), left);
        assert!(matches!(
            tree.child_dock(dock, Dock::Fill),
            Err(UiError::InvalidDock(Dock::Fill))
        ));

        let d = tree.dock_base(left).expect("dock").clone();
        let sizer = d.sizer.expect("resizer");
        assert_eq!(tree.resizer(sizer).expect("resizer").resize_dir, Dock::Right);
        let tc = d.tab_control.expect("tabs");
        assert_eq!(tree.tab_control(tc).expect("tc").strip_position, Dock::Bottom);

        tree.layout(root, Size::new(400, 300));
        assert_eq!(tree.get(left).expect("left").bounds, Rect::new(1, 1, 200, 298));
        assert_eq!(tree.get(sizer).expect("sizer").bounds, Rect::new(197, 1, 2, 296));
        assert!(tree.dock_is_empty(dock));
    }

    #[test]
    fn first_page_is_selected_and_selection_collapses_others() {
        let (mut tree, _, dock) = dock_tree(Size::new(400, 300));
        let left = tree.child_dock(dock, Dock::Left).expect("left");
        let tc = tabs_of(&tree, left);
        tree.events.set_recording(true);

        let a = tree.add_page(tc, "A").expect("a");
        let b = tree.add_page(tc, "B").expect("b");
        assert_eq!(tree.current_tab(tc).expect("current"), Some(a));
        let (page_a, page_b) = (tree.tab_page(a).expect("page"), tree.tab_page(b).expect("page"));
        assert!(!tree.get(page_a).expect("a").collapsed);
        assert!(tree.get(page_b).expect("b").collapsed);

        tree.select_tab(b).expect("select");
        assert!(tree.get(page_a).expect("a").collapsed);
        assert!(!tree.get(page_b).expect("b").collapsed);
        assert_eq!(
            tree.events.drain_log(),
            vec![
                Event::TabSelected { source: tc, button: a },
                Event::TabSelected { source: tc, button: b },
            ]
        );
    }

    #[test]
    fn removing_current_tab_selects_next() {
        let (mut tree, _, dock) = dock_tree(Size::new(400, 300));
        let left = tree.child_dock(dock, Dock::Left).expect("left");
        let tc = tabs_of(&tree, left);
        let a = tree.add_page(tc, "A").expect("a");
        let b = tree.add_page(tc, "B").expect("b");
        let page_a = tree.tab_page(a).expect("page");

        tree.remove_tab(a).expect("remove");
        assert!(!tree.contains(a));
        assert!(!tree.contains(page_a));
        assert_eq!(tree.tab_count(tc).expect("count"), 1);
        assert_eq!(tree.current_tab(tc).expect("current"), Some(b));
    }

    #[test]
    fn emptied_child_dock_collapses() {
        let (mut tree, _, dock) = dock_tree(Size::new(400, 300));
        let left = tree.child_dock(dock, Dock::Left).expect("left");
        let tc = tabs_of(&tree, left);
        let a = tree.add_page(tc, "A").expect("a");
        tree.remove_tab(a).expect("remove");
        assert!(tree.get(left).expect("left").collapsed);
        assert!(tree.dock_is_empty(dock));
    }

    #[test]
    fn tab_dropped_near_edge_moves_into_new_child_dock() {
        let (mut tree, root, dock) = dock_tree(Size::new(400, 300));
        let left = tree.child_dock(dock, Dock::Left).expect("left");
        let tc_left = tabs_of(&tree, left);
        let a = tree.add_page(tc_left, "A").expect("a");
        tree.add_page(tc_left, "B").expect("b");
        tree.layout(root, Size::new(400, 300));

        let package = DragPackage {
            kind: PackageKind::TabButtonMove,
            source: a,
        };
        // 100px from the right edge: near, so the new dock goes innermost.
        assert!(tree.handle_drop(dock, &package, Point::new(300, 150)).expect("drop"));

        let right = tree.dock_child(dock, Dock::Right).expect("dock").expect("right");
        let tc_right = tabs_of(&tree, right);
        assert_eq!(tree.tab_buttons(tc_right).expect("tabs"), vec![a]);
        assert_eq!(tree.current_tab(tc_right).expect("current"), Some(a));
        assert_eq!(tree.tab_count(tc_left).expect("count"), 1);
        assert_eq!(tree.children(dock).last(), Some(&right));
        assert!(!tree.dock_is_empty(dock));
        assert!(!tree.dock_is_empty(left));
    }

    #[test]
    fn far_drop_sends_new_dock_to_back() {
        let (mut tree, root, dock) = dock_tree(Size::new(400, 300));
        let left = tree.child_dock(dock, Dock::Left).expect("left");
        let tc_left = tabs_of(&tree, left);
        let a = tree.add_page(tc_left, "A").expect("a");
        tree.add_page(tc_left, "B").expect("b");
        tree.layout(root, Size::new(400, 300));

        let package = DragPackage {
            kind: PackageKind::TabButtonMove,
            source: a,
        };
        assert!(tree.handle_drop(dock, &package, Point::new(395, 150)).expect("drop"));
        let right = tree.dock_child(dock, Dock::Right).expect("dock").expect("right");
        assert_eq!(tree.children(dock).first(), Some(&right));

        let custom = DragPackage {
            kind: PackageKind::Custom("file".into()),
            source: a,
        };
        assert!(!tree.handle_drop(dock, &custom, Point::new(395, 150)).expect("drop"));
    }

    #[test]
    fn window_move_onto_itself_is_refused() {
        let (mut tree, root, dock) = dock_tree(Size::new(400, 300));
        let left = tree.child_dock(dock, Dock::Left).expect("left");
        let tc_left = tabs_of(&tree, left);
        tree.add_page(tc_left, "A").expect("a");
        tree.layout(root, Size::new(400, 300));

        let package = DragPackage {
            kind: PackageKind::TabWindowMove,
            source: tc_left,
        };
        // Centre of the left dock targets its own tab control.
        assert!(!tree.handle_drop(left, &package, Point::new(100, 150)).expect("drop"));
        assert_eq!(tree.tab_count(tc_left).expect("count"), 1);
    }

    #[test]
    fn consolidation_prefers_bottom_child() {
        let (mut tree, _, dock) = dock_tree(Size::new(600, 600));
        let outer = tree.child_dock(dock, Dock::Left).expect("outer");
        let tc_outer = tabs_of(&tree, outer);
        let own = tree.add_page(tc_outer, "own").expect("own");

        let top = tree.child_dock(outer, Dock::Top).expect("top");
        let top_tab = tree.add_page(tabs_of(&tree, top), "top").expect("tab");
        let bottom = tree.child_dock(outer, Dock::Bottom).expect("bottom");
        let bottom_tab = tree.add_page(tabs_of(&tree, bottom), "bottom").expect("tab");

        tree.remove_tab(own).expect("remove");

        assert_eq!(tree.tab_buttons(tc_outer).expect("tabs"), vec![bottom_tab]);
        assert_eq!(tree.current_tab(tc_outer).expect("current"), Some(bottom_tab));
        assert!(tree.get(bottom).expect("bottom").collapsed);
        assert_eq!(tree.tab_buttons(tabs_of(&tree, top)).expect("tabs"), vec![top_tab]);
        assert!(!tree.dock_is_empty(outer));
    }

    #[test]
    fn hover_rect_covers_quarter_strip() {
        let (mut tree, _, dock) = dock_tree(Size::new(400, 300));
        tree.drag_hover_enter(dock).expect("enter");
        tree.drag_hover(dock, Point::new(390, 150)).expect("hover");
        let d = tree.dock_base(dock).expect("dock");
        assert!(d.draw_hover);
        assert_eq!(d.hover_rect, Rect::new(300, 0, 100, 300));

        // Root docks have no tab control, so the centre shows nothing.
        tree.drag_hover(dock, Point::new(200, 150)).expect("hover");
        assert_eq!(tree.dock_base(dock).expect("dock").hover_rect, Rect::EMPTY);

        tree.drag_hover_leave(dock).expect("leave");
        assert!(!tree.dock_base(dock).expect("dock").draw_hover);
    }

    #[test]
    fn resizer_changes_dock_size_with_minimum() {
        let (mut tree, _, dock) = dock_tree(Size::new(400, 300));
        let left = tree.child_dock(dock, Dock::Left).expect("left");
        let sizer = tree.dock_base(left).expect("dock").sizer.expect("sizer");

        tree.resize_by(sizer, 30).expect("grow");
        assert_eq!(tree.get(left).expect("left").width, Some(230));
        tree.resize_by(sizer, -500).expect("shrink");
        assert_eq!(tree.get(left).expect("left").width, Some(30));

        let right = tree.child_dock(dock, Dock::Right).expect("right");
        let sizer = tree.dock_base(right).expect("dock").sizer.expect("sizer");
        tree.resize_by(sizer, -20).expect("grow");
        assert_eq!(tree.get(right).expect("right").width, Some(220));
    }
}

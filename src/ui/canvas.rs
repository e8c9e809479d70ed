//! Canvas: the tree, its root, the animator and input state for one surface.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::animation::{AnimatedProperty, Animator, Easing};
use super::draw::Renderer;
use super::error::UiError;
use super::geometry::{Point, Rect, Size};
use super::input::{Key, MouseButton, UiState};
use super::skin::Skin;
use super::widget::Widget;
use super::{WidgetId, WidgetTree};

/// Owns everything a frame needs. Nothing here is global: several canvases
/// can coexist, each with its own animations.
pub struct Canvas {
    pub tree: WidgetTree,
    pub animator: Animator,
    pub input: UiState,
    root: WidgetId,
    size: Size,
}

impl Canvas {
    /// Empty canvas with a root panel.
    pub fn new(size: Size) -> Self {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Widget::Panel);
        Self::with_tree(tree, root, size)
    }

    pub fn with_tree(tree: WidgetTree, root: WidgetId, size: Size) -> Self {
        Self {
            tree,
            animator: Animator::new(),
            input: UiState::new(),
            root,
            size,
        }
    }

    pub fn root(&self) -> WidgetId {
        self.root
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        if size != self.size {
            self.size = size;
            self.tree.invalidate(self.root);
        }
    }

    /// Measure and arrange the whole tree at the canvas size.
    pub fn layout(&mut self) {
        self.tree.layout(self.root, self.size);
    }

    /// One frame: advance animations, lay out, render. Returns how many
    /// animated properties changed.
    pub fn frame(&mut self, now: Instant, skin: &mut dyn Skin, renderer: &mut dyn Renderer) -> usize {
        let animated = self.animator.think(&mut self.tree, now);
        self.layout();
        let state = self.input.interaction();
        self.tree.render(self.root, skin, renderer, &state);
        animated
    }

    /// Animate one layout property of `id` from its current value.
    pub fn animate(
        &mut self,
        id: WidgetId,
        property: AnimatedProperty,
        to: i32,
        duration: Duration,
        easing: Easing,
        now: Instant,
    ) -> Result<(), UiError> {
        if !self.tree.contains(id) {
            return Err(UiError::StaleWidget(id));
        }
        self.animator.start(id, property, to, duration, Duration::ZERO, easing, now);
        Ok(())
    }

    /// Remove a widget subtree, cancelling its animations and dropping any
    /// input state that referenced it.
    pub fn remove(&mut self, id: WidgetId) -> Result<(), UiError> {
        if id == self.root {
            return Err(UiError::Misplaced {
                element: "root".into(),
                reason: "the canvas root cannot be removed".into(),
            });
        }
        let doomed = self.tree.subtree(id);
        self.tree.remove(id)?;
        for gone in doomed {
            self.animator.cancel(gone);
        }
        self.input.forget(&self.tree);
        Ok(())
    }

    // -- input forwarding, root bound --

    pub fn cursor_moved(&mut self, p: Point) -> Result<bool, UiError> {
        self.input.handle_cursor_moved(&mut self.tree, self.root, p)
    }

    pub fn mouse_input(
        &mut self,
        button: MouseButton,
        pressed: bool,
        p: Point,
        now: Instant,
    ) -> Result<bool, UiError> {
        self.input
            .handle_mouse_input(&mut self.tree, self.root, button, pressed, p, now)
    }

    pub fn key_input(&mut self, key: Key, pressed: bool) -> Result<bool, UiError> {
        self.input.handle_key_input(&mut self.tree, self.root, key, pressed)
    }

    pub fn wheel(&mut self, lines: f32) -> Result<bool, UiError> {
        self.input.handle_scroll(&mut self.tree, self.root, lines)
    }

    /// Arranged geometry of the visible tree.
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot::capture(&self.tree, self.root)
            .unwrap_or_else(|| LayoutSnapshot::empty(Rect::from_size(self.size)))
    }
}

/// Serializable picture of an arranged tree: kind, name, text and
/// parent-local bounds of every non-collapsed widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub bounds: Rect,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<LayoutSnapshot>,
}

impl LayoutSnapshot {
    fn empty(bounds: Rect) -> Self {
        Self {
            kind: "panel".into(),
            name: String::new(),
            text: None,
            bounds,
            hidden: false,
            children: Vec::new(),
        }
    }

    /// Snapshot of `id` and its non-collapsed descendants.
    pub fn capture(tree: &WidgetTree, id: WidgetId) -> Option<Self> {
        let node = tree.get(id)?;
        if node.collapsed {
            return None;
        }
        Some(Self {
            kind: node.widget.kind_name().to_string(),
            name: node.name.clone(),
            text: node.widget.text().map(str::to_string),
            bounds: node.bounds,
            hidden: node.hidden,
            children: node
                .children
                .iter()
                .filter_map(|&child| Self::capture(tree, child))
                .collect(),
        })
    }

    /// Number of widgets in the snapshot.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Self::count).sum::<usize>()
    }

    /// First widget with the given name, depth first.
    pub fn find(&self, name: &str) -> Option<&LayoutSnapshot> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{Dock, DrawList, ThemedSkin};

    #[test]
    fn frame_animates_then_lays_out_and_renders() {
        let mut canvas = Canvas::new(Size::new(200, 100));
        let panel = canvas.tree.add_panel(canvas.root()).expect("panel");
        canvas.tree.set_dock(panel, Dock::Left).expect("dock");
        canvas.tree.set_width(panel, Some(0)).expect("width");

        let t0 = Instant::now();
        canvas
            .animate(panel, AnimatedProperty::Width, 80, Duration::from_millis(100), Easing::Linear, t0)
            .expect("animate");

        let mut skin = ThemedSkin::default();
        let mut list = DrawList::new();
        assert_eq!(canvas.frame(t0 + Duration::from_millis(50), &mut skin, &mut list), 1);
        assert_eq!(canvas.tree.get(panel).expect("panel").bounds.width, 40);

        canvas.frame(t0 + Duration::from_millis(100), &mut skin, &mut list);
        assert_eq!(canvas.tree.get(panel).expect("panel").bounds, Rect::new(0, 0, 80, 100));
        assert!(canvas.animator.is_empty());
    }

    #[test]
    fn remove_cancels_subtree_animations_and_input() {
        let mut canvas = Canvas::new(Size::new(200, 100));
        let outer = canvas.tree.add_panel(canvas.root()).expect("outer");
        let button = canvas.tree.add_button(outer, "x").expect("button");
        let t0 = Instant::now();
        canvas
            .animate(button, AnimatedProperty::X, 50, Duration::from_secs(1), Easing::EaseOut, t0)
            .expect("animate");
        canvas.input.focused = Some(button);

        canvas.remove(outer).expect("remove");
        assert!(!canvas.animator.is_animating(button));
        assert_eq!(canvas.input.focused, None);
        assert!(matches!(
            canvas.animate(button, AnimatedProperty::X, 0, Duration::ZERO, Easing::Linear, t0),
            Err(UiError::StaleWidget(_))
        ));
        assert!(canvas.remove(canvas.root()).is_err());
    }

    #[test]
    fn snapshot_skips_collapsed_and_round_trips_ron() {
        let mut canvas = Canvas::new(Size::new(120, 60));
        let label = canvas.tree.add_label(canvas.root(), "hello").expect("label");
        canvas.tree.set_name(label, "greeting").expect("name");
        let gone = canvas.tree.add_panel(canvas.root()).expect("panel");
        canvas.tree.set_collapsed(gone, true).expect("collapse");
        canvas.layout();

        let snap = canvas.snapshot();
        assert_eq!(snap.count(), 2);
        assert_eq!(snap.bounds, Rect::new(0, 0, 120, 60));
        let greeting = snap.find("greeting").expect("greeting");
        assert_eq!(greeting.kind, "label");
        assert_eq!(greeting.text.as_deref(), Some("hello"));

        let text = snap.to_ron().expect("ron");
        let back: LayoutSnapshot = ron::from_str(&text).expect("parse");
        assert_eq!(back, snap);
    }

    #[test]
    fn set_size_relayouts_root() {
        let mut canvas = Canvas::new(Size::new(100, 100));
        canvas.layout();
        canvas.set_size(Size::new(300, 50));
        canvas.layout();
        assert_eq!(canvas.tree.get(canvas.root()).expect("root").bounds.size(), Size::new(300, 50));
    }
}

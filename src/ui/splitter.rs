//! Two-section splitter and the label/value property grid.

use super::error::UiError;
use super::events::Event;
use super::geometry::{Rect, Size};
use super::widget::Widget;
use super::{WidgetId, WidgetTree};

const DEFAULT_SPLITTER_SIZE: i32 = 5;

/// Initial width of the property label column in pixels.
pub const DEFAULT_LABEL_WIDTH: i32 = 80;

const LABEL_SPLITTER_WIDTH: i32 = 3;

// ---------------------------------------------------------------------------
// HorizontalSplitter
// ---------------------------------------------------------------------------

/// Top and bottom sections divided by a draggable bar. `value` is the share
/// of the height (minus the bar) given to the top section.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalSplitter {
    pub sections: [Option<WidgetId>; 2],
    pub bar: WidgetId,
    value: f32,
    pub zoomed: Option<usize>,
    pub splitter_size: i32,
}

impl HorizontalSplitter {
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Clamp into `[0, 1]`; NaN is ignored.
    pub fn set_value(&mut self, value: f32) {
        if !value.is_nan() {
            self.value = value.clamp(0.0, 1.0);
        }
    }

    fn split(&self, height: i32) -> i32 {
        ((height - self.splitter_size) as f32 * self.value) as i32
    }
}

impl WidgetTree {
    pub fn add_horizontal_splitter(&mut self, parent: WidgetId) -> Result<WidgetId, UiError> {
        let id = self.insert(
            parent,
            Widget::HorizontalSplitter(HorizontalSplitter {
                sections: [None, None],
                bar: WidgetId::default(),
                value: 0.5,
                zoomed: None,
                splitter_size: DEFAULT_SPLITTER_SIZE,
            }),
        )?;
        let bar = self.insert(id, Widget::SplitterBar)?;
        self.splitter_mut(id)?.bar = bar;
        Ok(id)
    }

    pub fn splitter_value(&self, id: WidgetId) -> Result<f32, UiError> {
        Ok(self.splitter(id)?.value)
    }

    pub fn set_splitter_value(&mut self, id: WidgetId, value: f32) -> Result<(), UiError> {
        self.splitter_mut(id)?.set_value(value);
        self.invalidate(id);
        Ok(())
    }

    pub fn center_panels(&mut self, id: WidgetId) -> Result<(), UiError> {
        self.set_splitter_value(id, 0.5)
    }

    pub fn splitter_panel(&self, id: WidgetId, index: usize) -> Result<Option<WidgetId>, UiError> {
        let s = self.splitter(id)?;
        s.sections
            .get(index)
            .copied()
            .ok_or(UiError::SectionOutOfRange { index, len: 2 })
    }

    /// Drag result: the bar's new top edge (splitter-local) sets the value.
    pub fn move_splitter_bar(&mut self, id: WidgetId, bar_top: i32) -> Result<(), UiError> {
        let height = self.get(id).map(|n| n.bounds.height).unwrap_or(0);
        let s = self.splitter_mut(id)?;
        let free = (height - s.splitter_size) as f32;
        if free > 0.0 {
            s.set_value(bar_top as f32 / free);
        }
        let value = s.value;
        self.invalidate(id);
        self.events.emit(Event::SplitterMoved { source: id, value });
        Ok(())
    }

    /// Show only `section`, hiding the other one.
    pub fn zoom(&mut self, id: WidgetId, section: usize) -> Result<(), UiError> {
        if section >= 2 {
            return Err(UiError::SectionOutOfRange { index: section, len: 2 });
        }
        self.unzoom(id)?;
        let s = self.splitter_mut(id)?;
        if s.sections[section].is_some() {
            s.zoomed = Some(section);
            let others: Vec<WidgetId> = s
                .sections
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != section)
                .filter_map(|(_, w)| *w)
                .collect();
            for other in others {
                self.set_hidden(other, true)?;
            }
            self.invalidate(id);
        }
        self.zoom_changed(id)
    }

    pub fn unzoom(&mut self, id: WidgetId) -> Result<(), UiError> {
        let s = self.splitter_mut(id)?;
        s.zoomed = None;
        let sections: Vec<WidgetId> = s.sections.iter().flatten().copied().collect();
        for section in sections {
            self.set_hidden(section, false)?;
        }
        self.invalidate(id);
        self.zoom_changed(id)
    }

    fn zoom_changed(&mut self, id: WidgetId) -> Result<(), UiError> {
        let zoomed = self.splitter(id)?.zoomed;
        self.events.emit(Event::ZoomChanged { source: id, zoomed });
        match zoomed {
            Some(section) => self.events.emit(Event::PanelZoomed { source: id, section }),
            None => self.events.emit(Event::PanelUnZoomed { source: id }),
        }
        Ok(())
    }

    pub(super) fn measure_splitter(&mut self, id: WidgetId, available: Size) -> Size {
        let Ok(s) = self.splitter(id) else {
            return Size::ZERO;
        };
        let s = s.clone();
        let mut size = Size::ZERO;
        let bar = self.measure(s.bar, Size::new(available.width, s.splitter_size));
        size.height += bar.height;

        if let Some(zoomed) = s.zoomed.and_then(|i| s.sections[i]) {
            return self.measure(zoomed, available);
        }
        let v = s.split(available.height);
        if let Some(top) = s.sections[0] {
            let m = self.measure(top, Size::new(available.width, v.max(0)));
            size.height += m.height;
            size.width = size.width.max(m.width);
        }
        if let Some(bottom) = s.sections[1] {
            let h = (available.height - s.splitter_size - v).max(0);
            let m = self.measure(bottom, Size::new(available.width, h));
            size.height += m.height;
            size.width = size.width.max(m.width);
        }
        size
    }

    pub(super) fn arrange_splitter(&mut self, id: WidgetId, size: Size) -> Size {
        let Ok(s) = self.splitter(id) else {
            return size;
        };
        let s = s.clone();
        let v = s.split(size.height);
        let bar_size = self.get(s.bar).map(|n| n.measured).unwrap_or(Size::ZERO);
        self.arrange(s.bar, Rect::new(0, v, bar_size.width, bar_size.height));

        if let Some(zoomed) = s.zoomed.and_then(|i| s.sections[i]) {
            self.arrange(zoomed, Rect::from_size(size));
            return size;
        }
        if let Some(top) = s.sections[0] {
            self.arrange(top, Rect::new(0, 0, size.width, v));
        }
        if let Some(bottom) = s.sections[1] {
            let y = v + s.splitter_size;
            self.arrange(bottom, Rect::new(0, y, size.width, (size.height - y).max(0)));
        }
        size
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// Label/value grid. Rows live in a vertical stack; a thin bar on the label
/// column edge resizes the label column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Properties {
    /// Label column width in pixels.
    pub label_width: i32,
    pub splitter: WidgetId,
    pub rows: WidgetId,
}

impl WidgetTree {
    pub fn add_properties(&mut self, parent: WidgetId) -> Result<WidgetId, UiError> {
        let id = self.insert(
            parent,
            Widget::Properties(Properties {
                label_width: DEFAULT_LABEL_WIDTH,
                splitter: WidgetId::default(),
                rows: WidgetId::default(),
            }),
        )?;
        let rows = self.add_stack(id, false)?;
        let splitter = self.insert(id, Widget::SplitterBar)?;
        self.set_width(splitter, Some(LABEL_SPLITTER_WIDTH))?;
        let p = self.properties_mut(id)?;
        p.rows = rows;
        p.splitter = splitter;
        Ok(id)
    }

    /// Append a property row with a label and a text value.
    pub fn add_property(
        &mut self,
        id: WidgetId,
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<WidgetId, UiError> {
        let rows = self.properties(id)?.rows;
        let row = self.insert(
            rows,
            Widget::PropertyRow {
                label: WidgetId::default(),
                value: WidgetId::default(),
            },
        )?;
        let label_id = self.add_label(row, label)?;
        let value_id = self.add_label(row, value)?;
        if let Some(Widget::PropertyRow { label, value }) = self.get_mut(row).map(|n| &mut n.widget) {
            *label = label_id;
            *value = value_id;
        }
        Ok(row)
    }

    fn property_parts(&self, row: WidgetId) -> Result<(WidgetId, WidgetId), UiError> {
        match self.get(row).map(|n| &n.widget) {
            Some(Widget::PropertyRow { label, value }) => Ok((*label, *value)),
            Some(_) => Err(UiError::WrongKind {
                id: row,
                expected: "property row",
            }),
            None => Err(UiError::StaleWidget(row)),
        }
    }

    /// Properties grid owning a property row.
    fn property_owner(&self, row: WidgetId) -> Option<WidgetId> {
        let stack = self.parent(row)?;
        let owner = self.parent(stack)?;
        self.properties(owner).ok().map(|_| owner)
    }

    pub fn property_label(&self, row: WidgetId) -> Result<&str, UiError> {
        let (label, _) = self.property_parts(row)?;
        Ok(self.text(label).unwrap_or(""))
    }

    pub fn property_value(&self, row: WidgetId) -> Result<&str, UiError> {
        let (_, value) = self.property_parts(row)?;
        Ok(self.text(value).unwrap_or(""))
    }

    /// Replace a row's value, notifying listeners on the owning grid.
    pub fn set_property_value(&mut self, row: WidgetId, value: impl Into<String>) -> Result<(), UiError> {
        let (_, value_id) = self.property_parts(row)?;
        self.set_text(value_id, value)?;
        let source = self.property_owner(row).unwrap_or(row);
        self.events.emit(Event::ValueChanged { source, row });
        Ok(())
    }

    pub fn delete_all(&mut self, id: WidgetId) -> Result<(), UiError> {
        let rows = self.properties(id)?.rows;
        for row in self.children(rows).to_vec() {
            self.remove(row)?;
        }
        Ok(())
    }

    pub fn set_label_width(&mut self, id: WidgetId, width: i32) -> Result<(), UiError> {
        let p = self.properties_mut(id)?;
        let width = width.max(0);
        if p.label_width != width {
            p.label_width = width;
            self.invalidate_property_rows(id);
        }
        Ok(())
    }

    /// Drag result: the bar's new left edge (grid-local) sets the label width.
    pub fn move_label_splitter(&mut self, id: WidgetId, bar_x: i32) -> Result<(), UiError> {
        let padding = self.get(id).map(|n| n.padding).unwrap_or_default();
        self.set_label_width(id, bar_x - padding.left)?;
        let value = self.properties(id)?.label_width as f32;
        self.events.emit(Event::SplitterMoved { source: id, value });
        Ok(())
    }

    fn invalidate_property_rows(&mut self, id: WidgetId) {
        let Ok(p) = self.properties(id) else { return };
        let rows = p.rows;
        for row in self.children(rows).to_vec() {
            self.invalidate_local(row);
        }
        self.invalidate(rows);
    }

    pub(super) fn measure_properties(&mut self, id: WidgetId, available: Size) -> Size {
        let Ok(p) = self.properties(id) else {
            return Size::ZERO;
        };
        let (rows, splitter) = (p.rows, p.splitter);
        let padding = self.get(id).map(|n| n.padding).unwrap_or_default();
        let inner = available - padding;
        let size = self.measure(rows, inner);
        self.measure(splitter, Size::new(inner.width, size.height));
        size + padding
    }

    pub(super) fn arrange_properties(&mut self, id: WidgetId, size: Size) -> Size {
        let Ok(p) = self.properties(id) else {
            return size;
        };
        let p = p.clone();
        let padding = self.get(id).map(|n| n.padding).unwrap_or_default();
        let inner = size - padding;
        self.arrange(p.rows, Rect::new(padding.left, padding.top, inner.width, inner.height));

        let rows_height = self.get(p.rows).map(|n| n.measured.height).unwrap_or(0);
        let bar_width = self.get(p.splitter).map(|n| n.measured.width).unwrap_or(0);
        let bar = Rect::new(padding.left + p.label_width - 2, padding.top, bar_width, rows_height);
        self.arrange(p.splitter, bar);
        Size::new(inner.width, rows_height) + padding
    }

    fn row_label_width(&self, row: WidgetId) -> i32 {
        self.property_owner(row)
            .and_then(|p| self.properties(p).ok())
            .map(|p| p.label_width)
            .unwrap_or(DEFAULT_LABEL_WIDTH)
    }

    pub(super) fn measure_property_row(&mut self, id: WidgetId, available: Size) -> Size {
        let Ok((label, value)) = self.property_parts(id) else {
            return Size::ZERO;
        };
        let lw = self.row_label_width(id);
        let l = self.measure(label, Size::new(lw, available.height));
        let v = self.measure(value, Size::new((available.width - lw).max(0), available.height));
        Size::new(lw + v.width, l.height.max(v.height))
    }

    pub(super) fn arrange_property_row(&mut self, id: WidgetId, size: Size) -> Size {
        let Ok((label, value)) = self.property_parts(id) else {
            return size;
        };
        let lw = self.row_label_width(id);
        self.arrange(label, Rect::new(0, 0, lw, size.height));
        self.arrange(value, Rect::new(lw, 0, (size.width - lw).max(0), size.height));
        size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{Dock, Edges};

    fn splitter_tree() -> (WidgetTree, WidgetId, WidgetId, WidgetId, WidgetId) {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Widget::Panel);
        let split = tree.add_horizontal_splitter(root).expect("splitter");
        tree.set_dock(split, Dock::Fill).expect("dock");
        let top = tree.add_panel(split).expect("top");
        let bottom = tree.add_panel(split).expect("bottom");
        (tree, root, split, top, bottom)
    }

    #[test]
    fn third_section_is_rejected() {
        let (mut tree, _, split, top, bottom) = splitter_tree();
        let before = tree.len();
        assert!(matches!(
            tree.add_panel(split),
            Err(UiError::TooManyChildren { limit: 2, .. })
        ));
        assert_eq!(tree.len(), before);
        assert_eq!(tree.splitter_panel(split, 0).expect("panel"), Some(top));
        assert_eq!(tree.splitter_panel(split, 1).expect("panel"), Some(bottom));
    }

    #[test]
    fn sections_split_around_bar() {
        let (mut tree, root, split, top, bottom) = splitter_tree();
        tree.layout(root, Size::new(100, 105));
        assert_eq!(tree.get(top).expect("top").bounds, Rect::new(0, 0, 100, 50));
        assert_eq!(tree.get(bottom).expect("bottom").bounds, Rect::new(0, 55, 100, 50));
        let bar = tree.splitter(split).expect("splitter").bar;
        assert_eq!(tree.get(bar).expect("bar").bounds, Rect::new(0, 50, 100, 5));
    }

    #[test]
    fn value_setter_clamps() {
        let (mut tree, _, split, _, _) = splitter_tree();
        tree.set_splitter_value(split, 1.7).expect("value");
        assert_eq!(tree.splitter_value(split).expect("value"), 1.0);
        tree.set_splitter_value(split, f32::NAN).expect("value");
        assert_eq!(tree.splitter_value(split).expect("value"), 1.0);
        tree.center_panels(split).expect("center");
        assert_eq!(tree.splitter_value(split).expect("value"), 0.5);
    }

    #[test]
    fn moving_bar_recomputes_value() {
        let (mut tree, root, split, top, _) = splitter_tree();
        tree.layout(root, Size::new(100, 105));
        tree.move_splitter_bar(split, 25).expect("move");
        assert!((tree.splitter_value(split).expect("value") - 0.25).abs() < 1e-6);
        tree.layout(root, Size::new(100, 105));
        assert_eq!(tree.get(top).expect("top").bounds.height, 25);
    }

    #[test]
    fn zoom_hides_other_section_and_emits() {
        let (mut tree, root, split, top, bottom) = splitter_tree();
        tree.events.set_recording(true);
        tree.zoom(split, 1).expect("zoom");
        tree.layout(root, Size::new(100, 100));

        assert!(tree.get(top).expect("top").hidden);
        assert_eq!(tree.get(bottom).expect("bottom").bounds, Rect::new(0, 0, 100, 100));
        let log = tree.events.drain_log();
        assert_eq!(
            log[log.len() - 2..],
            [
                Event::ZoomChanged {
                    source: split,
                    zoomed: Some(1)
                },
                Event::PanelZoomed {
                    source: split,
                    section: 1
                },
            ]
        );

        tree.unzoom(split).expect("unzoom");
        assert!(!tree.get(top).expect("top").hidden);
        assert!(matches!(
            tree.zoom(split, 2),
            Err(UiError::SectionOutOfRange { index: 2, .. })
        ));
    }

    #[test]
    fn property_rows_follow_label_width() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Widget::Panel);
        let props = tree.add_properties(root).expect("props");
        tree.set_dock(props, Dock::Fill).expect("dock");
        tree.set_padding(props, Edges::all(2)).expect("padding");
        let row = tree.add_property(props, "Name", "dockyard").expect("row");
        tree.layout(root, Size::new(200, 100));

        let (label, value) = tree.property_parts(row).expect("parts");
        assert_eq!(tree.get(label).expect("label").bounds.width, DEFAULT_LABEL_WIDTH);
        assert_eq!(tree.get(value).expect("value").bounds.x, DEFAULT_LABEL_WIDTH);
        let bar = tree.properties(props).expect("props").splitter;
        assert_eq!(tree.get(bar).expect("bar").bounds, Rect::new(80, 2, 3, 14));

        tree.events.set_recording(true);
        tree.move_label_splitter(props, 52).expect("move");
        tree.layout(root, Size::new(200, 100));
        assert_eq!(tree.properties(props).expect("props").label_width, 50);
        assert_eq!(tree.get(label).expect("label").bounds.width, 50);
        assert_eq!(
            tree.events.drain_log(),
            vec![Event::SplitterMoved {
                source: props,
                value: 50.0
            }]
        );
    }

    #[test]
    fn property_values_and_delete_all() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Widget::Panel);
        let props = tree.add_properties(root).expect("props");
        let row = tree.add_property(props, "Width", "10").expect("row");
        assert_eq!(tree.property_label(row).expect("label"), "Width");

        tree.events.set_recording(true);
        tree.set_property_value(row, "20").expect("set");
        assert_eq!(tree.property_value(row).expect("value"), "20");
        assert_eq!(
            tree.events.drain_log(),
            vec![Event::ValueChanged { source: props, row }]
        );

        tree.delete_all(props).expect("delete");
        assert!(!tree.contains(row));
    }
}

//! Tables of rows/cells and the list box built on them.
//!
//! Every row operation accepts either a table or a list box id; a list box
//! forwards to the table inside its scroll area and additionally tracks
//! selection.

use std::any::Any;

use regex::Regex;
use smallvec::{SmallVec, smallvec};

use super::error::UiError;
use super::events::Event;
use super::geometry::{Edges, Rect, Size};
use super::scroll::ScrollControl;
use super::widget::Widget;
use super::{WidgetId, WidgetTree};

/// Upper bound on table columns.
pub const MAX_COLUMNS: usize = 5;

const DEFAULT_COLUMN_WIDTH: i32 = 20;

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub column_count: usize,
    column_widths: [i32; MAX_COLUMNS],
    /// Fill target for the last column when sizing to content; 0 = none.
    max_width: i32,
    /// A row was added, removed or edited since the last size-to-content.
    pub(crate) row_measurement_dirty: bool,
    /// One-shot size-to-content request.
    size_to_contents: bool,
    /// Size to content after every row change.
    pub auto_size_to_content: bool,
    /// Mark rows even/odd during arrange.
    pub alternate_color: bool,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            column_count: 1,
            column_widths: [DEFAULT_COLUMN_WIDTH; MAX_COLUMNS],
            max_width: 0,
            row_measurement_dirty: false,
            size_to_contents: false,
            auto_size_to_content: false,
            alternate_color: false,
        }
    }
}

impl Table {
    pub fn column_widths(&self) -> &[i32] {
        &self.column_widths[..self.column_count]
    }
}

/// One table row. Cells are children of the row node, indexed by column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub column_count: usize,
    cells: SmallVec<[Option<WidgetId>; MAX_COLUMNS]>,
    column_widths: SmallVec<[i32; MAX_COLUMNS]>,
    pub selected: bool,
    pub even_row: bool,
    /// List box the row belongs to, if any.
    pub list: Option<WidgetId>,
}

impl TableRow {
    fn new(table: &Table, list: Option<WidgetId>) -> Self {
        Self {
            column_count: table.column_count,
            cells: smallvec![None; table.column_count],
            column_widths: table.column_widths[..table.column_count].iter().copied().collect(),
            selected: false,
            even_row: false,
            list,
        }
    }

    pub fn cell(&self, column: usize) -> Option<WidgetId> {
        self.cells.get(column).copied().flatten()
    }

    pub fn column_width(&self, column: usize) -> i32 {
        self.column_widths.get(column).copied().unwrap_or(0)
    }
}

/// Scroll control hosting a single table, with row selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListBox {
    pub scroll: ScrollControl,
    pub table: WidgetId,
    /// Selected rows in selection order.
    pub(crate) selected: Vec<WidgetId>,
    pub multi_select: bool,
    /// Clicking a selected row unselects it.
    pub toggle: bool,
}

// ---------------------------------------------------------------------------
// Table operations
// ---------------------------------------------------------------------------

impl WidgetTree {
    pub fn add_table(&mut self, parent: WidgetId) -> Result<WidgetId, UiError> {
        self.insert(parent, Widget::Table(Table::default()))
    }

    /// Resolve a table or list box id to the table holding the rows.
    pub fn table_of(&self, id: WidgetId) -> Result<WidgetId, UiError> {
        match self.get(id).map(|n| &n.widget) {
            Some(Widget::Table(_)) => Ok(id),
            Some(Widget::ListBox(lb)) => Ok(lb.table),
            Some(_) => Err(UiError::WrongKind {
                id,
                expected: "table or list box",
            }),
            None => Err(UiError::StaleWidget(id)),
        }
    }

    fn list_of(&self, id: WidgetId) -> Option<WidgetId> {
        self.list_box(id).ok().map(|_| id)
    }

    fn mark_rows_dirty(&mut self, table: WidgetId) {
        if let Ok(t) = self.table_mut(table) {
            t.row_measurement_dirty = true;
        }
        self.invalidate(table);
    }

    /// Append an empty row.
    pub fn add_row(&mut self, id: WidgetId) -> Result<WidgetId, UiError> {
        let table = self.table_of(id)?;
        let row = TableRow::new(self.table(table)?, self.list_of(id));
        let row = self.insert(table, Widget::TableRow(row))?;
        self.mark_rows_dirty(table);
        Ok(row)
    }

    /// Append a row whose first cell is a label with `text`.
    pub fn add_row_text(&mut self, id: WidgetId, text: impl Into<String>) -> Result<WidgetId, UiError> {
        let row = self.add_row(id)?;
        self.set_cell_text(row, 0, text)?;
        Ok(row)
    }

    /// Append a text row carrying a name and user data.
    pub fn add_row_with(
        &mut self,
        id: WidgetId,
        text: impl Into<String>,
        name: impl Into<String>,
        user_data: Option<Box<dyn Any>>,
    ) -> Result<WidgetId, UiError> {
        let row = self.add_row_text(id, text)?;
        self.set_name(row, name)?;
        self.set_user_data(row, user_data)?;
        Ok(row)
    }

    fn owned_row(&self, id: WidgetId, row: WidgetId) -> Result<WidgetId, UiError> {
        let table = self.table_of(id)?;
        self.table_row(row)?;
        if self.parent(row) != Some(table) {
            return Err(UiError::ForeignWidget { row, owner: id });
        }
        Ok(table)
    }

    pub fn remove_row(&mut self, id: WidgetId, row: WidgetId) -> Result<(), UiError> {
        self.owned_row(id, row)?;
        self.remove(row)
    }

    pub fn remove_row_at(&mut self, id: WidgetId, index: usize) -> Result<(), UiError> {
        let row = self.row(id, index)?;
        self.remove(row)
    }

    /// Remove every row. Selected rows leave the selection silently; use
    /// `clear` on a list box to get `RowUnselected` notifications.
    pub fn remove_all(&mut self, id: WidgetId) -> Result<(), UiError> {
        let table = self.table_of(id)?;
        for row in self.children(table).to_vec() {
            self.remove(row)?;
        }
        Ok(())
    }

    pub fn row(&self, id: WidgetId, index: usize) -> Result<WidgetId, UiError> {
        let table = self.table_of(id)?;
        let rows = self.children(table);
        rows.get(index).copied().ok_or(UiError::RowOutOfRange {
            index,
            len: rows.len(),
        })
    }

    pub fn row_count(&self, id: WidgetId) -> Result<usize, UiError> {
        let table = self.table_of(id)?;
        Ok(self.children(table).len())
    }

    pub fn row_index(&self, id: WidgetId, row: WidgetId) -> Option<usize> {
        let table = self.table_of(id).ok()?;
        self.children(table).iter().position(|&r| r == row)
    }

    /// Change the column count of the table and every row (1..=5). Cells in
    /// dropped columns are removed.
    pub fn set_column_count(&mut self, id: WidgetId, count: usize) -> Result<(), UiError> {
        if !(1..=MAX_COLUMNS).contains(&count) {
            return Err(UiError::InvalidColumnCount {
                count,
                max: MAX_COLUMNS,
            });
        }
        let table = self.table_of(id)?;
        let t = self.table_mut(table)?;
        if t.column_count == count {
            return Ok(());
        }
        t.column_count = count;
        let widths = t.column_widths;
        for row in self.children(table).to_vec() {
            let dropped: Vec<WidgetId> = {
                let r = self.table_row_mut(row)?;
                let dropped = r.cells.iter().skip(count).flatten().copied().collect();
                r.cells.resize(count, None);
                r.column_widths = widths[..count].iter().copied().collect();
                r.column_count = count;
                dropped
            };
            for cell in dropped {
                self.remove(cell)?;
            }
            self.invalidate_local(row);
        }
        self.mark_rows_dirty(table);
        Ok(())
    }

    /// Set one shared column width and push it to every row.
    pub fn set_column_width(&mut self, id: WidgetId, column: usize, width: i32) -> Result<(), UiError> {
        let table = self.table_of(id)?;
        let t = self.table_mut(table)?;
        if column >= t.column_count {
            return Err(UiError::ColumnOutOfRange {
                index: column,
                len: t.column_count,
            });
        }
        if t.column_widths[column] == width {
            return Ok(());
        }
        t.column_widths[column] = width;
        for row in self.children(table).to_vec() {
            if let Ok(r) = self.table_row_mut(row)
                && let Some(w) = r.column_widths.get_mut(column)
            {
                *w = width;
            }
            self.invalidate_local(row);
        }
        self.invalidate(table);
        Ok(())
    }

    pub fn column_width(&self, id: WidgetId, column: usize) -> Result<i32, UiError> {
        let t = self.table(self.table_of(id)?)?;
        if column >= t.column_count {
            return Err(UiError::ColumnOutOfRange {
                index: column,
                len: t.column_count,
            });
        }
        Ok(t.column_widths[column])
    }

    /// Size columns to their content on the next measure. A non-zero
    /// `max_width` widens the last column to fill it.
    pub fn size_to_content(&mut self, id: WidgetId, max_width: i32) -> Result<(), UiError> {
        let table = self.table_of(id)?;
        let t = self.table_mut(table)?;
        t.max_width = max_width.max(0);
        t.size_to_contents = true;
        self.mark_rows_dirty(table);
        Ok(())
    }

    pub fn set_auto_size_to_content(&mut self, id: WidgetId, auto: bool) -> Result<(), UiError> {
        let table = self.table_of(id)?;
        self.table_mut(table)?.auto_size_to_content = auto;
        self.mark_rows_dirty(table);
        Ok(())
    }

    pub fn set_alternate_color(&mut self, id: WidgetId, alternate: bool) -> Result<(), UiError> {
        let table = self.table_of(id)?;
        self.table_mut(table)?.alternate_color = alternate;
        self.invalidate(table);
        Ok(())
    }

    /// Put `text` in a cell, reusing an existing label there.
    pub fn set_cell_text(
        &mut self,
        row: WidgetId,
        column: usize,
        text: impl Into<String>,
    ) -> Result<WidgetId, UiError> {
        let existing = self.cell(row, column)?;
        if let Some(cell) = existing
            && matches!(self.get(cell).map(|n| &n.widget), Some(Widget::Label { .. }))
        {
            self.set_text(cell, text)?;
            if let Some(table) = self.parent(row) {
                self.mark_rows_dirty(table);
            }
            return Ok(cell);
        }
        self.set_cell_contents(row, column, Widget::Label { text: text.into() })
    }

    /// Replace a cell with a new widget, removing whatever was there.
    pub fn set_cell_contents(
        &mut self,
        row: WidgetId,
        column: usize,
        widget: Widget,
    ) -> Result<WidgetId, UiError> {
        if let Some(old) = self.cell(row, column)? {
            self.remove(old)?;
        }
        let cell = self.insert(row, widget)?;
        if let Some(slot) = self.table_row_mut(row)?.cells.get_mut(column) {
            *slot = Some(cell);
        }
        if let Some(table) = self.parent(row) {
            self.mark_rows_dirty(table);
        }
        Ok(cell)
    }

    /// Make an existing widget the contents of a cell, moving it under the
    /// row if needed.
    pub fn set_cell_widget(&mut self, row: WidgetId, column: usize, widget: WidgetId) -> Result<(), UiError> {
        if let Some(old) = self.cell(row, column)?
            && old != widget
        {
            self.remove(old)?;
        }
        if self.parent(widget) != Some(row) {
            self.reparent(widget, row)?;
        }
        if let Some(slot) = self.table_row_mut(row)?.cells.get_mut(column) {
            *slot = Some(widget);
        }
        if let Some(table) = self.parent(row) {
            self.mark_rows_dirty(table);
        }
        Ok(())
    }

    /// First empty cell of a row.
    pub fn first_free_cell(&self, row: WidgetId) -> Result<Option<usize>, UiError> {
        let r = self.table_row(row)?;
        Ok((0..r.column_count).find(|&c| r.cell(c).is_none_or(|w| !self.contains(w))))
    }

    pub fn cell(&self, row: WidgetId, column: usize) -> Result<Option<WidgetId>, UiError> {
        let r = self.table_row(row)?;
        if column >= r.column_count {
            return Err(UiError::ColumnOutOfRange {
                index: column,
                len: r.column_count,
            });
        }
        Ok(r.cell(column).filter(|&c| self.contains(c)))
    }

    /// Text of the row's first cell when it is a label.
    pub fn row_text(&self, row: WidgetId) -> Option<&str> {
        let cell = self.table_row(row).ok()?.cell(0)?;
        match &self.get(cell)?.widget {
            Widget::Label { text } => Some(text),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    pub(super) fn measure_table(&mut self, id: WidgetId, available: Size) -> Size {
        let Ok(t) = self.table(id) else {
            return Size::ZERO;
        };
        if t.row_measurement_dirty && (t.auto_size_to_content || t.size_to_contents) {
            if let Ok(t) = self.table_mut(id) {
                t.size_to_contents = false;
            }
            return self.size_table_to_contents(id, available);
        }

        let (mut width, mut height) = (0, 0);
        for row in self.children(id).to_vec() {
            let s = self.measure(row, available);
            width = width.max(s.width);
            height += s.height;
        }
        Size::new(width, height)
    }

    fn size_table_to_contents(&mut self, id: WidgetId, available: Size) -> Size {
        let Ok(t) = self.table(id) else {
            return Size::ZERO;
        };
        let (count, max_width) = (t.column_count, t.max_width);
        let rows = self.children(id).to_vec();

        let mut widths: SmallVec<[i32; MAX_COLUMNS]> = smallvec![0; count];
        for &row in &rows {
            self.invalidate_local(row);
            self.measure(row, available);
            let Ok(r) = self.table_row(row) else { continue };
            for (i, w) in widths.iter_mut().enumerate() {
                if let Some(cell) = r.cell(i).and_then(|c| self.get(c)) {
                    *w = (*w).max(cell.measured.width);
                }
            }
        }

        let sum: i32 = widths.iter().sum();
        if max_width > 0
            && let Some(last) = widths.last_mut()
        {
            *last += (max_width - sum).max(0);
        }

        let (mut width, mut height) = (0, 0);
        for &row in &rows {
            if let Ok(r) = self.table_row_mut(row) {
                r.column_widths = widths.clone();
            }
            self.invalidate_local(row);
            let s = self.measure(row, available);
            width = width.max(s.width);
            height += s.height;
        }

        if let Ok(t) = self.table_mut(id) {
            t.column_widths[..count].copy_from_slice(&widths);
            t.row_measurement_dirty = false;
        }
        Size::new(width.max(max_width), height)
    }

    pub(super) fn arrange_table(&mut self, id: WidgetId, size: Size) -> Size {
        let alternate = self.table(id).is_ok_and(|t| t.alternate_color);
        let mut y = 0;
        let mut even = false;
        for row in self.children(id).to_vec() {
            let Some(node) = self.get(row) else { continue };
            if node.collapsed {
                continue;
            }
            let h = node.measured.height;
            if alternate && let Ok(r) = self.table_row_mut(row) {
                r.even_row = even;
                even = !even;
            }
            self.arrange(row, Rect::new(0, y, size.width, h));
            y += h;
        }
        Size::new(size.width, y)
    }

    pub(super) fn measure_table_row(&mut self, id: WidgetId, available: Size) -> Size {
        let Ok(r) = self.table_row(id) else {
            return Size::ZERO;
        };
        let r = r.clone();
        let (mut width, mut height) = (0, 0);
        for i in 0..r.column_count {
            let col_w = r.column_width(i);
            let last = i + 1 == r.column_count;
            let Some(cell) = r.cell(i) else {
                width += col_w;
                continue;
            };
            if last {
                let s = self.measure(cell, Size::new((available.width - width).max(0), available.height));
                width += col_w.max(s.width);
                height = height.max(s.height);
            } else {
                let s = self.measure(cell, Size::new(col_w, available.height));
                width += col_w;
                height = height.max(s.height);
            }
        }
        Size::new(width, height)
    }

    pub(super) fn arrange_table_row(&mut self, id: WidgetId, size: Size) -> Size {
        let Ok(r) = self.table_row(id) else {
            return size;
        };
        let r = r.clone();
        let mut x = 0;
        for i in 0..r.column_count {
            let col_w = r.column_width(i);
            if let Some(cell) = r.cell(i) {
                let w = if i + 1 == r.column_count {
                    (size.width - x).max(0)
                } else {
                    col_w
                };
                self.arrange(cell, Rect::new(x, 0, w, size.height));
            }
            x += col_w;
        }
        size
    }
}

// ---------------------------------------------------------------------------
// ListBox operations
// ---------------------------------------------------------------------------

impl WidgetTree {
    /// Single-column, vertically scrolling list with row selection.
    pub fn add_list_box(&mut self, parent: WidgetId) -> Result<WidgetId, UiError> {
        let placeholder = ListBox {
            scroll: ScrollControl {
                area: WidgetId::default(),
                vbar: WidgetId::default(),
                hbar: WidgetId::default(),
                can_scroll_h: false,
                can_scroll_v: true,
                auto_hide_bars: true,
            },
            table: WidgetId::default(),
            selected: Vec::new(),
            multi_select: false,
            toggle: false,
        };
        let id = self.insert(parent, Widget::ListBox(placeholder))?;
        self.set_padding(id, Edges::ONE)?;
        let scroll = self.build_scroll_parts(id, false, true, true)?;
        let table = self.insert(
            scroll.area,
            Widget::Table(Table {
                auto_size_to_content: true,
                ..Table::default()
            }),
        )?;
        let lb = self.list_box_mut(id)?;
        lb.scroll = scroll;
        lb.table = table;
        Ok(id)
    }

    fn list_row(&self, list: WidgetId, row: WidgetId) -> Result<(), UiError> {
        self.list_box(list)?;
        let r = self.table_row(row)?;
        if r.list != Some(list) {
            return Err(UiError::ForeignWidget { row, owner: list });
        }
        Ok(())
    }

    fn set_row_selected(&mut self, row: WidgetId, selected: bool) {
        if let Ok(r) = self.table_row_mut(row) {
            r.selected = selected;
        }
    }

    /// Select `row`. Single-select lists (or `clear_others`) unselect every
    /// other row first.
    pub fn select_row(&mut self, list: WidgetId, row: WidgetId, clear_others: bool) -> Result<(), UiError> {
        self.list_row(list, row)?;
        let multi = self.list_box(list)?.multi_select;
        if !multi || clear_others {
            self.unselect_all(list)?;
        }
        let lb = self.list_box_mut(list)?;
        if lb.selected.contains(&row) {
            return Ok(());
        }
        lb.selected.push(row);
        self.set_row_selected(row, true);
        self.events.emit(Event::RowSelected { source: list, row });
        Ok(())
    }

    pub fn select_row_at(&mut self, list: WidgetId, index: usize, clear_others: bool) -> Result<(), UiError> {
        let row = self.row(list, index)?;
        self.select_row(list, row, clear_others)
    }

    pub fn unselect_row(&mut self, list: WidgetId, row: WidgetId) -> Result<(), UiError> {
        self.list_row(list, row)?;
        let lb = self.list_box_mut(list)?;
        let Some(pos) = lb.selected.iter().position(|&r| r == row) else {
            return Ok(());
        };
        lb.selected.remove(pos);
        self.set_row_selected(row, false);
        self.events.emit(Event::RowUnselected { source: list, row });
        Ok(())
    }

    pub fn unselect_all(&mut self, list: WidgetId) -> Result<(), UiError> {
        let rows = std::mem::take(&mut self.list_box_mut(list)?.selected);
        for row in rows {
            self.set_row_selected(row, false);
            self.events.emit(Event::RowUnselected { source: list, row });
        }
        Ok(())
    }

    /// Make `row` the selected row, keeping others only in multi-select mode.
    fn set_selected_row(&mut self, list: WidgetId, row: WidgetId) -> Result<(), UiError> {
        let multi = self.list_box(list)?.multi_select;
        self.select_row(list, row, !multi)
    }

    fn first_row_where(&self, list: WidgetId, pred: impl Fn(WidgetId) -> bool) -> Result<Option<WidgetId>, UiError> {
        let table = self.table_of(list)?;
        Ok(self.children(table).iter().copied().find(|&r| pred(r)))
    }

    /// Select the first row whose text equals `text`.
    pub fn select_by_text(&mut self, list: WidgetId, text: &str) -> Result<Option<WidgetId>, UiError> {
        let found = self.first_row_where(list, |r| self.row_text(r) == Some(text))?;
        if let Some(row) = found {
            self.set_selected_row(list, row)?;
        }
        Ok(found)
    }

    /// Select the first row with widget name `name`.
    pub fn select_by_name(&mut self, list: WidgetId, name: &str) -> Result<Option<WidgetId>, UiError> {
        let found = self.first_row_where(list, |r| self.get(r).is_some_and(|n| n.name == name))?;
        if let Some(row) = found {
            self.set_selected_row(list, row)?;
        }
        Ok(found)
    }

    /// Select the first row whose user data is a `T` equal to `value`.
    pub fn select_by_user_data<T: PartialEq + 'static>(
        &mut self,
        list: WidgetId,
        value: &T,
    ) -> Result<Option<WidgetId>, UiError> {
        let found = self.first_row_where(list, |r| {
            self.get(r)
                .and_then(|n| n.user_data.as_ref())
                .and_then(|d| d.downcast_ref::<T>())
                .is_some_and(|d| d == value)
        })?;
        if let Some(row) = found {
            self.set_selected_row(list, row)?;
        }
        Ok(found)
    }

    /// Select every row whose text equals `text`. Returns how many matched.
    pub fn select_rows(&mut self, list: WidgetId, text: &str, clear_others: bool) -> Result<usize, UiError> {
        let table = self.table_of(list)?;
        let rows: Vec<WidgetId> = self
            .children(table)
            .iter()
            .copied()
            .filter(|&r| self.row_text(r) == Some(text))
            .collect();
        for &row in &rows {
            self.select_row(list, row, clear_others)?;
        }
        Ok(rows.len())
    }

    /// Select every row whose text matches `pattern`. An invalid pattern is
    /// rejected before anything changes.
    pub fn select_rows_by_regex(
        &mut self,
        list: WidgetId,
        pattern: &str,
        clear_others: bool,
    ) -> Result<usize, UiError> {
        let re = Regex::new(pattern)?;
        let table = self.table_of(list)?;
        let rows: Vec<WidgetId> = self
            .children(table)
            .iter()
            .copied()
            .filter(|&r| self.row_text(r).is_some_and(|t| re.is_match(t)))
            .collect();
        for &row in &rows {
            self.select_row(list, row, clear_others)?;
        }
        Ok(rows.len())
    }

    pub fn selected_rows(&self, list: WidgetId) -> Result<&[WidgetId], UiError> {
        Ok(&self.list_box(list)?.selected)
    }

    /// First selected row.
    pub fn selected_row(&self, list: WidgetId) -> Option<WidgetId> {
        self.list_box(list).ok()?.selected.first().copied()
    }

    pub fn selected_row_index(&self, list: WidgetId) -> Option<usize> {
        let row = self.selected_row(list)?;
        self.row_index(list, row)
    }

    /// Multi-select implies toggle behaviour.
    pub fn set_multi_select(&mut self, list: WidgetId, multi: bool) -> Result<(), UiError> {
        let lb = self.list_box_mut(list)?;
        lb.multi_select = multi;
        if multi {
            lb.toggle = true;
        }
        Ok(())
    }

    pub fn set_list_toggle(&mut self, list: WidgetId, toggle: bool) -> Result<(), UiError> {
        self.list_box_mut(list)?.toggle = toggle;
        Ok(())
    }

    /// Unselect everything (with notifications), then drop every row.
    pub fn clear(&mut self, list: WidgetId) -> Result<(), UiError> {
        self.unselect_all(list)?;
        self.remove_all(list)?;
        self.invalidate(list);
        Ok(())
    }

    /// Mouse entry point for a click on `row`: toggles a selected row off
    /// when toggling is enabled, otherwise selects it.
    pub fn row_clicked(&mut self, list: WidgetId, row: WidgetId) -> Result<(), UiError> {
        self.list_row(list, row)?;
        let selected = self.table_row(row)?.selected;
        if selected {
            if self.list_box(list)?.toggle {
                self.unselect_row(list, row)?;
            }
        } else {
            self.select_row(list, row, false)?;
        }
        Ok(())
    }

    pub fn row_double_clicked(&mut self, list: WidgetId, row: WidgetId) -> Result<(), UiError> {
        self.list_row(list, row)?;
        self.events.emit(Event::RowDoubleClicked { source: list, row });
        Ok(())
    }

    /// Scroll so that `row` is inside the viewport (uses the last arrange).
    pub fn scroll_to_row(&mut self, list: WidgetId, row: WidgetId) -> Result<(), UiError> {
        self.list_row(list, row)?;
        let bounds = self.get(row).map(|n| n.bounds).unwrap_or(Rect::EMPTY);
        self.scroll_to_visible(list, bounds)
    }
}

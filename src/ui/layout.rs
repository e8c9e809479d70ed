//! Sequential and grid distribution containers.

use super::error::UiError;
use super::geometry::{Rect, Size};
use super::{WidgetId, WidgetTree};

// ---------------------------------------------------------------------------
// StackLayout
// ---------------------------------------------------------------------------

/// Children laid out one after another along a single axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StackLayout {
    pub horizontal: bool,
}

impl WidgetTree {
    pub fn add_stack(&mut self, parent: WidgetId, horizontal: bool) -> Result<WidgetId, UiError> {
        self.insert(parent, super::Widget::Stack(StackLayout { horizontal }))
    }

    pub fn set_stack_horizontal(&mut self, id: WidgetId, horizontal: bool) -> Result<(), UiError> {
        let stack = self.stack_mut(id)?;
        if stack.horizontal != horizontal {
            stack.horizontal = horizontal;
            self.invalidate(id);
        }
        Ok(())
    }

    pub(super) fn measure_stack(&mut self, id: WidgetId, available: Size) -> Size {
        let Ok(&StackLayout { horizontal }) = self.stack(id) else {
            return Size::ZERO;
        };
        let padding = self.get(id).map(|n| n.padding).unwrap_or_default();
        let children = self.children(id).to_vec();
        let mut budget = available - padding;
        let (mut width, mut height) = (0, 0);

        for child in children {
            if self.get(child).is_none_or(|c| c.collapsed) {
                continue;
            }
            let s = self.measure(child, budget);
            if horizontal {
                budget.width = (budget.width - s.width).max(0);
                height = height.max(s.height);
                width += s.width;
            } else {
                budget.height = (budget.height - s.height).max(0);
                width = width.max(s.width);
                height += s.height;
            }
        }
        Size::new(width, height) + padding
    }

    pub(super) fn arrange_stack(&mut self, id: WidgetId, size: Size) -> Size {
        let Ok(&StackLayout { horizontal }) = self.stack(id) else {
            return size;
        };
        let padding = self.get(id).map(|n| n.padding).unwrap_or_default();
        let children = self.children(id).to_vec();
        let inner = size - padding;

        if horizontal {
            let mut x = padding.left;
            for child in children {
                let Some(c) = self.get(child) else { continue };
                if c.collapsed {
                    continue;
                }
                let w = c.measured.width;
                self.arrange(child, Rect::new(x, padding.top, w, inner.height));
                x += w;
            }
            Size::new(x + padding.right, inner.height + padding.vertical())
        } else {
            let mut y = padding.top;
            for child in children {
                let Some(c) = self.get(child) else { continue };
                if c.collapsed {
                    continue;
                }
                let h = c.measured.height;
                self.arrange(child, Rect::new(padding.left, y, inner.width, h));
                y += h;
            }
            Size::new(inner.width + padding.horizontal(), y + padding.bottom)
        }
    }
}

// ---------------------------------------------------------------------------
// GridLayout
// ---------------------------------------------------------------------------

/// Requested size of one grid column or row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellSize {
    /// Smallest size the content can be drawn at.
    Auto,
    /// Share of the space left after auto and fixed cells, in `0.0..=1.0`.
    Fraction(f32),
    /// Literal pixels (content may still widen it).
    Fixed(i32),
}

impl CellSize {
    /// Classify a raw value: NaN is auto, `0..=1` a fraction, `> 1` pixels.
    pub fn from_f32(v: f32) -> Result<CellSize, UiError> {
        if v.is_nan() {
            Ok(CellSize::Auto)
        } else if (0.0..=1.0).contains(&v) {
            Ok(CellSize::Fraction(v))
        } else if v > 1.0 {
            Ok(CellSize::Fixed(v as i32))
        } else {
            Err(UiError::InvalidCellSize(v))
        }
    }
}

/// Allowed slack when summing fractions so that e.g. `[0.7, 0.3]` passes.
const FRACTION_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLayout {
    pub column_count: usize,
    requested_columns: Option<Vec<CellSize>>,
    requested_rows: Option<Vec<CellSize>>,
    column_widths: Vec<i32>,
    row_heights: Vec<i32>,
    total_fixed: Size,
    total_auto_fixed: Size,
}

impl GridLayout {
    pub fn new(column_count: usize) -> Self {
        Self {
            column_count: column_count.max(1),
            ..Self::default()
        }
    }

    /// Validate and store column sizes; the column count follows their length.
    pub fn set_column_widths(&mut self, widths: &[f32]) -> Result<(), UiError> {
        let (sizes, fixed) = validate_cells(widths, "column")?;
        self.total_fixed.width = fixed;
        self.column_count = sizes.len().max(1);
        self.requested_columns = Some(sizes);
        Ok(())
    }

    pub fn set_row_heights(&mut self, heights: &[f32]) -> Result<(), UiError> {
        let (sizes, fixed) = validate_cells(heights, "row")?;
        self.total_fixed.height = fixed;
        self.requested_rows = Some(sizes);
        Ok(())
    }

    /// Column widths from the last measure.
    pub fn column_widths(&self) -> &[i32] {
        &self.column_widths
    }

    pub fn row_heights(&self) -> &[i32] {
        &self.row_heights
    }

    fn column_request(&self, col: usize) -> CellSize {
        requested(self.requested_columns.as_deref(), col)
    }

    fn row_request(&self, row: usize) -> CellSize {
        requested(self.requested_rows.as_deref(), row)
    }
}

fn requested(sizes: Option<&[CellSize]>, index: usize) -> CellSize {
    sizes
        .and_then(|s| s.get(index))
        .copied()
        .unwrap_or(CellSize::Auto)
}

fn validate_cells(values: &[f32], axis: &'static str) -> Result<(Vec<CellSize>, i32), UiError> {
    let mut fraction_total = 0.0f64;
    let mut fixed_total = 0;
    let mut sizes = Vec::with_capacity(values.len());
    for &v in values {
        let cell = CellSize::from_f32(v)?;
        match cell {
            CellSize::Fraction(f) => fraction_total += f as f64,
            CellSize::Fixed(px) => fixed_total += px,
            CellSize::Auto => {}
        }
        sizes.push(cell);
    }
    if fraction_total > 1.0 + FRACTION_EPSILON {
        return Err(UiError::FractionsExceedOne {
            axis,
            total: fraction_total,
        });
    }
    Ok((sizes, fixed_total))
}

/// Pixel extents for each cell along one axis. Fractional cells use
/// cumulative rounding so that together they receive exactly
/// `floor(sum × remaining)`.
fn distribute(measured: &[i32], request: impl Fn(usize) -> CellSize, remaining: i32) -> Vec<i32> {
    let remaining = remaining.max(0) as f64;
    let mut acc = 0.0f64;
    let mut assigned = 0;
    measured
        .iter()
        .enumerate()
        .map(|(i, &m)| match request(i) {
            CellSize::Auto | CellSize::Fixed(_) => m,
            CellSize::Fraction(f) => {
                acc += f as f64;
                let end = (acc * remaining + 1e-9).floor() as i32;
                let extent = (end - assigned).max(0);
                assigned = end;
                extent
            }
        })
        .collect()
}

impl WidgetTree {
    pub fn add_grid(&mut self, parent: WidgetId, column_count: usize) -> Result<WidgetId, UiError> {
        self.insert(parent, super::Widget::Grid(GridLayout::new(column_count)))
    }

    pub fn set_grid_column_count(&mut self, id: WidgetId, count: usize) -> Result<(), UiError> {
        let grid = self.grid_mut(id)?;
        grid.column_count = count.max(1);
        grid.requested_columns = None;
        grid.total_fixed.width = 0;
        self.invalidate(id);
        Ok(())
    }

    /// Set per-column sizes. Fails, leaving the grid unchanged, if a value is
    /// negative or the fractions add up to more than 1.
    pub fn set_grid_column_widths(&mut self, id: WidgetId, widths: &[f32]) -> Result<(), UiError> {
        self.grid_mut(id)?.set_column_widths(widths)?;
        self.invalidate(id);
        Ok(())
    }

    pub fn set_grid_row_heights(&mut self, id: WidgetId, heights: &[f32]) -> Result<(), UiError> {
        self.grid_mut(id)?.set_row_heights(heights)?;
        self.invalidate(id);
        Ok(())
    }

    pub(super) fn measure_grid(&mut self, id: WidgetId, available: Size) -> Size {
        let Ok(grid) = self.grid(id) else {
            return Size::ZERO;
        };
        let grid = grid.clone();
        let padding = self.get(id).map(|n| n.padding).unwrap_or_default();
        let children = self.children(id).to_vec();
        let inner = available - padding;

        let cols = grid.column_count.max(1);
        let rows = children.len().div_ceil(cols);
        let mut col_w = vec![0; cols];
        let mut row_h = vec![0; rows];
        let mut cell_budget = inner;

        for (i, &child) in children.iter().enumerate() {
            let (col, row) = (i % cols, i / cols);
            let collapsed = self.get(child).is_none_or(|c| c.collapsed);
            let size = if collapsed {
                Size::ZERO
            } else {
                let mut offer = cell_budget;
                match grid.column_request(col) {
                    CellSize::Fraction(f) => {
                        offer.width = (f * (inner.width - grid.total_fixed.width) as f32) as i32;
                    }
                    CellSize::Fixed(px) => offer.width = px,
                    CellSize::Auto => {}
                }
                match grid.row_request(row) {
                    CellSize::Fraction(f) => {
                        offer.height = (f * (inner.height - grid.total_fixed.height) as f32) as i32;
                    }
                    CellSize::Fixed(px) => offer.height = px,
                    CellSize::Auto => {}
                }
                self.measure(child, offer.max(Size::ZERO))
            };
            col_w[col] = col_w[col].max(size.width);
            row_h[row] = row_h[row].max(size.height);

            cell_budget.width = (cell_budget.width - col_w[col]).max(0);
            if col + 1 == cols {
                cell_budget.width = inner.width;
                cell_budget.height = (cell_budget.height - row_h[row]).max(0);
            }
        }

        let mut auto_fixed = Size::ZERO;
        for (col, w) in col_w.iter_mut().enumerate() {
            match grid.column_request(col) {
                CellSize::Fixed(px) => {
                    *w = (*w).max(px);
                    auto_fixed.width += *w;
                }
                CellSize::Auto => auto_fixed.width += *w,
                CellSize::Fraction(_) => {}
            }
        }
        for (row, h) in row_h.iter_mut().enumerate() {
            match grid.row_request(row) {
                CellSize::Fixed(px) => {
                    *h = (*h).max(px);
                    auto_fixed.height += *h;
                }
                CellSize::Auto => auto_fixed.height += *h,
                CellSize::Fraction(_) => {}
            }
        }

        let desired = Size::new(col_w.iter().sum(), row_h.iter().sum()) + padding;
        if let Ok(grid) = self.grid_mut(id) {
            grid.column_widths = col_w;
            grid.row_heights = row_h;
            grid.total_auto_fixed = auto_fixed;
        }
        desired
    }

    pub(super) fn arrange_grid(&mut self, id: WidgetId, size: Size) -> Size {
        let Ok(grid) = self.grid(id) else {
            return size;
        };
        let grid = grid.clone();
        let padding = self.get(id).map(|n| n.padding).unwrap_or_default();
        let children = self.children(id).to_vec();
        let inner = size - padding;
        let cols = grid.column_count.max(1);

        let widths = distribute(
            &grid.column_widths,
            |c| grid.column_request(c),
            inner.width - grid.total_auto_fixed.width,
        );
        let heights = distribute(
            &grid.row_heights,
            |r| grid.row_request(r),
            inner.height - grid.total_auto_fixed.height,
        );

        let (mut x, mut y) = (padding.left, padding.top);
        for (i, &child) in children.iter().enumerate() {
            let (col, row) = (i % cols, i / cols);
            let w = widths.get(col).copied().unwrap_or(0);
            let h = heights.get(row).copied().unwrap_or(0);
            self.arrange(child, Rect::new(x, y, w, h));

            x += w;
            if col + 1 == cols {
                x = padding.left;
                y += h;
            }
        }
        size
    }
}

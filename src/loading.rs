//! Declarative views (KDL) and themes (RON).
//!
//! A view file is a KDL document whose nodes name widgets:
//!
//! ```kdl
//! dock name="main" dock="fill" {
//!     left {
//!         page "Files" { list-box name="files" dock="fill" on-row-selected="open" }
//!     }
//! }
//! ```
//!
//! Node names resolve through the loader's element table, named entries
//! through its property table, and `on-*` entries name handlers registered
//! with `ViewLoader::register_handler`. Every table is an ordinary field of
//! the loader, so applications add their own elements the same way the stock
//! ones are registered.

use std::collections::HashMap;
use std::rc::Rc;

use kdl::{KdlDocument, KdlNode, KdlValue};

use crate::ui::{
    Dock, Event, EventKind, HAlign, Padding, Point, Size, Theme, Toggle, UiError, VAlign, Widget,
    WidgetId, WidgetTree,
};

/// What an element builder created: the widget properties apply to, and
/// the widget its child elements go into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Built {
    pub id: WidgetId,
    pub content: WidgetId,
}

impl Built {
    fn leaf(id: WidgetId) -> Self {
        Self { id, content: id }
    }
}

/// Creates the widget for one element under `parent`.
pub type ElementBuilder = fn(&mut WidgetTree, WidgetId, &KdlNode) -> Result<Built, UiError>;

/// Applies one named property value to a widget.
pub type PropertySetter = fn(&mut WidgetTree, WidgetId, &KdlValue) -> Result<(), UiError>;

/// Event handler shared by every widget that names it.
pub type Handler = Rc<dyn Fn(&Event)>;

pub struct ViewLoader {
    elements: HashMap<String, ElementBuilder>,
    properties: HashMap<String, PropertySetter>,
    events: HashMap<String, EventKind>,
    handlers: HashMap<String, Handler>,
}

impl Default for ViewLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewLoader {
    /// Loader knowing every stock element, property and event attribute.
    pub fn new() -> Self {
        let mut loader = Self {
            elements: HashMap::new(),
            properties: HashMap::new(),
            events: HashMap::new(),
            handlers: HashMap::new(),
        };

        let elements: [(&str, ElementBuilder); 21] = [
            ("panel", build_panel),
            ("label", build_label),
            ("button", build_button),
            ("check-box", build_check_box),
            ("stack", build_stack),
            ("grid", build_grid),
            ("table", build_table),
            ("row", build_row),
            ("list-box", build_list_box),
            ("scroll", build_scroll),
            ("splitter", build_splitter),
            ("properties", build_properties),
            ("property", build_property),
            ("tab-control", build_tab_control),
            ("page", build_page),
            ("dock", build_dock),
            ("left", build_dock_side),
            ("right", build_dock_side),
            ("top", build_dock_side),
            ("bottom", build_dock_side),
            ("fill", build_dock_side),
        ];
        for (name, builder) in elements {
            loader.register_element(name, builder);
        }

        let properties: [(&str, PropertySetter); 30] = [
            ("name", set_name),
            ("dock", set_dock),
            ("margin", set_margin),
            ("padding", set_padding),
            ("width", set_width),
            ("height", set_height),
            ("min-width", set_min_width),
            ("min-height", set_min_height),
            ("max-width", set_max_width),
            ("max-height", set_max_height),
            ("halign", set_halign),
            ("valign", set_valign),
            ("collapsed", set_collapsed),
            ("hidden", set_hidden),
            ("disabled", set_disabled),
            ("x", set_x),
            ("y", set_y),
            ("text", set_text),
            ("horizontal", set_horizontal),
            ("column-count", set_column_count),
            ("column-widths", set_column_widths),
            ("row-heights", set_row_heights),
            ("multi-select", set_multi_select),
            ("toggle", set_toggle),
            ("auto-size", set_auto_size),
            ("size-to-content", set_size_to_content),
            ("value", set_value),
            ("label-width", set_label_width),
            ("alternate-color", set_alternate_color),
            ("checked", set_checked),
        ];
        for (name, setter) in properties {
            loader.register_property(name, setter);
        }

        for (name, kind) in [
            ("on-click", EventKind::Clicked),
            ("on-toggle", EventKind::Toggled),
            ("on-row-selected", EventKind::RowSelected),
            ("on-row-unselected", EventKind::RowUnselected),
            ("on-row-double-click", EventKind::RowDoubleClicked),
            ("on-scroll", EventKind::ScrollChanged),
            ("on-zoom", EventKind::ZoomChanged),
            ("on-splitter-moved", EventKind::SplitterMoved),
            ("on-tab-selected", EventKind::TabSelected),
            ("on-value-changed", EventKind::ValueChanged),
        ] {
            loader.events.insert(name.to_string(), kind);
        }
        loader
    }

    pub fn register_element(&mut self, name: &str, builder: ElementBuilder) {
        self.elements.insert(name.to_string(), builder);
    }

    pub fn register_property(&mut self, name: &str, setter: PropertySetter) {
        self.properties.insert(name.to_string(), setter);
    }

    /// Make `name` available to `on-*` attributes.
    pub fn register_handler(&mut self, name: &str, handler: impl Fn(&Event) + 'static) {
        self.handlers.insert(name.to_string(), Rc::new(handler));
    }

    /// Read and load a view file under `parent`.
    pub fn load_file(&self, tree: &mut WidgetTree, parent: WidgetId, path: &str) -> Result<Vec<WidgetId>, UiError> {
        let text = std::fs::read_to_string(path)?;
        self.load_str(tree, parent, &text)
    }

    /// Load every top-level element of a KDL document under `parent`.
    /// Either the whole document loads or nothing stays in the tree.
    pub fn load_str(&self, tree: &mut WidgetTree, parent: WidgetId, text: &str) -> Result<Vec<WidgetId>, UiError> {
        let doc: KdlDocument = text.parse()?;
        let mut built = Vec::new();
        for node in doc.nodes() {
            match self.load_node(tree, parent, node) {
                Ok(id) => built.push(id),
                Err(e) => {
                    for id in built.into_iter().rev() {
                        discard(tree, id);
                    }
                    return Err(e);
                }
            }
        }
        log::debug!("loaded {} top-level elements", built.len());
        Ok(built)
    }

    /// Build one element and its subtree. On error the partially built
    /// subtree is removed.
    pub fn load_node(&self, tree: &mut WidgetTree, parent: WidgetId, node: &KdlNode) -> Result<WidgetId, UiError> {
        let element = node.name().value();
        let builder = self
            .elements
            .get(element)
            .ok_or_else(|| UiError::UnknownElement(element.to_string()))?;
        let built = builder(tree, parent, node)?;
        if let Err(e) = self.populate(tree, built, node) {
            discard(tree, built.id);
            return Err(e);
        }
        Ok(built.id)
    }

    fn populate(&self, tree: &mut WidgetTree, built: Built, node: &KdlNode) -> Result<(), UiError> {
        let element = node.name().value();
        for entry in node.entries() {
            let Some(key) = entry.name() else {
                continue;
            };
            let key = key.value();
            if key.starts_with("on-") {
                self.attach_handler(tree, built.id, element, key, entry.value())?;
                continue;
            }
            let setter = self.properties.get(key).ok_or_else(|| UiError::UnknownProperty {
                element: element.to_string(),
                property: key.to_string(),
            })?;
            setter(tree, built.id, entry.value()).map_err(|e| match e {
                UiError::WrongKind { .. } => UiError::UnknownProperty {
                    element: element.to_string(),
                    property: key.to_string(),
                },
                other => other,
            })?;
        }

        let Some(children) = node.children() else {
            return Ok(());
        };
        for child in children.nodes() {
            let id = self.load_node(tree, built.content, child)?;
            // Controls nested in a row fill its free cells in order.
            if tree.table_row(built.content).is_ok() {
                let column = tree.first_free_cell(built.content)?.ok_or_else(|| UiError::Misplaced {
                    element: child.name().value().to_string(),
                    reason: "row has no free cell".into(),
                })?;
                tree.set_cell_widget(built.content, column, id)?;
            }
        }
        Ok(())
    }

    fn attach_handler(
        &self,
        tree: &mut WidgetTree,
        id: WidgetId,
        element: &str,
        key: &str,
        value: &KdlValue,
    ) -> Result<(), UiError> {
        let kind = *self.events.get(key).ok_or_else(|| UiError::UnknownProperty {
            element: element.to_string(),
            property: key.to_string(),
        })?;
        let name = string(key, value)?;
        let handler = Rc::clone(
            self.handlers
                .get(name)
                .ok_or_else(|| UiError::UnknownHandler(name.to_string()))?,
        );
        tree.subscribe(id, kind, move |e| handler(e))
    }
}

/// Remove a widget built by the loader. Pages go with their tab button.
fn discard(tree: &mut WidgetTree, id: WidgetId) {
    let button = tree
        .parent(id)
        .and_then(|tc| tree.tab_buttons(tc).ok())
        .and_then(|buttons| buttons.into_iter().find(|&b| tree.tab_page(b).ok() == Some(id)));
    let result = match button {
        Some(button) => tree.remove_tab(button),
        None => tree.remove(id),
    };
    if let Err(e) = result {
        log::warn!("failed to discard partially loaded {id:?}: {e}");
    }
}

// ---------------------------------------------------------------------------
// Value conversion
// ---------------------------------------------------------------------------

fn invalid(property: &str, reason: impl Into<String>) -> UiError {
    UiError::InvalidValue {
        property: property.to_string(),
        reason: reason.into(),
    }
}

fn string<'a>(property: &str, v: &'a KdlValue) -> Result<&'a str, UiError> {
    v.as_string().ok_or_else(|| invalid(property, "expected a string"))
}

fn int(property: &str, v: &KdlValue) -> Result<i32, UiError> {
    let i = v.as_integer().ok_or_else(|| invalid(property, "expected an integer"))?;
    i32::try_from(i).map_err(|_| invalid(property, format!("{i} is out of range")))
}

fn float(property: &str, v: &KdlValue) -> Result<f32, UiError> {
    v.as_float()
        .or_else(|| v.as_integer().map(|i| i as f64))
        .map(|f| f as f32)
        .ok_or_else(|| invalid(property, "expected a number"))
}

fn boolean(property: &str, v: &KdlValue) -> Result<bool, UiError> {
    v.as_bool().ok_or_else(|| invalid(property, "expected #true or #false"))
}

fn count(property: &str, v: &KdlValue) -> Result<usize, UiError> {
    let n = int(property, v)?;
    usize::try_from(n).map_err(|_| invalid(property, "must not be negative"))
}

/// `4`, `"4"`, `"8 4"` (horizontal vertical) or `"top right bottom left"`.
fn edges(property: &str, v: &KdlValue) -> Result<Padding, UiError> {
    if v.as_integer().is_some() {
        return Ok(Padding::all(int(property, v)?));
    }
    let parts = string(property, v)?
        .split_whitespace()
        .map(|p| p.parse::<i32>().map_err(|e| invalid(property, e.to_string())))
        .collect::<Result<Vec<_>, _>>()?;
    match parts[..] {
        [a] => Ok(Padding::all(a)),
        [h, v] => Ok(Padding::symmetric(h, v)),
        [top, right, bottom, left] => Ok(Padding {
            top,
            right,
            bottom,
            left,
        }),
        _ => Err(invalid(property, "expected 1, 2 or 4 integers")),
    }
}

/// Space-separated cell sizes; `auto` is NaN.
fn cell_sizes(property: &str, v: &KdlValue) -> Result<Vec<f32>, UiError> {
    string(property, v)?
        .split_whitespace()
        .map(|p| {
            if p == "auto" {
                Ok(f32::NAN)
            } else {
                p.parse::<f32>().map_err(|e| invalid(property, e.to_string()))
            }
        })
        .collect()
}

fn dock_side(property: &str, s: &str) -> Result<Dock, UiError> {
    Ok(match s {
        "none" => Dock::None,
        "left" => Dock::Left,
        "right" => Dock::Right,
        "top" => Dock::Top,
        "bottom" => Dock::Bottom,
        "fill" => Dock::Fill,
        other => return Err(invalid(property, format!("unknown dock side `{other}`"))),
    })
}

/// Positional string argument `index`, if present.
fn arg<'a>(node: &'a KdlNode, index: usize) -> Result<Option<&'a str>, UiError> {
    node.entries()
        .iter()
        .filter(|e| e.name().is_none())
        .nth(index)
        .map(|e| string(node.name().value(), e.value()))
        .transpose()
}

fn args(node: &KdlNode) -> Result<Vec<&str>, UiError> {
    node.entries()
        .iter()
        .filter(|e| e.name().is_none())
        .map(|e| string(node.name().value(), e.value()))
        .collect()
}

fn misplaced(node: &KdlNode, reason: &str) -> UiError {
    UiError::Misplaced {
        element: node.name().value().to_string(),
        reason: reason.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Stock elements
// ---------------------------------------------------------------------------

fn build_panel(tree: &mut WidgetTree, parent: WidgetId, _: &KdlNode) -> Result<Built, UiError> {
    tree.add_panel(parent).map(Built::leaf)
}

fn build_label(tree: &mut WidgetTree, parent: WidgetId, node: &KdlNode) -> Result<Built, UiError> {
    let text = arg(node, 0)?.unwrap_or_default();
    tree.add_label(parent, text).map(Built::leaf)
}

fn build_button(tree: &mut WidgetTree, parent: WidgetId, node: &KdlNode) -> Result<Built, UiError> {
    let text = arg(node, 0)?.unwrap_or_default();
    tree.add_button(parent, text).map(Built::leaf)
}

fn build_check_box(tree: &mut WidgetTree, parent: WidgetId, _: &KdlNode) -> Result<Built, UiError> {
    tree.add_check_box(parent).map(Built::leaf)
}

fn build_stack(tree: &mut WidgetTree, parent: WidgetId, _: &KdlNode) -> Result<Built, UiError> {
    tree.add_stack(parent, false).map(Built::leaf)
}

fn build_grid(tree: &mut WidgetTree, parent: WidgetId, _: &KdlNode) -> Result<Built, UiError> {
    tree.add_grid(parent, 1).map(Built::leaf)
}

fn build_table(tree: &mut WidgetTree, parent: WidgetId, _: &KdlNode) -> Result<Built, UiError> {
    tree.add_table(parent).map(Built::leaf)
}

/// `row "cell 0" "cell 1"` inside a table or list box.
fn build_row(tree: &mut WidgetTree, parent: WidgetId, node: &KdlNode) -> Result<Built, UiError> {
    if tree.table_of(parent).is_err() {
        return Err(misplaced(node, "rows belong in a table or list box"));
    }
    let cells = args(node)?;
    let row = tree.add_row(parent)?;
    for (column, text) in cells.into_iter().enumerate() {
        if let Err(e) = tree.set_cell_text(row, column, text) {
            discard(tree, row);
            return Err(e);
        }
    }
    Ok(Built::leaf(row))
}

fn build_list_box(tree: &mut WidgetTree, parent: WidgetId, _: &KdlNode) -> Result<Built, UiError> {
    tree.add_list_box(parent).map(Built::leaf)
}

fn build_scroll(tree: &mut WidgetTree, parent: WidgetId, _: &KdlNode) -> Result<Built, UiError> {
    let id = tree.add_scroll_control(parent)?;
    let content = tree.scroll_content(id)?;
    Ok(Built { id, content })
}

fn build_splitter(tree: &mut WidgetTree, parent: WidgetId, _: &KdlNode) -> Result<Built, UiError> {
    tree.add_horizontal_splitter(parent).map(Built::leaf)
}

fn build_properties(tree: &mut WidgetTree, parent: WidgetId, _: &KdlNode) -> Result<Built, UiError> {
    tree.add_properties(parent).map(Built::leaf)
}

/// `property "Label" "value"` inside `properties`.
fn build_property(tree: &mut WidgetTree, parent: WidgetId, node: &KdlNode) -> Result<Built, UiError> {
    if tree.properties(parent).is_err() {
        return Err(misplaced(node, "properties belong in a property grid"));
    }
    let label = arg(node, 0)?.unwrap_or_default();
    let value = arg(node, 1)?.unwrap_or_default();
    tree.add_property(parent, label, value).map(Built::leaf)
}

fn build_tab_control(tree: &mut WidgetTree, parent: WidgetId, _: &KdlNode) -> Result<Built, UiError> {
    tree.add_tab_control(parent).map(Built::leaf)
}

/// `page "Title" { ... }` inside a tab control or a dock side. Properties
/// and children apply to the page panel.
fn build_page(tree: &mut WidgetTree, parent: WidgetId, node: &KdlNode) -> Result<Built, UiError> {
    if tree.tab_control(parent).is_err() {
        return Err(misplaced(node, "pages belong in a tab control or dock side"));
    }
    let title = arg(node, 0)?.unwrap_or_default();
    let button = tree.add_page(parent, title)?;
    tree.tab_page(button).map(Built::leaf)
}

fn build_dock(tree: &mut WidgetTree, parent: WidgetId, _: &KdlNode) -> Result<Built, UiError> {
    tree.add_dock(parent).map(Built::leaf)
}

/// `left { page ... }` and friends inside a dock: the child dock for that
/// edge (or the dock's own centre for `fill`), whose tab control takes the
/// pages.
fn build_dock_side(tree: &mut WidgetTree, parent: WidgetId, node: &KdlNode) -> Result<Built, UiError> {
    if tree.dock_base(parent).is_err() {
        return Err(misplaced(node, "dock sides belong in a dock"));
    }
    let side = dock_side("side", node.name().value())?;
    if side == Dock::Fill {
        let tabs = tree.fill_tab_control(parent)?;
        return Ok(Built::leaf(tabs));
    }
    let id = tree.child_dock(parent, side)?;
    let content = tree.fill_tab_control(id)?;
    Ok(Built { id, content })
}

// ---------------------------------------------------------------------------
// Stock properties
// ---------------------------------------------------------------------------

fn set_name(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    tree.set_name(id, string("name", v)?)
}

fn set_dock(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    tree.set_dock(id, dock_side("dock", string("dock", v)?)?)
}

fn set_margin(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    tree.set_margin(id, edges("margin", v)?)
}

fn set_padding(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    tree.set_padding(id, edges("padding", v)?)
}

fn set_width(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    tree.set_width(id, Some(int("width", v)?))
}

fn set_height(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    tree.set_height(id, Some(int("height", v)?))
}

fn current_min(tree: &WidgetTree, id: WidgetId) -> Result<Size, UiError> {
    tree.get(id).map(|n| n.min_size).ok_or(UiError::StaleWidget(id))
}

fn current_max(tree: &WidgetTree, id: WidgetId) -> Result<Size, UiError> {
    tree.get(id).map(|n| n.max_size).ok_or(UiError::StaleWidget(id))
}

fn set_min_width(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    let min = current_min(tree, id)?;
    tree.set_min_size(id, Size::new(int("min-width", v)?, min.height))
}

fn set_min_height(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    let min = current_min(tree, id)?;
    tree.set_min_size(id, Size::new(min.width, int("min-height", v)?))
}

/// On tables and list boxes this is the size-to-content fill width;
/// elsewhere the maximum layout width.
fn set_max_width(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    let width = int("max-width", v)?;
    if tree.table_of(id).is_ok() {
        return tree.size_to_content(id, width);
    }
    let max = current_max(tree, id)?;
    tree.set_max_size(id, Size::new(width, max.height))
}

fn set_max_height(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    let max = current_max(tree, id)?;
    tree.set_max_size(id, Size::new(max.width, int("max-height", v)?))
}

fn set_halign(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    let h = match string("halign", v)? {
        "left" => HAlign::Left,
        "center" => HAlign::Center,
        "right" => HAlign::Right,
        "stretch" => HAlign::Stretch,
        other => return Err(invalid("halign", format!("unknown alignment `{other}`"))),
    };
    tree.set_halign(id, h)
}

fn set_valign(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    let a = match string("valign", v)? {
        "top" => VAlign::Top,
        "center" => VAlign::Center,
        "bottom" => VAlign::Bottom,
        "stretch" => VAlign::Stretch,
        other => return Err(invalid("valign", format!("unknown alignment `{other}`"))),
    };
    tree.set_valign(id, a)
}

fn set_collapsed(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    tree.set_collapsed(id, boolean("collapsed", v)?)
}

fn set_hidden(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    tree.set_hidden(id, boolean("hidden", v)?)
}

fn set_disabled(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    tree.set_disabled(id, boolean("disabled", v)?)
}

fn set_x(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    let y = tree.get(id).map_or(0, |n| n.position.y);
    tree.set_position(id, Point::new(int("x", v)?, y))
}

fn set_y(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    let x = tree.get(id).map_or(0, |n| n.position.x);
    tree.set_position(id, Point::new(x, int("y", v)?))
}

fn set_text(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    tree.set_text(id, string("text", v)?)
}

fn set_horizontal(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    tree.set_stack_horizontal(id, boolean("horizontal", v)?)
}

fn set_column_count(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    let n = count("column-count", v)?;
    if tree.grid(id).is_ok() {
        tree.set_grid_column_count(id, n)
    } else {
        tree.set_column_count(id, n)
    }
}

/// Grid cell sizes, or fixed pixel widths for table columns.
fn set_column_widths(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    let widths = cell_sizes("column-widths", v)?;
    if tree.grid(id).is_ok() {
        return tree.set_grid_column_widths(id, &widths);
    }
    for (column, w) in widths.into_iter().enumerate() {
        if !w.is_finite() || w < 0.0 {
            return Err(invalid("column-widths", "table columns take pixel widths"));
        }
        tree.set_column_width(id, column, w as i32)?;
    }
    Ok(())
}

fn set_row_heights(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    tree.set_grid_row_heights(id, &cell_sizes("row-heights", v)?)
}

fn set_multi_select(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    tree.set_multi_select(id, boolean("multi-select", v)?)
}

/// List boxes: clicking a selected row unselects it. Buttons: stay pressed.
fn set_toggle(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    let on = boolean("toggle", v)?;
    if tree.list_box(id).is_ok() {
        return tree.set_list_toggle(id, on);
    }
    match tree.get_mut(id).map(|n| &mut n.widget) {
        Some(Widget::Button { toggle, .. }) => {
            *toggle = on.then(Toggle::default);
            Ok(())
        }
        Some(_) => Err(UiError::WrongKind {
            id,
            expected: "button or list box",
        }),
        None => Err(UiError::StaleWidget(id)),
    }
}

fn set_auto_size(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    tree.set_auto_size_to_content(id, boolean("auto-size", v)?)
}

/// One-shot size to content without a fill width.
fn set_size_to_content(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    if boolean("size-to-content", v)? {
        tree.size_to_content(id, 0)?;
    }
    Ok(())
}

fn set_value(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    tree.set_splitter_value(id, float("value", v)?)
}

fn set_label_width(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    tree.set_label_width(id, int("label-width", v)?)
}

fn set_alternate_color(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    tree.set_alternate_color(id, boolean("alternate-color", v)?)
}

fn set_checked(tree: &mut WidgetTree, id: WidgetId, v: &KdlValue) -> Result<(), UiError> {
    tree.set_checked(id, boolean("checked", v)?)
}

// ---------------------------------------------------------------------------
// Themes
// ---------------------------------------------------------------------------

pub fn parse_theme(text: &str) -> Result<Theme, ron::error::SpannedError> {
    ron::from_str(text)
}

/// Load a theme from a RON file. Logs a warning and returns the default
/// theme on failure.
pub fn load_theme(path: &str) -> Theme {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("failed to read {}: {}, using default theme", path, e);
            return Theme::default();
        }
    };
    match parse_theme(&content) {
        Ok(theme) => theme,
        Err(e) => {
            log::warn!("failed to parse RON {}: {}, using default theme", path, e);
            Theme::default()
        }
    }
}

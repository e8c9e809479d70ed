use serde::{Deserialize, Serialize};

use super::WidgetId;
use super::dock::{DockBase, Resizer, TabControl};
use super::layout::{GridLayout, StackLayout};
use super::scroll::{ScrollArea, ScrollBar, ScrollControl};
use super::splitter::{HorizontalSplitter, Properties};
use super::table::{ListBox, Table, TableRow};

/// Edge a child is anchored to inside its parent's generic dock layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dock {
    /// Not docked: sits at the node's `position`.
    #[default]
    None,
    Left,
    Right,
    Top,
    Bottom,
    /// Shares whatever space the docked siblings leave.
    Fill,
}

impl Dock {
    /// The edge facing this one (`Left` <-> `Right`, `Top` <-> `Bottom`).
    pub fn opposite(self) -> Dock {
        match self {
            Dock::Left => Dock::Right,
            Dock::Right => Dock::Left,
            Dock::Top => Dock::Bottom,
            Dock::Bottom => Dock::Top,
            other => other,
        }
    }

    pub fn is_horizontal_edge(self) -> bool {
        matches!(self, Dock::Left | Dock::Right)
    }

    pub fn is_vertical_edge(self) -> bool {
        matches!(self, Dock::Top | Dock::Bottom)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HAlign {
    Left,
    Center,
    Right,
    #[default]
    Stretch,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
    #[default]
    Stretch,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    #[default]
    Vertical,
}

/// On/off state shared by toggle buttons and check boxes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Toggle {
    pub on: bool,
}

impl Toggle {
    /// Flip the state and return the new value.
    pub fn flip(&mut self) -> bool {
        self.on = !self.on;
        self.on
    }
}

/// Flat enum widget identity.
/// Closed set: containers and composites carry their state as component
/// structs defined next to their layout code.
#[derive(Debug, Clone)]
pub enum Widget {
    /// Plain container using the generic dock layout.
    Panel,

    /// Single-line text. Measures to its text extent plus padding.
    Label { text: String },

    /// Clickable element with text. `toggle` is present for toggle buttons.
    Button {
        text: String,
        toggle: Option<Toggle>,
    },

    CheckBox { state: Toggle },

    /// Row or column of children.
    Stack(StackLayout),

    /// Children consumed row-major into columns.
    Grid(GridLayout),

    Table(Table),

    TableRow(TableRow),

    /// Scroll control hosting a single-column table with selection.
    ListBox(ListBox),

    ScrollControl(ScrollControl),

    /// Viewport inside a scroll control. Its only child is the content.
    ScrollArea(ScrollArea),

    ScrollBar(ScrollBar),

    /// Draggable separator owned by a splitter or a property grid.
    SplitterBar,

    /// Two sections stacked vertically with a movable bar between them.
    HorizontalSplitter(HorizontalSplitter),

    Properties(Properties),

    /// Label/value pair inside a `Properties` grid.
    PropertyRow {
        label: WidgetId,
        value: WidgetId,
    },

    Dock(DockBase),

    /// Edge handle that resizes the dock it belongs to.
    Resizer(Resizer),

    TabControl(TabControl),

    /// Strip button selecting one page of a tab control.
    TabButton { text: String, page: WidgetId },
}

impl Widget {
    /// Stable lowercase name for logs and layout snapshots.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Widget::Panel => "panel",
            Widget::Label { .. } => "label",
            Widget::Button { .. } => "button",
            Widget::CheckBox { .. } => "check-box",
            Widget::Stack(_) => "stack",
            Widget::Grid(_) => "grid",
            Widget::Table(_) => "table",
            Widget::TableRow(_) => "row",
            Widget::ListBox(_) => "list-box",
            Widget::ScrollControl(_) => "scroll",
            Widget::ScrollArea(_) => "scroll-area",
            Widget::ScrollBar(_) => "scroll-bar",
            Widget::SplitterBar => "splitter-bar",
            Widget::HorizontalSplitter(_) => "splitter",
            Widget::Properties(_) => "properties",
            Widget::PropertyRow { .. } => "property",
            Widget::Dock(_) => "dock",
            Widget::Resizer(_) => "resizer",
            Widget::TabControl(_) => "tab-control",
            Widget::TabButton { .. } => "tab-button",
        }
    }

    /// Text carried by text-bearing widgets.
    pub fn text(&self) -> Option<&str> {
        match self {
            Widget::Label { text }
            | Widget::Button { text, .. }
            | Widget::TabButton { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Widgets that take keyboard focus (Tab cycling).
    pub fn is_focusable(&self) -> bool {
        matches!(
            self,
            Widget::Button { .. } | Widget::CheckBox { .. } | Widget::ListBox(_) | Widget::TabButton { .. }
        )
    }
}

//! Views loaded from markup, driven through the canvas.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use dockyard::loading::{ViewLoader, load_theme};
use dockyard::ui::{
    Canvas, Dock, DrawList, Event, MouseButton, Point, Size, Theme, ThemedSkin, UiError,
};

#[test]
fn sample_view_loads_and_lays_out() {
    let mut canvas = Canvas::new(Size::new(800, 600));
    let root = canvas.root();
    let loader = ViewLoader::new();
    loader
        .load_file(&mut canvas.tree, root, "data/demo.kdl")
        .expect("load demo view");

    let mut skin = ThemedSkin::new(load_theme("data/theme.ron"));
    let mut list = DrawList::new();
    canvas.frame(Instant::now(), &mut skin, &mut list);
    assert!(!list.rects.is_empty());
    assert!(!list.texts.is_empty());

    let snap = canvas.snapshot();
    let main = snap.find("main").expect("main dock");
    assert_eq!(main.bounds.size(), Size::new(800, 600));
    let files = snap.find("files").expect("files list");
    assert!(files.bounds.width > 0 && files.bounds.height > 0);

    let split = canvas.tree.find_by_name(root, "split").expect("splitter");
    assert!((canvas.tree.splitter_value(split).expect("value") - 0.6).abs() < 1e-6);
    let log = canvas.tree.find_by_name(root, "log").expect("log table");
    assert_eq!(canvas.tree.row_count(log).expect("rows"), 2);
}

#[test]
fn sample_theme_overrides_some_fields() {
    let theme = load_theme("data/theme.ron");
    let default = Theme::default();
    assert_ne!(theme, default);
    assert_eq!(theme.line_height, 16);
    assert_eq!(theme.focus, default.focus);
}

#[test]
fn list_handlers_fire_from_mouse_clicks() {
    let mut canvas = Canvas::new(Size::new(200, 200));
    let root = canvas.root();
    let picked = Rc::new(RefCell::new(Vec::new()));
    let mut loader = ViewLoader::new();
    let sink = Rc::clone(&picked);
    loader.register_handler("pick", move |e| {
        if let Event::RowSelected { row, .. } = e {
            sink.borrow_mut().push(*row);
        }
    });
    loader
        .load_str(
            &mut canvas.tree,
            root,
            r#"list-box name="l" dock="fill" on-row-selected="pick" { row "a"; row "b"; row "c" }"#,
        )
        .expect("load");
    canvas.layout();

    let list = canvas.tree.find_by_name(root, "l").expect("list");
    let second = canvas.tree.row(list, 1).expect("row");
    let center = canvas.tree.canvas_bounds(second);
    let p = Point::new(center.x + 5, center.y + center.height / 2);

    let t0 = Instant::now();
    canvas.mouse_input(MouseButton::Left, true, p, t0).expect("press");
    canvas.mouse_input(MouseButton::Left, false, p, t0).expect("release");

    assert_eq!(*picked.borrow(), vec![second]);
    assert_eq!(canvas.tree.selected_row(list), Some(second));
}

#[test]
fn dragging_a_tab_to_a_dock_edge_docks_it_there() {
    let mut canvas = Canvas::new(Size::new(400, 300));
    let root = canvas.root();
    let loader = ViewLoader::new();
    loader
        .load_str(
            &mut canvas.tree,
            root,
            r#"dock name="main" dock="fill" { left { page "A"; page "B" } }"#,
        )
        .expect("load");
    canvas.layout();

    let main = canvas.tree.find_by_name(root, "main").expect("dock");
    let left = canvas.tree.dock_child(main, Dock::Left).expect("dock").expect("left");
    let left_tabs = canvas.tree.dock_tab_control(left).expect("dock").expect("tabs");
    let a = canvas.tree.tab_buttons(left_tabs).expect("buttons")[0];
    let grab = canvas.tree.canvas_bounds(a);
    let start = Point::new(grab.x + 2, grab.y + 2);

    let t0 = Instant::now();
    canvas.mouse_input(MouseButton::Left, true, start, t0).expect("press");
    canvas.cursor_moved(Point::new(start.x + 20, start.y)).expect("move");
    canvas.cursor_moved(Point::new(390, 150)).expect("move");
    canvas
        .mouse_input(MouseButton::Left, false, Point::new(390, 150), t0 + Duration::from_millis(200))
        .expect("release");

    let right = canvas.tree.dock_child(main, Dock::Right).expect("dock").expect("right dock");
    let right_tabs = canvas.tree.dock_tab_control(right).expect("dock").expect("tabs");
    assert_eq!(canvas.tree.tab_buttons(right_tabs).expect("buttons"), vec![a]);
    assert_eq!(canvas.tree.tab_count(left_tabs).expect("count"), 1);
    assert!(!canvas.input.is_dragging());
}

#[test]
fn failed_load_leaves_canvas_untouched() {
    let mut canvas = Canvas::new(Size::new(100, 100));
    let root = canvas.root();
    let before = canvas.tree.len();
    let loader = ViewLoader::new();

    let err = loader
        .load_str(
            &mut canvas.tree,
            root,
            r#"
            dock {
                left { page "ok" { label "fine" } }
                right { page "bad" { grid column-widths="0.7 0.7" } }
            }
            "#,
        )
        .expect_err("fractions over one");
    assert!(matches!(err, UiError::FractionsExceedOne { .. }));
    assert_eq!(canvas.tree.len(), before);

    assert!(matches!(
        loader.load_file(&mut canvas.tree, root, "data/missing.kdl"),
        Err(UiError::Io(_))
    ));
}

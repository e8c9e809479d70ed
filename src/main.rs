//! Lay out a KDL view headlessly and print the arranged tree.
//!
//! Usage: dockyard VIEW.kdl [--theme THEME.ron] [--size WxH]
//! Defaults: built-in theme, 800x600.

use std::process::ExitCode;
use std::time::Instant;

use dockyard::loading::{ViewLoader, load_theme};
use dockyard::ui::{Canvas, DrawList, Size, Theme, ThemedSkin};

struct Args {
    view: String,
    theme: Option<String>,
    size: Size,
}

fn parse_size(s: &str) -> Option<Size> {
    let (w, h) = s.split_once('x')?;
    Some(Size::new(w.parse().ok()?, h.parse().ok()?))
}

fn parse_args() -> Result<Args, String> {
    let mut args = std::env::args().skip(1);
    let mut view = None;
    let mut theme = None;
    let mut size = Size::new(800, 600);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--theme" => theme = Some(args.next().ok_or("--theme needs a file")?),
            "--size" => {
                let s = args.next().ok_or("--size needs WxH")?;
                size = parse_size(&s).ok_or_else(|| format!("bad size `{s}`, expected WxH"))?;
            }
            _ if view.is_none() => view = Some(arg),
            _ => return Err(format!("unexpected argument `{arg}`")),
        }
    }
    let view = view.ok_or("usage: dockyard VIEW.kdl [--theme THEME.ron] [--size WxH]")?;
    Ok(Args { view, theme, size })
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    let theme = args.theme.as_deref().map_or_else(Theme::default, load_theme);
    let mut canvas = Canvas::new(args.size);
    canvas.tree.set_metrics(Box::new(theme.metrics()));

    let loader = ViewLoader::new();
    let root = canvas.root();
    if let Err(e) = loader.load_file(&mut canvas.tree, root, &args.view) {
        log::error!("failed to load {}: {e}", args.view);
        return ExitCode::FAILURE;
    }

    let start = Instant::now();
    let mut skin = ThemedSkin::new(theme.clone());
    let mut list = DrawList::with_metrics(theme.metrics());
    canvas.frame(Instant::now(), &mut skin, &mut list);
    log::info!(
        "laid out {} widgets in {:.2}ms",
        canvas.tree.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    match canvas.snapshot().to_ron() {
        Ok(text) => println!("{text}"),
        Err(e) => {
            log::error!("failed to serialize layout: {e}");
            return ExitCode::FAILURE;
        }
    }
    println!(
        "// {} rects, {} texts, {} textures",
        list.rects.len(),
        list.texts.len(),
        list.textures.len()
    );
    ExitCode::SUCCESS
}

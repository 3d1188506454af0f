//! Top-level entry point for running the viewer as a native window.

use eframe::egui;

use crate::config::ViewerConfig;

use super::viewer_app::ViewerApp;

/// Open the viewer window and block until it is closed.
pub fn run_viewer(config: ViewerConfig) -> eframe::Result<()> {
    let title = config.title.clone();
    let [w, h] = config.window_size;
    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(egui::vec2(w, h))
        .with_drag_and_drop(true);
    if let Some(icon) = load_app_icon_svg() {
        viewport = viewport.with_icon(icon);
    }
    let opts = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    log::info!("starting viewer window ({w}x{h})");
    let app = ViewerApp::new(config);
    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            // Phosphor icon font for the panel and menu glyphs.
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}

/// Render the bundled `icon.svg` to an [`egui::IconData`].
fn load_app_icon_svg() -> Option<egui::IconData> {
    let data = include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/icon.svg"));
    let tree = usvg::Tree::from_data(data, &usvg::Options::default()).ok()?;
    let size = tree.size().to_int_size();
    if size.width() == 0 || size.height() == 0 {
        return None;
    }
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    Some(egui::IconData {
        rgba: pixmap.take(),
        width: size.width(),
        height: size.height(),
    })
}

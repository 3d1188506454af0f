use std::path::Path;

use cvviewer::data::export::*;
use cvviewer::data::figure::{Figure, FigureSeries};
use cvviewer::{ExportError, LineStyle};
use egui::Color32;

fn figure() -> Figure {
    Figure {
        title: "Pt, 50 mV/s".into(),
        x_label: "V vs Ref.",
        y_label: "I (A)",
        series: vec![
            FigureSeries {
                name: "A / Cycle 0".into(),
                points: vec![[-0.5, -1e-6], [0.0, 2e-6], [0.5, 1e-6]],
                color: Color32::from_rgb(0x63, 0x6E, 0xFA),
                style: LineStyle::Solid,
            },
            FigureSeries {
                name: "A, cathodic".into(),
                points: vec![[0.5, -2e-6], [-0.5, 0.0]],
                color: Color32::from_rgb(0xEF, 0x55, 0x3B),
                style: LineStyle::Dash,
            },
        ],
        show_markers: true,
        x_range: None,
        y_range: None,
    }
}

#[test]
fn format_follows_extension() {
    assert_eq!(ExportFormat::from_path(Path::new("a.png")).unwrap(), ExportFormat::Png);
    assert_eq!(ExportFormat::from_path(Path::new("a.JPG")).unwrap(), ExportFormat::Jpeg);
    assert_eq!(ExportFormat::from_path(Path::new("a.jpeg")).unwrap(), ExportFormat::Jpeg);
    assert_eq!(ExportFormat::from_path(Path::new("a.svg")).unwrap(), ExportFormat::Svg);
    assert_eq!(ExportFormat::from_path(Path::new("a.pdf")).unwrap(), ExportFormat::Pdf);
    assert!(matches!(
        ExportFormat::from_path(Path::new("a.bmp")),
        Err(ExportError::UnsupportedFormat(_))
    ));
}

#[test]
fn default_name_has_stem_and_extension() {
    let name = default_file_name("my plot", "png");
    assert!(name.starts_with("my_plot_"));
    assert!(name.ends_with(".png"));
}

#[test]
fn csv_has_header_and_one_row_per_point() {
    let mut buf = Vec::new();
    write_figure_csv(&mut buf, &figure()).unwrap();
    let s = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = s.trim_end().split('\n').collect();
    assert_eq!(lines[0], "trace,V vs Ref.,I (A)");
    assert_eq!(lines.len(), 1 + 3 + 2);
    assert!(lines[1].starts_with("A / Cycle 0,"));
    assert!(lines[4].starts_with("\"A, cathodic\","));
}

#[test]
fn svg_contains_title_and_legend() {
    let svg = figure_to_svg(&figure(), (800, 600)).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("A / Cycle 0"));
    assert!(svg.contains("V vs Ref."));
}

#[test]
fn empty_figure_is_not_exported() {
    let mut fig = figure();
    fig.series.clear();
    assert!(matches!(
        encode_figure(&fig, ExportFormat::Svg, (100, 100)),
        Err(ExportError::EmptyFigure)
    ));
}

#[test]
fn png_has_requested_size() {
    let bytes = encode_figure(&figure(), ExportFormat::Png, (320, 240)).unwrap();
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!((img.width(), img.height()), (320, 240));
}

#[test]
fn save_figure_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("figure.svg");
    assert_eq!(save_figure(&figure(), &path, (400, 300)).unwrap(), ExportFormat::Svg);
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("</svg>"));

    let csv = dir.path().join("figure.csv");
    save_figure_csv(&figure(), &csv).unwrap();
    assert!(std::fs::read_to_string(&csv).unwrap().starts_with("trace,"));
}

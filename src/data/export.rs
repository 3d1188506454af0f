//! Figure export: PNG, JPEG, SVG and PDF images, and CSV data.
//!
//! Every image format goes through one SVG drawn with plotters. SVG is written
//! as-is; PNG/JPEG are rasterized with resvg; PDF is converted with svg2pdf.

use std::io::{Cursor, Write};
use std::path::Path;

use plotters::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data::figure::Figure;
use crate::error::ExportError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
    Svg,
    Pdf,
}

impl ExportFormat {
    pub fn all() -> &'static [ExportFormat] {
        &[
            ExportFormat::Png,
            ExportFormat::Jpeg,
            ExportFormat::Svg,
            ExportFormat::Pdf,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG",
            ExportFormat::Jpeg => "JPEG",
            ExportFormat::Svg => "SVG",
            ExportFormat::Pdf => "PDF",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Svg => "svg",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Format implied by the extension of `path`.
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(ExportFormat::Png),
            "jpg" | "jpeg" => Ok(ExportFormat::Jpeg),
            "svg" => Ok(ExportFormat::Svg),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(ExportError::UnsupportedFormat(ext)),
        }
    }
}

/// `"{stem}_{timestamp}.{ext}"` suggestion for save dialogs.
pub fn default_file_name(stem: &str, extension: &str) -> String {
    format!(
        "{}_{}.{}",
        stem.replace(['/', '\\', ' '], "_"),
        chrono::Local::now().format("%Y%m%d-%H%M%S"),
        extension
    )
}

fn draw_err<E: std::fmt::Display>(e: E) -> ExportError {
    ExportError::Draw(e.to_string())
}

/// Draw `figure` as an SVG document of `size` pixels.
pub fn figure_to_svg(figure: &Figure, size: (u32, u32)) -> Result<String, ExportError> {
    if figure.is_empty() {
        return Err(ExportError::EmptyFigure);
    }
    let (x_range, y_range) = figure.view_bounds().ok_or(ExportError::EmptyFigure)?;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(&figure.title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(110)
            .build_cartesian_2d(x_range.min..x_range.max, y_range.min..y_range.max)
            .map_err(draw_err)?;
        chart
            .configure_mesh()
            .x_desc(figure.x_label)
            .y_desc(figure.y_label)
            .light_line_style(RGBColor(0xDD, 0xDD, 0xDD).stroke_width(1))
            .y_label_formatter(&|v| format!("{v:.2e}"))
            .draw()
            .map_err(draw_err)?;

        for series in &figure.series {
            let color = RGBColor(series.color.r(), series.color.g(), series.color.b());
            let style = color.stroke_width(2);
            let points: Vec<(f64, f64)> = series
                .points
                .iter()
                .filter(|p| p[0].is_finite() && p[1].is_finite())
                .map(|p| (p[0], p[1]))
                .collect();
            let anno = match series.style.dash_pattern() {
                None => chart.draw_series(LineSeries::new(points.clone(), style)),
                Some((dash, gap)) => {
                    chart.draw_series(DashedLineSeries::new(points.clone(), dash, gap, style))
                }
            }
            .map_err(draw_err)?;
            anno.label(series.name.clone())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
            if figure.show_markers {
                chart
                    .draw_series(points.iter().map(|p| Circle::new(*p, 3, color.filled())))
                    .map_err(draw_err)?;
            }
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(draw_err)?;
        root.present().map_err(draw_err)?;
    }
    Ok(svg)
}

fn svg_tree(svg: &str) -> Result<usvg::Tree, ExportError> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    Ok(usvg::Tree::from_str(svg, &opt)?)
}

/// Rasterize an SVG document onto a white background.
pub fn rasterize_svg(svg: &str) -> Result<image::RgbaImage, ExportError> {
    let tree = svg_tree(svg)?;
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| ExportError::Draw("zero-sized canvas".to_string()))?;
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    image::RgbaImage::from_raw(size.width(), size.height(), pixmap.take())
        .ok_or_else(|| ExportError::Draw("pixel buffer does not match canvas size".to_string()))
}

/// Encode `figure` in `format`.
pub fn encode_figure(figure: &Figure, format: ExportFormat, size: (u32, u32)) -> Result<Vec<u8>, ExportError> {
    let svg = figure_to_svg(figure, size)?;
    match format {
        ExportFormat::Svg => Ok(svg.into_bytes()),
        ExportFormat::Png => {
            let mut buf = Vec::new();
            rasterize_svg(&svg)?.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)?;
            Ok(buf)
        }
        ExportFormat::Jpeg => {
            let rgb = image::DynamicImage::ImageRgba8(rasterize_svg(&svg)?).to_rgb8();
            let mut buf = Vec::new();
            rgb.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Jpeg)?;
            Ok(buf)
        }
        ExportFormat::Pdf => {
            let tree = svg_tree(&svg)?;
            svg2pdf::to_pdf(
                &tree,
                svg2pdf::ConversionOptions::default(),
                svg2pdf::PageOptions::default(),
            )
            .map_err(|e| ExportError::Pdf(format!("{e:?}")))
        }
    }
}

/// Save `figure` to `path`, choosing the format from the extension.
pub fn save_figure(figure: &Figure, path: &Path, size: (u32, u32)) -> Result<ExportFormat, ExportError> {
    let format = ExportFormat::from_path(path)?;
    let bytes = encode_figure(figure, format, size)?;
    std::fs::write(path, bytes)?;
    log::info!("exported `{}` as {} to {:?}", figure.title, format.label(), path);
    Ok(format)
}

/// Write the plotted (transformed) points as long-format CSV.
pub fn write_figure_csv<W: Write>(w: &mut W, figure: &Figure) -> std::io::Result<()> {
    writeln!(w, "trace,{},{}", figure.x_label, figure.y_label)?;
    for series in &figure.series {
        let name = csv_field(&series.name);
        for p in &series.points {
            writeln!(w, "{},{:.9e},{:.9e}", name, p[0], p[1])?;
        }
    }
    Ok(())
}

pub fn save_figure_csv(figure: &Figure, path: &Path) -> Result<(), ExportError> {
    let mut f = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_figure_csv(&mut f, figure)?;
    f.flush()?;
    log::info!("exported `{}` data to {:?}", figure.title, path);
    Ok(())
}

fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

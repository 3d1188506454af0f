use cvviewer::data::dta::{CvData, Cycle};
use cvviewer::data::plot::AxisRange;
use cvviewer::{render, Experiment, Palette, PlotSettings, Session};

fn session() -> Session {
    let data = CvData {
        header: Default::default(),
        cycles: vec![
            Cycle::Data {
                voltage: vec![0.0, 1.0],
                current: vec![-4.0e-3, 4.0e-3],
            },
            Cycle::Data {
                voltage: vec![0.5, 1.5],
                current: vec![0.0, 2.0e-3],
            },
        ],
    };
    let mut s = Session::new(Palette::Plotly, true);
    s.add_experiment("A", Experiment::new(data, 4.0, 0.5, "a.dta").unwrap())
        .unwrap();
    s.create_plot("P").unwrap();
    s
}

#[test]
fn figure_mirrors_plot_traces() {
    let s = session();
    let fig = render(&s, "P").unwrap();
    assert_eq!(fig.title, "P");
    assert_eq!(fig.x_label, "V vs Ref.");
    assert_eq!(fig.y_label, "I (A)");
    assert_eq!(fig.series.len(), 2);
    assert_eq!(fig.series[1].name, "A / Cycle 1");
    assert_eq!(fig.series[1].color, Palette::Plotly.color(1));
    assert_eq!(fig.series[0].points, vec![[0.0, -4.0e-3], [1.0, 4.0e-3]]);
    assert!(fig.x_range.is_none());
    assert!(render(&s, "missing").is_none());
}

#[test]
fn transforms_do_not_touch_stored_traces() {
    let mut s = session();
    let settings = PlotSettings {
        normalize_by_area: true,
        shift_by_reference: true,
        ..PlotSettings::default()
    };
    s.update_settings("P", settings).unwrap();
    let fig = render(&s, "P").unwrap();
    assert_eq!(fig.series[0].points, vec![[-0.5, -1.0e-3], [0.5, 1.0e-3]]);
    assert_eq!(fig.y_label, "I (A/cm²)");
    assert_eq!(s.plots.get("P").unwrap().traces[0].voltage, vec![0.0, 1.0]);
}

#[test]
fn custom_range_overrides_fitted_bounds() {
    let mut s = session();
    let fitted = render(&s, "P").unwrap().view_bounds().unwrap();
    assert!(fitted.0.min < 0.0 && fitted.0.max > 1.5);

    let settings = PlotSettings {
        custom_range: true,
        x_range: AxisRange::new(-1.0, 2.0),
        y_range_ma: AxisRange::new(-5.0, 5.0),
        ..PlotSettings::default()
    };
    s.update_settings("P", settings).unwrap();
    let fig = render(&s, "P").unwrap();
    let (x, y) = fig.view_bounds().unwrap();
    assert_eq!((x.min, x.max), (-1.0, 2.0));
    assert!((y.min + 5.0e-3).abs() < 1e-15 && (y.max - 5.0e-3).abs() < 1e-15);
}

#[test]
fn empty_plot_has_no_bounds() {
    let mut s = session();
    s.clear_plot("P").unwrap();
    let fig = render(&s, "P").unwrap();
    assert!(fig.is_empty());
    assert!(fig.view_bounds().is_none());
}

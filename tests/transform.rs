use cvviewer::data::dta::{CvData, Cycle};
use cvviewer::data::plot::AxisRange;
use cvviewer::data::trace::TraceSource;
use cvviewer::data::transform::*;
use cvviewer::{Experiment, PlotSettings, Trace};
use egui::Color32;

fn exp(area: f64, vref: f64) -> Experiment {
    let data = CvData {
        header: Default::default(),
        cycles: vec![Cycle::Data {
            voltage: vec![0.0, 0.5],
            current: vec![2.0, 4.0],
        }],
    };
    Experiment::new(data, area, vref, "x.dta").unwrap()
}

#[test]
fn shift_subtracts_reference() {
    assert_eq!(shift(&[0.5, 1.0], 0.25), vec![0.25, 0.75]);
    assert_eq!(shift(&[0.5, 1.0], 0.0), vec![0.5, 1.0]);
}

#[test]
fn shifting_back_restores_potentials() {
    let v = [-0.25, 0.0, 0.75];
    let there = shift(&v, 0.5);
    let back = shift(&there, -0.5);
    for (a, b) in back.iter().zip(v.iter()) {
        assert!((a - b).abs() < 1e-12);
    }
}

#[test]
fn normalize_divides_by_area() {
    assert_eq!(normalize(&[2.0, 4.0], 2.0), vec![1.0, 2.0]);
    assert_eq!(normalize(&[2.0, 4.0], 1.0), vec![2.0, 4.0]);
}

#[test]
fn trace_points_follow_settings() {
    let e = exp(2.0, 0.25);
    let t = Trace::new(TraceSource::new("A", 0), &[0.0, 0.5], &[2.0, 4.0], Color32::RED);

    let raw = transform_trace(&t, &e, &PlotSettings::default());
    assert_eq!(raw, vec![[0.0, 2.0], [0.5, 4.0]]);

    let settings = PlotSettings {
        normalize_by_area: true,
        shift_by_reference: true,
        ..PlotSettings::default()
    };
    let pts = transform_trace(&t, &e, &settings);
    assert_eq!(pts, vec![[-0.25, 1.0], [0.25, 2.0]]);
    assert_eq!(x_axis_label(&settings), "V vs S.H.E.");
    assert_eq!(y_axis_label(&settings), "I (A/cm²)");
    assert_eq!(x_axis_label(&PlotSettings::default()), "V vs Ref.");
    assert_eq!(y_axis_label(&PlotSettings::default()), "I (A)");
}

#[test]
fn custom_current_range_is_in_milliamps() {
    let settings = PlotSettings {
        y_range_ma: AxisRange::new(-2.0, 3.0),
        ..PlotSettings::default()
    };
    let y = settings.y_range();
    assert!((y.min + 0.002).abs() < 1e-15);
    assert!((y.max - 0.003).abs() < 1e-15);
}

#[test]
fn bounds_ignore_non_finite_points() {
    let a = [[0.0, 1.0], [f64::NAN, 5.0], [2.0, -1.0]];
    let (x, y) = data_bounds([a.as_slice()]).unwrap();
    assert_eq!((x.min, x.max), (0.0, 2.0));
    assert_eq!((y.min, y.max), (-1.0, 1.0));
    assert!(data_bounds(std::iter::empty::<&[[f64; 2]]>()).is_none());
}

#[test]
fn padding_widens_degenerate_ranges() {
    let r = pad_range(AxisRange::new(1.0, 1.0), 0.05);
    assert!(r.min < 1.0 && r.max > 1.0);
    let r = pad_range(AxisRange::new(0.0, 10.0), 0.1);
    assert_eq!((r.min, r.max), (-1.0, 11.0));
}

#[test]
fn normalizing_then_scaling_by_area_restores_currents() {
    let series: [&[f64]; 4] = [
        &[1.5e-6, -2.25e-7, 3.0e-9, 0.0],
        &[1e-3, -1e-3, 4.2e-4],
        &[-7.77e-12, 9.1e-10],
        &[123.456, -0.001, 1e6],
    ];
    for area in [0.196, 1.0, 2.5, 1e-6, 7.3] {
        for current in series {
            let back: Vec<f64> = normalize(current, area).iter().map(|j| j * area).collect();
            for (b, i) in back.iter().zip(current) {
                assert!(
                    (b - i).abs() <= 1e-12 * i.abs(),
                    "area {area}: {b} != {i}"
                );
            }
        }
    }
}

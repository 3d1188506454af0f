use cvviewer::data::dta::{CvData, Cycle, DtaHeader};
use cvviewer::persistence::*;
use cvviewer::{
    Experiment, LineStyle, Palette, PlotSettings, Session, SessionError, TraceEdit, ValidationError,
};
use egui::Color32;

fn experiment() -> Experiment {
    let data = CvData {
        header: DtaHeader {
            title: Some("CV".into()),
            scan_rate: Some(50.0),
            ..Default::default()
        },
        cycles: vec![
            Cycle::Data {
                voltage: vec![-0.1, 0.2, 0.30000000000000004],
                current: vec![1.5e-6, -2.25e-7, 3.0e-9],
            },
            Cycle::Empty,
            Cycle::Data {
                voltage: vec![0.0, 0.1],
                current: vec![0.0, 1e-3],
            },
        ],
    };
    Experiment::new(data, 0.196, 0.241, "pt_disk.DTA").unwrap()
}

fn sample_session() -> Session {
    let mut s = Session::new(Palette::Plotly, false);
    s.add_experiment("Pt", experiment()).unwrap();
    s.create_plot("overview").unwrap();
    s.select_cycles("overview", "Pt", &[1, 0]).unwrap();
    s.edit_trace(
        "overview",
        0,
        TraceEdit {
            label: "second".into(),
            color: Color32::from_rgb(10, 20, 30),
            style: LineStyle::LongDashDot,
        },
    )
    .unwrap();
    let mut settings = PlotSettings {
        normalize_by_area: true,
        custom_range: true,
        ..PlotSettings::default()
    };
    settings.y_range_ma.max = 2.5;
    s.update_settings("overview", settings).unwrap();
    s.create_plot("empty").unwrap();
    s
}

#[test]
fn save_then_load_restores_the_session() {
    let s = sample_session();
    let json = session_to_json(&s).unwrap();
    let contents = session_from_json(&json).unwrap();
    assert_eq!(contents, s.contents());
    assert_eq!(contents.plots.names(), &["overview".to_string(), "empty".to_string()]);
}

#[test]
fn file_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("my_analysis.json");
    let s = sample_session();
    save_session_to_path(&s, &path).unwrap();
    let contents = load_session_from_path(&path).unwrap();
    let mut restored = Session::default();
    restored.replace(contents);
    assert_eq!(restored.contents(), s.contents());
}

#[test]
fn document_carries_format_and_version() {
    let json = session_to_json(&sample_session()).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["format"], SESSION_FORMAT);
    assert_eq!(v["version"], SESSION_VERSION);
    assert_eq!(v["plots"][0]["traces"][0]["style"], "longdashdot");
    assert_eq!(v["plots"][0]["traces"][0]["color"], "#0a141e");
    assert!(v["experiments"][0]["cycles"][1].is_null());
}

#[test]
fn other_versions_are_rejected() {
    let json = session_to_json(&sample_session()).unwrap();
    let mut v: serde_json::Value = serde_json::from_str(&json).unwrap();
    v["version"] = serde_json::json!(SESSION_VERSION + 1);
    let err = session_from_json(&v.to_string()).unwrap_err();
    assert!(matches!(err, SessionError::UnsupportedVersion { found, .. } if found == SESSION_VERSION + 1));
}

#[test]
fn foreign_documents_are_rejected() {
    let err = session_from_json(r#"{"format":"something-else","version":1}"#).unwrap_err();
    assert!(matches!(err, SessionError::WrongFormat(f) if f == "something-else"));
    assert!(matches!(session_from_json("not json"), Err(SessionError::Json(_))));
}

#[test]
fn documents_breaking_invariants_are_rejected() {
    let json = session_to_json(&sample_session()).unwrap();

    let mut v: serde_json::Value = serde_json::from_str(&json).unwrap();
    v["plots"][0]["traces"][1]["name"] = serde_json::json!("second");
    let err = session_from_json(&v.to_string()).unwrap_err();
    assert!(matches!(err, SessionError::Invalid(ValidationError::DuplicateLabel(_))));

    let mut v: serde_json::Value = serde_json::from_str(&json).unwrap();
    v["plots"][0]["traces"][0]["experiment"] = serde_json::json!("missing");
    let err = session_from_json(&v.to_string()).unwrap_err();
    assert!(matches!(err, SessionError::Invalid(ValidationError::UnknownExperiment(_))));

    let mut v: serde_json::Value = serde_json::from_str(&json).unwrap();
    v["experiments"][0]["area"] = serde_json::json!(0.0);
    let err = session_from_json(&v.to_string()).unwrap_err();
    assert!(matches!(err, SessionError::Invalid(ValidationError::InvalidArea(_))));

    let mut v: serde_json::Value = serde_json::from_str(&json).unwrap();
    v["plots"][1]["name"] = serde_json::json!("overview");
    let err = session_from_json(&v.to_string()).unwrap_err();
    assert!(matches!(err, SessionError::Invalid(ValidationError::DuplicatePlot(_))));

    let mut v: serde_json::Value = serde_json::from_str(&json).unwrap();
    v["plots"][0]["traces"][0]["cycle"] = serde_json::json!(0);
    let err = session_from_json(&v.to_string()).unwrap_err();
    assert!(matches!(err, SessionError::Invalid(ValidationError::DuplicateCycle { .. })));
}

#[test]
fn renamed_trace_and_later_selection_still_reload() {
    let mut s = sample_session();
    // give cycle 0 the label cycle 1 gets by default, then bring cycle 1 back
    let mut edit = TraceEdit::from_trace(&s.plots.get("overview").unwrap().traces[1]);
    edit.label = "Pt / Cycle 1".into();
    s.edit_trace("overview", 1, edit).unwrap();
    s.select_cycles("overview", "Pt", &[0]).unwrap();
    s.select_cycles("overview", "Pt", &[0, 1]).unwrap();
    assert_eq!(
        s.plots.get("overview").unwrap().labels(),
        vec!["Pt / Cycle 1", "Pt / Cycle 1 (2)"]
    );

    let contents = session_from_json(&session_to_json(&s).unwrap()).unwrap();
    assert_eq!(contents, s.contents());
}

#[test]
fn translucent_edit_reloads_unchanged() {
    let mut s = sample_session();
    let mut edit = TraceEdit::from_trace(&s.plots.get("overview").unwrap().traces[0]);
    edit.color = Color32::from_rgba_unmultiplied(10, 20, 30, 100);
    s.edit_trace("overview", 0, edit).unwrap();

    let contents = session_from_json(&session_to_json(&s).unwrap()).unwrap();
    assert_eq!(contents, s.contents());
}

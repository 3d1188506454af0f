use cvviewer::data::dta::{parse_bytes, parse_path, parse_str, Cycle};
use cvviewer::{DtaError, Experiment, ValidationError, ViewerError};

fn curve(n: usize, points: &[(f64, f64)]) -> String {
    let mut s = format!("CURVE{n}\tTABLE\t{}\n", points.len());
    s.push_str("\tPt\tT\tVf\tIm\tVu\tSig\tAch\tIERange\tOver\n");
    s.push_str("\t#\ts\tV vs. Ref.\tA\tV\tV\tV\t#\tbits\n");
    for (i, (v, a)) in points.iter().enumerate() {
        s.push_str(&format!("\t{i}\t{}\t{v:e}\t{a:e}\t0\t{v}\t0\t10\t...........\n", i as f64 * 0.01));
    }
    s
}

fn file(curves: &[String]) -> String {
    let mut s = String::from("EXPLAIN\nTAG\tCV\nTITLE\tLABEL\tCyclic Voltammetry\tTest &Identifier\n");
    s.push_str("DATE\tLABEL\t3/3/2022\tDate\nTIME\tLABEL\t10:15:00\tTime\n");
    s.push_str("SCANRATE\tQUANT\t50\tScan Rate (mV/s)\nCYCLES\tIQUANT\t3\tCycles (#)\n");
    for c in curves {
        s.push_str(c);
    }
    s
}

#[test]
fn parses_every_curve_in_order() {
    let text = file(&[
        curve(1, &[(-0.5, 1e-6), (0.0, 2e-6), (0.5, 3e-6)]),
        curve(2, &[(0.5, -1e-6), (-0.5, -2e-6)]),
        curve(3, &[(0.1, 0.0)]),
    ]);
    let data = parse_str(&text).unwrap();
    assert_eq!(data.header.date.as_deref(), Some("3/3/2022"));
    assert_eq!(data.header.time.as_deref(), Some("10:15:00"));
    assert_eq!(data.header.scan_rate, Some(50.0));
    assert_eq!(data.header.declared_cycles, Some(3));
    assert_eq!(data.cycles.len(), 3);
    assert_eq!(data.cycles[2], Cycle::Empty);
    assert_eq!(data.valid_cycle_count(), 2);
    let (v, i) = data.valid_cycle(1).unwrap();
    assert_eq!(v, &[0.5, -0.5]);
    assert_eq!(i, &[-1e-6, -2e-6]);
}

#[test]
fn crlf_and_latin1_bytes_are_tolerated() {
    let text = file(&[curve(1, &[(0.0, 0.0), (0.1, 1e-6)])]).replace('\n', "\r\n");
    // 0xB5 is the micro sign in Windows-1252
    let mut bytes = b"NOTES\tTOOL\t\xB5A range\n".to_vec();
    bytes.extend_from_slice(text.as_bytes());
    let data = parse_bytes(&bytes).unwrap();
    assert_eq!(data.valid_cycle_count(), 1);
}

#[test]
fn file_without_curves_is_an_error() {
    assert!(matches!(parse_str(&file(&[])), Err(DtaError::NoCurves)));
}

#[test]
fn missing_current_column_is_reported() {
    let text = "CURVE1\tTABLE\n\tPt\tT\tVf\n\t#\ts\tV\n\t0\t0\t0.1\n";
    assert!(matches!(
        parse_str(text),
        Err(DtaError::MissingColumn { curve: 0, column: "Im" })
    ));
}

#[test]
fn garbage_number_is_reported_with_line() {
    let text = "CURVE1\tTABLE\n\tPt\tVf\tIm\n\t#\tV\tA\n\t0\t0.1\t1e-6\n\t1\tabc\t1e-6\n";
    match parse_str(text) {
        Err(DtaError::BadNumber { line, value, .. }) => {
            assert_eq!(line, 5);
            assert_eq!(value, "abc");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn non_finite_values_are_rejected() {
    for bad in ["NaN", "inf", "-Infinity"] {
        let text = format!("CURVE1\tTABLE\n\tPt\tVf\tIm\n\t#\tV\tA\n\t0\t0.1\t1e-6\n\t1\t0.2\t{bad}\n");
        match parse_str(&text) {
            Err(DtaError::BadNumber { line, value, .. }) => {
                assert_eq!(line, 5);
                assert_eq!(value, bad);
            }
            other => panic!("`{bad}` accepted: {other:?}"),
        }
    }
}

#[test]
fn experiment_from_file_rejects_bad_area() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.DTA");
    std::fs::write(&path, file(&[curve(1, &[(0.0, 0.0), (0.1, 1e-6)])])).unwrap();

    let exp = Experiment::from_file(&path, 0.5, 0.2).unwrap();
    assert_eq!(exp.filename, "run.DTA");
    assert_eq!(exp.area(), 0.5);
    assert_eq!(parse_path(&path).unwrap(), exp.data);

    let err = Experiment::from_file(&path, 0.0, 0.2).unwrap_err();
    assert!(matches!(err, ViewerError::Validation(ValidationError::InvalidArea(_))));
    let err = Experiment::from_file(&dir.path().join("nope.DTA"), 1.0, 0.0).unwrap_err();
    assert!(matches!(err, ViewerError::Dta(DtaError::Io(_))));
}

use cvviewer::data::colors::{color_index, trace_color};
use cvviewer::data::dta::{CvData, Cycle};
use cvviewer::{Experiment, ExperimentRegistry, Palette};

fn experiment(valid: usize, empty: usize) -> Experiment {
    let mut cycles: Vec<Cycle> = (0..valid)
        .map(|_| Cycle::Data {
            voltage: vec![0.0, 1.0],
            current: vec![0.0, 1.0],
        })
        .collect();
    cycles.extend((0..empty).map(|_| Cycle::Empty));
    let data = CvData {
        header: Default::default(),
        cycles,
    };
    Experiment::new(data, 1.0, 0.0, "x.dta").unwrap()
}

#[test]
fn index_counts_valid_cycles_of_earlier_experiments() {
    let mut reg = ExperimentRegistry::new();
    reg.insert("A", experiment(2, 1)).unwrap();
    reg.insert("B", experiment(3, 0)).unwrap();
    assert_eq!(color_index(&reg, "A", 1), Some(1));
    assert_eq!(color_index(&reg, "B", 1), Some(3));
    assert_eq!(
        trace_color(&reg, Palette::Plotly, "B", 1),
        Some(Palette::Plotly.colors()[3])
    );
    assert_eq!(color_index(&reg, "C", 0), None);
}

#[test]
fn palette_wraps_around() {
    let mut reg = ExperimentRegistry::new();
    reg.insert("A", experiment(9, 0)).unwrap();
    reg.insert("B", experiment(4, 0)).unwrap();
    let n = Palette::Category10.colors().len();
    assert_eq!(
        trace_color(&reg, Palette::Category10, "B", 2),
        Some(Palette::Category10.colors()[(9 + 2) % n])
    );
}

#[test]
fn same_inputs_give_same_color() {
    let mut reg = ExperimentRegistry::new();
    reg.insert("A", experiment(2, 0)).unwrap();
    let a = trace_color(&reg, Palette::Plotly, "A", 1);
    let b = trace_color(&reg, Palette::Plotly, "A", 1);
    assert_eq!(a, b);
}

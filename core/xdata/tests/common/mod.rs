//! FILENAME: tests/common/mod.rs
//! Fixtures shared by the xdata integration tests.

#![allow(dead_code)]

use ndarray::{ArrayD, Dimension, IxDyn};
use xdata::{CategoricalHeader, Header, MeasureHeader, Row, Value, Xdata};

/// The four-fruit table used throughout the scenarios.
pub fn fruit_rows() -> Vec<Row> {
    vec![
        vec!["apple".into(), 0.5.into(), "red".into()],
        vec!["pear".into(), 0.75.into(), "green".into()],
        vec!["banana".into(), 0.66.into(), "yellow".into()],
        vec!["cherry".into(), 0.89.into(), "red".into()],
    ]
}

pub fn fruits_header() -> CategoricalHeader {
    CategoricalHeader::new("fruits", ["fruits", "prices", "colors"], Some(4), fruit_rows())
        .expect("fruit header")
}

pub fn fruit_row(name: &str, price: f64, color: &str) -> Row {
    vec![name.into(), price.into(), color.into()]
}

/// Header of the measure axis `x`: 1.0, 1.5, ... in mm.
pub fn x_header(n_elem: usize) -> MeasureHeader {
    MeasureHeader::new("x", 1.0, n_elem, 0.5, Some("mm".into())).expect("x header")
}

/// Deterministic content: the value at (i, j, k) is `100 i + 10 j + k`.
pub fn cube(shape: &[usize]) -> ArrayD<f64> {
    ArrayD::from_shape_fn(IxDyn(shape), |ix| {
        ix.slice()
            .iter()
            .fold(0.0, |acc, &i| acc * 10.0 + i as f64)
    })
}

pub fn filled(shape: &[usize], value: f64) -> ArrayD<f64> {
    ArrayD::from_elem(IxDyn(shape), value)
}

/// A (5, 3, 4) container: five undifferentiated trials, three colors with a
/// weight column, and a measure axis of 4 samples.
pub fn sample_xdata() -> Xdata {
    let trials: Header = CategoricalHeader::undifferentiated("trial", 5).into();
    let colors: Header = CategoricalHeader::new(
        "colors",
        ["colors", "weight"],
        None,
        vec![
            vec!["red".into(), 1.0.into()],
            vec!["green".into(), 2.0.into()],
            vec!["blue".into(), 3.0.into()],
        ],
    )
    .expect("color header")
    .into();
    let x: Header = x_header(4).into();
    Xdata::new("intensity", cube(&[5, 3, 4]), vec![trials, colors, x], Some("mV".into()))
        .expect("sample xdata")
}

pub fn categorical(header: &Header) -> &CategoricalHeader {
    match header {
        Header::Categorical(h) => h,
        Header::Measure(h) => panic!("'{}' is a measure header", h.label()),
    }
}

pub fn measure(header: &Header) -> &MeasureHeader {
    match header {
        Header::Measure(h) => h,
        Header::Categorical(h) => panic!("'{}' is a categorical header", h.label()),
    }
}

pub fn text(value: &str) -> Value {
    Value::from(value)
}

//! FILENAME: tests/test_headers.rs
//! Integration tests for categorical and measure headers.

mod common;

use common::{fruit_row, fruits_header, text, x_header};
use xdata::{
    CategoricalHeader, DimensionDescriptor, Header, RowUpdate, UnitSpec, UpdateFlag, Value,
    ValueType, XdataError,
};

// ============================================================================
// CATEGORICAL SCENARIOS
// ============================================================================

#[test]
fn test_fruit_table_accessors() {
    let fruits = fruits_header();
    assert_eq!(fruits.get_n_columns(), 3);
    assert_eq!(fruits.n_elem(), 4);
    assert_eq!(fruits.get_value(2, 1).unwrap(), Value::Number(0.66));

    let header: Header = fruits.into();
    assert_eq!(
        header.get_item_names(&[0, 1, 3, 2]).unwrap(),
        vec![text("apple"), text("pear"), text("cherry"), text("banana")]
    );
}

#[test]
fn test_remove_banana() {
    let fruits = fruits_header();
    let without = fruits.update(RowUpdate::Remove(vec![2])).unwrap();

    assert_eq!(without.n_elem(), 3);
    let names: Vec<Value> = (0..3).map(|i| without.get_value(i, 0).unwrap()).collect();
    assert_eq!(names, vec![text("apple"), text("pear"), text("cherry")]);
    assert_eq!(without.column_descriptors(), fruits.column_descriptors());
}

#[test]
fn test_new_rows_append() {
    let fruits = fruits_header();
    let more = fruits
        .update(RowUpdate::New(vec![fruit_row("kiwi", 0.3, "green")]))
        .unwrap();
    assert_eq!(more.n_elem(), 5);
    assert_eq!(more.get_value(4, 0).unwrap(), text("kiwi"));

    let old: Header = fruits.into();
    let new: Header = more.into();
    assert!(old.check_header_update(UpdateFlag::New, &[vec![4]], &new).is_ok());
}

#[test]
fn test_chg_new_composite() {
    let fruits = fruits_header();
    let updated = fruits
        .update(RowUpdate::ChgNew {
            indices: vec![0],
            rows: vec![fruit_row("green apple", 0.55, "green")],
            added: vec![fruit_row("plum", 1.2, "purple"), fruit_row("fig", 2.0, "purple")],
        })
        .unwrap();
    assert_eq!(updated.n_elem(), 6);
    assert_eq!(updated.get_value(0, 0).unwrap(), text("green apple"));
    assert_eq!(updated.get_value(5, 0).unwrap(), text("fig"));

    let old: Header = fruits.into();
    let new: Header = updated.into();
    assert!(old
        .check_header_update(UpdateFlag::ChgNew, &[vec![0], vec![4, 5]], &new)
        .is_ok());
}

#[test]
fn test_rejected_update_leaves_header_untouched() {
    let fruits = fruits_header();
    let before = fruits.clone();

    let err = fruits.update(RowUpdate::Chg {
        indices: vec![0, 7],
        rows: vec![fruit_row("a", 1.0, "red"), fruit_row("b", 2.0, "red")],
    });
    assert!(matches!(err, Err(XdataError::IndexOutOfRange { .. })));

    let err = fruits.update(RowUpdate::New(vec![vec!["kiwi".into()]]));
    assert!(matches!(err, Err(XdataError::ShapeMismatch(_))));

    assert_eq!(fruits, before);
}

#[test]
fn test_identity_permutation_round_trip() {
    let fruits = fruits_header();
    let same = fruits.clone().update(RowUpdate::Perm(vec![0, 1, 2, 3])).unwrap();
    assert_eq!(same, fruits);

    let reversed = fruits.update(RowUpdate::Perm(vec![3, 2, 1, 0])).unwrap();
    assert_eq!(reversed.get_value(0, 0).unwrap(), text("cherry"));
}

#[test]
fn test_widening_is_monotonic() {
    let fruits = fruits_header();
    let step1 = fruits
        .update(RowUpdate::Chg {
            indices: vec![1],
            rows: vec![vec!["pear".into(), true.into(), "green".into()]],
        })
        .unwrap();
    assert_eq!(step1.column_descriptors().unwrap()[1].value_type(), ValueType::Mixed);

    // numeric again does not narrow the column back
    let step2 = step1
        .update(RowUpdate::Chg {
            indices: vec![1],
            rows: vec![fruit_row("pear", 0.75, "green")],
        })
        .unwrap();
    assert_eq!(step2.column_descriptors().unwrap()[1].value_type(), ValueType::Mixed);

    let step3 = step2
        .add_column("organic", vec![true.into(), false.into(), 1.0.into(), true.into()])
        .unwrap();
    assert_eq!(step3.column_descriptors().unwrap()[3].value_type(), ValueType::Mixed);
    assert_eq!(step3.column_descriptors().unwrap()[0].value_type(), ValueType::String);
}

#[test]
fn test_all_widens_numeric_column() {
    let fruits = fruits_header();
    let replaced = fruits
        .update(RowUpdate::All(vec![
            fruit_row("kiwi", 0.3, "green"),
            vec!["lime".into(), "unknown".into(), "green".into()],
        ]))
        .unwrap();
    assert_eq!(replaced.n_elem(), 2);
    assert_eq!(replaced.column_descriptors().unwrap()[1].value_type(), ValueType::Mixed);
    assert_eq!(replaced.column_descriptors().unwrap()[2].value_type(), ValueType::String);
    assert_eq!(fruits.column_descriptors().unwrap()[1].value_type(), ValueType::Numeric);
}

#[test]
fn test_new_widens_numeric_column() {
    let fruits = fruits_header();
    let more = fruits
        .update(RowUpdate::New(vec![vec!["fig".into(), true.into(), "purple".into()]]))
        .unwrap();
    assert_eq!(more.n_elem(), 5);
    assert_eq!(more.column_descriptors().unwrap()[1].value_type(), ValueType::Mixed);
    assert_eq!(more.get_value(4, 1).unwrap(), Value::Logical(true));

    let old: Header = fruits.into();
    let new: Header = more.into();
    assert!(old.check_header_update(UpdateFlag::New, &[vec![4]], &new).is_ok());
}

#[test]
fn test_add_column_then_merge() {
    let fruits = fruits_header()
        .add_column("stock", vec![10.0.into(), 0.0.into(), 4.0.into(), 10.0.into()])
        .unwrap();
    let merged = fruits.merge_lines(&[0, 3]).unwrap();
    assert_eq!(merged.len(), 4);
    assert_eq!(merged[2], Value::List(vec![text("red")]));
    assert_eq!(merged[3], Value::List(vec![Value::Number(10.0)]));
    // merging does not shrink the header
    assert_eq!(fruits.n_elem(), 4);
}

#[test]
fn test_undifferentiated_header_enumerates() {
    let trials: Header = CategoricalHeader::undifferentiated("trial", 3).into();
    assert_eq!(
        trials.get_item_names(&[0, 1, 2]).unwrap(),
        vec![Value::Number(0.0), Value::Number(1.0), Value::Number(2.0)]
    );
    assert!(trials.column_descriptors().is_empty());
}

// ============================================================================
// MEASURE SCENARIOS
// ============================================================================

#[test]
fn test_measure_values() {
    let x = x_header(6);
    assert_eq!(x.get_value(3, 0).unwrap(), 2.5);

    let empty = x.update_measure_header(None, Some(0), None);
    assert_eq!(empty.n_elem(), 0);
    assert!(empty.get_value(0, 0).is_err());
    assert_eq!(x.n_elem(), 6);
}

#[test]
fn test_measure_units_are_reported() {
    let header: Header = xdata::MeasureHeader::new(
        "wavelength",
        400.0,
        10,
        5.0,
        Some(vec![("nm", 1.0), ("um", 1000.0), ("pm", 0.001)].into()),
    )
    .unwrap()
    .into();
    assert_eq!(header.get_units(), vec!["nm".to_string()]);

    let table = header.get_all_units().remove(0).unwrap();
    let units: Vec<&str> = table.iter().map(|e| e.unit.as_str()).collect();
    assert_eq!(units, vec!["pm", "nm", "um"]);
    assert_eq!(table.iter().filter(|e| e.factor == 1.0).count(), 1);
}

#[test]
fn test_unit_table_needs_one_reference() {
    let none = DimensionDescriptor::new(
        "length",
        ValueType::Numeric,
        Some(UnitSpec::from(vec![("mm", 0.001), ("km", 1000.0)])),
    );
    assert!(matches!(none, Err(XdataError::InvalidArgumentType(_))));

    let two = DimensionDescriptor::new(
        "length",
        ValueType::Numeric,
        Some(UnitSpec::from(vec![("m", 1.0), ("meter", 1.0)])),
    );
    assert!(matches!(two, Err(XdataError::InvalidArgumentType(_))));
}

#[test]
fn test_measure_gate() {
    let old: Header = x_header(6).into();
    let longer: Header = x_header(8).into();
    assert!(old.check_header_update(UpdateFlag::New, &[vec![6, 7]], &longer).is_ok());
    assert!(matches!(
        old.check_header_update(UpdateFlag::Remove, &[vec![0]], &longer),
        Err(XdataError::ShapeMismatch(_))
    ));

    let renamed: Header = xdata::MeasureHeader::new("y", 1.0, 8, 0.5, Some("mm".into()))
        .unwrap()
        .into();
    assert!(matches!(
        old.check_header_update(UpdateFlag::New, &[vec![6, 7]], &renamed),
        Err(XdataError::InvariantViolation(_))
    ));
}

#[test]
fn test_flag_tokens_parse() {
    assert_eq!("chg&rm".parse::<UpdateFlag>().unwrap(), UpdateFlag::ChgRm);
    assert!(matches!("move".parse::<UpdateFlag>(), Err(XdataError::UnknownFlag(_))));
}

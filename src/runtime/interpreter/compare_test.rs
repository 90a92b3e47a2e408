use crate::{
    error::ArchetypeError,
    runtime::{
        store::{ObjectDef, Owner},
        value::{AttrLocation, Desired, Value},
    },
    syntax::{
        expression::BinaryOp,
        program::{Classification, Program},
    },
};

use super::{
    Context,
    test_support::{start, str_value},
};

#[test]
fn numbers_win_over_strings() {
    let (interp, _) = start(Program::new(0));
    // "10" > "9" fails as text but holds as numbers
    assert!(interp.result_compare(BinaryOp::Gt, &str_value("10"), &Value::Numeric(9)));
    assert!(interp.result_compare(BinaryOp::Eq, &str_value(" 3"), &Value::Numeric(3)));
    assert!(interp.result_compare(BinaryOp::Eq, &Value::from_bool(true), &Value::Numeric(1)));
}

#[test]
fn strings_order_lexicographically() {
    let (interp, _) = start(Program::new(0));
    assert!(interp.result_compare(BinaryOp::Lt, &str_value("apple"), &str_value("banana")));
    assert!(interp.result_compare(BinaryOp::Ge, &str_value("pear"), &str_value("pear")));
    assert!(!interp.result_compare(BinaryOp::Eq, &str_value("Pear"), &str_value("pear")));
}

#[test]
fn identifiers_only_test_equality() {
    let (interp, _) = start(Program::new(0));
    let a = Value::object(1);
    let b = Value::object(2);
    assert!(interp.result_compare(BinaryOp::Eq, &a, &a));
    assert!(!interp.result_compare(BinaryOp::Eq, &a, &b));
    assert!(interp.result_compare(BinaryOp::Ne, &a, &b));
    assert!(!interp.result_compare(BinaryOp::Lt, &a, &b));
    assert!(!interp.result_compare(BinaryOp::Ge, &a, &a));
}

#[test]
fn different_kinds_are_never_equal() {
    let (interp, _) = start(Program::new(0));
    assert!(!interp.result_compare(BinaryOp::Eq, &Value::object(1), &str_value("1")));
    assert!(!interp.result_compare(BinaryOp::Ne, &Value::object(1), &str_value("1")));
}

#[test]
fn undefined_equals_only_itself() {
    let (interp, _) = start(Program::new(0));
    assert!(interp.result_compare(BinaryOp::Eq, &Value::UNDEFINED, &Value::UNDEFINED));
    assert!(!interp.result_compare(BinaryOp::Eq, &Value::UNDEFINED, &Value::from_bool(false)));
    assert!(!interp.result_compare(BinaryOp::Eq, &Value::UNDEFINED, &Value::Numeric(0)));
}

#[test]
fn non_comparison_operators_are_false() {
    let (interp, _) = start(Program::new(0));
    assert!(!interp.result_compare(BinaryOp::Add, &Value::Numeric(1), &Value::Numeric(1)));
}

#[test]
fn assignment_replaces_the_binding() {
    let mut program = Program::new(0);
    let weight = program.declare("weight", Classification::Attribute);
    program.declare("rock", Classification::Object(ObjectDef::default()));
    let (mut interp, _) = start(program);

    let slot = interp.lookup(Owner::Object(1), weight, &Context::with_self(1), Desired::Lvalue);
    assert_eq!(slot, Value::AttrLocation(AttrLocation { object: 1, slot: 0 }));
    assert_eq!(interp.assignment(&slot, Value::Numeric(12)), Value::Numeric(12));
    assert_eq!(
        interp.lookup(Owner::Object(1), weight, &Context::with_self(1), Desired::Rvalue),
        Value::Numeric(12)
    );
}

#[test]
fn assignment_needs_a_location() {
    let (mut interp, _) = start(Program::new(0));
    assert_eq!(interp.assignment(&Value::Numeric(5), Value::Numeric(3)), Value::UNDEFINED);
    assert_eq!(interp.program().diagnostics(), &[ArchetypeError::NotAnLvalue]);
}

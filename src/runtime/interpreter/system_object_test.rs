use crate::{
    runtime::{
        store::{ObjectDef, Owner, TypeDef},
        value::{Desired, Value},
    },
    syntax::{
        expression::{AssignOp, Expr},
        program::{Classification, Program},
        statement::Stmt,
    },
};

use super::{
    Context, Interpreter,
    test_support::{num, start, str_value, text},
};

fn ask(interp: &mut Interpreter, request: &str) -> Value {
    interp.send_to_system(request, 0)
}

#[test]
fn sorter_hands_back_strings_in_order() {
    let (mut interp, _) = start(Program::new(0));
    ask(&mut interp, "OPEN SORTER");
    for word in ["pear", "apple", "fig"] {
        assert_eq!(ask(&mut interp, word), Value::UNDEFINED);
    }
    ask(&mut interp, "CLOSE SORTER");

    let sorted: Vec<_> = (0..4).map(|_| ask(&mut interp, "NEXT SORTED")).collect();
    assert_eq!(
        sorted,
        vec![str_value("apple"), str_value("fig"), str_value("pear"), Value::UNDEFINED]
    );
}

#[test]
fn parser_session_registers_words_for_the_sender() {
    let (mut interp, _) = start(Program::new(0));
    interp.send_to_system("OPEN PARSER", 0);
    interp.send_to_system("Take", 10);
    interp.send_to_system("NOUN LIST", 0);
    interp.send_to_system("Brass  Lamp", 2);
    interp.send_to_system("lamp", 1);
    interp.send_to_system("CLOSE PARSER", 0);

    ask(&mut interp, "PLAYER CMD");
    ask(&mut interp, "take the BRASS lamp!");
    assert_eq!(interp.system().parser.command(), "take the brass lamp");

    assert_eq!(ask(&mut interp, "PARSE"), Value::from_bool(true));
    assert_eq!(ask(&mut interp, "NEXT OBJECT"), Value::object(10));
    assert_eq!(ask(&mut interp, "NEXT OBJECT"), Value::object(2));
    assert_eq!(ask(&mut interp, "NEXT OBJECT"), Value::UNDEFINED);

    ask(&mut interp, "PLAYER CMD");
    ask(&mut interp, "xyzzy");
    assert_eq!(ask(&mut interp, "PARSE"), Value::from_bool(false));
}

#[test]
fn which_object_prefers_present_objects() {
    let (mut interp, _) = start(Program::new(0));
    interp.send_to_system("OPEN PARSER", 0);
    interp.send_to_system("NOUN LIST", 0);
    interp.send_to_system("coin", 4);
    interp.send_to_system("coin", 9);
    interp.send_to_system("CLOSE PARSER", 0);

    ask(&mut interp, "WHICH OBJECT");
    assert_eq!(ask(&mut interp, "Coin"), Value::object(4));

    ask(&mut interp, "ROLL CALL");
    interp.send_to_system("PRESENT", 9);
    ask(&mut interp, "WHICH OBJECT");
    assert_eq!(ask(&mut interp, "coin"), Value::object(9));

    ask(&mut interp, "WHICH OBJECT");
    assert_eq!(ask(&mut interp, "gem"), Value::UNDEFINED);
}

#[test]
fn abbreviation_applies_to_normalize() {
    let (mut interp, _) = start(Program::new(0));
    ask(&mut interp, "NORMALIZE");
    assert_eq!(ask(&mut interp, "Examine the LANTERN."), str_value("examine the lantern"));

    ask(&mut interp, "ABBR");
    assert_eq!(ask(&mut interp, " 4 "), Value::Numeric(4));
    ask(&mut interp, "NORMALIZE");
    assert_eq!(ask(&mut interp, "Examine the LANTERN."), str_value("exam the lant"));

    ask(&mut interp, "ABBR");
    assert_eq!(ask(&mut interp, "lots"), Value::UNDEFINED);
    assert_eq!(interp.system().abbreviate, 4);
}

#[test]
fn save_and_load_through_slots() {
    let mut program = Program::new(0);
    let score = program.declare("score", Classification::Attribute);
    program.declare("player", Classification::Object(ObjectDef::default()));
    let (mut interp, _) = start(program);
    let context = Context::with_self(1);

    let slot = interp.lookup(Owner::Object(1), score, &context, Desired::Lvalue);
    interp.assignment(&slot, Value::Numeric(10));

    ask(&mut interp, "SAVE STATE");
    assert_eq!(ask(&mut interp, "first"), Value::from_bool(true));

    interp.assignment(&slot, Value::Numeric(99));
    ask(&mut interp, "LOAD STATE");
    assert_eq!(ask(&mut interp, "first"), Value::from_bool(true));
    assert_eq!(
        interp.lookup(Owner::Object(1), score, &context, Desired::Rvalue),
        Value::Numeric(10)
    );

    ask(&mut interp, "LOAD STATE");
    assert_eq!(ask(&mut interp, "missing"), Value::UNDEFINED);
}

#[test]
fn debug_switches_toggle() {
    let (mut interp, _) = start(Program::new(0));
    assert_eq!(ask(&mut interp, "DEBUG MEMORY"), Value::from_bool(true));
    assert!(interp.config().debug.memory);
    assert_eq!(ask(&mut interp, "debug memory"), Value::from_bool(false));
    assert!(!interp.config().debug.memory);
}

#[test]
fn unknown_requests_are_undefined() {
    let (mut interp, _) = start(Program::new(0));
    assert_eq!(ask(&mut interp, "DANCE"), Value::UNDEFINED);
    // selector is still idle afterwards
    ask(&mut interp, "NORMALIZE");
    assert_eq!(ask(&mut interp, "Hi"), str_value("hi"));
}

#[test]
fn load_cannot_remove_the_object_handling_a_message() {
    let mut program = Program::new(0);
    let reload = program.vocabulary.add("reload");
    let outcome = program.declare("outcome", Classification::Attribute);
    let tag = program.declare("tag", Classification::Attribute);
    let system = || Expr::Literal(Value::object(0));
    let thing = program.declare(
        "thing",
        Classification::Type(TypeDef::default().method(
            reload,
            Stmt::Compound(vec![
                Stmt::Expr(Expr::send(text("LOAD STATE"), system())),
                Stmt::Expr(Expr::assign(
                    AssignOp::Set,
                    Expr::Attribute(outcome),
                    Expr::send(text("first"), system()),
                )),
                Stmt::Expr(Expr::assign(AssignOp::Set, Expr::Attribute(tag), num(7))),
            ]),
        )),
    );
    program.declare("purse", Classification::Object(ObjectDef::with_parent(thing)));
    let (mut interp, _) = start(program);

    ask(&mut interp, "SAVE STATE");
    assert_eq!(ask(&mut interp, "first"), Value::from_bool(true));
    let coin = interp.program_mut().store.create(thing).unwrap();
    assert_eq!(coin, 2);

    // the saved state has no dynamic objects, so the coin would vanish
    interp.send("reload", coin);
    assert_eq!(interp.program().store.object_count(), 2);
    let read = |interp: &mut Interpreter, object: usize, attribute: usize| {
        interp.lookup(
            Owner::Object(object),
            attribute,
            &Context::with_self(object),
            Desired::Rvalue,
        )
    };
    assert_eq!(read(&mut interp, coin, outcome), Value::from_bool(false));
    assert_eq!(read(&mut interp, coin, tag), Value::Numeric(7));
    assert!(interp.program().diagnostics().is_empty());

    // a static object survives any load, so its handler may restore
    interp.send("reload", 1);
    assert_eq!(interp.program().store.object_count(), 1);
    assert_eq!(read(&mut interp, 1, outcome), Value::from_bool(true));
    assert_eq!(read(&mut interp, 1, tag), Value::Numeric(7));
}

use crate::{
    config::RuntimeConfig,
    error::ArchetypeError,
    runtime::{
        store::{ObjectDef, Owner, TypeDef},
        value::{AttrLocation, Desired, Value},
    },
    syntax::{
        expression::{Expr, Keyword, Transport},
        program::{Classification, Program},
        statement::Stmt,
    },
};

use super::{
    Context,
    test_support::{num, start, start_with, str_value, text},
};

fn who_am_i() -> Stmt {
    Stmt::Expr(Expr::Keyword(Keyword::SelfObject))
}

/// Types `c` <- `b`, object `a` of type `b`. `c` handles `look` explicitly
/// and has a default; `b` only has a default.
fn layered() -> Program {
    let mut program = Program::new(0);
    let look = program.vocabulary.add("look");
    program.vocabulary.add("smell");
    let c = program.declare(
        "c",
        Classification::Type(
            TypeDef::default()
                .method(look, Stmt::write(vec![text("C looks")]))
                .others(Stmt::write(vec![text("C default")])),
        ),
    );
    let b = program.declare(
        "b",
        Classification::Type(TypeDef::with_parent(c).others(Stmt::write(vec![text("B default")]))),
    );
    program.declare("a", Classification::Object(ObjectDef::with_parent(b)));
    program
}

#[test]
fn explicit_handler_beats_nearer_default() {
    let (mut interp, console) = start(layered());
    assert!(interp.send("look", 1).is_some());
    assert_eq!(console.take_output(), "C looks\n");
}

#[test]
fn nearest_default_handles_unknown_messages() {
    let (mut interp, console) = start(layered());
    assert!(interp.send("smell", 1).is_some());
    assert_eq!(console.take_output(), "B default\n");
}

#[test]
fn instance_method_comes_first() {
    let mut program = layered();
    let look = program.vocabulary.add("look");
    let b = program.ids.lookup("b").map(|id| program.ids.get(id).unwrap().integer).unwrap();
    program.declare(
        "d",
        Classification::Object(ObjectDef::with_parent(b).method(look, Stmt::write(vec![text("D looks")]))),
    );
    let (mut interp, console) = start(program);
    interp.send("look", 2);
    assert_eq!(console.take_output(), "D looks\n");
}

#[test]
fn unhandled_message_is_none() {
    let mut program = Program::new(0);
    let look = program.vocabulary.add("look");
    let plain = program.declare("plain", Classification::Type(TypeDef::default()));
    program.declare("rock", Classification::Object(ObjectDef::with_parent(plain)));
    let (mut interp, console) = start(program);

    assert_eq!(
        interp.send_message(Transport::Send, look, Owner::Object(1), &Context::default()),
        None
    );
    assert_eq!(interp.send("jump", 1), None);
    assert_eq!(console.output(), "");
}

fn probes() -> (Program, usize, usize, usize) {
    let mut program = Program::new(0);
    let who = program.vocabulary.add("who");
    let from = program.vocabulary.add("from");
    let what = program.vocabulary.add("what");
    let probe = program.declare(
        "probe",
        Classification::Type(
            TypeDef::default()
                .method(who, who_am_i())
                .method(from, Stmt::Expr(Expr::Keyword(Keyword::Sender)))
                .method(what, Stmt::Expr(Expr::Keyword(Keyword::Message))),
        ),
    );
    program.declare("p1", Classification::Object(ObjectDef::with_parent(probe)));
    program.declare("p2", Classification::Object(ObjectDef::with_parent(probe)));
    (program, who, from, what)
}

#[test]
fn send_rebinds_self_and_sender() {
    let (program, who, from, what) = probes();
    let (mut interp, _) = start(program);
    let caller = Context::with_self(2);

    assert_eq!(
        interp.send_message(Transport::Send, who, Owner::Object(1), &caller),
        Some(Value::object(1))
    );
    assert_eq!(
        interp.send_message(Transport::Send, from, Owner::Object(1), &caller),
        Some(Value::object(2))
    );
    assert_eq!(
        interp.send_message(Transport::Send, what, Owner::Object(1), &caller),
        Some(Value::Message(what))
    );
}

#[test]
fn pass_keeps_self_and_sender() {
    let (program, who, from, _) = probes();
    let (mut interp, _) = start(program);
    let caller = Context {
        self_obj: 2,
        sender: 1,
        ..Context::default()
    };

    assert_eq!(
        interp.send_message(Transport::Pass, who, Owner::Object(1), &caller),
        Some(Value::object(2))
    );
    assert_eq!(
        interp.send_message(Transport::Pass, from, Owner::Object(1), &caller),
        Some(Value::object(1))
    );
}

#[test]
fn sending_to_a_type_keeps_self() {
    let (program, who, _, _) = probes();
    let (mut interp, _) = start(program);
    assert_eq!(
        interp.send_message(Transport::Send, who, Owner::Type(1), &Context::with_self(2)),
        Some(Value::object(2))
    );
}

/// Type `thing` with `label` reading the asker's `name`, and `weight` 5;
/// object `x` of `thing` with its own `name`.
fn labelled() -> (Program, usize, usize, usize) {
    let mut program = Program::new(0);
    let name = program.declare("name", Classification::Attribute);
    let label = program.declare("label", Classification::Attribute);
    let weight = program.declare("weight", Classification::Attribute);
    let thing = program.declare(
        "thing",
        Classification::Type(
            TypeDef::default()
                .attribute(label, Expr::Attribute(name))
                .attribute(weight, num(5)),
        ),
    );
    program.declare(
        "x",
        Classification::Object(ObjectDef::with_parent(thing).attribute(name, text("x-name"))),
    );
    (program, label, weight, thing)
}

#[test]
fn inherited_attribute_is_evaluated_as_the_asker() {
    let (program, label, _, thing) = labelled();
    let (mut interp, _) = start(program);

    assert_eq!(
        interp.lookup(Owner::Object(1), label, &Context::default(), Desired::Rvalue),
        str_value("x-name")
    );
    assert_eq!(
        interp.lookup(Owner::Type(thing), label, &Context::with_self(1), Desired::Rvalue),
        str_value("x-name")
    );
}

#[test]
fn missing_attribute_reads_undefined() {
    let (program, _, _, _) = labelled();
    let (mut interp, _) = start(program);
    assert_eq!(
        interp.lookup(Owner::Object(1), 99, &Context::default(), Desired::Rvalue),
        Value::UNDEFINED
    );
}

#[test]
fn lvalue_creates_binding_on_the_instance_only() {
    let (program, _, weight, thing) = labelled();
    let (mut interp, _) = start(program);
    let context = Context::with_self(1);

    let slot = interp.lookup(Owner::Object(1), weight, &context, Desired::Lvalue);
    assert_eq!(slot, Value::AttrLocation(AttrLocation { object: 1, slot: 1 }));
    assert_eq!(interp.program().store.object(1).unwrap().attributes.len(), 2);

    // the fresh binding shadows the inherited one
    assert_eq!(
        interp.lookup(Owner::Object(1), weight, &context, Desired::Rvalue),
        Value::UNDEFINED
    );
    assert_eq!(
        interp.lookup(Owner::Type(thing), weight, &context, Desired::Rvalue),
        Value::Numeric(5)
    );

    // asking again reuses the binding
    assert_eq!(interp.lookup(Owner::Object(1), weight, &context, Desired::Lvalue), slot);
}

#[test]
fn types_are_not_assignable() {
    let (program, _, weight, thing) = labelled();
    let (mut interp, _) = start(program);
    assert_eq!(
        interp.lookup(Owner::Type(thing), weight, &Context::default(), Desired::Lvalue),
        Value::UNDEFINED
    );
    assert_eq!(interp.program().store.type_def(thing).unwrap().attributes.len(), 2);
}

#[test]
fn runaway_recursion_is_cut_off() {
    let mut program = Program::new(0);
    let again = program.vocabulary.add("again");
    let echo = program.declare(
        "echo",
        Classification::Type(TypeDef::default().method(
            again,
            Stmt::Expr(Expr::send(
                Expr::Literal(Value::Message(again)),
                Expr::Keyword(Keyword::SelfObject),
            )),
        )),
    );
    program.declare("e", Classification::Object(ObjectDef::with_parent(echo)));
    let config = RuntimeConfig {
        max_call_depth: 8,
        ..RuntimeConfig::default()
    };
    let (mut interp, _) = start_with(program, config);

    assert_eq!(interp.send("again", 1), Some(Value::UNDEFINED));
    assert_eq!(interp.depth, 0);
}

#[test]
fn handling_object_cannot_be_destroyed() {
    let mut program = Program::new(0);
    let vanish = program.vocabulary.add("vanish");
    let fragile = program.declare(
        "fragile",
        Classification::Type(
            TypeDef::default().method(vanish, Stmt::Destroy(Expr::Keyword(Keyword::SelfObject))),
        ),
    );
    let (mut interp, _) = start(program);
    let made = interp.program_mut().store.create(fragile).unwrap();

    interp.send("vanish", made);
    assert_eq!(interp.program().diagnostics(), &[ArchetypeError::InFlight(made)]);
    assert_eq!(interp.program().store.object_count(), made);

    assert_eq!(interp.destroy_object(made), Ok(()));
    assert_eq!(interp.program().store.object_count(), made - 1);
}

#[test]
fn messages_to_object_zero_reach_the_system() {
    let mut program = Program::new(0);
    let normalize = program.vocabulary.add("NORMALIZE");
    let phrase = program.vocabulary.add("Open The Door");
    let (mut interp, _) = start(program);
    let context = Context::default();

    interp.send_message(Transport::Send, normalize, Owner::Object(0), &context);
    assert_eq!(
        interp.send_message(Transport::Send, phrase, Owner::Object(0), &context),
        Some(str_value("open the door"))
    );
}

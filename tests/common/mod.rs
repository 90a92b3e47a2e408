//! Builders shared by the integration tests.
#![allow(dead_code)]

use archetype::{
    config::RuntimeConfig,
    runtime::{console::BufferConsole, interpreter::Interpreter, value::Value},
    syntax::{expression::Expr, program::Program},
};

pub fn num(n: i32) -> Expr {
    Expr::Literal(Value::Numeric(n))
}

pub fn text(s: &str) -> Expr {
    Expr::Literal(Value::Str(s.to_string()))
}

/// Object 0 as an expression.
pub fn system() -> Expr {
    Expr::Literal(Value::object(0))
}

pub fn seeded() -> RuntimeConfig {
    RuntimeConfig {
        random_seed: Some(1),
        ..RuntimeConfig::default()
    }
}

pub fn start(program: Program) -> (Interpreter, BufferConsole) {
    start_with(program, seeded())
}

pub fn start_with(program: Program, config: RuntimeConfig) -> (Interpreter, BufferConsole) {
    let console = BufferConsole::new();
    let interp = Interpreter::new(program)
        .with_config(config)
        .with_console(console.clone());
    (interp, console)
}
